use std::time::Duration;

use bluewater_types::header::ExecutionPayloadHeaderEpbs;

use crate::error::LocalHeaderError;

/// Notified once per header request with its outcome and wall-clock duration.
///
/// Both methods default to no-ops so implementors only override what they record.
pub trait HeaderObserver: Send + Sync {
    fn on_success(
        &self,
        _header: &ExecutionPayloadHeaderEpbs,
        _blob_count: usize,
        _elapsed: Duration,
    ) {
    }

    fn on_failure(&self, _error: &LocalHeaderError, _elapsed: Duration) {}
}

/// Observer that records nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl HeaderObserver for NoopObserver {}
