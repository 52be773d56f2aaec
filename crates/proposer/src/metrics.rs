use std::{ops::Deref, sync::Arc, time::Duration};

use bluewater_types::header::ExecutionPayloadHeaderEpbs;
use prometheus_client::{
    encoding::EncodeLabelSet,
    metrics::{
        counter::Counter,
        family::Family,
        gauge::Gauge,
        histogram::{Histogram, exponential_buckets},
    },
    registry::Registry,
};

use crate::{error::LocalHeaderError, observer::HeaderObserver};

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct FailureLabels {
    pub kind: String,
}

#[derive(Clone, Debug)]
pub struct ProposerMetrics(Arc<Inner>);

impl Deref for ProposerMetrics {
    type Target = Inner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug)]
pub struct Inner {
    requests: Counter,
    successes: Counter,
    failures: Family<FailureLabels, Counter>,
    build_time: Histogram,
    blobs_per_header: Gauge,
}

impl Inner {
    pub fn new() -> Self {
        Self {
            requests: Counter::default(),
            successes: Counter::default(),
            failures: Family::default(),
            build_time: Histogram::new(exponential_buckets(0.005, 2.0, 12)),
            blobs_per_header: Gauge::default(),
        }
    }
}

impl Default for Inner {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of the counters, for tests and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub successes: u64,
    pub blobs_per_header: i64,
}

impl ProposerMetrics {
    pub fn new() -> Self {
        Self(Arc::new(Inner::new()))
    }

    /// Create the metrics and register them under the `local_header` prefix.
    pub fn register(registry: &mut Registry) -> Self {
        let metrics = Self::new();
        let registry = registry.sub_registry_with_prefix("local_header");

        registry.register(
            "requests",
            "Local header requests handled",
            metrics.requests.clone(),
        );

        registry.register(
            "successes",
            "Local headers built successfully",
            metrics.successes.clone(),
        );

        registry.register(
            "failures",
            "Local header requests that failed, by error kind",
            metrics.failures.clone(),
        );

        registry.register(
            "build_time",
            "Time taken to build a local header (seconds)",
            metrics.build_time.clone(),
        );

        registry.register(
            "blobs_per_header",
            "Number of blob commitments in the last built header",
            metrics.blobs_per_header.clone(),
        );

        metrics
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests.get(),
            successes: self.successes.get(),
            blobs_per_header: self.blobs_per_header.get(),
        }
    }

    /// Failures recorded so far for an error `kind`. Does not create the series.
    pub fn failures(&self, kind: &str) -> u64 {
        self.failures.get(&FailureLabels { kind: kind.to_string() }).map_or(0, |c| c.get())
    }

    fn observe_build_time(&self, elapsed: Duration) {
        self.build_time.observe(elapsed.as_secs_f64());
    }
}

impl Default for ProposerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderObserver for ProposerMetrics {
    fn on_success(
        &self,
        _header: &ExecutionPayloadHeaderEpbs,
        blob_count: usize,
        elapsed: Duration,
    ) {
        self.requests.inc();
        self.successes.inc();
        self.blobs_per_header.set(blob_count as i64);
        self.observe_build_time(elapsed);
    }

    fn on_failure(&self, error: &LocalHeaderError, elapsed: Duration) {
        self.requests.inc();
        self.failures.get_or_create(&FailureLabels { kind: error.kind().to_string() }).inc();
        self.observe_build_time(elapsed);
    }
}
