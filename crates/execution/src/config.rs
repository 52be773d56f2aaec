#![allow(missing_docs)]
use std::time::Duration;

use url::Url;

/// Default per-request timeout for Engine API calls.
///
/// Block building on the EL can exceed a few seconds under load.
pub const DEFAULT_ENGINE_TIMEOUT: Duration = Duration::from_secs(10);

/// Holds all necessary parameters to connect to the execution node's Engine API.
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// The authenticated Engine API endpoint (HTTP).
    pub engine_url: Url,
    /// The JWT secret for authenticating the Engine API connection.
    pub jwt_secret: [u8; 32],
    /// Per-request timeout. If unset, `DEFAULT_ENGINE_TIMEOUT` applies.
    pub request_timeout: Option<Duration>,
}

impl ExecutionConfig {
    pub fn new(engine_url: Url, jwt_secret: [u8; 32]) -> Self {
        Self { engine_url, jwt_secret, request_timeout: None }
    }

    pub fn effective_timeout(&self) -> Duration {
        self.request_timeout.unwrap_or(DEFAULT_ENGINE_TIMEOUT)
    }
}
