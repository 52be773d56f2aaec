use std::fmt;

use bluewater_proposer::{LocalHeaderError, ResolutionError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status codes the header endpoint can return, named after their gRPC equivalents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Code {
    FailedPrecondition,
    NotFound,
    Internal,
    Cancelled,
    DeadlineExceeded,
}

impl Code {
    /// HTTP status conventionally used for this code by beacon node APIs.
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::FailedPrecondition => 503,
            Self::NotFound => 404,
            Self::Internal => 500,
            // nginx's "client closed request"
            Self::Cancelled => 499,
            Self::DeadlineExceeded => 504,
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FailedPrecondition => "FAILED_PRECONDITION",
            Self::NotFound => "NOT_FOUND",
            Self::Internal => "INTERNAL",
            Self::Cancelled => "CANCELLED",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
        };
        f.write_str(name)
    }
}

/// Error returned to RPC callers.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct RpcStatus {
    pub code: Code,
    pub message: String,
}

impl RpcStatus {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn deadline_exceeded() -> Self {
        Self::new(Code::DeadlineExceeded, "Deadline exceeded while building local header")
    }
}

impl From<&LocalHeaderError> for Code {
    fn from(err: &LocalHeaderError) -> Self {
        match err {
            LocalHeaderError::NotReady(_) | LocalHeaderError::ForkNotActive { .. } => {
                Self::FailedPrecondition
            }
            LocalHeaderError::Resolution(ResolutionError::NotFound { .. }) => Self::NotFound,
            LocalHeaderError::Resolution(ResolutionError::Internal(_)) |
            LocalHeaderError::Production(_) |
            LocalHeaderError::CommitmentsRoot(_) => Self::Internal,
            LocalHeaderError::Cancelled(_) => Self::Cancelled,
        }
    }
}

impl From<LocalHeaderError> for RpcStatus {
    fn from(err: LocalHeaderError) -> Self {
        Self::new(Code::from(&err), err.to_string())
    }
}
