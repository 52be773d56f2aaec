use std::fmt;

use bluewater_types::{commitments::CommitmentsRootError, slot::Epoch};
use color_eyre::eyre;
use thiserror::Error;

/// Why the node cannot serve a header right now.
#[derive(Debug, Error)]
pub enum NotReadyReason {
    #[error("Syncing to latest head, not ready to respond")]
    Syncing,

    #[error("Validator is not ready to propose: {0}")]
    Optimistic(#[source] OptimisticError),
}

/// Reported by an [`OptimisticChecker`](crate::OptimisticChecker) when the head cannot be
/// proposed on.
#[derive(Debug, Error)]
pub enum OptimisticError {
    /// The head block has not been validated by the execution engine yet.
    #[error("the node is currently optimistic and cannot serve validators")]
    HeadOptimistic,

    /// Optimistic status could not be determined.
    #[error("could not determine optimistic status: {0}")]
    Unknown(String),
}

/// Failure to resolve the parent state and root for the target slot.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// No parent block or state exists for the slot.
    #[error("Could not find parent for slot {slot}: {reason}")]
    NotFound { slot: u64, reason: String },

    #[error("Could not get head state: {0:#}")]
    Internal(eyre::Report),
}

/// Pipeline stage a request was cancelled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    ResolveParent,
    ProducePayload,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResolveParent => f.write_str("parent resolution"),
            Self::ProducePayload => f.write_str("payload production"),
        }
    }
}

/// Errors returned by [`LocalHeaderBuilder::get_local_header`](crate::LocalHeaderBuilder).
///
/// The messages are the ones surfaced to RPC callers.
#[derive(Debug, Error)]
pub enum LocalHeaderError {
    #[error("{0}")]
    NotReady(#[from] NotReadyReason),

    #[error("EPBS fork has not occurred yet")]
    ForkNotActive { epoch: Epoch, fork_epoch: Epoch },

    #[error("{0}")]
    Resolution(#[from] ResolutionError),

    #[error("Could not get local payload: {0:#}")]
    Production(eyre::Report),

    #[error("Could not get kzg commitments root: {0}")]
    CommitmentsRoot(#[from] CommitmentsRootError),

    #[error("Request cancelled during {0}")]
    Cancelled(Stage),
}

impl LocalHeaderError {
    /// Stable, low-cardinality label for this error, used in metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotReady(NotReadyReason::Syncing) => "syncing",
            Self::NotReady(NotReadyReason::Optimistic(_)) => "optimistic",
            Self::ForkNotActive { .. } => "fork_not_active",
            Self::Resolution(ResolutionError::NotFound { .. }) => "parent_not_found",
            Self::Resolution(ResolutionError::Internal(_)) => "parent_internal",
            Self::Production(_) => "production",
            Self::CommitmentsRoot(_) => "commitments_root",
            Self::Cancelled(_) => "cancelled",
        }
    }

    /// Whether the same request may succeed if issued again later.
    ///
    /// A pre-fork slot or an oversized commitment list will fail identically on every retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NotReady(_) |
            Self::Resolution(ResolutionError::Internal(_)) |
            Self::Production(_) |
            Self::Cancelled(_) => true,
            Self::ForkNotActive { .. } |
            Self::Resolution(ResolutionError::NotFound { .. }) |
            Self::CommitmentsRoot(_) => false,
        }
    }
}
