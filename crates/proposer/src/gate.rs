//! Readiness gate run before any state is touched.
//!
//! Checks are evaluated in a fixed order and the first failure wins:
//!
//! 1. the node is syncing
//! 2. the head is optimistic
//! 3. the requested slot is before the ePBS fork
//!
//! A syncing node is reported as such even for pre-fork slots, and a pre-fork slot is
//! reported as `ForkNotActive` only on a fully ready node.

use bluewater_types::{fork::ForkConfig, slot::Slot};
use tracing::debug;

use crate::error::{LocalHeaderError, NotReadyReason, OptimisticError};

/// Decide whether a header can be built for `slot`.
///
/// `optimistic` is only inspected when `is_syncing` is false; callers skip the optimistic
/// query entirely for a syncing node.
pub fn check_ready(
    is_syncing: bool,
    optimistic: Result<(), OptimisticError>,
    slot: Slot,
    fork: &ForkConfig,
) -> Result<(), LocalHeaderError> {
    if is_syncing {
        debug!(%slot, "Rejecting header request, node is syncing");
        return Err(NotReadyReason::Syncing.into());
    }

    if let Err(cause) = optimistic {
        debug!(%slot, %cause, "Rejecting header request, head is optimistic");
        return Err(NotReadyReason::Optimistic(cause).into());
    }

    if !fork.is_epbs_active_at(slot) {
        let epoch = slot.epoch();
        debug!(
            %slot,
            %epoch,
            fork_epoch = %fork.epbs_fork_epoch,
            "Rejecting header request, fork not active"
        );
        return Err(LocalHeaderError::ForkNotActive { epoch, fork_epoch: fork.epbs_fork_epoch });
    }

    Ok(())
}
