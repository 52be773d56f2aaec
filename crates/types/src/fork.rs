//! Fork schedule relevant to header construction.
//!
//! Lives in the types crate so the proposer pipeline and the CLI config share one definition.

use serde::{Deserialize, Serialize};

use crate::slot::{Epoch, Slot};

/// Sentinel epoch for a fork that is not scheduled.
pub const FAR_FUTURE_EPOCH: Epoch = Epoch::new(u64::MAX);

/// Fork activation parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkConfig {
    /// First epoch at which ePBS headers are produced.
    ///
    /// Defaults to `FAR_FUTURE_EPOCH` (fork not scheduled), which is left out when
    /// serializing since it does not fit a TOML integer.
    #[serde(default = "default_epbs_fork_epoch", skip_serializing_if = "is_far_future")]
    pub epbs_fork_epoch: Epoch,
}

impl ForkConfig {
    pub const fn new(epbs_fork_epoch: Epoch) -> Self {
        Self { epbs_fork_epoch }
    }

    /// Whether ePBS is active at `slot`.
    pub fn is_epbs_active_at(&self, slot: Slot) -> bool {
        slot.epoch() >= self.epbs_fork_epoch
    }
}

fn default_epbs_fork_epoch() -> Epoch {
    FAR_FUTURE_EPOCH
}

fn is_far_future(epoch: &Epoch) -> bool {
    *epoch == FAR_FUTURE_EPOCH
}

impl Default for ForkConfig {
    fn default() -> Self {
        Self { epbs_fork_epoch: default_epbs_fork_epoch() }
    }
}
