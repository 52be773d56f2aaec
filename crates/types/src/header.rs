//! Execution payload header for ePBS (enshrined proposer-builder separation).
//!
//! Under ePBS the beacon block commits to a builder's *header* rather than to the full
//! execution payload. When the proposer builds locally it acts as its own builder, and the
//! header it signs is assembled from the payload returned by its own execution engine.
//!
//! ## References
//! - ePBS beacon chain: `consensus-specs/specs/_features/eipxxxx/beacon-chain.md`

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use tree_hash_derive::TreeHash;

use crate::{aliases::ValidatorIndex, slot::Slot};

/// A request for a locally built header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRequest {
    pub slot: Slot,
    pub proposer_index: ValidatorIndex,
}

impl HeaderRequest {
    pub const fn new(slot: Slot, proposer_index: ValidatorIndex) -> Self {
        Self { slot, proposer_index }
    }
}

/// Execution payload header committed to by an ePBS beacon block.
///
/// | Field                      | Source for a locally built header        |
/// |----------------------------|------------------------------------------|
/// | `parent_block_hash`        | payload `parent_hash`                    |
/// | `parent_block_root`        | beacon root of the parent block          |
/// | `block_hash`               | payload `block_hash`                     |
/// | `gas_limit`                | payload `gas_limit`                      |
/// | `builder_index`            | the proposer itself                      |
/// | `slot`                     | requested slot                           |
/// | `value`                    | always 0, the proposer does not pay itself |
/// | `blob_kzg_commitments_root`| SSZ root of the payload's commitments    |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, TreeHash)]
pub struct ExecutionPayloadHeaderEpbs {
    pub parent_block_hash: B256,
    pub parent_block_root: B256,
    pub block_hash: B256,
    pub gas_limit: u64,
    pub builder_index: ValidatorIndex,
    pub slot: u64,
    pub value: u64,
    pub blob_kzg_commitments_root: B256,
}

impl ExecutionPayloadHeaderEpbs {
    /// SSZ `hash_tree_root` of the header, the value a builder bid commits to.
    pub fn hash_tree_root(&self) -> B256 {
        use tree_hash::TreeHash;

        let root = TreeHash::tree_hash_root(self);
        B256::from_slice(root.as_ref())
    }
}
