use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use crate::kzg::KzgCommitment;

/// The execution fields a locally built header copies from the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionData {
    pub parent_hash: B256,
    pub block_hash: B256,
    pub gas_limit: u64,
}

/// A payload produced by the local execution engine for the proposer's own block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalPayload {
    pub execution_data: ExecutionData,
    /// Blob commitments in bundle order.
    pub commitments: Vec<KzgCommitment>,
}

impl LocalPayload {
    pub fn new(execution_data: ExecutionData, commitments: Vec<KzgCommitment>) -> Self {
        Self { execution_data, commitments }
    }

    pub fn blob_count(&self) -> usize {
        self.commitments.len()
    }
}
