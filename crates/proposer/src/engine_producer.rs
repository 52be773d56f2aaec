//! [`LocalPayloadProducer`] backed by the execution engine.
//!
//! A payload is produced with the usual two-step Engine API exchange:
//!
//! 1. `engine_forkchoiceUpdatedV3` with payload attributes for the target slot, which makes
//!    the EL start a build and return a `payload_id`
//! 2. `engine_getPayloadV3(payload_id)`, which returns the payload and its blobs bundle
//!
//! The attributes come from the resolved parent state through [`PayloadContext`]. Nothing is
//! retried; any unexpected engine answer fails the request.

use std::{fmt, sync::Arc};

use alloy_eips::eip4895::Withdrawal;
use alloy_rpc_types_engine::{ForkchoiceState, PayloadAttributes};
use async_trait::async_trait;
use bluewater_execution::EngineApi;
use bluewater_types::{
    aliases::{Address, B256, ValidatorIndex},
    kzg::KzgCommitment,
    payload::{ExecutionData, LocalPayload},
    slot::Slot,
};
use color_eyre::eyre::{self, eyre};
use tracing::debug;

use crate::collaborators::LocalPayloadProducer;

/// What the engine needs to know about the parent state to build on it.
pub trait PayloadContext: Send + Sync {
    /// Execution block hash of the head the payload builds on.
    fn head_block_hash(&self) -> B256;

    fn safe_block_hash(&self) -> B256 {
        self.head_block_hash()
    }

    fn finalized_block_hash(&self) -> B256;

    /// Timestamp of `slot` on this chain.
    fn timestamp_at(&self, slot: Slot) -> u64;

    fn prev_randao(&self) -> B256;

    /// Withdrawals the payload must include.
    fn expected_withdrawals(&self) -> Vec<Withdrawal>;
}

pub struct EnginePayloadProducer {
    engine: Arc<dyn EngineApi>,
    fee_recipient: Address,
}

impl EnginePayloadProducer {
    pub fn new(engine: Arc<dyn EngineApi>, fee_recipient: Address) -> Self {
        Self { engine, fee_recipient }
    }

    fn payload_attributes<S: PayloadContext>(
        &self,
        state: &S,
        parent_root: B256,
        slot: Slot,
    ) -> PayloadAttributes {
        PayloadAttributes {
            timestamp: state.timestamp_at(slot),
            prev_randao: state.prev_randao(),
            suggested_fee_recipient: self.fee_recipient,
            withdrawals: Some(state.expected_withdrawals()),
            parent_beacon_block_root: Some(parent_root),
        }
    }
}

impl fmt::Debug for EnginePayloadProducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnginePayloadProducer")
            .field("engine", &"<dyn EngineApi>")
            .field("fee_recipient", &self.fee_recipient)
            .finish()
    }
}

#[async_trait]
impl<S: PayloadContext> LocalPayloadProducer<S> for EnginePayloadProducer {
    async fn produce_local_payload(
        &self,
        state: &S,
        parent_root: B256,
        slot: Slot,
        proposer_index: ValidatorIndex,
    ) -> eyre::Result<LocalPayload> {
        let forkchoice = ForkchoiceState {
            head_block_hash: state.head_block_hash(),
            safe_block_hash: state.safe_block_hash(),
            finalized_block_hash: state.finalized_block_hash(),
        };
        let attributes = self.payload_attributes(state, parent_root, slot);

        debug!(
            %slot,
            proposer_index,
            head = %forkchoice.head_block_hash,
            "Requesting payload build"
        );
        let updated = self.engine.forkchoice_updated(forkchoice, Some(attributes)).await?;

        let status = &updated.payload_status.status;
        if status.is_invalid() {
            return Err(eyre!("Execution engine rejected head: {status}"));
        }
        if status.is_syncing() {
            return Err(eyre!("Execution engine is syncing"));
        }
        let payload_id = updated
            .payload_id
            .ok_or_else(|| eyre!("Execution engine did not return a payload id"))?;

        let envelope = self.engine.get_payload_envelope(payload_id).await?;

        let bundle = &envelope.blobs_bundle;
        if bundle.commitments.len() != bundle.proofs.len() {
            return Err(eyre!(
                "Inconsistent blobs bundle: {} commitments, {} proofs",
                bundle.commitments.len(),
                bundle.proofs.len()
            ));
        }
        let commitments = bundle.commitments.iter().map(|c| KzgCommitment::new(c.0)).collect();

        let inner = &envelope.execution_payload.payload_inner.payload_inner;
        debug!(
            ?payload_id,
            block_hash = %inner.block_hash,
            block_value = %envelope.block_value,
            "Received payload from execution engine"
        );

        let execution_data = ExecutionData {
            parent_hash: inner.parent_hash,
            block_hash: inner.block_hash,
            gas_limit: inner.gas_limit,
        };

        Ok(LocalPayload::new(execution_data, commitments))
    }
}
