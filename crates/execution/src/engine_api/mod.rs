// crates/execution/src/engine_api/mod.rs

pub mod client;
pub mod jwt;

use alloy_rpc_types_engine::{
    ExecutionPayloadEnvelopeV3, ForkchoiceState, ForkchoiceUpdated, PayloadAttributes, PayloadId,
};
use async_trait::async_trait;
use color_eyre::eyre;

pub const ENGINE_FORKCHOICE_UPDATED_V3: &str = "engine_forkchoiceUpdatedV3";
pub const ENGINE_GET_PAYLOAD_V3: &str = "engine_getPayloadV3";

/// The subset of the Engine API needed to build a payload locally.
#[async_trait]
pub trait EngineApi: Send + Sync {
    /// Updates the EL head and, when `payload_attributes` is set, starts a payload build.
    async fn forkchoice_updated(
        &self,
        state: ForkchoiceState,
        payload_attributes: Option<PayloadAttributes>,
    ) -> eyre::Result<ForkchoiceUpdated>;

    /// Fetches the built payload together with its blobs bundle and block value.
    async fn get_payload_envelope(
        &self,
        payload_id: PayloadId,
    ) -> eyre::Result<ExecutionPayloadEnvelopeV3>;
}
