#![allow(missing_docs)]
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use alloy_rpc_types_engine::{
    ExecutionPayloadEnvelopeV3, ForkchoiceState, ForkchoiceUpdated, PayloadAttributes, PayloadId,
};
use async_trait::async_trait;
use color_eyre::eyre;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use super::{ENGINE_FORKCHOICE_UPDATED_V3, ENGINE_GET_PAYLOAD_V3, EngineApi};
use crate::{
    config::ExecutionConfig,
    transport::{JsonRpcRequest, Transport, http::HttpTransport},
};

pub struct EngineApiClient {
    transport: Arc<dyn Transport>,
    next_id: AtomicU64,
}

impl EngineApiClient {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self::with_transport(Arc::new(transport))
    }

    fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport, next_id: AtomicU64::new(1) }
    }

    /// Builds a JWT-authenticated HTTP client from `config`.
    pub fn from_config(config: &ExecutionConfig) -> eyre::Result<Self> {
        let transport = HttpTransport::new(config.engine_url.clone())?
            .with_jwt(config.jwt_secret)
            .with_timeout(config.effective_timeout());
        Ok(Self::new(transport))
    }

    async fn request<P, R>(&self, method: &str, params: P) -> eyre::Result<R>
    where
        P: Serialize + Send,
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let req = JsonRpcRequest::new(id, method, serde_json::to_value(params)?);

        let res = self.transport.send(&req).await?.into_result(id)?;

        Ok(serde_json::from_value(res)?)
    }
}

impl fmt::Debug for EngineApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineApiClient").field("transport", &"<dyn Transport>").finish()
    }
}

#[async_trait]
impl EngineApi for EngineApiClient {
    async fn forkchoice_updated(
        &self,
        state: ForkchoiceState,
        payload_attributes: Option<PayloadAttributes>,
    ) -> eyre::Result<ForkchoiceUpdated> {
        debug!(
            head = %state.head_block_hash,
            with_attributes = payload_attributes.is_some(),
            "engine_forkchoiceUpdatedV3"
        );
        self.request(ENGINE_FORKCHOICE_UPDATED_V3, (state, payload_attributes)).await
    }

    async fn get_payload_envelope(
        &self,
        payload_id: PayloadId,
    ) -> eyre::Result<ExecutionPayloadEnvelopeV3> {
        self.request(ENGINE_GET_PAYLOAD_V3, (payload_id,)).await
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::B256;
    use alloy_rpc_types_engine::PayloadStatusEnum;
    use serde_json::json;

    use super::*;
    use crate::{
        ExecutionError,
        transport::mock::{MockReply, MockTransport},
    };

    fn forkchoice_state() -> ForkchoiceState {
        ForkchoiceState {
            head_block_hash: B256::repeat_byte(1),
            safe_block_hash: B256::repeat_byte(1),
            finalized_block_hash: B256::ZERO,
        }
    }

    #[tokio::test]
    async fn forkchoice_updated_decodes_payload_id() {
        let transport = Arc::new(MockTransport::new());
        transport
            .push_response(
                ENGINE_FORKCHOICE_UPDATED_V3,
                MockReply::Result(json!({
                    "payloadStatus": {
                        "status": "VALID",
                        "latestValidHash": format!("0x{}", "01".repeat(32))
                    },
                    "payloadId": "0x0000000000000007"
                })),
            )
            .await;
        let client = EngineApiClient::with_transport(transport.clone());

        let updated = client.forkchoice_updated(forkchoice_state(), None).await.unwrap();

        assert_eq!(updated.payload_status.status, PayloadStatusEnum::Valid);
        assert_eq!(updated.payload_id, Some(PayloadId::new([0, 0, 0, 0, 0, 0, 0, 7])));

        let requests = transport.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1, ENGINE_FORKCHOICE_UPDATED_V3);
        assert!(requests[0].2[1].is_null(), "no payload attributes expected");
    }

    #[tokio::test]
    async fn json_rpc_error_is_classified() {
        let transport = MockTransport::new();
        transport
            .push_response(
                ENGINE_GET_PAYLOAD_V3,
                MockReply::RpcError { code: -38001, message: "Unknown payload".into() },
            )
            .await;
        let client = EngineApiClient::new(transport);

        let err = client.get_payload_envelope(PayloadId::new([9; 8])).await.unwrap_err();
        match err.downcast_ref::<ExecutionError>() {
            Some(ExecutionError::JsonRpc { code, message }) => {
                assert_eq!(*code, -38001);
                assert_eq!(message, "Unknown payload");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn each_request_gets_a_fresh_id() {
        let transport = Arc::new(MockTransport::new());
        let client = EngineApiClient::with_transport(transport.clone());

        for _ in 0..2 {
            transport
                .push_response(ENGINE_GET_PAYLOAD_V3, MockReply::RpcError {
                    code: -38001,
                    message: "Unknown payload".into(),
                })
                .await;
            let _ = client.get_payload_envelope(PayloadId::new([2; 8])).await;
        }

        let ids: Vec<u64> = transport.requests().await.iter().map(|(id, _, _)| *id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn response_to_another_request_is_rejected() {
        let transport = MockTransport::new();
        transport
            .push_response(ENGINE_FORKCHOICE_UPDATED_V3, MockReply::ForeignId(json!({})))
            .await;
        let client = EngineApiClient::new(transport);

        let err = client.forkchoice_updated(forkchoice_state(), None).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExecutionError>(),
            Some(ExecutionError::InvalidResponse(msg)) if msg.contains("does not match")
        ));
    }

    #[tokio::test]
    async fn missing_result_is_invalid_response() {
        let transport = MockTransport::new();
        transport.push_response(ENGINE_GET_PAYLOAD_V3, MockReply::Empty).await;
        let client = EngineApiClient::new(transport);

        let err = client.get_payload_envelope(PayloadId::new([1; 8])).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExecutionError>(),
            Some(ExecutionError::InvalidResponse(msg)) if msg.contains("Missing result")
        ));
    }
}
