//! A mock transport for testing the Engine API client.

use std::collections::HashMap;

use async_trait::async_trait;
use color_eyre::eyre::{self, eyre};
use serde_json::Value;
use tokio::sync::Mutex;

use super::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, Transport};

/// A programmed reply for one method.
pub(crate) enum MockReply {
    Result(Value),
    RpcError { code: i64, message: String },
    /// A response carrying neither `result` nor `error`.
    Empty,
    /// A successful response answering some other request id.
    ForeignId(Value),
}

/// A mock transport that can be programmed with expected responses for testing.
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: Mutex<HashMap<String, MockReply>>,
    requests: Mutex<Vec<(u64, String, Value)>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// When a request with the given `method` is received, the mock returns `reply` once.
    pub(crate) async fn push_response(&self, method: &str, reply: MockReply) {
        self.responses.lock().await.insert(method.to_string(), reply);
    }

    /// Id, method name and params of every request seen so far.
    pub(crate) async fn requests(&self) -> Vec<(u64, String, Value)> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &JsonRpcRequest) -> eyre::Result<JsonRpcResponse> {
        self.requests.lock().await.push((
            request.id,
            request.method.clone(),
            request.params.clone(),
        ));

        let id = Some(request.id);
        match self.responses.lock().await.remove(&request.method) {
            Some(MockReply::Result(result)) => {
                Ok(JsonRpcResponse { id, result: Some(result), error: None })
            }
            Some(MockReply::RpcError { code, message }) => Ok(JsonRpcResponse {
                id,
                result: None,
                error: Some(JsonRpcError { code, message }),
            }),
            Some(MockReply::Empty) => Ok(JsonRpcResponse { id, result: None, error: None }),
            Some(MockReply::ForeignId(result)) => Ok(JsonRpcResponse {
                id: Some(request.id.wrapping_add(1)),
                result: Some(result),
                error: None,
            }),
            None => Err(eyre!(
                "MockTransport: received unexpected call to method '{}'",
                request.method
            )),
        }
    }
}
