#![allow(missing_docs)]

pub mod http;
#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use color_eyre::eyre;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ExecutionError;

const JSONRPC_VERSION: &str = "2.0";

/// Carries one Engine API call to the execution client and back.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, req: &JsonRpcRequest) -> eyre::Result<JsonRpcResponse>;
}

#[derive(Debug, Serialize)]
pub struct JsonRpcRequest {
    jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    pub params: Value,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Value) -> Self {
        Self { jsonrpc: JSONRPC_VERSION, id, method: method.into(), params }
    }
}

/// The parts of a response the client acts on. `id` is null when the server could not
/// read the request.
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

impl JsonRpcResponse {
    /// Unwrap the `result` of the response to request `id`.
    ///
    /// An `error` object wins over everything else since servers may send it with a null id.
    pub fn into_result(self, id: u64) -> Result<Value, ExecutionError> {
        if let Some(err) = self.error {
            return Err(ExecutionError::JsonRpc { code: err.code, message: err.message });
        }
        if self.id != Some(id) {
            return Err(ExecutionError::InvalidResponse(format!(
                "Response id {:?} does not match request id {id}",
                self.id
            )));
        }
        self.result.ok_or_else(|| {
            ExecutionError::InvalidResponse("Missing result field in JSON-RPC response".into())
        })
    }
}
