#![allow(missing_docs)]

use std::time::Duration;

use async_trait::async_trait;
use color_eyre::eyre;
use reqwest::{Client, header::CONTENT_TYPE};
use tracing::trace;
use url::Url;

use super::{JsonRpcRequest, JsonRpcResponse, Transport};
use crate::{ExecutionError, config::DEFAULT_ENGINE_TIMEOUT, engine_api::jwt::JwtProvider};

/// JSON-RPC over HTTP, optionally authenticated with an Engine API JWT.
pub struct HttpTransport {
    client: Client,
    url: Url,
    timeout: Duration,
    jwt_provider: Option<JwtProvider>,
}

impl HttpTransport {
    pub fn new(url: Url) -> eyre::Result<Self> {
        let client = Client::builder().pool_idle_timeout(Duration::from_secs(90)).build()?;
        Ok(Self { client, url, timeout: DEFAULT_ENGINE_TIMEOUT, jwt_provider: None })
    }

    pub fn with_jwt(mut self, secret: [u8; 32]) -> Self {
        self.jwt_provider = Some(JwtProvider::new(secret));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &JsonRpcRequest) -> eyre::Result<JsonRpcResponse> {
        let mut req_builder = self
            .client
            .post(self.url.clone())
            .timeout(self.timeout)
            .header(CONTENT_TYPE, "application/json")
            .json(request);

        if let Some(provider) = &self.jwt_provider {
            let token = provider.get_token().await?;
            req_builder = req_builder.bearer_auth(token);
        }

        trace!(method = %request.method, url = %self.url, "Sending Engine API request");

        let response = req_builder
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| ExecutionError::Transport(e.to_string()))?;
        let response_bytes =
            response.bytes().await.map_err(|e| ExecutionError::Transport(e.to_string()))?;

        serde_json::from_slice(&response_bytes)
            .map_err(|e| ExecutionError::InvalidResponse(e.to_string()).into())
    }
}
