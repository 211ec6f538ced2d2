//! HTTP transport over `reqwest`.

use async_trait::async_trait;
use siwoti_protocols::{ChatTransport, ReplyError, TransportRequest, TransportResponse};
use tracing::debug;

/// Sends completion requests with a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn post_json(&self, request: TransportRequest) -> Result<TransportResponse, ReplyError> {
        let mut builder = self
            .client
            .post(&request.endpoint)
            .header("Content-Type", "application/json")
            .json(&request.body);
        if let Some(token) = &request.bearer_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ReplyError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ReplyError::Network(e.to_string()))?;

        debug!(endpoint = %request.endpoint, status, body_len = body.len(), "Completion response");
        Ok(TransportResponse { status, body })
    }
}
