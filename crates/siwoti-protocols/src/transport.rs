//! Chat completion transport protocol.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ReplyError;

/// A JSON POST to a chat-completion endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub endpoint: String,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub bearer_token: Option<String>,
    pub body: Value,
}

/// Raw transport result. Non-2xx statuses are not errors at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The opaque "send chat completion request" capability.
///
/// Implementations only fail with [`ReplyError::Network`] when no response
/// was received at all. No timeout beyond the transport default is applied.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn post_json(&self, request: TransportRequest) -> Result<TransportResponse, ReplyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        let ok = TransportResponse { status: 200, body: String::new() };
        let created = TransportResponse { status: 204, body: String::new() };
        let redirect = TransportResponse { status: 302, body: String::new() };
        let failure = TransportResponse { status: 401, body: String::new() };
        assert!(ok.is_success());
        assert!(created.is_success());
        assert!(!redirect.is_success());
        assert!(!failure.is_success());
    }
}
