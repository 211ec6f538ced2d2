//! Reply orchestration.

use std::sync::Arc;

use siwoti_config::{redact, SettingsAccessor};
use siwoti_protocols::{
    ChatTransport, GeneratedReply, ReplyError, ReplyRequest, TransportRequest,
};
use tracing::{debug, info, warn};

use crate::api::{ChatCompletionRequest, ChatCompletionResponse};
use crate::backend::ResolvedBackend;
use crate::cache::ReplyCache;
use crate::fingerprint::fingerprint;
use crate::language;
use crate::prompts;

/// Turns reply requests into backend calls, with caching.
///
/// Concurrent requests for the same fingerprint are not coalesced: each
/// one calls the backend and the last to finish leaves its reply cached.
pub struct ReplyService {
    settings: SettingsAccessor,
    transport: Arc<dyn ChatTransport>,
    cache: ReplyCache,
}

impl ReplyService {
    pub fn new(settings: SettingsAccessor, transport: Arc<dyn ChatTransport>) -> Self {
        Self::with_cache(settings, transport, ReplyCache::new())
    }

    pub fn with_cache(
        settings: SettingsAccessor,
        transport: Arc<dyn ChatTransport>,
        cache: ReplyCache,
    ) -> Self {
        Self {
            settings,
            transport,
            cache,
        }
    }

    pub fn cache(&self) -> &ReplyCache {
        &self.cache
    }

    pub fn settings(&self) -> &SettingsAccessor {
        &self.settings
    }

    /// Generate a reply for `request`, serving repeats from the cache.
    pub async fn generate_reply(&self, request: &ReplyRequest) -> Result<GeneratedReply, ReplyError> {
        let language = language::detect(&request.comment);
        let article = request.article_context.as_ref();
        let key = fingerprint(&request.comment, request.tone, language, article);

        if let Some(reply) = self.cache.get(&key) {
            debug!(key = %key, "Serving cached reply");
            return Ok(GeneratedReply { reply, cached: true });
        }

        let settings = self.settings.load().await?;
        let backend = ResolvedBackend::from_settings(&settings)?;
        info!(
            backend = %backend.kind,
            endpoint = %backend.endpoint,
            model = %backend.model,
            key = %backend.api_key.as_deref().map(redact).unwrap_or_else(|| "none".to_string()),
            language = %language,
            tone = %request.tone,
            comment_len = request.comment.len(),
            "Requesting reply"
        );

        let prompt = prompts::render(language, &request.comment, request.tone, article);
        let body = serde_json::to_value(ChatCompletionRequest::new(backend.model.clone(), prompt))?;
        let response = self
            .transport
            .post_json(TransportRequest {
                endpoint: backend.endpoint.clone(),
                bearer_token: backend.api_key.clone(),
                body,
            })
            .await?;

        if !response.is_success() {
            warn!(status = response.status, "Backend returned an error");
            return Err(ReplyError::Transport {
                status: response.status,
                body: response.body,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&response.body)?;
        let reply = parsed
            .content()
            .ok_or_else(|| ReplyError::Parse("no reply content in response".to_string()))?
            .to_string();

        self.cache.insert(key, reply.clone());
        Ok(GeneratedReply { reply, cached: false })
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
