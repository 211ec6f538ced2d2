//! Reply request types.

use serde::{Deserialize, Serialize};

use super::Tone;

/// Article the comment was posted under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleContext {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: String,
}

impl ArticleContext {
    pub fn new(title: impl Into<String>, content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            url: url.into(),
        }
    }

    /// Stable identity used in cache fingerprints.
    pub fn identity(&self) -> String {
        format!("{}{}", self.title, self.url)
    }
}

/// Request to generate a reply to one comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_context: Option<ArticleContext>,
}

impl ReplyRequest {
    pub fn new(comment: impl Into<String>, tone: Tone) -> Self {
        Self {
            comment: comment.into(),
            tone,
            article_context: None,
        }
    }

    pub fn with_article_context(mut self, context: ArticleContext) -> Self {
        self.article_context = Some(context);
        self
    }
}

/// A successfully generated reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReply {
    pub reply: String,
    /// True when served from the reply cache without a backend call.
    pub cached: bool,
}
