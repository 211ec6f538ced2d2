//! Message contract between the page side and the background side.
//!
//! Requests are tagged by `type`; responses are the plain JSON shapes the
//! page side expects (`{found, count}`, `{reply, cached}`, `{error}`, `{ok}`).

use serde::{Deserialize, Serialize};

use crate::types::{GeneratedReply, ReplyRequest, Tone};

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;

/// A request sent over the message channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Request {
    /// Scan the current page and annotate every candidate comment.
    Scan,

    /// Reply to user-selected text.
    GenerateReplyFromSelection {
        comment: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tone: Option<Tone>,
    },

    /// Generate a reply for a comment.
    GenerateReply(ReplyRequest),

    SaveApiKey {
        #[serde(rename = "apiKey")]
        api_key: String,
    },

    SaveApiBase {
        #[serde(rename = "apiBase")]
        api_base: String,
    },

    SaveModel { model: String },

    SaveTone { tone: Tone },

    SetSiteEnabled { hostname: String, enabled: bool },
}

impl Request {
    /// The `type` tag, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::GenerateReplyFromSelection { .. } => "generateReplyFromSelection",
            Self::GenerateReply(_) => "generateReply",
            Self::SaveApiKey { .. } => "saveApiKey",
            Self::SaveApiBase { .. } => "saveApiBase",
            Self::SaveModel { .. } => "saveModel",
            Self::SaveTone { .. } => "saveTone",
            Self::SetSiteEnabled { .. } => "setSiteEnabled",
        }
    }
}

/// Summary returned by a scan pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub found: bool,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Text of the highest-scoring candidate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worst: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub unsupported: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

impl ScanSummary {
    pub fn unsupported() -> Self {
        Self {
            unsupported: true,
            ..Default::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn found(count: usize, worst: Option<String>) -> Self {
        Self {
            found: count > 0,
            count,
            text: Some(format!("Found {} comment(s)", count)),
            worst,
            ..Default::default()
        }
    }
}

/// Result of `generateReply`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplyResponse {
    Success {
        reply: String,
        #[serde(default, skip_serializing_if = "is_false")]
        cached: bool,
    },
    Failure {
        error: String,
    },
}

impl ReplyResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Failure { error: message.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Error text of a failure.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failure { error } => Some(error),
            Self::Success { .. } => None,
        }
    }
}

impl From<GeneratedReply> for ReplyResponse {
    fn from(generated: GeneratedReply) -> Self {
        Self::Success {
            reply: generated.reply,
            cached: generated.cached,
        }
    }
}

/// Acknowledgement of a settings write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// A response sent back over the message channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Scan(ScanSummary),
    Reply(ReplyResponse),
    Ack(Ack),
}

fn is_false(value: &bool) -> bool {
    !*value
}
