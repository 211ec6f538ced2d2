//! Reply generation errors.

use thiserror::Error;

use super::SettingsError;

/// Failures on the reply path. All of them are reported back over the
/// message channel as `{error}` and never retried automatically.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("No API key configured (required for {backend}). For Ollama or Open WebUI, set the API base to http://localhost:11434 or http://localhost:3000 and leave the key empty.")]
    MissingCredential { backend: String },

    #[error("HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid completion response: {0}")]
    Parse(String),

    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Settings unavailable: {0}")]
    Settings(#[from] SettingsError),
}

impl ReplyError {
    /// Whether the error was raised before any request left the process.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential { .. } | Self::Channel(_) | Self::Settings(_)
        )
    }
}

impl From<serde_json::Error> for ReplyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
