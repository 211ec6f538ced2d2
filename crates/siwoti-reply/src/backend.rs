//! Backend shape resolution.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use siwoti_protocols::{ReplyError, Settings};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_LOCAL_MODEL: &str = "llama3.2";

const OPENAI_PATH: &str = "/v1/chat/completions";
const WEBUI_PATH: &str = "/api/chat/completions";
const WEBUI_PATH_HINT: &str = "/api/chat";
const WEBUI_HINTS: [&str; 3] = [WEBUI_PATH_HINT, "open-webui", ":3000"];

static OLLAMA_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)localhost|127\.0\.0\.1|ollama").expect("valid ollama pattern"));

/// Chat-completion API convention implied by the API base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    OpenAiCompatible,
    Ollama,
    OpenWebUi,
}

impl BackendKind {
    /// Infer the backend from a normalized API base.
    pub fn detect(api_base: &str) -> Self {
        if WEBUI_HINTS.iter().any(|hint| api_base.contains(hint)) {
            Self::OpenWebUi
        } else if OLLAMA_HINT.is_match(api_base) {
            Self::Ollama
        } else {
            Self::OpenAiCompatible
        }
    }

    /// Local backends take no bearer key.
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::OpenAiCompatible)
    }

    pub fn default_model(&self) -> &'static str {
        if self.is_local() {
            DEFAULT_LOCAL_MODEL
        } else {
            DEFAULT_OPENAI_MODEL
        }
    }

    /// Completion endpoint for `api_base`.
    pub fn endpoint(&self, api_base: &str) -> String {
        if api_base.contains(WEBUI_PATH_HINT) {
            return api_base.to_string();
        }
        match self {
            Self::OpenWebUi => format!("{}{}", api_base, WEBUI_PATH),
            Self::Ollama | Self::OpenAiCompatible => format!("{}{}", api_base, OPENAI_PATH),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAiCompatible => "OpenAI",
            Self::Ollama => "Ollama",
            Self::OpenWebUi => "Open WebUI",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything needed to address one backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBackend {
    pub kind: BackendKind,
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl ResolvedBackend {
    /// Resolve from stored settings.
    ///
    /// Fails with [`ReplyError::MissingCredential`] when an OpenAI-compatible
    /// backend has no key.
    pub fn from_settings(settings: &Settings) -> Result<Self, ReplyError> {
        let api_base = settings.api_base();
        let kind = BackendKind::detect(&api_base);
        let api_key = if kind.is_local() {
            None
        } else {
            let key = settings.api_key().ok_or_else(|| ReplyError::MissingCredential {
                backend: kind.name().to_string(),
            })?;
            Some(key.to_string())
        };

        Ok(Self {
            kind,
            endpoint: kind.endpoint(&api_base),
            model: settings.model().unwrap_or(kind.default_model()).to_string(),
            api_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(api_base: Option<&str>, api_key: Option<&str>) -> Settings {
        Settings {
            api_base: api_base.map(str::to_string),
            api_key: api_key.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_detect() {
        assert_eq!(BackendKind::detect("https://api.openai.com"), BackendKind::OpenAiCompatible);
        assert_eq!(BackendKind::detect("http://localhost:11434"), BackendKind::Ollama);
        assert_eq!(BackendKind::detect("http://127.0.0.1:8080"), BackendKind::Ollama);
        assert_eq!(BackendKind::detect("https://OLLAMA.internal"), BackendKind::Ollama);
        assert_eq!(BackendKind::detect("http://localhost:3000"), BackendKind::OpenWebUi);
        assert_eq!(BackendKind::detect("https://chat.example.com/open-webui"), BackendKind::OpenWebUi);
        assert_eq!(BackendKind::detect("https://x.test/api/chat"), BackendKind::OpenWebUi);
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(
            BackendKind::OpenAiCompatible.endpoint("https://api.openai.com"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            BackendKind::Ollama.endpoint("http://localhost:11434"),
            "http://localhost:11434/v1/chat/completions"
        );
        assert_eq!(
            BackendKind::OpenWebUi.endpoint("http://localhost:3000"),
            "http://localhost:3000/api/chat/completions"
        );
        assert_eq!(
            BackendKind::OpenWebUi.endpoint("http://host/api/chat/completions"),
            "http://host/api/chat/completions"
        );
    }

    #[test]
    fn test_default_base_requires_key() {
        let err = ResolvedBackend::from_settings(&settings(None, None)).unwrap_err();
        assert!(matches!(err, ReplyError::MissingCredential { .. }));

        let err = ResolvedBackend::from_settings(&settings(None, Some("   "))).unwrap_err();
        assert!(matches!(err, ReplyError::MissingCredential { .. }));
    }

    #[test]
    fn test_openai_resolution() {
        let resolved =
            ResolvedBackend::from_settings(&settings(Some(" https://api.example.com/ "), Some(" sk-1 "))).unwrap();
        assert_eq!(resolved.kind, BackendKind::OpenAiCompatible);
        assert_eq!(resolved.endpoint, "https://api.example.com/v1/chat/completions");
        assert_eq!(resolved.model, DEFAULT_OPENAI_MODEL);
        assert_eq!(resolved.api_key.as_deref(), Some("sk-1"));
    }

    #[test]
    fn test_local_resolution_ignores_key() {
        let mut stored = settings(Some("http://localhost:11434"), Some("sk-unused"));
        stored.model = Some("mistral".to_string());
        let resolved = ResolvedBackend::from_settings(&stored).unwrap();
        assert_eq!(resolved.kind, BackendKind::Ollama);
        assert_eq!(resolved.api_key, None);
        assert_eq!(resolved.model, "mistral");

        let resolved = ResolvedBackend::from_settings(&settings(Some("http://localhost:3000"), None)).unwrap();
        assert_eq!(resolved.kind, BackendKind::OpenWebUi);
        assert_eq!(resolved.model, DEFAULT_LOCAL_MODEL);
    }
}
