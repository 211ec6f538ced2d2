//! Settings protocol.
//!
//! Settings are persisted as loose key/value pairs (the extension storage
//! layout) and read back through the typed [`Settings`] view.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SettingsError;
use crate::types::Tone;

pub const KEY_API_KEY: &str = "siwoti_apiKey";
pub const KEY_API_BASE: &str = "siwoti_apiBase";
pub const KEY_MODEL: &str = "siwoti_model";
pub const KEY_TONE: &str = "siwoti_tone";
pub const KEY_DISABLED_SITES: &str = "siwoti_disabledSites";

/// Every settings key.
pub const ALL_KEYS: [&str; 5] = [KEY_API_KEY, KEY_API_BASE, KEY_MODEL, KEY_TONE, KEY_DISABLED_SITES];

/// Public endpoint used when no API base is stored.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com";

/// Core trait for persistent key/value stores.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the given keys. Missing keys are absent from the result.
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, SettingsError>;

    /// Write the given entries, leaving other keys untouched.
    async fn set(&self, entries: Map<String, Value>) -> Result<(), SettingsError>;
}

/// Typed view of the persisted settings. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "siwoti_apiKey", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(rename = "siwoti_apiBase", default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    #[serde(rename = "siwoti_model", default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(rename = "siwoti_tone", default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,

    #[serde(rename = "siwoti_disabledSites", default)]
    pub disabled_sites: Vec<String>,
}

impl Settings {
    /// Build from raw store entries; unparseable values fall back to defaults.
    pub fn from_entries(entries: Map<String, Value>) -> Self {
        let mut settings = Settings {
            api_key: string_entry(&entries, KEY_API_KEY),
            api_base: string_entry(&entries, KEY_API_BASE),
            model: string_entry(&entries, KEY_MODEL),
            ..Default::default()
        };
        settings.tone = entries
            .get(KEY_TONE)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok());
        settings.disabled_sites = entries
            .get(KEY_DISABLED_SITES)
            .and_then(Value::as_array)
            .map(|sites| {
                sites
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        settings
    }

    /// Trimmed API key, `None` when blank.
    pub fn api_key(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }

    /// Trimmed API base without one trailing slash, or the public default.
    pub fn api_base(&self) -> String {
        match non_blank(self.api_base.as_deref()) {
            Some(base) => base.strip_suffix('/').unwrap_or(base).to_string(),
            None => DEFAULT_API_BASE.to_string(),
        }
    }

    /// Trimmed model override, `None` when blank.
    pub fn model(&self) -> Option<&str> {
        non_blank(self.model.as_deref())
    }

    /// Stored tone, or the default tone.
    pub fn tone(&self) -> Tone {
        self.tone.unwrap_or_default()
    }

    /// Whether the feature is enabled for a hostname.
    pub fn is_site_enabled(&self, hostname: &str) -> bool {
        !self.disabled_sites.iter().any(|site| site == hostname)
    }
}

fn string_entry(entries: &Map<String, Value>, key: &str) -> Option<String> {
    entries.get(key).and_then(Value::as_str).map(str::to_string)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_defaults_when_empty() {
        let settings = Settings::from_entries(Map::new());
        assert_eq!(settings.api_key(), None);
        assert_eq!(settings.api_base(), DEFAULT_API_BASE);
        assert_eq!(settings.model(), None);
        assert_eq!(settings.tone(), Tone::Funny);
        assert!(settings.is_site_enabled("example.com"));
    }

    #[test]
    fn test_from_entries() {
        let settings = Settings::from_entries(entries(json!({
            "siwoti_apiKey": "  sk-test  ",
            "siwoti_apiBase": "http://localhost:11434/",
            "siwoti_model": "llama3.2",
            "siwoti_tone": "sarcastic",
            "siwoti_disabledSites": ["www.derstandard.at", 7]
        })));
        assert_eq!(settings.api_key(), Some("sk-test"));
        assert_eq!(settings.api_base(), "http://localhost:11434");
        assert_eq!(settings.model(), Some("llama3.2"));
        assert_eq!(settings.tone(), Tone::Sarcastic);
        assert_eq!(settings.disabled_sites, vec!["www.derstandard.at".to_string()]);
        assert!(!settings.is_site_enabled("www.derstandard.at"));
    }

    #[test]
    fn test_blank_values_are_absent() {
        let settings = Settings::from_entries(entries(json!({
            "siwoti_apiKey": "   ",
            "siwoti_apiBase": "",
            "siwoti_model": " "
        })));
        assert_eq!(settings.api_key(), None);
        assert_eq!(settings.api_base(), DEFAULT_API_BASE);
        assert_eq!(settings.model(), None);
    }

    #[test]
    fn test_unknown_tone_falls_back() {
        let settings = Settings::from_entries(entries(json!({ "siwoti_tone": "angry" })));
        assert_eq!(settings.tone(), Tone::Funny);
    }

    #[test]
    fn test_serialization_uses_storage_keys() {
        let settings = Settings {
            api_key: Some("k".to_string()),
            disabled_sites: vec!["a.com".to_string()],
            ..Default::default()
        };
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["siwoti_apiKey"], "k");
        assert_eq!(json["siwoti_disabledSites"][0], "a.com");
        assert!(json.get("siwoti_model").is_none());
    }
}
