//! Typed read/write access to persisted settings.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

use siwoti_protocols::error::SettingsError;
use siwoti_protocols::settings::{
    KeyValueStore, Settings, ALL_KEYS, KEY_API_BASE, KEY_API_KEY, KEY_DISABLED_SITES, KEY_MODEL,
    KEY_TONE,
};
use siwoti_protocols::types::Tone;

/// Typed accessor over a [`KeyValueStore`].
///
/// Values are trimmed before they are written. Only explicit save actions
/// write; every other component reads.
#[derive(Clone)]
pub struct SettingsAccessor {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsAccessor {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read every setting.
    pub async fn load(&self) -> Result<Settings, SettingsError> {
        let entries = self.store.get(&ALL_KEYS).await?;
        Ok(Settings::from_entries(entries))
    }

    pub async fn tone(&self) -> Result<Tone, SettingsError> {
        let entries = self.store.get(&[KEY_TONE]).await?;
        Ok(Settings::from_entries(entries).tone())
    }

    pub async fn save_api_key(&self, api_key: &str) -> Result<(), SettingsError> {
        let api_key = api_key.trim();
        info!(
            "Saving API key: {}",
            if api_key.is_empty() { "cleared".to_string() } else { redact(api_key) }
        );
        self.set(KEY_API_KEY, Value::String(api_key.to_string())).await
    }

    pub async fn save_api_base(&self, api_base: &str) -> Result<(), SettingsError> {
        let api_base = api_base.trim();
        info!("Saving API base: {}", if api_base.is_empty() { "default" } else { api_base });
        self.set(KEY_API_BASE, Value::String(api_base.to_string())).await
    }

    pub async fn save_model(&self, model: &str) -> Result<(), SettingsError> {
        let model = model.trim();
        info!("Saving model: {}", if model.is_empty() { "auto" } else { model });
        self.set(KEY_MODEL, Value::String(model.to_string())).await
    }

    pub async fn save_tone(&self, tone: Tone) -> Result<(), SettingsError> {
        self.set(KEY_TONE, Value::String(tone.as_str().to_string())).await
    }

    /// Add or remove `hostname` from the disabled-sites list.
    pub async fn set_site_enabled(&self, hostname: &str, enabled: bool) -> Result<(), SettingsError> {
        let hostname = hostname.trim();
        if hostname.is_empty() {
            return Err(SettingsError::InvalidValue {
                key: KEY_DISABLED_SITES.to_string(),
                message: "hostname must not be empty".to_string(),
            });
        }

        let mut sites = self.load().await?.disabled_sites;
        sites.retain(|site| site != hostname);
        if !enabled {
            sites.push(hostname.to_string());
        }
        info!(hostname, enabled, "Updating disabled sites");

        let value = Value::Array(sites.into_iter().map(Value::String).collect());
        self.set(KEY_DISABLED_SITES, value).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        let mut entries = Map::new();
        entries.insert(key.to_string(), value);
        self.store.set(entries).await
    }
}

/// Log-safe preview of a secret.
pub fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
