//! Application configuration schema.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::loader::ConfigLoader;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sites: SitesConfig,

    #[serde(default)]
    pub settings: SettingsConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

/// Site-configuration document location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitesConfig {
    #[serde(default = "default_sites_path")]
    pub path: String,
}

impl SitesConfig {
    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(ConfigLoader::expand_path(&self.path))
    }
}

impl Default for SitesConfig {
    fn default() -> Self {
        Self {
            path: default_sites_path(),
        }
    }
}

fn default_sites_path() -> String {
    "config/sites.json".to_string()
}

/// Persisted settings location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    #[serde(default = "default_settings_path")]
    pub path: String,
}

impl SettingsConfig {
    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(ConfigLoader::expand_path(&self.path))
    }
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: default_settings_path(),
        }
    }
}

fn default_settings_path() -> String {
    "~/.siwoti/settings.json".to_string()
}

/// Reply cache limits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Evict oldest entries beyond this many. Absent means unbounded.
    #[serde(default)]
    pub max_entries: Option<usize>,
}
