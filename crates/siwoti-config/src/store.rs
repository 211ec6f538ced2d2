//! Key/value store implementations.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use siwoti_protocols::error::SettingsError;
use siwoti_protocols::settings::KeyValueStore;

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: parking_lot::Mutex<Map<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given entries.
    pub fn with_entries(entries: Map<String, Value>) -> Self {
        Self {
            entries: parking_lot::Mutex::new(entries),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, SettingsError> {
        let entries = self.entries.lock();
        Ok(select(&entries, keys))
    }

    async fn set(&self, updates: Map<String, Value>) -> Result<(), SettingsError> {
        self.entries.lock().extend(updates);
        Ok(())
    }
}

/// Store persisted as one JSON object in a file.
///
/// A missing file reads as an empty store; the file and its parent
/// directories are created on first write.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Map<String, Value>, SettingsError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, SettingsError> {
        let entries = self.read_all().await?;
        Ok(select(&entries, keys))
    }

    async fn set(&self, updates: Map<String, Value>) -> Result<(), SettingsError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_all().await?;
        entries.extend(updates);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(&entries)?;
        tokio::fs::write(&self.path, content).await?;
        debug!("Settings written to {}", self.path.display());
        Ok(())
    }
}

fn select(entries: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|key| entries.get(*key).map(|value| (key.to_string(), value.clone())))
        .collect()
}
