//! Lazily loaded site table.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::site::{SiteDescriptor, SiteTable};

/// Where the site-configuration document comes from.
#[async_trait]
pub trait SiteConfigSource: Send + Sync {
    async fn fetch(&self) -> Result<String, ConfigError>;
}

/// Reads the document from a file on disk.
pub struct FileSiteSource {
    path: PathBuf,
}

impl FileSiteSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SiteConfigSource for FileSiteSource {
    async fn fetch(&self) -> Result<String, ConfigError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ConfigError::NotFound(self.path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Serves a document held in memory.
pub struct StaticSiteSource {
    content: String,
}

impl StaticSiteSource {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into() }
    }
}

#[async_trait]
impl SiteConfigSource for StaticSiteSource {
    async fn fetch(&self) -> Result<String, ConfigError> {
        Ok(self.content.clone())
    }
}

/// Process-scoped site table, loaded on first use and kept until an explicit
/// [`SiteRegistry::reload`].
///
/// A document that cannot be fetched or parsed yields an empty table, so
/// every site is treated as unsupported instead of failing the caller.
pub struct SiteRegistry {
    source: Arc<dyn SiteConfigSource>,
    table: RwLock<Option<Arc<SiteTable>>>,
}

impl SiteRegistry {
    pub fn new(source: Arc<dyn SiteConfigSource>) -> Self {
        Self {
            source,
            table: RwLock::new(None),
        }
    }

    /// Registry over a table the caller parsed itself.
    pub fn with_table(table: SiteTable) -> Self {
        Self {
            source: Arc::new(StaticSiteSource::new("{}")),
            table: RwLock::new(Some(Arc::new(table))),
        }
    }

    /// The loaded table, loading it on first call.
    pub async fn table(&self) -> Arc<SiteTable> {
        if let Some(table) = self.table.read().clone() {
            return table;
        }

        let loaded = Arc::new(self.load().await);
        let mut slot = self.table.write();
        // A concurrent first call may have finished first; keep its table.
        slot.get_or_insert_with(|| loaded).clone()
    }

    /// Re-read the document and replace the table.
    pub async fn reload(&self) -> Arc<SiteTable> {
        let loaded = Arc::new(self.load().await);
        *self.table.write() = Some(loaded.clone());
        loaded
    }

    /// Descriptor for `hostname`, `None` when the site is unsupported.
    pub async fn resolve(&self, hostname: &str) -> Option<SiteDescriptor> {
        let table = self.table().await;
        let descriptor = table.resolve(hostname).cloned();
        debug!(hostname, supported = descriptor.is_some(), "Site support check");
        descriptor
    }

    pub fn is_loaded(&self) -> bool {
        self.table.read().is_some()
    }

    async fn load(&self) -> SiteTable {
        let parsed = match self.source.fetch().await {
            Ok(content) => SiteTable::from_json(&content),
            Err(e) => Err(e),
        };
        match parsed {
            Ok(table) => {
                info!("Loaded site configuration with {} pattern(s)", table.len());
                table
            }
            Err(e) => {
                warn!("Failed to load site configuration, no sites supported: {}", e);
                SiteTable::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::NamedTempFile;

    struct CountingSource {
        content: parking_lot::Mutex<String>,
        fetches: AtomicUsize,
    }

    impl CountingSource {
        fn new(content: &str) -> Self {
            Self {
                content: parking_lot::Mutex::new(content.to_string()),
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SiteConfigSource for CountingSource {
        async fn fetch(&self) -> Result<String, ConfigError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.content.lock().clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl SiteConfigSource for FailingSource {
        async fn fetch(&self) -> Result<String, ConfigError> {
            Err(ConfigError::NotFound("sites.json".to_string()))
        }
    }

    #[tokio::test]
    async fn test_loads_once() {
        let source = Arc::new(CountingSource::new(r#"{ "a.test": [".c"] }"#));
        let registry = SiteRegistry::new(source.clone());
        assert!(!registry.is_loaded());

        assert!(registry.resolve("a.test").await.is_some());
        assert!(registry.resolve("b.test").await.is_none());
        registry.table().await;

        assert!(registry.is_loaded());
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let source = Arc::new(CountingSource::new(r#"{ "a.test": [".c"] }"#));
        let registry = SiteRegistry::new(source.clone());
        assert!(registry.resolve("b.test").await.is_none());

        *source.content.lock() = r#"{ "b.test": [".c"] }"#.to_string();
        // Still cached.
        assert!(registry.resolve("b.test").await.is_none());

        registry.reload().await;
        assert!(registry.resolve("b.test").await.is_some());
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_empty_table() {
        let registry = SiteRegistry::new(Arc::new(FailingSource));
        assert!(registry.resolve("www.derstandard.at").await.is_none());
        assert!(registry.table().await.is_empty());
    }

    #[tokio::test]
    async fn test_parse_failure_degrades_to_empty_table() {
        let registry = SiteRegistry::new(Arc::new(StaticSiteSource::new("{ not json")));
        assert!(registry.table().await.is_empty());
        assert!(registry.is_loaded());
    }

    #[tokio::test]
    async fn test_file_source() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "*.example.org": {{ "comments": [".comment"] }} }}"#).unwrap();

        let registry = SiteRegistry::new(Arc::new(FileSiteSource::new(file.path())));
        let descriptor = registry.resolve("www.example.org").await.unwrap();
        assert_eq!(descriptor.comment_selectors, vec![".comment".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let source = FileSiteSource::new("/nonexistent/siwoti/sites.json");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_with_table() {
        let table = SiteTable::from_json(r#"{ "a.test": [".c"] }"#).unwrap();
        let registry = SiteRegistry::with_table(table);
        assert!(registry.is_loaded());
        assert!(registry.resolve("a.test").await.is_some());
    }
}
