//! Wires the configured components into a running system.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use siwoti_config::{AppConfig, FileSiteSource, JsonFileStore, SettingsAccessor, SiteRegistry};
use siwoti_protocols::{ChatTransport, OverlaySurface};
use siwoti_reply::{HttpTransport, ReplyCache, ReplyService};

use crate::background::BackgroundService;
use crate::channel::{BackgroundHandle, DEFAULT_CHANNEL_CAPACITY};
use crate::content::ContentAgent;

/// Process-wide state: the site registry, the settings accessor and the
/// background service with its request loop.
pub struct Runtime {
    registry: Arc<SiteRegistry>,
    settings: SettingsAccessor,
    replies: Arc<ReplyService>,
    background: BackgroundHandle,
    task: JoinHandle<()>,
}

impl Runtime {
    /// Start from application config, talking to real backends over HTTP.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn start(config: &AppConfig) -> Self {
        let sites = config.sites.resolved_path();
        let store = config.settings.resolved_path();
        info!("Sites: {}, settings: {}", sites.display(), store.display());

        let registry = Arc::new(SiteRegistry::new(Arc::new(FileSiteSource::new(sites))));
        let settings = SettingsAccessor::new(Arc::new(JsonFileStore::new(store)));
        let cache = ReplyCache::with_capacity(config.cache.max_entries);
        Self::with_parts(registry, settings, Arc::new(HttpTransport::new()), cache)
    }

    /// Start from explicit components.
    pub fn with_parts(
        registry: Arc<SiteRegistry>,
        settings: SettingsAccessor,
        transport: Arc<dyn ChatTransport>,
        cache: ReplyCache,
    ) -> Self {
        let replies = Arc::new(ReplyService::with_cache(settings.clone(), transport, cache));
        let (background, task) =
            BackgroundService::new(replies.clone()).spawn(DEFAULT_CHANNEL_CAPACITY);
        Self {
            registry,
            settings,
            replies,
            background,
            task,
        }
    }

    pub fn registry(&self) -> &Arc<SiteRegistry> {
        &self.registry
    }

    pub fn settings(&self) -> &SettingsAccessor {
        &self.settings
    }

    pub fn replies(&self) -> &Arc<ReplyService> {
        &self.replies
    }

    /// A handle for sending requests to the background side.
    pub fn background(&self) -> BackgroundHandle {
        self.background.clone()
    }

    /// A content agent for one document, rendering onto `surface`.
    pub fn content_agent<S: OverlaySurface>(&self, surface: S) -> ContentAgent<S> {
        ContentAgent::new(
            self.registry.clone(),
            self.settings.clone(),
            self.background(),
            surface,
        )
    }

    /// Close the channel and wait for the request loop to end.
    ///
    /// Agents created from this runtime keep the loop alive until they are
    /// dropped too.
    pub async fn shutdown(self) {
        drop(self.background);
        if let Err(e) = self.task.await {
            warn!("Background loop ended abnormally: {}", e);
        }
    }
}
