//! # SIWOTI Config
//!
//! Site configuration resolution, application config loading and the typed
//! settings accessor over a persistent key/value store.

mod accessor;
mod error;
mod loader;
mod registry;
mod schema;
mod site;
mod store;

pub use accessor::{redact, SettingsAccessor};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use registry::{FileSiteSource, SiteConfigSource, SiteRegistry, StaticSiteSource};
pub use schema::*;
pub use site::{matches, ArticleSelectors, SiteDescriptor, SiteTable};
pub use store::{JsonFileStore, MemoryStore};
