//! # SIWOTI Core
//!
//! The two sides of the system and the channel between them:
//!
//! - [`BackgroundService`] - owns the reply service and the settings writer
//! - [`ContentAgent`] - scans a document and drives its annotations
//! - [`BackgroundHandle`] - request/response channel from page side to background
//! - [`Runtime`] - builds all of the above from [`siwoti_config::AppConfig`]

pub mod background;
pub mod channel;
pub mod content;
pub mod runtime;

pub use background::BackgroundService;
pub use channel::{BackgroundHandle, Envelope, DEFAULT_CHANNEL_CAPACITY};
pub use content::ContentAgent;
pub use runtime::Runtime;
