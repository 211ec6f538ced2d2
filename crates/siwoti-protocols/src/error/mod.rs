//! Error types for the SIWOTI protocol layer.

mod annotation;
mod channel;
mod document;
mod reply;
mod settings;

pub use annotation::*;
pub use channel::*;
pub use document::*;
pub use reply::*;
pub use settings::*;
