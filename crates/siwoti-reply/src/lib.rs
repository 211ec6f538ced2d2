//! # SIWOTI Reply
//!
//! Reply orchestration: language detection, localized prompts, backend shape
//! resolution, the reply cache and the `reqwest` transport.

pub mod api;
pub mod backend;
pub mod cache;
pub mod fingerprint;
pub mod language;
pub mod prompts;
pub mod service;
pub mod transport;

pub use backend::{BackendKind, ResolvedBackend};
pub use cache::ReplyCache;
pub use language::{detect, Language};
pub use service::ReplyService;
pub use transport::HttpTransport;
