//! # SIWOTI Protocols
//!
//! Shared value types, the error taxonomy and the capability traits that
//! connect comment discovery, the overlay surface, settings persistence and
//! the reply backend. Contains no implementations.
//!
//! ## Capability Traits
//!
//! - [`DocumentScanner`] - Read-only access to a live document, including shadow roots
//! - [`OverlaySurface`] - Floating controls, result panels and highlights
//! - [`KeyValueStore`] - Persistent key/value storage behind the settings accessor
//! - [`ChatTransport`] - The opaque "send chat completion request" capability

pub mod document;
pub mod error;
pub mod message;
pub mod overlay;
pub mod settings;
pub mod transport;
pub mod types;

pub use document::{DocumentScanner, ElementHandle, PageLocation, Point, Rect, ScanRoot};
pub use error::{
    AnnotationError, ChannelError, DocumentError, ReplyError, SettingsError,
};
pub use message::{Ack, ReplyResponse, Request, Response, ScanSummary};
pub use overlay::{
    ControlView, ListenerId, OverlayId, OverlaySurface, PanelAction, PanelKind, PanelPlacement,
    PanelView,
};
pub use settings::{KeyValueStore, Settings};
pub use transport::{ChatTransport, TransportRequest, TransportResponse};
pub use types::*;
