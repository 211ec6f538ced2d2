//! Overlay surface protocol.
//!
//! Controls and panels live outside the host page's own tree and are
//! positioned in page coordinates, so a comment that sits inside a link never
//! swallows clicks meant for the control.

use serde::{Deserialize, Serialize};

use crate::document::{ElementHandle, Point};
use crate::types::Tone;

/// Identifier of a mounted overlay node (control or panel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlayId(pub u64);

/// Identifier of a document-level event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

/// Render state of a suggestion control and its tone menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlView {
    pub label: String,
    pub enabled: bool,
    pub tone: Tone,
    /// Tone button text; a plain arrow until the user picks a tone.
    pub tone_label: String,
    pub tone_selector_enabled: bool,
    pub menu_open: bool,
}

/// Visual style of a result panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelKind {
    Reply,
    Error,
}

/// Buttons offered by a result panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelAction {
    Copy,
    Close,
}

/// Render state of a result panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelView {
    pub kind: PanelKind,
    pub title: Option<String>,
    pub body: String,
    /// Shows the "cached" badge.
    pub cached: bool,
    pub actions: Vec<PanelAction>,
}

impl PanelView {
    pub fn reply(body: impl Into<String>, cached: bool) -> Self {
        Self {
            kind: PanelKind::Reply,
            title: None,
            body: body.into(),
            cached,
            actions: vec![PanelAction::Close],
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: PanelKind::Error,
            title: None,
            body: message.into(),
            cached: false,
            actions: vec![PanelAction::Close],
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_actions(mut self, actions: Vec<PanelAction>) -> Self {
        self.actions = actions;
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == PanelKind::Error
    }
}

/// Where a panel is placed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PanelPlacement {
    /// Absolute page coordinates.
    At(Point),
    /// Fixed to the center of the viewport.
    Centered,
}

/// Rendering target for controls, panels and highlights.
///
/// The surface is driven from a single thread and is never shared.
pub trait OverlaySurface {
    /// Mount a control at absolute page coordinates.
    fn mount_control(&mut self, position: Point, view: &ControlView) -> OverlayId;

    /// Re-render a mounted control.
    fn update_control(&mut self, id: OverlayId, view: &ControlView);

    /// Mount a result panel.
    fn mount_panel(&mut self, placement: PanelPlacement, view: &PanelView) -> OverlayId;

    /// Remove a control or panel. Unknown ids are ignored.
    fn unmount(&mut self, id: OverlayId);

    /// Whether the overlay is still attached to the document.
    fn is_mounted(&self, id: OverlayId) -> bool;

    /// Outline a comment container.
    fn highlight(&mut self, element: ElementHandle);

    /// Remove every outline added by [`OverlaySurface::highlight`].
    fn clear_highlights(&mut self);

    /// Register a document-level click listener owned by a control.
    fn add_document_listener(&mut self, owner: OverlayId) -> ListenerId;

    /// Unregister a document-level listener.
    fn remove_document_listener(&mut self, id: ListenerId);
}
