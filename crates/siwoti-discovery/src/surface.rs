//! In-memory overlay surface.
//!
//! Records what would be rendered. Used by the command line front end to
//! print annotations and by tests to observe the lifecycle.

use std::collections::{BTreeMap, HashMap};

use siwoti_protocols::{
    ControlView, ElementHandle, ListenerId, OverlayId, OverlaySurface, PanelPlacement, PanelView,
    Point,
};
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub struct MountedControl {
    pub position: Point,
    pub view: ControlView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MountedPanel {
    pub placement: PanelPlacement,
    pub view: PanelView,
}

#[derive(Debug, Default)]
pub struct MemorySurface {
    next_id: u64,
    controls: BTreeMap<OverlayId, MountedControl>,
    panels: BTreeMap<OverlayId, MountedPanel>,
    highlights: Vec<ElementHandle>,
    listeners: HashMap<ListenerId, OverlayId>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Mounted controls in mount order.
    pub fn controls(&self) -> impl Iterator<Item = (OverlayId, &MountedControl)> {
        self.controls.iter().map(|(id, control)| (*id, control))
    }

    pub fn control(&self, id: OverlayId) -> Option<&MountedControl> {
        self.controls.get(&id)
    }

    /// Mounted panels in mount order.
    pub fn panels(&self) -> impl Iterator<Item = (OverlayId, &MountedPanel)> {
        self.panels.iter().map(|(id, panel)| (*id, panel))
    }

    pub fn panel(&self, id: OverlayId) -> Option<&MountedPanel> {
        self.panels.get(&id)
    }

    pub fn highlights(&self) -> &[ElementHandle] {
        &self.highlights
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Drop an overlay the way a host page rewriting its DOM would, without
    /// telling the owner.
    pub fn detach(&mut self, id: OverlayId) {
        self.controls.remove(&id);
        self.panels.remove(&id);
    }
}

impl OverlaySurface for MemorySurface {
    fn mount_control(&mut self, position: Point, view: &ControlView) -> OverlayId {
        let id = OverlayId(self.allocate());
        trace!(id = id.0, x = position.x, y = position.y, "Mount control");
        self.controls.insert(
            id,
            MountedControl {
                position,
                view: view.clone(),
            },
        );
        id
    }

    fn update_control(&mut self, id: OverlayId, view: &ControlView) {
        if let Some(control) = self.controls.get_mut(&id) {
            control.view = view.clone();
        }
    }

    fn mount_panel(&mut self, placement: PanelPlacement, view: &PanelView) -> OverlayId {
        let id = OverlayId(self.allocate());
        trace!(id = id.0, error = view.is_error(), "Mount panel");
        self.panels.insert(
            id,
            MountedPanel {
                placement,
                view: view.clone(),
            },
        );
        id
    }

    fn unmount(&mut self, id: OverlayId) {
        self.detach(id);
    }

    fn is_mounted(&self, id: OverlayId) -> bool {
        self.controls.contains_key(&id) || self.panels.contains_key(&id)
    }

    fn highlight(&mut self, element: ElementHandle) {
        if !self.highlights.contains(&element) {
            self.highlights.push(element);
        }
    }

    fn clear_highlights(&mut self) {
        self.highlights.clear();
    }

    fn add_document_listener(&mut self, owner: OverlayId) -> ListenerId {
        let id = ListenerId(self.allocate());
        self.listeners.insert(id, owner);
        id
    }

    fn remove_document_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}
