//! Annotation lifecycle.
//!
//! The manager is the only writer of the live-annotation registry. Every
//! control, panel, highlight and document listener it creates goes through
//! the [`OverlaySurface`], and [`AnnotationManager::clear_all`] sweeps all of
//! them before a new scan pass renders anything.

use std::collections::HashSet;

use siwoti_protocols::{
    AnnotationError, ControlState, ControlView, DocumentScanner, ElementHandle, GeneratedReply,
    ListenerId, OverlayId, OverlaySurface, PanelAction, PanelPlacement, PanelView, Point, Tone,
};
use tracing::{debug, info};

use crate::container::safe_container;
use crate::extractor::CandidateSet;

pub const LABEL_IDLE: &str = "Suggest";
pub const LABEL_GENERATING: &str = "…";
/// Tone button text until the user picks a tone.
pub const TONE_PLACEHOLDER: &str = "▾";

/// Control inset from the container's right edge.
pub const CONTROL_INSET_X: f64 = 10.0;
/// Control offset below the container's top edge.
pub const CONTROL_OFFSET_Y: f64 = 6.0;
pub const CONTROL_HEIGHT: f64 = 24.0;
/// Result panels open this far left of their control.
pub const PANEL_SHIFT_X: f64 = 220.0;
pub const PANEL_GAP_Y: f64 = 6.0;

/// One suggestion control bound to a comment container.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub control: OverlayId,
    pub container: ElementHandle,
    pub comment: String,
    pub position: Point,
    pub state: ControlState,
    /// Pending tone, read from settings once at creation.
    pub tone: Tone,
    pub tone_chosen: bool,
    pub menu_open: bool,
    pub panel: Option<OverlayId>,
    listener: Option<ListenerId>,
}

impl Annotation {
    fn view(&self) -> ControlView {
        let generating = self.state == ControlState::Generating;
        ControlView {
            label: if generating { LABEL_GENERATING } else { LABEL_IDLE }.to_string(),
            enabled: !generating,
            tone: self.tone,
            tone_label: if self.tone_chosen {
                self.tone.emoji().to_string()
            } else {
                TONE_PLACEHOLDER.to_string()
            },
            tone_selector_enabled: !generating,
            menu_open: self.menu_open,
        }
    }

    fn panel_position(&self) -> Point {
        Point::new(
            self.position.x - PANEL_SHIFT_X,
            self.position.y + CONTROL_HEIGHT + PANEL_GAP_Y,
        )
    }
}

/// What to generate once a control is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTicket {
    pub control: OverlayId,
    pub comment: String,
    pub tone: Tone,
}

/// Live-annotation registry for one document.
///
/// The host forwards its UI events here: clicks on the document go to
/// [`Self::on_document_click`], control menus to [`Self::toggle_menu`] and
/// panel close buttons to [`Self::dismiss_panel`].
pub struct AnnotationManager<S: OverlaySurface> {
    surface: S,
    annotations: Vec<Annotation>,
    /// Centered panels not bound to any control.
    floating: Vec<OverlayId>,
}

impl<S: OverlaySurface> AnnotationManager<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            annotations: Vec::new(),
            floating: Vec::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn get(&self, control: OverlayId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.control == control)
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    fn find_mut(&mut self, control: OverlayId) -> Result<&mut Annotation, AnnotationError> {
        self.annotations
            .iter_mut()
            .find(|a| a.control == control)
            .ok_or(AnnotationError::UnknownControl(control.0))
    }

    fn release(surface: &mut S, annotation: &Annotation) {
        if let Some(listener) = annotation.listener {
            surface.remove_document_listener(listener);
        }
        if let Some(panel) = annotation.panel {
            surface.unmount(panel);
        }
        surface.unmount(annotation.control);
    }

    /// Remove every control, panel, highlight and listener.
    pub fn clear_all(&mut self) {
        let swept = self.annotations.len() + self.floating.len();
        for annotation in self.annotations.drain(..) {
            Self::release(&mut self.surface, &annotation);
        }
        for panel in self.floating.drain(..) {
            self.surface.unmount(panel);
        }
        self.surface.clear_highlights();
        if swept > 0 {
            debug!(swept, "Cleared overlays");
        }
    }

    /// Attach one control per container, replacing everything from the
    /// previous pass. Returns the number of controls mounted.
    ///
    /// Candidates that resolve to an already annotated container are
    /// skipped; the first candidate keeps the control.
    pub fn annotate(&mut self, doc: &dyn DocumentScanner, candidates: &CandidateSet, tone: Tone) -> usize {
        self.clear_all();
        let scroll = doc.scroll_offset();
        let mut annotated = HashSet::new();

        for candidate in candidates {
            let container = safe_container(doc, candidate.element);
            if !annotated.insert(container) {
                debug!(container = container.0, "Container already annotated");
                continue;
            }
            let rect = doc.bounding_rect(container);
            let position = Point::new(
                scroll.x + rect.right() - CONTROL_INSET_X,
                scroll.y + rect.top + CONTROL_OFFSET_Y,
            );

            let mut annotation = Annotation {
                control: OverlayId(0),
                container,
                comment: candidate.text.clone(),
                position,
                state: ControlState::Idle,
                tone,
                tone_chosen: false,
                menu_open: false,
                panel: None,
                listener: None,
            };
            self.surface.highlight(container);
            annotation.control = self.surface.mount_control(position, &annotation.view());
            annotation.listener = Some(self.surface.add_document_listener(annotation.control));
            self.annotations.push(annotation);
        }

        info!("Annotated {} comment(s)", self.annotations.len());
        self.annotations.len()
    }

    /// Open or close a control's tone menu.
    pub fn toggle_menu(&mut self, control: OverlayId) -> Result<bool, AnnotationError> {
        let annotation = self.find_mut(control)?;
        if annotation.state == ControlState::Generating {
            return Err(AnnotationError::InvalidTransition {
                from: annotation.state,
                event: "toggle_menu",
            });
        }
        annotation.menu_open = !annotation.menu_open;
        let (open, view) = (annotation.menu_open, annotation.view());
        self.surface.update_control(control, &view);
        Ok(open)
    }

    /// Set a control's pending tone and close its menu.
    pub fn select_tone(&mut self, control: OverlayId, tone: Tone) -> Result<(), AnnotationError> {
        let annotation = self.find_mut(control)?;
        if annotation.state == ControlState::Generating {
            return Err(AnnotationError::InvalidTransition {
                from: annotation.state,
                event: "select_tone",
            });
        }
        annotation.tone = tone;
        annotation.tone_chosen = true;
        annotation.menu_open = false;
        let view = annotation.view();
        self.surface.update_control(control, &view);
        Ok(())
    }

    /// Document click: close every open menu not owned by `target`.
    pub fn on_document_click(&mut self, target: Option<OverlayId>) {
        for annotation in self.annotations.iter_mut() {
            if annotation.menu_open && Some(annotation.control) != target {
                annotation.menu_open = false;
                self.surface.update_control(annotation.control, &annotation.view());
            }
        }
    }

    /// Forget controls the host page removed, unregistering their listeners.
    /// Returns the number of controls dropped.
    pub fn observe_removals(&mut self) -> usize {
        let (detached, live): (Vec<_>, Vec<_>) = self
            .annotations
            .drain(..)
            .partition(|a| !self.surface.is_mounted(a.control));
        self.annotations = live;

        for annotation in &detached {
            Self::release(&mut self.surface, annotation);
        }
        if !detached.is_empty() {
            debug!(count = detached.len(), "Released detached controls");
        }
        detached.len()
    }

    /// Start generating for a control.
    ///
    /// A finished control passes through `Idle` first. Activating a control
    /// that is already generating is rejected.
    pub fn activate(&mut self, control: OverlayId) -> Result<ReplyTicket, AnnotationError> {
        let annotation = self.find_mut(control)?;
        if !annotation.state.can_activate() {
            return Err(AnnotationError::InvalidTransition {
                from: annotation.state,
                event: "activate",
            });
        }
        if annotation.state.is_finished() {
            annotation.state = ControlState::Idle;
        }

        annotation.state = ControlState::Generating;
        annotation.menu_open = false;
        let ticket = ReplyTicket {
            control,
            comment: annotation.comment.clone(),
            tone: annotation.tone,
        };
        let view = annotation.view();
        self.surface.update_control(control, &view);
        debug!(control = control.0, tone = %ticket.tone, "Generation started");
        Ok(ticket)
    }

    /// Render the outcome of a generation started by [`Self::activate`].
    ///
    /// Only one result panel is shown at a time: every earlier panel, of any
    /// control, is closed first. Returns the new panel.
    pub fn complete(
        &mut self,
        control: OverlayId,
        outcome: Result<GeneratedReply, String>,
    ) -> Result<OverlayId, AnnotationError> {
        let annotation = self.find_mut(control)?;
        if annotation.state != ControlState::Generating {
            return Err(AnnotationError::InvalidTransition {
                from: annotation.state,
                event: "complete",
            });
        }

        let panel_view = match outcome {
            Ok(generated) => {
                annotation.state = ControlState::Succeeded;
                PanelView::reply(generated.reply, generated.cached)
                    .with_actions(vec![PanelAction::Copy, PanelAction::Close])
            }
            Err(message) => {
                annotation.state = ControlState::Failed;
                PanelView::error(message)
            }
        };
        let position = annotation.panel_position();
        let view = annotation.view();

        self.close_panels();
        self.surface.update_control(control, &view);
        let panel = self.surface.mount_panel(PanelPlacement::At(position), &panel_view);
        self.find_mut(control)?.panel = Some(panel);
        Ok(panel)
    }

    /// Close every result panel, keeping the controls.
    fn close_panels(&mut self) {
        for annotation in self.annotations.iter_mut() {
            if let Some(panel) = annotation.panel.take() {
                self.surface.unmount(panel);
            }
        }
        for panel in self.floating.drain(..) {
            self.surface.unmount(panel);
        }
    }

    /// Close a result panel. The control it belongs to stays.
    pub fn dismiss_panel(&mut self, panel: OverlayId) -> bool {
        if let Some(annotation) = self.annotations.iter_mut().find(|a| a.panel == Some(panel)) {
            annotation.panel = None;
            self.surface.unmount(panel);
            return true;
        }
        if let Some(pos) = self.floating.iter().position(|&id| id == panel) {
            self.floating.remove(pos);
            self.surface.unmount(panel);
            return true;
        }
        false
    }

    /// Show a panel centered in the viewport, outside any control.
    pub fn show_centered_panel(&mut self, view: &PanelView) -> OverlayId {
        let panel = self.surface.mount_panel(PanelPlacement::Centered, view);
        self.floating.push(panel);
        panel
    }
}

#[cfg(test)]
#[path = "annotation_tests.rs"]
mod tests;
