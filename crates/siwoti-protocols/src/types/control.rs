//! Suggestion control state.

use serde::{Deserialize, Serialize};

/// State of one suggestion control.
///
/// `Idle -> Generating -> {Succeeded, Failed}`; a finished control returns
/// to `Idle` when generation is invoked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlState {
    #[default]
    Idle,
    Generating,
    Succeeded,
    Failed,
}

impl ControlState {
    /// Whether the user may start a generation from this state.
    pub fn can_activate(&self) -> bool {
        !matches!(self, Self::Generating)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}
