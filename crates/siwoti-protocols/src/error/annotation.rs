//! Annotation lifecycle errors.

use thiserror::Error;

use crate::types::ControlState;

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("Unknown control: {0}")]
    UnknownControl(u64),

    #[error("Invalid transition from {from:?} on {event}")]
    InvalidTransition { from: ControlState, event: &'static str },
}
