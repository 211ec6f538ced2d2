//! Document access errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Unknown element handle: {0}")]
    UnknownElement(usize),
}
