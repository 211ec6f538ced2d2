//! Message channel errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Channel closed")]
    Closed,

    #[error("Receiver dropped before responding to {0}")]
    NoResponse(String),

    #[error("Unexpected response to {0}")]
    UnexpectedResponse(String),
}
