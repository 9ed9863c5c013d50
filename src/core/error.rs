//! Error types shared by the router and its collaborators.

use thiserror::Error;

/// Failure reported by a front controller while entering a state list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ControllerError {
    message: String,
}

impl ControllerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors raised by a state/URL codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("State list cannot be encoded as a URL: {0}")]
    Unencodable(String),

    #[error("URL '{url}' does not decode to a state list: {reason}")]
    Undecodable { url: String, reason: String },
}

/// Errors surfaced by router operations and transition outcomes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouterError {
    #[error("Previous transition still pending")]
    TransitionPending,

    #[error("State list must contain at least one state")]
    EmptyStateList,

    #[error("Front controller failed: {0}")]
    Controller(#[from] ControllerError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("Transition was dropped before it settled")]
    Interrupted,
}
