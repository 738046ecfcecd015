//! Error types for the calculation engine

use thiserror::Error;

/// Errors surfaced by the engine's public constructors and generators
///
/// Pure formula evaluation never fails; `InvalidInput` is raised at the
/// boundaries where caller-supplied terms are first accepted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A precondition on caller-supplied input was violated
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl EngineError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        EngineError::InvalidInput(msg.into())
    }
}
