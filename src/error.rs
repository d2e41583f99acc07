//! Error types
//!
//! `SimError` covers the frame update and the engine. `ConfigError` covers
//! loading and validating tuning.

use thiserror::Error;

use crate::sim::BodyHandle;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// A required entity is absent or its body no longer exists
    #[error("entity set is missing `{0}`")]
    MissingEntity(String),
    #[error("no body with handle {0}")]
    UnknownBody(BodyHandle),
    /// Frame delta was negative or not finite
    #[error("invalid frame delta: {0} ms")]
    InvalidDelta(f32),
    /// The entity set holds a different number of obstacle pairs than tuned
    #[error("expected {expected} obstacle pairs, found {found}")]
    PairCount { expected: usize, found: usize },
    /// Generator returned a non-finite position for an obstacle pair
    #[error("obstacle generator produced a non-finite position for pair {index}")]
    InvalidPair { index: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}
