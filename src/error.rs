//! Error types for engine construction and body registration.
//!
//! Stepping never fails; only inputs that would poison the simulation with
//! NaN or infinities are rejected, at the point they enter the engine.

use thiserror::Error;

/// Errors reported by the engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A body was created with values the integrator cannot handle
    #[error("Invalid configuration for body '{id}': {reason}")]
    InvalidBodyConfiguration {
        /// Id of the rejected body
        id: String,
        /// What was wrong with it
        reason: String,
    },

    /// The host supplied a shape tag the engine does not model
    #[error("Unknown shape kind '{0}'")]
    UnknownShapeKind(String),

    /// Engine-level settings (bounds, gravity, time steps) are unusable
    #[error("Invalid engine configuration: {0}")]
    InvalidConfiguration(String),

    /// A scene or config document could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
