//! Error types for the setforge_core library.

use crate::types::Archetype;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for setforge_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid generation request (bad duration, intensity out of range, ...)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No template fits the requested archetype/duration, even after
    /// archetype broadening and closest-duration fallback
    #[error("No template available for {archetype} at {minutes} minutes")]
    NoTemplate { archetype: Archetype, minutes: u32 },

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// A generated workout failed structural validation
    #[error("Invalid workout: {0}")]
    InvalidWorkout(String),

    /// Feedback lookup failure (the source itself failed, not an empty result)
    #[error("Feedback source error: {0}")]
    FeedbackSource(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
