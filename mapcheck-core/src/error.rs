//! Error types for the mapcheck engine.

use thiserror::Error;

/// Main error type for mapcheck operations.
///
/// All variants are raised eagerly at configuration or lookup time; the
/// engine performs no internal retries and generation itself is infallible
/// once a generator has been constructed.
#[derive(Error, Debug)]
pub enum MapcheckError {
    /// A size range was configured with min above max.
    #[error("invalid size range: min {min} exceeds max {max}")]
    InvalidSizeRange { min: usize, max: usize },

    /// Invalid generator construction.
    #[error("invalid generator: {message}")]
    InvalidGenerator { message: String },

    /// No generator factory was registered for the requested type.
    #[error("no generator registered for type {type_name}")]
    NoGenerator { type_name: &'static str },
}

/// Result type for mapcheck operations.
pub type Result<T> = std::result::Result<T, MapcheckError>;
