//! Error types for the beatmap generation engine

use std::fmt;

/// Errors that can occur during beatmap generation
#[derive(Debug, Clone)]
pub enum GenerationError {
    /// Invalid input features (non-monotonic timestamps, mismatched arrays, ...)
    InvalidInput(String),

    /// Invalid generator or difficulty configuration
    ConfigurationError(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            GenerationError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for GenerationError {}
