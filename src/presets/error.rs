//! Error types for preset operations

use std::io;
use thiserror::Error;

/// Errors that can occur during preset operations
#[derive(Debug, Error)]
pub enum PresetError {
    /// Preset not found
    #[error("Preset '{0}' not found")]
    NotFound(String),

    /// Invalid preset name
    #[error("Invalid preset name '{0}': {1}")]
    InvalidName(String, String),

    /// Config directory could not be determined
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for PresetError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for PresetError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
