//! Preset management module
//!
//! This module provides functionality for saving, loading, and managing
//! named rename configurations. A preset captures a complete engine setup -
//! scope, filters, the whole transform pipeline, sort order, and destination
//! - so a recurring batch job can be recalled by name.
//!
//! # Storage
//!
//! Presets are stored in TOML format at `~/.config/renamr/presets.toml` by
//! default, with an automatic `.backup` of the previous file on every save.

pub mod error;
pub mod operations;
pub mod types;

pub use error::PresetError;
pub use operations::PresetManager;
pub use types::{Preset, PresetSnapshot, PresetStorage, validate_preset_name};

use std::path::PathBuf;

/// Get the default preset storage path
///
/// Returns `~/.config/renamr/presets.toml` (platform-specific).
///
/// # Errors
/// Returns `PresetError` if the config directory cannot be determined.
pub fn default_preset_path() -> Result<PathBuf, PresetError> {
    let config_dir = dirs::config_dir().ok_or(PresetError::NoConfigDir)?;
    Ok(config_dir.join("renamr").join("presets.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preset_path() {
        let path = default_preset_path().unwrap();
        assert!(path.to_string_lossy().contains("renamr"));
        assert!(path.to_string_lossy().ends_with("presets.toml"));
    }
}
