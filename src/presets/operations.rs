//! Preset CRUD operations
//!
//! This module provides a `PresetManager` for managing saved presets with
//! idiomatic Rust APIs.

use std::fs;
use std::path::PathBuf;

use super::error::PresetError;
use super::types::{validate_preset_name, Preset, PresetSnapshot, PresetStorage};

/// Manager for preset operations
///
/// Encapsulates the storage path and provides methods for preset CRUD
/// operations.
///
/// # Examples
///
/// ```no_run
/// use renamr::presets::PresetManager;
/// use std::path::PathBuf;
///
/// let manager = PresetManager::new(PathBuf::from("~/.config/renamr/presets.toml"));
/// let presets = manager.list().unwrap();
/// ```
pub struct PresetManager {
    path: PathBuf,
    auto_backup: bool,
}

impl PresetManager {
    /// Create a new `PresetManager` with the specified storage path
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self {
            path,
            auto_backup: true,
        }
    }

    /// Create a `PresetManager` with auto-backup disabled
    #[must_use]
    pub const fn without_backup(path: PathBuf) -> Self {
        Self {
            path,
            auto_backup: false,
        }
    }

    /// Load presets from the storage file
    ///
    /// Returns an empty `PresetStorage` if the file doesn't exist.
    fn load(&self) -> Result<PresetStorage, PresetError> {
        if !self.path.exists() {
            return Ok(PresetStorage::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let storage: PresetStorage = toml::from_str(&contents)?;
        Ok(storage)
    }

    /// Save presets to the storage file
    ///
    /// Creates the parent directory if it doesn't exist.
    /// Creates a backup if `auto_backup` is enabled.
    fn persist(&self, storage: &PresetStorage) -> Result<(), PresetError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        if self.auto_backup && self.path.exists() {
            let backup_path = self.path.with_extension("toml.backup");
            fs::copy(&self.path, backup_path)?;
        }

        let toml = toml::to_string_pretty(storage)?;
        fs::write(&self.path, toml)?;

        Ok(())
    }

    /// Save a preset, overwriting any existing preset with the same name
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if:
    /// - The preset name is invalid
    /// - The storage file cannot be saved
    pub fn save(
        &self,
        name: &str,
        description: String,
        snapshot: PresetSnapshot,
    ) -> Result<Preset, PresetError> {
        validate_preset_name(name)
            .map_err(|e| PresetError::InvalidName(name.to_string(), e))?;

        let mut storage = self.load()?;
        let preset = Preset::new(name.to_string(), description, snapshot);
        storage.presets.insert(name.to_string(), preset.clone());

        self.persist(&storage)?;

        Ok(preset)
    }

    /// Get a preset by name
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if:
    /// - The storage file cannot be loaded
    /// - The preset is not found
    pub fn get(&self, name: &str) -> Result<Preset, PresetError> {
        let storage = self.load()?;
        storage
            .presets
            .get(name)
            .cloned()
            .ok_or_else(|| PresetError::NotFound(name.to_string()))
    }

    /// Delete a preset by name
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if:
    /// - The preset is not found
    /// - The storage file cannot be saved
    pub fn delete(&self, name: &str) -> Result<Preset, PresetError> {
        let mut storage = self.load()?;

        let preset = storage
            .presets
            .remove(name)
            .ok_or_else(|| PresetError::NotFound(name.to_string()))?;

        self.persist(&storage)?;

        Ok(preset)
    }

    /// List all presets, sorted by name
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if the storage file cannot be loaded.
    pub fn list(&self) -> Result<Vec<Preset>, PresetError> {
        let storage = self.load()?;
        Ok(storage.presets.into_values().collect())
    }

    /// Get the storage path
    #[must_use]
    pub const fn path(&self) -> &PathBuf {
        &self.path
    }
}
