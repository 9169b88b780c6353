//! Preset data structures
//!
//! A `PresetSnapshot` mirrors the engine configuration one-to-one; `Preset`
//! adds a name and creation time; `PresetStorage` is the on-disk container.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::FilterSpec;
use crate::preview::{DestinationKind, SortKey, SortOrder};
use crate::scan::Scope;
use crate::transform::TransformConfig;

/// A complete engine configuration, as persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetSnapshot {
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub include_subfolders: bool,
    /// Raw `;`/`,`-delimited extension list
    #[serde(default)]
    pub extensions: String,
    #[serde(default)]
    pub filter: FilterSpec,
    #[serde(default)]
    pub transform: TransformConfig,
    #[serde(default)]
    pub sort_key: SortKey,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,
    #[serde(default)]
    pub destination_kind: DestinationKind,
}

/// A named preset with metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created: DateTime<Utc>,
    pub snapshot: PresetSnapshot,
}

impl Preset {
    #[must_use]
    pub fn new(name: String, description: String, snapshot: PresetSnapshot) -> Self {
        Self {
            name,
            description,
            created: Utc::now(),
            snapshot,
        }
    }
}

/// On-disk container for all presets, keyed by name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresetStorage {
    #[serde(default)]
    pub presets: BTreeMap<String, Preset>,
}

impl PresetStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Validate a preset name: non-empty, no path separators, reasonable length
///
/// # Errors
/// Returns a human-readable reason when the name is unusable.
pub fn validate_preset_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("name cannot be empty".to_string());
    }
    if name.len() > 64 {
        return Err("name too long (max 64 characters)".to_string());
    }
    if name.contains(['/', '\\']) {
        return Err("name cannot contain path separators".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_round_trips_through_toml() {
        let snapshot = PresetSnapshot {
            scope: Scope::Both,
            include_subfolders: true,
            extensions: ".txt;.md".into(),
            ..Default::default()
        };
        let preset = Preset::new("docs".into(), "doc shuffle".into(), snapshot.clone());
        let mut storage = PresetStorage::new();
        storage.presets.insert(preset.name.clone(), preset);

        let toml = toml::to_string_pretty(&storage).unwrap();
        let loaded: PresetStorage = toml::from_str(&toml).unwrap();
        assert_eq!(loaded.presets["docs"].snapshot, snapshot);
    }

    #[test]
    fn test_validate_preset_name() {
        assert!(validate_preset_name("daily-photos").is_ok());
        assert!(validate_preset_name("").is_err());
        assert!(validate_preset_name("a/b").is_err());
        assert!(validate_preset_name(&"x".repeat(65)).is_err());
    }
}
