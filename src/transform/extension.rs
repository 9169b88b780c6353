//! Stage 8: extension handling
//!
//! Operates on the extension independently of the base name: keep it, change
//! its case, or replace it with a literal value.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionMode {
    #[default]
    Keep,
    Lower,
    Upper,
    /// Replace with the configured literal value
    Replace,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub mode: ExtensionMode,
    /// Replacement value for [`ExtensionMode::Replace`]; normalized to carry
    /// a leading dot, empty removes the extension
    #[serde(default)]
    pub replacement: String,
}

/// `raw_extension` is the original-casing extension slice, dot included
pub fn apply(config: &ExtensionConfig, raw_extension: &str) -> String {
    if !config.enabled {
        return raw_extension.to_string();
    }

    match config.mode {
        ExtensionMode::Keep => raw_extension.to_string(),
        ExtensionMode::Lower => raw_extension.to_lowercase(),
        ExtensionMode::Upper => {
            // Keep the dot; uppercase the rest
            raw_extension
                .strip_prefix('.')
                .map_or_else(String::new, |rest| format!(".{}", rest.to_uppercase()))
        }
        ExtensionMode::Replace => normalize(&config.replacement),
    }
}

fn normalize(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('.') {
        trimmed.to_string()
    } else {
        format!(".{trimmed}")
    }
}
