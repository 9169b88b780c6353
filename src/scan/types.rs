//! Candidate item data structures and scan options

use std::path::PathBuf;
use std::time::SystemTime;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which kinds of entries a scan should yield
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Files only
    #[default]
    Files,
    /// Directories only
    Folders,
    /// Files and directories
    Both,
}

impl Scope {
    #[must_use]
    pub const fn includes_files(self) -> bool {
        matches!(self, Self::Files | Self::Both)
    }

    #[must_use]
    pub const fn includes_folders(self) -> bool {
        matches!(self, Self::Folders | Self::Both)
    }
}

/// Filesystem metadata captured per candidate at scan time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStats {
    /// Size in bytes (0 for directories on some platforms)
    pub size: u64,
    pub modified: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
    pub created: Option<SystemTime>,
}

/// A filesystem entry discovered by traversal, before filtering or transforms
///
/// Immutable once created; a candidate lives for one preview cycle and is
/// replaced wholesale on the next scan.
#[derive(Debug, Clone)]
pub struct CandidateItem {
    /// Absolute (or root-relative) path to the entry
    pub full_path: PathBuf,
    /// Directory containing the entry
    pub parent_dir: PathBuf,
    /// File or folder name, including any extension, original casing
    pub name: String,
    /// Lower-cased extension including the leading dot, or empty
    pub extension: String,
    pub is_dir: bool,
    pub is_file: bool,
    /// None when the metadata call failed
    pub stats: Option<ItemStats>,
}

impl CandidateItem {
    /// Byte length of the extension slice within `name`, dot included
    fn extension_len(&self) -> usize {
        if self.extension.is_empty() {
            0
        } else {
            self.name.rfind('.').map_or(0, |i| self.name.len() - i)
        }
    }

    /// Name without its extension, original casing preserved
    #[must_use]
    pub fn stem(&self) -> &str {
        &self.name[..self.name.len() - self.extension_len()]
    }

    /// Extension slice of `name` with its original casing, or empty
    #[must_use]
    pub fn raw_extension(&self) -> &str {
        &self.name[self.name.len() - self.extension_len()..]
    }
}

/// Options controlling a scan
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub include_subfolders: bool,
    pub scope: Scope,
    /// Lower-cased, dotted extensions; empty means "accept any extension"
    pub extensions: Vec<String>,
}

impl ScanOptions {
    /// True when `extension` (lower-cased, dotted) passes the allow-list
    #[must_use]
    pub fn extension_allowed(&self, extension: &str) -> bool {
        self.extensions.is_empty() || self.extensions.iter().any(|e| e == extension)
    }
}

/// Parse a `;`/`,`-delimited extension list into normalized form
///
/// Entries are trimmed, lower-cased, and given a leading dot; empty entries
/// are dropped.
///
/// # Examples
/// ```
/// use renamr::scan::parse_extension_list;
///
/// let exts = parse_extension_list("txt; .MD,jpeg");
/// assert_eq!(exts, vec![".txt", ".md", ".jpeg"]);
/// ```
#[must_use]
pub fn parse_extension_list(raw: &str) -> Vec<String> {
    raw.split([';', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let lower = s.to_lowercase();
            if lower.starts_with('.') {
                lower
            } else {
                format!(".{lower}")
            }
        })
        .collect()
}
