//! Preview data structures

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::scan::CandidateItem;
use crate::transform::NewName;

/// Sort key for ordering the candidate list before transforms run
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Extension,
    Size,
    Modified,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// How entries are sent to a configured destination directory
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    #[default]
    Move,
    Copy,
}

/// The filesystem operation an entry resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// In-place rename within the original parent directory
    Rename,
    /// Copy to the destination, source untouched
    Copy,
    /// Move to the destination
    Move,
}

impl OperationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rename => "rename",
            Self::Copy => "copy",
            Self::Move => "move",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rename" => Some(Self::Rename),
            "copy" => Some(Self::Copy),
            "move" => Some(Self::Move),
            _ => None,
        }
    }
}

/// Per-entry status after target resolution and conflict detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Will be applied
    Rename,
    /// Target equals source; nothing to do
    Unchanged,
    /// Target collides with another entry or an existing filesystem path
    Conflict,
    /// Target could not be resolved (malformed destination, empty name)
    Error,
}

impl EntryStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rename => "rename",
            Self::Unchanged => "unchanged",
            Self::Conflict => "conflict",
            Self::Error => "error",
        }
    }
}

/// One reviewable row of the preview
#[derive(Debug, Clone)]
pub struct PreviewEntry {
    pub item: CandidateItem,
    pub new_name: NewName,
    pub target_dir: PathBuf,
    pub target_path: PathBuf,
    pub kind: OperationKind,
    pub status: EntryStatus,
    /// Explanation for conflict/error statuses
    pub note: Option<String>,
}

/// A complete preview cycle result, replaced wholesale on every new preview
#[derive(Debug, Default)]
pub struct Preview {
    pub entries: Vec<PreviewEntry>,
}

impl Preview {
    /// True while any entry is in conflict or error state; apply must refuse
    /// the whole batch in that case
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e.status, EntryStatus::Conflict | EntryStatus::Error))
    }

    /// Entries that will actually be applied
    pub fn renames(&self) -> impl Iterator<Item = &PreviewEntry> {
        self.entries
            .iter()
            .filter(|e| e.status == EntryStatus::Rename)
    }

    #[must_use]
    pub fn count_with(&self, status: EntryStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }
}
