//! Preview construction and conflict detection

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use super::sort::sort_items;
use super::types::{
    DestinationKind, EntryStatus, OperationKind, Preview, PreviewEntry, SortKey, SortOrder,
};
use crate::scan::CandidateItem;
use crate::transform::{self, TransformConfig};

/// Options for one preview cycle
#[derive(Debug, Clone, Default)]
pub struct PreviewOptions {
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    /// Copy/move destination; None keeps every item in its parent directory
    pub destination: Option<PathBuf>,
    pub destination_kind: DestinationKind,
}

/// Build a preview from the filtered candidate list
///
/// Sorting happens before the transforms run because the numbering stage
/// depends on each item's position. Status assignment priority per entry:
/// `Error` (unresolvable target), then `Conflict`, then `Unchanged`, then
/// `Rename`.
#[must_use]
pub fn build(
    mut items: Vec<CandidateItem>,
    config: &TransformConfig,
    options: &PreviewOptions,
) -> Preview {
    sort_items(&mut items, options.sort_key, options.sort_order);

    let destination_problem = options.destination.as_deref().and_then(destination_problem);

    let mut entries: Vec<PreviewEntry> = items
        .into_iter()
        .enumerate()
        .map(|(seq, item)| resolve_entry(item, seq as u64, config, options, destination_problem.as_deref()))
        .collect();

    detect_conflicts(&mut entries);

    Preview { entries }
}

fn resolve_entry(
    item: CandidateItem,
    seq: u64,
    config: &TransformConfig,
    options: &PreviewOptions,
    destination_problem: Option<&str>,
) -> PreviewEntry {
    let new_name = transform::apply(config, &item, seq);

    let (target_dir, kind) = match &options.destination {
        Some(dest) => {
            let kind = match options.destination_kind {
                // Copying a whole subtree is not supported; directories are
                // demoted to a move.
                DestinationKind::Copy if item.is_dir => OperationKind::Move,
                DestinationKind::Copy => OperationKind::Copy,
                DestinationKind::Move => OperationKind::Move,
            };
            (dest.clone(), kind)
        }
        None => (item.parent_dir.clone(), OperationKind::Rename),
    };

    let file_name = new_name.file_name();
    let target_path = target_dir.join(&file_name);

    let (status, note) = if let Some(problem) = destination_problem {
        (EntryStatus::Error, Some(problem.to_string()))
    } else if file_name.is_empty() {
        (
            EntryStatus::Error,
            Some("transforms produced an empty name".to_string()),
        )
    } else if target_path == item.full_path {
        (EntryStatus::Unchanged, None)
    } else {
        (EntryStatus::Rename, None)
    };

    PreviewEntry {
        item,
        new_name,
        target_dir,
        target_path,
        kind,
        status,
        note,
    }
}

/// A reason the configured destination cannot be used, if any
fn destination_problem(dest: &Path) -> Option<String> {
    if dest.as_os_str().is_empty() {
        return Some("destination path is empty".to_string());
    }
    if dest.to_string_lossy().contains('\0') {
        return Some("destination path contains a NUL byte".to_string());
    }
    if dest.exists() && !dest.is_dir() {
        return Some(format!(
            "destination '{}' exists and is not a directory",
            dest.display()
        ));
    }
    None
}

/// Demote colliding `Rename` entries to `Conflict`
///
/// Two kinds of collision: two entries resolving to the same target path,
/// and a target path that already exists on disk without being vacated by
/// another entry in the same batch (an entry vacates its source only when it
/// will move away, so copies vacate nothing).
fn detect_conflicts(entries: &mut [PreviewEntry]) {
    let mut target_counts: HashMap<PathBuf, usize> = HashMap::new();
    for entry in entries.iter() {
        if entry.status == EntryStatus::Rename {
            *target_counts.entry(entry.target_path.clone()).or_insert(0) += 1;
        }
    }

    let vacated: HashSet<PathBuf> = entries
        .iter()
        .filter(|e| e.status == EntryStatus::Rename && e.kind != OperationKind::Copy)
        .map(|e| e.item.full_path.clone())
        .collect();

    for entry in entries.iter_mut() {
        if entry.status != EntryStatus::Rename {
            continue;
        }
        if target_counts.get(&entry.target_path).copied().unwrap_or(0) > 1 {
            entry.status = EntryStatus::Conflict;
            entry.note = Some(format!(
                "multiple items resolve to '{}'",
                entry.target_path.display()
            ));
        } else if entry.target_path.exists() && !vacated.contains(&entry.target_path) {
            entry.status = EntryStatus::Conflict;
            entry.note = Some(format!(
                "'{}' already exists",
                entry.target_path.display()
            ));
        }
    }
}
