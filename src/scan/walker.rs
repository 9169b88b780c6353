//! Iterative directory traversal producing candidate items

use std::fs;
use std::path::{Path, PathBuf};

use super::types::{CandidateItem, ItemStats, ScanOptions};
use super::ScanError;

/// Result of one scan: the candidates plus any per-entry warnings
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub items: Vec<CandidateItem>,
    /// Human-readable notes for entries that were skipped
    pub warnings: Vec<String>,
}

/// Walk `root` and collect candidate items matching `options`
///
/// Traversal uses an explicit work stack rather than recursion, so tree depth
/// is bounded only by memory. Subdirectories are entered only when
/// `include_subfolders` is set. The extension allow-list applies to files
/// only and matches case-insensitively. Unreadable directories and entries
/// whose metadata cannot be read are skipped with a warning; they never abort
/// the walk.
///
/// Entries within each directory are visited in name order, so repeated scans
/// of an unchanged tree yield an identical candidate list.
///
/// # Errors
/// Returns `ScanError` only when the root itself is missing, not a
/// directory, or unreadable.
pub fn collect(root: &Path, options: &ScanOptions) -> Result<ScanOutcome, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootNotFound(root.display().to_string()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.display().to_string()));
    }

    let mut outcome = ScanOutcome::default();
    let mut pending: Vec<PathBuf> = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let reader = match fs::read_dir(&dir) {
            Ok(reader) => reader,
            // An unreadable root fails the scan; an unreadable subdirectory
            // is isolated and the walk continues.
            Err(e) if dir == root => return Err(ScanError::Io(e)),
            Err(e) => {
                outcome
                    .warnings
                    .push(format!("Skipping unreadable directory {}: {e}", dir.display()));
                continue;
            }
        };

        let mut entries: Vec<fs::DirEntry> = Vec::new();
        for entry in reader {
            match entry {
                Ok(entry) => entries.push(entry),
                Err(e) => outcome
                    .warnings
                    .push(format!("Skipping entry in {}: {e}", dir.display())),
            }
        }
        entries.sort_by_key(fs::DirEntry::file_name);

        for entry in entries {
            let path = entry.path();
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(e) => {
                    outcome
                        .warnings
                        .push(format!("Skipping {} (stat failed): {e}", path.display()));
                    continue;
                }
            };

            if metadata.is_dir() {
                if options.include_subfolders {
                    pending.push(path.clone());
                }
                if options.scope.includes_folders() {
                    outcome.items.push(make_candidate(&path, &metadata));
                }
            } else if metadata.is_file() && options.scope.includes_files() {
                let candidate = make_candidate(&path, &metadata);
                if options.extension_allowed(&candidate.extension) {
                    outcome.items.push(candidate);
                }
            }
        }
    }

    Ok(outcome)
}

fn make_candidate(path: &Path, metadata: &fs::Metadata) -> CandidateItem {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = if metadata.is_dir() {
        String::new()
    } else {
        path.extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default()
    };

    CandidateItem {
        full_path: path.to_path_buf(),
        parent_dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
        name,
        extension,
        is_dir: metadata.is_dir(),
        is_file: metadata.is_file(),
        stats: Some(ItemStats {
            size: metadata.len(),
            modified: metadata.modified().ok(),
            accessed: metadata.accessed().ok(),
            created: metadata.created().ok(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::types::{Scope, parse_extension_list};
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).expect("create test file");
    }

    fn names(outcome: &ScanOutcome) -> Vec<String> {
        outcome.items.iter().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn test_scope_files_with_extension_filter_recursive() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.TXT");
        touch(tmp.path(), "b.doc");
        fs::create_dir(tmp.path().join("sub")).unwrap();
        touch(&tmp.path().join("sub"), "c.txt");

        let options = ScanOptions {
            include_subfolders: true,
            scope: Scope::Files,
            extensions: parse_extension_list(".txt"),
        };
        let outcome = collect(tmp.path(), &options).unwrap();

        let mut found = names(&outcome);
        found.sort();
        assert_eq!(found, vec!["a.TXT", "c.txt"]);
    }

    #[test]
    fn test_no_subfolders_stays_at_top_level() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "top.txt");
        fs::create_dir(tmp.path().join("sub")).unwrap();
        touch(&tmp.path().join("sub"), "deep.txt");

        let options = ScanOptions {
            include_subfolders: false,
            scope: Scope::Files,
            extensions: Vec::new(),
        };
        let outcome = collect(tmp.path(), &options).unwrap();
        assert_eq!(names(&outcome), vec!["top.txt"]);
    }

    #[test]
    fn test_scope_folders_yields_directories_only() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "file.txt");
        fs::create_dir(tmp.path().join("alpha")).unwrap();
        fs::create_dir(tmp.path().join("beta")).unwrap();

        let options = ScanOptions {
            include_subfolders: false,
            scope: Scope::Folders,
            extensions: Vec::new(),
        };
        let outcome = collect(tmp.path(), &options).unwrap();
        assert_eq!(names(&outcome), vec!["alpha", "beta"]);
        assert!(outcome.items.iter().all(|i| i.is_dir));
    }

    #[test]
    fn test_scope_both_includes_files_and_folders() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "file.txt");
        fs::create_dir(tmp.path().join("dir")).unwrap();

        let options = ScanOptions {
            include_subfolders: false,
            scope: Scope::Both,
            extensions: Vec::new(),
        };
        let outcome = collect(tmp.path(), &options).unwrap();
        assert_eq!(outcome.items.len(), 2);
    }

    #[test]
    fn test_extension_filter_does_not_apply_to_folders() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("archive.old")).unwrap();

        let options = ScanOptions {
            include_subfolders: false,
            scope: Scope::Both,
            extensions: parse_extension_list(".txt"),
        };
        let outcome = collect(tmp.path(), &options).unwrap();
        assert_eq!(names(&outcome), vec!["archive.old"]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("nope");
        let result = collect(&gone, &ScanOptions::default());
        assert!(matches!(result, Err(ScanError::RootNotFound(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_root_is_an_error() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let locked = tmp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // A privileged process can read the directory regardless; only
        // assert when the permission bits actually apply.
        if fs::read_dir(&locked).is_err() {
            let result = collect(&locked, &ScanOptions::default());
            assert!(matches!(result, Err(ScanError::Io(_))));
        }

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_rescan_is_deterministic() {
        let tmp = TempDir::new().unwrap();
        for name in ["zeta.txt", "alpha.txt", "mid.txt"] {
            touch(tmp.path(), name);
        }
        let options = ScanOptions {
            include_subfolders: false,
            scope: Scope::Files,
            extensions: Vec::new(),
        };
        let first = collect(tmp.path(), &options).unwrap();
        let second = collect(tmp.path(), &options).unwrap();
        assert_eq!(names(&first), names(&second));
        assert_eq!(names(&first), vec!["alpha.txt", "mid.txt", "zeta.txt"]);
    }
}
