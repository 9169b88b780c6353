//! Batch apply executor

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;

use super::{ExecError, OperationRecord, attrs, audit};
use crate::preview::{EntryStatus, OperationKind, Preview, PreviewEntry};

/// Optional post-mutation attribute effects, applied to files only
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    /// Set modify/access time to "now" after the mutation
    pub touch_times: bool,
    /// Mark the result read-only
    pub read_only: bool,
    /// Mark the result hidden (platform-dependent, best-effort)
    pub hidden: bool,
}

/// Aggregate results of one apply batch
#[derive(Debug, Default)]
pub struct ApplySummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub error_messages: Vec<String>,
    /// Non-fatal notes from attribute effects
    pub attribute_warnings: Vec<String>,
}

impl ApplySummary {
    fn add_success(&mut self) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    fn add_failure(&mut self, msg: String) {
        self.attempted += 1;
        self.failed += 1;
        self.error_messages.push(msg);
    }

    pub fn print(&self, operation: &str) {
        println!("\n{}", format!("=== {operation} Summary ===").bold());
        println!("  {} {}", "✓ Success:".green(), self.succeeded);
        if self.failed > 0 {
            println!("  {} {}", "✗ Errors:".red(), self.failed);
            println!("\n{}", "Error details:".red().bold());
            for msg in &self.error_messages {
                println!("  - {msg}");
            }
        }
        for warning in &self.attribute_warnings {
            println!("  {} {warning}", "⚠".yellow());
        }
    }
}

/// Everything one apply produced
#[derive(Debug)]
pub struct ApplyOutcome {
    /// Executed operations, in application order; the batch available to undo
    pub records: Vec<OperationRecord>,
    pub summary: ApplySummary,
    pub audit_path: Option<PathBuf>,
    pub undo_script_path: Option<PathBuf>,
}

/// Execute every `Rename`-status entry of the preview
///
/// Refuses the whole batch while the preview is blocked. File operations run
/// before directory operations; directories go deepest-first. Individual
/// failures are counted and the batch continues (fail-open semantics). On
/// completion the audit log and undo script are written under
/// `<root>/.renamr/`.
///
/// # Errors
/// Returns `ExecError::PreviewBlocked` when conflicts or errors remain, or
/// an I/O error if the artifacts cannot be written.
pub fn apply(preview: &Preview, root: &Path, options: &ApplyOptions) -> Result<ApplyOutcome, ExecError> {
    if preview.is_blocked() {
        return Err(ExecError::PreviewBlocked {
            conflicts: preview.count_with(EntryStatus::Conflict),
            errors: preview.count_with(EntryStatus::Error),
        });
    }

    let mut files: Vec<&PreviewEntry> = Vec::new();
    let mut dirs: Vec<&PreviewEntry> = Vec::new();
    for entry in preview.renames() {
        if entry.item.is_dir {
            dirs.push(entry);
        } else {
            files.push(entry);
        }
    }
    // Deepest directories first, so renaming a parent can never invalidate a
    // pending child operation.
    dirs.sort_by_key(|e| std::cmp::Reverse(e.item.full_path.components().count()));

    let mut summary = ApplySummary::default();
    let mut records: Vec<OperationRecord> = Vec::new();

    for entry in files.into_iter().chain(dirs) {
        match execute_one(entry) {
            Ok(()) => {
                summary.add_success();
                records.push(OperationRecord {
                    from: entry.item.full_path.clone(),
                    to: entry.target_path.clone(),
                    is_dir: entry.item.is_dir,
                    kind: entry.kind,
                });
                if !entry.item.is_dir {
                    summary
                        .attribute_warnings
                        .extend(attrs::apply_attributes(&entry.target_path, options));
                }
            }
            Err(e) => summary.add_failure(format!(
                "{} -> {}: {e}",
                entry.item.full_path.display(),
                entry.target_path.display()
            )),
        }
    }

    let (audit_path, undo_script_path) = if records.is_empty() {
        (None, None)
    } else {
        let stamp = audit::artifact_stamp();
        let audit_path = audit::write_audit(root, &records, &stamp)?;
        let undo_script_path = audit::write_undo_script(root, &records, &stamp)?;
        (Some(audit_path), Some(undo_script_path))
    };

    Ok(ApplyOutcome {
        records,
        summary,
        audit_path,
        undo_script_path,
    })
}

fn execute_one(entry: &PreviewEntry) -> std::io::Result<()> {
    if !entry.target_dir.as_os_str().is_empty() {
        fs::create_dir_all(&entry.target_dir)?;
    }
    if entry.kind == OperationKind::Copy && !entry.item.is_dir {
        fs::copy(&entry.item.full_path, &entry.target_path)?;
    } else {
        fs::rename(&entry.item.full_path, &entry.target_path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::{DestinationKind, PreviewOptions, build};
    use crate::scan::{ScanOptions, Scope, collect};
    use crate::transform::{AffixConfig, TransformConfig};
    use std::fs::File;
    use tempfile::TempDir;

    fn scan(root: &Path, scope: Scope) -> Vec<crate::scan::CandidateItem> {
        let options = ScanOptions {
            include_subfolders: true,
            scope,
            extensions: Vec::new(),
        };
        collect(root, &options).unwrap().items
    }

    fn prefix_config(prefix: &str) -> TransformConfig {
        TransformConfig {
            affix: AffixConfig {
                enabled: true,
                prefix: prefix.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_renames_files() {
        let tmp = TempDir::new().unwrap();
        File::create(tmp.path().join("a.txt")).unwrap();
        File::create(tmp.path().join("b.txt")).unwrap();

        let preview = build(
            scan(tmp.path(), Scope::Files),
            &prefix_config("new_"),
            &PreviewOptions::default(),
        );
        let outcome = apply(&preview, tmp.path(), &ApplyOptions::default()).unwrap();

        assert_eq!(outcome.summary.succeeded, 2);
        assert_eq!(outcome.summary.failed, 0);
        assert!(tmp.path().join("new_a.txt").exists());
        assert!(tmp.path().join("new_b.txt").exists());
        assert!(!tmp.path().join("a.txt").exists());
    }

    #[test]
    fn test_apply_refuses_blocked_preview() {
        let tmp = TempDir::new().unwrap();
        File::create(tmp.path().join("one.txt")).unwrap();
        File::create(tmp.path().join("two.txt")).unwrap();

        // Everything renames to the same name: a conflict.
        let config = TransformConfig {
            affix: AffixConfig {
                enabled: true,
                remove_all: true,
                prefix: "same".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let preview = build(scan(tmp.path(), Scope::Files), &config, &PreviewOptions::default());
        let result = apply(&preview, tmp.path(), &ApplyOptions::default());
        assert!(matches!(result, Err(ExecError::PreviewBlocked { conflicts: 2, .. })));
        // Nothing moved.
        assert!(tmp.path().join("one.txt").exists());
        assert!(tmp.path().join("two.txt").exists());
    }

    #[test]
    fn test_files_before_dirs_deepest_first() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("outer/inner")).unwrap();
        File::create(tmp.path().join("outer/inner/f.txt")).unwrap();

        let preview = build(
            scan(tmp.path(), Scope::Both),
            &prefix_config("x_"),
            &PreviewOptions::default(),
        );
        let outcome = apply(&preview, tmp.path(), &ApplyOptions::default()).unwrap();

        assert_eq!(outcome.summary.failed, 0, "{:?}", outcome.summary.error_messages);
        // The file moved under its original parents, then inner, then outer.
        assert!(tmp.path().join("x_outer/x_inner/x_f.txt").exists());
        let kinds: Vec<bool> = outcome.records.iter().map(|r| r.is_dir).collect();
        assert_eq!(kinds, vec![false, true, true]);
        // Deepest directory first.
        assert!(outcome.records[1].from.ends_with("outer/inner"));
    }

    #[test]
    fn test_copy_to_destination_keeps_source() {
        let tmp = TempDir::new().unwrap();
        File::create(tmp.path().join("keep.txt")).unwrap();
        let dest = tmp.path().join("out");

        let options = PreviewOptions {
            destination: Some(dest.clone()),
            destination_kind: DestinationKind::Copy,
            ..Default::default()
        };
        let items = scan(tmp.path(), Scope::Files);
        let preview = build(items, &TransformConfig::default(), &options);
        let outcome = apply(&preview, tmp.path(), &ApplyOptions::default()).unwrap();

        assert_eq!(outcome.summary.succeeded, 1);
        assert!(tmp.path().join("keep.txt").exists());
        assert!(dest.join("keep.txt").exists());
        assert_eq!(outcome.records[0].kind, OperationKind::Copy);
    }

    #[test]
    fn test_artifacts_written_once_per_batch() {
        let tmp = TempDir::new().unwrap();
        File::create(tmp.path().join("a.txt")).unwrap();

        let preview = build(
            scan(tmp.path(), Scope::Files),
            &prefix_config("z_"),
            &PreviewOptions::default(),
        );
        let outcome = apply(&preview, tmp.path(), &ApplyOptions::default()).unwrap();

        let audit = outcome.audit_path.expect("audit written");
        let script = outcome.undo_script_path.expect("script written");
        assert!(audit.exists());
        assert!(script.exists());
        assert!(audit.starts_with(tmp.path().join(".renamr")));
    }

    #[test]
    fn test_empty_batch_writes_no_artifacts() {
        let tmp = TempDir::new().unwrap();
        File::create(tmp.path().join("a.txt")).unwrap();

        let preview = build(
            scan(tmp.path(), Scope::Files),
            &TransformConfig::default(),
            &PreviewOptions::default(),
        );
        let outcome = apply(&preview, tmp.path(), &ApplyOptions::default()).unwrap();
        assert_eq!(outcome.summary.attempted, 0);
        assert!(outcome.audit_path.is_none());
    }
}
