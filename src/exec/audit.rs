//! Audit log and undo script artifacts
//!
//! One CSV audit log and one undo command script per apply batch, written to
//! a `.renamr` subfolder of the processed root with a shared filesystem-safe
//! timestamp. The audit log doubles as the persisted batch: the `undo`
//! command reloads it when no in-memory batch exists.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use super::{ExecError, OperationRecord};
use crate::preview::OperationKind;

/// Subfolder of the processed root holding artifacts
pub const ARTIFACT_DIR: &str = ".renamr";

const AUDIT_PREFIX: &str = "rename-";
const CONSUMED_SUFFIX: &str = ".undone";

/// Filesystem-safe timestamp shared by the artifacts of one batch
#[must_use]
pub fn artifact_stamp() -> String {
    Local::now().format("%Y%m%d-%H%M%S").to_string()
}

fn artifact_dir(root: &Path) -> PathBuf {
    root.join(ARTIFACT_DIR)
}

/// Write the audit CSV for one batch
///
/// Header is `from,to,isDirectory,kind`; quoting and embedded-quote escaping
/// follow CSV conventions.
///
/// # Errors
/// Returns an error when the artifact directory or file cannot be written.
pub fn write_audit(
    root: &Path,
    records: &[OperationRecord],
    stamp: &str,
) -> Result<PathBuf, ExecError> {
    let dir = artifact_dir(root);
    fs::create_dir_all(&dir)?;
    let path = dir.join(format!("{AUDIT_PREFIX}{stamp}.csv"));

    let mut writer = csv::Writer::from_path(&path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(ExecError::Io)?;

    Ok(path)
}

/// Read back an audit CSV
///
/// # Errors
/// Returns `ExecError::MalformedAudit` when a row cannot be parsed.
pub fn read_audit(path: &Path) -> Result<Vec<OperationRecord>, ExecError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: OperationRecord = row.map_err(|e| ExecError::MalformedAudit {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Locate and read the most recent unconsumed audit log under `root`
///
/// # Errors
/// Returns `ExecError::NoAuditLog` when none exists.
pub fn read_latest_audit(root: &Path) -> Result<(PathBuf, Vec<OperationRecord>), ExecError> {
    let dir = artifact_dir(root);
    let mut candidates: Vec<PathBuf> = Vec::new();
    if dir.is_dir() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(AUDIT_PREFIX)
                && name.ends_with(".csv")
                && !name.contains(CONSUMED_SUFFIX)
            {
                candidates.push(entry.path());
            }
        }
    }
    // Stamps sort lexicographically, so the max name is the newest batch.
    candidates.sort();
    let latest = candidates
        .pop()
        .ok_or_else(|| ExecError::NoAuditLog(root.display().to_string()))?;
    let records = read_audit(&latest)?;
    Ok((latest, records))
}

/// Mark an audit log consumed after a successful (or partial) undo
///
/// Undo is single-shot: the consumed log is renamed aside so the next `undo`
/// cannot pick it up again.
///
/// # Errors
/// Returns an error when the rename fails.
pub fn mark_consumed(path: &Path) -> Result<PathBuf, ExecError> {
    let consumed = path.with_extension("csv.undone");
    fs::rename(path, &consumed)?;
    Ok(consumed)
}

/// Write the undo command script for one batch
///
/// The script reverses the operations in strict reverse order: deletion for
/// copies, reverse rename for moves and renames. On Unix it is a `sh` script
/// with the executable bit set; on Windows a batch file.
///
/// # Errors
/// Returns an error when the script cannot be written.
pub fn write_undo_script(
    root: &Path,
    records: &[OperationRecord],
    stamp: &str,
) -> Result<PathBuf, ExecError> {
    let dir = artifact_dir(root);
    fs::create_dir_all(&dir)?;

    let (path, contents) = if cfg!(windows) {
        let path = dir.join(format!("undo-{stamp}.bat"));
        (path, windows_script(records, stamp))
    } else {
        let path = dir.join(format!("undo-{stamp}.sh"));
        (path, unix_script(records, stamp))
    };

    fs::write(&path, contents)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    }

    Ok(path)
}

fn unix_script(records: &[OperationRecord], stamp: &str) -> String {
    let mut out = String::from("#!/bin/sh\n");
    out.push_str(&format!("# Undo for renamr batch {stamp}\n"));
    for record in records.iter().rev() {
        let from = shell_quote(&record.from);
        let to = shell_quote(&record.to);
        if record.kind == OperationKind::Copy {
            out.push_str(&format!("rm -- {to}\n"));
        } else {
            out.push_str(&format!("mv -- {to} {from}\n"));
        }
    }
    out
}

fn windows_script(records: &[OperationRecord], stamp: &str) -> String {
    let mut out = String::from("@echo off\r\n");
    out.push_str(&format!("rem Undo for renamr batch {stamp}\r\n"));
    for record in records.iter().rev() {
        let from = record.from.display();
        let to = record.to.display();
        if record.kind == OperationKind::Copy {
            out.push_str(&format!("del \"{to}\"\r\n"));
        } else {
            out.push_str(&format!("move \"{to}\" \"{from}\"\r\n"));
        }
    }
    out
}

/// Single-quote a path for `sh`, escaping embedded quotes
fn shell_quote(path: &Path) -> String {
    let raw = path.to_string_lossy();
    format!("'{}'", raw.replace('\'', r"'\''"))
}
