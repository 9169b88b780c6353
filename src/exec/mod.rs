//! Apply and undo executors
//!
//! Performs the filesystem mutations planned by a preview, in a
//! dependency-safe order, with per-item failure isolation: every attempted
//! operation is counted, failures are reported individually, and no single
//! failure stops the batch. Each apply leaves two artifacts in a `.renamr`
//! subfolder of the processed root: a CSV audit log of the executed
//! operations and a command script that reverses them.
//!
//! # Ordering contract
//!
//! All file operations execute before any directory operation, and directory
//! operations execute deepest-path-first. This guarantees a directory is
//! never moved while a pending operation still references a path beneath its
//! original location.

pub mod apply;
pub mod attrs;
pub mod audit;
pub mod undo;

pub use apply::{ApplyOptions, ApplyOutcome, ApplySummary, apply};
pub use audit::{artifact_stamp, mark_consumed, read_latest_audit, write_audit, write_undo_script};
pub use undo::{UndoSummary, undo};

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::preview::OperationKind;

/// Errors that abort an apply or undo before any mutation happens
///
/// Failures on individual items never surface here; they are collected into
/// the summaries instead.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The preview still contains conflict or error entries
    #[error("Preview is blocked by {conflicts} conflict(s) and {errors} error(s); apply refused")]
    PreviewBlocked { conflicts: usize, errors: usize },

    /// Undo requested but no batch is available
    #[error("No batch to undo")]
    NoBatch,

    /// No audit log found under the root
    #[error("No audit log found under '{0}'")]
    NoAuditLog(String),

    /// Audit log could not be parsed
    #[error("Malformed audit log '{path}': {detail}")]
    MalformedAudit { path: String, detail: String },

    /// I/O error writing artifacts
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV serialization error
    #[error("Audit log error: {0}")]
    Csv(#[from] csv::Error),
}

/// One executed operation, as recorded in the audit log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub from: PathBuf,
    pub to: PathBuf,
    #[serde(rename = "isDirectory")]
    pub is_dir: bool,
    pub kind: OperationKind,
}
