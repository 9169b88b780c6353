//! Directory scanning module
//!
//! This module walks a directory tree and produces the candidate item list
//! that the rest of the pipeline operates on. Traversal is iterative (an
//! explicit work stack, no recursion) so arbitrarily deep trees cannot blow
//! the call stack, and failures are isolated per entry: an unreadable
//! directory or a failed metadata call is reported as a warning and skipped,
//! never aborting the rest of the walk.

pub mod types;
pub mod walker;

pub use types::{CandidateItem, ItemStats, ScanOptions, Scope, parse_extension_list};
pub use walker::{ScanOutcome, collect};

use std::io;
use thiserror::Error;

/// Errors that can occur when starting a scan
///
/// Failures *inside* the walk (unreadable subdirectories, stat failures) are
/// not errors; they surface as warnings on the [`ScanOutcome`].
#[derive(Debug, Error)]
pub enum ScanError {
    /// Root path does not exist
    #[error("Root path '{0}' does not exist")]
    RootNotFound(String),

    /// Root path is not a directory
    #[error("Root path '{0}' is not a directory")]
    NotADirectory(String),

    /// I/O error reading the root directory
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
