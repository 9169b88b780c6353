//! Renamr - batch file and folder renaming with preview, conflict detection, and undo
//!
//! This library implements the renaming engine behind the `renamr` CLI: a
//! directory scanner, a filter engine, an ordered name-transform pipeline,
//! a preview builder with conflict detection, and an apply/undo executor
//! that leaves an audit trail behind.

use thiserror::Error;

pub mod cli;
pub mod exec;
pub mod filter;
pub mod presets;
pub mod preview;
pub mod scan;
pub mod session;
pub mod transform;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum RenamrError {
    /// Scan error
    #[error("Scan error: {0}")]
    Scan(#[from] scan::ScanError),
    /// Apply/undo executor error
    #[error("Executor error: {0}")]
    Exec(#[from] exec::ExecError),
    /// Preset error
    #[error("Preset error: {0}")]
    Preset(#[from] presets::PresetError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
