//! Undo executor
//!
//! Reverses the most recent apply batch from its operation records. Copies
//! are undone by deleting the copy (the source was never touched); renames
//! and moves are undone by renaming the target back. A missing target is an
//! isolated failure; remaining steps still run.

use std::fs;

use colored::Colorize;

use super::OperationRecord;
use crate::preview::OperationKind;

/// Aggregate results of one undo pass
#[derive(Debug, Default)]
pub struct UndoSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub error_messages: Vec<String>,
}

impl UndoSummary {
    fn add_success(&mut self) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    fn add_failure(&mut self, msg: String) {
        self.attempted += 1;
        self.failed += 1;
        self.error_messages.push(msg);
    }

    pub fn print(&self) {
        println!("\n{}", "=== Undo Summary ===".bold());
        println!("  {} {}", "✓ Reversed:".green(), self.succeeded);
        if self.failed > 0 {
            println!("  {} {}", "✗ Errors:".red(), self.failed);
            println!("\n{}", "Error details:".red().bold());
            for msg in &self.error_messages {
                println!("  - {msg}");
            }
        }
    }
}

/// Reverse one batch of operations
///
/// Reversal order: copies first (deleted), then non-copy files in reverse
/// application order, then non-copy directories deepest-path-first. Undo is
/// single-shot; the caller clears the batch afterward regardless of partial
/// failures.
#[must_use]
pub fn undo(records: &[OperationRecord]) -> UndoSummary {
    let mut summary = UndoSummary::default();

    let copies = records.iter().rev().filter(|r| r.kind == OperationKind::Copy);
    let files = records
        .iter()
        .rev()
        .filter(|r| r.kind != OperationKind::Copy && !r.is_dir);
    let mut dirs: Vec<&OperationRecord> = records
        .iter()
        .filter(|r| r.kind != OperationKind::Copy && r.is_dir)
        .collect();
    dirs.sort_by_key(|r| std::cmp::Reverse(r.to.components().count()));

    for record in copies {
        match fs::remove_file(&record.to) {
            Ok(()) => summary.add_success(),
            Err(e) => summary.add_failure(format!(
                "Could not delete copy {}: {e}",
                record.to.display()
            )),
        }
    }

    for record in files.chain(dirs) {
        if !record.to.exists() {
            summary.add_failure(format!(
                "{} is missing, cannot restore {}",
                record.to.display(),
                record.from.display()
            ));
            continue;
        }
        match fs::rename(&record.to, &record.from) {
            Ok(()) => summary.add_success(),
            Err(e) => summary.add_failure(format!(
                "Could not restore {} -> {}: {e}",
                record.to.display(),
                record.from.display()
            )),
        }
    }

    summary
}
