//! Explicit session context
//!
//! One `Session` value owns the state of a preview→apply→undo cycle: the
//! root being processed, the latest preview, and the last applied batch.
//! The engine components stay stateless; the orchestrating caller threads
//! this context through them.

use std::path::{Path, PathBuf};

use crate::exec::{self, ApplyOptions, ApplyOutcome, ExecError, OperationRecord, UndoSummary};
use crate::filter::FilterConfig;
use crate::preview::{self, Preview, PreviewOptions};
use crate::scan::{self, ScanOptions};
use crate::transform::TransformConfig;
use crate::RenamrError;

/// State for one preview/apply/undo cycle over a root directory
#[derive(Debug, Default)]
pub struct Session {
    root: PathBuf,
    last_preview: Option<Preview>,
    last_batch: Option<Vec<OperationRecord>>,
}

impl Session {
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            last_preview: None,
            last_batch: None,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The current preview, if one was built and not yet consumed
    #[must_use]
    pub fn preview(&self) -> Option<&Preview> {
        self.last_preview.as_ref()
    }

    /// The last applied batch, if any (cleared by undo)
    #[must_use]
    pub fn last_batch(&self) -> Option<&[OperationRecord]> {
        self.last_batch.as_deref()
    }

    /// Run one full preview cycle: scan, filter, sort, transform, resolve
    ///
    /// Replaces any previous preview wholesale. Returned warnings combine
    /// scan-time skips with disabled-filter and transform notes.
    ///
    /// # Errors
    /// Returns `RenamrError::Scan` when the root itself cannot be read.
    pub fn build_preview(
        &mut self,
        scan_options: &ScanOptions,
        filter: &FilterConfig,
        transform: &TransformConfig,
        preview_options: &PreviewOptions,
    ) -> Result<(&Preview, Vec<String>), RenamrError> {
        let outcome = scan::collect(&self.root, scan_options)?;
        let mut warnings = outcome.warnings;
        warnings.extend(transform.warnings());

        let items = filter.retain(outcome.items);
        let preview = preview::build(items, transform, preview_options);
        let preview = self.last_preview.insert(preview);

        Ok((&*preview, warnings))
    }

    /// Apply the current preview and store the executed batch
    ///
    /// The preview is consumed: a new one must be built before the next
    /// apply.
    ///
    /// # Errors
    /// Returns `ExecError::NoBatch` when no preview exists, or
    /// `ExecError::PreviewBlocked` while conflicts/errors remain.
    pub fn apply(&mut self, options: &ApplyOptions) -> Result<ApplyOutcome, ExecError> {
        let preview = self.last_preview.take().ok_or(ExecError::NoBatch)?;
        let outcome = exec::apply(&preview, &self.root, options)?;
        self.last_batch = Some(outcome.records.clone());
        Ok(outcome)
    }

    /// Undo the last applied batch
    ///
    /// Single-shot: the batch is cleared whether the undo fully or partially
    /// succeeded.
    ///
    /// # Errors
    /// Returns `ExecError::NoBatch` when nothing has been applied.
    pub fn undo(&mut self) -> Result<UndoSummary, ExecError> {
        let batch = self.last_batch.take().ok_or(ExecError::NoBatch)?;
        Ok(exec::undo(&batch))
    }
}
