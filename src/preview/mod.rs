//! Preview builder module
//!
//! Turns the filtered candidate list into a reviewable plan: the list is
//! sorted (numbering depends on position), each item runs through the
//! transform pipeline, target paths are resolved, and conflicts are detected
//! before anything touches the filesystem. Apply refuses to run while any
//! entry is in conflict or error state - blocking is batch-wide, not
//! per-item, so a collision can never produce a half-applied batch.

pub mod builder;
pub mod sort;
pub mod types;

pub use builder::{PreviewOptions, build};
pub use sort::{natural_cmp, sort_items};
pub use types::{
    DestinationKind, EntryStatus, OperationKind, Preview, PreviewEntry, SortKey, SortOrder,
};
