//! Name transform pipeline
//!
//! An ordered chain of stateless stages applied per item to compute a new
//! base name and extension. The order is fixed:
//!
//! 1. [`affix`] - clear/strip/insert/wrap the base name
//! 2. [`removal`] - advanced character removal and cropping
//! 3. [`replace`] - literal or regex search and replace
//! 4. [`casing`] - case conversion
//! 5. [`reorder`] - part reordering and folder name append
//! 6. [`numbering`] - sequence numbers
//! 7. [`datestamp`] - timestamp stamping
//! 8. [`extension`] - extension handling (independent of the base name)
//!
//! Each stage is a pure function of its inputs and its own configuration, so
//! re-running the pipeline on the same inputs always yields identical output.
//! Disabled stages are no-ops.

pub mod affix;
pub mod casing;
pub mod datestamp;
pub mod extension;
pub mod numbering;
pub mod removal;
pub mod reorder;
pub mod replace;

pub use affix::AffixConfig;
pub use casing::{CaseConfig, CaseMode};
pub use datestamp::{DateStampConfig, TimeField};
pub use extension::{ExtensionConfig, ExtensionMode};
pub use numbering::NumberConfig;
pub use removal::RemovalConfig;
pub use reorder::ReorderConfig;
pub use replace::ReplaceConfig;

use serde::{Deserialize, Serialize};

use crate::scan::CandidateItem;

/// Where generated text is attached relative to the base name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Prefix,
    Suffix,
}

/// Complete pipeline configuration, one sub-config per stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    #[serde(default)]
    pub affix: AffixConfig,
    #[serde(default)]
    pub removal: RemovalConfig,
    #[serde(default)]
    pub replace: ReplaceConfig,
    #[serde(default)]
    pub casing: CaseConfig,
    #[serde(default)]
    pub reorder: ReorderConfig,
    #[serde(default)]
    pub numbering: NumberConfig,
    #[serde(default)]
    pub datestamp: DateStampConfig,
    #[serde(default)]
    pub extension: ExtensionConfig,
}

impl TransformConfig {
    /// Configuration problems that make a stage degrade to a pass-through
    ///
    /// Currently only the search/replace stage can be misconfigured this way
    /// (a malformed regex); the name still flows through unchanged, but the
    /// caller should surface the warning.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(w) = self.replace.warning() {
            warnings.push(w);
        }
        warnings
    }
}

/// A computed name: new base name plus new extension (leading dot included)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewName {
    pub stem: String,
    pub extension: String,
}

impl NewName {
    /// Full file name, stem and extension joined
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}{}", self.stem, self.extension)
    }
}

/// Run the full pipeline for one item
///
/// `seq` is the item's zero-based position in the sorted preview list; the
/// numbering stage turns it into `start + step * seq`.
#[must_use]
pub fn apply(config: &TransformConfig, item: &CandidateItem, seq: u64) -> NewName {
    let mut stem = item.stem().to_string();
    stem = affix::apply(&config.affix, &stem);
    stem = removal::apply(&config.removal, &stem);
    stem = replace::apply(&config.replace, &stem);
    stem = casing::apply(&config.casing, &stem);
    stem = reorder::apply(&config.reorder, &stem, &item.parent_dir);
    stem = numbering::apply(&config.numbering, &stem, seq);
    stem = datestamp::apply(&config.datestamp, &stem, item);
    let ext = extension::apply(&config.extension, item.raw_extension());

    NewName {
        stem,
        extension: ext,
    }
}
