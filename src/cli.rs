//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for renamr using the `clap`
//! crate. It provides command parsing, flag grouping per pipeline stage, and
//! helper methods for assembling engine configuration from the parsed flags.
//!
//! # Commands
//!
//! - **run**: Scan, filter, transform, preview, and apply a rename batch
//! - **undo**: Reverse the most recent batch under a root
//! - **preset**: Manage saved configurations (save, list, show, delete)
//!
//! # Design Features
//!
//! - One flag group per transform stage; a stage is enabled exactly when one
//!   of its flags is set
//! - Global `--quiet` flag for scripting-friendly output
//! - `--dry-run` stops after the preview, `--yes` skips confirmation
//! - `--preset` loads a saved configuration wholesale

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::filter::{Bounds, FilterSpec};
use crate::preview::{DestinationKind, PreviewOptions, SortKey, SortOrder};
use crate::presets::PresetSnapshot;
use crate::scan::{parse_extension_list, ScanOptions, Scope};
use crate::transform::{
    AffixConfig, CaseConfig, CaseMode, DateStampConfig, ExtensionConfig, ExtensionMode,
    NumberConfig, Position, RemovalConfig, ReorderConfig, ReplaceConfig, TimeField,
    TransformConfig,
};
use crate::exec::ApplyOptions;

/// Shared arguments selecting what to scan
#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    /// What to process (files, folders, or both)
    #[arg(long = "scope", value_enum, default_value_t = Scope::Files)]
    pub scope: Scope,

    /// Descend into subfolders
    #[arg(short = 'R', long = "recursive")]
    pub recursive: bool,

    /// Extension allow-list, `;` or `,` separated (e.g. ".jpg;.png")
    #[arg(long = "ext", value_name = "LIST")]
    pub extensions: Option<String>,
}

impl ScanArgs {
    #[must_use]
    pub fn to_options(&self) -> ScanOptions {
        ScanOptions {
            include_subfolders: self.recursive,
            scope: self.scope,
            extensions: self
                .extensions
                .as_deref()
                .map(parse_extension_list)
                .unwrap_or_default(),
        }
    }
}

/// Shared arguments narrowing the candidate list
#[derive(Parser, Debug, Clone)]
pub struct FilterArgs {
    /// Wildcard masks (`*`/`?`), case-insensitive; an item passes if it
    /// matches any (can specify multiple: -m "*.jpg" -m "IMG*")
    #[arg(short = 'm', long = "mask", value_name = "MASK", num_args = 0..)]
    pub masks: Vec<String>,

    /// Regular expression matched against the name
    #[arg(long = "name-regex", value_name = "REGEX")]
    pub name_regex: Option<String>,

    /// Structured condition, e.g. "size > 1024" or "name contains draft"
    #[arg(short = 'w', long = "where", value_name = "COND")]
    pub condition: Option<String>,

    /// Minimum name length (characters)
    #[arg(long = "min-name-len", value_name = "N")]
    pub min_name_len: Option<usize>,

    /// Maximum name length (characters)
    #[arg(long = "max-name-len", value_name = "N")]
    pub max_name_len: Option<usize>,

    /// Minimum full path length (characters)
    #[arg(long = "min-path-len", value_name = "N")]
    pub min_path_len: Option<usize>,

    /// Maximum full path length (characters)
    #[arg(long = "max-path-len", value_name = "N")]
    pub max_path_len: Option<usize>,
}

impl FilterArgs {
    #[must_use]
    pub fn to_spec(&self) -> FilterSpec {
        FilterSpec {
            name_len: Bounds::new(self.min_name_len, self.max_name_len),
            path_len: Bounds::new(self.min_path_len, self.max_path_len),
            masks: self.masks.clone(),
            regex: self.name_regex.clone(),
            predicate: self.condition.clone(),
        }
    }
}

/// Transform pipeline flags, one group per stage
#[derive(Parser, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct TransformArgs {
    // Affix stage
    /// Clear the base name entirely before other affix steps
    #[arg(long = "clear-name")]
    pub clear_name: bool,

    /// Strip decimal digits from the base name
    #[arg(long = "strip-digits")]
    pub strip_digits: bool,

    /// Strip symbols (anything not alphanumeric, underscore, or space)
    #[arg(long = "strip-symbols")]
    pub strip_symbols: bool,

    /// Collapse runs of whitespace to a single space and trim
    #[arg(long = "collapse-spaces")]
    pub collapse_spaces: bool,

    /// Insert literal text at --insert-at
    #[arg(long = "insert", value_name = "TEXT")]
    pub insert: Option<String>,

    /// Character offset for --insert (default 0)
    #[arg(long = "insert-at", value_name = "N", default_value_t = 0)]
    pub insert_at: usize,

    /// Count the --insert-at offset from the end of the name
    #[arg(long = "insert-from-end")]
    pub insert_from_end: bool,

    /// Text prepended to the base name
    #[arg(short = 'p', long = "prefix", value_name = "TEXT")]
    pub prefix: Option<String>,

    /// Text appended to the base name
    #[arg(short = 's', long = "suffix", value_name = "TEXT")]
    pub suffix: Option<String>,

    // Removal stage
    /// 1-based inclusive start of a character range to delete
    #[arg(long = "remove-from", value_name = "N", requires = "remove_to")]
    pub remove_from: Option<usize>,

    /// 1-based inclusive end of the range
    #[arg(long = "remove-to", value_name = "N", requires = "remove_from")]
    pub remove_to: Option<usize>,

    /// Remove the first N characters
    #[arg(long = "chop-first", value_name = "N")]
    pub chop_first: Option<usize>,

    /// Remove the last N characters
    #[arg(long = "chop-last", value_name = "N")]
    pub chop_last: Option<usize>,

    /// Delete everything before the first occurrence of this text
    #[arg(long = "crop-before", value_name = "TEXT")]
    pub crop_before: Option<String>,

    /// Delete everything after the first occurrence of this text
    #[arg(long = "crop-after", value_name = "TEXT")]
    pub crop_after: Option<String>,

    /// Trim surrounding whitespace
    #[arg(long = "trim")]
    pub trim: bool,

    /// Strip leading dots so results cannot become hidden files
    #[arg(long = "strip-leading-dots")]
    pub strip_leading_dots: bool,

    // Replace stage
    /// Text (or regex with --regex) to search for in the base name
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Replacement text for --search (default empty, i.e. delete)
    #[arg(long = "replace", value_name = "TEXT", requires = "search")]
    pub replace: Option<String>,

    /// Treat --search as a regular expression
    #[arg(long = "regex", requires = "search")]
    pub regex: bool,

    /// Case-insensitive search
    #[arg(short = 'i', long = "ignore-case", requires = "search")]
    pub ignore_case: bool,

    /// Replace every occurrence instead of just the first
    #[arg(short = 'g', long = "replace-all", requires = "search")]
    pub replace_all: bool,

    // Casing stage
    /// Case conversion applied to the base name
    #[arg(long = "case", value_enum, value_name = "MODE")]
    pub case: Option<CaseMode>,

    // Reorder stage
    /// Split character for part reordering (auto-detected when omitted)
    #[arg(long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// 1-based index of the name part to move
    #[arg(long = "move-part", value_name = "N", requires = "move_to")]
    pub move_part: Option<usize>,

    /// 1-based destination index for --move-part
    #[arg(long = "move-to", value_name = "N", requires = "move_part")]
    pub move_to: Option<usize>,

    /// Append this many trailing parent folder names to the base name
    #[arg(long = "folder-parts", value_name = "N")]
    pub folder_parts: Option<usize>,

    /// Where the folder names are attached
    #[arg(long = "folder-position", value_enum, default_value_t = Position::Suffix)]
    pub folder_position: Position,

    /// Separator between base name and folder names
    #[arg(long = "folder-sep", value_name = "TEXT", default_value = "_")]
    pub folder_sep: String,

    // Numbering stage
    /// Add a sequence number to each name
    #[arg(short = 'n', long = "number")]
    pub number: bool,

    /// First sequence value (default 1)
    #[arg(long = "start", value_name = "N", default_value_t = 1, requires = "number")]
    pub start: i64,

    /// Sequence increment (default 1)
    #[arg(long = "step", value_name = "N", default_value_t = 1, requires = "number")]
    pub step: i64,

    /// Zero-pad sequence numbers to this width
    #[arg(long = "pad", value_name = "N", default_value_t = 0, requires = "number")]
    pub pad: usize,

    /// Where the sequence number is attached
    #[arg(long = "number-position", value_enum, default_value_t = Position::Suffix)]
    pub number_position: Position,

    /// Separator between base name and sequence number
    #[arg(long = "number-sep", value_name = "TEXT", default_value = "_")]
    pub number_sep: String,

    // Datestamp stage
    /// Stamp a timestamp using this token pattern (YYYY, MM, DD, HH, mm, ss)
    #[arg(long = "date", value_name = "PATTERN")]
    pub date: Option<String>,

    /// Which timestamp of the item to format
    #[arg(long = "date-field", value_enum, default_value_t = TimeField::Modified)]
    pub date_field: TimeField,

    /// Where the timestamp is attached
    #[arg(long = "date-position", value_enum, default_value_t = Position::Suffix)]
    pub date_position: Position,

    /// Separator between base name and timestamp
    #[arg(long = "date-sep", value_name = "TEXT", default_value = "_")]
    pub date_sep: String,

    // Extension stage
    /// Extension case handling
    #[arg(long = "ext-case", value_enum, conflicts_with = "ext_replace")]
    pub ext_case: Option<ExtensionMode>,

    /// Replace the extension (empty string removes it)
    #[arg(long = "ext-replace", value_name = "EXT")]
    pub ext_replace: Option<String>,
}

impl TransformArgs {
    fn affix(&self) -> AffixConfig {
        let enabled = self.clear_name
            || self.strip_digits
            || self.strip_symbols
            || self.collapse_spaces
            || self.insert.is_some()
            || self.prefix.is_some()
            || self.suffix.is_some();
        AffixConfig {
            enabled,
            remove_all: self.clear_name,
            strip_digits: self.strip_digits,
            strip_symbols: self.strip_symbols,
            collapse_whitespace: self.collapse_spaces,
            insert_text: self.insert.clone(),
            insert_at: self.insert_at,
            insert_from_end: self.insert_from_end,
            prefix: self.prefix.clone().unwrap_or_default(),
            suffix: self.suffix.clone().unwrap_or_default(),
        }
    }

    fn removal(&self) -> RemovalConfig {
        let enabled = self.remove_from.is_some()
            || self.chop_first.is_some()
            || self.chop_last.is_some()
            || self.crop_before.is_some()
            || self.crop_after.is_some()
            || self.trim
            || self.strip_leading_dots;
        RemovalConfig {
            enabled,
            range_from: self.remove_from,
            range_to: self.remove_to,
            chop_first: self.chop_first.unwrap_or(0),
            chop_last: self.chop_last.unwrap_or(0),
            crop_before: self.crop_before.clone(),
            crop_after: self.crop_after.clone(),
            trim: self.trim,
            strip_leading_dots: self.strip_leading_dots,
        }
    }

    fn replace_stage(&self) -> ReplaceConfig {
        ReplaceConfig {
            enabled: self.search.is_some(),
            search: self.search.clone().unwrap_or_default(),
            replacement: self.replace.clone().unwrap_or_default(),
            use_regex: self.regex,
            case_insensitive: self.ignore_case,
            replace_all: self.replace_all,
        }
    }

    fn casing(&self) -> CaseConfig {
        CaseConfig {
            enabled: self.case.is_some(),
            mode: self.case.unwrap_or_default(),
        }
    }

    fn reorder(&self) -> ReorderConfig {
        let folder_parts = self.folder_parts.unwrap_or(0);
        ReorderConfig {
            enabled: self.move_part.is_some() || folder_parts > 0,
            delimiter: self.delimiter,
            move_from: self.move_part,
            move_to: self.move_to,
            folder_parts,
            folder_position: self.folder_position,
            folder_separator: self.folder_sep.clone(),
        }
    }

    fn numbering(&self) -> NumberConfig {
        NumberConfig {
            enabled: self.number,
            start: self.start,
            step: self.step,
            width: self.pad,
            position: self.number_position,
            separator: self.number_sep.clone(),
        }
    }

    fn datestamp(&self) -> DateStampConfig {
        DateStampConfig {
            enabled: self.date.is_some(),
            field: self.date_field,
            pattern: self.date.clone().unwrap_or_default(),
            position: self.date_position,
            separator: self.date_sep.clone(),
        }
    }

    fn extension(&self) -> ExtensionConfig {
        if let Some(replacement) = &self.ext_replace {
            return ExtensionConfig {
                enabled: true,
                mode: ExtensionMode::Replace,
                replacement: replacement.clone(),
            };
        }
        ExtensionConfig {
            enabled: self.ext_case.is_some(),
            mode: self.ext_case.unwrap_or_default(),
            replacement: String::new(),
        }
    }

    /// Assemble the full pipeline configuration from the parsed flags
    #[must_use]
    pub fn to_config(&self) -> TransformConfig {
        TransformConfig {
            affix: self.affix(),
            removal: self.removal(),
            replace: self.replace_stage(),
            casing: self.casing(),
            reorder: self.reorder(),
            numbering: self.numbering(),
            datestamp: self.datestamp(),
            extension: self.extension(),
        }
    }
}

/// Shared arguments controlling ordering and destination
#[derive(Parser, Debug, Clone)]
pub struct OutputArgs {
    /// Sort key for the candidate list (numbering follows this order)
    #[arg(long = "sort", value_enum, default_value_t = SortKey::Name)]
    pub sort: SortKey,

    /// Sort direction
    #[arg(long = "order", value_enum, default_value_t = SortOrder::Asc)]
    pub order: SortOrder,

    /// Destination directory for moved or copied results
    #[arg(short = 'd', long = "dest", value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// How entries are sent to --dest
    #[arg(long = "dest-kind", value_enum, default_value_t = DestinationKind::Move, requires = "dest")]
    pub dest_kind: DestinationKind,
}

impl OutputArgs {
    #[must_use]
    pub fn to_options(&self) -> PreviewOptions {
        PreviewOptions {
            sort_key: self.sort,
            sort_order: self.order,
            destination: self.dest.clone(),
            destination_kind: self.dest_kind,
        }
    }
}

/// Post-mutation attribute flags
#[derive(Parser, Debug, Clone)]
pub struct AttributeArgs {
    /// Set modify/access time of results to "now"
    #[arg(long = "touch")]
    pub touch: bool,

    /// Mark results read-only
    #[arg(long = "read-only")]
    pub read_only: bool,

    /// Mark results hidden (best-effort, platform-dependent)
    #[arg(long = "hidden")]
    pub hidden: bool,
}

impl AttributeArgs {
    #[must_use]
    pub const fn to_options(&self) -> ApplyOptions {
        ApplyOptions {
            touch_times: self.touch,
            read_only: self.read_only,
            hidden: self.hidden,
        }
    }
}

/// Shared arguments for preset loading and saving
#[derive(Parser, Debug, Clone)]
pub struct PresetArgs {
    /// Load a saved preset (replaces scan, filter, transform, and sort flags)
    #[arg(short = 'P', long = "preset", value_name = "NAME")]
    pub preset: Option<String>,

    /// Save the assembled configuration as a preset
    #[arg(long = "save-preset", value_name = "NAME")]
    pub save_preset: Option<String>,

    /// Description for the saved preset
    #[arg(long = "preset-desc", value_name = "DESC", requires = "save_preset")]
    pub preset_desc: Option<String>,
}

/// Preset management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PresetCommands {
    /// Save a preset from the given configuration flags, without running
    Save {
        /// Name of the preset
        name: String,

        /// Description of the preset
        #[arg(long = "description")]
        description: Option<String>,

        #[command(flatten)]
        scan: ScanArgs,

        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        transform: TransformArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List all saved presets
    #[command(visible_alias = "ls")]
    List,

    /// Show a preset's full configuration
    Show {
        /// Name of the preset to show
        name: String,
    },

    /// Delete a preset
    #[command(visible_alias = "rm")]
    Delete {
        /// Name of the preset to delete
        name: String,

        /// Skip confirmation prompt
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scan a directory, preview the rename batch, and apply it
    #[command(visible_alias = "r")]
    Run {
        /// Root directory to process
        #[arg(value_name = "DIR", default_value = ".")]
        root: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,

        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        transform: TransformArgs,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        attrs: AttributeArgs,

        #[command(flatten)]
        preset: PresetArgs,

        /// Show the preview and stop without touching the filesystem
        #[arg(long = "dry-run")]
        dry_run: bool,

        /// Apply without asking for confirmation
        #[arg(short = 'y', long = "yes", conflicts_with = "dry_run")]
        yes: bool,
    },

    /// Reverse the most recent batch applied under a root
    #[command(visible_alias = "u")]
    Undo {
        /// Root directory the batch was applied to
        #[arg(value_name = "DIR", default_value = ".")]
        root: PathBuf,

        /// Undo without asking for confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Manage saved presets
    Preset {
        #[command(subcommand)]
        command: PresetCommands,
    },
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "renamr")]
#[command(about = "A batch file and folder rename engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Capture the assembled run configuration as a preset snapshot
#[must_use]
pub fn snapshot_from_args(
    scan: &ScanArgs,
    filter: &FilterArgs,
    transform: &TransformArgs,
    output: &OutputArgs,
) -> PresetSnapshot {
    PresetSnapshot {
        scope: scan.scope,
        include_subfolders: scan.recursive,
        extensions: scan.extensions.clone().unwrap_or_default(),
        filter: filter.to_spec(),
        transform: transform.to_config(),
        sort_key: output.sort,
        sort_order: output.order,
        destination: output.dest.clone(),
        destination_kind: output.dest_kind,
    }
}

/// Expand a preset snapshot back into engine configuration
#[must_use]
pub fn snapshot_to_run_config(
    snapshot: &PresetSnapshot,
) -> (ScanOptions, FilterSpec, TransformConfig, PreviewOptions) {
    (
        ScanOptions {
            include_subfolders: snapshot.include_subfolders,
            scope: snapshot.scope,
            extensions: parse_extension_list(&snapshot.extensions),
        },
        snapshot.filter.clone(),
        snapshot.transform.clone(),
        PreviewOptions {
            sort_key: snapshot.sort_key,
            sort_order: snapshot.sort_order,
            destination: snapshot.destination.clone(),
            destination_kind: snapshot.destination_kind,
        },
    )
}
