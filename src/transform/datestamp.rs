//! Stage 7: date stamping
//!
//! Formats one of the item's timestamps with `YYYY`/`MM`/`DD`/`HH`/`mm`/`ss`
//! substitution tokens and attaches it as a prefix or suffix. Items missing
//! the requested timestamp pass through unchanged.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::Position;
use crate::scan::CandidateItem;

/// Which timestamp of the item to format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeField {
    Created,
    #[default]
    Modified,
    Accessed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateStampConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub field: TimeField,
    /// Token pattern, e.g. `YYYY-MM-DD` or `YYYYMMDD_HHmmss`
    #[serde(default)]
    pub pattern: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub separator: String,
}

/// Substitution tokens in the order they must be translated; `MM` before
/// `mm` keeps months and minutes distinct.
const TOKENS: [(&str, &str); 6] = [
    ("YYYY", "%Y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("HH", "%H"),
    ("mm", "%M"),
    ("ss", "%S"),
];

/// Translate a token pattern into a chrono format string, escaping any
/// literal `%` on the way
fn to_chrono_format(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    'outer: while !rest.is_empty() {
        if let Some(stripped) = rest.strip_prefix('%') {
            out.push_str("%%");
            rest = stripped;
            continue;
        }
        for (token, replacement) in TOKENS {
            if let Some(stripped) = rest.strip_prefix(token) {
                out.push_str(replacement);
                rest = stripped;
                continue 'outer;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out
}

pub fn apply(config: &DateStampConfig, stem: &str, item: &CandidateItem) -> String {
    if !config.enabled || config.pattern.is_empty() {
        return stem.to_string();
    }

    let Some(stats) = &item.stats else {
        return stem.to_string();
    };
    let time = match config.field {
        TimeField::Created => stats.created,
        TimeField::Modified => stats.modified,
        TimeField::Accessed => stats.accessed,
    };
    let Some(time) = time else {
        return stem.to_string();
    };

    let local: DateTime<Local> = time.into();
    let stamp = local.format(&to_chrono_format(&config.pattern)).to_string();

    match config.position {
        Position::Prefix => format!("{stamp}{}{stem}", config.separator),
        Position::Suffix => format!("{stem}{}{stamp}", config.separator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ItemStats;
    use chrono::TimeZone;
    use std::path::PathBuf;
    use std::time::SystemTime;

    fn item_with_modified(time: SystemTime) -> CandidateItem {
        CandidateItem {
            full_path: PathBuf::from("/data/a.txt"),
            parent_dir: PathBuf::from("/data"),
            name: "a.txt".into(),
            extension: ".txt".into(),
            is_dir: false,
            is_file: true,
            stats: Some(ItemStats {
                size: 1,
                modified: Some(time),
                accessed: None,
                created: None,
            }),
        }
    }

    fn local_time(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> SystemTime {
        Local
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .single()
            .expect("unambiguous local time")
            .into()
    }

    #[test]
    fn test_token_translation() {
        assert_eq!(to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(to_chrono_format("HHmmss"), "%H%M%S");
        assert_eq!(to_chrono_format("YYYYMMDD_HHmm"), "%Y%m%d_%H%M");
        assert_eq!(to_chrono_format("lit 100%"), "lit 100%%");
    }

    #[test]
    fn test_suffix_stamp() {
        let config = DateStampConfig {
            enabled: true,
            field: TimeField::Modified,
            pattern: "YYYY-MM-DD".into(),
            position: Position::Suffix,
            separator: "_".into(),
        };
        let item = item_with_modified(local_time(2024, 3, 9, 14, 5, 6));
        assert_eq!(apply(&config, "report", &item), "report_2024-03-09");
    }

    #[test]
    fn test_prefix_stamp_with_time_tokens() {
        let config = DateStampConfig {
            enabled: true,
            field: TimeField::Modified,
            pattern: "HH-mm-ss".into(),
            position: Position::Prefix,
            separator: " ".into(),
        };
        let item = item_with_modified(local_time(2024, 3, 9, 14, 5, 6));
        assert_eq!(apply(&config, "log", &item), "14-05-06 log");
    }

    #[test]
    fn test_missing_timestamp_passes_through() {
        let config = DateStampConfig {
            enabled: true,
            field: TimeField::Created,
            pattern: "YYYY".into(),
            ..Default::default()
        };
        let item = item_with_modified(SystemTime::UNIX_EPOCH);
        // Created is None on the fixture
        assert_eq!(apply(&config, "x", &item), "x");
    }

    #[test]
    fn test_disabled_is_identity() {
        let config = DateStampConfig::default();
        let item = item_with_modified(SystemTime::UNIX_EPOCH);
        assert_eq!(apply(&config, "x", &item), "x");
    }
}
