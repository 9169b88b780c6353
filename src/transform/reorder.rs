//! Stage 5: part reordering and folder name append
//!
//! Splits the base name into parts on a delimiter, moves one part to a new
//! position, and can prepend/append names of the trailing parent directory
//! segments. When no delimiter is configured, parts are split on runs of
//! `_`, `-`, or whitespace, and those separator runs stay in place; only the
//! parts move.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Position;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Explicit split character; None enables auto-detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
    /// 1-based index of the part to move (clamped)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_from: Option<usize>,
    /// 1-based destination index (clamped)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_to: Option<usize>,
    /// Number of trailing parent path segments to append; 0 disables
    #[serde(default)]
    pub folder_parts: usize,
    #[serde(default)]
    pub folder_position: Position,
    #[serde(default)]
    pub folder_separator: String,
}

pub fn apply(config: &ReorderConfig, stem: &str, parent_dir: &Path) -> String {
    if !config.enabled {
        return stem.to_string();
    }

    let mut out = stem.to_string();

    if let (Some(from), Some(to)) = (config.move_from, config.move_to) {
        out = move_part(&out, config.delimiter, from, to);
    }

    if config.folder_parts > 0 {
        let segments: Vec<String> = parent_dir
            .components()
            .filter_map(|c| match c {
                std::path::Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        let take = config.folder_parts.min(segments.len());
        let folder_text = segments[segments.len() - take..].join(&config.folder_separator);
        if !folder_text.is_empty() {
            out = match config.folder_position {
                Position::Prefix => {
                    format!("{folder_text}{}{out}", config.folder_separator)
                }
                Position::Suffix => {
                    format!("{out}{}{folder_text}", config.folder_separator)
                }
            };
        }
    }

    out
}

/// Move the 1-based `from` part to 1-based position `to`
///
/// Separator runs keep their original order and positions; only the part
/// tokens are permuted. Indexes are clamped to the valid range.
fn move_part(value: &str, delimiter: Option<char>, from: usize, to: usize) -> String {
    let (mut parts, seps) = tokenize(value, delimiter);
    if parts.len() < 2 {
        return value.to_string();
    }

    let from = from.clamp(1, parts.len()) - 1;
    let to = to.clamp(1, parts.len()) - 1;
    let part = parts.remove(from);
    parts.insert(to, part);

    let mut out = String::with_capacity(value.len());
    for (i, part) in parts.iter().enumerate() {
        out.push_str(part);
        if let Some(sep) = seps.get(i) {
            out.push_str(sep);
        }
    }
    out
}

fn is_auto_separator(c: char) -> bool {
    c == '_' || c == '-' || c.is_whitespace()
}

/// Split into alternating parts and separator runs
///
/// Returns `(parts, separators)` with `parts.len() == separators.len() + 1`;
/// leading or trailing separators yield empty boundary parts, mirroring
/// `str::split`.
fn tokenize(value: &str, delimiter: Option<char>) -> (Vec<String>, Vec<String>) {
    let is_sep: Box<dyn Fn(char) -> bool> = match delimiter {
        Some(d) => Box::new(move |c| c == d),
        None => Box::new(is_auto_separator),
    };
    // An explicit delimiter splits on every occurrence; auto mode treats a
    // whole run as one separator.
    let run_mode = delimiter.is_none();

    let mut parts = vec![String::new()];
    let mut seps: Vec<String> = Vec::new();
    let mut in_sep = false;

    for c in value.chars() {
        if is_sep(c) {
            if in_sep && run_mode {
                if let Some(last) = seps.last_mut() {
                    last.push(c);
                }
            } else {
                seps.push(c.to_string());
                parts.push(String::new());
                in_sep = true;
            }
        } else {
            if let Some(last) = parts.last_mut() {
                last.push(c);
            }
            in_sep = false;
        }
    }

    (parts, seps)
}
