//! Stage 2: advanced removal
//!
//! Character-range deletion, chopping from either end, cropping around a
//! marker substring, and final cleanup (trim, leading dots). Offsets are
//! measured in characters, not bytes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalConfig {
    #[serde(default)]
    pub enabled: bool,
    /// 1-based inclusive start of a character range to delete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_from: Option<usize>,
    /// 1-based inclusive end of the range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_to: Option<usize>,
    /// Remove the first N characters
    #[serde(default)]
    pub chop_first: usize,
    /// Remove the last N characters
    #[serde(default)]
    pub chop_last: usize,
    /// Delete everything before the first occurrence of this marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_before: Option<String>,
    /// Delete everything after the first occurrence of this marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_after: Option<String>,
    /// Trim surrounding whitespace at the end of the stage
    #[serde(default)]
    pub trim: bool,
    /// Strip leading dots so the result cannot become a hidden file
    #[serde(default)]
    pub strip_leading_dots: bool,
}

pub fn apply(config: &RemovalConfig, stem: &str) -> String {
    if !config.enabled {
        return stem.to_string();
    }

    let mut out = stem.to_string();

    if let (Some(from), Some(to)) = (config.range_from, config.range_to) {
        out = delete_range(&out, from, to);
    }

    if config.chop_first > 0 {
        out = out.chars().skip(config.chop_first).collect();
    }
    if config.chop_last > 0 {
        let keep = out.chars().count().saturating_sub(config.chop_last);
        out = out.chars().take(keep).collect();
    }

    if let Some(marker) = config.crop_before.as_deref().filter(|m| !m.is_empty()) {
        if let Some(pos) = out.find(marker) {
            out = out[pos..].to_string();
        }
    }
    if let Some(marker) = config.crop_after.as_deref().filter(|m| !m.is_empty()) {
        if let Some(pos) = out.find(marker) {
            out = out[..pos + marker.len()].to_string();
        }
    }

    if config.trim {
        out = out.trim().to_string();
    }
    if config.strip_leading_dots {
        out = out.trim_start_matches('.').to_string();
    }

    out
}

/// Delete the 1-based inclusive character range `[from, to]`
///
/// Out-of-range or inverted bounds degrade gracefully: the range is clamped
/// to the name, and an empty effective range is a no-op.
fn delete_range(value: &str, from: usize, to: usize) -> String {
    let from = from.max(1);
    if from > to {
        return value.to_string();
    }
    value
        .chars()
        .enumerate()
        .filter(|(i, _)| {
            let pos = i + 1;
            pos < from || pos > to
        })
        .map(|(_, c)| c)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> RemovalConfig {
        RemovalConfig {
            enabled: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_disabled_is_identity() {
        let config = RemovalConfig {
            chop_first: 99,
            ..Default::default()
        };
        assert_eq!(apply(&config, "abc"), "abc");
    }

    #[test]
    fn test_delete_range_inclusive() {
        let config = RemovalConfig {
            range_from: Some(2),
            range_to: Some(4),
            ..enabled()
        };
        assert_eq!(apply(&config, "abcdef"), "aef");
    }

    #[test]
    fn test_delete_range_clamped() {
        let config = RemovalConfig {
            range_from: Some(3),
            range_to: Some(100),
            ..enabled()
        };
        assert_eq!(apply(&config, "abcde"), "ab");
    }

    #[test]
    fn test_inverted_range_is_noop() {
        let config = RemovalConfig {
            range_from: Some(4),
            range_to: Some(2),
            ..enabled()
        };
        assert_eq!(apply(&config, "abcde"), "abcde");
    }

    #[test]
    fn test_chop_first_and_last() {
        let config = RemovalConfig {
            chop_first: 2,
            chop_last: 3,
            ..enabled()
        };
        assert_eq!(apply(&config, "xxmiddleyyy"), "middle");
    }

    #[test]
    fn test_chop_more_than_length() {
        let config = RemovalConfig {
            chop_last: 10,
            ..enabled()
        };
        assert_eq!(apply(&config, "abc"), "");
    }

    #[test]
    fn test_crop_before_marker() {
        let config = RemovalConfig {
            crop_before: Some("EP".into()),
            ..enabled()
        };
        assert_eq!(apply(&config, "Show - EP01"), "EP01");
    }

    #[test]
    fn test_crop_after_marker() {
        let config = RemovalConfig {
            crop_after: Some("EP01".into()),
            ..enabled()
        };
        assert_eq!(apply(&config, "EP01 - extra junk"), "EP01");
    }

    #[test]
    fn test_crop_missing_marker_is_noop() {
        let config = RemovalConfig {
            crop_before: Some("zzz".into()),
            ..enabled()
        };
        assert_eq!(apply(&config, "abc"), "abc");
    }

    #[test]
    fn test_trim_and_leading_dots() {
        let config = RemovalConfig {
            trim: true,
            strip_leading_dots: true,
            ..enabled()
        };
        assert_eq!(apply(&config, "  ..hidden "), "hidden");
    }

    #[test]
    fn test_range_then_chop_order() {
        // The chop sees the string after range deletion.
        let config = RemovalConfig {
            range_from: Some(1),
            range_to: Some(2),
            chop_first: 1,
            ..enabled()
        };
        assert_eq!(apply(&config, "abcde"), "de");
    }
}
