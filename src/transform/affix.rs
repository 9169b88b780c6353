//! Stage 1: add/remove
//!
//! Clears or strips characters from the base name, inserts literal text at a
//! character offset, and finally wraps the result with a prefix and suffix.
//! Sub-steps run in that order; each is individually optional.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffixConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Clear the whole base name before anything else
    #[serde(default)]
    pub remove_all: bool,
    /// Strip decimal digits
    #[serde(default)]
    pub strip_digits: bool,
    /// Strip symbols (anything that is not alphanumeric, underscore, or
    /// whitespace)
    #[serde(default)]
    pub strip_symbols: bool,
    /// Collapse runs of internal whitespace to a single space and trim
    #[serde(default)]
    pub collapse_whitespace: bool,
    /// Literal text to insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_text: Option<String>,
    /// Character offset for the insertion, counted from the start (or from
    /// the end when `insert_from_end`), clamped to the name length
    #[serde(default)]
    pub insert_at: usize,
    #[serde(default)]
    pub insert_from_end: bool,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

pub fn apply(config: &AffixConfig, stem: &str) -> String {
    if !config.enabled {
        return stem.to_string();
    }

    let mut out = if config.remove_all {
        String::new()
    } else {
        stem.to_string()
    };

    if config.strip_digits {
        out.retain(|c| !c.is_ascii_digit());
    }
    if config.strip_symbols {
        out.retain(|c| c.is_alphanumeric() || c == '_' || c.is_whitespace());
    }
    if config.collapse_whitespace {
        out = out.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    if let Some(text) = &config.insert_text {
        let chars: Vec<char> = out.chars().collect();
        let offset = config.insert_at.min(chars.len());
        let index = if config.insert_from_end {
            chars.len() - offset
        } else {
            offset
        };
        let mut inserted: String = chars[..index].iter().collect();
        inserted.push_str(text);
        inserted.extend(&chars[index..]);
        out = inserted;
    }

    format!("{}{}{}", config.prefix, out, config.suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> AffixConfig {
        AffixConfig {
            enabled: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_disabled_is_identity() {
        let config = AffixConfig {
            prefix: "X".into(),
            ..Default::default()
        };
        assert_eq!(apply(&config, "name"), "name");
    }

    #[test]
    fn test_strip_digits_then_prefix() {
        let config = AffixConfig {
            strip_digits: true,
            prefix: "IMG_".into(),
            ..enabled()
        };
        assert_eq!(apply(&config, "photo123"), "IMG_photo");
    }

    #[test]
    fn test_remove_all_keeps_wrapping() {
        let config = AffixConfig {
            remove_all: true,
            prefix: "a".into(),
            suffix: "b".into(),
            ..enabled()
        };
        assert_eq!(apply(&config, "whatever"), "ab");
    }

    #[test]
    fn test_strip_symbols_keeps_words_and_spaces() {
        let config = AffixConfig {
            strip_symbols: true,
            ..enabled()
        };
        assert_eq!(apply(&config, "a-b (c) #1_x"), "ab c 1_x");
    }

    #[test]
    fn test_collapse_whitespace() {
        let config = AffixConfig {
            collapse_whitespace: true,
            ..enabled()
        };
        assert_eq!(apply(&config, "  too   many spaces "), "too many spaces");
    }

    #[test]
    fn test_insert_from_start() {
        let config = AffixConfig {
            insert_text: Some("-X-".into()),
            insert_at: 2,
            ..enabled()
        };
        assert_eq!(apply(&config, "abcd"), "ab-X-cd");
    }

    #[test]
    fn test_insert_from_end() {
        let config = AffixConfig {
            insert_text: Some("-X-".into()),
            insert_at: 1,
            insert_from_end: true,
            ..enabled()
        };
        assert_eq!(apply(&config, "abcd"), "abc-X-d");
    }

    #[test]
    fn test_insert_offset_clamped() {
        let config = AffixConfig {
            insert_text: Some("!".into()),
            insert_at: 99,
            ..enabled()
        };
        assert_eq!(apply(&config, "ab"), "ab!");
    }

    #[test]
    fn test_suffix_applied_last() {
        let config = AffixConfig {
            suffix: "_v2".into(),
            insert_text: Some("Z".into()),
            insert_at: 0,
            ..enabled()
        };
        assert_eq!(apply(&config, "doc"), "Zdoc_v2");
    }
}
