//! Stage 3: search and replace
//!
//! Literal or regular-expression find over the base name, case-sensitive or
//! insensitive, replacing the first occurrence or all of them. A malformed
//! regex degrades the stage to a pass-through; the problem is surfaced via
//! [`ReplaceConfig::warning`].

use regex::{NoExpand, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub replacement: String,
    #[serde(default)]
    pub use_regex: bool,
    /// Match with Unicode case folding, in both literal and regex mode
    #[serde(default)]
    pub case_insensitive: bool,
    /// Replace every occurrence instead of just the first
    #[serde(default)]
    pub replace_all: bool,
}

impl ReplaceConfig {
    fn build_regex(&self) -> Result<Regex, regex::Error> {
        RegexBuilder::new(&self.search)
            .case_insensitive(self.case_insensitive)
            .build()
    }

    /// A warning when the stage is enabled but cannot do what was asked
    #[must_use]
    pub fn warning(&self) -> Option<String> {
        if !self.enabled || !self.use_regex {
            return None;
        }
        self.build_regex().err().map(|e| {
            format!(
                "Search pattern '{}' is not a valid regex, names pass through unchanged: {e}",
                self.search
            )
        })
    }
}

pub fn apply(config: &ReplaceConfig, stem: &str) -> String {
    if !config.enabled || config.search.is_empty() {
        return stem.to_string();
    }

    if config.use_regex {
        // Invalid pattern: already reported via warning(), pass through.
        let Ok(regex) = config.build_regex() else {
            return stem.to_string();
        };
        return if config.replace_all {
            regex.replace_all(stem, config.replacement.as_str()).into_owned()
        } else {
            regex.replace(stem, config.replacement.as_str()).into_owned()
        };
    }

    replace_literal(
        stem,
        &config.search,
        &config.replacement,
        config.case_insensitive,
        config.replace_all,
    )
}

/// Literal replacement; the insensitive path matches through an escaped
/// regex, so Unicode case folding applies to the search text
fn replace_literal(
    value: &str,
    search: &str,
    replacement: &str,
    case_insensitive: bool,
    replace_all: bool,
) -> String {
    if !case_insensitive {
        return if replace_all {
            value.replace(search, replacement)
        } else {
            value.replacen(search, replacement, 1)
        };
    }

    // An escaped literal always compiles; pass through if it somehow fails.
    let Ok(regex) = RegexBuilder::new(&regex::escape(search))
        .case_insensitive(true)
        .build()
    else {
        return value.to_string();
    };

    if replace_all {
        regex.replace_all(value, NoExpand(replacement)).into_owned()
    } else {
        regex.replace(value, NoExpand(replacement)).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(search: &str, replacement: &str) -> ReplaceConfig {
        ReplaceConfig {
            enabled: true,
            search: search.into(),
            replacement: replacement.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_disabled_is_identity() {
        let config = ReplaceConfig {
            search: "a".into(),
            replacement: "b".into(),
            ..Default::default()
        };
        assert_eq!(apply(&config, "aaa"), "aaa");
    }

    #[test]
    fn test_literal_first_occurrence_only() {
        let config = literal("cat", "dog");
        assert_eq!(apply(&config, "cat cat"), "dog cat");
    }

    #[test]
    fn test_literal_replace_all() {
        let config = ReplaceConfig {
            replace_all: true,
            ..literal("cat", "dog")
        };
        assert_eq!(apply(&config, "cat cat"), "dog dog");
    }

    #[test]
    fn test_literal_case_insensitive() {
        let config = ReplaceConfig {
            case_insensitive: true,
            replace_all: true,
            ..literal("CAT", "dog")
        };
        assert_eq!(apply(&config, "Cat cAt"), "dog dog");
    }

    #[test]
    fn test_literal_case_insensitive_beyond_ascii() {
        let config = ReplaceConfig {
            case_insensitive: true,
            replace_all: true,
            ..literal("CAFÉ", "tea")
        };
        assert_eq!(apply(&config, "Café café"), "tea tea");
    }

    #[test]
    fn test_literal_insensitive_keeps_replacement_literal() {
        let config = ReplaceConfig {
            case_insensitive: true,
            ..literal("v1", "$x(2)")
        };
        assert_eq!(apply(&config, "draft V1"), "draft $x(2)");
    }

    #[test]
    fn test_regex_replace_first() {
        let config = ReplaceConfig {
            use_regex: true,
            ..literal(r"\d+", "#")
        };
        assert_eq!(apply(&config, "a1b22c"), "a#b22c");
    }

    #[test]
    fn test_regex_replace_all_with_captures() {
        let config = ReplaceConfig {
            use_regex: true,
            replace_all: true,
            ..literal(r"(\d)", "[$1]")
        };
        assert_eq!(apply(&config, "a1b2"), "a[1]b[2]");
    }

    #[test]
    fn test_malformed_regex_passes_through() {
        let config = ReplaceConfig {
            use_regex: true,
            ..literal("(open", "x")
        };
        assert!(config.warning().is_some());
        assert_eq!(apply(&config, "any(open"), "any(open");
    }

    #[test]
    fn test_valid_regex_has_no_warning() {
        let config = ReplaceConfig {
            use_regex: true,
            ..literal(r"\d+", "x")
        };
        assert!(config.warning().is_none());
    }

    #[test]
    fn test_empty_search_is_noop() {
        let config = literal("", "pad");
        assert_eq!(apply(&config, "abc"), "abc");
    }
}
