//! Raw filter criteria as collected from the CLI or a preset
//!
//! `FilterSpec` is the serializable form; it is compiled into a
//! [`crate::filter::FilterConfig`] once per preview request.

use serde::{Deserialize, Serialize};

/// Optional inclusive numeric bounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
}

impl Bounds {
    #[must_use]
    pub const fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Self { min, max }
    }

    /// True when no bound is configured
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Check `value` against the configured bounds
    #[must_use]
    pub fn contains(&self, value: usize) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Uncompiled filter criteria
///
/// Mirrors the preset snapshot schema one-to-one and can round-trip through
/// TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Bounds on the entry name length (characters)
    #[serde(default)]
    pub name_len: Bounds,

    /// Bounds on the full path length (characters)
    #[serde(default)]
    pub path_len: Bounds,

    /// Wildcard masks (`*`/`?`), matched case-insensitively against the full
    /// name; an item passes if it matches any mask
    #[serde(default)]
    pub masks: Vec<String>,

    /// Regular expression matched against the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,

    /// Structured predicate, e.g. `size > 1024` or `name contains draft`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
}

impl FilterSpec {
    /// True when no criterion is configured at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name_len.is_unbounded()
            && self.path_len.is_unbounded()
            && self.masks.is_empty()
            && self.regex.is_none()
            && self.predicate.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::new(Some(3), Some(10));
        assert!(!bounds.contains(2));
        assert!(bounds.contains(3));
        assert!(bounds.contains(10));
        assert!(!bounds.contains(11));
    }

    #[test]
    fn test_unbounded_accepts_everything() {
        let bounds = Bounds::default();
        assert!(bounds.contains(0));
        assert!(bounds.contains(usize::MAX));
    }

    #[test]
    fn test_empty_spec() {
        assert!(FilterSpec::default().is_empty());
        let spec = FilterSpec {
            masks: vec!["*.txt".into()],
            ..Default::default()
        };
        assert!(!spec.is_empty());
    }
}
