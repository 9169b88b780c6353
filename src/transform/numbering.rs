//! Stage 6: sequence numbering
//!
//! Inserts `start + step * seq`, zero-padded, as a prefix or suffix. The
//! sequence index comes from the item's position in the sorted preview list,
//! so numbering follows the chosen sort order.

use serde::{Deserialize, Serialize};

use super::Position;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub start: i64,
    #[serde(default)]
    pub step: i64,
    /// Zero-padding width; 0 means no padding
    #[serde(default)]
    pub width: usize,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub separator: String,
}

impl NumberConfig {
    /// The sequence value for a given zero-based index
    #[must_use]
    pub const fn value_for(&self, seq: u64) -> i64 {
        self.start.wrapping_add(self.step.wrapping_mul(seq as i64))
    }
}

pub fn apply(config: &NumberConfig, stem: &str, seq: u64) -> String {
    if !config.enabled {
        return stem.to_string();
    }

    let number = format!("{:0width$}", config.value_for(seq), width = config.width);
    match config.position {
        Position::Prefix => format!("{number}{}{stem}", config.separator),
        Position::Suffix => format!("{stem}{}{number}", config.separator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NumberConfig {
        NumberConfig {
            enabled: true,
            start: 1,
            step: 1,
            width: 3,
            position: Position::Suffix,
            separator: "_".into(),
        }
    }

    #[test]
    fn test_disabled_is_identity() {
        let config = NumberConfig::default();
        assert_eq!(apply(&config, "doc", 5), "doc");
    }

    #[test]
    fn test_suffix_sequence() {
        let config = config();
        assert_eq!(apply(&config, "a", 0), "a_001");
        assert_eq!(apply(&config, "b", 1), "b_002");
        assert_eq!(apply(&config, "c", 2), "c_003");
    }

    #[test]
    fn test_prefix_with_step() {
        let config = NumberConfig {
            start: 10,
            step: 5,
            width: 2,
            position: Position::Prefix,
            separator: "-".into(),
            ..config()
        };
        assert_eq!(apply(&config, "x", 0), "10-x");
        assert_eq!(apply(&config, "x", 3), "25-x");
    }

    #[test]
    fn test_values_strictly_increasing_for_positive_step() {
        let config = config();
        let mut previous = i64::MIN;
        for seq in 0..20 {
            let value = config.value_for(seq);
            assert!(value > previous);
            previous = value;
        }
    }

    #[test]
    fn test_no_padding_when_width_zero() {
        let config = NumberConfig {
            width: 0,
            ..config()
        };
        assert_eq!(apply(&config, "a", 0), "a_1");
    }
}
