//! Structured field predicates
//!
//! A small, safe predicate language of the form `field op value`, replacing
//! free-form expression evaluation for custom filtering. Supported fields are
//! `name`, `path`, `ext`, `size`, and `modified`; the operator set depends on
//! the field (text fields get string operators, numeric/date fields get
//! comparisons).
//!
//! # Examples
//! ```
//! use renamr::filter::Predicate;
//!
//! let p = Predicate::parse("name contains draft").unwrap();
//! let p = Predicate::parse("size > 1024").unwrap();
//! let p = Predicate::parse("modified < 2024-06-01").unwrap();
//! ```

use std::time::SystemTime;

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::scan::CandidateItem;

#[derive(Debug, Error)]
pub enum PredicateError {
    #[error("Invalid predicate format: {0} (expected 'field op value')")]
    InvalidFormat(String),
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Unknown operator: {0}")]
    UnknownOp(String),
    #[error("Operator '{op}' is not valid for field '{field}'")]
    OpMismatch { field: String, op: String },
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Field of a candidate item a predicate inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Path,
    Ext,
    Size,
    Modified,
}

impl TryFrom<&str> for Field {
    type Error = PredicateError;

    fn try_from(input: &str) -> Result<Self, Self::Error> {
        match input {
            "name" => Ok(Self::Name),
            "path" => Ok(Self::Path),
            "ext" => Ok(Self::Ext),
            "size" => Ok(Self::Size),
            "modified" => Ok(Self::Modified),
            other => Err(PredicateError::UnknownField(other.to_string())),
        }
    }
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Contains,
    StartsWith,
    EndsWith,
    Gt,
    Lt,
    Ge,
    Le,
}

impl Op {
    const fn is_ordering(self) -> bool {
        matches!(self, Self::Gt | Self::Lt | Self::Ge | Self::Le)
    }
}

impl TryFrom<&str> for Op {
    type Error = PredicateError;

    fn try_from(input: &str) -> Result<Self, Self::Error> {
        match input {
            "=" | "==" | "eq" => Ok(Self::Eq),
            "!=" | "ne" => Ok(Self::Ne),
            "contains" => Ok(Self::Contains),
            "starts" | "starts-with" => Ok(Self::StartsWith),
            "ends" | "ends-with" => Ok(Self::EndsWith),
            ">" | "gt" => Ok(Self::Gt),
            "<" | "lt" => Ok(Self::Lt),
            ">=" | "ge" => Ok(Self::Ge),
            "<=" | "le" => Ok(Self::Le),
            other => Err(PredicateError::UnknownOp(other.to_string())),
        }
    }
}

/// Typed comparison value, parsed up front so evaluation cannot fail on input
#[derive(Debug, Clone, PartialEq)]
enum Value {
    Text(String),
    Number(u64),
    Date(DateTime<Utc>),
}

/// A compiled `field op value` predicate
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    field: Field,
    op: Op,
    value: Value,
}

impl Predicate {
    /// Parse a predicate string like `size > 1024` or `ext = .txt`
    ///
    /// # Errors
    /// Returns `PredicateError` for malformed input, unknown fields or
    /// operators, an operator that does not fit the field, or an unparsable
    /// number/date literal.
    pub fn parse(input: &str) -> Result<Self, PredicateError> {
        let mut tokens = input.split_whitespace();
        let (Some(field), Some(op)) = (tokens.next(), tokens.next()) else {
            return Err(PredicateError::InvalidFormat(input.to_string()));
        };
        let value = tokens.collect::<Vec<_>>().join(" ");
        if value.is_empty() {
            return Err(PredicateError::InvalidFormat(input.to_string()));
        }
        let value = value.as_str();

        let field = Field::try_from(field)?;
        let op = Op::try_from(op)?;

        let mismatch = || PredicateError::OpMismatch {
            field: format!("{field:?}").to_lowercase(),
            op: format!("{op:?}").to_lowercase(),
        };

        let value = match field {
            Field::Name | Field::Path | Field::Ext => {
                if op.is_ordering() {
                    return Err(mismatch());
                }
                Value::Text(value.to_lowercase())
            }
            Field::Size => {
                if matches!(op, Op::Contains | Op::StartsWith | Op::EndsWith) {
                    return Err(mismatch());
                }
                Value::Number(
                    value
                        .parse()
                        .map_err(|_| PredicateError::InvalidNumber(value.to_string()))?,
                )
            }
            Field::Modified => {
                if matches!(op, Op::Contains | Op::StartsWith | Op::EndsWith) {
                    return Err(mismatch());
                }
                let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .map_err(|_| PredicateError::InvalidDate(value.to_string()))?;
                let midnight = date
                    .and_hms_opt(0, 0, 0)
                    .ok_or_else(|| PredicateError::InvalidDate(value.to_string()))?;
                Value::Date(midnight.and_utc())
            }
        };

        Ok(Self { field, op, value })
    }

    /// Evaluate the predicate against one item
    ///
    /// An item that cannot be evaluated (missing stats for `size`/`modified`)
    /// fails the predicate rather than erroring out.
    #[must_use]
    pub fn eval(&self, item: &CandidateItem) -> bool {
        match (&self.value, self.field) {
            (Value::Text(expected), field) => {
                let actual = match field {
                    Field::Name => item.name.to_lowercase(),
                    Field::Path => item.full_path.to_string_lossy().to_lowercase(),
                    Field::Ext => item.extension.clone(),
                    _ => return false,
                };
                match self.op {
                    Op::Eq => actual == *expected,
                    Op::Ne => actual != *expected,
                    Op::Contains => actual.contains(expected.as_str()),
                    Op::StartsWith => actual.starts_with(expected.as_str()),
                    Op::EndsWith => actual.ends_with(expected.as_str()),
                    _ => false,
                }
            }
            (Value::Number(expected), _) => {
                let Some(stats) = &item.stats else { return false };
                compare(self.op, stats.size, *expected)
            }
            (Value::Date(expected), _) => {
                let Some(modified) = item.stats.as_ref().and_then(|s| s.modified) else {
                    return false;
                };
                let actual: DateTime<Utc> = system_time_to_utc(modified);
                compare(self.op, actual, *expected)
            }
        }
    }
}

fn compare<T: PartialOrd>(op: Op, actual: T, expected: T) -> bool {
    match op {
        Op::Eq => actual == expected,
        Op::Ne => actual != expected,
        Op::Gt => actual > expected,
        Op::Lt => actual < expected,
        Op::Ge => actual >= expected,
        Op::Le => actual <= expected,
        _ => false,
    }
}

fn system_time_to_utc(time: SystemTime) -> DateTime<Utc> {
    time.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ItemStats;
    use std::path::PathBuf;
    use std::time::{Duration, UNIX_EPOCH};

    fn item(name: &str, size: u64) -> CandidateItem {
        let extension = name
            .rsplit_once('.')
            .map(|(_, e)| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();
        CandidateItem {
            full_path: PathBuf::from(format!("/data/{name}")),
            parent_dir: PathBuf::from("/data"),
            name: name.to_string(),
            extension,
            is_dir: false,
            is_file: true,
            stats: Some(ItemStats {
                size,
                // 2024-01-15 00:00:00 UTC
                modified: Some(UNIX_EPOCH + Duration::from_secs(1_705_276_800)),
                accessed: None,
                created: None,
            }),
        }
    }

    #[test]
    fn test_name_contains_case_insensitive() {
        let p = Predicate::parse("name contains DRAFT").unwrap();
        assert!(p.eval(&item("my_draft_v2.txt", 10)));
        assert!(!p.eval(&item("final.txt", 10)));
    }

    #[test]
    fn test_ext_equality() {
        let p = Predicate::parse("ext = .TXT").unwrap();
        assert!(p.eval(&item("a.txt", 1)));
        assert!(!p.eval(&item("a.doc", 1)));
    }

    #[test]
    fn test_size_comparisons() {
        assert!(Predicate::parse("size > 100").unwrap().eval(&item("a", 101)));
        assert!(!Predicate::parse("size > 100").unwrap().eval(&item("a", 100)));
        assert!(Predicate::parse("size <= 100").unwrap().eval(&item("a", 100)));
    }

    #[test]
    fn test_modified_before_date() {
        let p = Predicate::parse("modified < 2024-06-01").unwrap();
        assert!(p.eval(&item("a.txt", 1)));
        let p = Predicate::parse("modified > 2024-06-01").unwrap();
        assert!(!p.eval(&item("a.txt", 1)));
    }

    #[test]
    fn test_missing_stats_fails_not_errors() {
        let mut no_stats = item("a.txt", 1);
        no_stats.stats = None;
        let p = Predicate::parse("size > 0").unwrap();
        assert!(!p.eval(&no_stats));
    }

    #[test]
    fn test_parse_rejects_bad_format() {
        assert!(matches!(
            Predicate::parse("size"),
            Err(PredicateError::InvalidFormat(_))
        ));
        assert!(matches!(
            Predicate::parse("height > 3"),
            Err(PredicateError::UnknownField(_))
        ));
        assert!(matches!(
            Predicate::parse("size ~ 3"),
            Err(PredicateError::UnknownOp(_))
        ));
        assert!(matches!(
            Predicate::parse("name > abc"),
            Err(PredicateError::OpMismatch { .. })
        ));
        assert!(matches!(
            Predicate::parse("size > many"),
            Err(PredicateError::InvalidNumber(_))
        ));
        assert!(matches!(
            Predicate::parse("modified < someday"),
            Err(PredicateError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_value_with_spaces() {
        let p = Predicate::parse("name contains two words").unwrap();
        assert!(p.eval(&item("has two words here.txt", 1)));
    }
}
