//! Compiled filter configuration and the matching logic

use glob::{MatchOptions, Pattern};
use regex::Regex;

use super::predicate::Predicate;
use super::types::{Bounds, FilterSpec};
use crate::scan::CandidateItem;

/// Options giving wildcard masks their classic `*`/`?` semantics: anchored
/// to the whole name, case-insensitive, with no special path handling.
const MASK_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A compiled filter configuration
///
/// Built once per preview request from a [`FilterSpec`]; stateless afterward.
#[derive(Debug, Default)]
pub struct FilterConfig {
    name_len: Bounds,
    path_len: Bounds,
    masks: Vec<Pattern>,
    regex: Option<Regex>,
    predicate: Option<Predicate>,
}

/// A compiled config plus warnings for criteria that had to be disabled
#[derive(Debug, Default)]
pub struct FilterBuild {
    pub config: FilterConfig,
    pub warnings: Vec<String>,
}

impl FilterConfig {
    /// Compile a raw spec
    ///
    /// Compilation never fails as a whole: an invalid regex or predicate
    /// disables only that criterion and is reported as a warning, so the
    /// rest of the batch still runs. Masks cannot be invalid; every
    /// character other than `*` and `?` is literal.
    #[must_use]
    pub fn build(spec: &FilterSpec) -> FilterBuild {
        let mut build = FilterBuild::default();
        build.config.name_len = spec.name_len;
        build.config.path_len = spec.path_len;

        for mask in &spec.masks {
            match compile_mask(mask) {
                Ok(pattern) => build.config.masks.push(pattern),
                Err(e) => build
                    .warnings
                    .push(format!("Ignoring invalid mask '{mask}': {e}")),
            }
        }

        if let Some(raw) = &spec.regex {
            match Regex::new(raw) {
                Ok(regex) => build.config.regex = Some(regex),
                Err(e) => build
                    .warnings
                    .push(format!("Ignoring invalid regex '{raw}': {e}")),
            }
        }

        if let Some(raw) = &spec.predicate {
            match Predicate::parse(raw) {
                Ok(predicate) => build.config.predicate = Some(predicate),
                Err(e) => build
                    .warnings
                    .push(format!("Ignoring invalid predicate '{raw}': {e}")),
            }
        }

        build
    }

    /// Check one candidate against all enabled criteria
    ///
    /// Criteria combine with AND; the wildcard masks combine with OR among
    /// themselves.
    #[must_use]
    pub fn matches(&self, item: &CandidateItem) -> bool {
        if !self.name_len.contains(item.name.chars().count()) {
            return false;
        }
        if !self
            .path_len
            .contains(item.full_path.to_string_lossy().chars().count())
        {
            return false;
        }
        if !self.masks.is_empty()
            && !self
                .masks
                .iter()
                .any(|m| m.matches_with(&item.name, MASK_OPTIONS))
        {
            return false;
        }
        if let Some(regex) = &self.regex {
            if !regex.is_match(&item.name) {
                return false;
            }
        }
        if let Some(predicate) = &self.predicate {
            if !predicate.eval(item) {
                return false;
            }
        }
        true
    }

    /// Apply the filter to a candidate list, keeping matching items
    #[must_use]
    pub fn retain(&self, items: Vec<CandidateItem>) -> Vec<CandidateItem> {
        items.into_iter().filter(|i| self.matches(i)).collect()
    }
}

/// Compile one wildcard mask
///
/// Only `*` and `?` are special in a mask; brackets are escaped before the
/// glob compile so they match themselves instead of opening a character
/// class.
fn compile_mask(mask: &str) -> Result<Pattern, glob::PatternError> {
    let mut escaped = String::with_capacity(mask.len());
    for c in mask.chars() {
        match c {
            '*' | '?' => escaped.push(c),
            '[' | ']' => {
                escaped.push('[');
                escaped.push(c);
                escaped.push(']');
            }
            other => escaped.push(other),
        }
    }
    Pattern::new(&escaped)
}
