//! Stage 4: case conversion

use serde::{Deserialize, Serialize};

/// Characters treated as word separators by title case
const SEPARATORS: [char; 3] = ['.', '_', '-'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    #[default]
    Upper,
    Lower,
    /// Capitalize the first letter of each run of non-separator characters
    Title,
    /// Lower-case everything, then capitalize only the first character
    Sentence,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub mode: CaseMode,
}

pub fn apply(config: &CaseConfig, stem: &str) -> String {
    if !config.enabled {
        return stem.to_string();
    }

    match config.mode {
        CaseMode::Upper => stem.to_uppercase(),
        CaseMode::Lower => stem.to_lowercase(),
        CaseMode::Title => title_case(stem),
        CaseMode::Sentence => sentence_case(stem),
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || SEPARATORS.contains(&c)
}

fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if is_separator(c) {
            out.push(c);
            at_word_start = true;
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

fn sentence_case(value: &str) -> String {
    let lowered = value.to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => lowered,
    }
}
