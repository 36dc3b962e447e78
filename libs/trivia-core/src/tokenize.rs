//! Splitting normalized answers into parts and alternatives.

use once_cell::sync::Lazy;
use regex::Regex;

static PART_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*(?:\band\b|,|/|;)\s*").expect("part separator pattern is valid")
});
static ALTERNATIVE_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bor\b|,|/|;").expect("alternative separator pattern is valid")
});

/// Split an answer into the parts of a multi-part answer.
///
/// Separators are the word `and`, commas, slashes and semicolons. Empty
/// fragments are dropped; the source order is kept.
pub fn tokenize_options(normalized: &str) -> Vec<String> {
    PART_SEPARATOR
        .split(normalized.trim())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split an answer into accepted alternatives on `or`, commas, slashes and
/// semicolons. An answer with no usable fragment is its own single
/// alternative.
pub fn split_alternatives(normalized: &str) -> Vec<String> {
    let alternatives: Vec<String> = ALTERNATIVE_SEPARATOR
        .split(normalized)
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .map(str::to_string)
        .collect();
    if alternatives.is_empty() {
        vec![normalized.to_string()]
    } else {
        alternatives
    }
}
