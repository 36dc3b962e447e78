//! Answer matching for free-text quiz answers.
//!
//! [`MatchEngine::evaluate`] applies a layered policy and stops at the first
//! pass that accepts the answer:
//!
//! 1. blank answers are rejected outright
//! 2. exact match of the normalized strings, or a registered alias
//! 3. same sequence of numbers on both sides
//! 4. every part of a multi-part answer supplied, in any order
//! 5. equal, alias-equal or close to one of the listed alternatives
//!
//! Similarity never bridges two different numbers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::aliases::AliasTable;
use crate::normalize::normalize;
use crate::similarity::ratio;
use crate::tokenize::{split_alternatives, tokenize_options};
use crate::types::{MatchPath, MatchThresholds};

static DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"));

static DEFAULT_ENGINE: Lazy<MatchEngine> = Lazy::new(MatchEngine::default);

/// Result of comparing a typed answer to the correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDecision {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// The pass that accepted the answer; `None` when it was rejected.
    pub path: Option<MatchPath>,
    pub user_normalized: String,
    pub correct_normalized: String,
}

/// Decides whether a free-text answer counts as correct.
///
/// Holds only read-only configuration, so one engine can be shared freely
/// between sessions and threads.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    aliases: AliasTable,
    thresholds: MatchThresholds,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(AliasTable::builtin(), MatchThresholds::default())
    }
}

impl MatchEngine {
    pub fn new(aliases: AliasTable, thresholds: MatchThresholds) -> Self {
        Self {
            aliases,
            thresholds,
        }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn thresholds(&self) -> &MatchThresholds {
        &self.thresholds
    }

    pub fn is_correct(&self, user: &str, correct: &str) -> bool {
        self.evaluate(user, correct).is_correct
    }

    /// Compare with possibly-missing inputs; `None` counts as empty.
    pub fn evaluate_opt(&self, user: Option<&str>, correct: Option<&str>) -> MatchDecision {
        self.evaluate(user.unwrap_or_default(), correct.unwrap_or_default())
    }

    pub fn evaluate(&self, user: &str, correct: &str) -> MatchDecision {
        let user_normalized = normalize(user);
        let correct_normalized = normalize(correct);
        let path = self.decide(&user_normalized, &correct_normalized, correct);

        tracing::debug!(
            user = %user_normalized,
            correct = %correct_normalized,
            path = path.map_or("none", |p| p.as_str()),
            "answer evaluated"
        );

        MatchDecision {
            is_correct: path.is_some(),
            path,
            user_normalized,
            correct_normalized,
        }
    }

    fn decide(&self, user: &str, correct: &str, correct_raw: &str) -> Option<MatchPath> {
        if user.is_empty() {
            return None;
        }
        if user == correct {
            return Some(MatchPath::Exact);
        }
        if self.aliases.equivalent(user, correct_raw) {
            return Some(MatchPath::Alias);
        }
        if numbers_agree(user, correct) {
            return Some(MatchPath::Numeric);
        }
        if self.parts_agree(user, correct) {
            return Some(MatchPath::MultiPart);
        }
        self.match_alternative(user, correct)
    }

    /// Multi-part pass. Only applies when the correct answer has two or more
    /// parts and the user gave the same number of parts.
    ///
    /// Pairing is first-fit in the user's order with no backtracking, so an
    /// answer can be rejected even though some other pairing would succeed.
    fn parts_agree(&self, user: &str, correct: &str) -> bool {
        let correct_parts = tokenize_options(correct);
        if correct_parts.len() < 2 {
            return false;
        }
        let user_parts = tokenize_options(user);
        if user_parts.len() != correct_parts.len() {
            return false;
        }

        let mut used = vec![false; correct_parts.len()];
        user_parts.iter().all(|part| {
            let claimed = correct_parts
                .iter()
                .enumerate()
                .find(|&(j, candidate)| !used[j] && self.part_matches(part, candidate));
            match claimed {
                Some((j, _)) => {
                    used[j] = true;
                    true
                }
                None => false,
            }
        })
    }

    fn part_matches(&self, user_part: &str, correct_part: &str) -> bool {
        user_part == correct_part
            || self.aliases.equivalent(user_part, correct_part)
            || close_enough(user_part, correct_part, self.thresholds.part_similarity)
    }

    /// Single-part pass over the alternatives of the correct answer.
    fn match_alternative(&self, user: &str, correct: &str) -> Option<MatchPath> {
        for alternative in split_alternatives(correct) {
            if user == alternative || self.aliases.equivalent(user, &alternative) {
                return Some(MatchPath::Alternative);
            }
            // Short alternatives demand an exact match.
            let Some(threshold) = self.thresholds.for_alternative(alternative.chars().count())
            else {
                continue;
            };
            if close_enough(user, &alternative, threshold) {
                return Some(MatchPath::Fuzzy);
            }
        }
        None
    }
}

/// Typo tolerance. Two strings whose numbers disagree are never close: "catch
/// 21" is not a misspelling of "catch 22".
fn close_enough(a: &str, b: &str, threshold: f64) -> bool {
    let a_numbers = digit_runs(a);
    let b_numbers = digit_runs(b);
    if !a_numbers.is_empty() && !b_numbers.is_empty() && a_numbers != b_numbers {
        return false;
    }
    ratio(a, b) >= threshold
}

/// Both sides contain digits and the digit runs agree in value and order,
/// ignoring any surrounding words or units.
fn numbers_agree(user: &str, correct: &str) -> bool {
    let user_numbers = digit_runs(user);
    let correct_numbers = digit_runs(correct);
    !user_numbers.is_empty() && !correct_numbers.is_empty() && user_numbers == correct_numbers
}

fn digit_runs(s: &str) -> Vec<&str> {
    DIGIT_RUN
        .find_iter(s)
        .map(|m| {
            let digits = m.as_str().trim_start_matches('0');
            if digits.is_empty() {
                "0"
            } else {
                digits
            }
        })
        .collect()
}

/// Check an answer with the built-in alias table and default thresholds.
pub fn is_correct(user: &str, correct: &str) -> bool {
    DEFAULT_ENGINE.is_correct(user, correct)
}

/// Full decision with the built-in alias table and default thresholds.
pub fn evaluate(user: &str, correct: &str) -> MatchDecision {
    DEFAULT_ENGINE.evaluate(user, correct)
}
