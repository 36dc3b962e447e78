//! Core types for the trivia quiz.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category given to questions whose deck never names one.
pub const DEFAULT_CATEGORY: &str = "General";

/// A question from the bank. Matching only ever reads `answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub answer: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        answer: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            answer: answer.into(),
            category: category.into(),
            image: None,
        }
    }
}

/// Question parsed from a deck, with the line it started on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawQuestion {
    pub question: Question,
    pub line_number: usize,
}

/// Which pass of the match engine accepted an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPath {
    /// Normalized strings are identical.
    Exact,
    /// The answer is a registered alias of the canonical answer.
    Alias,
    /// Both sides carry the same sequence of numbers.
    Numeric,
    /// Every required part was supplied, in any order.
    MultiPart,
    /// Equal (or alias-equal) to one of the listed alternatives.
    Alternative,
    /// Close enough to an alternative to count as a typo.
    Fuzzy,
}

impl MatchPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Alias => "alias",
            Self::Numeric => "numeric",
            Self::MultiPart => "multi_part",
            Self::Alternative => "alternative",
            Self::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for MatchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Similarity cut-offs used by the match engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchThresholds {
    /// Minimum similarity for two parts of a multi-part answer to pair up.
    pub part_similarity: f64,
    /// Minimum similarity for alternatives up to `short_max_len` characters.
    pub short_similarity: f64,
    /// Minimum similarity for longer alternatives.
    pub long_similarity: f64,
    /// Alternatives this short or shorter must match exactly.
    pub exact_only_max_len: usize,
    pub short_max_len: usize,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            part_similarity: 0.88,
            short_similarity: 0.88,
            long_similarity: 0.80,
            exact_only_max_len: 3,
            short_max_len: 6,
        }
    }
}

impl MatchThresholds {
    /// Similarity an alternative of `len` characters needs, or `None` when
    /// only an exact match is acceptable.
    pub fn for_alternative(&self, len: usize) -> Option<f64> {
        if len <= self.exact_only_max_len {
            None
        } else if len <= self.short_max_len {
            Some(self.short_similarity)
        } else {
            Some(self.long_similarity)
        }
    }
}

/// Quiz-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    /// Fraction of questions that must be answered correctly to pass.
    pub pass_threshold: f64,
    pub min_questions: usize,
    pub max_questions: usize,
    pub default_questions: usize,
    /// Sample questions with replacement.
    pub allow_repeats: bool,
    pub thresholds: MatchThresholds,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            pass_threshold: 0.70,
            min_questions: 5,
            max_questions: 50,
            default_questions: 10,
            allow_repeats: false,
            thresholds: MatchThresholds::default(),
        }
    }
}

/// One answered question in a session's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    pub question: String,
    pub category: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<MatchPath>,
    pub answered_at: DateTime<Utc>,
}

/// Final score of a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub right: usize,
    pub total: usize,
    /// Correct answers required to pass.
    pub needed: usize,
    pub percent: f64,
    pub passed: bool,
}

impl ScoreSummary {
    pub fn compute(right: usize, total: usize, pass_threshold: f64) -> Self {
        let needed = (total as f64 * pass_threshold).ceil() as usize;
        let percent = if total == 0 {
            0.0
        } else {
            right as f64 / total as f64 * 100.0
        };
        Self {
            right,
            total,
            needed,
            percent,
            passed: right >= needed,
        }
    }

    pub fn wrong(&self) -> usize {
        self.total - self.right
    }
}
