//! Core trivia library shared by the quiz front ends.
//!
//! Provides:
//! - Answer normalization and tolerant answer matching
//! - Alias tables and category folding
//! - Question deck parser and the built-in question bank
//! - Quiz sessions with scoring
//! - Shared types (Question, MatchPath, QuizSettings, etc.)

pub mod aliases;
pub mod bank;
pub mod category;
pub mod config;
pub mod error;
pub mod matching;
pub mod normalize;
pub mod parser;
pub mod session;
pub mod similarity;
pub mod tokenize;
pub mod types;

pub use aliases::AliasTable;
pub use bank::{BankWarning, QuestionBank};
pub use category::{CategoryFold, MIX_LABEL};
pub use error::{ConfigError, ParseError, Result, SessionError};
pub use matching::{evaluate, is_correct, MatchDecision, MatchEngine};
pub use normalize::normalize;
pub use parser::parse;
pub use session::QuizSession;
pub use similarity::ratio;
pub use tokenize::{split_alternatives, tokenize_options};
pub use types::{
    MatchPath, MatchThresholds, Question, QuizSettings, RawQuestion, ScoreSummary, TurnRecord,
    DEFAULT_CATEGORY,
};
