//! Error types for trivia-core.
//!
//! Answer matching itself never fails; these cover loading decks and
//! configuration, and driving a quiz session.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing a question deck.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing question at line {line}")]
    MissingQuestion { line: usize },

    #[error("missing answer at line {line}")]
    MissingAnswer { line: usize },

    #[error("empty answer at line {line}")]
    EmptyAnswer { line: usize },

    #[error("empty question at line {line}")]
    EmptyQuestion { line: usize },

    #[error("text after image at line {line}")]
    TextAfterImage { line: usize },
}

/// Errors raised while loading settings, alias tables or decks from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid deck: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid setting: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors returned when starting or advancing a quiz session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no questions in category {category:?}")]
    EmptyPool { category: String },

    #[error("cannot ask {requested} question(s): choose between {min} and {max}")]
    InvalidQuestionCount {
        requested: usize,
        min: usize,
        max: usize,
    },

    #[error("please type an answer")]
    BlankAnswer,

    #[error("the quiz is already finished")]
    Finished,
}
