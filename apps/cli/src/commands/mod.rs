pub mod categories;
pub mod check;
pub mod normalize;
pub mod play;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use trivia_core::{AliasTable, QuestionBank, QuizSettings};

/// Defaults, then the settings file, then `TRIVIA_*` variables.
pub(crate) fn load_settings(config: Option<&Path>) -> Result<QuizSettings> {
    let settings = match config {
        Some(path) => QuizSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => {
            tracing::debug!("no settings file, using defaults");
            QuizSettings::default()
        }
    };
    let settings = settings
        .apply_env(|key| std::env::var(key).ok())
        .context("reading settings from the environment")?;
    tracing::debug!(
        pass_threshold = settings.pass_threshold,
        allow_repeats = settings.allow_repeats,
        max_questions = settings.max_questions,
        "settings resolved"
    );
    Ok(settings)
}

pub(crate) fn load_bank(path: Option<&Path>) -> Result<QuestionBank> {
    match path {
        Some(path) => QuestionBank::load(path)
            .with_context(|| format!("loading questions from {}", path.display())),
        None => {
            tracing::debug!("using built-in question bank");
            Ok(QuestionBank::builtin())
        }
    }
}

pub(crate) fn load_aliases(path: Option<&Path>) -> Result<AliasTable> {
    match path {
        Some(path) => AliasTable::load(path)
            .with_context(|| format!("loading aliases from {}", path.display())),
        None => {
            tracing::debug!("using built-in alias table");
            Ok(AliasTable::builtin())
        }
    }
}
