//! The `trivia check` command.

use std::path::PathBuf;

use anyhow::Result;
use trivia_core::MatchEngine;

use super::{load_aliases, load_settings};

pub fn execute(
    user: &str,
    correct: &str,
    aliases: Option<PathBuf>,
    config: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let settings = load_settings(config.as_deref())?;
    let engine = MatchEngine::new(load_aliases(aliases.as_deref())?, settings.thresholds);
    let decision = engine.evaluate(user, correct);

    if json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
        return Ok(());
    }

    println!("Your answer:    {user:?} -> {:?}", decision.user_normalized);
    println!("Correct answer: {correct:?} -> {:?}", decision.correct_normalized);
    match decision.path {
        Some(path) => println!("Correct ({path})"),
        None => println!("Incorrect"),
    }
    Ok(())
}
