//! The `trivia validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use trivia_core::{CategoryFold, QuestionBank};

pub fn execute(path: PathBuf) -> Result<()> {
    let bank = QuestionBank::load(&path)
        .with_context(|| format!("loading questions from {}", path.display()))?;

    println!("Deck: {} ({} questions)", path.display(), bank.len());
    for (category, count) in CategoryFold::builtin().counts(bank.questions()) {
        println!("  {category}: {count}");
    }

    let warnings = bank.validate();
    for w in &warnings {
        println!("  [Q{}] WARNING: {}", w.index + 1, w.message);
    }

    if warnings.is_empty() {
        println!("Deck is valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
