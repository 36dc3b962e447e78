//! The `trivia categories` command.

use std::path::PathBuf;

use anyhow::Result;
use trivia_core::{CategoryFold, MIX_LABEL};

use super::load_bank;

pub fn execute(bank: Option<PathBuf>) -> Result<()> {
    let bank = load_bank(bank.as_deref())?;
    let fold = CategoryFold::builtin();

    println!("{MIX_LABEL} ({})", bank.len());
    for (category, count) in fold.counts(bank.questions()) {
        println!("{category} ({count})");
    }
    Ok(())
}
