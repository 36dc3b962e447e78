//! The `trivia normalize` command.

use anyhow::Result;

pub fn execute(text: &str) -> Result<()> {
    println!("{}", trivia_core::normalize(text));
    Ok(())
}
