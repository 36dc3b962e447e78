//! The `trivia play` command.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use trivia_core::{CategoryFold, MatchEngine, QuizSession, SessionError, MIX_LABEL};

use super::{load_aliases, load_bank, load_settings};
use crate::Sources;

pub struct PlayOptions {
    pub category: Option<String>,
    pub count: Option<usize>,
    pub repeats: bool,
    pub seed: Option<u64>,
    pub sources: Sources,
}

/// How an interactive quiz ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Quit,
}

pub fn execute(options: PlayOptions) -> Result<()> {
    let settings = load_settings(options.sources.config.as_deref())?;
    let bank = load_bank(options.sources.bank.as_deref())?;
    let engine = MatchEngine::new(
        load_aliases(options.sources.aliases.as_deref())?,
        settings.thresholds,
    );

    let fold = CategoryFold::builtin();
    let category = fold.fold(options.category.as_deref().unwrap_or(MIX_LABEL));
    let pool = fold.pool(bank.questions(), &category);
    let allow_repeats = options.repeats || settings.allow_repeats;
    let count = options
        .count
        .unwrap_or_else(|| QuizSession::default_count(pool.len(), allow_repeats, &settings));

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session =
        QuizSession::start(&category, &pool, count, allow_repeats, &settings, &mut rng)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{} question(s) available in {category}.", pool.len())?;
    writeln!(out, "Answers are case-insensitive and small typos are forgiven.")?;
    writeln!(out, "Numbers can be words or digits. Type :q to quit.")?;

    run_quiz(&mut session, &engine, io::stdin().lock(), &mut out)?;
    Ok(())
}

/// Drive a session from `input`, writing prompts and the final report to
/// `out`. End of input counts as quitting.
pub fn run_quiz<R: BufRead, W: Write>(
    session: &mut QuizSession,
    engine: &MatchEngine,
    mut input: R,
    out: &mut W,
) -> Result<Outcome> {
    while let Some(question) = session.current() {
        let (number, total) = session.position();
        writeln!(out)?;
        writeln!(out, "Question {number} of {total} — {}", session.category())?;
        writeln!(out, "{}", question.text)?;
        if let Some(image) = &question.image {
            writeln!(out, "[image: {image}]")?;
        }

        loop {
            write!(out, "Your answer: ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return quit(out);
            }
            let answer = line.trim_end_matches(['\r', '\n']);
            if matches!(answer.trim(), ":q" | ":quit") {
                return quit(out);
            }

            match session.submit(answer, engine) {
                Ok(_) => break,
                Err(SessionError::BlankAnswer) => writeln!(out, "Please type an answer.")?,
                Err(e) => return Err(e.into()),
            }
        }
    }

    write_report(session, out)?;
    Ok(Outcome::Completed)
}

fn quit<W: Write>(out: &mut W) -> Result<Outcome> {
    writeln!(out, "Quiz abandoned. Nothing was scored.")?;
    Ok(Outcome::Quit)
}

fn write_report<W: Write>(session: &QuizSession, out: &mut W) -> Result<()> {
    let summary = session.summary();
    writeln!(out)?;
    writeln!(
        out,
        "Game over! Your score: {}/{} ({:.2}%)",
        summary.right, summary.total, summary.percent
    )?;
    if summary.passed {
        writeln!(out, "Nice work!")?;
    } else {
        writeln!(
            out,
            "You needed at least {}/{} ({:.0}%).",
            summary.needed,
            summary.total,
            session.pass_threshold() * 100.0
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Review answers")?;
    writeln!(out, "Correct: {}  Incorrect: {}", summary.right, summary.wrong())?;
    for (n, turn) in session.history().iter().enumerate() {
        let mark = if turn.is_correct { "correct" } else { "wrong" };
        writeln!(out, "Q{} [{mark}] {}", n + 1, turn.question)?;
        writeln!(out, "  Your answer: {}", turn.user_answer)?;
        writeln!(out, "  Correct answer: {}", turn.correct_answer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use trivia_core::{Question, QuizSettings};

    fn session(questions: &[Question]) -> QuizSession {
        let pool: Vec<&Question> = questions.iter().collect();
        let mut rng = StdRng::seed_from_u64(3);
        QuizSession::start(
            "Test",
            &pool,
            questions.len(),
            false,
            &QuizSettings::default(),
            &mut rng,
        )
        .unwrap()
    }

    fn play(session: &mut QuizSession, input: &str) -> (Outcome, String) {
        let engine = MatchEngine::default();
        let mut out = Vec::new();
        let outcome = run_quiz(session, &engine, input.as_bytes(), &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    fn same_answer() -> Vec<Question> {
        (1..=5)
            .map(|n| Question::new(format!("Question {n}?"), "Paris", "Test"))
            .collect()
    }

    #[test]
    fn full_game_passes() {
        let questions = same_answer();
        let mut session = session(&questions);
        let (outcome, output) = play(&mut session, "paris\nPARIS\npariss\nParis\nLyon\n");
        assert_eq!(outcome, Outcome::Completed);
        assert!(output.contains("Question 1 of 5 — Test"));
        assert!(output.contains("Game over! Your score: 4/5 (80.00%)"));
        assert!(output.contains("Nice work!"));
        assert!(output.contains("Correct: 4  Incorrect: 1"));
        assert!(output.contains("Q5 [wrong] "));
        assert!(output.contains("  Your answer: Lyon"));
    }

    #[test]
    fn failing_game_reports_needed() {
        let questions = same_answer();
        let mut session = session(&questions);
        let (_, output) = play(&mut session, "paris\nrome\nrome\nrome\nrome\n");
        assert!(output.contains("Game over! Your score: 1/5 (20.00%)"));
        assert!(output.contains("You needed at least 4/5 (70%)."));
    }

    #[test]
    fn blank_input_reprompts() {
        let questions = same_answer();
        let mut session = session(&questions);
        let (outcome, output) = play(&mut session, "\n   \nparis\nparis\nparis\nparis\nparis\n");
        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(output.matches("Please type an answer.").count(), 2);
        assert_eq!(session.history().len(), 5);
    }

    #[test]
    fn quit_discards_the_game() {
        let questions = same_answer();
        let mut session = session(&questions);
        let (outcome, output) = play(&mut session, "paris\n:q\n");
        assert_eq!(outcome, Outcome::Quit);
        assert!(output.contains("Quiz abandoned."));
        assert!(!output.contains("Game over!"));
    }

    #[test]
    fn end_of_input_quits() {
        let questions = same_answer();
        let mut session = session(&questions);
        let (outcome, _) = play(&mut session, "paris\n");
        assert_eq!(outcome, Outcome::Quit);
    }

    #[test]
    fn image_reference_is_shown() {
        let mut questions = same_answer();
        for question in &mut questions {
            question.image = Some("img/paris.png".to_string());
        }
        let mut session = session(&questions);
        let (_, output) = play(&mut session, ":quit\n");
        assert!(output.contains("[image: img/paris.png]"));
    }
}
