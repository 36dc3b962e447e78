//! CLI integration tests using assert_cmd.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn trivia() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("trivia").unwrap();
    for var in [
        "TRIVIA_BANK",
        "TRIVIA_ALIASES",
        "TRIVIA_CONFIG",
        "TRIVIA_PASS_THRESHOLD",
        "TRIVIA_ALLOW_REPEATS",
        "TRIVIA_MAX_QUESTIONS",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn capitals_deck(dir: &TempDir) -> PathBuf {
    let mut deck = String::from("Category: Capitals\n");
    for n in 1..=5 {
        deck.push_str(&format!("Q: Capital of France, take {n}?\nA: Paris\n\n"));
    }
    write_file(dir, "capitals.md", &deck)
}

#[test]
fn normalize_prints_comparison_key() {
    trivia()
        .args(["normalize", "The U.S.A."])
        .assert()
        .success()
        .stdout("usa\n");

    trivia()
        .args(["normalize", "Two Hundred Six"])
        .assert()
        .success()
        .stdout("206\n");
}

#[test]
fn check_reports_alias() {
    trivia()
        .args(["check", "usa", "United States"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct (alias)"));
}

#[test]
fn check_reports_incorrect() {
    trivia()
        .args(["check", "Lyon", "Paris"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Incorrect"));
}

#[test]
fn check_json_output() {
    trivia()
        .args(["check", "China and Nepal", "Nepal and China", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"is_correct\": true"))
        .stdout(predicate::str::contains("\"path\": \"multi_part\""));
}

#[test]
fn check_with_custom_aliases() {
    let dir = TempDir::new().unwrap();
    let aliases = write_file(&dir, "aliases.toml", "[aliases]\n\"Big Apple\" = [\"NYC\"]\n");

    trivia()
        .args(["check", "nyc", "Big Apple"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Incorrect"));

    trivia()
        .args(["check", "nyc", "Big Apple", "--aliases"])
        .arg(&aliases)
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct (alias)"));
}

#[test]
fn verbose_logs_resolved_sources() {
    trivia()
        .args(["check", "paris", "Paris"])
        .assert()
        .success()
        .stderr(predicate::str::contains("built-in").not());

    trivia()
        .args(["--verbose", "check", "paris", "Paris"])
        .assert()
        .success()
        .stderr(predicate::str::contains("using built-in alias table"))
        .stderr(predicate::str::contains("settings resolved"));
}

#[test]
fn check_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "trivia.toml", "pass_threshold = 3.0\n");

    trivia()
        .args(["check", "paris", "Paris", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("pass_threshold"));
}

#[test]
fn categories_for_builtin_bank() {
    trivia()
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("All Categories (Mix) (13)"))
        .stdout(predicate::str::contains("Geography (3)"))
        .stdout(predicate::str::contains("Movies & TV (2)"));
}

#[test]
fn categories_fold_deck_labels() {
    let dir = TempDir::new().unwrap();
    let deck = write_file(
        &dir,
        "deck.md",
        "Category: Music\nQ: Fab four?\nA: The Beatles\n\n\
         Category: TV Shows\nQ: Central Perk show?\nA: Friends\n",
    );

    trivia()
        .args(["categories", "--bank"])
        .arg(&deck)
        .assert()
        .success()
        .stdout(predicate::str::contains("Pop Culture (2)"));
}

#[test]
fn validate_valid_deck() {
    let dir = TempDir::new().unwrap();
    let deck = capitals_deck(&dir);

    trivia()
        .args(["validate", "--bank"])
        .arg(&deck)
        .assert()
        .success()
        .stdout(predicate::str::contains("(5 questions)"))
        .stdout(predicate::str::contains("Capitals: 5"))
        .stdout(predicate::str::contains("Deck is valid."));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let deck = write_file(
        &dir,
        "deck.md",
        "Q: Capital of France?\nA: Paris\n\nQ: capital of france\nA: Paris\n",
    );

    trivia()
        .args(["validate", "--bank"])
        .arg(&deck)
        .assert()
        .success()
        .stdout(predicate::str::contains("[Q2] WARNING: duplicate question"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_malformed_deck() {
    let dir = TempDir::new().unwrap();
    let deck = write_file(&dir, "deck.md", "A: orphan answer\n");

    trivia()
        .args(["validate", "--bank"])
        .arg(&deck)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing question at line 1"));
}

#[test]
fn validate_nonexistent_file() {
    trivia()
        .args(["validate", "--bank", "nonexistent.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn play_full_game() {
    let dir = TempDir::new().unwrap();
    let deck = capitals_deck(&dir);

    trivia()
        .args(["play", "--seed", "42", "--count", "5", "--bank"])
        .arg(&deck)
        .write_stdin("paris\nPARIS\n\nParis\npariss\nLyon\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 question(s) available in All Categories (Mix)."))
        .stdout(predicate::str::contains("Question 1 of 5 — All Categories (Mix)"))
        .stdout(predicate::str::contains("Please type an answer."))
        .stdout(predicate::str::contains("Game over! Your score: 4/5 (80.00%)"))
        .stdout(predicate::str::contains("Nice work!"))
        .stdout(predicate::str::contains("Your answer: Lyon"));
}

#[test]
fn play_category_and_quit() {
    let dir = TempDir::new().unwrap();
    let deck = capitals_deck(&dir);

    trivia()
        .args(["play", "--category", "Capitals", "--bank"])
        .arg(&deck)
        .write_stdin("paris\n:q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 2 of 5 — Capitals"))
        .stdout(predicate::str::contains("Quiz abandoned."))
        .stdout(predicate::str::contains("Game over!").not());
}

#[test]
fn play_rejects_bad_count() {
    trivia()
        .args(["play", "--count", "99"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot ask 99 question(s)"));
}

#[test]
fn play_rejects_empty_category() {
    trivia()
        .args(["play", "--category", "Astronomy"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no questions in category"));
}

#[test]
fn play_repeats_from_environment() {
    let dir = TempDir::new().unwrap();
    let deck = capitals_deck(&dir);

    trivia()
        .args(["play", "--seed", "7", "--count", "8", "--bank"])
        .arg(&deck)
        .env("TRIVIA_ALLOW_REPEATS", "true")
        .write_stdin("paris\n".repeat(8))
        .assert()
        .success()
        .stdout(predicate::str::contains("Game over! Your score: 8/8 (100.00%)"));
}
