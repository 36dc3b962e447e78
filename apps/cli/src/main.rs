//! trivia CLI: play the quiz and inspect how answers are matched.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "trivia", version, about = "Trivia quiz with forgiving answer matching")]
struct Cli {
    /// Log debug events to stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where questions, aliases and settings come from.
#[derive(Args, Debug, Default)]
pub struct Sources {
    /// Question deck file (defaults to the built-in questions)
    #[arg(long, env = "TRIVIA_BANK")]
    pub bank: Option<PathBuf>,

    /// Alias table TOML (defaults to the built-in aliases)
    #[arg(long, env = "TRIVIA_ALIASES")]
    pub aliases: Option<PathBuf>,

    /// Settings TOML
    #[arg(long, env = "TRIVIA_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz on the terminal
    Play {
        /// Category to play (defaults to every category)
        #[arg(long)]
        category: Option<String>,

        /// Number of questions
        #[arg(long)]
        count: Option<usize>,

        /// Allow the same question more than once
        #[arg(long)]
        repeats: bool,

        /// Seed for a reproducible question order
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        sources: Sources,
    },

    /// Check a single answer against the correct one
    Check {
        /// The typed answer
        user: String,

        /// The correct answer
        correct: String,

        /// Alias table TOML (defaults to the built-in aliases)
        #[arg(long, env = "TRIVIA_ALIASES")]
        aliases: Option<PathBuf>,

        /// Settings TOML supplying match thresholds
        #[arg(long, env = "TRIVIA_CONFIG")]
        config: Option<PathBuf>,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the normalized form of an answer
    Normalize {
        text: String,
    },

    /// List categories and their question counts
    Categories {
        /// Question deck file (defaults to the built-in questions)
        #[arg(long, env = "TRIVIA_BANK")]
        bank: Option<PathBuf>,
    },

    /// Validate a question deck
    Validate {
        /// Question deck file
        #[arg(long)]
        bank: PathBuf,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Play {
            category,
            count,
            repeats,
            seed,
            sources,
        } => commands::play::execute(commands::play::PlayOptions {
            category,
            count,
            repeats,
            seed,
            sources,
        }),
        Commands::Check {
            user,
            correct,
            aliases,
            config,
            json,
        } => commands::check::execute(&user, &correct, aliases, config, json),
        Commands::Normalize { text } => commands::normalize::execute(&text),
        Commands::Categories { bank } => commands::categories::execute(bank),
        Commands::Validate { bank } => commands::validate::execute(bank),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
