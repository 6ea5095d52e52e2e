//! rolequiz CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "rolequiz", version, about = "Weighted yes/no role quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz and print the chosen role
    Run {
        /// Path to a .toml quiz file (default: built-in reference quiz)
        #[arg(long)]
        quiz: Option<PathBuf>,

        /// Answers in question order (e.g. "y,n,yes,no,1,0")
        #[arg(long, conflicts_with = "events")]
        answers: Option<String>,

        /// JSON lines file of answer events ({"question_id": 1, "answer": true})
        #[arg(long)]
        events: Option<PathBuf>,

        /// Directory to save the session report in
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate quiz TOML files
    Validate {
        /// Path to quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Print a quiz's weight table
    Weights {
        /// Path to a .toml quiz file (default: built-in reference quiz)
        #[arg(long)]
        quiz: Option<PathBuf>,
    },

    /// Write the reference quiz as a starter file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rolequiz=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            quiz,
            answers,
            events,
            output,
        } => commands::run::execute(quiz, answers, events, output),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Weights { quiz } => commands::weights::execute(quiz),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
