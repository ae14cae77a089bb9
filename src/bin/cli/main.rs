mod app;
mod commands;
mod prompt;
#[cfg(feature = "tui")]
mod tui;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sword", about = "Flashcard decks with memorization buckets", version)]
struct Cli {
    /// Directory holding the deck files
    #[arg(long, global = true)]
    repos_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/sword/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List all decks
    #[command(alias = "repo")]
    List,

    /// Show a deck's cursor and cards per bucket
    Show {
        /// Deck name
        deck: String,
    },

    /// Create a deck or a card
    #[command(subcommand)]
    New(NewCommand),

    /// Delete a deck or a card
    #[command(subcommand)]
    Del(DelCommand),

    /// Run an exam session, resuming where the last one stopped
    Exam {
        /// Deck name
        deck: String,
        /// Use the full-screen presenter
        #[arg(short, long, conflicts_with = "plain")]
        interactive: bool,
        /// Use the line prompt even if the config asks for full-screen
        #[arg(long)]
        plain: bool,
    },
}

#[derive(Subcommand)]
enum NewCommand {
    /// Create an empty deck
    Repo {
        /// Deck name
        name: String,
    },

    /// Add a card to the Hard bucket of a deck
    Card {
        /// Deck name
        deck: String,
        /// Card label (the prompt side)
        label: String,
        /// Card transcript (the answer side)
        transcript: String,
    },
}

#[derive(Subcommand)]
enum DelCommand {
    /// Delete a deck
    Repo {
        /// Deck name
        name: String,
    },

    /// Delete a card by label
    Card {
        /// Deck name
        deck: String,
        /// Card label
        label: String,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // One line: operation context followed by each cause
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let app = app::App::new(cli.repos_dir.as_deref(), cli.config.as_deref())?;

    match cli.command {
        Command::List => commands::list::run(&app, cli.format)?,
        Command::Show { deck } => commands::show::run(&app, &deck, cli.format)?,
        Command::New(NewCommand::Repo { name }) => commands::repo::run_new(&app, &name, cli.format)?,
        Command::New(NewCommand::Card { deck, label, transcript }) => {
            commands::card::run_new(&app, &deck, &label, &transcript, cli.format)?
        }
        Command::Del(DelCommand::Repo { name }) => commands::repo::run_del(&app, &name, cli.format)?,
        Command::Del(DelCommand::Card { deck, label }) => {
            commands::card::run_del(&app, &deck, &label, cli.format)?
        }
        Command::Exam { deck, interactive, plain } => {
            let interactive = interactive || (app.config.interactive && !plain);
            commands::exam::run(&app, &deck, interactive, cli.format)?
        }
    }

    Ok(())
}
