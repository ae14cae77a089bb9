use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: OutputFormat) -> Result<()> {
    let decks = app.store.list().context("Failed to list decks")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&decks)?);
        }
        OutputFormat::Plain => {
            if decks.is_empty() {
                println!("(no decks in {})", app.store.repos_dir().display());
            }
            for deck in &decks {
                println!("{}", deck);
            }
        }
    }

    Ok(())
}
