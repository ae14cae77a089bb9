use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run_new(app: &App, deck: &str, label: &str, transcript: &str, format: OutputFormat) -> Result<()> {
    app.update_deck(deck, |repo| {
        repo.add_card(label, transcript)
            .with_context(|| format!("Failed to add card '{}'", label))
    })?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deck": deck,
                "label": label,
                "transcript": transcript,
                "level": "hard",
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => println!("Added \"{}\" to deck \"{}\"", label, deck),
    }
    Ok(())
}

pub fn run_del(app: &App, deck: &str, label: &str, format: OutputFormat) -> Result<()> {
    let level = app.update_deck(deck, |repo| {
        repo.delete_card(label)
            .with_context(|| format!("Failed to delete card '{}'", label))
    })?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deck": deck,
                "label": label,
                "level": level,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Deleted \"{}\" from the {} bucket of deck \"{}\"", label, level, deck)
        }
    }
    Ok(())
}
