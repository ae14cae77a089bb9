use anyhow::Result;

use sword_lib::flashcards::{Flashcard, MemoryLevel};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, deck: &str, format: OutputFormat) -> Result<()> {
    let repo = app.load_deck(deck)?;
    let cursor = repo.cursor();

    match format {
        OutputFormat::Json => {
            let bucket = |level| repo.cards(level).collect::<Vec<Flashcard<'_>>>();
            let output = serde_json::json!({
                "name": repo.name(),
                "cursor": cursor,
                "textbufSize": repo.textbuf_size(),
                "buckets": {
                    "hard": bucket(MemoryLevel::Hard),
                    "normal": bucket(MemoryLevel::Normal),
                    "good": bucket(MemoryLevel::Good),
                },
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "{} ({} cards, {} bytes of text)",
                repo.name(),
                repo.len(),
                repo.textbuf_size()
            );
            if !cursor.is_reset() {
                println!("  Next exam resumes at {} #{}", cursor.level, cursor.index + 1);
            }
            for level in MemoryLevel::ALL {
                println!("[{}] {}", level, repo.level_len(level));
                for card in repo.cards(level) {
                    println!("    {} = {}", card.label, card.transcript);
                }
            }
        }
    }

    Ok(())
}
