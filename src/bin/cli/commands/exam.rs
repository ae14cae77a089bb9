use anyhow::Result;

use sword_lib::flashcards::{self, ExamReport, Repository};

use crate::app::App;
use crate::prompt::LinePrompt;
use crate::OutputFormat;

pub fn run(app: &App, deck: &str, interactive: bool, format: OutputFormat) -> Result<()> {
    let mut repo = app.load_deck(deck)?;
    log::info!(
        "Starting exam on '{}' with {} cards at {:?}",
        deck,
        repo.len(),
        repo.cursor()
    );

    let report = if interactive {
        run_full_screen(&mut repo)?
    } else {
        flashcards::run_exam(&mut repo, &mut LinePrompt::stdio())
    };

    // The cursor and bucket moves are kept even when the session was quit
    app.save_deck(&repo)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deck": deck,
                "report": report,
                "cursor": repo.cursor(),
                "counts": repo.counts(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!();
            if repo.is_empty() {
                println!("Deck \"{}\" has no cards", deck);
            } else if report.completed {
                println!("Finished deck \"{}\"", deck);
            } else {
                let cursor = repo.cursor();
                println!(
                    "Stopped deck \"{}\" at {} #{}, the next exam resumes there",
                    deck, cursor.level, cursor.index + 1
                );
            }
            println!(
                "Reviewed {} cards: {} kept, {} moved",
                report.visited, report.kept, report.moved
            );
            let [hard, normal, good] = repo.counts();
            println!("Buckets: hard {}, normal {}, good {}", hard, normal, good);
        }
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn run_full_screen(repo: &mut Repository) -> Result<ExamReport> {
    crate::tui::run_exam(repo)
}

#[cfg(not(feature = "tui"))]
fn run_full_screen(_repo: &mut Repository) -> Result<ExamReport> {
    anyhow::bail!("Full-screen exams need the 'tui' feature; rerun with --plain")
}
