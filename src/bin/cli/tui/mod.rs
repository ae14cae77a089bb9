mod app_state;
mod card_widget;
mod key_handler;
mod menu_widget;
mod status_bar;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::{cursor, execute};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;

use sword_lib::flashcards::{self, ExamContext, ExamReport, Flashcard, Judge, Judgment, Repository};

use app_state::ExamState;

/// Run an exam session in the full-screen presenter.
///
/// Once the session has run, the report is always returned. A terminal that
/// fails to restore is logged so the caller still saves the deck.
pub fn run_exam(repo: &mut Repository) -> Result<ExamReport> {
    let _screen = enter_screen()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut judge = TuiJudge {
        terminal: &mut terminal,
        deck: repo.name().to_string(),
    };
    Ok(flashcards::run_exam(repo, &mut judge))
}

/// Raw mode plus the alternate screen, undone when the guard drops
fn enter_screen() -> io::Result<RestoreGuard<fn() -> io::Result<()>>> {
    enable_raw_mode()?;
    let guard = RestoreGuard::new(restore_screen as fn() -> io::Result<()>);
    execute!(io::stdout(), EnterAlternateScreen)?;
    Ok(guard)
}

fn restore_screen() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)
}

/// Runs `restore` on drop, on every exit path
struct RestoreGuard<F: FnMut() -> io::Result<()>> {
    restore: F,
}

impl<F: FnMut() -> io::Result<()>> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut() -> io::Result<()>> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        if let Err(e) = (self.restore)() {
            log::warn!("Failed to restore the terminal: {}", e);
        }
    }
}

struct TuiJudge<'t, B: Backend> {
    terminal: &'t mut Terminal<B>,
    deck: String,
}

impl<B: Backend> Judge for TuiJudge<'_, B> {
    fn judge(&mut self, card: Flashcard<'_>, context: ExamContext) -> Judgment {
        let mut state = ExamState::new(&self.deck, card, context);
        match run_loop(self.terminal, &mut state) {
            Ok(judgment) => judgment,
            Err(e) => {
                log::warn!("Terminal error, stopping the exam: {}", e);
                Judgment::Quit
            }
        }
    }
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, state: &mut ExamState<'_>) -> Result<Judgment> {
    loop {
        terminal.draw(|f| ui::draw(f, state))?;

        if let Some(judgment) = state.outcome {
            return Ok(judgment);
        }

        // Poll for events with timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    key_handler::handle_key(state, key);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn guarded(restored: &Cell<usize>, fail_setup: bool) -> io::Result<&'static str> {
        let _guard = RestoreGuard::new(|| {
            restored.set(restored.get() + 1);
            Ok(())
        });
        if fail_setup {
            return Err(io::Error::other("no terminal"));
        }
        Ok("report")
    }

    #[test]
    fn test_guard_restores_on_every_path() {
        let restored = Cell::new(0);
        assert_eq!(guarded(&restored, false).unwrap(), "report");
        assert!(guarded(&restored, true).is_err());
        assert_eq!(restored.get(), 2);
    }

    #[test]
    fn test_failed_restore_keeps_result() {
        let result = (|| -> io::Result<usize> {
            let _guard = RestoreGuard::new(|| Err(io::Error::other("tty gone")));
            Ok(3)
        })();
        assert_eq!(result.unwrap(), 3);
    }
}
