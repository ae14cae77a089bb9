use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use sword_lib::flashcards::MemoryLevel;

use super::app_state::{ExamState, Stage};

pub fn handle_key(state: &mut ExamState<'_>, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.quit();
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.quit(),
        _ => match state.stage {
            Stage::Question => handle_question_key(state, key),
            Stage::Answer => handle_answer_key(state, key),
        },
    }
}

fn handle_question_key(state: &mut ExamState<'_>, key: KeyEvent) {
    if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
        state.reveal();
    }
}

fn handle_answer_key(state: &mut ExamState<'_>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.menu_down(),
        KeyCode::Char('k') | KeyCode::Up => state.menu_up(),
        KeyCode::Enter => {
            let level = state.selected_level();
            state.choose(level);
        }
        KeyCode::Char('1') | KeyCode::Char('h') => state.choose(MemoryLevel::Hard),
        KeyCode::Char('2') | KeyCode::Char('n') => state.choose(MemoryLevel::Normal),
        KeyCode::Char('3') | KeyCode::Char('g') => state.choose(MemoryLevel::Good),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sword_lib::flashcards::{ExamContext, Flashcard, Judgment};

    fn state(level: MemoryLevel) -> ExamState<'static> {
        ExamState::new(
            "fr",
            Flashcard { label: "chien", transcript: "dog" },
            ExamContext { level, remaining: 1, repeats: 0 },
        )
    }

    fn press(state: &mut ExamState<'_>, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_reveal_before_choosing() {
        let mut s = state(MemoryLevel::Hard);
        press(&mut s, KeyCode::Char('g'));
        assert_eq!(s.outcome, None);
        assert_eq!(s.stage, Stage::Question);

        press(&mut s, KeyCode::Char(' '));
        assert_eq!(s.stage, Stage::Answer);
        press(&mut s, KeyCode::Char('g'));
        assert_eq!(s.outcome, Some(Judgment::Level(MemoryLevel::Good)));
    }

    #[test]
    fn test_menu_starts_on_current_level() {
        let mut s = state(MemoryLevel::Normal);
        press(&mut s, KeyCode::Enter);
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.outcome, Some(Judgment::Level(MemoryLevel::Normal)));
    }

    #[test]
    fn test_menu_navigation_is_clamped() {
        let mut s = state(MemoryLevel::Hard);
        press(&mut s, KeyCode::Enter);
        press(&mut s, KeyCode::Up);
        assert_eq!(s.selected_level(), MemoryLevel::Hard);
        for _ in 0..5 {
            press(&mut s, KeyCode::Char('j'));
        }
        assert_eq!(s.selected_level(), MemoryLevel::Good);
        press(&mut s, KeyCode::Char('k'));
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.outcome, Some(Judgment::Level(MemoryLevel::Normal)));
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut s = state(MemoryLevel::Good);
            press(&mut s, code);
            assert_eq!(s.outcome, Some(Judgment::Quit));
        }

        let mut s = state(MemoryLevel::Good);
        handle_key(&mut s, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(s.outcome, Some(Judgment::Quit));
    }
}
