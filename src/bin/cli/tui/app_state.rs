use sword_lib::flashcards::{ExamContext, Flashcard, Judgment, MemoryLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Only the label is visible
    Question,
    /// Transcript shown, waiting for a level
    Answer,
}

/// Screen state while one card is presented
pub struct ExamState<'a> {
    pub deck: &'a str,
    pub card: Flashcard<'a>,
    pub context: ExamContext,
    pub stage: Stage,

    // Menu state, index into `MemoryLevel::ALL`
    pub selected: usize,

    pub outcome: Option<Judgment>,
}

impl<'a> ExamState<'a> {
    pub fn new(deck: &'a str, card: Flashcard<'a>, context: ExamContext) -> Self {
        Self {
            deck,
            card,
            context,
            stage: Stage::Question,
            // Start on the card's current bucket so Enter keeps it in place
            selected: context.level.index(),
            outcome: None,
        }
    }

    pub fn reveal(&mut self) {
        self.stage = Stage::Answer;
    }

    pub fn menu_down(&mut self) {
        if self.selected + 1 < MemoryLevel::ALL.len() {
            self.selected += 1;
        }
    }

    pub fn menu_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_level(&self) -> MemoryLevel {
        MemoryLevel::ALL[self.selected]
    }

    pub fn choose(&mut self, level: MemoryLevel) {
        self.outcome = Some(Judgment::Level(level));
    }

    pub fn quit(&mut self) {
        self.outcome = Some(Judgment::Quit);
    }
}
