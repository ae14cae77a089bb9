use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::app_state::{ExamState, Stage};

pub fn draw(f: &mut Frame, area: Rect, state: &ExamState<'_>) {
    let hints = match state.stage {
        Stage::Question => "Space/Enter: reveal  q: quit",
        Stage::Answer => "j/k: select  Enter: choose  1-3: choose  q: quit",
    };

    let text = format!(
        " [{}] {} left, {} reviewed  |  {} ",
        state.context.level, state.context.remaining, state.context.repeats, hints
    );

    let status = Paragraph::new(text).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status, area);
}
