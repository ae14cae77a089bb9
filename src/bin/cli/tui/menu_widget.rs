use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use sword_lib::flashcards::MemoryLevel;

use super::app_state::{ExamState, Stage};

pub fn draw(f: &mut Frame, area: Rect, state: &ExamState<'_>) {
    let is_active = state.stage == Stage::Answer;

    let block = Block::default()
        .title(" How well did you recall it? ")
        .borders(Borders::ALL)
        .border_style(if is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    let lines: Vec<Line> = MemoryLevel::ALL
        .iter()
        .enumerate()
        .map(|(i, level)| {
            let current = if *level == state.context.level { " (current)" } else { "" };
            let text = format!(" {}. {}{} ", i + 1, level, current);
            let style = if !is_active {
                Style::default().fg(Color::DarkGray)
            } else if i == state.selected {
                Style::default().bg(Color::Cyan).fg(Color::Black)
            } else {
                Style::default()
            };
            Line::from(Span::styled(text, style))
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
