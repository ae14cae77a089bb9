use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app_state::{ExamState, Stage};

pub fn draw(f: &mut Frame, area: Rect, state: &ExamState<'_>) {
    let block = Block::default()
        .title(format!(" {} ", state.deck))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut text = vec![
        Line::from(""),
        Line::from(Span::styled(
            state.card.label,
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    match state.stage {
        Stage::Question => text.push(Line::from(Span::styled(
            "Space: reveal",
            Style::default().fg(Color::DarkGray),
        ))),
        Stage::Answer => text.push(Line::from(state.card.transcript)),
    }

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
