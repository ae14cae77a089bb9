use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;

use super::app_state::ExamState;
use super::{card_widget, menu_widget, status_bar};

pub fn draw(f: &mut Frame, state: &ExamState<'_>) {
    let size = f.area();

    // Card, level menu, status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(size);

    card_widget::draw(f, outer[0], state);
    menu_widget::draw(f, outer[1], state);
    status_bar::draw(f, outer[2], state);
}
