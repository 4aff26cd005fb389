pub mod answer_panel;
pub mod help_overlay;
pub mod passage_view;
pub mod question_list;
pub mod status_row;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, View};

/// Top-level draw: view content above, one status row below, help on top.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let background = Block::default().style(Style::default().bg(app.theme.background));
    frame.render_widget(background, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    match app.view {
        View::List => question_list::render_question_list(frame, app, rows[0]),
        View::Editor => {
            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(rows[0]);
            passage_view::render_passage_view(frame, app, panes[0]);
            answer_panel::render_answer_panel(frame, app, panes[1]);
        }
    }

    status_row::render_status_row(frame, app, rows[1]);

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}
