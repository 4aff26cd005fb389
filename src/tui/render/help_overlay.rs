use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

const HELP: &[(&str, &str)] = &[
    ("j / k", "move selection"),
    ("enter / l", "open question"),
    ("esc / h", "back to list"),
    ("a", "edit answer"),
    ("e", "edit explanation"),
    ("b", "insert a blank at the end of the passage"),
    ("d", "remove the selected blank"),
    ("u", "sync answer records with the passage"),
    ("s", "save"),
    ("r", "reload from disk"),
    ("pgup / pgdn", "scroll the passage"),
    ("q", "quit"),
];

/// Render the help overlay, centered.
pub fn render_help_overlay(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let width = 52.min(area.width);
    let height = (HELP.len() as u16 + 4).min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (keys, action) in HELP {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<12}", keys),
                Style::default().fg(theme.highlight).bg(theme.background),
            ),
            Span::styled(
                action.to_string(),
                Style::default().fg(theme.text).bg(theme.background),
            ),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" keys ")
        .border_style(Style::default().fg(theme.selection_border).bg(theme.background))
        .style(Style::default().bg(theme.background));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
