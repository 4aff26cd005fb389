use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::parse::blank_ids;
use crate::tui::app::App;
use crate::util::unicode;

/// Render the question list view.
pub fn render_question_list(frame: &mut Frame, app: &mut App, area: Rect) {
    // Header takes two rows; keep the cursor visible in the rest
    let visible = area.height.saturating_sub(2) as usize;
    if visible > 0 {
        if app.list_cursor < app.list_scroll {
            app.list_scroll = app.list_cursor;
        } else if app.list_cursor >= app.list_scroll + visible {
            app.list_scroll = app.list_cursor + 1 - visible;
        }
    }

    let theme = &app.theme;
    let bg = theme.background;
    let text_style = Style::default().fg(theme.text).bg(bg);
    let dim_style = Style::default().fg(theme.dim).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!(
            " {} — {} question(s)",
            app.bank.config.bank.name,
            app.bank.questions.len()
        ),
        Style::default()
            .fg(theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    for (i, (id, question)) in app
        .bank
        .questions
        .iter()
        .enumerate()
        .skip(app.list_scroll)
        .take(visible)
    {
        let blanks = blank_ids(&question.passage).len();
        let answered = question.answered_count();
        let is_selected = i == app.list_cursor;
        let line_bg = if is_selected { theme.selection_bg } else { bg };

        let marker = if is_selected { "> " } else { "  " };
        let complete = blanks > 0 && answered == blanks;
        let counts_style = if complete {
            Style::default().fg(theme.green).bg(line_bg)
        } else {
            Style::default().fg(theme.yellow).bg(line_bg)
        };

        let title =
            unicode::truncate_to_width(&question.title, area.width.saturating_sub(40) as usize);
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.highlight).bg(line_bg)),
            Span::styled(format!("{:<18} ", id), text_style.bg(line_bg)),
            Span::styled(format!("{:<10} ", question.kind.as_str()), dim_style.bg(line_bg)),
            Span::styled(format!("{}/{} ", answered, blanks), counts_style),
            Span::styled(
                title,
                Style::default().fg(theme.text_bright).bg(line_bg),
            ),
        ]));
    }

    if app.bank.questions.is_empty() {
        lines.push(Line::from(Span::styled(
            " no questions yet — create one with `cz new <id> <title>`",
            dim_style,
        )));
    }

    let paragraph = Paragraph::new(lines).style(text_style);
    frame.render_widget(paragraph, area);
}
