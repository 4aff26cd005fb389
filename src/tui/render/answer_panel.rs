use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Mode};

/// Rows used per answer record: chip/answer line, explain line, spacer.
const ROWS_PER_ANSWER: usize = 3;

/// Render the answer panel: one entry per record, the selected entry
/// highlighted, with inline editing of answer/explain fields.
pub fn render_answer_panel(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(len) = app.current_question().map(|q| q.answers.len()) else {
        return;
    };

    let inner_height = area.height.saturating_sub(2) as usize;
    let visible = (inner_height / ROWS_PER_ANSWER).max(1);

    // Keep the selected entry in view (scroll-to-answer)
    if app.selected < app.answer_scroll {
        app.answer_scroll = app.selected;
    } else if app.selected >= app.answer_scroll + visible {
        app.answer_scroll = app.selected + 1 - visible;
    }

    let scroll = app.answer_scroll;
    let selected = app.selected;
    let mode = app.mode;
    let edit_text = app.edit.text.clone();
    let edit_col = app.edit.cursor_col();

    let Some(question) = app.current_question() else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.background;
    let text_style = Style::default().fg(theme.text).bg(bg);
    let bright_style = Style::default().fg(theme.text_bright).bg(bg);
    let dim_style = Style::default().fg(theme.dim).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    let mut cursor: Option<(u16, u16)> = None;
    let inner_x = area.x + 1;
    let inner_y = area.y + 1;

    for (i, answer) in question
        .answers
        .iter()
        .enumerate()
        .skip(scroll)
        .take(visible)
    {
        let is_selected = i == selected;
        let row = (i - scroll) * ROWS_PER_ANSWER;

        let chip_style = Style::default()
            .fg(theme.blank_color(&answer.id))
            .bg(if is_selected { theme.selection_bg } else { bg })
            .add_modifier(Modifier::BOLD);
        let line_bg = if is_selected { theme.selection_bg } else { bg };
        let value_style = if is_selected {
            bright_style.bg(line_bg)
        } else {
            text_style
        };

        // Answer line: `■ a1b2c3 <answer>`
        let mut spans = vec![
            Span::styled(format!("■ {} ", answer.id), chip_style),
        ];
        if is_selected && mode == Mode::EditAnswer {
            spans.push(Span::styled(edit_text.clone(), value_style));
            cursor = Some((
                inner_x + 9 + edit_col as u16,
                inner_y + row as u16,
            ));
        } else if answer.answer.is_empty() {
            spans.push(Span::styled("(no answer)", dim_style.bg(line_bg)));
        } else {
            spans.push(Span::styled(answer.answer.clone(), value_style));
        }
        lines.push(Line::from(spans));

        // Explain line: `  └ <explain>`
        let mut spans = vec![Span::styled("  └ ", dim_style.bg(line_bg))];
        if is_selected && mode == Mode::EditExplain {
            spans.push(Span::styled(edit_text.clone(), value_style));
            cursor = Some((
                inner_x + 4 + edit_col as u16,
                inner_y + row as u16 + 1,
            ));
        } else if answer.explain.is_empty() {
            spans.push(Span::styled("(no explanation)", dim_style.bg(line_bg)));
        } else {
            let first_line = answer.explain.lines().next().unwrap_or("");
            spans.push(Span::styled(
                first_line.to_string(),
                text_style.bg(line_bg),
            ));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    if len == 0 {
        lines.push(Line::from(Span::styled(
            "no blanks yet — press b to add one",
            dim_style,
        )));
    }

    let title = format!(" answers {}/{} ", question.answered_count(), len);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines).block(block).style(text_style);
    frame.render_widget(paragraph, area);

    if let Some((x, y)) = cursor {
        frame.set_cursor_position((x, y));
    }
}

#[cfg(test)]
mod tests {
    use crate::util::unicode;

    #[test]
    fn test_cursor_col_offset_matches_chip_prefix() {
        // `■ a1b2c3 ` is 9 cells wide: the cursor math above depends on it
        assert_eq!(unicode::display_width("■ a1b2c3 "), 9);
        assert_eq!(unicode::display_width("  └ "), 4);
    }
}
