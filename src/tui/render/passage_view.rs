use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::parse::{Segment, segment_passage};
use crate::tui::app::App;

/// Mask shown in place of a blank token.
const BLANK_MASK: &str = "______";

/// Render the passage pane: literal text as plain text, blanks as colored
/// masked chips, the selected blank visually distinguished.
pub fn render_passage_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(question) = app.current_question() else {
        return;
    };
    let selected = question.answers.get(app.selected).map(|a| a.id.clone());
    let theme = &app.theme;
    let bg = theme.background;
    let text_style = Style::default().fg(theme.text).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    let mut current: Vec<Span> = Vec::new();

    for segment in segment_passage(&question.passage) {
        match segment {
            Segment::Text(text) => {
                // Literal text is rendered as-is, split on line breaks;
                // it is never interpreted as markup
                let mut parts = text.split('\n');
                if let Some(first) = parts.next()
                    && !first.is_empty()
                {
                    current.push(Span::styled(first.to_string(), text_style));
                }
                for part in parts {
                    lines.push(Line::from(std::mem::take(&mut current)));
                    if !part.is_empty() {
                        current.push(Span::styled(part.to_string(), text_style));
                    }
                }
            }
            Segment::Blank(id) => {
                let mut style = Style::default()
                    .fg(theme.blank_color(&id))
                    .bg(bg)
                    .add_modifier(Modifier::BOLD);
                if selected.as_ref() == Some(&id) {
                    style = style
                        .bg(theme.selection_bg)
                        .add_modifier(Modifier::UNDERLINED);
                }
                current.push(Span::styled(BLANK_MASK, style));
            }
        }
    }
    lines.push(Line::from(current));

    let title = format!(" {} · {} ", question.title, question.kind.as_str());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(text_style)
        .wrap(Wrap { trim: false })
        .scroll((app.passage_scroll, 0));
    frame.render_widget(paragraph, area);
}
