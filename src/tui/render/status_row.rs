use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, View};

/// Render the one-line status row: mode, location, dirty marker, diagnostic
/// count, and either a status message or key hints.
pub fn render_status_row(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let dim_style = Style::default().fg(theme.dim).bg(bg);

    let mode_tag = match app.mode {
        Mode::Navigate => "NAV",
        Mode::EditAnswer => "ANSWER",
        Mode::EditExplain => "EXPLAIN",
        Mode::ConfirmRemove => "REMOVE?",
        Mode::ConfirmQuit => "QUIT?",
    };

    let mut spans: Vec<Span> = vec![
        Span::styled(
            format!(" {} ", mode_tag),
            Style::default()
                .fg(theme.background)
                .bg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", dim_style),
    ];

    if app.view == View::Editor {
        if let Some(ref id) = app.current {
            spans.push(Span::styled(id.clone(), Style::default().fg(theme.text).bg(bg)));
            if app.dirty {
                spans.push(Span::styled(" *", Style::default().fg(theme.yellow).bg(bg)));
            }
            spans.push(Span::styled(" ", dim_style));
        }
        if let Some(blank) = app.selected_blank_id() {
            spans.push(Span::styled(
                format!("`{}` ", blank),
                Style::default().fg(theme.blank_color(&blank)).bg(bg),
            ));
        }
        if let Some(check) = app.check_current() {
            if check.valid {
                spans.push(Span::styled("ok ", Style::default().fg(theme.green).bg(bg)));
            } else {
                spans.push(Span::styled(
                    format!("{} error(s) ", check.errors.len()),
                    Style::default().fg(theme.red).bg(bg),
                ));
            }
        }
    }

    let tail = match &app.status {
        Some(message) => message.clone(),
        None => hints(app).to_string(),
    };
    spans.push(Span::styled(tail, dim_style));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn hints(app: &App) -> &'static str {
    match app.mode {
        Mode::Navigate => match app.view {
            View::List => "j/k move · enter open · r reload · ? help · q quit",
            View::Editor => "j/k blank · a answer · e explain · b add · d remove · s save · u sync · ? help",
        },
        Mode::EditAnswer | Mode::EditExplain => "enter commit · esc cancel",
        Mode::ConfirmRemove => "remove this blank and its answer? y/n",
        Mode::ConfirmQuit => "unsaved changes — y quit · s save and quit · n stay",
    }
}
