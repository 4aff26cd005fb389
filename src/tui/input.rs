use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode;

use super::app::{App, Mode, View};

/// A one-line edit buffer with a byte-offset cursor.
#[derive(Debug, Clone, Default)]
pub struct EditBuffer {
    pub text: String,
    /// Byte offset, always on a grapheme boundary
    pub cursor: usize,
}

impl EditBuffer {
    pub fn from_text(text: String) -> Self {
        let cursor = text.len();
        EditBuffer { text, cursor }
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Display column of the cursor, in terminal cells.
    pub fn cursor_col(&self) -> usize {
        unicode::display_width(&self.text[..self.cursor])
    }
}

/// Dispatch a key press according to the current mode.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::EditAnswer | Mode::EditExplain => handle_edit(app, key),
        Mode::ConfirmRemove => handle_confirm_remove(app, key),
        Mode::ConfirmQuit => handle_confirm_quit(app, key),
    }
}

fn request_quit(app: &mut App) {
    if app.dirty {
        app.mode = Mode::ConfirmQuit;
    } else {
        app.should_quit = true;
    }
}

fn handle_navigate(app: &mut App, key: KeyEvent) {
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.view {
        View::List => match key.code {
            KeyCode::Char('q') => request_quit(app),
            KeyCode::Char('j') | KeyCode::Down => app.move_list_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => app.move_list_cursor(-1),
            KeyCode::Enter | KeyCode::Char('l') => app.open_selected(),
            KeyCode::Char('r') => app.reload(),
            KeyCode::Char('?') => app.show_help = true,
            _ => {}
        },
        View::Editor => match key.code {
            KeyCode::Char('q') => request_quit(app),
            KeyCode::Esc | KeyCode::Char('h') => app.close_editor(),
            KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
            KeyCode::Char('a') => app.begin_edit(Mode::EditAnswer),
            KeyCode::Char('e') => app.begin_edit(Mode::EditExplain),
            KeyCode::Char('b') => app.insert_blank(),
            KeyCode::Char('d') => {
                if app.selected_blank_id().is_some() {
                    app.mode = Mode::ConfirmRemove;
                } else {
                    app.set_status("no blank selected");
                }
            }
            KeyCode::Char('s') => app.save_current(),
            KeyCode::Char('u') => app.sync_current(),
            KeyCode::Char('r') => app.reload(),
            KeyCode::PageDown => app.passage_scroll = app.passage_scroll.saturating_add(4),
            KeyCode::PageUp => app.passage_scroll = app.passage_scroll.saturating_sub(4),
            KeyCode::Char('?') => app.show_help = true,
            _ => {}
        },
    }
}

fn handle_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Backspace => app.edit.backspace(),
        KeyCode::Delete => app.edit.delete(),
        KeyCode::Left => app.edit.left(),
        KeyCode::Right => app.edit.right(),
        KeyCode::Home => app.edit.home(),
        KeyCode::End => app.edit.end(),
        KeyCode::Char(c) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                app.edit.insert(c);
            }
        }
        _ => {}
    }
}

fn handle_confirm_remove(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.mode = Mode::Navigate;
            app.remove_selected_blank();
        }
        _ => {
            app.mode = Mode::Navigate;
        }
    }
}

fn handle_confirm_quit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') => app.should_quit = true,
        KeyCode::Char('s') => {
            app.save_current();
            if !app.dirty {
                app.should_quit = true;
            } else {
                app.mode = Mode::Navigate;
            }
        }
        _ => {
            app.mode = Mode::Navigate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_buffer_insert_and_backspace() {
        let mut buf = EditBuffer::default();
        for c in "héllo".chars() {
            buf.insert(c);
        }
        assert_eq!(buf.text, "héllo");
        assert_eq!(buf.cursor, buf.text.len());

        buf.backspace();
        assert_eq!(buf.text, "héll");
    }

    #[test]
    fn test_buffer_backspace_removes_grapheme() {
        let mut buf = EditBuffer::from_text("cafe\u{0301}".to_string()); // café
        buf.backspace();
        // The combining pair goes as one unit
        assert_eq!(buf.text, "caf");
    }

    #[test]
    fn test_buffer_cursor_motion() {
        let mut buf = EditBuffer::from_text("ab".to_string());
        assert_eq!(buf.cursor, 2);
        buf.left();
        assert_eq!(buf.cursor, 1);
        buf.left();
        assert_eq!(buf.cursor, 0);
        buf.left(); // already at start
        assert_eq!(buf.cursor, 0);
        buf.right();
        assert_eq!(buf.cursor, 1);
        buf.end();
        assert_eq!(buf.cursor, 2);
        buf.home();
        assert_eq!(buf.cursor, 0);
    }

    #[test]
    fn test_buffer_delete_at_cursor() {
        let mut buf = EditBuffer::from_text("abc".to_string());
        buf.home();
        buf.delete();
        assert_eq!(buf.text, "bc");
        assert_eq!(buf.cursor, 0);
    }

    #[test]
    fn test_buffer_mid_insert() {
        let mut buf = EditBuffer::from_text("ac".to_string());
        buf.left();
        buf.insert('b');
        assert_eq!(buf.text, "abc");
        assert_eq!(buf.cursor, 2);
    }

    #[test]
    fn test_cursor_col_counts_cells() {
        let mut buf = EditBuffer::from_text("你好x".to_string());
        assert_eq!(buf.cursor_col(), 5); // 2 + 2 + 1
        buf.left();
        assert_eq!(buf.cursor_col(), 4);
    }

    #[test]
    fn test_edit_mode_keys() {
        use crate::tui::app::tests_support::make_test_app;

        let mut app = make_test_app();
        app.open_selected();
        app.begin_edit(Mode::EditAnswer);

        handle_key(&mut app, key(KeyCode::Char('h')));
        handle_key(&mut app, key(KeyCode::Char('i')));
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.current_question().unwrap().answers[0].answer.ends_with("hi"));
    }

    #[test]
    fn test_quit_requires_confirm_when_dirty() {
        use crate::tui::app::tests_support::make_test_app;

        let mut app = make_test_app();
        app.open_selected();
        handle_key(&mut app, key(KeyCode::Char('b'))); // insert blank → dirty
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert_eq!(app.mode, Mode::ConfirmQuit);
        assert!(!app.should_quit);

        handle_key(&mut app, key(KeyCode::Char('y')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_confirm_remove_flow() {
        use crate::tui::app::tests_support::make_test_app;

        let mut app = make_test_app();
        app.open_selected();
        let before = app.current_question().unwrap().answers.len();

        handle_key(&mut app, key(KeyCode::Char('d')));
        assert_eq!(app.mode, Mode::ConfirmRemove);
        handle_key(&mut app, key(KeyCode::Esc)); // cancel
        assert_eq!(app.current_question().unwrap().answers.len(), before);

        handle_key(&mut app, key(KeyCode::Char('d')));
        handle_key(&mut app, key(KeyCode::Char('y')));
        assert_eq!(app.current_question().unwrap().answers.len(), before - 1);
    }
}
