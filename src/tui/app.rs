use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::bank_io::{discover_bank, load_bank, save_question};
use crate::io::watcher::BankWatcher;
use crate::model::bank::Bank;
use crate::model::blank::BlankId;
use crate::model::question::Question;
use crate::ops::check::{self, CheckResult};
use crate::ops::{blank_ops, sync};

use super::input::{self, EditBuffer};
use super::render;
use super::theme::Theme;

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The question list
    List,
    /// The editor for the currently open question
    Editor,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    EditAnswer,
    EditExplain,
    ConfirmRemove,
    ConfirmQuit,
}

/// Main application state
pub struct App {
    pub bank: Bank,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Cursor in the question list
    pub list_cursor: usize,
    /// Scroll offset for the question list
    pub list_scroll: usize,
    /// Id of the question open in the editor
    pub current: Option<String>,
    /// Selected answer index within the open question
    pub selected: usize,
    /// Scroll offset (rows) for the passage pane
    pub passage_scroll: u16,
    /// Scroll offset for the answer panel
    pub answer_scroll: usize,
    /// Line editor for answer/explain editing
    pub edit: EditBuffer,
    /// Unsaved changes in the open question
    pub dirty: bool,
    /// One-shot status message shown in the status row
    pub status: Option<String>,
    pub show_help: bool,
}

impl App {
    pub fn new(bank: Bank) -> Self {
        let theme = Theme::from_config(&bank.config.ui);
        App {
            bank,
            view: View::List,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            list_cursor: 0,
            list_scroll: 0,
            current: None,
            selected: 0,
            passage_scroll: 0,
            answer_scroll: 0,
            edit: EditBuffer::default(),
            dirty: false,
            status: None,
            show_help: false,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        let id = self.current.as_deref()?;
        self.bank.question(id)
    }

    pub fn current_question_mut(&mut self) -> Option<&mut Question> {
        let id = self.current.clone()?;
        self.bank.question_mut(&id)
    }

    /// The blank selected in the answer panel, if any.
    pub fn selected_blank_id(&self) -> Option<BlankId> {
        let question = self.current_question()?;
        question.answers.get(self.selected).map(|a| a.id.clone())
    }

    /// Validation state of the open question, recomputed on demand.
    pub fn check_current(&self) -> Option<CheckResult> {
        let id = self.current.as_deref()?;
        let question = self.bank.question(id)?;
        Some(check::check_question(id, question, &self.bank.config))
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    pub fn open_selected(&mut self) {
        if let Some((id, _)) = self.bank.questions.get(self.list_cursor) {
            self.current = Some(id.clone());
            self.view = View::Editor;
            self.selected = 0;
            self.passage_scroll = 0;
            self.answer_scroll = 0;
            self.status = None;
        }
    }

    pub fn close_editor(&mut self) {
        self.view = View::List;
        self.status = if self.dirty {
            Some("unsaved changes (s to save from the editor)".to_string())
        } else {
            None
        };
    }

    pub fn move_list_cursor(&mut self, delta: isize) {
        let len = self.bank.questions.len();
        if len == 0 {
            return;
        }
        let cursor = self.list_cursor as isize + delta;
        self.list_cursor = cursor.clamp(0, len as isize - 1) as usize;
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self
            .current_question()
            .map(|q| q.answers.len())
            .unwrap_or(0);
        if len == 0 {
            return;
        }
        let selected = self.selected as isize + delta;
        self.selected = selected.clamp(0, len as isize - 1) as usize;
    }

    fn clamp_selection(&mut self) {
        let len = self
            .current_question()
            .map(|q| q.answers.len())
            .unwrap_or(0);
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    // -----------------------------------------------------------------------
    // Mutations: every passage change is followed by an explicit sync pass
    // -----------------------------------------------------------------------

    pub fn insert_blank(&mut self) {
        let Some(question) = self.current_question_mut() else {
            return;
        };
        let mut rng = rand::thread_rng();
        match blank_ops::insert_blank(&mut question.passage, None, &mut question.answers, &mut rng)
        {
            Ok(id) => {
                sync::sync_answers(&question.passage, &mut question.answers);
                self.dirty = true;
                // Select the freshly added record
                let len = self
                    .current_question()
                    .map(|q| q.answers.len())
                    .unwrap_or(0);
                self.selected = len.saturating_sub(1);
                self.set_status(format!("added blank `{}`", id));
            }
            Err(e) => self.set_status(format!("cannot add blank: {}", e)),
        }
    }

    pub fn remove_selected_blank(&mut self) {
        let Some(id) = self.selected_blank_id() else {
            self.set_status("no blank selected");
            return;
        };
        if let Some(question) = self.current_question_mut() {
            if blank_ops::remove_blank(&mut question.passage, &mut question.answers, &id) {
                sync::sync_answers(&question.passage, &mut question.answers);
                self.dirty = true;
                self.set_status(format!("removed blank `{}`", id));
            }
        }
        self.clamp_selection();
    }

    pub fn sync_current(&mut self) {
        if let Some(question) = self.current_question_mut() {
            let report = sync::sync_answers(&question.passage, &mut question.answers);
            if report.is_clean() {
                self.set_status("already in sync");
            } else {
                self.dirty = true;
                self.set_status(format!(
                    "sync: {} added, {} pruned",
                    report.added.len(),
                    report.removed.len()
                ));
            }
        }
        self.clamp_selection();
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    pub fn begin_edit(&mut self, mode: Mode) {
        let Some(question) = self.current_question() else {
            return;
        };
        let Some(answer) = question.answers.get(self.selected) else {
            self.set_status("no blank selected");
            return;
        };
        let seed = match mode {
            Mode::EditAnswer => answer.answer.clone(),
            Mode::EditExplain => answer.explain.clone(),
            _ => return,
        };
        self.edit = EditBuffer::from_text(seed);
        self.mode = mode;
    }

    pub fn commit_edit(&mut self) {
        let text = self.edit.text.clone();
        let mode = self.mode;
        let selected = self.selected;
        if let Some(question) = self.current_question_mut()
            && let Some(answer) = question.answers.get_mut(selected)
        {
            match mode {
                Mode::EditAnswer => answer.answer = text,
                Mode::EditExplain => answer.explain = text,
                _ => {}
            }
            self.dirty = true;
        }
        self.mode = Mode::Navigate;
        self.edit = EditBuffer::default();
    }

    pub fn cancel_edit(&mut self) {
        self.mode = Mode::Navigate;
        self.edit = EditBuffer::default();
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    pub fn save_current(&mut self) {
        let Some(id) = self.current.clone() else {
            return;
        };
        // Enforce the invariant before anything reaches disk
        if let Some(question) = self.current_question_mut() {
            sync::sync_answers(&question.passage, &mut question.answers);
        }
        self.clamp_selection();

        let data_dir = self.bank.data_dir.clone();
        let Some(question) = self.bank.question(&id) else {
            return;
        };
        match save_question(&data_dir, &id, question) {
            Ok(()) => {
                self.dirty = false;
                self.set_status(format!("saved {}", id));
            }
            Err(e) => self.set_status(format!("save failed: {}", e)),
        }
    }

    pub fn reload(&mut self) {
        match load_bank(&self.bank.root) {
            Ok(bank) => {
                self.bank = bank;
                self.dirty = false;
                if let Some(ref id) = self.current
                    && self.bank.question(id).is_none()
                {
                    self.current = None;
                    self.view = View::List;
                }
                let len = self.bank.questions.len();
                if self.list_cursor >= len {
                    self.list_cursor = len.saturating_sub(1);
                }
                self.clamp_selection();
                self.set_status("reloaded from disk");
            }
            Err(e) => self.set_status(format!("reload failed: {}", e)),
        }
    }

    /// A bank file changed outside the editor.
    pub fn on_external_change(&mut self) {
        if self.dirty {
            self.set_status("files changed on disk; unsaved edits kept (r to reload and discard)");
        } else {
            self.reload();
        }
    }
}

/// Launch the TUI against the bank discovered from `bank_dir` (or the CWD).
pub fn run(bank_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match bank_dir {
        Some(dir) => std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
        None => std::env::current_dir()?,
    };
    let root = discover_bank(&start)?;
    let bank = load_bank(&root)?;

    // The watcher is optional: the editor still works without reload events
    let watcher = BankWatcher::start(&bank.data_dir).ok();
    let mut app = App::new(bank);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, watcher.as_ref());

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&BankWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    while !app.should_quit {
        terminal.draw(|frame| render::draw(frame, app))?;

        if event::poll(Duration::from_millis(150))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if let Some(watcher) = watcher
            && !watcher.changed_paths().is_empty()
        {
            app.on_external_change();
        }
    }
    Ok(())
}
