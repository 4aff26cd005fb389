use std::path::PathBuf;

use crate::model::config::BankConfig;
use crate::model::question::Question;

/// A loaded question bank.
///
/// Questions are keyed by file stem (`questions/capitals.md` → `"capitals"`)
/// and kept in load order.
#[derive(Debug, Clone)]
pub struct Bank {
    /// Directory containing the `cloze/` data dir.
    pub root: PathBuf,
    /// The `cloze/` data dir itself.
    pub data_dir: PathBuf,
    pub config: BankConfig,
    pub questions: Vec<(String, Question)>,
}

impl Bank {
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions
            .iter()
            .find(|(qid, _)| qid == id)
            .map(|(_, q)| q)
    }

    pub fn question_mut(&mut self, id: &str) -> Option<&mut Question> {
        self.questions
            .iter_mut()
            .find(|(qid, _)| qid == id)
            .map(|(_, q)| q)
    }

    /// Path of the markdown file backing a question id.
    pub fn question_path(&self, id: &str) -> PathBuf {
        self.data_dir.join("questions").join(format!("{}.md", id))
    }
}
