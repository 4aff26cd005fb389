use serde::{Deserialize, Serialize};

use crate::model::blank::{AnswerRecord, BlankId};

/// How the passage is delivered to the learner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    #[default]
    Reading,
    Listening,
}

impl QuestionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::Reading => "reading",
            QuestionKind::Listening => "listening",
        }
    }

    pub fn from_str(s: &str) -> Option<QuestionKind> {
        match s {
            "reading" => Some(QuestionKind::Reading),
            "listening" => Some(QuestionKind::Listening),
            _ => None,
        }
    }
}

/// A gap-fill question: a passage with blank tokens plus one answer record
/// per distinct blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub title: String,
    pub kind: QuestionKind,
    /// Audio (or other media) reference, used by listening questions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    pub passage: String,
    pub answers: Vec<AnswerRecord>,
}

impl Question {
    /// Create an empty question of the given kind.
    pub fn new(title: String, kind: QuestionKind) -> Self {
        Question {
            title,
            kind,
            media: None,
            created: None,
            passage: String::new(),
            answers: Vec::new(),
        }
    }

    pub fn answer(&self, id: &BlankId) -> Option<&AnswerRecord> {
        self.answers.iter().find(|a| &a.id == id)
    }

    pub fn answer_mut(&mut self, id: &BlankId) -> Option<&mut AnswerRecord> {
        self.answers.iter_mut().find(|a| &a.id == id)
    }

    /// Number of answer records with both fields filled in.
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_complete()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codec() {
        for kind in [QuestionKind::Reading, QuestionKind::Listening] {
            assert_eq!(QuestionKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(QuestionKind::from_str("video"), None);
    }

    #[test]
    fn test_answer_lookup() {
        let mut q = Question::new("Capitals".to_string(), QuestionKind::Reading);
        let id = BlankId::parse("a1b2c3").unwrap();
        q.answers.push(AnswerRecord::empty(id.clone()));
        assert!(q.answer(&id).is_some());
        assert!(q.answer(&BlankId::parse("ffffff").unwrap()).is_none());

        q.answer_mut(&id).unwrap().answer = "Paris".to_string();
        assert_eq!(q.answer(&id).unwrap().answer, "Paris");
        assert_eq!(q.answered_count(), 0); // explain still empty
        q.answer_mut(&id).unwrap().explain = "capital".to_string();
        assert_eq!(q.answered_count(), 1);
    }
}
