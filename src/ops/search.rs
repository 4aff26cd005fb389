use std::ops::Range;

use regex::Regex;

use crate::model::bank::Bank;
use crate::model::blank::BlankId;
use crate::model::question::Question;

/// Which field of a question matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Title,
    Passage,
    Answer,
    Explain,
}

impl MatchField {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchField::Title => "title",
            MatchField::Passage => "passage",
            MatchField::Answer => "answer",
            MatchField::Explain => "explain",
        }
    }
}

/// A search hit inside one question
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub question_id: String,
    pub field: MatchField,
    /// The blank the hit belongs to, for answer/explain fields
    pub blank: Option<BlankId>,
    /// The matched line of text, for display
    pub line: String,
    pub spans: Vec<Range<usize>>,
}

/// Compile a search pattern case-insensitively, falling back to a literal
/// match when it is not valid regex syntax.
pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("(?i){}", pattern))
        .or_else(|_| Regex::new(&format!("(?i){}", regex::escape(pattern))))
}

/// Search every question in the bank.
pub fn search_bank(bank: &Bank, re: &Regex) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    for (question_id, question) in &bank.questions {
        search_question(re, question_id, question, &mut hits);
    }
    hits
}

fn search_question(re: &Regex, question_id: &str, question: &Question, hits: &mut Vec<SearchHit>) {
    push_hits(re, question_id, MatchField::Title, None, &question.title, hits);

    for line in question.passage.lines() {
        push_hits(re, question_id, MatchField::Passage, None, line, hits);
    }

    for answer in &question.answers {
        push_hits(
            re,
            question_id,
            MatchField::Answer,
            Some(answer.id.clone()),
            &answer.answer,
            hits,
        );
        for line in answer.explain.lines() {
            push_hits(
                re,
                question_id,
                MatchField::Explain,
                Some(answer.id.clone()),
                line,
                hits,
            );
        }
    }
}

fn push_hits(
    re: &Regex,
    question_id: &str,
    field: MatchField,
    blank: Option<BlankId>,
    text: &str,
    hits: &mut Vec<SearchHit>,
) {
    let spans: Vec<Range<usize>> = re.find_iter(text).map(|m| m.start()..m.end()).collect();
    if !spans.is_empty() {
        hits.push(SearchHit {
            question_id: question_id.to_string(),
            field,
            blank,
            line: text.to_string(),
            spans,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::blank::AnswerRecord;
    use crate::model::config::BankConfig;
    use crate::model::question::QuestionKind;
    use std::path::PathBuf;

    fn make_bank() -> Bank {
        let mut q = Question::new("Capital cities".to_string(), QuestionKind::Reading);
        q.passage = "The capital of France is ***a1b2c3***.\nIt sits on the Seine.".to_string();
        q.answers.push(AnswerRecord {
            id: BlankId::parse("a1b2c3").unwrap(),
            answer: "Paris".to_string(),
            explain: "France's capital".to_string(),
        });
        Bank {
            root: PathBuf::from("/tmp"),
            data_dir: PathBuf::from("/tmp/cloze"),
            config: BankConfig::new("test".to_string()),
            questions: vec![("capitals".to_string(), q)],
        }
    }

    #[test]
    fn test_search_title_and_passage() {
        let bank = make_bank();
        let re = compile_pattern("capital").unwrap();
        let hits = search_bank(&bank, &re);

        assert!(hits.iter().any(|h| h.field == MatchField::Title));
        assert!(hits.iter().any(|h| h.field == MatchField::Passage));
    }

    #[test]
    fn test_search_answer_carries_blank() {
        let bank = make_bank();
        let re = compile_pattern("paris").unwrap();
        let hits = search_bank(&bank, &re);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].field, MatchField::Answer);
        assert_eq!(hits[0].blank, BlankId::parse("a1b2c3"));
        assert_eq!(hits[0].spans, vec![0..5]);
    }

    #[test]
    fn test_invalid_regex_falls_back_to_literal() {
        let re = compile_pattern("a(b").unwrap();
        assert!(re.is_match("see A(B here"));
    }

    #[test]
    fn test_no_hits() {
        let bank = make_bank();
        let re = compile_pattern("zanzibar").unwrap();
        assert!(search_bank(&bank, &re).is_empty());
    }
}
