use serde::Serialize;

use crate::model::blank::AnswerRecord;
use crate::model::question::{Question, QuestionKind};
use crate::ops::check::{CheckError, CheckResult, CheckWarning};
use crate::ops::search::SearchHit;
use crate::parse::blank_ids;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct QuestionSummaryJson {
    pub id: String,
    pub title: String,
    pub kind: QuestionKind,
    pub blanks: usize,
    pub answered: usize,
}

#[derive(Serialize)]
pub struct QuestionJson {
    pub id: String,
    pub title: String,
    pub kind: QuestionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    pub passage: String,
    pub answers: Vec<AnswerRecord>,
}

impl QuestionSummaryJson {
    pub fn from_question(id: &str, question: &Question) -> Self {
        QuestionSummaryJson {
            id: id.to_string(),
            title: question.title.clone(),
            kind: question.kind,
            blanks: blank_ids(&question.passage).len(),
            answered: question.answered_count(),
        }
    }
}

impl QuestionJson {
    pub fn from_question(id: &str, question: &Question) -> Self {
        QuestionJson {
            id: id.to_string(),
            title: question.title.clone(),
            kind: question.kind,
            media: question.media.clone(),
            created: question.created.clone(),
            passage: question.passage.clone(),
            answers: question.answers.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Human output
// ---------------------------------------------------------------------------

pub fn print_question_summary(summary: &QuestionSummaryJson) {
    println!(
        "{:<20} {:<10} {:>2} blanks  {:>2}/{} answered  {}",
        summary.id, summary.kind.as_str(), summary.blanks, summary.answered, summary.blanks,
        summary.title
    );
}

pub fn print_question(id: &str, question: &Question) {
    println!("# {} ({})", question.title, id);
    println!("kind: {}", question.kind.as_str());
    if let Some(ref media) = question.media {
        println!("media: {}", media);
    }
    if let Some(ref created) = question.created {
        println!("created: {}", created);
    }
    println!();
    println!("{}", question.passage);
    println!();
    for answer in &question.answers {
        let mark = if answer.is_complete() { "x" } else { " " };
        println!("[{}] `{}` {}", mark, answer.id, answer.answer);
        if !answer.explain.is_empty() {
            for line in answer.explain.lines() {
                println!("      {}", line);
            }
        }
    }
}

pub fn print_check_result(result: &CheckResult) {
    for error in &result.errors {
        println!("error: {}", format_check_error(error));
    }
    for warning in &result.warnings {
        println!("warning: {}", format_check_warning(warning));
    }
    if result.valid && result.warnings.is_empty() {
        println!("ok");
    } else {
        println!(
            "{} error(s), {} warning(s)",
            result.errors.len(),
            result.warnings.len()
        );
    }
}

pub fn format_check_error(error: &CheckError) -> String {
    match error {
        CheckError::EmptyPassage { question } => {
            format!("{}: passage is empty", question)
        }
        CheckError::NoBlanks { question } => {
            format!("{}: passage has no blanks", question)
        }
        CheckError::DuplicateToken { question, blank } => {
            format!("{}: token ***{}*** appears more than once", question, blank)
        }
        CheckError::OrphanToken { question, blank } => {
            format!("{}: blank `{}` has no answer record (run `cz sync`)", question, blank)
        }
        CheckError::OrphanAnswer { question, blank } => {
            format!("{}: answer `{}` has no blank in the passage (run `cz sync`)", question, blank)
        }
        CheckError::IncompleteAnswer {
            question,
            blank,
            missing,
        } => {
            format!("{}: blank `{}` is missing {}", question, blank, missing.join(" and "))
        }
        CheckError::DuplicateExplanation {
            question,
            blanks,
            explain,
        } => {
            let ids: Vec<String> = blanks.iter().map(|b| format!("`{}`", b)).collect();
            format!(
                "{}: blanks {} share the explanation \"{}\"",
                question,
                ids.join(", "),
                explain
            )
        }
    }
}

pub fn format_check_warning(warning: &CheckWarning) -> String {
    match warning {
        CheckWarning::MissingMedia { question } => {
            format!("{}: listening question has no media reference", question)
        }
        CheckWarning::MissingCreatedDate { question } => {
            format!("{}: no created date", question)
        }
    }
}

pub fn print_search_hit(hit: &SearchHit) {
    let location = match &hit.blank {
        Some(blank) => format!("{}:{}:`{}`", hit.question_id, hit.field.as_str(), blank),
        None => format!("{}:{}", hit.question_id, hit.field.as_str()),
    };
    println!("{:<32} {}", location, hit.line);
}
