use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::bank::Bank;
use crate::model::blank::BlankId;
use crate::model::config::BankConfig;
use crate::model::question::{Question, QuestionKind};
use crate::parse::{blank_ids, duplicate_ids};

/// Structured result from `cz check`, suitable for --json output.
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    pub valid: bool,
    pub errors: Vec<CheckError>,
    pub warnings: Vec<CheckWarning>,
}

/// A validation error (blocks the question from being used).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum CheckError {
    /// The passage has no content at all
    #[serde(rename = "empty_passage")]
    EmptyPassage { question: String },
    /// The passage has content but no blank tokens (policy-gated)
    #[serde(rename = "no_blanks")]
    NoBlanks { question: String },
    /// The same token appears more than once in the passage
    #[serde(rename = "duplicate_token")]
    DuplicateToken { question: String, blank: BlankId },
    /// A token exists with no matching answer record
    #[serde(rename = "orphan_token")]
    OrphanToken { question: String, blank: BlankId },
    /// An answer record's id has no matching token
    #[serde(rename = "orphan_answer")]
    OrphanAnswer { question: String, blank: BlankId },
    /// An answer record is missing its answer and/or explanation
    #[serde(rename = "incomplete_answer")]
    IncompleteAnswer {
        question: String,
        blank: BlankId,
        missing: Vec<String>,
    },
    /// Two or more answer records share the same trimmed explanation
    #[serde(rename = "duplicate_explanation")]
    DuplicateExplanation {
        question: String,
        blanks: Vec<BlankId>,
        explain: String,
    },
}

/// A validation warning (non-critical issue).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum CheckWarning {
    /// Listening question without a media reference
    #[serde(rename = "missing_media")]
    MissingMedia { question: String },
    /// Question has no `created:` date
    #[serde(rename = "missing_created_date")]
    MissingCreatedDate { question: String },
}

// ---------------------------------------------------------------------------
// Main check entry points
// ---------------------------------------------------------------------------

/// Validate every question in the bank.
pub fn check_bank(bank: &Bank) -> CheckResult {
    let mut result = CheckResult::default();
    for (question_id, question) in &bank.questions {
        check_into(question_id, question, &bank.config, &mut result);
    }
    result.valid = result.errors.is_empty();
    result
}

/// Validate a single question and return structured results.
///
/// This is a read-only operation; it does not modify the question.
///
/// Checks performed:
/// 1. The passage has content
/// 2. At least one blank token exists (when `policy.require_blanks`)
/// 3. No token appears twice
/// 4. Token set and answer-record set agree in both directions
/// 5. Every answer record carries an answer and an explanation
/// 6. Trimmed explanations are pairwise distinct
/// 7. Warnings for missing media (listening) and missing created date
pub fn check_question(question_id: &str, question: &Question, config: &BankConfig) -> CheckResult {
    let mut result = CheckResult::default();
    check_into(question_id, question, config, &mut result);
    result.valid = result.errors.is_empty();
    result
}

fn check_into(
    question_id: &str,
    question: &Question,
    config: &BankConfig,
    result: &mut CheckResult,
) {
    let qid = || question_id.to_string();

    if question.passage.trim().is_empty() {
        result.errors.push(CheckError::EmptyPassage { question: qid() });
    }

    let ids = blank_ids(&question.passage);

    if ids.is_empty() && !question.passage.trim().is_empty() && config.policy.require_blanks {
        result.errors.push(CheckError::NoBlanks { question: qid() });
    }

    for blank in duplicate_ids(&question.passage) {
        result.errors.push(CheckError::DuplicateToken {
            question: qid(),
            blank,
        });
    }

    // Set equality between tokens and records, both directions
    let token_set: HashSet<&BlankId> = ids.iter().collect();
    let record_set: HashSet<&BlankId> = question.answers.iter().map(|a| &a.id).collect();

    for blank in &ids {
        if !record_set.contains(blank) {
            result.errors.push(CheckError::OrphanToken {
                question: qid(),
                blank: blank.clone(),
            });
        }
    }
    for answer in &question.answers {
        if !token_set.contains(&answer.id) {
            result.errors.push(CheckError::OrphanAnswer {
                question: qid(),
                blank: answer.id.clone(),
            });
        }
    }

    // Completeness
    for answer in &question.answers {
        let mut missing = Vec::new();
        if answer.answer.trim().is_empty() {
            missing.push("answer".to_string());
        }
        if answer.explain.trim().is_empty() {
            missing.push("explain".to_string());
        }
        if !missing.is_empty() {
            result.errors.push(CheckError::IncompleteAnswer {
                question: qid(),
                blank: answer.id.clone(),
                missing,
            });
        }
    }

    // Pairwise-distinct explanations (trimmed, non-empty)
    let mut by_explain: IndexMap<&str, Vec<BlankId>> = IndexMap::new();
    for answer in &question.answers {
        let trimmed = answer.explain.trim();
        if !trimmed.is_empty() {
            by_explain.entry(trimmed).or_default().push(answer.id.clone());
        }
    }
    for (explain, blanks) in by_explain {
        if blanks.len() > 1 {
            result.errors.push(CheckError::DuplicateExplanation {
                question: qid(),
                blanks,
                explain: explain.to_string(),
            });
        }
    }

    // Warnings
    if question.kind == QuestionKind::Listening && question.media.is_none() {
        result.warnings.push(CheckWarning::MissingMedia { question: qid() });
    }
    if question.created.is_none() {
        result
            .warnings
            .push(CheckWarning::MissingCreatedDate { question: qid() });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::blank::AnswerRecord;

    fn id(s: &str) -> BlankId {
        BlankId::parse(s).unwrap()
    }

    fn record(id_str: &str, answer: &str, explain: &str) -> AnswerRecord {
        AnswerRecord {
            id: id(id_str),
            answer: answer.to_string(),
            explain: explain.to_string(),
        }
    }

    fn make_config() -> BankConfig {
        BankConfig::new("test".to_string())
    }

    fn make_question(passage: &str, answers: Vec<AnswerRecord>) -> Question {
        let mut q = Question::new("Test".to_string(), QuestionKind::Reading);
        q.created = Some("2025-05-01".to_string());
        q.passage = passage.to_string();
        q.answers = answers;
        q
    }

    // --- Passage-level checks ---

    #[test]
    fn test_check_empty_passage() {
        let q = make_question("   \n  ", vec![]);
        let result = check_question("q1", &q, &make_config());
        assert!(!result.valid);
        assert!(matches!(&result.errors[0], CheckError::EmptyPassage { .. }));
    }

    #[test]
    fn test_check_no_blanks_when_required() {
        let q = make_question("a passage without gaps", vec![]);
        let result = check_question("q1", &q, &make_config());
        assert!(!result.valid);
        assert!(
            result
                .errors
                .iter()
                .any(|e| matches!(e, CheckError::NoBlanks { .. }))
        );
    }

    #[test]
    fn test_check_no_blanks_allowed_by_policy() {
        let mut config = make_config();
        config.policy.require_blanks = false;
        let q = make_question("a passage without gaps", vec![]);
        let result = check_question("q1", &q, &config);
        assert!(result.valid);
    }

    #[test]
    fn test_check_duplicate_token() {
        let q = make_question(
            "***111111*** and ***111111***",
            vec![record("111111", "a", "b")],
        );
        let result = check_question("q1", &q, &make_config());
        assert!(result.errors.iter().any(
            |e| matches!(e, CheckError::DuplicateToken { blank, .. } if blank == &id("111111"))
        ));
    }

    // --- Set equality ---

    #[test]
    fn test_check_orphan_token() {
        let q = make_question("***111111***", vec![]);
        let result = check_question("q1", &q, &make_config());
        assert!(result.errors.iter().any(
            |e| matches!(e, CheckError::OrphanToken { blank, .. } if blank == &id("111111"))
        ));
    }

    #[test]
    fn test_check_orphan_answer() {
        let q = make_question("***111111***", vec![
            record("111111", "a", "b"),
            record("222222", "c", "d"),
        ]);
        let result = check_question("q1", &q, &make_config());
        assert!(result.errors.iter().any(
            |e| matches!(e, CheckError::OrphanAnswer { blank, .. } if blank == &id("222222"))
        ));
    }

    // --- Answer completeness ---

    #[test]
    fn test_check_incomplete_answer() {
        let q = make_question("***111111*** ***222222***", vec![
            record("111111", "filled", ""),
            record("222222", "", ""),
        ]);
        let result = check_question("q1", &q, &make_config());

        let incomplete: Vec<_> = result
            .errors
            .iter()
            .filter_map(|e| match e {
                CheckError::IncompleteAnswer { blank, missing, .. } => {
                    Some((blank.clone(), missing.clone()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(incomplete.len(), 2);
        assert_eq!(incomplete[0], (id("111111"), vec!["explain".to_string()]));
        assert_eq!(
            incomplete[1],
            (
                id("222222"),
                vec!["answer".to_string(), "explain".to_string()]
            )
        );
    }

    // --- Duplicate explanations ---

    #[test]
    fn test_check_duplicate_explanation() {
        let q = make_question("***111111*** ***222222***", vec![
            record("111111", "a", "Because it's correct"),
            record("222222", "b", "  Because it's correct  "),
        ]);
        let result = check_question("q1", &q, &make_config());

        let dup = result
            .errors
            .iter()
            .find_map(|e| match e {
                CheckError::DuplicateExplanation {
                    blanks, explain, ..
                } => Some((blanks.clone(), explain.clone())),
                _ => None,
            })
            .expect("expected a duplicate_explanation error");
        assert_eq!(dup.0, vec![id("111111"), id("222222")]);
        assert_eq!(dup.1, "Because it's correct");
    }

    #[test]
    fn test_check_distinct_explanations_pass() {
        let q = make_question("***111111*** ***222222***", vec![
            record("111111", "a", "first reason"),
            record("222222", "b", "second reason"),
        ]);
        let result = check_question("q1", &q, &make_config());
        assert!(result.valid);
    }

    // --- Warnings ---

    #[test]
    fn test_warn_listening_without_media() {
        let mut q = make_question("***111111***", vec![record("111111", "a", "b")]);
        q.kind = QuestionKind::Listening;
        let result = check_question("q1", &q, &make_config());
        assert!(result.valid);
        assert!(
            result
                .warnings
                .iter()
                .any(|w| matches!(w, CheckWarning::MissingMedia { .. }))
        );
    }

    #[test]
    fn test_warn_missing_created_date() {
        let mut q = make_question("***111111***", vec![record("111111", "a", "b")]);
        q.created = None;
        let result = check_question("q1", &q, &make_config());
        assert!(
            result
                .warnings
                .iter()
                .any(|w| matches!(w, CheckWarning::MissingCreatedDate { .. }))
        );
    }

    // --- Clean question ---

    #[test]
    fn test_check_clean_question() {
        let q = make_question("I like ***111111*** and ***222222***.", vec![
            record("111111", "apples", "a pome fruit"),
            record("222222", "pears", "also a pome fruit, but different"),
        ]);
        let result = check_question("q1", &q, &make_config());
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    // --- JSON serialization ---

    #[test]
    fn test_check_result_serializes_to_json() {
        let q = make_question("***111111***", vec![]);
        let result = check_question("q1", &q, &make_config());
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("orphan_token"));
        assert!(json.contains("111111"));
    }
}
