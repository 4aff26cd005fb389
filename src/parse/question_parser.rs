use crate::model::blank::{AnswerRecord, BlankId};
use crate::model::question::{Question, QuestionKind};

/// Parse a question file.
///
/// Parsing is lenient: unknown header keys, malformed answer lines, and
/// unrecognized sections are skipped rather than rejected. Serialization
/// (`serialize_question`) emits the canonical form; canonical files
/// round-trip byte-for-byte.
pub fn parse_question(source: &str) -> Question {
    let lines: Vec<&str> = source.lines().collect();
    let mut question = Question::new(String::new(), QuestionKind::Reading);

    let mut i = 0;

    // Header: title line plus `- key: value` metadata, up to the first `## `
    while i < lines.len() && !lines[i].starts_with("## ") {
        let line = lines[i];
        if let Some(rest) = line.strip_prefix("# ") {
            if question.title.is_empty() {
                question.title = rest.trim_end().to_string();
            }
        } else if let Some(rest) = line.strip_prefix("- ")
            && let Some((key, value)) = rest.split_once(':')
        {
            let value = value.trim();
            match key.trim() {
                "kind" => {
                    if let Some(kind) = QuestionKind::from_str(value) {
                        question.kind = kind;
                    }
                }
                "media" => question.media = Some(value.to_string()),
                "created" => question.created = Some(value.to_string()),
                _ => {}
            }
        }
        i += 1;
    }

    // Sections
    while i < lines.len() {
        let heading = lines[i].strip_prefix("## ").map(str::trim);
        match heading {
            Some("Passage") => {
                let (passage, next) = parse_passage(&lines, i + 1);
                question.passage = passage;
                i = next;
            }
            Some("Answers") => {
                let (answers, next) = parse_answers(&lines, i + 1);
                question.answers = answers;
                i = next;
            }
            _ => i += 1,
        }
    }

    question
}

/// Collect passage lines until the next section heading, trimming
/// surrounding blank lines but preserving interior ones.
fn parse_passage(lines: &[&str], start: usize) -> (String, usize) {
    let mut idx = start;
    let mut collected: Vec<&str> = Vec::new();
    while idx < lines.len() && !lines[idx].starts_with("## ") {
        collected.push(lines[idx]);
        idx += 1;
    }

    while collected.first().is_some_and(|l| l.trim().is_empty()) {
        collected.remove(0);
    }
    while collected.last().is_some_and(|l| l.trim().is_empty()) {
        collected.pop();
    }

    (collected.join("\n"), idx)
}

/// Parse answer list lines: `- \`xxxxxx\` answer text` with `explain:`
/// metadata at two-space indent (single-line or block form).
fn parse_answers(lines: &[&str], start: usize) -> (Vec<AnswerRecord>, usize) {
    let mut answers = Vec::new();
    let mut idx = start;

    while idx < lines.len() && !lines[idx].starts_with("## ") {
        let line = lines[idx];

        let Some((id, answer_text)) = parse_answer_line(line) else {
            idx += 1;
            continue;
        };

        let mut record = AnswerRecord::empty(id);
        record.answer = answer_text;
        idx += 1;

        // Metadata lines belonging to this answer
        while idx < lines.len() {
            let meta = lines[idx];
            if let Some(rest) = meta.strip_prefix("  - ")
                && let Some((key, value)) = rest.split_once(':')
            {
                if key.trim() == "explain" {
                    let value = value.trim();
                    if value.is_empty() {
                        let (block, next) = parse_explain_block(lines, idx + 1);
                        record.explain = block;
                        idx = next;
                    } else {
                        record.explain = value.to_string();
                        idx += 1;
                    }
                } else {
                    // Unknown key, skip
                    idx += 1;
                }
                continue;
            }

            // Blank line: keep scanning if more metadata follows
            if meta.trim().is_empty() {
                let mut peek = idx + 1;
                while peek < lines.len() && lines[peek].trim().is_empty() {
                    peek += 1;
                }
                if peek < lines.len() && lines[peek].starts_with("  - ") {
                    idx += 1;
                    continue;
                }
            }
            break;
        }

        answers.push(record);
    }

    (answers, idx)
}

/// Parse `- \`xxxxxx\` answer text`. Returns None for anything else,
/// including ids that are not 6 lowercase hex digits.
fn parse_answer_line(line: &str) -> Option<(BlankId, String)> {
    let rest = line.strip_prefix("- `")?;
    let tick = rest.find('`')?;
    let id = BlankId::parse(&rest[..tick])?;
    let after = &rest[tick + 1..];
    let answer = after.strip_prefix(' ').unwrap_or(after);
    Some((id, answer.to_string()))
}

/// Collect a block-form explanation: lines at four-space indent following
/// a bare `- explain:`. Trailing blank lines are dropped.
fn parse_explain_block(lines: &[&str], start: usize) -> (String, usize) {
    let mut block: Vec<String> = Vec::new();
    let mut idx = start;

    while idx < lines.len() {
        let line = lines[idx];
        if line.trim().is_empty() {
            // Included only if more block content follows
            let more = lines[idx + 1..]
                .iter()
                .take_while(|l| l.trim().is_empty() || l.starts_with("    "))
                .any(|l| l.starts_with("    "));
            if more {
                block.push(String::new());
                idx += 1;
                continue;
            }
            break;
        }
        let Some(stripped) = line.strip_prefix("    ") else {
            break;
        };
        block.push(stripped.to_string());
        idx += 1;
    }

    while block.last().is_some_and(|l| l.is_empty()) {
        block.pop();
    }

    (block.join("\n"), idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> BlankId {
        BlankId::parse(s).unwrap()
    }

    #[test]
    fn test_parse_minimal_question() {
        let q = parse_question(
            "\
# Capitals

- kind: reading

## Passage

The capital of France is ***a1b2c3***.

## Answers

- `a1b2c3` Paris
  - explain: France's capital on the Seine
",
        );
        assert_eq!(q.title, "Capitals");
        assert_eq!(q.kind, QuestionKind::Reading);
        assert_eq!(q.passage, "The capital of France is ***a1b2c3***.");
        assert_eq!(q.answers.len(), 1);
        assert_eq!(q.answers[0].id, id("a1b2c3"));
        assert_eq!(q.answers[0].answer, "Paris");
        assert_eq!(q.answers[0].explain, "France's capital on the Seine");
    }

    #[test]
    fn test_parse_listening_header() {
        let q = parse_question(
            "\
# Dialogue 3

- kind: listening
- media: audio/dialogue-3.mp3
- created: 2025-05-01

## Passage

## Answers
",
        );
        assert_eq!(q.kind, QuestionKind::Listening);
        assert_eq!(q.media.as_deref(), Some("audio/dialogue-3.mp3"));
        assert_eq!(q.created.as_deref(), Some("2025-05-01"));
        assert!(q.passage.is_empty());
        assert!(q.answers.is_empty());
    }

    #[test]
    fn test_parse_multiline_passage_preserves_interior_blanks() {
        let q = parse_question(
            "\
# T

- kind: reading

## Passage

First paragraph with ***111111***.

Second paragraph.

## Answers

- `111111` x
  - explain: y
",
        );
        assert_eq!(
            q.passage,
            "First paragraph with ***111111***.\n\nSecond paragraph."
        );
    }

    #[test]
    fn test_parse_answer_without_text() {
        let q = parse_question(
            "\
# T

## Passage

***111111***

## Answers

- `111111`
",
        );
        assert_eq!(q.answers.len(), 1);
        assert!(q.answers[0].answer.is_empty());
        assert!(q.answers[0].explain.is_empty());
    }

    #[test]
    fn test_parse_block_explain() {
        let q = parse_question(
            "\
# T

## Passage

***111111***

## Answers

- `111111` answer
  - explain:
    First line of the rationale.

    Second paragraph of the rationale.
",
        );
        assert_eq!(
            q.answers[0].explain,
            "First line of the rationale.\n\nSecond paragraph of the rationale."
        );
    }

    #[test]
    fn test_malformed_answer_lines_skipped() {
        let q = parse_question(
            "\
# T

## Passage

***111111***

## Answers

- `111111` good
- `UPPER1` bad id
- no backticks at all
- `22` short id
",
        );
        assert_eq!(q.answers.len(), 1);
        assert_eq!(q.answers[0].answer, "good");
    }

    #[test]
    fn test_unknown_header_keys_ignored() {
        let q = parse_question(
            "\
# T

- kind: reading
- difficulty: hard

## Passage

x

## Answers
",
        );
        assert_eq!(q.kind, QuestionKind::Reading);
        assert_eq!(q.passage, "x");
    }

    #[test]
    fn test_missing_sections_yield_empty_question() {
        let q = parse_question("# Just a title\n");
        assert_eq!(q.title, "Just a title");
        assert!(q.passage.is_empty());
        assert!(q.answers.is_empty());
    }
}
