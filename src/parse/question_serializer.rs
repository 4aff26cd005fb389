use crate::model::blank::AnswerRecord;
use crate::model::question::Question;

/// Serialize a question to its canonical file form.
pub fn serialize_question(question: &Question) -> String {
    let mut lines: Vec<String> = Vec::new();

    if question.title.is_empty() {
        lines.push("#".to_string());
    } else {
        lines.push(format!("# {}", question.title));
    }
    lines.push(String::new());

    lines.push(format!("- kind: {}", question.kind.as_str()));
    if let Some(ref media) = question.media {
        lines.push(format!("- media: {}", media));
    }
    if let Some(ref created) = question.created {
        lines.push(format!("- created: {}", created));
    }
    lines.push(String::new());

    lines.push("## Passage".to_string());
    lines.push(String::new());
    if !question.passage.is_empty() {
        for line in question.passage.lines() {
            lines.push(line.to_string());
        }
        lines.push(String::new());
    }

    lines.push("## Answers".to_string());
    if !question.answers.is_empty() {
        lines.push(String::new());
        for answer in &question.answers {
            serialize_answer(answer, &mut lines);
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// The answer list line: `- \`xxxxxx\` answer text` (no trailing space when
/// the answer is still empty).
pub fn answer_line(answer: &AnswerRecord) -> String {
    if answer.answer.is_empty() {
        format!("- `{}`", answer.id)
    } else {
        format!("- `{}` {}", answer.id, answer.answer)
    }
}

fn serialize_answer(answer: &AnswerRecord, lines: &mut Vec<String>) {
    lines.push(answer_line(answer));

    if answer.explain.is_empty() {
        return;
    }
    if answer.explain.contains('\n') {
        lines.push("  - explain:".to_string());
        for line in answer.explain.lines() {
            if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("    {}", line));
            }
        }
    } else {
        lines.push(format!("  - explain: {}", answer.explain));
    }
}
