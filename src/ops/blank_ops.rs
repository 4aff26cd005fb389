use std::collections::HashSet;

use rand::Rng;

use crate::model::blank::{AnswerRecord, BlankId};
use crate::parse::blank_ids;

/// Size of the blank id space: 6 hex digits.
pub const ID_SPACE: u32 = 1 << 24;

/// Random draws attempted before falling back to a linear sweep.
const RANDOM_TRIES: usize = 64;

/// Error type for blank operations
#[derive(Debug, thiserror::Error)]
pub enum BlankError {
    #[error("blank id space exhausted ({0} ids all in use)")]
    IdSpaceExhausted(u32),
    #[error("no answer record for blank `{0}`")]
    UnknownBlank(BlankId),
}

/// Ids currently in use: tokens in the passage plus ids in the answer list.
/// This is the set a fresh allocation must avoid.
pub fn in_use_ids(passage: &str, answers: &[AnswerRecord]) -> HashSet<BlankId> {
    let mut ids: HashSet<BlankId> = blank_ids(passage).into_iter().collect();
    ids.extend(answers.iter().map(|a| a.id.clone()));
    ids
}

/// Allocate a blank id not present in `in_use`.
///
/// Tries a handful of random draws first; if the set is dense enough that
/// all of them collide, sweeps the id space from a random start. Only a
/// fully used space fails.
pub fn allocate_blank_id(
    in_use: &HashSet<BlankId>,
    rng: &mut impl Rng,
) -> Result<BlankId, BlankError> {
    allocate_in_space(in_use, rng, ID_SPACE)
}

fn allocate_in_space(
    in_use: &HashSet<BlankId>,
    rng: &mut impl Rng,
    space: u32,
) -> Result<BlankId, BlankError> {
    for _ in 0..RANDOM_TRIES {
        let id = BlankId::from_index(rng.gen_range(0..space));
        if !in_use.contains(&id) {
            return Ok(id);
        }
    }

    let start = rng.gen_range(0..space);
    for offset in 0..space {
        let id = BlankId::from_index((start + offset) % space);
        if !in_use.contains(&id) {
            return Ok(id);
        }
    }

    Err(BlankError::IdSpaceExhausted(space))
}

/// Allocate a fresh blank, splice its token into the passage, and append an
/// empty answer record. Returns the new id.
///
/// `at` is a byte offset into the passage, clamped to the nearest char
/// boundary at or before it; with no position the token is appended,
/// space-separated from any trailing text.
pub fn insert_blank(
    passage: &mut String,
    at: Option<usize>,
    answers: &mut Vec<AnswerRecord>,
    rng: &mut impl Rng,
) -> Result<BlankId, BlankError> {
    let in_use = in_use_ids(passage, answers);
    let id = allocate_blank_id(&in_use, rng)?;
    let token = id.token();

    match at {
        Some(pos) => {
            let mut pos = pos.min(passage.len());
            while !passage.is_char_boundary(pos) {
                pos -= 1;
            }
            passage.insert_str(pos, &token);
        }
        None => {
            if !passage.is_empty() && !passage.ends_with([' ', '\n']) {
                passage.push(' ');
            }
            passage.push_str(&token);
        }
    }

    answers.push(AnswerRecord::empty(id.clone()));
    Ok(id)
}

/// Remove every occurrence of the blank's token and its answer record.
/// Safe to call with an id present in neither; returns whether anything
/// changed.
pub fn remove_blank(passage: &mut String, answers: &mut Vec<AnswerRecord>, id: &BlankId) -> bool {
    let token = id.token();
    let had_token = passage.contains(&token);
    if had_token {
        *passage = passage.replace(&token, "");
    }

    let before = answers.len();
    answers.retain(|a| &a.id != id);

    had_token || answers.len() != before
}

/// Set the answer text for a blank's record.
pub fn set_answer(
    answers: &mut [AnswerRecord],
    id: &BlankId,
    text: &str,
) -> Result<(), BlankError> {
    let record = answers
        .iter_mut()
        .find(|a| &a.id == id)
        .ok_or_else(|| BlankError::UnknownBlank(id.clone()))?;
    record.answer = text.to_string();
    Ok(())
}

/// Set the explanation for a blank's record.
pub fn set_explain(
    answers: &mut [AnswerRecord],
    id: &BlankId,
    text: &str,
) -> Result<(), BlankError> {
    let record = answers
        .iter_mut()
        .find(|a| &a.id == id)
        .ok_or_else(|| BlankError::UnknownBlank(id.clone()))?;
    record.explain = text.to_string();
    Ok(())
}
