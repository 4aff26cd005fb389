use std::sync::OnceLock;

use regex::Regex;

use crate::model::blank::BlankId;

/// The token grammar, bit-exact: `***` + 6 lowercase hex digits + `***`.
/// Any consumer parsing stored passages must use exactly this pattern.
pub const TOKEN_PATTERN: &str = r"\*\*\*([0-9a-f]{6})\*\*\*";

fn token_re() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern compiles"))
}

/// One piece of a segmented passage: literal text, or a blank marker.
///
/// Text segments are always rendered as plain text, never interpreted as
/// markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Blank(BlankId),
}

/// Split a passage into an alternation of literal text and blank markers.
/// Empty text segments are not emitted; a tokenless passage yields a single
/// text segment (or nothing, for an empty passage).
pub fn segment_passage(passage: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in token_re().captures_iter(passage) {
        let Some(m) = caps.get(0) else { continue };
        if m.start() > last {
            segments.push(Segment::Text(passage[last..m.start()].to_string()));
        }
        // The capture is [0-9a-f]{6} by construction
        if let Some(id) = BlankId::parse(&caps[1]) {
            segments.push(Segment::Blank(id));
        }
        last = m.end();
    }

    if last < passage.len() {
        segments.push(Segment::Text(passage[last..].to_string()));
    }

    segments
}

/// All blank ids in the passage, ordered by first appearance, de-duplicated.
pub fn blank_ids(passage: &str) -> Vec<BlankId> {
    let mut ids = Vec::new();
    for caps in token_re().captures_iter(passage) {
        if let Some(id) = BlankId::parse(&caps[1])
            && !ids.contains(&id)
        {
            ids.push(id);
        }
    }
    ids
}

/// Blank ids whose token appears more than once in the passage.
pub fn duplicate_ids(passage: &str) -> Vec<BlankId> {
    let mut seen = Vec::new();
    let mut dups = Vec::new();
    for caps in token_re().captures_iter(passage) {
        if let Some(id) = BlankId::parse(&caps[1]) {
            if seen.contains(&id) {
                if !dups.contains(&id) {
                    dups.push(id);
                }
            } else {
                seen.push(id);
            }
        }
    }
    dups
}
