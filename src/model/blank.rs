use std::fmt;

use serde::{Deserialize, Serialize};

/// The number of hex digits in a blank identifier.
pub const ID_LEN: usize = 6;

/// A blank identifier: exactly 6 lowercase hex digits.
///
/// The id doubles as the join key between a passage token and its answer
/// record, and as an RGB color for display (two hex digits per channel).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlankId(String);

impl BlankId {
    /// Parse a blank id from its 6-hex-digit payload.
    /// Returns None unless the input is exactly 6 lowercase hex digits.
    pub fn parse(s: &str) -> Option<BlankId> {
        if s.len() == ID_LEN && s.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase())
        {
            Some(BlankId(s.to_string()))
        } else {
            None
        }
    }

    /// Build a blank id from a position in the 24-bit id space.
    /// Only the low 24 bits are used.
    pub fn from_index(n: u32) -> BlankId {
        BlankId(format!("{:06x}", n & 0xff_ffff))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The token form embedded in passages: `***xxxxxx***`.
    pub fn token(&self) -> String {
        format!("***{}***", self.0)
    }

    /// Interpret the id as an RGB color, two hex digits per channel.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&self.0[range], 16).unwrap_or(0)
        };
        (channel(0..2), channel(2..4), channel(4..6))
    }
}

impl fmt::Display for BlankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The answer for one blank: what fills the gap, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub id: BlankId,
    pub answer: String,
    pub explain: String,
}

impl AnswerRecord {
    /// A fresh record with empty answer and explanation.
    pub fn empty(id: BlankId) -> Self {
        AnswerRecord {
            id,
            answer: String::new(),
            explain: String::new(),
        }
    }

    /// True when both the answer and the explanation carry content.
    pub fn is_complete(&self) -> bool {
        !self.answer.trim().is_empty() && !self.explain.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        let id = BlankId::parse("a1b2c3").unwrap();
        assert_eq!(id.as_str(), "a1b2c3");
        assert_eq!(id.token(), "***a1b2c3***");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(BlankId::parse("").is_none());
        assert!(BlankId::parse("a1b2c").is_none()); // too short
        assert!(BlankId::parse("a1b2c3d").is_none()); // too long
        assert!(BlankId::parse("A1B2C3").is_none()); // uppercase
        assert!(BlankId::parse("g1b2c3").is_none()); // not hex
        assert!(BlankId::parse("a1 2c3").is_none());
    }

    #[test]
    fn test_from_index() {
        assert_eq!(BlankId::from_index(0).as_str(), "000000");
        assert_eq!(BlankId::from_index(0xff_ffff).as_str(), "ffffff");
        assert_eq!(BlankId::from_index(0x00_a1b2).as_str(), "00a1b2");
        // High bits are masked off
        assert_eq!(BlankId::from_index(0xff00_0001).as_str(), "000001");
    }

    #[test]
    fn test_rgb_decode() {
        assert_eq!(BlankId::parse("ff0080").unwrap().rgb(), (0xff, 0x00, 0x80));
        assert_eq!(BlankId::parse("000000").unwrap().rgb(), (0, 0, 0));
    }

    #[test]
    fn test_serde_as_plain_string() {
        let id = BlankId::parse("a1b2c3").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"a1b2c3\"");
        let back: BlankId = serde_json::from_str("\"a1b2c3\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_record_completeness() {
        let id = BlankId::parse("a1b2c3").unwrap();
        let mut rec = AnswerRecord::empty(id);
        assert!(!rec.is_complete());
        rec.answer = "Paris".to_string();
        assert!(!rec.is_complete());
        rec.explain = "capital of France".to_string();
        assert!(rec.is_complete());
        rec.answer = "   ".to_string();
        assert!(!rec.is_complete());
    }
}
