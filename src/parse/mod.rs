pub mod question_parser;
pub mod question_serializer;
pub mod segment;

pub use question_parser::parse_question;
pub use question_serializer::serialize_question;
pub use segment::{Segment, blank_ids, duplicate_ids, segment_passage};
