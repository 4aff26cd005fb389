use std::collections::HashSet;

use serde::Serialize;

use crate::model::blank::{AnswerRecord, BlankId};
use crate::parse::blank_ids;

/// What a synchronization pass changed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Ids that gained a fresh empty answer record.
    pub added: Vec<BlankId>,
    /// Ids whose record was pruned because no token remains.
    pub removed: Vec<BlankId>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Restore the passage/answer invariant: every blank token has exactly one
/// answer record, and no record outlives its token.
///
/// New records are appended in order of first appearance in the passage;
/// existing records keep their position and content. Records whose id no
/// longer appears are removed (orphan pruning). This is the explicit pass
/// the caller runs after every passage mutation; there is no implicit
/// subscription.
pub fn sync_answers(passage: &str, answers: &mut Vec<AnswerRecord>) -> SyncReport {
    let ids = blank_ids(passage);
    let present: HashSet<&BlankId> = ids.iter().collect();

    let mut report = SyncReport::default();

    answers.retain(|a| {
        let keep = present.contains(&a.id);
        if !keep {
            report.removed.push(a.id.clone());
        }
        keep
    });

    for id in ids {
        if !answers.iter().any(|a| a.id == id) {
            report.added.push(id.clone());
            answers.push(AnswerRecord::empty(id));
        }
    }

    report
}
