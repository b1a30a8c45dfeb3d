//! Rewind entries: the record of a committed decision.

use serde::{Deserialize, Serialize};

use super::{SubjectId, SwipeDecision};

/// A committed decision that can be rewound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewindEntry {
    pub decision: SwipeDecision,
    pub subject_id: SubjectId,
}
