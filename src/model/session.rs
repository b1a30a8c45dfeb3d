//! Session types: a candidate list and its decision log.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{SubjectId, SwipeDecision};

/// A discovery session: the candidates to decide on, in queue order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub label: Option<String>,
    pub created_at: Timestamp,
    pub candidates: Vec<SubjectId>,
}

/// A single entry in a session's decision log, serialized as one line of JSONL.
///
/// Tagged enum so each line is self-describing when read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entry", rename_all = "camelCase")]
pub enum LogEntry {
    /// A decision was recorded.
    #[serde(rename_all = "camelCase")]
    Decision {
        subject_id: SubjectId,
        decision: SwipeDecision,
        decided_at: Timestamp,
    },

    /// The latest decision on a subject was rewound.
    #[serde(rename_all = "camelCase")]
    Undo {
        subject_id: SubjectId,
        undone_at: Timestamp,
    },
}

impl LogEntry {
    pub fn subject_id(&self) -> &SubjectId {
        match self {
            Self::Decision { subject_id, .. } | Self::Undo { subject_id, .. } => subject_id,
        }
    }
}
