//! Core data model for the swipe engine.
//!
//! These types describe a single discovery session:
//! drag gestures, the decisions they commit to, the rewind history,
//! and the session records the CLI keeps on disk.

mod decision;
mod drag;
mod rewind;
mod session;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use decision::{Direction, HapticKind, SwipeDecision};
pub use drag::{DragOffset, DragSnapshot, DragState, Velocity};
pub use rewind::RewindEntry;
pub use session::{LogEntry, Session};

/// Opaque identifier of a candidate profile, as handed out by the discovery source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SubjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
