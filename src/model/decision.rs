//! Swipe directions and the decisions they map to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A swipe direction, either provisional (during a drag) or committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Swipe left: pass.
    Left,

    /// Swipe right: like.
    Right,

    /// Swipe up: super-like.
    Up,
}

impl Direction {
    /// The decision this direction commits to.
    pub fn decision(self) -> SwipeDecision {
        match self {
            Self::Left => SwipeDecision::Pass,
            Self::Right => SwipeDecision::Like,
            Self::Up => SwipeDecision::SuperLike,
        }
    }
}

/// The discrete outcome of a committed swipe.
///
/// Created once at commit time and handed to the discovery source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SwipeDecision {
    Pass,
    Like,
    SuperLike,
}

impl SwipeDecision {
    /// Haptic strength played when this decision commits.
    pub fn haptic(self) -> HapticKind {
        match self {
            Self::Pass | Self::Like => HapticKind::Medium,
            Self::SuperLike => HapticKind::Heavy,
        }
    }
}

impl From<Direction> for SwipeDecision {
    fn from(direction: Direction) -> Self {
        direction.decision()
    }
}

impl fmt::Display for SwipeDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Pass => "pass",
            Self::Like => "like",
            Self::SuperLike => "super-like",
        })
    }
}

/// Feedback strength sent to the haptic sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HapticKind {
    Light,
    Medium,
    Heavy,
}
