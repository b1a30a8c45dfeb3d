//! Drag gesture state.

use serde::{Deserialize, Serialize};

use super::Direction;

/// Cumulative drag displacement as fractions of screen width and height.
///
/// Positive `dx` is rightwards, negative `dy` is upwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DragOffset {
    pub dx: f64,
    pub dy: f64,
}

impl DragOffset {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// True when either axis differs from `other` by more than `epsilon`.
    pub fn differs_from(self, other: Self, epsilon: f64) -> bool {
        (self.dx - other.dx).abs() > epsilon || (self.dy - other.dy).abs() > epsilon
    }
}

/// Release velocity in pixels per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub vx: f64,
    pub vy: f64,
}

impl Velocity {
    pub const ZERO: Self = Self { vx: 0.0, vy: 0.0 };

    pub fn new(vx: f64, vy: f64) -> Self {
        Self { vx, vy }
    }
}

/// The in-flight gesture. Owned by the engine.
///
/// `offset` is zero whenever `active` is false.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    offset: DragOffset,
    active: bool,
}

impl DragState {
    /// Starts a new gesture from zero.
    pub(crate) fn begin(&mut self) {
        self.offset = DragOffset::ZERO;
        self.active = true;
    }

    /// Accumulates a delta. Ignored while no gesture is active.
    pub(crate) fn accumulate(&mut self, dx: f64, dy: f64) -> bool {
        if !self.active {
            return false;
        }
        self.offset.dx += dx;
        self.offset.dy += dy;
        true
    }

    /// Returns to zero/inactive.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn offset(&self) -> DragOffset {
        self.offset
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// What the presentation layer sees: enough to drive cosmetic animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragSnapshot {
    pub offset: DragOffset,
    pub active: bool,
    pub provisional: Option<Direction>,
}
