//! Gesture classification: pure functions from drag state to decisions.
//!
//! Everything here depends only on its arguments, so the same gesture
//! always classifies the same way regardless of frame rate.

use crate::config::Thresholds;
use crate::model::{Direction, DragOffset, Velocity};

/// Whether the provisional direction should be re-derived at this offset.
pub fn is_activated(offset: DragOffset, t: &Thresholds) -> bool {
    offset.dx.abs() > t.activation || offset.dy.abs() > t.activation
}

/// The advisory direction for an offset. Checked in the order Up, Right, Left,
/// so an upward drag wins over a simultaneous horizontal one.
pub fn provisional_direction(offset: DragOffset, t: &Thresholds) -> Option<Direction> {
    if offset.dy < -t.provisional_up {
        Some(Direction::Up)
    } else if offset.dx > t.provisional_x {
        Some(Direction::Right)
    } else if offset.dx < -t.provisional_x {
        Some(Direction::Left)
    } else {
        None
    }
}

/// Whether a release at `offset` with `velocity` passes the commit bar.
/// All comparisons are strict.
pub fn should_commit(offset: DragOffset, velocity: Velocity, t: &Thresholds) -> bool {
    offset.dx.abs() > t.commit_x || offset.dy < -t.commit_up || is_fling(velocity, t)
}

fn is_fling(velocity: Velocity, t: &Thresholds) -> bool {
    velocity.vx.abs() > t.fling_velocity
}

/// The direction a release commits to, or `None` for a snap-back.
///
/// Uses the provisional direction when there is one. A fling that passed the
/// commit bar without a provisional direction takes its direction from `vx`.
pub fn classify_release(
    offset: DragOffset,
    provisional: Option<Direction>,
    velocity: Velocity,
    t: &Thresholds,
) -> Option<Direction> {
    if !should_commit(offset, velocity, t) {
        return None;
    }
    provisional.or_else(|| fling_direction(velocity, t))
}

fn fling_direction(velocity: Velocity, t: &Thresholds) -> Option<Direction> {
    if !is_fling(velocity, t) {
        None
    } else if velocity.vx > 0.0 {
        Some(Direction::Right)
    } else {
        Some(Direction::Left)
    }
}

/// An offset that clears both the provisional and commit thresholds for `direction`.
///
/// Button presses are fed through the release path at this offset.
pub fn synthetic_offset(direction: Direction, t: &Thresholds) -> DragOffset {
    let reach_x = t.provisional_x.max(t.commit_x) * 2.0;
    let reach_up = t.provisional_up.max(t.commit_up) * 2.0;
    match direction {
        Direction::Left => DragOffset::new(-reach_x, 0.0),
        Direction::Right => DragOffset::new(reach_x, 0.0),
        Direction::Up => DragOffset::new(0.0, -reach_up),
    }
}
