//! The engine's boundary: services it calls but does not own.
//!
//! The engine commits its local state first and only then notifies these
//! collaborators. A collaborator failure never rolls the local state back;
//! it is reported to the caller and to the [`ReconciliationHook`].

use serde::Serialize;

use crate::model::{HapticKind, RewindEntry, SubjectId, SwipeDecision};

/// A collaborator refused or could not complete a call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    /// The backend answered and said no.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The backend could not be reached.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// A local backing store failed.
    #[error("storage: {0}")]
    Storage(String),
}

/// Supplies candidates and accepts decisions.
pub trait DiscoverySource {
    /// The next `count` undecided candidates in queue order.
    ///
    /// Does not consume them: calling twice without a decision in between
    /// returns the same candidates.
    fn load_next(&mut self, count: usize) -> Result<Vec<SubjectId>, CollaboratorError>;

    /// Records a decision, removing the subject from the queue.
    fn record_decision(
        &mut self,
        subject_id: &SubjectId,
        decision: SwipeDecision,
    ) -> Result<(), CollaboratorError>;

    /// Reverses the most recent decision on `subject_id`, returning it to the queue front.
    fn undo_last_decision(&mut self, subject_id: &SubjectId) -> Result<(), CollaboratorError>;
}

/// Answers whether the user may rewind. Asked on every undo, never cached.
pub trait EntitlementGate {
    fn has_rewind_entitlement(&self) -> bool;
}

/// Fire-and-forget haptic output.
pub trait FeedbackSink {
    fn notify_haptic(&mut self, kind: HapticKind);
}

/// Which remote call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SyncOp {
    Record,
    Undo,
}

/// A remote call that failed after the local state had already changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    pub op: SyncOp,
    pub entry: RewindEntry,
    pub error: CollaboratorError,
}

/// Decides what to do about a failed sync: retry, roll back, or just note it.
///
/// The engine itself does none of these.
pub trait ReconciliationHook {
    fn on_sync_failure(&mut self, failure: &SyncFailure);
}

/// Default hook: log and move on.
#[derive(Debug, Default)]
pub struct LogReconciliation;

impl ReconciliationHook for LogReconciliation {
    fn on_sync_failure(&mut self, failure: &SyncFailure) {
        tracing::warn!(
            op = ?failure.op,
            subject = %failure.entry.subject_id,
            decision = %failure.entry.decision,
            error = %failure.error,
            "sync failed, local state kept"
        );
    }
}

/// A gate with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct StaticEntitlement(pub bool);

impl EntitlementGate for StaticEntitlement {
    fn has_rewind_entitlement(&self) -> bool {
        self.0
    }
}

/// Discards haptics.
#[derive(Debug, Default)]
pub struct NoFeedback;

impl FeedbackSink for NoFeedback {
    fn notify_haptic(&mut self, _kind: HapticKind) {}
}

/// Emits haptics as trace events.
#[derive(Debug, Default)]
pub struct LogFeedback;

impl FeedbackSink for LogFeedback {
    fn notify_haptic(&mut self, kind: HapticKind) {
        tracing::info!(?kind, "haptic");
    }
}
