//! The swipe interaction engine.
//!
//! Turns a continuous drag (or a button press) into a discrete decision,
//! keeps a bounded rewind history, and notifies the collaborators.
//!
//! ```text
//! Idle --start--> Dragging --update--> Dragging
//! Dragging --end, commit--> Committing --> Idle
//! Dragging --end, no commit--> SnapBack --> Idle
//! Idle --button--> Committing --> Idle
//! ```
//!
//! Local state always changes first. Remote calls happen afterwards and their
//! failures are reported, never rolled back.

pub mod classifier;
mod history;

use std::collections::{HashSet, VecDeque};

use crate::collaborator::{
    CollaboratorError, DiscoverySource, EntitlementGate, FeedbackSink, LogReconciliation,
    ReconciliationHook, SyncFailure, SyncOp,
};
use crate::config::{Config, Thresholds};
use crate::model::{
    Direction, DragOffset, DragSnapshot, DragState, HapticKind, RewindEntry, SubjectId,
    SwipeDecision, Velocity,
};

pub use history::RewindHistory;

/// Why the engine refused a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwipeError {
    #[error("rewind requires entitlement")]
    DeniedNotEntitled,

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("no candidates left")]
    DeckEmpty,

    #[error("failed to load candidates: {0}")]
    Source(#[from] CollaboratorError),
}

/// How a gesture or button press ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Release {
    Committed(Commit),
    SnappedBack,
}

impl Release {
    pub fn commit(&self) -> Option<&Commit> {
        match self {
            Self::Committed(commit) => Some(commit),
            Self::SnappedBack => None,
        }
    }
}

/// A committed decision and whether the discovery source accepted it.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    pub decision: SwipeDecision,
    pub entry: RewindEntry,
    pub sync: SyncStatus,
}

/// A rewound decision and whether the discovery source accepted the undo.
#[derive(Debug, Clone, PartialEq)]
pub struct Undone {
    pub entry: RewindEntry,
    pub sync: SyncStatus,
}

/// Outcome of the remote half of a commit or undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Synced,
    Failed(CollaboratorError),
}

impl SyncStatus {
    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced)
    }
}

/// One discovery session's worth of swipe state.
pub struct SwipeEngine<S, G, F> {
    thresholds: Thresholds,
    prefetch: usize,

    drag: DragState,
    provisional: Option<Direction>,
    last_notified: DragOffset,

    history: RewindHistory,
    deck: VecDeque<SubjectId>,
    unsynced: HashSet<SubjectId>,

    source: S,
    gate: G,
    feedback: F,
    reconcile: Box<dyn ReconciliationHook>,
}

impl<S, G, F> SwipeEngine<S, G, F>
where
    S: DiscoverySource,
    G: EntitlementGate,
    F: FeedbackSink,
{
    /// Creates an idle engine with an empty history and deck.
    pub fn new(config: &Config, source: S, gate: G, feedback: F) -> Self {
        Self {
            thresholds: config.thresholds,
            prefetch: config.prefetch.max(1),
            drag: DragState::default(),
            provisional: None,
            last_notified: DragOffset::ZERO,
            history: RewindHistory::new(config.history_capacity),
            deck: VecDeque::new(),
            unsynced: HashSet::new(),
            source,
            gate,
            feedback,
            reconcile: Box::new(LogReconciliation),
        }
    }

    /// Replaces the hook called when a remote call fails.
    #[must_use]
    pub fn with_reconciliation(mut self, hook: impl ReconciliationHook + 'static) -> Self {
        self.reconcile = Box::new(hook);
        self
    }

    // ── Gestures ──

    /// Begins a gesture. Callers start at most one gesture at a time; an
    /// overlapping start discards the previous gesture.
    pub fn on_drag_start(&mut self) {
        if self.drag.is_active() {
            tracing::warn!(offset = ?self.drag.offset(), "gesture restarted while active");
        }
        self.reset_drag();
        self.drag.begin();
    }

    /// Accumulates a drag delta (screen fractions).
    ///
    /// Returns a snapshot when the offset has moved far enough from the last
    /// notified one to be worth redrawing. Ignored when no gesture is active.
    pub fn on_drag_update(&mut self, dx: f64, dy: f64) -> Option<DragSnapshot> {
        if !self.drag.accumulate(dx, dy) {
            tracing::trace!(dx, dy, "update without active gesture");
            return None;
        }

        let offset = self.drag.offset();
        if classifier::is_activated(offset, &self.thresholds) {
            let provisional = classifier::provisional_direction(offset, &self.thresholds);
            if provisional != self.provisional {
                if provisional.is_some() {
                    self.feedback.notify_haptic(HapticKind::Light);
                }
                self.provisional = provisional;
            }
        }

        if offset.differs_from(self.last_notified, self.thresholds.notify_epsilon) {
            self.last_notified = offset;
            Some(self.snapshot())
        } else {
            None
        }
    }

    /// Ends the gesture with the given release velocity (pixels per second).
    ///
    /// Commits when the release passes the commit bar; snaps back otherwise.
    /// Either way the drag is reset.
    pub fn on_drag_end(&mut self, velocity: Velocity) -> Result<Release, SwipeError> {
        if !self.drag.is_active() {
            return Ok(Release::SnappedBack);
        }
        let direction = classifier::classify_release(
            self.drag.offset(),
            self.provisional,
            velocity,
            &self.thresholds,
        );
        self.release(direction)
    }

    /// Button press: runs a synthetic, commit-satisfying release for `direction`.
    pub fn dispatch(&mut self, direction: Direction) -> Result<Release, SwipeError> {
        if self.drag.is_active() {
            tracing::warn!("button pressed mid-gesture, discarding drag");
        }
        let offset = classifier::synthetic_offset(direction, &self.thresholds);
        let provisional = classifier::provisional_direction(offset, &self.thresholds);
        let direction =
            classifier::classify_release(offset, provisional, Velocity::ZERO, &self.thresholds);
        self.release(direction)
    }

    fn release(&mut self, direction: Option<Direction>) -> Result<Release, SwipeError> {
        let Some(direction) = direction else {
            tracing::debug!(offset = ?self.drag.offset(), "snap back");
            self.reset_drag();
            return Ok(Release::SnappedBack);
        };
        self.commit(direction).map(Release::Committed)
    }

    fn commit(&mut self, direction: Direction) -> Result<Commit, SwipeError> {
        self.reset_drag();

        if self.deck.is_empty() {
            self.load_next(self.prefetch)?;
        }
        let subject_id = self.deck.pop_front().ok_or(SwipeError::DeckEmpty)?;

        let decision = direction.decision();
        let entry = RewindEntry {
            decision,
            subject_id,
        };
        if let Some(evicted) = self.history.push(entry.clone()) {
            tracing::trace!(subject = %evicted.subject_id, "rewind history full, evicted oldest");
        }
        self.feedback.notify_haptic(decision.haptic());
        tracing::debug!(subject = %entry.subject_id, %decision, "committed");

        let result = self.source.record_decision(&entry.subject_id, decision);
        let sync = self.settle(SyncOp::Record, &entry, result);
        if !sync.is_synced() {
            self.unsynced.insert(entry.subject_id.clone());
        }

        Ok(Commit {
            decision,
            entry,
            sync,
        })
    }

    // ── Rewind ──

    /// Rewinds the most recent decision.
    ///
    /// Entitlement is asked fresh on every call. A denied or empty undo
    /// changes nothing. After a rewind the deck is reloaded so the rewound
    /// subject, re-queued by the source, comes up next.
    pub fn undo(&mut self) -> Result<Undone, SwipeError> {
        if self.history.is_empty() {
            return Err(SwipeError::NothingToUndo);
        }
        if !self.gate.has_rewind_entitlement() {
            tracing::debug!("rewind denied");
            return Err(SwipeError::DeniedNotEntitled);
        }
        let entry = self.history.pop().ok_or(SwipeError::NothingToUndo)?;
        self.feedback.notify_haptic(HapticKind::Light);
        tracing::debug!(subject = %entry.subject_id, decision = %entry.decision, "rewound");

        self.unsynced.remove(&entry.subject_id);
        let result = self.source.undo_last_decision(&entry.subject_id);
        let sync = self.settle(SyncOp::Undo, &entry, result);

        self.deck.clear();
        if let Err(e) = self.load_next(self.prefetch) {
            tracing::warn!(error = %e, "failed to reload deck after rewind");
        }

        Ok(Undone { entry, sync })
    }

    // ── Deck ──

    /// Replaces the local deck with the source's next `count` candidates.
    /// Returns how many arrived.
    ///
    /// Subjects decided locally whose decision never reached the source are
    /// left out, so a failed sync never serves the same subject twice.
    pub fn load_next(&mut self, count: usize) -> Result<usize, CollaboratorError> {
        let subjects = self.source.load_next(count + self.unsynced.len())?;
        self.deck = subjects
            .into_iter()
            .filter(|s| !self.unsynced.contains(s))
            .take(count)
            .collect();
        Ok(self.deck.len())
    }

    /// Records that the caller got a failed decision on `subject_id` through
    /// to the source. Returns false if it wasn't pending.
    pub fn mark_synced(&mut self, subject_id: &SubjectId) -> bool {
        self.unsynced.remove(subject_id)
    }

    /// Subjects decided locally whose decision the source has not accepted.
    pub fn unsynced(&self) -> impl Iterator<Item = &SubjectId> {
        self.unsynced.iter()
    }

    fn settle(
        &mut self,
        op: SyncOp,
        entry: &RewindEntry,
        result: Result<(), CollaboratorError>,
    ) -> SyncStatus {
        match result {
            Ok(()) => SyncStatus::Synced,
            Err(error) => {
                let failure = SyncFailure {
                    op,
                    entry: entry.clone(),
                    error: error.clone(),
                };
                self.reconcile.on_sync_failure(&failure);
                SyncStatus::Failed(error)
            }
        }
    }

    fn reset_drag(&mut self) {
        self.drag.reset();
        self.provisional = None;
        self.last_notified = DragOffset::ZERO;
    }

    // ── Accessors ──

    pub fn snapshot(&self) -> DragSnapshot {
        DragSnapshot {
            offset: self.drag.offset(),
            active: self.drag.is_active(),
            provisional: self.provisional,
        }
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn provisional(&self) -> Option<Direction> {
        self.provisional
    }

    pub fn history(&self) -> &RewindHistory {
        &self.history
    }

    /// The candidate the next commit applies to, if already loaded.
    pub fn current_subject(&self) -> Option<&SubjectId> {
        self.deck.front()
    }

    pub fn deck(&self) -> impl Iterator<Item = &SubjectId> {
        self.deck.iter()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::collaborator::StaticEntitlement;

    /// A discovery source that keeps its queue in memory and records every call.
    #[derive(Debug, Default)]
    struct RecordingSource {
        queue: VecDeque<SubjectId>,
        recorded: Vec<(SubjectId, SwipeDecision)>,
        undone: Vec<SubjectId>,
        fail_record: bool,
        fail_undo: bool,
    }

    impl RecordingSource {
        fn with_candidates(count: usize) -> Self {
            Self {
                queue: (1..=count).map(|i| SubjectId::new(format!("p{i}"))).collect(),
                ..Self::default()
            }
        }
    }

    impl DiscoverySource for RecordingSource {
        fn load_next(&mut self, count: usize) -> Result<Vec<SubjectId>, CollaboratorError> {
            Ok(self.queue.iter().take(count).cloned().collect())
        }

        fn record_decision(
            &mut self,
            subject_id: &SubjectId,
            decision: SwipeDecision,
        ) -> Result<(), CollaboratorError> {
            if self.fail_record {
                return Err(CollaboratorError::Unavailable("offline".into()));
            }
            self.queue.retain(|s| s != subject_id);
            self.recorded.push((subject_id.clone(), decision));
            Ok(())
        }

        fn undo_last_decision(&mut self, subject_id: &SubjectId) -> Result<(), CollaboratorError> {
            if self.fail_undo {
                return Err(CollaboratorError::Rejected("too late".into()));
            }
            if !self.queue.contains(subject_id) {
                self.queue.push_front(subject_id.clone());
            }
            self.undone.push(subject_id.clone());
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct RecordingFeedback(Vec<HapticKind>);

    impl FeedbackSink for RecordingFeedback {
        fn notify_haptic(&mut self, kind: HapticKind) {
            self.0.push(kind);
        }
    }

    #[derive(Clone, Default)]
    struct RecordingHook(Rc<RefCell<Vec<SyncFailure>>>);

    impl ReconciliationHook for RecordingHook {
        fn on_sync_failure(&mut self, failure: &SyncFailure) {
            self.0.borrow_mut().push(failure.clone());
        }
    }

    type TestEngine = SwipeEngine<RecordingSource, StaticEntitlement, RecordingFeedback>;

    fn engine_with(source: RecordingSource, entitled: bool) -> TestEngine {
        SwipeEngine::new(
            &Config::default(),
            source,
            StaticEntitlement(entitled),
            RecordingFeedback::default(),
        )
    }

    fn engine(entitled: bool) -> TestEngine {
        engine_with(RecordingSource::with_candidates(20), entitled)
    }

    fn swipe(engine: &mut TestEngine, dx: f64, dy: f64, vx: f64) -> Release {
        engine.on_drag_start();
        engine.on_drag_update(dx, dy);
        engine.on_drag_end(Velocity::new(vx, 0.0)).unwrap()
    }

    fn decision_of(release: &Release) -> Option<SwipeDecision> {
        release.commit().map(|c| c.decision)
    }

    fn assert_idle(engine: &TestEngine) {
        assert!(!engine.drag().is_active());
        assert_eq!(engine.drag().offset(), DragOffset::ZERO);
        assert_eq!(engine.provisional(), None);
    }

    #[test]
    fn same_gesture_same_decision() {
        let steps = [(0.05, 0.01), (0.07, -0.02), (0.09, 0.0), (0.06, 0.01)];
        let run = || {
            let mut engine = engine(false);
            let mut outcomes = Vec::new();
            for _ in 0..3 {
                engine.on_drag_start();
                for (dx, dy) in steps {
                    engine.on_drag_update(dx, dy);
                }
                outcomes.push(engine.on_drag_end(Velocity::new(620.0, 0.0)).unwrap());
            }
            outcomes
        };

        let first = run();
        assert_eq!(first, run());
        assert!(
            first
                .iter()
                .all(|r| decision_of(r) == Some(SwipeDecision::Like))
        );
    }

    #[test]
    fn commit_threshold_is_exclusive() {
        let mut engine = engine(false);

        let release = swipe(&mut engine, 0.350_000_1, 0.0, 0.0);
        assert_eq!(decision_of(&release), Some(SwipeDecision::Like));

        let release = swipe(&mut engine, 0.34, 0.0, 0.0);
        assert_eq!(release, Release::SnappedBack);
        assert_eq!(engine.history().len(), 1);
        assert_idle(&engine);
    }

    #[test]
    fn fast_release_commits_short_drag() {
        let mut engine = engine(false);
        let release = swipe(&mut engine, 0.1, 0.0, 501.0);
        assert_eq!(decision_of(&release), Some(SwipeDecision::Like));
    }

    #[test]
    fn up_wins_over_right() {
        let mut engine = engine(false);
        let release = swipe(&mut engine, 0.2, -0.3, 0.0);
        assert_eq!(decision_of(&release), Some(SwipeDecision::SuperLike));
    }

    #[test]
    fn history_keeps_last_ten() {
        let mut engine = engine(false);
        for _ in 0..11 {
            engine.dispatch(Direction::Right).unwrap();
        }

        let history = engine.history();
        assert_eq!(history.len(), 10);
        assert!(history.iter().all(|e| e.subject_id.as_str() != "p1"));
        assert_eq!(history.peek().unwrap().subject_id.as_str(), "p11");
    }

    #[test]
    fn undo_on_fresh_engine_is_nothing_to_undo() {
        let mut engine = engine(true);

        assert_eq!(engine.undo(), Err(SwipeError::NothingToUndo));
        assert_eq!(engine.undo(), Err(SwipeError::NothingToUndo));
        assert!(engine.history().is_empty());
        assert!(engine.source().undone.is_empty());
        assert!(engine.feedback().0.is_empty());
        assert_idle(&engine);
    }

    #[test]
    fn undo_without_entitlement_keeps_entry() {
        let mut engine = engine(false);
        engine.dispatch(Direction::Left).unwrap();

        assert_eq!(engine.undo(), Err(SwipeError::DeniedNotEntitled));
        assert_eq!(engine.history().len(), 1);
        assert!(engine.source().undone.is_empty());
    }

    #[test]
    fn button_matches_gesture() {
        let mut by_button = engine(false);
        let mut by_drag = engine(false);

        let button = by_button.dispatch(Direction::Left).unwrap();
        let drag = swipe(&mut by_drag, -0.4, 0.0, 0.0);

        assert_eq!(button, drag);
        assert_eq!(
            button.commit().unwrap().entry,
            RewindEntry {
                decision: SwipeDecision::Pass,
                subject_id: "p1".into(),
            }
        );
        assert_eq!(by_button.history().peek(), by_drag.history().peek());
        assert_eq!(by_button.snapshot(), by_drag.snapshot());
        assert_idle(&by_button);
        assert_eq!(by_button.source().recorded, by_drag.source().recorded);
    }

    #[test]
    fn like_then_rewind() {
        let mut engine = engine(true);
        assert_idle(&engine);

        engine.on_drag_start();
        engine.on_drag_update(0.4, 0.0);
        let release = engine.on_drag_end(Velocity::ZERO).unwrap();

        assert_eq!(decision_of(&release), Some(SwipeDecision::Like));
        assert_eq!(engine.history().len(), 1);
        assert_idle(&engine);

        let undone = engine.undo().unwrap();
        assert_eq!(undone.entry.subject_id.as_str(), "p1");
        assert!(undone.sync.is_synced());
        assert_eq!(engine.source().undone, vec![SubjectId::new("p1")]);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn rewound_subject_comes_up_next() {
        let mut engine = engine(true);
        engine.dispatch(Direction::Right).unwrap();
        engine.dispatch(Direction::Left).unwrap();
        assert_eq!(engine.current_subject().unwrap().as_str(), "p3");

        engine.undo().unwrap();
        assert_eq!(engine.current_subject().unwrap().as_str(), "p2");

        let release = engine.dispatch(Direction::Up).unwrap();
        assert_eq!(release.commit().unwrap().entry.subject_id.as_str(), "p2");
    }

    #[test]
    fn failed_record_keeps_local_commit() {
        let hook = RecordingHook::default();
        let source = RecordingSource {
            fail_record: true,
            ..RecordingSource::with_candidates(3)
        };
        let mut engine = engine_with(source, false).with_reconciliation(hook.clone());

        let release = swipe(&mut engine, 0.5, 0.0, 0.0);
        let commit = release.commit().unwrap();

        assert_eq!(
            commit.sync,
            SyncStatus::Failed(CollaboratorError::Unavailable("offline".into()))
        );
        assert_eq!(engine.history().len(), 1);
        assert_idle(&engine);

        let failures = hook.0.borrow();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].op, SyncOp::Record);
        assert_eq!(failures[0].entry, commit.entry);
    }

    #[test]
    fn failed_undo_still_pops() {
        let hook = RecordingHook::default();
        let source = RecordingSource {
            fail_undo: true,
            ..RecordingSource::with_candidates(3)
        };
        let mut engine = engine_with(source, true).with_reconciliation(hook.clone());
        engine.dispatch(Direction::Right).unwrap();

        let undone = engine.undo().unwrap();
        assert!(!undone.sync.is_synced());
        assert!(engine.history().is_empty());
        assert_eq!(hook.0.borrow()[0].op, SyncOp::Undo);
    }

    #[test]
    fn empty_deck_fails_and_resets() {
        let mut engine = engine_with(RecordingSource::default(), false);

        engine.on_drag_start();
        engine.on_drag_update(0.6, 0.0);
        assert_eq!(
            engine.on_drag_end(Velocity::ZERO),
            Err(SwipeError::DeckEmpty)
        );
        assert!(engine.history().is_empty());
        assert_idle(&engine);
    }

    #[test]
    fn unsynced_subject_is_not_served_again() {
        let source = RecordingSource {
            fail_record: true,
            ..RecordingSource::with_candidates(2)
        };
        let mut engine = engine_with(source, false);

        engine.dispatch(Direction::Right).unwrap();
        engine.dispatch(Direction::Right).unwrap();
        assert_eq!(
            engine.dispatch(Direction::Right),
            Err(SwipeError::DeckEmpty)
        );

        let decided: Vec<&str> = engine
            .history()
            .iter()
            .map(|e| e.subject_id.as_str())
            .collect();
        assert_eq!(decided, ["p1", "p2"]);
        assert_eq!(engine.unsynced().count(), 2);
        assert_eq!(engine.source().queue.len(), 2);
    }

    #[test]
    fn marking_synced_lets_source_serve_again() {
        let source = RecordingSource {
            fail_record: true,
            ..RecordingSource::with_candidates(3)
        };
        let mut engine = engine_with(source, false);
        engine.dispatch(Direction::Left).unwrap();

        assert_eq!(engine.load_next(5).unwrap(), 2);
        let deck: Vec<&str> = engine.deck().map(SubjectId::as_str).collect();
        assert_eq!(deck, ["p2", "p3"]);

        assert!(engine.mark_synced(&SubjectId::new("p1")));
        assert!(!engine.mark_synced(&SubjectId::new("p1")));
        assert_eq!(engine.load_next(5).unwrap(), 3);
        assert_eq!(engine.current_subject().unwrap().as_str(), "p1");
    }

    #[test]
    fn rewinding_unsynced_subject_requeues_it() {
        let source = RecordingSource {
            fail_record: true,
            ..RecordingSource::with_candidates(2)
        };
        let mut engine = engine_with(source, true);
        engine.dispatch(Direction::Up).unwrap();

        engine.undo().unwrap();
        assert_eq!(engine.unsynced().count(), 0);
        let deck: Vec<&str> = engine.deck().map(SubjectId::as_str).collect();
        assert_eq!(deck, ["p1", "p2"]);
    }

    #[test]
    fn deck_runs_out_after_last_candidate() {
        let mut engine = engine_with(RecordingSource::with_candidates(2), false);
        engine.dispatch(Direction::Right).unwrap();
        engine.dispatch(Direction::Right).unwrap();
        assert_eq!(
            engine.dispatch(Direction::Right),
            Err(SwipeError::DeckEmpty)
        );
        assert_eq!(engine.source().recorded.len(), 2);
    }

    #[test]
    fn notifications_are_debounced() {
        let mut engine = engine(false);
        engine.on_drag_start();

        assert!(engine.on_drag_update(0.004, 0.0).is_none());
        assert!(engine.on_drag_update(0.004, 0.0).is_none());
        let snapshot = engine.on_drag_update(0.004, 0.0).unwrap();
        assert!(snapshot.active);
        assert!((snapshot.offset.dx - 0.012).abs() < 1e-9);

        assert!(engine.on_drag_update(0.002, 0.0).is_none());
        assert!(engine.on_drag_update(0.0, -0.03).is_some());
    }

    #[test]
    fn provisional_direction_tracks_drag() {
        let mut engine = engine(false);
        engine.on_drag_start();

        engine.on_drag_update(0.1, 0.0);
        assert_eq!(engine.provisional(), None);
        engine.on_drag_update(0.1, 0.0);
        assert_eq!(engine.provisional(), Some(Direction::Right));
        engine.on_drag_update(0.0, -0.4);
        assert_eq!(engine.provisional(), Some(Direction::Up));
        engine.on_drag_update(-0.5, 0.4);
        assert_eq!(engine.provisional(), Some(Direction::Left));
        engine.on_drag_update(0.2, 0.0);
        assert_eq!(engine.provisional(), None);
    }

    #[test]
    fn haptics_follow_interaction() {
        let mut engine = engine(true);

        swipe(&mut engine, 0.5, 0.0, 0.0);
        engine.dispatch(Direction::Up).unwrap();
        engine.undo().unwrap();

        assert_eq!(
            engine.feedback().0,
            vec![
                HapticKind::Light,
                HapticKind::Medium,
                HapticKind::Heavy,
                HapticKind::Light,
            ]
        );
    }

    #[test]
    fn updates_without_gesture_are_ignored() {
        let mut engine = engine(false);
        assert!(engine.on_drag_update(0.9, 0.0).is_none());
        assert_eq!(
            engine.on_drag_end(Velocity::new(900.0, 0.0)),
            Ok(Release::SnappedBack)
        );
        assert!(engine.history().is_empty());
    }

    #[test]
    fn restart_discards_previous_gesture() {
        let mut engine = engine(false);
        engine.on_drag_start();
        engine.on_drag_update(0.5, 0.0);
        engine.on_drag_start();

        assert!(engine.drag().is_active());
        assert_eq!(engine.drag().offset(), DragOffset::ZERO);
        assert_eq!(engine.on_drag_end(Velocity::ZERO), Ok(Release::SnappedBack));
    }

    #[test]
    fn button_mid_gesture_commits_button_direction() {
        let mut engine = engine(false);
        engine.on_drag_start();
        engine.on_drag_update(-0.5, 0.0);

        let release = engine.dispatch(Direction::Right).unwrap();
        assert_eq!(decision_of(&release), Some(SwipeDecision::Like));
        assert_idle(&engine);
    }

    #[test]
    fn entitlement_is_not_cached() {
        struct Toggle(std::cell::Cell<bool>);
        impl EntitlementGate for Toggle {
            fn has_rewind_entitlement(&self) -> bool {
                self.0.get()
            }
        }

        let mut engine = SwipeEngine::new(
            &Config::default(),
            RecordingSource::with_candidates(5),
            Toggle(std::cell::Cell::new(false)),
            RecordingFeedback::default(),
        );
        engine.dispatch(Direction::Right).unwrap();
        assert_eq!(engine.undo(), Err(SwipeError::DeniedNotEntitled));

        engine.gate.0.set(true);
        assert!(engine.undo().is_ok());
    }
}
