//! Scripted replay: drive an engine from a list of recorded events.

use serde::{Deserialize, Serialize};

use swipe::collaborator::{DiscoverySource, EntitlementGate, FeedbackSink};
use swipe::engine::{Release, SwipeEngine, SwipeError, SyncStatus};
use swipe::model::{Direction, DragSnapshot, SubjectId, SwipeDecision, Velocity};

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub(super) enum ScriptEvent {
    /// Finger down.
    Start,

    /// Finger moved by a fraction of the screen.
    Update { dx: f64, dy: f64 },

    /// Finger up, with release velocity in pixels per second.
    End {
        #[serde(default)]
        vx: f64,
        #[serde(default)]
        vy: f64,
    },

    /// Action button pressed.
    Button { direction: Direction },

    /// Rewind button pressed.
    Undo,

    /// Ask the source for candidates.
    Load { count: usize },
}

/// What one event did, serialized as one JSON line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Step {
    pub index: usize,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub(super) enum Outcome {
    Started,

    /// Present only when the update was worth a redraw.
    Moved { snapshot: Option<DragSnapshot> },

    #[serde(rename_all = "camelCase")]
    Committed {
        subject_id: SubjectId,
        decision: SwipeDecision,
        #[serde(skip_serializing_if = "Option::is_none")]
        sync_error: Option<String>,
    },

    SnappedBack,

    #[serde(rename_all = "camelCase")]
    Rewound {
        subject_id: SubjectId,
        decision: SwipeDecision,
        #[serde(skip_serializing_if = "Option::is_none")]
        sync_error: Option<String>,
    },

    Refused { reason: String },

    Loaded { count: usize },
}

/// Feeds every event through `engine`, in order.
pub(super) fn run_script<S, G, F>(
    engine: &mut SwipeEngine<S, G, F>,
    events: &[ScriptEvent],
) -> Vec<Step>
where
    S: DiscoverySource,
    G: EntitlementGate,
    F: FeedbackSink,
{
    events
        .iter()
        .enumerate()
        .map(|(index, event)| Step {
            index,
            outcome: apply(engine, event),
        })
        .collect()
}

fn apply<S, G, F>(engine: &mut SwipeEngine<S, G, F>, event: &ScriptEvent) -> Outcome
where
    S: DiscoverySource,
    G: EntitlementGate,
    F: FeedbackSink,
{
    match *event {
        ScriptEvent::Start => {
            engine.on_drag_start();
            Outcome::Started
        }
        ScriptEvent::Update { dx, dy } => Outcome::Moved {
            snapshot: engine.on_drag_update(dx, dy),
        },
        ScriptEvent::End { vx, vy } => release(engine.on_drag_end(Velocity::new(vx, vy))),
        ScriptEvent::Button { direction } => release(engine.dispatch(direction)),
        ScriptEvent::Undo => match engine.undo() {
            Ok(undone) => Outcome::Rewound {
                subject_id: undone.entry.subject_id,
                decision: undone.entry.decision,
                sync_error: sync_error(undone.sync),
            },
            Err(e) => refused(&e),
        },
        ScriptEvent::Load { count } => match engine.load_next(count) {
            Ok(count) => Outcome::Loaded { count },
            Err(e) => Outcome::Refused {
                reason: e.to_string(),
            },
        },
    }
}

fn release(result: Result<Release, SwipeError>) -> Outcome {
    match result {
        Ok(Release::Committed(commit)) => Outcome::Committed {
            subject_id: commit.entry.subject_id,
            decision: commit.decision,
            sync_error: sync_error(commit.sync),
        },
        Ok(Release::SnappedBack) => Outcome::SnappedBack,
        Err(e) => refused(&e),
    }
}

fn refused(e: &SwipeError) -> Outcome {
    Outcome::Refused {
        reason: e.to_string(),
    }
}

fn sync_error(sync: SyncStatus) -> Option<String> {
    match sync {
        SyncStatus::Synced => None,
        SyncStatus::Failed(e) => Some(e.to_string()),
    }
}
