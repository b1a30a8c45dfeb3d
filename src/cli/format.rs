//! Output formatting for CLI display.

use swipe::model::LogEntry;

use super::replay::{Outcome, Step};

/// Format a decision log entry for human-readable display.
pub(super) fn format_entry(entry: &LogEntry) -> String {
    match entry {
        LogEntry::Decision {
            subject_id,
            decision,
            decided_at,
        } => format!("{decided_at}  {decision:<10}  {subject_id}"),
        LogEntry::Undo {
            subject_id,
            undone_at,
        } => format!("{undone_at}  {:<10}  {subject_id}", "rewind"),
    }
}

/// One-line tally of a replay.
pub(super) fn format_summary(steps: &[Step]) -> String {
    let mut committed = 0;
    let mut rewound = 0;
    let mut snapped_back = 0;
    let mut refused = 0;
    let mut unsynced = 0;
    for step in steps {
        match &step.outcome {
            Outcome::Committed { sync_error, .. } => {
                committed += 1;
                unsynced += usize::from(sync_error.is_some());
            }
            Outcome::Rewound { sync_error, .. } => {
                rewound += 1;
                unsynced += usize::from(sync_error.is_some());
            }
            Outcome::SnappedBack => snapped_back += 1,
            Outcome::Refused { .. } => refused += 1,
            Outcome::Started | Outcome::Moved { .. } | Outcome::Loaded { .. } => {}
        }
    }

    let mut summary = format!(
        "{committed} committed, {rewound} rewound, {snapped_back} snapped back"
    );
    if refused > 0 {
        summary.push_str(&format!(", {refused} refused"));
    }
    if unsynced > 0 {
        summary.push_str(&format!(", {unsynced} not synced"));
    }
    summary
}
