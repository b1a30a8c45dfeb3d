//! A discovery source backed by a stored session.

use std::collections::{HashSet, VecDeque};

use jiff::Timestamp;
use uuid::Uuid;

use crate::collaborator::{CollaboratorError, DiscoverySource};
use crate::model::{LogEntry, Session, SubjectId, SwipeDecision};

use super::{Storage, StorageError};

impl From<StorageError> for CollaboratorError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e.to_string())
    }
}

/// Serves a session's undecided candidates and logs every decision and undo.
///
/// The queue is rebuilt from the log on open: candidates in session order,
/// minus those whose latest log entry is a decision. A rewind puts its
/// subject back at the front.
#[derive(Debug)]
pub struct SessionSource {
    storage: Storage,
    session_id: Uuid,
    candidates: HashSet<SubjectId>,
    decided: HashSet<SubjectId>,
    queue: VecDeque<SubjectId>,
}

impl SessionSource {
    pub(super) fn new(storage: Storage, session: &Session, log: &[LogEntry]) -> Self {
        let mut decided = HashSet::new();
        for entry in log {
            match entry {
                LogEntry::Decision { subject_id, .. } => {
                    decided.insert(subject_id.clone());
                }
                LogEntry::Undo { subject_id, .. } => {
                    decided.remove(subject_id);
                }
            }
        }
        let queue = session
            .candidates
            .iter()
            .filter(|c| !decided.contains(*c))
            .cloned()
            .collect();

        Self {
            storage,
            session_id: session.id,
            candidates: session.candidates.iter().cloned().collect(),
            decided,
            queue,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// How many candidates are still undecided.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl DiscoverySource for SessionSource {
    fn load_next(&mut self, count: usize) -> Result<Vec<SubjectId>, CollaboratorError> {
        Ok(self.queue.iter().take(count).cloned().collect())
    }

    fn record_decision(
        &mut self,
        subject_id: &SubjectId,
        decision: SwipeDecision,
    ) -> Result<(), CollaboratorError> {
        if !self.candidates.contains(subject_id) {
            return Err(CollaboratorError::Rejected(format!(
                "{subject_id} is not in this session"
            )));
        }
        if self.decided.contains(subject_id) {
            return Err(CollaboratorError::Rejected(format!(
                "{subject_id} is already decided"
            )));
        }

        self.storage.append_entry(
            self.session_id,
            &LogEntry::Decision {
                subject_id: subject_id.clone(),
                decision,
                decided_at: Timestamp::now(),
            },
        )?;
        self.decided.insert(subject_id.clone());
        self.queue.retain(|s| s != subject_id);
        Ok(())
    }

    fn undo_last_decision(&mut self, subject_id: &SubjectId) -> Result<(), CollaboratorError> {
        if !self.decided.contains(subject_id) {
            return Err(CollaboratorError::Rejected(format!(
                "no decision on {subject_id} to undo"
            )));
        }

        self.storage.append_entry(
            self.session_id,
            &LogEntry::Undo {
                subject_id: subject_id.clone(),
                undone_at: Timestamp::now(),
            },
        )?;
        self.decided.remove(subject_id);
        self.queue.push_front(subject_id.clone());
        Ok(())
    }
}
