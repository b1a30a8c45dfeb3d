//! Local persistence for discovery sessions.
//!
//! Each session lives in its own directory under the storage root:
//!
//! ```text
//! <root>/<uuid>/
//!   session.json     # Session metadata and candidate list
//!   decisions.jsonl  # Append-only decision log (decisions + undos)
//! ```
//!
//! Rewind history is never stored here; it belongs to a running engine.

mod decisions;
mod source;

use std::{fs, io, path::PathBuf};

use uuid::Uuid;

use crate::model::Session;

pub use source::SessionSource;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("session already exists: {0}")]
    SessionAlreadyExists(Uuid),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// Local file-based storage for sessions and their decision logs.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    // ── Sessions ──

    /// Creates a new session, writing its metadata to disk.
    pub fn create_session(&self, session: &Session) -> Result<()> {
        let dir = self.session_dir(session.id);
        if dir.exists() {
            return Err(StorageError::SessionAlreadyExists(session.id));
        }
        fs::create_dir_all(&dir)?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(dir.join("session.json"), json)?;
        Ok(())
    }

    /// Loads a single session's metadata.
    pub fn load_session(&self, id: Uuid) -> Result<Session> {
        let path = self.session_dir(id).join("session.json");
        if !path.exists() {
            return Err(StorageError::SessionNotFound(id));
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Lists all sessions, oldest first.
    pub fn list_sessions(&self) -> Result<Vec<Session>> {
        let mut sessions = Vec::new();
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(sessions),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let entry = entry?;
            let path = entry.path().join("session.json");
            if path.is_file() {
                let json = fs::read_to_string(&path)?;
                sessions.push(serde_json::from_str(&json)?);
            }
        }
        sessions.sort_by(|a: &Session, b: &Session| a.created_at.cmp(&b.created_at));
        Ok(sessions)
    }

    /// Opens a session as a discovery source.
    pub fn open_source(&self, id: Uuid) -> Result<SessionSource> {
        let session = self.load_session(id)?;
        let log = self.load_log(id)?;
        Ok(SessionSource::new(self.clone(), &session, &log))
    }

    fn session_dir(&self, id: Uuid) -> PathBuf {
        self.root.join(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use tempfile::TempDir;

    use crate::model::SubjectId;

    pub(super) fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("sessions")).unwrap();
        (dir, storage)
    }

    pub(super) fn sample_session(candidates: &[&str]) -> Session {
        Session {
            id: Uuid::new_v4(),
            label: Some("tonight".into()),
            created_at: Timestamp::now(),
            candidates: candidates.iter().map(|&c| SubjectId::new(c)).collect(),
        }
    }

    #[test]
    fn create_and_load_session() {
        let (_dir, storage) = test_storage();
        let session = sample_session(&["a", "b"]);

        storage.create_session(&session).unwrap();
        let loaded = storage.load_session(session.id).unwrap();

        assert_eq!(loaded.id, session.id);
        assert_eq!(loaded.candidates, session.candidates);
        assert_eq!(loaded.label.as_deref(), Some("tonight"));
    }

    #[test]
    fn create_duplicate_session_fails() {
        let (_dir, storage) = test_storage();
        let session = sample_session(&["a"]);

        storage.create_session(&session).unwrap();
        let err = storage.create_session(&session).unwrap_err();

        assert!(matches!(err, StorageError::SessionAlreadyExists(_)));
    }

    #[test]
    fn load_missing_session_fails() {
        let (_dir, storage) = test_storage();
        let err = storage.load_session(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, StorageError::SessionNotFound(_)));
    }

    #[test]
    fn list_sessions_oldest_first() {
        let (_dir, storage) = test_storage();
        let first = sample_session(&["a"]);
        let mut second = sample_session(&["b"]);
        second.created_at = first.created_at + jiff::SignedDuration::from_secs(60);

        storage.create_session(&second).unwrap();
        storage.create_session(&first).unwrap();

        let ids: Vec<Uuid> = storage
            .list_sessions()
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn list_empty_root() {
        let (_dir, storage) = test_storage();
        assert!(storage.list_sessions().unwrap().is_empty());
    }
}
