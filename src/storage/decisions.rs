//! Decision log storage: the append-only record a session source writes.

use std::{fs, io};

// Traits must be in scope for `.lines()` on `BufReader` and `.write_all()` on `File`.
use io::{BufRead, Write};

use uuid::Uuid;

use crate::model::LogEntry;

use super::{Result, Storage, StorageError};

impl Storage {
    /// Appends an entry to the session's decision log.
    pub fn append_entry(&self, session_id: Uuid, entry: &LogEntry) -> Result<()> {
        let dir = self.session_dir(session_id);
        if !dir.exists() {
            return Err(StorageError::SessionNotFound(session_id));
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("decisions.jsonl"))?;
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Loads the session's decision log.
    ///
    /// A session with no decisions yet has no log file; that's an empty log.
    pub fn load_log(&self, session_id: Uuid) -> Result<Vec<LogEntry>> {
        let dir = self.session_dir(session_id);
        if !dir.exists() {
            return Err(StorageError::SessionNotFound(session_id));
        }
        let path = dir.join("decisions.jsonl");
        if !path.exists() {
            return Ok(Vec::new());
        }
        let file = fs::File::open(path)?;
        let reader = io::BufReader::new(file);
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if !line.is_empty() {
                entries.push(serde_json::from_str(&line)?);
            }
        }
        Ok(entries)
    }
}
