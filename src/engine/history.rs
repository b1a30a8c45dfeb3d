//! Bounded rewind history.

use std::collections::VecDeque;

use crate::model::RewindEntry;

/// The most recent committed decisions, newest at the back.
///
/// Holds at most `capacity` entries. Pushing onto a full history evicts the
/// oldest entry first; popping returns the newest.
#[derive(Debug, Clone)]
pub struct RewindHistory {
    entries: VecDeque<RewindEntry>,
    capacity: usize,
}

impl RewindHistory {
    /// Creates an empty history. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an entry, returning the evicted oldest entry if the history was full.
    pub fn push(&mut self, entry: RewindEntry) -> Option<RewindEntry> {
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    /// Removes and returns the newest entry.
    pub fn pop(&mut self) -> Option<RewindEntry> {
        self.entries.pop_back()
    }

    pub fn peek(&self) -> Option<&RewindEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &RewindEntry> {
        self.entries.iter()
    }
}
