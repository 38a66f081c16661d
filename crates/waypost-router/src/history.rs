//! Headless history model.
//!
//! Mirrors the browser history contract the viewer relies on: entries carry
//! the full pushed path plus the hash recorded in their state, and replay
//! (back/forward) reads the hash back from that state.

use serde::{Deserialize, Serialize};

use crate::path::NO_HASH;

/// State recorded with a history entry, the shape read back on replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub hash: String,
}

/// One history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Pushed path: base path plus route, without the fragment.
    pub path: String,

    /// Fragment recorded for this entry, [`NO_HASH`] when absent.
    pub hash: String,
}

impl HistoryEntry {
    /// State stored alongside this entry.
    pub fn state(&self) -> HistoryState {
        HistoryState {
            hash: self.hash.clone(),
        }
    }

    /// The path a replay of this entry should navigate to: the pushed path
    /// plus the stored hash, falling back to no fragment.
    pub fn replay_path(&self) -> String {
        if self.hash == NO_HASH {
            self.path.clone()
        } else {
            format!("{}{}", self.path, self.hash)
        }
    }
}

/// Linear history with a cursor, like the browser session history.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new entry, discarding any forward entries past the cursor.
    pub fn push(&mut self, entry: HistoryEntry) {
        let next = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(next);
        self.entries.push(entry);
        self.cursor = Some(next);
    }

    /// State of the current entry, if any entry has been pushed.
    pub fn state(&self) -> Option<HistoryState> {
        self.current().map(HistoryEntry::state)
    }

    /// The entry the cursor points at.
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.cursor.map(|c| &self.entries[c])
    }

    /// Move the cursor one entry back, returning the entry to replay.
    pub fn back(&mut self) -> Option<&HistoryEntry> {
        let cursor = self.cursor?;
        if cursor == 0 {
            return None;
        }
        self.cursor = Some(cursor - 1);
        self.current()
    }

    /// Move the cursor one entry forward, returning the entry to replay.
    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        let cursor = self.cursor?;
        if cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor = Some(cursor + 1);
        self.current()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(path: &str, hash: &str) -> HistoryEntry {
        HistoryEntry {
            path: path.to_string(),
            hash: hash.to_string(),
        }
    }

    #[test]
    fn push_advances_the_cursor() {
        let mut history = History::new();

        history.push(entry("/handbook", NO_HASH));
        history.push(entry("/handbook/x", "#sec"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.state().unwrap().hash, "#sec");
    }

    #[test]
    fn back_and_forward_replay_recorded_entries() {
        let mut history = History::new();
        history.push(entry("/handbook", NO_HASH));
        history.push(entry("/handbook/x", "#sec"));

        let back = history.back().unwrap();
        assert_eq!(back.replay_path(), "/handbook");

        let forward = history.forward().unwrap();
        assert_eq!(forward.replay_path(), "/handbook/x#sec");
        assert!(history.forward().is_none());
    }

    #[test]
    fn push_after_back_discards_forward_entries() {
        let mut history = History::new();
        history.push(entry("/handbook", NO_HASH));
        history.push(entry("/handbook/x", NO_HASH));
        history.back();

        history.push(entry("/handbook/y", NO_HASH));

        assert_eq!(history.len(), 2);
        assert_eq!(history.current().unwrap().path, "/handbook/y");
        assert!(history.forward().is_none());
    }

    #[test]
    fn state_shape_round_trips_through_json() {
        let state = HistoryState {
            hash: "#sec".to_string(),
        };

        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r##"{"hash":"#sec"}"##);

        let back: HistoryState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
