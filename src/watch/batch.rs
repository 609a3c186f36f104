// src/watch/batch.rs

use std::path::PathBuf;

use crate::types::WatchEventKind;

/// How many entries `describe` lists before summarising the rest.
const DESCRIBE_LIMIT: usize = 8;

/// Filtered events that were pending together when the loop woke up.
///
/// Duplicate `(kind, path)` pairs are dropped; first-seen order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventBatch {
    entries: Vec<(WatchEventKind, PathBuf)>,
}

impl EventBatch {
    pub fn push(&mut self, kind: WatchEventKind, path: PathBuf) {
        if !self
            .entries
            .iter()
            .any(|(k, p)| *k == kind && *p == path)
        {
            self.entries.push((kind, path));
        }
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = (WatchEventKind, PathBuf)>) {
        for (kind, path) in items {
            self.push(kind, path);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[(WatchEventKind, PathBuf)] {
        &self.entries
    }

    /// Human-readable summary, e.g. `CREATE /tmp/w/a, MODIFY /tmp/w/b`.
    pub fn describe(&self) -> String {
        let mut parts: Vec<String> = self
            .entries
            .iter()
            .take(DESCRIBE_LIMIT)
            .map(|(kind, path)| format!("{kind} {}", path.display()))
            .collect();

        if self.entries.len() > DESCRIBE_LIMIT {
            parts.push(format!("... and {} more", self.entries.len() - DESCRIBE_LIMIT));
        }

        parts.join(", ")
    }
}
