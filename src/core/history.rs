use std::collections::VecDeque;
use crate::core::selection::Selection;

/// A selection as it was before `label` ran
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub label: String,
    pub snapshot: Selection,
}

/// Undo/redo stacks over selection snapshots.
///
/// The undo side is capped at `limit` entries (0 = no cap); the oldest entry goes first.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo: VecDeque<HistoryEntry>,
    redo: Vec<HistoryEntry>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        History {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit,
        }
    }

    /// Record the pre-operation selection of a new command; clears redo
    pub fn record(&mut self, label: &str, before: Selection) {
        self.redo.clear();
        self.push_undo(HistoryEntry {
            label: label.to_string(),
            snapshot: before,
        });
    }

    fn push_undo(&mut self, entry: HistoryEntry) {
        self.undo.push_back(entry);
        if self.limit > 0 && self.undo.len() > self.limit {
            self.undo.pop_front();
        }
    }

    /// Swap `current` for the last snapshot; `None` when there is nothing to undo
    pub fn undo(&mut self, current: &Selection) -> Option<HistoryEntry> {
        let entry = self.undo.pop_back()?;
        self.redo.push(HistoryEntry {
            label: entry.label.clone(),
            snapshot: current.clone(),
        });
        Some(entry)
    }

    pub fn redo(&mut self, current: &Selection) -> Option<HistoryEntry> {
        let entry = self.redo.pop()?;
        self.push_undo(HistoryEntry {
            label: entry.label.clone(),
            snapshot: current.clone(),
        });
        Some(entry)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Labels of undoable commands, oldest first
    pub fn labels(&self) -> Vec<&str> {
        self.undo.iter().map(|e| e.label.as_str()).collect()
    }
}
