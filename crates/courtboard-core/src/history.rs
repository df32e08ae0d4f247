//! Snapshot-based undo/redo.

use crate::board::BoardState;

/// Past and future board snapshots around the live state.
///
/// Snapshots are owned clones, so later in-place edits of the live state can
/// never reach into history.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Undo stack, oldest first.
    past: Vec<BoardState>,
    /// Redo stack; the last element is the earliest future state.
    future: Vec<BoardState>,
    /// Maximum number of undo states (`None` = unbounded).
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Record the state before an edit. Clears the redo stack.
    pub fn push(&mut self, snapshot: BoardState) {
        self.past.push(snapshot);
        self.future.clear();

        if let Some(limit) = self.limit {
            if self.past.len() > limit {
                let excess = self.past.len() - limit;
                self.past.drain(..excess);
            }
        }
    }

    /// Swap `current` with the most recent past state.
    /// Returns false if there is nothing to undo.
    pub fn undo(&mut self, current: &mut BoardState) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        self.future.push(std::mem::replace(current, previous));
        true
    }

    /// Swap `current` with the earliest future state.
    /// Returns false if there is nothing to redo.
    pub fn redo(&mut self, current: &mut BoardState) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        self.past.push(std::mem::replace(current, next));
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of states available to undo.
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    /// Drop all past and future states.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
