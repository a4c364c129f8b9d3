use crate::model::Task;

/// Error type for undo/redo on an empty stack
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
}

/// Undo/redo history as whole-forest snapshots.
///
/// Every mutating operation calls [`History::record`] with the
/// pre-mutation forest, which also invalidates any redo entries — once
/// the timeline diverges there is nothing coherent to redo into.
/// Snapshots are full deep copies; O(n) per mutation is the accepted
/// cost at hand-entered scale, and the stacks are deliberately
/// uncapped.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Vec<Task>>,
    redo_stack: Vec<Vec<Task>>,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    /// Snapshot `current` onto the undo stack and clear redo. Call
    /// before applying a new mutation.
    pub fn record(&mut self, current: &[Task]) {
        self.undo_stack.push(current.to_vec());
        self.redo_stack.clear();
    }

    /// Pop the most recent snapshot, pushing `current` onto the redo
    /// stack. The caller installs the returned forest.
    pub fn undo(&mut self, current: &[Task]) -> Result<Vec<Task>, HistoryError> {
        let snapshot = self.undo_stack.pop().ok_or(HistoryError::NothingToUndo)?;
        self.redo_stack.push(current.to_vec());
        Ok(snapshot)
    }

    /// Mirror of [`History::undo`]
    pub fn redo(&mut self, current: &[Task]) -> Result<Vec<Task>, HistoryError> {
        let snapshot = self.redo_stack.pop().ok_or(HistoryError::NothingToRedo)?;
        self.undo_stack.push(current.to_vec());
        Ok(snapshot)
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}
