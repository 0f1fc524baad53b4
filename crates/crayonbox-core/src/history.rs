//! Linear undo/redo over whole-state snapshots.

/// Maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 50;

/// A value the history can store.
pub trait Snapshot: Clone + PartialEq {
    /// Blank snapshots never start a history.
    fn is_blank(&self) -> bool;
}

/// Where a history currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    /// Nothing recorded yet.
    Empty,
    /// Only the baseline snapshot; nothing to undo.
    Recording,
    /// Undo is available and nothing has been undone.
    Undoable,
    /// At least one step can be redone.
    Redoable,
}

/// Undo and redo stacks of snapshots.
///
/// When non-empty, the top of the undo stack always equals the live state.
/// The first snapshot is the baseline and is never undone past.
#[derive(Debug, Clone)]
pub struct History<S> {
    undo_stack: Vec<S>,
    redo_stack: Vec<S>,
    max_entries: usize,
}

impl<S: Snapshot> Default for History<S> {
    fn default() -> Self {
        Self::new(MAX_UNDO_HISTORY)
    }
}

impl<S: Snapshot> History<S> {
    pub fn new(max_entries: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Record the live state after a change.
    ///
    /// Returns false when nothing was recorded: a blank state before any
    /// history exists, or a state equal to the current top. Recording
    /// clears the redo stack.
    pub fn record(&mut self, snapshot: S) -> bool {
        if self.undo_stack.is_empty() && snapshot.is_blank() {
            return false;
        }
        if self.undo_stack.last() == Some(&snapshot) {
            return false;
        }

        self.undo_stack.push(snapshot);
        self.redo_stack.clear();

        if self.undo_stack.len() > self.max_entries {
            self.undo_stack.remove(0);
        }
        true
    }

    /// Step back one snapshot, returning the state to restore.
    /// No-op while at most the baseline exists.
    pub fn undo(&mut self) -> Option<&S> {
        if self.undo_stack.len() <= 1 {
            return None;
        }
        let current = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        self.undo_stack.last()
    }

    /// Step forward one snapshot, returning the state to restore.
    pub fn redo(&mut self) -> Option<&S> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(next);
        self.undo_stack.last()
    }

    /// The snapshot matching the live state.
    pub fn current(&self) -> Option<&S> {
        self.undo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of snapshots on the undo stack.
    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    pub fn state(&self) -> HistoryState {
        if self.undo_stack.is_empty() {
            HistoryState::Empty
        } else if self.can_redo() {
            HistoryState::Redoable
        } else if self.can_undo() {
            HistoryState::Undoable
        } else {
            HistoryState::Recording
        }
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl Snapshot for Vec<u32> {
        fn is_blank(&self) -> bool {
            self.is_empty()
        }
    }

    #[test]
    fn test_blank_start_is_not_recorded() {
        let mut history: History<Vec<u32>> = History::default();
        assert!(!history.record(vec![]));
        assert_eq!(history.state(), HistoryState::Empty);
    }

    #[test]
    fn test_baseline_cannot_be_undone() {
        let mut history = History::default();
        history.record(vec![1]);
        assert_eq!(history.state(), HistoryState::Recording);
        assert_eq!(history.undo(), None);
        assert_eq!(history.current(), Some(&vec![1]));
    }

    #[test]
    fn test_redo_with_empty_stack_is_noop() {
        let mut history = History::default();
        history.record(vec![1]);
        assert_eq!(history.redo(), None);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_undo_then_redo_restores() {
        let mut history = History::default();
        history.record(vec![1]);
        history.record(vec![1, 2]);
        assert_eq!(history.state(), HistoryState::Undoable);

        assert_eq!(history.undo(), Some(&vec![1]));
        assert_eq!(history.state(), HistoryState::Redoable);
        assert_eq!(history.redo(), Some(&vec![1, 2]));
        assert_eq!(history.current(), Some(&vec![1, 2]));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_recording_clears_redo() {
        let mut history = History::default();
        history.record(vec![1]);
        history.record(vec![1, 2]);
        history.undo();
        assert!(history.can_redo());
        history.record(vec![1, 3]);
        assert!(!history.can_redo());
        assert_eq!(history.undo(), Some(&vec![1]));
    }

    #[test]
    fn test_unchanged_state_is_not_recorded() {
        let mut history = History::default();
        assert!(history.record(vec![1]));
        assert!(!history.record(vec![1]));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_blank_after_start_is_recorded() {
        let mut history = History::default();
        history.record(vec![1]);
        assert!(history.record(vec![]));
        assert_eq!(history.undo(), Some(&vec![1]));
    }

    #[test]
    fn test_history_is_capped() {
        let mut history = History::new(3);
        for i in 1..=5 {
            history.record(vec![i]);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.undo(), Some(&vec![4]));
        assert_eq!(history.undo(), Some(&vec![3]));
        assert_eq!(history.undo(), None);
    }
}
