//! Linear undo/redo over whole-surface snapshots.

/// Default number of undo states to keep.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Bounded undo and redo stacks.
///
/// A limit of zero disables recording entirely.
#[derive(Debug, Clone)]
pub struct History<T> {
    undo_stack: Vec<T>,
    redo_stack: Vec<T>,
    limit: usize,
}

impl<T> History<T> {
    /// Create empty stacks keeping at most `limit` undo states.
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    /// Whether checkpoints are recorded at all.
    pub fn is_enabled(&self) -> bool {
        self.limit > 0
    }

    /// Record the state from before a change.
    pub fn checkpoint(&mut self, state: T) {
        if !self.is_enabled() {
            return;
        }
        self.undo_stack.push(state);

        // New changes invalidate anything undone
        self.redo_stack.clear();

        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
    }

    /// Step back: returns the state to restore, filing `current` for redo.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Step forward: returns the state to restore, filing `current` for undo.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    /// Whether there is a state to step back to.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether there is an undone state to step forward to.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undo steps available.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
