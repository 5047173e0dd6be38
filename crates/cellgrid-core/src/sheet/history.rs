use std::collections::VecDeque;

use super::state::SheetState;

/// Maximum number of undo snapshots kept by default.
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// Bounded undo/redo stacks of whole-state snapshots.
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<SheetState>,
    future: Vec<SheetState>,
    depth: usize,
}

impl History {
    pub fn new(depth: usize) -> Self {
        History {
            past: VecDeque::with_capacity(depth.min(DEFAULT_HISTORY_DEPTH)),
            future: Vec::new(),
            depth,
        }
    }

    /// Record the state as it was before a mutating action.
    pub(crate) fn record(&mut self, before: SheetState) {
        self.future.clear();
        self.push_past(before);
    }

    fn push_past(&mut self, state: SheetState) {
        self.past.push_back(state);
        while self.past.len() > self.depth {
            self.past.pop_front();
            tracing::trace!(depth = self.depth, "oldest snapshot evicted");
        }
    }

    /// Swap `current` with the newest past snapshot. False if there is none.
    pub(crate) fn undo(&mut self, current: &mut SheetState) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        self.future.push(std::mem::replace(current, previous));
        true
    }

    /// Swap `current` with the newest future snapshot. False if there is none.
    pub(crate) fn redo(&mut self, current: &mut SheetState) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let now = std::mem::replace(current, next);
        self.push_past(now);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
