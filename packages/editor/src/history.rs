//! # Snapshot History
//!
//! Linear undo/redo over fully detached forest snapshots.
//!
//! Every committed mutation pushes a deep copy of the whole forest; undo and
//! redo just move a cursor over the snapshot list and hand back the snapshot
//! to install. Committing while the cursor sits before the end truncates the
//! abandoned redo branch: history is strictly linear, never a tree.

use crate::component::Component;

type Snapshot = Vec<Component>;

const DEFAULT_MAX_LEVELS: usize = 100;

#[derive(Debug, Clone)]
pub struct HistoryStack {
    /// Snapshots in commit order. Starts with one empty-forest entry so the
    /// very first mutation can be undone back to an empty document.
    entries: Vec<Snapshot>,
    /// Index of the snapshot matching the live document.
    cursor: usize,
    /// Maximum number of snapshots kept (0 = unlimited).
    max_levels: usize,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_MAX_LEVELS)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            entries: vec![Snapshot::new()],
            cursor: 0,
            max_levels,
        }
    }

    /// Record the document state after a committed mutation. Any redo-able
    /// future beyond the cursor is discarded.
    pub fn commit(&mut self, forest: &[Component]) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(forest.to_vec());
        self.cursor = self.entries.len() - 1;

        if self.max_levels > 0 && self.entries.len() > self.max_levels {
            self.entries.remove(0);
            self.cursor -= 1;
        }
    }

    /// Step back one snapshot. Returns the forest to install, or `None`
    /// when already at the beginning.
    pub fn undo(&mut self) -> Option<Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward one snapshot. Returns the forest to install, or `None`
    /// when already at the end.
    pub fn redo(&mut self) -> Option<Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of undo steps available.
    pub fn undo_levels(&self) -> usize {
        self.cursor
    }

    /// Number of redo steps available.
    pub fn redo_levels(&self) -> usize {
        self.entries.len().saturating_sub(self.cursor + 1)
    }

    /// Drop all history, for new-document flows. The next commit re-seeds
    /// the stack.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(id: &str) -> Component {
        Component {
            id: id.to_string(),
            component_type: "text".to_string(),
            version: "1.0.0".to_string(),
            config: Default::default(),
            internal_name: None,
            children: Vec::new(),
        }
    }

    #[test]
    fn starts_with_an_empty_snapshot_and_nothing_to_do() {
        let stack = HistoryStack::new();
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn undo_and_redo_walk_the_snapshots() {
        let mut stack = HistoryStack::new();
        let f1 = vec![marker("a")];
        let f2 = vec![marker("a"), marker("b")];

        stack.commit(&f1);
        stack.commit(&f2);

        assert_eq!(stack.undo().unwrap(), f1);
        assert_eq!(stack.undo().unwrap(), Vec::<Component>::new());
        assert!(stack.undo().is_none());

        assert_eq!(stack.redo().unwrap(), f1);
        assert_eq!(stack.redo().unwrap(), f2);
        assert!(stack.redo().is_none());
    }

    #[test]
    fn commit_after_undo_truncates_the_redo_branch() {
        let mut stack = HistoryStack::new();
        let f1 = vec![marker("a")];
        let f2 = vec![marker("a"), marker("b")];
        let f3 = vec![marker("c")];

        stack.commit(&f1);
        stack.commit(&f2);
        stack.undo();

        stack.commit(&f3);
        assert!(!stack.can_redo(), "f2 must be unreachable");
        assert_eq!(stack.undo().unwrap(), f1);
        assert_eq!(stack.redo().unwrap(), f3);
    }

    #[test]
    fn snapshots_are_detached_from_the_caller() {
        let mut stack = HistoryStack::new();
        let mut forest = vec![marker("a")];

        stack.commit(&forest);
        forest[0].id = "mutated".to_string();

        assert_eq!(stack.undo().unwrap(), Vec::<Component>::new());
        assert_eq!(stack.redo().unwrap()[0].id, "a");
    }

    #[test]
    fn clear_resets_to_the_empty_state() {
        let mut stack = HistoryStack::new();
        stack.commit(&[marker("a")]);
        stack.clear();

        assert!(!stack.can_undo());
        assert!(!stack.can_redo());

        // The next commit re-seeds the stack as the sole entry.
        stack.commit(&[marker("b")]);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn max_levels_drop_the_oldest_snapshot() {
        let mut stack = HistoryStack::with_max_levels(2);
        stack.commit(&[marker("a")]);
        stack.commit(&[marker("b")]);

        // The initial empty snapshot fell off: one undo step remains.
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo().unwrap(), vec![marker("a")]);
        assert!(stack.undo().is_none());
    }
}
