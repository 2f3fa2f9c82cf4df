//! Linear undo/redo over whole-scene snapshots.

use crate::scene::Scene;
use crate::snapshot::{Snapshot, SnapshotError};

/// Undo/redo availability, reported to the toolbar after every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryState {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// A branch-truncating stack of scene snapshots with a cursor.
///
/// Whenever entries exist, `cursor` indexes the snapshot currently on
/// screen. Pushing discards everything after the cursor first.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Snapshot>,
    cursor: usize,
    /// Maximum number of entries kept (None = unbounded).
    capacity: Option<usize>,
}

impl History {
    /// Create an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that evicts its oldest entries beyond `capacity`.
    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            capacity: capacity.map(|c| c.max(1)),
            ..Self::default()
        }
    }

    /// Record a new snapshot after the cursor, dropping the redo branch.
    pub fn push(&mut self, snapshot: Snapshot) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(snapshot);

        if let Some(cap) = self.capacity {
            if self.entries.len() > cap {
                let excess = self.entries.len() - cap;
                self.entries.drain(..excess);
            }
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Serialize `scene` and push it.
    pub fn record(&mut self, scene: &Scene) -> Result<(), SnapshotError> {
        self.push(Snapshot::capture(scene)?);
        Ok(())
    }

    /// Step back one entry. Returns None if there is nothing to undo.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward one entry. Returns None if there is nothing to redo.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    /// Step back only if `apply` accepts the target snapshot.
    ///
    /// The cursor is left untouched when `apply` fails, so a corrupt entry
    /// never desynchronises the history from what is on screen.
    pub fn undo_with<T, E>(
        &mut self,
        apply: impl FnOnce(&Snapshot) -> Result<T, E>,
    ) -> Option<Result<T, E>> {
        if !self.can_undo() {
            return None;
        }
        let target = self.cursor - 1;
        Some(self.move_to(target, apply))
    }

    /// Step forward only if `apply` accepts the target snapshot.
    pub fn redo_with<T, E>(
        &mut self,
        apply: impl FnOnce(&Snapshot) -> Result<T, E>,
    ) -> Option<Result<T, E>> {
        if !self.can_redo() {
            return None;
        }
        let target = self.cursor + 1;
        Some(self.move_to(target, apply))
    }

    fn move_to<T, E>(
        &mut self,
        target: usize,
        apply: impl FnOnce(&Snapshot) -> Result<T, E>,
    ) -> Result<T, E> {
        let value = apply(&self.entries[target])?;
        self.cursor = target;
        Ok(value)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor < self.entries.len() - 1
    }

    pub fn state(&self) -> HistoryState {
        HistoryState {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// The snapshot currently on screen.
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}
