//! Construction History
//!
//! Snapshot-based undo/redo over immutable [`Construction`] values.
//!
//! `snapshots[index]` is always the live construction. Every edit computes a
//! new construction from the live one, discards everything after `index`
//! (the redo branch) and appends. Undo and redo only move the cursor.
//!
//! # Usage
//!
//! ```ignore
//! use block_forge_engine::game::builder::history::ConstructionHistory;
//!
//! let mut history = ConstructionHistory::new();
//! history.add_block(block);
//! history.undo();
//! assert!(history.current().is_empty());
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::game::building::{Block, Construction};

/// What `clear()` does to the existing history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearBehavior {
    /// Replace the whole history with a single empty snapshot.
    /// Nothing before the clear can be undone.
    #[default]
    ResetHistory,
    /// Append an empty snapshot like any other edit, so the clear itself
    /// can be undone.
    Undoable,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("no brick at index {index} (construction has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Linear undo/redo history of construction snapshots.
#[derive(Debug, Clone)]
pub struct ConstructionHistory {
    /// Never empty.
    snapshots: Vec<Construction>,
    /// Index of the live snapshot.
    index: usize,
    clear_behavior: ClearBehavior,
    /// Maximum number of snapshots kept, oldest dropped first.
    limit: Option<usize>,
}

impl Default for ConstructionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionHistory {
    /// History holding one empty construction.
    pub fn new() -> Self {
        Self::with_initial(Construction::new())
    }

    /// History holding one snapshot of `construction`.
    pub fn with_initial(construction: Construction) -> Self {
        Self {
            snapshots: vec![construction],
            index: 0,
            clear_behavior: ClearBehavior::default(),
            limit: None,
        }
    }

    pub fn with_clear_behavior(mut self, behavior: ClearBehavior) -> Self {
        self.clear_behavior = behavior;
        self
    }

    /// Cap the number of stored snapshots. Values below 1 are treated as 1.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.map(|l| l.max(1));
        self.enforce_limit();
        self
    }

    pub fn clear_behavior(&self) -> ClearBehavior {
        self.clear_behavior
    }

    /// The live construction.
    pub fn current(&self) -> &Construction {
        &self.snapshots[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    pub fn add_block(&mut self, block: Block) {
        let next = self.current().with_block(block);
        self.commit(next);
    }

    pub fn delete_block(&mut self, index: usize) -> Result<(), HistoryError> {
        let next = self
            .current()
            .without_block(index)
            .ok_or_else(|| self.out_of_range(index))?;
        self.commit(next);
        Ok(())
    }

    pub fn update_block_position(&mut self, index: usize, position: Vec3) -> Result<(), HistoryError> {
        let next = self
            .current()
            .with_position(index, position)
            .ok_or_else(|| self.out_of_range(index))?;
        self.commit(next);
        Ok(())
    }

    /// Empty the construction according to the configured [`ClearBehavior`].
    pub fn clear(&mut self) {
        match self.clear_behavior {
            ClearBehavior::ResetHistory => self.reset_to(Construction::new()),
            ClearBehavior::Undoable => self.commit(Construction::new()),
        }
    }

    /// Discard all history and start over from `construction`.
    pub fn reset_to(&mut self, construction: Construction) {
        self.snapshots.clear();
        self.snapshots.push(construction);
        self.index = 0;
    }

    /// Step back one snapshot. Returns `false` at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Step forward one snapshot. Returns `false` at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.index += 1;
        true
    }

    fn commit(&mut self, construction: Construction) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(construction);
        self.index = self.snapshots.len() - 1;
        self.enforce_limit();
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit else { return };
        if self.snapshots.len() > limit {
            let excess = self.snapshots.len() - limit;
            self.snapshots.drain(0..excess);
            self.index = self.index.saturating_sub(excess);
        }
    }

    fn out_of_range(&self, index: usize) -> HistoryError {
        HistoryError::IndexOutOfRange {
            index,
            len: self.current().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brick(x: f32) -> Block {
        Block::new("#3366FF", Vec3::new(x, 0.75, 0.0), 2, 2)
    }

    #[test]
    fn test_new_history_is_empty() {
        let history = ConstructionHistory::new();
        assert!(history.current().is_empty());
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_three_adds_two_undos_one_redo() {
        let mut history = ConstructionHistory::new();
        history.add_block(brick(0.0));
        let after_one = history.current().clone();
        history.add_block(brick(4.0));
        let after_two = history.current().clone();
        history.add_block(brick(8.0));

        assert!(history.undo());
        assert!(history.undo());
        assert_eq!(history.current(), &after_one);

        assert!(history.redo());
        assert_eq!(history.current(), &after_two);
    }

    #[test]
    fn test_undo_redo_are_noops_at_bounds() {
        let mut history = ConstructionHistory::new();
        assert!(!history.undo());
        assert!(!history.redo());

        history.add_block(brick(0.0));
        assert!(!history.redo());
        assert_eq!(history.index(), 1);
    }

    #[test]
    fn test_edit_after_undo_prunes_redo_branch() {
        let mut history = ConstructionHistory::new();
        history.add_block(brick(0.0));
        history.add_block(brick(4.0));
        history.undo();

        history.add_block(brick(-4.0));
        assert!(!history.can_redo());
        assert!(!history.redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.current().blocks()[1].position.x, -4.0);
    }

    #[test]
    fn test_delete_and_move() {
        let mut history = ConstructionHistory::new();
        history.add_block(brick(0.0));
        history.add_block(brick(4.0));

        history.delete_block(0).expect("in range");
        assert_eq!(history.current().len(), 1);
        assert_eq!(history.current().blocks()[0].position.x, 4.0);

        history
            .update_block_position(0, Vec3::new(-2.0, 0.75, 2.0))
            .expect("in range");
        assert_eq!(history.current().blocks()[0].position, Vec3::new(-2.0, 0.75, 2.0));

        history.undo();
        assert_eq!(history.current().blocks()[0].position.x, 4.0);
    }

    #[test]
    fn test_out_of_range_leaves_history_untouched() {
        let mut history = ConstructionHistory::new();
        history.add_block(brick(0.0));

        let err = history.delete_block(3).unwrap_err();
        assert_eq!(err, HistoryError::IndexOutOfRange { index: 3, len: 1 });
        assert!(history.update_block_position(1, Vec3::ZERO).is_err());
        assert_eq!(history.len(), 2);
        assert_eq!(history.index(), 1);
    }

    #[test]
    fn test_clear_resets_history_by_default() {
        let mut history = ConstructionHistory::new();
        history.add_block(brick(0.0));
        history.add_block(brick(4.0));

        history.clear();
        assert!(history.current().is_empty());
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_undoable_clear() {
        let mut history = ConstructionHistory::new().with_clear_behavior(ClearBehavior::Undoable);
        history.add_block(brick(0.0));
        history.add_block(brick(4.0));
        let before = history.current().clone();

        history.clear();
        assert!(history.current().is_empty());
        assert!(history.undo());
        assert_eq!(history.current(), &before);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = ConstructionHistory::new().with_limit(Some(3));
        for i in 0..5 {
            history.add_block(brick(i as f32 * 2.0));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);
        assert!(history.undo());
        assert!(history.undo());
        assert!(!history.undo());
        // Oldest kept snapshot holds three bricks
        assert_eq!(history.current().len(), 3);
    }

    #[test]
    fn test_reset_to() {
        let mut history = ConstructionHistory::new();
        history.add_block(brick(0.0));

        let loaded = Construction::from_blocks(vec![brick(2.0), brick(6.0)]);
        history.reset_to(loaded.clone());
        assert_eq!(history.current(), &loaded);
        assert!(!history.can_undo());
    }
}
