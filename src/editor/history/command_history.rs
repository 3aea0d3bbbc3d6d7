//! Command history resource for tracking undo/redo state.

use bevy::prelude::*;

use crate::constants::DEFAULT_MAX_HISTORY_SIZE;
use crate::editor::mutations::{Mutation, MutationError, MutationTarget};

/// Resource tracking performed mutations for undo/redo
#[derive(Resource)]
pub struct CommandHistory {
    /// Performed mutations that can be undone (most recent last)
    undo_stack: Vec<Box<dyn Mutation>>,
    /// Undone mutations that can be redone (most recent last)
    redo_stack: Vec<Box<dyn Mutation>>,
    max_size: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::with_max_size(DEFAULT_MAX_HISTORY_SIZE)
    }
}

impl CommandHistory {
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Perform `mutation` on `target` and record it.
    ///
    /// Nothing is recorded if the mutation refuses to perform.
    pub fn perform(
        &mut self,
        mut mutation: Box<dyn Mutation>,
        target: &mut dyn MutationTarget,
    ) -> Result<(), MutationError> {
        mutation.perform(target)?;
        info!("{}", mutation.description());
        self.push(mutation);
        Ok(())
    }

    /// Push an already performed mutation to the history
    pub fn push(&mut self, mutation: Box<dyn Mutation>) {
        // Clear redo stack when a new action is performed
        self.redo_stack.clear();
        self.undo_stack.push(mutation);
        self.trim();
    }

    /// Undo the most recent mutation. Returns `Ok(false)` when there is
    /// nothing to undo.
    ///
    /// A mutation that refuses to undo is dropped from the history.
    pub fn undo(&mut self, target: &mut dyn MutationTarget) -> Result<bool, MutationError> {
        let Some(mut mutation) = self.undo_stack.pop() else {
            return Ok(false);
        };

        mutation.undo(target)?;
        debug!("Undo: {}", mutation.description());
        self.redo_stack.push(mutation);
        Ok(true)
    }

    /// Redo the most recently undone mutation by performing a fresh replay
    /// of it. Returns `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self, target: &mut dyn MutationTarget) -> Result<bool, MutationError> {
        let Some(undone) = self.redo_stack.pop() else {
            return Ok(false);
        };

        let mut replayed = undone.replay();
        if let Err(e) = replayed.perform(target) {
            self.redo_stack.push(undone);
            return Err(e);
        }

        debug!("Redo: {}", replayed.description());
        self.undo_stack.push(replayed);
        self.trim();
        Ok(true)
    }

    /// Change the history bound, dropping the oldest entries if needed
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        self.trim();
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Check if there are mutations to undo
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if there are mutations to redo
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the count of undoable mutations
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the count of redoable mutations
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Description of the mutation the next undo would reverse
    pub fn next_undo_description(&self) -> Option<String> {
        self.undo_stack.last().map(|m| m.description())
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn trim(&mut self) {
        if self.undo_stack.len() > self.max_size {
            let excess = self.undo_stack.len() - self.max_size;
            self.undo_stack.drain(..excess);
        }
    }
}
