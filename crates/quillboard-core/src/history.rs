//! Undo/redo history.

use crate::command::Command;
use crate::document::CanvasDocument;
use crate::error::CoreResult;

/// Undo/redo stacks of reversible commands.
///
/// `push` records a new user mutation and clears the redo stack; only `undo`
/// ever populates it. Undo and redo apply snapshots carried by the commands
/// themselves, so a round-trip restores the document exactly.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly applied user mutation.
    pub fn push(&mut self, command: Command) {
        self.undo_stack.push(command);
        // Any new mutation invalidates the redo stack
        self.redo_stack.clear();
    }

    /// Undo the most recent command against the document.
    ///
    /// Returns `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self, document: &mut CanvasDocument) -> CoreResult<bool> {
        let Some(command) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = document.apply(&command.inverted()) {
            // Keep the stack consistent with the document
            self.undo_stack.push(command);
            log::warn!("undo failed: {err}");
            return Err(err);
        }
        self.redo_stack.push(command);
        Ok(true)
    }

    /// Re-apply the most recently undone command.
    ///
    /// Returns `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self, document: &mut CanvasDocument) -> CoreResult<bool> {
        let Some(command) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = document.apply(&command) {
            self.redo_stack.push(command);
            log::warn!("redo failed: {err}");
            return Err(err);
        }
        self.undo_stack.push(command);
        Ok(true)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undoable commands.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redoable commands.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}
