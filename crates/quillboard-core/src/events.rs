//! Change notifications for presentation layers.
//!
//! Toolbar enablement (undo/redo/delete buttons) and the text style panel
//! react to these events instead of polling the session.

use crate::objects::ObjectId;
use crate::tools::ToolKind;
use std::cell::RefCell;

/// Events emitted by the editor session.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Object-model content changed (create, update, delete, undo, redo).
    DocumentChanged,
    /// The selection changed.
    SelectionChanged { selected: Option<ObjectId> },
    /// The active tool changed.
    ToolChanged { tool: ToolKind },
    /// The undo/redo stack depths changed.
    HistoryChanged {
        undo_depth: usize,
        redo_depth: usize,
    },
}

/// A subscriber to editor events.
pub trait EventHandler {
    fn handle_event(&mut self, event: &EditorEvent);
}

// Closures subscribe without a named handler type.
impl<F: FnMut(&EditorEvent)> EventHandler for F {
    fn handle_event(&mut self, event: &EditorEvent) {
        self(event)
    }
}

/// A simple event bus broadcasting editor events to registered handlers.
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.borrow().len())
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Create a new event bus.
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events.
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Emit an event to all registered handlers.
    pub fn emit(&self, event: &EditorEvent) {
        for handler in &mut *self.handlers.borrow_mut() {
            handler.handle_event(event);
        }
    }
}
