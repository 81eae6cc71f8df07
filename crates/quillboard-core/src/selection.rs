//! Selection state.

use crate::objects::ObjectId;

/// The single object currently chosen for editing.
///
/// Transient UI state: never recorded in history. The session enforces the
/// invariants (only the select tool may set it, and it never outlives the
/// referenced object).
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: Option<ObjectId>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected object id, if any.
    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    /// Check if an object is selected.
    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selected == Some(id)
    }

    /// Select an object. Returns true if the selection changed.
    pub fn select(&mut self, id: ObjectId) -> bool {
        if self.selected == Some(id) {
            return false;
        }
        self.selected = Some(id);
        true
    }

    /// Clear the selection. Returns true if there was one.
    pub fn clear(&mut self) -> bool {
        self.selected.take().is_some()
    }
}
