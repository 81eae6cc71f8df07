//! Reversible mutation commands.
//!
//! Every mutation of the document is expressed as one [`Command`]. Commands
//! carry full snapshots of the affected object, so a command and its inverse
//! round-trip the object's attributes exactly.

use crate::objects::{CanvasObject, ObjectId};
use serde::{Deserialize, Serialize};

/// One reversible mutation, the unit of undo/redo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Insert a new object.
    Create { object: CanvasObject },
    /// Remove an object. Carries the full prior snapshot so the deletion
    /// can be undone with the original id.
    Delete { object: CanvasObject },
    /// Replace an object's attributes.
    Update {
        id: ObjectId,
        previous: Box<CanvasObject>,
        next: Box<CanvasObject>,
    },
}

impl Command {
    /// The id of the object this command touches.
    pub fn target(&self) -> ObjectId {
        match self {
            Command::Create { object } | Command::Delete { object } => object.id(),
            Command::Update { id, .. } => *id,
        }
    }

    /// The logical inverse: applying a command and then its inverse leaves
    /// the document unchanged.
    pub fn inverted(&self) -> Command {
        match self {
            Command::Create { object } => Command::Delete {
                object: object.clone(),
            },
            Command::Delete { object } => Command::Create {
                object: object.clone(),
            },
            Command::Update { id, previous, next } => Command::Update {
                id: *id,
                previous: next.clone(),
                next: previous.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{ObjectPatch, Rectangle};
    use kurbo::Point;

    #[test]
    fn test_create_inverts_to_delete() {
        let rect = CanvasObject::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0));
        let command = Command::Create {
            object: rect.clone(),
        };
        assert_eq!(command.inverted(), Command::Delete { object: rect });
    }

    #[test]
    fn test_update_inverse_swaps_snapshots() {
        let rect = CanvasObject::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0));
        let patch = ObjectPatch {
            width: Some(50.0),
            ..Default::default()
        };
        let next = patch.apply_to(&rect);
        let command = Command::Update {
            id: rect.id(),
            previous: Box::new(rect.clone()),
            next: Box::new(next.clone()),
        };

        let inverse = command.inverted();
        assert_eq!(
            inverse,
            Command::Update {
                id: rect.id(),
                previous: Box::new(next),
                next: Box::new(rect),
            }
        );
        // Double inversion is the identity
        assert_eq!(inverse.inverted(), command);
    }

    #[test]
    fn test_target_id() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0);
        let id = rect.id;
        let command = Command::Create {
            object: CanvasObject::Rectangle(rect),
        };
        assert_eq!(command.target(), id);
    }
}
