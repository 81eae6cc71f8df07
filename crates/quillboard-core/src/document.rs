//! Canvas document: the canonical object store.

use crate::command::Command;
use crate::error::{CoreError, CoreResult};
use crate::objects::{CanvasObject, ObjectId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The canonical store of all canvas objects.
///
/// Objects are keyed by id; `z_order` holds paint order (insertion order,
/// later entries drawn on top). All mutation goes through [`apply`]
/// (`CanvasDocument::apply`), which either applies a command completely or
/// leaves the document untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasDocument {
    objects: HashMap<ObjectId, CanvasObject>,
    z_order: Vec<ObjectId>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an object by id.
    pub fn get(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.objects.get(&id)
    }

    /// Check if an object exists.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Objects in paint order (back to front).
    pub fn objects_ordered(&self) -> impl Iterator<Item = &CanvasObject> {
        self.z_order.iter().filter_map(|id| self.objects.get(id))
    }

    /// Apply a command. The only mutator.
    ///
    /// Mutation is immediately visible to subsequent reads. A failed apply
    /// changes nothing.
    pub fn apply(&mut self, command: &Command) -> CoreResult<()> {
        match command {
            Command::Create { object } => {
                let id = object.id();
                if self.objects.contains_key(&id) {
                    return Err(CoreError::DuplicateId(id));
                }
                self.objects.insert(id, object.clone());
                self.z_order.push(id);
                Ok(())
            }
            Command::Delete { object } => {
                let id = object.id();
                if self.objects.remove(&id).is_none() {
                    return Err(CoreError::NotFound(id));
                }
                self.z_order.retain(|&zid| zid != id);
                Ok(())
            }
            Command::Update { id, previous, next } => {
                if previous.id() != *id || next.id() != *id {
                    return Err(CoreError::InvalidState(format!(
                        "update snapshots disagree with target id {id}"
                    )));
                }
                let stored = self
                    .objects
                    .get(id)
                    .ok_or(CoreError::NotFound(*id))?;
                if stored.kind() != next.kind() {
                    return Err(CoreError::InvalidState(format!(
                        "update would change object {id} from {} to {}",
                        stored.kind().name(),
                        next.kind().name()
                    )));
                }
                self.objects.insert(*id, (**next).clone());
                Ok(())
            }
        }
    }

    /// Find objects at a point, front to back (for hit testing).
    pub fn objects_at_point(&self, point: Point, tolerance: f64) -> Vec<ObjectId> {
        self.z_order
            .iter()
            .rev()
            .filter_map(|&id| {
                self.objects
                    .get(&id)
                    .filter(|o| o.hit_test(point, tolerance))
                    .map(|_| id)
            })
            .collect()
    }

    /// Bounding box of all objects.
    pub fn bounds(&self) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        for object in self.objects.values() {
            let bounds = object.bounds();
            result = Some(match result {
                Some(r) => r.union(bounds),
                None => bounds,
            });
        }
        result
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{ObjectPatch, Rectangle, Stroke};
    use kurbo::Point;

    fn rect_object() -> CanvasObject {
        CanvasObject::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0))
    }

    #[test]
    fn test_create_and_get() {
        let mut doc = CanvasDocument::new();
        let object = rect_object();
        let id = object.id();

        doc.apply(&Command::Create { object }).unwrap();
        assert_eq!(doc.len(), 1);
        assert!(doc.get(id).is_some());
    }

    #[test]
    fn test_create_duplicate_id_fails() {
        let mut doc = CanvasDocument::new();
        let object = rect_object();
        let id = object.id();

        doc.apply(&Command::Create {
            object: object.clone(),
        })
        .unwrap();
        let err = doc.apply(&Command::Create { object }).unwrap_err();
        assert_eq!(err, CoreError::DuplicateId(id));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_delete_unknown_id_fails() {
        let mut doc = CanvasDocument::new();
        let object = rect_object();
        let id = object.id();

        let err = doc.apply(&Command::Delete { object }).unwrap_err();
        assert_eq!(err, CoreError::NotFound(id));
    }

    #[test]
    fn test_update_replaces_attributes() {
        let mut doc = CanvasDocument::new();
        let object = rect_object();
        let id = object.id();
        doc.apply(&Command::Create {
            object: object.clone(),
        })
        .unwrap();

        let patch = ObjectPatch {
            width: Some(42.0),
            ..Default::default()
        };
        let next = patch.apply_to(&object);
        doc.apply(&Command::Update {
            id,
            previous: Box::new(object),
            next: Box::new(next.clone()),
        })
        .unwrap();

        assert_eq!(doc.get(id), Some(&next));
    }

    #[test]
    fn test_update_unknown_id_fails_without_changes() {
        let mut doc = CanvasDocument::new();
        let object = rect_object();
        let id = object.id();

        let err = doc
            .apply(&Command::Update {
                id,
                previous: Box::new(object.clone()),
                next: Box::new(object),
            })
            .unwrap_err();
        assert_eq!(err, CoreError::NotFound(id));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_update_cannot_change_variant() {
        let mut doc = CanvasDocument::new();
        let object = rect_object();
        let id = object.id();
        doc.apply(&Command::Create {
            object: object.clone(),
        })
        .unwrap();

        // Forge a stroke snapshot carrying the rectangle's id
        let mut stroke = Stroke::new();
        stroke.id = id;
        let forged = CanvasObject::Stroke(stroke);
        let err = doc
            .apply(&Command::Update {
                id,
                previous: Box::new(object.clone()),
                next: Box::new(forged),
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidState(_)));
        assert_eq!(doc.get(id), Some(&object));
    }

    #[test]
    fn test_paint_order_is_insertion_order() {
        let mut doc = CanvasDocument::new();
        let first = rect_object();
        let second = rect_object();
        let first_id = first.id();
        let second_id = second.id();

        doc.apply(&Command::Create { object: first }).unwrap();
        doc.apply(&Command::Create { object: second }).unwrap();

        let ordered: Vec<ObjectId> = doc.objects_ordered().map(|o| o.id()).collect();
        assert_eq!(ordered, vec![first_id, second_id]);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut doc = CanvasDocument::new();
        doc.apply(&Command::Create {
            object: rect_object(),
        })
        .unwrap();

        let json = serde_json::to_string(&doc).unwrap();
        let restored: CanvasDocument = serde_json::from_str(&json).unwrap();

        let original: Vec<_> = doc.objects_ordered().collect();
        let round_tripped: Vec<_> = restored.objects_ordered().collect();
        assert_eq!(original, round_tripped);
    }

    #[test]
    fn test_objects_at_point_front_first() {
        let mut doc = CanvasDocument::new();
        let back = CanvasObject::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0));
        let front = CanvasObject::Rectangle(Rectangle::new(Point::new(50.0, 50.0), 100.0, 100.0));
        let back_id = back.id();
        let front_id = front.id();

        doc.apply(&Command::Create { object: back }).unwrap();
        doc.apply(&Command::Create { object: front }).unwrap();

        // (100, 50) lies on the back rectangle's right border and on the
        // front rectangle's top border
        let hits = doc.objects_at_point(Point::new(100.0, 50.0), 1.0);
        assert_eq!(hits, vec![front_id, back_id]);
    }
}
