//! Editor session: the single owned aggregate and mutation surface.

use crate::command::Command;
use crate::document::CanvasDocument;
use crate::error::{CoreError, CoreResult};
use crate::events::{EditorEvent, EventBus};
use crate::history::History;
use crate::objects::{CanvasObject, ObjectId, ObjectPatch, ObjectStyle, Rgba};
use crate::selection::Selection;
use crate::tools::{ToolKind, ToolManager};
use kurbo::Point;

/// Hit-test tolerance for selecting objects.
pub const HIT_TOLERANCE: f64 = 4.0;

/// Hit-test tolerance for the eraser.
pub const ERASE_TOLERANCE: f64 = 8.0;

/// One editing session: object model, tool/selection state, and history,
/// behind a single mutation surface.
///
/// Presentation layers hold a reference to the session and never an
/// independent copy of its state. Every mutation entry point routes through
/// a [`Command`], so the history stays consistent with pointer-driven
/// drawing, toolbar actions, and property-panel edits alike.
#[derive(Debug, Default)]
pub struct EditorSession {
    document: CanvasDocument,
    tools: ToolManager,
    selection: Selection,
    history: History,
    events: EventBus,
}

impl EditorSession {
    /// Create a new empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the document, for rendering layers.
    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    /// The tool manager (current tool, interaction state, preview).
    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    /// The event bus; presentation layers subscribe here.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// The currently selected object id, if any.
    pub fn selected_object_id(&self) -> Option<ObjectId> {
        self.selection.selected()
    }

    /// The currently selected object, if any.
    pub fn selected_object(&self) -> Option<&CanvasObject> {
        self.selection.selected().and_then(|id| self.document.get(id))
    }

    /// The active tool.
    pub fn current_tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    /// The style applied to newly created objects.
    pub fn current_style(&self) -> &ObjectStyle {
        &self.tools.current_style
    }

    /// Set the stroke color for newly created objects (toolbar color picker).
    pub fn set_stroke_color(&mut self, color: Rgba) {
        self.tools.current_style.stroke_color = color;
    }

    /// Set the stroke width for newly created objects (toolbar line weight).
    pub fn set_stroke_width(&mut self, width: f64) {
        self.tools.current_style.stroke_width = width;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Set the active tool. Always succeeds; clears the selection unless the
    /// new tool is `Select`, and abandons any in-progress interaction.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
        if tool != ToolKind::Select && self.selection.clear() {
            self.events.emit(&EditorEvent::SelectionChanged { selected: None });
        }
        self.events.emit(&EditorEvent::ToolChanged { tool });
    }

    /// Select an object. No-op returning `false` when the active tool is not
    /// `Select` or the id is unknown; `true` when the selection changed.
    pub fn select(&mut self, id: ObjectId) -> bool {
        if self.tools.current_tool != ToolKind::Select {
            log::debug!("select ignored: active tool is {:?}", self.tools.current_tool);
            return false;
        }
        if !self.document.contains(id) {
            log::debug!("select ignored: unknown object {id}");
            return false;
        }
        if self.selection.select(id) {
            self.events.emit(&EditorEvent::SelectionChanged { selected: Some(id) });
            true
        } else {
            false
        }
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        if self.selection.clear() {
            self.events.emit(&EditorEvent::SelectionChanged { selected: None });
        }
    }

    /// Insert a new object, recording a reversible create.
    pub fn create_object(&mut self, object: CanvasObject) -> CoreResult<ObjectId> {
        let id = object.id();
        self.commit(Command::Create { object })?;
        Ok(id)
    }

    /// Merge `patch` over the object's attributes, recording a reversible
    /// update carrying both snapshots.
    pub fn update_object(&mut self, id: ObjectId, patch: ObjectPatch) -> CoreResult<()> {
        let current = self.document.get(id).ok_or(CoreError::NotFound(id))?;
        let next = patch.apply_to(current);
        let command = Command::Update {
            id,
            previous: Box::new(current.clone()),
            next: Box::new(next),
        };
        self.commit(command)
    }

    /// Delete an object, recording a reversible delete with the full prior
    /// snapshot. No-op when the id is absent (delete-selection semantics).
    /// Clears the selection in the same operation when it referenced the id.
    pub fn delete_object(&mut self, id: ObjectId) -> CoreResult<()> {
        let Some(object) = self.document.get(id) else {
            log::debug!("delete ignored: unknown object {id}");
            return Ok(());
        };
        let command = Command::Delete {
            object: object.clone(),
        };
        self.commit(command)
    }

    /// Delete the currently selected object, if any (toolbar delete button).
    pub fn delete_selection(&mut self) -> CoreResult<()> {
        match self.selection.selected() {
            Some(id) => self.delete_object(id),
            None => Ok(()),
        }
    }

    /// Undo the most recent mutation. No-op returning `Ok(false)` on an
    /// empty stack.
    pub fn undo(&mut self) -> CoreResult<bool> {
        let changed = self.history.undo(&mut self.document)?;
        if changed {
            self.after_document_change();
        }
        Ok(changed)
    }

    /// Re-apply the most recently undone mutation. No-op returning
    /// `Ok(false)` on an empty stack.
    pub fn redo(&mut self) -> CoreResult<bool> {
        let changed = self.history.redo(&mut self.document)?;
        if changed {
            self.after_document_change();
        }
        Ok(changed)
    }

    /// Pointer pressed on the canvas.
    pub fn pointer_pressed(&mut self, point: Point) -> CoreResult<()> {
        match self.tools.current_tool {
            ToolKind::Select => {
                let hit = self
                    .document
                    .objects_at_point(point, HIT_TOLERANCE)
                    .into_iter()
                    .next();
                match hit {
                    Some(id) => {
                        self.select(id);
                    }
                    None => self.clear_selection(),
                }
                Ok(())
            }
            ToolKind::Eraser => {
                self.tools.begin(point);
                self.erase_at(point)
            }
            _ => {
                self.tools.begin(point);
                Ok(())
            }
        }
    }

    /// Pointer moved while pressed.
    pub fn pointer_moved(&mut self, point: Point) -> CoreResult<()> {
        if !self.tools.is_active() {
            return Ok(());
        }
        self.tools.update(point);
        if self.tools.current_tool == ToolKind::Eraser {
            self.erase_at(point)?;
        }
        Ok(())
    }

    /// Pointer released: finalize the interaction. Returns the id of the
    /// created object, if the tool produced one.
    pub fn pointer_released(&mut self, point: Point) -> CoreResult<Option<ObjectId>> {
        match self.tools.end(point) {
            Some(object) => self.create_object(object).map(Some),
            None => Ok(None),
        }
    }

    /// Abandon the in-progress interaction (pointer left the canvas).
    /// Nothing reaches the history.
    pub fn cancel_interaction(&mut self) {
        self.tools.cancel();
    }

    fn erase_at(&mut self, point: Point) -> CoreResult<()> {
        for id in self.document.objects_at_point(point, ERASE_TOLERANCE) {
            self.delete_object(id)?;
        }
        Ok(())
    }

    /// Apply a command, record it, and notify. Either everything happens or
    /// nothing does.
    fn commit(&mut self, command: Command) -> CoreResult<()> {
        if let Err(err) = self.document.apply(&command) {
            log::warn!("rejected command: {err}");
            return Err(err);
        }
        self.history.push(command);
        self.after_document_change();
        Ok(())
    }

    /// Re-establish the selection invariant and notify observers after any
    /// document change, including undo/redo.
    fn after_document_change(&mut self) {
        if let Some(id) = self.selection.selected() {
            if !self.document.contains(id) && self.selection.clear() {
                self.events.emit(&EditorEvent::SelectionChanged { selected: None });
            }
        }
        self.events.emit(&EditorEvent::DocumentChanged);
        self.events.emit(&EditorEvent::HistoryChanged {
            undo_depth: self.history.undo_depth(),
            redo_depth: self.history.redo_depth(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{Rectangle, Text};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn add_rect(session: &mut EditorSession) -> ObjectId {
        let rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0);
        session
            .create_object(CanvasObject::Rectangle(rect))
            .unwrap()
    }

    fn add_text(session: &mut EditorSession, content: &str) -> ObjectId {
        let text = Text::new(Point::new(10.0, 10.0), content.to_string());
        session.create_object(CanvasObject::Text(text)).unwrap()
    }

    #[test]
    fn test_create_pushes_undo_and_clears_redo() {
        let mut session = EditorSession::new();
        add_rect(&mut session);
        session.undo().unwrap();
        assert!(session.can_redo());

        add_rect(&mut session);
        assert!(!session.can_redo());
        assert_eq!(session.undo_depth(), 1);
    }

    #[test]
    fn test_update_is_reversible() {
        let mut session = EditorSession::new();
        let id = add_rect(&mut session);

        session
            .update_object(
                id,
                ObjectPatch {
                    width: Some(250.0),
                    ..Default::default()
                },
            )
            .unwrap();

        session.undo().unwrap();
        match session.document().get(id).unwrap() {
            CanvasObject::Rectangle(r) => assert!((r.width - 100.0).abs() < f64::EPSILON),
            _ => panic!("expected rectangle"),
        }

        session.redo().unwrap();
        match session.document().get(id).unwrap() {
            CanvasObject::Rectangle(r) => assert!((r.width - 250.0).abs() < f64::EPSILON),
            _ => panic!("expected rectangle"),
        }
    }

    #[test]
    fn test_update_unknown_id_changes_nothing() {
        let mut session = EditorSession::new();
        add_rect(&mut session);
        let unknown = uuid::Uuid::new_v4();

        let err = session
            .update_object(unknown, ObjectPatch::default())
            .unwrap_err();
        assert_eq!(err, CoreError::NotFound(unknown));
        assert_eq!(session.undo_depth(), 1);
        assert_eq!(session.document().len(), 1);
    }

    #[test]
    fn test_delete_absent_id_is_noop() {
        let mut session = EditorSession::new();
        add_rect(&mut session);

        session.delete_object(uuid::Uuid::new_v4()).unwrap();
        assert_eq!(session.document().len(), 1);
        assert_eq!(session.undo_depth(), 1);
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut session = EditorSession::new();
        let id = add_rect(&mut session);
        session.set_tool(ToolKind::Select);
        assert!(session.select(id));

        session.delete_object(id).unwrap();
        assert_eq!(session.selected_object_id(), None);
        assert!(session.document().is_empty());
    }

    #[test]
    fn test_delete_other_object_keeps_selection() {
        let mut session = EditorSession::new();
        let kept = add_rect(&mut session);
        let removed = add_rect(&mut session);
        session.set_tool(ToolKind::Select);
        session.select(kept);

        session.delete_object(removed).unwrap();
        assert_eq!(session.selected_object_id(), Some(kept));
    }

    #[test]
    fn test_undo_of_create_clears_selection() {
        let mut session = EditorSession::new();
        let id = add_rect(&mut session);
        session.set_tool(ToolKind::Select);
        session.select(id);

        // Undoing the create removes the selected object; the selection
        // must not outlive it.
        session.undo().unwrap();
        assert_eq!(session.selected_object_id(), None);
    }

    #[test]
    fn test_select_requires_select_tool() {
        let mut session = EditorSession::new();
        let id = add_rect(&mut session);

        session.set_tool(ToolKind::Pen);
        assert!(!session.select(id));
        assert_eq!(session.selected_object_id(), None);

        session.set_tool(ToolKind::Select);
        assert!(session.select(id));
    }

    #[test]
    fn test_select_unknown_id_is_noop() {
        let mut session = EditorSession::new();
        session.set_tool(ToolKind::Select);
        assert!(!session.select(uuid::Uuid::new_v4()));
    }

    #[test]
    fn test_tool_switch_clears_selection() {
        let mut session = EditorSession::new();
        let id = add_rect(&mut session);
        session.set_tool(ToolKind::Select);
        session.select(id);

        session.set_tool(ToolKind::Pen);
        assert_eq!(session.selected_object_id(), None);

        // Switching to select keeps whatever selection exists
        session.set_tool(ToolKind::Select);
        session.select(id);
        session.set_tool(ToolKind::Select);
        assert_eq!(session.selected_object_id(), Some(id));
    }

    #[test]
    fn test_undo_redo_do_not_resurrect_selection_or_tool() {
        let mut session = EditorSession::new();
        let id = add_rect(&mut session);
        session.set_tool(ToolKind::Select);
        session.select(id);
        session.set_tool(ToolKind::Pen);

        session.undo().unwrap();
        // Only object-model content is replayed
        assert_eq!(session.current_tool(), ToolKind::Pen);
        assert_eq!(session.selected_object_id(), None);
    }

    #[test]
    fn test_pen_drag_creates_undoable_stroke() {
        let mut session = EditorSession::new();
        session.set_tool(ToolKind::Pen);

        session.pointer_pressed(Point::new(0.0, 0.0)).unwrap();
        session.pointer_moved(Point::new(10.0, 10.0)).unwrap();
        let id = session.pointer_released(Point::new(20.0, 20.0)).unwrap();

        assert!(id.is_some());
        assert_eq!(session.document().len(), 1);
        assert_eq!(session.undo_depth(), 1);

        session.undo().unwrap();
        assert!(session.document().is_empty());
    }

    #[test]
    fn test_abandoned_stroke_never_reaches_history() {
        let mut session = EditorSession::new();
        session.set_tool(ToolKind::Pen);

        session.pointer_pressed(Point::new(0.0, 0.0)).unwrap();
        session.pointer_moved(Point::new(10.0, 10.0)).unwrap();
        session.cancel_interaction();

        assert!(session.document().is_empty());
        assert_eq!(session.undo_depth(), 0);

        // A release after cancellation creates nothing either
        let id = session.pointer_released(Point::new(20.0, 20.0)).unwrap();
        assert_eq!(id, None);
    }

    #[test]
    fn test_eraser_deletes_hit_objects_undoably() {
        let mut session = EditorSession::new();
        let id = add_rect(&mut session);

        session.set_tool(ToolKind::Eraser);
        // On the rectangle's border
        session.pointer_pressed(Point::new(0.0, 50.0)).unwrap();
        assert!(session.document().is_empty());

        session.undo().unwrap();
        assert!(session.document().get(id).is_some());
    }

    #[test]
    fn test_select_tool_click_picks_topmost() {
        let mut session = EditorSession::new();
        let id = add_rect(&mut session);

        session.set_tool(ToolKind::Select);
        session.pointer_pressed(Point::new(0.0, 50.0)).unwrap();
        assert_eq!(session.selected_object_id(), Some(id));

        // Clicking empty canvas clears
        session.pointer_pressed(Point::new(500.0, 500.0)).unwrap();
        assert_eq!(session.selected_object_id(), None);
    }

    #[test]
    fn test_events_emitted_on_mutation() {
        let mut session = EditorSession::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.events().subscribe(Box::new(move |event: &EditorEvent| {
            sink.borrow_mut().push(event.clone());
        }));

        add_rect(&mut session);
        assert!(seen.borrow().contains(&EditorEvent::DocumentChanged));
        assert!(seen.borrow().contains(&EditorEvent::HistoryChanged {
            undo_depth: 1,
            redo_depth: 0,
        }));
    }

    #[test]
    fn test_scenario_rect_and_text_roundtrip() {
        let mut session = EditorSession::new();

        // create rectangle R1 at (0,0,100,100), then text T1 "hi"
        let r1 = add_rect(&mut session);
        let t1 = add_text(&mut session, "hi");

        session.set_tool(ToolKind::Select);
        assert!(session.select(t1));

        session
            .update_object(
                t1,
                ObjectPatch {
                    font_size: Some(40.0),
                    ..Default::default()
                },
            )
            .unwrap();

        session.undo().unwrap();
        assert!(
            (session.document().get(t1).unwrap().as_text().unwrap().font_size - 28.0).abs()
                < f64::EPSILON
        );

        session.redo().unwrap();
        assert!(
            (session.document().get(t1).unwrap().as_text().unwrap().font_size - 40.0).abs()
                < f64::EPSILON
        );

        session.delete_object(t1).unwrap();
        assert_eq!(session.selected_object_id(), None);
        let remaining: Vec<ObjectId> =
            session.document().objects_ordered().map(|o| o.id()).collect();
        assert_eq!(remaining, vec![r1]);
    }
}
