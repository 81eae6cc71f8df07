//! Tool system: the active input mode and its pointer interaction state.

use crate::objects::{CanvasObject, Ellipse, Line, ObjectStyle, Rectangle, Stroke, Text};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Available tools. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Pen,
    Eraser,
    Rectangle,
    Ellipse,
    Line,
    Text,
}

/// State of a pointer interaction.
#[derive(Debug, Clone, Copy, Default)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// Tool is actively being used (pointer is down).
    Active {
        /// Starting point of the interaction.
        start: Point,
        /// Current point of the interaction.
        current: Point,
    },
}

/// Manages the current tool and its in-progress pointer interaction.
///
/// An interaction is plain accumulator state: nothing reaches the document
/// or the history until `end` finalizes it, and `cancel` abandons it
/// without a trace.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the pointer interaction.
    pub state: ToolState,
    /// Accumulated points for an in-progress pen stroke.
    stroke_points: Vec<Point>,
    /// Style applied to new objects (the toolbar's color and line weight).
    pub current_style: ObjectStyle,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            state: ToolState::default(),
            stroke_points: Vec::new(),
            current_style: ObjectStyle::default(),
        }
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool, resetting any in-progress interaction.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.cancel();
    }

    /// Begin a pointer interaction.
    pub fn begin(&mut self, point: Point) {
        if self.current_tool == ToolKind::Pen {
            self.stroke_points.clear();
            self.stroke_points.push(point);
        }
        self.state = ToolState::Active {
            start: point,
            current: point,
        };
    }

    /// Update the current interaction with a new pointer position.
    pub fn update(&mut self, point: Point) {
        if let ToolState::Active { current, .. } = &mut self.state {
            *current = point;
            if self.current_tool == ToolKind::Pen {
                self.stroke_points.push(point);
            }
        }
    }

    /// End the current interaction and return the finalized object, if the
    /// tool produces one.
    pub fn end(&mut self, point: Point) -> Option<CanvasObject> {
        let ToolState::Active { start, .. } = self.state else {
            return None;
        };
        self.update(point);
        let object = self.build_object(start, point);
        self.cancel();
        object
    }

    /// Abandon the current interaction without emitting anything.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
        self.stroke_points.clear();
    }

    /// Check if a pointer interaction is active.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Active { .. })
    }

    /// The object the current interaction would produce if finalized now,
    /// for live feedback while dragging.
    pub fn preview_object(&self) -> Option<CanvasObject> {
        if let ToolState::Active { start, current } = self.state {
            self.build_object(start, current)
        } else {
            None
        }
    }

    fn build_object(&self, start: Point, end: Point) -> Option<CanvasObject> {
        let mut object = match self.current_tool {
            ToolKind::Pen => {
                if self.stroke_points.len() < 2 {
                    return None;
                }
                Some(CanvasObject::Stroke(Stroke::from_points(
                    self.stroke_points.clone(),
                )))
            }
            ToolKind::Rectangle => Some(CanvasObject::Rectangle(Rectangle::from_corners(
                start, end,
            ))),
            ToolKind::Ellipse => {
                let rect = Rect::new(
                    start.x.min(end.x),
                    start.y.min(end.y),
                    start.x.max(end.x),
                    start.y.max(end.y),
                );
                Some(CanvasObject::Ellipse(Ellipse::from_rect(rect)))
            }
            ToolKind::Line => Some(CanvasObject::Line(Line::new(start, end))),
            // Text is created at the press position with empty content
            ToolKind::Text => Some(CanvasObject::Text(Text::new(start, String::new()))),
            ToolKind::Select | ToolKind::Eraser => None,
        };

        // Apply the toolbar's current style to stroke-styled objects
        if let Some(object) = &mut object {
            match object {
                CanvasObject::Stroke(o) => o.style = self.current_style.clone(),
                CanvasObject::Rectangle(o) => o.style = self.current_style.clone(),
                CanvasObject::Ellipse(o) => o.style = self.current_style.clone(),
                CanvasObject::Line(o) => o.style = self.current_style.clone(),
                CanvasObject::Text(_) => {}
            }
        }

        object
    }
}
