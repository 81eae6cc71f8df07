//! Line shape.

use super::{point_to_segment_dist, ObjectId, ObjectStyle};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight line segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ObjectId,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Stroke styling.
    pub style: ObjectStyle,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style: ObjectStyle::default(),
        }
    }

    pub fn bounds(&self) -> Rect {
        let half = self.style.stroke_width / 2.0;
        Rect::new(
            self.start.x.min(self.end.x) - half,
            self.start.y.min(self.end.y) - half,
            self.start.x.max(self.end.x) + half,
            self.start.y.max(self.end.y) + half,
        )
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dist = point_to_segment_dist(point, self.start, self.end);
        dist <= tolerance + self.style.stroke_width / 2.0
    }
}
