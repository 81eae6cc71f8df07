//! Freehand pen stroke.

use super::{point_to_polyline_dist, ObjectId, ObjectStyle};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand pen stroke (ordered series of points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: ObjectId,
    /// Points in the stroke path, in draw order.
    pub points: Vec<Point>,
    /// Stroke styling.
    pub style: ObjectStyle,
}

impl Stroke {
    /// Create a new empty stroke.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            points: Vec::new(),
            style: ObjectStyle::default(),
        }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style: ObjectStyle::default(),
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }
        // Account for stroke width
        let half = self.style.stroke_width / 2.0;
        Rect::new(min_x - half, min_y - half, max_x + half, max_y + half)
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.points.is_empty() {
            return false;
        }
        if self.points.len() == 1 {
            let p = self.points[0];
            let dist = ((point.x - p.x).powi(2) + (point.y - p.y).powi(2)).sqrt();
            return dist <= tolerance + self.style.stroke_width / 2.0;
        }
        let dist = point_to_polyline_dist(point, &self.points);
        dist <= tolerance + self.style.stroke_width / 2.0
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new()
    }
}
