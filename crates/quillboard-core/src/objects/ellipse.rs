//! Ellipse shape.

use super::{ObjectId, ObjectStyle};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ellipse shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub(crate) id: ObjectId,
    /// Center point.
    pub center: Point,
    /// Horizontal radius.
    pub radius_x: f64,
    /// Vertical radius.
    pub radius_y: f64,
    /// Stroke styling.
    pub style: ObjectStyle,
}

impl Ellipse {
    /// Create a new ellipse.
    pub fn new(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius_x,
            radius_y,
            style: ObjectStyle::default(),
        }
    }

    /// Create a circle.
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(center, radius, radius)
    }

    /// Create an ellipse from a bounding rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.center(), rect.width() / 2.0, rect.height() / 2.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius_x,
            self.center.y - self.radius_y,
            self.center.x + self.radius_x,
            self.center.y + self.radius_y,
        )
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        // Outline only: hit inside the outer ellipse but outside the inner one
        let reach = tolerance + self.style.stroke_width / 2.0;
        let inside = |rx: f64, ry: f64| -> bool {
            if rx <= 0.0 || ry <= 0.0 {
                return false;
            }
            let nx = (point.x - self.center.x) / rx;
            let ny = (point.y - self.center.y) / ry;
            nx * nx + ny * ny <= 1.0
        };
        inside(self.radius_x + reach, self.radius_y + reach)
            && !inside(self.radius_x - reach, self.radius_y - reach)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipse_creation() {
        let ellipse = Ellipse::new(Point::new(50.0, 50.0), 30.0, 20.0);
        assert!((ellipse.radius_x - 30.0).abs() < f64::EPSILON);
        assert!((ellipse.radius_y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_rect() {
        let ellipse = Ellipse::from_rect(Rect::new(0.0, 0.0, 100.0, 60.0));
        assert!((ellipse.center.x - 50.0).abs() < f64::EPSILON);
        assert!((ellipse.center.y - 30.0).abs() < f64::EPSILON);
        assert!((ellipse.radius_x - 50.0).abs() < f64::EPSILON);
        assert!((ellipse.radius_y - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_outline() {
        let ellipse = Ellipse::circle(Point::new(0.0, 0.0), 50.0);
        assert!(ellipse.hit_test(Point::new(50.0, 0.0), 1.0));
        assert!(!ellipse.hit_test(Point::new(0.0, 0.0), 1.0));
        assert!(!ellipse.hit_test(Point::new(100.0, 0.0), 1.0));
    }

    #[test]
    fn test_bounds() {
        let ellipse = Ellipse::new(Point::new(50.0, 50.0), 30.0, 20.0);
        let bounds = ellipse.bounds();
        assert!((bounds.x0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
    }
}
