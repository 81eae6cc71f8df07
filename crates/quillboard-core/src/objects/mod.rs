//! Canvas object definitions.
//!
//! Every drawable object is one variant of [`CanvasObject`]; the fields valid
//! for a variant live only on that variant.

mod ellipse;
mod line;
mod rectangle;
mod stroke;
mod text;

pub use ellipse::Ellipse;
pub use line::Line;
pub use rectangle::Rectangle;
pub use stroke::Stroke;
pub use text::{FontStyles, Text, TextAlign, TextDecoration};

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for canvas objects.
pub type ObjectId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Stroke styling shared by pen strokes and outline shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectStyle {
    /// Stroke color.
    pub stroke_color: Rgba,
    /// Stroke width.
    pub stroke_width: f64,
}

impl ObjectStyle {
    /// Default stroke width for new objects.
    pub const DEFAULT_STROKE_WIDTH: f64 = 5.0;

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Set the stroke color from a peniko Color.
    pub fn set_stroke(&mut self, color: Color) {
        self.stroke_color = color.into();
    }
}

impl Default for ObjectStyle {
    fn default() -> Self {
        Self {
            stroke_color: Rgba::black(),
            stroke_width: Self::DEFAULT_STROKE_WIDTH,
        }
    }
}

/// Object type discriminant exposed to presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Pen,
    Rectangle,
    Ellipse,
    Line,
    Text,
}

impl ObjectKind {
    /// Stable lowercase name for the kind.
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Pen => "pen",
            ObjectKind::Rectangle => "rectangle",
            ObjectKind::Ellipse => "ellipse",
            ObjectKind::Line => "line",
            ObjectKind::Text => "text",
        }
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let pv = kurbo::Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Enum wrapper for all object types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CanvasObject {
    Stroke(Stroke),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Line(Line),
    Text(Text),
}

impl CanvasObject {
    pub fn id(&self) -> ObjectId {
        match self {
            CanvasObject::Stroke(o) => o.id,
            CanvasObject::Rectangle(o) => o.id,
            CanvasObject::Ellipse(o) => o.id,
            CanvasObject::Line(o) => o.id,
            CanvasObject::Text(o) => o.id,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            CanvasObject::Stroke(_) => ObjectKind::Pen,
            CanvasObject::Rectangle(_) => ObjectKind::Rectangle,
            CanvasObject::Ellipse(_) => ObjectKind::Ellipse,
            CanvasObject::Line(_) => ObjectKind::Line,
            CanvasObject::Text(_) => ObjectKind::Text,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            CanvasObject::Stroke(o) => o.bounds(),
            CanvasObject::Rectangle(o) => o.bounds(),
            CanvasObject::Ellipse(o) => o.bounds(),
            CanvasObject::Line(o) => o.bounds(),
            CanvasObject::Text(o) => o.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            CanvasObject::Stroke(o) => o.hit_test(point, tolerance),
            CanvasObject::Rectangle(o) => o.hit_test(point, tolerance),
            CanvasObject::Ellipse(o) => o.hit_test(point, tolerance),
            CanvasObject::Line(o) => o.hit_test(point, tolerance),
            CanvasObject::Text(o) => o.hit_test(point, tolerance),
        }
    }

    /// Stroke styling, for the variants that carry it. Text has its own
    /// typographic attributes and returns `None`.
    pub fn style(&self) -> Option<&ObjectStyle> {
        match self {
            CanvasObject::Stroke(o) => Some(&o.style),
            CanvasObject::Rectangle(o) => Some(&o.style),
            CanvasObject::Ellipse(o) => Some(&o.style),
            CanvasObject::Line(o) => Some(&o.style),
            CanvasObject::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            CanvasObject::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            CanvasObject::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Partial attribute set accepted by `update_object`.
///
/// `Some` fields overwrite the stored object's attributes, `None` fields
/// leave them unchanged; fields that do not apply to the target variant are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectPatch {
    // Geometry
    pub position: Option<Point>,
    pub points: Option<Vec<Point>>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub center: Option<Point>,
    pub radius_x: Option<f64>,
    pub radius_y: Option<f64>,
    pub start: Option<Point>,
    pub end: Option<Point>,
    // Stroke styling
    pub stroke_color: Option<Rgba>,
    pub stroke_width: Option<f64>,
    // Text attributes
    pub content: Option<String>,
    pub font_size: Option<f64>,
    pub font_styles: Option<FontStyles>,
    pub decoration: Option<TextDecoration>,
    pub align: Option<TextAlign>,
    pub line_height: Option<f64>,
    pub fill: Option<Rgba>,
}

impl ObjectPatch {
    /// Produce the object that results from merging this patch over `object`.
    /// The id is never touched.
    pub fn apply_to(&self, object: &CanvasObject) -> CanvasObject {
        let mut next = object.clone();
        match &mut next {
            CanvasObject::Stroke(o) => {
                if let Some(points) = &self.points {
                    o.points = points.clone();
                }
                merge_style(&mut o.style, self);
            }
            CanvasObject::Rectangle(o) => {
                if let Some(position) = self.position {
                    o.position = position;
                }
                if let Some(width) = self.width {
                    o.width = width;
                }
                if let Some(height) = self.height {
                    o.height = height;
                }
                merge_style(&mut o.style, self);
            }
            CanvasObject::Ellipse(o) => {
                if let Some(center) = self.center {
                    o.center = center;
                }
                if let Some(radius_x) = self.radius_x {
                    o.radius_x = radius_x;
                }
                if let Some(radius_y) = self.radius_y {
                    o.radius_y = radius_y;
                }
                merge_style(&mut o.style, self);
            }
            CanvasObject::Line(o) => {
                if let Some(start) = self.start {
                    o.start = start;
                }
                if let Some(end) = self.end {
                    o.end = end;
                }
                merge_style(&mut o.style, self);
            }
            CanvasObject::Text(o) => {
                if let Some(position) = self.position {
                    o.position = position;
                }
                if let Some(width) = self.width {
                    o.width = width;
                }
                if let Some(content) = &self.content {
                    o.content = content.clone();
                }
                if let Some(font_size) = self.font_size {
                    o.font_size = font_size;
                }
                if let Some(font_styles) = self.font_styles {
                    o.font_styles = font_styles;
                }
                if let Some(decoration) = self.decoration {
                    o.decoration = decoration;
                }
                if let Some(align) = self.align {
                    o.align = align;
                }
                if let Some(line_height) = self.line_height {
                    o.line_height = line_height;
                }
                if let Some(fill) = self.fill {
                    o.fill = fill;
                }
            }
        }
        next
    }
}

fn merge_style(style: &mut ObjectStyle, patch: &ObjectPatch) {
    if let Some(stroke_color) = patch.stroke_color {
        style.stroke_color = stroke_color;
    }
    if let Some(stroke_width) = patch.stroke_width {
        style.stroke_width = stroke_width;
    }
}
