//! Text field.

use super::{ObjectId, Rgba};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Independent bold/italic flags.
///
/// The flags form a set: toggling one never clears the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FontStyles {
    pub bold: bool,
    pub italic: bool,
}

impl FontStyles {
    /// Flip the bold flag, leaving italic untouched.
    pub fn toggle_bold(&mut self) {
        self.bold = !self.bold;
    }

    /// Flip the italic flag, leaving bold untouched.
    pub fn toggle_italic(&mut self) {
        self.italic = !self.italic;
    }

    /// Check if no flag is set.
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic
    }
}

/// Text decoration. Underline is a decoration, not a font-style flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
}

impl TextDecoration {
    /// Flip between underlined and plain.
    pub fn toggled(self) -> Self {
        match self {
            TextDecoration::None => TextDecoration::Underline,
            TextDecoration::Underline => TextDecoration::None,
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A text field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ObjectId,
    /// Anchor position (top-left corner of the text box).
    pub position: Point,
    /// Text box width.
    pub width: f64,
    /// The text content.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Bold/italic flags.
    pub font_styles: FontStyles,
    /// Underline decoration.
    pub decoration: TextDecoration,
    /// Horizontal alignment within the box.
    pub align: TextAlign,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
    /// Text color.
    pub fill: Rgba,
}

impl Text {
    /// Default font size.
    pub const DEFAULT_FONT_SIZE: f64 = 28.0;

    /// Default line height multiplier.
    pub const DEFAULT_LINE_HEIGHT: f64 = 1.5;

    /// Default text box width at creation.
    pub const DEFAULT_BOX_WIDTH: f64 = 200.0;

    /// Create a new text field.
    pub fn new(position: Point, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width: Self::DEFAULT_BOX_WIDTH,
            content,
            font_size: Self::DEFAULT_FONT_SIZE,
            font_styles: FontStyles::default(),
            decoration: TextDecoration::default(),
            align: TextAlign::default(),
            line_height: Self::DEFAULT_LINE_HEIGHT,
            fill: Rgba::black(),
        }
    }

    /// Create a new text field with a font size.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Set the text content.
    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }

    /// Get the text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Height based on line count, font size, and line height.
    fn box_height(&self) -> f64 {
        let line_count = self.content.lines().count().max(1);
        // lines() drops a trailing empty line
        let line_count = if self.content.ends_with('\n') {
            line_count + 1
        } else {
            line_count
        };
        line_count as f64 * self.font_size * self.line_height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.box_height(),
        )
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }
}
