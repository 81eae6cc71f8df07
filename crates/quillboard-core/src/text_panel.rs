//! Two-way bridge between the selected text object and the style panel.
//!
//! Selection changes push a snapshot of the object's attributes into the
//! panel's working state; panel edits flow back through the session's
//! `update_object`, never a direct write. When the selection is empty or
//! not a text object, edits change only the working state and no mutation
//! is emitted.

use crate::error::CoreResult;
use crate::objects::{FontStyles, ObjectId, ObjectPatch, Rgba, Text, TextAlign, TextDecoration};
use crate::session::EditorSession;

/// The panel's working values.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyleState {
    pub size: f64,
    pub styles: FontStyles,
    pub decoration: TextDecoration,
    pub color: Rgba,
    pub align: TextAlign,
    pub line_height: f64,
}

impl Default for TextStyleState {
    fn default() -> Self {
        Self {
            size: Text::DEFAULT_FONT_SIZE,
            styles: FontStyles::default(),
            decoration: TextDecoration::default(),
            color: Rgba::black(),
            align: TextAlign::default(),
            line_height: Text::DEFAULT_LINE_HEIGHT,
        }
    }
}

/// Synchronizes the style-editing surface with the selected text object.
#[derive(Debug, Clone, Default)]
pub struct TextStylePanel {
    state: TextStyleState,
}

impl TextStylePanel {
    /// Create a panel with default working values.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current working values, for the panel's widgets.
    pub fn state(&self) -> &TextStyleState {
        &self.state
    }

    /// The selected text object, if the selection is a text object.
    fn selected_text(session: &EditorSession) -> Option<(ObjectId, &Text)> {
        let id = session.selected_object_id()?;
        let text = session.document().get(id)?.as_text()?;
        Some((id, text))
    }

    /// Whether panel edits currently reach an object.
    pub fn has_target(session: &EditorSession) -> bool {
        Self::selected_text(session).is_some()
    }

    /// Selection → panel: snapshot the selected text object's attributes
    /// into the working state. Call on every selection change. A non-text
    /// selection leaves the working state as it was; subsequent edits will
    /// not emit mutations until a text object is selected again.
    pub fn sync_selection(&mut self, session: &EditorSession) {
        if let Some((_, text)) = Self::selected_text(session) {
            self.state = TextStyleState {
                size: text.font_size,
                styles: text.font_styles,
                decoration: text.decoration,
                color: text.fill,
                align: text.align,
                line_height: text.line_height,
            };
        }
    }

    /// Panel → object: route a patch through the session if a text object
    /// is selected.
    fn push_patch(session: &mut EditorSession, patch: ObjectPatch) -> CoreResult<()> {
        let target = Self::selected_text(session).map(|(id, _)| id);
        match target {
            Some(id) => session.update_object(id, patch),
            None => Ok(()),
        }
    }

    /// Set the font size.
    pub fn set_size(&mut self, session: &mut EditorSession, size: f64) -> CoreResult<()> {
        self.state.size = size;
        Self::push_patch(
            session,
            ObjectPatch {
                font_size: Some(size),
                ..Default::default()
            },
        )
    }

    /// Toggle the bold flag. Italic is untouched.
    pub fn toggle_bold(&mut self, session: &mut EditorSession) -> CoreResult<()> {
        self.state.styles.toggle_bold();
        self.push_styles(session)
    }

    /// Toggle the italic flag. Bold is untouched.
    pub fn toggle_italic(&mut self, session: &mut EditorSession) -> CoreResult<()> {
        self.state.styles.toggle_italic();
        self.push_styles(session)
    }

    fn push_styles(&self, session: &mut EditorSession) -> CoreResult<()> {
        Self::push_patch(
            session,
            ObjectPatch {
                font_styles: Some(self.state.styles),
                ..Default::default()
            },
        )
    }

    /// Toggle the underline decoration. Font-style flags are untouched.
    pub fn toggle_underline(&mut self, session: &mut EditorSession) -> CoreResult<()> {
        self.state.decoration = self.state.decoration.toggled();
        Self::push_patch(
            session,
            ObjectPatch {
                decoration: Some(self.state.decoration),
                ..Default::default()
            },
        )
    }

    /// Set the text color.
    pub fn set_color(&mut self, session: &mut EditorSession, color: Rgba) -> CoreResult<()> {
        self.state.color = color;
        Self::push_patch(
            session,
            ObjectPatch {
                fill: Some(color),
                ..Default::default()
            },
        )
    }

    /// Set the horizontal alignment.
    pub fn set_align(&mut self, session: &mut EditorSession, align: TextAlign) -> CoreResult<()> {
        self.state.align = align;
        Self::push_patch(
            session,
            ObjectPatch {
                align: Some(align),
                ..Default::default()
            },
        )
    }

    /// Set the line height multiplier.
    pub fn set_line_height(
        &mut self,
        session: &mut EditorSession,
        line_height: f64,
    ) -> CoreResult<()> {
        self.state.line_height = line_height;
        Self::push_patch(
            session,
            ObjectPatch {
                line_height: Some(line_height),
                ..Default::default()
            },
        )
    }

    /// Replace the text content (the panel's text editing field).
    pub fn set_content(&mut self, session: &mut EditorSession, content: String) -> CoreResult<()> {
        Self::push_patch(
            session,
            ObjectPatch {
                content: Some(content),
                ..Default::default()
            },
        )
    }
}
