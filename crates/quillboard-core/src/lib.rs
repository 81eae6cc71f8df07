//! Quillboard Core Library
//!
//! Canvas object model, tool/selection state, and undo/redo engine for the
//! Quillboard whiteboard. Rendering, toolbar layout, and panel widgets are
//! presentation collaborators that read from and mutate this core through
//! [`EditorSession`].

pub mod command;
pub mod document;
pub mod error;
pub mod events;
pub mod history;
pub mod objects;
pub mod selection;
pub mod session;
pub mod text_panel;
pub mod tools;

pub use command::Command;
pub use document::CanvasDocument;
pub use error::{CoreError, CoreResult};
pub use events::{EditorEvent, EventBus, EventHandler};
pub use history::History;
pub use objects::{
    CanvasObject, Ellipse, FontStyles, Line, ObjectId, ObjectKind, ObjectPatch, ObjectStyle,
    Rectangle, Rgba, Stroke, Text, TextAlign, TextDecoration,
};
pub use selection::Selection;
pub use session::EditorSession;
pub use text_panel::{TextStylePanel, TextStyleState};
pub use tools::{ToolKind, ToolManager, ToolState};
