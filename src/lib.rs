//! Guitar Tablature Editing Core
//!
//! Timing model, tablature document, layout engine, hit testing, keyboard
//! input and persistence for a guitar tab editor. Rendering surfaces stay
//! outside this crate: layout produces a plain draw-command list, and the
//! input state machine consumes platform-independent key identifiers.

pub mod editor;
pub mod error;
pub mod files;
pub mod input;
pub mod layout;
pub mod models;
pub mod timing;

// Re-export commonly used types
pub use editor::EditorState;
pub use error::{Result, TabError};
pub use input::{EditAction, Key, KeyboardHandler, Modifiers, MoveDirection};
pub use layout::{hit_test, layout_song, DrawCommand, Geometry, Style, ViewState};
pub use models::{Chord, Cursor, Duration, Measure, Note, Song, Technique, Tuning};
