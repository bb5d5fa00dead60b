//! Tablature document model
//!
//! The entity graph: a [`Song`] owns ordered [`Measure`]s and a chord
//! library; each measure owns its [`Note`]s; the [`Tuning`] is a value type.

pub mod chord;
pub mod cursor;
pub mod measure;
pub mod note;
pub mod song;
pub mod tuning;

pub use chord::{Barre, Chord};
pub use cursor::Cursor;
pub use measure::{Measure, MAX_FRET};
pub use note::{Duration, Note, Technique};
pub use song::Song;
pub use tuning::{Tuning, STRING_COUNT};
