//! Document location triple
//!
//! A cursor addresses one editable cell of the document: a measure, a tick
//! position inside it, and a string. Hit testing resolves pointer
//! coordinates to the same triple.

use serde::{Deserialize, Serialize};

/// A (measure, position, string) location in a song.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Measure index, 0-based.
    pub measure: usize,

    /// Tick offset within the measure.
    pub position: u32,

    /// String number, 1-6.
    pub string: u8,
}

impl Cursor {
    pub fn new(measure: usize, position: u32, string: u8) -> Self {
        Self {
            measure,
            position,
            string,
        }
    }

    /// Cursor at the start of the document.
    pub fn origin() -> Self {
        Self {
            measure: 0,
            position: 0,
            string: 1,
        }
    }
}
