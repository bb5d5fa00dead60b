//! Crate-wide error type
//!
//! Mutating operations on the document validate their arguments up front,
//! since the layout math downstream divides by string count and measure
//! capacity. Cursor movement and hit testing clamp instead of failing.

use thiserror::Error;

/// Errors surfaced by document mutations and persistence.
#[derive(Error, Debug)]
pub enum TabError {
    /// String number outside 1-6.
    #[error("invalid string number {0} (expected 1-6)")]
    InvalidString(u8),

    /// Fret beyond the 24-fret fingerboard the note table assumes.
    #[error("invalid fret {0} (expected 0-24)")]
    InvalidFret(u8),

    /// Measure index outside the song.
    #[error("measure index {index} out of range (song has {count} measures)")]
    MeasureOutOfRange { index: usize, count: usize },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TabError>;
