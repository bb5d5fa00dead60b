//! Display list: the output contract of the layout engine
//!
//! Layout produces an ordered list of drawing primitives with literal
//! coordinates and an enumerated style id. Front-ends (a screen canvas, a
//! page painter) translate each primitive into their native drawing calls;
//! no platform graphics type appears here.

use serde::{Deserialize, Serialize};

/// Style/color id attached to every primitive.
///
/// The adapter maps each id to a concrete pen, brush and font. Keeping the
/// mapping outside the engine keeps layout a pure function.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    /// Horizontal string line.
    StringLine,
    /// Vertical measure boundary.
    BarLine,
    /// Measure sequence number.
    MeasureNumber,
    /// Chord-name label above a measure.
    ChordName,
    /// Open-string name at the left edge of a row.
    StringLabel,
    /// Fret number text.
    NoteText,
    /// Background box behind a plain note.
    NoteBackground,
    /// Fret/label text of a note carrying a technique.
    TechniqueText,
    /// Accented background box behind a technique note.
    TechniqueBackground,
    /// Backing box behind a technique label.
    LabelBackground,
    /// Rest glyph text.
    RestText,
    /// Background box behind a rest.
    RestBackground,
    /// Rhythm stem below the staff.
    Stem,
    /// Rhythm beam, stub or flag stroke.
    Beam,
    /// Quarter-note marker dot.
    RhythmDot,
    /// Slur/tie/technique connection arc.
    Connection,
    /// Edit cursor box.
    Cursor,
    /// Pitch name annotation under a note.
    NoteName,
}

/// One drawing primitive. Coordinates are in the unit of the geometry that
/// produced the list (pixels on screen, points on a page).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        style: Style,
    },

    /// A single cubic Bezier curve.
    Curve {
        x1: f64,
        y1: f64,
        cx1: f64,
        cy1: f64,
        cx2: f64,
        cy2: f64,
        x2: f64,
        y2: f64,
        style: Style,
    },

    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        /// Corner rounding radius, 0 for square corners.
        radius: f64,
        style: Style,
    },

    Text {
        text: String,
        x: f64,
        y: f64,
        size: f64,
        style: Style,
    },

    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        style: Style,
    },
}

impl DrawCommand {
    /// Style id of this primitive, whatever its shape.
    pub fn style(&self) -> Style {
        match self {
            DrawCommand::Line { style, .. }
            | DrawCommand::Curve { style, .. }
            | DrawCommand::Rect { style, .. }
            | DrawCommand::Text { style, .. }
            | DrawCommand::Ellipse { style, .. } => *style,
        }
    }
}
