//! Geometry constants for layout and hit testing
//!
//! Layout is a pure function of the document and these constants; the same
//! engine renders the on-screen editor and the fixed-page export, only the
//! constants change. Hit testing must use the identical geometry to stay the
//! exact inverse of layout.

use serde::{Deserialize, Serialize};

/// Spacing constants and viewport parameters for one rendering target.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Geometry {
    /// Total horizontal span available, including labels and margins.
    pub width: f64,

    /// Measures laid out per staff row.
    pub measures_per_line: usize,

    /// Vertical distance between adjacent strings.
    pub string_spacing: f64,

    /// Horizontal margin between the label block and the first measure,
    /// and after the last measure.
    pub measure_margin: f64,

    /// Top margin above the first staff row.
    pub line_margin: f64,

    /// Width reserved for open-string name labels.
    pub label_width: f64,

    /// Total height of one staff row (strings + rhythm area + gap).
    pub line_height: f64,

    /// Inset from a measure's bar line to its first note column.
    pub note_inset: f64,

    /// Gap between string 6 and the top of the rhythm stems.
    pub rhythm_offset: f64,

    /// Rhythm stem length.
    pub stem_height: f64,

    /// Vertical distance between stacked beam lines.
    pub beam_spacing: f64,

    /// Length of a partial-beam stub extending right of a single member.
    pub beam_stub_length: f64,

    /// Horizontal and vertical run of a single-note flag stroke.
    pub flag_dx: f64,
    pub flag_dy: f64,

    /// Quarter-note marker dot radius and offset below the stem.
    pub rhythm_dot_radius: f64,
    pub rhythm_dot_offset: f64,

    /// Connection arc rise above the note line.
    pub arc_height: f64,

    /// Horizontal pull-in of arc endpoints from the note centers.
    pub arc_inset: f64,

    /// Lift of the arc endpoints above the string line.
    pub arc_lift: f64,

    /// Minimum note background box width and its height.
    pub note_box_width: f64,
    pub note_box_height: f64,

    /// Base font size for fret numbers.
    pub note_font_size: f64,
}

impl Geometry {
    /// Screen-scale constants (pixels), matching the interactive editor.
    pub fn screen() -> Self {
        let string_spacing = 20.0;
        let line_margin = 40.0;
        Self {
            width: 800.0,
            measures_per_line: 4,
            string_spacing,
            measure_margin: 20.0,
            line_margin,
            label_width: 30.0,
            // Six strings plus rhythm area plus inter-row gap.
            line_height: string_spacing * 7.0 + line_margin + 30.0,
            note_inset: 5.0,
            rhythm_offset: 12.0,
            stem_height: 14.0,
            beam_spacing: 5.0,
            beam_stub_length: 6.0,
            flag_dx: 7.0,
            flag_dy: 3.0,
            rhythm_dot_radius: 2.0,
            rhythm_dot_offset: 3.0,
            arc_height: 12.0,
            arc_inset: 10.0,
            arc_lift: 5.0,
            note_box_width: 18.0,
            note_box_height: 16.0,
            note_font_size: 12.0,
        }
    }

    /// Page-scale constants (points) for A4 export: same layout algorithm
    /// at a denser physical scale.
    pub fn page() -> Self {
        let string_spacing = 12.0;
        Self {
            // A4 content width: 595pt page minus two 50pt margins.
            width: 495.0,
            measures_per_line: 4,
            string_spacing,
            measure_margin: 2.5,
            line_margin: 0.0,
            label_width: 25.0,
            // Five string gaps plus line spacing plus rhythm area.
            line_height: string_spacing * 5.0 + 30.0 + 25.0,
            note_inset: 5.0,
            rhythm_offset: 8.0,
            stem_height: 10.0,
            beam_spacing: 3.0,
            beam_stub_length: 5.0,
            flag_dx: 5.0,
            flag_dy: 2.0,
            rhythm_dot_radius: 1.5,
            rhythm_dot_offset: 2.0,
            arc_height: 8.0,
            arc_inset: 6.0,
            arc_lift: 4.0,
            note_box_width: 14.0,
            note_box_height: 12.0,
            note_font_size: 10.0,
        }
    }

    /// Same constants with a different viewport width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Same constants with a different measures-per-row count.
    pub fn with_measures_per_line(mut self, measures_per_line: usize) -> Self {
        self.measures_per_line = measures_per_line.max(1);
        self
    }

    /// Top y coordinate of staff row `line`.
    pub fn row_y(&self, line: usize) -> f64 {
        self.line_margin + line as f64 * self.line_height
    }

    /// Width of one measure when `count` measures share a row.
    pub fn measure_width(&self, count: usize) -> f64 {
        (self.width - self.label_width - 2.0 * self.measure_margin) / count.max(1) as f64
    }

    /// X coordinate where measures start on every row.
    pub fn content_x(&self) -> f64 {
        self.label_width + self.measure_margin
    }

    /// Width of one eighth-note column inside a measure of the given tick
    /// capacity. Horizontal layout quantizes all positions to these columns.
    pub fn position_width(&self, measure_width: f64, capacity_ticks: u32) -> f64 {
        let positions = (capacity_ticks / 8).max(1);
        (measure_width - 2.0 * self.note_inset) / positions as f64
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::screen()
    }
}
