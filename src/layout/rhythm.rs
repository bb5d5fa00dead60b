//! Rhythm notation: beam grouping and stem/beam layout
//!
//! One rhythm column exists per distinct tick position in a measure; the
//! first note found at a position is its representative (strings sounding
//! together at one tick share a single rhythm glyph). Consecutive columns of
//! eighth-note-or-shorter value beam together when no more than one
//! eighth-note slot separates them. The same grouping drives both the screen
//! and page renderings.

use crate::layout::display_list::{DrawCommand, Style};
use crate::layout::geometry::Geometry;
use crate::models::{Duration, Measure};

/// A distinct tick position and the duration governing its rhythm glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RhythmColumn {
    pub position: u32,
    pub duration: Duration,
}

/// Number of beam lines a duration carries.
///
/// -1: no stem at all (whole, half). 0: stem only (quarter). 1-3: stem plus
/// that many beams (eighth through thirty-second).
pub fn beam_count(duration: Duration) -> i32 {
    match duration {
        Duration::Whole | Duration::Half => -1,
        Duration::Quarter => 0,
        Duration::Eighth => 1,
        Duration::Sixteenth => 2,
        Duration::ThirtySecond => 3,
    }
}

/// Collapse a measure's notes into ordered rhythm columns, one per distinct
/// position, each represented by the first note found there.
pub fn rhythm_columns(measure: &Measure) -> Vec<RhythmColumn> {
    let mut columns: Vec<RhythmColumn> = Vec::new();
    // Notes are kept (position, string)-sorted, so the first note seen at
    // each position is the representative.
    for note in &measure.notes {
        if columns.last().map(|c| c.position) != Some(note.position) {
            columns.push(RhythmColumn {
                position: note.position,
                duration: note.duration,
            });
        }
    }
    columns
}

/// Group beamable columns into runs, left to right.
///
/// A column joins the open group only when its eighth-note-slot distance to
/// the previously grouped column, `(pos - prev_pos)/8`, is at most one.
/// Columns without beams (quarter and longer) close any open group without
/// joining it. Returns index lists into `columns`; singleton groups are kept
/// (they render as flags rather than beams).
pub fn group_columns(columns: &[RhythmColumn]) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();

    for (i, column) in columns.iter().enumerate() {
        if beam_count(column.duration) > 0 {
            match current.last() {
                None => current.push(i),
                Some(&prev) => {
                    let prev_pos = columns[prev].position;
                    let slot_diff = (column.position - prev_pos) / 8;
                    if slot_diff <= 1 {
                        current.push(i);
                    } else {
                        groups.push(std::mem::take(&mut current));
                        current.push(i);
                    }
                }
            }
        } else if !current.is_empty() {
            groups.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }

    groups
}

/// Emit the rhythm area of one measure: stems, beams, stubs, flags and
/// quarter-note marker dots, placed below string 6.
///
/// `x` is the measure's left bar line, `y` the row top, `position_width`
/// the eighth-note column width already computed for the measure.
pub fn layout_rhythm(
    measure: &Measure,
    x: f64,
    y: f64,
    position_width: f64,
    geometry: &Geometry,
    out: &mut Vec<DrawCommand>,
) {
    let columns = rhythm_columns(measure);
    if columns.is_empty() {
        return;
    }

    let rhythm_y = y + 5.0 * geometry.string_spacing + geometry.rhythm_offset;
    let stem_height = geometry.stem_height;
    let column_x = |position: u32| x + geometry.note_inset + (position / 8) as f64 * position_width;

    // Stems for every column of quarter value or shorter.
    for column in &columns {
        if beam_count(column.duration) >= 0 {
            let nx = column_x(column.position);
            out.push(DrawCommand::Line {
                x1: nx,
                y1: rhythm_y,
                x2: nx,
                y2: rhythm_y + stem_height,
                style: Style::Stem,
            });
        }
    }

    for group in group_columns(&columns) {
        let beam_y = |level: i32| rhythm_y + stem_height - 1.0 - level as f64 * geometry.beam_spacing;

        if group.len() >= 2 {
            let first_x = column_x(columns[group[0]].position);
            let last_x = column_x(columns[group[group.len() - 1]].position);
            let min_beams = group
                .iter()
                .map(|&i| beam_count(columns[i].duration))
                .min()
                .unwrap_or(0);

            // Full-span beams shared by the whole group.
            for level in 0..min_beams {
                out.push(DrawCommand::Line {
                    x1: first_x,
                    y1: beam_y(level),
                    x2: last_x,
                    y2: beam_y(level),
                    style: Style::Beam,
                });
            }

            // Extra beam levels render as short stubs to the right of the
            // member that carries them.
            for &i in &group {
                let nx = column_x(columns[i].position);
                for level in min_beams..beam_count(columns[i].duration) {
                    out.push(DrawCommand::Line {
                        x1: nx,
                        y1: beam_y(level),
                        x2: nx + geometry.beam_stub_length,
                        y2: beam_y(level),
                        style: Style::Beam,
                    });
                }
            }
        } else {
            // A lone beamable column gets diagonal flag strokes.
            let column = columns[group[0]];
            let nx = column_x(column.position);
            for level in 0..beam_count(column.duration) {
                out.push(DrawCommand::Line {
                    x1: nx,
                    y1: beam_y(level),
                    x2: nx + geometry.flag_dx,
                    y2: beam_y(level) + geometry.flag_dy,
                    style: Style::Beam,
                });
            }
        }
    }

    // Quarter columns carry a marker dot below the stem so a bare stem is
    // distinguishable from longer values (a simplified value marker, not an
    // augmentation dot).
    for column in &columns {
        if column.duration == Duration::Quarter {
            let nx = column_x(column.position);
            out.push(DrawCommand::Ellipse {
                cx: nx,
                cy: rhythm_y + stem_height + geometry.rhythm_dot_offset,
                rx: geometry.rhythm_dot_radius,
                ry: geometry.rhythm_dot_radius,
                style: Style::RhythmDot,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Note;

    fn measure_with(positions_durations: &[(u32, Duration)]) -> Measure {
        let mut m = Measure::new(1);
        for &(position, duration) in positions_durations {
            let mut note = Note::new(1, 0, position);
            note.duration = duration;
            m.add_note(note).unwrap();
        }
        m
    }

    #[test]
    fn test_beam_count_table() {
        assert_eq!(beam_count(Duration::Whole), -1);
        assert_eq!(beam_count(Duration::Half), -1);
        assert_eq!(beam_count(Duration::Quarter), 0);
        assert_eq!(beam_count(Duration::Eighth), 1);
        assert_eq!(beam_count(Duration::Sixteenth), 2);
        assert_eq!(beam_count(Duration::ThirtySecond), 3);
    }

    #[test]
    fn test_columns_take_first_note_per_position() {
        let mut m = Measure::new(1);
        let mut low = Note::new(3, 2, 0);
        low.duration = Duration::Eighth;
        m.add_note(low).unwrap();
        let mut high = Note::new(1, 0, 0);
        high.duration = Duration::Sixteenth;
        m.add_note(high).unwrap();

        let columns = rhythm_columns(&m);
        assert_eq!(columns.len(), 1);
        // String 1 sorts first, so its duration governs the column.
        assert_eq!(columns[0].duration, Duration::Sixteenth);
    }

    #[test]
    fn test_four_consecutive_eighths_form_one_group() {
        let m = measure_with(&[
            (0, Duration::Eighth),
            (4, Duration::Eighth),
            (8, Duration::Eighth),
            (12, Duration::Eighth),
        ]);
        let columns = rhythm_columns(&m);
        let groups = group_columns(&columns);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0], vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_quarter_closes_group_without_joining() {
        let m = measure_with(&[
            (0, Duration::Eighth),
            (4, Duration::Eighth),
            (8, Duration::Eighth),
            (12, Duration::Eighth),
            (16, Duration::Quarter),
        ]);
        let columns = rhythm_columns(&m);
        let groups = group_columns(&columns);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 4);
    }

    #[test]
    fn test_gap_wider_than_one_slot_splits_groups() {
        let m = measure_with(&[
            (0, Duration::Eighth),
            (4, Duration::Eighth),
            // 20 - 4 = 16 ticks = two eighth slots away.
            (20, Duration::Eighth),
            (24, Duration::Eighth),
        ]);
        let columns = rhythm_columns(&m);
        let groups = group_columns(&columns);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], vec![0, 1]);
        assert_eq!(groups[1], vec![2, 3]);
    }

    #[test]
    fn test_singleton_group_kept_for_flags() {
        let m = measure_with(&[(0, Duration::Sixteenth), (16, Duration::Quarter)]);
        let columns = rhythm_columns(&m);
        let groups = group_columns(&columns);
        assert_eq!(groups, vec![vec![0]]);
    }

    #[test]
    fn test_mixed_group_renders_common_beam_and_stubs() {
        let m = measure_with(&[
            (0, Duration::Eighth),
            (4, Duration::Sixteenth),
            (8, Duration::Eighth),
        ]);
        let mut out = Vec::new();
        let g = Geometry::screen();
        layout_rhythm(&m, 50.0, 40.0, 43.0, &g, &mut out);

        let stems = out.iter().filter(|c| c.style() == Style::Stem).count();
        let beams = out.iter().filter(|c| c.style() == Style::Beam).count();
        assert_eq!(stems, 3);
        // min_beams = 1 full-span beam plus one stub for the sixteenth.
        assert_eq!(beams, 2);
    }

    #[test]
    fn test_quarter_gets_marker_dot() {
        let m = measure_with(&[(0, Duration::Quarter)]);
        let mut out = Vec::new();
        let g = Geometry::screen();
        layout_rhythm(&m, 50.0, 40.0, 43.0, &g, &mut out);

        assert_eq!(out.iter().filter(|c| c.style() == Style::Stem).count(), 1);
        assert_eq!(
            out.iter().filter(|c| c.style() == Style::RhythmDot).count(),
            1
        );
        // No beams or flags for a bare quarter.
        assert_eq!(out.iter().filter(|c| c.style() == Style::Beam).count(), 0);
    }

    #[test]
    fn test_whole_note_draws_nothing() {
        let m = measure_with(&[(0, Duration::Whole)]);
        let mut out = Vec::new();
        let g = Geometry::screen();
        layout_rhythm(&m, 50.0, 40.0, 43.0, &g, &mut out);
        assert!(out.is_empty());
    }
}
