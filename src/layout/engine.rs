//! Layout engine
//!
//! Turns a document slice plus geometry constants into a display list. The
//! engine is a pure function: it holds no state between invocations, never
//! fails for a structurally valid document, and emits an empty list for
//! degenerate geometry rather than dividing by zero.

use crate::layout::display_list::{DrawCommand, Style};
use crate::layout::geometry::Geometry;
use crate::layout::rhythm;
use crate::models::{Cursor, Measure, Note, Song, Tuning};

/// Open-string labels shown at the left of every staff row.
const STRING_LABELS: [&str; 6] = ["e", "B", "G", "D", "A", "E"];

/// Per-render view parameters that are not geometry.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewState {
    /// Edit cursor to highlight, if any.
    pub cursor: Option<Cursor>,

    /// Annotate fretted notes with their pitch names.
    pub show_note_names: bool,
}

/// Lay out an entire song as wrapped staff rows.
pub fn layout_song(song: &Song, geometry: &Geometry, view: &ViewState) -> Vec<DrawCommand> {
    let mut out = Vec::new();
    if song.measures.is_empty() || geometry.width <= geometry.content_x() {
        return out;
    }

    let mut measure_index = 0;
    let mut row = 0;
    while measure_index < song.measures.len() {
        let y = geometry.row_y(row);
        let count = geometry
            .measures_per_line
            .min(song.measures.len() - measure_index)
            .max(1);
        let measure_width = geometry.measure_width(count);

        layout_string_labels(y, geometry, &mut out);
        layout_string_lines(y, geometry, &mut out);

        let mut x = geometry.content_x();
        for i in 0..count {
            let index = measure_index + i;
            layout_measure(
                &song.measures[index],
                index,
                x,
                y,
                measure_width,
                &song.tuning,
                view,
                geometry,
                &mut out,
            );
            x += measure_width;
        }

        measure_index += count;
        row += 1;
    }

    out
}

/// Lay out one measure at the given rectangle.
///
/// Emits, in order: bar lines, measure number, chord label, connection
/// arcs, note glyphs, rhythm notation and finally the cursor box when the
/// cursor sits in this measure.
#[allow(clippy::too_many_arguments)]
pub fn layout_measure(
    measure: &Measure,
    measure_index: usize,
    x: f64,
    y: f64,
    width: f64,
    tuning: &Tuning,
    view: &ViewState,
    geometry: &Geometry,
    out: &mut Vec<DrawCommand>,
) {
    let staff_height = 5.0 * geometry.string_spacing;

    out.push(DrawCommand::Line {
        x1: x,
        y1: y,
        x2: x,
        y2: y + staff_height,
        style: Style::BarLine,
    });
    out.push(DrawCommand::Line {
        x1: x + width,
        y1: y,
        x2: x + width,
        y2: y + staff_height,
        style: Style::BarLine,
    });

    out.push(DrawCommand::Text {
        text: measure.number.to_string(),
        x: x + 2.0,
        y: y - 15.0,
        size: 10.0,
        style: Style::MeasureNumber,
    });

    if let Some(chord_name) = &measure.chord_name {
        if !chord_name.is_empty() {
            out.push(DrawCommand::Text {
                text: chord_name.clone(),
                x: x + 5.0,
                y: y - 35.0,
                size: 14.0,
                style: Style::ChordName,
            });
        }
    }

    let position_width = geometry.position_width(width, measure.capacity_ticks());
    let column_x = |position: u32| x + geometry.note_inset + (position / 8) as f64 * position_width;
    let string_y = |string: u8| y + (string - 1) as f64 * geometry.string_spacing;

    layout_connections(measure, &column_x, &string_y, geometry, out);

    for note in &measure.notes {
        layout_note(
            note,
            column_x(note.position),
            string_y(note.string),
            tuning,
            view,
            geometry,
            out,
        );
    }

    rhythm::layout_rhythm(measure, x, y, position_width, geometry, out);

    if let Some(cursor) = view.cursor {
        if cursor.measure == measure_index {
            let half = geometry.note_box_height / 2.0;
            out.push(DrawCommand::Rect {
                x: column_x(cursor.position) - half,
                y: string_y(cursor.string.clamp(1, 6)) - half,
                width: geometry.note_box_height,
                height: geometry.note_box_height,
                radius: 0.0,
                style: Style::Cursor,
            });
        }
    }
}

/// Arcs between temporally adjacent notes on the same string, drawn when
/// the later note carries a connecting technique (hammer-on, pull-off,
/// slide) or the earlier note is tied. Rests never anchor an arc.
fn layout_connections(
    measure: &Measure,
    column_x: &dyn Fn(u32) -> f64,
    string_y: &dyn Fn(u8) -> f64,
    geometry: &Geometry,
    out: &mut Vec<DrawCommand>,
) {
    for string in 1..=6u8 {
        // Notes are position-sorted within the measure already.
        let on_string: Vec<&Note> = measure.notes.iter().filter(|n| n.string == string).collect();

        for pair in on_string.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            let connected = next.technique.is_connecting() || current.tied_to_next;
            if !connected || current.is_rest || next.is_rest {
                continue;
            }

            let x1 = column_x(current.position) + geometry.arc_inset;
            let x2 = column_x(next.position) - geometry.arc_inset;
            let note_y = string_y(string);
            let span = x2 - x1;

            out.push(DrawCommand::Curve {
                x1,
                y1: note_y - geometry.arc_lift,
                cx1: x1 + span * 0.25,
                cy1: note_y - geometry.arc_height,
                cx2: x1 + span * 0.75,
                cy2: note_y - geometry.arc_height,
                x2,
                y2: note_y - geometry.arc_lift,
                style: Style::Connection,
            });
        }
    }
}

/// One note glyph: background box, fret text, technique label, optional
/// pitch name. Rests render as a fixed dash box regardless of duration
/// (duration shows up in the rhythm area instead).
fn layout_note(
    note: &Note,
    x: f64,
    y: f64,
    tuning: &Tuning,
    view: &ViewState,
    geometry: &Geometry,
    out: &mut Vec<DrawCommand>,
) {
    if note.is_rest {
        let box_width = geometry.note_box_width;
        out.push(DrawCommand::Rect {
            x: x - box_width / 2.0,
            y: y - geometry.note_box_height / 2.0,
            width: box_width,
            height: geometry.note_box_height,
            radius: 2.0,
            style: Style::RestBackground,
        });
        out.push(DrawCommand::Text {
            text: "\u{2014}".to_string(),
            x,
            y: y - geometry.note_box_height / 2.0,
            size: geometry.note_font_size + 2.0,
            style: Style::RestText,
        });
        return;
    }

    let has_technique = !note.technique.is_none();
    let display_text = if note.technique.contains(crate::models::Technique::MUTE) {
        "X".to_string()
    } else {
        note.fret.to_string()
    };

    // Approximate glyph width from the character count; adapters that can
    // measure text may widen the box but the column position is fixed.
    let text_width = display_text.chars().count() as f64 * geometry.note_font_size * 0.6;
    let box_width = (text_width + 6.0).max(geometry.note_box_width);
    let box_height = geometry.note_box_height;

    out.push(DrawCommand::Rect {
        x: x - box_width / 2.0,
        y: y - box_height / 2.0,
        width: box_width,
        height: box_height,
        radius: if has_technique { 3.0 } else { 2.0 },
        style: if has_technique {
            Style::TechniqueBackground
        } else {
            Style::NoteBackground
        },
    });

    out.push(DrawCommand::Text {
        text: display_text,
        x: x - text_width / 2.0,
        y: y - geometry.note_font_size / 2.0 - 1.0,
        size: geometry.note_font_size,
        style: if has_technique {
            Style::TechniqueText
        } else {
            Style::NoteText
        },
    });

    let label = note.technique.label();
    if !label.is_empty() {
        let label_width = label.chars().count() as f64 * (geometry.note_font_size - 2.0) * 0.6;
        let label_x = x - label_width / 2.0;
        let label_y = y - geometry.note_box_height - 4.0;
        out.push(DrawCommand::Rect {
            x: label_x - 2.0,
            y: label_y - 1.0,
            width: label_width + 4.0,
            height: geometry.note_font_size,
            radius: 2.0,
            style: Style::LabelBackground,
        });
        out.push(DrawCommand::Text {
            text: label,
            x: label_x,
            y: label_y,
            size: geometry.note_font_size - 2.0,
            style: Style::TechniqueText,
        });
    }

    if view.show_note_names {
        out.push(DrawCommand::Text {
            text: tuning.note_name(note.string, note.fret),
            x: x - 8.0,
            y: y + geometry.note_box_height / 2.0 + 2.0,
            size: geometry.note_font_size - 3.0,
            style: Style::NoteName,
        });
    }
}

fn layout_string_labels(y: f64, geometry: &Geometry, out: &mut Vec<DrawCommand>) {
    for (i, label) in STRING_LABELS.iter().enumerate() {
        out.push(DrawCommand::Text {
            text: (*label).to_string(),
            x: 10.0,
            y: y + i as f64 * geometry.string_spacing - 6.0,
            size: geometry.note_font_size,
            style: Style::StringLabel,
        });
    }
}

fn layout_string_lines(y: f64, geometry: &Geometry, out: &mut Vec<DrawCommand>) {
    for i in 0..6 {
        let string_y = y + i as f64 * geometry.string_spacing;
        out.push(DrawCommand::Line {
            x1: geometry.label_width,
            y1: string_y,
            x2: geometry.width - geometry.measure_margin,
            y2: string_y,
            style: Style::StringLine,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Duration, Technique};

    fn song_with_notes() -> Song {
        let mut song = Song::create_new("T", 4);
        song.measures[0].add_note(Note::new(1, 3, 0)).unwrap();
        song.measures[0].add_note(Note::new(2, 5, 8)).unwrap();
        song
    }

    #[test]
    fn test_narrow_viewport_yields_nothing() {
        let song = Song::create_new("T", 2);
        // A viewport narrower than the label block yields nothing.
        let narrow = Geometry::screen().with_width(10.0);
        assert!(layout_song(&song, &narrow, &ViewState::default()).is_empty());
    }

    #[test]
    fn test_song_layout_emits_rows() {
        let song = song_with_notes();
        let g = Geometry::screen();
        let commands = layout_song(&song, &g, &ViewState::default());

        // One row: 6 labels, 6 string lines, 8 bar lines, 4 measure numbers.
        let labels = commands
            .iter()
            .filter(|c| c.style() == Style::StringLabel)
            .count();
        let strings = commands
            .iter()
            .filter(|c| c.style() == Style::StringLine)
            .count();
        let bars = commands.iter().filter(|c| c.style() == Style::BarLine).count();
        assert_eq!(labels, 6);
        assert_eq!(strings, 6);
        assert_eq!(bars, 8);
    }

    #[test]
    fn test_rows_wrap_at_measures_per_line() {
        let song = Song::create_new("T", 6);
        let g = Geometry::screen();
        let commands = layout_song(&song, &g, &ViewState::default());
        // Six measures across two rows of four and two.
        let strings = commands
            .iter()
            .filter(|c| c.style() == Style::StringLine)
            .count();
        assert_eq!(strings, 12);
    }

    #[test]
    fn test_note_glyph_position_quantizes_to_eighth_columns() {
        let mut song = Song::create_new("T", 1);
        let mut a = Note::new(1, 3, 0);
        a.duration = Duration::Sixteenth;
        let mut b = Note::new(2, 4, 2);
        b.duration = Duration::Sixteenth;
        song.measures[0].add_note(a).unwrap();
        song.measures[0].add_note(b).unwrap();

        let g = Geometry::screen();
        let commands = layout_song(&song, &g, &ViewState::default());
        let note_xs: Vec<f64> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { x, style, .. } if *style == Style::NoteText => Some(*x),
                _ => None,
            })
            .collect();

        // Positions 0 and 2 share the first eighth-note column; only the
        // glyph centering (text width) differs.
        assert_eq!(note_xs.len(), 2);
        assert!((note_xs[0] - note_xs[1]).abs() < 0.001);
    }

    #[test]
    fn test_connection_arc_for_hammer_on() {
        let mut song = Song::create_new("T", 1);
        song.measures[0].add_note(Note::new(1, 5, 0)).unwrap();
        let mut target = Note::new(1, 7, 8);
        target.technique = Technique::HAMMER_ON;
        song.measures[0].add_note(target).unwrap();

        let g = Geometry::screen();
        let commands = layout_song(&song, &g, &ViewState::default());
        let arcs = commands
            .iter()
            .filter(|c| c.style() == Style::Connection)
            .count();
        assert_eq!(arcs, 1);
    }

    #[test]
    fn test_no_arc_when_rest_involved() {
        let mut song = Song::create_new("T", 1);
        song.measures[0]
            .add_note(Note::rest(1, Duration::Quarter, 0))
            .unwrap();
        let mut target = Note::new(1, 7, 8);
        target.technique = Technique::PULL_OFF;
        song.measures[0].add_note(target).unwrap();

        let g = Geometry::screen();
        let commands = layout_song(&song, &g, &ViewState::default());
        assert_eq!(
            commands
                .iter()
                .filter(|c| c.style() == Style::Connection)
                .count(),
            0
        );
    }

    #[test]
    fn test_tie_draws_arc_between_different_strings_never() {
        let mut song = Song::create_new("T", 1);
        let mut tied = Note::new(1, 5, 0);
        tied.tied_to_next = true;
        song.measures[0].add_note(tied).unwrap();
        // Next note on a different string: no same-string adjacency.
        song.measures[0].add_note(Note::new(2, 5, 8)).unwrap();

        let g = Geometry::screen();
        let commands = layout_song(&song, &g, &ViewState::default());
        assert_eq!(
            commands
                .iter()
                .filter(|c| c.style() == Style::Connection)
                .count(),
            0
        );
    }

    #[test]
    fn test_muted_note_renders_x() {
        let mut song = Song::create_new("T", 1);
        let mut muted = Note::new(3, 5, 0);
        muted.technique = Technique::MUTE;
        song.measures[0].add_note(muted).unwrap();

        let g = Geometry::screen();
        let commands = layout_song(&song, &g, &ViewState::default());
        assert!(commands.iter().any(|c| matches!(
            c,
            DrawCommand::Text { text, style: Style::TechniqueText, .. } if text == "X"
        )));
    }

    #[test]
    fn test_rest_renders_fixed_glyph() {
        let mut song = Song::create_new("T", 1);
        song.measures[0]
            .add_note(Note::rest(4, Duration::Sixteenth, 0))
            .unwrap();

        let g = Geometry::screen();
        let commands = layout_song(&song, &g, &ViewState::default());
        assert_eq!(
            commands
                .iter()
                .filter(|c| c.style() == Style::RestText)
                .count(),
            1
        );
    }

    #[test]
    fn test_cursor_box_in_current_measure_only() {
        let song = song_with_notes();
        let g = Geometry::screen();
        let view = ViewState {
            cursor: Some(Cursor::new(1, 8, 3)),
            show_note_names: false,
        };
        let commands = layout_song(&song, &g, &view);
        assert_eq!(
            commands
                .iter()
                .filter(|c| c.style() == Style::Cursor)
                .count(),
            1
        );
    }

    #[test]
    fn test_note_names_annotation() {
        let mut song = Song::create_new("T", 1);
        song.measures[0].add_note(Note::new(1, 0, 0)).unwrap();
        let g = Geometry::screen();
        let view = ViewState {
            cursor: None,
            show_note_names: true,
        };
        let commands = layout_song(&song, &g, &view);
        assert!(commands.iter().any(|c| matches!(
            c,
            DrawCommand::Text { text, style: Style::NoteName, .. } if text == "E4"
        )));
    }
}
