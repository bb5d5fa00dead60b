//! Measure model
//!
//! A measure owns its notes and keeps them ordered by position, then string.
//! At most one note may occupy a (position, string) slot; adding a note to an
//! occupied slot replaces the previous occupant.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabError};
use crate::models::note::Note;
use crate::models::tuning::STRING_COUNT;
use crate::timing;

/// Highest fret the engine accepts.
pub const MAX_FRET: u8 = 24;

/// One measure of tablature.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    /// 1-based sequence number, recomputed after structural changes.
    pub number: u32,

    /// Time signature numerator.
    pub beats_per_measure: u32,

    /// Time signature denominator (beat unit).
    pub beat_unit: u32,

    /// Notes, ordered by (position, string).
    pub notes: Vec<Note>,

    /// Chord label shown above the measure (e.g. "Am"), if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chord_name: Option<String>,

    /// Repeat barline markers.
    pub repeat_start: bool,
    pub repeat_end: bool,

    /// Play count for a repeated section.
    pub repeat_count: u32,
}

impl Measure {
    /// Create an empty 4/4 measure with the given number.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            beats_per_measure: 4,
            beat_unit: 4,
            notes: Vec::new(),
            chord_name: None,
            repeat_start: false,
            repeat_end: false,
            repeat_count: 2,
        }
    }

    /// Tick capacity of this measure. Note positions must stay below this;
    /// callers enforce it, the measure does not clamp on insert.
    pub fn capacity_ticks(&self) -> u32 {
        timing::measure_capacity(self.beats_per_measure, self.beat_unit)
    }

    /// Note at an exact (position, string) slot, if present.
    pub fn note_at(&self, position: u32, string: u8) -> Option<&Note> {
        self.notes
            .iter()
            .find(|n| n.position == position && n.string == string)
    }

    /// Mutable access to the note at a slot.
    pub fn note_at_mut(&mut self, position: u32, string: u8) -> Option<&mut Note> {
        self.notes
            .iter_mut()
            .find(|n| n.position == position && n.string == string)
    }

    /// All notes sounding at a tick position (a chord voicing).
    pub fn notes_at(&self, position: u32) -> Vec<&Note> {
        self.notes.iter().filter(|n| n.position == position).collect()
    }

    /// Add a note, replacing any previous note at the same slot and
    /// restoring (position, string) order.
    ///
    /// String and fret ranges are validated here because layout math
    /// downstream indexes by string and assumes the fret table.
    pub fn add_note(&mut self, note: Note) -> Result<()> {
        if note.string < 1 || note.string > STRING_COUNT {
            return Err(TabError::InvalidString(note.string));
        }
        if !note.is_rest && note.fret > MAX_FRET {
            return Err(TabError::InvalidFret(note.fret));
        }

        self.notes
            .retain(|n| !(n.position == note.position && n.string == note.string));
        self.notes.push(note);
        self.notes
            .sort_by(|a, b| a.position.cmp(&b.position).then(a.string.cmp(&b.string)));
        Ok(())
    }

    /// Remove the note at a slot. Removing an empty slot is a no-op.
    pub fn remove_note(&mut self, position: u32, string: u8) {
        self.notes
            .retain(|n| !(n.position == position && n.string == string));
    }
}

impl Default for Measure {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::note::Duration;

    #[test]
    fn test_capacity_for_common_signatures() {
        let mut m = Measure::new(1);
        assert_eq!(m.capacity_ticks(), 32);
        m.beats_per_measure = 3;
        assert_eq!(m.capacity_ticks(), 24);
        m.beats_per_measure = 6;
        m.beat_unit = 8;
        assert_eq!(m.capacity_ticks(), 24);
    }

    #[test]
    fn test_add_note_replaces_same_slot() {
        let mut m = Measure::new(1);
        m.add_note(Note::new(1, 3, 0)).unwrap();
        m.add_note(Note::new(1, 5, 0)).unwrap();

        assert_eq!(m.notes.len(), 1);
        assert_eq!(m.notes[0].fret, 5);
    }

    #[test]
    fn test_notes_kept_in_position_then_string_order() {
        let mut m = Measure::new(1);
        m.add_note(Note::new(4, 2, 16)).unwrap();
        m.add_note(Note::new(2, 1, 0)).unwrap();
        m.add_note(Note::new(1, 0, 16)).unwrap();
        m.add_note(Note::new(3, 2, 0)).unwrap();

        let order: Vec<(u32, u8)> = m.notes.iter().map(|n| (n.position, n.string)).collect();
        assert_eq!(order, vec![(0, 2), (0, 3), (16, 1), (16, 4)]);
    }

    #[test]
    fn test_add_note_validates_ranges() {
        let mut m = Measure::new(1);
        assert!(matches!(
            m.add_note(Note::new(0, 3, 0)),
            Err(TabError::InvalidString(0))
        ));
        assert!(matches!(
            m.add_note(Note::new(7, 3, 0)),
            Err(TabError::InvalidString(7))
        ));
        assert!(matches!(
            m.add_note(Note::new(1, 25, 0)),
            Err(TabError::InvalidFret(25))
        ));
        // Rests carry no meaningful fret.
        assert!(m.add_note(Note::rest(1, Duration::Quarter, 0)).is_ok());
    }

    #[test]
    fn test_remove_note() {
        let mut m = Measure::new(1);
        m.add_note(Note::new(2, 7, 8)).unwrap();
        m.remove_note(8, 2);
        assert!(m.notes.is_empty());
        // Removing again is harmless.
        m.remove_note(8, 2);
    }

    #[test]
    fn test_notes_at_position() {
        let mut m = Measure::new(1);
        m.add_note(Note::new(1, 0, 0)).unwrap();
        m.add_note(Note::new(2, 1, 0)).unwrap();
        m.add_note(Note::new(3, 0, 8)).unwrap();

        assert_eq!(m.notes_at(0).len(), 2);
        assert_eq!(m.notes_at(8).len(), 1);
        assert!(m.notes_at(16).is_empty());
    }
}
