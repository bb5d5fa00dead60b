//! Tick-based timing model
//!
//! All rhythm in the engine is expressed in ticks, where one tick is a
//! thirty-second note. A measure's capacity is
//! `beats_per_measure * (32 / beat_unit)` ticks, and every note position is
//! a tick offset within its measure. Saved positions round-trip through this
//! module, so the order of operations in [`ticks_for`] (dot before triplet,
//! integer division) is part of the file format.

use crate::models::Duration;

/// Chromatic note names, sharp spelling.
const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Chromatic note names, flat spelling.
const NOTE_NAMES_FLAT: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Convert a duration (with modifiers) to its length in ticks.
///
/// Base values: whole 32, half 16, quarter 8, eighth 4, sixteenth 2,
/// thirty-second 1. A dot adds half the base (integer division), and a
/// triplet then scales by 2/3 (integer division). The result never drops
/// below one tick.
pub fn ticks_for(duration: Duration, dotted: bool, triplet: bool) -> u32 {
    let mut ticks = match duration {
        Duration::Whole => 32,
        Duration::Half => 16,
        Duration::Quarter => 8,
        Duration::Eighth => 4,
        Duration::Sixteenth => 2,
        Duration::ThirtySecond => 1,
    };

    if dotted {
        ticks += ticks / 2;
    }
    if triplet {
        ticks = ticks * 2 / 3;
    }

    ticks.max(1)
}

/// Tick capacity of a measure with the given time signature.
pub fn measure_capacity(beats_per_measure: u32, beat_unit: u32) -> u32 {
    beats_per_measure * (32 / beat_unit.max(1))
}

/// Name of a MIDI note, e.g. `"E4"` for 64.
///
/// Octave numbering follows the MIDI convention: octave = note/12 - 1,
/// so middle C (60) is "C4".
pub fn note_name(midi: i32, use_flat: bool) -> String {
    let names = if use_flat { &NOTE_NAMES_FLAT } else { &NOTE_NAMES };
    let index = midi.rem_euclid(12) as usize;
    let octave = midi.div_euclid(12) - 1;
    format!("{}{}", names[index], octave)
}

/// Name of a MIDI note without the octave suffix.
pub fn note_name_without_octave(midi: i32, use_flat: bool) -> &'static str {
    let names = if use_flat { &NOTE_NAMES_FLAT } else { &NOTE_NAMES };
    names[midi.rem_euclid(12) as usize]
}

/// Equal-tempered frequency of a MIDI note in Hz (A4 = 440).
pub fn frequency(midi: i32) -> f64 {
    440.0 * 2f64.powf((midi - 69) as f64 / 12.0)
}

/// Distance between two MIDI notes in semitones.
pub fn interval(midi_a: i32, midi_b: i32) -> i32 {
    (midi_b - midi_a).abs()
}

/// English display name of a duration.
pub fn duration_name(duration: Duration) -> &'static str {
    match duration {
        Duration::Whole => "Whole",
        Duration::Half => "Half",
        Duration::Quarter => "Quarter",
        Duration::Eighth => "Eighth",
        Duration::Sixteenth => "Sixteenth",
        Duration::ThirtySecond => "32nd",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_tick_table() {
        assert_eq!(ticks_for(Duration::Whole, false, false), 32);
        assert_eq!(ticks_for(Duration::Half, false, false), 16);
        assert_eq!(ticks_for(Duration::Quarter, false, false), 8);
        assert_eq!(ticks_for(Duration::Eighth, false, false), 4);
        assert_eq!(ticks_for(Duration::Sixteenth, false, false), 2);
        assert_eq!(ticks_for(Duration::ThirtySecond, false, false), 1);
    }

    #[test]
    fn test_dotted_adds_half() {
        assert_eq!(ticks_for(Duration::Quarter, true, false), 12);
        assert_eq!(ticks_for(Duration::Eighth, true, false), 6);
        // Half of one tick truncates to zero.
        assert_eq!(ticks_for(Duration::ThirtySecond, true, false), 1);
    }

    #[test]
    fn test_triplet_scales_two_thirds() {
        assert_eq!(ticks_for(Duration::Quarter, false, true), 5);
        assert_eq!(ticks_for(Duration::Eighth, false, true), 2);
        // Never drops below one tick.
        assert_eq!(ticks_for(Duration::ThirtySecond, false, true), 1);
    }

    #[test]
    fn test_dot_applied_before_triplet() {
        // 8 + 4 = 12, then 12*2/3 = 8. The other order would give 5 + 2 = 7.
        assert_eq!(ticks_for(Duration::Quarter, true, true), 8);
    }

    #[test]
    fn test_measure_capacity() {
        assert_eq!(measure_capacity(4, 4), 32);
        assert_eq!(measure_capacity(3, 4), 24);
        assert_eq!(measure_capacity(6, 8), 24);
        assert_eq!(measure_capacity(2, 2), 32);
    }

    #[test]
    fn test_note_names() {
        assert_eq!(note_name(60, false), "C4");
        assert_eq!(note_name(64, false), "E4");
        assert_eq!(note_name(61, false), "C#4");
        assert_eq!(note_name(61, true), "Db4");
        assert_eq!(note_name(40, false), "E2");
    }

    #[test]
    fn test_frequency() {
        assert!((frequency(69) - 440.0).abs() < 1e-9);
        assert!((frequency(57) - 220.0).abs() < 1e-9);
    }
}
