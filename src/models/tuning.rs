//! Guitar tuning model
//!
//! A tuning assigns a MIDI pitch to each of the six strings, string 1 being
//! the highest-pitched. Tunings are plain values: assigning one to a song
//! clones it, nothing shares mutable tuning state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::timing;

/// Number of strings on the instrument. Layout and hit testing divide by
/// this, so the tuning invariant (exactly six pitches) matters.
pub const STRING_COUNT: u8 = 6;

/// Ordered pitches for the six strings, string 1 first.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tuning {
    /// Display name, e.g. "Standard" or "Drop D".
    pub name: String,

    /// MIDI pitch per string, from string 1 (highest) to string 6.
    /// Standard tuning: E4(64), B3(59), G3(55), D3(50), A2(45), E2(40).
    pub string_pitches: [i32; 6],
}

impl Tuning {
    /// Standard EADGBE tuning.
    pub fn standard() -> Self {
        Self {
            name: "Standard".to_string(),
            string_pitches: [64, 59, 55, 50, 45, 40],
        }
    }

    pub fn drop_d() -> Self {
        Self {
            name: "Drop D".to_string(),
            string_pitches: [64, 59, 55, 50, 45, 38],
        }
    }

    pub fn half_step_down() -> Self {
        Self {
            name: "Half Step Down".to_string(),
            string_pitches: [63, 58, 54, 49, 44, 39],
        }
    }

    pub fn full_step_down() -> Self {
        Self {
            name: "Full Step Down".to_string(),
            string_pitches: [62, 57, 53, 48, 43, 38],
        }
    }

    pub fn open_g() -> Self {
        Self {
            name: "Open G".to_string(),
            string_pitches: [62, 59, 55, 50, 43, 38],
        }
    }

    pub fn open_d() -> Self {
        Self {
            name: "Open D".to_string(),
            string_pitches: [62, 57, 54, 50, 45, 38],
        }
    }

    pub fn dadgad() -> Self {
        Self {
            name: "DADGAD".to_string(),
            string_pitches: [62, 57, 55, 50, 45, 38],
        }
    }

    /// All preset tunings, for tuning pickers.
    pub fn presets() -> Vec<Tuning> {
        vec![
            Self::standard(),
            Self::drop_d(),
            Self::half_step_down(),
            Self::full_step_down(),
            Self::open_g(),
            Self::open_d(),
            Self::dadgad(),
        ]
    }

    /// MIDI pitch of a fretted note. Returns 0 for a string number
    /// outside 1-6, matching hit-test clamping behavior upstream.
    pub fn pitch(&self, string_number: u8, fret: u8) -> i32 {
        if string_number < 1 || string_number > STRING_COUNT {
            return 0;
        }
        self.string_pitches[(string_number - 1) as usize] + fret as i32
    }

    /// Note name of a fretted note, e.g. `"G3"` for string 3 fret 0.
    pub fn note_name(&self, string_number: u8, fret: u8) -> String {
        timing::note_name(self.pitch(string_number, fret), false)
    }

    /// Open-string note names, string 1 first.
    pub fn string_names(&self) -> Vec<String> {
        self.string_pitches
            .iter()
            .map(|&p| timing::note_name(p, false))
            .collect()
    }

    /// Parse a note name like "E4" or "Bb2" into a MIDI pitch.
    /// Unknown names fall back to middle C (60), a missing octave to 4.
    pub fn note_name_to_midi(note_name: &str) -> i32 {
        let note_map: HashMap<&str, i32> = HashMap::from([
            ("C", 0),
            ("C#", 1),
            ("Db", 1),
            ("D", 2),
            ("D#", 3),
            ("Eb", 3),
            ("E", 4),
            ("F", 5),
            ("F#", 6),
            ("Gb", 6),
            ("G", 7),
            ("G#", 8),
            ("Ab", 8),
            ("A", 9),
            ("A#", 10),
            ("Bb", 10),
            ("B", 11),
        ]);

        let split = note_name
            .rfind(|c: char| !c.is_ascii_digit())
            .map(|i| i + 1)
            .unwrap_or(note_name.len());
        let (note, octave_str) = note_name.split_at(split);
        let octave: i32 = octave_str.parse().unwrap_or(4);

        match note_map.get(note) {
            Some(&value) => (octave + 1) * 12 + value,
            None => 60,
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_pitches() {
        let tuning = Tuning::standard();
        assert_eq!(tuning.pitch(1, 0), 64); // open high E
        assert_eq!(tuning.pitch(6, 0), 40); // open low E
        assert_eq!(tuning.pitch(1, 5), 69); // A4
        assert_eq!(tuning.pitch(5, 12), 57); // A2 + octave
    }

    #[test]
    fn test_pitch_rejects_bad_string() {
        let tuning = Tuning::standard();
        assert_eq!(tuning.pitch(0, 3), 0);
        assert_eq!(tuning.pitch(7, 3), 0);
    }

    #[test]
    fn test_note_names() {
        let tuning = Tuning::standard();
        assert_eq!(tuning.note_name(1, 0), "E4");
        assert_eq!(tuning.note_name(6, 0), "E2");
        assert_eq!(tuning.note_name(2, 1), "C4");
        assert_eq!(
            tuning.string_names(),
            vec!["E4", "B3", "G3", "D3", "A2", "E2"]
        );
    }

    #[test]
    fn test_presets_have_six_strings() {
        for tuning in Tuning::presets() {
            assert_eq!(tuning.string_pitches.len(), 6, "{}", tuning.name);
        }
    }

    #[test]
    fn test_note_name_to_midi() {
        assert_eq!(Tuning::note_name_to_midi("C4"), 60);
        assert_eq!(Tuning::note_name_to_midi("E4"), 64);
        assert_eq!(Tuning::note_name_to_midi("Bb2"), 46);
        assert_eq!(Tuning::note_name_to_midi("garbage"), 60);
    }
}
