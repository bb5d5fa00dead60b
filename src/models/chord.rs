//! Chord diagram model and the common-chord library
//!
//! A chord here is a fingering diagram (as printed above the tablature),
//! distinct from the chord-name label a measure may carry.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fingering value for a string that is not played.
pub const STRING_MUTED: i8 = -1;

/// A guitar chord fingering diagram.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    /// Display name, e.g. "Am" or "Cmaj7".
    pub name: String,

    /// Root note name.
    pub root: String,

    /// Chord quality: "major", "minor", "7", "maj7", "m7", "sus2", "sus4"...
    pub chord_type: String,

    /// Fret per string, string 1 first: -1 muted, 0 open, 1-24 fretted.
    pub fingering: [i8; 6],

    /// First fret of the diagram window, for movable shapes.
    pub base_fret: u8,

    /// Barre spanning a contiguous string range, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barre: Option<Barre>,
}

/// A finger laid flat across several strings at one fret.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Barre {
    /// First string covered (lowest string number).
    pub from_string: u8,

    /// Last string covered, inclusive.
    pub to_string: u8,
}

impl Chord {
    fn library(name: &str, root: &str, chord_type: &str, fingering: [i8; 6]) -> Self {
        Self {
            name: name.to_string(),
            root: root.to_string(),
            chord_type: chord_type.to_string(),
            fingering,
            base_fret: 1,
            barre: None,
        }
    }

    fn with_base_fret(mut self, base_fret: u8) -> Self {
        self.base_fret = base_fret;
        self
    }

    fn with_barre(mut self, from_string: u8, to_string: u8) -> Self {
        self.barre = Some(Barre {
            from_string,
            to_string,
        });
        self
    }

    /// Look up a chord from the built-in library by name.
    pub fn by_name(name: &str) -> Option<Chord> {
        COMMON_CHORDS.get(name).cloned()
    }

    /// Names of all library chords, sorted.
    pub fn library_names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = COMMON_CHORDS.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

lazy_static! {
    /// The built-in open-position chord library.
    static ref COMMON_CHORDS: HashMap<&'static str, Chord> = {
        let mut m = HashMap::new();

        // Major triads
        m.insert("C", Chord::library("C", "C", "major", [0, 1, 0, 2, 3, -1]));
        m.insert("D", Chord::library("D", "D", "major", [2, 3, 2, 0, -1, -1]));
        m.insert("E", Chord::library("E", "E", "major", [0, 0, 1, 2, 2, 0]));
        m.insert(
            "F",
            Chord::library("F", "F", "major", [1, 1, 2, 3, 3, 1]).with_barre(1, 6),
        );
        m.insert("G", Chord::library("G", "G", "major", [3, 0, 0, 0, 2, 3]));
        m.insert("A", Chord::library("A", "A", "major", [0, 2, 2, 2, 0, -1]));
        m.insert(
            "B",
            Chord::library("B", "B", "major", [2, 4, 4, 4, 2, -1])
                .with_base_fret(2)
                .with_barre(1, 5),
        );

        // Minor triads
        m.insert("Am", Chord::library("Am", "A", "minor", [0, 1, 2, 2, 0, -1]));
        m.insert(
            "Bm",
            Chord::library("Bm", "B", "minor", [2, 3, 4, 4, 2, -1])
                .with_base_fret(2)
                .with_barre(1, 5),
        );
        m.insert(
            "Cm",
            Chord::library("Cm", "C", "minor", [3, 4, 5, 5, 3, -1])
                .with_base_fret(3)
                .with_barre(1, 5),
        );
        m.insert("Dm", Chord::library("Dm", "D", "minor", [1, 3, 2, 0, -1, -1]));
        m.insert("Em", Chord::library("Em", "E", "minor", [0, 0, 0, 2, 2, 0]));
        m.insert(
            "Fm",
            Chord::library("Fm", "F", "minor", [1, 1, 1, 3, 3, 1]).with_barre(1, 6),
        );
        m.insert(
            "Gm",
            Chord::library("Gm", "G", "minor", [3, 3, 3, 5, 5, 3])
                .with_base_fret(3)
                .with_barre(1, 6),
        );

        // Dominant sevenths
        m.insert("C7", Chord::library("C7", "C", "7", [0, 1, 3, 2, 3, -1]));
        m.insert("D7", Chord::library("D7", "D", "7", [2, 1, 2, 0, -1, -1]));
        m.insert("E7", Chord::library("E7", "E", "7", [0, 0, 1, 0, 2, 0]));
        m.insert("G7", Chord::library("G7", "G", "7", [1, 0, 0, 0, 2, 3]));
        m.insert("A7", Chord::library("A7", "A", "7", [0, 2, 0, 2, 0, -1]));

        // Major sevenths
        m.insert("Cmaj7", Chord::library("Cmaj7", "C", "maj7", [0, 0, 0, 2, 3, -1]));
        m.insert("Fmaj7", Chord::library("Fmaj7", "F", "maj7", [0, 1, 2, 2, -1, -1]));
        m.insert("Gmaj7", Chord::library("Gmaj7", "G", "maj7", [2, 0, 0, 0, 2, 3]));

        // Minor sevenths
        m.insert("Am7", Chord::library("Am7", "A", "m7", [0, 1, 0, 2, 0, -1]));
        m.insert("Dm7", Chord::library("Dm7", "D", "m7", [1, 1, 2, 0, -1, -1]));
        m.insert("Em7", Chord::library("Em7", "E", "m7", [0, 0, 0, 0, 2, 0]));

        // Suspended
        m.insert("Dsus2", Chord::library("Dsus2", "D", "sus2", [0, 3, 2, 0, -1, -1]));
        m.insert("Dsus4", Chord::library("Dsus4", "D", "sus4", [3, 3, 2, 0, -1, -1]));
        m.insert("Asus2", Chord::library("Asus2", "A", "sus2", [0, 0, 2, 2, 0, -1]));
        m.insert("Asus4", Chord::library("Asus4", "A", "sus4", [0, 3, 2, 2, 0, -1]));

        m
    };
}
