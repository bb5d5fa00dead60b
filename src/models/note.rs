//! Note model: durations, technique flags and the fretted note itself

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::timing;

/// Note duration, from whole note down to thirty-second.
///
/// The serialized value is the conventional denominator (quarter = 4),
/// which keeps saved songs readable and stable.
#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Duration {
    Whole = 1,
    Half = 2,
    Quarter = 4,
    Eighth = 8,
    Sixteenth = 16,
    ThirtySecond = 32,
}

impl Default for Duration {
    fn default() -> Self {
        Duration::Quarter
    }
}

/// Combinable set of playing techniques attached to a note.
///
/// Stored as a bit set so several articulations can coexist (e.g. a tapped
/// harmonic). The bit values are part of the file format.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Technique(pub u16);

impl Technique {
    pub const NONE: Technique = Technique(0);
    pub const HAMMER_ON: Technique = Technique(1);
    pub const PULL_OFF: Technique = Technique(2);
    pub const SLIDE_UP: Technique = Technique(4);
    pub const SLIDE_DOWN: Technique = Technique(8);
    pub const BEND: Technique = Technique(16);
    pub const RELEASE: Technique = Technique(32);
    pub const VIBRATO: Technique = Technique(64);
    pub const HARMONIC: Technique = Technique(128);
    pub const PINCH_HARMONIC: Technique = Technique(256);
    pub const MUTE: Technique = Technique(512);
    pub const PALM_MUTE: Technique = Technique(1024);
    pub const TAP: Technique = Technique(2048);
    pub const TRILL: Technique = Technique(4096);
    pub const LET_RING: Technique = Technique(8192);

    /// Whether no technique is set.
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Whether every flag in `other` is set.
    pub fn contains(self, other: Technique) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Technique) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Technique) {
        self.0 &= !other.0;
    }

    pub fn toggle(&mut self, other: Technique) {
        self.0 ^= other.0;
    }

    /// Short tablature symbol for the technique, first matching flag wins.
    /// The precedence order here is fixed; display code relies on it.
    pub fn symbol(self) -> &'static str {
        if self.contains(Self::HAMMER_ON) {
            "h"
        } else if self.contains(Self::PULL_OFF) {
            "p"
        } else if self.contains(Self::SLIDE_UP) {
            "/"
        } else if self.contains(Self::SLIDE_DOWN) {
            "\\"
        } else if self.contains(Self::BEND) {
            "b"
        } else if self.contains(Self::RELEASE) {
            "r"
        } else if self.contains(Self::VIBRATO) {
            "~"
        } else if self.contains(Self::HARMONIC) {
            "<>"
        } else if self.contains(Self::MUTE) {
            "x"
        } else if self.contains(Self::PALM_MUTE) {
            "PM"
        } else if self.contains(Self::TAP) {
            "t"
        } else if self.contains(Self::TRILL) {
            "tr"
        } else {
            ""
        }
    }

    /// Full display name, first matching flag wins (same precedence as
    /// [`symbol`](Self::symbol)).
    pub fn name(self) -> &'static str {
        if self.contains(Self::HAMMER_ON) {
            "Hammer-on"
        } else if self.contains(Self::PULL_OFF) {
            "Pull-off"
        } else if self.contains(Self::SLIDE_UP) {
            "Slide Up"
        } else if self.contains(Self::SLIDE_DOWN) {
            "Slide Down"
        } else if self.contains(Self::BEND) {
            "Bend"
        } else if self.contains(Self::RELEASE) {
            "Release"
        } else if self.contains(Self::VIBRATO) {
            "Vibrato"
        } else if self.contains(Self::HARMONIC) {
            "Harmonic"
        } else if self.contains(Self::MUTE) {
            "Mute"
        } else if self.contains(Self::PALM_MUTE) {
            "Palm Mute"
        } else if self.contains(Self::TAP) {
            "Tap"
        } else if self.contains(Self::TRILL) {
            "Trill"
        } else if self.contains(Self::LET_RING) {
            "Let Ring"
        } else {
            ""
        }
    }

    /// Stacked glyph annotation drawn above the note, all flags included.
    /// Mute is omitted because muted notes already render as "X".
    pub fn label(self) -> String {
        let mut parts = String::new();
        if self.contains(Self::HAMMER_ON) {
            parts.push('H');
        }
        if self.contains(Self::PULL_OFF) {
            parts.push('P');
        }
        if self.contains(Self::SLIDE_UP) {
            parts.push_str("S\u{2191}");
        }
        if self.contains(Self::SLIDE_DOWN) {
            parts.push_str("S\u{2193}");
        }
        if self.contains(Self::BEND) {
            parts.push('B');
        }
        if self.contains(Self::RELEASE) {
            parts.push('R');
        }
        if self.contains(Self::VIBRATO) {
            parts.push('~');
        }
        if self.contains(Self::HARMONIC) {
            parts.push('\u{25c7}');
        }
        if self.contains(Self::PINCH_HARMONIC) {
            parts.push('\u{25c6}');
        }
        if self.contains(Self::PALM_MUTE) {
            parts.push_str("PM");
        }
        if self.contains(Self::TAP) {
            parts.push('T');
        }
        if self.contains(Self::TRILL) {
            parts.push_str("tr");
        }
        if self.contains(Self::LET_RING) {
            parts.push_str("LR");
        }
        parts
    }

    /// Whether this technique connects a note to the one before it on the
    /// same string (drawn as an arc).
    pub fn is_connecting(self) -> bool {
        self.contains(Self::HAMMER_ON)
            || self.contains(Self::PULL_OFF)
            || self.contains(Self::SLIDE_UP)
            || self.contains(Self::SLIDE_DOWN)
    }
}

/// A single fretted note or rest inside a measure.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// String number, 1 (highest pitch) through 6.
    pub string: u8,

    /// Fret number, 0 (open) through 24. Meaningless for rests.
    pub fret: u8,

    /// Rhythmic value.
    pub duration: Duration,

    /// Dotted note (duration extended by half).
    pub dotted: bool,

    /// Part of a triplet (duration scaled to two thirds).
    pub triplet: bool,

    /// Playing technique flags.
    pub technique: Technique,

    /// Tick offset within the owning measure.
    pub position: u32,

    /// Rest instead of a fretted note.
    pub is_rest: bool,

    /// Bend target in semitones, continuous (half bends allowed).
    pub bend_amount: f64,

    /// Tied to the next note on the same string.
    pub tied_to_next: bool,
}

impl Note {
    /// Create a fretted note with default quarter duration.
    pub fn new(string: u8, fret: u8, position: u32) -> Self {
        Self {
            string,
            fret,
            duration: Duration::Quarter,
            dotted: false,
            triplet: false,
            technique: Technique::NONE,
            position,
            is_rest: false,
            bend_amount: 0.0,
            tied_to_next: false,
        }
    }

    /// Create a rest occupying a (position, string) slot.
    pub fn rest(string: u8, duration: Duration, position: u32) -> Self {
        Self {
            string,
            fret: 0,
            duration,
            dotted: false,
            triplet: false,
            technique: Technique::NONE,
            position,
            is_rest: true,
            bend_amount: 0.0,
            tied_to_next: false,
        }
    }

    /// Length of this note in ticks, modifiers applied.
    pub fn ticks(&self) -> u32 {
        timing::ticks_for(self.duration, self.dotted, self.triplet)
    }
}
