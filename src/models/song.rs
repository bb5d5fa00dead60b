//! Song model: the top-level document aggregate
//!
//! A song exclusively owns its measures and chord list; the tuning is a
//! value cloned on assignment. Structural mutations renumber measures and
//! refresh the modified timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TabError};
use crate::models::chord::Chord;
use crate::models::measure::Measure;
use crate::models::tuning::Tuning;

/// Current song file format version.
pub const FORMAT_VERSION: &str = "1.0";

/// A complete tablature document.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// File format version.
    pub version: String,

    pub title: String,
    pub artist: String,
    pub album: String,

    /// Tempo in beats per minute.
    pub tempo: u32,

    /// Active tuning.
    pub tuning: Tuning,

    /// Capo position, 0 when unused.
    pub capo: u8,

    /// The measures, in playing order.
    pub measures: Vec<Measure>,

    /// Chord diagrams referenced by the song.
    pub chords: Vec<Chord>,

    /// Free-text notes.
    pub notes: String,

    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Song {
    /// Create a new song seeded with `initial_measures` empty 4/4 measures.
    pub fn create_new(title: &str, initial_measures: usize) -> Self {
        let now = Utc::now();
        let measures = (0..initial_measures)
            .map(|i| Measure::new(i as u32 + 1))
            .collect();

        Self {
            version: FORMAT_VERSION.to_string(),
            title: title.to_string(),
            artist: String::new(),
            album: String::new(),
            tempo: 120,
            tuning: Tuning::standard(),
            capo: 0,
            measures,
            chords: Vec::new(),
            notes: String::new(),
            created_at: now,
            modified_at: now,
        }
    }

    /// Mark the song as changed, refreshing the modified timestamp.
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }

    /// Append a measure inheriting the previous measure's time signature.
    pub fn add_measure(&mut self) -> &Measure {
        let mut measure = Measure::new(self.measures.len() as u32 + 1);
        if let Some(last) = self.measures.last() {
            measure.beats_per_measure = last.beats_per_measure;
            measure.beat_unit = last.beat_unit;
        }
        log::debug!("appending measure {}", measure.number);
        self.measures.push(measure);
        self.touch();
        &self.measures[self.measures.len() - 1]
    }

    /// Insert a measure before `index`, cloning the time signature of the
    /// measure that will follow it (or the last measure when inserting at
    /// the end). All measures are renumbered afterwards.
    pub fn insert_measure(&mut self, index: usize) -> &Measure {
        let index = index.min(self.measures.len());
        let mut measure = Measure::new(index as u32 + 1);
        if let Some(reference) = self.measures.get(index).or_else(|| self.measures.last()) {
            measure.beats_per_measure = reference.beats_per_measure;
            measure.beat_unit = reference.beat_unit;
        }
        log::debug!("inserting measure at index {}", index);
        self.measures.insert(index, measure);
        self.renumber_measures();
        self.touch();
        &self.measures[index]
    }

    /// Remove the measure at `index` and renumber. Removing the last
    /// remaining measure is refused as a no-op; a song never has zero
    /// measures.
    pub fn remove_measure(&mut self, index: usize) {
        if index < self.measures.len() && self.measures.len() > 1 {
            log::debug!("removing measure at index {}", index);
            self.measures.remove(index);
            self.renumber_measures();
            self.touch();
        }
    }

    /// Measure at `index`, or an error carrying the valid range.
    pub fn measure(&self, index: usize) -> Result<&Measure> {
        self.measures.get(index).ok_or(TabError::MeasureOutOfRange {
            index,
            count: self.measures.len(),
        })
    }

    /// Mutable measure access with the same bounds check.
    pub fn measure_mut(&mut self, index: usize) -> Result<&mut Measure> {
        let count = self.measures.len();
        self.measures
            .get_mut(index)
            .ok_or(TabError::MeasureOutOfRange { index, count })
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Song> {
        Ok(serde_json::from_str(json)?)
    }

    fn renumber_measures(&mut self) {
        for (i, measure) in self.measures.iter_mut().enumerate() {
            measure.number = i as u32 + 1;
        }
    }
}

impl Default for Song {
    fn default() -> Self {
        Self::create_new("Untitled", 4)
    }
}
