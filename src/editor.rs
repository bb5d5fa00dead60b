//! Edit-command executor
//!
//! Applies [`EditAction`]s from the input state machine to a song, keeping
//! a cursor plus the sticky entry state (active duration, dotted flag and
//! any technique armed for the next note). One action is handled to
//! completion before the next arrives; nothing here suspends or blocks.

use log::debug;

use crate::error::Result;
use crate::input::{EditAction, MoveDirection};
use crate::models::{Cursor, Duration, Note, Song, Technique};
use crate::timing;

/// Song plus cursor plus sticky entry state.
#[derive(Debug)]
pub struct EditorState {
    pub song: Song,
    pub cursor: Cursor,

    /// Duration assigned to newly entered notes and used as the cursor
    /// step size.
    pub duration: Duration,
    pub dotted: bool,

    /// Technique armed for the next entered note when no note exists at
    /// the cursor to toggle it on directly.
    pub pending_technique: Technique,

    /// Set by every content mutation, cleared by the persistence layer.
    pub dirty: bool,
}

impl EditorState {
    pub fn new(song: Song) -> Self {
        Self {
            song,
            cursor: Cursor::origin(),
            duration: Duration::Quarter,
            dotted: false,
            pending_technique: Technique::NONE,
            dirty: false,
        }
    }

    /// Execute one edit command against the document.
    ///
    /// Commands referencing a cursor that has drifted past the end of the
    /// measure list are ignored rather than rejected; the cursor itself is
    /// re-clamped by the structural operations that can invalidate it.
    pub fn apply(&mut self, action: EditAction) -> Result<()> {
        match action {
            EditAction::InputFret { fret, .. } => self.input_fret(fret)?,
            EditAction::DeleteNote => self.delete_note(),
            EditAction::MoveCursor(direction) => self.move_cursor(direction),
            EditAction::SetTechnique(technique) => self.apply_technique(technique),
            EditAction::SetDuration(duration) => self.duration = duration,
            EditAction::ToggleDot => self.dotted = !self.dotted,
            EditAction::InsertRest => self.insert_rest()?,
            EditAction::AddMeasure => {
                self.song.add_measure();
                self.dirty = true;
            }
            EditAction::DeleteMeasure => self.delete_measure(),
        }
        Ok(())
    }

    /// Tick step the cursor moves per advance, from the active duration.
    pub fn cursor_step(&self) -> u32 {
        timing::ticks_for(self.duration, self.dotted, false)
    }

    fn input_fret(&mut self, fret: u8) -> Result<()> {
        if self.cursor.measure >= self.song.measures.len() {
            return Ok(());
        }

        let mut note = Note::new(self.cursor.string, fret, self.cursor.position);
        note.duration = self.duration;
        note.dotted = self.dotted;
        note.technique = self.pending_technique;

        self.song.measures[self.cursor.measure].add_note(note)?;
        self.song.touch();
        self.dirty = true;

        self.advance_cursor();
        // Armed technique applies to one note only.
        self.pending_technique = Technique::NONE;
        Ok(())
    }

    fn insert_rest(&mut self) -> Result<()> {
        if self.cursor.measure >= self.song.measures.len() {
            return Ok(());
        }

        let rest = Note::rest(self.cursor.string, self.duration, self.cursor.position);
        self.song.measures[self.cursor.measure].add_note(rest)?;
        self.song.touch();
        self.dirty = true;

        self.advance_cursor();
        Ok(())
    }

    fn delete_note(&mut self) {
        if self.cursor.measure >= self.song.measures.len() {
            return;
        }
        self.song.measures[self.cursor.measure]
            .remove_note(self.cursor.position, self.cursor.string);
        self.song.touch();
        self.dirty = true;
    }

    /// Toggle a technique on the note under the cursor, or arm it for the
    /// next entered note when the cursor cell is empty. Reapplying the
    /// exact technique set clears it; anything else replaces the set.
    fn apply_technique(&mut self, technique: Technique) {
        if self.cursor.measure >= self.song.measures.len() {
            return;
        }

        let measure = &mut self.song.measures[self.cursor.measure];
        if let Some(note) = measure.note_at_mut(self.cursor.position, self.cursor.string) {
            note.technique = if note.technique == technique {
                Technique::NONE
            } else {
                technique
            };
            self.song.touch();
            self.dirty = true;
        } else {
            self.pending_technique = technique;
        }
    }

    fn move_cursor(&mut self, direction: MoveDirection) {
        match direction {
            MoveDirection::Left => self.retreat_cursor(),
            MoveDirection::Right => self.advance_cursor(),
            MoveDirection::Up => {
                if self.cursor.string > 1 {
                    self.cursor.string -= 1;
                }
            }
            MoveDirection::Down => {
                if self.cursor.string < 6 {
                    self.cursor.string += 1;
                }
            }
        }
    }

    /// Step forward by the active duration, overflowing into the next
    /// measure and appending one when at the end of the document.
    fn advance_cursor(&mut self) {
        if self.cursor.measure >= self.song.measures.len() {
            return;
        }

        let capacity = self.song.measures[self.cursor.measure].capacity_ticks();
        self.cursor.position += self.cursor_step();

        if self.cursor.position >= capacity {
            self.cursor.position = 0;
            if self.cursor.measure + 1 >= self.song.measures.len() {
                self.song.add_measure();
                debug!("cursor overflow appended measure {}", self.song.measures.len());
            }
            self.cursor.measure += 1;
        }
    }

    /// Step backward by the active duration, underflowing into the last
    /// step slot of the previous measure, pinned at the document start.
    fn retreat_cursor(&mut self) {
        if self.cursor.measure >= self.song.measures.len() {
            return;
        }

        let step = self.cursor_step();
        if self.cursor.position >= step {
            self.cursor.position -= step;
        } else if self.cursor.measure > 0 {
            self.cursor.measure -= 1;
            let capacity = self.song.measures[self.cursor.measure].capacity_ticks();
            self.cursor.position = capacity.saturating_sub(step);
        } else {
            self.cursor.position = 0;
        }
    }

    fn delete_measure(&mut self) {
        if self.song.measures.len() <= 1 {
            return;
        }
        self.song.remove_measure(self.cursor.measure);
        if self.cursor.measure >= self.song.measures.len() {
            self.cursor.measure = self.song.measures.len() - 1;
        }
        self.cursor.position = 0;
        self.dirty = true;
    }
}
