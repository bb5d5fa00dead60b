//! Keyboard input state machine
//!
//! Maps platform-independent key events to edit commands. The only state
//! carried across calls is the pending fret-digit buffer and the timestamp
//! of the last key; a 500ms gap between keys clears the buffer, so stale
//! digits fail open back to the idle state.
//!
//! Digit commitment rule: a second digit, or any value above 24, commits
//! immediately (values above 24 fall back to their first digit). A single
//! digit commits at once, but is flagged `pending` when it is 0, 1 or 2
//! since a second digit may still arrive and override it. Digits 3 to 9
//! are never flagged pending even though 3x to 9x remain enterable as two
//! digits; this asymmetry is long-standing saved-file behavior and is kept
//! as is.

use crate::models::{Duration, Technique};

/// Milliseconds of key silence after which the digit buffer resets.
pub const FRET_INPUT_TIMEOUT_MS: u64 = 500;

/// Platform-independent key identifiers the editor reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// A digit key, main row or keypad, value 0 to 9.
    Digit(u8),
    Left,
    Right,
    Up,
    Down,
    Delete,
    Backspace,
    Enter,
    Space,
    H,
    P,
    S,
    B,
    V,
    M,
    T,
    W,
    Q,
    E,
    Tilde,
    Slash,
    Backslash,
    Plus,
    Minus,
    Period,
}

/// Modifier state accompanying a key event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true, ctrl: false };
    pub const CTRL: Modifiers = Modifiers { shift: false, ctrl: true };

    pub fn is_none(&self) -> bool {
        !self.shift && !self.ctrl
    }
}

/// Cursor movement axis and direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
    Up,
    Down,
}

/// A document-mutation command produced from a key event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditAction {
    /// Enter a fret number at the cursor. `pending` means a second digit
    /// may still arrive within the timeout and replace this value.
    InputFret { fret: u8, pending: bool },
    DeleteNote,
    MoveCursor(MoveDirection),
    SetTechnique(Technique),
    SetDuration(Duration),
    ToggleDot,
    InsertRest,
    AddMeasure,
    DeleteMeasure,
}

/// Translates key events into [`EditAction`]s, buffering fret digits.
#[derive(Debug, Default)]
pub struct KeyboardHandler {
    pending_fret: String,
    last_key_ms: u64,
}

impl KeyboardHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one key event. `now_ms` is a caller-supplied monotonic clock
    /// reading; passing it in keeps the state machine deterministic.
    pub fn handle_key(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        now_ms: u64,
    ) -> Option<EditAction> {
        if now_ms.saturating_sub(self.last_key_ms) > FRET_INPUT_TIMEOUT_MS {
            self.pending_fret.clear();
        }
        self.last_key_ms = now_ms;

        if let Key::Digit(digit) = key {
            return self.handle_fret_digit(digit.min(9));
        }

        match key {
            Key::Left => Some(EditAction::MoveCursor(MoveDirection::Left)),
            Key::Right | Key::Enter => Some(EditAction::MoveCursor(MoveDirection::Right)),
            Key::Up => Some(EditAction::MoveCursor(MoveDirection::Up)),
            Key::Down => Some(EditAction::MoveCursor(MoveDirection::Down)),

            Key::Delete | Key::Backspace => Some(EditAction::DeleteNote),
            Key::Space => Some(EditAction::InsertRest),

            Key::H => Some(EditAction::SetTechnique(Technique::HAMMER_ON)),
            Key::P => Some(EditAction::SetTechnique(Technique::PULL_OFF)),
            Key::S if modifiers.is_none() => {
                Some(EditAction::SetTechnique(Technique::SLIDE_UP))
            }
            Key::S if modifiers == Modifiers::SHIFT => {
                Some(EditAction::SetTechnique(Technique::SLIDE_DOWN))
            }
            Key::B => Some(EditAction::SetTechnique(Technique::BEND)),
            Key::V => Some(EditAction::SetTechnique(Technique::VIBRATO)),
            Key::M => Some(EditAction::SetTechnique(Technique::MUTE)),
            Key::T => Some(EditAction::SetTechnique(Technique::TAP)),
            Key::Tilde => Some(EditAction::SetTechnique(Technique::HARMONIC)),
            Key::Slash => Some(EditAction::SetTechnique(Technique::SLIDE_UP)),
            Key::Backslash => Some(EditAction::SetTechnique(Technique::SLIDE_DOWN)),

            Key::W => Some(EditAction::SetDuration(Duration::Whole)),
            Key::Q if modifiers.is_none() => Some(EditAction::SetDuration(Duration::Quarter)),
            Key::E if modifiers.is_none() => Some(EditAction::SetDuration(Duration::Eighth)),

            Key::Plus if modifiers == Modifiers::CTRL => Some(EditAction::AddMeasure),
            Key::Minus if modifiers == Modifiers::CTRL => Some(EditAction::DeleteMeasure),

            Key::Period => Some(EditAction::ToggleDot),

            _ => None,
        }
    }

    fn handle_fret_digit(&mut self, digit: u8) -> Option<EditAction> {
        self.pending_fret.push((b'0' + digit) as char);

        let value: u32 = match self.pending_fret.parse() {
            Ok(value) => value,
            Err(_) => {
                self.pending_fret.clear();
                return None;
            }
        };

        if value > 24 || self.pending_fret.len() >= 2 {
            self.pending_fret.clear();
            // 25 to 99 fall back to their first digit.
            let fret = if value > 24 { value / 10 } else { value };
            return Some(EditAction::InputFret {
                fret: fret.min(24) as u8,
                pending: false,
            });
        }

        Some(EditAction::InputFret {
            fret: value as u8,
            pending: value <= 2,
        })
    }

    /// Forget any buffered digit, e.g. after the consumer commits a
    /// pending fret or the cursor moves by pointer.
    pub fn clear_pending(&mut self) {
        self.pending_fret.clear();
    }
}
