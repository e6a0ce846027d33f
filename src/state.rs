// SPDX-License-Identifier: GPL-3.0-only

use crate::app_settings;
use crate::input::ShiftState;
use crate::layout::{Language, Mode};

/// Keyboard state for one input session.
///
/// Only `language` outlives a session; it is restored from configuration
/// when the interpreter is created. `mode` and `shift` start over whenever a
/// fresh input session begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterpreterState {
    /// Language of the letters layout.
    pub language: Language,
    /// Active layout family.
    pub mode: Mode,
    /// Shift flag for the next letter.
    pub shift: ShiftState,
}

impl InterpreterState {
    /// Creates the state for a new session in the given language.
    pub fn new(language: Language) -> Self {
        Self {
            language,
            mode: Mode::Letters,
            shift: ShiftState::new(),
        }
    }

    /// Returns true if the next lowercase letter will be upper-cased.
    pub fn is_shifted(&self) -> bool {
        self.shift.is_active()
    }

    /// Brings mode and shift back to their session-start values.
    pub fn reset_for_session(&mut self) {
        self.mode = Mode::Letters;
        self.shift.clear();
    }
}

impl Default for InterpreterState {
    fn default() -> Self {
        Self::new(app_settings::DEFAULT_LANGUAGE)
    }
}
