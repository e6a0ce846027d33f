// SPDX-License-Identifier: GPL-3.0-only

//! Shift state for letter input.
//!
//! The keyboard has a single shift toggle. Tapping it turns the flag on or
//! off. When the flag is on, the next character typed clears it again
//! (one-shot behavior); if that character is a lowercase letter it is
//! committed in upper case, otherwise it passes through unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use touchboard::input::ShiftState;
//!
//! let mut shift = ShiftState::new();
//! shift.toggle();
//! assert_eq!(shift.apply('a'), "A");
//! assert!(!shift.is_active());
//! ```

/// Tracks whether the next letter should be upper case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ShiftState {
    active: bool,
}

impl ShiftState {
    /// Creates a new `ShiftState` with shift off.
    #[must_use]
    pub fn new() -> Self {
        Self { active: false }
    }

    /// Flips the flag.
    ///
    /// # Returns
    ///
    /// `true` if shift is now active, `false` if it is now inactive
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    /// Turns shift off.
    pub fn clear(&mut self) {
        self.active = false;
    }

    /// Checks if shift is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the text to commit for `c` and clears the flag.
    ///
    /// With shift active and `c` lowercase, `c` is replaced by its
    /// single-character uppercase form. Letters whose uppercase form is
    /// longer than one character (`ß`, `ŉ`) are kept as they are.
    pub fn apply(&mut self, c: char) -> String {
        let shifted = std::mem::take(&mut self.active);
        if shifted && c.is_lowercase() {
            upper_char(c).to_string()
        } else {
            c.to_string()
        }
    }
}

/// Simple one-to-one uppercase mapping.
fn upper_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
