// SPDX-License-Identifier: GPL-3.0-only

//! Instructions handed back to the host after a key press.

use crate::layout::{Language, Mode};
use std::fmt;

/// A non-text key the host dispatches as a press/release pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKey {
    /// Enter / Return
    Enter,
}

impl fmt::Display for ControlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlKey::Enter => write!(f, "Enter"),
        }
    }
}

/// The single instruction produced by interpreting one key code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Insert the text at the cursor.
    CommitText(String),
    /// Remove this many characters before the cursor.
    DeleteBackward(usize),
    /// Dispatch a control key.
    SendControlKey(ControlKey),
    /// Reload the visible keyboard for this pair.
    SwitchLayout(Language, Mode),
    /// Nothing to do.
    NoOp,
}

impl Action {
    /// Returns true for [`Action::NoOp`].
    pub fn is_noop(&self) -> bool {
        matches!(self, Action::NoOp)
    }

    /// Returns the committed text, if this action commits any.
    pub fn committed_text(&self) -> Option<&str> {
        match self {
            Action::CommitText(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::CommitText(text) => write!(f, "commit {:?}", text),
            Action::DeleteBackward(count) => write!(f, "delete {}", count),
            Action::SendControlKey(key) => write!(f, "send {}", key),
            Action::SwitchLayout(language, mode) => write!(f, "switch to {}/{}", language, mode),
            Action::NoOp => write!(f, "no-op"),
        }
    }
}
