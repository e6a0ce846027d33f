// SPDX-License-Identifier: GPL-3.0-only

//! Key interpretation and the keyboard mode state machine.
//!
//! The interpreter consumes one raw key code at a time, updates its
//! [`InterpreterState`](crate::state::InterpreterState) and returns a single
//! [`Action`] for the host to execute.
//!
//! | Input code | Effect on state | Action |
//! |---|---|---|
//! | Delete (-5) | none | `DeleteBackward(1)` |
//! | Shift (-1) | toggle shift | `NoOp` |
//! | Enter (10) | none | `SendControlKey(Enter)` |
//! | Space (32), Period (46) | none | `CommitText` |
//! | Language switch (-2) | next language, shift off | `SwitchLayout` |
//! | Emoji (-3), Symbols (-4), Letters (-6) | set mode, shift off | `SwitchLayout` |
//! | above 1000 | none | `CommitText` of the code point |
//! | 0..=1000 | shift off; a lowercase letter is upper-cased if it was on | `CommitText` |
//! | other negative | none | `NoOp` |
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use touchboard::interpreter::{Action, KeyInterpreter};
//! use touchboard::layout::{KeyCode, Language};
//!
//! let mut interpreter = KeyInterpreter::new(Language::En);
//! interpreter.interpret(KeyCode::SHIFT);
//! assert_eq!(interpreter.interpret(KeyCode(97)), Action::CommitText("A".into()));
//! ```

pub mod action;
pub mod engine;

pub use action::{Action, ControlKey};
pub use engine::KeyInterpreter;
