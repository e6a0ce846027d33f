// SPDX-License-Identifier: GPL-3.0-only

//! Input handling for the keyboard.
//!
//! This module resolves raw key codes from layout definitions and tracks the
//! shift state used when committing letters.
//!
//! # Features
//!
//! - **Keycode resolution**: Map a signed key code to a control code, a
//!   literal key, a printable character or an emoji
//! - **Code point decoding**: Turn code points into text and UTF-16 code units
//! - **Shift state**: A toggle that upper-cases the next lowercase letter
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use touchboard::input::{parse_keycode, ResolvedKeycode, ShiftState};
//! use touchboard::layout::KeyCode;
//!
//! let mut shift = ShiftState::new();
//! shift.toggle();
//!
//! if let ResolvedKeycode::Character(c) = parse_keycode(KeyCode(97)) {
//!     println!("{}", shift.apply(c)); // "A"
//! }
//! ```

// Sub-modules
pub mod keycode;
pub mod shift;

// Re-export public API
pub use keycode::{decode_codepoint, encode_utf16, parse_keycode, ControlCode, ResolvedKeycode};
pub use shift::ShiftState;

// ============================================================================
// Module Tests
// ============================================================================
