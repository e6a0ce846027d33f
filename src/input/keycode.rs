// SPDX-License-Identifier: GPL-3.0-only

//! Key code classification and code point decoding.
//!
//! Layouts deliver a single signed integer per key. This module resolves that
//! integer into what it stands for:
//!
//! 1. **Control codes** (negative): shift, language switch, mode switches, delete
//! 2. **Enter, space and period** (`10`, `32`, `46`): literal codes with fixed meaning
//! 3. **Printable characters** (`0..=1000`): a Unicode scalar value
//! 4. **Emoji** (`> 1000`): a Unicode code point, possibly above U+FFFF

use crate::app_settings::MAX_PRINTABLE_CODE;
use crate::layout::KeyCode;

/// A reserved negative key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlCode {
    /// Toggle the shift flag
    Shift,
    /// Cycle to the next language
    LanguageSwitch,
    /// Show the emoji layout
    EmojiMode,
    /// Show the symbols layout
    SymbolsMode,
    /// Delete before the cursor
    Delete,
    /// Return to the letters layout
    BackToLetters,
}

impl ControlCode {
    /// Looks up the control code for a raw key code.
    pub fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::SHIFT => Some(ControlCode::Shift),
            KeyCode::LANGUAGE_SWITCH => Some(ControlCode::LanguageSwitch),
            KeyCode::EMOJI => Some(ControlCode::EmojiMode),
            KeyCode::SYMBOLS => Some(ControlCode::SymbolsMode),
            KeyCode::DELETE => Some(ControlCode::Delete),
            KeyCode::BACK_TO_LETTERS => Some(ControlCode::BackToLetters),
            _ => None,
        }
    }
}

/// What a raw key code stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedKeycode {
    /// A reserved control code
    Control(ControlCode),
    /// The Enter key (code 10)
    Enter,
    /// The space bar (code 32)
    Space,
    /// The full stop (code 46)
    Period,
    /// A printable character from the `0..=1000` range
    Character(char),
    /// An emoji code point above 1000
    Emoji(char),
    /// A negative code that is not reserved, or a code above 1000 that is
    /// not a Unicode scalar value
    Unrecognized(i32),
}

/// Resolves a raw key code.
///
/// Every code resolves to something; codes that carry no meaning come back as
/// [`ResolvedKeycode::Unrecognized`].
///
/// # Examples
///
/// ```rust,ignore
/// use touchboard::input::{parse_keycode, ResolvedKeycode};
/// use touchboard::layout::KeyCode;
///
/// assert_eq!(parse_keycode(KeyCode(97)), ResolvedKeycode::Character('a'));
/// assert_eq!(parse_keycode(KeyCode(0x1F601)), ResolvedKeycode::Emoji('😁'));
/// ```
pub fn parse_keycode(code: KeyCode) -> ResolvedKeycode {
    if let Some(control) = ControlCode::from_code(code) {
        return ResolvedKeycode::Control(control);
    }

    match code {
        KeyCode::ENTER => ResolvedKeycode::Enter,
        KeyCode::SPACE => ResolvedKeycode::Space,
        KeyCode::PERIOD => ResolvedKeycode::Period,
        KeyCode(value) if value < 0 => ResolvedKeycode::Unrecognized(value),
        KeyCode(value) => {
            // Non-negative here, so the cast is lossless
            match char::from_u32(value as u32) {
                Some(c) if value > MAX_PRINTABLE_CODE => ResolvedKeycode::Emoji(c),
                Some(c) => ResolvedKeycode::Character(c),
                None => ResolvedKeycode::Unrecognized(value),
            }
        }
    }
}

/// Converts a Unicode scalar value into text.
///
/// Returns `None` for surrogates and values above U+10FFFF.
pub fn decode_codepoint(codepoint: u32) -> Option<String> {
    char::from_u32(codepoint).map(String::from)
}

/// Converts a Unicode scalar value into UTF-16 code units.
///
/// Values above U+FFFF become a surrogate pair. Returns `None` for values
/// that are not scalar values.
pub fn encode_utf16(codepoint: u32) -> Option<Vec<u16>> {
    let c = char::from_u32(codepoint)?;
    let mut buf = [0u16; 2];
    Some(c.encode_utf16(&mut buf).to_vec())
}

// ============================================================================
// Unit Tests
// ============================================================================
