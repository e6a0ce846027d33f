// SPDX-License-Identifier: GPL-3.0-only

//! Core data types for keyboard layouts.
//!
//! This module defines the language and mode axes that select a layout and
//! the key definitions a layout is made of.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Language and Mode
// ============================================================================

/// Letter layout language.
///
/// The set is closed; adding a language means adding a variant here, listing
/// it in [`Language::ALL`] and shipping a letters layout for it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Russian
    Ru,
}

impl Language {
    /// All supported languages in switching order.
    pub const ALL: [Language; 2] = [Language::En, Language::Ru];

    /// Returns the language that follows this one when cycling.
    ///
    /// With two languages this is a binary toggle.
    #[must_use]
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Returns the short tag used in configuration and layout files.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a language tag is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown language '{}'", self.0)
    }
}

impl std::error::Error for UnknownLanguage {}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// Input mode, independent of the language axis.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Language-specific letter keys
    #[default]
    Letters,
    /// Digits and punctuation, shared by all languages
    Symbols,
    /// Emoji glyphs, shared by all languages
    Emoji,
}

impl Mode {
    /// All modes.
    pub const ALL: [Mode; 3] = [Mode::Letters, Mode::Symbols, Mode::Emoji];

    /// Returns true if the layout for this mode differs per language.
    pub fn is_language_specific(self) -> bool {
        self == Mode::Letters
    }

    /// Returns the tag used in layout files.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Letters => "letters",
            Mode::Symbols => "symbols",
            Mode::Emoji => "emoji",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Layout Data Structures
// ============================================================================

/// Raw key code carried by a key definition.
///
/// Non-negative values up to 1000 are printable characters, larger values are
/// emoji code points and negative values are control codes. See
/// [`crate::input::parse_keycode`] for the interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub i32);

impl KeyCode {
    /// Toggles the shift flag.
    pub const SHIFT: KeyCode = KeyCode(-1);
    /// Cycles to the next language.
    pub const LANGUAGE_SWITCH: KeyCode = KeyCode(-2);
    /// Switches to the emoji layout.
    pub const EMOJI: KeyCode = KeyCode(-3);
    /// Switches to the symbols layout.
    pub const SYMBOLS: KeyCode = KeyCode(-4);
    /// Deletes the character before the cursor.
    pub const DELETE: KeyCode = KeyCode(-5);
    /// Returns from symbols or emoji to letters.
    pub const BACK_TO_LETTERS: KeyCode = KeyCode(-6);
    /// Line feed, sent to the host as an Enter key event.
    pub const ENTER: KeyCode = KeyCode(10);
    /// Space bar.
    pub const SPACE: KeyCode = KeyCode(32);
    /// Full stop.
    pub const PERIOD: KeyCode = KeyCode(46);

    /// Every reserved negative control code.
    pub const CONTROL_CODES: [KeyCode; 6] = [
        KeyCode::SHIFT,
        KeyCode::LANGUAGE_SWITCH,
        KeyCode::EMOJI,
        KeyCode::SYMBOLS,
        KeyCode::DELETE,
        KeyCode::BACK_TO_LETTERS,
    ];

    /// Returns the raw integer value.
    pub fn value(self) -> i32 {
        self.0
    }

    /// Returns true for negative codes, recognized or not.
    pub fn is_control(self) -> bool {
        self.0 < 0
    }

    /// Returns true for one of the reserved control codes.
    pub fn is_known_control(self) -> bool {
        Self::CONTROL_CODES.contains(&self)
    }
}

impl From<i32> for KeyCode {
    fn from(value: i32) -> Self {
        KeyCode(value)
    }
}

impl From<char> for KeyCode {
    fn from(c: char) -> Self {
        KeyCode(c as i32)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Width of a key.
///
/// This is a geometry placeholder for the host renderer; the core never
/// interprets it beyond validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sizing {
    /// Relative size multiplier (1.0 = standard size)
    Relative(f32),
    /// Pixel override (format: "20px")
    Pixels(String),
}

impl Default for Sizing {
    fn default() -> Self {
        Sizing::Relative(1.0)
    }
}

impl Sizing {
    /// Returns the relative value for layout calculations.
    /// For Pixels sizing, returns 1.0 as a default unit.
    pub fn as_relative(&self) -> f32 {
        match self {
            Sizing::Relative(r) => *r,
            Sizing::Pixels(_) => 1.0,
        }
    }
}

fn is_default_sizing(sizing: &Sizing) -> bool {
    *sizing == Sizing::default()
}

/// A single key on a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDefinition {
    /// Code delivered to the interpreter when the key is tapped
    pub code: KeyCode,

    /// Display label; empty means "derive from code"
    #[serde(default)]
    pub label: String,

    /// Width of the key
    #[serde(default, skip_serializing_if = "is_default_sizing")]
    pub width: Sizing,

    /// Secondary character shown in the key corner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    /// Whether holding the key repeats it
    #[serde(default)]
    pub repeatable: bool,
}

impl KeyDefinition {
    /// Creates a key with the given code and label and default geometry.
    pub fn new(code: impl Into<KeyCode>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            width: Sizing::default(),
            hint: None,
            repeatable: false,
        }
    }

    /// Returns the label to display, deriving one from the code when the
    /// layout leaves it empty.
    pub fn display_label(&self) -> String {
        if !self.label.is_empty() {
            return self.label.clone();
        }
        u32::try_from(self.code.0)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    }
}

/// A row of keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Keys in display order
    #[serde(default)]
    pub keys: Vec<KeyDefinition>,
}

/// A complete keyboard layout for one (language, mode) pair.
///
/// Letters layouts name their language; symbols and emoji layouts leave it
/// unset and are shared by every language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyboardLayout {
    /// Layout name
    pub name: String,

    /// Language of a letters layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    /// Mode this layout is shown in
    pub mode: Mode,

    /// Layout version
    #[serde(default = "default_version")]
    pub version: String,

    /// Rows from top to bottom
    #[serde(default)]
    pub rows: Vec<Row>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl KeyboardLayout {
    /// Iterates over every key in row order.
    pub fn keys(&self) -> impl Iterator<Item = &KeyDefinition> {
        self.rows.iter().flat_map(|row| row.keys.iter())
    }

    /// Returns the number of keys on the layout.
    pub fn key_count(&self) -> usize {
        self.rows.iter().map(|row| row.keys.len()).sum()
    }

    /// Returns the first key with the given code.
    pub fn find_key(&self, code: KeyCode) -> Option<&KeyDefinition> {
        self.keys().find(|key| key.code == code)
    }

    /// Returns the (language, mode) pairs this layout serves.
    pub fn covered_pairs(&self) -> Vec<(Language, Mode)> {
        match (self.mode.is_language_specific(), self.language) {
            (true, Some(language)) => vec![(language, self.mode)],
            (true, None) => Vec::new(),
            (false, _) => Language::ALL.iter().map(|l| (*l, self.mode)).collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
