// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

use crate::layout::Language;

/// Language used when no persisted default is available.
pub const DEFAULT_LANGUAGE: Language = Language::En;

/// Whether the enlarged key preview is shown when no preference is stored.
pub const DEFAULT_SHOW_KEY_PREVIEW: bool = true;

/// Highest key code that is interpreted as a plain printable character.
///
/// Codes above this value carry an emoji code point.
pub const MAX_PRINTABLE_CODE: i32 = 1000;

/// Number of characters removed by a single delete key press.
pub const DELETE_COUNT: usize = 1;
