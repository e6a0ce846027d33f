// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard layouts and the registry that selects them.
//!
//! A layout is the ordered set of keys shown for one (language, mode) pair.
//! Layouts are plain JSON documents; the built-in ones are compiled into the
//! crate and loaded by [`LayoutRegistry::builtin`].
//!
//! # Layout Format
//!
//! ```json
//! {
//!     "name": "English (QWERTY)",
//!     "language": "en",
//!     "mode": "letters",
//!     "version": "1.0",
//!     "rows": [
//!         { "keys": [ { "code": 113, "label": "q" }, { "code": -5, "label": "⌫", "repeatable": true } ] }
//!     ]
//! }
//! ```
//!
//! `language` is required for `letters` layouts and omitted for the shared
//! `symbols` and `emoji` layouts. `width` accepts a relative multiplier or a
//! pixel override such as `"96px"`; `hint` is the secondary character a
//! renderer may draw in the key corner.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use touchboard::layout::{Language, LayoutRegistry, Mode};
//!
//! let registry = LayoutRegistry::builtin()?;
//! let layout = registry.resolve(Language::Ru, Mode::Letters);
//! for row in &layout.rows {
//!     let labels: Vec<String> = row.keys.iter().map(|k| k.display_label()).collect();
//!     println!("{}", labels.join(" "));
//! }
//! ```

// Sub-modules
pub mod error;
pub mod parser;
pub mod registry;
pub mod types;
pub mod validation;

// Re-export public API - Error handling types
pub use error::{ParseError, ParseResult, Severity, ValidationIssue};
pub use types::UnknownLanguage;

// Re-export public API - Parser functions
pub use parser::{parse_layout_file, parse_layout_from_bytes, parse_layout_from_string};

// Re-export public API - Data structures
pub use registry::LayoutRegistry;
pub use types::{KeyCode, KeyDefinition, KeyboardLayout, Language, Mode, Row, Sizing};

// ============================================================================
// Public API Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test 1: Built-in Russian layout carries the secondary character hints
    #[test]
    fn test_russian_hints() {
        let registry = LayoutRegistry::builtin().unwrap();
        let ru = registry.resolve(Language::Ru, Mode::Letters);

        let hint_of = |c: char| ru.find_key(KeyCode::from(c)).and_then(|k| k.hint.clone());
        assert_eq!(hint_of('е').as_deref(), Some("ё"));
        assert_eq!(hint_of('и').as_deref(), Some("й"));
        assert_eq!(hint_of('ь').as_deref(), Some("ъ"));
        assert_eq!(hint_of('х').as_deref(), Some("э"));
    }

    /// Test 2: Built-in layouts re-serialize and parse back through the public API
    #[test]
    fn test_builtin_layouts_reparse() {
        let registry = LayoutRegistry::builtin().unwrap();

        for layout in registry.layouts() {
            let json = serde_json::to_string_pretty(layout).unwrap();
            let reparsed = parse_layout_from_string(&json)
                .unwrap_or_else(|e| panic!("{} failed to reparse: {}", layout.name, e));
            assert!(!reparsed.has_warnings(), "{}: {:?}", layout.name, reparsed.warnings);
            assert_eq!(&reparsed.layout, layout);
        }
    }

    /// Test 3: Emoji layout only holds code points above the printable range
    #[test]
    fn test_emoji_layout_codes() {
        let registry = LayoutRegistry::builtin().unwrap();
        let emoji = registry.resolve(Language::En, Mode::Emoji);

        let glyphs: Vec<&KeyDefinition> = emoji.keys().filter(|k| !k.code.is_control()).collect();
        assert!(glyphs.len() >= 20);
        for key in glyphs {
            if key.code == KeyCode::SPACE || key.code == KeyCode::ENTER {
                continue;
            }
            assert!(
                key.code.value() > crate::app_settings::MAX_PRINTABLE_CODE,
                "Emoji key {} has a printable-range code",
                key.label
            );
        }
    }
}
