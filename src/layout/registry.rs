// SPDX-License-Identifier: GPL-3.0-only

//! Lookup from a (language, mode) pair to the layout shown for it.
//!
//! The registry is built once and never mutated afterwards, so it can be
//! shared between threads behind an `Arc` and queried without locking.
//! Construction verifies that every pair of [`Language::ALL`] and
//! [`Mode::ALL`] is covered exactly once; [`LayoutRegistry::resolve`] relies
//! on that and treats a missing layout as a broken invariant.

use crate::layout::parser::{parse_layout_file, parse_layout_from_bytes};
use crate::layout::error::{ParseError, ParseResult};
use crate::layout::types::{KeyboardLayout, Language, Mode};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Layout definitions compiled into the binary.
#[derive(RustEmbed)]
#[folder = "resources/layouts/"]
struct LayoutAssets;

/// Immutable table of keyboard layouts.
#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    layouts: Vec<KeyboardLayout>,
    index: HashMap<(Language, Mode), usize>,
}

impl LayoutRegistry {
    /// Builds the registry from the layouts embedded at compile time.
    ///
    /// # Errors
    ///
    /// Fails if an embedded layout does not parse or validate, or if the
    /// embedded set does not cover every (language, mode) pair.
    pub fn builtin() -> Result<Self, ParseError> {
        let mut names: Vec<String> = LayoutAssets::iter()
            .filter(|name| name.ends_with(".json"))
            .map(|name| name.into_owned())
            .collect();
        names.sort();

        let mut layouts = Vec::with_capacity(names.len());
        for name in names {
            let Some(file) = LayoutAssets::get(&name) else {
                continue;
            };
            let origin = format!("embedded:{}", name);
            let result = parse_layout_from_bytes(&file.data, &origin)?;
            layouts.push(log_warnings(result, &origin));
        }

        let registry = Self::from_layouts(layouts)?;
        tracing::info!("Loaded {} built-in layouts", registry.layouts.len());
        Ok(registry)
    }

    /// Builds the registry from every `*.json` file in a directory.
    ///
    /// Files are read in name order.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors, on any layout that does not parse or validate,
    /// and when coverage is incomplete or ambiguous.
    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let dir_error = |e: std::io::Error| ParseError::from(e).with_file_path(path.display().to_string());
        let entries = fs::read_dir(path).map_err(dir_error)?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(dir_error)?;
            let file_path = entry.path();
            if file_path.extension().is_some_and(|ext| ext == "json") {
                files.push(file_path);
            }
        }
        files.sort();

        let mut layouts = Vec::with_capacity(files.len());
        for file in &files {
            let result = parse_layout_file(file)?;
            layouts.push(log_warnings(result, &file.display().to_string()));
        }

        let registry = Self::from_layouts(layouts)?;
        tracing::info!(
            "Loaded {} layouts from {}",
            registry.layouts.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Builds the registry from already parsed layouts.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::DuplicateLayout` when two layouts cover the same
    /// pair and `ParseError::UnknownLayout` for the first uncovered pair.
    pub fn from_layouts(layouts: Vec<KeyboardLayout>) -> Result<Self, ParseError> {
        let mut index = HashMap::new();

        for (position, layout) in layouts.iter().enumerate() {
            for pair in layout.covered_pairs() {
                if let Some(existing) = index.insert(pair, position) {
                    return Err(ParseError::DuplicateLayout {
                        language: pair.0,
                        mode: pair.1,
                        names: (layouts[existing].name.clone(), layout.name.clone()),
                    });
                }
            }
        }

        for language in Language::ALL {
            for mode in Mode::ALL {
                if !index.contains_key(&(language, mode)) {
                    return Err(ParseError::UnknownLayout { language, mode });
                }
            }
        }

        Ok(Self { layouts, index })
    }

    /// Returns the layout for a pair, or `UnknownLayout` if none exists.
    ///
    /// A registry that was built successfully never returns an error here.
    pub fn try_resolve(&self, language: Language, mode: Mode) -> Result<&KeyboardLayout, ParseError> {
        self.index
            .get(&(language, mode))
            .map(|&position| &self.layouts[position])
            .ok_or(ParseError::UnknownLayout { language, mode })
    }

    /// Returns the layout for a pair.
    ///
    /// # Panics
    ///
    /// Panics if the pair is not covered. Construction rules this out, so a
    /// panic here means the registry invariant was broken.
    pub fn resolve(&self, language: Language, mode: Mode) -> &KeyboardLayout {
        match self.try_resolve(language, mode) {
            Ok(layout) => layout,
            Err(err) => panic!("layout registry invariant violated: {}", err),
        }
    }

    /// Iterates over the distinct layouts in load order.
    pub fn layouts(&self) -> impl Iterator<Item = &KeyboardLayout> {
        self.layouts.iter()
    }

    /// Returns the number of distinct layouts.
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// Returns true if the registry holds no layouts.
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

fn log_warnings(result: ParseResult<KeyboardLayout>, origin: &str) -> KeyboardLayout {
    for warning in &result.warnings {
        tracing::warn!("{}: {}", origin, warning);
    }
    result.into_layout()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::{KeyCode, KeyDefinition, Row};
    use std::sync::Arc;

    fn layout(name: &str, language: Option<Language>, mode: Mode) -> KeyboardLayout {
        KeyboardLayout {
            name: name.to_string(),
            language,
            mode,
            version: "1.0".to_string(),
            rows: vec![Row {
                keys: vec![KeyDefinition::new(KeyCode::SPACE, "space")],
            }],
        }
    }

    fn minimal_set() -> Vec<KeyboardLayout> {
        vec![
            layout("en", Some(Language::En), Mode::Letters),
            layout("ru", Some(Language::Ru), Mode::Letters),
            layout("symbols", None, Mode::Symbols),
            layout("emoji", None, Mode::Emoji),
        ]
    }

    /// Test 1: Built-in layouts cover every pair
    #[test]
    fn test_builtin_covers_every_pair() {
        let registry = LayoutRegistry::builtin().expect("Built-in layouts should load");

        assert_eq!(registry.len(), 4);
        for language in Language::ALL {
            for mode in Mode::ALL {
                assert!(
                    registry.try_resolve(language, mode).is_ok(),
                    "Missing layout for {} / {}",
                    language,
                    mode
                );
            }
        }
    }

    /// Test 2: Letters layouts differ per language, shared layouts do not
    #[test]
    fn test_builtin_letters_and_shared_layouts() {
        let registry = LayoutRegistry::builtin().unwrap();

        let en = registry.resolve(Language::En, Mode::Letters);
        let ru = registry.resolve(Language::Ru, Mode::Letters);
        assert_eq!(en.language, Some(Language::En));
        assert_eq!(ru.language, Some(Language::Ru));
        assert!(en.find_key(KeyCode::from('q')).is_some());
        assert!(ru.find_key(KeyCode::from('й')).is_some());

        for mode in [Mode::Symbols, Mode::Emoji] {
            let a = registry.resolve(Language::En, mode);
            let b = registry.resolve(Language::Ru, mode);
            assert!(std::ptr::eq(a, b), "{} layout should be shared", mode);
        }
    }

    /// Test 3: Every built-in layout can reach the other modes
    #[test]
    fn test_builtin_layouts_have_navigation_keys() {
        let registry = LayoutRegistry::builtin().unwrap();

        for language in Language::ALL {
            let letters = registry.resolve(language, Mode::Letters);
            for code in [
                KeyCode::SHIFT,
                KeyCode::LANGUAGE_SWITCH,
                KeyCode::SYMBOLS,
                KeyCode::EMOJI,
                KeyCode::DELETE,
                KeyCode::ENTER,
                KeyCode::SPACE,
            ] {
                assert!(
                    letters.find_key(code).is_some(),
                    "{} is missing key {}",
                    letters.name,
                    code
                );
            }
        }

        for mode in [Mode::Symbols, Mode::Emoji] {
            let shared = registry.resolve(Language::En, mode);
            assert!(shared.find_key(KeyCode::BACK_TO_LETTERS).is_some());
            assert!(shared.find_key(KeyCode::DELETE).is_some());
        }
    }

    /// Test 4: Missing coverage is reported as UnknownLayout
    #[test]
    fn test_missing_pair_is_unknown_layout() {
        let mut layouts = minimal_set();
        layouts.retain(|l| l.mode != Mode::Emoji);

        match LayoutRegistry::from_layouts(layouts) {
            Err(ParseError::UnknownLayout { mode, .. }) => assert_eq!(mode, Mode::Emoji),
            other => panic!("Expected UnknownLayout, got {:?}", other),
        }
    }

    /// Test 5: Double coverage is reported as DuplicateLayout
    #[test]
    fn test_duplicate_pair_is_rejected() {
        let mut layouts = minimal_set();
        layouts.push(layout("en-alt", Some(Language::En), Mode::Letters));

        match LayoutRegistry::from_layouts(layouts) {
            Err(ParseError::DuplicateLayout { names, .. }) => {
                assert_eq!(names, ("en".to_string(), "en-alt".to_string()));
            }
            other => panic!("Expected DuplicateLayout, got {:?}", other),
        }
    }

    /// Test 6: Resolve is idempotent and usable from several threads
    #[test]
    fn test_concurrent_resolve() {
        let registry = Arc::new(LayoutRegistry::from_layouts(minimal_set()).unwrap());

        std::thread::scope(|scope| {
            for language in Language::ALL {
                let registry = Arc::clone(&registry);
                scope.spawn(move || {
                    for _ in 0..100 {
                        let layout = registry.resolve(language, Mode::Letters);
                        assert_eq!(layout.language, Some(language));
                    }
                });
            }
        });
    }

    /// Test 7: Loading from a directory of JSON files
    #[test]
    fn test_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        for layout in minimal_set() {
            let path = dir.path().join(format!("{}.json", layout.name));
            fs::write(path, serde_json::to_string(&layout).unwrap()).unwrap();
        }
        fs::write(dir.path().join("README.txt"), "not a layout").unwrap();

        let registry = LayoutRegistry::from_dir(dir.path()).expect("Directory should load");
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.resolve(Language::Ru, Mode::Letters).name, "ru");
    }

    /// Test 8: Missing directory is an I/O error
    #[test]
    fn test_from_missing_dir() {
        assert!(matches!(
            LayoutRegistry::from_dir("/nonexistent/layouts"),
            Err(ParseError::IoError { .. })
        ));
    }

    /// Test 9: resolve panics on a broken invariant
    #[test]
    #[should_panic(expected = "layout registry invariant violated")]
    fn test_resolve_panics_without_layout() {
        let registry = LayoutRegistry {
            layouts: Vec::new(),
            index: HashMap::new(),
        };
        registry.resolve(Language::En, Mode::Letters);
    }
}
