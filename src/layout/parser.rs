// SPDX-License-Identifier: GPL-3.0-only

//! Layout parsing logic for loading JSON layout definitions.

use crate::layout::error::{ParseError, ParseResult};
use crate::layout::types::KeyboardLayout;
use crate::layout::validation::validate_layout;
use std::fs;
use std::path::Path;

/// Parses a keyboard layout from a JSON file.
///
/// I/O errors (file not found, permission denied) and JSON errors (malformed
/// JSON, missing required fields) are reported separately, both carrying the
/// file path.
///
/// # Example
///
/// ```rust,ignore
/// use touchboard::layout::parse_layout_file;
///
/// match parse_layout_file("resources/layouts/en.json") {
///     Ok(result) => println!("Loaded layout: {}", result.layout.name),
///     Err(e) => eprintln!("Failed to parse layout: {}", e),
/// }
/// ```
pub fn parse_layout_file(path: impl AsRef<Path>) -> Result<ParseResult<KeyboardLayout>, ParseError> {
    let path = path.as_ref();
    let attach_path = |e: ParseError| e.with_file_path(path.display().to_string());

    let json_str = fs::read_to_string(path).map_err(|e| attach_path(e.into()))?;
    parse_layout_from_string(&json_str).map_err(attach_path)
}

/// Parses a keyboard layout from a JSON string.
///
/// # Example
///
/// ```rust,ignore
/// use touchboard::layout::parse_layout_from_string;
///
/// let json = r#"{ "name": "Digits", "mode": "symbols", "rows": [] }"#;
/// let result = parse_layout_from_string(json)?;
/// ```
pub fn parse_layout_from_string(json: &str) -> Result<ParseResult<KeyboardLayout>, ParseError> {
    let layout: KeyboardLayout = serde_json::from_str(json)?;
    validate_layout(layout)
}

/// Parses a layout from raw bytes, such as an embedded resource.
pub fn parse_layout_from_bytes(
    bytes: &[u8],
    origin: &str,
) -> Result<ParseResult<KeyboardLayout>, ParseError> {
    serde_json::from_slice(bytes)
        .map_err(ParseError::from)
        .and_then(validate_layout)
        .map_err(|e| e.with_file_path(origin))
}

// ============================================================================
// Tests
// ============================================================================
