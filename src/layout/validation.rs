// SPDX-License-Identifier: GPL-3.0-only

//! Validation rules for keyboard layout definitions.
//!
//! Validation is permissive: most problems are collected as warnings and the
//! layout is still usable. Only problems that would make the interpreter or
//! the registry misbehave are reported as errors.

use crate::app_settings::MAX_PRINTABLE_CODE;
use crate::layout::error::{ParseError, ParseResult, ValidationIssue};
use crate::layout::types::{KeyDefinition, KeyboardLayout, Sizing};
use std::collections::HashSet;

/// Relative widths above this are flagged as probable typos.
const MAX_RELATIVE_WIDTH: f32 = 10.0;

/// Validates a layout and returns it with warnings.
///
/// Returns a `ParseError::ValidationError` carrying every issue when at least
/// one of them is an error.
pub fn validate_layout(layout: KeyboardLayout) -> Result<ParseResult<KeyboardLayout>, ParseError> {
    let mut issues = Vec::new();

    check_structure(&layout, &mut issues);
    check_language_axis(&layout, &mut issues);
    check_keys(&layout, &mut issues);

    // Errors first, then by location
    issues.sort_by(|a, b| {
        (a.severity, &a.field_path).cmp(&(b.severity, &b.field_path))
    });

    if issues.iter().any(ValidationIssue::is_error) {
        return Err(ParseError::ValidationError {
            issues,
            file_path: None,
        });
    }

    Ok(ParseResult {
        layout,
        warnings: issues,
    })
}

fn check_structure(layout: &KeyboardLayout, issues: &mut Vec<ValidationIssue>) {
    if layout.name.trim().is_empty() {
        issues.push(
            ValidationIssue::warning("name", "Layout name is empty")
                .suggest("name the layout after its script and arrangement"),
        );
    }
    if layout.version.trim().is_empty() {
        issues.push(ValidationIssue::warning("version", "Layout version is empty"));
    }

    if layout.rows.is_empty() {
        issues.push(ValidationIssue::warning("rows", "Layout has no rows"));
    }
    issues.extend(
        layout
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.keys.is_empty())
            .map(|(index, _)| ValidationIssue::warning(format!("rows[{}]", index), "Row has no keys")),
    );
}

/// Checks that the language field agrees with the mode.
///
/// A letters layout without a language cannot be registered, so that case is
/// an error. A language on a shared layout is ignored with a warning.
fn check_language_axis(layout: &KeyboardLayout, issues: &mut Vec<ValidationIssue>) {
    match (layout.mode.is_language_specific(), layout.language) {
        (true, None) => issues.push(
            ValidationIssue::error("language", "Letters layout does not declare a language")
                .suggest("set \"language\" to \"en\" or \"ru\""),
        ),
        (false, Some(language)) => issues.push(ValidationIssue::warning(
            "language",
            format!(
                "Language '{}' is ignored for the shared '{}' layout",
                language, layout.mode
            ),
        )),
        _ => {}
    }
}

/// Checks a key width.
pub fn validate_sizing(sizing: &Sizing, field_path: &str, issues: &mut Vec<ValidationIssue>) {
    let problem = match sizing {
        Sizing::Relative(value) if *value <= 0.0 => {
            Some(format!("Width {} must be positive", value))
        }
        Sizing::Relative(value) if *value > MAX_RELATIVE_WIDTH => {
            Some(format!("Width {} is wider than a whole row", value))
        }
        Sizing::Relative(_) => None,
        Sizing::Pixels(text) => {
            let pixels = text.strip_suffix("px").and_then(|n| n.parse::<u32>().ok());
            match pixels {
                Some(0) => Some(format!("Pixel width '{}' must be positive", text)),
                Some(_) => None,
                None => Some(format!("Pixel width '{}' is not of the form '<n>px'", text)),
            }
        }
    };

    if let Some(message) = problem {
        issues.push(ValidationIssue::warning(field_path, message));
    }
}

/// Checks a key's code, label, hint and width.
pub fn validate_key(key: &KeyDefinition, key_path: &str, issues: &mut Vec<ValidationIssue>) {
    let code = key.code.value();
    let code_path = format!("{}.code", key_path);

    if key.code.is_control() {
        if !key.code.is_known_control() {
            issues.push(
                ValidationIssue::warning(
                    &code_path,
                    format!("Control code {} does nothing", code),
                )
                .suggest("control codes run from -1 to -6"),
            );
        }
        if key.label.is_empty() {
            issues.push(ValidationIssue::warning(
                format!("{}.label", key_path),
                "Control key has no label",
            ));
        }
    } else if code > MAX_PRINTABLE_CODE && char::from_u32(code as u32).is_none() {
        issues.push(ValidationIssue::error(
            &code_path,
            format!("Code {:#X} is not a Unicode scalar value", code),
        ));
    }

    if let Some(hint) = key.hint.as_ref().filter(|h| h.chars().count() != 1) {
        issues.push(ValidationIssue::warning(
            format!("{}.hint", key_path),
            format!("Hint '{}' should be a single character", hint),
        ));
    }

    validate_sizing(&key.width, &format!("{}.width", key_path), issues);
}

/// Validates every key and reports printable codes that appear twice.
fn check_keys(layout: &KeyboardLayout, issues: &mut Vec<ValidationIssue>) {
    let mut seen = HashSet::new();

    for (row_idx, row) in layout.rows.iter().enumerate() {
        for (key_idx, key) in row.keys.iter().enumerate() {
            let key_path = format!("rows[{}].keys[{}]", row_idx, key_idx);
            validate_key(key, &key_path, issues);

            if !key.code.is_control() && !seen.insert(key.code) {
                issues.push(ValidationIssue::warning(
                    format!("{}.code", key_path),
                    format!("Code {} appears more than once", key.code),
                ));
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
