// SPDX-License-Identifier: GPL-3.0-only

//! Diagnostics and errors produced while loading layouts.
//!
//! Loading reports two kinds of problems. [`ValidationIssue`]s describe a
//! single field of a layout and are either fatal or advisory. [`ParseError`]
//! is what a loader returns when a layout (or a set of layouts) cannot be
//! used at all.

use crate::layout::types::{Language, Mode};
use std::fmt;
use std::io;

/// How serious a validation issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// The layout is rejected
    Error,
    /// The layout loads; the issue is logged
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// A problem found at one field of a layout definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Location inside the layout, e.g. `rows[1].keys[2].code`
    pub field_path: String,
    pub message: String,
    /// How to fix the problem, when there is an obvious fix
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// A fatal issue at `field_path`.
    pub fn error(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::at(Severity::Error, field_path.into(), message.into())
    }

    /// An advisory issue at `field_path`.
    pub fn warning(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::at(Severity::Warning, field_path.into(), message.into())
    }

    fn at(severity: Severity, field_path: String, message: String) -> Self {
        Self {
            severity,
            field_path,
            message,
            suggestion: None,
        }
    }

    /// Attaches a fix suggestion.
    pub fn suggest(self, suggestion: impl Into<String>) -> Self {
        Self {
            suggestion: Some(suggestion.into()),
            ..self
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.field_path, self.severity, self.message)?;
        match &self.suggestion {
            Some(suggestion) => write!(f, " (hint: {})", suggestion),
            None => Ok(()),
        }
    }
}

/// A layout that parsed and validated, plus the warnings it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult<T> {
    pub layout: T,
    /// Advisory issues, sorted by field path
    pub warnings: Vec<ValidationIssue>,
}

impl<T> ParseResult<T> {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Drops the warnings.
    pub fn into_layout(self) -> T {
        self.layout
    }
}

/// Error loading layouts or building the registry.
#[derive(Debug)]
pub enum ParseError {
    /// A layout file or directory could not be read
    IoError {
        source: io::Error,
        file_path: Option<String>,
    },
    /// The document is not JSON, or does not have the layout shape
    JsonError {
        source: serde_json::Error,
        file_path: Option<String>,
    },
    /// At least one issue has [`Severity::Error`]; all issues are listed,
    /// errors first
    ValidationError {
        issues: Vec<ValidationIssue>,
        file_path: Option<String>,
    },
    /// No layout covers a (language, mode) pair
    UnknownLayout { language: Language, mode: Mode },
    /// Two layouts cover the same (language, mode) pair
    DuplicateLayout {
        language: Language,
        mode: Mode,
        /// Names of the earlier and the later layout
        names: (String, String),
    },
}

impl ParseError {
    /// Records where the failing document came from.
    ///
    /// A path that is already set is kept, so the innermost loader wins.
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        if let ParseError::IoError { file_path, .. }
        | ParseError::JsonError { file_path, .. }
        | ParseError::ValidationError { file_path, .. } = &mut self
        {
            file_path.get_or_insert_with(|| path.into());
        }
        self
    }

    /// The file (or embedded resource) the error refers to.
    pub fn file_path(&self) -> Option<&str> {
        match self {
            ParseError::IoError { file_path, .. }
            | ParseError::JsonError { file_path, .. }
            | ParseError::ValidationError { file_path, .. } => file_path.as_deref(),
            ParseError::UnknownLayout { .. } | ParseError::DuplicateLayout { .. } => None,
        }
    }

    /// One-based line of a JSON syntax or shape error.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::JsonError { source, .. } => Some(source.line()),
            _ => None,
        }
    }

    /// A short hint on how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ParseError::IoError { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                Some("check that the path exists")
            }
            ParseError::IoError { .. } => Some("check the file permissions"),
            ParseError::JsonError { .. } => Some("fix the JSON near the reported line"),
            ParseError::ValidationError { .. } => None,
            ParseError::UnknownLayout { .. } => Some(
                "add a letters layout for the language, or a shared layout for the mode",
            ),
            ParseError::DuplicateLayout { .. } => {
                Some("remove one of the layouts or change its language or mode")
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origin = self
            .file_path()
            .map(|path| format!(" '{}'", path))
            .unwrap_or_default();

        match self {
            ParseError::IoError { source, .. } => {
                write!(f, "cannot read layout{}: {}", origin, source)?;
            }
            ParseError::JsonError { source, .. } => {
                write!(f, "malformed layout{}: {}", origin, source)?;
            }
            ParseError::ValidationError { issues, .. } => {
                write!(f, "invalid layout{} ({} issue(s))", origin, issues.len())?;
                for issue in issues {
                    write!(f, "\n  - {}", issue)?;
                }
            }
            ParseError::UnknownLayout { language, mode } => {
                write!(f, "no layout for language '{}' in mode '{}'", language, mode)?;
            }
            ParseError::DuplicateLayout {
                language,
                mode,
                names: (first, second),
            } => {
                write!(
                    f,
                    "'{}' and '{}' both cover language '{}' in mode '{}'",
                    first, second, language, mode
                )?;
            }
        }

        if let Some(suggestion) = self.suggestion() {
            write!(f, "\n  hint: {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::IoError { source, .. } => Some(source),
            ParseError::JsonError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(source: io::Error) -> Self {
        ParseError::IoError {
            source,
            file_path: None,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(source: serde_json::Error) -> Self {
        ParseError::JsonError {
            source,
            file_path: None,
        }
    }
}
