// SPDX-License-Identifier: GPL-3.0-only

//! Persisted keyboard preferences.
//!
//! Preferences are stored as a flat JSON object using the same keys the
//! settings screen writes:
//!
//! ```json
//! { "keyboard_language": "ru", "keyboard_show_popup": false }
//! ```
//!
//! Missing keys take their defaults. An unrecognized language falls back to
//! the default language with a warning instead of failing the whole load.

use crate::app_settings;
use crate::layout::Language;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// User configuration that persists between keyboard sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language the keyboard starts in.
    #[serde(
        rename = "keyboard_language",
        deserialize_with = "deserialize_language_lenient"
    )]
    pub default_language: Language,
    /// Whether the host shows an enlarged preview of the pressed key.
    ///
    /// Passed through to the host; key interpretation does not use it.
    #[serde(rename = "keyboard_show_popup")]
    pub show_key_preview: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: app_settings::DEFAULT_LANGUAGE,
            show_key_preview: app_settings::DEFAULT_SHOW_KEY_PREVIEW,
        }
    }
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::JsonError` if the input is not a JSON object of
    /// the expected shape.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::from)
    }

    /// Loads the configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::from(e).with_file_path(path))?;

        let config = Self::from_json_str(&content).map_err(|e| e.with_file_path(path))?;
        tracing::debug!(
            "Loaded config from {}: language={}, show_key_preview={}",
            path.display(),
            config.default_language,
            config.show_key_preview
        );
        Ok(config)
    }

    /// Loads the configuration, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::IoError { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                tracing::warn!("{}; using defaults", err);
                Self::default()
            }
        }
    }

    /// Writes the configuration to a file as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| ConfigError::from(e).with_file_path(path))
    }
}

fn deserialize_language_lenient<'de, D>(deserializer: D) -> Result<Language, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = String::deserialize(deserializer)?;
    Ok(tag.parse().unwrap_or_else(|_| {
        tracing::warn!(
            "Unknown keyboard language '{}', falling back to '{}'",
            tag,
            app_settings::DEFAULT_LANGUAGE
        );
        app_settings::DEFAULT_LANGUAGE
    }))
}

// ============================================================================
// Error Types
// ============================================================================

/// Error loading or saving the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read or written
    IoError {
        source: io::Error,
        file_path: Option<String>,
    },
    /// Content is not valid configuration JSON
    JsonError {
        source: serde_json::Error,
        file_path: Option<String>,
    },
}

impl ConfigError {
    /// Attaches a file path to the error.
    pub fn with_file_path(self, path: &Path) -> Self {
        let file_path = Some(path.display().to_string());
        match self {
            ConfigError::IoError { source, .. } => ConfigError::IoError { source, file_path },
            ConfigError::JsonError { source, .. } => ConfigError::JsonError { source, file_path },
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError { source, file_path } => {
                write!(f, "Config I/O error")?;
                if let Some(path) = file_path {
                    write!(f, " in '{}'", path)?;
                }
                write!(f, ": {}", source)
            }
            ConfigError::JsonError { source, file_path } => {
                write!(f, "Invalid config")?;
                if let Some(path) = file_path {
                    write!(f, " in '{}'", path)?;
                }
                write!(f, " at line {}: {}", source.line(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::JsonError { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::IoError {
            source: err,
            file_path: None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::JsonError {
            source: err,
            file_path: None,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
