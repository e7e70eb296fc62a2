//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$FOLIO_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/folio/config.toml`
//! 3. `~/.folio/config.toml`
//!
//! # Collection Config
//!
//! Located at `<root>/.folio/config.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing to ensure they conform to
//! expected formats (e.g., `extension` must not contain a path separator).
//! An unknown `on_error` policy is rejected while parsing.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::ErrorPolicy;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// editor = "code -n"
/// open_editor_on_create = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Command used to open documents
    pub editor: Option<String>,

    /// Open newly created placeholders in the editor
    pub open_editor_on_create: Option<bool>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_editor(self.editor.as_deref())
    }
}

/// Collection configuration.
///
/// # Example
///
/// ```toml
/// source_dir = "notes"
/// extension = "md"
/// ignore = [".DS_Store", "~"]
/// on_error = "skip"
/// editor = "subl"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CollectionConfig {
    /// Directory holding the documents, relative to the collection root
    pub source_dir: Option<String>,

    /// Document file extension, without the dot (default: "md")
    pub extension: Option<String>,

    /// File name filters skipped when listing
    pub ignore: Option<Vec<String>>,

    /// What a repair pass does on a broken document ("fail" or "skip")
    pub on_error: Option<ErrorPolicy>,

    /// Editor override for this collection
    pub editor: Option<String>,
}

impl CollectionConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(source_dir) = &self.source_dir {
            if source_dir.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "source_dir cannot be empty".to_string(),
                ));
            }
        }

        if let Some(extension) = &self.extension {
            let trimmed = extension.trim_start_matches('.');
            if trimmed.is_empty() || trimmed.contains(['/', '\\']) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid extension '{}'",
                    extension
                )));
            }
        }

        if let Some(ignore) = &self.ignore {
            if ignore.iter().any(String::is_empty) {
                return Err(ConfigError::InvalidValue(
                    "ignore filters cannot be empty".to_string(),
                ));
            }
        }

        validate_editor(self.editor.as_deref())
    }
}

fn validate_editor(editor: Option<&str>) -> Result<(), ConfigError> {
    match editor {
        Some(command) if command.trim().is_empty() => Err(ConfigError::InvalidValue(
            "editor command cannot be empty".to_string(),
        )),
        _ => Ok(()),
    }
}
