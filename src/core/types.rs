//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`DocumentName`] - Validated store key for a document
//! - [`ErrorPolicy`] - What a repair pass does with a broken document
//!
//! # Validation
//!
//! Names are validated at construction time. A `DocumentName` is always safe
//! to hand to a store, so stores never have to re-check for path traversal
//! or empty keys.
//!
//! # Examples
//!
//! ```
//! use folio::core::types::DocumentName;
//!
//! let name = DocumentName::new("Rust Notes").unwrap();
//! assert_eq!(name.as_str(), "Rust Notes");
//!
//! assert!(DocumentName::new("").is_err());
//! assert!(DocumentName::new("../escape").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid document name: {0}")]
    InvalidDocumentName(String),
}

/// A validated document name.
///
/// Document names are the keys a [`DocumentStore`](crate::core::store::DocumentStore)
/// addresses documents by. They must satisfy:
/// - Cannot be empty
/// - Cannot be exactly `.` or `..`
/// - Cannot contain `/` or `\`
/// - Cannot contain ASCII control characters (including NUL)
///
/// Spaces, punctuation and non-ASCII characters are all allowed, since
/// document titles double as names in most collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentName(String);

impl DocumentName {
    /// Create a new validated document name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidDocumentName` if the name breaks any of the
    /// rules above.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidDocumentName(
                "document name cannot be empty".into(),
            ));
        }

        if name == "." || name == ".." {
            return Err(TypeError::InvalidDocumentName(format!(
                "document name cannot be '{name}'"
            )));
        }

        for c in ['/', '\\'] {
            if name.contains(c) {
                return Err(TypeError::InvalidDocumentName(format!(
                    "document name cannot contain '{c}'"
                )));
            }
        }

        if name.chars().any(|c| c.is_ascii_control()) {
            return Err(TypeError::InvalidDocumentName(
                "document name cannot contain control characters".into(),
            ));
        }

        Ok(())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DocumentName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for DocumentName {
    type Error = TypeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<DocumentName> for String {
    fn from(name: DocumentName) -> Self {
        name.0
    }
}

impl AsRef<str> for DocumentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for DocumentName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DocumentName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for DocumentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a repair pass does when a single document fails.
///
/// Spelled `"fail"` or `"skip"` in config files and on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Abort the pass on the first error.
    #[default]
    #[serde(rename = "fail")]
    FailFast,
    /// Record the document as skipped and continue.
    Skip,
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail" => Ok(ErrorPolicy::FailFast),
            "skip" => Ok(ErrorPolicy::Skip),
            other => Err(format!(
                "unknown error policy '{}', expected 'fail' or 'skip'",
                other
            )),
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::FailFast => write!(f, "fail"),
            ErrorPolicy::Skip => write!(f, "skip"),
        }
    }
}
