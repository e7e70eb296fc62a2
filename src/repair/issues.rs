//! repair::issues
//!
//! Problems a read-only scan can find in a collection.
//!
//! # Architecture
//!
//! [`LinkIssue`] is a closed set of findings. Each carries a stable ID
//! (`kind:subject`) so scripts can match on `folio check --list` output, and
//! a severity separating what `folio link` can fix from what needs a human.

use serde::Serialize;
use thiserror::Error;

use crate::core::graph::{DanglingLink, LinkDirection, MissingLink};

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// `folio link` cannot proceed past this document.
    Error,
    /// Repairable inconsistency.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARN"),
        }
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LinkIssue {
    /// A child lists no back-link to the parent that claims it.
    #[error("'{document}' is missing parent '{parent}'")]
    MissingParentLink {
        /// The child to update.
        document: String,
        /// The parent listing it.
        parent: String,
    },

    /// A parent lists no back-link to the child that claims it.
    #[error("'{document}' is missing child '{child}'")]
    MissingChildLink {
        /// The parent to update.
        document: String,
        /// The child listing it.
        child: String,
    },

    /// A referenced document does not exist.
    #[error("'{referrer}' lists missing {direction} '{name}'")]
    MissingDocument {
        name: String,
        referrer: String,
        direction: LinkDirection,
    },

    /// A document could not be read or parsed.
    #[error("'{name}' is unreadable: {error}")]
    UnreadableDocument { name: String, error: String },
}

impl LinkIssue {
    /// The issue for a one-sided edge.
    pub fn from_missing_link(link: MissingLink) -> Self {
        match link.direction {
            LinkDirection::Parent => LinkIssue::MissingParentLink {
                document: link.target,
                parent: link.name,
            },
            LinkDirection::Child => LinkIssue::MissingChildLink {
                document: link.target,
                child: link.name,
            },
        }
    }

    /// The issue for a reference to an absent document.
    pub fn from_dangling(link: DanglingLink) -> Self {
        LinkIssue::MissingDocument {
            name: link.name,
            referrer: link.referrer,
            direction: link.direction,
        }
    }

    /// Stable identifier for this issue.
    pub fn issue_id(&self) -> String {
        match self {
            LinkIssue::MissingParentLink { document, parent } => {
                format!("missing-parent:{}<-{}", document, parent)
            }
            LinkIssue::MissingChildLink { document, child } => {
                format!("missing-child:{}->{}", document, child)
            }
            LinkIssue::MissingDocument { name, referrer, .. } => {
                format!("missing-document:{}@{}", name, referrer)
            }
            LinkIssue::UnreadableDocument { name, .. } => format!("unreadable:{}", name),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            LinkIssue::UnreadableDocument { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Short suggestion for resolving the issue.
    pub fn hint(&self) -> &'static str {
        match self {
            LinkIssue::MissingParentLink { .. } | LinkIssue::MissingChildLink { .. } => {
                "run 'folio link'"
            }
            LinkIssue::MissingDocument { .. } => "run 'folio link' to create it",
            LinkIssue::UnreadableDocument { .. } => "fix the metadata block by hand",
        }
    }
}

/// Result of a read-only scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosisReport {
    /// Number of documents scanned.
    pub documents: usize,
    /// Findings, unreadable documents first.
    pub issues: Vec<LinkIssue>,
}

impl DiagnosisReport {
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count()
    }

    /// Format the diagnosis for display.
    pub fn format(&self) -> String {
        let mut lines = Vec::new();

        if self.is_healthy() {
            lines.push(format!(
                "Collection is consistent - {} document(s), no issues found.",
                self.documents
            ));
            return lines.join("\n");
        }

        let errors = self.error_count();
        lines.push(format!(
            "Found {} issue(s) in {} document(s): {} errors, {} warnings",
            self.issues.len(),
            self.documents,
            errors,
            self.issues.len() - errors
        ));
        lines.push(String::new());

        for issue in &self.issues {
            lines.push(format!("[{}] {} ({})", issue.severity(), issue, issue.issue_id()));
            lines.push(format!("  hint: {}", issue.hint()));
        }

        lines.join("\n")
    }

    /// One tab-separated line per issue: severity, ID, message.
    pub fn format_list(&self) -> String {
        self.issues
            .iter()
            .map(|issue| format!("{}\t{}\t{}", issue.severity(), issue.issue_id(), issue))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
