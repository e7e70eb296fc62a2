//! repair::report
//!
//! What a repair pass did.

use serde::Serialize;

use crate::core::graph::{DanglingLink, LinkDirection};

/// A reciprocal link written by a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedLink {
    /// The document that was updated.
    pub target: String,
    /// The name appended to it.
    pub name: String,
    /// The list `name` was appended to.
    pub direction: LinkDirection,
}

/// A document a pass could not process under the skip policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDocument {
    pub name: String,
    pub error: String,
}

/// Outcome of one or more repair passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepairReport {
    /// Placeholders materialized, in creation order.
    pub created: Vec<String>,
    /// Links appended, in write order.
    pub applied: Vec<AppliedLink>,
    /// References to absent documents that were left alone.
    pub dangling: Vec<DanglingLink>,
    /// Documents skipped because of an error, one entry per name.
    pub skipped: Vec<SkippedDocument>,
    /// Number of store writes issued.
    pub writes: usize,
}

impl RepairReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the passes changed nothing and found nothing wrong.
    pub fn is_clean(&self) -> bool {
        self.writes == 0 && self.dangling.is_empty() && self.skipped.is_empty()
    }

    /// Append another report's entries to this one.
    pub fn merge(&mut self, other: RepairReport) {
        self.created.extend(other.created);
        self.applied.extend(other.applied);
        self.dangling.extend(other.dangling);
        for skipped in other.skipped {
            self.skip(skipped.name, skipped.error);
        }
        self.writes += other.writes;
    }

    /// Record a skipped document. Returns `false` if `name` was already
    /// recorded, keeping the first error.
    pub fn skip(&mut self, name: impl Into<String>, error: impl Into<String>) -> bool {
        let name = name.into();
        if self.skipped.iter().any(|s| s.name == name) {
            return false;
        }
        self.skipped.push(SkippedDocument {
            name,
            error: error.into(),
        });
        true
    }

    /// Format the report for display.
    pub fn format(&self) -> String {
        let mut lines = Vec::new();

        if self.is_clean() {
            lines.push("All links are consistent - nothing to do.".to_string());
            return lines.join("\n");
        }

        for name in &self.created {
            lines.push(format!("Created {}", name));
        }
        for link in &self.applied {
            lines.push(format!(
                "Updated {} with missing {}: {}",
                link.target, link.direction, link.name
            ));
        }
        for link in &self.dangling {
            lines.push(format!(
                "[WARN] {} lists missing {} '{}'",
                link.referrer, link.direction, link.name
            ));
        }
        for skipped in &self.skipped {
            lines.push(format!("[WARN] Skipped {}: {}", skipped.name, skipped.error));
        }

        lines.push(String::new());
        lines.push(format!(
            "{} created, {} link(s) added, {} write(s)",
            self.created.len(),
            self.applied.len(),
            self.writes
        ));

        lines.join("\n")
    }
}
