//! repair
//!
//! Link graph repair over a document store.
//!
//! # Architecture
//!
//! The [`Repairer`] drives every pass. It is handed a [`DocumentStore`]
//! explicitly and owns no other state besides its placeholder factory and
//! error policy:
//!
//! - [`Repairer::create_missing_nodes`] materializes referenced documents
//!   that do not exist
//! - [`Repairer::update_parents`] and [`Repairer::update_children`] append
//!   missing reciprocal links
//! - [`Repairer::diagnose`] reports the same problems without writing
//!
//! # Invariants
//!
//! - Each call scans one snapshot of the name set, taken when it starts
//! - Passes only add links, never remove them, so every pass is idempotent
//!   once the collection is consistent
//! - Every load is a fresh read; documents are persisted only when changed
//!
//! # Example
//!
//! ```
//! use folio::core::store::MemoryDocumentStore;
//! use folio::repair::Repairer;
//!
//! let store = MemoryDocumentStore::with_documents([(
//!     "Graphs",
//!     "{\"Title\": \"Graphs\", \"Abstract\": \"\", \"Parents\": [], \
//!       \"Children\": [\"Trees\"], \"Date\": \"2024-03-01\"}\n",
//! )]);
//!
//! let report = Repairer::new(&store).repair_all().unwrap();
//! assert_eq!(report.created, vec!["Trees"]);
//!
//! let again = Repairer::new(&store).repair_all().unwrap();
//! assert_eq!(again.writes, 0);
//! ```

mod issues;
mod placeholder;
mod report;

pub use crate::core::types::ErrorPolicy;
pub use issues::{DiagnosisReport, LinkIssue, Severity};
pub use placeholder::{PlaceholderFactory, DATE_FORMAT};
pub use report::{AppliedLink, RepairReport, SkippedDocument};

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::document::Document;
use crate::core::graph::{DanglingLink, LinkDirection, LinkGraph};
use crate::core::metadata::{parse_named, serialize, CodecError};
use crate::core::store::{DocumentStore, StoreError};
use crate::core::types::{DocumentName, TypeError};

/// Errors from repair passes.
#[derive(Debug, Error)]
pub enum RepairError {
    /// A document's content could not be decoded.
    #[error("failed to parse document '{name}': {source}")]
    Codec {
        name: String,
        #[source]
        source: CodecError,
    },

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A link list holds a name that cannot address a document.
    #[error("invalid document name: {0}")]
    InvalidName(#[from] TypeError),

    /// The document to create is already present.
    #[error("document '{0}' already exists")]
    AlreadyExists(String),
}

/// Runs repair passes against a store.
pub struct Repairer<'a> {
    store: &'a dyn DocumentStore,
    factory: PlaceholderFactory,
    policy: ErrorPolicy,
}

impl<'a> Repairer<'a> {
    /// A repairer stamping today's date that fails fast.
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            factory: PlaceholderFactory::today(),
            policy: ErrorPolicy::default(),
        }
    }

    pub fn with_factory(mut self, factory: PlaceholderFactory) -> Self {
        self.factory = factory;
        self
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Load a document by store key.
    ///
    /// Returns `Ok(None)` if it does not exist. Empty content loads as an
    /// empty document carrying `name`.
    pub fn load(&self, name: &DocumentName) -> Result<Option<Document>, RepairError> {
        let Some(raw) = self.store.read(name)? else {
            return Ok(None);
        };

        parse_named(name.as_str(), &raw)
            .map(Some)
            .map_err(|source| RepairError::Codec {
                name: name.to_string(),
                source,
            })
    }

    /// Materialize every referenced document that does not exist.
    ///
    /// Missing children get the referrer as their only parent. Missing
    /// parents start with no links; documents without parents are roots and
    /// are not scanned for parents.
    pub fn create_missing_nodes(&self) -> Result<RepairReport, RepairError> {
        let snapshot = self.snapshot()?;
        let mut report = RepairReport::new();

        debug!(documents = snapshot.len(), "scanning for missing documents");

        for name in &snapshot {
            let Some(doc) = self.load_snapshot_entry(name, &mut report)? else {
                continue;
            };

            for child in doc.linked_children() {
                self.materialize(name, child, vec![name.to_string()], &mut report)?;
            }

            if doc.parents.is_empty() {
                continue;
            }
            for parent in doc.linked_parents() {
                self.materialize(name, parent, Vec::new(), &mut report)?;
            }
        }

        Ok(report)
    }

    /// Add each document to the parents of every child it lists.
    pub fn update_parents(&self) -> Result<RepairReport, RepairError> {
        let snapshot = self.snapshot()?;
        let mut report = RepairReport::new();
        self.link_pass(&snapshot, LinkDirection::Parent, &mut report)?;
        Ok(report)
    }

    /// Add each document to the children of every parent it lists.
    pub fn update_children(&self) -> Result<RepairReport, RepairError> {
        let snapshot = self.snapshot()?;
        let mut report = RepairReport::new();
        self.link_pass(&snapshot, LinkDirection::Child, &mut report)?;
        Ok(report)
    }

    /// [`update_parents`](Self::update_parents) then
    /// [`update_children`](Self::update_children) over one snapshot.
    pub fn update_missing_links(&self) -> Result<RepairReport, RepairError> {
        let snapshot = self.snapshot()?;
        let mut report = RepairReport::new();
        self.link_pass(&snapshot, LinkDirection::Parent, &mut report)?;
        self.link_pass(&snapshot, LinkDirection::Child, &mut report)?;
        Ok(report)
    }

    /// [`create_missing_nodes`](Self::create_missing_nodes) then
    /// [`update_missing_links`](Self::update_missing_links).
    pub fn repair_all(&self) -> Result<RepairReport, RepairError> {
        let mut report = self.create_missing_nodes()?;
        report.merge(self.update_missing_links()?);
        Ok(report)
    }

    /// Create one document, then link it into the parents it names.
    ///
    /// # Errors
    ///
    /// [`RepairError::AlreadyExists`] if `name` is taken.
    pub fn create_document(
        &self,
        name: &DocumentName,
        parents: &[DocumentName],
    ) -> Result<RepairReport, RepairError> {
        if self.store.exists(name)? {
            return Err(RepairError::AlreadyExists(name.to_string()));
        }

        let mut report = RepairReport::new();
        let parents = parents.iter().map(ToString::to_string).collect();
        self.write_placeholder(name, parents, &mut report)?;
        self.link_pass(std::slice::from_ref(name), LinkDirection::Child, &mut report)?;
        Ok(report)
    }

    /// Scan the collection without writing.
    ///
    /// Unreadable documents are reported as issues rather than failing the
    /// scan, regardless of the error policy.
    pub fn diagnose(&self) -> Result<DiagnosisReport, RepairError> {
        let snapshot = self.snapshot()?;
        let mut issues = Vec::new();
        let mut unreadable = BTreeSet::new();
        let mut documents = Vec::with_capacity(snapshot.len());

        for name in &snapshot {
            match self.load(name) {
                Ok(Some(doc)) => documents.push(doc),
                Ok(None) => debug!(document = %name, "vanished during scan"),
                Err(e) => {
                    unreadable.insert(name.to_string());
                    issues.push(LinkIssue::UnreadableDocument {
                        name: name.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        let graph = LinkGraph::from_documents(&documents);
        issues.extend(
            graph
                .dangling()
                .into_iter()
                .filter(|link| !unreadable.contains(&link.name))
                .map(LinkIssue::from_dangling),
        );
        issues.extend(
            graph
                .missing_links()
                .into_iter()
                .map(LinkIssue::from_missing_link),
        );

        Ok(DiagnosisReport {
            documents: snapshot.len(),
            issues,
        })
    }

    // =========================================================================
    // Pass internals
    // =========================================================================

    fn snapshot(&self) -> Result<Vec<DocumentName>, RepairError> {
        Ok(self.store.list()?)
    }

    /// For every document in `snapshot`, add it to the `direction` list of
    /// each document on the opposite side.
    fn link_pass(
        &self,
        snapshot: &[DocumentName],
        direction: LinkDirection,
        report: &mut RepairReport,
    ) -> Result<(), RepairError> {
        match direction {
            LinkDirection::Parent => debug!("updating missing parents"),
            LinkDirection::Child => debug!("updating missing children"),
        }

        for name in snapshot {
            let Some(doc) = self.load_snapshot_entry(name, report)? else {
                continue;
            };

            let referenced: Vec<&str> = match direction {
                LinkDirection::Parent => doc.linked_children().collect(),
                LinkDirection::Child => doc.linked_parents().collect(),
            };

            for target in referenced {
                self.link(name, target, direction, report)?;
            }
        }

        Ok(())
    }

    /// Ensure `target` lists `source` in its `direction` list.
    fn link(
        &self,
        source: &DocumentName,
        target: &str,
        direction: LinkDirection,
        report: &mut RepairReport,
    ) -> Result<(), RepairError> {
        let parsed = DocumentName::new(target).map_err(Into::into);
        let Some(target_name) = self.tolerate(source.as_str(), parsed, report)? else {
            return Ok(());
        };
        let Some(loaded) = self.tolerate(target, self.load(&target_name), report)? else {
            return Ok(());
        };
        let Some(target_doc) = loaded else {
            warn!(document = %source, missing = target, "dangling reference");
            report.dangling.push(DanglingLink {
                referrer: source.to_string(),
                name: target.to_string(),
                direction: opposite(direction),
            });
            return Ok(());
        };

        let updated = match direction {
            LinkDirection::Parent if !target_doc.has_parent(source.as_str()) => {
                target_doc.with_parent(source.as_str())
            }
            LinkDirection::Child if !target_doc.has_child(source.as_str()) => {
                target_doc.with_child(source.as_str())
            }
            _ => return Ok(()),
        };

        let persisted = self.store.write(&target_name, &serialize(&updated));
        if self.tolerate(target, persisted.map_err(Into::into), report)?.is_none() {
            return Ok(());
        }

        info!(document = target, %direction, added = %source, "added missing link");
        report.writes += 1;
        report.applied.push(AppliedLink {
            target: target.to_string(),
            name: source.to_string(),
            direction,
        });
        Ok(())
    }

    /// Create `name` with `parents` unless it already exists.
    fn materialize(
        &self,
        referrer: &DocumentName,
        name: &str,
        parents: Vec<String>,
        report: &mut RepairReport,
    ) -> Result<(), RepairError> {
        let parsed = DocumentName::new(name).map_err(Into::into);
        let Some(name) = self.tolerate(referrer.as_str(), parsed, report)? else {
            return Ok(());
        };
        let exists = self.store.exists(&name).map_err(Into::into);
        match self.tolerate(name.as_str(), exists, report)? {
            Some(false) => self.write_placeholder(&name, parents, report),
            _ => Ok(()),
        }
    }

    fn write_placeholder(
        &self,
        name: &DocumentName,
        parents: Vec<String>,
        report: &mut RepairReport,
    ) -> Result<(), RepairError> {
        let doc = self.factory.placeholder(name, parents);
        let written = self.store.write(name, &serialize(&doc)).map_err(Into::into);
        if self.tolerate(name.as_str(), written, report)?.is_none() {
            return Ok(());
        }

        info!(document = %name, parents = ?doc.parents, "created placeholder");
        report.writes += 1;
        report.created.push(name.to_string());
        Ok(())
    }

    /// Load a document named by the snapshot, applying the error policy.
    fn load_snapshot_entry(
        &self,
        name: &DocumentName,
        report: &mut RepairReport,
    ) -> Result<Option<Document>, RepairError> {
        let loaded = self.tolerate(name.as_str(), self.load(name), report)?;
        if let Some(None) = loaded {
            debug!(document = %name, "vanished during scan");
        }
        Ok(loaded.flatten())
    }

    /// Apply the error policy to one document's result.
    ///
    /// Returns `Ok(None)` when the error was recorded and skipped.
    fn tolerate<T>(
        &self,
        name: &str,
        result: Result<T, RepairError>,
        report: &mut RepairReport,
    ) -> Result<Option<T>, RepairError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if self.policy == ErrorPolicy::Skip => {
                if report.skip(name, e.to_string()) {
                    warn!(document = name, error = %e, "skipping document");
                }
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn opposite(direction: LinkDirection) -> LinkDirection {
    match direction {
        LinkDirection::Parent => LinkDirection::Child,
        LinkDirection::Child => LinkDirection::Parent,
    }
}
