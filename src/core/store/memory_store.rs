//! core::store::memory_store
//!
//! In-memory document store for deterministic testing.
//!
//! # Design
//!
//! Documents live in a sorted map behind `Arc<Mutex<...>>`, so clones share
//! state. Every trait call is recorded, which lets tests assert on exactly
//! which writes a repair pass issued. Failures can be injected per
//! operation and document.
//!
//! # Example
//!
//! ```
//! use folio::core::store::{DocumentStore, FailOn, MemoryDocumentStore};
//! use folio::core::types::DocumentName;
//!
//! let store = MemoryDocumentStore::new().fail_on(FailOn::Write("locked".into()));
//! let locked = DocumentName::new("locked").unwrap();
//!
//! assert!(store.write(&locked, "x").is_err());
//! assert!(store.writes().is_empty());
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{DocumentStore, StoreError};
use crate::core::types::DocumentName;

/// Which operation should fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailOn {
    /// Fail reads of the named document.
    Read(String),
    /// Fail writes of the named document.
    Write(String),
    /// Fail every `list` call.
    List,
}

/// Recorded store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOperation {
    Exists { name: String },
    Read { name: String },
    Write { name: String, content: String },
    List,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    documents: BTreeMap<DocumentName, String>,
    fail_on: Vec<FailOn>,
    operations: Vec<StoreOperation>,
}

/// Document store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `(name, content)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if a name is not a valid [`DocumentName`].
    pub fn with_documents<I, N, C>(documents: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: Into<String>,
    {
        let store = Self::new();
        for (name, content) in documents {
            store.insert(name.as_ref(), content);
        }
        store
    }

    /// Add a failure rule. Rules accumulate.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.state().fail_on.push(fail_on);
        self
    }

    /// Remove all failure rules.
    pub fn clear_fail_on(&self) {
        self.state().fail_on.clear();
    }

    /// Insert a document without recording an operation.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid [`DocumentName`]; this is a test
    /// fixture helper.
    pub fn insert(&self, name: &str, content: impl Into<String>) {
        let name = match DocumentName::new(name) {
            Ok(name) => name,
            Err(e) => panic!("invalid fixture document name {name:?}: {e}"),
        };
        self.state().documents.insert(name, content.into());
    }

    /// Get a document's content without recording an operation.
    pub fn get(&self, name: &str) -> Option<String> {
        self.state()
            .documents
            .iter()
            .find(|(key, _)| key.as_str() == name)
            .map(|(_, content)| content.clone())
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.state().documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().documents.is_empty()
    }

    /// All recorded operations, in call order.
    pub fn operations(&self) -> Vec<StoreOperation> {
        self.state().operations.clone()
    }

    /// Names of every written document, in write order.
    pub fn writes(&self) -> Vec<String> {
        self.state()
            .operations
            .iter()
            .filter_map(|op| match op {
                StoreOperation::Write { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Clear recorded operations.
    pub fn clear_operations(&self) {
        self.state().operations.clear();
    }

    fn state(&self) -> MutexGuard<'_, MemoryStoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_fail(inner: &MemoryStoreInner, expected: &FailOn) -> Result<(), StoreError> {
        if inner.fail_on.contains(expected) {
            return Err(StoreError::Injected(format!("{expected:?}")));
        }
        Ok(())
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn exists(&self, name: &DocumentName) -> Result<bool, StoreError> {
        let mut inner = self.state();
        inner.operations.push(StoreOperation::Exists {
            name: name.to_string(),
        });
        Ok(inner.documents.contains_key(name))
    }

    fn read(&self, name: &DocumentName) -> Result<Option<String>, StoreError> {
        let mut inner = self.state();
        inner.operations.push(StoreOperation::Read {
            name: name.to_string(),
        });
        Self::check_fail(&inner, &FailOn::Read(name.to_string()))?;
        Ok(inner.documents.get(name).cloned())
    }

    fn write(&self, name: &DocumentName, content: &str) -> Result<(), StoreError> {
        let mut inner = self.state();
        Self::check_fail(&inner, &FailOn::Write(name.to_string()))?;
        inner.operations.push(StoreOperation::Write {
            name: name.to_string(),
            content: content.to_string(),
        });
        inner.documents.insert(name.clone(), content.to_string());
        Ok(())
    }

    fn list(&self) -> Result<Vec<DocumentName>, StoreError> {
        let mut inner = self.state();
        inner.operations.push(StoreOperation::List);
        Self::check_fail(&inner, &FailOn::List)?;
        Ok(inner.documents.keys().cloned().collect())
    }
}
