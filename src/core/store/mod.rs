//! core::store
//!
//! The name-addressed document store contract.
//!
//! # Architecture
//!
//! The codec and the repairer never touch paths or files. Everything they
//! need from the outside world goes through [`DocumentStore`], which is
//! passed to them explicitly:
//!
//! - [`FileDocumentStore`]: one file per document in a directory
//! - [`MemoryDocumentStore`]: in-memory, records operations, injects failures
//!
//! # Example
//!
//! ```
//! use folio::core::store::{DocumentStore, MemoryDocumentStore};
//! use folio::core::types::DocumentName;
//!
//! let store = MemoryDocumentStore::new();
//! let name = DocumentName::new("index").unwrap();
//!
//! assert!(!store.exists(&name).unwrap());
//! store.write(&name, "{}").unwrap();
//! assert_eq!(store.read(&name).unwrap().as_deref(), Some("{}"));
//! assert_eq!(store.list().unwrap(), vec![name]);
//! ```

mod file_store;
mod memory_store;

pub use file_store::{FileDocumentStore, DEFAULT_EXTENSION, DEFAULT_IGNORE};
pub use memory_store::{FailOn, MemoryDocumentStore, StoreOperation};

use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::{DocumentName, TypeError};

/// Errors from document storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading a document failed.
    #[error("failed to read document '{name}' at '{path}': {source}")]
    ReadError {
        name: String,
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing a document failed.
    #[error("failed to write document '{name}' at '{path}': {source}")]
    WriteError {
        name: String,
        path: PathBuf,
        source: std::io::Error,
    },

    /// Listing the collection failed.
    #[error("failed to list documents in '{path}': {source}")]
    ListError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A stored entry does not map to a valid document name.
    #[error("invalid document name: {0}")]
    InvalidName(#[from] TypeError),

    /// Failure configured on a [`MemoryDocumentStore`].
    #[error("injected store failure: {0}")]
    Injected(String),
}

/// Name-addressed access to a document collection.
///
/// Implementations return names from [`list`](Self::list) in sorted order so
/// that repair passes are deterministic.
pub trait DocumentStore {
    /// Check whether a document exists.
    fn exists(&self, name: &DocumentName) -> Result<bool, StoreError>;

    /// Read a document's raw text.
    ///
    /// Returns `Ok(None)` if the document does not exist.
    fn read(&self, name: &DocumentName) -> Result<Option<String>, StoreError>;

    /// Create or overwrite a document.
    fn write(&self, name: &DocumentName, content: &str) -> Result<(), StoreError>;

    /// List every document name in the collection.
    fn list(&self) -> Result<Vec<DocumentName>, StoreError>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn exists(&self, name: &DocumentName) -> Result<bool, StoreError> {
        (**self).exists(name)
    }

    fn read(&self, name: &DocumentName) -> Result<Option<String>, StoreError> {
        (**self).read(name)
    }

    fn write(&self, name: &DocumentName, content: &str) -> Result<(), StoreError> {
        (**self).write(name, content)
    }

    fn list(&self) -> Result<Vec<DocumentName>, StoreError> {
        (**self).list()
    }
}
