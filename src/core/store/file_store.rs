//! core::store::file_store
//!
//! Directory-backed document storage.
//!
//! # Layout
//!
//! - Each document is `<dir>/<name>.<extension>`
//! - Only regular files directly inside `<dir>` are listed
//! - File names containing an ignore filter are skipped
//! - All writes are atomic (write to temp file, then rename)
//!
//! # Example
//!
//! ```no_run
//! use folio::core::store::{DocumentStore, FileDocumentStore};
//! use folio::core::types::DocumentName;
//!
//! let store = FileDocumentStore::new("notes").with_extension("txt");
//! let name = DocumentName::new("index").unwrap();
//!
//! if let Some(raw) = store.read(&name).unwrap() {
//!     println!("{} bytes", raw.len());
//! }
//! ```

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use super::{DocumentStore, StoreError};
use crate::core::types::DocumentName;

/// Default document file extension.
pub const DEFAULT_EXTENSION: &str = "md";

/// File names skipped when listing by default.
pub const DEFAULT_IGNORE: &[&str] = &[".DS_Store"];

/// Document store backed by a directory of text files.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    dir: PathBuf,
    extension: String,
    ignore: Vec<String>,
}

impl FileDocumentStore {
    /// Create a store over `dir` with the default extension and filters.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            ignore: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Use a different file extension (without the leading dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Replace the ignore filters.
    pub fn with_ignore<I, S>(mut self, ignore: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore = ignore.into_iter().map(Into::into).collect();
        self
    }

    /// The directory holding the documents.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The document file extension.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Path of the file backing `name`.
    pub fn path_for(&self, name: &DocumentName) -> PathBuf {
        self.dir.join(format!("{}.{}", name, self.extension))
    }

    fn is_ignored(&self, file_name: &str) -> bool {
        self.ignore.iter().any(|filter| file_name.contains(filter.as_str()))
    }

    fn name_from_file(&self, file_name: &str) -> Option<String> {
        let suffix = format!(".{}", self.extension);
        file_name
            .strip_suffix(suffix.as_str())
            .filter(|stem| !stem.is_empty())
            .map(str::to_string)
    }
}

impl DocumentStore for FileDocumentStore {
    fn exists(&self, name: &DocumentName) -> Result<bool, StoreError> {
        Ok(self.path_for(name).is_file())
    }

    fn read(&self, name: &DocumentName) -> Result<Option<String>, StoreError> {
        let path = self.path_for(name);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadError {
                name: name.to_string(),
                path,
                source: e,
            }),
        }
    }

    fn write(&self, name: &DocumentName, content: &str) -> Result<(), StoreError> {
        let path = self.path_for(name);
        let write_error = |path: &Path, source: std::io::Error| StoreError::WriteError {
            name: name.to_string(),
            path: path.to_path_buf(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(|e| write_error(&self.dir, e))?;

        // Temp file lives in the same directory so the rename stays atomic.
        // Its extension differs, so listing never picks it up.
        let temp_path = self.dir.join(format!(".{}.{}.tmp", name, self.extension));
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| write_error(&temp_path, e))?;

            file.write_all(content.as_bytes())
                .map_err(|e| write_error(&temp_path, e))?;

            file.sync_all().map_err(|e| write_error(&temp_path, e))?;
        }

        fs::rename(&temp_path, &path).map_err(|e| write_error(&path, e))?;

        Ok(())
    }

    fn list(&self) -> Result<Vec<DocumentName>, StoreError> {
        let list_error = |source| StoreError::ListError {
            path: self.dir.clone(),
            source,
        };

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(list_error(e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(list_error)?;
            if !entry.file_type().map_err(list_error)?.is_file() {
                continue;
            }

            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                warn!(file = ?entry.path(), "skipping file with non-UTF-8 name");
                continue;
            };
            if self.is_ignored(file_name) {
                continue;
            }
            let Some(stem) = self.name_from_file(file_name) else {
                continue;
            };

            match DocumentName::new(stem) {
                Ok(name) => names.push(name),
                Err(e) => warn!(file = file_name, error = %e, "skipping unaddressable file"),
            }
        }

        names.sort();
        Ok(names)
    }
}
