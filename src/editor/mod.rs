//! editor
//!
//! Opening documents for a human to edit.
//!
//! Opening is fire-and-forget: the editor process is started and never
//! waited on. Failures are reported to the caller, which treats them as
//! warnings.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

use crate::core::store::FileDocumentStore;
use crate::core::types::DocumentName;

/// Errors from launching an editor.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("editor command is empty")]
    EmptyCommand,

    #[error("failed to start '{program}' for '{path}': {source}")]
    Spawn {
        program: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to open '{path}' with the system opener: {source}")]
    SystemOpen {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Something that can show a document to the user.
pub trait Editor {
    fn open(&self, name: &DocumentName) -> Result<(), EditorError>;
}

/// Runs a configured command with the document path appended.
///
/// # Example
///
/// ```
/// use folio::core::store::FileDocumentStore;
/// use folio::editor::CommandEditor;
///
/// let editor = CommandEditor::parse("code -n", FileDocumentStore::new("notes")).unwrap();
/// assert_eq!(editor.program(), "code");
/// assert_eq!(editor.args(), ["-n"]);
/// ```
#[derive(Debug, Clone)]
pub struct CommandEditor {
    program: String,
    args: Vec<String>,
    store: FileDocumentStore,
}

impl CommandEditor {
    /// Split a command line on whitespace into program and arguments.
    pub fn parse(command: &str, store: FileDocumentStore) -> Result<Self, EditorError> {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words.next().ok_or(EditorError::EmptyCommand)?;
        Ok(Self {
            program,
            args: words.collect(),
            store,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Editor for CommandEditor {
    fn open(&self, name: &DocumentName) -> Result<(), EditorError> {
        let path = self.store.path_for(name);
        debug!(program = %self.program, path = %path.display(), "launching editor");

        Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|source| EditorError::Spawn {
                program: self.program.clone(),
                path,
                source,
            })
    }
}

/// Hands the document path to the platform opener.
#[derive(Debug, Clone)]
pub struct SystemEditor {
    store: FileDocumentStore,
}

impl SystemEditor {
    pub fn new(store: FileDocumentStore) -> Self {
        Self { store }
    }
}

impl Editor for SystemEditor {
    fn open(&self, name: &DocumentName) -> Result<(), EditorError> {
        let path = self.store.path_for(name);
        debug!(path = %path.display(), "opening with system opener");

        open::that_detached(&path).map_err(|source| EditorError::SystemOpen { path, source })
    }
}

/// The configured editor, or the system opener when none is set.
pub fn editor_for(
    command: Option<&str>,
    store: FileDocumentStore,
) -> Result<Box<dyn Editor>, EditorError> {
    match command {
        Some(command) => Ok(Box::new(CommandEditor::parse(command, store)?)),
        None => Ok(Box::new(SystemEditor::new(store))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn name(s: &str) -> DocumentName {
        DocumentName::new(s).unwrap()
    }

    #[test]
    fn parse_splits_arguments() {
        let editor = CommandEditor::parse("  subl  --wait ", FileDocumentStore::new(".")).unwrap();
        assert_eq!(editor.program(), "subl");
        assert_eq!(editor.args(), ["--wait"]);
    }

    #[test]
    fn empty_command_rejected() {
        let result = CommandEditor::parse("   ", FileDocumentStore::new("."));
        assert!(matches!(result, Err(EditorError::EmptyCommand)));
        assert!(editor_for(Some(""), FileDocumentStore::new(".")).is_err());
    }

    #[test]
    fn missing_program_reports_path() {
        let temp = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp.path());
        let editor = CommandEditor::parse("folio-test-no-such-editor", store).unwrap();

        let err = editor.open(&name("Trees")).unwrap_err();
        match err {
            EditorError::Spawn { program, path, .. } => {
                assert_eq!(program, "folio-test-no-such-editor");
                assert_eq!(path, temp.path().join("Trees.md"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn command_is_spawned() {
        let temp = TempDir::new().unwrap();
        let editor = CommandEditor::parse("true", FileDocumentStore::new(temp.path())).unwrap();
        assert!(editor.open(&name("Trees")).is_ok());
    }
}
