//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens the collection (config plus document store)
//! 2. Calls the repairer to do the work
//! 3. Formats and displays output
//!
//! Handlers do NOT write documents directly.

mod check;
mod completion;
mod link;
mod new;
mod show;

pub use check::check;
pub use completion::completion;
pub use link::link;
pub use new::new;
pub use show::show;

use anyhow::{anyhow, Result};

use crate::cli::args::Command;
use crate::cli::Context;
use crate::core::config::Config;
use crate::core::store::FileDocumentStore;
use crate::core::types::DocumentName;
use crate::editor::editor_for;
use crate::repair::{ErrorPolicy, PlaceholderFactory, Repairer};
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Link {
            no_create,
            no_open,
            on_error,
        } => link::link(ctx, no_create, no_open, on_error),
        Command::Check { list } => check::check(ctx, list),
        Command::New {
            name,
            parents,
            no_open,
        } => new::new(ctx, &name, &parents, no_open),
        Command::Show { name, json } => show::show(ctx, &name, json),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// A collection opened from a root directory.
pub(crate) struct Collection {
    pub config: Config,
    pub store: FileDocumentStore,
}

impl Collection {
    /// Load config for the context's root and build its store.
    pub fn open(ctx: &Context) -> Result<Self> {
        let root = ctx.root()?;
        let loaded = Config::load(Some(&root))?;
        for warning in &loaded.warnings {
            output::warn(
                format!("{} ({})", warning.message, warning.path.display()),
                ctx.verbosity(),
            );
        }

        let config = loaded.config;
        let store = FileDocumentStore::new(config.source_dir(&root))
            .with_extension(config.extension())
            .with_ignore(config.ignore());

        tracing::debug!(
            root = %root.display(),
            dir = %store.dir().display(),
            extension = store.extension(),
            "opened collection"
        );

        Ok(Self { config, store })
    }

    /// The configured error policy, unless `overridden`.
    pub fn policy(&self, overridden: Option<ErrorPolicy>) -> ErrorPolicy {
        overridden.unwrap_or_else(|| self.config.on_error())
    }

    pub fn repairer(&self, policy: ErrorPolicy) -> Repairer<'_> {
        Repairer::new(&self.store)
            .with_factory(PlaceholderFactory::today())
            .with_policy(policy)
    }

    /// Open `names` in the editor unless disabled. Failures only warn.
    pub fn open_in_editor(&self, ctx: &Context, names: &[String], no_open: bool) {
        if no_open || names.is_empty() || !self.config.open_editor_on_create() {
            return;
        }

        let editor = match editor_for(self.config.editor(), self.store.clone()) {
            Ok(editor) => editor,
            Err(e) => {
                output::warn(e, ctx.verbosity());
                return;
            }
        };

        output::print("Opening new documents...", ctx.verbosity());
        for name in names {
            let Ok(name) = DocumentName::new(name.as_str()) else {
                continue;
            };
            if let Err(e) = editor.open(&name) {
                output::warn(e, ctx.verbosity());
            }
        }
    }
}

/// Parse a user-supplied document name.
pub(crate) fn document_name(name: &str) -> Result<DocumentName> {
    DocumentName::new(name).map_err(|e| anyhow!("Invalid document name '{}': {}", name, e))
}
