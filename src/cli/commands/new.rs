//! new command - Create a document and link it into its parents

use anyhow::{Context as _, Result};

use super::{document_name, Collection};
use crate::cli::Context;
use crate::repair::RepairError;
use crate::ui::output::{self, format_document};

/// Create `name` with the given parents.
pub fn new(ctx: &Context, name: &str, parents: &[String], no_open: bool) -> Result<()> {
    let name = document_name(name)?;
    let parents = parents
        .iter()
        .map(|p| document_name(p))
        .collect::<Result<Vec<_>>>()?;

    let collection = Collection::open(ctx)?;
    let repairer = collection.repairer(collection.policy(None));

    let report = match repairer.create_document(&name, &parents) {
        Err(RepairError::AlreadyExists(existing)) => {
            anyhow::bail!("Document {} already exists", format_document(&existing))
        }
        other => other.with_context(|| format!("Failed to create '{}'", name))?,
    };

    output::print(report.format(), ctx.verbosity());
    collection.open_in_editor(ctx, &report.created, no_open);

    Ok(())
}
