//! link command - Create missing documents and add missing back-links

use anyhow::{Context as _, Result};

use super::Collection;
use crate::cli::Context;
use crate::repair::ErrorPolicy;
use crate::ui::output;

/// Repair the collection.
///
/// With `no_create`, only reciprocal links are added; absent documents are
/// reported instead of created.
pub fn link(
    ctx: &Context,
    no_create: bool,
    no_open: bool,
    on_error: Option<ErrorPolicy>,
) -> Result<()> {
    let collection = Collection::open(ctx)?;
    let repairer = collection.repairer(collection.policy(on_error));

    let report = if no_create {
        repairer.update_missing_links()
    } else {
        repairer.repair_all()
    }
    .context("Repair pass failed")?;

    output::print(report.format(), ctx.verbosity());
    collection.open_in_editor(ctx, &report.created, no_open);

    Ok(())
}
