//! check command - Report link problems without writing

use anyhow::{bail, Context as _, Result};

use super::Collection;
use crate::cli::Context;
use crate::ui::output;

/// Diagnose the collection. Fails when any issue is found.
pub fn check(ctx: &Context, list: bool) -> Result<()> {
    let collection = Collection::open(ctx)?;
    let diagnosis = collection
        .repairer(collection.policy(None))
        .diagnose()
        .context("Failed to scan collection")?;

    if list {
        if !diagnosis.is_healthy() {
            println!("{}", diagnosis.format_list());
        }
    } else {
        output::print(diagnosis.format(), ctx.verbosity());
    }

    if !diagnosis.is_healthy() {
        bail!("{} issue(s) found", diagnosis.issues.len());
    }

    Ok(())
}
