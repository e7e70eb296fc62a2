//! show command - Print a document's metadata

use anyhow::{anyhow, Context as _, Result};

use super::{document_name, Collection};
use crate::cli::Context;
use crate::ui::output::{format_document, format_list};

/// Print the metadata of `name`, as text or JSON.
pub fn show(ctx: &Context, name: &str, json: bool) -> Result<()> {
    let name = document_name(name)?;
    let collection = Collection::open(ctx)?;
    let repairer = collection.repairer(collection.policy(None));

    let doc = repairer
        .load(&name)
        .with_context(|| format!("Failed to load '{}'", name))?
        .ok_or_else(|| anyhow!("Document {} does not exist", format_document(name.as_str())))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&doc).context("Failed to encode document")?
        );
        return Ok(());
    }

    println!("Name: {}", doc.name);
    println!("Title: {}", doc.title);
    println!("Date: {}", doc.publication_date);
    if !doc.abstract_text.is_empty() {
        println!("Abstract: {}", doc.abstract_text);
    }

    let parents: Vec<&str> = doc.linked_parents().collect();
    let children: Vec<&str> = doc.linked_children().collect();
    if parents.is_empty() {
        println!("Parents: (none)");
    } else {
        println!("Parents:\n{}", format_list(&parents, "  "));
    }
    if children.is_empty() {
        println!("Children: (none)");
    } else {
        println!("Children:\n{}", format_list(&children, "  "));
    }

    Ok(())
}
