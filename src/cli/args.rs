//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Use that directory as the collection root
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::repair::ErrorPolicy;

/// Folio - keep a linked collection of plain-text documents consistent
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this directory as the collection root
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create missing documents and add missing back-links
    #[command(
        name = "link",
        long_about = "Create missing documents and add missing back-links.\n\n\
            Every document lists its parents and children in its metadata block. \
            When a document names a child or parent that does not exist, link creates \
            a placeholder for it. When a document lists a child that does not list it \
            back as a parent (or the other way round), link appends the missing entry.\n\n\
            Links are only ever added, never removed. Running link twice in a row \
            performs no writes the second time.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Repair the collection in the current directory
    folio link

    # Only add back-links, do not create placeholders
    folio link --no-create

    # Keep going past documents with broken metadata
    folio link --on-error skip"
    )]
    Link {
        /// Do not create placeholders for missing documents
        #[arg(long)]
        no_create: bool,

        /// Do not open created placeholders in the editor
        #[arg(long)]
        no_open: bool,

        /// Override the configured error policy (fail or skip)
        #[arg(long, value_name = "POLICY")]
        on_error: Option<ErrorPolicy>,
    },

    /// Report link problems without changing anything
    #[command(
        name = "check",
        long_about = "Report link problems without changing anything.\n\n\
            Scans every document and reports one-sided links, references to \
            documents that do not exist, and documents whose metadata cannot be \
            read. Exits with a non-zero status when any issue is found.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Human-readable report
    folio check

    # One tab-separated line per issue for scripting
    folio check --list"
    )]
    Check {
        /// List issues in machine-readable format
        #[arg(long)]
        list: bool,
    },

    /// Create a new document
    #[command(
        name = "new",
        after_help = "\
WORKFLOW EXAMPLES:
    # Create a root document
    folio new Graphs

    # Create a child and link it into its parent
    folio new Trees --parent Graphs"
    )]
    New {
        /// Name of the document to create
        name: String,

        /// Parent document (repeatable)
        #[arg(long = "parent", value_name = "NAME")]
        parents: Vec<String>,

        /// Do not open the new document in the editor
        #[arg(long)]
        no_open: bool,
    },

    /// Show a document's metadata
    Show {
        /// Name of the document
        name: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
