//! Folio - keep a linked collection of plain-text documents consistent
//!
//! Every document in a collection starts with a small metadata block naming
//! its title, abstract, date, parents and children. Folio parses those
//! blocks, creates documents that are referenced but missing, and adds the
//! back-links that make every parent/child relationship two-sided.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to repair)
//! - [`repair`] - Snapshot-based repair passes and read-only diagnosis
//! - [`core`] - Domain types, the document codec, the link graph, storage
//!   and configuration
//! - [`editor`] - Opening documents for a human
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! Folio maintains the following invariants:
//!
//! 1. Repair passes only add links, never remove them
//! 2. A second run over a consistent collection performs no writes
//! 3. Document bodies are preserved byte-for-byte across rewrites
//! 4. Document files are replaced atomically

pub mod cli;
pub mod core;
pub mod editor;
pub mod repair;
pub mod ui;
