//! core
//!
//! Core domain types, schemas, and storage for Folio.
//!
//! # Modules
//!
//! - [`types`] - Strong types: DocumentName
//! - [`document`] - The parsed document model
//! - [`metadata`] - Metadata block splitting, decoding and serialization
//! - [`graph`] - Link graph representation and consistency checks
//! - [`store`] - Document store contract and implementations
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing keeps invalid names out of the store
//! - The codec is pure; only [`store`] touches the filesystem
//! - All scans are deterministic over a sorted name snapshot

pub mod config;
pub mod document;
pub mod graph;
pub mod metadata;
pub mod store;
pub mod types;
