//! core::metadata
//!
//! The document codec: metadata block extraction and canonical writing.
//!
//! # Modules
//!
//! - [`split`] - Brace-depth splitter separating the block from the body
//! - [`schema`] - Metadata record decoding and canonical serialization
//!
//! # Architecture
//!
//! A raw document is a brace-delimited JSON record followed by free-form
//! text. Splitting is done by a dedicated scanner rather than by the JSON
//! parser, because the block is embedded in text the JSON parser knows
//! nothing about. Only the isolated region is handed to `serde_json`.

pub mod schema;
pub mod split;

pub use schema::{
    parse, parse_named, serialize, CodecError, MetadataBlock, FIELD_ABSTRACT, FIELD_CHILDREN,
    FIELD_DATE, FIELD_PARENTS, FIELD_TITLE, REQUIRED_FIELDS,
};
pub use split::{split, SplitSource};
