//! core::metadata::schema
//!
//! Metadata block record and the document codec.
//!
//! # Layout
//!
//! ```text
//! {
//! "Title": "<string>",
//! "Abstract": "<string>",
//! "Parents": ["<string>", ...],
//! "Children": ["<string>", ...],
//! "Date": "<YYYY-MM-DD>"
//! }
//! <body text...>
//! ```
//!
//! Key order is irrelevant on decode and fixed as shown on encode. Unknown
//! keys are tolerated on decode and dropped on encode.
//!
//! # Limitations
//!
//! Values are written verbatim. A value containing `"`, `\` or a control
//! character produces a block that will not decode again.
//!
//! # Example
//!
//! ```
//! use folio::core::document::Document;
//! use folio::core::metadata::{parse, serialize};
//!
//! let doc = Document::new("Graphs", "Graphs")
//!     .with_date("2024-03-01")
//!     .with_children(["Trees", "DAGs"])
//!     .with_body("# Graphs\n");
//!
//! let raw = serialize(&doc);
//! assert_eq!(parse(&raw).unwrap(), doc);
//! ```

use serde::Deserialize;
use thiserror::Error;

use super::split::split;
use crate::core::document::Document;

pub const FIELD_TITLE: &str = "Title";
pub const FIELD_ABSTRACT: &str = "Abstract";
pub const FIELD_PARENTS: &str = "Parents";
pub const FIELD_CHILDREN: &str = "Children";
pub const FIELD_DATE: &str = "Date";

/// Keys every metadata block must carry.
pub const REQUIRED_FIELDS: [&str; 5] = [
    FIELD_TITLE,
    FIELD_PARENTS,
    FIELD_CHILDREN,
    FIELD_DATE,
    FIELD_ABSTRACT,
];

/// Errors from decoding a raw document.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// No usable metadata block: none found, never closed, or not a valid record.
    #[error("malformed metadata: {0}")]
    MalformedMetadata(String),

    /// The record lacks one of the required keys.
    #[error("metadata is missing required field '{0}'")]
    MissingField(String),

    /// A `}` appeared before any `{` opened the metadata block.
    #[error("unbalanced delimiters: '}}' at offset {offset} before any '{{'")]
    UnbalancedDelimiters {
        /// Byte offset of the stray brace.
        offset: usize,
    },
}

/// The decoded metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetadataBlock {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Abstract")]
    pub abstract_text: String,
    #[serde(rename = "Parents")]
    pub parents: Vec<String>,
    #[serde(rename = "Children")]
    pub children: Vec<String>,
    #[serde(rename = "Date")]
    pub date: String,
}

impl MetadataBlock {
    /// Decode the metadata region (braces included).
    ///
    /// Required keys are checked before typed decoding so that a missing key
    /// is reported as [`CodecError::MissingField`] rather than a generic
    /// decode failure.
    pub fn decode(region: &str) -> Result<Self, CodecError> {
        let value: serde_json::Value = serde_json::from_str(region)
            .map_err(|e| CodecError::MalformedMetadata(e.to_string()))?;

        let object = value.as_object().ok_or_else(|| {
            CodecError::MalformedMetadata("metadata block is not an object".into())
        })?;

        if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !object.contains_key(**f)) {
            return Err(CodecError::MissingField((*missing).to_string()));
        }

        serde_json::from_value(value).map_err(|e| CodecError::MalformedMetadata(e.to_string()))
    }

    fn into_document(self, name: String, body: String) -> Document {
        Document {
            name,
            title: self.title,
            abstract_text: self.abstract_text,
            publication_date: self.date,
            parents: self.parents,
            children: self.children,
            body,
        }
    }
}

/// Parse a raw document, naming it after its `Title`.
///
/// The empty string yields [`Document::sentinel`].
///
/// # Errors
///
/// - [`CodecError::MalformedMetadata`] if there is no block, it never
///   closes, or it is not a valid record
/// - [`CodecError::MissingField`] if a required key is absent
/// - [`CodecError::UnbalancedDelimiters`] if a `}` precedes the block
pub fn parse(raw: &str) -> Result<Document, CodecError> {
    if raw.is_empty() {
        return Ok(Document::sentinel());
    }

    let (block, body) = decode_parts(raw)?;
    let name = block.title.clone();
    Ok(block.into_document(name, body))
}

/// Parse a raw document stored under `name`.
///
/// Like [`parse`], except the document keeps the store key as its name.
/// Empty content yields an empty document with that name rather than the
/// sentinel, so links appended to it are persisted under the right key.
pub fn parse_named(name: &str, raw: &str) -> Result<Document, CodecError> {
    if raw.is_empty() {
        return Ok(Document::new(name, ""));
    }

    let (block, body) = decode_parts(raw)?;
    Ok(block.into_document(name.to_string(), body))
}

fn decode_parts(raw: &str) -> Result<(MetadataBlock, String), CodecError> {
    let source = split(raw)?;
    let region = source.metadata.ok_or_else(|| {
        CodecError::MalformedMetadata("no metadata block found".into())
    })?;
    Ok((MetadataBlock::decode(region)?, source.body))
}

/// Serialize a document in canonical layout.
///
/// Never fails. See the module docs for values that will not re-parse.
pub fn serialize(doc: &Document) -> String {
    format!(
        "{{\n\
         \"{FIELD_TITLE}\": \"{}\",\n\
         \"{FIELD_ABSTRACT}\": \"{}\",\n\
         \"{FIELD_PARENTS}\": {},\n\
         \"{FIELD_CHILDREN}\": {},\n\
         \"{FIELD_DATE}\": \"{}\"\n\
         }}\n{}",
        doc.title,
        doc.abstract_text,
        render_list(&doc.parents),
        render_list(&doc.children),
        doc.publication_date,
        doc.body,
    )
}

fn render_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| format!("\"{item}\"")).collect();
    format!("[{}]", quoted.join(","))
}
