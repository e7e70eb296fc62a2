//! repair::placeholder
//!
//! Documents materialized for names that are referenced but absent.

use chrono::{Local, NaiveDate};

use crate::core::document::Document;
use crate::core::types::DocumentName;

/// Date format used for `Date` fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Builds placeholder documents stamped with a fixed date.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use folio::core::types::DocumentName;
/// use folio::repair::PlaceholderFactory;
///
/// let factory = PlaceholderFactory::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// let name = DocumentName::new("Trees").unwrap();
/// let doc = factory.placeholder(&name, vec!["Graphs".to_string()]);
///
/// assert_eq!(doc.title, "Trees");
/// assert_eq!(doc.publication_date, "2024-03-01");
/// assert_eq!(doc.body, "# Trees\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderFactory {
    date: String,
}

impl PlaceholderFactory {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: date.format(DATE_FORMAT).to_string(),
        }
    }

    /// A factory stamping the local calendar date.
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// The `Date` value given to placeholders.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// A fresh document titled after `name`, with no children.
    pub fn placeholder(&self, name: &DocumentName, parents: Vec<String>) -> Document {
        Document::new(name.as_str(), name.as_str())
            .with_date(self.date.clone())
            .with_parents(parents)
            .with_body(format!("# {name}\n"))
    }
}

impl Default for PlaceholderFactory {
    fn default() -> Self {
        Self::today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::parse;

    fn factory() -> PlaceholderFactory {
        PlaceholderFactory::new(NaiveDate::from_ymd_opt(2023, 11, 5).unwrap())
    }

    #[test]
    fn date_is_zero_padded() {
        assert_eq!(factory().date(), "2023-11-05");
    }

    #[test]
    fn placeholder_fields() {
        let name = DocumentName::new("Ownership").unwrap();
        let doc = factory().placeholder(&name, vec!["Rust".into()]);

        assert_eq!(doc.name, "Ownership");
        assert_eq!(doc.title, "Ownership");
        assert_eq!(doc.abstract_text, "");
        assert_eq!(doc.parents, vec!["Rust"]);
        assert!(doc.children.is_empty());
        assert_eq!(doc.body, "# Ownership\n");
    }

    #[test]
    fn placeholder_serializes_to_parsable_document() {
        let name = DocumentName::new("Traits").unwrap();
        let doc = factory().placeholder(&name, vec![]);
        let raw = crate::core::metadata::serialize(&doc);

        assert_eq!(parse(&raw).unwrap(), doc);
    }

    #[test]
    fn today_matches_format() {
        let date = PlaceholderFactory::today().date().to_string();
        assert!(NaiveDate::parse_from_str(&date, DATE_FORMAT).is_ok());
    }
}
