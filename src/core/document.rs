//! core::document
//!
//! The parsed form of a collection document.
//!
//! # Mutation
//!
//! Link mutations consume the document and return a new value
//! ([`Document::with_parent`], [`Document::with_child`]). Two documents
//! loaded from the same store entry never share their link lists, and only
//! the repairer decides when a changed value is persisted.

use serde::Serialize;

/// Name carried by the sentinel document produced for empty sources.
pub const SENTINEL_NAME: &str = "None";

/// A named document: structured metadata plus a free-form body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Store key.
    pub name: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub publication_date: String,
    /// Parent names, in declaration order. May contain `""` placeholders.
    pub parents: Vec<String>,
    /// Child names, in declaration order.
    pub children: Vec<String>,
    #[serde(skip)]
    pub body: String,
}

impl Document {
    /// Create a document with empty links and body.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            abstract_text: String::new(),
            publication_date: String::new(),
            parents: Vec::new(),
            children: Vec::new(),
            body: String::new(),
        }
    }

    /// The sentinel returned when the source has no content at all.
    pub fn sentinel() -> Self {
        Self::new(SENTINEL_NAME, "")
    }

    /// Whether this is the empty-source sentinel.
    pub fn is_sentinel(&self) -> bool {
        self.name == SENTINEL_NAME
            && self.title.is_empty()
            && self.abstract_text.is_empty()
            && self.publication_date.is_empty()
            && self.parents.is_empty()
            && self.children.is_empty()
            && self.body.is_empty()
    }

    pub fn with_abstract(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = abstract_text.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.publication_date = date.into();
        self
    }

    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parents = parents.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn has_parent(&self, name: &str) -> bool {
        self.parents.iter().any(|p| p == name)
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.children.iter().any(|c| c == name)
    }

    /// Append `name` to the parents unless it is already listed.
    pub fn with_parent(mut self, name: &str) -> Self {
        if !self.has_parent(name) {
            self.parents.push(name.to_string());
        }
        self
    }

    /// Append `name` to the children unless it is already listed.
    pub fn with_child(mut self, name: &str) -> Self {
        if !self.has_child(name) {
            self.children.push(name.to_string());
        }
        self
    }

    /// Non-placeholder parent names.
    pub fn linked_parents(&self) -> impl Iterator<Item = &str> {
        self.parents.iter().map(String::as_str).filter(|p| !p.is_empty())
    }

    /// Non-placeholder child names.
    pub fn linked_children(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(String::as_str).filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_recognized() {
        let doc = Document::sentinel();
        assert_eq!(doc.name, "None");
        assert!(doc.is_sentinel());
        assert!(doc.parents.is_empty());
        assert!(doc.children.is_empty());
    }

    #[test]
    fn named_none_with_content_is_not_sentinel() {
        let doc = Document::new("None", "None").with_body("text");
        assert!(!doc.is_sentinel());
    }

    #[test]
    fn with_parent_appends_once() {
        let doc = Document::new("b", "b").with_parent("a").with_parent("a");
        assert_eq!(doc.parents, vec!["a"]);
    }

    #[test]
    fn with_child_preserves_order() {
        let doc = Document::new("a", "a")
            .with_children(["x", "y"])
            .with_child("z")
            .with_child("x");
        assert_eq!(doc.children, vec!["x", "y", "z"]);
    }

    #[test]
    fn mutation_does_not_alias_copies() {
        let original = Document::new("a", "a").with_parents(["p"]);
        let copy = original.clone();
        let updated = copy.with_parent("q");

        assert_eq!(original.parents, vec!["p"]);
        assert_eq!(updated.parents, vec!["p", "q"]);
    }

    #[test]
    fn linked_iterators_skip_placeholders() {
        let doc = Document::new("a", "a")
            .with_parents(["", "p"])
            .with_children(["", "", "c"]);
        assert_eq!(doc.linked_parents().collect::<Vec<_>>(), vec!["p"]);
        assert_eq!(doc.linked_children().collect::<Vec<_>>(), vec!["c"]);
    }
}
