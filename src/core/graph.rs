//! core::graph
//!
//! Link graph representation and consistency checks.
//!
//! # Architecture
//!
//! The link graph is computed from parsed documents:
//! - Nodes are existing documents
//! - A *declared* edge is one side of a relationship: `P` listing `C` as a
//!   child, or `C` listing `P` as a parent
//! - The graph is consistent when every declared edge between existing
//!   documents is declared from both sides
//!
//! Empty-string placeholders are dropped. References to names with no
//! document are dangling and excluded from the consistency check.
//!
//! # Invariants
//!
//! - Link lists keep first-appearance order and hold no duplicates
//! - [`LinkGraph::symmetric_closure`] only adds edges

use std::collections::BTreeMap;

use serde::Serialize;

use super::document::Document;

/// Which side of a relationship is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkDirection {
    /// The child does not list the parent.
    Parent,
    /// The parent does not list the child.
    Child,
}

impl std::fmt::Display for LinkDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkDirection::Parent => write!(f, "parent"),
            LinkDirection::Child => write!(f, "child"),
        }
    }
}

/// A declared edge whose reciprocal is absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MissingLink {
    /// Document that must be updated.
    pub target: String,
    /// Name to add to the target.
    pub name: String,
    /// Which list of the target is missing `name`.
    pub direction: LinkDirection,
}

/// A reference to a document that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DanglingLink {
    /// Document holding the reference.
    pub referrer: String,
    /// The absent name.
    pub name: String,
    /// Which list of the referrer holds it.
    pub direction: LinkDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Links {
    parents: Vec<String>,
    children: Vec<String>,
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|n| n == name) {
        list.push(name.to_string());
    }
}

/// The link graph derived from document metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkGraph {
    nodes: BTreeMap<String, Links>,
}

impl LinkGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from documents.
    ///
    /// # Example
    ///
    /// ```
    /// use folio::core::document::Document;
    /// use folio::core::graph::LinkGraph;
    ///
    /// let graph = LinkGraph::from_documents([
    ///     Document::new("a", "a").with_children(["b"]),
    ///     Document::new("b", "b"),
    /// ]);
    ///
    /// assert!(!graph.is_consistent());
    /// assert!(graph.symmetric_closure().is_consistent());
    /// ```
    pub fn from_documents<I>(documents: I) -> Self
    where
        I: IntoIterator,
        I::Item: std::borrow::Borrow<Document>,
    {
        let mut graph = Self::new();
        for doc in documents {
            graph.add_document(std::borrow::Borrow::borrow(&doc));
        }
        graph
    }

    /// Add (or replace) a document's node.
    pub fn add_document(&mut self, doc: &Document) {
        let mut links = Links::default();
        for parent in doc.linked_parents() {
            push_unique(&mut links.parents, parent);
        }
        for child in doc.linked_children() {
            push_unique(&mut links.children, child);
        }
        self.nodes.insert(doc.name.clone(), links);
    }

    /// Whether a document with this name is in the graph.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Document names, sorted.
    pub fn documents(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Declared parents of a document.
    pub fn parents(&self, name: &str) -> Option<&[String]> {
        self.nodes.get(name).map(|l| l.parents.as_slice())
    }

    /// Declared children of a document.
    pub fn children(&self, name: &str) -> Option<&[String]> {
        self.nodes.get(name).map(|l| l.children.as_slice())
    }

    /// Every declared edge lacking its reciprocal, between existing documents.
    ///
    /// Sorted by target, then name.
    pub fn missing_links(&self) -> Vec<MissingLink> {
        let mut missing = Vec::new();

        for (name, links) in &self.nodes {
            for child in &links.children {
                if let Some(child_links) = self.nodes.get(child) {
                    if !child_links.parents.contains(name) {
                        missing.push(MissingLink {
                            target: child.clone(),
                            name: name.clone(),
                            direction: LinkDirection::Parent,
                        });
                    }
                }
            }
            for parent in &links.parents {
                if let Some(parent_links) = self.nodes.get(parent) {
                    if !parent_links.children.contains(name) {
                        missing.push(MissingLink {
                            target: parent.clone(),
                            name: name.clone(),
                            direction: LinkDirection::Child,
                        });
                    }
                }
            }
        }

        missing.sort();
        missing
    }

    /// Every reference to a name with no document.
    pub fn dangling(&self) -> Vec<DanglingLink> {
        let mut dangling = Vec::new();

        for (name, links) in &self.nodes {
            let lists = [
                (&links.parents, LinkDirection::Parent),
                (&links.children, LinkDirection::Child),
            ];
            for (list, direction) in lists {
                for referenced in list.iter().filter(|n| !self.nodes.contains_key(*n)) {
                    dangling.push(DanglingLink {
                        referrer: name.clone(),
                        name: referenced.clone(),
                        direction,
                    });
                }
            }
        }

        dangling
    }

    /// Whether every edge between existing documents is reciprocated.
    pub fn is_consistent(&self) -> bool {
        self.missing_links().is_empty()
    }

    /// The graph with every missing reciprocal edge added.
    ///
    /// Additions are appended in sorted order of their source, which matches
    /// the order a repair pass over a sorted snapshot produces.
    pub fn symmetric_closure(&self) -> LinkGraph {
        let mut closed = self.clone();

        for link in self.missing_links_in_scan_order() {
            if let Some(links) = closed.nodes.get_mut(&link.target) {
                match link.direction {
                    LinkDirection::Parent => push_unique(&mut links.parents, &link.name),
                    LinkDirection::Child => push_unique(&mut links.children, &link.name),
                }
            }
        }

        closed
    }

    /// Missing links ordered the way a repair run finds them: all parent
    /// links by source then declaration order, then all child links.
    fn missing_links_in_scan_order(&self) -> Vec<MissingLink> {
        let mut parent_links = Vec::new();
        let mut child_links = Vec::new();

        for (name, links) in &self.nodes {
            for child in &links.children {
                if self.nodes.get(child).is_some_and(|c| !c.parents.contains(name)) {
                    parent_links.push(MissingLink {
                        target: child.clone(),
                        name: name.clone(),
                        direction: LinkDirection::Parent,
                    });
                }
            }
        }
        for (name, links) in &self.nodes {
            for parent in &links.parents {
                if self.nodes.get(parent).is_some_and(|p| !p.children.contains(name)) {
                    child_links.push(MissingLink {
                        target: parent.clone(),
                        name: name.clone(),
                        direction: LinkDirection::Child,
                    });
                }
            }
        }

        parent_links.extend(child_links);
        parent_links
    }
}
