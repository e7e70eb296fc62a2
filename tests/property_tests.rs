//! Property-based tests for the codec and repair passes.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated documents and link graphs.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use proptest::prelude::*;

use folio::core::document::Document;
use folio::core::graph::LinkGraph;
use folio::core::metadata::{parse, parse_named, serialize};
use folio::core::store::{DocumentStore, MemoryDocumentStore};
use folio::repair::{PlaceholderFactory, Repairer};

/// Strategy for metadata values the codec writes verbatim without escaping.
fn safe_value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,:;!?'()-]{0,24}"
}

/// Strategy for document names.
fn document_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 _-]{0,15}"
}

/// Strategy for bodies. Anything goes, including braces and blank lines.
fn body() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "\\PC{0,80}", "[{}\"\n\r a-z]{0,40}"]
}

fn document() -> impl Strategy<Value = Document> {
    (
        document_name(),
        safe_value(),
        "[0-9]{4}-[0-9]{2}-[0-9]{2}",
        prop::collection::vec(prop_oneof![Just(String::new()), document_name()], 0..4),
        prop::collection::vec(document_name(), 0..4),
        body(),
    )
        .prop_map(|(title, abstract_text, date, parents, children, body)| {
            Document::new(title.clone(), title)
                .with_abstract(abstract_text)
                .with_date(date)
                .with_parents(parents)
                .with_children(children)
                .with_body(body)
        })
}

/// Name of collection member `i`. Indices at or above `EXISTING` never get a
/// document, so references to them dangle.
fn member(i: usize) -> String {
    format!("N{i}")
}

const EXISTING: usize = 6;
const POOL: usize = 8;

/// Strategy for a collection: index -> (parent indices, child indices).
fn collection() -> impl Strategy<Value = BTreeMap<usize, (Vec<usize>, Vec<usize>)>> {
    prop::collection::btree_map(
        0..EXISTING,
        (
            prop::collection::vec(0..POOL, 0..4),
            prop::collection::vec(0..POOL, 0..4),
        ),
        1..=EXISTING,
    )
}

fn build_documents(layout: &BTreeMap<usize, (Vec<usize>, Vec<usize>)>) -> Vec<Document> {
    layout
        .iter()
        .map(|(i, (parents, children))| {
            let name = member(*i);
            Document::new(name.clone(), name)
                .with_date("2024-01-01")
                .with_parents(parents.iter().map(|p| member(*p)))
                .with_children(children.iter().map(|c| member(*c)))
        })
        .collect()
}

fn fill_store(docs: &[Document]) -> MemoryDocumentStore {
    MemoryDocumentStore::with_documents(docs.iter().map(|d| (d.name.clone(), serialize(d))))
}

fn store_graph(store: &MemoryDocumentStore) -> LinkGraph {
    let docs: Vec<Document> = store
        .list()
        .unwrap()
        .into_iter()
        .map(|name| {
            let raw = store.read(&name).unwrap().unwrap();
            parse_named(name.as_str(), &raw).unwrap()
        })
        .collect();
    LinkGraph::from_documents(docs)
}

/// The graph's edges with list order ignored.
fn edge_sets(graph: &LinkGraph) -> BTreeMap<String, (BTreeSet<String>, BTreeSet<String>)> {
    graph
        .documents()
        .map(|name| {
            let parents = graph.parents(name).unwrap_or_default();
            let children = graph.children(name).unwrap_or_default();
            (
                name.to_string(),
                (
                    parents.iter().cloned().collect(),
                    children.iter().cloned().collect(),
                ),
            )
        })
        .collect()
}

fn factory() -> PlaceholderFactory {
    PlaceholderFactory::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
}

proptest! {
    /// Serialized documents parse back to the same document.
    #[test]
    fn serialize_then_parse_is_identity(doc in document()) {
        let raw = serialize(&doc);
        prop_assert_eq!(parse(&raw).unwrap(), doc);
    }

    /// The body after the block is returned byte-for-byte.
    #[test]
    fn body_is_preserved(doc in document(), tail in body()) {
        let doc = doc.with_body(tail.clone());
        let parsed = parse_named("stored", &serialize(&doc)).unwrap();
        prop_assert_eq!(parsed.body, tail);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Linking existing documents yields exactly the symmetric closure.
    #[test]
    fn update_missing_links_yields_closure(layout in collection()) {
        let docs = build_documents(&layout);
        let store = fill_store(&docs);
        let expected = LinkGraph::from_documents(&docs).symmetric_closure();

        Repairer::new(&store).update_missing_links().unwrap();

        prop_assert_eq!(store_graph(&store), expected);
    }

    /// Running the child pass before the parent pass converges to the same edges.
    #[test]
    fn pass_order_does_not_matter(layout in collection()) {
        let docs = build_documents(&layout);

        let parents_first = fill_store(&docs);
        let repairer = Repairer::new(&parents_first);
        repairer.update_parents().unwrap();
        repairer.update_children().unwrap();

        let children_first = fill_store(&docs);
        let repairer = Repairer::new(&children_first);
        repairer.update_children().unwrap();
        repairer.update_parents().unwrap();

        let expected = edge_sets(&store_graph(&parents_first));
        prop_assert_eq!(edge_sets(&store_graph(&children_first)), expected);
        prop_assert!(store_graph(&children_first).is_consistent());
    }

    /// A second link pass performs no writes.
    #[test]
    fn update_missing_links_is_idempotent(layout in collection()) {
        let store = fill_store(&build_documents(&layout));
        Repairer::new(&store).update_missing_links().unwrap();
        store.clear_operations();

        let report = Repairer::new(&store).update_missing_links().unwrap();

        prop_assert_eq!(report.writes, 0);
        prop_assert!(store.writes().is_empty());
    }

    /// A full repair leaves a healthy collection, and repeating it is a no-op.
    #[test]
    fn repair_all_converges(layout in collection()) {
        let store = fill_store(&build_documents(&layout));
        let repairer = Repairer::new(&store).with_factory(factory());

        repairer.repair_all().unwrap();
        let diagnosis = repairer.diagnose().unwrap();
        prop_assert!(diagnosis.is_healthy(), "{}", diagnosis.format());

        store.clear_operations();
        let report = repairer.repair_all().unwrap();
        prop_assert!(report.created.is_empty());
        prop_assert!(store.writes().is_empty());
    }

    /// Links already present before a repair are still present after it.
    #[test]
    fn repair_only_adds_links(layout in collection()) {
        let docs = build_documents(&layout);
        let store = fill_store(&docs);

        Repairer::new(&store).with_factory(factory()).repair_all().unwrap();

        let after = store_graph(&store);
        for doc in &docs {
            let parents = after.parents(&doc.name).unwrap();
            let children = after.children(&doc.name).unwrap();
            for p in doc.linked_parents() {
                prop_assert!(parents.iter().any(|n| n == p));
            }
            for c in doc.linked_children() {
                prop_assert!(children.iter().any(|n| n == c));
            }
        }
    }
}
