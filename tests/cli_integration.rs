//! Integration tests for the folio binary.
//!
//! These tests exercise the full CLI against real collection directories.
//! User-level configuration is isolated by pointing HOME and XDG_CONFIG_HOME
//! at the fixture, and editors are never launched.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Test Fixtures
// =============================================================================

struct TestCollection {
    dir: TempDir,
    home: TempDir,
}

impl TestCollection {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
            home: TempDir::new().expect("failed to create temp home"),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, name: &str, content: &str) {
        fs::write(self.path().join(format!("{name}.md")), content).unwrap();
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path().join(format!("{name}.md"))).unwrap()
    }

    fn exists(&self, name: &str) -> bool {
        self.path().join(format!("{name}.md")).is_file()
    }

    fn write_config(&self, content: &str) {
        let dir = self.path().join(".folio");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), content).unwrap();
    }

    /// A `folio` invocation rooted at this collection.
    fn folio(&self) -> Command {
        let mut cmd = Command::cargo_bin("folio").unwrap();
        cmd.arg("--cwd")
            .arg(self.path())
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path())
            .env_remove("FOLIO_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn doc(title: &str, parents: &[&str], children: &[&str]) -> String {
    let list = |items: &[&str]| {
        let quoted: Vec<String> = items.iter().map(|i| format!("\"{i}\"")).collect();
        format!("[{}]", quoted.join(", "))
    };
    format!(
        "{{\n\"Title\": \"{title}\",\n\"Abstract\": \"About {title}\",\n\"Parents\": {},\n\"Children\": {},\n\"Date\": \"2024-01-01\"\n}}\n# {title}\n",
        list(parents),
        list(children),
    )
}

// =============================================================================
// Basics
// =============================================================================

#[test]
fn version_flag_works() {
    Command::cargo_bin("folio")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("folio"));
}

#[test]
fn help_flag_works() {
    Command::cargo_bin("folio")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("linked plain-text document collection"));
}

#[test]
fn completion_generates_script() {
    Command::cargo_bin("folio")
        .unwrap()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("folio"));
}

// =============================================================================
// link
// =============================================================================

#[test]
fn link_creates_missing_documents() {
    let collection = TestCollection::new();
    collection.write("Graphs", &doc("Graphs", &[], &["Trees"]));

    collection
        .folio()
        .args(["link", "--no-open"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created Trees"));

    assert!(collection.exists("Trees"));
    assert!(collection.read("Trees").contains("\"Parents\": [\"Graphs\"]"));
}

#[test]
fn link_twice_reports_nothing_to_do() {
    let collection = TestCollection::new();
    collection.write("A", &doc("A", &[], &["B"]));

    collection.folio().args(["link", "--no-open"]).assert().success();

    collection
        .folio()
        .args(["link", "--no-open"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to do"));
}

#[test]
fn link_no_create_reports_dangling() {
    let collection = TestCollection::new();
    collection.write("Graphs", &doc("Graphs", &[], &["Trees"]));

    collection
        .folio()
        .args(["link", "--no-create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Graphs lists missing child 'Trees'"));

    assert!(!collection.exists("Trees"));
}

#[test]
fn link_quiet_prints_nothing() {
    let collection = TestCollection::new();
    collection.write("A", &doc("A", &[], &["B"]));

    collection
        .folio()
        .args(["link", "--no-open", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(collection.exists("B"));
}

#[test]
fn link_fails_on_malformed_document_by_default() {
    let collection = TestCollection::new();
    collection.write("A", &doc("A", &[], &["B"]));
    collection.write("Broken", "no metadata\n");

    collection
        .folio()
        .args(["link", "--no-open"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Broken"));
}

#[test]
fn link_on_error_skip_continues() {
    let collection = TestCollection::new();
    collection.write("A", &doc("A", &[], &["B"]));
    collection.write("Broken", "no metadata\n");

    collection
        .folio()
        .args(["link", "--no-open", "--on-error", "skip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped Broken"));

    assert!(collection.exists("B"));
}

#[test]
fn link_honors_collection_config() {
    let collection = TestCollection::new();
    collection.write_config("source_dir = \"notes\"\nextension = \"txt\"\n");
    let notes = collection.path().join("notes");
    fs::create_dir_all(&notes).unwrap();
    fs::write(notes.join("A.txt"), doc("A", &[], &["B"])).unwrap();

    collection.folio().args(["link", "--no-open"]).assert().success();

    assert!(notes.join("B.txt").is_file());
    assert!(!collection.exists("B"));
}

#[test]
fn configured_skip_policy_applies() {
    let collection = TestCollection::new();
    collection.write_config("on_error = \"skip\"\n");
    collection.write("A", &doc("A", &[], &["B"]));
    collection.write("Broken", "no metadata\n");

    collection
        .folio()
        .args(["link", "--no-open"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped Broken"));
}

#[test]
fn invalid_config_is_rejected() {
    let collection = TestCollection::new();
    collection.write_config("on_error = \"retry\"\n");

    collection
        .folio()
        .args(["link", "--no-open"])
        .assert()
        .failure();
}

// =============================================================================
// check
// =============================================================================

#[test]
fn check_passes_on_consistent_collection() {
    let collection = TestCollection::new();
    collection.write("A", &doc("A", &[], &["B"]));
    collection.write("B", &doc("B", &["A"], &[]));

    collection.folio().arg("check").assert().success();
}

#[test]
fn check_fails_on_one_sided_link() {
    let collection = TestCollection::new();
    collection.write("A", &doc("A", &[], &["B"]));
    collection.write("B", &doc("B", &[], &[]));
    let before = collection.read("B");

    collection
        .folio()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 issue(s) found"));

    assert_eq!(collection.read("B"), before);
}

#[test]
fn check_list_prints_issue_ids() {
    let collection = TestCollection::new();
    collection.write("A", &doc("A", &[], &["B", "Ghost"]));
    collection.write("B", &doc("B", &[], &[]));

    collection
        .folio()
        .args(["check", "--list"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("missing-parent:B<-A"))
        .stdout(predicate::str::contains("missing-document:Ghost@A"));
}

// =============================================================================
// new
// =============================================================================

#[test]
fn new_creates_document_and_links_parent() {
    let collection = TestCollection::new();
    collection.write("Graphs", &doc("Graphs", &[], &[]));

    collection
        .folio()
        .args(["new", "Trees", "--parent", "Graphs", "--no-open"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created Trees"));

    assert!(collection.read("Trees").starts_with("{\n\"Title\": \"Trees\""));
    assert!(collection.read("Graphs").contains("\"Children\": [\"Trees\"]"));
}

#[test]
fn new_refuses_existing_document() {
    let collection = TestCollection::new();
    collection.write("A", &doc("A", &[], &[]));

    collection
        .folio()
        .args(["new", "A", "--no-open"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn new_rejects_invalid_name() {
    let collection = TestCollection::new();

    collection
        .folio()
        .args(["new", "a/b", "--no-open"])
        .assert()
        .failure();
}

// =============================================================================
// show
// =============================================================================

#[test]
fn show_prints_metadata() {
    let collection = TestCollection::new();
    collection.write("Graphs", &doc("Graphs", &[""], &["Trees"]));

    collection
        .folio()
        .args(["show", "Graphs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Graphs"))
        .stdout(predicate::str::contains("Abstract: About Graphs"))
        .stdout(predicate::str::contains("Parents: (none)"))
        .stdout(predicate::str::contains("Trees"));
}

#[test]
fn show_json_is_machine_readable() {
    let collection = TestCollection::new();
    collection.write("Graphs", &doc("Graphs", &[], &["Trees"]));

    let output = collection
        .folio()
        .args(["show", "Graphs", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["title"], "Graphs");
    assert_eq!(value["abstract"], "About Graphs");
    assert_eq!(value["children"][0], "Trees");
}

#[test]
fn show_missing_document_fails() {
    let collection = TestCollection::new();

    collection
        .folio()
        .args(["show", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
