use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn inspect_prints_tree() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-equal"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/catalog_compact.xml"))
        .arg("--depth")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("catalog version=\"2\""))
        .stdout(predicate::str::contains("    author"))
        .stdout(predicate::str::contains("#text").not());
}

#[test]
fn inspect_shows_whitespace_nodes() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-equal"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/catalog_pretty.xml"))
        .arg("--depth")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("#whitespace"));
}
