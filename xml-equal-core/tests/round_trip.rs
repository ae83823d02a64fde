use std::path::PathBuf;

use xml_equal_core::{
    compare, parse, parse_file, write, write_file, write_pretty, xml_equal, CompareOptions,
};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn compact_round_trip_preserves_the_tree() {
    let first = parse_file(&fixture("fixtures/catalog_pretty.xml")).expect("initial parse");

    let written = write(&first).expect("write should succeed");
    let second = parse(&written).expect("re-parse should succeed");

    assert_eq!(first, second);
    assert!(compare(&first, &second, &CompareOptions::strict())
        .expect("elements")
        .equal);
}

#[test]
fn pretty_round_trip_only_matches_when_whitespace_is_ignored() {
    let source = "<ROOT><Foo a='2' b='3'>val</Foo><Bar/></ROOT>";
    let first = parse(source.as_bytes()).expect("initial parse");

    let written = String::from_utf8(write_pretty(&first).expect("write")).expect("utf-8 output");
    assert!(written.contains('\n'));

    assert!(xml_equal(source, &written, &CompareOptions::default()).expect("parse"));
    assert!(!xml_equal(source, &written, &CompareOptions::strict()).expect("parse"));
}

#[test]
fn write_file_round_trip() {
    let source_path = fixture("fixtures/catalog_compact.xml");
    let out_dir = tempfile::tempdir().expect("tempdir should be created");
    let out_path = out_dir.path().join("roundtrip.xml");

    let node = parse_file(&source_path).expect("parse should succeed");
    write_file(&node, &out_path, true).expect("write_file should succeed");

    let reparsed = parse_file(&out_path).expect("parse_file should succeed");
    assert!(compare(&node, &reparsed, &CompareOptions::default())
        .expect("elements")
        .equal);
}

#[test]
fn fixtures_compare_as_expected() {
    let compact = parse_file(&fixture("fixtures/catalog_compact.xml")).expect("compact");
    let pretty = parse_file(&fixture("fixtures/catalog_pretty.xml")).expect("pretty");
    let changed = parse_file(&fixture("fixtures/catalog_changed.xml")).expect("changed");
    let opts = CompareOptions::default();

    assert!(compare(&compact, &pretty, &opts).expect("elements").equal);
    assert!(!compare(&compact, &pretty, &CompareOptions::strict())
        .expect("elements")
        .equal);
    assert!(!compare(&compact, &changed, &opts).expect("elements").equal);
}
