//! Integration tests for Taproot
//!
//! These tests drive the pipeline the CLI commands use: search,
//! classification, block recovery and caller discovery over a real
//! directory tree.

use std::fs;

use taproot_core::{FileCache, ResultSet, SearchProvider};
use taproot_graph::{GraphBuilder, render_tree};
use taproot_lang::{Language, LanguageRegistry};
use taproot_search::GrepSearcher;
use tempfile::TempDir;

const GEOMETRY_H: &str = "struct point {\n  int x;\n  int y;\n};\n\n#define ORIGIN_X 0\n\nint compute(int w, int h);\n";

const MAIN_C: &str = "#include \"geometry.h\"\n\nstatic int area(int w, int h) {\n  return w * h;\n}\n\nint compute(int w, int h) {\n  return area(w, h);\n}\n\nint main(void) {\n  return compute(3, 4);\n}\n";

fn sample_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("geometry.h"), GEOMETRY_H).unwrap();
    fs::write(dir.path().join("main.c"), MAIN_C).unwrap();
    dir
}

fn definition_lookup(dir: &TempDir, pattern: &str) -> ResultSet {
    let searcher = GrepSearcher::new();
    let registry = LanguageRegistry::with_defaults();
    let mut cache = FileCache::new();
    let compiled = regex::Regex::new(pattern).unwrap();

    let mut results = ResultSet::new();
    for hit in searcher.search(pattern, dir.path(), None).unwrap() {
        let Some(language) = registry.for_file(hit.file()) else {
            continue;
        };
        if let Some(block) = language.classify(&mut cache, &hit, &compiled).unwrap() {
            results.add_block(block);
        }
    }
    results
}

fn wrapper_lookup(dir: &TempDir, pattern: &str) -> ResultSet {
    let searcher = GrepSearcher::new();
    let registry = LanguageRegistry::with_defaults();
    let mut cache = FileCache::new();

    let mut results = ResultSet::new();
    for hit in searcher.search(pattern, dir.path(), None).unwrap() {
        let Some(language) = registry.for_file(hit.file()) else {
            continue;
        };
        if let Some(block) = language.enclosing_function(&mut cache, &hit).unwrap() {
            results.add_block(block);
        }
    }
    results
}

fn contents(results: &ResultSet) -> Vec<&str> {
    results.lines().iter().map(|l| l.content()).collect()
}

/// A struct definition is recovered in full from a hit on its opening line.
#[test]
fn test_definition_lookup_recovers_a_struct() {
    let dir = sample_project();

    let results = definition_lookup(&dir, "point");

    assert_eq!(
        contents(&results),
        vec!["struct point {", "  int x;", "  int y;", "};"]
    );
}

/// The function definition is shown; its prototype and call sites are not.
#[test]
fn test_definition_lookup_skips_declarations_and_calls() {
    let dir = sample_project();

    let results = definition_lookup(&dir, "compute");

    assert_eq!(
        contents(&results),
        vec!["int compute(int w, int h) {", "  return area(w, h);", "}"]
    );
}

/// A one-line macro yields a one-line block.
#[test]
fn test_definition_lookup_finds_a_macro() {
    let dir = sample_project();

    let results = definition_lookup(&dir, "ORIGIN_X");

    assert_eq!(contents(&results), vec!["#define ORIGIN_X 0"]);
}

/// Wrapper lookup shows the functions containing each hit, merged into
/// one ordered listing.
#[test]
fn test_wrapper_lookup_merges_enclosing_functions() {
    let dir = sample_project();

    let results = wrapper_lookup(&dir, "area");

    assert_eq!(
        contents(&results),
        vec![
            "static int area(int w, int h) {",
            "}",
            "int compute(int w, int h) {",
            "  return area(w, h);",
            "}",
        ]
    );
}

/// The original match keeps its red highlight and the recovered
/// function name gains a cyan one.
#[test]
fn test_wrapper_lookup_highlights_both_channels() {
    let dir = sample_project();

    let results = wrapper_lookup(&dir, "area");

    let rendered: Vec<String> = results.lines().iter().map(|l| l.render(false)).collect();
    assert!(
        rendered
            .iter()
            .any(|r| r.contains("\u{1b}[0;31marea\u{1b}[0m(w, h)"))
    );
    assert!(
        rendered
            .iter()
            .any(|r| r.contains("\u{1b}[0;36mcompute\u{1b}[0m"))
    );
}

/// Raw search returns every matching line in file-then-line order.
#[test]
fn test_grep_returns_every_match_in_order() {
    let dir = sample_project();
    let searcher = GrepSearcher::new();

    let mut results = ResultSet::new();
    results.add_all(searcher.search("return", dir.path(), None).unwrap());

    assert_eq!(
        contents(&results),
        vec![
            "  return w * h;",
            "  return area(w, h);",
            "  return compute(3, 4);",
        ]
    );
}

/// Caller discovery chains wrapper lookups into a rendered tree.
#[test]
fn test_caller_tree_reaches_the_outermost_caller() {
    let dir = sample_project();
    let searcher = GrepSearcher::new();
    let registry = LanguageRegistry::with_defaults();
    let builder = GraphBuilder::new(&searcher, &registry, dir.path(), 5);
    let mut cache = FileCache::new();

    let graph = builder.build(&mut cache, "area").unwrap();

    assert_eq!(
        render_tree(&graph, "area", true),
        "int main(void) {\n└── int compute(int w, int h) {\n    └── area\n"
    );
}
