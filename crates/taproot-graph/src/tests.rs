//! Tests for caller discovery and tree rendering, driven end to end
//! through the real searcher over temp-dir fixtures.

use std::fs;

use taproot_core::{FileCache, LineSnapshot, SourceLocation};
use taproot_lang::LanguageRegistry;
use taproot_search::GrepSearcher;
use tempfile::TempDir;

use crate::{CallGraph, GraphBuilder, render_tree};

fn create_tree(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

fn build_graph(dir: &TempDir, target: &str, max_depth: usize) -> CallGraph {
    let searcher = GrepSearcher::new();
    let registry = LanguageRegistry::with_defaults();
    let builder = GraphBuilder::new(&searcher, &registry, dir.path(), max_depth);
    let mut cache = FileCache::new();
    builder.build(&mut cache, target).unwrap()
}

fn snapshot(file: &str, index: usize, content: &str) -> LineSnapshot {
    LineSnapshot::new(SourceLocation::new(file, index), content)
}

#[test]
fn test_direct_callers_become_roots() {
    let dir = create_tree(&[(
        "main.c",
        "void alpha(void) {\n  foo(1);\n}\n\nvoid beta(void) {\n  foo(2);\n}\n",
    )]);

    let graph = build_graph(&dir, "foo", 5);

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.record_count(), 2);
    assert_eq!(graph.roots("foo").len(), 2);
    insta::assert_snapshot!(render_tree(&graph, "foo", true), @r"
    void alpha(void) {
    └── foo
    void beta(void) {
    └── foo
    ");
}

#[test]
fn test_transitive_chain_renders_from_the_outermost_caller() {
    let dir = create_tree(&[(
        "main.c",
        "void entry(void) {\n  dispatch(0);\n}\n\nstatic void dispatch(int x) {\n  foo(x);\n}\n",
    )]);

    let graph = build_graph(&dir, "foo", 5);

    assert_eq!(graph.node_count(), 2);
    let entry = graph.find_by_name("entry").unwrap();
    let dispatch = graph.find_by_name("dispatch").unwrap();
    assert_eq!(graph.call_sites(entry, dispatch).len(), 1);
    assert_eq!(graph.roots("foo"), vec![entry]);
    insta::assert_snapshot!(render_tree(&graph, "foo", true), @r"
    void entry(void) {
    └── static void dispatch(int x) {
        └── foo
    ");
}

#[test]
fn test_self_recursion_terminates() {
    let dir = create_tree(&[(
        "rec.c",
        "int fact(int n) {\n  if (n < 2) return 1;\n  return n * fact(n - 1);\n}\n",
    )]);

    let graph = build_graph(&dir, "fact", 5);

    // The definition line is skipped; only the recursive call counts.
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.record_count(), 1);
    let fact = graph.find_by_name("fact").unwrap();
    assert_eq!(graph.call_sites(fact, fact).len(), 1);
    assert_eq!(graph.roots("fact"), vec![fact]);
    insta::assert_snapshot!(render_tree(&graph, "fact", true), @r"
    int fact(int n) {
    └── int fact(int n) {
    ");
}

#[test]
fn test_cycle_of_callers_falls_back_to_all_roots() {
    let dir = create_tree(&[(
        "cycle.c",
        "void ping(void) {\n  work(1);\n  pong();\n}\n\nvoid pong(void) {\n  ping();\n}\n",
    )]);

    let graph = build_graph(&dir, "work", 5);

    assert_eq!(graph.node_count(), 2);
    let ping = graph.find_by_name("ping").unwrap();
    let pong = graph.find_by_name("pong").unwrap();
    assert_eq!(graph.roots("work"), vec![ping, pong]);
    insta::assert_snapshot!(render_tree(&graph, "work", true), @r"
    void ping(void) {
    ├── work
    └── void pong(void) {
        └── void ping(void) {
    void pong(void) {
    └── void ping(void) {
        ├── work
        └── void pong(void) {
    ");
}

#[test]
fn test_depth_limit_bounds_discovery() {
    let dir = create_tree(&[(
        "chain.c",
        "void level3(void) {\n  level2();\n}\n\nvoid level2(void) {\n  level1();\n}\n\nvoid level1(void) {\n  target_fn();\n}\n",
    )]);

    let graph = build_graph(&dir, "target_fn", 2);

    // level2's own callers are one sweep past the limit.
    assert_eq!(graph.node_count(), 2);
    assert!(graph.find_by_name("level1").is_some());
    assert!(graph.find_by_name("level2").is_some());
    assert!(graph.find_by_name("level3").is_none());
}

#[test]
fn test_files_without_a_language_are_skipped() {
    let dir = create_tree(&[
        ("main.c", "void caller(void) {\n  foo(1);\n}\n"),
        ("script.py", "def wrapper():\n    foo(2)\n"),
    ]);

    let graph = build_graph(&dir, "foo", 5);

    assert_eq!(graph.node_count(), 1);
    assert!(graph.find_by_name("caller").is_some());
}

#[test]
fn test_intern_dedups_by_location() {
    let mut graph = CallGraph::new();
    let signature = snapshot("a.c", 0, "void alpha(void) {");

    let first = graph.intern("alpha", &signature);
    let second = graph.intern("alpha", &signature);

    assert_eq!(first, second);
    assert_eq!(graph.node_count(), 1);
}

#[test]
fn test_roots_exempt_the_target_symbol() {
    let mut graph = CallGraph::new();
    let alpha = graph.intern("alpha", &snapshot("a.c", 0, "void alpha(void) {"));
    let beta = graph.intern("beta", &snapshot("a.c", 10, "void beta(void) {"));
    graph.record_call("beta", alpha, snapshot("a.c", 1, "  beta();"));
    graph.connect();

    // beta is called by alpha, so only alpha is a root...
    assert_eq!(graph.roots("unrelated"), vec![alpha]);
    // ...unless beta is the symbol the walk started from.
    assert_eq!(graph.roots("beta"), vec![alpha, beta]);
}

#[test]
fn test_repeated_call_sites_keep_their_own_edges() {
    let mut graph = CallGraph::new();
    let alpha = graph.intern("alpha", &snapshot("a.c", 0, "void alpha(void) {"));
    let beta = graph.intern("beta", &snapshot("a.c", 10, "void beta(void) {"));
    graph.record_call("beta", alpha, snapshot("a.c", 1, "  beta();"));
    graph.record_call("beta", alpha, snapshot("a.c", 2, "  beta();"));
    graph.connect();

    assert_eq!(graph.call_sites(alpha, beta).len(), 2);
    insta::assert_snapshot!(render_tree(&graph, "zzz", true), @r"
    void alpha(void) {
    ├── void beta(void) {
    └── void beta(void) {
    ");
}
