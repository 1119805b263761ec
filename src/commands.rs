//! CLI command implementations

use std::path::Path;

use regex::Regex;
use taproot_core::{FileCache, ResultSet, SearchProvider};
use taproot_graph::{GraphBuilder, render_tree};
use taproot_lang::{Language, LanguageRegistry};
use taproot_search::GrepSearcher;

/// Definition lookup: classify every hit into a recovered block and
/// merge the blocks into one ordered listing.
pub fn def(pattern: &str, folder: &Path, quiet: bool) -> anyhow::Result<()> {
    let searcher = GrepSearcher::new();
    let registry = LanguageRegistry::with_defaults();
    let mut cache = FileCache::new();
    let compiled = Regex::new(pattern)?;

    let hits = searcher.search(pattern, folder, None)?;
    tracing::debug!(pattern, hits = hits.len(), "definition lookup");

    let mut results = ResultSet::new();
    for hit in hits {
        let Some(language) = registry.for_file(hit.file()) else {
            continue;
        };
        if let Some(block) = language.classify(&mut cache, &hit, &compiled)? {
            results.add_block(block);
        }
    }

    print_results(&results, quiet);
    Ok(())
}

/// Wrapper lookup: for every hit, show the function that textually
/// contains it.
pub fn wrapper(pattern: &str, folder: &Path, quiet: bool) -> anyhow::Result<()> {
    let searcher = GrepSearcher::new();
    let registry = LanguageRegistry::with_defaults();
    let mut cache = FileCache::new();

    let hits = searcher.search(pattern, folder, None)?;
    tracing::debug!(pattern, hits = hits.len(), "wrapper lookup");

    let mut results = ResultSet::new();
    for hit in hits {
        let Some(language) = registry.for_file(hit.file()) else {
            continue;
        };
        if let Some(block) = language.enclosing_function(&mut cache, &hit)? {
            results.add_block(block);
        }
    }

    print_results(&results, quiet);
    Ok(())
}

/// Raw search: every matching line, merged and ordered.
pub fn grep(pattern: &str, folder: &Path, quiet: bool) -> anyhow::Result<()> {
    let searcher = GrepSearcher::new();
    let hits = searcher.search(pattern, folder, None)?;

    let mut results = ResultSet::new();
    results.add_all(hits);

    print_results(&results, quiet);
    Ok(())
}

/// Caller tree: breadth-first discovery of everything that leads to
/// the symbol, rendered one tree per root caller.
pub fn tree(pattern: &str, folder: &Path, level: usize, quiet: bool) -> anyhow::Result<()> {
    let searcher = GrepSearcher::new();
    let registry = LanguageRegistry::with_defaults();
    let builder = GraphBuilder::new(&searcher, &registry, folder, level);
    let mut cache = FileCache::new();

    let graph = builder.build(&mut cache, pattern)?;
    if graph.is_empty() {
        tracing::debug!(pattern, "no callers found");
    }

    print!("{}", render_tree(&graph, pattern, quiet));
    Ok(())
}

fn print_results(results: &ResultSet, quiet: bool) {
    for line in results.lines() {
        println!("{}", line.render(quiet));
    }
}
