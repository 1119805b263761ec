//! Breadth-first caller discovery.
//!
//! Starting from a target symbol, each sweep greps for call sites of
//! the current symbol, resolves every hit to its enclosing function,
//! and records that function as a caller. Newly named callers are
//! queued for their own sweep until the depth limit or a previously
//! seen name stops the walk.

use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;

use taproot_core::{FileCache, Result, SearchProvider};
use taproot_lang::{Language, LanguageRegistry};

use crate::graph::CallGraph;

/// Names a caller sweep never follows. Hits inside conditions or jump
/// statements can resolve to a keyword when the heuristics misread a
/// line as a signature.
const RESERVED: &[&str] = &[
    "if", "else", "for", "while", "switch", "do", "return", "sizeof", "case", "default", "break",
    "continue", "goto",
];

struct WorkItem {
    symbol: String,
    depth: usize,
    extensions: Option<&'static [&'static str]>,
}

/// Drives caller discovery against a search provider and the language
/// registry.
pub struct GraphBuilder<'a> {
    search: &'a dyn SearchProvider,
    registry: &'a LanguageRegistry,
    root: PathBuf,
    max_depth: usize,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(
        search: &'a dyn SearchProvider,
        registry: &'a LanguageRegistry,
        root: impl Into<PathBuf>,
        max_depth: usize,
    ) -> Self {
        Self {
            search,
            registry,
            root: root.into(),
            max_depth,
        }
    }

    /// Discover callers of `target` and return the finished graph.
    ///
    /// The first sweep searches for the raw `target` pattern; deeper
    /// sweeps match the discovered symbol as a whole word followed by
    /// an opening parenthesis. Sweeps after the first stay inside the
    /// file extensions of the language that produced the caller.
    pub fn build(&self, cache: &mut FileCache, target: &str) -> Result<CallGraph> {
        let mut graph = CallGraph::new();
        let mut visited: HashSet<String> = HashSet::from([target.to_string()]);
        let mut queue: VecDeque<WorkItem> = VecDeque::new();
        queue.push_back(WorkItem {
            symbol: target.to_string(),
            depth: 0,
            extensions: None,
        });

        while let Some(item) = queue.pop_front() {
            if item.depth >= self.max_depth {
                continue;
            }
            let expression = if item.depth == 0 {
                item.symbol.clone()
            } else {
                format!(r"\b{}\(", regex::escape(&item.symbol))
            };
            let hits = self.search.search(&expression, &self.root, item.extensions)?;
            tracing::debug!(
                symbol = %item.symbol,
                depth = item.depth,
                hits = hits.len(),
                "caller sweep"
            );

            for hit in hits {
                let Some(language) = self.registry.for_file(hit.file()) else {
                    continue;
                };
                let Some(enclosing) = language.enclosing_function(cache, &hit)? else {
                    continue;
                };
                let Some(signature) = enclosing.start() else {
                    continue;
                };
                let Some(name) = language.symbol_name(signature) else {
                    continue;
                };
                if RESERVED.contains(&name.as_str()) {
                    continue;
                }
                // A hit on the signature line of the symbol itself is
                // its definition, not a call into it.
                if signature.location() == hit.location() && name == item.symbol {
                    continue;
                }
                let caller = graph.intern(&name, signature);
                graph.record_call(&item.symbol, caller, hit);
                if visited.insert(name.clone()) {
                    queue.push_back(WorkItem {
                        symbol: name,
                        depth: item.depth + 1,
                        extensions: Some(enclosing.lang().extensions),
                    });
                }
            }
        }

        graph.connect();
        tracing::debug!(graph = ?graph, symbol = target, "caller discovery finished");
        Ok(graph)
    }
}
