//! Text rendering of the caller graph.
//!
//! Each root prints its signature row at the left margin, then its
//! recorded callees as an indented tree. A callee naming a discovered
//! node prints that node's signature row and recurses; any other
//! callee prints as its bare symbol name. A node already printed in
//! the current traversal shows its row again but is not expanded, so
//! cycles terminate.

use std::collections::HashSet;

use crate::graph::{CallGraph, NodeId};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACER: &str = "    ";

/// Render the caller tree for `target` into a newline-terminated
/// string, one traversal per root.
pub fn render_tree(graph: &CallGraph, target: &str, quiet: bool) -> String {
    let mut out = String::new();
    for root in graph.roots(target) {
        let Some(node) = graph.node(root) else {
            continue;
        };
        out.push_str(&node.line.render(quiet));
        out.push('\n');
        let mut printed = HashSet::from([root]);
        render_children(graph, root, "", quiet, &mut printed, &mut out);
    }
    out
}

fn render_children(
    graph: &CallGraph,
    id: NodeId,
    prefix: &str,
    quiet: bool,
    printed: &mut HashSet<NodeId>,
    out: &mut String,
) {
    let records = graph.calls_from(id);
    let last = records.len().saturating_sub(1);
    for (position, record) in records.iter().enumerate() {
        let connector = if position == last { LAST_BRANCH } else { BRANCH };
        let extension = if position == last { SPACER } else { PIPE };
        match graph.find_by_name(&record.callee) {
            Some(callee) => {
                let Some(node) = graph.node(callee) else {
                    continue;
                };
                out.push_str(prefix);
                out.push_str(connector);
                out.push_str(&node.line.render(quiet));
                out.push('\n');
                if printed.insert(callee) {
                    let deeper = format!("{prefix}{extension}");
                    render_children(graph, callee, &deeper, quiet, printed, out);
                }
            }
            None => {
                out.push_str(prefix);
                out.push_str(connector);
                out.push_str(&record.callee);
                out.push('\n');
            }
        }
    }
}
