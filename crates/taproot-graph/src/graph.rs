//! Caller graph storage.
//!
//! Nodes are functions, identified by the location of their signature
//! line. Raw call records accumulate during discovery and are turned
//! into petgraph adjacency by [`CallGraph::connect`] once discovery is
//! finished, because a callee may be discovered as a node only after
//! the calls into it were recorded.

use std::collections::HashMap;
use std::fmt;

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use taproot_core::{LineSnapshot, SourceLocation};

/// Unique identifier for a node in the caller graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A function discovered as a caller. The snapshot is the signature
/// line, with the recovered name carried as its secondary highlight.
#[derive(Debug, Clone)]
pub struct CallNode {
    pub name: String,
    pub line: LineSnapshot,
}

/// One discovered call: `callee` is invoked at `site`, which lies
/// inside the body of the function identified by `caller`.
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub callee: String,
    pub caller: NodeId,
    pub site: LineSnapshot,
}

/// Directed caller graph over [`StableDiGraph`].
///
/// Edges point from caller to callee; a callee name that never
/// resolved to a discovered node stays a leaf record and produces no
/// petgraph edge.
pub struct CallGraph {
    inner: StableDiGraph<CallNode, LineSnapshot>,
    locations: HashMap<SourceLocation, NodeId>,
    records: Vec<CallRecord>,
}

impl fmt::Debug for CallGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallGraph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .field("record_count", &self.records.len())
            .finish()
    }
}

impl CallGraph {
    pub fn new() -> Self {
        Self {
            inner: StableDiGraph::new(),
            locations: HashMap::new(),
            records: Vec::new(),
        }
    }

    /// Register the function whose signature line is `line`, reusing
    /// the existing node when one is already keyed to that location.
    pub fn intern(&mut self, name: &str, line: &LineSnapshot) -> NodeId {
        if let Some(&id) = self.locations.get(line.location()) {
            return id;
        }
        let idx = self.inner.add_node(CallNode {
            name: name.to_string(),
            line: line.clone(),
        });
        let id = NodeId(idx.index() as u64);
        self.locations.insert(line.location().clone(), id);
        id
    }

    /// Record that `caller` invokes `callee` at `site`. Every call
    /// site produces its own record, so a function calling the same
    /// symbol twice contributes two records.
    pub fn record_call(&mut self, callee: &str, caller: NodeId, site: LineSnapshot) {
        self.records.push(CallRecord {
            callee: callee.to_string(),
            caller,
            site,
        });
    }

    /// Materialize accumulated records into petgraph edges, one edge
    /// per call site whose callee name resolves to a node. Called once
    /// after discovery has drained its queue.
    pub fn connect(&mut self) {
        let resolved: Vec<(NodeIndex, NodeIndex, LineSnapshot)> = self
            .records
            .iter()
            .filter_map(|record| {
                let callee = self.find_by_name(&record.callee)?;
                Some((
                    NodeIndex::new(record.caller.0 as usize),
                    NodeIndex::new(callee.0 as usize),
                    record.site.clone(),
                ))
            })
            .collect();
        for (caller, callee, site) in resolved {
            self.inner.add_edge(caller, callee, site);
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&CallNode> {
        self.inner.node_weight(NodeIndex::new(id.0 as usize))
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// First node carrying `name`, in discovery order. Distinct
    /// functions may share a name across files; the earliest
    /// discovered one wins.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.inner
            .node_indices()
            .find(|&idx| {
                self.inner
                    .node_weight(idx)
                    .is_some_and(|node| node.name == name)
            })
            .map(|idx| NodeId(idx.index() as u64))
    }

    /// Records whose caller is `id`, in discovery order. These drive
    /// rendering: each record is one child entry under the caller.
    pub fn calls_from(&self, id: NodeId) -> Vec<&CallRecord> {
        self.records
            .iter()
            .filter(|record| record.caller == id)
            .collect()
    }

    /// Call-site snapshots on edges from `caller` to `callee`.
    pub fn call_sites(&self, caller: NodeId, callee: NodeId) -> Vec<&LineSnapshot> {
        let target = NodeIndex::new(callee.0 as usize);
        self.inner
            .edges_directed(NodeIndex::new(caller.0 as usize), Direction::Outgoing)
            .filter(|edge_ref| edge_ref.target() == target)
            .map(|edge_ref| edge_ref.weight())
            .collect()
    }

    /// Entry points of the graph: nodes no other node names as a
    /// callee. The original `target` symbol is exempt, so a recursive
    /// target still surfaces as a root. When every node sits on a
    /// cycle the strict rule yields nothing and all nodes become
    /// roots.
    pub fn roots(&self, target: &str) -> Vec<NodeId> {
        let strict: Vec<NodeId> = self
            .inner
            .node_indices()
            .filter(|&idx| {
                let exempt = self
                    .inner
                    .node_weight(idx)
                    .is_some_and(|node| node.name == target);
                exempt
                    || self
                        .inner
                        .edges_directed(idx, Direction::Incoming)
                        .all(|edge_ref| edge_ref.source() == idx)
            })
            .map(|idx| NodeId(idx.index() as u64))
            .collect();
        if strict.is_empty() && self.inner.node_count() > 0 {
            return self
                .inner
                .node_indices()
                .map(|idx| NodeId(idx.index() as u64))
                .collect();
        }
        strict
    }
}

impl Default for CallGraph {
    fn default() -> Self {
        Self::new()
    }
}
