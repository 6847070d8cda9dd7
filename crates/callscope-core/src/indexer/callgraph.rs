//! Bidirectional call-graph index over canonical call edges.
//!
//! Names are interned once into `known`; adjacency is stored per node id in
//! both directions. Every set is insertion ordered, so lookups and the
//! traversals built on them are reproducible for a fixed edge order.

use indexmap::IndexSet;
use serde::Serialize;

use crate::models::{CallEdge, CallSite};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One adjacency entry: the method on the other end and where the call
/// happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Neighbor<'a> {
    pub fqn: &'a str,
    pub site: &'a CallSite,
}

/// Read interface used by the traversal layer.
pub trait CallGraphView {
    fn has_method(&self, fqn: &str) -> bool;

    /// The graph-owned spelling of `fqn`, or `None` when it is unknown.
    fn method_name(&self, fqn: &str) -> Option<&str>;

    /// Distinct caller names of `fqn` in first-seen order.
    fn caller_names(&self, fqn: &str) -> Vec<&str>;

    /// Distinct callee names of `fqn` in first-seen order.
    fn callee_names(&self, fqn: &str) -> Vec<&str>;

    fn get_callers(&self, fqn: &str) -> Vec<Neighbor<'_>>;

    fn get_callees(&self, fqn: &str) -> Vec<Neighbor<'_>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Link {
    node: usize,
    site: CallSite,
}

#[derive(Debug, Clone, Default)]
struct Adjacency {
    links: IndexSet<Link>,
    nodes: IndexSet<usize>,
}

impl Adjacency {
    fn insert(&mut self, node: usize, site: CallSite) -> bool {
        if self.links.insert(Link { node, site }) {
            self.nodes.insert(node);
            true
        } else {
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// Immutable call graph for one analysis snapshot.
#[derive(Debug, Clone, Default)]
pub struct CallGraphIndex {
    known: IndexSet<String>,
    forward: Vec<Adjacency>,
    reverse: Vec<Adjacency>,
    edge_count: usize,
}

impl CallGraphIndex {
    /// Build an index from `edges` in one pass. Repeated edges (same caller,
    /// callee, and site) are stored once.
    pub fn build<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = CallEdge>,
    {
        let mut builder = CallGraphBuilder::new();
        for edge in edges {
            builder.add_edge(edge);
        }
        builder.finish()
    }

    pub fn has_method(&self, fqn: &str) -> bool {
        self.known.contains(fqn)
    }

    pub fn method_count(&self) -> usize {
        self.known.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.edge_count
    }

    pub fn get_callees(&self, fqn: &str) -> Vec<Neighbor<'_>> {
        self.neighbors(&self.forward, fqn)
    }

    pub fn get_callers(&self, fqn: &str) -> Vec<Neighbor<'_>> {
        self.neighbors(&self.reverse, fqn)
    }

    pub fn callee_names(&self, fqn: &str) -> Vec<&str> {
        self.neighbor_names(&self.forward, fqn)
    }

    pub fn caller_names(&self, fqn: &str) -> Vec<&str> {
        self.neighbor_names(&self.reverse, fqn)
    }

    /// Every known method in first-seen order.
    pub fn methods(&self) -> impl Iterator<Item = &str> + '_ {
        self.known.iter().map(String::as_str)
    }

    /// Methods with no incoming call edges, in first-seen order.
    pub fn entry_points(&self) -> Vec<&str> {
        self.known
            .iter()
            .enumerate()
            .filter(|(id, _)| self.reverse[*id].nodes.is_empty())
            .map(|(_, name)| name.as_str())
            .collect()
    }

    /// Every distinct edge, grouped by caller in first-seen order.
    pub fn edges(&self) -> impl Iterator<Item = CallEdge> + '_ {
        self.forward.iter().enumerate().flat_map(move |(caller, adj)| {
            adj.links.iter().map(move |link| CallEdge {
                caller_fqn: self.known[caller].clone(),
                callee_fqn: self.known[link.node].clone(),
                site: link.site.clone(),
            })
        })
    }

    pub(crate) fn node_id(&self, fqn: &str) -> Option<usize> {
        self.known.get_index_of(fqn)
    }

    pub(crate) fn name_of(&self, id: usize) -> &str {
        self.known[id].as_str()
    }

    pub(crate) fn callee_ids(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.forward[id].nodes.iter().copied()
    }

    fn neighbors<'a>(&'a self, side: &'a [Adjacency], fqn: &str) -> Vec<Neighbor<'a>> {
        match self.node_id(fqn) {
            Some(id) => side[id]
                .links
                .iter()
                .map(|link| Neighbor {
                    fqn: self.name_of(link.node),
                    site: &link.site,
                })
                .collect(),
            None => Vec::new(),
        }
    }

    fn neighbor_names<'a>(&'a self, side: &'a [Adjacency], fqn: &str) -> Vec<&'a str> {
        match self.node_id(fqn) {
            Some(id) => side[id]
                .nodes
                .iter()
                .map(|&node| self.name_of(node))
                .collect(),
            None => Vec::new(),
        }
    }
}

impl CallGraphView for CallGraphIndex {
    fn has_method(&self, fqn: &str) -> bool {
        CallGraphIndex::has_method(self, fqn)
    }

    fn method_name(&self, fqn: &str) -> Option<&str> {
        self.known.get(fqn).map(String::as_str)
    }

    fn caller_names(&self, fqn: &str) -> Vec<&str> {
        CallGraphIndex::caller_names(self, fqn)
    }

    fn callee_names(&self, fqn: &str) -> Vec<&str> {
        CallGraphIndex::callee_names(self, fqn)
    }

    fn get_callers(&self, fqn: &str) -> Vec<Neighbor<'_>> {
        CallGraphIndex::get_callers(self, fqn)
    }

    fn get_callees(&self, fqn: &str) -> Vec<Neighbor<'_>> {
        CallGraphIndex::get_callees(self, fqn)
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Single-writer accumulator that seals into a [`CallGraphIndex`].
#[derive(Debug, Default)]
pub struct CallGraphBuilder {
    index: CallGraphIndex,
}

impl CallGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one edge. Returns `false` when the identical edge was already
    /// present.
    pub fn add_edge(&mut self, edge: CallEdge) -> bool {
        let caller = self.intern(edge.caller_fqn);
        let callee = self.intern(edge.callee_fqn);
        let index = &mut self.index;
        if !index.forward[caller].insert(callee, edge.site.clone()) {
            return false;
        }
        index.reverse[callee].insert(caller, edge.site);
        index.edge_count += 1;
        true
    }

    pub fn method_count(&self) -> usize {
        self.index.method_count()
    }

    pub fn relationship_count(&self) -> usize {
        self.index.relationship_count()
    }

    pub fn finish(self) -> CallGraphIndex {
        self.index
    }

    fn intern(&mut self, fqn: String) -> usize {
        let index = &mut self.index;
        let (id, inserted) = index.known.insert_full(fqn);
        if inserted {
            index.forward.push(Adjacency::default());
            index.reverse.push(Adjacency::default());
        }
        id
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
