//! Path enumeration and reachability over a call graph.
//!
//! The two walks handle cycles differently and stay separate:
//!
//! * `find_paths_to` enumerates distinct routes, so its visited set is local
//!   to the path being extended. A method may appear in many emitted paths
//!   but never twice in one.
//! * `find_paths_from` only answers "reachable at all", so one global visited
//!   set bounds the walk to O(V+E).

use std::collections::{BTreeMap, HashSet, VecDeque};

use serde::Serialize;
use tracing::debug;

use crate::config::EngineConfig;
use crate::indexer::callgraph::CallGraphView;
use crate::query::budget::TraversalBudget;
use crate::query::guards::{MaxDepth, MAX_PATHS, MAX_TRAVERSAL_DEPTH};

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Paths ending at a target, each ordered entry point -> target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathsToResult {
    pub paths: Vec<Vec<String>>,
    /// At least one path was cut at the depth bound before reaching an
    /// entry point.
    pub max_depth_reached: bool,
    pub path_limit_reached: bool,
    pub cancelled: bool,
}

impl PathsToResult {
    pub fn is_complete(&self) -> bool {
        !(self.max_depth_reached || self.path_limit_reached || self.cancelled)
    }
}

/// Reachable methods grouped by the shortest hop count from the start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReachabilityResult {
    pub by_depth: BTreeMap<usize, Vec<String>>,
    pub cancelled: bool,
}

impl ReachabilityResult {
    pub fn is_empty(&self) -> bool {
        self.by_depth.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_depth.values().map(Vec::len).sum()
    }

    pub fn at_depth(&self, depth: usize) -> &[String] {
        self.by_depth.get(&depth).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_depth.values().flatten().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

pub struct PathFinder<'g, G: CallGraphView + ?Sized> {
    graph: &'g G,
    budget: TraversalBudget,
    path_limit: usize,
    depth_ceiling: usize,
}

impl<'g, G: CallGraphView + ?Sized> PathFinder<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            budget: TraversalBudget::unbounded(),
            path_limit: MAX_PATHS,
            depth_ceiling: MAX_TRAVERSAL_DEPTH as usize,
        }
    }

    /// Apply the configured depth ceiling to every query on this finder.
    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.depth_ceiling = config.max_depth_ceiling.max(1) as usize;
        self
    }

    pub fn with_budget(mut self, budget: TraversalBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_path_limit(mut self, path_limit: usize) -> Self {
        self.path_limit = path_limit.max(1);
        self
    }

    /// Every simple path of at most `max_depth` hops from an entry point to
    /// `target`, in depth-first discovery order.
    ///
    /// A path whose head still has callers off the path when the depth bound
    /// is hit is emitted as-is and flags `max_depth_reached`. A branch whose callers
    /// are all already on the path is a cycle and emits nothing. Unknown
    /// targets yield an empty result.
    pub fn find_paths_to(&self, target: &str, max_depth: MaxDepth) -> PathsToResult {
        let mut walk = BackwardWalk {
            graph: self.graph,
            budget: &self.budget,
            max_depth: max_depth.get().min(self.depth_ceiling),
            path_limit: self.path_limit,
            path: Vec::new(),
            on_path: HashSet::new(),
            result: PathsToResult::default(),
        };
        let Some(start) = self.graph.method_name(target) else {
            return walk.result;
        };
        walk.path.push(start);
        walk.on_path.insert(start);
        walk.visit(start);

        if !walk.result.is_complete() {
            debug!(
                "Paths to {} incomplete: {} paths, depth_cut={}, limit_hit={}, cancelled={}",
                target,
                walk.result.paths.len(),
                walk.result.max_depth_reached,
                walk.result.path_limit_reached,
                walk.result.cancelled
            );
        }
        walk.result
    }

    /// Every method reachable from `start` within `max_depth` hops, recorded
    /// once at the smallest depth it is reachable at. `start` itself is at
    /// depth 0.
    pub fn find_paths_from(&self, start: &str, max_depth: MaxDepth) -> ReachabilityResult {
        let mut result = ReachabilityResult::default();
        let Some(start) = self.graph.method_name(start) else {
            return result;
        };
        let max_depth = max_depth.get().min(self.depth_ceiling);

        let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
        queue.push_back((start, 0));
        let mut visited: HashSet<&str> = HashSet::new();

        while let Some((node, depth)) = queue.pop_front() {
            if self.budget.is_exhausted() {
                result.cancelled = true;
                debug!(
                    "Reachability from {} cancelled after {} nodes",
                    start,
                    visited.len()
                );
                break;
            }
            if !visited.insert(node) {
                continue;
            }
            result
                .by_depth
                .entry(depth)
                .or_default()
                .push(node.to_string());
            if depth < max_depth {
                for callee in self.graph.callee_names(node) {
                    if !visited.contains(callee) {
                        queue.push_back((callee, depth + 1));
                    }
                }
            }
        }

        result
    }
}

struct BackwardWalk<'g, 'b, G: CallGraphView + ?Sized> {
    graph: &'g G,
    budget: &'b TraversalBudget,
    max_depth: usize,
    path_limit: usize,
    /// Target first, current head last.
    path: Vec<&'g str>,
    on_path: HashSet<&'g str>,
    result: PathsToResult,
}

impl<'g, G: CallGraphView + ?Sized> BackwardWalk<'g, '_, G> {
    fn stopped(&self) -> bool {
        self.result.cancelled || self.result.path_limit_reached
    }

    fn visit(&mut self, current: &'g str) {
        if self.budget.is_exhausted() {
            self.result.cancelled = true;
            return;
        }

        let graph = self.graph;
        let callers = graph.caller_names(current);
        if callers.is_empty() {
            self.emit();
            return;
        }
        let open: Vec<&'g str> = callers
            .into_iter()
            .filter(|caller| !self.on_path.contains(caller))
            .collect();
        // Every caller closes a cycle: nothing to emit at any depth.
        if open.is_empty() {
            return;
        }
        if self.path.len() > self.max_depth {
            self.result.max_depth_reached = true;
            self.emit();
            return;
        }

        for caller in open {
            if self.stopped() {
                return;
            }
            self.path.push(caller);
            self.on_path.insert(caller);
            self.visit(caller);
            self.on_path.remove(caller);
            self.path.pop();
        }
    }

    fn emit(&mut self) {
        if self.result.paths.len() >= self.path_limit {
            self.result.path_limit_reached = true;
            return;
        }
        self.result
            .paths
            .push(self.path.iter().rev().map(|name| name.to_string()).collect());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
