//! Impact radius: everything that transitively calls a method.

use std::collections::{BTreeSet, HashSet, VecDeque};

use serde::Serialize;
use tracing::debug;

use crate::indexer::callgraph::CallGraphView;
use crate::query::budget::TraversalBudget;
use crate::query::guards::MaxDepth;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpactedCaller {
    pub fqn: String,
    pub file_path: String,
    pub line_number: u32,
    pub depth: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImpactReport {
    pub target: String,
    pub direct_callers: Vec<ImpactedCaller>,
    pub transitive_callers: Vec<ImpactedCaller>,
    pub affected_files: Vec<String>,
    pub cancelled: bool,
}

impl ImpactReport {
    pub fn total_affected_methods(&self) -> usize {
        self.direct_callers.len() + self.transitive_callers.len()
    }
}

/// Breadth-first walk over callers of `target`.
///
/// Each caller is reported once, at the depth and call site where it was
/// first discovered. Affected files include the call sites of every reported
/// caller. Unknown targets yield an empty report.
pub fn impact_radius<G: CallGraphView + ?Sized>(
    graph: &G,
    target: &str,
    max_depth: MaxDepth,
    budget: &TraversalBudget,
) -> ImpactReport {
    let mut report = ImpactReport {
        target: target.to_string(),
        ..ImpactReport::default()
    };
    let Some(target) = graph.method_name(target) else {
        return report;
    };
    let max_depth = max_depth.get();

    let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
    queue.push_back((target, 0));
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(target);
    let mut affected_files: BTreeSet<String> = BTreeSet::new();

    while let Some((current, depth)) = queue.pop_front() {
        if budget.is_exhausted() {
            report.cancelled = true;
            debug!("Impact radius for {} cancelled at depth {}", target, depth);
            break;
        }
        if depth >= max_depth {
            continue;
        }
        for neighbor in graph.get_callers(current) {
            if !visited.insert(neighbor.fqn) {
                continue;
            }
            let next_depth = depth + 1;
            affected_files.insert(neighbor.site.file_path.clone());
            let item = ImpactedCaller {
                fqn: neighbor.fqn.to_string(),
                file_path: neighbor.site.file_path.clone(),
                line_number: neighbor.site.line_number,
                depth: next_depth,
            };
            if next_depth == 1 {
                report.direct_callers.push(item);
            } else {
                report.transitive_callers.push(item);
            }
            queue.push_back((neighbor.fqn, next_depth));
        }
    }

    report.affected_files = affected_files.into_iter().collect();
    report
}
