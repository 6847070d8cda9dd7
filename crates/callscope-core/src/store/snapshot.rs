//! Published call-graph snapshots.
//!
//! Every analysis run publishes a new immutable snapshot. Readers hold an
//! `Arc` to the snapshot they started with, so queries in flight never see
//! a half-replaced graph.

use std::sync::Arc;

use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::indexer::callgraph::CallGraphIndex;
use crate::indexer::pipeline::IngestReport;

#[derive(Debug)]
pub struct GraphSnapshot {
    pub version: u64,
    pub fingerprint: String,
    pub index: CallGraphIndex,
    pub report: IngestReport,
}

/// SHA-256 over the index layout in insertion order: method order plus both
/// adjacency directions. Traversal order follows that layout, so two indexes
/// with the same edges ingested in a different order fingerprint apart.
pub fn fingerprint(index: &CallGraphIndex) -> String {
    let mut hasher = Sha256::new();
    for method in index.methods() {
        hasher.update(b"M\t");
        hasher.update(method.as_bytes());
        hasher.update(b"\n");
        for (tag, neighbors) in [
            (b"> ", index.get_callees(method)),
            (b"< ", index.get_callers(method)),
        ] {
            for neighbor in neighbors {
                hasher.update(tag);
                hasher.update(neighbor.fqn.as_bytes());
                hasher.update(b"\t");
                hasher.update(neighbor.site.file_path.as_bytes());
                hasher.update(b"\t");
                hasher.update(neighbor.site.line_number.to_string().as_bytes());
                hasher.update(b"\n");
            }
        }
    }
    format!("{:x}", hasher.finalize())
}

pub struct SnapshotStore {
    current: RwLock<Arc<GraphSnapshot>>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    /// Start with an empty version-0 snapshot.
    pub fn new() -> Self {
        let index = CallGraphIndex::default();
        let empty = GraphSnapshot {
            version: 0,
            fingerprint: fingerprint(&index),
            index,
            report: IngestReport::default(),
        };
        Self {
            current: RwLock::new(Arc::new(empty)),
        }
    }

    pub fn current(&self) -> Arc<GraphSnapshot> {
        self.current.read().clone()
    }

    pub fn version(&self) -> u64 {
        self.current.read().version
    }

    /// Replace the current snapshot with a fresh index and its report.
    ///
    /// The version only moves when the graph itself changed; republishing an
    /// identical graph keeps the version but still swaps in the new index
    /// and report.
    pub fn publish(&self, index: CallGraphIndex, report: IngestReport) -> Arc<GraphSnapshot> {
        let fingerprint = fingerprint(&index);
        let mut current = self.current.write();
        let changed = current.fingerprint != fingerprint;
        let version = if changed {
            current.version + 1
        } else {
            current.version
        };
        let snapshot = Arc::new(GraphSnapshot {
            version,
            fingerprint,
            index,
            report,
        });
        if changed {
            info!(
                "Published call graph snapshot v{} ({} methods, {} edges)",
                snapshot.version,
                snapshot.index.method_count(),
                snapshot.index.relationship_count()
            );
        } else {
            debug!(
                "Call graph unchanged at v{}; refreshed ingest report ({} skipped)",
                snapshot.version, snapshot.report.facts_skipped
            );
        }
        *current = snapshot.clone();
        snapshot
    }
}
