//! Fact ingestion: normalize, validate, and index with Rayon-based parallelism.
//!
//! Facts are prepared in parallel and merged into the index by a single
//! writer in input order, so the resulting graph is identical to a
//! sequential run.

use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::errors::CallScopeError;
use crate::indexer::callgraph::{CallGraphBuilder, CallGraphIndex};
use crate::indexer::normalizer::SymbolNormalizer;
use crate::indexer::validator::MetadataValidator;
use crate::models::{CallEdge, CallSite, RawCallFact};

/// One skipped fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestError {
    pub fact_index: usize,
    pub file_path: String,
    pub line_number: i64,
    pub kind: &'static str,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub facts_seen: usize,
    pub edges_accepted: usize,
    pub duplicate_edges: usize,
    pub facts_skipped: usize,
    pub errors: Vec<IngestError>,
    pub elapsed_ms: u64,
}

#[derive(Debug)]
pub struct IngestOutcome {
    pub index: CallGraphIndex,
    pub report: IngestReport,
}

/// Turn one raw fact into a canonical edge.
///
/// Only the callee is normalized; the caller is the enclosing definition and
/// keeps the name it was declared under.
pub fn prepare_edge(
    fact: &RawCallFact,
    normalizer: &SymbolNormalizer,
    validator: &MetadataValidator,
) -> Result<CallEdge, CallScopeError> {
    let canonical = normalizer.normalize(&fact.callee)?;
    let candidate = RawCallFact {
        callee: canonical,
        ..fact.clone()
    };
    let outcome = validator.validate_and_normalize(&candidate);
    if !outcome.is_valid {
        return Err(CallScopeError::MalformedFact(outcome.errors));
    }
    let normalized = outcome.normalized;
    Ok(CallEdge {
        caller_fqn: normalized.caller.fully_qualified_name,
        callee_fqn: normalized.callee.fully_qualified_name,
        site: CallSite {
            file_path: normalized.file_path,
            line_number: u32::try_from(normalized.line_number).unwrap_or(u32::MAX),
        },
    })
}

fn prepare_all(
    facts: &[RawCallFact],
    normalizer: &SymbolNormalizer,
    validator: &MetadataValidator,
    workers: usize,
) -> Vec<Result<CallEdge, CallScopeError>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build();

    match pool {
        Ok(pool) => pool.install(|| {
            facts
                .par_iter()
                .map(|fact| prepare_edge(fact, normalizer, validator))
                .collect()
        }),
        Err(e) => {
            warn!("Falling back to sequential fact preparation: {e}");
            facts
                .iter()
                .map(|fact| prepare_edge(fact, normalizer, validator))
                .collect()
        }
    }
}

fn error_messages(error: &CallScopeError) -> Vec<String> {
    match error {
        CallScopeError::MalformedFact(messages) => messages.clone(),
        other => vec![other.to_string()],
    }
}

/// Build a fresh index from `facts`.
///
/// Invalid facts and facts with runaway dispatch chains are skipped and
/// recorded in the report; they never abort the run.
pub fn ingest(facts: &[RawCallFact], config: &EngineConfig) -> IngestOutcome {
    let started = Instant::now();
    let normalizer = SymbolNormalizer::new(config.max_dispatch_hops);
    let validator = MetadataValidator::new();

    let prepared = prepare_all(facts, &normalizer, &validator, config.ingest_workers);

    let mut builder = CallGraphBuilder::new();
    let mut report = IngestReport {
        facts_seen: facts.len(),
        ..IngestReport::default()
    };

    for (fact_index, (fact, result)) in facts.iter().zip(prepared).enumerate() {
        match result {
            Ok(edge) => {
                if builder.add_edge(edge) {
                    report.edges_accepted += 1;
                } else {
                    report.duplicate_edges += 1;
                }
            }
            Err(error) => {
                warn!(
                    "Skipping call fact #{} at {}:{} ({} -> {}): {}",
                    fact_index,
                    fact.file_path,
                    fact.line_number,
                    fact.caller.fully_qualified_name,
                    fact.callee.fully_qualified_name,
                    error
                );
                report.facts_skipped += 1;
                report.errors.push(IngestError {
                    fact_index,
                    file_path: fact.file_path.trim().to_string(),
                    line_number: fact.line_number,
                    kind: error.kind(),
                    messages: error_messages(&error),
                });
            }
        }
    }

    let index = builder.finish();
    report.elapsed_ms = started.elapsed().as_millis() as u64;
    info!(
        "Indexed {} methods and {} call edges from {} facts ({} skipped, {} duplicates) in {}ms",
        index.method_count(),
        index.relationship_count(),
        report.facts_seen,
        report.facts_skipped,
        report.duplicate_edges,
        report.elapsed_ms
    );

    IngestOutcome { index, report }
}
