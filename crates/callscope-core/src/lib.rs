//! callscope core library — call-graph construction and path navigation.
//!
//! Raw per-call-site facts from a semantic analyzer flow one way through
//! this crate:
//!
//! 1. `indexer::normalizer` collapses dispatch variation onto one canonical
//!    callee,
//! 2. `indexer::validator` checks and trims required fields,
//! 3. `indexer::callgraph` builds an immutable bidirectional index,
//! 4. `query::paths` answers paths-to and reachability-from questions.
//!
//! `indexer::pipeline::ingest` runs steps 1–3 over a batch of facts, and
//! `store::snapshot` publishes each run's index for concurrent readers.

pub mod config;
pub mod errors;
pub mod indexer;
pub mod models;
pub mod query;
pub mod store;

pub use config::EngineConfig;
pub use errors::{CallScopeError, CallScopeResult};
pub use indexer::callgraph::{CallGraphBuilder, CallGraphIndex, CallGraphView, Neighbor};
pub use indexer::normalizer::SymbolNormalizer;
pub use indexer::pipeline::{ingest, IngestOutcome, IngestReport};
pub use indexer::validator::{MetadataValidator, ValidationOutcome};
pub use models::{CallEdge, CallSite, DispatchKind, RawCallFact, SymbolDescriptor};
pub use query::budget::TraversalBudget;
pub use query::guards::MaxDepth;
pub use query::paths::{PathFinder, PathsToResult, ReachabilityResult};
