//! Criterion benchmarks for callscope-core.
//!
//! ## Benchmark groups
//!
//! 1. **guards** — Depth validation and clamping.
//! 2. **normalizer** — Dispatch-chain collapse at various chain lengths.
//! 3. **index_build** — Single-pass index construction from synthetic edges.
//! 4. **ingest** — Full normalize/validate/index pipeline.
//! 5. **traversal** — Paths-to and reachability on layered graphs.
//! 6. **pagerank** — Convergence on synthetic graphs.
//!
//! ## Running
//!
//! ```sh
//! cargo bench --manifest-path crates/callscope-core/Cargo.toml
//! # Run only the traversal group:
//! cargo bench --manifest-path crates/callscope-core/Cargo.toml -- traversal
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use callscope_core::indexer::callgraph::CallGraphIndex;
use callscope_core::indexer::normalizer::SymbolNormalizer;
use callscope_core::indexer::pagerank::compute_pagerank;
use callscope_core::indexer::pipeline::ingest;
use callscope_core::query::guards::{clamp_depth, MaxDepth};
use callscope_core::query::paths::PathFinder;
use callscope_core::{CallEdge, CallSite, EngineConfig, RawCallFact, SymbolDescriptor};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn method(i: usize) -> String {
    format!("Bench.Pkg{}.Type{}.Method{i}", i / 50, i / 10)
}

/// A chain `m0 -> m1 -> ...` plus fan-out: every 3rd method also calls the
/// one 5 positions ahead, and every 7th calls back 4 positions (cycles).
fn synthetic_edges(n: usize) -> Vec<CallEdge> {
    let mut edges = Vec::new();
    for i in 0..n.saturating_sub(1) {
        edges.push(CallEdge::new(
            method(i),
            method(i + 1),
            CallSite::new(format!("src/pkg{}.cs", i / 50), (i * 3 + 1) as u32),
        ));
    }
    for i in (0..n).step_by(3) {
        if i + 5 < n {
            edges.push(CallEdge::new(
                method(i),
                method(i + 5),
                CallSite::new(format!("src/pkg{}.cs", i / 50), (i * 3 + 2) as u32),
            ));
        }
    }
    for i in (4..n).step_by(7) {
        edges.push(CallEdge::new(
            method(i),
            method(i - 4),
            CallSite::new(format!("src/pkg{}.cs", i / 50), (i * 3 + 3) as u32),
        ));
    }
    edges
}

/// Layered DAG: `layers` layers of `width` methods, each method calling every
/// method in the next layer. Path count grows as width^layers.
fn layered_index(layers: usize, width: usize) -> CallGraphIndex {
    let mut edges = Vec::new();
    for layer in 0..layers.saturating_sub(1) {
        for a in 0..width {
            for b in 0..width {
                edges.push(CallEdge::new(
                    format!("L{layer}.N{a}"),
                    format!("L{}.N{b}", layer + 1),
                    CallSite::new("layers.cs", (layer * width + a) as u32 + 1),
                ));
            }
        }
    }
    CallGraphIndex::build(edges)
}

fn synthetic_facts(n: usize) -> Vec<RawCallFact> {
    synthetic_edges(n)
        .into_iter()
        .enumerate()
        .map(|(i, edge)| {
            let caller = SymbolDescriptor::from_fqn(&edge.caller_fqn);
            let base = SymbolDescriptor::from_fqn(&edge.callee_fqn);
            // Every 4th call goes through an override of its target.
            let callee = if i % 4 == 0 {
                SymbolDescriptor::from_fqn(&format!("{}Override", edge.callee_fqn)).overriding(base)
            } else {
                base
            };
            RawCallFact::new(
                caller,
                callee,
                edge.site.file_path,
                edge.site.line_number as i64,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Benchmark: Guards
// ---------------------------------------------------------------------------

fn bench_guards(c: &mut Criterion) {
    let mut group = c.benchmark_group("guards");

    group.bench_function("clamp_depth", |b| {
        b.iter(|| clamp_depth(black_box(40), black_box(32)))
    });
    group.bench_function("max_depth_new", |b| {
        b.iter(|| MaxDepth::new(black_box(5)))
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: Normalizer
// ---------------------------------------------------------------------------

fn bench_normalizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalizer");
    let normalizer = SymbolNormalizer::default();

    for &chain in &[0usize, 4, 16] {
        let mut callee = SymbolDescriptor::from_fqn("Bench.Root.Run");
        for depth in 1..=chain {
            callee = SymbolDescriptor::from_fqn(&format!("Bench.Derived{depth}.Run")).overriding(callee);
        }
        group.bench_with_input(BenchmarkId::new("override_chain", chain), &callee, |b, callee| {
            b.iter(|| normalizer.normalize(black_box(callee)).unwrap())
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: Index build
// ---------------------------------------------------------------------------

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for &n in &[1_000usize, 10_000, 50_000] {
        let edges = synthetic_edges(n);
        group.bench_with_input(BenchmarkId::new("build", n), &edges, |b, edges| {
            b.iter_with_setup(|| edges.clone(), |edges| black_box(CallGraphIndex::build(edges)))
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: Ingest
// ---------------------------------------------------------------------------

fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");
    let config = EngineConfig::default();

    for &n in &[1_000usize, 10_000] {
        let facts = synthetic_facts(n);
        group.bench_with_input(BenchmarkId::new("ingest", n), &facts, |b, facts| {
            b.iter(|| black_box(ingest(facts, &config)))
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: Traversal
// ---------------------------------------------------------------------------

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");

    let chain = CallGraphIndex::build(synthetic_edges(10_000));
    let finder = PathFinder::new(&chain);
    let depth = MaxDepth::new(6).unwrap();
    group.bench_function("paths_from_chain_depth_6", |b| {
        b.iter(|| black_box(finder.find_paths_from(black_box(&method(0)), depth)))
    });
    group.bench_function("paths_to_chain_depth_6", |b| {
        b.iter(|| black_box(finder.find_paths_to(black_box(&method(5_000)), depth)))
    });

    for &width in &[2usize, 4, 6] {
        let layered = layered_index(5, width);
        let target = "L4.N0".to_string();
        group.bench_with_input(
            BenchmarkId::new("paths_to_layered", width),
            &layered,
            |b, index| {
                let finder = PathFinder::new(index);
                b.iter(|| black_box(finder.find_paths_to(&target, MaxDepth::new(5).unwrap())))
            },
        );
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: PageRank
// ---------------------------------------------------------------------------

fn bench_pagerank(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagerank");
    group.measurement_time(std::time::Duration::from_secs(10));

    for &n in &[100usize, 1_000, 10_000] {
        let index = CallGraphIndex::build(synthetic_edges(n));
        group.bench_with_input(BenchmarkId::new("compute", n), &index, |b, index| {
            b.iter(|| black_box(compute_pagerank(index, 0.85, 1e-6)))
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Register all benchmark groups
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    bench_guards,
    bench_normalizer,
    bench_index_build,
    bench_ingest,
    bench_traversal,
    bench_pagerank,
);
criterion_main!(benches);
