//! # Filter Benchmarks
//!
//! Performance benchmarks for filter compilation, per-path evaluation and
//! edge expansion.
//!
//! Run with: `cargo bench -p tagpath-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tagpath_core::{
    EdgeExpander, EdgeSequenceExpander, Path, PathEvaluator, TaggedGraph, TraversalPath,
    TraversalQuery, Vertex, VertexId,
};

struct Probe {
    depth: usize,
    vertex: Vertex,
}

impl TraversalPath for Probe {
    fn length(&self) -> usize {
        self.depth
    }

    fn end_vertex(&self) -> &Vertex {
        &self.vertex
    }
}

/// A filter with `groups` comma-separated positions, each with a few
/// alternatives of every prefix.
fn tag_filter(groups: usize) -> String {
    (0..groups)
        .map(|i| format!("+Person{i}|Movie{i}:Western|-Banned{i}|>End{i}|/Stop{i}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// A hub with `size` spokes, alternating edge types.
fn create_star_graph(size: usize) -> (TaggedGraph, VertexId) {
    let mut graph = TaggedGraph::new();
    let hub = graph.add_vertex(["Hub"]);
    for i in 0..size {
        let spoke = graph.add_vertex(["Spoke"]);
        let edge_type = if i % 2 == 0 { "KNOWS" } else { "LOVES" };
        graph.add_edge(hub, spoke, edge_type).expect("edge");
    }
    (graph, hub)
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for groups in [1usize, 8, 64] {
        let mut query = TraversalQuery::new()
            .with_label_filter(tag_filter(groups))
            .with_relationship_filter("KNOWS>|<LOVES,`WORKS WITH`,ACTED_IN");
        query.blacklist_nodes = (0..groups as u64).map(VertexId).collect();
        query.end_nodes = vec![VertexId(1)];

        group.bench_with_input(BenchmarkId::from_parameter(groups), &query, |b, query| {
            b.iter(|| black_box(query.compile().expect("compile")));
        });
    }

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for groups in [1usize, 8, 64] {
        let compiled = TraversalQuery::new()
            .with_label_filter(tag_filter(groups))
            .compile()
            .expect("compile");
        let probes: Vec<Probe> = (0..groups)
            .map(|depth| Probe {
                depth,
                vertex: Vertex::new(
                    VertexId(depth as u64),
                    [format!("Movie{depth}"), "Western".to_string()],
                ),
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(groups), &probes, |b, probes| {
            b.iter(|| {
                for probe in probes {
                    black_box(compiled.evaluator().evaluate(probe));
                }
            });
        });
    }

    group.finish();
}

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand");

    for size in [10usize, 100, 1000] {
        let (graph, hub) = create_star_graph(size);
        let start = Path::start(graph.get_vertex(hub).cloned().expect("hub"));
        let expander = EdgeSequenceExpander::parse(Some("KNOWS>|LOVES>"), true);

        group.bench_with_input(BenchmarkId::from_parameter(size), &start, |b, start| {
            b.iter(|| black_box(expander.expand(&graph, start).count()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compile, bench_evaluate, bench_expand);
criterion_main!(benches);
