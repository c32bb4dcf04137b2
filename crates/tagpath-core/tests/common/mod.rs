//! Shared fixtures for the scenario tests: a small movie graph and a
//! breadth-first driver standing in for the traversal engine.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tagpath_core::{
    CompiledTraversal, EdgeExpander, EdgeSource, Path, PathEvaluator, PathFilterError,
    TaggedGraph, TraversalPath, TraversalQuery, Uniqueness, VertexId,
};

// =============================================================================
// MOVIE GRAPH
// =============================================================================

pub struct Movies {
    pub graph: TaggedGraph,
    names: BTreeMap<&'static str, VertexId>,
}

impl Movies {
    /// Actors, directors and the films that connect them.
    ///
    /// ```text
    /// Clint  -ACTED_IN->   Unforgiven, TheGoodTheBadTheUgly
    /// Clint  -DIRECTED->   Unforgiven
    /// Gene   -ACTED_IN->   Unforgiven, TheReplacements
    /// Eli    -ACTED_IN->   TheGoodTheBadTheUgly
    /// Keanu  -ACTED_IN->   TheReplacements, TheMatrix
    /// Keanu  -KNOWS->      Hugo
    /// Hugo   -ACTED_IN->   TheMatrix
    /// Lilly  -DIRECTED->   TheMatrix
    /// ```
    pub fn new() -> Self {
        let mut graph = TaggedGraph::new();
        let mut names = BTreeMap::new();

        let vertices: [(&'static str, &[&str]); 10] = [
            ("Clint", &["Person", "Actor", "Director"]),
            ("Gene", &["Person", "Actor"]),
            ("Eli", &["Person", "Actor"]),
            ("Keanu", &["Person", "Actor"]),
            ("Hugo", &["Person", "Actor"]),
            ("Lilly", &["Person", "Director"]),
            ("Unforgiven", &["Movie", "Western"]),
            ("TheGoodTheBadTheUgly", &["Movie", "Western"]),
            ("TheReplacements", &["Movie"]),
            ("TheMatrix", &["Movie"]),
        ];
        for (name, tags) in vertices {
            names.insert(name, graph.add_vertex(tags.iter().copied()));
        }

        let edges = [
            ("Clint", "Unforgiven", "ACTED_IN"),
            ("Clint", "Unforgiven", "DIRECTED"),
            ("Gene", "Unforgiven", "ACTED_IN"),
            ("Clint", "TheGoodTheBadTheUgly", "ACTED_IN"),
            ("Eli", "TheGoodTheBadTheUgly", "ACTED_IN"),
            ("Gene", "TheReplacements", "ACTED_IN"),
            ("Keanu", "TheReplacements", "ACTED_IN"),
            ("Keanu", "TheMatrix", "ACTED_IN"),
            ("Hugo", "TheMatrix", "ACTED_IN"),
            ("Lilly", "TheMatrix", "DIRECTED"),
            ("Keanu", "Hugo", "KNOWS"),
        ];
        for (from, to, edge_type) in edges {
            graph
                .add_edge(names[from], names[to], edge_type)
                .expect("fixture edge");
        }

        Self { graph, names }
    }

    pub fn id(&self, name: &str) -> VertexId {
        self.names[name]
    }

    pub fn ids(&self, names: &[&str]) -> Vec<VertexId> {
        names.iter().map(|n| self.id(n)).collect()
    }

    fn name(&self, id: VertexId) -> &'static str {
        self.names
            .iter()
            .find_map(|(name, v)| (*v == id).then_some(*name))
            .expect("fixture vertex")
    }

    /// Compile `query`, run it from `start` and return the names of the
    /// included end vertices.
    pub fn run(&self, start: &str, query: &TraversalQuery) -> BTreeSet<&'static str> {
        let compiled = query.compile().expect("compile");
        let paths = traverse(&self.graph, self.id(start), &compiled).expect("traverse");
        paths
            .iter()
            .map(|p| self.name(p.end_vertex().id))
            .collect()
    }
}

pub fn names(list: &[&'static str]) -> BTreeSet<&'static str> {
    list.iter().copied().collect()
}

// =============================================================================
// BREADTH-FIRST DRIVER
// =============================================================================

/// Minimal engine: breadth-first, honours `maxLevel`, `minLevel`, `limit`
/// and the two uniqueness modes the scenarios use.
pub fn traverse(
    graph: &TaggedGraph,
    start: VertexId,
    compiled: &CompiledTraversal,
) -> Result<Vec<Path>, PathFilterError> {
    let bounds = compiled.bounds();
    let start_vertex = graph
        .vertex(start)?
        .ok_or(PathFilterError::VertexNotFound(start))?;

    let mut visited = BTreeSet::from([start]);
    let mut queue = VecDeque::from([Path::start(start_vertex)]);
    let mut results = Vec::new();

    while let Some(path) = queue.pop_front() {
        let evaluation = compiled.evaluator().evaluate(&path);
        if evaluation.includes() && path.length() >= bounds.min_level {
            results.push(path.clone());
            if bounds.limit.is_some_and(|limit| results.len() >= limit) {
                break;
            }
        }
        if !evaluation.continues() || bounds.max_level.is_some_and(|max| path.length() >= max) {
            continue;
        }

        let here = path.end_vertex().id;
        for edge in compiled.expander().expand(graph, &path) {
            let edge = edge?;
            if path.edges().any(|e| e.id == edge.id) {
                continue;
            }
            let Some(next) = edge.other(here) else {
                continue;
            };
            if bounds.uniqueness == Uniqueness::NodeGlobal && !visited.insert(next) {
                continue;
            }
            let vertex = graph.vertex(next)?.ok_or(PathFilterError::VertexNotFound(next))?;
            queue.push_back(path.extended(edge, vertex));
        }
    }

    Ok(results)
}
