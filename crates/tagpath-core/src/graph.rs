//! # Graph Seam
//!
//! The boundary between the filter compiler and its collaborators:
//! - `TraversalPath`: what an evaluator sees of a path
//! - `EdgeSource`: how an expander pulls edges out of a graph store
//!
//! `TaggedGraph` is a small deterministic in-memory `EdgeSource` used by
//! tests and benchmarks. All data structures use `BTreeMap` for
//! deterministic ordering.

use crate::{Direction, Edge, EdgeId, PathFilterError, Vertex, VertexId};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// TRAVERSAL PATH
// =============================================================================

/// A path produced by the traversal engine.
pub trait TraversalPath {
    /// Number of edges from the start vertex to the end vertex.
    fn length(&self) -> usize;

    /// The last vertex of the path (the start vertex when `length() == 0`).
    fn end_vertex(&self) -> &Vertex;
}

/// An owned path: a start vertex followed by `(edge, vertex)` hops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    start: Vertex,
    hops: Vec<(Edge, Vertex)>,
}

impl Path {
    /// A zero-length path at `start`.
    #[must_use]
    pub fn start(start: Vertex) -> Self {
        Self {
            start,
            hops: Vec::new(),
        }
    }

    /// A copy of this path extended by one hop.
    #[must_use]
    pub fn extended(&self, edge: Edge, next: Vertex) -> Self {
        let mut hops = self.hops.clone();
        hops.push((edge, next));
        Self {
            start: self.start.clone(),
            hops,
        }
    }

    /// The start vertex.
    #[must_use]
    pub fn start_vertex(&self) -> &Vertex {
        &self.start
    }

    /// All vertices, start first.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        std::iter::once(&self.start).chain(self.hops.iter().map(|(_, v)| v))
    }

    /// All edges in traversal order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.hops.iter().map(|(e, _)| e)
    }
}

impl TraversalPath for Path {
    fn length(&self) -> usize {
        self.hops.len()
    }

    fn end_vertex(&self) -> &Vertex {
        self.hops.last().map_or(&self.start, |(_, v)| v)
    }
}

// =============================================================================
// EDGE SOURCE TRAIT
// =============================================================================

/// A graph store that hands out lazy edge cursors.
///
/// A cursor holds whatever storage resource the store needs and releases
/// it when dropped, whether exhausted or abandoned.
pub trait EdgeSource {
    /// Lazy sequence of edges touching one vertex.
    type Cursor<'a>: Iterator<Item = Result<Edge, PathFilterError>>
    where
        Self: 'a;

    /// Open a cursor over the edges of `vertex` of type `edge_type`
    /// (`None` = any type) in `direction`.
    fn edges<'a>(
        &'a self,
        vertex: VertexId,
        edge_type: Option<&str>,
        direction: Direction,
    ) -> Result<Self::Cursor<'a>, PathFilterError>;

    /// Fetch a vertex with its tags.
    fn vertex(&self, id: VertexId) -> Result<Option<Vertex>, PathFilterError>;
}

// =============================================================================
// IN-MEMORY IMPLEMENTATION
// =============================================================================

/// In-memory graph of tagged vertices and typed directed edges.
#[derive(Debug, Clone, Default)]
pub struct TaggedGraph {
    /// Vertex storage: VertexId -> Vertex
    vertices: BTreeMap<VertexId, Vertex>,

    /// Edge storage: EdgeId -> Edge
    edges: BTreeMap<EdgeId, Edge>,

    /// Adjacency: vertex -> edges leaving it, in insertion order
    outgoing: BTreeMap<VertexId, Vec<EdgeId>>,

    /// Adjacency: vertex -> edges entering it, in insertion order
    incoming: BTreeMap<VertexId, Vec<EdgeId>>,

    /// Every edge type seen so far
    edge_types: BTreeSet<String>,

    next_vertex_id: u64,
    next_edge_id: u64,
}

impl TaggedGraph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vertex with the given tags and return its id.
    pub fn add_vertex<I, S>(&mut self, tags: I) -> VertexId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = VertexId(self.next_vertex_id);
        self.next_vertex_id = self.next_vertex_id.saturating_add(1);
        self.vertices.insert(id, Vertex::new(id, tags));
        id
    }

    /// Insert a directed edge `from -> to` of type `edge_type`.
    pub fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        edge_type: &str,
    ) -> Result<EdgeId, PathFilterError> {
        for endpoint in [from, to] {
            if !self.vertices.contains_key(&endpoint) {
                return Err(PathFilterError::VertexNotFound(endpoint));
            }
        }

        let id = EdgeId(self.next_edge_id);
        self.next_edge_id = self.next_edge_id.saturating_add(1);
        self.edges.insert(
            id,
            Edge {
                id,
                edge_type: edge_type.to_string(),
                from,
                to,
            },
        );
        self.outgoing.entry(from).or_default().push(id);
        self.incoming.entry(to).or_default().push(id);
        self.edge_types.insert(edge_type.to_string());
        Ok(id)
    }

    /// Get a vertex by id.
    #[must_use]
    pub fn get_vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// Total number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Total number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edge types present in the graph, in sorted order.
    pub fn edge_types(&self) -> impl Iterator<Item = &str> {
        self.edge_types.iter().map(String::as_str)
    }
}

fn adjacency(map: &BTreeMap<VertexId, Vec<EdgeId>>, vertex: VertexId) -> &[EdgeId] {
    map.get(&vertex).map(Vec::as_slice).unwrap_or(&[])
}

/// Cursor over the edges of one vertex in a `TaggedGraph`.
#[derive(Debug)]
pub struct TaggedEdges<'a> {
    graph: &'a TaggedGraph,
    outgoing: std::slice::Iter<'a, EdgeId>,
    incoming: std::slice::Iter<'a, EdgeId>,
    edge_type: Option<String>,
    skip_loops_on_incoming: bool,
}

impl Iterator for TaggedEdges<'_> {
    type Item = Result<Edge, PathFilterError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (id, from_incoming) = match self.outgoing.next() {
                Some(id) => (id, false),
                None => (self.incoming.next()?, true),
            };
            let Some(edge) = self.graph.edges.get(id) else {
                return Some(Err(PathFilterError::Store(format!(
                    "dangling adjacency entry {:?}",
                    id
                ))));
            };
            // A self-loop sits in both lists; report it once for `Both`.
            if from_incoming && self.skip_loops_on_incoming && edge.from == edge.to {
                continue;
            }
            if self
                .edge_type
                .as_deref()
                .is_some_and(|t| t != edge.edge_type)
            {
                continue;
            }
            return Some(Ok(edge.clone()));
        }
    }
}

impl EdgeSource for TaggedGraph {
    type Cursor<'a> = TaggedEdges<'a>;

    fn edges<'a>(
        &'a self,
        vertex: VertexId,
        edge_type: Option<&str>,
        direction: Direction,
    ) -> Result<Self::Cursor<'a>, PathFilterError> {
        if !self.vertices.contains_key(&vertex) {
            return Err(PathFilterError::VertexNotFound(vertex));
        }

        // An edge type the graph has never seen simply has no edges.
        let known = edge_type.is_none_or(|t| self.edge_types.contains(t));
        let (use_out, use_in) = match direction {
            _ if !known => (false, false),
            Direction::Outgoing => (true, false),
            Direction::Incoming => (false, true),
            Direction::Both => (true, true),
        };

        let outgoing = if use_out {
            adjacency(&self.outgoing, vertex)
        } else {
            &[]
        };
        let incoming = if use_in {
            adjacency(&self.incoming, vertex)
        } else {
            &[]
        };

        Ok(TaggedEdges {
            graph: self,
            outgoing: outgoing.iter(),
            incoming: incoming.iter(),
            edge_type: edge_type.map(str::to_string),
            skip_loops_on_incoming: use_out,
        })
    }

    fn vertex(&self, id: VertexId) -> Result<Option<Vertex>, PathFilterError> {
        Ok(self.vertices.get(&id).cloned())
    }
}

// =============================================================================
// TESTS
// =============================================================================
