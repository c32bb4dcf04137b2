//! # Edge Sequence Expansion
//!
//! `EdgeSequenceExpander` picks the edge selector for the current depth and
//! hands back a lazy concatenation of one store cursor per step.
//!
//! ## Resource Discipline
//!
//! `ExpandedEdges` holds at most one open cursor. A cursor is dropped as soon
//! as it is exhausted or fails, and the open one is dropped with the iterator
//! when the caller abandons it early. After a store error the iterator is
//! fused and yields nothing further.

use crate::graph::{EdgeSource, TraversalPath};
use crate::primitives::SEQUENCE_SEPARATOR;
use crate::selector::{EdgeSelector, EdgeStep};
use crate::sequence::DepthSequence;
use crate::{Edge, PathFilterError, VertexId};
use serde::Serialize;
use std::iter::FusedIterator;

// =============================================================================
// EXPANDER TRAIT
// =============================================================================

/// Produces the candidate edges leaving the end vertex of a path.
pub trait EdgeExpander {
    /// Lazily list the edges to follow from `path`'s end vertex.
    fn expand<'a, S, P>(&'a self, store: &'a S, path: &P) -> ExpandedEdges<'a, S>
    where
        S: EdgeSource + 'a,
        P: TraversalPath + ?Sized;
}

// =============================================================================
// EDGE SEQUENCE EXPANDER
// =============================================================================

/// Depth-indexed edge selectors with an optional one-shot initial step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeSequenceExpander {
    initial_steps: Option<EdgeSelector>,
    sequence: DepthSequence<EdgeSelector>,
}

impl EdgeSequenceExpander {
    /// Build from a comma-separated edge filter.
    ///
    /// `None` or an empty string follows every edge at every depth,
    /// regardless of `begin_sequence_at_start`.
    #[must_use]
    pub fn parse(filter: Option<&str>, begin_sequence_at_start: bool) -> Self {
        match filter.map(str::trim) {
            None | Some("") => Self::unrestricted(),
            Some(filter) => {
                Self::from_positions(filter.split(SEQUENCE_SEPARATOR), begin_sequence_at_start)
            }
        }
    }

    /// Build from pre-split per-position filters. When
    /// `begin_sequence_at_start` is false the first position becomes the
    /// initial step, used only at depth 0.
    #[must_use]
    pub fn from_positions<I, S>(positions: I, begin_sequence_at_start: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut positions = positions
            .into_iter()
            .map(|p| EdgeSelector::parse(Some(p.as_ref())))
            .peekable();

        if positions.peek().is_none() {
            return Self::unrestricted();
        }

        let initial_steps = if begin_sequence_at_start {
            None
        } else {
            positions.next()
        };
        let repeating: Vec<EdgeSelector> = positions.collect();

        if repeating.is_empty() {
            tracing::warn!(
                "edge sequence has no repeating positions; nothing is expanded past depth 0"
            );
        }

        let offset = initial_steps.is_some();
        Self {
            initial_steps,
            sequence: DepthSequence::new(repeating, offset),
        }
    }

    /// Follow every edge in both directions at every depth.
    #[must_use]
    pub fn unrestricted() -> Self {
        Self {
            initial_steps: None,
            sequence: DepthSequence::new(vec![EdgeSelector::wildcard()], false),
        }
    }

    /// The selector used at `depth`, if any.
    #[must_use]
    pub fn selector_at(&self, depth: usize) -> Option<&EdgeSelector> {
        match (&self.initial_steps, depth) {
            (Some(initial), 0) => Some(initial),
            _ => self.sequence.at(depth),
        }
    }

    /// The one-shot depth-0 selector.
    #[must_use]
    pub fn initial_steps(&self) -> Option<&EdgeSelector> {
        self.initial_steps.as_ref()
    }

    /// The repeating selectors in order.
    pub fn positions(&self) -> impl Iterator<Item = &EdgeSelector> {
        self.sequence.iter()
    }

    /// Number of repeating positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// True when nothing repeats after the initial step.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl EdgeExpander for EdgeSequenceExpander {
    fn expand<'a, S, P>(&'a self, store: &'a S, path: &P) -> ExpandedEdges<'a, S>
    where
        S: EdgeSource + 'a,
        P: TraversalPath + ?Sized,
    {
        let steps = self
            .selector_at(path.length())
            .map(EdgeSelector::steps)
            .unwrap_or_default();
        ExpandedEdges::new(store, path.end_vertex().id, steps)
    }
}

// =============================================================================
// LAZY CONCATENATION
// =============================================================================

/// Edges of several steps, pulled one cursor at a time.
pub struct ExpandedEdges<'a, S: EdgeSource + 'a> {
    store: &'a S,
    vertex: VertexId,
    steps: std::slice::Iter<'a, EdgeStep>,
    current: Option<S::Cursor<'a>>,
    failed: bool,
}

impl<'a, S: EdgeSource + 'a> ExpandedEdges<'a, S> {
    fn new(store: &'a S, vertex: VertexId, steps: &'a [EdgeStep]) -> Self {
        Self {
            store,
            vertex,
            steps: steps.iter(),
            current: None,
            failed: false,
        }
    }

    /// Whether a store cursor is currently open.
    #[must_use]
    pub fn has_open_cursor(&self) -> bool {
        self.current.is_some()
    }

    fn fail(&mut self, error: PathFilterError) -> Option<Result<Edge, PathFilterError>> {
        self.current = None;
        self.failed = true;
        Some(Err(error))
    }
}

impl<'a, S: EdgeSource + 'a> Iterator for ExpandedEdges<'a, S> {
    type Item = Result<Edge, PathFilterError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed {
                return None;
            }
            if let Some(cursor) = self.current.as_mut() {
                match cursor.next() {
                    Some(Ok(edge)) => return Some(Ok(edge)),
                    Some(Err(error)) => return self.fail(error),
                    None => self.current = None,
                }
            }

            let step = self.steps.next()?;
            match self
                .store
                .edges(self.vertex, step.edge_type.as_deref(), step.direction)
            {
                Ok(cursor) => self.current = Some(cursor),
                Err(error) => return self.fail(error),
            }
        }
    }
}

impl<'a, S: EdgeSource + 'a> FusedIterator for ExpandedEdges<'a, S> {}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Path, TaggedEdges, TaggedGraph};
    use crate::{Direction, Vertex};
    use std::cell::Cell;

    /// Store wrapper that counts open cursors.
    struct CountingStore {
        graph: TaggedGraph,
        open: Cell<usize>,
        opened: Cell<usize>,
        fail_type: Option<&'static str>,
    }

    struct CountingCursor<'a> {
        inner: TaggedEdges<'a>,
        open: &'a Cell<usize>,
    }

    impl Iterator for CountingCursor<'_> {
        type Item = Result<Edge, PathFilterError>;
        fn next(&mut self) -> Option<Self::Item> {
            self.inner.next()
        }
    }

    impl Drop for CountingCursor<'_> {
        fn drop(&mut self) {
            self.open.set(self.open.get().saturating_sub(1));
        }
    }

    impl EdgeSource for CountingStore {
        type Cursor<'a> = CountingCursor<'a>;

        fn edges<'a>(
            &'a self,
            vertex: VertexId,
            edge_type: Option<&str>,
            direction: Direction,
        ) -> Result<Self::Cursor<'a>, PathFilterError> {
            if edge_type.is_some() && edge_type == self.fail_type {
                return Err(PathFilterError::UnknownEdgeType(
                    edge_type.unwrap_or_default().to_string(),
                ));
            }
            let inner = self.graph.edges(vertex, edge_type, direction)?;
            self.open.set(self.open.get() + 1);
            self.opened.set(self.opened.get() + 1);
            Ok(CountingCursor {
                inner,
                open: &self.open,
            })
        }

        fn vertex(&self, id: VertexId) -> Result<Option<Vertex>, PathFilterError> {
            self.graph.vertex(id)
        }
    }

    /// a -KNOWS-> b, a -KNOWS-> c, d -LOVES-> a, a -WORKS_WITH-> d
    fn store(fail_type: Option<&'static str>) -> (CountingStore, Path) {
        let mut graph = TaggedGraph::new();
        let a = graph.add_vertex(["A"]);
        let b = graph.add_vertex(["B"]);
        let c = graph.add_vertex(["C"]);
        let d = graph.add_vertex(["D"]);
        graph.add_edge(a, b, "KNOWS").expect("edge");
        graph.add_edge(a, c, "KNOWS").expect("edge");
        graph.add_edge(d, a, "LOVES").expect("edge");
        graph.add_edge(a, d, "WORKS_WITH").expect("edge");
        let start = Path::start(graph.get_vertex(a).cloned().expect("a"));
        let store = CountingStore {
            graph,
            open: Cell::new(0),
            opened: Cell::new(0),
            fail_type,
        };
        (store, start)
    }

    fn types(edges: ExpandedEdges<'_, CountingStore>) -> Vec<String> {
        edges.map(|e| e.expect("edge").edge_type).collect()
    }

    struct AtDepth<'v> {
        depth: usize,
        vertex: &'v Vertex,
    }

    impl TraversalPath for AtDepth<'_> {
        fn length(&self) -> usize {
            self.depth
        }
        fn end_vertex(&self) -> &Vertex {
            self.vertex
        }
    }

    #[test]
    fn alternating_sequence_by_depth() {
        let (store, start) = store(None);
        let expander = EdgeSequenceExpander::parse(Some("KNOWS,WORKS_WITH"), true);
        for depth in 0..6 {
            let path = AtDepth {
                depth,
                vertex: start.end_vertex(),
            };
            let expected = if depth % 2 == 0 { "KNOWS" } else { "WORKS_WITH" };
            let got = types(expander.expand(&store, &path));
            assert!(!got.is_empty(), "depth {depth}");
            assert!(got.iter().all(|t| t == expected), "depth {depth}: {got:?}");
        }
    }

    #[test]
    fn steps_concatenate_in_order() {
        let (store, start) = store(None);
        let expander = EdgeSequenceExpander::parse(Some("<LOVES|KNOWS>"), true);
        assert_eq!(
            types(expander.expand(&store, &start)),
            vec!["LOVES", "KNOWS", "KNOWS"]
        );
        assert_eq!(store.open.get(), 0);
    }

    #[test]
    fn initial_step_used_once_then_offset() {
        let (store, start) = store(None);
        let expander = EdgeSequenceExpander::parse(Some("<LOVES,KNOWS>,WORKS_WITH>"), false);
        assert!(expander.initial_steps().is_some());
        assert_eq!(expander.len(), 2);

        let at = |depth| AtDepth {
            depth,
            vertex: start.end_vertex(),
        };
        assert_eq!(types(expander.expand(&store, &at(0))), vec!["LOVES"]);
        assert_eq!(types(expander.expand(&store, &at(1))), vec!["KNOWS", "KNOWS"]);
        assert_eq!(types(expander.expand(&store, &at(2))), vec!["WORKS_WITH"]);
        assert_eq!(types(expander.expand(&store, &at(3))), vec!["KNOWS", "KNOWS"]);
    }

    #[test]
    fn missing_filter_follows_everything() {
        let (store, start) = store(None);
        let expander = EdgeSequenceExpander::parse(None, false);
        assert!(expander.initial_steps().is_none());
        assert_eq!(types(expander.expand(&store, &start)).len(), 4);
    }

    #[test]
    fn single_offset_position_expands_nothing_later() {
        let (store, start) = store(None);
        let expander = EdgeSequenceExpander::parse(Some("KNOWS>"), false);
        assert!(expander.is_empty());
        assert_eq!(types(expander.expand(&store, &start)).len(), 2);
        let deeper = AtDepth {
            depth: 1,
            vertex: start.end_vertex(),
        };
        assert!(types(expander.expand(&store, &deeper)).is_empty());
        assert_eq!(store.opened.get(), 1);
    }

    #[test]
    fn at_most_one_cursor_open() {
        let (store, start) = store(None);
        let expander = EdgeSequenceExpander::parse(Some("KNOWS|LOVES|WORKS_WITH"), true);
        let mut edges = expander.expand(&store, &start);
        assert!(!edges.has_open_cursor());
        for edge in edges.by_ref() {
            edge.expect("edge");
            assert!(store.open.get() <= 1);
        }
        assert!(!edges.has_open_cursor());
        assert_eq!(store.open.get(), 0);
        assert_eq!(store.opened.get(), 3);
    }

    #[test]
    fn abandoned_expansion_releases_cursor() {
        let (store, start) = store(None);
        let expander = EdgeSequenceExpander::parse(Some("KNOWS|LOVES"), true);
        {
            let mut edges = expander.expand(&store, &start);
            edges.next().expect("first").expect("edge");
            assert_eq!(store.open.get(), 1);
        }
        assert_eq!(store.open.get(), 0);
        assert_eq!(store.opened.get(), 1);
    }

    #[test]
    fn store_error_passes_through_and_fuses() {
        let (store, start) = store(Some("LOVES"));
        let expander = EdgeSequenceExpander::parse(Some("KNOWS|LOVES|WORKS_WITH"), true);
        let results: Vec<_> = expander.expand(&store, &start).collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_ok());
        assert_eq!(
            results[2],
            Err(PathFilterError::UnknownEdgeType("LOVES".to_string()))
        );
        assert_eq!(store.open.get(), 0);
    }

    #[test]
    fn missing_vertex_is_reported() {
        let (store, _) = store(None);
        let ghost = Vertex::new(VertexId(99), ["Ghost"]);
        let expander = EdgeSequenceExpander::unrestricted();
        let mut edges = expander.expand(&store, &Path::start(ghost));
        assert_eq!(
            edges.next(),
            Some(Err(PathFilterError::VertexNotFound(VertexId(99))))
        );
        assert_eq!(edges.next(), None);
    }
}
