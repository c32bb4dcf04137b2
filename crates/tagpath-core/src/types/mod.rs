//! # Core Type Definitions
//!
//! This module contains the shared vocabulary of the path-filter compiler:
//! - Graph identifiers (`VertexId`, `EdgeId`)
//! - Graph elements as seen by filters (`Vertex`, `Edge`)
//! - Edge direction (`Direction`)
//! - The per-path decision (`Evaluation`)
//! - Error types (`PathFilterError`)
//!
//! ## Determinism Guarantees
//!
//! All collections in this module are `BTreeSet`-based so that tag sets
//! iterate in a stable order and compare structurally.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

// =============================================================================
// GRAPH IDENTIFIERS
// =============================================================================

/// Identity of a vertex in the underlying graph store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(pub u64);

/// Identity of an edge in the underlying graph store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub u64);

// =============================================================================
// VERTEX
// =============================================================================

/// A vertex together with its tag set.
///
/// Tags are the only vertex data the filters look at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    /// The vertex identity.
    pub id: VertexId,
    /// Zero or more tags attached to the vertex.
    pub tags: BTreeSet<String>,
}

impl Vertex {
    /// Create a vertex with the given tags.
    #[must_use]
    pub fn new<I, S>(id: VertexId, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether the vertex carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

// =============================================================================
// EDGE
// =============================================================================

/// A typed, directed edge as returned by an edge cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// The edge identity.
    pub id: EdgeId,
    /// The edge type name.
    pub edge_type: String,
    /// Source vertex.
    pub from: VertexId,
    /// Target vertex.
    pub to: VertexId,
}

impl Edge {
    /// The vertex on the other side of this edge, seen from `vertex`.
    ///
    /// Returns `None` if `vertex` is not an endpoint of the edge.
    #[must_use]
    pub fn other(&self, vertex: VertexId) -> Option<VertexId> {
        if self.from == vertex {
            Some(self.to)
        } else if self.to == vertex {
            Some(self.from)
        } else {
            None
        }
    }
}

// =============================================================================
// DIRECTION
// =============================================================================

/// Which edges to follow relative to the current vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Edges pointing into the current vertex.
    Incoming,
    /// Edges leaving the current vertex.
    Outgoing,
    /// Edges in either direction.
    Both,
}

impl Direction {
    /// Whether an edge traversed from `vertex` satisfies this direction.
    #[must_use]
    pub fn admits(self, edge: &Edge, vertex: VertexId) -> bool {
        match self {
            Self::Outgoing => edge.from == vertex,
            Self::Incoming => edge.to == vertex,
            Self::Both => edge.from == vertex || edge.to == vertex,
        }
    }
}

// =============================================================================
// EVALUATION
// =============================================================================

/// The decision returned for one path: whether to put it in the result set
/// and whether to keep expanding beyond its end vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Evaluation {
    IncludeAndContinue,
    IncludeAndPrune,
    ExcludeAndContinue,
    ExcludeAndPrune,
}

impl Evaluation {
    /// Build an evaluation from its two components.
    #[must_use]
    pub const fn of(includes: bool, continues: bool) -> Self {
        match (includes, continues) {
            (true, true) => Self::IncludeAndContinue,
            (true, false) => Self::IncludeAndPrune,
            (false, true) => Self::ExcludeAndContinue,
            (false, false) => Self::ExcludeAndPrune,
        }
    }

    /// Whether the path goes into the result set.
    #[must_use]
    pub const fn includes(self) -> bool {
        matches!(self, Self::IncludeAndContinue | Self::IncludeAndPrune)
    }

    /// Whether traversal proceeds beyond the path's end vertex.
    #[must_use]
    pub const fn continues(self) -> bool {
        matches!(self, Self::IncludeAndContinue | Self::ExcludeAndContinue)
    }

    /// Conjunction of two decisions: include only if both include,
    /// continue only if both continue.
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        Self::of(
            self.includes() && other.includes(),
            self.continues() && other.continues(),
        )
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can escape the path-filter compiler.
///
/// Filter strings never produce errors; malformed input degrades to
/// permissive matchers. Errors come from the graph store during lazy edge
/// retrieval, or from traversal-request decoding and validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathFilterError {
    /// The graph store failed while producing edges.
    #[error("Graph store error: {0}")]
    Store(String),

    /// The graph store does not know the requested edge type.
    #[error("Unknown edge type: {0}")]
    UnknownEdgeType(String),

    /// The requested vertex does not exist in the graph store.
    #[error("Vertex not found: {0:?}")]
    VertexNotFound(VertexId),

    /// A traversal request is inconsistent.
    #[error("Invalid traversal request: {0}")]
    InvalidConfig(String),

    /// A traversal request could not be decoded.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluation_components_round_trip() {
        for includes in [true, false] {
            for continues in [true, false] {
                let evaluation = Evaluation::of(includes, continues);
                assert_eq!(evaluation.includes(), includes);
                assert_eq!(evaluation.continues(), continues);
            }
        }
    }

    #[test]
    fn evaluation_and_is_conjunctive() {
        assert_eq!(
            Evaluation::IncludeAndContinue.and(Evaluation::ExcludeAndContinue),
            Evaluation::ExcludeAndContinue
        );
        assert_eq!(
            Evaluation::IncludeAndPrune.and(Evaluation::ExcludeAndContinue),
            Evaluation::ExcludeAndPrune
        );
        assert_eq!(
            Evaluation::IncludeAndContinue.and(Evaluation::IncludeAndContinue),
            Evaluation::IncludeAndContinue
        );
    }

    #[test]
    fn edge_other_endpoint() {
        let edge = Edge {
            id: EdgeId(1),
            edge_type: "KNOWS".to_string(),
            from: VertexId(1),
            to: VertexId(2),
        };
        assert_eq!(edge.other(VertexId(1)), Some(VertexId(2)));
        assert_eq!(edge.other(VertexId(2)), Some(VertexId(1)));
        assert_eq!(edge.other(VertexId(3)), None);
    }

    #[test]
    fn direction_admits() {
        let edge = Edge {
            id: EdgeId(1),
            edge_type: "KNOWS".to_string(),
            from: VertexId(1),
            to: VertexId(2),
        };
        assert!(Direction::Outgoing.admits(&edge, VertexId(1)));
        assert!(!Direction::Outgoing.admits(&edge, VertexId(2)));
        assert!(Direction::Incoming.admits(&edge, VertexId(2)));
        assert!(Direction::Both.admits(&edge, VertexId(2)));
    }

    #[test]
    fn vertex_tags_deduplicate() {
        let vertex = Vertex::new(VertexId(7), ["Person", "Actor", "Person"]);
        assert_eq!(vertex.tags.len(), 2);
        assert!(vertex.has_tag("Actor"));
        assert!(!vertex.has_tag("Movie"));
    }
}
