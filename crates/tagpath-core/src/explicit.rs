//! # Explicit-Set Evaluators
//!
//! Decision callbacks driven by caller-supplied vertex sets rather than tags.
//!
//! The start vertex is exempt when `filter_start_vertex` is false. The
//! whitelist and blacklist ignore `min_level`; the end/terminator combinator
//! excludes everything below it.

use crate::evaluator::PathEvaluator;
use crate::graph::TraversalPath;
use crate::{Evaluation, VertexId};
use serde::Serialize;
use std::collections::BTreeSet;

fn is_exempt_start<P: TraversalPath + ?Sized>(path: &P, filter_start_vertex: bool) -> bool {
    path.length() == 0 && !filter_start_vertex
}

// =============================================================================
// WHITELIST
// =============================================================================

/// Only paths ending on a listed vertex are included or expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhitelistEvaluator {
    vertices: BTreeSet<VertexId>,
    filter_start_vertex: bool,
}

impl WhitelistEvaluator {
    #[must_use]
    pub fn new<I: IntoIterator<Item = VertexId>>(vertices: I, filter_start_vertex: bool) -> Self {
        Self {
            vertices: vertices.into_iter().collect(),
            filter_start_vertex,
        }
    }

    /// Number of listed vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True when no vertex is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl PathEvaluator for WhitelistEvaluator {
    fn evaluate<P: TraversalPath + ?Sized>(&self, path: &P) -> Evaluation {
        if is_exempt_start(path, self.filter_start_vertex)
            || self.vertices.contains(&path.end_vertex().id)
        {
            Evaluation::IncludeAndContinue
        } else {
            Evaluation::ExcludeAndPrune
        }
    }
}

// =============================================================================
// BLACKLIST
// =============================================================================

/// Paths ending on a listed vertex are excluded and pruned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlacklistEvaluator {
    vertices: BTreeSet<VertexId>,
    filter_start_vertex: bool,
}

impl BlacklistEvaluator {
    #[must_use]
    pub fn new<I: IntoIterator<Item = VertexId>>(vertices: I, filter_start_vertex: bool) -> Self {
        Self {
            vertices: vertices.into_iter().collect(),
            filter_start_vertex,
        }
    }

    /// Number of listed vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True when no vertex is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl PathEvaluator for BlacklistEvaluator {
    fn evaluate<P: TraversalPath + ?Sized>(&self, path: &P) -> Evaluation {
        if !is_exempt_start(path, self.filter_start_vertex)
            && self.vertices.contains(&path.end_vertex().id)
        {
            Evaluation::ExcludeAndPrune
        } else {
            Evaluation::IncludeAndContinue
        }
    }
}

// =============================================================================
// END / TERMINATOR
// =============================================================================

/// A membership policy over a vertex set, evaluated on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum VertexSetPolicy {
    /// Include paths ending in the set; never prune.
    IncludeWhereEndIs(BTreeSet<VertexId>),
    /// Include and prune paths ending in the set; exclude the rest but keep
    /// expanding.
    PruneWhereEndIs(BTreeSet<VertexId>),
}

impl VertexSetPolicy {
    fn evaluate<P: TraversalPath + ?Sized>(&self, path: &P) -> Evaluation {
        let id = path.end_vertex().id;
        match self {
            Self::IncludeWhereEndIs(set) => Evaluation::of(set.contains(&id), true),
            Self::PruneWhereEndIs(set) => {
                let hit = set.contains(&id);
                Evaluation::of(hit, !hit)
            }
        }
    }
}

/// Reconciles an end-vertex policy with a terminator policy.
///
/// Inclusion is the OR of both policies' include signals. Continuation is
/// decided by the terminator policy alone; the end-vertex policy never
/// stops expansion. Below `min_level`, and at an exempt start vertex, the
/// result is always exclude-and-continue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndTerminatorEvaluator {
    end_vertices: Option<VertexSetPolicy>,
    terminators: Option<VertexSetPolicy>,
    filter_start_vertex: bool,
    min_level: usize,
}

impl EndTerminatorEvaluator {
    /// Build from explicit end and terminator vertices. Returns `None` when
    /// both lists are empty.
    #[must_use]
    pub fn from_sets<E, T>(
        end_vertices: E,
        terminators: T,
        filter_start_vertex: bool,
        min_level: usize,
    ) -> Option<Self>
    where
        E: IntoIterator<Item = VertexId>,
        T: IntoIterator<Item = VertexId>,
    {
        let end: BTreeSet<VertexId> = end_vertices.into_iter().collect();
        let term: BTreeSet<VertexId> = terminators.into_iter().collect();
        let end = (!end.is_empty()).then_some(VertexSetPolicy::IncludeWhereEndIs(end));
        let term = (!term.is_empty()).then_some(VertexSetPolicy::PruneWhereEndIs(term));
        if end.is_none() && term.is_none() {
            return None;
        }
        Some(Self::new(end, term, filter_start_vertex, min_level))
    }

    /// Build from two independently sourced policies.
    #[must_use]
    pub fn new(
        end_vertices: Option<VertexSetPolicy>,
        terminators: Option<VertexSetPolicy>,
        filter_start_vertex: bool,
        min_level: usize,
    ) -> Self {
        Self {
            end_vertices,
            terminators,
            filter_start_vertex,
            min_level,
        }
    }
}

impl PathEvaluator for EndTerminatorEvaluator {
    fn evaluate<P: TraversalPath + ?Sized>(&self, path: &P) -> Evaluation {
        if is_exempt_start(path, self.filter_start_vertex) || path.length() < self.min_level {
            return Evaluation::ExcludeAndContinue;
        }

        let end = self.end_vertices.as_ref().map(|p| p.evaluate(path));
        let term = self.terminators.as_ref().map(|p| p.evaluate(path));

        let includes = end.is_some_and(Evaluation::includes) || term.is_some_and(Evaluation::includes);
        let continues = term.is_none_or(Evaluation::continues);
        Evaluation::of(includes, continues)
    }
}

// =============================================================================
// TESTS
// =============================================================================
