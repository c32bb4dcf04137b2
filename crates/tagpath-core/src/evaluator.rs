//! # Path Evaluators
//!
//! The per-path decision callbacks plugged into the traversal engine.
//!
//! - `TagSequenceEvaluator` applies a depth-indexed sequence of
//!   `TagMatcherGroup`s to the end vertex of each path.
//! - `Evaluator` is the closed set of evaluator kinds the compiler emits,
//!   including the explicit-set evaluators and their conjunction.
//!
//! Every evaluator is immutable once built and can be shared across
//! concurrent traversals.

use crate::explicit::{BlacklistEvaluator, EndTerminatorEvaluator, WhitelistEvaluator};
use crate::graph::TraversalPath;
use crate::matcher::TagMatcherGroup;
use crate::primitives::SEQUENCE_SEPARATOR;
use crate::sequence::DepthSequence;
use crate::Evaluation;
use serde::Serialize;

// =============================================================================
// EVALUATOR TRAIT
// =============================================================================

/// Decides, for each path the engine produces, whether to include it and
/// whether to expand beyond it.
pub trait PathEvaluator {
    /// Evaluate one path.
    fn evaluate<P: TraversalPath + ?Sized>(&self, path: &P) -> Evaluation;
}

// =============================================================================
// SEQUENCE OPTIONS
// =============================================================================

/// Flags shared by the sequence-based evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequenceOptions {
    /// Apply the filter to the start vertex as well.
    pub filter_start_vertex: bool,
    /// Position 0 of the sequence applies to the start vertex; otherwise it
    /// applies to the first vertex after the start.
    pub begin_sequence_at_start: bool,
    /// Depth below which nothing is included.
    pub min_level: usize,
}

impl Default for SequenceOptions {
    fn default() -> Self {
        Self {
            filter_start_vertex: false,
            begin_sequence_at_start: true,
            min_level: 0,
        }
    }
}

// =============================================================================
// TAG SEQUENCE EVALUATOR
// =============================================================================

/// Depth-indexed sequence of tag filter groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSequenceEvaluator {
    groups: DepthSequence<TagMatcherGroup>,
    options: SequenceOptions,
    start_evaluation: Evaluation,
}

impl TagSequenceEvaluator {
    /// Build from a comma-separated tag filter. `None` or an empty string
    /// yields a single unrestricted group.
    #[must_use]
    pub fn parse(filter: Option<&str>, options: SequenceOptions) -> Self {
        let filter = filter.unwrap_or_default();
        Self::from_groups(filter.split(SEQUENCE_SEPARATOR), options)
    }

    /// Build from pre-split per-depth filter strings.
    #[must_use]
    pub fn from_groups<I, S>(filters: I, options: SequenceOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut groups: Vec<TagMatcherGroup> = filters
            .into_iter()
            .map(|f| TagMatcherGroup::parse(f.as_ref().trim()))
            .collect();
        if groups.is_empty() {
            groups.push(TagMatcherGroup::new());
        }

        let mut groups = DepthSequence::new(groups, !options.begin_sequence_at_start);

        // One end-vertex or terminator token anywhere puts the whole
        // sequence in end-vertices-only mode.
        let end_vertices_only = groups.iter().any(TagMatcherGroup::is_end_vertices_only);
        if end_vertices_only {
            for group in groups.iter_mut() {
                group.set_end_vertices_only(true);
            }
        }

        let start_evaluation = if end_vertices_only {
            Evaluation::ExcludeAndContinue
        } else {
            Evaluation::IncludeAndContinue
        };

        Self {
            groups,
            options,
            start_evaluation,
        }
    }

    /// Number of groups before the sequence repeats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Always false; an evaluator holds at least one group.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether every group is in end-vertices-only mode.
    #[must_use]
    pub fn is_end_vertices_only(&self) -> bool {
        self.groups.iter().any(TagMatcherGroup::is_end_vertices_only)
    }

    /// The groups in sequence order.
    pub fn groups(&self) -> impl Iterator<Item = &TagMatcherGroup> {
        self.groups.iter()
    }

    /// The flags this evaluator was built with.
    #[must_use]
    pub fn options(&self) -> SequenceOptions {
        self.options
    }
}

impl PathEvaluator for TagSequenceEvaluator {
    fn evaluate<P: TraversalPath + ?Sized>(&self, path: &P) -> Evaluation {
        let depth = path.length();

        // The start vertex is exempt unless it is filtered and the sequence
        // begins on it.
        if depth == 0
            && (!self.options.filter_start_vertex || !self.options.begin_sequence_at_start)
        {
            return self.start_evaluation;
        }

        let Some(group) = self.groups.at(depth) else {
            return self.start_evaluation;
        };
        let vertex = path.end_vertex();
        let evaluation = group.evaluate(vertex, depth < self.options.min_level);
        tracing::trace!(depth, vertex = vertex.id.0, ?evaluation, "tag sequence decision");
        evaluation
    }
}

// =============================================================================
// CLOSED EVALUATOR SET
// =============================================================================

/// Every evaluator kind the compiler produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluator {
    /// Tag filter sequence.
    TagSequence(TagSequenceEvaluator),
    /// Explicit vertex whitelist.
    Whitelist(WhitelistEvaluator),
    /// Explicit vertex blacklist.
    Blacklist(BlacklistEvaluator),
    /// Explicit end and terminator vertices.
    EndAndTerminator(EndTerminatorEvaluator),
    /// Conjunction: include only if all include, continue only if all continue.
    All(Vec<Evaluator>),
}

impl Evaluator {
    /// Combine evaluators with AND semantics, collapsing a single member.
    #[must_use]
    pub fn all(mut members: Vec<Evaluator>) -> Self {
        if members.len() == 1
            && let Some(only) = members.pop()
        {
            return only;
        }
        Self::All(members)
    }

    /// The tag sequence evaluator, at top level or inside a conjunction.
    #[must_use]
    pub fn tag_sequence(&self) -> Option<&TagSequenceEvaluator> {
        match self {
            Self::TagSequence(e) => Some(e),
            Self::All(members) => members.iter().find_map(Self::tag_sequence),
            _ => None,
        }
    }

    /// Short label of the evaluator kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TagSequence(_) => "tag-sequence",
            Self::Whitelist(_) => "whitelist",
            Self::Blacklist(_) => "blacklist",
            Self::EndAndTerminator(_) => "end-and-terminator",
            Self::All(_) => "all",
        }
    }
}

impl PathEvaluator for Evaluator {
    fn evaluate<P: TraversalPath + ?Sized>(&self, path: &P) -> Evaluation {
        match self {
            Self::TagSequence(e) => e.evaluate(path),
            Self::Whitelist(e) => e.evaluate(path),
            Self::Blacklist(e) => e.evaluate(path),
            Self::EndAndTerminator(e) => e.evaluate(path),
            Self::All(members) => members
                .iter()
                .fold(Evaluation::IncludeAndContinue, |acc, e| {
                    acc.and(e.evaluate(path))
                }),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
