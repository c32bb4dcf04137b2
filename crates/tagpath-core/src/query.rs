//! # Traversal Requests
//!
//! The request layer in front of the compiler.
//!
//! - `TraversalQuery` is the caller-facing configuration (JSON or TOML)
//! - `compile()` turns it into one `Evaluator` and one `EdgeSequenceExpander`
//! - `TraversalBounds` carries the limits the traversal engine enforces itself

use crate::evaluator::{Evaluator, SequenceOptions, TagSequenceEvaluator};
use crate::expander::EdgeSequenceExpander;
use crate::explicit::{BlacklistEvaluator, EndTerminatorEvaluator, WhitelistEvaluator};
use crate::primitives::SEQUENCE_SEPARATOR;
use crate::{PathFilterError, VertexId};
use serde::{Deserialize, Serialize};
use std::path::Path;

// =============================================================================
// UNIQUENESS
// =============================================================================

/// Which repeated elements the traversal engine forbids. Passed through
/// untouched; enforcement belongs to the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Uniqueness {
    NodeGlobal,
    NodePath,
    NodeRecent,
    NodeLevel,
    RelationshipGlobal,
    #[default]
    RelationshipPath,
    RelationshipRecent,
    RelationshipLevel,
    None,
}

// =============================================================================
// TRAVERSAL QUERY
// =============================================================================

/// A traversal request: filters, flags, bounds and explicit vertex sets.
///
/// Keys are camelCase. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TraversalQuery {
    /// Comma-separated tag filter, one group per depth.
    #[serde(alias = "tagFilter", skip_serializing_if = "Option::is_none")]
    pub label_filter: Option<String>,

    /// Comma-separated edge filter, one position per depth.
    #[serde(alias = "edgeFilter", skip_serializing_if = "Option::is_none")]
    pub relationship_filter: Option<String>,

    /// Alternating tag and edge filters. Overrides the two filters above.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,

    pub min_level: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_level: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    #[serde(alias = "filterStartVertex")]
    pub filter_start_node: bool,

    pub begin_sequence_at_start: bool,

    pub uniqueness: Uniqueness,

    pub bfs: bool,

    /// Return the start vertex alone when nothing else is found.
    pub optional: bool,

    #[serde(alias = "allowlistNodes", alias = "whitelistVertices")]
    pub whitelist_nodes: Vec<VertexId>,

    #[serde(alias = "denylistNodes", alias = "blacklistVertices")]
    pub blacklist_nodes: Vec<VertexId>,

    #[serde(alias = "endVertices")]
    pub end_nodes: Vec<VertexId>,

    #[serde(alias = "terminatorVertices")]
    pub terminator_nodes: Vec<VertexId>,
}

impl Default for TraversalQuery {
    fn default() -> Self {
        Self {
            label_filter: None,
            relationship_filter: None,
            sequence: None,
            min_level: 0,
            max_level: None,
            limit: None,
            filter_start_node: false,
            begin_sequence_at_start: true,
            uniqueness: Uniqueness::default(),
            bfs: true,
            optional: false,
            whitelist_nodes: Vec::new(),
            blacklist_nodes: Vec::new(),
            end_nodes: Vec::new(),
            terminator_nodes: Vec::new(),
        }
    }
}

impl TraversalQuery {
    /// Create a request with every option at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tag filter.
    #[must_use]
    pub fn with_label_filter(mut self, filter: impl Into<String>) -> Self {
        self.label_filter = Some(filter.into());
        self
    }

    /// Set the edge filter.
    #[must_use]
    pub fn with_relationship_filter(mut self, filter: impl Into<String>) -> Self {
        self.relationship_filter = Some(filter.into());
        self
    }

    /// Set the combined sequence filter.
    #[must_use]
    pub fn with_sequence(mut self, sequence: impl Into<String>) -> Self {
        self.sequence = Some(sequence.into());
        self
    }

    /// Set both depth bounds.
    #[must_use]
    pub fn with_levels(mut self, min_level: usize, max_level: Option<usize>) -> Self {
        self.min_level = min_level;
        self.max_level = max_level;
        self
    }

    /// Decode a JSON request.
    pub fn from_json(input: &str) -> Result<Self, PathFilterError> {
        serde_json::from_str(input).map_err(|e| PathFilterError::Deserialization(e.to_string()))
    }

    /// Decode a TOML request.
    pub fn from_toml(input: &str) -> Result<Self, PathFilterError> {
        toml::from_str(input).map_err(|e| PathFilterError::Deserialization(e.to_string()))
    }

    /// Read a request file. `.toml` files are decoded as TOML, everything
    /// else as JSON.
    pub fn load(path: &Path) -> Result<Self, PathFilterError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PathFilterError::Io(format!("{}: {}", path.display(), e)))?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    /// Reject inconsistent bounds.
    pub fn validate(&self) -> Result<(), PathFilterError> {
        if let Some(max_level) = self.max_level
            && max_level < self.min_level
        {
            return Err(PathFilterError::InvalidConfig(format!(
                "maxLevel {} is below minLevel {}",
                max_level, self.min_level
            )));
        }
        Ok(())
    }

    /// Adapt this request for subgraph and spanning-tree style traversal:
    /// every vertex is reached at most once and `minLevel` may only be 0 or 1.
    pub fn for_subgraph(mut self) -> Result<Self, PathFilterError> {
        if self.min_level > 1 {
            return Err(PathFilterError::InvalidConfig(format!(
                "minLevel can only be 0 or 1 for subgraph traversal, got {}",
                self.min_level
            )));
        }
        self.uniqueness = Uniqueness::NodeGlobal;
        Ok(self)
    }

    /// Flags shared by the tag evaluator.
    #[must_use]
    pub fn sequence_options(&self) -> SequenceOptions {
        SequenceOptions {
            filter_start_vertex: self.filter_start_node,
            begin_sequence_at_start: self.begin_sequence_at_start,
            min_level: self.min_level,
        }
    }

    /// Validate and compile into the callbacks the traversal engine runs.
    pub fn compile(&self) -> Result<CompiledTraversal, PathFilterError> {
        self.validate()?;

        let options = self.sequence_options();
        let begin = self.begin_sequence_at_start;

        let (tags, expander) = match self.sequence.as_deref().map(str::trim) {
            Some(sequence) if !sequence.is_empty() => {
                if self.label_filter.is_some() || self.relationship_filter.is_some() {
                    tracing::warn!(
                        "sequence overrides labelFilter and relationshipFilter; they are ignored"
                    );
                }
                let (tag_groups, edge_positions) = split_sequence(sequence, begin);
                (
                    TagSequenceEvaluator::from_groups(tag_groups, options),
                    EdgeSequenceExpander::from_positions(edge_positions, begin),
                )
            }
            _ => (
                TagSequenceEvaluator::parse(self.label_filter.as_deref(), options),
                EdgeSequenceExpander::parse(self.relationship_filter.as_deref(), begin),
            ),
        };

        tracing::debug!(
            tag_groups = tags.len(),
            edge_positions = expander.len(),
            initial_step = expander.initial_steps().is_some(),
            whitelist = self.whitelist_nodes.len(),
            blacklist = self.blacklist_nodes.len(),
            end_vertices = self.end_nodes.len(),
            terminators = self.terminator_nodes.len(),
            "compiled traversal request"
        );

        let mut members = vec![Evaluator::TagSequence(tags)];
        if !self.whitelist_nodes.is_empty() {
            members.push(Evaluator::Whitelist(WhitelistEvaluator::new(
                self.whitelist_nodes.iter().copied(),
                self.filter_start_node,
            )));
        }
        if !self.blacklist_nodes.is_empty() {
            members.push(Evaluator::Blacklist(BlacklistEvaluator::new(
                self.blacklist_nodes.iter().copied(),
                self.filter_start_node,
            )));
        }
        if let Some(combined) = EndTerminatorEvaluator::from_sets(
            self.end_nodes.iter().copied(),
            self.terminator_nodes.iter().copied(),
            self.filter_start_node,
            self.min_level,
        ) {
            members.push(Evaluator::EndAndTerminator(combined));
        }

        Ok(CompiledTraversal {
            evaluator: Evaluator::all(members),
            expander,
            bounds: TraversalBounds {
                min_level: self.min_level,
                max_level: self.max_level,
                limit: self.limit,
                uniqueness: self.uniqueness,
                bfs: self.bfs,
                optional: self.optional,
            },
        })
    }
}

/// Split a combined sequence into tag groups and edge positions.
///
/// With `begin_sequence_at_start` even positions are tag filters and odd
/// positions are edge filters; otherwise position 0 is an edge filter and
/// the alternation shifts by one.
#[must_use]
pub fn split_sequence(sequence: &str, begin_sequence_at_start: bool) -> (Vec<String>, Vec<String>) {
    let tag_parity = usize::from(!begin_sequence_at_start);
    let mut tags = Vec::new();
    let mut edges = Vec::new();
    for (i, step) in sequence.split(SEQUENCE_SEPARATOR).enumerate() {
        let step = step.trim().to_string();
        if i % 2 == tag_parity {
            tags.push(step);
        } else {
            edges.push(step);
        }
    }
    (tags, edges)
}

// =============================================================================
// COMPILED TRAVERSAL
// =============================================================================

/// Limits enforced by the traversal engine, not by the compiled callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversalBounds {
    pub min_level: usize,
    pub max_level: Option<usize>,
    pub limit: Option<usize>,
    pub uniqueness: Uniqueness,
    pub bfs: bool,
    pub optional: bool,
}

/// The output of `TraversalQuery::compile`. Immutable; share it freely
/// between traversals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledTraversal {
    evaluator: Evaluator,
    expander: EdgeSequenceExpander,
    bounds: TraversalBounds,
}

impl CompiledTraversal {
    /// The per-path decision callback.
    #[must_use]
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// The per-vertex edge expansion callback.
    #[must_use]
    pub fn expander(&self) -> &EdgeSequenceExpander {
        &self.expander
    }

    #[must_use]
    pub fn bounds(&self) -> TraversalBounds {
        self.bounds
    }
}

// =============================================================================
// TESTS
// =============================================================================
