//! # tagpath-core
//!
//! The path-filter compiler - THE LOGIC.
//!
//! This crate turns per-depth tag filters, edge filters and explicit vertex
//! sets into two callbacks for a breadth-first traversal engine:
//! - a path evaluator deciding include/exclude and continue/prune
//! - an edge expander producing the candidate edges of a vertex, lazily
//!
//! ## Architectural Constraints
//!
//! - Does NOT run the traversal: the engine and the graph store are
//!   collaborators reached through `PathEvaluator`, `EdgeExpander` and
//!   `EdgeSource`
//! - Parsing is tolerant: malformed filters degrade to permissive matchers
//! - Compiled objects are immutable and shared read-only across traversals
//! - Deterministic: BTreeMap/BTreeSet only, no floats, no async

// =============================================================================
// MODULES
// =============================================================================

pub mod evaluator;
pub mod expander;
pub mod explicit;
pub mod graph;
pub mod matcher;
pub mod primitives;
pub mod query;
pub mod selector;
pub mod sequence;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Direction, Edge, EdgeId, Evaluation, PathFilterError, Vertex, VertexId};

// =============================================================================
// RE-EXPORTS: Compiler
// =============================================================================

pub use evaluator::{Evaluator, PathEvaluator, SequenceOptions, TagSequenceEvaluator};
pub use expander::{EdgeExpander, EdgeSequenceExpander, ExpandedEdges};
pub use explicit::{BlacklistEvaluator, EndTerminatorEvaluator, VertexSetPolicy, WhitelistEvaluator};
pub use matcher::{TagMatcher, TagMatcherGroup};
pub use selector::{EdgeSelector, EdgeStep};
pub use sequence::DepthSequence;

// =============================================================================
// RE-EXPORTS: Seams and Requests
// =============================================================================

pub use graph::{EdgeSource, Path, TaggedEdges, TaggedGraph, TraversalPath};
pub use query::{CompiledTraversal, TraversalBounds, TraversalQuery, Uniqueness, split_sequence};
