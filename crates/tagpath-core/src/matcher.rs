//! # Tag Matchers
//!
//! `TagMatcher` answers "does this vertex carry one of these tags";
//! `TagMatcherGroup` combines four of them (whitelist, blacklist, end-vertex,
//! terminator-vertex) into the decision for one sequence position.
//!
//! Both are mutated only while a filter string is being parsed and are
//! read-only afterwards.

use crate::primitives::{
    ALTERNATIVE_SEPARATOR, BLACKLIST_PREFIX, COMPOUND_SEPARATOR, END_VERTEX_PREFIX,
    TERMINATOR_PREFIX, WHITELIST_PREFIX, WILDCARD_TAG,
};
use crate::{Evaluation, Vertex};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// TAG MATCHER
// =============================================================================

/// A set of tag requirements with OR semantics.
///
/// Simple requirements match when the vertex carries the tag. Compound
/// requirements (`A:B`) match when the vertex carries every member tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagMatcher {
    simple: BTreeSet<String>,
    compound: BTreeSet<BTreeSet<String>>,
    match_all: bool,
}

impl TagMatcher {
    /// Create an empty matcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one tag token into this matcher.
    ///
    /// `*` switches the matcher to accept every vertex; later tokens are
    /// ignored. A leading `:` is dropped. Empty tokens are ignored.
    pub fn add_tag(&mut self, token: &str) -> &mut Self {
        if self.match_all {
            return self;
        }
        let token = token.trim();
        if token == WILDCARD_TAG {
            self.match_all = true;
            self.simple.clear();
            self.compound.clear();
            return self;
        }

        let token = token.strip_prefix(COMPOUND_SEPARATOR).unwrap_or(token);
        let members: BTreeSet<String> = token
            .split(COMPOUND_SEPARATOR)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        match members.len() {
            0 => {}
            1 => self.simple.extend(members),
            _ => {
                self.compound.insert(members);
            }
        }
        self
    }

    /// Check whether `vertex` satisfies at least one requirement.
    #[must_use]
    pub fn matches(&self, vertex: &Vertex) -> bool {
        self.match_all
            || self.simple.iter().any(|tag| vertex.has_tag(tag))
            || self
                .compound
                .iter()
                .any(|group| group.iter().all(|tag| vertex.has_tag(tag)))
    }

    /// True when no requirement has been added; callers read this as
    /// "unrestricted".
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.match_all && self.simple.is_empty() && self.compound.is_empty()
    }

    /// True once `*` has been added.
    #[must_use]
    pub fn matches_all(&self) -> bool {
        self.match_all
    }
}

/// Renders the matcher back in filter syntax, alternatives joined by `|`.
impl fmt::Display for TagMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.match_all {
            return f.write_str(WILDCARD_TAG);
        }
        let compound = self.compound.iter().map(|group| {
            group
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(&COMPOUND_SEPARATOR.to_string())
        });
        let all: Vec<String> = self.simple.iter().cloned().chain(compound).collect();
        f.write_str(&all.join(&ALTERNATIVE_SEPARATOR.to_string()))
    }
}

// =============================================================================
// TAG MATCHER GROUP
// =============================================================================

/// The four matchers of one tag-filter position plus the derived
/// end-vertices-only flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagMatcherGroup {
    whitelist: TagMatcher,
    blacklist: TagMatcher,
    end_vertices: TagMatcher,
    terminators: TagMatcher,
    end_vertices_only: bool,
}

impl TagMatcherGroup {
    /// Create a group with all matchers empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `|`-separated filter group.
    #[must_use]
    pub fn parse(filter: &str) -> Self {
        let mut group = Self::new();
        group.add_filter_string(filter);
        group
    }

    /// Route each `|`-separated token of `filter` by its prefix.
    pub fn add_filter_string(&mut self, filter: &str) -> &mut Self {
        for token in filter.split(ALTERNATIVE_SEPARATOR) {
            self.add_filter_token(token);
        }
        self
    }

    /// Route one token by its one-character prefix.
    ///
    /// Unknown prefixes are part of the tag and go to the whitelist.
    pub fn add_filter_token(&mut self, token: &str) -> &mut Self {
        let token = token.trim();
        let mut chars = token.chars();
        let Some(prefix) = chars.next() else {
            return self;
        };
        let rest = chars.as_str();

        match prefix {
            END_VERTEX_PREFIX => {
                self.end_vertices.add_tag(rest);
                self.end_vertices_only = true;
            }
            TERMINATOR_PREFIX => {
                self.terminators.add_tag(rest);
                self.end_vertices_only = true;
            }
            BLACKLIST_PREFIX => {
                self.blacklist.add_tag(rest);
            }
            WHITELIST_PREFIX => {
                self.whitelist.add_tag(rest);
            }
            _ => {
                self.whitelist.add_tag(token);
            }
        }
        self
    }

    /// Whether an end-vertex or terminator token was seen (or propagated).
    #[must_use]
    pub fn is_end_vertices_only(&self) -> bool {
        self.end_vertices_only
    }

    /// Overwrite the end-vertices-only flag. Used to propagate the flag
    /// across every group of a sequence.
    pub fn set_end_vertices_only(&mut self, end_vertices_only: bool) {
        self.end_vertices_only = end_vertices_only;
    }

    /// Decide for `vertex`. Precedence is blacklist, terminator, end-vertex,
    /// whitelist; the first match decides.
    #[must_use]
    pub fn evaluate(&self, vertex: &Vertex, below_min_level: bool) -> Evaluation {
        if self.blacklist.matches(vertex) {
            return Evaluation::ExcludeAndPrune;
        }
        if self.terminators.matches(vertex) {
            return if below_min_level {
                Evaluation::ExcludeAndContinue
            } else {
                Evaluation::IncludeAndPrune
            };
        }
        if self.end_vertices.matches(vertex) {
            return if below_min_level {
                Evaluation::ExcludeAndContinue
            } else {
                Evaluation::IncludeAndContinue
            };
        }
        if self.whitelist.is_empty() || self.whitelist.matches(vertex) {
            return if self.end_vertices_only || below_min_level {
                Evaluation::ExcludeAndContinue
            } else {
                Evaluation::IncludeAndContinue
            };
        }
        Evaluation::ExcludeAndPrune
    }

    /// The whitelist matcher.
    #[must_use]
    pub fn whitelist(&self) -> &TagMatcher {
        &self.whitelist
    }

    /// The blacklist matcher.
    #[must_use]
    pub fn blacklist(&self) -> &TagMatcher {
        &self.blacklist
    }

    /// The end-vertex matcher.
    #[must_use]
    pub fn end_vertices(&self) -> &TagMatcher {
        &self.end_vertices
    }

    /// The terminator-vertex matcher.
    #[must_use]
    pub fn terminators(&self) -> &TagMatcher {
        &self.terminators
    }
}

// =============================================================================
// TESTS
// =============================================================================
