//! # Edge Selectors
//!
//! Parsing of one edge-filter position into ordered `(type, direction)`
//! steps.
//!
//! Parsing is tolerant: direction markers may sit before or after the type
//! name, a backtick-quoted name is taken verbatim, and anything that does not
//! look like a name becomes a wildcard.

use crate::Direction;
use crate::primitives::{
    ALTERNATIVE_SEPARATOR, COMPOUND_SEPARATOR, INCOMING_MARK, OUTGOING_MARK, TYPE_QUOTE,
};
use serde::Serialize;
use std::fmt;

/// One `(type, direction)` step. `edge_type == None` means any type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeStep {
    pub edge_type: Option<String>,
    pub direction: Direction,
}

impl EdgeStep {
    /// Any edge type, either direction.
    #[must_use]
    pub fn wildcard() -> Self {
        Self {
            edge_type: None,
            direction: Direction::Both,
        }
    }

    /// Parse a single step such as `KNOWS>`, `<LOVES`, `` `A:B`> `` or `>`.
    #[must_use]
    pub fn parse(step: &str) -> Self {
        let step = step.trim();
        let (name, markers) = split_quoted(step);

        let direction = if markers.contains(INCOMING_MARK) {
            Direction::Incoming
        } else if markers.contains(OUTGOING_MARK) {
            Direction::Outgoing
        } else {
            Direction::Both
        };

        let edge_type = match name {
            Some(quoted) => quoted.to_string(),
            None => step
                .chars()
                .filter(|c| !matches!(*c, INCOMING_MARK | OUTGOING_MARK | COMPOUND_SEPARATOR))
                .collect::<String>()
                .trim()
                .to_string(),
        };

        Self {
            edge_type: (!edge_type.is_empty()).then_some(edge_type),
            direction,
        }
    }

    /// Whether this step accepts every edge type.
    #[must_use]
    pub fn is_wildcard_type(&self) -> bool {
        self.edge_type.is_none()
    }
}

/// Renders `<TYPE`, `TYPE>` or `TYPE`; a wildcard type shows as `*`.
impl fmt::Display for EdgeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.edge_type.as_deref().unwrap_or("*");
        match self.direction {
            Direction::Incoming => write!(f, "{INCOMING_MARK}{name}"),
            Direction::Outgoing => write!(f, "{name}{OUTGOING_MARK}"),
            Direction::Both => f.write_str(name),
        }
    }
}

/// Split off a backtick-quoted name. Returns the quoted content (between the
/// first and last backtick) and the text outside the quotes, which is where
/// direction markers are looked for.
fn split_quoted(step: &str) -> (Option<&str>, String) {
    if let (Some(first), Some(last)) = (step.find(TYPE_QUOTE), step.rfind(TYPE_QUOTE))
        && first < last
    {
        let inner = &step[first + TYPE_QUOTE.len_utf8()..last];
        let outside = format!("{}{}", &step[..first], &step[last + TYPE_QUOTE.len_utf8()..]);
        return (Some(inner), outside);
    }
    (None, step.to_string())
}

/// The ordered steps of one edge-filter position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeSelector {
    steps: Vec<EdgeStep>,
}

impl EdgeSelector {
    /// Parse a `|`-separated position. `None`, an empty string, or a string
    /// of empty alternatives yields a single wildcard step.
    ///
    /// Empty alternatives inside a non-empty position are skipped.
    #[must_use]
    pub fn parse(filter: Option<&str>) -> Self {
        let steps: Vec<EdgeStep> = filter
            .unwrap_or_default()
            .split(ALTERNATIVE_SEPARATOR)
            .filter(|piece| !piece.trim().is_empty())
            .map(EdgeStep::parse)
            .collect();

        if steps.is_empty() {
            return Self::wildcard();
        }
        Self { steps }
    }

    /// A single any-type, both-directions step.
    #[must_use]
    pub fn wildcard() -> Self {
        Self {
            steps: vec![EdgeStep::wildcard()],
        }
    }

    /// The steps in filter order.
    #[must_use]
    pub fn steps(&self) -> &[EdgeStep] {
        &self.steps
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a parsed selector.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
