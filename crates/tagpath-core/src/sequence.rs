//! # Depth Sequences
//!
//! A fixed-length ordered list whose positions are selected by traversal
//! depth with wraparound. An offset sequence starts one step after the start
//! vertex, so depth `d` maps to position `(d - 1) mod len` and depth 0 has no
//! position at all.

use serde::Serialize;

/// Ordered positions selected by `depth mod len` (or `(depth - 1) mod len`
/// when offset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepthSequence<T> {
    positions: Vec<T>,
    offset: bool,
}

impl<T> DepthSequence<T> {
    /// Create a sequence. `offset` shifts selection by one depth.
    #[must_use]
    pub fn new(positions: Vec<T>, offset: bool) -> Self {
        Self { positions, offset }
    }

    /// Index of the position used at `depth`, or `None` when the sequence
    /// is empty or `depth` precedes an offset sequence.
    #[must_use]
    pub fn index_at(&self, depth: usize) -> Option<usize> {
        if self.positions.is_empty() {
            return None;
        }
        let step = if self.offset {
            depth.checked_sub(1)?
        } else {
            depth
        };
        Some(step % self.positions.len())
    }

    /// The position used at `depth`.
    #[must_use]
    pub fn at(&self, depth: usize) -> Option<&T> {
        self.index_at(depth).and_then(|i| self.positions.get(i))
    }

    /// Number of positions before the sequence repeats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when there are no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Whether selection is shifted by one depth.
    #[must_use]
    pub fn is_offset(&self) -> bool {
        self.offset
    }

    /// All positions in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.positions.iter()
    }

    /// Mutable access to all positions. Only used while building.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.positions.iter_mut()
    }
}
