#![forbid(unsafe_code)]

//! Path builder: pointer stream → ordered node selection.
//!
//! [`PathBuilder`] turns a continuous stream of pointer positions into the
//! ordered, de-duplicated sequence of grid nodes the stroke has selected.
//! When a sample jumps from the last selected node to a non-adjacent one,
//! the node geometrically between the two is selected implicitly first, so
//! a diagonal swipe "through" a node picks it up even if no sample ever
//! landed on it.
//!
//! # Invariants
//!
//! 1. No `(row, col)` pair appears twice in the selection.
//! 2. The selection never exceeds the configured cap; implicit midpoint
//!    insertions count against it like explicit ones.
//! 3. A midpoint is only ever inserted at an exact grid position: when the
//!    index sums are odd the geometric midpoint falls between cells and
//!    nothing is inserted (the adjacent-move case).
//! 4. `feed` reports whether the sample resolved to a node at all,
//!    independent of whether anything was appended.

use crate::geometry::Point;
use crate::grid::{GridLayout, GridNode};
use crate::stage::Pattern;

/// Builds the ordered selection for one gesture.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    selection: Vec<GridNode>,
    tracking: bool,
    max_count: usize,
}

impl PathBuilder {
    /// Create a builder that caps the selection at `max_count` nodes.
    #[must_use]
    pub fn new(max_count: usize) -> Self {
        Self {
            selection: Vec::with_capacity(max_count.min(16)),
            tracking: false,
            max_count,
        }
    }

    /// Feed one pointer sample.
    ///
    /// Resolves the sample against `grid` and appends the resolved node
    /// (preceded by the implicit midpoint node where one exists), subject to
    /// the uniqueness and cap invariants. Returns `true` iff the sample
    /// resolved to a node, whether or not an append occurred; a miss is a
    /// silent no-op.
    pub fn feed(&mut self, grid: &GridLayout, point: Point) -> bool {
        let Some(candidate) = grid.resolve_at(point) else {
            return false;
        };
        self.tracking = true;

        if self.is_selected(candidate.row, candidate.col) {
            return true;
        }

        if let Some(last) = self.selection.last() {
            let row_sum = last.row + candidate.row;
            let col_sum = last.col + candidate.col;
            // Exact midpoint only: odd sums fall between cells.
            if row_sum % 2 == 0
                && col_sum % 2 == 0
                && let Some(mid) = grid.node_at(row_sum / 2, col_sum / 2)
                && !self.is_selected(mid.row, mid.col)
            {
                let mid = mid.clone();
                self.push_capped(mid);
            }
        }

        let candidate = candidate.clone();
        self.push_capped(candidate);
        true
    }

    /// The ordered selection so far.
    #[must_use]
    pub fn selection(&self) -> &[GridNode] {
        &self.selection
    }

    /// Number of selected nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selection.len()
    }

    /// Whether nothing is selected yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// Whether the selection has reached its cap.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.selection.len() >= self.max_count
    }

    /// Whether any sample of the current gesture has resolved to a node.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// The ordered key sequence of the current selection.
    #[must_use]
    pub fn pattern(&self) -> Pattern {
        Pattern::from_nodes(&self.selection)
    }

    /// Clear the selection and the tracking flag.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.tracking = false;
    }

    fn is_selected(&self, row: u16, col: u16) -> bool {
        self.selection
            .iter()
            .any(|node| node.row == row && node.col == col)
    }

    fn push_capped(&mut self, node: GridNode) {
        if self.selection.len() < self.max_count {
            self.selection.push(node);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
