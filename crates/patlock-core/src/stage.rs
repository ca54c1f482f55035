#![forbid(unsafe_code)]

//! Two-stage pattern capture: set, then confirm.
//!
//! A completed gesture produces a [`Pattern`], the ordered sequence of node
//! keys it selected. The [`StageStore`] keeps at most one pattern per
//! [`Stage`] and decides whether a completed second-stage gesture confirms
//! the first-stage pattern.
//!
//! Pattern equality is element-for-element over the key *sequence*, never a
//! set comparison: "123" and "321" share keys but are different patterns.

use ahash::AHashMap;

use crate::grid::GridNode;

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

/// An ordered sequence of node keys produced by one completed gesture.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    keys: Vec<String>,
}

impl Pattern {
    /// Derive a pattern from a selection, in selection order.
    #[must_use]
    pub fn from_nodes(nodes: &[GridNode]) -> Self {
        Self {
            keys: nodes.iter().map(|node| node.key.clone()).collect(),
        }
    }

    /// The keys in selection order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the pattern is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Display form: the keys concatenated (e.g. "1235").
    #[must_use]
    pub fn joined(&self) -> String {
        self.keys.concat()
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.joined())
    }
}

impl<S: Into<String>> FromIterator<S> for Pattern {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// The two roles of the set-then-confirm flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    /// The pattern is being set.
    First,
    /// The pattern is being confirmed against the first capture.
    Second,
}

// ---------------------------------------------------------------------------
// StageStore
// ---------------------------------------------------------------------------

/// Captured patterns, at most one per stage.
///
/// Each completed gesture for a stage overwrites that stage's slot. Slots
/// survive failed attempts and stage advancement; only
/// [`clear`](StageStore::clear) empties the store.
#[derive(Debug, Clone, Default)]
pub struct StageStore {
    patterns: AHashMap<Stage, Pattern>,
}

impl StageStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The captured pattern for `stage`, if that stage ever completed.
    #[must_use]
    pub fn get(&self, stage: Stage) -> Option<&Pattern> {
        self.patterns.get(&stage)
    }

    /// Record a completed gesture for `stage` and judge it.
    ///
    /// The first stage only records; it accepts any valid-length pattern.
    /// The second stage records, then accepts iff the capture equals the
    /// stored first-stage pattern (a never-completed first stage compares
    /// unequal).
    pub fn commit(&mut self, stage: Stage, pattern: Pattern) -> bool {
        self.patterns.insert(stage, pattern);
        match stage {
            Stage::First => true,
            Stage::Second => self.patterns.get(&Stage::First) == self.patterns.get(&Stage::Second),
        }
    }

    /// Forget both captures.
    pub fn clear(&mut self) {
        self.patterns.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
