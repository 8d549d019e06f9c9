//! Memoized "does this pair interact at all" answers.
//!
//! Proximity filtering asks the same question for many selected/neighbor
//! pairs on every selection or threshold change. The answer depends only on
//! the immutable residue dataset, so it is cached until the dataset is
//! rebuilt.

use rustc_hash::FxHashMap;

use super::classify;
use crate::residue::{ResidueDataset, ResidueId};

/// Order-independent residue pair: always `(smaller, larger)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResiduePair(ResidueId, ResidueId);

impl ResiduePair {
    /// Canonical pair for two residues in either order.
    #[must_use]
    pub fn new(a: ResidueId, b: ResidueId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// Smaller id.
    #[must_use]
    pub fn first(self) -> ResidueId {
        self.0
    }

    /// Larger id.
    #[must_use]
    pub fn second(self) -> ResidueId {
        self.1
    }
}

/// Existence cache keyed by [`ResiduePair`].
///
/// Owned by the analysis session alongside the dataset it was filled from;
/// replaced together with it on every structure load.
#[derive(Debug, Default)]
pub struct InteractionCache {
    entries: FxHashMap<ResiduePair, bool>,
    hits: u64,
    misses: u64,
}

impl InteractionCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`classify`] finds any record for the pair. Computed once
    /// per pair, then served from the cache.
    pub fn has_interaction(
        &mut self,
        dataset: &ResidueDataset,
        a: ResidueId,
        b: ResidueId,
    ) -> bool {
        let key = ResiduePair::new(a, b);
        if let Some(&known) = self.entries.get(&key) {
            self.hits += 1;
            return known;
        }
        self.misses += 1;
        let found = match (dataset.get(a), dataset.get(b)) {
            (Some(ra), Some(rb)) => !classify(dataset, ra, rb).is_empty(),
            _ => false,
        };
        let _ = self.entries.insert(key, found);
        found
    }

    /// Cached answer without computing, if present.
    #[must_use]
    pub fn get(&self, a: ResidueId, b: ResidueId) -> Option<bool> {
        self.entries.get(&ResiduePair::new(a, b)).copied()
    }

    /// Number of cached pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since creation or the last [`clear`](Self::clear).
    #[must_use]
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    /// Drop every cached answer.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
