//! Proximity projection of the current selection.
//!
//! [`project`] walks the contact-map neighbors of every selected residue
//! within the user threshold and splits them into "in proximity" and "has
//! an interaction with a selected residue". The projection drives both the
//! disabled set fed back into [`SelectionState`] and the ordering of the
//! [`CandidateList`].

mod candidates;

use std::collections::BTreeSet;

pub use candidates::{
    divider_label, Candidate, CandidateGroup, CandidateList, Divider,
};
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::contact::{ContactMap, CONTACT_CUTOFF};
use crate::interaction::InteractionCache;
use crate::residue::{ResidueDataset, ResidueId};
use crate::selection::SelectionState;

/// Smallest accepted proximity threshold (Angstroms).
pub const THRESHOLD_MIN: f32 = 1.0;
/// Largest accepted proximity threshold; equals the contact cutoff.
pub const THRESHOLD_MAX: f32 = CONTACT_CUTOFF;
/// Threshold used when nothing else is configured.
pub const DEFAULT_THRESHOLD: f32 = 5.0;

/// Clamp a requested threshold into `[THRESHOLD_MIN, THRESHOLD_MAX]`.
/// Non-finite input falls back to [`DEFAULT_THRESHOLD`].
#[must_use]
pub fn clamp_threshold(threshold: f32) -> f32 {
    if threshold.is_nan() {
        return DEFAULT_THRESHOLD;
    }
    threshold.clamp(THRESHOLD_MIN, THRESHOLD_MAX)
}

/// Residue subsets derived from a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Projection {
    /// Neighbors of any selected residue within the threshold.
    pub in_proximity: BTreeSet<ResidueId>,
    /// Subset of `in_proximity` with at least one interaction against the
    /// selected residue it neighbors.
    pub has_interaction: BTreeSet<ResidueId>,
}

impl Projection {
    /// Whether both sets are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.in_proximity.is_empty() && self.has_interaction.is_empty()
    }

    /// Residues that may not be newly selected: everything outside
    /// `in_proximity` that is not already selected. Empty when filtering is
    /// off or nothing is selected.
    #[must_use]
    pub fn disabled(
        &self,
        dataset: &ResidueDataset,
        selection: &SelectionState,
    ) -> FxHashSet<ResidueId> {
        if !selection.filter_enabled() || selection.is_empty() {
            return FxHashSet::default();
        }
        dataset
            .iter()
            .map(|r| r.id)
            .filter(|id| {
                !self.in_proximity.contains(id) && !selection.is_selected(*id)
            })
            .collect()
    }
}

/// Compute proximity and interaction sets for `selected` at `threshold`.
///
/// `threshold` is clamped first. An empty selection projects to empty sets.
pub fn project(
    dataset: &ResidueDataset,
    contacts: &ContactMap,
    cache: &mut InteractionCache,
    selected: &BTreeSet<ResidueId>,
    threshold: f32,
) -> Projection {
    let threshold = clamp_threshold(threshold);
    let mut projection = Projection::default();

    for &sel in selected {
        for (neighbor, _) in contacts.neighbors_within(sel, threshold) {
            let _ = projection.in_proximity.insert(neighbor);
            if !projection.has_interaction.contains(&neighbor)
                && cache.has_interaction(dataset, sel, neighbor)
            {
                let _ = projection.has_interaction.insert(neighbor);
            }
        }
    }
    projection
}

/// Current threshold plus the projection last computed with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterState {
    threshold: f32,
    projection: Projection,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl FilterState {
    /// Filter at `threshold` (clamped) with an empty projection.
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: clamp_threshold(threshold),
            projection: Projection::default(),
        }
    }

    /// Current threshold in Angstroms.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Set the threshold (clamped). Returns whether it changed.
    pub fn set_threshold(&mut self, threshold: f32) -> bool {
        let clamped = clamp_threshold(threshold);
        let changed = clamped != self.threshold;
        self.threshold = clamped;
        changed
    }

    /// Last computed projection.
    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Recompute the projection for `selection` and push the resulting
    /// disabled set into it.
    pub fn refresh(
        &mut self,
        dataset: &ResidueDataset,
        contacts: &ContactMap,
        cache: &mut InteractionCache,
        selection: &mut SelectionState,
    ) {
        self.projection = project(
            dataset,
            contacts,
            cache,
            selection.selected(),
            self.threshold,
        );
        selection.set_disabled(self.projection.disabled(dataset, selection));
        log::debug!(
            "proximity at {} Å: {} near, {} interacting",
            self.threshold,
            self.projection.in_proximity.len(),
            self.projection.has_interaction.len()
        );
    }

    /// Drop the projection (keeps the threshold).
    pub fn reset(&mut self) {
        self.projection = Projection::default();
    }
}
