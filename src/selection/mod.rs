//! Capacity-bounded residue selection with disabled-residue rules.
//!
//! Every residue is either selected or not. A residue may additionally be
//! disabled, which only blocks *new* selections; an existing selection is
//! never removed because its residue became disabled. All transitions
//! return a [`SelectionEvent`] describing what happened, including
//! rejections, so callers never need error handling here.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::residue::{ResidueDataset, ResidueId, ResidueKey};

/// Maximum number of simultaneously selected residues.
pub const MAX_SELECTION: usize = 10;

/// Minimum selection size for an interaction analysis.
pub const MIN_ANALYSIS_SELECTION: usize = 2;

/// Why a selection attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The selection already holds [`MAX_SELECTION`] residues.
    Limit,
    /// The residue has no possible interaction with the current selection.
    Disabled,
}

impl RejectReason {
    /// Stable reason code (`"limit"` / `"disabled"`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Limit => "limit",
            Self::Disabled => "disabled",
        }
    }
}

/// Which transition produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionAction {
    /// Add one residue.
    Select,
    /// Remove one residue.
    Deselect,
    /// Empty the selection.
    Clear,
    /// Replace the whole selection from an outside source.
    Replace,
}

/// Outcome of one selection transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionEvent {
    /// Transition that was attempted.
    pub action: SelectionAction,
    /// Residue the transition targeted (none for clear/replace).
    pub residue: Option<ResidueId>,
    /// Whether the transition was allowed.
    pub accepted: bool,
    /// Set when `accepted` is false.
    pub reason: Option<RejectReason>,
    /// Whether membership actually changed.
    pub changed: bool,
    /// Selection after the transition, canonical order.
    pub selected: Vec<ResidueId>,
}

impl SelectionEvent {
    /// Whether the targeted residue ended up added by this transition.
    #[must_use]
    pub fn added(&self) -> bool {
        self.action == SelectionAction::Select && self.accepted
    }

    /// Key of the targeted residue, resolved against `dataset`.
    #[must_use]
    pub fn residue_key<'a>(
        &self,
        dataset: &'a ResidueDataset,
    ) -> Option<&'a ResidueKey> {
        self.residue.and_then(|id| dataset.get(id)).map(|r| &r.key)
    }

    /// Keys of the resulting selection, resolved against `dataset`.
    #[must_use]
    pub fn selected_keys(&self, dataset: &ResidueDataset) -> Vec<ResidueKey> {
        self.selected
            .iter()
            .filter_map(|&id| dataset.get(id))
            .map(|r| r.key.clone())
            .collect()
    }
}

/// Selected and disabled residue sets plus the filter toggle.
#[derive(Debug, Clone)]
pub struct SelectionState {
    selected: BTreeSet<ResidueId>,
    disabled: FxHashSet<ResidueId>,
    filter_enabled: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SelectionState {
    /// Empty selection.
    #[must_use]
    pub fn new(filter_enabled: bool) -> Self {
        Self {
            selected: BTreeSet::new(),
            disabled: FxHashSet::default(),
            filter_enabled,
        }
    }

    fn event(
        &self,
        action: SelectionAction,
        residue: Option<ResidueId>,
        reason: Option<RejectReason>,
        changed: bool,
    ) -> SelectionEvent {
        SelectionEvent {
            action,
            residue,
            accepted: reason.is_none(),
            reason,
            changed,
            selected: self.ids(),
        }
    }

    /// Try to add a residue.
    ///
    /// Rejected with [`RejectReason::Limit`] when the selection is full,
    /// then with [`RejectReason::Disabled`] when the residue is disabled.
    /// Selecting an already-selected residue is accepted and changes
    /// nothing.
    pub fn select(&mut self, id: ResidueId) -> SelectionEvent {
        if self.selected.contains(&id) {
            return self.event(SelectionAction::Select, Some(id), None, false);
        }
        let reason = if self.selected.len() >= MAX_SELECTION {
            Some(RejectReason::Limit)
        } else if self.disabled.contains(&id) {
            Some(RejectReason::Disabled)
        } else {
            None
        };
        let changed = reason.is_none() && self.selected.insert(id);
        self.event(SelectionAction::Select, Some(id), reason, changed)
    }

    /// Remove a residue. Always accepted.
    pub fn deselect(&mut self, id: ResidueId) -> SelectionEvent {
        let changed = self.selected.remove(&id);
        self.event(SelectionAction::Deselect, Some(id), None, changed)
    }

    /// Select if unselected, otherwise deselect.
    pub fn toggle(&mut self, id: ResidueId) -> SelectionEvent {
        if self.selected.contains(&id) {
            self.deselect(id)
        } else {
            self.select(id)
        }
    }

    /// Empty the selection. `changed` is false when there was nothing to
    /// clear.
    pub fn clear(&mut self) -> SelectionEvent {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        self.event(SelectionAction::Clear, None, None, changed)
    }

    /// Replace the selection wholesale. Input is de-duplicated and
    /// truncated to [`MAX_SELECTION`] in canonical order; disabled rules
    /// do not apply to an externally imposed selection.
    pub fn replace(
        &mut self,
        ids: impl IntoIterator<Item = ResidueId>,
    ) -> SelectionEvent {
        let requested: BTreeSet<ResidueId> = ids.into_iter().collect();
        let next: BTreeSet<ResidueId> =
            requested.into_iter().take(MAX_SELECTION).collect();
        let changed = next != self.selected;
        self.selected = next;
        self.event(SelectionAction::Replace, None, None, changed)
    }

    /// Toggle proximity filtering. Membership is untouched; the disabled
    /// set is dropped when filtering turns off.
    pub fn set_filter_enabled(&mut self, enabled: bool) {
        self.filter_enabled = enabled;
        if !enabled {
            self.disabled.clear();
        }
    }

    /// Whether proximity filtering narrows the candidate list.
    #[must_use]
    pub fn filter_enabled(&self) -> bool {
        self.filter_enabled
    }

    /// Replace the disabled set (computed by the proximity projector).
    pub fn set_disabled(&mut self, disabled: FxHashSet<ResidueId>) {
        self.disabled = disabled;
    }

    /// Whether a new selection of `id` would be refused as disabled.
    #[must_use]
    pub fn is_disabled(&self, id: ResidueId) -> bool {
        self.disabled.contains(&id) && !self.selected.contains(&id)
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: ResidueId) -> bool {
        self.selected.contains(&id)
    }

    /// Number of selected residues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether the selection is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.selected.len() >= MAX_SELECTION
    }

    /// Selected residues in canonical order.
    #[must_use]
    pub fn selected(&self) -> &BTreeSet<ResidueId> {
        &self.selected
    }

    /// Selected residues as a vector, canonical order.
    #[must_use]
    pub fn ids(&self) -> Vec<ResidueId> {
        self.selected.iter().copied().collect()
    }

    /// Whether the selection size allows an interaction analysis.
    #[must_use]
    pub fn can_analyze(&self) -> bool {
        (MIN_ANALYSIS_SELECTION..=MAX_SELECTION).contains(&self.selected.len())
    }

    /// Forget everything: selection and disabled set. Used on reload.
    pub fn reset(&mut self) {
        self.selected.clear();
        self.disabled.clear();
    }
}
