use std::fmt;

use crate::residue::ResidueDataset;
use crate::selection::{
    RejectReason, SelectionAction, SelectionEvent, MAX_SELECTION,
};

/// Status line for an accessibility live region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Announcement {
    /// A residue was added.
    Selected(String),
    /// A residue was added from the search box.
    SelectedFromSearch(String),
    /// A residue was removed.
    Deselected(String),
    /// A selection was refused because the selection is full.
    LimitReached,
    /// A selection was refused because the residue is disabled.
    NoInteractionsAvailable,
    /// The selection was emptied.
    AllCleared,
    /// A clear was requested with nothing selected.
    NothingSelected,
    /// Generic count after any other change.
    SelectionCount(usize),
    /// An analysis ran and found nothing.
    NoInteractionsFound,
    /// An analysis ran and found this many records.
    InteractionsFound(usize),
    /// Proximity filtering was switched on (`true`) or off.
    FilterEnabled(bool),
}

impl Announcement {
    /// Announcement for a selection transition. Labels are resolved
    /// against `dataset`.
    #[must_use]
    pub fn for_event(
        event: &SelectionEvent,
        dataset: &ResidueDataset,
        from_search: bool,
    ) -> Self {
        let label = || {
            event
                .residue
                .map_or_else(String::new, |id| dataset.label(id).to_owned())
        };
        match (event.action, event.reason) {
            (_, Some(RejectReason::Limit)) => Self::LimitReached,
            (_, Some(RejectReason::Disabled)) => Self::NoInteractionsAvailable,
            (SelectionAction::Select, None) if event.changed => {
                if from_search {
                    Self::SelectedFromSearch(label())
                } else {
                    Self::Selected(label())
                }
            }
            (SelectionAction::Deselect, None) if event.changed => {
                Self::Deselected(label())
            }
            (SelectionAction::Clear, None) if event.changed => Self::AllCleared,
            (SelectionAction::Clear, None) => Self::NothingSelected,
            _ => Self::SelectionCount(event.selected.len()),
        }
    }
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selected(label) => write!(f, "{label} selected."),
            Self::SelectedFromSearch(label) => {
                write!(f, "{label} selected from search results.")
            }
            Self::Deselected(label) => write!(f, "{label} deselected."),
            Self::LimitReached => {
                write!(f, "Maximum of {MAX_SELECTION} residues reached.")
            }
            Self::NoInteractionsAvailable => {
                f.write_str("No interactions available. Selection unchanged.")
            }
            Self::AllCleared => f.write_str("All selections cleared."),
            Self::NothingSelected => {
                f.write_str("No residues currently selected.")
            }
            Self::SelectionCount(n) => write!(f, "Selected {n} residue(s)."),
            Self::NoInteractionsFound => f.write_str("No interactions found."),
            Self::InteractionsFound(n) => {
                write!(f, "Found {n} interaction(s).")
            }
            Self::FilterEnabled(true) => {
                f.write_str("Proximity filter on. Showing nearby residues.")
            }
            Self::FilterEnabled(false) => {
                f.write_str("Proximity filter off. Showing all residues.")
            }
        }
    }
}
