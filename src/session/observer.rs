use crate::filter::FilterState;
use crate::interaction::InteractionSet;
use crate::render::InteractionRenderer;
use crate::residue::ResidueDataset;
use crate::selection::SelectionEvent;

use super::Announcement;

/// Receives everything the session produces for the outside world.
///
/// All methods default to no-ops. The observer is also the renderer that
/// analysis results are drawn into.
pub trait SessionObserver: InteractionRenderer {
    /// A structure finished loading and replaced the previous one.
    fn structure_loaded(&mut self, _dataset: &ResidueDataset) {}

    /// The current structure was dropped after a failed load.
    fn structure_cleared(&mut self) {}

    /// A selection transition happened (accepted or not).
    fn selection_changed(
        &mut self,
        _event: &SelectionEvent,
        _dataset: &ResidueDataset,
    ) {
    }

    /// The proximity projection or threshold changed.
    fn filter_changed(&mut self, _filter: &FilterState) {}

    /// An analysis completed.
    fn analysis_ready(
        &mut self,
        _set: &InteractionSet,
        _dataset: &ResidueDataset,
    ) {
    }

    /// A status line should be spoken/shown.
    fn announce(&mut self, _announcement: &Announcement) {}
}

impl SessionObserver for () {}
