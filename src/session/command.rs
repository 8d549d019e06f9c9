//! The session's complete interactive vocabulary.
//!
//! Every user-facing operation, whether it comes from a checkbox, a slider,
//! the search box or a script, is an [`AnalysisCommand`] passed to
//! [`AnalysisSession::execute`](super::AnalysisSession::execute).

use crate::residue::ResidueKey;

/// A discrete or parameterized operation the session can perform.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisCommand {
    // ── Selection ───────────────────────────────────────────────────
    /// Add a residue to the selection.
    Select {
        /// Residue to add.
        key: ResidueKey,
    },

    /// Remove a residue from the selection.
    Deselect {
        /// Residue to remove.
        key: ResidueKey,
    },

    /// Flip a residue's membership.
    Toggle {
        /// Residue to flip.
        key: ResidueKey,
    },

    /// Empty the selection.
    Clear,

    /// Replace the selection (e.g. from clicks in a 3-D view).
    ReplaceSelection {
        /// New selection; unknown keys are dropped.
        keys: Vec<ResidueKey>,
    },

    // ── Proximity filter ────────────────────────────────────────────
    /// Enable or disable proximity filtering.
    SetFilterEnabled {
        /// New state.
        enabled: bool,
    },

    /// Request a new proximity threshold (debounced).
    SetThreshold {
        /// Angstroms; clamped into range.
        value: f32,
    },

    // ── Search ──────────────────────────────────────────────────────
    /// Update the candidate search query.
    Search {
        /// Search box text.
        query: String,
    },

    /// Select the first visible, unselected candidate.
    SubmitSearch,

    // ── Analysis ────────────────────────────────────────────────────
    /// Classify interactions among the selected residues.
    Analyze,
}
