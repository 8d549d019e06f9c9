//! Single-owner analysis state for one loaded structure.
//!
//! [`AnalysisSession`] owns the residue dataset, contact map, interaction
//! cache, selection, proximity filter and the debounced threshold. Every
//! new structure replaces all of them together; loads are tagged with
//! [`RequestToken`]s so a late completion cannot overwrite a newer one.

mod announce;
mod command;
mod observer;

pub use announce::Announcement;
pub use command::AnalysisCommand;
pub use observer::SessionObserver;
use web_time::Instant;

use crate::contact::ContactMap;
use crate::error::ProximaError;
use crate::filter::{clamp_threshold, CandidateList, FilterState};
use crate::interaction::{InteractionCache, InteractionSet};
use crate::options::AnalysisOptions;
use crate::render::render_interactions;
use crate::residue::{ResidueDataset, ResidueId, ResidueKey};
use crate::schedule::{Debouncer, RequestToken, RequestTracker};
use crate::selection::{SelectionEvent, SelectionState};
use crate::structure::Structure;

/// Everything derived from one structure. Replaced wholesale on reload.
struct Loaded {
    dataset: ResidueDataset,
    contacts: ContactMap,
    cache: InteractionCache,
}

/// Result of completing a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The token was current; session state was replaced.
    Applied,
    /// A newer load was started; the result was discarded.
    Stale,
}

/// Analysis session. `O` receives events, announcements and geometry.
pub struct AnalysisSession<O = ()> {
    options: AnalysisOptions,
    tracker: RequestTracker,
    loaded: Option<Loaded>,
    selection: SelectionState,
    filter: FilterState,
    threshold_debounce: Debouncer<f32>,
    query: String,
    last_analysis: Option<InteractionSet>,
    observer: O,
}

impl AnalysisSession {
    /// Headless session.
    #[must_use]
    pub fn new(options: AnalysisOptions) -> Self {
        Self::with_observer(options, ())
    }
}

impl<O: SessionObserver> AnalysisSession<O> {
    /// Session reporting to `observer`.
    pub fn with_observer(options: AnalysisOptions, observer: O) -> Self {
        Self {
            tracker: RequestTracker::new(),
            loaded: None,
            selection: SelectionState::new(options.filter.filter_enabled),
            filter: FilterState::new(options.filter.threshold()),
            threshold_debounce: Debouncer::new(options.filter.debounce()),
            query: String::new(),
            last_analysis: None,
            observer,
            options,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Options the session was created with.
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The observer, mutably.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Current residue dataset, if a structure is loaded.
    pub fn dataset(&self) -> Option<&ResidueDataset> {
        self.loaded.as_ref().map(|l| &l.dataset)
    }

    /// Current contact map, if a structure is loaded.
    pub fn contacts(&self) -> Option<&ContactMap> {
        self.loaded.as_ref().map(|l| &l.contacts)
    }

    /// Current interaction cache, if a structure is loaded.
    pub fn interaction_cache(&self) -> Option<&InteractionCache> {
        self.loaded.as_ref().map(|l| &l.cache)
    }

    /// Selection state.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Proximity filter state.
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Result of the most recent analysis on this structure.
    pub fn last_analysis(&self) -> Option<&InteractionSet> {
        self.last_analysis.as_ref()
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Start a load; any load started earlier becomes stale.
    pub fn begin_load(&mut self) -> RequestToken {
        let token = self.tracker.begin();
        log::debug!("load {} started", token.generation());
        token
    }

    /// Complete a load. If `token` is still current, rebuild every derived
    /// structure from `structure` and reset selection and filter.
    pub fn finish_load(
        &mut self,
        token: RequestToken,
        structure: &Structure,
    ) -> LoadOutcome {
        if !self.tracker.is_current(token) {
            log::debug!("discarding stale load {}", token.generation());
            return LoadOutcome::Stale;
        }
        let dataset = ResidueDataset::build(structure);
        let contacts =
            ContactMap::build(&dataset, self.options.contacts.distance_mode);
        log::info!(
            "loaded {} residues, {} contacts",
            dataset.len(),
            contacts.contact_count()
        );

        self.reset_state();
        let loaded = self.loaded.insert(Loaded {
            dataset,
            contacts,
            cache: InteractionCache::new(),
        });
        self.observer.structure_loaded(&loaded.dataset);
        self.refresh();
        LoadOutcome::Applied
    }

    /// Complete a load that failed. If `token` is still current the
    /// previous structure is dropped along with all derived state.
    pub fn fail_load(
        &mut self,
        token: RequestToken,
        error: &ProximaError,
    ) -> LoadOutcome {
        if !self.tracker.is_current(token) {
            log::debug!("discarding stale failure {}", token.generation());
            return LoadOutcome::Stale;
        }
        log::warn!("structure load failed: {error}");
        self.reset_state();
        self.loaded = None;
        self.observer.structure_cleared();
        self.refresh();
        LoadOutcome::Applied
    }

    /// Load synchronously (begin + finish).
    pub fn load(&mut self, structure: &Structure) -> LoadOutcome {
        let token = self.begin_load();
        self.finish_load(token, structure)
    }

    /// Load a PDB/mmCIF file synchronously.
    #[cfg(feature = "pdb")]
    pub fn load_path(
        &mut self,
        path: &std::path::Path,
    ) -> Result<LoadOutcome, ProximaError> {
        let token = self.begin_load();
        match crate::structure::load_structure(path) {
            Ok(structure) => Ok(self.finish_load(token, &structure)),
            Err(e) => {
                let _ = self.fail_load(token, &e);
                Err(e)
            }
        }
    }

    fn reset_state(&mut self) {
        self.selection.reset();
        self.selection
            .set_filter_enabled(self.options.filter.filter_enabled);
        self.filter = FilterState::new(self.options.filter.threshold());
        let _ = self.threshold_debounce.cancel();
        self.query.clear();
        self.last_analysis = None;
    }

    // ── Selection ───────────────────────────────────────────────────

    fn resolve(&self, key: &ResidueKey) -> Option<ResidueId> {
        let id = self.dataset()?.id_of(key);
        if id.is_none() {
            log::debug!("ignoring unknown residue {key}");
        }
        id
    }

    fn transition(
        &mut self,
        key: &ResidueKey,
        op: fn(&mut SelectionState, ResidueId) -> SelectionEvent,
    ) -> Option<SelectionEvent> {
        let id = self.resolve(key)?;
        let event = op(&mut self.selection, id);
        self.after_transition(&event, false);
        Some(event)
    }

    fn after_transition(&mut self, event: &SelectionEvent, from_search: bool) {
        self.refresh();
        let Some(loaded) = &self.loaded else {
            return;
        };
        self.observer.selection_changed(event, &loaded.dataset);
        let announcement =
            Announcement::for_event(event, &loaded.dataset, from_search);
        log::debug!("{announcement}");
        self.observer.announce(&announcement);
    }

    /// Try to add a residue. `None` when no structure is loaded or the key
    /// is unknown.
    pub fn select(&mut self, key: &ResidueKey) -> Option<SelectionEvent> {
        self.transition(key, SelectionState::select)
    }

    /// Remove a residue. `None` when the key is unknown.
    pub fn deselect(&mut self, key: &ResidueKey) -> Option<SelectionEvent> {
        self.transition(key, SelectionState::deselect)
    }

    /// Flip a residue's membership. `None` when the key is unknown.
    pub fn toggle(&mut self, key: &ResidueKey) -> Option<SelectionEvent> {
        self.transition(key, SelectionState::toggle)
    }

    /// Empty the selection.
    pub fn clear(&mut self) -> SelectionEvent {
        let event = self.selection.clear();
        self.after_transition(&event, false);
        event
    }

    /// Replace the selection with `keys`. Unknown keys are dropped; `None`
    /// when no structure is loaded.
    pub fn replace_selection<'k>(
        &mut self,
        keys: impl IntoIterator<Item = &'k ResidueKey>,
    ) -> Option<SelectionEvent> {
        let dataset = self.dataset()?;
        let mut ids = Vec::new();
        for key in keys {
            match dataset.id_of(key) {
                Some(id) => ids.push(id),
                None => log::warn!("replace_selection: unknown residue {key}"),
            }
        }
        let event = self.selection.replace(ids);
        self.after_transition(&event, false);
        Some(event)
    }

    // ── Proximity filter ────────────────────────────────────────────

    fn refresh(&mut self) {
        match self.loaded.as_mut() {
            Some(loaded) => self.filter.refresh(
                &loaded.dataset,
                &loaded.contacts,
                &mut loaded.cache,
                &mut self.selection,
            ),
            None => self.filter.reset(),
        }
        self.observer.filter_changed(&self.filter);
    }

    /// Enable or disable proximity filtering. Selection membership is
    /// unchanged; an actual change is announced.
    pub fn set_filter_enabled(&mut self, enabled: bool) {
        let changed = self.selection.filter_enabled() != enabled;
        self.selection.set_filter_enabled(enabled);
        self.refresh();
        if changed {
            let announcement = Announcement::FilterEnabled(enabled);
            log::debug!("{announcement}");
            self.observer.announce(&announcement);
        }
    }

    /// Request a threshold change at `now`. The value is clamped and
    /// applied by [`poll`](Self::poll) once the debounce period has passed
    /// without another request. Returns the clamped value.
    pub fn set_threshold(&mut self, value: f32, now: Instant) -> f32 {
        let clamped = clamp_threshold(value);
        self.threshold_debounce.schedule(clamped, now);
        clamped
    }

    /// Threshold waiting in the debouncer, if any.
    pub fn pending_threshold(&self) -> Option<f32> {
        self.threshold_debounce.peek().copied()
    }

    /// Apply a due threshold change. Returns whether the projection was
    /// recomputed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.threshold_debounce.poll(now) {
            Some(threshold) => self.apply_threshold(threshold),
            None => false,
        }
    }

    /// Apply a pending threshold change immediately.
    pub fn flush_threshold(&mut self) -> bool {
        match self.threshold_debounce.cancel() {
            Some(threshold) => self.apply_threshold(threshold),
            None => false,
        }
    }

    fn apply_threshold(&mut self, threshold: f32) -> bool {
        if !self.filter.set_threshold(threshold) {
            return false;
        }
        log::debug!("proximity threshold now {threshold} Å");
        self.refresh();
        true
    }

    // ── Candidates & search ─────────────────────────────────────────

    /// Candidate list for the current state and search query.
    pub fn candidates(&self) -> CandidateList {
        self.dataset().map_or_else(CandidateList::default, |dataset| {
            CandidateList::build(
                dataset,
                &self.selection,
                &self.filter,
                &self.query,
            )
        })
    }

    /// Current search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Set the search query and return the filtered candidate list.
    pub fn search(&mut self, query: &str) -> CandidateList {
        query.trim().clone_into(&mut self.query);
        self.candidates()
    }

    /// Select the first visible candidate that is not yet selected, through
    /// the normal selection rules.
    pub fn submit_search(&mut self) -> Option<SelectionEvent> {
        if !self.options.search.select_first_on_submit {
            return None;
        }
        let id = self.candidates().visible().find(|c| !c.selected)?.id;
        let event = self.selection.select(id);
        self.after_transition(&event, true);
        Some(event)
    }

    // ── Analysis ────────────────────────────────────────────────────

    /// Whether [`analyze`](Self::analyze) would run.
    pub fn can_analyze(&self) -> bool {
        self.loaded.is_some() && self.selection.can_analyze()
    }

    /// Classify every pair of selected residues, draw the result into the
    /// observer and announce the count. `None` unless 2..=10 residues are
    /// selected.
    pub fn analyze(&mut self) -> Option<&InteractionSet> {
        if !self.can_analyze() {
            log::debug!(
                "analysis needs 2..=10 residues, have {}",
                self.selection.len()
            );
            return None;
        }
        let loaded = self.loaded.as_ref()?;
        let set =
            InteractionSet::analyze(&loaded.dataset, &self.selection.ids());
        render_interactions(&mut self.observer, &loaded.dataset, &set);
        self.observer.analysis_ready(&set, &loaded.dataset);

        let announcement = if set.is_empty() {
            Announcement::NoInteractionsFound
        } else {
            Announcement::InteractionsFound(set.len())
        };
        log::info!("{announcement}");
        self.observer.announce(&announcement);
        Some(&*self.last_analysis.insert(set))
    }

    // ── Commands ────────────────────────────────────────────────────

    /// Execute a command at time `now` (used for debounced threshold
    /// changes).
    pub fn execute(&mut self, command: AnalysisCommand, now: Instant) {
        match command {
            AnalysisCommand::Select { key } => {
                let _ = self.select(&key);
            }
            AnalysisCommand::Deselect { key } => {
                let _ = self.deselect(&key);
            }
            AnalysisCommand::Toggle { key } => {
                let _ = self.toggle(&key);
            }
            AnalysisCommand::Clear => {
                let _ = self.clear();
            }
            AnalysisCommand::ReplaceSelection { keys } => {
                let _ = self.replace_selection(&keys);
            }
            AnalysisCommand::SetFilterEnabled { enabled } => {
                self.set_filter_enabled(enabled);
            }
            AnalysisCommand::SetThreshold { value } => {
                let _ = self.set_threshold(value, now);
            }
            AnalysisCommand::Search { query } => {
                let _ = self.search(&query);
            }
            AnalysisCommand::SubmitSearch => {
                let _ = self.submit_search();
            }
            AnalysisCommand::Analyze => {
                let _ = self.analyze();
            }
        }
    }
}
