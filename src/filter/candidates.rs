//! Ordered candidate list for the residue picker.

use rustc_hash::FxHashSet;
use serde::Serialize;

use super::FilterState;
use crate::residue::{ResidueDataset, ResidueId, ResidueKey};
use crate::selection::SelectionState;

/// Ordering bucket of a candidate. Variants are in display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CandidateGroup {
    /// Currently selected.
    Selected,
    /// Near a selected residue and interacting with it.
    Interaction,
    /// Near a selected residue.
    Proximity,
    /// Everything else.
    Rest,
}

impl CandidateGroup {
    /// Whether the group sits above the proximity divider.
    #[must_use]
    pub fn in_scope(self) -> bool {
        self != Self::Rest
    }
}

/// One row of the candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Residue id.
    pub id: ResidueId,
    /// Residue key.
    pub key: ResidueKey,
    /// Display label.
    pub label: String,
    /// Ordering bucket.
    pub group: CandidateGroup,
    /// Selected.
    pub selected: bool,
    /// Blocked from new selection.
    pub disabled: bool,
    /// Near a selection; only flagged when neither selected nor
    /// interacting.
    pub in_proximity: bool,
    /// Interacts with a nearby selected residue.
    pub has_interaction: bool,
    /// Matches the active search query.
    pub visible: bool,
}

/// Position and text of the separator between in-scope and other rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Divider {
    /// Index of the first row below the divider.
    pub index: usize,
    /// e.g. `"---- Proximity limit 3.5Å ----"`.
    pub label: String,
}

/// Candidate rows in display order plus the optional divider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CandidateList {
    /// Rows: selected, interacting, proximal, rest; canonical order within
    /// each group.
    pub items: Vec<Candidate>,
    /// Present when there is at least one in-scope row and one other row,
    /// and no search query is active.
    pub divider: Option<Divider>,
}

/// `"---- Proximity limit 5Å ----"`, one decimal with a trailing `.0`
/// dropped.
#[must_use]
pub fn divider_label(threshold: f32) -> String {
    let formatted = format!("{threshold:.1}");
    let trimmed = formatted.strip_suffix(".0").unwrap_or(&formatted);
    format!("---- Proximity limit {trimmed}Å ----")
}

impl CandidateList {
    /// Build the list for the current selection and filter. `query` is the
    /// search box text; rows whose label does not contain it are marked
    /// invisible.
    #[must_use]
    pub fn build(
        dataset: &ResidueDataset,
        selection: &SelectionState,
        filter: &FilterState,
        query: &str,
    ) -> Self {
        let projection = filter.projection();
        let searching = !query.trim().is_empty();
        let matches: FxHashSet<ResidueId> =
            dataset.matching(query).into_iter().collect();

        let mut items: Vec<Candidate> = dataset
            .iter()
            .map(|r| {
                let selected = selection.is_selected(r.id);
                let has_interaction =
                    projection.has_interaction.contains(&r.id);
                let near = projection.in_proximity.contains(&r.id);
                let group = if selected {
                    CandidateGroup::Selected
                } else if has_interaction {
                    CandidateGroup::Interaction
                } else if near {
                    CandidateGroup::Proximity
                } else {
                    CandidateGroup::Rest
                };
                Candidate {
                    id: r.id,
                    key: r.key.clone(),
                    label: r.label.clone(),
                    group,
                    selected,
                    disabled: selection.is_disabled(r.id),
                    in_proximity: near && !selected && !has_interaction,
                    has_interaction,
                    visible: matches.contains(&r.id),
                }
            })
            .collect();
        // stable: canonical order survives within each group
        items.sort_by_key(|c| c.group);

        let boundary = items.iter().position(|c| !c.group.in_scope());
        let divider = match boundary {
            Some(index) if index > 0 && !searching => Some(Divider {
                index,
                label: divider_label(filter.threshold()),
            }),
            _ => None,
        };

        Self { items, divider }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rows matching the search query, in display order.
    pub fn visible(&self) -> impl Iterator<Item = &Candidate> {
        self.items.iter().filter(|c| c.visible)
    }

    /// Row for a residue.
    #[must_use]
    pub fn get(&self, id: ResidueId) -> Option<&Candidate> {
        self.items.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{ContactDistanceMode, ContactMap};
    use crate::interaction::InteractionCache;
    use crate::structure::StructureBuilder;

    fn dataset() -> ResidueDataset {
        let s = StructureBuilder::new()
            .residue("A", 1, "LYS")
            .atom("NZ", [0.0, 0.0, 0.0])
            .residue("A", 2, "LEU")
            .atom("CD1", [0.0, 2.0, 0.0])
            .residue("A", 3, "ALA")
            .atom("CB", [30.0, 0.0, 0.0])
            .residue("A", 4, "GLU")
            .atom("OE1", [3.0, 0.0, 0.0])
            .residue("B", 1, "GLY")
            .atom("CA", [40.0, 0.0, 0.0])
            .build();
        ResidueDataset::build(&s)
    }

    fn build(selected: &[u32], threshold: f32, query: &str) -> CandidateList {
        let ds = dataset();
        let map = ContactMap::build(&ds, ContactDistanceMode::default());
        let mut cache = InteractionCache::new();
        let mut selection = SelectionState::default();
        for &id in selected {
            let _ = selection.select(ResidueId(id));
        }
        let mut filter = FilterState::new(threshold);
        filter.refresh(&ds, &map, &mut cache, &mut selection);
        CandidateList::build(&ds, &selection, &filter, query)
    }

    fn labels(list: &CandidateList) -> Vec<&str> {
        list.items.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn orders_selected_interaction_proximity_rest() {
        let list = build(&[0], 5.0, "");
        assert_eq!(
            labels(&list),
            ["LYS A1", "GLU A4", "LEU A2", "ALA A3", "GLY B1"]
        );
        let groups: Vec<_> = list.items.iter().map(|c| c.group).collect();
        assert_eq!(
            groups,
            [
                CandidateGroup::Selected,
                CandidateGroup::Interaction,
                CandidateGroup::Proximity,
                CandidateGroup::Rest,
                CandidateGroup::Rest,
            ]
        );
        let divider = list.divider.as_ref().unwrap();
        assert_eq!(divider.index, 3);
        assert_eq!(divider.label, "---- Proximity limit 5Å ----");
    }

    #[test]
    fn flags_follow_groups() {
        let list = build(&[0], 5.0, "");
        let lys = list.get(ResidueId(0)).unwrap();
        assert!(lys.selected && !lys.disabled && !lys.in_proximity);
        let glu = list.get(ResidueId(3)).unwrap();
        assert!(glu.has_interaction && !glu.in_proximity);
        let leu = list.get(ResidueId(1)).unwrap();
        assert!(leu.in_proximity && !leu.has_interaction);
        let ala = list.get(ResidueId(2)).unwrap();
        assert!(ala.disabled);
    }

    #[test]
    fn no_selection_keeps_canonical_order_without_divider() {
        let list = build(&[], 5.0, "");
        assert_eq!(
            labels(&list),
            ["LYS A1", "LEU A2", "ALA A3", "GLU A4", "GLY B1"]
        );
        assert!(list.divider.is_none());
        assert!(list.items.iter().all(|c| !c.disabled));
    }

    #[test]
    fn search_query_hides_rows_and_divider() {
        let list = build(&[0], 2.5, "a3");
        assert!(list.divider.is_none());
        let visible: Vec<_> =
            list.visible().map(|c| c.label.as_str()).collect();
        assert_eq!(visible, ["ALA A3"]);
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn visible_rows_agree_with_dataset_search() {
        let ds = dataset();
        for query in ["", "  GLU ", "a", "b1", "zzz"] {
            let list = build(&[0], 5.0, query);
            let mut visible: Vec<ResidueId> =
                list.visible().map(|c| c.id).collect();
            visible.sort();
            assert_eq!(visible, ds.matching(query), "query {query:?}");
        }
    }

    #[test]
    fn divider_label_trims_trailing_zero() {
        assert_eq!(divider_label(5.0), "---- Proximity limit 5Å ----");
        assert_eq!(divider_label(3.5), "---- Proximity limit 3.5Å ----");
        assert_eq!(divider_label(1.0), "---- Proximity limit 1Å ----");
    }

    #[test]
    fn empty_dataset_gives_empty_list() {
        let list = CandidateList::build(
            &ResidueDataset::default(),
            &SelectionState::default(),
            &FilterState::default(),
            "",
        );
        assert!(list.is_empty());
        assert!(list.divider.is_none());
    }
}
