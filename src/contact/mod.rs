//! Symmetric residue-residue contact map over side-chain atoms.
//!
//! Built once per structure load. A pair is in contact when some pair of
//! their side-chain atoms (CA for residues without a side chain) lies
//! within [`CONTACT_CUTOFF`]. Absent entries mean "no contact within the
//! cutoff", not "infinitely far".

use rustc_hash::FxHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::residue::{ResidueDataset, ResidueId};

/// Maximum side-chain separation (Angstroms) for a registered contact.
pub const CONTACT_CUTOFF: f32 = 5.0;

/// Which distance a contact entry records.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ContactDistanceMode {
    /// Stop at the first atom pair within the cutoff and record that
    /// distance. Cheaper; the value may overestimate the true minimum.
    #[default]
    FirstWithinCutoff,
    /// Scan every atom pair and record the true minimum.
    ExactMinimum,
}

/// Residue → (neighbor → recorded distance), symmetric, no self entries.
#[derive(Debug, Clone, Default)]
pub struct ContactMap {
    rows: Vec<FxHashMap<ResidueId, f32>>,
}

impl ContactMap {
    /// Compute contacts for every unordered residue pair.
    #[must_use]
    pub fn build(dataset: &ResidueDataset, mode: ContactDistanceMode) -> Self {
        let residues = dataset.residues();
        let mut rows = vec![FxHashMap::default(); residues.len()];

        for (i, a) in residues.iter().enumerate() {
            for b in &residues[i + 1..] {
                let Some(d) = side_chain_contact(
                    dataset,
                    &a.side_chain_atoms,
                    &b.side_chain_atoms,
                    mode,
                ) else {
                    continue;
                };
                let _ = rows[a.id.index()].insert(b.id, d);
                let _ = rows[b.id.index()].insert(a.id, d);
            }
        }

        let map = Self { rows };
        log::debug!(
            "contact map: {} residues, {} contacts ({mode:?})",
            map.residue_count(),
            map.contact_count()
        );
        map
    }

    /// Number of residues the map was built over.
    #[must_use]
    pub fn residue_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether no residue has any contact.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(FxHashMap::is_empty)
    }

    /// Number of unordered residue pairs in contact.
    #[must_use]
    pub fn contact_count(&self) -> usize {
        self.rows.iter().map(FxHashMap::len).sum::<usize>() / 2
    }

    /// Recorded distance between two residues, if they are in contact.
    #[must_use]
    pub fn distance(&self, a: ResidueId, b: ResidueId) -> Option<f32> {
        self.rows.get(a.index())?.get(&b).copied()
    }

    /// All neighbors of `id` (unordered).
    pub fn neighbors(
        &self,
        id: ResidueId,
    ) -> impl Iterator<Item = (ResidueId, f32)> + '_ {
        self.rows
            .get(id.index())
            .into_iter()
            .flat_map(|row| row.iter().map(|(&n, &d)| (n, d)))
    }

    /// Neighbors of `id` with recorded distance ≤ `threshold`, in
    /// canonical order.
    #[must_use]
    pub fn neighbors_within(
        &self,
        id: ResidueId,
        threshold: f32,
    ) -> Vec<(ResidueId, f32)> {
        let mut out: Vec<_> =
            self.neighbors(id).filter(|&(_, d)| d <= threshold).collect();
        out.sort_unstable_by_key(|&(n, _)| n);
        out
    }
}

/// Side-chain separation of two atom sets, if within the cutoff.
fn side_chain_contact(
    dataset: &ResidueDataset,
    atoms_a: &[usize],
    atoms_b: &[usize],
    mode: ContactDistanceMode,
) -> Option<f32> {
    let cutoff_sq = CONTACT_CUTOFF * CONTACT_CUTOFF;
    let mut best_sq = f32::INFINITY;

    'outer: for &ia in atoms_a {
        let Some(pa) = dataset.position(ia) else {
            continue;
        };
        for &ib in atoms_b {
            let Some(pb) = dataset.position(ib) else {
                continue;
            };
            let d_sq = pa.distance_squared(pb);
            if d_sq < best_sq {
                best_sq = d_sq;
                if mode == ContactDistanceMode::FirstWithinCutoff
                    && best_sq <= cutoff_sq
                {
                    break 'outer;
                }
            }
        }
    }

    (best_sq <= cutoff_sq).then(|| best_sq.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::residue::ResidueKey;
    use crate::structure::{Structure, StructureBuilder};

    fn line_of_serines(n: usize, spacing: f32) -> Structure {
        let mut b = StructureBuilder::new();
        for i in 0..n {
            let x = i as f32 * spacing;
            b = b
                .residue("A", i as i32 + 1, "SER")
                .atom("CA", [x, 0.0, 0.0])
                .atom("OG", [x, 1.0, 0.0]);
        }
        b.build()
    }

    fn id(ds: &ResidueDataset, n: i32) -> ResidueId {
        ds.id_of(&ResidueKey::new("A", n)).unwrap()
    }

    #[test]
    fn contacts_are_symmetric_and_within_cutoff() {
        let ds = ResidueDataset::build(&line_of_serines(8, 2.0));
        let map = ContactMap::build(&ds, ContactDistanceMode::ExactMinimum);
        for r in ds.iter() {
            for (n, d) in map.neighbors(r.id) {
                assert_ne!(n, r.id);
                assert!((0.0..=CONTACT_CUTOFF).contains(&d));
                assert_eq!(map.distance(n, r.id), Some(d));
            }
        }
        // 2 Å spacing: neighbors at 2 and 4 Å, not 6 Å
        assert!(map.distance(id(&ds, 1), id(&ds, 3)).is_some());
        assert!(map.distance(id(&ds, 1), id(&ds, 4)).is_none());
        assert_eq!(map.contact_count(), 7 + 6);
    }

    #[test]
    fn boundary_distance_counts_as_contact() {
        let ds = ResidueDataset::build(&line_of_serines(2, 5.0));
        let map = ContactMap::build(&ds, ContactDistanceMode::ExactMinimum);
        let d = map.distance(id(&ds, 1), id(&ds, 2)).unwrap();
        assert!((d - 5.0).abs() < 1e-5);
    }

    fn two_residue_spread() -> ResidueDataset {
        let s = StructureBuilder::new()
            .residue("A", 1, "SER")
            .atom("CA", [0.0, 0.0, -3.0])
            .atom("OG", [0.0, 0.0, 0.0])
            .residue("A", 2, "LYS")
            .atom("CA", [9.0, 0.0, 0.0])
            .atom("CE", [4.5, 0.0, 0.0])
            .atom("NZ", [3.0, 0.0, 0.0])
            .build();
        ResidueDataset::build(&s)
    }

    #[test]
    fn first_within_cutoff_records_first_crossing() {
        let ds = two_residue_spread();
        let map =
            ContactMap::build(&ds, ContactDistanceMode::FirstWithinCutoff);
        let d = map.distance(id(&ds, 1), id(&ds, 2)).unwrap();
        assert!((d - 4.5).abs() < 1e-5);
    }

    #[test]
    fn exact_minimum_scans_all_pairs() {
        let ds = two_residue_spread();
        let map = ContactMap::build(&ds, ContactDistanceMode::ExactMinimum);
        let d = map.distance(id(&ds, 1), id(&ds, 2)).unwrap();
        assert!((d - 3.0).abs() < 1e-5);
    }

    #[test]
    fn glycine_uses_ca_fallback() {
        let s = StructureBuilder::new()
            .residue("A", 1, "GLY")
            .atom("N", [0.0, 0.0, 0.0])
            .atom("CA", [1.0, 0.0, 0.0])
            .residue("A", 2, "GLY")
            .atom("N", [1.5, 0.0, 0.0])
            .atom("CA", [7.0, 0.0, 0.0])
            .build();
        let ds = ResidueDataset::build(&s);
        let map = ContactMap::build(&ds, ContactDistanceMode::ExactMinimum);
        // Backbone N atoms are 1.5 Å apart but only CA-CA (6 Å) counts.
        assert!(map.is_empty());
    }

    #[test]
    fn neighbors_within_filters_and_orders() {
        let ds = ResidueDataset::build(&line_of_serines(5, 2.0));
        let map = ContactMap::build(&ds, ContactDistanceMode::ExactMinimum);
        let near = map.neighbors_within(id(&ds, 3), 2.5);
        let ids: Vec<_> = near.iter().map(|&(n, _)| n).collect();
        assert_eq!(ids, vec![id(&ds, 2), id(&ds, 4)]);
    }

    #[test]
    fn empty_dataset_builds_empty_map() {
        let map = ContactMap::build(
            &ResidueDataset::default(),
            ContactDistanceMode::default(),
        );
        assert_eq!(map.residue_count(), 0);
        assert!(map.is_empty());
        assert_eq!(map.neighbors(ResidueId(0)).count(), 0);
    }
}
