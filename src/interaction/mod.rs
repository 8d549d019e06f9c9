//! Geometric side-chain interaction rules.
//!
//! [`classify`] applies fixed distance heuristics to a residue pair:
//! hydrogen bonds between donor/acceptor atoms, salt bridges and longer
//! range ionic contacts between oppositely charged atoms, and SG–SG
//! disulfides between cysteines. Rules are independent, so one pair can
//! yield several records. No bond topology or energy model is involved.

mod cache;
pub mod tables;

use std::collections::BTreeSet;

pub use cache::{InteractionCache, ResiduePair};
use serde::Serialize;

use crate::residue::{ResidueDataset, ResidueId, ResidueRecord};

/// Maximum donor–acceptor distance for a hydrogen bond (Angstroms).
pub const HYDROGEN_BOND_MAX: f32 = 3.5;
/// Maximum charged-atom distance for a salt bridge (Angstroms).
pub const SALT_BRIDGE_MAX: f32 = 4.0;
/// Maximum charged-atom distance for an ionic interaction (Angstroms).
pub const IONIC_MAX: f32 = 6.0;
/// Maximum SG–SG distance for a disulfide bond (Angstroms).
pub const DISULFIDE_MAX: f32 = 2.2;

/// Type of detected interaction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// Donor–acceptor pair within [`HYDROGEN_BOND_MAX`].
    HydrogenBond,
    /// Oppositely charged atoms within [`SALT_BRIDGE_MAX`].
    SaltBridge,
    /// Oppositely charged atoms beyond [`SALT_BRIDGE_MAX`], within
    /// [`IONIC_MAX`].
    IonicInteraction,
    /// Cysteine SG atoms within [`DISULFIDE_MAX`].
    DisulfideBond,
}

impl InteractionKind {
    /// Human-readable name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::HydrogenBond => "Hydrogen Bond",
            Self::SaltBridge => "Salt Bridge",
            Self::IonicInteraction => "Ionic Interaction",
            Self::DisulfideBond => "Disulfide Bond",
        }
    }

    /// Style class for UI rendering (legend entries, list rows).
    #[must_use]
    pub fn color_class(self) -> &'static str {
        match self {
            Self::HydrogenBond => "interaction-hbond",
            Self::SaltBridge => "interaction-salt-bridge",
            Self::IonicInteraction => "interaction-ionic",
            Self::DisulfideBond => "interaction-disulfide",
        }
    }

    /// Linear RGB used for connecting geometry.
    #[must_use]
    pub fn color(self) -> [f32; 3] {
        match self {
            // cyan
            Self::HydrogenBond => [0.2, 0.8, 0.9],
            // magenta
            Self::SaltBridge => [0.85, 0.25, 0.75],
            // pale violet
            Self::IonicInteraction => [0.65, 0.55, 0.9],
            // yellow
            Self::DisulfideBond => [0.95, 0.85, 0.2],
        }
    }
}

/// One detected interaction between two atoms of two residues.
///
/// Orientation is canonical so that classifying (A, B) and (B, A) gives
/// equal records: `atom_a` is the donor (hydrogen bond) or the positive
/// atom (salt bridge / ionic); for disulfides it belongs to the residue
/// that comes first in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionRecord {
    /// Interaction type.
    pub kind: InteractionKind,
    /// UI style class of `kind`.
    pub color_class: &'static str,
    /// e.g. `"ARG A45 NH1 → ASP A50 OD1"`.
    pub description: String,
    /// Residue owning `atom_a`.
    pub residue_a: ResidueId,
    /// Residue owning `atom_b`.
    pub residue_b: ResidueId,
    /// First atom (structure index).
    pub atom_a: usize,
    /// Second atom (structure index).
    pub atom_b: usize,
    /// Measured atom–atom distance in Angstroms.
    pub distance: f32,
}

/// Calls `f(atom_a, name_a, atom_b, name_b, distance)` for every pairing of
/// the named atoms present in each residue.
fn for_each_atom_pair(
    dataset: &ResidueDataset,
    a: &ResidueRecord,
    names_a: &[&'static str],
    b: &ResidueRecord,
    names_b: &[&'static str],
    mut f: impl FnMut(usize, &'static str, usize, &'static str, f32),
) {
    for &name_a in names_a {
        for &atom_a in a.atoms_named(name_a) {
            for &name_b in names_b {
                for &atom_b in b.atoms_named(name_b) {
                    if let Some(d) = dataset.distance(atom_a, atom_b) {
                        f(atom_a, name_a, atom_b, name_b, d);
                    }
                }
            }
        }
    }
}

fn record(
    kind: InteractionKind,
    a: &ResidueRecord,
    atom_a: (usize, &str),
    b: &ResidueRecord,
    atom_b: (usize, &str),
    distance: f32,
) -> InteractionRecord {
    InteractionRecord {
        kind,
        color_class: kind.color_class(),
        description: format!(
            "{} {} → {} {}",
            a.label, atom_a.1, b.label, atom_b.1
        ),
        residue_a: a.id,
        residue_b: b.id,
        atom_a: atom_a.0,
        atom_b: atom_b.0,
        distance,
    }
}

/// `donor` donating to `acceptor`.
fn hydrogen_bonds(
    dataset: &ResidueDataset,
    donor: &ResidueRecord,
    acceptor: &ResidueRecord,
    out: &mut Vec<InteractionRecord>,
) {
    for_each_atom_pair(
        dataset,
        donor,
        tables::donor_atoms(&donor.resname),
        acceptor,
        tables::acceptor_atoms(&acceptor.resname),
        |ia, na, ib, nb, d| {
            if d <= HYDROGEN_BOND_MAX {
                out.push(record(
                    InteractionKind::HydrogenBond,
                    donor,
                    (ia, na),
                    acceptor,
                    (ib, nb),
                    d,
                ));
            }
        },
    );
}

/// Positive atoms of `cation` against negative atoms of `anion`.
fn charged_pairs(
    dataset: &ResidueDataset,
    cation: &ResidueRecord,
    anion: &ResidueRecord,
    out: &mut Vec<InteractionRecord>,
) {
    for_each_atom_pair(
        dataset,
        cation,
        tables::positive_atoms(&cation.resname),
        anion,
        tables::negative_atoms(&anion.resname),
        |ia, na, ib, nb, d| {
            let kind = if d <= SALT_BRIDGE_MAX {
                InteractionKind::SaltBridge
            } else if d <= IONIC_MAX {
                InteractionKind::IonicInteraction
            } else {
                return;
            };
            out.push(record(kind, cation, (ia, na), anion, (ib, nb), d));
        },
    );
}

fn disulfide(
    dataset: &ResidueDataset,
    a: &ResidueRecord,
    b: &ResidueRecord,
    out: &mut Vec<InteractionRecord>,
) {
    let (Some(sg_a), Some(sg_b)) = (
        tables::disulfide_atom(&a.resname),
        tables::disulfide_atom(&b.resname),
    ) else {
        return;
    };
    let (first, second) = if a.id <= b.id { (a, b) } else { (b, a) };
    for_each_atom_pair(
        dataset,
        first,
        &[sg_a],
        second,
        &[sg_b],
        |ia, na, ib, nb, d| {
            if d <= DISULFIDE_MAX {
                out.push(record(
                    InteractionKind::DisulfideBond,
                    first,
                    (ia, na),
                    second,
                    (ib, nb),
                    d,
                ));
            }
        },
    );
}

/// Every interaction between two residues. Order-independent: both donor
/// and both charge orientations are evaluated. A residue paired with
/// itself yields nothing, as does a residue missing the tabulated atoms.
#[must_use]
pub fn classify(
    dataset: &ResidueDataset,
    a: &ResidueRecord,
    b: &ResidueRecord,
) -> Vec<InteractionRecord> {
    let mut out = Vec::new();
    if a.id == b.id {
        return out;
    }
    hydrogen_bonds(dataset, a, b, &mut out);
    hydrogen_bonds(dataset, b, a, &mut out);
    charged_pairs(dataset, a, b, &mut out);
    charged_pairs(dataset, b, a, &mut out);
    disulfide(dataset, a, b, &mut out);
    out
}

/// [`classify`] by id. Unknown ids yield no records.
#[must_use]
pub fn classify_ids(
    dataset: &ResidueDataset,
    a: ResidueId,
    b: ResidueId,
) -> Vec<InteractionRecord> {
    match (dataset.get(a), dataset.get(b)) {
        (Some(ra), Some(rb)) => classify(dataset, ra, rb),
        _ => Vec::new(),
    }
}

/// Result of one explicit analysis over a residue selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InteractionSet {
    /// Residues that were analyzed, in canonical order.
    pub residues: Vec<ResidueId>,
    /// Records for every unordered pair, pairs in canonical order.
    pub records: Vec<InteractionRecord>,
    /// Every atom taking part in at least one record (for highlighting).
    pub involved_atoms: BTreeSet<usize>,
}

impl InteractionSet {
    /// Classify every unordered pair of `residues`.
    #[must_use]
    pub fn analyze(dataset: &ResidueDataset, residues: &[ResidueId]) -> Self {
        let mut ids = residues.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let mut set = Self {
            residues: ids,
            ..Self::default()
        };
        for (i, &a) in set.residues.iter().enumerate() {
            for &b in &set.residues[i + 1..] {
                for r in classify_ids(dataset, a, b) {
                    let _ = set.involved_atoms.insert(r.atom_a);
                    let _ = set.involved_atoms.insert(r.atom_b);
                    set.records.push(r);
                }
            }
        }
        log::debug!(
            "analyzed {} residues: {} interactions over {} atoms",
            set.residues.len(),
            set.records.len(),
            set.involved_atoms.len()
        );
        set
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no interaction was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one kind.
    pub fn of_kind(
        &self,
        kind: InteractionKind,
    ) -> impl Iterator<Item = &InteractionRecord> {
        self.records.iter().filter(move |r| r.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::residue::ResidueKey;
    use crate::structure::StructureBuilder;

    fn pair(dataset: &ResidueDataset) -> (&ResidueRecord, &ResidueRecord) {
        let r = dataset.residues();
        (&r[0], &r[1])
    }

    fn kinds(records: &[InteractionRecord]) -> Vec<InteractionKind> {
        let mut k: Vec<_> = records.iter().map(|r| r.kind).collect();
        k.sort_unstable();
        k
    }

    #[test]
    fn disulfide_at_two_angstroms() {
        let s = StructureBuilder::new()
            .residue("A", 10, "CYS")
            .atom("CA", [0.0, -3.0, 0.0])
            .atom("SG", [0.0, 0.0, 0.0])
            .residue("A", 80, "CYS")
            .atom("CA", [2.0, 3.0, 0.0])
            .atom("SG", [2.0, 0.0, 0.0])
            .build();
        let ds = ResidueDataset::build(&s);
        let (a, b) = pair(&ds);
        let records = classify(&ds, a, b);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, InteractionKind::DisulfideBond);
        assert_eq!(format!("{:.2}", records[0].distance), "2.00");
        assert_eq!(records[0].description, "CYS A10 SG → CYS A80 SG");
    }

    #[test]
    fn disulfide_beyond_cutoff_is_ignored() {
        let s = StructureBuilder::new()
            .residue("A", 1, "CYS")
            .atom("SG", [0.0, 0.0, 0.0])
            .residue("A", 2, "CYS")
            .atom("SG", [2.3, 0.0, 0.0])
            .build();
        let ds = ResidueDataset::build(&s);
        let (a, b) = pair(&ds);
        assert!(classify(&ds, a, b).is_empty());
    }

    fn arg_asp(distance: f32) -> ResidueDataset {
        let s = StructureBuilder::new()
            .residue("A", 1, "ARG")
            .atom("NH1", [0.0, 0.0, 0.0])
            .residue("A", 2, "ASP")
            .atom("OD1", [distance, 0.0, 0.0])
            .build();
        ResidueDataset::build(&s)
    }

    #[test]
    fn charged_pair_beyond_hbond_range_is_salt_bridge() {
        let ds = arg_asp(3.6);
        let (a, b) = pair(&ds);
        let records = classify(&ds, a, b);
        assert_eq!(kinds(&records), [InteractionKind::SaltBridge]);
        assert!((records[0].distance - 3.6).abs() < 1e-5);
    }

    #[test]
    fn charged_pair_past_four_angstroms_is_ionic() {
        let ds = arg_asp(4.6);
        let (a, b) = pair(&ds);
        let records = classify(&ds, a, b);
        assert_eq!(kinds(&records), [InteractionKind::IonicInteraction]);
        assert_eq!(records[0].description, "ARG A1 NH1 → ASP A2 OD1");
    }

    #[test]
    fn close_charged_pair_is_also_hbond() {
        let ds = arg_asp(3.0);
        let (a, b) = pair(&ds);
        let records = classify(&ds, a, b);
        assert_eq!(
            kinds(&records),
            [InteractionKind::HydrogenBond, InteractionKind::SaltBridge]
        );

        let far = arg_asp(6.5);
        let (a, b) = pair(&far);
        assert!(classify(&far, a, b).is_empty());
    }

    #[test]
    fn classify_is_order_independent() {
        let s = StructureBuilder::new()
            .residue("A", 5, "HIS")
            .atom("ND1", [0.0, 0.0, 0.0])
            .atom("NE2", [0.0, 2.0, 0.0])
            .residue("A", 9, "HIS")
            .atom("ND1", [3.0, 0.0, 0.0])
            .atom("NE2", [3.0, 2.0, 0.0])
            .residue("B", 1, "GLU")
            .atom("OE1", [1.5, 1.0, 0.0])
            .build();
        let ds = ResidueDataset::build(&s);
        let r = ds.residues();
        for (i, a) in r.iter().enumerate() {
            for b in &r[i + 1..] {
                let mut ab = classify(&ds, a, b);
                let mut ba = classify(&ds, b, a);
                let key = |x: &InteractionRecord| (x.kind, x.atom_a, x.atom_b);
                ab.sort_by_key(key);
                ba.sort_by_key(key);
                assert_eq!(ab, ba);
            }
        }
        // His–His: each ring nitrogen donates to the other ring.
        let his = classify(&ds, &r[0], &r[1]);
        assert!(his.iter().all(|x| x.kind == InteractionKind::HydrogenBond));
        assert!(!his.is_empty());
    }

    #[test]
    fn missing_atoms_contribute_nothing() {
        let s = StructureBuilder::new()
            .residue("A", 1, "ARG")
            .atom("CA", [0.0, 0.0, 0.0])
            .residue("A", 2, "ASP")
            .atom("CA", [1.0, 0.0, 0.0])
            .build();
        let ds = ResidueDataset::build(&s);
        let (a, b) = pair(&ds);
        assert!(classify(&ds, a, b).is_empty());
    }

    #[test]
    fn self_pair_yields_nothing() {
        let ds = arg_asp(3.0);
        let (a, _) = pair(&ds);
        assert!(classify(&ds, a, a).is_empty());
        assert!(classify_ids(&ds, ResidueId(0), ResidueId(42)).is_empty());
    }

    #[test]
    fn analyze_collects_pairs_and_atoms() {
        let s = StructureBuilder::new()
            .residue("A", 1, "LYS")
            .atom("NZ", [0.0, 0.0, 0.0])
            .residue("A", 2, "GLU")
            .atom("OE1", [3.8, 0.0, 0.0])
            .atom("OE2", [5.0, 0.0, 0.0])
            .residue("A", 3, "ALA")
            .atom("CB", [1.0, 1.0, 0.0])
            .build();
        let ds = ResidueDataset::build(&s);
        let ids: Vec<_> = ds.iter().map(|r| r.id).rev().collect();
        let set = InteractionSet::analyze(&ds, &ids);
        assert_eq!(
            set.residues,
            vec![ResidueId(0), ResidueId(1), ResidueId(2)]
        );
        assert_eq!(set.of_kind(InteractionKind::SaltBridge).count(), 1);
        assert_eq!(set.of_kind(InteractionKind::IonicInteraction).count(), 1);
        assert_eq!(set.len(), 2);
        let atoms: Vec<usize> = set.involved_atoms.iter().copied().collect();
        assert_eq!(atoms, [0, 1, 2]);
        assert!(ds.get_by_key(&ResidueKey::new("A", 3)).is_some());
    }

    #[test]
    fn serialized_record_carries_kind_and_color_class() {
        let s = StructureBuilder::new()
            .residue("A", 1, "LYS")
            .atom("NZ", [0.0, 0.0, 0.0])
            .residue("A", 2, "ASP")
            .atom("OD1", [3.8, 0.0, 0.0])
            .build();
        let ds = ResidueDataset::build(&s);
        let records = classify_ids(&ds, ResidueId(0), ResidueId(1));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].color_class, "interaction-salt-bridge");

        let value = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(value["kind"], "salt_bridge");
        assert_eq!(value["color_class"], "interaction-salt-bridge");
        assert_eq!(value["description"], "LYS A1 NZ → ASP A2 OD1");
    }
}
