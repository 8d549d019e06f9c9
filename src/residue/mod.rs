//! Per-residue atom index built once per structure load.
//!
//! Polymer atoms are grouped by (chain, sequence number) into
//! [`ResidueRecord`]s sorted by chain then number. Each record carries
//! atom-name lookups and the side-chain subset used for distance queries.

mod search;

use std::collections::BTreeMap;
use std::fmt;

use glam::Vec3;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::structure::Structure;

/// Backbone atom names excluded from the side-chain set.
pub const BACKBONE_ATOMS: &[&str] = &["N", "CA", "C", "O", "OXT"];

/// Whether an (already normalized) atom name counts as side chain.
///
/// Hydrogens are recognised by a leading `H` in the name, not by element,
/// so e.g. `HG` on a serine is dropped and a mercury ion would be too.
#[must_use]
pub fn is_side_chain_atom(name: &str) -> bool {
    !BACKBONE_ATOMS.contains(&name) && !name.starts_with('H')
}

/// Chain + sequence number. Unique within a structure.
///
/// Ordering is chain (lexicographic) then number, which is the canonical
/// display order of the dataset.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
)]
pub struct ResidueKey {
    /// Chain identifier.
    pub chain: String,
    /// Residue sequence number.
    pub number: i32,
}

impl ResidueKey {
    /// Key from its parts.
    #[must_use]
    pub fn new(chain: &str, number: i32) -> Self {
        Self {
            chain: chain.to_owned(),
            number,
        }
    }

    /// Parse `"A:45"` (the [`Display`](fmt::Display) form). Whitespace
    /// around either part is ignored.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let (chain, number) = s.split_once(':')?;
        Some(Self::new(chain.trim(), number.trim().parse().ok()?))
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain, self.number)
    }
}

/// Position of a residue in the dataset's canonical order.
///
/// Valid only for the dataset that issued it; a new load invalidates
/// every id along with the dataset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
)]
pub struct ResidueId(pub u32);

impl ResidueId {
    /// Index into [`ResidueDataset::residues`].
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One polymer residue, immutable for the lifetime of a load.
#[derive(Debug, Clone)]
pub struct ResidueRecord {
    /// Canonical position.
    pub id: ResidueId,
    /// Chain + number.
    pub key: ResidueKey,
    /// Upper-cased 3-letter residue name.
    pub resname: String,
    /// Display label, e.g. `"ARG A45"`.
    pub label: String,
    /// Normalized atom name → atom indices (alternate conformations share
    /// a name, so a name may map to several atoms).
    pub atoms_by_name: FxHashMap<String, Vec<usize>>,
    /// Side-chain atoms, or the CA atoms when the residue has none.
    pub side_chain_atoms: Vec<usize>,
    /// Every atom of the residue in structure order.
    pub all_atoms: Vec<usize>,
}

impl ResidueRecord {
    /// Chain identifier.
    #[must_use]
    pub fn chain(&self) -> &str {
        &self.key.chain
    }

    /// Residue sequence number.
    #[must_use]
    pub fn sequence_number(&self) -> i32 {
        self.key.number
    }

    /// Atom indices carrying `name` (already upper-case, trimmed). Empty
    /// if the residue lacks that atom.
    #[must_use]
    pub fn atoms_named(&self, name: &str) -> &[usize] {
        self.atoms_by_name.get(name).map_or(&[], Vec::as_slice)
    }

    /// Whether this residue is the given 3-letter type.
    #[must_use]
    pub fn is(&self, resname: &str) -> bool {
        self.resname == resname
    }
}

/// Display label for a residue.
#[must_use]
pub fn residue_label(resname: &str, key: &ResidueKey) -> String {
    format!("{resname} {}{}", key.chain, key.number)
}

/// Accumulates atoms for one residue during indexing.
#[derive(Default)]
struct RecordBuilder {
    resname: String,
    atoms_by_name: FxHashMap<String, Vec<usize>>,
    side_chain_atoms: Vec<usize>,
    all_atoms: Vec<usize>,
}

impl RecordBuilder {
    fn add(&mut self, idx: usize, name: String) {
        if is_side_chain_atom(&name) {
            self.side_chain_atoms.push(idx);
        }
        self.all_atoms.push(idx);
        self.atoms_by_name.entry(name).or_default().push(idx);
    }

    fn finish(mut self, id: ResidueId, key: ResidueKey) -> ResidueRecord {
        if self.side_chain_atoms.is_empty() {
            self.side_chain_atoms = self
                .atoms_by_name
                .get("CA")
                .cloned()
                .unwrap_or_default();
        }
        ResidueRecord {
            id,
            label: residue_label(&self.resname, &key),
            key,
            resname: self.resname,
            atoms_by_name: self.atoms_by_name,
            side_chain_atoms: self.side_chain_atoms,
            all_atoms: self.all_atoms,
        }
    }
}

/// Ordered residue records plus the atom positions they index into.
#[derive(Debug, Clone, Default)]
pub struct ResidueDataset {
    residues: Vec<ResidueRecord>,
    by_key: FxHashMap<ResidueKey, ResidueId>,
    /// Positions for every atom of the source structure, by atom index.
    positions: Vec<Vec3>,
}

impl ResidueDataset {
    /// Index every polymer residue of `structure`.
    ///
    /// Non-polymer atoms are skipped. A structure without polymer residues
    /// yields an empty dataset, which is valid: downstream operations treat
    /// it as "nothing to show".
    #[must_use]
    pub fn build(structure: &Structure) -> Self {
        let mut grouped: BTreeMap<ResidueKey, RecordBuilder> = BTreeMap::new();

        for (idx, atom) in structure.atoms().iter().enumerate() {
            if !atom.polymer {
                continue;
            }
            let key = ResidueKey::new(atom.chain_id.trim(), atom.res_num);
            let builder = grouped.entry(key).or_default();
            if builder.resname.is_empty() {
                builder.resname = atom.res_name.trim().to_uppercase();
            }
            builder.add(idx, atom.name.trim().to_uppercase());
        }

        let mut residues = Vec::with_capacity(grouped.len());
        let mut by_key = FxHashMap::default();
        for (i, (key, builder)) in grouped.into_iter().enumerate() {
            let id = ResidueId(i as u32);
            let _ = by_key.insert(key.clone(), id);
            residues.push(builder.finish(id, key));
        }

        log::debug!(
            "indexed {} polymer residues from {} atoms",
            residues.len(),
            structure.len()
        );

        Self {
            residues,
            by_key,
            positions: structure.atoms().iter().map(|a| a.position).collect(),
        }
    }

    /// Number of residues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    /// Whether the structure had no polymer residues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Residues in canonical order.
    #[must_use]
    pub fn residues(&self) -> &[ResidueRecord] {
        &self.residues
    }

    /// Iterate residues in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResidueRecord> {
        self.residues.iter()
    }

    /// Residue by id.
    #[must_use]
    pub fn get(&self, id: ResidueId) -> Option<&ResidueRecord> {
        self.residues.get(id.index())
    }

    /// Id for a key, if the key names a residue of this dataset.
    #[must_use]
    pub fn id_of(&self, key: &ResidueKey) -> Option<ResidueId> {
        self.by_key.get(key).copied()
    }

    /// Residue by key.
    #[must_use]
    pub fn get_by_key(&self, key: &ResidueKey) -> Option<&ResidueRecord> {
        self.id_of(key).and_then(|id| self.get(id))
    }

    /// Label for an id, falling back to a placeholder for stale ids.
    #[must_use]
    pub fn label(&self, id: ResidueId) -> &str {
        self.get(id).map_or("?", |r| r.label.as_str())
    }

    /// Position of an atom by structure index.
    #[must_use]
    pub fn position(&self, atom: usize) -> Option<Vec3> {
        self.positions.get(atom).copied()
    }

    /// Euclidean distance between two atoms.
    #[must_use]
    pub fn distance(&self, a: usize, b: usize) -> Option<f32> {
        Some(self.position(a)?.distance(self.position(b)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::StructureBuilder;

    fn sample() -> Structure {
        StructureBuilder::new()
            .residue("B", 3, "gly")
            .atom("N", [0.0, 0.0, 0.0])
            .atom(" CA ", [1.0, 0.0, 0.0])
            .atom("C", [2.0, 0.0, 0.0])
            .atom("O", [2.5, 1.0, 0.0])
            .atom("HA2", [1.0, 1.0, 0.0])
            .residue("A", 10, "SER")
            .atom("N", [0.0, 5.0, 0.0])
            .atom("CA", [1.0, 5.0, 0.0])
            .atom("CB", [1.0, 6.0, 0.0])
            .atom("OG", [1.0, 7.0, 0.0])
            .atom("HG", [1.0, 7.5, 0.0])
            .residue("A", 2, "LYS")
            .atom("CA", [9.0, 0.0, 0.0])
            .atom("NZ", [9.0, 3.0, 0.0])
            .hetero_residue("A", 500, "HOH")
            .atom("O", [4.0, 4.0, 4.0])
            .build()
    }

    #[test]
    fn residues_sorted_by_chain_then_number() {
        let ds = ResidueDataset::build(&sample());
        let keys: Vec<String> =
            ds.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(keys, ["A:2", "A:10", "B:3"]);
        assert!(ds.iter().enumerate().all(|(i, r)| r.id.index() == i));
    }

    #[test]
    fn non_polymer_residues_are_excluded() {
        let ds = ResidueDataset::build(&sample());
        assert_eq!(ds.len(), 3);
        assert!(ds.get_by_key(&ResidueKey::new("A", 500)).is_none());
    }

    #[test]
    fn side_chain_excludes_backbone_and_hydrogens() {
        let ds = ResidueDataset::build(&sample());
        let ser = ds.get_by_key(&ResidueKey::new("A", 10)).unwrap();
        let names: Vec<&str> = ser
            .side_chain_atoms
            .iter()
            .map(|&i| {
                ser.atoms_by_name
                    .iter()
                    .find(|(_, v)| v.contains(&i))
                    .map(|(k, _)| k.as_str())
                    .unwrap()
            })
            .collect();
        assert_eq!(names, ["CB", "OG"]);
        assert_eq!(ser.all_atoms.len(), 5);
    }

    #[test]
    fn glycine_falls_back_to_ca() {
        let ds = ResidueDataset::build(&sample());
        let gly = ds.get_by_key(&ResidueKey::new("B", 3)).unwrap();
        assert_eq!(gly.resname, "GLY");
        assert_eq!(gly.side_chain_atoms, gly.atoms_named("CA"));
        assert_eq!(gly.side_chain_atoms.len(), 1);
    }

    #[test]
    fn names_are_trimmed_and_upper_cased() {
        let ds = ResidueDataset::build(&sample());
        let gly = ds.get_by_key(&ResidueKey::new("B", 3)).unwrap();
        assert_eq!(gly.atoms_named("CA"), &[1]);
        assert!(gly.atoms_named("CB").is_empty());
        assert_eq!(gly.label, "GLY B3");
    }

    #[test]
    fn alternate_conformers_share_a_name() {
        let s = StructureBuilder::new()
            .residue("A", 1, "SER")
            .atom("CA", [0.0, 0.0, 0.0])
            .atom("OG", [1.0, 0.0, 0.0])
            .atom("OG", [1.2, 0.0, 0.0])
            .build();
        let ds = ResidueDataset::build(&s);
        let ser = &ds.residues()[0];
        assert_eq!(ser.atoms_named("OG"), &[1, 2]);
        assert_eq!(ser.side_chain_atoms, vec![1, 2]);
    }

    #[test]
    fn empty_structure_gives_empty_dataset() {
        let ds = ResidueDataset::build(&Structure::new());
        assert!(ds.is_empty());
        let only_water = StructureBuilder::new()
            .hetero_residue("W", 1, "HOH")
            .atom("O", [0.0, 0.0, 0.0])
            .build();
        assert!(ResidueDataset::build(&only_water).is_empty());
    }

    #[test]
    fn key_parse_round_trips_display() {
        let key = ResidueKey::new("A", -4);
        assert_eq!(ResidueKey::parse(&key.to_string()), Some(key));
        assert_eq!(ResidueKey::parse("B : 12"), Some(ResidueKey::new("B", 12)));
        assert!(ResidueKey::parse("B12").is_none());
    }

    #[test]
    fn hydrogen_heuristic_is_name_based() {
        assert!(!is_side_chain_atom("HB2"));
        assert!(!is_side_chain_atom("OXT"));
        assert!(is_side_chain_atom("SG"));
    }
}
