//! Raw atomic input: a flat atom table as handed over by the structure
//! loader or viewer.
//!
//! Atom indices are positions in this table and stay stable for the
//! lifetime of one load; every downstream record (residue index, contact
//! map, interaction records) refers to atoms by these indices.

#[cfg(feature = "pdb")]
mod pdb;

use glam::Vec3;
#[cfg(feature = "pdb")]
pub use pdb::{load_structure, structure_from_pdb};

/// A single atom with its residue context.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureAtom {
    /// Cartesian position in Angstroms.
    pub position: Vec3,
    /// Atom name as written in the source file (e.g. `"CA"`, `" OD1"`).
    pub name: String,
    /// Residue name (3-letter code for amino acids).
    pub res_name: String,
    /// Chain identifier.
    pub chain_id: String,
    /// Residue sequence number.
    pub res_num: i32,
    /// Whether the atom belongs to a polymer residue (ATOM record) rather
    /// than a ligand, ion or water (HETATM record).
    pub polymer: bool,
}

/// Flat atom table for one loaded structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    atoms: Vec<StructureAtom>,
}

impl Structure {
    /// Empty structure.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Structure from an existing atom list. Indices follow list order.
    #[must_use]
    pub fn from_atoms(atoms: Vec<StructureAtom>) -> Self {
        Self { atoms }
    }

    /// Append an atom, returning its index.
    pub fn push(&mut self, atom: StructureAtom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    /// Number of atoms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Whether the table has no atoms at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// All atoms in index order.
    #[must_use]
    pub fn atoms(&self) -> &[StructureAtom] {
        &self.atoms
    }

    /// Atom by index.
    #[must_use]
    pub fn atom(&self, idx: usize) -> Option<&StructureAtom> {
        self.atoms.get(idx)
    }

    /// Position of an atom by index.
    #[must_use]
    pub fn position(&self, idx: usize) -> Option<Vec3> {
        self.atoms.get(idx).map(|a| a.position)
    }

    /// Euclidean distance between two atoms, if both exist.
    #[must_use]
    pub fn distance(&self, a: usize, b: usize) -> Option<f32> {
        Some(self.position(a)?.distance(self.position(b)?))
    }

    /// Number of atoms flagged as polymer.
    #[must_use]
    pub fn polymer_atom_count(&self) -> usize {
        self.atoms.iter().filter(|a| a.polymer).count()
    }
}

/// Incremental builder used by loaders and tests.
///
/// ```
/// use proxima::structure::StructureBuilder;
///
/// let structure = StructureBuilder::new()
///     .residue("A", 1, "CYS")
///     .atom("CA", [0.0, 0.0, 0.0])
///     .atom("SG", [1.0, 0.0, 0.0])
///     .hetero_residue("A", 100, "HOH")
///     .atom("O", [5.0, 5.0, 5.0])
///     .build();
/// assert_eq!(structure.len(), 3);
/// assert_eq!(structure.polymer_atom_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct StructureBuilder {
    structure: Structure,
    chain_id: String,
    res_num: i32,
    res_name: String,
    polymer: bool,
}

impl StructureBuilder {
    /// Builder with no current residue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a polymer residue; subsequent atoms belong to it.
    #[must_use]
    pub fn residue(self, chain_id: &str, res_num: i32, res_name: &str) -> Self {
        self.start(chain_id, res_num, res_name, true)
    }

    /// Start a non-polymer residue (ligand, ion, water).
    #[must_use]
    pub fn hetero_residue(
        self,
        chain_id: &str,
        res_num: i32,
        res_name: &str,
    ) -> Self {
        self.start(chain_id, res_num, res_name, false)
    }

    fn start(
        mut self,
        chain_id: &str,
        res_num: i32,
        res_name: &str,
        polymer: bool,
    ) -> Self {
        chain_id.clone_into(&mut self.chain_id);
        res_name.clone_into(&mut self.res_name);
        self.res_num = res_num;
        self.polymer = polymer;
        self
    }

    /// Add an atom to the current residue.
    #[must_use]
    pub fn atom(mut self, name: &str, position: [f32; 3]) -> Self {
        let _ = self.structure.push(StructureAtom {
            position: Vec3::from_array(position),
            name: name.to_owned(),
            res_name: self.res_name.clone(),
            chain_id: self.chain_id.clone(),
            res_num: self.res_num,
            polymer: self.polymer,
        });
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Structure {
        self.structure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_assigns_sequential_indices() {
        let s = StructureBuilder::new()
            .residue("A", 7, "SER")
            .atom("N", [0.0, 0.0, 0.0])
            .atom("OG", [3.0, 4.0, 0.0])
            .build();
        assert_eq!(s.len(), 2);
        assert_eq!(s.atom(1).map(|a| a.name.as_str()), Some("OG"));
        assert_eq!(s.atom(1).map(|a| a.res_num), Some(7));
        assert!((s.distance(0, 1).unwrap_or_default() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn distance_out_of_range_is_none() {
        let s = StructureBuilder::new()
            .residue("A", 1, "GLY")
            .atom("CA", [0.0, 0.0, 0.0])
            .build();
        assert!(s.distance(0, 3).is_none());
        assert!(s.position(9).is_none());
    }

    #[test]
    fn empty_structure() {
        let s = Structure::new();
        assert!(s.is_empty());
        assert_eq!(s.polymer_atom_count(), 0);
    }
}
