//! PDB / mmCIF loading via `pdbtbx`.

use std::path::Path;

use glam::Vec3;
use pdbtbx::{ReadOptions, StrictnessLevel, PDB};

use super::{Structure, StructureAtom};
use crate::error::ProximaError;

/// Load a `.pdb` or `.cif` file into a flat [`Structure`].
///
/// Only the first model is read. Parser warnings are logged and otherwise
/// ignored; a file that cannot be parsed at all is an error.
///
/// # Errors
///
/// Returns [`ProximaError::StructureLoad`] if the file cannot be parsed.
pub fn load_structure(path: &Path) -> Result<Structure, ProximaError> {
    let path_str = path.to_string_lossy();
    let (pdb, warnings) = ReadOptions::default()
        .set_level(StrictnessLevel::Loose)
        .read(&*path_str)
        .map_err(|errors| {
            let msg = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            ProximaError::StructureLoad(format!("{path_str}: {msg}"))
        })?;

    for w in &warnings {
        log::debug!("pdbtbx: {w}");
    }

    let structure = structure_from_pdb(&pdb);
    log::info!(
        "Loaded {path_str}: {} atoms ({} polymer)",
        structure.len(),
        structure.polymer_atom_count()
    );
    Ok(structure)
}

/// Flatten the first model of a parsed `pdbtbx` file. ATOM records are
/// polymer, HETATM records are not. Later models (NMR ensembles, multiple
/// conformers) are skipped.
#[must_use]
pub fn structure_from_pdb(pdb: &PDB) -> Structure {
    let mut structure = Structure::new();
    let Some(model) = pdb.models().next() else {
        return structure;
    };
    if pdb.model_count() > 1 {
        log::debug!(
            "reading model {} of {}",
            model.serial_number(),
            pdb.model_count()
        );
    }
    for chain in model.chains() {
        let chain_id = chain.id().to_owned();
        for residue in chain.residues() {
            let res_name = residue.name().unwrap_or("UNK").to_owned();
            let res_num = residue.serial_number() as i32;
            for atom in residue.atoms() {
                let (x, y, z) = atom.pos();
                let _ = structure.push(StructureAtom {
                    position: Vec3::new(x as f32, y as f32, z as f32),
                    name: atom.name().trim().to_owned(),
                    res_name: res_name.clone(),
                    chain_id: chain_id.clone(),
                    res_num,
                    polymer: !atom.hetero(),
                });
            }
        }
    }
    structure
}
