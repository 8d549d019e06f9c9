//! Side-chain chemistry tables for the 20 standard amino acids.
//! Atom names follow PDB conventions. Residue names are expected
//! upper-case; unknown residue types have no entries.

/// Side-chain atoms that can donate a hydrogen bond.
#[must_use]
pub fn donor_atoms(resname: &str) -> &'static [&'static str] {
    match resname {
        "ARG" => ARGININE_DONORS,
        "ASN" => &["ND2"],
        "GLN" => &["NE2"],
        "HIS" => HISTIDINE_NITROGENS,
        "LYS" => &["NZ"],
        "SER" => &["OG"],
        "THR" => &["OG1"],
        "TRP" => &["NE1"],
        "TYR" => &["OH"],
        _ => &[],
    }
}

/// Side-chain atoms that can accept a hydrogen bond.
#[must_use]
pub fn acceptor_atoms(resname: &str) -> &'static [&'static str] {
    match resname {
        "ASP" => ASPARTATE_OXYGENS,
        "GLU" => GLUTAMATE_OXYGENS,
        "ASN" => &["OD1"],
        "GLN" => &["OE1"],
        "HIS" => HISTIDINE_NITROGENS,
        "SER" => &["OG"],
        "THR" => &["OG1"],
        "TYR" => &["OH"],
        _ => &[],
    }
}

/// Side-chain atoms that carry (or can carry) a positive charge.
#[must_use]
pub fn positive_atoms(resname: &str) -> &'static [&'static str] {
    match resname {
        "ARG" => ARGININE_DONORS,
        "LYS" => &["NZ"],
        "HIS" => HISTIDINE_NITROGENS,
        _ => &[],
    }
}

/// Side-chain atoms that carry a negative charge.
#[must_use]
pub fn negative_atoms(resname: &str) -> &'static [&'static str] {
    match resname {
        "ASP" => ASPARTATE_OXYGENS,
        "GLU" => GLUTAMATE_OXYGENS,
        _ => &[],
    }
}

/// Atom forming the disulfide linkage, if the residue can form one.
#[must_use]
pub fn disulfide_atom(resname: &str) -> Option<&'static str> {
    (resname == "CYS").then_some("SG")
}

// Arginine guanidinium: NE, NH1, NH2
const ARGININE_DONORS: &[&str] = &["NE", "NH1", "NH2"];

// Histidine imidazole ring nitrogens (donor, acceptor or cation by
// protonation state)
const HISTIDINE_NITROGENS: &[&str] = &["ND1", "NE2"];

// Aspartate carboxylate
const ASPARTATE_OXYGENS: &[&str] = &["OD1", "OD2"];

// Glutamate carboxylate
const GLUTAMATE_OXYGENS: &[&str] = &["OE1", "OE2"];
