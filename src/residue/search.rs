//! Free-text residue lookup for the candidate list search box.

use super::{ResidueDataset, ResidueId, ResidueRecord};

/// Lower-case with all whitespace removed.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Split `RESNAME[CHAIN]NUMBER` (already compact and upper-case).
fn split_resname_chain_number(compact: &str) -> Option<(&str, &str, i32)> {
    let resname = compact.get(..3)?;
    if !resname.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let (chain, number) = split_chain_number(&compact[3..])?;
    Some((resname, chain, number))
}

/// Split `[CHAIN]NUMBER` where the chain is at most one letter.
fn split_chain_number(compact: &str) -> Option<(&str, i32)> {
    let digits_at = compact.find(|c: char| c.is_ascii_digit())?;
    let (chain, digits) = compact.split_at(digits_at);
    if chain.len() > 1
        || !chain.chars().all(|c| c.is_ascii_alphabetic())
        || !digits.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }
    Some((chain, digits.parse().ok()?))
}

fn chain_matches(record: &ResidueRecord, chain: &str) -> bool {
    chain.is_empty() || record.chain().eq_ignore_ascii_case(chain)
}

impl ResidueDataset {
    /// Residues whose label contains `query` (case-insensitive), in
    /// canonical order. An empty query matches everything.
    #[must_use]
    pub fn matching(&self, query: &str) -> Vec<ResidueId> {
        let query = query.trim().to_lowercase();
        self.iter()
            .filter(|r| {
                query.is_empty() || r.label.to_lowercase().contains(&query)
            })
            .map(|r| r.id)
            .collect()
    }

    /// Resolve a free-text query to a single residue.
    ///
    /// Tried in order: exact label, exact key (`A:45`), `ARG A 45` /
    /// `ARG45`, `A45` / `45`, then substring on the label or on
    /// `"resname chainnumber"`. Within each rule the first residue in
    /// canonical order wins.
    #[must_use]
    pub fn find(&self, query: &str) -> Option<ResidueId> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        let normalized = normalize(trimmed);

        let exact = self
            .iter()
            .find(|r| normalize(&r.label) == normalized)
            .or_else(|| {
                self.iter()
                    .find(|r| normalize(&r.key.to_string()) == normalized)
            });
        if let Some(r) = exact {
            return Some(r.id);
        }

        let compact = normalized.to_uppercase();
        if let Some((resname, chain, number)) =
            split_resname_chain_number(&compact)
        {
            let hit = self.iter().find(|r| {
                r.resname == resname
                    && r.sequence_number() == number
                    && chain_matches(r, chain)
            });
            if let Some(r) = hit {
                return Some(r.id);
            }
        }

        if let Some((chain, number)) = split_chain_number(&compact) {
            let hit = self.iter().find(|r| {
                r.sequence_number() == number && chain_matches(r, chain)
            });
            if let Some(r) = hit {
                return Some(r.id);
            }
        }

        let lower = trimmed.to_lowercase();
        self.iter()
            .find(|r| {
                r.label.to_lowercase().contains(&lower)
                    || format!(
                        "{} {}{}",
                        r.resname,
                        r.chain(),
                        r.sequence_number()
                    )
                    .to_lowercase()
                    .contains(&lower)
            })
            .map(|r| r.id)
    }
}
