//! Rendering seam for analysis results.
//!
//! The viewer implements [`InteractionRenderer`]; every method defaults to a
//! no-op so a viewer only overrides the capabilities it has.

use glam::Vec3;

use crate::interaction::{InteractionRecord, InteractionSet};
use crate::residue::ResidueDataset;

/// Receives interaction geometry after an analysis.
pub trait InteractionRenderer {
    /// Remove geometry from the previous analysis.
    fn clear_interactions(&mut self) {}

    /// Draw one interaction as a connector between two atom positions.
    ///
    /// `color` is linear RGB for the record's kind.
    fn draw_interaction(
        &mut self,
        _record: &InteractionRecord,
        _from: Vec3,
        _to: Vec3,
        _color: [f32; 3],
    ) {
    }

    /// Emphasize the atoms taking part in any interaction.
    fn highlight_atoms(&mut self, _atoms: &[usize]) {}

    /// Called once after every record was drawn.
    fn finish(&mut self) {}
}

/// Renderer that ignores everything (headless use).
impl InteractionRenderer for () {}

/// Feed `set` into `renderer`: clear, one connector per record whose atoms
/// have positions, highlight, finish.
pub fn render_interactions(
    renderer: &mut (impl InteractionRenderer + ?Sized),
    dataset: &ResidueDataset,
    set: &InteractionSet,
) {
    renderer.clear_interactions();
    for record in &set.records {
        let (Some(from), Some(to)) =
            (dataset.position(record.atom_a), dataset.position(record.atom_b))
        else {
            log::warn!(
                "interaction {} has no atom positions",
                record.description
            );
            continue;
        };
        renderer.draw_interaction(record, from, to, record.kind.color());
    }
    let atoms: Vec<usize> = set.involved_atoms.iter().copied().collect();
    renderer.highlight_atoms(&atoms);
    renderer.finish();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::InteractionKind;
    use crate::structure::StructureBuilder;

    #[derive(Default)]
    struct Recorder {
        cleared: usize,
        lines: Vec<(InteractionKind, Vec3, Vec3)>,
        highlighted: Vec<usize>,
        finished: bool,
    }

    impl InteractionRenderer for Recorder {
        fn clear_interactions(&mut self) {
            self.cleared += 1;
        }

        fn draw_interaction(
            &mut self,
            record: &InteractionRecord,
            from: Vec3,
            to: Vec3,
            color: [f32; 3],
        ) {
            assert_eq!(color, record.kind.color());
            self.lines.push((record.kind, from, to));
        }

        fn highlight_atoms(&mut self, atoms: &[usize]) {
            self.highlighted = atoms.to_vec();
        }

        fn finish(&mut self) {
            self.finished = true;
        }
    }

    #[test]
    fn renders_every_record() {
        let s = StructureBuilder::new()
            .residue("A", 1, "CYS")
            .atom("SG", [0.0, 0.0, 0.0])
            .residue("A", 2, "CYS")
            .atom("SG", [2.0, 0.0, 0.0])
            .build();
        let ds = ResidueDataset::build(&s);
        let ids: Vec<_> = ds.iter().map(|r| r.id).collect();
        let set = InteractionSet::analyze(&ds, &ids);

        let mut rec = Recorder::default();
        render_interactions(&mut rec, &ds, &set);
        assert_eq!(rec.cleared, 1);
        assert_eq!(
            rec.lines,
            vec![(InteractionKind::DisulfideBond, Vec3::ZERO, Vec3::X * 2.0)]
        );
        assert_eq!(rec.highlighted, vec![0, 1]);
        assert!(rec.finished);

        // the unit renderer accepts anything
        render_interactions(&mut (), &ds, &set);
    }
}
