//! Interface classification ahead of a three-sweep step.
//!
//! Before the first sweep each cell is tagged empty, full or interfacial
//! from its volume fraction at the start of the step. The tag also carries
//! the weight of the Eulerian divergence correction, which must stay fixed
//! for all three sweeps so the corrections cancel for a divergence-free
//! velocity.

use crate::flux::AdvectionScheme;
use crate::mesh::{BlockArray, IndexBox};

use super::sweep::FluxBuffers;

/// Fill state of a cell at the start of a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellClass {
    /// Volume fraction within tolerance of 0
    Empty,
    /// Volume fraction within tolerance of 1
    Full,
    /// Partially filled, advected with the given scheme
    Interfacial(AdvectionScheme),
}

/// Per-cell classification result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellTag {
    /// Fill state
    pub class: CellClass,
    /// Weight of the Eulerian compensation term `w * (a_hi - a_lo)`
    pub dilation_weight: f64,
}

impl CellTag {
    /// Tag of an empty cell.
    pub const EMPTY: CellTag = CellTag {
        class: CellClass::Empty,
        dilation_weight: 0.0,
    };

    /// Classify one cell.
    ///
    /// The Eulerian weight is 1 for full cells, 0 for empty cells and
    /// `c > 1/2` for interfacial cells. The Lagrangian remap needs no
    /// compensation and uses weight 0 everywhere.
    pub fn classify(fraction: f64, scheme: AdvectionScheme, tolerance: f64) -> CellTag {
        let class = if fraction <= tolerance {
            CellClass::Empty
        } else if fraction >= 1.0 - tolerance {
            CellClass::Full
        } else {
            CellClass::Interfacial(scheme)
        };
        let dilation_weight = match scheme {
            AdvectionScheme::Lagrangian => 0.0,
            AdvectionScheme::Eulerian => match class {
                CellClass::Empty => 0.0,
                CellClass::Full => 1.0,
                CellClass::Interfacial(_) => {
                    if fraction > 0.5 {
                        1.0
                    } else {
                        0.0
                    }
                }
            },
        };
        CellTag {
            class,
            dilation_weight,
        }
    }
}

/// Number of cells of each class in a block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClassCounts {
    /// Empty cells
    pub empty: usize,
    /// Full cells
    pub full: usize,
    /// Interfacial cells
    pub interfacial: usize,
}

impl ClassCounts {
    /// Sum two counts.
    pub fn merge(self, other: ClassCounts) -> ClassCounts {
        ClassCounts {
            empty: self.empty + other.empty,
            full: self.full + other.full,
            interfacial: self.interfacial + other.interfacial,
        }
    }
}

/// Tag every cell of `block` and its one-cell halo, and clear the flux
/// buffers.
///
/// Counts cover the valid region only.
pub fn classify_block(
    block: IndexBox,
    volume_fraction: &BlockArray,
    scheme: AdvectionScheme,
    tolerance: f64,
    tags: &mut BlockArray<CellTag>,
    fluxes: &mut FluxBuffers,
) -> ClassCounts {
    fluxes.reset();

    let mut counts = ClassCounts::default();
    for p in block.grow(1).iter() {
        let tag = CellTag::classify(volume_fraction.get(p), scheme, tolerance);
        tags.set(p, tag);
        if block.contains(p) {
            match tag.class {
                CellClass::Empty => counts.empty += 1,
                CellClass::Full => counts.full += 1,
                CellClass::Interfacial(_) => counts.interfacial += 1,
            }
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::GHOST_WIDTH;

    #[test]
    fn test_classify_thresholds() {
        let tol = 1e-12;
        let s = AdvectionScheme::Eulerian;
        assert_eq!(CellTag::classify(0.0, s, tol).class, CellClass::Empty);
        assert_eq!(CellTag::classify(1e-13, s, tol).class, CellClass::Empty);
        assert_eq!(CellTag::classify(1.0, s, tol).class, CellClass::Full);
        assert_eq!(CellTag::classify(0.3, s, tol).class, CellClass::Interfacial(s));
    }

    #[test]
    fn test_dilation_weights() {
        let tol = 1e-12;
        let e = AdvectionScheme::Eulerian;
        assert_eq!(CellTag::classify(1.0, e, tol).dilation_weight, 1.0);
        assert_eq!(CellTag::classify(0.7, e, tol).dilation_weight, 1.0);
        assert_eq!(CellTag::classify(0.3, e, tol).dilation_weight, 0.0);
        assert_eq!(CellTag::classify(0.0, e, tol).dilation_weight, 0.0);

        let l = AdvectionScheme::Lagrangian;
        assert_eq!(CellTag::classify(1.0, l, tol).dilation_weight, 0.0);
        assert_eq!(
            CellTag::classify(0.7, l, tol).class,
            CellClass::Interfacial(AdvectionScheme::Lagrangian)
        );
    }

    #[test]
    fn test_classify_block_counts_and_resets() {
        let block = IndexBox::from_shape([4, 2, 1]);
        let mut c = BlockArray::cells(block, GHOST_WIDTH, 0.0);
        for p in block.iter() {
            c[p] = match p[0] {
                0 => 1.0,
                1 => 0.6,
                _ => 0.0,
            };
        }
        let mut tags = BlockArray::cells(block.grow(1), 0, CellTag::EMPTY);
        let mut fluxes = FluxBuffers::new(block);
        fluxes.center.fill(3.0);

        let counts = classify_block(block, &c, AdvectionScheme::Eulerian, 1e-12, &mut tags, &mut fluxes);
        assert_eq!(counts, ClassCounts { empty: 4, full: 2, interfacial: 2 });
        assert_eq!(tags[[1, 0, 0]].dilation_weight, 1.0);
        assert!(fluxes.center.as_slice().iter().all(|&v| v == 0.0));
    }
}
