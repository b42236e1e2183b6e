//! Abstract block-structured mesh consumed by the advection driver.
//!
//! The driver only needs three things from a mesh: how many levels are
//! active, a per-level split borrow of the block fields, and a way to
//! refresh ghost layers. [`Level`] and [`Hierarchy`] both provide them.

use super::{BlockArray, Geometry, Hierarchy, IndexBox, Level};
use crate::boundary::BoundaryConditions;
use crate::types::LevelIndex;

/// Split borrow of one level: mutable volume fractions next to shared
/// geometry and velocities.
///
/// All slices are indexed by block.
#[derive(Debug)]
pub struct LevelBlocks<'a> {
    /// Level geometry
    pub geometry: &'a Geometry,
    /// Block boxes
    pub boxes: &'a [IndexBox],
    /// Volume fraction per block
    pub volume_fraction: &'a mut [BlockArray],
    /// Face velocities per direction, then per block
    pub velocity: [&'a [BlockArray]; 3],
}

impl LevelBlocks<'_> {
    /// Number of blocks.
    #[inline]
    pub fn n_blocks(&self) -> usize {
        self.boxes.len()
    }
}

/// Mesh interface required to advect a volume-fraction field.
pub trait BlockStructuredMesh {
    /// Number of levels that take part in the time step.
    fn num_active_levels(&self) -> usize;

    /// Geometry of a level.
    fn geometry(&self, lev: LevelIndex) -> &Geometry;

    /// Block fields of a level.
    fn level_blocks(&mut self, lev: LevelIndex) -> LevelBlocks<'_>;

    /// Refresh volume-fraction ghosts of a level: block-to-block copies,
    /// coarse-to-fine injection where applicable, then physical boundaries.
    fn fill_boundary(&mut self, lev: LevelIndex, bcs: &BoundaryConditions);
}

impl BlockStructuredMesh for Level {
    fn num_active_levels(&self) -> usize {
        1
    }

    fn geometry(&self, _lev: LevelIndex) -> &Geometry {
        Level::geometry(self)
    }

    fn level_blocks(&mut self, _lev: LevelIndex) -> LevelBlocks<'_> {
        self.blocks_mut()
    }

    fn fill_boundary(&mut self, _lev: LevelIndex, bcs: &BoundaryConditions) {
        self.exchange_volume_fraction();
        self.fill_physical_boundary(bcs);
    }
}

impl BlockStructuredMesh for Hierarchy {
    fn num_active_levels(&self) -> usize {
        self.num_levels()
    }

    fn geometry(&self, lev: LevelIndex) -> &Geometry {
        self.level(lev).geometry()
    }

    fn level_blocks(&mut self, lev: LevelIndex) -> LevelBlocks<'_> {
        self.level_mut(lev).blocks_mut()
    }

    fn fill_boundary(&mut self, lev: LevelIndex, bcs: &BoundaryConditions) {
        self.level_mut(lev).exchange_volume_fraction();
        self.fill_from_coarse(lev);
        self.level_mut(lev).fill_physical_boundary(bcs);
    }
}
