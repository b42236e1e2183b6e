//! One refinement level: a set of disjoint blocks covering part of a domain.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::block_mesh::LevelBlocks;
use super::halo::{exchange_halos, extrapolate_outside_domain};
use super::{BlockArray, GHOST_WIDTH, Geometry, GridError, IndexBox, Staggering};
use crate::boundary::{BoundaryConditions, fill_physical_ghosts};
use crate::types::{BlockIndex, Direction};

/// Blocks of one level with their volume-fraction and face-velocity fields.
///
/// Every block owns a cell-centered volume-fraction array and three
/// face-centered velocity arrays (one per direction), all carrying
/// [`GHOST_WIDTH`] ghost layers.
///
/// # Example
///
/// ```
/// use vof_rs::mesh::{Geometry, Level};
///
/// let geom = Geometry::unit_cube([16, 16, 16], [true; 3]);
/// let mut level = Level::decomposed(geom, 8);
/// assert_eq!(level.n_blocks(), 8);
///
/// level.set_face_velocity(|_, _| 1.0);
/// level.set_volume_fraction(|p| if p[0] < 8 { 1.0 } else { 0.0 });
/// assert_eq!(level.cell_value([3, 12, 5]), Some(1.0));
/// ```
#[derive(Clone, Debug)]
pub struct Level {
    geometry: Geometry,
    boxes: Vec<IndexBox>,
    volume_fraction: Vec<BlockArray>,
    velocity: [Vec<BlockArray>; 3],
}

impl Level {
    /// Create a level from an explicit block layout.
    ///
    /// Blocks must lie inside the domain and must not overlap. They do not
    /// need to cover the domain.
    pub fn new(geometry: Geometry, boxes: Vec<IndexBox>) -> Result<Self, GridError> {
        if boxes.is_empty() {
            return Err(GridError::NoBlocks);
        }
        let domain = geometry.domain();
        for (i, block) in boxes.iter().enumerate() {
            if !domain.contains_box(block) {
                return Err(GridError::BlockOutsideDomain {
                    block: *block,
                    domain,
                });
            }
            if let Some(other) = boxes[i + 1..].iter().find(|b| b.intersects(block)) {
                return Err(GridError::OverlappingBlocks {
                    first: *block,
                    second: *other,
                });
            }
        }
        Ok(Self::allocate(geometry, boxes))
    }

    /// One block spanning the whole domain.
    pub fn single_block(geometry: Geometry) -> Self {
        let boxes = vec![geometry.domain()];
        Self::allocate(geometry, boxes)
    }

    /// Domain chopped into blocks of at most `max_block_size` cells per direction.
    pub fn decomposed(geometry: Geometry, max_block_size: usize) -> Self {
        let boxes = geometry.domain().chop(max_block_size);
        Self::allocate(geometry, boxes)
    }

    fn allocate(geometry: Geometry, boxes: Vec<IndexBox>) -> Self {
        let volume_fraction = boxes
            .iter()
            .map(|&b| BlockArray::cells(b, GHOST_WIDTH, 0.0))
            .collect();
        let velocity = Direction::ALL.map(|dir| {
            boxes
                .iter()
                .map(|&b| BlockArray::faces(b, dir, GHOST_WIDTH, 0.0))
                .collect()
        });
        Self {
            geometry,
            boxes,
            volume_fraction,
            velocity,
        }
    }

    /// Level geometry.
    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Block boxes in block-index order.
    #[inline]
    pub fn boxes(&self) -> &[IndexBox] {
        &self.boxes
    }

    /// Number of blocks.
    #[inline]
    pub fn n_blocks(&self) -> usize {
        self.boxes.len()
    }

    /// Volume fraction of one block.
    pub fn volume_fraction(&self, block: BlockIndex) -> &BlockArray {
        &self.volume_fraction[block]
    }

    /// Mutable volume fraction of one block.
    pub fn volume_fraction_mut(&mut self, block: BlockIndex) -> &mut BlockArray {
        &mut self.volume_fraction[block]
    }

    /// Volume fraction arrays of all blocks.
    pub fn volume_fractions(&self) -> &[BlockArray] {
        &self.volume_fraction
    }

    /// Face velocity normal to `dir` on one block.
    pub fn velocity(&self, dir: Direction, block: BlockIndex) -> &BlockArray {
        &self.velocity[dir.index()][block]
    }

    /// Face velocity arrays normal to `dir` of all blocks.
    pub fn velocities(&self, dir: Direction) -> &[BlockArray] {
        &self.velocity[dir.index()]
    }

    /// Mutable face velocity normal to `dir` on one block.
    pub fn velocity_mut(&mut self, dir: Direction, block: BlockIndex) -> &mut BlockArray {
        &mut self.velocity[dir.index()][block]
    }

    /// Split borrow of the level for block-parallel updates.
    pub fn blocks_mut(&mut self) -> LevelBlocks<'_> {
        let [u, v, w] = &self.velocity;
        LevelBlocks {
            geometry: &self.geometry,
            boxes: &self.boxes,
            volume_fraction: &mut self.volume_fraction,
            velocity: [u.as_slice(), v.as_slice(), w.as_slice()],
        }
    }

    /// Volume fraction of a valid cell, looked up across blocks.
    pub fn cell_value(&self, p: [i64; 3]) -> Option<f64> {
        self.boxes
            .iter()
            .position(|b| b.contains(p))
            .map(|b| self.volume_fraction[b].get(p))
    }

    /// Set the volume fraction of every valid cell from its index.
    ///
    /// Ghost layers are not touched; call a boundary fill afterwards.
    pub fn set_volume_fraction<F>(&mut self, f: F)
    where
        F: Fn([i64; 3]) -> f64 + Sync,
    {
        let fill = |array: &mut BlockArray| {
            for p in array.valid_box().iter() {
                array.set(p, f(p));
            }
        };

        #[cfg(feature = "parallel")]
        self.volume_fraction.par_iter_mut().for_each(fill);

        #[cfg(not(feature = "parallel"))]
        self.volume_fraction.iter_mut().for_each(fill);
    }

    /// Set volume fractions by sampling an indicator function.
    ///
    /// Each valid cell is split into `samples^3` sub-cells and the fraction
    /// is the share of sub-cell centers for which `inside` returns true.
    pub fn initialize_from_indicator<F>(&mut self, samples: usize, inside: F)
    where
        F: Fn([f64; 3]) -> bool + Sync,
    {
        let samples = samples.max(1);
        let geometry = self.geometry.clone();
        let dx = geometry.cell_size();
        let inv_total = 1.0 / (samples * samples * samples) as f64;
        let sub = samples as f64;

        self.set_volume_fraction(|p| {
            let lo = geometry.cell_lo(p);
            let mut count = 0usize;
            for k in 0..samples {
                for j in 0..samples {
                    for i in 0..samples {
                        let x = [
                            lo[0] + (i as f64 + 0.5) / sub * dx[0],
                            lo[1] + (j as f64 + 0.5) / sub * dx[1],
                            lo[2] + (k as f64 + 0.5) / sub * dx[2],
                        ];
                        if inside(x) {
                            count += 1;
                        }
                    }
                }
            }
            count as f64 * inv_total
        });
    }

    /// Set every face velocity, ghosts included, from a function of
    /// direction and face-center position.
    pub fn set_face_velocity<F>(&mut self, f: F)
    where
        F: Fn(Direction, [f64; 3]) -> f64 + Sync,
    {
        let geometry = &self.geometry;
        for dir in Direction::ALL {
            let fill = |array: &mut BlockArray| {
                for p in array.array_box().iter() {
                    array.set(p, f(dir, geometry.face_center(dir, p)));
                }
            };

            #[cfg(feature = "parallel")]
            self.velocity[dir.index()].par_iter_mut().for_each(fill);

            #[cfg(not(feature = "parallel"))]
            self.velocity[dir.index()].iter_mut().for_each(fill);
        }
    }

    /// Fill velocity ghosts from neighbouring blocks and extrapolate past
    /// non-periodic domain faces.
    pub fn fill_velocity_boundary(&mut self) {
        for dir in Direction::ALL {
            let arrays = &mut self.velocity[dir.index()];
            exchange_halos(arrays, &self.geometry);
            let domain = Staggering::Face(dir).owned_box(self.geometry.domain());
            for array in arrays.iter_mut() {
                extrapolate_outside_domain(array, domain, self.geometry.periodic());
            }
        }
    }

    /// Exchange volume-fraction ghosts between blocks of this level.
    pub fn exchange_volume_fraction(&mut self) {
        exchange_halos(&mut self.volume_fraction, &self.geometry);
    }

    /// Apply physical boundary conditions to volume-fraction ghosts.
    pub fn fill_physical_boundary(&mut self, bcs: &BoundaryConditions) {
        let geometry = &self.geometry;

        #[cfg(feature = "parallel")]
        self.volume_fraction
            .par_iter_mut()
            .for_each(|array| fill_physical_ghosts(array, geometry, bcs));

        #[cfg(not(feature = "parallel"))]
        self.volume_fraction
            .iter_mut()
            .for_each(|array| fill_physical_ghosts(array, geometry, bcs));
    }

    /// Fill ghosts inside the domain that no block of this level owns by
    /// injecting the covering coarse cell value.
    pub(crate) fn fill_coarse_fine_ghosts(&mut self, coarse: &Level, ratio: i64) {
        let domain = self.geometry.domain();
        let boxes = &self.boxes;
        let geometry = &self.geometry;

        for array in self.volume_fraction.iter_mut() {
            let valid = array.valid_box();
            for p in array.array_box().iter() {
                if valid.contains(p) {
                    continue;
                }
                let wp = geometry.wrap_periodic(p);
                if !domain.contains(wp) || boxes.iter().any(|b| b.contains(wp)) {
                    continue;
                }
                let cp = [
                    wp[0].div_euclid(ratio),
                    wp[1].div_euclid(ratio),
                    wp[2].div_euclid(ratio),
                ];
                if let Some(value) = coarse.cell_value(cp) {
                    array.set(p, value);
                }
            }
        }
    }

    /// Replace coarse cells covered by this level with the average of
    /// their fine children.
    pub(crate) fn average_down_onto(&self, coarse: &mut Level, ratio: i64) {
        let children = (ratio * ratio * ratio) as f64;
        for (fine_box, fine) in self.boxes.iter().zip(&self.volume_fraction) {
            let covered = fine_box.coarsen(ratio);
            for (coarse_box, coarse_array) in coarse.boxes.iter().zip(coarse.volume_fraction.iter_mut()) {
                let Some(region) = covered.intersection(coarse_box) else {
                    continue;
                };
                for cp in region.iter() {
                    let child_box = IndexBox::new(cp, cp).refine(ratio);
                    let sum: f64 = child_box.iter().map(|p| fine.get(p)).sum();
                    coarse_array.set(cp, sum / children);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_rejected() {
        let geom = Geometry::unit_cube([8, 8, 8], [false; 3]);
        let result = Level::new(
            geom,
            vec![
                IndexBox::new([0, 0, 0], [4, 7, 7]),
                IndexBox::new([4, 0, 0], [7, 7, 7]),
            ],
        );
        assert!(matches!(result, Err(GridError::OverlappingBlocks { .. })));
    }

    #[test]
    fn test_outside_domain_rejected() {
        let geom = Geometry::unit_cube([4, 4, 4], [false; 3]);
        let result = Level::new(geom, vec![IndexBox::new([0, 0, 0], [4, 3, 3])]);
        assert!(matches!(result, Err(GridError::BlockOutsideDomain { .. })));
        let empty = Level::new(Geometry::unit_cube([4, 4, 4], [false; 3]), vec![]);
        assert!(matches!(empty, Err(GridError::NoBlocks)));
    }

    #[test]
    fn test_indicator_fraction() {
        let geom = Geometry::unit_cube([2, 1, 1], [false; 3]);
        let mut level = Level::single_block(geom);
        // Half-space x < 0.25 covers half of cell 0.
        level.initialize_from_indicator(4, |x| x[0] < 0.25);
        assert!((level.cell_value([0, 0, 0]).unwrap() - 0.5).abs() < 1e-14);
        assert_eq!(level.cell_value([1, 0, 0]), Some(0.0));
    }

    #[test]
    fn test_face_velocity_covers_ghosts() {
        let geom = Geometry::unit_cube([4, 4, 4], [false; 3]);
        let mut level = Level::single_block(geom);
        level.set_face_velocity(|dir, x| if dir == Direction::X { x[0] } else { 0.0 });
        let u = level.velocity(Direction::X, BlockIndex::new(0));
        assert!((u[[0, 0, 0]] - 0.0).abs() < 1e-14);
        assert!((u[[4, 1, 1]] - 1.0).abs() < 1e-14);
        assert!((u[[-2, 1, 1]] + 0.5).abs() < 1e-14);
    }

    #[test]
    fn test_fill_velocity_boundary_extrapolates() {
        let geom = Geometry::unit_cube([4, 4, 4], [false; 3]);
        let mut level = Level::decomposed(geom, 2);
        for b in BlockIndex::iter(level.n_blocks()) {
            let u = level.velocity_mut(Direction::Z, b);
            u.fill(f64::NAN);
            for p in u.valid_box().iter() {
                u.set(p, p[2] as f64);
            }
        }
        level.fill_velocity_boundary();
        let w = level.velocity(Direction::Z, BlockIndex::new(0));
        assert_eq!(w[[0, 0, 3]], 3.0);
        assert_eq!(w[[0, 0, -2]], 0.0);
        assert_eq!(w[[-1, -1, 1]], 1.0);
        assert!(w.as_slice().iter().all(|v| v.is_finite()));
    }
}
