//! One-dimensional geometric sweep over a block.
//!
//! The sweep runs in two passes. The first pass splits the fluid of every
//! cell in the block and its one-cell halo into left, staying and right
//! volumes. The second pass rebuilds each valid cell from its own staying
//! volume and the volumes its two neighbours send towards it:
//!
//! ```text
//! c_new(i) = center(i) + right(i - 1) + left(i + 1) + w(i) * (a_hi(i) - a_lo(i))
//! ```
//!
//! Because every face flux is computed once by its donor cell and picked up
//! once by the acceptor, the update is conservative. Halo cells are split
//! with the same data their owning block uses, so neighbouring blocks agree
//! on the fluxes through their shared faces.

use crate::boundary::BlockBoundary;
use crate::flux::{AdvectionScheme, CellFluxes, gather_stencil, reconstruct, split_cell};
use crate::mesh::{BlockArray, IndexBox};
use crate::types::Direction;

use super::classify::CellTag;

/// Per-cell donor-acceptor volumes of one sweep, over the block grown by one.
#[derive(Clone, Debug)]
pub struct FluxBuffers {
    /// Volume leaving through the low face
    pub left: BlockArray,
    /// Volume staying in the cell
    pub center: BlockArray,
    /// Volume leaving through the high face
    pub right: BlockArray,
}

impl FluxBuffers {
    /// Zeroed buffers for `block` and its one-cell halo.
    pub fn new(block: IndexBox) -> Self {
        let region = block.grow(1);
        Self {
            left: BlockArray::cells(region, 0, 0.0),
            center: BlockArray::cells(region, 0, 0.0),
            right: BlockArray::cells(region, 0, 0.0),
        }
    }

    /// Clear all buffers.
    pub fn reset(&mut self) {
        self.left.fill(0.0);
        self.center.fill(0.0);
        self.right.fill(0.0);
    }

    /// Store the split of one cell.
    #[inline]
    pub fn store(&mut self, p: [i64; 3], fluxes: CellFluxes) {
        let offset = self.center.offset(p);
        self.left.as_mut_slice()[offset] = fluxes.left;
        self.center.as_mut_slice()[offset] = fluxes.center;
        self.right.as_mut_slice()[offset] = fluxes.right;
    }

    /// Split of one cell.
    #[inline]
    pub fn load(&self, p: [i64; 3]) -> CellFluxes {
        let offset = self.center.offset(p);
        CellFluxes {
            left: self.left.as_slice()[offset],
            center: self.center.as_slice()[offset],
            right: self.right.as_slice()[offset],
        }
    }
}

/// Read-only inputs of a sweep over one block.
#[derive(Clone, Copy, Debug)]
pub struct SweepInput<'a> {
    /// Sweep direction
    pub dir: Direction,
    /// Face velocity normal to `dir`
    pub velocity: &'a BlockArray,
    /// `dt / dx` along `dir`
    pub dt_over_dx: f64,
    /// Remap scheme for interfacial cells
    pub scheme: AdvectionScheme,
    /// Empty/full snapping tolerance
    pub tolerance: f64,
    /// Domain faces seen by the block
    pub boundary: &'a BlockBoundary,
}

impl SweepInput<'_> {
    /// Courant number at face `face`, zero on blocked domain faces.
    #[inline]
    fn courant(&self, face: [i64; 3]) -> f64 {
        if self.boundary.is_blocked(self.dir, face[self.dir.index()]) {
            0.0
        } else {
            self.velocity.get(face) * self.dt_over_dx
        }
    }
}

/// Clipping applied by one sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SweepStats {
    /// Cells that left [0, 1] by more than the tolerance
    pub clipped_cells: usize,
    /// Largest distance outside [0, 1] before clipping
    pub max_overshoot: f64,
    /// Net volume (in cell units) added by clipping and snapping
    pub clip_volume: f64,
}

impl SweepStats {
    /// Combine statistics of two sweeps or blocks.
    pub fn merge(self, other: SweepStats) -> SweepStats {
        SweepStats {
            clipped_cells: self.clipped_cells + other.clipped_cells,
            max_overshoot: self.max_overshoot.max(other.max_overshoot),
            clip_volume: self.clip_volume + other.clip_volume,
        }
    }
}

/// Advance the volume fraction of `block` by one directional sweep.
///
/// `volume_fraction` must hold current values in the block and two ghost
/// layers. `tags` must cover the block grown by one cell.
pub fn sweep_block(
    block: IndexBox,
    input: &SweepInput<'_>,
    volume_fraction: &mut BlockArray,
    tags: &BlockArray<CellTag>,
    fluxes: &mut FluxBuffers,
) -> SweepStats {
    let dir = input.dir;
    let e = dir.unit();

    fluxes.reset();
    for p in block.grow(1).iter() {
        let hi_face = [p[0] + e[0], p[1] + e[1], p[2] + e[2]];
        let a_lo = input.courant(p);
        let a_hi = input.courant(hi_face);
        let recon = reconstruct(&gather_stencil(volume_fraction, p), input.tolerance);
        fluxes.store(p, split_cell(&recon, input.scheme, dir, a_lo, a_hi));
    }

    let d = dir.index();
    let tol = input.tolerance;
    let mut stats = SweepStats::default();
    for p in block.iter() {
        let lo_cell = [p[0] - e[0], p[1] - e[1], p[2] - e[2]];
        let hi_cell = [p[0] + e[0], p[1] + e[1], p[2] + e[2]];

        let from_lo = if input.boundary.is_outflow_only(dir, p[d]) {
            0.0
        } else {
            fluxes.right.get(lo_cell)
        };
        let from_hi = if input.boundary.is_outflow_only(dir, p[d] + 1) {
            0.0
        } else {
            fluxes.left.get(hi_cell)
        };

        let divergence = input.courant(hi_cell) - input.courant(p);
        let raw = fluxes.center.get(p) + from_lo + from_hi + tags.get(p).dilation_weight * divergence;

        let clipped = if raw < tol {
            0.0
        } else if raw > 1.0 - tol {
            1.0
        } else {
            raw
        };
        let overshoot = (-raw).max(raw - 1.0);
        if overshoot > tol {
            stats.clipped_cells += 1;
            stats.max_overshoot = stats.max_overshoot.max(overshoot);
        }
        stats.clip_volume += clipped - raw;
        volume_fraction.set(p, clipped);
    }
    stats
}
