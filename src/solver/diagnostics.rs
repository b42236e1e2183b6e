//! Runtime diagnostics for volume-fraction fields.
//!
//! Provides:
//! - Total liquid volume (conservation checks)
//! - Volume-fraction bounds
//! - Number of interfacial cells
//! - Maximum face Courant number
//!
//! # Example
//!
//! ```
//! use vof_rs::mesh::{Geometry, Level};
//! use vof_rs::solver::VofDiagnostics;
//!
//! let geom = Geometry::unit_cube([8, 8, 8], [true; 3]);
//! let mut level = Level::single_block(geom);
//! level.set_volume_fraction(|p| if p[0] < 4 { 1.0 } else { 0.0 });
//! level.set_face_velocity(|_, _| 0.5);
//!
//! let diag = VofDiagnostics::for_level(&level, 0.1, 1e-12);
//! assert!((diag.total_volume - 0.5).abs() < 1e-12);
//! assert_eq!(diag.interfacial_cells, 0);
//! assert!((diag.max_courant - 0.4).abs() < 1e-12);
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::mesh::{BlockArray, Geometry, Hierarchy, IndexBox, Level, LevelBlocks};
use crate::types::Direction;

/// Diagnostic quantities of one level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VofDiagnostics {
    /// Liquid volume (sum of c times cell volume over valid cells)
    pub total_volume: f64,
    /// Smallest volume fraction
    pub min_fraction: f64,
    /// Largest volume fraction
    pub max_fraction: f64,
    /// Cells strictly between empty and full
    pub interfacial_cells: usize,
    /// Largest |u| dt / dx over valid faces
    pub max_courant: f64,
}

impl Default for VofDiagnostics {
    fn default() -> Self {
        Self {
            total_volume: 0.0,
            min_fraction: f64::INFINITY,
            max_fraction: f64::NEG_INFINITY,
            interfacial_cells: 0,
            max_courant: 0.0,
        }
    }
}

impl VofDiagnostics {
    /// Compute diagnostics from raw block data.
    ///
    /// # Arguments
    /// * `geometry` - Level geometry
    /// * `boxes` - Valid box of each block
    /// * `volume_fraction` - Volume fraction per block
    /// * `velocity` - Face velocities per direction, then per block
    /// * `dt` - Time step used for the Courant number
    /// * `tolerance` - Empty/full tolerance for counting interfacial cells
    pub fn compute(
        geometry: &Geometry,
        boxes: &[IndexBox],
        volume_fraction: &[BlockArray],
        velocity: [&[BlockArray]; 3],
        dt: f64,
        tolerance: f64,
    ) -> Self {
        let block_diag = |b: usize| {
            let mut diag = fraction_stats(boxes[b], &volume_fraction[b], tolerance);
            diag.total_volume *= geometry.cell_volume();
            diag.max_courant = block_courant(geometry, boxes[b], velocity, b, dt);
            diag
        };

        #[cfg(feature = "parallel")]
        let diag = (0..boxes.len())
            .into_par_iter()
            .map(block_diag)
            .reduce(VofDiagnostics::default, VofDiagnostics::merge);

        #[cfg(not(feature = "parallel"))]
        let diag = (0..boxes.len())
            .map(block_diag)
            .fold(VofDiagnostics::default(), VofDiagnostics::merge);

        diag
    }

    /// Diagnostics of a level.
    pub fn for_level(level: &Level, dt: f64, tolerance: f64) -> Self {
        let velocity = Direction::ALL.map(|dir| level.velocities(dir));
        Self::compute(
            level.geometry(),
            level.boxes(),
            level.volume_fractions(),
            velocity,
            dt,
            tolerance,
        )
    }

    /// Diagnostics of a split level borrow.
    pub fn for_blocks(blocks: &LevelBlocks<'_>, dt: f64, tolerance: f64) -> Self {
        Self::compute(
            blocks.geometry,
            blocks.boxes,
            &*blocks.volume_fraction,
            blocks.velocity,
            dt,
            tolerance,
        )
    }

    /// Diagnostics of every level of a hierarchy, coarse first.
    ///
    /// Levels overlap, so the volumes must not be summed; average down
    /// first and read level 0 for the composite volume.
    pub fn for_hierarchy(hierarchy: &Hierarchy, dt: f64, tolerance: f64) -> Vec<Self> {
        hierarchy
            .levels()
            .iter()
            .map(|level| Self::for_level(level, dt, tolerance))
            .collect()
    }

    /// Combine diagnostics of disjoint block sets.
    pub fn merge(self, other: VofDiagnostics) -> VofDiagnostics {
        VofDiagnostics {
            total_volume: self.total_volume + other.total_volume,
            min_fraction: self.min_fraction.min(other.min_fraction),
            max_fraction: self.max_fraction.max(other.max_fraction),
            interfacial_cells: self.interfacial_cells + other.interfacial_cells,
            max_courant: self.max_courant.max(other.max_courant),
        }
    }

    /// Whether every volume fraction lies in [0, 1].
    pub fn is_bounded(&self) -> bool {
        self.min_fraction >= 0.0 && self.max_fraction <= 1.0
    }

    /// Relative volume change with respect to an earlier state.
    pub fn volume_change(&self, initial: &VofDiagnostics) -> f64 {
        if initial.total_volume.abs() > 0.0 {
            (self.total_volume - initial.total_volume) / initial.total_volume
        } else {
            self.total_volume
        }
    }

    /// One-line summary for logging.
    pub fn summary_line(&self) -> String {
        format!(
            "V={:.6e} c=[{:.3e}, {:.6}] interface={} CFL={:.3}",
            self.total_volume,
            self.min_fraction,
            self.max_fraction,
            self.interfacial_cells,
            self.max_courant
        )
    }
}

/// Largest face Courant number of a level.
pub fn max_courant(blocks: &LevelBlocks<'_>, dt: f64) -> f64 {
    let geometry = blocks.geometry;
    let velocity = blocks.velocity;
    let block_max = |(b, &block): (usize, &IndexBox)| block_courant(geometry, block, velocity, b, dt);

    #[cfg(feature = "parallel")]
    let max = blocks
        .boxes
        .par_iter()
        .enumerate()
        .map(block_max)
        .reduce(|| 0.0, f64::max);

    #[cfg(not(feature = "parallel"))]
    let max = blocks
        .boxes
        .iter()
        .enumerate()
        .map(block_max)
        .fold(0.0, f64::max);

    max
}

/// Fraction statistics of one block, volume in cell units.
fn fraction_stats(block: IndexBox, volume_fraction: &BlockArray, tolerance: f64) -> VofDiagnostics {
    let mut diag = VofDiagnostics::default();
    for p in block.iter() {
        let c = volume_fraction.get(p);
        diag.total_volume += c;
        diag.min_fraction = diag.min_fraction.min(c);
        diag.max_fraction = diag.max_fraction.max(c);
        if c > tolerance && c < 1.0 - tolerance {
            diag.interfacial_cells += 1;
        }
    }
    diag
}

fn block_courant(
    geometry: &Geometry,
    block: IndexBox,
    velocity: [&[BlockArray]; 3],
    b: usize,
    dt: f64,
) -> f64 {
    Direction::ALL
        .iter()
        .map(|&dir| {
            let scale = dt * geometry.inv_cell_size(dir);
            let u = &velocity[dir.index()][b];
            block
                .surrounding_nodes(dir)
                .iter()
                .map(|f| (u.get(f) * scale).abs())
                .fold(0.0, f64::max)
        })
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_diagnostics() {
        let geom = Geometry::unit_cube([4, 4, 4], [true; 3]);
        let mut level = Level::decomposed(geom, 2);
        level.set_volume_fraction(|p| match p[0] {
            0 => 1.0,
            1 => 0.25,
            _ => 0.0,
        });

        let diag = VofDiagnostics::for_level(&level, 0.1, 1e-12);
        let expected = (16.0 + 0.25 * 16.0) / 64.0;
        assert!((diag.total_volume - expected).abs() < 1e-14, "V = {}", diag.total_volume);
        assert_eq!(diag.interfacial_cells, 16);
        assert_eq!(diag.min_fraction, 0.0);
        assert_eq!(diag.max_fraction, 1.0);
        assert!(diag.is_bounded());
        assert_eq!(diag.max_courant, 0.0);
    }

    #[test]
    fn test_max_courant_uses_cell_size() {
        let geom = Geometry::new(
            IndexBox::from_shape([4, 8, 2]),
            [0.0; 3],
            [1.0, 1.0, 1.0],
            [false; 3],
        )
        .expect("valid geometry");
        let mut level = Level::single_block(geom);
        level.set_face_velocity(|dir, _| if dir == Direction::Y { -1.0 } else { 0.5 });

        // dy = 1/8 dominates: 1.0 * 0.05 * 8
        let courant = max_courant(&level.blocks_mut(), 0.05);
        assert!((courant - 0.4).abs() < 1e-12, "CFL = {}", courant);
    }

    #[test]
    fn test_volume_change() {
        let initial = VofDiagnostics {
            total_volume: 2.0,
            ..VofDiagnostics::default()
        };
        let current = VofDiagnostics {
            total_volume: 2.002,
            ..VofDiagnostics::default()
        };
        assert!((current.volume_change(&initial) - 1e-3).abs() < 1e-12);
    }
}
