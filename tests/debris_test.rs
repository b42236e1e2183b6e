//! Debris removal as part of a full advection step.

use vof_rs::boundary::BoundaryConditions;
use vof_rs::mesh::{Geometry, Level};
use vof_rs::{AdvectionOrchestrator, VofConfig};

/// Periodic level at rest with a few hand-placed cells.
fn resting_level(cells: &[([i64; 3], f64)]) -> Level {
    let mut level = Level::decomposed(Geometry::unit_cube([8, 8, 8], [true; 3]), 4);
    let cells = cells.to_vec();
    level.set_volume_fraction(move |p| {
        cells
            .iter()
            .find(|(q, _)| *q == p)
            .map(|(_, c)| *c)
            .unwrap_or(0.0)
    });
    level
}

/// Aggressive cleanup that treats fragments below 2% as debris.
fn cleanup() -> VofConfig {
    VofConfig::default().with_debris_threshold(0.02)
}

fn step(level: &mut Level, config: VofConfig) -> usize {
    let mut advection =
        AdvectionOrchestrator::new(config, BoundaryConditions::periodic(), &*level).expect("valid setup");
    advection.advance(level, 0.01).debris_cells()
}

#[test]
fn test_isolated_fragment_removed() {
    let mut level = resting_level(&[([3, 3, 3], 0.01)]);
    let removed = step(&mut level, cleanup());
    assert_eq!(removed, 1);
    assert_eq!(level.cell_value([3, 3, 3]), Some(0.0));
}

#[test]
fn test_fragment_next_to_full_cell_kept() {
    let mut level = resting_level(&[([3, 3, 3], 0.01), ([3, 3, 4], 1.0)]);
    let removed = step(&mut level, cleanup());
    assert_eq!(removed, 0);
    assert_eq!(level.cell_value([3, 3, 3]), Some(0.01));
}

#[test]
fn test_full_neighbour_across_block_boundary() {
    // Cells (3, 3, 3) and (4, 3, 3) live in different blocks.
    let mut level = resting_level(&[([3, 3, 3], 0.01), ([4, 3, 3], 1.0)]);
    step(&mut level, cleanup());
    assert_eq!(level.cell_value([3, 3, 3]), Some(0.01));
}

#[test]
fn test_full_neighbour_across_periodic_boundary() {
    let mut level = resting_level(&[([0, 5, 5], 0.01), ([7, 5, 5], 1.0)]);
    step(&mut level, cleanup());
    assert_eq!(level.cell_value([0, 5, 5]), Some(0.01));
}

#[test]
fn test_disabled_debris_removal_keeps_fragment() {
    let mut level = resting_level(&[([3, 3, 3], 0.01)]);
    let removed = step(&mut level, cleanup().with_debris_removal(false));
    assert_eq!(removed, 0);
    assert_eq!(level.cell_value([3, 3, 3]), Some(0.01));
}

#[test]
fn test_custom_threshold() {
    let mut level = resting_level(&[([2, 2, 2], 0.04), ([5, 5, 5], 0.01)]);
    let removed = step(&mut level, VofConfig::default().with_debris_threshold(0.05));
    assert_eq!(removed, 2);
    assert_eq!(level.cell_value([2, 2, 2]), Some(0.0));
}

#[test]
fn test_default_threshold_only_removes_residue() {
    let mut level = resting_level(&[([2, 2, 2], 0.01), ([5, 5, 5], 1e-8)]);
    let removed = step(&mut level, VofConfig::default());
    assert_eq!(removed, 1);
    assert_eq!(level.cell_value([2, 2, 2]), Some(0.01));
    assert_eq!(level.cell_value([5, 5, 5]), Some(0.0));
}
