//! Flux behaviour at non-periodic domain faces.

use vof_rs::boundary::{BoundaryConditions, BoundaryKind};
use vof_rs::mesh::{Geometry, Level};
use vof_rs::solver::VofDiagnostics;
use vof_rs::types::{Direction, Side};
use vof_rs::{AdvectionOrchestrator, VofConfig, VofError};

/// Channel open along x, periodic across.
fn channel(nx: usize, max_block: usize) -> Level {
    Level::decomposed(Geometry::unit_cube([nx, 4, 4], [false, true, true]), max_block)
}

fn x_faces(low: BoundaryKind, high: BoundaryKind) -> BoundaryConditions {
    BoundaryConditions::periodic()
        .with(Direction::X, Side::Low, low)
        .with(Direction::X, Side::High, high)
}

fn volume(level: &Level) -> f64 {
    VofDiagnostics::for_level(level, 0.0, 1e-12).total_volume
}

#[test]
fn test_inflow_fills_channel() {
    let nx = 16;
    let mut level = channel(nx, 8);
    level.set_face_velocity(|dir, _| if dir == Direction::X { 1.0 } else { 0.0 });
    let bcs = x_faces(
        BoundaryKind::MassInflow { volume_fraction: 1.0 },
        BoundaryKind::PressureOutflow,
    );
    let mut advection = AdvectionOrchestrator::new(VofConfig::default(), bcs, &level).expect("valid setup");

    let dt = 0.5 / nx as f64;
    for step in 1..=5 {
        advection.advance(&mut level, dt);
        let expected = step as f64 * 0.5 / nx as f64;
        assert!(
            (volume(&level) - expected).abs() < 1e-13,
            "step {}: volume {} expected {}",
            step,
            volume(&level),
            expected
        );
    }
    // Front after 2.5 cells of travel.
    assert_eq!(level.cell_value([1, 2, 2]), Some(1.0));
    assert!((level.cell_value([2, 0, 3]).unwrap_or(0.0) - 0.5).abs() < 1e-14);
    assert_eq!(level.cell_value([3, 1, 1]), Some(0.0));
}

#[test]
fn test_outflow_drains_channel() {
    let nx = 16;
    let mut level = channel(nx, 8);
    level.set_volume_fraction(|p| if p[0] >= 12 { 1.0 } else { 0.0 });
    level.set_face_velocity(|dir, _| if dir == Direction::X { 1.0 } else { 0.0 });
    let bcs = x_faces(BoundaryKind::ZeroGradient, BoundaryKind::PressureOutflow);
    let mut advection = AdvectionOrchestrator::new(VofConfig::default(), bcs, &level).expect("valid setup");

    let dt = 0.5 / nx as f64;
    let mut previous = volume(&level);
    for step in 1..=8 {
        advection.advance(&mut level, dt);
        let current = volume(&level);
        assert!(
            (previous - current - 0.5 / nx as f64).abs() < 1e-13,
            "step {}: drained {}",
            step,
            previous - current
        );
        previous = current;
    }
    assert!(volume(&level).abs() < 1e-13, "channel not empty: {}", volume(&level));
}

#[test]
fn test_outflow_face_rejects_backflow() {
    // Fluid sits in the outflow ghost cells and the velocity points into the
    // domain, yet nothing may enter.
    let nx = 8;
    let mut level = channel(nx, 8);
    level.set_volume_fraction(|p| if p[0] == nx as i64 - 1 { 1.0 } else { 0.0 });
    level.set_face_velocity(|dir, _| if dir == Direction::X { -1.0 } else { 0.0 });
    let bcs = x_faces(BoundaryKind::PressureOutflow, BoundaryKind::PressureOutflow);
    let mut advection = AdvectionOrchestrator::new(VofConfig::default(), bcs, &level).expect("valid setup");

    let before = volume(&level);
    advection.advance(&mut level, 0.25 / nx as f64);
    // The last column shifts a quarter cell away from the face; zero-gradient
    // ghosts behind it are full but contribute nothing.
    assert!((level.cell_value([7, 0, 0]).unwrap_or(-1.0) - 0.75).abs() < 1e-14);
    assert!((level.cell_value([6, 0, 0]).unwrap_or(-1.0) - 0.25).abs() < 1e-14);
    assert!((volume(&level) - before).abs() < 1e-14);
}

#[test]
fn test_wall_holds_fluid_where_outflow_drains() {
    let nx = 8;
    let run = |low: BoundaryKind| {
        let mut level = channel(nx, 8);
        level.set_volume_fraction(|p| if p[0] < 2 { 1.0 } else { 0.0 });
        level.set_face_velocity(|dir, _| if dir == Direction::X { -1.0 } else { 0.0 });
        let bcs = x_faces(low, BoundaryKind::ZeroGradient);
        let mut advection = AdvectionOrchestrator::new(VofConfig::default(), bcs, &level).expect("valid setup");
        advection.advance(&mut level, 0.5 / nx as f64);
        level
    };

    let walled = run(BoundaryKind::NoSlipWall);
    assert_eq!(walled.cell_value([0, 1, 1]), Some(1.0));

    let open = run(BoundaryKind::PressureOutflow);
    assert_eq!(open.cell_value([0, 1, 1]), Some(1.0));
    assert!((open.cell_value([1, 1, 1]).unwrap_or(-1.0) - 0.5).abs() < 1e-14);
    let drained = 2.0 / nx as f64 - volume(&open);
    assert!((drained - 0.5 / nx as f64).abs() < 1e-13, "drained {}", drained);
}

#[test]
fn test_mismatched_periodicity_rejected() {
    let level = channel(8, 8);
    let result = AdvectionOrchestrator::new(VofConfig::default(), BoundaryConditions::periodic(), &level);
    assert!(matches!(result, Err(VofError::Boundary(_))));

    let bad_inflow = x_faces(
        BoundaryKind::MassInflow { volume_fraction: 1.5 },
        BoundaryKind::PressureOutflow,
    );
    let result = AdvectionOrchestrator::new(VofConfig::default(), bad_inflow, &level);
    assert!(matches!(result, Err(VofError::Boundary(_))));
}
