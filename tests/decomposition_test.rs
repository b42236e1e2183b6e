//! Results must not depend on how a level is split into blocks.

use std::f64::consts::PI;

use vof_rs::boundary::{BoundaryConditions, BoundaryKind};
use vof_rs::mesh::{Geometry, IndexBox, Level};
use vof_rs::types::{Direction, Side};
use vof_rs::{AdvectionOrchestrator, VofConfig};

fn rotating_level(geom: Geometry, boxes: Option<Vec<IndexBox>>) -> Level {
    let mut level = match boxes {
        Some(boxes) => Level::new(geom, boxes).expect("valid layout"),
        None => Level::single_block(geom),
    };
    // Solid-body rotation about the domain centre, from a streamfunction
    // sampled at face corners.
    let dx = level.geometry().cell_size();
    let psi = |x: f64, y: f64| -PI * ((x - 0.5).powi(2) + (y - 0.5).powi(2));
    level.set_face_velocity(|dir, x| match dir {
        Direction::X => (psi(x[0], x[1] + 0.5 * dx[1]) - psi(x[0], x[1] - 0.5 * dx[1])) / dx[1],
        Direction::Y => -(psi(x[0] + 0.5 * dx[0], x[1]) - psi(x[0] - 0.5 * dx[0], x[1])) / dx[0],
        Direction::Z => 0.1,
    });
    level.fill_velocity_boundary();
    level.initialize_from_indicator(3, |x| {
        let r2 = (x[0] - 0.5).powi(2) + (x[1] - 0.72).powi(2);
        r2 < 0.0225 && !((x[0] - 0.5).abs() < 0.025 && x[1] < 0.8)
    });
    level
}

fn run(mut level: Level, bcs: &BoundaryConditions, config: &VofConfig, steps: usize) -> Level {
    let mut advection = AdvectionOrchestrator::new(config.clone(), *bcs, &level).expect("valid setup");
    for _ in 0..steps {
        advection.advance(&mut level, 0.2 / 20.0);
    }
    level
}

fn assert_same_field(reference: &Level, other: &Level) {
    for p in reference.geometry().domain().iter() {
        let a = reference.cell_value(p).unwrap_or(f64::NAN);
        let b = other.cell_value(p).unwrap_or(f64::NAN);
        assert!((a - b).abs() < 1e-13, "cell {:?}: {} vs {}", p, a, b);
    }
}

fn walls() -> BoundaryConditions {
    BoundaryConditions::periodic()
        .with(Direction::X, Side::Low, BoundaryKind::SlipWall)
        .with(Direction::X, Side::High, BoundaryKind::SlipWall)
        .with(Direction::Y, Side::Low, BoundaryKind::PressureOutflow)
        .with(Direction::Y, Side::High, BoundaryKind::MassInflow { volume_fraction: 0.0 })
}

#[test]
fn test_regular_decomposition_matches_single_block() {
    let geom = Geometry::unit_cube([20, 20, 4], [true; 3]);
    let bcs = BoundaryConditions::periodic();
    let config = VofConfig::default();

    let single = run(rotating_level(geom.clone(), None), &bcs, &config, 6);
    let blocks = geom.domain().chop(5);
    let split = run(rotating_level(geom, Some(blocks)), &bcs, &config, 6);
    assert_same_field(&single, &split);
}

#[test]
fn test_irregular_decomposition_with_walls() {
    let geom = Geometry::unit_cube([20, 20, 4], [false, false, true]);
    let bcs = walls();
    let config = VofConfig::default().with_lagrangian(true);

    let boxes = vec![
        IndexBox::new([0, 0, 0], [6, 12, 3]),
        IndexBox::new([7, 0, 0], [19, 4, 1]),
        IndexBox::new([7, 0, 2], [19, 4, 3]),
        IndexBox::new([7, 5, 0], [19, 12, 3]),
        IndexBox::new([0, 13, 0], [19, 19, 3]),
    ];
    let single = run(rotating_level(geom.clone(), None), &bcs, &config, 6);
    let split = run(rotating_level(geom, Some(boxes)), &bcs, &config, 6);
    assert_same_field(&single, &split);
}
