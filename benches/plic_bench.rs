//! Benchmarks for the cell-local PLIC kernels.
//!
//! Run with: `cargo bench --bench plic_bench`
//!
//! Covers plane-constant inversion, truncated volumes, Youngs normals and
//! the full donor-acceptor split of one cell.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vof_rs::AdvectionScheme;
use vof_rs::flux::{
    InterfacePlane, Reconstruction, Stencil, plane_alpha, plane_volume, reconstruct, split_cell,
    youngs_normal,
};
use vof_rs::types::Direction;

/// Normals spread over the sphere, L1-normalised.
fn generate_normals(n: usize) -> Vec<[f64; 3]> {
    (0..n)
        .map(|i| {
            let phase = i as f64 * 0.37;
            let m = [phase.cos(), (1.3 * phase).sin(), 0.4 * (0.7 * phase).cos()];
            let norm = m[0].abs() + m[1].abs() + m[2].abs();
            [m[0] / norm, m[1] / norm, m[2] / norm]
        })
        .collect()
}

/// Stencils cut by a tilted plane at varying offsets.
fn generate_stencils(n: usize) -> Vec<Stencil> {
    (0..n)
        .map(|i| {
            let offset = 0.1 + 0.8 * (i as f64 / n as f64);
            let mut s = [[[0.0; 3]; 3]; 3];
            for (a, plane) in s.iter_mut().enumerate() {
                for (b, row) in plane.iter_mut().enumerate() {
                    for (c, value) in row.iter_mut().enumerate() {
                        let d = 0.5 * a as f64 + 0.3 * b as f64 + 0.2 * c as f64 - offset;
                        *value = (0.5 - d).clamp(0.0, 1.0);
                    }
                }
            }
            s
        })
        .collect()
}

fn bench_plane_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("plane_geometry");
    let normals = generate_normals(1000);

    group.bench_function("plane_alpha", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for (i, normal) in normals.iter().enumerate() {
                let fraction = (i % 97) as f64 / 97.0 + 0.005;
                total += plane_alpha(black_box(*normal), black_box(fraction));
            }
            total
        });
    });

    group.bench_function("plane_volume", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for (i, normal) in normals.iter().enumerate() {
                let alpha = (i % 89) as f64 / 89.0 - 0.3;
                total += plane_volume(black_box(*normal), black_box(alpha));
            }
            total
        });
    });

    group.bench_function("cut_volume", |b| {
        let planes: Vec<InterfacePlane> = normals
            .iter()
            .map(|&m| InterfacePlane::from_volume_fraction(m, 0.37))
            .collect();
        b.iter(|| {
            let mut total = 0.0;
            for plane in &planes {
                total += plane.cut_volume(black_box(Direction::Y), black_box(0.6), black_box(0.4));
            }
            total
        });
    });

    group.finish();
}

fn bench_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruction");
    let stencils = generate_stencils(1000);

    group.bench_function("youngs_normal", |b| {
        b.iter(|| {
            stencils
                .iter()
                .filter_map(|s| youngs_normal(black_box(s)))
                .map(|m| m[0])
                .sum::<f64>()
        });
    });

    group.bench_function("reconstruct", |b| {
        b.iter(|| {
            stencils
                .iter()
                .map(|s| reconstruct(black_box(s), 1e-12).fraction())
                .sum::<f64>()
        });
    });

    group.finish();
}

fn bench_split_cell(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_cell");
    let recons: Vec<Reconstruction> = generate_stencils(1000)
        .iter()
        .map(|s| reconstruct(s, 1e-12))
        .collect();

    for scheme in [AdvectionScheme::Eulerian, AdvectionScheme::Lagrangian] {
        group.bench_with_input(BenchmarkId::new("scheme", scheme), &scheme, |b, &scheme| {
            b.iter(|| {
                let mut total = 0.0;
                for recon in &recons {
                    let fluxes = split_cell(
                        black_box(recon),
                        scheme,
                        Direction::X,
                        black_box(0.3),
                        black_box(0.35),
                    );
                    total += fluxes.right;
                }
                total
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_plane_geometry, bench_reconstruction, bench_split_cell);
criterion_main!(benches);
