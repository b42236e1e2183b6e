//! Geometric donor-acceptor split of one cell's fluid along a sweep.
//!
//! During a 1D sweep along `dir`, the fluid in a cell is divided into the
//! part leaving through the low face, the part leaving through the high
//! face, and the part that stays. Face Courant numbers `a_lo` and `a_hi` are
//! `u * dt / dx` at the low and high faces of the cell.
//!
//! Two remap strategies are supported:
//!
//! | Scheme | Cell after the sweep | Stay part |
//! |--------|----------------------|-----------|
//! | Eulerian | Fixed unit cell | `c - left - right` |
//! | Lagrangian | Stretched to `[a_lo, 1 + a_hi]` | `c * (1 + a_hi - a_lo) - left - right` |
//!
//! The Eulerian stay part is computed as a complement so the split conserves
//! the cell volume exactly.

use serde::{Deserialize, Serialize};

use super::normal::{Stencil, youngs_normal};
use super::plic::InterfacePlane;
use crate::types::Direction;

/// Remap strategy used for interfacial cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvectionScheme {
    /// Fixed-grid remap with divergence compensation
    #[default]
    Eulerian,
    /// Face-following remap
    Lagrangian,
}

impl std::fmt::Display for AdvectionScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdvectionScheme::Eulerian => f.write_str("eulerian"),
            AdvectionScheme::Lagrangian => f.write_str("lagrangian"),
        }
    }
}

/// Fluid distribution of a cell at the start of a sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Reconstruction {
    /// No fluid
    Empty,
    /// Completely filled
    Full,
    /// Planar interface enclosing `fraction` of the cell
    Plane {
        /// Volume fraction
        fraction: f64,
        /// Reconstructed interface
        plane: InterfacePlane,
    },
    /// Partial fill without a usable normal; fluid spread uniformly
    Uniform(f64),
}

impl Reconstruction {
    /// Volume fraction of the reconstructed cell.
    pub fn fraction(&self) -> f64 {
        match *self {
            Reconstruction::Empty => 0.0,
            Reconstruction::Full => 1.0,
            Reconstruction::Plane { fraction, .. } => fraction,
            Reconstruction::Uniform(fraction) => fraction,
        }
    }
}

/// Reconstruct the centre cell of a stencil.
///
/// Cells within `tolerance` of 0 or 1 are treated as empty or full.
pub fn reconstruct(stencil: &Stencil, tolerance: f64) -> Reconstruction {
    let c = stencil[1][1][1];
    if c <= tolerance {
        return Reconstruction::Empty;
    }
    if c >= 1.0 - tolerance {
        return Reconstruction::Full;
    }
    match youngs_normal(stencil) {
        Some(normal) => Reconstruction::Plane {
            fraction: c,
            plane: InterfacePlane::from_volume_fraction(normal, c),
        },
        None => Reconstruction::Uniform(c),
    }
}

/// Fluid volumes (in units of the cell volume) assigned by a sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellFluxes {
    /// Leaves through the low face
    pub left: f64,
    /// Stays in the cell
    pub center: f64,
    /// Leaves through the high face
    pub right: f64,
}

impl CellFluxes {
    /// Total volume accounted for.
    pub fn total(&self) -> f64 {
        self.left + self.center + self.right
    }
}

/// Split a reconstructed cell into outgoing and staying volumes.
///
/// # Arguments
/// * `recon` - Cell reconstruction at the start of the sweep
/// * `scheme` - Remap strategy
/// * `dir` - Sweep direction
/// * `a_lo` - Courant number at the low face (`u * dt / dx`, signed)
/// * `a_hi` - Courant number at the high face
pub fn split_cell(
    recon: &Reconstruction,
    scheme: AdvectionScheme,
    dir: Direction,
    a_lo: f64,
    a_hi: f64,
) -> CellFluxes {
    let out_lo = (-a_lo).max(0.0);
    let out_hi = a_hi.max(0.0);
    let keep = match scheme {
        AdvectionScheme::Eulerian => 1.0,
        AdvectionScheme::Lagrangian => 1.0 + a_hi - a_lo,
    };

    match *recon {
        Reconstruction::Empty => CellFluxes::default(),
        Reconstruction::Full => CellFluxes {
            left: out_lo,
            center: keep - out_lo - out_hi,
            right: out_hi,
        },
        Reconstruction::Uniform(c) => CellFluxes {
            left: c * out_lo,
            center: c * (keep - out_lo - out_hi),
            right: c * out_hi,
        },
        Reconstruction::Plane { fraction, plane } => {
            let (left, right) = match scheme {
                AdvectionScheme::Eulerian => (
                    plane.cut_volume(dir, 0.0, out_lo),
                    plane.cut_volume(dir, 1.0 - out_hi, out_hi),
                ),
                AdvectionScheme::Lagrangian => {
                    let moved = plane.stretched(dir, a_lo, a_hi);
                    (
                        moved.cut_volume(dir, a_lo, out_lo),
                        moved.cut_volume(dir, 1.0, out_hi),
                    )
                }
            };
            CellFluxes {
                left,
                center: fraction * keep - left - right,
                right,
            }
        }
    }
}
