//! Geometric volume fluxes for interface advection.
//!
//! Provides the cell-local geometry used by a directional sweep:
//! - PLIC plane constant and truncated volumes in a unit cell
//! - Youngs' interface normal from a 3×3×3 stencil
//! - Donor-acceptor split of a cell into left, staying and right volumes

mod donor_acceptor;
mod normal;
mod plic;

pub use donor_acceptor::{AdvectionScheme, CellFluxes, Reconstruction, reconstruct, split_cell};
pub use normal::{NORMAL_TOLERANCE, Stencil, gather_stencil, youngs_normal};
pub use plic::{InterfacePlane, l1_norm, plane_alpha, plane_volume};
