//! Block-structured Cartesian mesh.
//!
//! Provides the grid data structures the advection scheme runs on:
//! - Integer index boxes and per-block arrays with ghost layers
//! - Level geometry (cell size, periodicity, physical coordinates)
//! - Levels of disjoint blocks carrying volume fraction and face velocities
//! - Multi-level hierarchies with coarse-to-fine ghost filling
//! - Ghost exchange between blocks, including periodic images

mod array;
mod block_mesh;
mod error;
mod geometry;
pub mod halo;
mod hierarchy;
mod index_box;
mod level;

pub use array::{BlockArray, GHOST_WIDTH, Staggering};
pub use block_mesh::{BlockStructuredMesh, LevelBlocks};
pub use error::GridError;
pub use geometry::Geometry;
pub use hierarchy::Hierarchy;
pub use index_box::IndexBox;
pub use level::Level;
