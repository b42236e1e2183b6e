//! Strongly-typed domain types for safer APIs.
//!
//! This module provides newtypes and structured types to make APIs
//! self-documenting and prevent parameter mix-ups.
//!
//! # Design Philosophy
//!
//! - **Newtypes prevent mix-ups**: `LevelIndex(1)` vs `BlockIndex(1)` are distinct types
//! - **Named fields over positional**: `DomainFaces { x_lo, x_hi, .. }` instead of `[T; 6]`
//! - **Closed enumerations**: sweep directions are a `Direction`, never a bare `usize`
//!
//! # Example
//!
//! ```
//! use vof_rs::types::{BlockIndex, Direction, DomainFaces, LevelIndex, Side};
//!
//! let lev = LevelIndex::new(0);
//! let block = BlockIndex::new(3);
//! assert_eq!(format!("{lev}/{block}"), "L0/B3");
//!
//! let faces = DomainFaces::uniform(0.0_f64).with(Direction::Z, Side::High, 1.0);
//! assert_eq!(*faces.get(Direction::Z, Side::High), 1.0);
//! assert_eq!(Direction::Y.next(), Direction::Z);
//! ```

mod direction;
mod faces;
mod indices;

pub use direction::Direction;
pub use faces::{DomainFaces, Side};
pub use indices::{BlockIndex, LevelIndex};
