//! Errors raised while assembling grid levels and hierarchies.

use thiserror::Error;

use super::IndexBox;

/// Errors from grid construction and validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    /// A level must own at least one block.
    #[error("level has no blocks")]
    NoBlocks,

    /// A block extends past the level domain.
    #[error("block {block} lies outside the domain {domain}")]
    BlockOutsideDomain { block: IndexBox, domain: IndexBox },

    /// Two blocks of the same level overlap.
    #[error("blocks {first} and {second} overlap")]
    OverlappingBlocks { first: IndexBox, second: IndexBox },

    /// Physical extent must be positive in every direction.
    #[error("invalid physical extent in direction {dir}: lo = {lo}, hi = {hi}")]
    InvalidExtent { dir: usize, lo: f64, hi: f64 },

    /// Refinement ratio must be at least 2.
    #[error("invalid refinement ratio {0}")]
    InvalidRatio(i64),

    /// Fine level domain is not the refined coarse domain.
    #[error("level {level} domain {found} does not match refined domain {expected}")]
    DomainMismatch {
        level: usize,
        expected: IndexBox,
        found: IndexBox,
    },

    /// Fine block cannot be coarsened onto whole coarse cells.
    #[error("block {block} on level {level} is not aligned to refinement ratio {ratio}")]
    UnalignedBlock {
        level: usize,
        block: IndexBox,
        ratio: i64,
    },

    /// Fine block is not covered by the next coarser level.
    #[error("block {block} on level {level} is not nested in level {coarser}")]
    NotNested {
        level: usize,
        coarser: usize,
        block: IndexBox,
    },

    /// A hierarchy needs at least one level.
    #[error("hierarchy has no levels")]
    NoLevels,
}
