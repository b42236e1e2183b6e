//! Strongly-typed index newtypes.
//!
//! These types prevent mixing up refinement levels and grid blocks when both
//! are addressed by plain integers.

use std::fmt;

/// Macro to generate index newtypes with common functionality.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident, $display_prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Create a new index.
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Get the raw index value.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }

            /// First index (0).
            pub const ZERO: Self = Self(0);

            /// Create an iterator over [0, n).
            pub fn iter(n: usize) -> impl ExactSizeIterator<Item = $name> {
                (0..n).map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl<T> std::ops::Index<$name> for [T] {
            type Output = T;
            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }

        impl<T> std::ops::IndexMut<$name> for [T] {
            #[inline]
            fn index_mut(&mut self, idx: $name) -> &mut T {
                &mut self[idx.0]
            }
        }

        impl<T> std::ops::Index<$name> for Vec<T> {
            type Output = T;
            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }

        impl<T> std::ops::IndexMut<$name> for Vec<T> {
            #[inline]
            fn index_mut(&mut self, idx: $name) -> &mut T {
                &mut self[idx.0]
            }
        }
    };
}

define_index!(
    /// Refinement level index (0 is the coarsest level).
    ///
    /// # Example
    ///
    /// ```
    /// use vof_rs::types::LevelIndex;
    ///
    /// let lev = LevelIndex::new(2);
    /// assert_eq!(lev.get(), 2);
    /// assert_eq!(lev.coarser(), Some(LevelIndex::new(1)));
    /// ```
    LevelIndex,
    "L"
);

define_index!(
    /// Index of a grid block within one refinement level.
    ///
    /// # Example
    ///
    /// ```
    /// use vof_rs::types::BlockIndex;
    ///
    /// let indices: Vec<_> = BlockIndex::iter(4).collect();
    /// assert_eq!(indices.len(), 4);
    /// assert_eq!(indices[3].get(), 3);
    /// ```
    BlockIndex,
    "B"
);

impl LevelIndex {
    /// The next coarser level, or `None` on level 0.
    #[inline]
    pub fn coarser(self) -> Option<LevelIndex> {
        self.0.checked_sub(1).map(LevelIndex)
    }
}

// =============================================================================
// Tests
// =============================================================================
