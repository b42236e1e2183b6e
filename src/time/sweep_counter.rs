//! Rotating sweep counter.

use serde::{Deserialize, Serialize};

use crate::solver::SweepOrder;

/// Counter that selects the sweep order of successive time steps.
///
/// The value runs 1, 2, 3, 1, ... and is incremented at the start of every
/// step, so the first step sweeps x → y → z, the second y → z → x and the
/// third z → x → y. A freshly created counter holds 0.
///
/// # Example
///
/// ```
/// use vof_rs::time::SweepCounter;
///
/// let mut counter = SweepCounter::new();
/// let firsts: Vec<String> = (0..4).map(|_| counter.advance().to_string()).collect();
/// assert_eq!(firsts, ["xyz", "yzx", "zxy", "xyz"]);
/// assert_eq!(counter.value(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepCounter {
    value: u8,
}

impl SweepCounter {
    /// Counter before the first step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter restored from a saved value; values are reduced to 0..=3.
    pub fn with_value(value: u8) -> Self {
        let value = if value == 0 { 0 } else { (value - 1) % 3 + 1 };
        Self { value }
    }

    /// Advance to the next step and return its sweep order.
    pub fn advance(&mut self) -> SweepOrder {
        self.value = self.value % 3 + 1;
        SweepOrder::from_counter(self.value)
    }

    /// Value used by the most recent step (0 before the first step).
    #[inline]
    pub fn value(&self) -> u8 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn test_wraps_after_three() {
        let mut counter = SweepCounter::new();
        let values: Vec<u8> = (0..7)
            .map(|_| {
                counter.advance();
                counter.value()
            })
            .collect();
        assert_eq!(values, [1, 2, 3, 1, 2, 3, 1]);
    }

    #[test]
    fn test_every_axis_leads_once_per_cycle() {
        let mut counter = SweepCounter::new();
        let mut firsts: Vec<Direction> = (0..3).map(|_| counter.advance().first()).collect();
        firsts.sort();
        assert_eq!(firsts, Direction::ALL);
    }

    #[test]
    fn test_restore() {
        let mut counter = SweepCounter::with_value(2);
        assert_eq!(counter.advance().to_string(), "zxy");
        assert_eq!(SweepCounter::with_value(5).value(), 2);
        assert_eq!(SweepCounter::with_value(0).value(), 0);
    }
}
