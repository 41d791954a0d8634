//! Simulated tick counter for deterministic host tests.
//!
//! Wraps a shared atomic counter, allowing a test or bridge to advance
//! simulated time while the code under test reads it.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tickstamp_core::traits::TickSource;

/// Simulated tick source backed by a shared atomic counter.
///
/// Multiple clones share the same underlying counter, enabling one side to
/// advance ticks while the other captures timestamps. The counter wraps at
/// 2^32 like the hardware it stands in for.
#[derive(Debug, Clone, Default)]
pub struct SimTicks {
    ticks: Arc<AtomicU32>,
}

impl SimTicks {
    /// Create a new counter starting at zero.
    pub fn new() -> Self {
        Self {
            ticks: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Create a new counter starting at the given value.
    ///
    /// Seeding just below `u32::MAX` exercises wraparound paths.
    pub fn with_initial(ticks: u32) -> Self {
        Self {
            ticks: Arc::new(AtomicU32::new(ticks)),
        }
    }

    /// Advance the counter by the given tick count, wrapping at 2^32.
    pub fn advance(&self, ticks: u32) {
        self.ticks.fetch_add(ticks, Ordering::Relaxed);
    }

    /// Set the counter to an absolute value.
    pub fn set(&self, ticks: u32) {
        self.ticks.store(ticks, Ordering::Relaxed);
    }
}

impl TickSource for SimTicks {
    fn now_ticks(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_starts_at_zero() {
        let ticks = SimTicks::new();
        assert_eq!(ticks.now_ticks(), 0);
    }

    #[test]
    fn test_advance_and_set() {
        let ticks = SimTicks::new();
        ticks.advance(1_000);
        assert_eq!(ticks.now_ticks(), 1_000);

        ticks.set(5);
        assert_eq!(ticks.now_ticks(), 5);
    }

    #[test]
    fn test_advance_wraps() {
        let ticks = SimTicks::with_initial(u32::MAX);
        ticks.advance(1);
        assert_eq!(ticks.now_ticks(), 0);
    }

    #[test]
    fn test_shared_counter_via_clone() {
        let ticks1 = SimTicks::new();
        let ticks2 = ticks1.clone();
        ticks1.advance(1_000);
        assert_eq!(ticks2.now_ticks(), 1_000);
    }
}
