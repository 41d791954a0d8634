//! Single-writer/multi-reader snapshot cells.
//!
//! A plain timestamp value is single-owner: mutation goes through `&mut` and
//! sharing one instance across tasks for concurrent read/refresh is not
//! safe. These cells are the variant explicitly marked for that use. The
//! snapshot lives in an `AtomicU32`, so it is always stored and loaded as a
//! single aligned 32-bit unit and reads cannot tear.
//!
//! # Contract
//!
//! One mutator plus any number of concurrent readers. A stored snapshot
//! becomes visible to readers eventually (relaxed ordering, no fences); there
//! is no read-modify-write atomicity and no ordering guarantee relative to
//! other memory. All arithmetic stays on the value types; a cell only moves
//! snapshots in and out.

use core::sync::atomic::{AtomicU32, Ordering};

use super::{TimestampMicros, TimestampNanos};
use crate::traits::TickSource;

/// Shared cell holding a [`TimestampMicros`] snapshot.
///
/// # Example
///
/// ```
/// use tickstamp_core::timestamp::SharedTimestampMicros;
/// use tickstamp_core::traits::MockTicks;
///
/// static LAST_SEEN: SharedTimestampMicros = SharedTimestampMicros::new();
///
/// let ticks = MockTicks::with_initial(480);
/// LAST_SEEN.refresh(&ticks); // one task updates...
/// let snapshot = LAST_SEEN.load(); // ...any task reads
/// assert_eq!(snapshot.ticks(), 480);
/// ```
#[derive(Debug, Default)]
pub struct SharedTimestampMicros {
    ticks: AtomicU32,
}

impl SharedTimestampMicros {
    /// Creates a zero-valued cell (const fn for static initialization).
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU32::new(0),
        }
    }

    /// Loads the current snapshot as a plain value.
    #[inline]
    pub fn load(&self) -> TimestampMicros {
        TimestampMicros::from_ticks(self.ticks.load(Ordering::Relaxed))
    }

    /// Stores a snapshot computed elsewhere.
    #[inline]
    pub fn store(&self, stamp: TimestampMicros) {
        self.ticks.store(stamp.ticks(), Ordering::Relaxed);
    }

    /// Overwrites the snapshot with the current counter value.
    #[inline]
    pub fn refresh<S: TickSource>(&self, source: &S) {
        self.ticks.store(source.now_ticks(), Ordering::Relaxed);
    }

    /// Sets the snapshot back to zero.
    pub fn reset(&self) {
        self.ticks.store(0, Ordering::Relaxed);
    }
}

/// Shared cell holding a [`TimestampNanos`] snapshot.
///
/// Same contract as [`SharedTimestampMicros`].
#[derive(Debug, Default)]
pub struct SharedTimestampNanos {
    ticks: AtomicU32,
}

impl SharedTimestampNanos {
    /// Creates a zero-valued cell (const fn for static initialization).
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU32::new(0),
        }
    }

    /// Loads the current snapshot as a plain value.
    #[inline]
    pub fn load(&self) -> TimestampNanos {
        TimestampNanos::from_ticks(self.ticks.load(Ordering::Relaxed))
    }

    /// Stores a snapshot computed elsewhere.
    #[inline]
    pub fn store(&self, stamp: TimestampNanos) {
        self.ticks.store(stamp.ticks(), Ordering::Relaxed);
    }

    /// Overwrites the snapshot with the current counter value.
    #[inline]
    pub fn refresh<S: TickSource>(&self, source: &S) {
        self.ticks.store(source.now_ticks(), Ordering::Relaxed);
    }

    /// Sets the snapshot back to zero.
    pub fn reset(&self) {
        self.ticks.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockTicks;

    #[test]
    fn test_cell_starts_at_epoch() {
        let cell = SharedTimestampMicros::new();
        assert_eq!(cell.load().ticks(), 0);
    }

    #[test]
    fn test_store_load_round_trip() {
        let cell = SharedTimestampMicros::new();
        cell.store(TimestampMicros::from_ticks(0xDEAD_BEEF));
        assert_eq!(cell.load().ticks(), 0xDEAD_BEEF);
    }

    #[test]
    fn test_refresh_and_reset() {
        let ticks = MockTicks::with_initial(720);
        let cell = SharedTimestampNanos::new();

        cell.refresh(&ticks);
        assert_eq!(cell.load().ticks(), 720);

        cell.reset();
        assert_eq!(cell.load().ticks(), 0);
    }

    #[test]
    fn test_loaded_value_supports_arithmetic() {
        let ticks = MockTicks::new();
        let cell = SharedTimestampMicros::new();
        cell.refresh(&ticks);

        ticks.advance(240_000);
        // Readers difference the loaded value like any other timestamp
        assert_eq!(cell.load().elapsed(&ticks), 1_000);
    }
}
