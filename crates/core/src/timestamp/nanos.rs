//! Nanosecond-resolution timestamps over the raw tick counter.
//!
//! Same snapshot pattern as [`super::micros`], with the unit arithmetic done
//! in 64-bit intermediates throughout: at 240 ticks/us one tick is ~4.17 ns,
//! so 32-bit math would truncate away the fractional nanoseconds.

use core::cmp::Ordering;
use core::ops::{AddAssign, Sub, SubAssign};

use super::tick_delta;
use crate::clock::CLOCK;
use crate::traits::TickSource;

/// One captured tick-counter value, observed in nanoseconds.
///
/// The snapshot is the same 32-bit tick value as
/// [`TimestampMicros`](super::TimestampMicros); only the observation unit
/// changes. The comparability window is likewise ±2^31 ticks.
///
/// Rounding asymmetry, kept on purpose: the single-sample value
/// ([`nanos`](Self::nanos)) rounds to nearest, while the paired difference
/// ([`nanos_since`](Self::nanos_since)) truncates toward zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimestampNanos {
    ticks: u32,
}

impl TimestampNanos {
    /// Creates a zero-valued timestamp (const fn for static initialization).
    pub const fn new() -> Self {
        Self { ticks: 0 }
    }

    /// Creates a timestamp from a raw tick value.
    pub const fn from_ticks(ticks: u32) -> Self {
        Self { ticks }
    }

    /// Creates a timestamp positioned `ns` nanoseconds after the epoch,
    /// rounding to the nearest tick before the wrapping narrow to 32 bits.
    pub fn from_nanos(ns: u64) -> Self {
        Self {
            ticks: CLOCK.ns_to_ticks(ns),
        }
    }

    /// Captures the current counter value.
    #[inline]
    pub fn now<S: TickSource>(source: &S) -> Self {
        Self {
            ticks: source.now_ticks(),
        }
    }

    /// Returns the raw tick snapshot.
    #[inline]
    pub const fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Returns this snapshot's nanosecond value, rounded to nearest.
    ///
    /// This is a relative value and recurs every 2^32 ticks.
    #[inline]
    pub fn nanos(&self) -> u64 {
        CLOCK.ticks_to_ns(self.ticks)
    }

    /// Overwrites the snapshot with the current counter value
    /// ("restart the timer").
    #[inline]
    pub fn refresh<S: TickSource>(&mut self, source: &S) {
        self.ticks = source.now_ticks();
    }

    /// Sets the snapshot back to zero ("epoch", not "now").
    pub fn reset(&mut self) {
        self.ticks = 0;
    }

    /// Signed nanoseconds from `earlier` to `self`, wraparound-safe within
    /// the ±2^31-tick window, truncating toward zero.
    #[inline]
    pub fn nanos_since(&self, earlier: &Self) -> i64 {
        CLOCK.tick_diff_to_ns(tick_delta(self.ticks, earlier.ticks))
    }

    /// Signed nanoseconds from this snapshot to the counter's current value,
    /// without mutating the snapshot.
    #[inline]
    pub fn elapsed<S: TickSource>(&self, source: &S) -> i64 {
        CLOCK.tick_diff_to_ns(tick_delta(source.now_ticks(), self.ticks))
    }
}

/// Difference in nanoseconds (see [`TimestampNanos::nanos_since`]).
impl Sub for TimestampNanos {
    type Output = i64;

    #[inline]
    fn sub(self, rhs: Self) -> i64 {
        self.nanos_since(&rhs)
    }
}

/// Moves the snapshot forward by a nanosecond quantity (wrapping).
impl AddAssign<u64> for TimestampNanos {
    #[inline]
    fn add_assign(&mut self, ns: u64) {
        self.ticks = self.ticks.wrapping_add(CLOCK.ns_to_ticks(ns));
    }
}

/// Moves the snapshot backward by a nanosecond quantity (wrapping).
impl SubAssign<u64> for TimestampNanos {
    #[inline]
    fn sub_assign(&mut self, ns: u64) {
        self.ticks = self.ticks.wrapping_sub(CLOCK.ns_to_ticks(ns));
    }
}

/// Ordering by the sign of the wrapping tick delta; same contract and same
/// caveats as the microsecond type (valid within ±2^31 ticks, no `Ord`).
impl PartialOrd for TimestampNanos {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(tick_delta(self.ticks, other.ticks).cmp(&0))
    }
}
