//! Microsecond-resolution timestamps over the raw tick counter.

use core::cmp::Ordering;
use core::ops::{AddAssign, Sub, SubAssign};

use super::tick_delta;
use crate::clock::CLOCK;
use crate::traits::TickSource;

/// One captured tick-counter value, observed in microseconds.
///
/// The snapshot is the only state; conversions go through the process-wide
/// [`CLOCK`](crate::clock::CLOCK) ratio. A default-constructed timestamp is
/// zero-valued ("epoch"), distinct from a captured one.
///
/// # Comparability window
///
/// Differences and ordering between two timestamps are correct only when the
/// true interval between their captures is within ±2^31 ticks (about ±8.9 s
/// at 240 MHz). Outside that window the results are silently wrong; no
/// operation detects this at runtime.
///
/// # Example
///
/// ```
/// use tickstamp_core::timestamp::TimestampMicros;
/// use tickstamp_core::traits::MockTicks;
///
/// let ticks = MockTicks::new();
/// let start = TimestampMicros::now(&ticks);
/// ticks.advance(240_000); // 1 ms at the default 240 ticks/us
/// assert_eq!(start.elapsed(&ticks), 1_000);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimestampMicros {
    ticks: u32,
}

impl TimestampMicros {
    /// Creates a zero-valued timestamp (const fn for static initialization).
    pub const fn new() -> Self {
        Self { ticks: 0 }
    }

    /// Creates a timestamp from a raw tick value.
    pub const fn from_ticks(ticks: u32) -> Self {
        Self { ticks }
    }

    /// Creates a timestamp positioned `us` microseconds after the epoch,
    /// using a widened multiply before the wrapping narrow to 32 bits.
    pub fn from_micros(us: u32) -> Self {
        Self {
            ticks: CLOCK.us_to_ticks(us),
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

    /// Returns this snapshot's microsecond value, rounded to nearest.
    ///
    /// This is a relative value and recurs every 2^32 ticks.
    #[inline]
    pub fn micros(&self) -> u32 {
        CLOCK.ticks_to_us(self.ticks)
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

    /// Signed microseconds from `earlier` to `self`, wraparound-safe within
    /// the ±2^31-tick window. Negative when `earlier` was captured after
    /// `self`.
    #[inline]
    pub fn micros_since(&self, earlier: &Self) -> i32 {
        CLOCK.tick_diff_to_us(tick_delta(self.ticks, earlier.ticks))
    }

    /// Signed microseconds from this snapshot to the counter's current
    /// value, without mutating the snapshot.
    #[inline]
    pub fn elapsed<S: TickSource>(&self, source: &S) -> i32 {
        CLOCK.tick_diff_to_us(tick_delta(source.now_ticks(), self.ticks))
    }
}

/// Difference in microseconds (see [`TimestampMicros::micros_since`]).
impl Sub for TimestampMicros {
    type Output = i32;

    #[inline]
    fn sub(self, rhs: Self) -> i32 {
        self.micros_since(&rhs)
    }
}

/// Moves the snapshot forward by a microsecond quantity (wrapping).
impl AddAssign<u32> for TimestampMicros {
    #[inline]
    fn add_assign(&mut self, us: u32) {
        self.ticks = self.ticks.wrapping_add(CLOCK.us_to_ticks(us));
    }
}

/// Moves the snapshot backward by a microsecond quantity (wrapping).
impl SubAssign<u32> for TimestampMicros {
    #[inline]
    fn sub_assign(&mut self, us: u32) {
        self.ticks = self.ticks.wrapping_sub(CLOCK.us_to_ticks(us));
    }
}

/// Ordering by the sign of the wrapping tick delta.
///
/// Correct within the ±2^31-tick window and deliberately NOT `Ord`: the
/// wrapping relation is not transitive across the whole counter range, so a
/// total-order claim would let sorting containers misbehave silently.
/// Naive unsigned tick comparison and comparison of converted microsecond
/// values are both wrong here: the former breaks at the wrap boundary, the
/// latter once rounding shifts a comparison past it.
impl PartialOrd for TimestampMicros {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(tick_delta(self.ticks, other.ticks).cmp(&0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockTicks;

    // All tests run against the default 240 ticks/us of the global CLOCK;
    // ratio-specific math is covered in clock.rs on private instances.

    #[test]
    fn test_default_is_epoch() {
        assert_eq!(TimestampMicros::new().ticks(), 0);
        assert_eq!(TimestampMicros::default(), TimestampMicros::new());
    }

    #[test]
    fn test_from_micros_round_trip() {
        for us in [0u32, 1, 200, 1_000, 500_000] {
            let t = TimestampMicros::from_micros(us);
            assert!(t.micros().abs_diff(us) <= 1, "us={us}");
        }
    }

    #[test]
    fn test_now_and_refresh() {
        let ticks = MockTicks::with_initial(480);
        let mut t = TimestampMicros::now(&ticks);
        assert_eq!(t.ticks(), 480);
        assert_eq!(t.micros(), 2);

        ticks.advance(240);
        t.refresh(&ticks);
        assert_eq!(t.ticks(), 720);
    }

    #[test]
    fn test_reset_is_epoch_not_now() {
        let ticks = MockTicks::with_initial(1_000_000);
        let mut t = TimestampMicros::now(&ticks);
        t.reset();
        assert_eq!(t.ticks(), 0);
    }

    #[test]
    fn test_difference_sign() {
        let earlier = TimestampMicros::from_ticks(240_000);
        let later = TimestampMicros::from_ticks(480_000);

        assert_eq!(later.micros_since(&earlier), 1_000);
        assert_eq!(earlier.micros_since(&later), -1_000);
        assert_eq!(later - earlier, 1_000);
        assert_eq!(earlier - later, -1_000);
    }

    #[test]
    fn test_difference_across_wrap() {
        // Captured just before the counter wraps...
        let before = TimestampMicros::from_ticks(0xFFFF_FFFF - 2_400);
        // ...and shortly after it wrapped: 4_800 ticks = 20 us apart
        let after = TimestampMicros::from_ticks(2_399);

        assert_eq!(after - before, 20);
        assert_eq!(before - after, -20);
    }

    #[test]
    fn test_elapsed_does_not_mutate() {
        let ticks = MockTicks::new();
        let t = TimestampMicros::now(&ticks);
        ticks.advance(240_000);

        assert_eq!(t.elapsed(&ticks), 1_000);
        assert_eq!(t.ticks(), 0);
        // A stale snapshot keeps reporting a growing interval
        ticks.advance(240_000);
        assert_eq!(t.elapsed(&ticks), 2_000);
    }

    #[test]
    fn test_elapsed_negative_for_future_snapshot() {
        let ticks = MockTicks::new();
        let mut t = TimestampMicros::now(&ticks);
        t += 1_000;
        assert_eq!(t.elapsed(&ticks), -1_000);
    }

    #[test]
    fn test_increment_decrement_round_trip() {
        let ticks = MockTicks::with_initial(123_456);
        let before = TimestampMicros::now(&ticks);

        let mut t = before;
        t += 1_000;
        assert_eq!(t.micros_since(&before), 1_000);

        t -= 1_000;
        assert_eq!(t, before);
    }

    #[test]
    fn test_increment_wraps_through_boundary() {
        let mut t = TimestampMicros::from_ticks(0xFFFF_FFFF - 100);
        t += 1; // +240 ticks crosses the wrap
        assert_eq!(t.ticks(), 139);
    }

    #[test]
    fn test_equality_is_exact_tick_identity() {
        // 200 and 280 ticks both round to 1 us but are different instants
        let a = TimestampMicros::from_ticks(200);
        let b = TimestampMicros::from_ticks(280);

        assert_eq!(a.micros(), b.micros());
        assert_ne!(a, b);
        assert_eq!(a, TimestampMicros::from_ticks(200));
    }

    #[test]
    fn test_ordering_consistent_with_difference_sign() {
        let a = TimestampMicros::from_ticks(0xFFFF_F000);
        let b = TimestampMicros::from_ticks(0x0000_1000); // after the wrap
        let c = TimestampMicros::from_ticks(0x0000_2000);

        assert!(a < b);
        assert!(b < c);
        assert!(a < c); // transitive within the window
        assert!(c > a);
        assert!((b - a) > 0);
        assert!((a - b) < 0);
    }

    #[test]
    fn test_ordering_not_less_when_equal() {
        let a = TimestampMicros::from_ticks(42);
        let b = TimestampMicros::from_ticks(42);
        assert!(a <= b && a >= b && !(a < b) && !(a > b));
    }
}
