//! Tick-rate calibration and tick/time-unit conversion.
//!
//! A [`TickClock`] owns the ticks-per-microsecond ratio and every conversion
//! formula built on it, so the arithmetic exists in exactly one place. The
//! process-wide [`CLOCK`] instance is the clock context the timestamp types
//! reference; independent instances can be constructed for tests that need a
//! different ratio.
//!
//! The ratio is written once during system initialization (via
//! [`TickClock::calibrate`]) and read on every conversion afterwards. Reads
//! are relaxed atomic loads: a reader racing the one-time writer observes
//! either the default or the calibrated value, both of which are valid.
//! Callers needing a stronger guarantee must complete calibration before
//! spawning concurrent activity.

use core::sync::atomic::{AtomicU32, Ordering};

/// Default ticks-per-microsecond ratio, matching a 240 MHz CPU cycle counter.
pub const DEFAULT_TICKS_PER_US: u32 = 240;

/// Process-wide clock context used by the timestamp types.
pub static CLOCK: TickClock = TickClock::new(DEFAULT_TICKS_PER_US);

/// Authoritative CPU clock-rate source, queried once during calibration.
///
/// Implementations report the current CPU frequency in Hz. A report of 0
/// means the source is unavailable; calibration then leaves the current
/// ratio standing.
pub trait CpuFrequency {
    /// Returns the CPU clock rate in Hz.
    fn cpu_hz(&self) -> u32;
}

/// Calibrated ticks-per-microsecond ratio plus all conversions built on it.
///
/// For a CPU cycle-counter tick source the ratio equals the CPU clock rate
/// in MHz. Conversions use 64-bit intermediates so large inputs neither
/// overflow nor lose precision before narrowing back to 32 bits.
#[derive(Debug)]
pub struct TickClock {
    ticks_per_us: AtomicU32,
}

impl TickClock {
    /// Creates a clock with the given ticks-per-microsecond ratio
    /// (const fn for static initialization).
    pub const fn new(ticks_per_us: u32) -> Self {
        Self {
            ticks_per_us: AtomicU32::new(ticks_per_us),
        }
    }

    /// Returns the current ticks-per-microsecond ratio.
    #[inline]
    pub fn ticks_per_us(&self) -> u32 {
        self.ticks_per_us.load(Ordering::Relaxed)
    }

    /// Sets the ticks-per-microsecond ratio.
    ///
    /// A ratio of 0 is ignored; the previous value stands.
    pub fn set_ticks_per_us(&self, ticks_per_us: u32) {
        if ticks_per_us == 0 {
            return;
        }
        self.ticks_per_us.store(ticks_per_us, Ordering::Relaxed);
    }

    /// Queries the frequency source once and stores ticks-per-microsecond.
    ///
    /// Expected to be invoked once during startup, before any elapsed-time
    /// computation that requires accuracy. Without a call the default ratio
    /// ([`DEFAULT_TICKS_PER_US`]) is used. A reported rate below 1 MHz is
    /// treated as "source unavailable" and leaves the ratio unchanged.
    pub fn calibrate(&self, freq: &impl CpuFrequency) {
        self.set_ticks_per_us(freq.cpu_hz() / 1_000_000);
    }

    /// Converts a tick count to microseconds, rounding to nearest.
    ///
    /// Rounding (rather than truncation) matters here: this is the primary
    /// externally observed value, and truncation would bias every
    /// measurement downward by up to one microsecond.
    #[inline]
    pub fn ticks_to_us(&self, ticks: u32) -> u32 {
        let tpu = self.ticks_per_us();
        ((ticks as u64 + (tpu >> 1) as u64) / tpu as u64) as u32
    }

    /// Converts a microsecond count to ticks (exact widened multiply,
    /// truncating narrow; wrap at 2^32 is the intended semantic).
    #[inline]
    pub fn us_to_ticks(&self, us: u32) -> u32 {
        (us as u64 * self.ticks_per_us() as u64) as u32
    }

    /// Converts a tick count to nanoseconds, rounding to nearest.
    #[inline]
    pub fn ticks_to_ns(&self, ticks: u32) -> u64 {
        let tpu = self.ticks_per_us() as u64;
        (ticks as u64 * 1000 + (tpu >> 1)) / tpu
    }

    /// Converts a nanosecond count to ticks, rounding to nearest before the
    /// truncating narrow back to 32 bits.
    #[inline]
    pub fn ns_to_ticks(&self, ns: u64) -> u32 {
        let tpu = self.ticks_per_us() as u64;
        (ns.wrapping_mul(tpu).wrapping_add(500) / 1000) as u32
    }

    /// Converts a signed tick difference to signed microseconds, rounding
    /// half away from zero.
    ///
    /// The magnitude is converted with the same round-to-nearest rule as
    /// [`ticks_to_us`](Self::ticks_to_us) and the sign reapplied, so negative
    /// intervals (the later snapshot subtracted from the earlier one) come
    /// out correct within the ±2^31-tick window.
    #[inline]
    pub fn tick_diff_to_us(&self, diff_ticks: i32) -> i32 {
        let tpu = self.ticks_per_us() as i64;
        let diff = diff_ticks as i64;
        let half = tpu >> 1;
        let us = if diff >= 0 {
            (diff + half) / tpu
        } else {
            (diff - half) / tpu
        };
        us as i32
    }

    /// Converts a signed tick difference to signed nanoseconds, truncating
    /// toward zero.
    ///
    /// Note the asymmetry with the single-sample conversions: a snapshot's
    /// own value ([`ticks_to_ns`](Self::ticks_to_ns)) rounds to nearest,
    /// while this paired-difference path truncates toward zero.
    #[inline]
    pub fn tick_diff_to_ns(&self, diff_ticks: i32) -> i64 {
        diff_ticks as i64 * 1000 / self.ticks_per_us() as i64
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICKS_PER_US)
    }
}
