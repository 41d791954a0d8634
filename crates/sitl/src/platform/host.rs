//! Wall-clock-backed tick source.
//!
//! Synthesizes the free-running 32-bit counter from the host monotonic
//! clock, so the demo binary measures real elapsed time on a workstation.

use std::time::Instant;

use tickstamp_core::traits::TickSource;

use crate::error::SitlError;

/// Tick source deriving a wrapping 32-bit tick stream from `Instant`.
///
/// Ticks advance at the configured ticks-per-microsecond rate from the
/// moment of construction and wrap at 2^32, mimicking a hardware cycle
/// counter. Reads cost a `clock_gettime` call rather than a register read,
/// which is plenty for demo purposes.
#[derive(Debug, Clone)]
pub struct HostTicks {
    start: Instant,
    ticks_per_us: u32,
}

impl HostTicks {
    /// Create a source ticking at the given ticks-per-microsecond rate.
    pub fn new(ticks_per_us: u32) -> Result<Self, SitlError> {
        if ticks_per_us == 0 {
            return Err(SitlError::InvalidTickRate(ticks_per_us));
        }
        Ok(Self {
            start: Instant::now(),
            ticks_per_us,
        })
    }
}

impl TickSource for HostTicks {
    fn now_ticks(&self) -> u32 {
        let ns = self.start.elapsed().as_nanos() as u64;
        // ticks = ns * tpu / 1000, wrapped to the 32-bit counter range
        (ns.wrapping_mul(self.ticks_per_us as u64) / 1000) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rate_rejected() {
        assert!(matches!(
            HostTicks::new(0),
            Err(SitlError::InvalidTickRate(0))
        ));
    }

    #[test]
    fn test_ticks_advance_with_wall_clock() {
        let ticks = HostTicks::new(240).unwrap();
        let first = ticks.now_ticks();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = ticks.now_ticks();

        // 5 ms at 240 ticks/us is 1.2M ticks; allow generous scheduler slack
        let delta = second.wrapping_sub(first);
        assert!(delta >= 1_000_000, "delta={delta}");
    }
}
