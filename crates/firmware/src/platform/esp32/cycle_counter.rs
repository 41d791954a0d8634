//! CPU cycle counter tick source.
//!
//! Reads the Xtensa CCOUNT special register: a free-running 32-bit counter
//! incrementing once per CPU cycle. The read is a single instruction, safe
//! from any context including interrupt handlers. Ticks-per-microsecond for
//! this source equals the CPU clock rate in MHz (240 on a stock ESP32/S3).

#[cfg(target_arch = "xtensa")]
use tickstamp_core::clock::{CpuFrequency, CLOCK};
#[cfg(target_arch = "xtensa")]
use tickstamp_core::traits::TickSource;

/// Cycle-counter tick source (CCOUNT special register).
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleCounter;

#[cfg(target_arch = "xtensa")]
impl TickSource for CycleCounter {
    #[inline]
    fn now_ticks(&self) -> u32 {
        xtensa_lx::timer::get_cycle_count()
    }
}

/// CPU-frequency source backed by ESP-IDF's clock subsystem.
///
/// Requires the ESP-IDF runtime; valid after clock configuration has run.
#[cfg(target_arch = "xtensa")]
#[derive(Debug, Clone, Copy, Default)]
pub struct IdfCpuFreq;

#[cfg(target_arch = "xtensa")]
extern "C" {
    fn esp_clk_cpu_freq() -> i32;
}

#[cfg(target_arch = "xtensa")]
impl CpuFrequency for IdfCpuFreq {
    fn cpu_hz(&self) -> u32 {
        // Safety: esp_clk_cpu_freq only reads the clock configuration.
        let hz = unsafe { esp_clk_cpu_freq() };
        hz.max(0) as u32
    }
}

/// Calibrates the process-wide clock from the ESP-IDF CPU frequency.
///
/// Call once during startup, before any elapsed-time computation that
/// requires accuracy. Without a call the default 240 ticks/us stands.
#[cfg(target_arch = "xtensa")]
pub fn calibrate_from_idf() {
    CLOCK.calibrate(&IdfCpuFreq);
    #[cfg(feature = "defmt")]
    defmt::info!("cycle counter calibrated: {} ticks/us", CLOCK.ticks_per_us());
}
