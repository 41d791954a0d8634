//! ESP32 tick sources.
//!
//! Two raw time sources behind the same interface: the CPU cycle counter
//! (fast path, resolution = one CPU cycle) and TIMG0 timer 0 (slower
//! latch-and-poll read, survives CPU frequency changes).

pub mod cycle_counter;
pub mod timer_group;

pub use cycle_counter::CycleCounter;
pub use timer_group::TimerGroupTicks;

#[cfg(target_arch = "xtensa")]
pub use cycle_counter::{calibrate_from_idf, IdfCpuFreq};
