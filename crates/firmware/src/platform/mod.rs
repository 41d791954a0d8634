//! Platform abstraction layer.
//!
//! Hardware tick sources implementing `tickstamp_core::traits::TickSource`.

pub mod esp32;

pub use esp32::{CycleCounter, TimerGroupTicks};
