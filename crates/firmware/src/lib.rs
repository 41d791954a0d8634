#![cfg_attr(not(test), no_std)]

//! tickstamp_firmware - ESP32 platform layer for tickstamp
//!
//! This crate provides the hardware tick sources behind the core
//! `TickSource` trait:
//!
//! - **CCOUNT cycle counter**: the Xtensa cycle-count special register,
//!   one tick per CPU cycle (ticks-per-microsecond = CPU MHz)
//! - **TIMG0 timer group**: memory-mapped timer 0 of timer group 0 as a
//!   1 MHz free-running counter (pair with a clock calibrated to 1 tick/us)
//! - **ESP-IDF clock query**: the authoritative CPU-frequency source used
//!   for one-shot calibration at startup

pub mod platform;
