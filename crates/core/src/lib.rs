//! tickstamp_core - Wraparound-safe timestamps over a free-running cycle counter
//!
//! This crate contains the platform-agnostic timestamp arithmetic: capturing
//! 32-bit tick snapshots, converting them to microseconds or nanoseconds, and
//! differencing/ordering them correctly across counter overflow. It can be
//! tested on host without any feature flags or hardware dependencies.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives beyond the optional
//!   `defmt` formatting derives
//! - **Pure no_std**: No std library dependencies, no allocation
//! - **Trait abstractions**: The raw counter is injected via [`traits::TickSource`]
//! - **Total functions**: No operation in this crate can fail or block
//!
//! # Modules
//!
//! - [`traits`]: Platform-agnostic trait abstractions (TickSource, MockTicks)
//! - [`clock`]: Tick-rate calibration and tick/time-unit conversion (TickClock)
//! - [`timestamp`]: The snapshot value types (TimestampMicros, TimestampNanos)
//!   and their single-writer/multi-reader shared cells
//!
//! # Comparability window
//!
//! The counter wraps at 2^32 ticks. Two snapshots are only meaningfully
//! comparable when the true interval between their captures is within
//! ±2^31 ticks (about ±8.9 s at 240 MHz). Outside that window, differences
//! and ordering silently produce wrong results. This is a documented usage
//! constraint of modulo arithmetic, not a detectable error, and no operation
//! checks for it at runtime.

#![no_std]

pub mod clock;
pub mod timestamp;
pub mod traits;
