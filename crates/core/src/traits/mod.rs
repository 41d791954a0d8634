//! Platform-agnostic trait abstractions.

pub mod ticks;

pub use ticks::*;
