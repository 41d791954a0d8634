//! Host tick-source implementations.

pub mod host;
pub mod ticks;

pub use host::HostTicks;
pub use ticks::SimTicks;
