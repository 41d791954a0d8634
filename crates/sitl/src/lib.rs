//! tickstamp_sitl - Host-side tick sources and demo support.
//!
//! Runs the timestamp stack on a workstation: a controllable shared counter
//! for deterministic simulation and tests, and a wall-clock-backed source so
//! the demo binary measures real elapsed time.

pub mod error;
pub mod platform;

pub use error::SitlError;
pub use platform::{HostTicks, SimTicks};
