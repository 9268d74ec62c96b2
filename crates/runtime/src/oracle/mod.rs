//! Runtime implementations of the influence-core oracle seam.
//!
//! The static layout comes from a scenario; dynamic obstacles can be toggled
//! between ticks and are picked up by the next field recompute.
mod grid;

pub use grid::GridOracleImpl;
