//! Data-driven scenario definitions and loaders.
//!
//! A scenario describes one arena: grid bounds and origin, obstacle layout,
//! agent spawn cells, scripted threat routes, reward settings and tuning for
//! the field and agents. Scenarios are consumed by the runtime session and
//! never appear in per-tick state.
//!
//! Loaders read RON files and validate them into [`Scenario`] values built
//! from influence-core types.

pub mod scenario;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scenario::{RewardSettings, Scenario, ThreatRoute};

#[cfg(feature = "loaders")]
pub use loaders::{LoadResult, ScenarioLoader};
