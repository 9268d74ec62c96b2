//! Session orchestration for the influence-field simulation.
//!
//! This crate wires a scenario, the grid oracle, scripted threat feeds and the
//! reward spawner around a single [`influence_core::InfluenceField`] and drives
//! everything one tick at a time. Consumers build a [`Session`] and call
//! [`Session::tick`]; each call returns a [`TickReport`] with the events that
//! happened during that tick.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the tick loop and the session clock
//! - [`oracle`] provides the concrete [`influence_core::GridOracle`]
//! - [`rewards`] and [`threats`] supply the field's source positions
//! - [`events`] holds the per-tick report types
//! - [`config`] reads environment overrides
pub mod config;
pub mod error;
pub mod events;
pub mod oracle;
pub mod rewards;
pub mod session;
pub mod threats;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{AgentId, SessionEvent, Tick, TickReport};
pub use oracle::GridOracleImpl;
pub use rewards::{Reward, RewardId, RewardSpawner};
pub use session::{Session, SessionBuilder, SessionClock};
pub use threats::ThreatWalker;
