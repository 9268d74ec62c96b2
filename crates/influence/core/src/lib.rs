//! Deterministic influence-field steering for grid agents.
//!
//! `influence-core` computes a per-tick scalar field that balances avoidance of
//! moving threats against attraction toward rewards, and exposes the greedy
//! decision policy agents use to walk that field without oscillating.
//! Everything here is pure and tick-driven: world data enters through the
//! [`GridOracle`] trait and source position slices, and nothing performs I/O.
//!
//! - [`queue`] provides the bucket priority queue backing propagation
//! - [`field`] owns the threat, attraction and combined grids
//! - [`agent`] hosts the decision policy and per-tick agent motion
//! - [`grid`] defines cells, world points and the oracle seam
pub mod agent;
pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod queue;

pub use agent::{Agent, AgentPhase, AgentState, AgentStep, DecisionPolicy, MovementHistory};
pub use config::{AgentConfig, DegeneratePolicy, FieldConfig, FieldWeights, Mood};
pub use error::{CoreError, ErrorSeverity};
pub use field::{FieldError, FieldReport, InfluenceField, Normalization, PropagationStats};
pub use grid::{Cell, CellGrid, Direction, GridDimensions, GridGeometry, GridOracle, WorldPoint};
pub use queue::{BucketQueue, QueueError};
