//! Agent decision policy and motion.
//!
//! Agents read the influence field only through [`crate::InfluenceField::score_at`]
//! and never mutate it. Each tick an agent is either deciding (evaluating its
//! four neighbors) or moving (gliding toward the chosen cell at a fixed speed).
//!
//! - [`DecisionPolicy`]: stateless neighbor selection with loop suppression
//! - [`MovementHistory`]: bounded recency filter feeding the policy
//! - [`Agent`]: spawn point, suspend signal and the per-tick state machine
mod history;
mod motion;
mod policy;

pub use history::MovementHistory;
pub use motion::{Agent, AgentPhase, AgentState, AgentStep};
pub use policy::DecisionPolicy;
