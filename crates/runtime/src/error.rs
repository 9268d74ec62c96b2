use influence_core::{Cell, FieldError};

use crate::events::AgentId;

/// Runtime errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum RuntimeError {
    /// Field allocation or recompute failed
    #[error("influence field error: {0}")]
    Field(#[from] FieldError),

    /// Operation addressed an agent the session does not own
    #[error("agent {0} not found")]
    UnknownAgent(AgentId),

    /// Scenario declares no agents to drive
    #[error("scenario has no agents")]
    NoAgents,

    /// Agent spawn cell is out of bounds or blocked
    #[error("agent spawn {0} is not walkable")]
    SpawnBlocked(Cell),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
