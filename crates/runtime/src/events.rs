//! Per-tick session events.

use std::fmt;

use influence_core::{Cell, FieldReport};

use crate::rewards::RewardId;

/// Identifier of an agent within one session, assigned in spawn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete simulation step counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEvent {
    /// An agent chose its next cell.
    AgentDeparted { agent: AgentId, from: Cell, to: Cell },
    /// An agent reached the cell it was moving to.
    AgentArrived { agent: AgentId, cell: Cell },
    /// A threat shared the agent's cell; the agent was sent back to spawn.
    AgentCaught { agent: AgentId, cell: Cell },
    RewardSpawned { reward: RewardId, cell: Cell },
    RewardCollected {
        agent: AgentId,
        reward: RewardId,
        /// Rewards this agent has collected so far, this one included.
        total: u32,
    },
    /// Every raw combined value was equal this tick.
    FieldDegenerate { value: f32 },
    /// The session clock ran out. Emitted once.
    GameOver { collected: u32 },
}

/// Everything that happened during one [`crate::Session::tick`].
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub tick: Tick,
    /// `None` when the field was not rebuilt: the session is over, or the
    /// recompute was rejected and agents read the previous field.
    pub field: Option<FieldReport>,
    pub events: Vec<SessionEvent>,
}

impl TickReport {
    pub fn idle(tick: Tick) -> Self {
        Self {
            tick,
            field: None,
            events: Vec::new(),
        }
    }

    pub fn caught(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.events.iter().filter_map(|event| match event {
            SessionEvent::AgentCaught { agent, .. } => Some(*agent),
            _ => None,
        })
    }

    pub fn collected(&self) -> impl Iterator<Item = (AgentId, RewardId)> + '_ {
        self.events.iter().filter_map(|event| match event {
            SessionEvent::RewardCollected { agent, reward, .. } => Some((*agent, *reward)),
            _ => None,
        })
    }

    pub fn is_game_over(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, SessionEvent::GameOver { .. }))
    }
}
