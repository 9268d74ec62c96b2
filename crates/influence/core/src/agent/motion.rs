//! Per-tick agent state machine: decide, then glide to the chosen cell.

use crate::config::AgentConfig;
use crate::field::InfluenceField;
use crate::grid::{Cell, GridOracle, WorldPoint};

use super::{DecisionPolicy, MovementHistory};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentPhase {
    /// Evaluating neighbors this tick.
    Deciding,
    /// Travelling toward `target`.
    Moving,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    pub current: Cell,
    pub previous: Cell,
    pub target: Cell,
    pub position: WorldPoint,
    pub phase: AgentPhase,
}

impl AgentState {
    /// Resting state at `cell` with no previous move.
    pub fn at_rest(cell: Cell, position: WorldPoint) -> Self {
        Self {
            current: cell,
            previous: cell,
            target: cell,
            position,
            phase: AgentPhase::Deciding,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.phase == AgentPhase::Moving
    }
}

/// Outcome of a single [`Agent::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AgentStep {
    /// The suspend signal is set; nothing was evaluated.
    Suspended,
    /// No eligible neighbor; the agent stays where it is.
    Idle,
    /// A neighbor was chosen and recorded; motion starts next tick.
    Departed { from: Cell, to: Cell },
    /// Still travelling.
    Moving { position: WorldPoint },
    /// Reached the target cell and is deciding again next tick.
    Arrived { cell: Cell },
}

/// A steering agent driven by the influence field.
#[derive(Clone, Debug)]
pub struct Agent {
    config: AgentConfig,
    spawn: AgentState,
    state: AgentState,
    history: MovementHistory,
    suspended: bool,
}

impl Agent {
    /// Places an agent at `position`, remembering it as the spawn point.
    pub fn spawn<O: GridOracle + ?Sized>(
        oracle: &O,
        position: WorldPoint,
        config: AgentConfig,
    ) -> Self {
        let spawn = AgentState::at_rest(oracle.world_to_cell(position), position);
        Self {
            config,
            spawn,
            state: spawn,
            history: MovementHistory::new(),
            suspended: false,
        }
    }

    /// Advances the agent by `dt` seconds against an already converged field.
    pub fn tick<O: GridOracle + ?Sized>(
        &mut self,
        dt: f32,
        field: &InfluenceField,
        oracle: &O,
    ) -> AgentStep {
        if self.suspended {
            return AgentStep::Suspended;
        }
        match self.state.phase {
            AgentPhase::Deciding => self.decide(field, oracle),
            AgentPhase::Moving => self.advance(dt, oracle),
        }
    }

    fn decide<O: GridOracle + ?Sized>(&mut self, field: &InfluenceField, oracle: &O) -> AgentStep {
        let from = self.state.current;
        let Some(to) =
            DecisionPolicy::choose(field, oracle, from, self.state.previous, &self.history)
        else {
            self.state.target = from;
            return AgentStep::Idle;
        };

        self.history.push(to);
        self.state.target = to;
        self.state.phase = AgentPhase::Moving;
        tracing::debug!(%from, %to, "agent departing");
        AgentStep::Departed { from, to }
    }

    fn advance<O: GridOracle + ?Sized>(&mut self, dt: f32, oracle: &O) -> AgentStep {
        let destination = oracle.cell_to_world(self.state.target);
        let position = self
            .state
            .position
            .move_towards(destination, self.config.move_speed * dt.max(0.0));

        if position.distance(destination) < self.config.arrival_threshold {
            let cell = self.state.target;
            self.state.position = destination;
            self.state.previous = self.state.current;
            self.state.current = cell;
            self.state.phase = AgentPhase::Deciding;
            return AgentStep::Arrived { cell };
        }

        self.state.position = position;
        AgentStep::Moving { position }
    }

    /// Freezes decisions and motion until [`Agent::resume`].
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn resume(&mut self) {
        self.suspended = false;
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Restores the spawn state and forgets the movement history.
    ///
    /// Leaves the suspend signal untouched.
    pub fn reset_to_spawn(&mut self) {
        self.state = self.spawn;
        self.history.clear();
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn spawn_state(&self) -> &AgentState {
        &self.spawn
    }

    pub fn history(&self) -> &MovementHistory {
        &self.history
    }

    pub fn position(&self) -> WorldPoint {
        self.state.position
    }

    pub fn current_cell(&self) -> Cell {
        self.state.current
    }
}
