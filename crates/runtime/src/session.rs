//! Tick-driven session orchestrator.
//!
//! A session owns the grid, the influence field, the agents and the source
//! feeds. [`Session::tick`] runs one frame in a fixed order: place rewards,
//! move threats, rebuild the field, step agents, resolve contacts, then
//! advance the clock. Agents therefore always read a field that was fully
//! rebuilt from this frame's positions.

use influence_content::Scenario;
use influence_core::{
    Agent, AgentStep, Cell, CoreError, FieldError, FieldWeights, GridOracle, InfluenceField, Mood,
    Normalization, WorldPoint,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::{AgentId, SessionEvent, Tick, TickReport};
use crate::oracle::GridOracleImpl;
use crate::rewards::{Reward, RewardSpawner};
use crate::threats::ThreatWalker;

/// Countdown for a session. A non-positive limit never runs out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionClock {
    limit: Option<f32>,
    elapsed: f32,
    finished: bool,
}

impl SessionClock {
    pub fn new(limit: f32) -> Self {
        Self {
            limit: (limit > 0.0).then_some(limit),
            elapsed: 0.0,
            finished: false,
        }
    }

    /// Adds `dt` seconds. Returns true only on the call that runs out.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.finished {
            return false;
        }
        self.elapsed += dt.max(0.0);
        if self.limit.is_some_and(|limit| self.elapsed >= limit) {
            self.finished = true;
            return true;
        }
        false
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn remaining(&self) -> Option<f32> {
        self.limit.map(|limit| (limit - self.elapsed).max(0.0))
    }

    pub fn is_over(&self) -> bool {
        self.finished
    }
}

#[derive(Clone, Debug)]
struct AgentSlot {
    agent: Agent,
    collected: u32,
}

/// Builder for [`Session`] that layers runtime overrides onto a scenario.
#[derive(Clone, Debug)]
pub struct SessionBuilder {
    scenario: Scenario,
    overrides: RuntimeConfig,
}

impl SessionBuilder {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            overrides: RuntimeConfig::default(),
        }
    }

    /// Overrides applied on top of the scenario before the session starts.
    pub fn config(mut self, overrides: RuntimeConfig) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn build(self) -> Result<Session> {
        let mut scenario = self.scenario;
        self.overrides.apply(&mut scenario);
        Session::from_scenario(&scenario)
    }
}

/// One running simulation.
#[derive(Debug)]
pub struct Session {
    name: String,
    oracle: GridOracleImpl,
    field: InfluenceField,
    agents: Vec<AgentSlot>,
    walkers: Vec<ThreatWalker>,
    threat_override: Option<Vec<WorldPoint>>,
    threat_positions: Vec<WorldPoint>,
    rewards: RewardSpawner,
    clock: SessionClock,
    tick: Tick,
}

impl Session {
    pub fn builder(scenario: Scenario) -> SessionBuilder {
        SessionBuilder::new(scenario)
    }

    /// Builds a session from a validated scenario.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self> {
        if scenario.agents.is_empty() {
            return Err(RuntimeError::NoAgents);
        }

        let oracle = GridOracleImpl::from_scenario(scenario);
        let field = InfluenceField::with_bounds(scenario.field, scenario.dimensions)?;

        let agents = scenario
            .agents
            .iter()
            .map(|&cell| {
                if !oracle.is_walkable(cell) {
                    return Err(RuntimeError::SpawnBlocked(cell));
                }
                let agent = Agent::spawn(&oracle, oracle.cell_to_world(cell), scenario.agent);
                Ok(AgentSlot {
                    agent,
                    collected: 0,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let walkers: Vec<_> = scenario
            .threats
            .iter()
            .filter_map(|route| ThreatWalker::new(route, &oracle))
            .collect();
        let threat_positions = walkers.iter().map(ThreatWalker::position).collect();

        tracing::info!(
            scenario = %scenario.name,
            width = scenario.dimensions.width,
            height = scenario.dimensions.height,
            agents = agents.len(),
            threats = walkers.len(),
            "session created"
        );

        Ok(Self {
            name: scenario.name.clone(),
            oracle,
            field,
            agents,
            walkers,
            threat_override: None,
            threat_positions,
            rewards: RewardSpawner::new(scenario.rewards),
            clock: SessionClock::new(scenario.time_limit),
            tick: Tick::ZERO,
        })
    }

    /// Runs one frame of `dt` seconds.
    ///
    /// A rejected (recoverable) recompute keeps the previous field for this
    /// frame; any other field error is returned.
    pub fn tick(&mut self, dt: f32) -> Result<TickReport> {
        if self.clock.is_over() {
            return Ok(TickReport::idle(self.tick));
        }
        self.tick = self.tick + 1;
        let mut events = Vec::new();

        self.rewards.discard_blocked(&self.oracle);
        for reward in self.rewards.replenish(&self.oracle) {
            events.push(SessionEvent::RewardSpawned {
                reward: reward.id,
                cell: reward.cell,
            });
        }

        self.threat_positions = match &self.threat_override {
            Some(positions) => positions.clone(),
            None => self
                .walkers
                .iter_mut()
                .map(|walker| walker.advance(dt))
                .collect(),
        };

        let field = match self.field.recompute(
            &self.oracle,
            &self.threat_positions,
            &self.rewards.positions(),
        ) {
            Ok(report) => {
                if let Normalization::Degenerate { value } = report.normalization {
                    events.push(SessionEvent::FieldDegenerate { value });
                }
                Some(report)
            }
            Err(err) if err.severity().is_recoverable() => {
                tracing::warn!(tick = %self.tick, error = %err, "keeping previous field");
                if let FieldError::DegenerateNormalization { value } = err {
                    events.push(SessionEvent::FieldDegenerate { value });
                }
                None
            }
            Err(err) => return Err(err.into()),
        };

        for (index, slot) in self.agents.iter_mut().enumerate() {
            let agent = AgentId(index as u32);
            match slot.agent.tick(dt, &self.field, &self.oracle) {
                AgentStep::Departed { from, to } => {
                    events.push(SessionEvent::AgentDeparted { agent, from, to });
                }
                AgentStep::Arrived { cell } => {
                    events.push(SessionEvent::AgentArrived { agent, cell });
                }
                AgentStep::Suspended | AgentStep::Idle | AgentStep::Moving { .. } => {}
            }
        }

        self.resolve_contacts(&mut events);

        if self.clock.advance(dt) {
            let collected = self.total_collected();
            tracing::info!(tick = %self.tick, collected, "session over");
            events.push(SessionEvent::GameOver { collected });
        }

        Ok(TickReport {
            tick: self.tick,
            field,
            events,
        })
    }

    fn resolve_contacts(&mut self, events: &mut Vec<SessionEvent>) {
        let threat_cells: Vec<Cell> = self
            .threat_positions
            .iter()
            .map(|position| self.oracle.world_to_cell(*position))
            .collect();

        for (index, slot) in self.agents.iter_mut().enumerate() {
            let agent = AgentId(index as u32);
            let cell = self.oracle.world_to_cell(slot.agent.position());

            if threat_cells.contains(&cell) {
                slot.agent.reset_to_spawn();
                tracing::debug!(%agent, %cell, "agent caught");
                events.push(SessionEvent::AgentCaught { agent, cell });
                continue;
            }

            if let Some(reward) = self.rewards.collect_at(cell) {
                slot.collected += 1;
                tracing::debug!(%agent, reward = %reward.id, "reward collected");
                events.push(SessionEvent::RewardCollected {
                    agent,
                    reward: reward.id,
                    total: slot.collected,
                });
            }
        }
    }

    /// Pins threat positions, bypassing the scripted routes until cleared.
    pub fn set_threat_positions(&mut self, positions: Vec<WorldPoint>) {
        self.threat_override = Some(positions);
    }

    pub fn clear_threat_positions(&mut self) {
        self.threat_override = None;
    }

    /// Toggles a dynamic obstacle. Takes effect on the next tick.
    pub fn set_obstacle(&mut self, cell: Cell, blocked: bool) -> bool {
        self.oracle.set_obstacle(cell, blocked)
    }

    /// Switches weights to a mood preset. Takes effect on the next tick.
    pub fn set_mood(&mut self, mood: Mood) {
        self.set_weights(FieldWeights::from_mood(mood));
    }

    pub fn set_weights(&mut self, weights: FieldWeights) {
        tracing::debug!(threat = weights.threat, item = weights.item, "field weights changed");
        self.field.set_weights(weights);
    }

    pub fn suspend_agent(&mut self, id: AgentId) -> Result<()> {
        self.slot_mut(id)?.agent.suspend();
        Ok(())
    }

    pub fn resume_agent(&mut self, id: AgentId) -> Result<()> {
        self.slot_mut(id)?.agent.resume();
        Ok(())
    }

    /// Sends an agent back to its spawn as if a threat had reached it.
    pub fn catch_agent(&mut self, id: AgentId) -> Result<()> {
        self.slot_mut(id)?.agent.reset_to_spawn();
        Ok(())
    }

    fn slot(&self, id: AgentId) -> Result<&AgentSlot> {
        self.agents
            .get(id.0 as usize)
            .ok_or(RuntimeError::UnknownAgent(id))
    }

    fn slot_mut(&mut self, id: AgentId) -> Result<&mut AgentSlot> {
        self.agents
            .get_mut(id.0 as usize)
            .ok_or(RuntimeError::UnknownAgent(id))
    }

    pub fn agent(&self, id: AgentId) -> Result<&Agent> {
        self.slot(id).map(|slot| &slot.agent)
    }

    pub fn agents(&self) -> impl Iterator<Item = (AgentId, &Agent)> + '_ {
        self.agents
            .iter()
            .enumerate()
            .map(|(index, slot)| (AgentId(index as u32), &slot.agent))
    }

    pub fn collected(&self, id: AgentId) -> Result<u32> {
        self.slot(id).map(|slot| slot.collected)
    }

    pub fn total_collected(&self) -> u32 {
        self.agents.iter().map(|slot| slot.collected).sum()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self) -> &InfluenceField {
        &self.field
    }

    pub fn oracle(&self) -> &GridOracleImpl {
        &self.oracle
    }

    pub fn rewards(&self) -> &[Reward] {
        self.rewards.rewards()
    }

    pub fn threat_positions(&self) -> &[WorldPoint] {
        &self.threat_positions
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn is_over(&self) -> bool {
        self.clock.is_over()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_fires_once() {
        let mut clock = SessionClock::new(1.0);

        assert!(!clock.advance(0.6));
        assert!(clock.advance(0.6));
        assert!(!clock.advance(0.6));
        assert!(clock.is_over());
        assert_eq!(clock.remaining(), Some(0.0));
    }

    #[test]
    fn non_positive_limit_never_runs_out() {
        let mut clock = SessionClock::new(0.0);
        for _ in 0..1000 {
            assert!(!clock.advance(1.0));
        }
        assert_eq!(clock.remaining(), None);
        assert_eq!(clock.elapsed(), 1000.0);
        assert!(!clock.is_over());
    }

    #[test]
    fn rejects_scenario_without_agents() {
        let mut scenario = Scenario::open_arena(8, 8);
        scenario.agents.clear();

        assert!(matches!(
            Session::from_scenario(&scenario),
            Err(RuntimeError::NoAgents)
        ));
    }

    #[test]
    fn rejects_spawn_on_wall() {
        let mut scenario = Scenario::open_arena(8, 8);
        scenario.agents = vec![Cell::new(0, 0)];

        assert!(matches!(
            Session::from_scenario(&scenario),
            Err(RuntimeError::SpawnBlocked(cell)) if cell == Cell::new(0, 0)
        ));
    }

    #[test]
    fn unknown_agent_is_reported() {
        let mut session = Session::from_scenario(&Scenario::open_arena(8, 8)).unwrap();
        assert!(matches!(
            session.suspend_agent(AgentId(3)),
            Err(RuntimeError::UnknownAgent(AgentId(3)))
        ));
    }
}
