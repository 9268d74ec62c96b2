//! Seeded reward placement.
use std::fmt;

use influence_content::RewardSettings;
use influence_core::{Cell, GridOracle, WorldPoint};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RewardId(pub u32);

impl fmt::Display for RewardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reward#{}", self.0)
    }
}

/// A collectible placed on a walkable cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reward {
    pub id: RewardId,
    pub cell: Cell,
    pub position: WorldPoint,
}

/// Keeps up to `max_rewards` rewards on random walkable cells.
///
/// Placement is driven by a seeded ChaCha stream, so two spawners with the
/// same seed and the same collection order place identical rewards.
#[derive(Clone, Debug)]
pub struct RewardSpawner {
    max_rewards: usize,
    rewards: Vec<Reward>,
    rng: ChaCha8Rng,
    next_id: u32,
}

impl RewardSpawner {
    /// Random draws per missing reward before giving up for this tick.
    const PLACEMENT_ATTEMPTS: usize = 64;

    pub fn new(settings: RewardSettings) -> Self {
        Self {
            max_rewards: settings.max_rewards,
            rewards: Vec::with_capacity(settings.max_rewards),
            rng: ChaCha8Rng::seed_from_u64(settings.seed),
            next_id: 0,
        }
    }

    /// Fills empty slots and returns the rewards placed by this call.
    ///
    /// A cell holds at most one reward. When no free walkable cell turns up
    /// within the attempt budget the spawner stops and retries next call.
    pub fn replenish<O: GridOracle + ?Sized>(&mut self, oracle: &O) -> Vec<Reward> {
        let bounds = oracle.bounds();
        let mut placed = Vec::new();
        if bounds.is_empty() {
            return placed;
        }

        while self.rewards.len() < self.max_rewards {
            let Some(cell) = self.sample_free_cell(oracle) else {
                tracing::warn!(
                    live = self.rewards.len(),
                    max = self.max_rewards,
                    "no free cell for reward"
                );
                break;
            };

            let reward = Reward {
                id: RewardId(self.next_id),
                cell,
                position: oracle.cell_to_world(cell),
            };
            self.next_id += 1;
            self.rewards.push(reward);
            placed.push(reward);
            tracing::debug!(id = %reward.id, %cell, "reward spawned");
        }

        placed
    }

    fn sample_free_cell<O: GridOracle + ?Sized>(&mut self, oracle: &O) -> Option<Cell> {
        let bounds = oracle.bounds();
        (0..Self::PLACEMENT_ATTEMPTS).find_map(|_| {
            let cell = Cell::new(
                self.rng.gen_range(0..bounds.width as i32),
                self.rng.gen_range(0..bounds.height as i32),
            );
            (oracle.is_walkable(cell) && !self.is_occupied(cell)).then_some(cell)
        })
    }

    fn is_occupied(&self, cell: Cell) -> bool {
        self.rewards.iter().any(|reward| reward.cell == cell)
    }

    /// Removes and returns the reward on `cell`, if any.
    pub fn collect_at(&mut self, cell: Cell) -> Option<Reward> {
        let index = self.rewards.iter().position(|reward| reward.cell == cell)?;
        Some(self.rewards.swap_remove(index))
    }

    /// Drops rewards that now sit on obstacles.
    pub fn discard_blocked<O: GridOracle + ?Sized>(&mut self, oracle: &O) {
        self.rewards.retain(|reward| oracle.is_walkable(reward.cell));
    }

    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    pub fn positions(&self) -> Vec<WorldPoint> {
        self.rewards.iter().map(|reward| reward.position).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::GridOracleImpl;

    fn settings(max_rewards: usize, seed: u64) -> RewardSettings {
        RewardSettings { max_rewards, seed }
    }

    #[test]
    fn fills_to_capacity_on_walkable_cells() {
        let mut oracle = GridOracleImpl::open(6, 6);
        for x in 0..6 {
            oracle.set_obstacle(Cell::new(x, 2), true);
        }
        let mut spawner = RewardSpawner::new(settings(6, 7));

        let placed = spawner.replenish(&oracle);

        assert_eq!(placed.len(), 6);
        assert!(placed.iter().all(|r| oracle.is_walkable(r.cell)));
        let mut cells: Vec<_> = placed.iter().map(|r| r.cell).collect();
        cells.sort_by_key(|c| (c.x, c.y));
        cells.dedup();
        assert_eq!(cells.len(), 6);
    }

    #[test]
    fn same_seed_same_layout() {
        let oracle = GridOracleImpl::open(10, 10);
        let a = RewardSpawner::new(settings(4, 42)).replenish(&oracle);
        let b = RewardSpawner::new(settings(4, 42)).replenish(&oracle);
        assert_eq!(a, b);
    }

    #[test]
    fn collecting_frees_a_slot() {
        let oracle = GridOracleImpl::open(5, 5);
        let mut spawner = RewardSpawner::new(settings(2, 3));
        let first = spawner.replenish(&oracle);

        let taken = spawner.collect_at(first[0].cell).unwrap();
        assert_eq!(taken.id, first[0].id);
        assert!(spawner.collect_at(first[0].cell).is_none());

        let refill = spawner.replenish(&oracle);
        assert_eq!(refill.len(), 1);
        assert_eq!(refill[0].id, RewardId(2));
        assert_eq!(spawner.rewards().len(), 2);
    }

    #[test]
    fn stops_when_the_grid_is_full() {
        let oracle = GridOracleImpl::open(1, 2);
        let mut spawner = RewardSpawner::new(settings(6, 0));

        let placed = spawner.replenish(&oracle);

        assert_eq!(placed.len(), 2);
        assert!(spawner.replenish(&oracle).is_empty());
    }
}
