//! Multi-source shortest-path propagation over the walkable grid.

use crate::grid::{CellGrid, GridOracle, WorldPoint};
use crate::queue::BucketQueue;

use super::FieldError;

/// Counts from one propagation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Sources that landed inside the grid.
    pub seeded: usize,
    /// Cells settled by the search, sources included.
    pub reached: usize,
}

/// Scratch buffers reused across ticks.
#[derive(Debug)]
pub(crate) struct Propagation {
    distance: Vec<f32>,
    visited: Vec<bool>,
    frontier: BucketQueue<usize>,
}

impl Propagation {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            distance: vec![f32::INFINITY; len],
            visited: vec![false; len],
            frontier: BucketQueue::new(),
        }
    }

    /// Fills `scores` with `max(0, max_range - d)` where `d` is the walkable
    /// path distance from each cell to its nearest source. Blocked cells and
    /// cells no source reaches score zero.
    pub(crate) fn run<O: GridOracle + ?Sized>(
        &mut self,
        oracle: &O,
        blocked: &[bool],
        sources: &[WorldPoint],
        max_range: f32,
        step: f32,
        scores: &mut CellGrid<f32>,
    ) -> Result<PropagationStats, FieldError> {
        let dims = scores.dimensions();
        self.distance.fill(f32::INFINITY);
        self.visited.fill(false);
        self.frontier.clear();

        let mut stats = PropagationStats::default();
        for &source in sources {
            let cell = oracle.world_to_cell(source);
            let Some(index) = dims.index(cell) else {
                tracing::debug!(?source, %cell, "source outside grid ignored");
                continue;
            };
            stats.seeded += 1;
            if self.distance[index] > 0.0 {
                self.distance[index] = 0.0;
                self.frontier.enqueue(index, 0.0);
            }
        }

        while !self.frontier.is_empty() {
            let index = self.frontier.dequeue()?;
            // Stale entry: a shorter path already settled this cell.
            if self.visited[index] {
                continue;
            }
            self.visited[index] = true;
            stats.reached += 1;

            let candidate = self.distance[index] + step;
            for neighbor in dims.cell_at(index).neighbors() {
                let Some(next) = dims.index(neighbor) else {
                    continue;
                };
                if self.visited[next] || blocked[next] {
                    continue;
                }
                if candidate < self.distance[next] {
                    self.distance[next] = candidate;
                    self.frontier.enqueue(next, candidate);
                }
            }
        }

        for (index, &is_blocked) in blocked.iter().enumerate() {
            *scores.at_mut(index) = if is_blocked {
                0.0
            } else {
                (max_range - self.distance[index]).max(0.0)
            };
        }

        Ok(stats)
    }
}
