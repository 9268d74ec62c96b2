//! Greedy neighbor selection over the influence field.

use crate::field::InfluenceField;
use crate::grid::{Cell, GridOracle};

use super::MovementHistory;

/// Chooses an agent's next cell from its four orthogonal neighbors.
///
/// A neighbor is eligible when it is in bounds, not an obstacle, not the cell
/// the agent just left, and not over-represented in the recent history. The
/// strictly best eligible score wins; ties keep the earliest neighbor in
/// [`crate::Direction::ALL`] order, so identical inputs always give the same
/// answer.
pub struct DecisionPolicy;

impl DecisionPolicy {
    pub fn is_eligible<O: GridOracle + ?Sized>(
        oracle: &O,
        candidate: Cell,
        previous: Cell,
        history: &MovementHistory,
    ) -> bool {
        oracle.is_walkable(candidate) && candidate != previous && !history.is_looping(candidate)
    }

    /// Returns the next cell, or `None` when the agent should stay put.
    pub fn choose<O: GridOracle + ?Sized>(
        field: &InfluenceField,
        oracle: &O,
        current: Cell,
        previous: Cell,
        history: &MovementHistory,
    ) -> Option<Cell> {
        let mut best: Option<(Cell, f32)> = None;

        for candidate in current.neighbors() {
            if !Self::is_eligible(oracle, candidate, previous, history) {
                continue;
            }
            let score = field.score_at(candidate);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((candidate, score));
            }
        }

        tracing::trace!(%current, %previous, ?best, "neighbor evaluation");
        best.map(|(cell, _)| cell).filter(|&cell| cell != current)
    }
}
