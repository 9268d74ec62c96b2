use arrayvec::ArrayVec;

use crate::config::AgentConfig;
use crate::grid::Cell;

/// Bounded FIFO of the most recently chosen cells, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementHistory {
    entries: ArrayVec<Cell, { AgentConfig::HISTORY_LIMIT }>,
}

impl MovementHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `cell`, evicting the oldest entry once the limit is exceeded.
    pub fn push(&mut self, cell: Cell) {
        if self.entries.is_full() {
            self.entries.remove(0);
        }
        self.entries.push(cell);
    }

    pub fn occurrences(&self, cell: Cell) -> usize {
        self.entries.iter().filter(|&&entry| entry == cell).count()
    }

    /// True when `cell` appears more than [`AgentConfig::LOOP_THRESHOLD`] times.
    pub fn is_looping(&self, cell: Cell) -> bool {
        self.occurrences(cell) > AgentConfig::LOOP_THRESHOLD
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.entries.iter().copied()
    }
}
