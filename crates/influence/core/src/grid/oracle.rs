use super::{Cell, WorldPoint};

/// Coordinate and obstacle oracle supplied by the host.
///
/// Obstacle status may change between ticks; the field queries it afresh on
/// every recompute and never caches it.
pub trait GridOracle: Send + Sync {
    fn bounds(&self) -> GridDimensions;
    fn world_to_cell(&self, point: WorldPoint) -> Cell;
    fn cell_to_world(&self, cell: Cell) -> WorldPoint;
    fn is_obstacle(&self, cell: Cell) -> bool;

    fn contains(&self, cell: Cell) -> bool {
        self.bounds().contains(cell)
    }

    /// In bounds and not an obstacle.
    fn is_walkable(&self, cell: Cell) -> bool {
        self.contains(cell) && !self.is_obstacle(cell)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width as i32 && cell.y < self.height as i32
    }

    /// Number of cells, `width * height`.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major index of `cell`, or `None` when out of bounds.
    #[inline]
    pub fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }

    /// Inverse of [`GridDimensions::index`]. Callers must pass `index < len()`.
    #[inline]
    pub fn cell_at(&self, index: usize) -> Cell {
        let width = self.width as usize;
        Cell::new((index % width) as i32, (index / width) as i32)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.len()).map(|index| self.cell_at(index))
    }
}
