use super::Cell;

/// Continuous world-space position.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Moves toward `target` by at most `max_delta`, never overshooting.
    pub fn move_towards(self, target: WorldPoint, max_delta: f32) -> WorldPoint {
        let distance = self.distance(target);
        if distance <= max_delta || distance <= f32::EPSILON {
            return target;
        }
        let t = max_delta / distance;
        WorldPoint::new(
            self.x + (target.x - self.x) * t,
            self.y + (target.y - self.y) * t,
        )
    }
}

/// Affine mapping between world points and origin-relative cells.
///
/// A cell covers `[k * cell_size, (k + 1) * cell_size)` on each axis in
/// absolute tile index `k`, and cell coordinates are absolute indices minus
/// `origin`. [`GridGeometry::cell_to_world`] returns the cell centre.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridGeometry {
    pub origin: Cell,
    pub cell_size: f32,
}

impl GridGeometry {
    pub const fn new(origin: Cell, cell_size: f32) -> Self {
        Self { origin, cell_size }
    }

    pub fn world_to_cell(&self, point: WorldPoint) -> Cell {
        let absolute_x = (point.x / self.cell_size).floor() as i32;
        let absolute_y = (point.y / self.cell_size).floor() as i32;
        Cell::new(absolute_x - self.origin.x, absolute_y - self.origin.y)
    }

    pub fn cell_to_world(&self, cell: Cell) -> WorldPoint {
        let half = self.cell_size / 2.0;
        WorldPoint::new(
            (cell.x + self.origin.x) as f32 * self.cell_size + half,
            (cell.y + self.origin.y) as f32 * self.cell_size + half,
        )
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::new(Cell::ORIGIN, 1.0)
    }
}
