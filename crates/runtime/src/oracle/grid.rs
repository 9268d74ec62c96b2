//! Scenario-backed layout served through [`influence_core::GridOracle`].
use std::collections::HashSet;

use influence_content::Scenario;
use influence_core::{Cell, GridDimensions, GridGeometry, GridOracle, WorldPoint};

/// GridOracle implementation with a static layout and a dynamic overlay.
///
/// Cells outside the bounds report as obstacles.
#[derive(Clone, Debug)]
pub struct GridOracleImpl {
    dimensions: GridDimensions,
    geometry: GridGeometry,
    walls: HashSet<Cell>,
    dynamic: HashSet<Cell>,
}

impl GridOracleImpl {
    pub fn new(
        dimensions: GridDimensions,
        geometry: GridGeometry,
        walls: impl IntoIterator<Item = Cell>,
    ) -> Self {
        Self {
            dimensions,
            geometry,
            walls: walls.into_iter().collect(),
            dynamic: HashSet::new(),
        }
    }

    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self::new(
            scenario.dimensions,
            scenario.geometry,
            scenario.obstacles.iter().copied(),
        )
    }

    /// Creates an open grid (no obstacles) with unit cells at the origin.
    pub fn open(width: u32, height: u32) -> Self {
        Self::new(
            GridDimensions::new(width, height),
            GridGeometry::default(),
            std::iter::empty(),
        )
    }

    /// Adds or removes a dynamic obstacle. Returns true if the overlay changed.
    pub fn set_obstacle(&mut self, cell: Cell, blocked: bool) -> bool {
        if blocked {
            self.dynamic.insert(cell)
        } else {
            self.dynamic.remove(&cell)
        }
    }
}

impl GridOracle for GridOracleImpl {
    fn bounds(&self) -> GridDimensions {
        self.dimensions
    }

    fn world_to_cell(&self, point: WorldPoint) -> Cell {
        self.geometry.world_to_cell(point)
    }

    fn cell_to_world(&self, cell: Cell) -> WorldPoint {
        self.geometry.cell_to_world(cell)
    }

    fn is_obstacle(&self, cell: Cell) -> bool {
        !self.dimensions.contains(cell) || self.walls.contains(&cell) || self.dynamic.contains(&cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_offset_shifts_cell_coordinates() {
        let oracle = GridOracleImpl::new(
            GridDimensions::new(4, 4),
            GridGeometry::new(Cell::new(-2, -2), 1.0),
            std::iter::empty(),
        );

        assert_eq!(
            oracle.world_to_cell(WorldPoint::new(-1.5, -1.5)),
            Cell::new(0, 0)
        );
        assert_eq!(
            oracle.cell_to_world(Cell::new(3, 3)),
            WorldPoint::new(1.5, 1.5)
        );
    }

    #[test]
    fn dynamic_obstacles_toggle() {
        let mut oracle = GridOracleImpl::open(3, 3);
        let cell = Cell::new(1, 1);
        assert!(oracle.is_walkable(cell));

        assert!(oracle.set_obstacle(cell, true));
        assert!(oracle.is_obstacle(cell));
        assert!(!oracle.set_obstacle(cell, true));

        assert!(oracle.set_obstacle(cell, false));
        assert!(oracle.is_walkable(cell));
    }

    #[test]
    fn out_of_bounds_is_blocked() {
        let oracle = GridOracleImpl::open(2, 2);
        assert!(oracle.is_obstacle(Cell::new(2, 0)));
        assert!(oracle.is_obstacle(Cell::new(0, -1)));
    }
}
