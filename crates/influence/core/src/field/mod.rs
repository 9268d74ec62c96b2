//! Influence field: threat and attraction propagation, weighted combination
//! and min-max normalization.
//!
//! The field is rebuilt from scratch on every tick because the source sets
//! move. Each recompute runs both propagations to exhaustion into staging
//! buffers, combines and normalizes them, and only then swaps all three grids
//! into the published slots. Readers therefore always see one complete field:
//! the current one if the recompute succeeded, the previous one otherwise.

mod error;
mod propagation;

pub use error::FieldError;
pub use propagation::PropagationStats;

use crate::config::{DegeneratePolicy, FieldConfig, FieldWeights};
use crate::grid::{Cell, CellGrid, GridDimensions, GridOracle, WorldPoint};

use propagation::Propagation;

/// How the published field was scaled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Normalization {
    /// Min-max scaled into `[0, 1]`.
    Scaled,
    /// Every raw value was equal; walkable cells were set to `value`.
    Degenerate { value: f32 },
}

/// Summary of one recompute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldReport {
    pub threat: PropagationStats,
    pub attraction: PropagationStats,
    /// Raw combined minimum over all cells, obstacles included.
    pub raw_min: f32,
    /// Raw combined maximum over all cells, obstacles included.
    pub raw_max: f32,
    pub normalization: Normalization,
}

impl FieldReport {
    pub fn is_degenerate(&self) -> bool {
        matches!(self.normalization, Normalization::Degenerate { .. })
    }
}

/// Grids exist only once bounds are known.
#[derive(Debug)]
struct FieldGrids {
    dims: GridDimensions,
    published: FieldLayers,
    staging: FieldLayers,
    blocked: Vec<bool>,
    propagation: Propagation,
}

/// One complete set of per-cell grids.
#[derive(Debug)]
struct FieldLayers {
    threat: CellGrid<f32>,
    attraction: CellGrid<f32>,
    combined: CellGrid<f32>,
}

impl FieldLayers {
    fn new(dims: GridDimensions) -> Self {
        Self {
            threat: CellGrid::new(dims, 0.0),
            attraction: CellGrid::new(dims, 0.0),
            combined: CellGrid::new(dims, 0.0),
        }
    }
}

impl FieldGrids {
    fn new(dims: GridDimensions) -> Self {
        Self {
            dims,
            published: FieldLayers::new(dims),
            staging: FieldLayers::new(dims),
            blocked: vec![false; dims.len()],
            propagation: Propagation::new(dims.len()),
        }
    }

    fn refresh_obstacles<O: GridOracle + ?Sized>(&mut self, oracle: &O) {
        for (index, blocked) in self.blocked.iter_mut().enumerate() {
            *blocked = oracle.is_obstacle(self.dims.cell_at(index));
        }
    }

    /// Writes raw combined values into staging and returns their min and max.
    fn combine(&mut self, weights: FieldWeights) -> (f32, f32) {
        let staging = &mut self.staging;
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for index in 0..self.dims.len() {
            let raw = -weights.threat * staging.threat.at(index)
                + weights.item * staging.attraction.at(index);
            *staging.combined.at_mut(index) = raw;
            min = min.min(raw);
            max = max.max(raw);
        }
        (min, max)
    }

    /// Rescales walkable cells in staging. Blocked cells keep their raw value.
    fn normalize(&mut self, min: f32, max: f32) {
        let span = max - min;
        for (index, &blocked) in self.blocked.iter().enumerate() {
            if !blocked {
                let raw = self.staging.combined.at(index);
                *self.staging.combined.at_mut(index) = (raw - min) / span;
            }
        }
    }

    fn flatten(&mut self, value: f32) {
        for (index, &blocked) in self.blocked.iter().enumerate() {
            if !blocked {
                *self.staging.combined.at_mut(index) = value;
            }
        }
    }

    fn publish(&mut self) {
        std::mem::swap(&mut self.published, &mut self.staging);
    }
}

/// Owns the threat, attraction and combined grids for one session.
#[derive(Debug)]
pub struct InfluenceField {
    config: FieldConfig,
    grids: Option<FieldGrids>,
}

impl InfluenceField {
    /// Score assigned to walkable cells under [`DegeneratePolicy::Midpoint`].
    pub const MIDPOINT: f32 = 0.5;

    /// Creates a field with no grids. [`InfluenceField::recompute`] fails until
    /// [`InfluenceField::allocate`] succeeds.
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            grids: None,
        }
    }

    pub fn with_bounds(config: FieldConfig, dims: GridDimensions) -> Result<Self, FieldError> {
        let mut field = Self::new(config);
        field.allocate(dims)?;
        Ok(field)
    }

    /// Allocates every per-cell grid for `dims`, discarding previous contents.
    pub fn allocate(&mut self, dims: GridDimensions) -> Result<(), FieldError> {
        if dims.is_empty() {
            return Err(FieldError::EmptyBounds(dims));
        }
        self.grids = Some(FieldGrids::new(dims));
        tracing::debug!(width = dims.width, height = dims.height, "influence field allocated");
        Ok(())
    }

    pub fn is_allocated(&self) -> bool {
        self.grids.is_some()
    }

    pub fn dimensions(&self) -> Option<GridDimensions> {
        self.grids.as_ref().map(|grids| grids.dims)
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Takes effect on the next recompute.
    pub fn set_weights(&mut self, weights: FieldWeights) {
        self.config.weights = weights;
    }

    /// Rebuilds the field from the current obstacle layout and source positions.
    ///
    /// Runs to completion; on error the previously published field stays
    /// readable.
    pub fn recompute<O: GridOracle + ?Sized>(
        &mut self,
        oracle: &O,
        threats: &[WorldPoint],
        rewards: &[WorldPoint],
    ) -> Result<FieldReport, FieldError> {
        let config = self.config;
        let grids = self.grids.as_mut().ok_or(FieldError::Unallocated)?;

        let reported = oracle.bounds();
        if reported != grids.dims {
            return Err(FieldError::BoundsMismatch {
                allocated: grids.dims,
                reported,
            });
        }

        grids.refresh_obstacles(oracle);

        let threat = grids.propagation.run(
            oracle,
            &grids.blocked,
            threats,
            config.max_threat_distance,
            config.cell_size,
            &mut grids.staging.threat,
        )?;
        let attraction = grids.propagation.run(
            oracle,
            &grids.blocked,
            rewards,
            config.max_attraction_distance,
            config.cell_size,
            &mut grids.staging.attraction,
        )?;

        let (raw_min, raw_max) = grids.combine(config.weights);
        let normalization = if raw_max > raw_min {
            grids.normalize(raw_min, raw_max);
            Normalization::Scaled
        } else {
            let value = match config.degenerate {
                DegeneratePolicy::Midpoint => Self::MIDPOINT,
                DegeneratePolicy::Zero => 0.0,
                DegeneratePolicy::Reject => {
                    tracing::warn!(value = raw_min, "degenerate field rejected");
                    return Err(FieldError::DegenerateNormalization { value: raw_min });
                }
            };
            grids.flatten(value);
            Normalization::Degenerate { value }
        };
        grids.publish();

        let report = FieldReport {
            threat,
            attraction,
            raw_min,
            raw_max,
            normalization,
        };
        tracing::debug!(
            threats = threat.seeded,
            rewards = attraction.seeded,
            raw_min,
            raw_max,
            degenerate = report.is_degenerate(),
            "influence field recomputed"
        );
        Ok(report)
    }

    /// Normalized score at `(x, y)`, or 0 outside the grid.
    pub fn score(&self, x: i32, y: i32) -> f32 {
        self.score_at(Cell::new(x, y))
    }

    pub fn score_at(&self, cell: Cell) -> f32 {
        self.sample(cell, |layers| &layers.combined)
    }

    /// Threat component at `cell`, before weighting.
    pub fn threat(&self, cell: Cell) -> f32 {
        self.sample(cell, |layers| &layers.threat)
    }

    /// Attraction component at `cell`, before weighting.
    pub fn attraction(&self, cell: Cell) -> f32 {
        self.sample(cell, |layers| &layers.attraction)
    }

    fn sample(&self, cell: Cell, layer: impl Fn(&FieldLayers) -> &CellGrid<f32>) -> f32 {
        self.grids
            .as_ref()
            .and_then(|grids| layer(&grids.published).get(cell))
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::grid::test_support::TestGrid;

    fn field_for(grid: &TestGrid, config: FieldConfig) -> InfluenceField {
        InfluenceField::with_bounds(config, grid.dims).unwrap()
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn recompute_before_allocation_fails_fast() {
        let grid = TestGrid::open(4, 4);
        let mut field = InfluenceField::new(FieldConfig::default());

        let err = field.recompute(&grid, &[], &[]).unwrap_err();
        assert_eq!(err, FieldError::Unallocated);
        assert_eq!(err.error_code(), "FIELD_UNALLOCATED");
        assert_eq!(field.score(0, 0), 0.0);
        assert!(!field.is_allocated());

        field.allocate(grid.dims).unwrap();
        assert!(field.is_allocated());
        assert_eq!(field.dimensions(), Some(grid.dims));
        assert!(field.recompute(&grid, &[], &[]).is_ok());
    }

    #[test]
    fn zero_sized_bounds_are_rejected() {
        let err = InfluenceField::with_bounds(FieldConfig::default(), GridDimensions::new(0, 3))
            .unwrap_err();
        assert!(matches!(err, FieldError::EmptyBounds(_)));
    }

    #[test]
    fn oracle_bounds_must_match_allocation() {
        let grid = TestGrid::open(4, 4);
        let mut field =
            InfluenceField::with_bounds(FieldConfig::default(), GridDimensions::new(5, 4)).unwrap();

        let err = field.recompute(&grid, &[], &[]).unwrap_err();
        assert!(matches!(err, FieldError::BoundsMismatch { .. }));
        assert!(err.severity().is_internal());
    }

    #[test]
    fn single_threat_falls_off_with_manhattan_distance() {
        let grid = TestGrid::open(6, 5);
        let mut field = field_for(&grid, FieldConfig::default());

        field.recompute(&grid, &[grid.center(0, 0)], &[]).unwrap();

        for cell in grid.dims.cells() {
            let expected = (10.0 - (cell.x + cell.y) as f32).max(0.0);
            assert_close(field.threat(cell), expected);
        }
    }

    #[test]
    fn threat_is_capped_at_max_distance() {
        let grid = TestGrid::open(8, 1);
        let config = FieldConfig {
            max_threat_distance: 3.0,
            ..FieldConfig::default()
        };
        let mut field = field_for(&grid, config);

        field.recompute(&grid, &[grid.center(0, 0)], &[]).unwrap();

        assert_close(field.threat(Cell::new(0, 0)), 3.0);
        assert_close(field.threat(Cell::new(2, 0)), 1.0);
        assert_close(field.threat(Cell::new(3, 0)), 0.0);
        assert_close(field.threat(Cell::new(7, 0)), 0.0);
    }

    #[test]
    fn score_uses_nearest_source_rather_than_sum() {
        let grid = TestGrid::open(3, 1);
        let mut field = field_for(&grid, FieldConfig::default());

        field
            .recompute(&grid, &[grid.center(0, 0), grid.center(2, 0)], &[])
            .unwrap();

        assert_close(field.threat(Cell::new(1, 0)), 9.0);
    }

    #[test]
    fn cell_size_scales_step_distance() {
        let grid = TestGrid::open(4, 1);
        let config = FieldConfig {
            cell_size: 2.0,
            ..FieldConfig::default()
        };
        let mut field = field_for(&grid, config);

        field.recompute(&grid, &[grid.center(0, 0)], &[]).unwrap();

        assert_close(field.threat(Cell::new(3, 0)), 4.0);
    }

    #[test]
    fn walls_force_detours() {
        // Column x=1 is walled except at the top row, so reaching (2, 0) from
        // (0, 0) takes 2 + 2 + 2 = 6 steps.
        let grid = TestGrid::open(3, 3).with_obstacles(&[(1, 0), (1, 1)]);
        let mut field = field_for(&grid, FieldConfig::default());

        field.recompute(&grid, &[grid.center(0, 0)], &[]).unwrap();

        assert_close(field.threat(Cell::new(2, 0)), 4.0);
        assert_close(field.threat(Cell::new(1, 0)), 0.0);
    }

    #[test]
    fn enclosed_cells_score_zero() {
        let grid = TestGrid::open(5, 5).with_obstacles(&[(2, 3), (2, 1), (1, 2), (3, 2)]);
        let mut field = field_for(&grid, FieldConfig::default());

        field
            .recompute(&grid, &[grid.center(0, 0)], &[grid.center(4, 4)])
            .unwrap();

        let enclosed = Cell::new(2, 2);
        assert_eq!(field.threat(enclosed), 0.0);
        assert_eq!(field.attraction(enclosed), 0.0);
    }

    #[test]
    fn sources_outside_the_grid_are_ignored() {
        let grid = TestGrid::open(3, 3);
        let mut field = field_for(&grid, FieldConfig::default());

        let report = field
            .recompute(&grid, &[WorldPoint::new(-5.0, -5.0)], &[grid.center(1, 1)])
            .unwrap();

        assert_eq!(report.threat.seeded, 0);
        assert_eq!(report.attraction.seeded, 1);
        assert_eq!(report.attraction.reached, 9);
        assert!(grid.dims.cells().all(|cell| field.threat(cell) == 0.0));
    }

    #[test]
    fn combined_scores_stay_in_unit_range() {
        let grid = TestGrid::open(9, 7).with_obstacles(&[(4, 2), (4, 3), (4, 4)]);
        let mut field = field_for(&grid, FieldConfig::default());

        let report = field
            .recompute(
                &grid,
                &[grid.center(1, 1), grid.center(7, 5)],
                &[grid.center(6, 1), grid.center(2, 6)],
            )
            .unwrap();

        assert_eq!(report.normalization, Normalization::Scaled);
        for cell in grid.dims.cells().filter(|cell| !grid.obstacles.contains(cell)) {
            let score = field.score_at(cell);
            assert!((0.0..=1.0).contains(&score), "{cell} scored {score}");
        }
    }

    #[test]
    fn normalization_range_includes_obstacle_cells() {
        // Obstacle raw value 0 is the minimum even though no walkable cell has it.
        let grid = TestGrid::open(3, 1).with_obstacles(&[(2, 0)]);
        let mut field = field_for(&grid, FieldConfig::default());

        let report = field.recompute(&grid, &[], &[grid.center(0, 0)]).unwrap();

        assert_close(report.raw_min, 0.0);
        assert_close(report.raw_max, 3.0);
        assert_close(field.score(0, 0), 1.0);
        assert_close(field.score(1, 0), 0.8);
    }

    #[test]
    fn no_sources_yields_midpoint_everywhere() {
        let grid = TestGrid::open(4, 3);
        let mut field = field_for(&grid, FieldConfig::default());

        let report = field.recompute(&grid, &[], &[]).unwrap();

        assert_eq!(
            report.normalization,
            Normalization::Degenerate {
                value: InfluenceField::MIDPOINT
            }
        );
        assert!(grid.dims.cells().all(|cell| field.score_at(cell) == 0.5));
    }

    #[test]
    fn zero_policy_flattens_to_zero() {
        let grid = TestGrid::open(4, 3);
        let config = FieldConfig::default().with_degenerate_policy(DegeneratePolicy::Zero);
        let mut field = field_for(&grid, config);

        let report = field.recompute(&grid, &[], &[]).unwrap();

        assert!(report.is_degenerate());
        assert!(grid.dims.cells().all(|cell| field.score_at(cell) == 0.0));
    }

    #[test]
    fn rejected_degenerate_tick_keeps_previous_field() {
        let grid = TestGrid::open(4, 1);
        let config = FieldConfig::default().with_degenerate_policy(DegeneratePolicy::Reject);
        let mut field = field_for(&grid, config);

        field.recompute(&grid, &[], &[grid.center(0, 0)]).unwrap();
        let snapshot = |field: &InfluenceField| -> Vec<(f32, f32, f32)> {
            (0..4)
                .map(|x| {
                    let cell = Cell::new(x, 0);
                    (field.score_at(cell), field.threat(cell), field.attraction(cell))
                })
                .collect()
        };
        let before = snapshot(&field);
        assert_close(field.attraction(Cell::new(0, 0)), 5.0);

        let err = field.recompute(&grid, &[], &[]).unwrap_err();
        assert!(matches!(err, FieldError::DegenerateNormalization { .. }));
        assert!(err.severity().is_recoverable());

        assert_eq!(snapshot(&field), before);
    }

    #[test]
    fn tiny_weights_still_produce_a_gradient() {
        let grid = TestGrid::open(4, 1);
        let config = FieldConfig::default().with_weights(FieldWeights::new(0.0, 1e-8));
        let mut field = field_for(&grid, config);

        let report = field.recompute(&grid, &[], &[grid.center(0, 0)]).unwrap();

        assert_eq!(report.normalization, Normalization::Scaled);
        assert_close(field.score(0, 0), 1.0);
        assert_close(field.score(3, 0), 0.0);
        assert!(field.score(1, 0) > field.score(2, 0));
    }

    #[test]
    fn out_of_bounds_scores_are_zero() {
        let grid = TestGrid::open(4, 3);
        let mut field = field_for(&grid, FieldConfig::default());
        field.recompute(&grid, &[], &[]).unwrap();

        assert_eq!(field.score(-1, 0), 0.0);
        assert_eq!(field.score(0, -1), 0.0);
        assert_eq!(field.score(4, 0), 0.0);
        assert_eq!(field.score(0, 3), 0.0);
    }

    #[test]
    fn obstacle_changes_apply_on_next_recompute() {
        let mut grid = TestGrid::open(3, 1);
        let mut field = field_for(&grid, FieldConfig::default());

        field.recompute(&grid, &[grid.center(0, 0)], &[]).unwrap();
        assert_close(field.threat(Cell::new(2, 0)), 8.0);

        grid.obstacles.insert(Cell::new(1, 0));
        field.recompute(&grid, &[grid.center(0, 0)], &[]).unwrap();
        assert_close(field.threat(Cell::new(2, 0)), 0.0);
    }
}
