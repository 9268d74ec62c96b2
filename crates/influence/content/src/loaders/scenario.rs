//! Scenario loader.
//!
//! Scenario files are RON. Obstacles can be listed as cells, drawn as text
//! rows (`#` marks an obstacle, the first row is the top of the grid), or both.
//!
//! ```ron
//! (
//!     name: "corridor",
//!     dimensions: (8, 3),
//!     rows: [
//!         "########",
//!         "#......#",
//!         "########",
//!     ],
//!     agents: [(1, 1)],
//!     threats: [(waypoints: [(6, 1), (4, 1)])],
//!     rewards: (max_rewards: 2, seed: 7),
//! )
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, ensure};
use influence_core::{AgentConfig, Cell, FieldConfig, GridDimensions, GridGeometry};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::scenario::{RewardSettings, Scenario, ThreatRoute};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScenarioRon {
    #[serde(default)]
    name: String,
    dimensions: (u32, u32),
    #[serde(default)]
    origin: (i32, i32),
    #[serde(default = "default_cell_size")]
    cell_size: f32,
    #[serde(default)]
    rows: Vec<String>,
    #[serde(default)]
    obstacles: Vec<(i32, i32)>,
    agents: Vec<(i32, i32)>,
    #[serde(default)]
    threats: Vec<ThreatRouteRon>,
    #[serde(default)]
    rewards: RewardsRon,
    #[serde(default)]
    field: FieldConfig,
    #[serde(default)]
    agent: AgentConfig,
    #[serde(default = "default_time_limit")]
    time_limit: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ThreatRouteRon {
    waypoints: Vec<(i32, i32)>,
    #[serde(default = "default_threat_speed")]
    speed: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RewardsRon {
    #[serde(default = "default_max_rewards")]
    max_rewards: usize,
    #[serde(default)]
    seed: u64,
}

impl Default for RewardsRon {
    fn default() -> Self {
        Self {
            max_rewards: default_max_rewards(),
            seed: 0,
        }
    }
}

fn default_cell_size() -> f32 {
    1.0
}

fn default_time_limit() -> f32 {
    Scenario::DEFAULT_TIME_LIMIT
}

fn default_threat_speed() -> f32 {
    ThreatRoute::DEFAULT_SPEED
}

fn default_max_rewards() -> usize {
    RewardSettings::DEFAULT_MAX_REWARDS
}

/// Loader for scenario data from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load and validate a scenario from a RON file.
    ///
    /// The file stem becomes the scenario name unless the file sets one.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        let mut scenario = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))?;
        if scenario.name.is_empty() {
            if let Some(stem) = path.file_stem() {
                scenario.name = stem.to_string_lossy().into_owned();
            }
        }
        tracing::info!(
            name = %scenario.name,
            width = scenario.dimensions.width,
            height = scenario.dimensions.height,
            agents = scenario.agents.len(),
            threats = scenario.threats.len(),
            "scenario loaded"
        );
        Ok(scenario)
    }

    /// Parse and validate a scenario from RON text.
    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let data: ScenarioRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        let dimensions = GridDimensions::new(data.dimensions.0, data.dimensions.1);
        ensure!(
            !dimensions.is_empty(),
            "dimensions {}x{} contain no cells",
            dimensions.width,
            dimensions.height
        );
        ensure!(
            data.cell_size > 0.0,
            "cell_size must be positive, got {}",
            data.cell_size
        );

        let mut obstacles = BTreeSet::new();
        for (row_index, row) in data.rows.iter().enumerate() {
            ensure!(
                row.chars().count() == dimensions.width as usize,
                "row {} has {} columns, expected {}",
                row_index,
                row.chars().count(),
                dimensions.width
            );
            ensure!(
                row_index < dimensions.height as usize,
                "more rows than the grid height {}",
                dimensions.height
            );
            let y = dimensions.height as i32 - 1 - row_index as i32;
            for (x, glyph) in row.chars().enumerate() {
                if glyph == '#' {
                    obstacles.insert(Cell::new(x as i32, y));
                }
            }
        }
        for (x, y) in data.obstacles {
            let cell = Cell::new(x, y);
            ensure!(dimensions.contains(cell), "obstacle {} is out of bounds", cell);
            obstacles.insert(cell);
        }

        let agents = data
            .agents
            .into_iter()
            .map(|(x, y)| {
                let cell = Cell::new(x, y);
                if !dimensions.contains(cell) {
                    bail!("agent spawn {} is out of bounds", cell);
                }
                if obstacles.contains(&cell) {
                    bail!("agent spawn {} is inside an obstacle", cell);
                }
                Ok(cell)
            })
            .collect::<LoadResult<Vec<_>>>()?;

        let threats = data
            .threats
            .into_iter()
            .enumerate()
            .map(|(index, route)| {
                ensure!(!route.waypoints.is_empty(), "threat route {} is empty", index);
                ensure!(
                    route.speed > 0.0,
                    "threat route {} has non-positive speed",
                    index
                );
                let waypoints = route
                    .waypoints
                    .into_iter()
                    .map(|(x, y)| Cell::new(x, y))
                    .collect::<Vec<_>>();
                if let Some(cell) = waypoints.iter().find(|cell| !dimensions.contains(**cell)) {
                    bail!("threat route {} waypoint {} is out of bounds", index, cell);
                }
                Ok(ThreatRoute {
                    waypoints,
                    speed: route.speed,
                })
            })
            .collect::<LoadResult<Vec<_>>>()?;

        let rewards = RewardSettings {
            max_rewards: data.rewards.max_rewards,
            seed: data.rewards.seed,
        };

        let mut field = data.field;
        field.cell_size = data.cell_size;

        Ok(Scenario {
            name: data.name,
            dimensions,
            geometry: GridGeometry::new(Cell::new(data.origin.0, data.origin.1), data.cell_size),
            obstacles: obstacles.into_iter().collect(),
            agents,
            threats,
            rewards,
            field,
            agent: data.agent,
            time_limit: data.time_limit,
        })
    }
}
