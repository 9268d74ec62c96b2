//! Validated scenario description.

use influence_core::{AgentConfig, Cell, FieldConfig, GridDimensions, GridGeometry};

/// Looping list of waypoint cells a threat walks at `speed` world units/s.
#[derive(Clone, Debug, PartialEq)]
pub struct ThreatRoute {
    pub waypoints: Vec<Cell>,
    pub speed: f32,
}

impl ThreatRoute {
    pub const DEFAULT_SPEED: f32 = 1.5;

    pub fn new(waypoints: Vec<Cell>) -> Self {
        Self {
            waypoints,
            speed: Self::DEFAULT_SPEED,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardSettings {
    /// Number of live rewards the spawner keeps on the grid.
    pub max_rewards: usize,
    /// Seed for reward placement.
    pub seed: u64,
}

impl RewardSettings {
    pub const DEFAULT_MAX_REWARDS: usize = 6;
}

impl Default for RewardSettings {
    fn default() -> Self {
        Self {
            max_rewards: Self::DEFAULT_MAX_REWARDS,
            seed: 0,
        }
    }
}

/// Everything needed to build a session.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub dimensions: GridDimensions,
    pub geometry: GridGeometry,
    pub obstacles: Vec<Cell>,
    pub agents: Vec<Cell>,
    pub threats: Vec<ThreatRoute>,
    pub rewards: RewardSettings,
    pub field: FieldConfig,
    pub agent: AgentConfig,
    /// Session length in seconds.
    pub time_limit: f32,
}

impl Scenario {
    pub const DEFAULT_TIME_LIMIT: f32 = 30.0;

    /// Walled arena with one agent in the middle and two threats circling
    /// opposite corners. Waypoints are kept off the border walls, so tiny
    /// arenas collapse the routes rather than walking through walls.
    pub fn open_arena(width: u32, height: u32) -> Self {
        let dimensions = GridDimensions::new(width, height);
        let (w, h) = (width as i32, height as i32);

        let obstacles = dimensions
            .cells()
            .filter(|cell| cell.x == 0 || cell.y == 0 || cell.x == w - 1 || cell.y == h - 1)
            .collect();

        let inner = |x: i32, y: i32| {
            Cell::new(x.clamp(1, (w - 2).max(1)), y.clamp(1, (h - 2).max(1)))
        };
        let threats = vec![
            ThreatRoute::new(vec![
                inner(1, 1),
                inner(w / 2 - 1, 1),
                inner(w / 2 - 1, h / 2 - 1),
                inner(1, h / 2 - 1),
            ]),
            ThreatRoute::new(vec![
                inner(w - 2, h - 2),
                inner(w / 2 + 1, h - 2),
                inner(w / 2 + 1, h / 2 + 1),
                inner(w - 2, h / 2 + 1),
            ]),
        ];

        Self {
            name: "open-arena".to_string(),
            dimensions,
            geometry: GridGeometry::default(),
            obstacles,
            agents: vec![Cell::new(w / 2, h / 2)],
            threats,
            rewards: RewardSettings::default(),
            field: FieldConfig::default(),
            agent: AgentConfig::default(),
            time_limit: Self::DEFAULT_TIME_LIMIT,
        }
    }
}
