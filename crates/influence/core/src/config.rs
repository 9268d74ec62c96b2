/// Tunable parameters for the influence field.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldConfig {
    /// World-space distance added per orthogonal step during propagation.
    pub cell_size: f32,
    /// Walkable-path distance at which a threat stops contributing.
    pub max_threat_distance: f32,
    /// Walkable-path distance at which a reward stops contributing.
    pub max_attraction_distance: f32,
    pub weights: FieldWeights,
    pub degenerate: DegeneratePolicy,
}

impl FieldConfig {
    pub const DEFAULT_CELL_SIZE: f32 = 1.0;
    pub const DEFAULT_MAX_THREAT_DISTANCE: f32 = 10.0;
    pub const DEFAULT_MAX_ATTRACTION_DISTANCE: f32 = 5.0;

    pub fn new() -> Self {
        Self {
            cell_size: Self::DEFAULT_CELL_SIZE,
            max_threat_distance: Self::DEFAULT_MAX_THREAT_DISTANCE,
            max_attraction_distance: Self::DEFAULT_MAX_ATTRACTION_DISTANCE,
            weights: FieldWeights::default(),
            degenerate: DegeneratePolicy::default(),
        }
    }

    pub fn with_weights(mut self, weights: FieldWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_mood(self, mood: Mood) -> Self {
        self.with_weights(FieldWeights::from_mood(mood))
    }

    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Weight pair for `-threat * T + item * A`. The pair need not sum to one.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldWeights {
    pub threat: f32,
    pub item: f32,
}

impl FieldWeights {
    pub const fn new(threat: f32, item: f32) -> Self {
        Self { threat, item }
    }

    pub const fn from_mood(mood: Mood) -> Self {
        match mood {
            Mood::Neutral => Self::new(0.5, 0.5),
            Mood::Fearful => Self::new(0.8, 0.2),
            Mood::Joyful => Self::new(0.2, 0.8),
        }
    }
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self::new(0.4, 0.6)
    }
}

/// Preset weight pairs.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mood {
    Neutral,
    /// Weighs threat avoidance over reward pursuit.
    Fearful,
    /// Weighs reward pursuit over threat avoidance.
    Joyful,
}

/// What to write when every raw combined value is equal and min-max scaling
/// would divide by zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DegeneratePolicy {
    /// Every walkable cell scores 0.5.
    #[default]
    Midpoint,
    /// Every walkable cell scores 0.0.
    Zero,
    /// Fail the recompute and keep the previously published field.
    Reject,
}

/// Tunable parameters for agent motion and loop suppression.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    /// World units per second.
    pub move_speed: f32,
    /// Distance below which the agent snaps onto its target cell.
    pub arrival_threshold: f32,
}

impl AgentConfig {
    /// Number of recent moves remembered for loop suppression.
    pub const HISTORY_LIMIT: usize = 4;
    /// A candidate seen more than this many times in the history is rejected.
    pub const LOOP_THRESHOLD: usize = 2;

    pub const DEFAULT_MOVE_SPEED: f32 = 2.0;
    pub const DEFAULT_ARRIVAL_THRESHOLD: f32 = 0.1;

    pub fn new() -> Self {
        Self {
            move_speed: Self::DEFAULT_MOVE_SPEED,
            arrival_threshold: Self::DEFAULT_ARRIVAL_THRESHOLD,
        }
    }

    pub fn with_move_speed(mut self, move_speed: f32) -> Self {
        self.move_speed = move_speed;
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}
