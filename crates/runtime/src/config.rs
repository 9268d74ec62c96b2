//! Environment overrides layered on top of a loaded scenario.
use std::env;

use influence_content::Scenario;
use influence_core::{FieldWeights, Mood};

/// Optional overrides for scenario parameters.
///
/// Every field left as `None` keeps the scenario's value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuntimeConfig {
    pub mood: Option<Mood>,
    pub threat_weight: Option<f32>,
    pub item_weight: Option<f32>,
    pub max_threat_distance: Option<f32>,
    pub max_attraction_distance: Option<f32>,
    pub move_speed: Option<f32>,
    pub time_limit: Option<f32>,
    pub reward_seed: Option<u64>,
}

impl RuntimeConfig {
    /// Construct overrides from process environment variables.
    ///
    /// Environment variables:
    /// - `FIELD_MOOD` - Weight preset: neutral, fearful or joyful
    /// - `FIELD_THREAT_WEIGHT` - Threat weight, applied after the mood preset
    /// - `FIELD_ITEM_WEIGHT` - Reward weight, applied after the mood preset
    /// - `FIELD_MAX_THREAT_DISTANCE` - Threat falloff distance (default: 10)
    /// - `FIELD_MAX_ATTRACTION_DISTANCE` - Reward falloff distance (default: 5)
    /// - `AGENT_MOVE_SPEED` - Agent speed in world units per second (default: 2)
    /// - `SESSION_TIME_LIMIT` - Session length in seconds, 0 for unlimited (default: 30)
    /// - `REWARD_SEED` - Seed for reward placement
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.mood = read_env::<Mood>("FIELD_MOOD");
        config.threat_weight = read_env::<f32>("FIELD_THREAT_WEIGHT").map(|w| w.max(0.0));
        config.item_weight = read_env::<f32>("FIELD_ITEM_WEIGHT").map(|w| w.max(0.0));
        config.max_threat_distance = read_env::<f32>("FIELD_MAX_THREAT_DISTANCE");
        config.max_attraction_distance = read_env::<f32>("FIELD_MAX_ATTRACTION_DISTANCE");
        config.move_speed = read_env::<f32>("AGENT_MOVE_SPEED").map(|s| s.max(0.0));
        config.time_limit = read_env::<f32>("SESSION_TIME_LIMIT");
        config.reward_seed = read_env::<u64>("REWARD_SEED");

        config
    }

    /// Layers `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: RuntimeConfig) -> Self {
        Self {
            mood: other.mood.or(self.mood),
            threat_weight: other.threat_weight.or(self.threat_weight),
            item_weight: other.item_weight.or(self.item_weight),
            max_threat_distance: other.max_threat_distance.or(self.max_threat_distance),
            max_attraction_distance: other
                .max_attraction_distance
                .or(self.max_attraction_distance),
            move_speed: other.move_speed.or(self.move_speed),
            time_limit: other.time_limit.or(self.time_limit),
            reward_seed: other.reward_seed.or(self.reward_seed),
        }
    }

    /// Writes the overrides into `scenario`.
    ///
    /// The mood preset is applied before explicit weights so a single weight
    /// can be adjusted on top of a preset.
    pub fn apply(&self, scenario: &mut Scenario) {
        if let Some(mood) = self.mood {
            scenario.field.weights = FieldWeights::from_mood(mood);
        }
        if let Some(threat) = self.threat_weight {
            scenario.field.weights.threat = threat;
        }
        if let Some(item) = self.item_weight {
            scenario.field.weights.item = item;
        }
        if let Some(distance) = self.max_threat_distance {
            scenario.field.max_threat_distance = distance;
        }
        if let Some(distance) = self.max_attraction_distance {
            scenario.field.max_attraction_distance = distance;
        }
        if let Some(speed) = self.move_speed {
            scenario.agent.move_speed = speed;
        }
        if let Some(limit) = self.time_limit {
            scenario.time_limit = limit;
        }
        if let Some(seed) = self.reward_seed {
            scenario.rewards.seed = seed;
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
