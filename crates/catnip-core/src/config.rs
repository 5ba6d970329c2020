//! Configuration loading and typed config structures for the Catnip
//! simulation.
//!
//! The canonical configuration lives in `catnip-config.yaml` in the working
//! directory. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads and validates the file.
//! Every field has a default, so an empty file is a valid configuration.

use std::path::Path;

use catnip_agents::config::{InteractionConfig, NeedsConfig};
use catnip_types::{DVec3, ToolId};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `catnip-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, seed, timing, spawning).
    #[serde(default)]
    pub world: WorldConfig,

    /// Decision and movement tunables.
    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Needs decay.
    #[serde(default)]
    pub needs: NeedsConfig,

    /// Interaction rules.
    #[serde(default)]
    pub interaction: InteractionConfig,

    /// Seed content for the engine binary.
    #[serde(default)]
    pub agents: AgentsConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable world name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Seed of every random source in the simulation.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Milliseconds per tick, real and simulated.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Broadcast agent snapshots every this many ticks (0 disables).
    #[serde(default = "default_broadcast_interval_ticks")]
    pub broadcast_interval_ticks: u64,

    /// Radius around the origin for spawns without a position.
    #[serde(default = "default_spawn_radius")]
    pub spawn_radius: f64,

    /// Preferred minimum distance between a new spawn and existing cats.
    #[serde(default = "default_spawn_min_separation")]
    pub spawn_min_separation: f64,

    /// Stop after this many ticks (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            tick_interval_ms: default_tick_interval_ms(),
            broadcast_interval_ticks: default_broadcast_interval_ticks(),
            spawn_radius: default_spawn_radius(),
            spawn_min_separation: default_spawn_min_separation(),
            max_ticks: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Behavior
// ---------------------------------------------------------------------------

/// Decision and movement tunables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BehaviorConfig {
    /// Half-width of the uniform noise factor applied to positive weights.
    /// `0.2` draws factors from `[0.8, 1.2]`; `0` disables noise.
    #[serde(default = "default_decision_noise")]
    pub decision_noise: f64,

    /// Humans farther than this are ignored by the decision step.
    #[serde(default = "default_human_search_radius")]
    pub human_search_radius: f64,

    /// Follow stops closing in inside this distance.
    #[serde(default = "default_follow_distance")]
    pub follow_distance: f64,

    /// Orbit radius of `CirclePlayer`.
    #[serde(default = "default_circle_radius")]
    pub circle_radius: f64,

    /// Radians the orbit advances per tick.
    #[serde(default = "default_circle_angle_step")]
    pub circle_angle_step: f64,

    /// A target closer than this counts as reached.
    #[serde(default = "default_arrival_distance")]
    pub arrival_distance: f64,

    /// How long a toy use stays interesting, in seconds.
    #[serde(default = "default_toy_use_window")]
    pub toy_use_window: f64,

    /// Minimum seconds between two meows.
    #[serde(default = "default_meow_interval")]
    pub meow_interval: f64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            decision_noise: default_decision_noise(),
            human_search_radius: default_human_search_radius(),
            follow_distance: default_follow_distance(),
            circle_radius: default_circle_radius(),
            circle_angle_step: default_circle_angle_step(),
            arrival_distance: default_arrival_distance(),
            toy_use_window: default_toy_use_window(),
            meow_interval: default_meow_interval(),
        }
    }
}

// ---------------------------------------------------------------------------
// Seed content
// ---------------------------------------------------------------------------

/// Content the engine binary places in the world at startup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AgentsConfig {
    /// Height of the flat demo ground. `None` runs without ground.
    #[serde(default = "default_ground_height")]
    pub ground_height: Option<f64>,

    /// Cats spawned at startup.
    #[serde(default)]
    pub seed_agents: Vec<SeedAgentConfig>,

    /// Cat trees in the demo world.
    #[serde(default)]
    pub trees: Vec<TreeConfig>,

    /// Humans connected at startup.
    #[serde(default)]
    pub humans: Vec<HumanConfig>,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            ground_height: default_ground_height(),
            seed_agents: Vec::new(),
            trees: Vec::new(),
            humans: Vec::new(),
        }
    }
}

/// A cat spawned at startup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedAgentConfig {
    /// Archetype or breed name.
    pub archetype: String,
    /// Display name; generated when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Spawn point; random within the spawn radius when absent.
    #[serde(default)]
    pub position: Option<DVec3>,
}

/// A cat tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TreeConfig {
    /// Tree id.
    pub id: String,
    /// Base position on the ground.
    pub base: DVec3,
    /// Top platform position.
    pub top: DVec3,
}

/// A human connected at startup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HumanConfig {
    /// Human id.
    pub id: u64,
    /// Avatar position.
    pub position: DVec3,
    /// Display name of the held item.
    #[serde(default)]
    pub equipped_item: Option<String>,
    /// Tool equipped through the registry.
    #[serde(default)]
    pub tool: Option<ToolId>,
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Catnip Garden".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_tick_interval_ms() -> u64 {
    100
}

const fn default_broadcast_interval_ticks() -> u64 {
    10
}

const fn default_spawn_radius() -> f64 {
    50.0
}

const fn default_spawn_min_separation() -> f64 {
    5.0
}

const fn default_decision_noise() -> f64 {
    0.2
}

const fn default_human_search_radius() -> f64 {
    50.0
}

const fn default_follow_distance() -> f64 {
    5.0
}

const fn default_circle_radius() -> f64 {
    4.0
}

const fn default_circle_angle_step() -> f64 {
    0.15
}

const fn default_arrival_distance() -> f64 {
    2.0
}

const fn default_toy_use_window() -> f64 {
    3.0
}

const fn default_meow_interval() -> f64 {
    3.0
}

#[allow(clippy::unnecessary_wraps)]
const fn default_ground_height() -> Option<f64> {
    Some(0.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.world.seed, 42);
        assert_eq!(config.world.tick_interval_ms, 100);
        assert_eq!(config.world.broadcast_interval_ticks, 10);
        assert!((config.world.spawn_radius - 50.0).abs() < f64::EPSILON);
        assert!((config.behavior.decision_noise - 0.2).abs() < f64::EPSILON);
        assert!((config.needs.decay_rate - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.interaction.history_cap, 50);
        assert_eq!(config.agents.ground_height, Some(0.0));
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
world:
  name: "Test Garden"
  seed: 7
  tick_interval_ms: 50
  broadcast_interval_ticks: 5
  spawn_radius: 20.0
  spawn_min_separation: 2.0
  max_ticks: 600

behavior:
  decision_noise: 0.0
  human_search_radius: 30.0
  follow_distance: 4.0
  circle_radius: 3.0
  circle_angle_step: 0.2
  arrival_distance: 1.5
  toy_use_window: 2.0
  meow_interval: 5.0

needs:
  decay_rate: 0.2
  moving_energy_multiplier: 3.0

interaction:
  cooldown_seconds: 1.0
  history_cap: 20

agents:
  ground_height: 1.5
  seed_agents:
    - archetype: Friendly
      name: Mochi
    - archetype: Bengal
      position: [4.0, 0.0, -2.0]
  trees:
    - id: tree_1
      base: [10.0, 0.0, 10.0]
      top: [10.0, 6.0, 10.0]
  humans:
    - id: 1
      position: [0.0, 0.0, 5.0]
      equipped_item: "Squeaky Toy"
    - id: 2
      position: [3.0, 0.0, 3.0]
      tool: premiumFood
"#;
        let config = SimulationConfig::parse(yaml).unwrap();
        assert_eq!(config.world.name, "Test Garden");
        assert_eq!(config.world.max_ticks, 600);
        assert!(config.behavior.decision_noise.abs() < f64::EPSILON);
        assert!((config.needs.moving_energy_multiplier - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.interaction.history_cap, 20);
        // Unset interaction fields keep their defaults.
        assert!((config.interaction.pet_stay_near_seconds - 15.0).abs() < f64::EPSILON);
        assert_eq!(config.agents.seed_agents.len(), 2);
        assert_eq!(config.agents.seed_agents[0].name.as_deref(), Some("Mochi"));
        assert_eq!(
            config.agents.seed_agents[1].position,
            Some(DVec3::new(4.0, 0.0, -2.0))
        );
        assert_eq!(config.agents.trees[0].top, DVec3::new(10.0, 6.0, 10.0));
        assert_eq!(config.agents.humans[1].tool, Some(ToolId::PremiumFood));
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = SimulationConfig::parse("world:\n  seed: 9\n").unwrap();
        assert_eq!(config.world.seed, 9);
        assert_eq!(config.world.tick_interval_ms, 100);
        assert!((config.behavior.follow_distance - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(SimulationConfig::parse("").is_ok());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = SimulationConfig::parse("world: [unterminated");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("catnip-config.yaml");
        if path.exists() {
            let config = SimulationConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
