//! Tunables for needs decay and direct interactions.
//!
//! Both structs deserialize from the `needs` and `interaction` sections of
//! `catnip-config.yaml`; every field has a default so partial sections are
//! accepted.

use serde::Deserialize;

/// Decay of physical needs over time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NeedsConfig {
    /// Hunger gained and energy lost per simulated second (default: 0.1).
    #[serde(default = "default_decay_rate")]
    pub decay_rate: f64,

    /// Energy drain multiplier while moving (default: 2).
    #[serde(default = "default_moving_energy_multiplier")]
    pub moving_energy_multiplier: f64,
}

impl Default for NeedsConfig {
    fn default() -> Self {
        Self {
            decay_rate: default_decay_rate(),
            moving_energy_multiplier: default_moving_energy_multiplier(),
        }
    }
}

const fn default_decay_rate() -> f64 {
    0.1
}

const fn default_moving_energy_multiplier() -> f64 {
    2.0
}

/// Rules applied by the interaction mediator and the relationship ledger.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InteractionConfig {
    /// Cooldown per (human, agent, type) in seconds (default: 2).
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: f64,

    /// Maximum interaction history entries per relationship (default: 50).
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,

    /// Trust lost when an interaction fails (default: 0.05).
    #[serde(default = "default_failure_trust_penalty")]
    pub failure_trust_penalty: f64,

    /// Probability a failed interaction annoys the cat (default: 0.3).
    #[serde(default = "default_failure_annoyed_chance")]
    pub failure_annoyed_chance: f64,

    /// Seconds the cat purrs after being petted (default: 3).
    #[serde(default = "default_pet_purr_seconds")]
    pub pet_purr_seconds: f64,

    /// Seconds the cat stays near the human after being petted (default: 15).
    #[serde(default = "default_pet_stay_near_seconds")]
    pub pet_stay_near_seconds: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: default_cooldown_seconds(),
            history_cap: default_history_cap(),
            failure_trust_penalty: default_failure_trust_penalty(),
            failure_annoyed_chance: default_failure_annoyed_chance(),
            pet_purr_seconds: default_pet_purr_seconds(),
            pet_stay_near_seconds: default_pet_stay_near_seconds(),
        }
    }
}

const fn default_cooldown_seconds() -> f64 {
    2.0
}

const fn default_history_cap() -> usize {
    50
}

const fn default_failure_trust_penalty() -> f64 {
    0.05
}

const fn default_failure_annoyed_chance() -> f64 {
    0.3
}

const fn default_pet_purr_seconds() -> f64 {
    3.0
}

const fn default_pet_stay_near_seconds() -> f64 {
    15.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn partial_section_keeps_defaults() {
        let config: InteractionConfig = serde_yml::from_str("history_cap: 10\n").unwrap();
        assert_eq!(config.history_cap, 10);
        assert!((config.cooldown_seconds - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_needs_section_is_default() {
        let config: NeedsConfig = serde_yml::from_str("{}").unwrap();
        assert_eq!(config, NeedsConfig::default());
    }
}
