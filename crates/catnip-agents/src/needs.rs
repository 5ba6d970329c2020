//! Physical needs: time-based decay and clamped adjustments.
//!
//! Decay is driven by elapsed simulated time rather than tick count, so
//! irregular ticks produce the same result as regular ones:
//!
//! - hunger rises by `decay_rate` per second
//! - energy falls by `decay_rate` per second, times the moving multiplier
//!   while walking
//! - the mood countdown runs down and the mood reverts to Happy at zero
//!
//! Every need stays within `[0, 100]`. Direct changes to needs (interaction
//! effects, behavior costs and gains) go through [`update_physical`], which
//! also sets Hungry or Tired when a need ends up low. Decay does not.

use catnip_types::{Agent, Mood, MoodState, PhysicalState};
use rand::Rng;

use crate::config::NeedsConfig;
use crate::mood::{needs_mood, set_mood};

/// Lower bound of every need.
pub const NEED_MIN: f64 = 0.0;

/// Upper bound of every need.
pub const NEED_MAX: f64 = 100.0;

/// Clamp a need into `[0, 100]`.
pub fn clamp_need(value: f64) -> f64 {
    value.clamp(NEED_MIN, NEED_MAX)
}

/// A change to physical needs, applied with clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NeedsDelta {
    /// Change in hunger.
    pub hunger: f64,
    /// Change in energy.
    pub energy: f64,
    /// Change in health.
    pub health: f64,
    /// Change in grooming.
    pub grooming: f64,
}

/// Apply `delta` to `physical`, clamping every field.
pub fn adjust_needs(physical: &mut PhysicalState, delta: NeedsDelta) {
    physical.hunger = clamp_need(physical.hunger + delta.hunger);
    physical.energy = clamp_need(physical.energy + delta.energy);
    physical.health = clamp_need(physical.health + delta.health);
    physical.grooming = clamp_need(physical.grooming + delta.grooming);
}

/// Apply `delta` to an agent's needs, then set Hungry (hunger below 20)
/// or else Tired (energy below 20). Returns the mood that was set.
pub fn update_physical(agent: &mut Agent, delta: NeedsDelta, rng: &mut impl Rng) -> Option<Mood> {
    adjust_needs(&mut agent.physical, delta);
    let (mood, intensity) = needs_mood(&agent.physical)?;
    set_mood(agent, mood, intensity, rng);
    Some(mood)
}

/// Apply decay for the time since `agent.timers.last_update`.
///
/// Returns the elapsed seconds. Nothing changes (and the timestamp is kept)
/// when `now` is not after the last update.
pub fn apply_decay(agent: &mut Agent, now: f64, config: &NeedsConfig) -> f64 {
    let elapsed = now - agent.timers.last_update;
    if elapsed <= 0.0 {
        return 0.0;
    }

    let drain = if agent.behavior.is_moving {
        config.moving_energy_multiplier
    } else {
        1.0
    };
    adjust_needs(
        &mut agent.physical,
        NeedsDelta {
            hunger: config.decay_rate * elapsed,
            energy: -(config.decay_rate * elapsed * drain),
            ..NeedsDelta::default()
        },
    );

    if agent.mood.remaining > 0.0 {
        agent.mood.remaining -= elapsed;
        if agent.mood.remaining <= 0.0 {
            agent.mood = MoodState::default();
        }
    }

    agent.timers.last_update = now;
    elapsed
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::store::AgentStore;

    fn make_agent() -> Agent {
        let mut store = AgentStore::new();
        let id = store.create(None, "Friendly", None, 0.0).id.clone();
        store.get(&id).unwrap().clone()
    }

    #[test]
    fn decay_scales_with_elapsed_time() {
        let mut agent = make_agent();
        let elapsed = apply_decay(&mut agent, 10.0, &NeedsConfig::default());
        assert!((elapsed - 10.0).abs() < 1e-9);
        assert!((agent.physical.hunger - 51.0).abs() < 1e-9);
        assert!((agent.physical.energy - 99.0).abs() < 1e-9);
        assert!((agent.timers.last_update - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn moving_doubles_energy_drain() {
        let mut agent = make_agent();
        agent.behavior.is_moving = true;
        apply_decay(&mut agent, 10.0, &NeedsConfig::default());
        assert!((agent.physical.energy - 98.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_elapsed_is_ignored() {
        let mut agent = make_agent();
        agent.timers.last_update = 5.0;
        assert!(apply_decay(&mut agent, 5.0, &NeedsConfig::default()).abs() < f64::EPSILON);
        assert!(apply_decay(&mut agent, 3.0, &NeedsConfig::default()).abs() < f64::EPSILON);
        assert!((agent.physical.hunger - 50.0).abs() < f64::EPSILON);
        assert!((agent.timers.last_update - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn needs_stay_in_bounds_after_long_gaps() {
        let mut agent = make_agent();
        agent.behavior.is_moving = true;
        apply_decay(&mut agent, 100_000.0, &NeedsConfig::default());
        assert!((agent.physical.hunger - NEED_MAX).abs() < f64::EPSILON);
        assert!((agent.physical.energy - NEED_MIN).abs() < f64::EPSILON);

        adjust_needs(
            &mut agent.physical,
            NeedsDelta {
                grooming: 500.0,
                health: -500.0,
                ..NeedsDelta::default()
            },
        );
        assert!((agent.physical.grooming - NEED_MAX).abs() < f64::EPSILON);
        assert!((agent.physical.health - NEED_MIN).abs() < f64::EPSILON);
    }

    #[test]
    fn mood_reverts_to_happy_when_countdown_expires() {
        let mut agent = make_agent();
        agent.mood = MoodState {
            mood: Mood::Annoyed,
            intensity: 0.4,
            remaining: 5.0,
        };
        apply_decay(&mut agent, 3.0, &NeedsConfig::default());
        assert_eq!(agent.mood.mood, Mood::Annoyed);
        apply_decay(&mut agent, 6.0, &NeedsConfig::default());
        assert_eq!(agent.mood, MoodState::default());
    }

    #[test]
    fn zero_duration_mood_never_counts_down() {
        let mut agent = make_agent();
        apply_decay(&mut agent, 1_000.0, &NeedsConfig::default());
        assert_eq!(agent.mood.mood, Mood::Happy);
        assert!(agent.mood.remaining.abs() < f64::EPSILON);
    }

    #[test]
    fn low_hunger_sets_hungry_before_tired() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut agent = make_agent();
        agent.physical.energy = 10.0;

        let mood = update_physical(
            &mut agent,
            NeedsDelta {
                hunger: -35.0,
                ..NeedsDelta::default()
            },
            &mut rng,
        );
        assert_eq!(mood, Some(Mood::Hungry));
        assert_eq!(agent.mood.mood, Mood::Hungry);
        assert!((agent.mood.intensity - 0.8).abs() < 1e-9);
        assert!(agent.mood.remaining >= 300.0);
    }

    #[test]
    fn decay_never_triggers_needs_moods() {
        let mut agent = make_agent();
        agent.physical.energy = 1.0;
        apply_decay(&mut agent, 50.0, &NeedsConfig::default());
        assert_eq!(agent.mood.mood, Mood::Happy);
    }
}
