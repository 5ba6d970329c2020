//! Mood effects table and mood transitions.
//!
//! Each mood carries a movement multiplier, an optional interaction-chance
//! modifier, behavior boosts and the range its duration is drawn from.

use catnip_types::{Agent, Mood, MoodState, PhysicalState};
use rand::Rng;

/// Effects of a single mood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodEffect {
    /// Scales every movement step.
    pub movement_multiplier: f64,
    /// Multiplies interaction success chance. `None` means 1.0.
    pub interaction_chance: Option<f64>,
    /// Added to 1 and multiplied into the Explore weight.
    pub exploration_boost: f64,
    /// Added to 1 and multiplied into the Play weight.
    pub playfulness_boost: f64,
    /// Duration range in seconds, inclusive.
    pub duration: (f64, f64),
}

impl MoodEffect {
    /// Interaction chance modifier, defaulting to 1.0.
    pub fn interaction_modifier(&self) -> f64 {
        self.interaction_chance.unwrap_or(1.0)
    }
}

const fn effect(
    movement_multiplier: f64,
    interaction_chance: Option<f64>,
    exploration_boost: f64,
    playfulness_boost: f64,
    duration: (f64, f64),
) -> MoodEffect {
    MoodEffect {
        movement_multiplier,
        interaction_chance,
        exploration_boost,
        playfulness_boost,
        duration,
    }
}

/// Look up the effects of a mood.
pub const fn mood_effect(mood: Mood) -> MoodEffect {
    match mood {
        Mood::Happy => effect(1.2, Some(0.8), 0.0, 0.3, (300.0, 600.0)),
        Mood::Curious => effect(1.1, None, 0.4, 0.0, (180.0, 300.0)),
        Mood::Annoyed => effect(0.8, Some(0.2), 0.0, 0.0, (120.0, 240.0)),
        Mood::Hungry => effect(0.9, None, 0.0, 0.0, (300.0, 600.0)),
        Mood::Tired => effect(0.6, None, 0.0, 0.0, (240.0, 480.0)),
        Mood::Afraid => effect(1.3, None, 0.0, 0.0, (60.0, 180.0)),
        Mood::Playful => effect(1.4, None, 0.0, 0.6, (180.0, 360.0)),
    }
}

/// Set an agent's mood, drawing the duration from the mood's range.
///
/// Intensity is clamped to `[0, 1]`.
pub fn set_mood(agent: &mut Agent, mood: Mood, intensity: f64, rng: &mut impl Rng) {
    let (min, max) = mood_effect(mood).duration;
    agent.mood = MoodState {
        mood,
        intensity: intensity.clamp(0.0, 1.0),
        remaining: rng.random_range(min..=max),
    };
}

/// Hunger below which a needs change leaves the cat Hungry.
pub const HUNGRY_BELOW: f64 = 20.0;
/// Energy below which a needs change leaves the cat Tired.
pub const TIRED_BELOW: f64 = 20.0;

const HUNGRY_INTENSITY: f64 = 0.8;
const TIRED_INTENSITY: f64 = 0.7;

/// Mood and intensity a physical state calls for, if any. Hunger wins over
/// energy.
pub fn needs_mood(physical: &PhysicalState) -> Option<(Mood, f64)> {
    if physical.hunger < HUNGRY_BELOW {
        Some((Mood::Hungry, HUNGRY_INTENSITY))
    } else if physical.energy < TIRED_BELOW {
        Some((Mood::Tired, TIRED_INTENSITY))
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::store::AgentStore;

    #[test]
    fn missing_interaction_chance_defaults_to_one() {
        assert!((mood_effect(Mood::Curious).interaction_modifier() - 1.0).abs() < f64::EPSILON);
        assert!((mood_effect(Mood::Annoyed).interaction_modifier() - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn duration_drawn_from_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut store = AgentStore::new();
        let id = store.create(None, "Friendly", None, 0.0).id.clone();
        let agent = store.get_mut(&id).unwrap();
        for _ in 0..20 {
            set_mood(agent, Mood::Afraid, 1.5, &mut rng);
            assert_eq!(agent.mood.mood, Mood::Afraid);
            assert!((60.0..=180.0).contains(&agent.mood.remaining));
            assert!((agent.mood.intensity - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn low_needs_call_for_a_mood() {
        let mut physical = PhysicalState::default();
        assert_eq!(needs_mood(&physical), None);

        physical.energy = 19.0;
        assert_eq!(needs_mood(&physical), Some((Mood::Tired, 0.7)));

        physical.hunger = 19.9;
        assert_eq!(needs_mood(&physical), Some((Mood::Hungry, 0.8)));

        physical.hunger = 20.0;
        physical.energy = 20.0;
        assert_eq!(needs_mood(&physical), None);
    }
}
