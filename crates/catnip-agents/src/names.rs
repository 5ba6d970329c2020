//! Display-name generation.
//!
//! Names come from a breed-specific pool. A cat with a dominant trait
//! (above 0.7) sometimes gets a name from that trait's pool instead. Names
//! are cached per agent so repeated lookups agree.

use std::collections::BTreeMap;

use catnip_types::{AgentId, Personality};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

/// Probability of checking for a dominant trait at all.
const TRAIT_CHECK_CHANCE: f64 = 0.3;

/// Probability of using the trait pool once a dominant trait was found.
const TRAIT_NAME_CHANCE: f64 = 0.2;

/// Trait value above which a trait is dominant.
const DOMINANT_TRAIT: f64 = 0.7;

const DEFAULT_NAMES: [&str; 8] = [
    "Whiskers", "Mittens", "Boots", "Paws", "Tails", "Felix", "Luna", "Charlie",
];

fn breed_pool(breed: &str) -> &'static [&'static str] {
    match breed {
        "Siamese" => &["Luna", "Milo", "Nala", "Simba", "Cleo", "Phoenix", "Sage", "Aria"],
        "Persian" => &["Fluffy", "Princess", "Duke", "Bella", "Max", "Sophie", "Oliver", "Chloe"],
        "Tabby" => &["Tiger", "Stripe", "Patches", "Rusty", "Ginger", "Shadow", "Smokey", "Bandit"],
        "Calico" => &["Callie", "Patches", "Marbles", "Splotch", "Rainbow", "Autumn", "Sunset", "Ember"],
        "Bengal" => &["Jungle", "Safari", "Hunter", "Wild", "Storm", "Thunder", "Blaze", "Rocket"],
        "Maine Coon" => &["Bear", "Leo", "Atlas", "Titan", "Aurora", "Nova", "Zeus", "Luna"],
        _ => &DEFAULT_NAMES,
    }
}

/// Pool for the first dominant trait, checked in a fixed order.
fn trait_pool(personality: &Personality) -> Option<&'static [&'static str]> {
    if personality.friendliness > DOMINANT_TRAIT {
        Some(&["Buddy", "Sunny", "Happy", "Joy", "Smiley"])
    } else if personality.independence > DOMINANT_TRAIT {
        Some(&["Solo", "Rogue", "Ace", "Rebel", "Free"])
    } else if personality.playfulness > DOMINANT_TRAIT {
        Some(&["Bounce", "Ziggy", "Zoom", "Dash", "Spark"])
    } else if personality.curiosity > DOMINANT_TRAIT {
        Some(&["Explorer", "Scout", "Quest", "Riddle", "Mystery"])
    } else if personality.shyness > DOMINANT_TRAIT {
        Some(&["Whisper", "Shadow", "Shy", "Quiet", "Gentle"])
    } else {
        None
    }
}

/// Seeded name generator with a per-agent cache.
#[derive(Debug, Clone)]
pub struct NameGenerator {
    rng: SmallRng,
    cache: BTreeMap<AgentId, String>,
}

impl NameGenerator {
    /// Create a generator seeded for reproducible names.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            cache: BTreeMap::new(),
        }
    }

    /// Name for `agent`, generating and caching one on first request.
    pub fn name_for(&mut self, agent: &AgentId, breed: &str, personality: &Personality) -> String {
        if let Some(name) = self.cache.get(agent) {
            return name.clone();
        }
        let name = self.generate(breed, personality);
        self.cache.insert(agent.clone(), name.clone());
        name
    }

    /// Pin a caller-chosen name for `agent`.
    pub fn assign(&mut self, agent: &AgentId, name: String) {
        self.cache.insert(agent.clone(), name);
    }

    /// Drop the cached name of a removed agent.
    pub fn forget(&mut self, agent: &AgentId) {
        self.cache.remove(agent);
    }

    fn generate(&mut self, breed: &str, personality: &Personality) -> String {
        let mut pool = breed_pool(breed);
        if self.rng.random_bool(TRAIT_CHECK_CHANCE)
            && let Some(traits) = trait_pool(personality)
            && self.rng.random_bool(TRAIT_NAME_CHANCE)
        {
            pool = traits;
        }
        pool.choose(&mut self.rng)
            .copied()
            .unwrap_or("Whiskers")
            .to_owned()
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::build_profile;

    #[test]
    fn names_are_cached_per_agent() {
        let mut names = NameGenerator::new(42);
        let profile = build_profile("Siamese", None);
        let id = AgentId::from("cat_001");
        let first = names.name_for(&id, &profile.breed, &profile.personality);
        let second = names.name_for(&id, &profile.breed, &profile.personality);
        assert_eq!(first, second);
    }

    #[test]
    fn names_come_from_breed_or_trait_pool() {
        let mut names = NameGenerator::new(7);
        let profile = build_profile("Bengal", None);
        let traits = trait_pool(&profile.personality).unwrap_or(&[]);
        for n in 0..50 {
            let id = AgentId::new(format!("cat_{n:03}"));
            let name = names.name_for(&id, &profile.breed, &profile.personality);
            assert!(
                breed_pool("Bengal").contains(&name.as_str()) || traits.contains(&name.as_str()),
                "unexpected name {name}"
            );
        }
    }

    #[test]
    fn forget_allows_a_new_name() {
        let mut names = NameGenerator::new(1);
        let id = AgentId::from("cat_001");
        names.assign(&id, "Mochi".to_owned());
        let profile = build_profile("Tabby", None);
        assert_eq!(names.name_for(&id, &profile.breed, &profile.personality), "Mochi");
        names.forget(&id);
        assert_ne!(names.name_for(&id, &profile.breed, &profile.personality), "Mochi");
    }
}
