//! Profile factory: archetype templates, breeds and caller overrides.
//!
//! A profile is built by deep-merging three layers per category
//! (personality, preferences, behavior, physical):
//!
//! 1. the base template,
//! 2. the archetype's partial overrides,
//! 3. caller-supplied overrides.
//!
//! Unknown archetype names fall back to the base template. Building is pure
//! and safe to call from anywhere.

use catnip_types::{Archetype, BehaviorTraits, Personality, PhysicalTraits, Preferences, Profile};
use serde::Deserialize;

/// Breed tag of a profile built from an unknown archetype.
pub const DEFAULT_BREED: &str = "Default";

/// Display breeds and the archetype each one plays like.
pub const BREEDS: [(&str, Archetype); 7] = [
    ("Tabby", Archetype::Friendly),
    ("Black Cat", Archetype::Independent),
    ("Calico", Archetype::Calico),
    ("Siamese", Archetype::Siamese),
    ("Maine Coon", Archetype::Friendly),
    ("Persian", Archetype::Independent),
    ("Bengal", Archetype::Siamese),
];

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

/// Partial personality; `None` keeps the underlying value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PersonalityOverrides {
    /// Curiosity override.
    pub curiosity: Option<f64>,
    /// Friendliness override.
    pub friendliness: Option<f64>,
    /// Aggression override.
    pub aggression: Option<f64>,
    /// Playfulness override.
    pub playfulness: Option<f64>,
    /// Independence override.
    pub independence: Option<f64>,
    /// Shyness override.
    pub shyness: Option<f64>,
}

/// Partial preferences; `None` keeps the underlying list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PreferenceOverrides {
    /// Favorite foods override.
    pub favorite_foods: Option<Vec<String>>,
    /// Favorite toys override.
    pub favorite_toys: Option<Vec<String>>,
    /// Disliked items override.
    pub disliked_items: Option<Vec<String>>,
    /// Resting spots override.
    pub preferred_resting_spots: Option<Vec<String>>,
}

/// Partial behavior traits; `None` keeps the underlying value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BehaviorOverrides {
    /// Sleep schedule override.
    pub sleep_schedule: Option<(u8, u8)>,
    /// Exploration range override.
    pub exploration_range: Option<f64>,
    /// Social distance override.
    pub social_distance: Option<f64>,
    /// Patrol frequency override.
    pub patrol_frequency: Option<f64>,
    /// Grooming frequency override.
    pub grooming_frequency: Option<f64>,
}

/// Partial physical traits; `None` keeps the underlying value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicalOverrides {
    /// Movement speed override.
    pub movement_speed: Option<f64>,
    /// Jump height override.
    pub jump_height: Option<f64>,
    /// Climb ability override.
    pub climb_ability: Option<f64>,
    /// Max energy override.
    pub max_energy: Option<f64>,
    /// Max hunger override.
    pub max_hunger: Option<f64>,
}

/// Partial profile merged category by category over a template.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProfileOverrides {
    /// Personality layer.
    pub personality: PersonalityOverrides,
    /// Preferences layer.
    pub preferences: PreferenceOverrides,
    /// Behavior layer.
    pub behavior: BehaviorOverrides,
    /// Physical layer.
    pub physical: PhysicalOverrides,
}

fn merge<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

fn merge_list(target: &mut Vec<String>, value: Option<&Vec<String>>) {
    if let Some(v) = value {
        target.clone_from(v);
    }
}

impl ProfileOverrides {
    /// Apply every present field onto `profile`.
    pub fn apply(&self, profile: &mut Profile) {
        let p = &mut profile.personality;
        merge(&mut p.curiosity, self.personality.curiosity);
        merge(&mut p.friendliness, self.personality.friendliness);
        merge(&mut p.aggression, self.personality.aggression);
        merge(&mut p.playfulness, self.personality.playfulness);
        merge(&mut p.independence, self.personality.independence);
        merge(&mut p.shyness, self.personality.shyness);

        let prefs = &mut profile.preferences;
        merge_list(&mut prefs.favorite_foods, self.preferences.favorite_foods.as_ref());
        merge_list(&mut prefs.favorite_toys, self.preferences.favorite_toys.as_ref());
        merge_list(&mut prefs.disliked_items, self.preferences.disliked_items.as_ref());
        merge_list(
            &mut prefs.preferred_resting_spots,
            self.preferences.preferred_resting_spots.as_ref(),
        );

        let b = &mut profile.behavior;
        merge(&mut b.sleep_schedule, self.behavior.sleep_schedule);
        merge(&mut b.exploration_range, self.behavior.exploration_range);
        merge(&mut b.social_distance, self.behavior.social_distance);
        merge(&mut b.patrol_frequency, self.behavior.patrol_frequency);
        merge(&mut b.grooming_frequency, self.behavior.grooming_frequency);

        let ph = &mut profile.physical;
        merge(&mut ph.movement_speed, self.physical.movement_speed);
        merge(&mut ph.jump_height, self.physical.jump_height);
        merge(&mut ph.climb_ability, self.physical.climb_ability);
        merge(&mut ph.max_energy, self.physical.max_energy);
        merge(&mut ph.max_hunger, self.physical.max_hunger);
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

/// The base template every profile starts from.
pub fn base_profile() -> Profile {
    Profile {
        breed: DEFAULT_BREED.to_owned(),
        personality: Personality {
            curiosity: 0.5,
            friendliness: 0.5,
            aggression: 0.1,
            playfulness: 0.5,
            independence: 0.5,
            shyness: 0.3,
        },
        preferences: Preferences {
            favorite_foods: strings(&["fish", "chicken"]),
            favorite_toys: strings(&["ball", "feather"]),
            disliked_items: strings(&["water", "loud_noises"]),
            preferred_resting_spots: strings(&["sunny_spots", "high_places"]),
        },
        behavior: BehaviorTraits {
            sleep_schedule: (22, 6),
            exploration_range: 50.0,
            social_distance: 10.0,
            patrol_frequency: 0.3,
            grooming_frequency: 0.7,
        },
        physical: PhysicalTraits {
            movement_speed: 16.0,
            jump_height: 8.0,
            climb_ability: 0.8,
            max_energy: 100.0,
            max_hunger: 100.0,
        },
    }
}

/// The partial overrides that define an archetype.
pub fn archetype_overrides(archetype: Archetype) -> ProfileOverrides {
    let personality = |c, f, a, p, i, s| PersonalityOverrides {
        curiosity: Some(c),
        friendliness: Some(f),
        aggression: Some(a),
        playfulness: Some(p),
        independence: Some(i),
        shyness: Some(s),
    };

    match archetype {
        Archetype::Friendly => ProfileOverrides {
            personality: personality(0.7, 0.9, 0.05, 0.8, 0.5, 0.3),
            preferences: PreferenceOverrides {
                favorite_foods: Some(strings(&["tuna", "salmon"])),
                favorite_toys: Some(strings(&["laser_pointer", "string"])),
                ..PreferenceOverrides::default()
            },
            ..ProfileOverrides::default()
        },
        Archetype::Independent => ProfileOverrides {
            personality: personality(0.6, 0.3, 0.1, 0.5, 0.9, 0.4),
            behavior: BehaviorOverrides {
                social_distance: Some(20.0),
                patrol_frequency: Some(0.7),
                ..BehaviorOverrides::default()
            },
            ..ProfileOverrides::default()
        },
        Archetype::Calico => ProfileOverrides {
            personality: personality(0.9, 0.7, 0.1, 0.6, 0.4, 0.2),
            ..ProfileOverrides::default()
        },
        Archetype::Siamese => ProfileOverrides {
            personality: personality(0.5, 0.8, 0.2, 0.9, 0.3, 0.1),
            ..ProfileOverrides::default()
        },
    }
}

/// Resolve an archetype or display-breed name to an archetype.
pub fn resolve_archetype(name: &str) -> Option<Archetype> {
    Archetype::parse(name).or_else(|| {
        BREEDS
            .iter()
            .find(|(breed, _)| *breed == name)
            .map(|(_, archetype)| *archetype)
    })
}

/// Build a profile from an archetype (or breed) name plus optional overrides.
///
/// The breed tag is the given name when it resolves, otherwise
/// [`DEFAULT_BREED`].
pub fn build_profile(name: &str, overrides: Option<&ProfileOverrides>) -> Profile {
    let mut profile = base_profile();

    if let Some(archetype) = resolve_archetype(name) {
        archetype_overrides(archetype).apply(&mut profile);
        name.clone_into(&mut profile.breed);
    }

    if let Some(extra) = overrides {
        extra.apply(&mut profile);
    }

    profile
}

/// Render model for a breed tag.
pub fn render_model(breed: &str) -> &'static str {
    match resolve_archetype(breed) {
        Some(Archetype::Independent) => "GreyStripes",
        Some(Archetype::Calico) => "Jerald",
        Some(Archetype::Siamese) => "Siamese",
        Some(Archetype::Friendly) | None => "Petra",
    }
}
