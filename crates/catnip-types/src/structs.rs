//! Core entity structs for the Catnip simulation.
//!
//! The [`Agent`] record is the canonical mutable state of one cat. The
//! snapshot types at the bottom of this module are the read-only
//! projections handed to rendering and UI consumers.

use std::collections::BTreeMap;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Action, InteractionType, Mood, RelationshipTier, ToolId};
use crate::ids::{AgentId, HumanId};

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Personality traits, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Personality {
    /// Drive to explore; also shortens the decision interval.
    pub curiosity: f64,
    /// Willingness to be petted and held.
    pub friendliness: f64,
    /// Tendency to lash out.
    pub aggression: f64,
    /// Appetite for play.
    pub playfulness: f64,
    /// Preference for doing its own thing.
    pub independence: f64,
    /// Reluctance to approach humans.
    pub shyness: f64,
}

/// Likes and dislikes. Carried for consumers, not read by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Preferences {
    /// Preferred foods.
    pub favorite_foods: Vec<String>,
    /// Preferred toys.
    pub favorite_toys: Vec<String>,
    /// Things the cat avoids.
    pub disliked_items: Vec<String>,
    /// Places the cat likes to rest.
    pub preferred_resting_spots: Vec<String>,
}

/// Behavioral tendencies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BehaviorTraits {
    /// Hours (start, end) the cat prefers to sleep.
    pub sleep_schedule: (u8, u8),
    /// Radius of wander targets and tree approach.
    pub exploration_range: f64,
    /// Distance the cat likes to keep from others.
    pub social_distance: f64,
    /// How often the cat patrols its territory.
    pub patrol_frequency: f64,
    /// How often the cat grooms.
    pub grooming_frequency: f64,
}

/// Physical capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PhysicalTraits {
    /// Base movement speed in units per second of travel.
    pub movement_speed: f64,
    /// Jump height.
    pub jump_height: f64,
    /// Climbing skill in `[0, 1]`.
    pub climb_ability: f64,
    /// Energy ceiling.
    pub max_energy: f64,
    /// Hunger ceiling.
    pub max_hunger: f64,
}

/// Immutable profile of a cat, built once at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Profile {
    /// Breed tag used for model selection by the renderer.
    pub breed: String,
    /// Personality traits.
    pub personality: Personality,
    /// Likes and dislikes.
    pub preferences: Preferences,
    /// Behavioral tendencies.
    pub behavior: BehaviorTraits,
    /// Physical capabilities.
    pub physical: PhysicalTraits,
}

// ---------------------------------------------------------------------------
// Mutable agent state
// ---------------------------------------------------------------------------

/// Current mood with its intensity and remaining duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MoodState {
    /// Current mood.
    pub mood: Mood,
    /// Intensity in `[0, 1]`.
    pub intensity: f64,
    /// Seconds until the mood reverts to Happy. Zero means no countdown.
    pub remaining: f64,
}

impl Default for MoodState {
    fn default() -> Self {
        Self {
            mood: Mood::Happy,
            intensity: 0.5,
            remaining: 0.0,
        }
    }
}

/// Physical needs, each clamped to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PhysicalState {
    /// Rises over time. 100 is starving.
    pub hunger: f64,
    /// Falls over time, faster while moving.
    pub energy: f64,
    /// Overall health.
    pub health: f64,
    /// Coat condition. Rises while grooming.
    pub grooming: f64,
}

impl Default for PhysicalState {
    fn default() -> Self {
        Self {
            hunger: 50.0,
            energy: 100.0,
            health: 100.0,
            grooming: 80.0,
        }
    }
}

/// Per-action data for renderers (e.g. which human to turn towards).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ActionData {
    /// Human the cat is visibly reacting to.
    pub reacting_to: Option<HumanId>,
}

/// What the cat is doing right now.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BehaviorState {
    /// Current action.
    pub current_action: Action,
    /// Movement target or look-at point.
    #[ts(as = "Option<[f64; 3]>")]
    pub target_position: Option<DVec3>,
    /// Whether the cat is walking towards `target_position`.
    pub is_moving: bool,
    /// Human currently holding the cat, if any.
    pub held_by: Option<HumanId>,
    /// Per-action renderer hints.
    pub action_data: ActionData,
}

/// Timestamps used for decay bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Timers {
    /// Simulated time of the last decay application, in seconds.
    pub last_update: f64,
}

/// Cached copy of a relationship for one human, kept on the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RelationshipSnapshot {
    /// Trust in `[0, 1]`.
    pub trust_level: f64,
    /// Derived score in `[0, 100]`.
    pub relationship_score: f64,
    /// Tier derived from the score.
    pub tier: RelationshipTier,
    /// Simulated time of the last trust change, if any.
    pub last_interaction: Option<f64>,
    /// Number of entries in the interaction history.
    pub interaction_count: u32,
    /// Up to three most frequent successful interaction types.
    pub favorite_activities: Vec<InteractionType>,
}

/// Canonical state of one simulated cat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Agent {
    /// Unique, immutable identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Immutable profile.
    pub profile: Profile,
    /// Current location.
    #[ts(as = "[f64; 3]")]
    pub position: DVec3,
    /// Current mood.
    pub mood: MoodState,
    /// Physical needs.
    pub physical: PhysicalState,
    /// Current behavior.
    pub behavior: BehaviorState,
    /// Relationship snapshots keyed by human.
    pub social: BTreeMap<HumanId, RelationshipSnapshot>,
    /// Decay bookkeeping.
    pub timers: Timers,
}

// ---------------------------------------------------------------------------
// Human-facing records
// ---------------------------------------------------------------------------

/// The most recent use of a tool by a human.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ToolUse {
    /// Tool that was used.
    pub tool: ToolId,
    /// Where it was used, if known.
    #[ts(as = "Option<[f64; 3]>")]
    pub position: Option<DVec3>,
    /// Simulated time of the use.
    pub timestamp: f64,
}

/// Result of a direct interaction request.
///
/// Rejections and failed rolls are reported here, never as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct InteractionResult {
    /// Whether the interaction took effect.
    pub success: bool,
    /// Stable message consumers may match on.
    pub message: String,
    /// The parsed interaction type, if it was recognized.
    pub interaction_type: Option<InteractionType>,
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Read-only projection of an agent for rendering and UI.
///
/// Carries only the requesting human's own relationship, never anyone
/// else's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AgentSnapshot {
    /// Agent id.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Breed tag.
    pub breed: String,
    /// Render model name derived from the breed.
    pub model: String,
    /// Current location.
    #[ts(as = "[f64; 3]")]
    pub position: DVec3,
    /// Current mood.
    pub mood: MoodState,
    /// Current action.
    pub current_action: Action,
    /// Movement target or look-at point.
    #[ts(as = "Option<[f64; 3]>")]
    pub target_position: Option<DVec3>,
    /// Whether the cat is walking.
    pub is_moving: bool,
    /// Human currently holding the cat.
    pub held_by: Option<HumanId>,
    /// Human the cat is reacting to.
    pub reacting_to: Option<HumanId>,
    /// Public personality traits.
    pub personality: Personality,
    /// The requesting human's relationship with this cat, if any.
    pub relationship: Option<RelationshipSnapshot>,
}
