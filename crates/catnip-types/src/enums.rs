//! Enumeration types for the Catnip simulation.
//!
//! The action vocabulary, moods, relationship tiers, interaction kinds and
//! the tool catalog identifiers. Declaration order of [`Action`] is
//! significant: the decision engine breaks weight ties in favour of the
//! action declared first.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Mood
// ---------------------------------------------------------------------------

/// Emotional state of a cat.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum Mood {
    /// Content; the resting mood every other mood decays back to.
    #[default]
    Happy,
    /// Interested in the surroundings, explores more.
    Curious,
    /// Irritated, less receptive to interactions.
    Annoyed,
    /// Focused on finding food.
    Hungry,
    /// Wants to rest.
    Tired,
    /// Startled, looks for somewhere to hide.
    Afraid,
    /// Energetic and eager to play.
    Playful,
}

impl Mood {
    /// Every mood, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Happy,
        Self::Curious,
        Self::Annoyed,
        Self::Hungry,
        Self::Tired,
        Self::Afraid,
        Self::Playful,
    ];
}

// ---------------------------------------------------------------------------
// Action vocabulary
// ---------------------------------------------------------------------------

/// Every action a cat can perform.
///
/// The variants are grouped by [`ActionFamily`]. `Socialize` is never
/// produced by the weight table; it only exists so the personality override
/// rule that redirects it keeps a well-defined input.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum Action {
    // --- Needs and wandering ---
    /// Stand still.
    #[default]
    Idle,
    /// Wander to random points within exploration range.
    Explore,
    /// Wander looking for food; eats on arrival.
    SeekFood,
    /// Lie down and recover energy.
    SeekRest,
    /// Run around playfully.
    Play,
    /// Groom in place.
    Groom,

    // --- Social, aimed at a nearby human ---
    /// Walk after a trusted human.
    Follow,
    /// Watch a nearby human.
    LookAt,
    /// Meow at a nearby human.
    Meow,
    /// Roll over in front of a very trusted human.
    RollOver,

    // --- Tool driven ---
    /// Watch a toy the human is holding.
    LookAtToy,
    /// Chase a toy the human just used.
    PlayWithToy,
    /// Walk towards a human holding food.
    ApproachFood,
    /// Orbit a human holding food.
    CirclePlayer,
    /// Sit beside a human holding food and meow.
    SitAndMeow,

    // --- Cat tree ---
    /// Walk to the nearest cat tree.
    ApproachCatTree,
    /// Climb to the top platform of the tree.
    ClimbCatTree,
    /// Scratch the tree post.
    ScratchTree,
    /// Jump straight up onto the tree platform.
    JumpOnTree,
    /// Play on the tree.
    PlayOnTree,
    /// Rest on the top platform.
    RestOnCatTree,
    /// Sleep on the top platform.
    SleepOnTree,

    // --- Reactions ---
    /// Purr at the human who just petted the cat.
    Purr,
    /// Generic social intent, only reachable through external callers.
    Socialize,
}

/// Coarse grouping of [`Action`] variants used to pick the behavior context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionFamily {
    /// Needs, wandering and idling. No context.
    Needs,
    /// Behaviors aimed at a remembered human.
    Social,
    /// Behaviors keyed by a remembered cat tree.
    Tree,
    /// Reactions driven by the petting state machine.
    Reaction,
}

impl Action {
    /// Every action, in declaration (tie-break) order.
    pub const ALL: [Self; 24] = [
        Self::Idle,
        Self::Explore,
        Self::SeekFood,
        Self::SeekRest,
        Self::Play,
        Self::Groom,
        Self::Follow,
        Self::LookAt,
        Self::Meow,
        Self::RollOver,
        Self::LookAtToy,
        Self::PlayWithToy,
        Self::ApproachFood,
        Self::CirclePlayer,
        Self::SitAndMeow,
        Self::ApproachCatTree,
        Self::ClimbCatTree,
        Self::ScratchTree,
        Self::JumpOnTree,
        Self::PlayOnTree,
        Self::RestOnCatTree,
        Self::SleepOnTree,
        Self::Purr,
        Self::Socialize,
    ];

    /// The family this action belongs to.
    pub const fn family(self) -> ActionFamily {
        match self {
            Self::Follow
            | Self::LookAt
            | Self::Meow
            | Self::RollOver
            | Self::LookAtToy
            | Self::PlayWithToy
            | Self::ApproachFood
            | Self::CirclePlayer
            | Self::SitAndMeow => ActionFamily::Social,
            Self::ApproachCatTree
            | Self::ClimbCatTree
            | Self::ScratchTree
            | Self::JumpOnTree
            | Self::PlayOnTree
            | Self::RestOnCatTree
            | Self::SleepOnTree => ActionFamily::Tree,
            Self::Purr => ActionFamily::Reaction,
            Self::Idle
            | Self::Explore
            | Self::SeekFood
            | Self::SeekRest
            | Self::Play
            | Self::Groom
            | Self::Socialize => ActionFamily::Needs,
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

// ---------------------------------------------------------------------------
// Archetypes
// ---------------------------------------------------------------------------

/// Named personality template a profile is built from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum Archetype {
    /// Sociable and playful.
    Friendly,
    /// Keeps its distance, patrols a wide area.
    Independent,
    /// Very curious, fairly friendly.
    Calico,
    /// Very playful and vocal.
    Siamese,
}

impl Archetype {
    /// Parse an archetype from its display name (case-sensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Friendly" => Some(Self::Friendly),
            "Independent" => Some(Self::Independent),
            "Calico" => Some(Self::Calico),
            "Siamese" => Some(Self::Siamese),
            _ => None,
        }
    }

    /// Display name, also used as the profile breed tag.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Friendly => "Friendly",
            Self::Independent => "Independent",
            Self::Calico => "Calico",
            Self::Siamese => "Siamese",
        }
    }
}

// ---------------------------------------------------------------------------
// Relationships
// ---------------------------------------------------------------------------

/// Tier derived from a relationship score.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum RelationshipTier {
    /// Score below 20.
    Strangers,
    /// Score 20 or more. Also the tier of a fresh relationship.
    #[default]
    Neutral,
    /// Score 40 or more.
    Acquaintances,
    /// Score 60 or more.
    Friends,
    /// Score 75 or more.
    #[serde(rename = "Close Friends")]
    CloseFriends,
    /// Score 90 or more.
    #[serde(rename = "Best Friends")]
    BestFriends,
}

impl RelationshipTier {
    /// Map a score in `[0, 100]` to its tier.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::BestFriends
        } else if score >= 75.0 {
            Self::CloseFriends
        } else if score >= 60.0 {
            Self::Friends
        } else if score >= 40.0 {
            Self::Acquaintances
        } else if score >= 20.0 {
            Self::Neutral
        } else {
            Self::Strangers
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Strangers => "Strangers",
            Self::Neutral => "Neutral",
            Self::Acquaintances => "Acquaintances",
            Self::Friends => "Friends",
            Self::CloseFriends => "Close Friends",
            Self::BestFriends => "Best Friends",
        }
    }
}

impl core::fmt::Display for RelationshipTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Interactions
// ---------------------------------------------------------------------------

/// A direct interaction a human can start with a cat.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum InteractionType {
    /// Stroke the cat.
    Pet,
    /// Hand the cat food.
    Feed,
    /// Pick the cat up. A second Hold by the same human puts it down.
    Hold,
    /// Play with the cat.
    Play,
}

impl InteractionType {
    /// Parse an interaction type from its wire name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Pet" => Some(Self::Pet),
            "Feed" => Some(Self::Feed),
            "Hold" => Some(Self::Hold),
            "Play" => Some(Self::Play),
            _ => None,
        }
    }
}

/// Whether a recorded interaction went well for the cat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum InteractionOutcome {
    /// The interaction succeeded.
    Positive,
    /// The cat was not interested.
    Negative,
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

/// Identifier of a tool from the tool catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum ToolId {
    /// Dry food.
    BasicFood,
    /// Ball and feather.
    BasicToys,
    /// Tuna and salmon treats.
    PremiumFood,
    /// Laser pointer and string.
    PremiumToys,
    /// Brush.
    GroomingTools,
    /// First aid kit.
    MedicalItems,
}

impl ToolId {
    /// Every catalog tool.
    pub const ALL: [Self; 6] = [
        Self::BasicFood,
        Self::BasicToys,
        Self::PremiumFood,
        Self::PremiumToys,
        Self::GroomingTools,
        Self::MedicalItems,
    ];

    /// Parse a tool from its catalog id (`basicFood`, `premiumToys`, ...).
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == id)
    }

    /// Catalog id.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BasicFood => "basicFood",
            Self::BasicToys => "basicToys",
            Self::PremiumFood => "premiumFood",
            Self::PremiumToys => "premiumToys",
            Self::GroomingTools => "groomingTools",
            Self::MedicalItems => "medicalItems",
        }
    }
}

impl core::fmt::Display for ToolId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse category of a tool.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ToolCategory {
    /// Something edible.
    Food,
    /// Something to play with.
    Toy,
    /// Grooming equipment.
    Grooming,
    /// Medical supplies.
    Medical,
}

/// The action a tool performs when used, keyed for per-action cooldowns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum ToolAction {
    /// Feeding.
    Feed,
    /// Playing.
    Play,
    /// Grooming.
    Groom,
    /// Healing.
    Heal,
}
