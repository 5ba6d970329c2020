//! Agent state, profiles, relationships and interactions for the Catnip
//! simulation.
//!
//! This crate is the logic layer for cats and the humans around them --
//! everything that operates on agent state without owning a clock or a
//! scheduler. It sits between `catnip-types` (the data structures) and
//! `catnip-core` (the per-tick behavior engine and the runner).
//!
//! # Modules
//!
//! - [`config`] -- Tunables for needs decay and interactions
//! - [`error`] -- Error types ([`AgentError`], [`HumanError`])
//! - [`humans`] -- Per-human tool, cooldown and settings registry
//! - [`interaction`] -- Pet/Feed/Hold/Play resolution ([`InteractionMediator`])
//! - [`memory`] -- Per-agent decision memory and the petting reaction
//! - [`mood`] -- Mood effects table and mood transitions
//! - [`names`] -- Breed- and personality-flavored display names
//! - [`needs`] -- Time-based decay of the four needs
//! - [`profile`] -- Base profile, archetypes, breeds and render models
//! - [`relationship`] -- Trust, score, tier and interaction history
//! - [`store`] -- The canonical agent store ([`AgentStore`])
//! - [`tools`] -- Tool catalog and item-name classification
//! - [`world`] -- The world query seam and an in-memory world

pub mod config;
pub mod error;
pub mod humans;
pub mod interaction;
pub mod memory;
pub mod mood;
pub mod names;
pub mod needs;
pub mod profile;
pub mod relationship;
pub mod store;
pub mod tools;
pub mod world;

// Re-export primary types at crate root for convenience.
pub use config::{InteractionConfig, NeedsConfig};
pub use error::{AgentError, HumanError};
pub use humans::{HumanContext, HumanContextRegistry, HumanSettings, SettingsPatch};
pub use interaction::{
    InteractionData, InteractionMediator, InteractionRejection, InteractionTargets,
    interaction_effect, success_chance,
};
pub use memory::{AiMemory, BehaviorContext, PettingReaction, SocialContext, TreeContext};
pub use mood::{MoodEffect, mood_effect, needs_mood, set_mood};
pub use needs::{NeedsDelta, adjust_needs, apply_decay, update_physical};
pub use profile::{ProfileOverrides, build_profile, render_model};
pub use relationship::{InteractionRecord, Relationship, RelationshipLedger};
pub use store::AgentStore;
pub use tools::{ToolConfig, infer_tool_from_item_name, tool_config};
pub use world::{CatTree, HumanPresence, StaticWorld, WorldQuery, snap_to_ground};
