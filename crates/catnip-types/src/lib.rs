//! Shared type definitions for the Catnip simulation.
//!
//! This crate is the single source of truth for all types used across the
//! Catnip workspace. Snapshot types flow downstream to `TypeScript` via
//! `ts-rs` for the rendering client.
//!
//! # Modules
//!
//! - [`ids`] -- Identifier newtypes for agents, humans and trees
//! - [`enums`] -- Moods, the action vocabulary, tiers, interactions, tools
//! - [`structs`] -- Agent state, profiles and read-only snapshots
//!
//! Positions are [`glam::DVec3`]; `y` is up.

pub mod enums;
pub mod ids;
pub mod structs;

pub use glam::DVec3;

// Re-export all public types at crate root for convenience.
pub use enums::{
    Action, ActionFamily, Archetype, InteractionOutcome, InteractionType, Mood,
    RelationshipTier, ToolAction, ToolCategory, ToolId,
};
pub use ids::{AgentId, HumanId, TreeId};
pub use structs::{
    ActionData, Agent, AgentSnapshot, BehaviorState, BehaviorTraits, InteractionResult,
    MoodState, Personality, PhysicalState, PhysicalTraits, Preferences, Profile,
    RelationshipSnapshot, Timers, ToolUse,
};
