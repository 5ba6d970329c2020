//! Error types for the catnip-agents crate.
//!
//! Lookups and registry operations return typed errors rather than
//! panicking. Interaction policy rejections are not errors; see
//! [`InteractionRejection`](crate::interaction::InteractionRejection).

use catnip_types::{AgentId, HumanId, ToolAction, ToolId};

/// Errors raised by the agent store.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Agent with the given ID was not found in the store.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// An update left the agent at a non-finite position.
    #[error("agent {0} has a non-finite position")]
    NonFinitePosition(AgentId),
}

/// Errors raised by the human context registry.
///
/// The `Display` strings of [`HumanError::NotFound`] and
/// [`HumanError::ToolNotUnlocked`] are stable and shown to players.
#[derive(Debug, thiserror::Error)]
pub enum HumanError {
    /// The human is not registered.
    #[error("Player not found")]
    NotFound(HumanId),

    /// The human tried to equip a tool they have not unlocked.
    #[error("Tool not unlocked")]
    ToolNotUnlocked(ToolId),

    /// The human tried to use a tool without one equipped.
    #[error("No tool equipped")]
    NoToolEquipped(HumanId),

    /// The tool's action is still cooling down.
    #[error("{action:?} is on cooldown for another {remaining:.1}s")]
    ToolOnCooldown {
        /// The cooling-down action.
        action: ToolAction,
        /// Seconds left on the cooldown.
        remaining: f64,
    },
}
