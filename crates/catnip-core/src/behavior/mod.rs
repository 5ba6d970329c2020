//! Action execution: one handler per action, run every tick.
//!
//! Handlers advance the agent's current action by one tick: move toward a
//! target, apply need deltas and decide when the action's own
//! sub-state-machine moves on. A referenced human or tree that can no
//! longer be resolved makes the handler fall back to `Idle`.
//!
//! # Modules
//!
//! - [`movement`] -- Straight-line stepping and wander targets
//! - [`needs`] -- Idle, wandering and self-care actions
//! - [`social`] -- Actions aimed at a remembered human
//! - [`tree`] -- The cat-tree sub-state-machine
//! - [`petting`] -- Purring and the stay-near window after a pet

pub mod movement;
pub mod needs;
pub mod petting;
pub mod social;
pub mod tree;

use catnip_agents::config::NeedsConfig;
use catnip_agents::memory::{AiMemory, BehaviorContext, SocialContext, TreeContext};
use catnip_agents::mood::mood_effect;
use catnip_agents::needs::{NeedsDelta, update_physical};
use catnip_types::{Action, Agent, DVec3, HumanId};
use rand::rngs::SmallRng;
use tracing::debug;

use crate::config::BehaviorConfig;
use crate::perception::Environment;

/// Everything a handler may read or change for one agent on one tick.
pub struct Behavior<'a> {
    /// The agent being updated.
    pub agent: &'a mut Agent,
    /// Its decision memory.
    pub memory: &'a mut AiMemory,
    /// Read-only world state.
    pub env: Environment<'a>,
    /// Decision and movement tunables.
    pub config: &'a BehaviorConfig,
    /// Needs tunables.
    pub needs: &'a NeedsConfig,
    /// Engine randomness.
    pub rng: &'a mut SmallRng,
}

impl Behavior<'_> {
    /// Current simulated time.
    pub const fn now(&self) -> f64 {
        self.env.now
    }

    /// Switch to `action` with a fresh context. Clears movement.
    pub fn switch_to(&mut self, action: Action, context: BehaviorContext) {
        let previous = self.agent.behavior.current_action;
        self.agent.behavior.action_data.reacting_to = context.social_target();
        self.agent.behavior.current_action = action;
        self.agent.behavior.is_moving = false;
        self.agent.behavior.target_position = None;
        self.memory.current_goal = action;
        self.memory.context = context;
        if previous != action {
            debug!(
                agent_id = %self.agent.id,
                from = ?previous,
                to = ?action,
                "Action transition"
            );
        }
    }

    /// Fall back to `Idle`.
    pub fn go_idle(&mut self) {
        self.switch_to(Action::Idle, BehaviorContext::None);
    }

    /// Switch to another social action aimed at the same human.
    pub fn switch_social(&mut self, action: Action, human: HumanId) {
        self.switch_to(action, BehaviorContext::Social(SocialContext::new(human)));
    }

    /// Enter a tree phase, restarting its timer.
    pub fn enter_tree_phase(&mut self, action: Action, tree: TreeContext) {
        let context = TreeContext {
            phase_started_at: self.now(),
            ..tree
        };
        self.switch_to(action, BehaviorContext::Tree(context));
    }

    /// The remembered social target and its avatar position, if it still
    /// resolves.
    pub fn resolve_social_target(&self) -> Option<(HumanId, DVec3)> {
        let human = self.memory.context.social_target()?;
        let position = self.env.world.resolve_human_avatar_position(human)?;
        Some((human, position))
    }

    /// The remembered tree context, if the current behavior has one.
    pub fn tree_context(&self) -> Option<TreeContext> {
        match &self.memory.context {
            BehaviorContext::Tree(tree) => Some(tree.clone()),
            BehaviorContext::None | BehaviorContext::Social(_) => None,
        }
    }

    /// The social context, mutably.
    pub const fn social_context_mut(&mut self) -> Option<&mut SocialContext> {
        match &mut self.memory.context {
            BehaviorContext::Social(social) => Some(social),
            BehaviorContext::None | BehaviorContext::Tree(_) => None,
        }
    }

    /// Stand still facing `point`.
    pub const fn face(&mut self, point: DVec3) {
        self.agent.behavior.is_moving = false;
        self.agent.behavior.target_position = Some(point);
    }

    /// Stand still with no target.
    pub const fn stand(&mut self) {
        self.agent.behavior.is_moving = false;
        self.agent.behavior.target_position = None;
    }

    /// Apply a needs delta, clamped. A need left low sets Hungry or Tired.
    pub fn adjust(&mut self, delta: NeedsDelta) {
        if let Some(mood) = update_physical(self.agent, delta, self.rng) {
            debug!(agent_id = %self.agent.id, ?mood, "Needs set mood");
        }
    }

    /// Distance covered per tick at `factor` of the agent's movement speed,
    /// scaled by the current mood.
    pub fn step_length(&self, factor: f64) -> f64 {
        self.agent.profile.physical.movement_speed
            * factor
            * mood_effect(self.agent.mood.mood).movement_multiplier
    }
}

/// A per-action tick handler.
pub type Handler = fn(&mut Behavior<'_>);

/// Handler table: the handler that runs `action`.
pub const fn handler_for(action: Action) -> Handler {
    match action {
        Action::Idle => needs::idle,
        Action::Explore => needs::explore,
        Action::SeekFood => needs::seek_food,
        Action::SeekRest => needs::seek_rest,
        Action::Play => needs::play,
        Action::Groom => needs::groom,
        Action::Follow => social::follow,
        Action::LookAt => social::look_at,
        Action::Meow => social::meow,
        Action::RollOver => social::roll_over,
        Action::LookAtToy => social::look_at_toy,
        Action::PlayWithToy => social::play_with_toy,
        Action::ApproachFood => social::approach_food,
        Action::CirclePlayer => social::circle_player,
        Action::SitAndMeow => social::sit_and_meow,
        Action::ApproachCatTree => tree::approach,
        Action::ClimbCatTree => tree::climb,
        Action::ScratchTree => tree::scratch,
        Action::JumpOnTree => tree::jump,
        Action::PlayOnTree => tree::play,
        Action::RestOnCatTree => tree::rest,
        Action::SleepOnTree => tree::sleep,
        Action::Purr => petting::purr,
        // Reachable only through external callers; nothing to execute.
        Action::Socialize => needs::socialize,
    }
}

/// Run the current action's handler for one tick.
pub fn execute(behavior: &mut Behavior<'_>) {
    let handler = handler_for(behavior.agent.behavior.current_action);
    handler(behavior);
}
