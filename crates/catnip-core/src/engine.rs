//! Decision & execution engine: one agent update per tick.
//!
//! Each update runs, in order:
//!
//! 1. **Held gate** -- an agent held by a human is frozen and skipped.
//! 2. **Grounding** -- the first update snaps the agent onto the ground.
//! 3. **Decay** -- needs and mood advance by the time since the last update.
//! 4. **Petting expiry** -- a closed stay-near window is cleared.
//! 5. **Decision** -- every `2 + 3 * (1 - curiosity)` seconds, except while
//!    purring, the action weights are recomputed and the strongest wins.
//! 6. **Execution** -- the current action's handler runs for one tick.
//!
//! The engine owns the randomness it uses (wander targets, decision noise,
//! personality overrides) as a seedable [`SmallRng`].

use catnip_agents::config::NeedsConfig;
use catnip_agents::error::AgentError;
use catnip_agents::memory::{BehaviorContext, SocialContext, TreeContext};
use catnip_agents::needs::apply_decay;
use catnip_agents::store::AgentStore;
use catnip_agents::world::snap_to_ground;
use catnip_types::{Action, ActionFamily, AgentId};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::debug;

use crate::behavior::{self, Behavior, petting};
use crate::config::BehaviorConfig;
use crate::decision::{self, Decision, PettingPull};
use crate::perception::{self, Environment};

/// What an update did to one agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The agent is held and was left untouched.
    Held,
    /// The agent was updated.
    Updated {
        /// Whether a decision was made this tick.
        decided: bool,
        /// Action after the update.
        action: Action,
    },
}

/// Runs agent updates.
#[derive(Debug, Clone)]
pub struct BehaviorEngine {
    behavior: BehaviorConfig,
    needs: NeedsConfig,
    rng: SmallRng,
}

impl BehaviorEngine {
    /// Create an engine whose randomness follows `seed`.
    pub fn new(behavior: BehaviorConfig, needs: NeedsConfig, seed: u64) -> Self {
        Self {
            behavior,
            needs,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Decision and movement tunables.
    pub const fn behavior_config(&self) -> &BehaviorConfig {
        &self.behavior
    }

    /// Update one agent for the tick at `env.now`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::AgentNotFound`] if the agent (or its memory) is
    /// not in the store, and [`AgentError::NonFinitePosition`] if the update
    /// left the agent at a non-finite position.
    pub fn update_agent(
        &mut self,
        store: &mut AgentStore,
        env: &Environment<'_>,
        id: &AgentId,
    ) -> Result<UpdateOutcome, AgentError> {
        let (agent, memory) = store
            .get_with_memory_mut(id)
            .ok_or_else(|| AgentError::AgentNotFound(id.clone()))?;

        // --- Held gate ---
        if agent.behavior.held_by.is_some() {
            return Ok(UpdateOutcome::Held);
        }

        // --- Grounding ---
        if !memory.grounded {
            agent.position = snap_to_ground(env.world, agent.position);
            memory.grounded = true;
        }

        // --- Decay ---
        apply_decay(agent, env.now, &self.needs);

        let mut b = Behavior {
            agent,
            memory,
            env: *env,
            config: &self.behavior,
            needs: &self.needs,
            rng: &mut self.rng,
        };

        // --- Petting expiry ---
        petting::expire(&mut b);

        // --- Decision ---
        let decided = decision_due(&b);
        if decided {
            let pull = petting_pull(&b);
            let perception = perception::perceive(
                b.agent,
                &b.env,
                b.config.human_search_radius,
                b.config.toy_use_window,
            );
            let decision = decision::decide(
                b.agent,
                &perception,
                pull.as_ref(),
                b.config.follow_distance,
                b.config.decision_noise,
                b.rng,
            );
            b.memory.last_decision_time = Some(b.now());
            apply_decision(&mut b, decision);
        }

        // --- Execution ---
        behavior::execute(&mut b);

        if !b.agent.position.is_finite() {
            return Err(AgentError::NonFinitePosition(id.clone()));
        }

        Ok(UpdateOutcome::Updated {
            decided,
            action: b.agent.behavior.current_action,
        })
    }
}

/// Whether the agent re-weights its actions this tick.
fn decision_due(b: &Behavior<'_>) -> bool {
    let now = b.now();
    if b.memory.petting.is_some_and(|p| p.is_purring(now)) {
        return false;
    }
    b.memory.last_decision_time.is_none_or(|last| {
        now - last >= decision::decision_interval(b.agent.profile.personality.curiosity)
    })
}

/// Pull of an open stay-near window whose human is still around.
fn petting_pull(b: &Behavior<'_>) -> Option<PettingPull> {
    let now = b.now();
    let petting = b.memory.petting.filter(|p| p.is_active(now))?;
    let position = b
        .env
        .world
        .resolve_human_avatar_position(petting.petted_by)?;
    Some(PettingPull {
        human: petting.petted_by,
        distance: b.agent.position.distance(position),
        remaining_fraction: petting.remaining_fraction(now),
    })
}

/// Make the decided action current, keeping the running context when the
/// decision did not change what the agent is doing.
fn apply_decision(b: &mut Behavior<'_>, decision: Decision) {
    let current = b.agent.behavior.current_action;
    let unchanged = decision.action == current
        && match decision.action.family() {
            ActionFamily::Social => b.memory.context.social_target() == decision.social_target,
            ActionFamily::Tree => b
                .tree_context()
                .zip(decision.tree.as_ref())
                .is_some_and(|(running, decided)| running.tree.id == decided.id),
            ActionFamily::Needs | ActionFamily::Reaction => true,
        };

    debug!(
        agent_id = %b.agent.id,
        action = ?decision.action,
        target = ?decision.social_target,
        unchanged,
        "Decision made"
    );

    if unchanged {
        return;
    }

    let context = match decision.action.family() {
        ActionFamily::Social => decision
            .social_target
            .map_or(BehaviorContext::None, |human| {
                BehaviorContext::Social(SocialContext::new(human))
            }),
        ActionFamily::Tree => decision
            .tree
            .map_or(BehaviorContext::None, |tree| {
                BehaviorContext::Tree(TreeContext {
                    tree,
                    phase_started_at: b.now(),
                })
            }),
        ActionFamily::Needs | ActionFamily::Reaction => BehaviorContext::None,
    };
    b.switch_to(decision.action, context);
}
