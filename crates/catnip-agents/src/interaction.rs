//! Interaction mediator: resolves direct human interactions with a cat.
//!
//! # Order of checks
//!
//! 1. Per-(human, agent, type) cooldown
//! 2. Agent exists
//! 3. Hold by the current holder releases the cat (no roll, no cooldown)
//! 4. Held by someone else rejects
//! 5. Unknown interaction type rejects
//! 6. Success roll against trust, mood and personality
//!
//! Every rejection comes back as an unsuccessful [`InteractionResult`] with a
//! stable message; nothing here returns an error.

use std::collections::BTreeMap;

use catnip_types::{
    Action, ActionData, AgentId, DVec3, HumanId, InteractionOutcome, InteractionResult, InteractionType,
    Mood, Personality,
};
use rand::Rng;
use tracing::{debug, info};

use crate::config::InteractionConfig;
use crate::memory::{BehaviorContext, PettingReaction};
use crate::mood::{mood_effect, set_mood};
use crate::needs::{NeedsDelta, update_physical};
use crate::relationship::{InteractionRecord, RelationshipLedger};
use crate::store::AgentStore;
use crate::world::{WorldQuery, snap_to_ground};

/// Message of a successful roll.
pub const MSG_SUCCESS: &str = "Interaction successful!";

/// Message of a failed roll.
pub const MSG_FAILED: &str = "Interaction failed - cat was not interested";

/// Message of a hold toggle that put the cat down.
pub const MSG_RELEASED: &str = "Released cat";

/// Mood intensity applied by a successful interaction.
const SUCCESS_MOOD_INTENSITY: f64 = 0.7;

/// Mood intensity of the annoyance a failed interaction may cause.
const ANNOYED_INTENSITY: f64 = 0.4;

/// Bounds of the success chance.
const MIN_CHANCE: f64 = 0.1;
const MAX_CHANCE: f64 = 0.95;

/// Why an interaction was refused before rolling.
///
/// `Display` yields the stable message consumers match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InteractionRejection {
    /// The same human used the same interaction on this cat too recently.
    #[error("Interaction on cooldown")]
    OnCooldown,
    /// No such cat.
    #[error("Cat not found")]
    AgentNotFound,
    /// Another human is holding the cat.
    #[error("Cat is already being held")]
    AlreadyHeld,
    /// The interaction type is not in the effect table.
    #[error("Invalid interaction type")]
    InvalidType,
}

/// Effect table entry of an interaction type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionEffect {
    /// Trust change on success.
    pub relationship_change: f64,
    /// Mood set on success.
    pub mood: Mood,
    /// Hunger removed on success.
    pub hunger_reduction: Option<f64>,
    /// Energy spent on success.
    pub energy_cost: Option<f64>,
    /// Base success chance.
    pub success_chance: f64,
}

/// Look up an interaction type's effects.
pub const fn interaction_effect(kind: InteractionType) -> InteractionEffect {
    match kind {
        InteractionType::Pet => InteractionEffect {
            relationship_change: 0.1,
            mood: Mood::Happy,
            hunger_reduction: None,
            energy_cost: Some(5.0),
            success_chance: 0.8,
        },
        InteractionType::Feed => InteractionEffect {
            relationship_change: 0.3,
            mood: Mood::Happy,
            hunger_reduction: Some(30.0),
            energy_cost: None,
            success_chance: 0.95,
        },
        InteractionType::Hold => InteractionEffect {
            relationship_change: 0.05,
            mood: Mood::Happy,
            hunger_reduction: None,
            energy_cost: Some(2.0),
            success_chance: 0.4,
        },
        InteractionType::Play => InteractionEffect {
            relationship_change: 0.2,
            mood: Mood::Playful,
            hunger_reduction: None,
            energy_cost: Some(15.0),
            success_chance: 0.7,
        },
    }
}

/// Personality factor of the success chance.
fn personality_modifier(kind: InteractionType, personality: &Personality) -> f64 {
    match kind {
        InteractionType::Pet => personality.friendliness,
        InteractionType::Play => personality.playfulness,
        InteractionType::Hold => (personality.friendliness + (1.0 - personality.shyness)) / 2.0,
        InteractionType::Feed => 1.0,
    }
}

/// Success chance of an interaction, clamped to `[0.1, 0.95]`.
pub fn success_chance(
    kind: InteractionType,
    trust: f64,
    mood: Mood,
    personality: &Personality,
) -> f64 {
    let base = interaction_effect(kind).success_chance;
    let mood_modifier = mood_effect(mood).interaction_modifier();
    (base * (0.5 + trust) * mood_modifier * personality_modifier(kind, personality))
        .clamp(MIN_CHANCE, MAX_CHANCE)
}

/// Optional payload of an interaction request.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InteractionData {
    /// Where to put the cat down when a hold is released.
    pub drop_position: Option<DVec3>,
}

/// Mutable state an interaction touches.
pub struct InteractionTargets<'a> {
    /// Cats.
    pub store: &'a mut AgentStore,
    /// Relationships.
    pub ledger: &'a mut RelationshipLedger,
    /// World queries (ground, avatars).
    pub world: &'a dyn WorldQuery,
}

type CooldownKey = (HumanId, AgentId, InteractionType);

/// Resolves interactions and owns their cooldowns.
#[derive(Debug, Clone, Default)]
pub struct InteractionMediator {
    config: InteractionConfig,
    cooldowns: BTreeMap<CooldownKey, f64>,
}

impl InteractionMediator {
    /// Create a mediator with the given rules.
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            cooldowns: BTreeMap::new(),
        }
    }

    /// The rules in effect.
    pub const fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Whether an interaction type is cooling down for a pair.
    pub fn is_on_cooldown(
        &self,
        human: HumanId,
        agent: &AgentId,
        kind: InteractionType,
        now: f64,
    ) -> bool {
        self.cooldowns
            .get(&(human, agent.clone(), kind))
            .is_some_and(|expiry| now < *expiry)
    }

    /// Drop every cooldown of a removed cat.
    pub fn forget_agent(&mut self, agent: &AgentId) {
        self.cooldowns.retain(|(_, a, _), _| a != agent);
    }

    /// Resolve an interaction request named `kind`.
    #[allow(clippy::too_many_arguments)]
    pub fn interact(
        &mut self,
        targets: &mut InteractionTargets<'_>,
        human: HumanId,
        agent_id: &AgentId,
        kind: &str,
        data: Option<&InteractionData>,
        now: f64,
        rng: &mut impl Rng,
    ) -> InteractionResult {
        let parsed = InteractionType::parse(kind);
        match self.resolve(targets, human, agent_id, parsed, data, now, rng) {
            Ok(result) => result,
            Err(rejection) => {
                debug!(human_id = %human, agent_id = %agent_id, kind, %rejection, "Interaction rejected");
                InteractionResult {
                    success: false,
                    message: rejection.to_string(),
                    interaction_type: parsed,
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn resolve(
        &mut self,
        targets: &mut InteractionTargets<'_>,
        human: HumanId,
        agent_id: &AgentId,
        parsed: Option<InteractionType>,
        data: Option<&InteractionData>,
        now: f64,
        rng: &mut impl Rng,
    ) -> Result<InteractionResult, InteractionRejection> {
        if let Some(kind) = parsed
            && self.is_on_cooldown(human, agent_id, kind, now)
        {
            return Err(InteractionRejection::OnCooldown);
        }

        let (agent, memory) = targets
            .store
            .get_with_memory_mut(agent_id)
            .ok_or(InteractionRejection::AgentNotFound)?;

        match agent.behavior.held_by {
            Some(holder) if holder == human && parsed == Some(InteractionType::Hold) => {
                agent.behavior.held_by = None;
                if let Some(drop) = data.and_then(|d| d.drop_position) {
                    agent.position = snap_to_ground(targets.world, drop);
                }
                memory.force_decision();
                info!(human_id = %human, agent_id = %agent_id, "Cat released");
                return Ok(InteractionResult {
                    success: true,
                    message: MSG_RELEASED.to_owned(),
                    interaction_type: parsed,
                });
            }
            Some(holder) if holder != human => return Err(InteractionRejection::AlreadyHeld),
            _ => {}
        }

        let kind = parsed.ok_or(InteractionRejection::InvalidType)?;
        let effect = interaction_effect(kind);
        let trust = targets.ledger.trust(human, agent_id);
        let chance = success_chance(kind, trust, agent.mood.mood, &agent.profile.personality);
        let success = rng.random::<f64>() <= chance;

        let outcome = if success {
            targets
                .ledger
                .adjust(human, agent_id, effect.relationship_change, now);
            set_mood(agent, effect.mood, SUCCESS_MOOD_INTENSITY, rng);
            update_physical(
                agent,
                NeedsDelta {
                    hunger: -effect.hunger_reduction.unwrap_or(0.0),
                    energy: -effect.energy_cost.unwrap_or(0.0),
                    ..NeedsDelta::default()
                },
                rng,
            );

            match kind {
                InteractionType::Hold => {
                    agent.behavior.held_by = Some(human);
                    agent.behavior.is_moving = false;
                    agent.behavior.target_position = None;
                }
                InteractionType::Pet => {
                    if let Some(avatar) = targets.world.resolve_human_avatar_position(human) {
                        memory.petting = Some(PettingReaction {
                            petted_by: human,
                            petted_at: now,
                            purr_until: now + self.config.pet_purr_seconds,
                            stay_near_until: now + self.config.pet_stay_near_seconds,
                        });
                        memory.current_goal = Action::Purr;
                        memory.context = BehaviorContext::None;
                        agent.behavior.current_action = Action::Purr;
                        agent.behavior.is_moving = false;
                        agent.behavior.target_position = Some(avatar);
                        agent.behavior.action_data = ActionData {
                            reacting_to: Some(human),
                        };
                    }
                }
                InteractionType::Feed | InteractionType::Play => {}
            }
            InteractionOutcome::Positive
        } else {
            targets
                .ledger
                .adjust(human, agent_id, -self.config.failure_trust_penalty, now);
            if rng.random::<f64>() < self.config.failure_annoyed_chance {
                set_mood(agent, Mood::Annoyed, ANNOYED_INTENSITY, rng);
            }
            InteractionOutcome::Negative
        };

        let relationship = targets.ledger.record_interaction(
            human,
            agent_id,
            InteractionRecord {
                interaction: kind,
                timestamp: now,
                outcome,
            },
            now,
        );
        agent.social.insert(human, relationship.snapshot());

        self.cooldowns.insert(
            (human, agent_id.clone(), kind),
            now + self.config.cooldown_seconds,
        );

        info!(
            human_id = %human,
            agent_id = %agent_id,
            ?kind,
            success,
            chance,
            "Interaction resolved"
        );

        Ok(InteractionResult {
            success,
            message: if success { MSG_SUCCESS } else { MSG_FAILED }.to_owned(),
            interaction_type: Some(kind),
        })
    }
}
