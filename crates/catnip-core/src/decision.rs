//! Decision step: weight every action and pick the strongest.
//!
//! Weights come from the agent's needs, personality and mood plus what it
//! perceives (nearest human, their tool, nearest tree). Positive weights are
//! then scaled by a uniform noise factor, the maximum wins with ties going
//! to the action declared first, and a final personality rule may redirect
//! `Socialize`.

use std::collections::BTreeMap;

use catnip_agents::mood::mood_effect;
use catnip_agents::world::CatTree;
use catnip_types::{Action, ActionFamily, Agent, HumanId, Personality, ToolCategory};
use rand::Rng;

use crate::perception::Perception;

/// Shortest time between two decisions, in seconds.
const BASE_DECISION_INTERVAL: f64 = 2.0;

/// Extra delay of a completely incurious cat, in seconds.
const CURIOSITY_DECISION_SPAN: f64 = 3.0;

/// Seconds between decisions: `2 + 3 * (1 - curiosity)`.
pub fn decision_interval(curiosity: f64) -> f64 {
    BASE_DECISION_INTERVAL + CURIOSITY_DECISION_SPAN * (1.0 - curiosity.clamp(0.0, 1.0))
}

/// Pull of a recent petting on the decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PettingPull {
    /// Who petted the cat.
    pub human: HumanId,
    /// Current distance to them.
    pub distance: f64,
    /// Fraction of the stay-near window left.
    pub remaining_fraction: f64,
}

/// Weight of every action for one decision.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionWeights {
    weights: BTreeMap<Action, f64>,
}

impl ActionWeights {
    /// Weight of `action` (0 when unset).
    pub fn get(&self, action: Action) -> f64 {
        self.weights.get(&action).copied().unwrap_or(0.0)
    }

    /// Set the weight of `action`.
    pub fn set(&mut self, action: Action, weight: f64) {
        self.weights.insert(action, weight);
    }

    /// Iterate non-zero weights in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Action, f64)> + '_ {
        self.weights.iter().map(|(action, weight)| (*action, *weight))
    }

    /// Multiply every positive weight by a factor drawn from
    /// `[1 - spread, 1 + spread]`. A spread of zero leaves weights untouched.
    pub fn apply_noise(&mut self, spread: f64, rng: &mut impl Rng) {
        if spread <= 0.0 {
            return;
        }
        for weight in self.weights.values_mut() {
            if *weight > 0.0 {
                *weight *= rng.random_range((1.0 - spread)..=(1.0 + spread));
            }
        }
    }

    /// The maximum-weight action. Ties keep the action declared first;
    /// an empty table selects `Idle`.
    pub fn select(&self) -> Action {
        let mut best = Action::Idle;
        let mut best_weight = -1.0;
        for action in Action::ALL {
            let weight = self.get(action);
            if weight > best_weight {
                best = action;
                best_weight = weight;
            }
        }
        best
    }
}

/// Outcome of a decision.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// Selected action.
    pub action: Action,
    /// Human a social action is aimed at.
    pub social_target: Option<HumanId>,
    /// Tree a tree action is aimed at.
    pub tree: Option<CatTree>,
}

/// Compute the weight table of one agent.
pub fn compute_weights(
    agent: &Agent,
    perception: &Perception,
    petting: Option<&PettingPull>,
    follow_distance: f64,
) -> ActionWeights {
    let p = &agent.profile.personality;
    let hunger = agent.physical.hunger;
    let energy = agent.physical.energy;
    let mood = mood_effect(agent.mood.mood);
    let mut w = ActionWeights::default();

    // --- Needs and wandering ---
    w.set(Action::Idle, 1.0);
    w.set(
        Action::Explore,
        0.5 * (1.0 + mood.exploration_boost) * p.curiosity,
    );
    w.set(
        Action::SeekFood,
        if hunger > 70.0 {
            3.0 + (hunger - 70.0) * 0.1
        } else if hunger > 50.0 {
            1.0
        } else {
            0.5
        },
    );
    w.set(
        Action::SeekRest,
        if energy < 30.0 {
            4.0 + (30.0 - energy) * 0.1
        } else if energy < 50.0 {
            1.5
        } else {
            0.5
        },
    );
    w.set(
        Action::Play,
        0.5 * (1.0 + mood.playfulness_boost) * p.playfulness,
    );
    w.set(Action::Groom, 0.3);
    w.set(Action::Meow, 0.1);

    // --- Nearest human ---
    if let Some(human) = &perception.human {
        let trust = human.trust;
        let distance = human.distance;
        let empty_handed = human.tool.is_none();

        if empty_handed && trust > 0.4 && distance > 10.0 {
            w.set(Action::Follow, (trust - 0.4) * 3.0);
        }
        if empty_handed && distance < 20.0 {
            w.set(Action::LookAt, 1.0 + trust);
        }
        if hunger > 60.0 || trust > 0.7 {
            w.set(Action::Meow, 0.5 + trust * 0.5);
        }
        if empty_handed && trust > 0.8 && distance < 10.0 {
            w.set(Action::RollOver, 0.3 * (trust - 0.7));
        }

        if human.holds(ToolCategory::Toy) && distance < 40.0 {
            w.set(
                Action::LookAtToy,
                6.0 + trust * 2.0 + p.playfulness * 3.0,
            );
        }
        if human.recent_toy_use.is_some() && distance < 30.0 {
            w.set(
                Action::PlayWithToy,
                8.0 + p.playfulness * 5.0 + trust * 3.0,
            );
        }

        if human.holds(ToolCategory::Food) && distance < 50.0 {
            let base = if hunger > 50.0 { 8.0 } else { 4.0 };
            w.set(Action::ApproachFood, base + trust * 2.0);
            if distance < 10.0 {
                if p.playfulness > 0.5 {
                    w.set(
                        Action::CirclePlayer,
                        5.0 + p.playfulness * 2.0 + hunger / 30.0,
                    );
                } else {
                    w.set(
                        Action::SitAndMeow,
                        5.0 + hunger / 30.0 + trust * 1.5,
                    );
                }
            }
        }
    }

    // --- Recent petting replaces the usual follow/look weights ---
    if let Some(pull) = petting {
        w.set(Action::Follow, 0.0);
        w.set(Action::LookAt, 0.0);
        let urgency = 5.0 + 5.0 * pull.remaining_fraction;
        if pull.distance > follow_distance {
            w.set(Action::Follow, urgency);
        } else {
            w.set(Action::LookAt, urgency);
        }
    }

    // --- Nearest tree ---
    if let Some(tree) = &perception.tree {
        let d = tree.distance;
        if d <= agent.profile.behavior.exploration_range && d > 5.0 {
            w.set(
                Action::ApproachCatTree,
                2.0 + p.curiosity * 2.0 + p.independence * 1.5,
            );
        }
        if d > 2.0 && d < 8.0 {
            w.set(
                Action::ClimbCatTree,
                3.0 + p.curiosity * 2.5 + p.independence * 2.0,
            );
        }
        if d < 3.0 {
            w.set(
                Action::ScratchTree,
                2.5 + p.curiosity * 1.5 + p.playfulness,
            );
        }
        if d > 1.0 && d < 5.0 && energy > 60.0 {
            w.set(
                Action::JumpOnTree,
                3.5 + p.curiosity * 2.0 + p.playfulness * 2.5,
            );
        }
        if d < 2.0 && p.playfulness > 0.6 && energy > 40.0 {
            w.set(
                Action::PlayOnTree,
                4.0 + p.playfulness * 3.0 + p.curiosity * 1.5,
            );
        }
        if d < 3.0 {
            let rest = if energy < 50.0 { 5.0 } else { 2.0 };
            w.set(Action::RestOnCatTree, rest + p.independence * 1.5);
            if energy < 30.0 {
                w.set(Action::SleepOnTree, 6.0 + p.independence * 2.0);
            }
        }
    }

    w
}

/// Redirect `Socialize` for independent or shy cats.
///
/// Independence above 0.7 turns it into `Explore` 30% of the time and
/// `Idle` otherwise; shyness above 0.6 into `Groom` 40% of the time and
/// `Idle` otherwise. Every other action passes through.
pub fn apply_personality_overrides(
    action: Action,
    personality: &Personality,
    rng: &mut impl Rng,
) -> Action {
    if action != Action::Socialize {
        return action;
    }
    if personality.independence > 0.7 {
        return if rng.random_bool(0.3) {
            Action::Explore
        } else {
            Action::Idle
        };
    }
    if personality.shyness > 0.6 {
        return if rng.random_bool(0.4) {
            Action::Groom
        } else {
            Action::Idle
        };
    }
    action
}

/// Run a full decision for one agent.
pub fn decide(
    agent: &Agent,
    perception: &Perception,
    petting: Option<&PettingPull>,
    follow_distance: f64,
    noise: f64,
    rng: &mut impl Rng,
) -> Decision {
    let mut weights = compute_weights(agent, perception, petting, follow_distance);
    weights.apply_noise(noise, rng);
    let selected = weights.select();
    let action = apply_personality_overrides(selected, &agent.profile.personality, rng);

    let social_target = match action {
        Action::Follow | Action::LookAt if petting.is_some() => petting.map(|pull| pull.human),
        _ if action.family() == ActionFamily::Social => perception.human.map(|h| h.id),
        _ => None,
    };
    let tree = (action.family() == ActionFamily::Tree)
        .then(|| perception.tree.as_ref().map(|t| t.tree.clone()))
        .flatten();

    Decision {
        action,
        social_target,
        tree,
    }
}
