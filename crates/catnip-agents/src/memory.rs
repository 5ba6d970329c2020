//! Per-agent decision memory.
//!
//! Every agent in the store has exactly one [`AiMemory`], created and
//! dropped together with it. Behavior-specific scratch state lives in a
//! closed [`BehaviorContext`] that is replaced whenever the owning behavior
//! ends.

use catnip_types::{Action, HumanId};

use crate::world::CatTree;

/// Scratch state for social and tool-driven behaviors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SocialContext {
    /// Human the behavior is aimed at.
    pub target: HumanId,
    /// Orbit angle in radians for `CirclePlayer`.
    pub circle_angle: f64,
    /// Simulated time of the last meow, for `Meow` and `SitAndMeow`.
    pub last_meow: Option<f64>,
}

impl SocialContext {
    /// Fresh context aimed at `target`.
    pub const fn new(target: HumanId) -> Self {
        Self {
            target,
            circle_angle: 0.0,
            last_meow: None,
        }
    }
}

/// Scratch state for the cat-tree sub-state-machine.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeContext {
    /// The remembered tree.
    pub tree: CatTree,
    /// When the current tree phase started.
    pub phase_started_at: f64,
}

/// Behavior-specific scratch state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BehaviorContext {
    /// The current behavior keeps no scratch state.
    #[default]
    None,
    /// Social or tool-driven behavior.
    Social(SocialContext),
    /// Cat-tree behavior.
    Tree(TreeContext),
}

impl BehaviorContext {
    /// The remembered social target, if any.
    pub const fn social_target(&self) -> Option<HumanId> {
        match self {
            Self::Social(ctx) => Some(ctx.target),
            Self::None | Self::Tree(_) => None,
        }
    }
}

/// Timed reaction started by a successful Pet.
///
/// Purr until `purr_until`, then stay near the human until
/// `stay_near_until`, then the reaction expires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PettingReaction {
    /// Who petted the cat.
    pub petted_by: HumanId,
    /// When the cat was petted.
    pub petted_at: f64,
    /// End of the purr phase.
    pub purr_until: f64,
    /// End of the stay-near window.
    pub stay_near_until: f64,
}

impl PettingReaction {
    /// Whether the cat is still purring at `now`.
    pub fn is_purring(&self, now: f64) -> bool {
        now < self.purr_until
    }

    /// Whether the stay-near window is open at `now`.
    pub fn is_active(&self, now: f64) -> bool {
        now < self.stay_near_until
    }

    /// Fraction of the stay-near window left, in `[0, 1]`.
    pub fn remaining_fraction(&self, now: f64) -> f64 {
        let window = self.stay_near_until - self.petted_at;
        if window <= 0.0 {
            return 0.0;
        }
        ((self.stay_near_until - now) / window).clamp(0.0, 1.0)
    }
}

/// Decision memory of one agent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiMemory {
    /// When the agent last re-weighted its actions. `None` forces a decision
    /// on the next update.
    pub last_decision_time: Option<f64>,
    /// Mirrors the agent's current action.
    pub current_goal: Action,
    /// Scratch state of the current behavior.
    pub context: BehaviorContext,
    /// Active petting reaction, if any.
    pub petting: Option<PettingReaction>,
    /// Whether the agent has been snapped to the ground yet.
    pub grounded: bool,
}

impl AiMemory {
    /// Force a decision on the next update.
    pub const fn force_decision(&mut self) {
        self.last_decision_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn petting_windows() {
        let reaction = PettingReaction {
            petted_by: HumanId(1),
            petted_at: 100.0,
            purr_until: 103.0,
            stay_near_until: 115.0,
        };
        assert!(reaction.is_purring(102.9));
        assert!(!reaction.is_purring(103.0));
        assert!(reaction.is_active(114.0));
        assert!(!reaction.is_active(115.0));
        assert!((reaction.remaining_fraction(107.5) - 0.5).abs() < 1e-9);
        assert!(reaction.remaining_fraction(200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn social_target_only_for_social_context() {
        let ctx = BehaviorContext::Social(SocialContext::new(HumanId(9)));
        assert_eq!(ctx.social_target(), Some(HumanId(9)));
        assert_eq!(BehaviorContext::None.social_target(), None);
    }
}
