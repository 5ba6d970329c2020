//! Purring and the stay-near window after a pet.
//!
//! A successful Pet leaves a [`PettingReaction`] in memory and sets the
//! action to `Purr`. The cat purrs until `purr_until`, then follows the
//! human while the stay-near window is open; the decision step keeps it
//! close through the petting pull. When the window closes the reaction is
//! cleared and a cat still following or watching that human goes idle.
//!
//! [`PettingReaction`]: catnip_agents::memory::PettingReaction

use catnip_types::Action;
use tracing::debug;

use super::Behavior;

/// Purr facing the human, then start following them.
pub fn purr(b: &mut Behavior<'_>) {
    let Some(petting) = b.memory.petting else {
        b.go_idle();
        return;
    };
    let now = b.now();
    let petter = b.env.world.resolve_human_avatar_position(petting.petted_by);

    if petting.is_purring(now) {
        match petter {
            Some(position) => b.face(position),
            None => b.stand(),
        }
        return;
    }

    if petting.is_active(now) && petter.is_some() {
        b.switch_social(Action::Follow, petting.petted_by);
    } else {
        b.go_idle();
    }
}

/// Clear an expired petting reaction. Returns whether one expired.
pub fn expire(b: &mut Behavior<'_>) -> bool {
    let Some(petting) = b.memory.petting else {
        return false;
    };
    if petting.is_active(b.now()) {
        return false;
    }
    b.memory.petting = None;
    debug!(
        agent_id = %b.agent.id,
        human_id = %petting.petted_by,
        "Petting reaction expired"
    );

    let action = b.agent.behavior.current_action;
    let aimed_at_petter = b.memory.context.social_target() == Some(petting.petted_by);
    if matches!(action, Action::Follow | Action::LookAt) && aimed_at_petter {
        b.go_idle();
    }
    true
}
