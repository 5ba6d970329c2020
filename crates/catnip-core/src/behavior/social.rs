//! Actions aimed at a remembered human.
//!
//! Every handler resolves the human from the social context first and falls
//! back to `Idle` when they are gone. Tool-driven actions also fall back when
//! the human stops holding the tool that triggered them.

use catnip_agents::mood::set_mood;
use catnip_agents::needs::NeedsDelta;
use catnip_agents::tools::tool_config;
use catnip_agents::world::snap_to_ground;
use catnip_types::{Action, DVec3, HumanId, Mood, ToolCategory};
use tracing::debug;

use super::Behavior;
use super::movement::{CIRCLE_SPEED, FOLLOW_SPEED, PLAY_SPEED, step_toward};
use crate::perception::holds_tool;

/// Food closer than this turns an approach into circling or begging.
const FOOD_BEG_DISTANCE: f64 = 10.0;
/// Playfulness above which a cat circles instead of sitting.
const CIRCLE_PLAYFULNESS: f64 = 0.5;
/// Energy spent per tick of chasing a toy.
const TOY_PLAY_ENERGY: f64 = 2.0;
/// Mood intensity of toy play.
const TOY_PLAY_INTENSITY: f64 = 0.8;

/// Resolve the social target or fall back to `Idle`.
fn target_or_idle(b: &mut Behavior<'_>) -> Option<(HumanId, DVec3)> {
    let target = b.resolve_social_target();
    if target.is_none() {
        b.go_idle();
    }
    target
}

/// Meow at most once per meow interval.
fn meow_at(b: &mut Behavior<'_>, human: HumanId) {
    let now = b.now();
    let interval = b.config.meow_interval;
    let agent_id = b.agent.id.clone();
    if let Some(social) = b.social_context_mut()
        && social.last_meow.is_none_or(|last| now - last >= interval)
    {
        social.last_meow = Some(now);
        debug!(agent_id = %agent_id, human_id = %human, "Meow");
    }
}

/// Close in on the human, then stop at the follow distance facing them.
pub fn follow(b: &mut Behavior<'_>) {
    let Some((_, position)) = target_or_idle(b) else {
        return;
    };
    if b.agent.position.distance(position) > b.config.follow_distance {
        let target = snap_to_ground(b.env.world, position);
        step_toward(b, target, FOLLOW_SPEED);
    } else {
        b.face(position);
    }
}

/// Watch the human.
pub fn look_at(b: &mut Behavior<'_>) {
    if let Some((_, position)) = target_or_idle(b) {
        b.face(position);
    }
}

/// Meow at the human.
pub fn meow(b: &mut Behavior<'_>) {
    if let Some((human, position)) = target_or_idle(b) {
        b.face(position);
        meow_at(b, human);
    }
}

/// Roll over in front of the human.
pub fn roll_over(b: &mut Behavior<'_>) {
    if let Some((_, position)) = target_or_idle(b) {
        b.face(position);
    }
}

/// Stare at the toy in the human's hand.
pub fn look_at_toy(b: &mut Behavior<'_>) {
    let Some((human, position)) = target_or_idle(b) else {
        return;
    };
    if holds_tool(&b.env, human, ToolCategory::Toy) {
        b.face(position);
    } else {
        b.go_idle();
    }
}

/// Chase the spot where the toy was used.
pub fn play_with_toy(b: &mut Behavior<'_>) {
    let Some((human, position)) = target_or_idle(b) else {
        return;
    };
    let recent = b
        .env
        .humans
        .recent_tool_use(human, b.config.toy_use_window, b.now())
        .filter(|tool_use| tool_config(tool_use.tool).category == ToolCategory::Toy);
    if recent.is_none() && !holds_tool(&b.env, human, ToolCategory::Toy) {
        b.go_idle();
        return;
    }

    if b.agent.mood.mood != Mood::Playful {
        set_mood(b.agent, Mood::Playful, TOY_PLAY_INTENSITY, b.rng);
    }
    b.adjust(NeedsDelta {
        energy: -TOY_PLAY_ENERGY,
        ..NeedsDelta::default()
    });

    let spot = recent
        .and_then(|tool_use| tool_use.position)
        .unwrap_or(position);
    let target = snap_to_ground(b.env.world, spot);
    if step_toward(b, target, PLAY_SPEED) {
        b.face(target);
    }
}

/// Walk toward the human holding food; beg once close.
pub fn approach_food(b: &mut Behavior<'_>) {
    let Some((human, position)) = target_or_idle(b) else {
        return;
    };
    if !holds_tool(&b.env, human, ToolCategory::Food) {
        b.go_idle();
        return;
    }
    if b.agent.position.distance(position) < FOOD_BEG_DISTANCE {
        let next = if b.agent.profile.personality.playfulness > CIRCLE_PLAYFULNESS {
            Action::CirclePlayer
        } else {
            Action::SitAndMeow
        };
        b.switch_social(next, human);
        return;
    }
    let target = snap_to_ground(b.env.world, position);
    step_toward(b, target, FOLLOW_SPEED);
}

/// Orbit the human holding food.
pub fn circle_player(b: &mut Behavior<'_>) {
    let Some((human, position)) = target_or_idle(b) else {
        return;
    };
    if !holds_tool(&b.env, human, ToolCategory::Food) {
        b.go_idle();
        return;
    }
    let step = b.config.circle_angle_step;
    let Some(angle) = b.social_context_mut().map(|social| {
        social.circle_angle += step;
        social.circle_angle
    }) else {
        b.go_idle();
        return;
    };
    let radius = b.config.circle_radius;
    let orbit = position + DVec3::new(angle.cos() * radius, 0.0, angle.sin() * radius);
    let target = snap_to_ground(b.env.world, orbit);
    step_toward(b, target, CIRCLE_SPEED);
}

/// Sit in front of the human holding food and meow.
pub fn sit_and_meow(b: &mut Behavior<'_>) {
    let Some((human, position)) = target_or_idle(b) else {
        return;
    };
    if !holds_tool(&b.env, human, ToolCategory::Food) {
        b.go_idle();
        return;
    }
    b.face(position);
    meow_at(b, human);
}
