//! Straight-line movement.
//!
//! No pathfinding: agents walk straight toward their target, one step per
//! tick, and stop inside the arrival distance.

use std::f64::consts::TAU;

use catnip_agents::world::snap_to_ground;
use catnip_types::DVec3;
use rand::Rng;

use super::Behavior;

/// Step factor of wandering, seeking and approaching a tree.
pub const EXPLORE_SPEED: f64 = 0.1;
/// Step factor of following and approaching a human.
pub const FOLLOW_SPEED: f64 = 0.12;
/// Step factor of playing.
pub const PLAY_SPEED: f64 = 0.18;
/// Step factor of circling a human.
pub const CIRCLE_SPEED: f64 = 0.08;
/// Step factor of climbing a tree.
pub const CLIMB_SPEED: f64 = 0.08;
/// Step factor of jumping onto a tree.
pub const JUMP_SPEED: f64 = 0.15;

/// Step toward `target`. Returns whether the agent is within the arrival
/// distance afterwards.
///
/// The step never overshoots the target.
pub fn step_toward(b: &mut Behavior<'_>, target: DVec3, factor: f64) -> bool {
    let arrival = b.config.arrival_distance;
    b.agent.behavior.target_position = Some(target);

    let offset = target - b.agent.position;
    let distance = offset.length();
    if distance.is_nan() || distance < arrival || distance <= f64::EPSILON {
        b.agent.behavior.is_moving = false;
        return true;
    }

    let step = b.step_length(factor).min(distance).max(0.0);
    b.agent.position += offset * (step / distance);

    let arrived = b.agent.position.distance(target) < arrival;
    b.agent.behavior.is_moving = !arrived;
    arrived
}

/// Random ground-snapped point within the agent's exploration range.
pub fn random_wander_target(b: &mut Behavior<'_>) -> DVec3 {
    let range = b.agent.profile.behavior.exploration_range.max(0.0);
    let angle = b.rng.random_range(0.0..TAU);
    let radius = b.rng.random_range(0.0..=range);
    let point = b.agent.position + DVec3::new(angle.cos() * radius, 0.0, angle.sin() * radius);
    snap_to_ground(b.env.world, point)
}

/// Walk toward the current wander target, picking a new one when idle.
///
/// Returns `true` on the tick the target is reached; the target is cleared
/// then so the next call picks a fresh one.
pub fn wander(b: &mut Behavior<'_>, factor: f64) -> bool {
    let target = match (b.agent.behavior.is_moving, b.agent.behavior.target_position) {
        (true, Some(target)) => target,
        _ => random_wander_target(b),
    };
    let arrived = step_toward(b, target, factor);
    if arrived {
        b.stand();
    }
    arrived
}
