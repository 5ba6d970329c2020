//! Idle, wandering and self-care actions.

use catnip_agents::needs::NeedsDelta;

use super::Behavior;
use super::movement::{EXPLORE_SPEED, PLAY_SPEED, wander};

/// Hunger removed when a food search reaches its spot.
const SEEK_FOOD_HUNGER: f64 = 20.0;
/// Energy restored per tick of resting.
const SEEK_REST_ENERGY: f64 = 5.0;
/// Grooming gained per tick of grooming.
const GROOM_GAIN: f64 = 3.0;
/// Energy spent per tick of playing.
const PLAY_ENERGY: f64 = 2.0;

/// Stand still.
pub const fn idle(b: &mut Behavior<'_>) {
    b.stand();
}

/// Wander to random points within the exploration range.
pub fn explore(b: &mut Behavior<'_>) {
    wander(b, EXPLORE_SPEED);
}

/// Wander in search of food; eat on arrival.
pub fn seek_food(b: &mut Behavior<'_>) {
    if wander(b, EXPLORE_SPEED) {
        b.adjust(NeedsDelta {
            hunger: -SEEK_FOOD_HUNGER,
            ..NeedsDelta::default()
        });
    }
}

/// Lie down and recover energy.
pub fn seek_rest(b: &mut Behavior<'_>) {
    b.stand();
    b.adjust(NeedsDelta {
        energy: SEEK_REST_ENERGY,
        ..NeedsDelta::default()
    });
}

/// Groom in place.
pub fn groom(b: &mut Behavior<'_>) {
    b.stand();
    b.adjust(NeedsDelta {
        grooming: GROOM_GAIN,
        ..NeedsDelta::default()
    });
}

/// Dash around at play speed, burning energy.
pub fn play(b: &mut Behavior<'_>) {
    wander(b, PLAY_SPEED);
    b.adjust(NeedsDelta {
        energy: -PLAY_ENERGY,
        ..NeedsDelta::default()
    });
}

/// `Socialize` has no behavior of its own.
pub fn socialize(b: &mut Behavior<'_>) {
    b.go_idle();
}
