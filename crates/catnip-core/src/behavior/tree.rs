//! The cat-tree sub-state-machine.
//!
//! ```text
//! ApproachCatTree -> ClimbCatTree -> RestOnCatTree <-> SleepOnTree -> Explore
//! ScratchTree -> JumpOnTree -> RestOnCatTree
//! ScratchTree -> PlayOnTree -> SleepOnTree | Explore
//! ```
//!
//! Each phase stamps its start time in the tree context; phases that end
//! on a timer measure from that stamp.

use catnip_agents::memory::{BehaviorContext, TreeContext};
use catnip_agents::needs::NeedsDelta;
use catnip_agents::world::snap_to_ground;
use catnip_types::Action;

use super::Behavior;
use super::movement::{CLIMB_SPEED, EXPLORE_SPEED, JUMP_SPEED, step_toward};

/// Horizontal distance at which an approach turns into a climb.
const CLIMB_START_DISTANCE: f64 = 3.0;
/// Energy below which a cat on the tree sleeps instead of resting.
const SLEEP_ENERGY: f64 = 30.0;
/// Energy above which resting or sleeping is over.
const RECOVERED_ENERGY: f64 = 70.0;
/// Minimum seconds of resting.
const REST_SECONDS: f64 = 10.0;
/// Minimum seconds of sleeping.
const SLEEP_SECONDS: f64 = 15.0;
/// Seconds of scratching.
const SCRATCH_SECONDS: f64 = 3.0;
/// Seconds of playing on the tree.
const PLAY_SECONDS: f64 = 5.0;
/// Playfulness above which scratching turns into play.
const PLAY_PLAYFULNESS: f64 = 0.6;
/// Energy below which play on the tree ends in sleep.
const PLAY_SLEEP_ENERGY: f64 = 50.0;

const CLIMB_ENERGY: f64 = 0.5;
const JUMP_ENERGY: f64 = 1.0;
const PLAY_ENERGY: f64 = 1.5;
const REST_ENERGY: f64 = 3.0;
const SLEEP_ENERGY_GAIN: f64 = 4.0;

/// Resolve the remembered tree or fall back to `Idle`.
fn tree_or_idle(b: &mut Behavior<'_>) -> Option<TreeContext> {
    let tree = b.tree_context();
    if tree.is_none() {
        b.go_idle();
    }
    tree
}

fn elapsed(b: &Behavior<'_>, tree: &TreeContext) -> f64 {
    b.now() - tree.phase_started_at
}

fn energy(b: &mut Behavior<'_>, delta: f64) {
    b.adjust(NeedsDelta {
        energy: delta,
        ..NeedsDelta::default()
    });
}

fn leave_tree(b: &mut Behavior<'_>) {
    b.switch_to(Action::Explore, BehaviorContext::None);
}

/// Walk to the tree base; start climbing once close.
pub fn approach(b: &mut Behavior<'_>) {
    let Some(tree) = tree_or_idle(b) else {
        return;
    };
    if tree.tree.horizontal_distance(b.agent.position) < CLIMB_START_DISTANCE {
        b.enter_tree_phase(Action::ClimbCatTree, tree);
        return;
    }
    let base = snap_to_ground(b.env.world, tree.tree.base);
    step_toward(b, base, EXPLORE_SPEED);
}

/// Climb to the top platform; rest or sleep there.
pub fn climb(b: &mut Behavior<'_>) {
    let Some(tree) = tree_or_idle(b) else {
        return;
    };
    energy(b, -CLIMB_ENERGY);
    if step_toward(b, tree.tree.top, CLIMB_SPEED) {
        let next = if b.agent.physical.energy < SLEEP_ENERGY {
            Action::SleepOnTree
        } else {
            Action::RestOnCatTree
        };
        b.enter_tree_phase(next, tree);
    }
}

/// Rest on the tree until recovered.
pub fn rest(b: &mut Behavior<'_>) {
    let Some(tree) = tree_or_idle(b) else {
        return;
    };
    b.stand();
    energy(b, REST_ENERGY);
    let level = b.agent.physical.energy;
    if level < SLEEP_ENERGY {
        b.enter_tree_phase(Action::SleepOnTree, tree);
    } else if elapsed(b, &tree) >= REST_SECONDS && level > RECOVERED_ENERGY {
        leave_tree(b);
    }
}

/// Sleep on the tree until recovered.
pub fn sleep(b: &mut Behavior<'_>) {
    let Some(tree) = tree_or_idle(b) else {
        return;
    };
    b.stand();
    energy(b, SLEEP_ENERGY_GAIN);
    if elapsed(b, &tree) >= SLEEP_SECONDS && b.agent.physical.energy > RECOVERED_ENERGY {
        leave_tree(b);
    }
}

/// Scratch the tree, then jump on it or play on it.
pub fn scratch(b: &mut Behavior<'_>) {
    let Some(tree) = tree_or_idle(b) else {
        return;
    };
    b.face(tree.tree.base);
    if elapsed(b, &tree) >= SCRATCH_SECONDS {
        let next = if b.agent.profile.personality.playfulness > PLAY_PLAYFULNESS {
            Action::PlayOnTree
        } else {
            Action::JumpOnTree
        };
        b.enter_tree_phase(next, tree);
    }
}

/// Jump to the top platform; rest there.
pub fn jump(b: &mut Behavior<'_>) {
    let Some(tree) = tree_or_idle(b) else {
        return;
    };
    energy(b, -JUMP_ENERGY);
    if step_toward(b, tree.tree.top, JUMP_SPEED) {
        b.enter_tree_phase(Action::RestOnCatTree, tree);
    }
}

/// Play around the tree, then sleep or wander off.
pub fn play(b: &mut Behavior<'_>) {
    let Some(tree) = tree_or_idle(b) else {
        return;
    };
    b.stand();
    energy(b, -PLAY_ENERGY);
    if elapsed(b, &tree) >= PLAY_SECONDS {
        if b.agent.physical.energy < PLAY_SLEEP_ENERGY {
            b.enter_tree_phase(Action::SleepOnTree, tree);
        } else {
            leave_tree(b);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use catnip_agents::config::NeedsConfig;
    use catnip_agents::humans::HumanContextRegistry;
    use catnip_agents::memory::AiMemory;
    use catnip_agents::relationship::RelationshipLedger;
    use catnip_agents::store::AgentStore;
    use catnip_agents::world::{CatTree, StaticWorld};
    use catnip_types::{Agent, DVec3, TreeId};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::config::BehaviorConfig;
    use crate::perception::Environment;

    fn cat_tree() -> CatTree {
        CatTree {
            id: TreeId::from("tree_garden"),
            base: DVec3::new(10.0, 0.0, 0.0),
            top: DVec3::new(10.0, 6.0, 0.0),
        }
    }

    /// One cat in a tree phase that started at t = 0.
    struct Rig {
        agent: Agent,
        memory: AiMemory,
        world: StaticWorld,
        humans: HumanContextRegistry,
        ledger: RelationshipLedger,
        config: BehaviorConfig,
        needs: NeedsConfig,
        rng: SmallRng,
    }

    impl Rig {
        fn new(action: Action) -> Self {
            let mut store = AgentStore::with_seed(3);
            let mut agent = store.create(None, "Friendly", None, 0.0).clone();
            agent.position = cat_tree().top;
            agent.behavior.current_action = action;
            let memory = AiMemory {
                current_goal: action,
                context: BehaviorContext::Tree(TreeContext {
                    tree: cat_tree(),
                    phase_started_at: 0.0,
                }),
                grounded: true,
                ..AiMemory::default()
            };
            let mut world = StaticWorld::flat(0.0);
            world.add_tree(cat_tree());
            Self {
                agent,
                memory,
                world,
                humans: HumanContextRegistry::new(),
                ledger: RelationshipLedger::default(),
                config: BehaviorConfig::default(),
                needs: NeedsConfig::default(),
                rng: SmallRng::seed_from_u64(3),
            }
        }

        /// Run `handler` once at `now` and return the resulting action.
        fn step(&mut self, handler: fn(&mut Behavior<'_>), now: f64) -> Action {
            {
                let mut b = Behavior {
                    agent: &mut self.agent,
                    memory: &mut self.memory,
                    env: Environment {
                        world: &self.world,
                        humans: &self.humans,
                        ledger: &self.ledger,
                        now,
                    },
                    config: &self.config,
                    needs: &self.needs,
                    rng: &mut self.rng,
                };
                handler(&mut b);
            }
            self.agent.behavior.current_action
        }

        fn phase_started_at(&self) -> Option<f64> {
            match &self.memory.context {
                BehaviorContext::Tree(tree) => Some(tree.phase_started_at),
                BehaviorContext::None | BehaviorContext::Social(_) => None,
            }
        }
    }

    #[test]
    fn playful_cat_plays_after_scratching() {
        let mut rig = Rig::new(Action::ScratchTree);
        rig.agent.profile.personality.playfulness = 0.7;

        assert_eq!(rig.step(scratch, 2.9), Action::ScratchTree);
        assert_eq!(rig.step(scratch, 3.0), Action::PlayOnTree);
        assert!((rig.phase_started_at().unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn calm_cat_jumps_after_scratching() {
        let mut rig = Rig::new(Action::ScratchTree);
        rig.agent.profile.personality.playfulness = 0.5;

        assert_eq!(rig.step(scratch, 2.9), Action::ScratchTree);
        assert_eq!(rig.step(scratch, 3.0), Action::JumpOnTree);
        assert!((rig.phase_started_at().unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn tired_play_ends_in_sleep() {
        let mut rig = Rig::new(Action::PlayOnTree);
        rig.agent.physical.energy = 45.0;

        assert_eq!(rig.step(play, 4.9), Action::PlayOnTree);
        assert_eq!(rig.step(play, 5.0), Action::SleepOnTree);
        assert!((rig.agent.physical.energy - 42.0).abs() < 1e-9);
        assert!((rig.phase_started_at().unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn energetic_play_ends_in_exploring() {
        let mut rig = Rig::new(Action::PlayOnTree);
        rig.agent.physical.energy = 80.0;

        assert_eq!(rig.step(play, 4.9), Action::PlayOnTree);
        assert_eq!(rig.step(play, 5.0), Action::Explore);
        assert!(matches!(rig.memory.context, BehaviorContext::None));
    }

    #[test]
    fn sleep_lasts_fifteen_seconds_even_when_recovered() {
        let mut rig = Rig::new(Action::SleepOnTree);
        rig.agent.physical.energy = 90.0;

        assert_eq!(rig.step(sleep, 14.9), Action::SleepOnTree);
        assert_eq!(rig.step(sleep, 15.0), Action::Explore);
    }

    #[test]
    fn sleep_continues_until_energy_recovers() {
        let mut rig = Rig::new(Action::SleepOnTree);
        rig.agent.physical.energy = 50.0;

        // 54 after the gain: past the timer but not recovered.
        assert_eq!(rig.step(sleep, 20.0), Action::SleepOnTree);
        rig.agent.physical.energy = 67.0;
        // 71 after the gain.
        assert_eq!(rig.step(sleep, 20.1), Action::Explore);
    }

    #[test]
    fn jump_lands_on_top_and_rests() {
        let mut rig = Rig::new(Action::JumpOnTree);
        rig.agent.position = DVec3::new(10.0, 0.1, 4.0);

        let mut now = 0.0;
        let mut action = Action::JumpOnTree;
        for _ in 0..100 {
            now += 0.1;
            action = rig.step(jump, now);
            if action != Action::JumpOnTree {
                break;
            }
        }
        assert_eq!(action, Action::RestOnCatTree);
        assert!(rig.agent.position.distance(cat_tree().top) < rig.config.arrival_distance);
        assert!((rig.phase_started_at().unwrap() - now).abs() < 1e-9);
    }
}
