//! Integration tests for interaction resolution across the store, the
//! relationship ledger and the human registry.

#![allow(clippy::unwrap_used)]

use catnip_agents::{
    AgentStore, HumanContextRegistry, InteractionConfig, InteractionMediator, InteractionTargets,
    RelationshipLedger, StaticWorld,
};
use catnip_types::{
    Agent, AgentId, DVec3, HumanId, InteractionOutcome, InteractionResult, InteractionType, Mood,
    RelationshipTier, ToolId,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

struct Session {
    store: AgentStore,
    ledger: RelationshipLedger,
    world: StaticWorld,
    mediator: InteractionMediator,
    rng: SmallRng,
}

impl Session {
    fn new(config: InteractionConfig) -> Self {
        let mut world = StaticWorld::flat(0.0);
        world.place_human(HumanId(7), DVec3::new(1.0, 0.0, 1.0));
        Self {
            store: AgentStore::with_seed(3),
            ledger: RelationshipLedger::new(config.history_cap),
            world,
            mediator: InteractionMediator::new(config),
            rng: SmallRng::seed_from_u64(9),
        }
    }

    fn interact(&mut self, human: HumanId, agent: &AgentId, kind: &str, now: f64) -> InteractionResult {
        let mut targets = InteractionTargets {
            store: &mut self.store,
            ledger: &mut self.ledger,
            world: &self.world,
        };
        self.mediator
            .interact(&mut targets, human, agent, kind, None, now, &mut self.rng)
    }

    /// Retry `kind` past cooldowns until the roll lands. `reset` runs on the
    /// cat before every attempt. Returns whether it ever succeeded.
    fn succeed(&mut self, agent: &AgentId, kind: &str, reset: impl Fn(&mut Agent)) -> bool {
        for n in 0..200_u32 {
            reset(self.store.get_mut(agent).unwrap());
            if self.interact(HumanId(7), agent, kind, f64::from(n) * 3.0).success {
                return true;
            }
        }
        false
    }
}

#[test]
fn history_is_capped_at_fifty_records() {
    let mut session = Session::new(InteractionConfig::default());
    let agent = session.store.create(None, "Friendly", None, 0.0).id.clone();
    for n in 0..60_u32 {
        let result = session.interact(HumanId(7), &agent, "Feed", f64::from(n) * 2.0);
        assert_ne!(result.message, "Interaction on cooldown");
    }
    let relationship = session.ledger.peek(HumanId(7), &agent).unwrap();
    assert_eq!(relationship.history.len(), 50);
    // Oldest records were evicted first.
    assert!((relationship.history.front().unwrap().timestamp - 20.0).abs() < 1e-9);
}

#[test]
fn removed_agent_forgets_cooldowns_and_relationships() {
    let mut session = Session::new(InteractionConfig::default());
    let agent = session.store.create(None, "Calico", None, 0.0).id.clone();
    session.interact(HumanId(7), &agent, "Pet", 0.0);
    assert!(session.mediator.is_on_cooldown(
        HumanId(7),
        &agent,
        catnip_types::InteractionType::Pet,
        1.0
    ));

    session.store.remove(&agent);
    session.ledger.forget_agent(&agent);
    session.mediator.forget_agent(&agent);

    assert!(session.ledger.is_empty());
    assert!(!session.mediator.is_on_cooldown(
        HumanId(7),
        &agent,
        catnip_types::InteractionType::Pet,
        1.0
    ));
    let result = session.interact(HumanId(7), &agent, "Pet", 1.0);
    assert_eq!(result.message, "Cat not found");
}

#[test]
fn sustained_feeding_builds_friendship() {
    let mut session = Session::new(InteractionConfig::default());
    let agent = session.store.create(None, "Friendly", None, 0.0).id.clone();
    for n in 0..30_u32 {
        session.interact(HumanId(7), &agent, "Feed", f64::from(n) * 2.0);
    }
    let snapshot = session
        .store
        .get(&agent)
        .unwrap()
        .social
        .get(&HumanId(7))
        .cloned()
        .unwrap();
    assert!(snapshot.trust_level > 0.6);
    assert!(snapshot.tier >= RelationshipTier::Friends);
    assert_eq!(snapshot.favorite_activities.first(), Some(&catnip_types::InteractionType::Feed));
}

#[test]
fn custom_cooldown_is_honored() {
    let config = InteractionConfig {
        cooldown_seconds: 10.0,
        ..InteractionConfig::default()
    };
    let mut session = Session::new(config);
    let agent = session.store.create(None, "Siamese", None, 0.0).id.clone();
    session.interact(HumanId(7), &agent, "Play", 0.0);
    assert_eq!(
        session.interact(HumanId(7), &agent, "Play", 9.0).message,
        "Interaction on cooldown"
    );
    assert_ne!(
        session.interact(HumanId(7), &agent, "Play", 10.0).message,
        "Interaction on cooldown"
    );
}

#[test]
fn human_registry_tool_flow() {
    let mut humans = HumanContextRegistry::new();
    humans.register(HumanId(7));
    assert!(humans.equip_tool(HumanId(7), ToolId::PremiumFood, 0.0).is_err());
    humans.unlock_tool(HumanId(7), ToolId::PremiumFood).unwrap();
    humans.equip_tool(HumanId(7), ToolId::PremiumFood, 0.0).unwrap();
    let used = humans
        .use_tool(HumanId(7), Some(DVec3::new(2.0, 0.0, 2.0)), 1.0)
        .unwrap();
    assert_eq!(used.tool, ToolId::PremiumFood);
    assert!(humans.use_tool(HumanId(7), None, 2.0).is_err());
    assert!(humans.recent_tool_use(HumanId(7), 3.0, 2.0).is_some());
}

#[test]
fn feeding_a_cat_to_low_hunger_makes_it_hungry() {
    let mut session = Session::new(InteractionConfig::default());
    let agent = session.store.create(None, "Friendly", None, 0.0).id.clone();
    assert!(session.succeed(&agent, "Feed", |cat| {
        cat.physical.hunger = 40.0;
        cat.physical.energy = 80.0;
    }));
    let cat = session.store.get(&agent).unwrap();
    assert!((cat.physical.hunger - 10.0).abs() < 1e-9);
    assert_eq!(cat.mood.mood, Mood::Hungry);
    assert!((cat.mood.intensity - 0.8).abs() < 1e-9);
}

#[test]
fn tiring_play_makes_the_cat_tired() {
    let mut session = Session::new(InteractionConfig::default());
    let agent = session.store.create(None, "Friendly", None, 0.0).id.clone();
    assert!(session.succeed(&agent, "Play", |cat| {
        cat.physical.hunger = 60.0;
        cat.physical.energy = 30.0;
    }));
    let cat = session.store.get(&agent).unwrap();
    assert!((cat.physical.energy - 15.0).abs() < 1e-9);
    assert_eq!(cat.mood.mood, Mood::Tired);
    assert!((cat.mood.intensity - 0.7).abs() < 1e-9);
}

#[test]
fn hunger_mood_wins_over_tiredness() {
    let mut session = Session::new(InteractionConfig::default());
    let agent = session.store.create(None, "Friendly", None, 0.0).id.clone();
    assert!(session.succeed(&agent, "Feed", |cat| {
        cat.physical.hunger = 40.0;
        cat.physical.energy = 10.0;
    }));
    assert_eq!(session.store.get(&agent).unwrap().mood.mood, Mood::Hungry);
}

#[test]
fn comfortable_cat_keeps_the_interaction_mood() {
    let mut session = Session::new(InteractionConfig::default());
    let agent = session.store.create(None, "Friendly", None, 0.0).id.clone();
    assert!(session.succeed(&agent, "Play", |cat| {
        cat.physical.hunger = 60.0;
        cat.physical.energy = 90.0;
    }));
    assert_eq!(session.store.get(&agent).unwrap().mood.mood, Mood::Playful);
}

#[test]
fn failed_attempts_are_recorded_as_negative() {
    let mut session = Session::new(InteractionConfig::default());
    let agent = session.store.create(None, "Independent", None, 0.0).id.clone();
    session.ledger.adjust(HumanId(7), &agent, -1.0, 0.0);

    let mut failed = false;
    for n in 0..50_u32 {
        if !session.interact(HumanId(7), &agent, "Pet", f64::from(n) * 3.0).success {
            failed = true;
            break;
        }
    }
    assert!(failed);

    let relationship = session.ledger.peek(HumanId(7), &agent).unwrap();
    let last = relationship.history.back().unwrap();
    assert_eq!(last.interaction, InteractionType::Pet);
    assert_eq!(last.outcome, InteractionOutcome::Negative);
    let negatives = relationship
        .history
        .iter()
        .filter(|r| r.outcome == InteractionOutcome::Negative)
        .count();
    let positives = relationship
        .history
        .iter()
        .filter(|r| r.outcome == InteractionOutcome::Positive)
        .count();
    assert_eq!(negatives, 1);
    assert_eq!(positives, relationship.history.len().saturating_sub(1));
}
