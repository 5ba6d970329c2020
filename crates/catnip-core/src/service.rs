//! The public operations facade.
//!
//! [`CatService`] owns every registry of one simulation and exposes the
//! operations the request-handling layer calls: spawning and removing cats,
//! interactions, tools, read-only snapshots and the scheduler tick. Each
//! call runs to completion before the next, so an interaction never sees
//! an agent halfway through its update.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use catnip_agents::humans::{HumanContextRegistry, HumanSettings, SettingsPatch};
use catnip_agents::interaction::{InteractionData, InteractionMediator, InteractionTargets};
use catnip_agents::profile::render_model;
use catnip_agents::relationship::RelationshipLedger;
use catnip_agents::store::AgentStore;
use catnip_agents::world::{WorldQuery, horizontal_distance, snap_to_ground};
use catnip_agents::{AgentError, HumanError};
use catnip_types::{
    Agent, AgentId, AgentSnapshot, DVec3, HumanId, InteractionResult, RelationshipSnapshot,
    ToolId, ToolUse,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::clock::{ClockError, SimClock};
use crate::config::{SimulationConfig, WorldConfig};
use crate::engine::BehaviorEngine;
use crate::observer::AgentObserver;
use crate::tick::{self, SimulationState, TickError, TickSummary};

/// Candidate points tried when looking for a free spawn spot.
const SPAWN_ATTEMPTS: u32 = 10;

/// Errors returned by service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// An agent operation failed.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },

    /// A human registry operation failed.
    #[error("human error: {source}")]
    Human {
        /// The underlying human error.
        #[from]
        source: HumanError,
    },

    /// The clock could not be built or advanced.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// A tick failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// One simulation and the operations around it.
#[derive(Debug)]
pub struct CatService<W, O> {
    state: SimulationState<W>,
    mediator: InteractionMediator,
    observer: O,
    world_config: WorldConfig,
    spawn_counts: BTreeMap<HumanId, u32>,
    rng: SmallRng,
}

impl<W: WorldQuery, O: AgentObserver> CatService<W, O> {
    /// Build a fresh simulation from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Clock`] if the tick interval is invalid.
    pub fn new(config: &SimulationConfig, world: W, observer: O) -> Result<Self, ServiceError> {
        let seed = config.world.seed;
        let state = SimulationState {
            clock: SimClock::new(config.world.tick_interval_ms)?,
            store: AgentStore::with_seed(seed),
            ledger: RelationshipLedger::new(config.interaction.history_cap),
            humans: HumanContextRegistry::new(),
            engine: BehaviorEngine::new(config.behavior.clone(), config.needs.clone(), seed),
            world,
        };
        Ok(Self {
            state,
            mediator: InteractionMediator::new(config.interaction.clone()),
            observer,
            world_config: config.world.clone(),
            spawn_counts: BTreeMap::new(),
            rng: SmallRng::seed_from_u64(seed.wrapping_add(1)),
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Current simulated time in seconds.
    pub const fn now(&self) -> f64 {
        self.state.clock.now()
    }

    /// Number of ticks run so far.
    pub const fn tick_count(&self) -> u64 {
        self.state.clock.tick()
    }

    /// The simulation state.
    pub const fn state(&self) -> &SimulationState<W> {
        &self.state
    }

    /// The simulation state, mutably.
    pub const fn state_mut(&mut self) -> &mut SimulationState<W> {
        &mut self.state
    }

    /// The host world.
    pub const fn world(&self) -> &W {
        &self.state.world
    }

    /// The host world, mutably.
    pub const fn world_mut(&mut self) -> &mut W {
        &mut self.state.world
    }

    /// The notification sink.
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    /// The interaction rules and cooldowns.
    pub const fn mediator(&self) -> &InteractionMediator {
        &self.mediator
    }

    // -----------------------------------------------------------------------
    // Humans
    // -----------------------------------------------------------------------

    /// Register a connecting human.
    pub fn register_human(&mut self, human: HumanId) {
        self.state.humans.register(human);
        info!(human_id = %human, "Human registered");
    }

    /// Unregister a leaving human. Cats they were holding are put down where
    /// they are. Returns whether the human was registered.
    pub fn unregister_human(&mut self, human: HumanId) -> bool {
        for id in self.state.store.ids() {
            if let Some((agent, memory)) = self.state.store.get_with_memory_mut(&id)
                && agent.behavior.held_by == Some(human)
            {
                agent.behavior.held_by = None;
                agent.position = snap_to_ground(&self.state.world, agent.position);
                memory.force_decision();
                debug!(agent_id = %id, human_id = %human, "Released cat of leaving human");
            }
        }
        let removed = self.state.humans.unregister(human);
        if removed {
            info!(human_id = %human, "Human unregistered");
        }
        removed
    }

    // -----------------------------------------------------------------------
    // Spawning and removal
    // -----------------------------------------------------------------------

    /// Spawn a cat for a human.
    ///
    /// `archetype` may be an archetype or a breed name. Without a position
    /// the cat lands on a random free spot within the spawn radius of the
    /// origin. The new id is `player_cat_{human}_{n}`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Agent`] if the new agent cannot be placed.
    pub fn spawn_agent(
        &mut self,
        human: HumanId,
        archetype: &str,
        position: Option<DVec3>,
    ) -> Result<AgentId, ServiceError> {
        let count = self.spawn_counts.entry(human).or_insert(0);
        *count = count.saturating_add(1);
        let id = AgentId::new(format!("player_cat_{human}_{count}"));

        let now = self.now();
        self.state.store.create(Some(id.clone()), archetype, None, now);
        self.place_new_agent(&id, position)?;
        info!(agent_id = %id, human_id = %human, archetype, "Cat spawned");
        Ok(id)
    }

    /// Spawn an ownerless cat with a store-generated `cat_NNN` id.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Agent`] if the new agent cannot be placed.
    pub fn spawn_wild_agent(
        &mut self,
        archetype: &str,
        name: Option<String>,
        position: Option<DVec3>,
    ) -> Result<AgentId, ServiceError> {
        let now = self.now();
        let id = self.state.store.create(None, archetype, None, now).id.clone();
        if let Some(name) = name {
            self.state.store.rename(&id, name);
        }
        self.place_new_agent(&id, position)?;
        info!(agent_id = %id, archetype, "Wild cat spawned");
        Ok(id)
    }

    /// Put a freshly created agent on the ground and announce it.
    fn place_new_agent(&mut self, id: &AgentId, position: Option<DVec3>) -> Result<(), ServiceError> {
        let point = position.unwrap_or_else(|| self.random_spawn_point(id));
        let grounded = snap_to_ground(&self.state.world, point);
        let (agent, memory) = self
            .state
            .store
            .get_with_memory_mut(id)
            .ok_or_else(|| AgentError::AgentNotFound(id.clone()))?;
        agent.position = grounded;
        memory.grounded = true;
        let snapshot = agent_snapshot(agent, None);
        self.observer.on_agent_created(&snapshot);
        Ok(())
    }

    /// Random point within the spawn radius, preferring spots away from
    /// other cats. Falls back to the last candidate.
    fn random_spawn_point(&mut self, new_id: &AgentId) -> DVec3 {
        let radius = self.world_config.spawn_radius.max(0.0);
        let separation = self.world_config.spawn_min_separation;
        let mut candidate = DVec3::ZERO;
        for _ in 0..SPAWN_ATTEMPTS {
            let angle = self.rng.random_range(0.0..TAU);
            let distance = self.rng.random_range(0.0..=radius);
            candidate = DVec3::new(angle.cos() * distance, 0.0, angle.sin() * distance);
            let crowded = self
                .state
                .store
                .all()
                .filter(|(id, _)| *id != new_id)
                .any(|(_, other)| horizontal_distance(other.position, candidate) < separation);
            if !crowded {
                break;
            }
        }
        candidate
    }

    /// Remove a cat and everything keyed by it.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Agent`] if the cat does not exist.
    pub fn remove_agent(&mut self, id: &AgentId) -> Result<(), ServiceError> {
        self.state
            .store
            .remove(id)
            .ok_or_else(|| AgentError::AgentNotFound(id.clone()))?;
        self.state.ledger.forget_agent(id);
        self.state.humans.forget_agent(id);
        self.mediator.forget_agent(id);
        self.observer.on_agent_removed(id);
        info!(agent_id = %id, "Cat removed");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Interactions and tools
    // -----------------------------------------------------------------------

    /// Resolve an interaction request. Rejections are reported in the
    /// result, never as errors.
    pub fn interact(
        &mut self,
        human: HumanId,
        agent: &AgentId,
        kind: &str,
        data: Option<&InteractionData>,
    ) -> InteractionResult {
        let now = self.now();
        let mut targets = InteractionTargets {
            store: &mut self.state.store,
            ledger: &mut self.state.ledger,
            world: &self.state.world,
        };
        let result = self
            .mediator
            .interact(&mut targets, human, agent, kind, data, now, &mut self.rng);
        if let Some(snapshot) = self.get_agent(agent, Some(human)) {
            self.observer.on_agent_updated(&snapshot);
        }
        result
    }

    /// Equip an unlocked tool.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Human`] if the human is unknown or the tool
    /// is locked.
    pub fn equip_tool(&mut self, human: HumanId, tool: ToolId) -> Result<(), ServiceError> {
        let now = self.now();
        Ok(self.state.humans.equip_tool(human, tool, now)?)
    }

    /// Put the current tool away.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Human`] if the human is unknown.
    pub fn unequip_tool(&mut self, human: HumanId) -> Result<(), ServiceError> {
        let now = self.now();
        Ok(self.state.humans.unequip_tool(human, now)?)
    }

    /// Use the equipped tool, optionally at a world position.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Human`] if the human is unknown, has no tool
    /// equipped or the tool's action is cooling down.
    pub fn use_tool(
        &mut self,
        human: HumanId,
        position: Option<DVec3>,
    ) -> Result<ToolUse, ServiceError> {
        let now = self.now();
        Ok(self.state.humans.use_tool(human, position, now)?)
    }

    /// Unlock a tool. Returns whether it was newly unlocked.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Human`] if the human is unknown.
    pub fn unlock_tool(&mut self, human: HumanId, tool: ToolId) -> Result<bool, ServiceError> {
        Ok(self.state.humans.unlock_tool(human, tool)?)
    }

    /// Merge a partial settings update.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Human`] if the human is unknown.
    pub fn update_settings(
        &mut self,
        human: HumanId,
        patch: SettingsPatch,
    ) -> Result<HumanSettings, ServiceError> {
        Ok(self.state.humans.update_settings(human, patch)?)
    }

    // -----------------------------------------------------------------------
    // Read-only projections
    // -----------------------------------------------------------------------

    /// Snapshot every cat. Only the requester's own relationship is filled.
    pub fn get_all_agents(&self, requester: Option<HumanId>) -> BTreeMap<AgentId, AgentSnapshot> {
        self.state
            .store
            .all()
            .map(|(id, agent)| (id.clone(), snapshot_for(agent, requester)))
            .collect()
    }

    /// Snapshot one cat.
    pub fn get_agent(&self, id: &AgentId, requester: Option<HumanId>) -> Option<AgentSnapshot> {
        self.state
            .store
            .get(id)
            .map(|agent| snapshot_for(agent, requester))
    }

    /// Relationship between a human and a cat, created on first access.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Agent`] if the cat does not exist.
    pub fn get_relationship(
        &mut self,
        human: HumanId,
        agent: &AgentId,
    ) -> Result<RelationshipSnapshot, ServiceError> {
        if !self.state.store.contains(agent) {
            return Err(AgentError::AgentNotFound(agent.clone()).into());
        }
        let now = self.now();
        Ok(self.state.ledger.get(human, agent, now).snapshot())
    }

    // -----------------------------------------------------------------------
    // Scheduler
    // -----------------------------------------------------------------------

    /// Run one tick and broadcast snapshots when the broadcast interval
    /// comes around.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Tick`] if the clock cannot advance.
    pub fn tick(&mut self) -> Result<TickSummary, ServiceError> {
        let summary = tick::run_tick(&mut self.state)?;
        let every = self.world_config.broadcast_interval_ticks;
        if every > 0 && summary.tick.is_multiple_of(every) {
            for (_, agent) in self.state.store.all() {
                self.observer.on_agent_updated(&agent_snapshot(agent, None));
            }
        }
        Ok(summary)
    }
}

fn snapshot_for(agent: &Agent, requester: Option<HumanId>) -> AgentSnapshot {
    let relationship = requester.and_then(|human| agent.social.get(&human).cloned());
    agent_snapshot(agent, relationship)
}

/// Read-only projection of an agent for rendering and UI.
pub fn agent_snapshot(agent: &Agent, relationship: Option<RelationshipSnapshot>) -> AgentSnapshot {
    AgentSnapshot {
        id: agent.id.clone(),
        name: agent.name.clone(),
        breed: agent.profile.breed.clone(),
        model: render_model(&agent.profile.breed).to_owned(),
        position: agent.position,
        mood: agent.mood,
        current_action: agent.behavior.current_action,
        target_position: agent.behavior.target_position,
        is_moving: agent.behavior.is_moving,
        held_by: agent.behavior.held_by,
        reacting_to: agent.behavior.action_data.reacting_to,
        personality: agent.profile.personality,
        relationship,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use catnip_agents::world::StaticWorld;

    use super::*;
    use crate::observer::RecordingObserver;

    fn service() -> CatService<StaticWorld, RecordingObserver> {
        let config = SimulationConfig::default();
        CatService::new(&config, StaticWorld::flat(2.0), RecordingObserver::default()).unwrap()
    }

    #[test]
    fn spawn_ids_count_per_human() {
        let mut svc = service();
        let a = svc.spawn_agent(HumanId(7), "Friendly", None).unwrap();
        let b = svc.spawn_agent(HumanId(7), "Siamese", None).unwrap();
        let c = svc.spawn_agent(HumanId(8), "Tabby", None).unwrap();
        assert_eq!(a.as_str(), "player_cat_7_1");
        assert_eq!(b.as_str(), "player_cat_7_2");
        assert_eq!(c.as_str(), "player_cat_8_1");
        assert_eq!(svc.observer().created, vec![a, b, c]);
    }

    #[test]
    fn spawn_at_explicit_position_is_grounded() {
        let mut svc = service();
        let id = svc
            .spawn_agent(HumanId(1), "Calico", Some(DVec3::new(3.0, 40.0, -4.0)))
            .unwrap();
        let snapshot = svc.get_agent(&id, None).unwrap();
        assert!((snapshot.position.y - 2.1).abs() < 1e-9);
        assert!((snapshot.position.x - 3.0).abs() < 1e-9);
        assert_eq!(snapshot.model, "Jerald");
        assert!(svc.state().store.memory(&id).unwrap().grounded);
    }

    #[test]
    fn wild_spawn_keeps_given_name() {
        let mut svc = service();
        let id = svc
            .spawn_wild_agent("Independent", Some("Pebble".to_owned()), None)
            .unwrap();
        assert!(id.as_str().starts_with("cat_"));
        assert_eq!(svc.get_agent(&id, None).unwrap().name, "Pebble");
    }

    #[test]
    fn remove_unknown_agent_fails() {
        let mut svc = service();
        let result = svc.remove_agent(&AgentId::from("nobody"));
        assert!(matches!(
            result,
            Err(ServiceError::Agent {
                source: AgentError::AgentNotFound(_)
            })
        ));
    }

    #[test]
    fn relationship_requires_existing_cat() {
        let mut svc = service();
        assert!(svc.get_relationship(HumanId(1), &AgentId::from("nobody")).is_err());
        let id = svc.spawn_agent(HumanId(1), "Friendly", None).unwrap();
        let rel = svc.get_relationship(HumanId(1), &id).unwrap();
        assert!((rel.trust_level - 0.5).abs() < 1e-9);
    }

    #[test]
    fn snapshots_hide_other_humans_relationships() {
        let mut svc = service();
        svc.world_mut().place_human(HumanId(1), DVec3::ZERO);
        let id = svc.spawn_agent(HumanId(1), "Friendly", None).unwrap();
        let result = svc.interact(HumanId(1), &id, "Feed", None);
        assert!(!result.message.is_empty());

        let mine = svc.get_all_agents(Some(HumanId(1)));
        assert!(mine[&id].relationship.is_some());
        let theirs = svc.get_all_agents(Some(HumanId(2)));
        assert!(theirs[&id].relationship.is_none());
        let anonymous = svc.get_all_agents(None);
        assert!(anonymous[&id].relationship.is_none());
    }

    #[test]
    fn leaving_human_drops_held_cat() {
        let mut svc = service();
        svc.register_human(HumanId(3));
        let id = svc.spawn_agent(HumanId(3), "Friendly", None).unwrap();
        svc.state_mut().store.get_mut(&id).unwrap().behavior.held_by = Some(HumanId(3));

        assert!(svc.unregister_human(HumanId(3)));
        assert_eq!(svc.get_agent(&id, None).unwrap().held_by, None);
        assert!(!svc.unregister_human(HumanId(3)));
    }

    #[test]
    fn broadcast_follows_interval() {
        let mut svc = service();
        svc.spawn_agent(HumanId(1), "Friendly", None).unwrap();
        for _ in 0..9 {
            svc.tick().unwrap();
        }
        assert!(svc.observer().updated.is_empty());
        svc.tick().unwrap();
        assert_eq!(svc.observer().updated.len(), 1);
    }
}
