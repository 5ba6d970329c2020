//! Agent store: the canonical state record of every cat.
//!
//! The store owns each [`Agent`] together with its [`AiMemory`]; both are
//! inserted by [`AgentStore::create`] and dropped by [`AgentStore::remove`],
//! so an agent never exists without its memory.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use catnip_types::{Agent, AgentId, BehaviorState, DVec3, MoodState, PhysicalState, Timers};
use tracing::{debug, warn};

use crate::memory::AiMemory;
use crate::names::NameGenerator;
use crate::profile::{ProfileOverrides, build_profile};

/// Owns every live agent and its decision memory.
#[derive(Debug, Clone, Default)]
pub struct AgentStore {
    agents: BTreeMap<AgentId, Agent>,
    memories: BTreeMap<AgentId, AiMemory>,
    next_serial: u32,
    names: NameGenerator,
}

impl AgentStore {
    /// Create an empty store with the default name seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store whose generated names follow `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            names: NameGenerator::new(seed),
            ..Self::default()
        }
    }

    /// Create an agent with default state.
    ///
    /// Generates a `cat_NNN` id when `id` is `None`. Unknown archetypes fall
    /// back to the base profile. An existing agent with the same id is
    /// replaced, memory included.
    pub fn create(
        &mut self,
        id: Option<AgentId>,
        archetype: &str,
        overrides: Option<&ProfileOverrides>,
        now: f64,
    ) -> &Agent {
        let id = id.unwrap_or_else(|| self.generate_id());
        let profile = build_profile(archetype, overrides);
        let name = self.names.name_for(&id, &profile.breed, &profile.personality);

        let agent = Agent {
            id: id.clone(),
            name,
            profile,
            position: DVec3::ZERO,
            mood: MoodState::default(),
            physical: PhysicalState::default(),
            behavior: BehaviorState::default(),
            social: BTreeMap::new(),
            timers: Timers { last_update: now },
        };

        debug!(agent_id = %id, archetype, breed = %agent.profile.breed, "Agent created");
        self.memories.insert(id.clone(), AiMemory::default());

        match self.agents.entry(id) {
            Entry::Occupied(mut slot) => {
                warn!(agent_id = %slot.key(), "Replacing existing agent with the same id");
                slot.insert(agent);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(agent),
        }
    }

    /// Pin a display name, replacing the generated one.
    pub fn rename(&mut self, id: &AgentId, name: String) -> bool {
        let Some(agent) = self.agents.get_mut(id) else {
            return false;
        };
        agent.name.clone_from(&name);
        self.names.assign(id, name);
        true
    }

    fn generate_id(&mut self) -> AgentId {
        loop {
            self.next_serial = self.next_serial.saturating_add(1);
            let candidate = AgentId::new(format!("cat_{:03}", self.next_serial));
            if !self.agents.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Look up an agent.
    pub fn get(&self, id: &AgentId) -> Option<&Agent> {
        self.agents.get(id)
    }

    /// Look up an agent mutably.
    pub fn get_mut(&mut self, id: &AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id)
    }

    /// Look up an agent's decision memory.
    pub fn memory(&self, id: &AgentId) -> Option<&AiMemory> {
        self.memories.get(id)
    }

    /// Look up an agent and its memory together, both mutably.
    pub fn get_with_memory_mut(&mut self, id: &AgentId) -> Option<(&mut Agent, &mut AiMemory)> {
        let agent = self.agents.get_mut(id)?;
        let memory = self.memories.get_mut(id)?;
        Some((agent, memory))
    }

    /// Remove an agent and its memory. Returns the removed agent.
    pub fn remove(&mut self, id: &AgentId) -> Option<Agent> {
        self.memories.remove(id);
        self.names.forget(id);
        self.agents.remove(id)
    }

    /// Whether an agent exists.
    pub fn contains(&self, id: &AgentId) -> bool {
        self.agents.contains_key(id)
    }

    /// Iterate all agents in id order.
    pub fn all(&self) -> impl Iterator<Item = (&AgentId, &Agent)> {
        self.agents.iter()
    }

    /// Snapshot of all ids in iteration order.
    pub fn ids(&self) -> Vec<AgentId> {
        self.agents.keys().cloned().collect()
    }

    /// Number of agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use catnip_types::{Action, Mood};

    use super::*;

    #[test]
    fn create_initializes_documented_defaults() {
        let mut store = AgentStore::new();
        let agent = store.create(None, "Friendly", None, 12.0).clone();
        assert_eq!(agent.id, AgentId::from("cat_001"));
        assert!((agent.physical.hunger - 50.0).abs() < f64::EPSILON);
        assert!((agent.physical.energy - 100.0).abs() < f64::EPSILON);
        assert!((agent.physical.health - 100.0).abs() < f64::EPSILON);
        assert!((agent.physical.grooming - 80.0).abs() < f64::EPSILON);
        assert_eq!(agent.mood.mood, Mood::Happy);
        assert!((agent.mood.intensity - 0.5).abs() < f64::EPSILON);
        assert_eq!(agent.behavior.current_action, Action::Idle);
        assert!(!agent.behavior.is_moving);
        assert!(agent.behavior.held_by.is_none());
        assert!((agent.timers.last_update - 12.0).abs() < f64::EPSILON);
        assert!(!agent.name.is_empty());
        assert!(store.memory(&agent.id).is_some());
    }

    #[test]
    fn generated_ids_are_sequential_and_skip_taken() {
        let mut store = AgentStore::new();
        store.create(Some(AgentId::from("cat_002")), "Calico", None, 0.0);
        let first = store.create(None, "Calico", None, 0.0).id.clone();
        let second = store.create(None, "Calico", None, 0.0).id.clone();
        assert_eq!(first, AgentId::from("cat_001"));
        assert_eq!(second, AgentId::from("cat_003"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn unknown_archetype_falls_back() {
        let mut store = AgentStore::new();
        let agent = store.create(Some(AgentId::from("x")), "Nope", None, 0.0);
        assert_eq!(agent.profile.breed, "Default");
    }

    #[test]
    fn remove_drops_agent_and_memory() {
        let mut store = AgentStore::new();
        let id = store.create(None, "Siamese", None, 0.0).id.clone();
        assert!(store.get_with_memory_mut(&id).is_some());
        let removed = store.remove(&id);
        assert!(removed.is_some());
        assert!(store.get(&id).is_none());
        assert!(store.memory(&id).is_none());
        assert!(store.is_empty());
        assert!(store.remove(&id).is_none());
    }

    #[test]
    fn rename_pins_name() {
        let mut store = AgentStore::new();
        let id = store.create(None, "Siamese", None, 0.0).id.clone();
        assert!(store.rename(&id, "Mochi".to_owned()));
        assert_eq!(store.get(&id).unwrap().name, "Mochi");
        assert!(!store.rename(&AgentId::from("ghost"), "Boo".to_owned()));
    }
}
