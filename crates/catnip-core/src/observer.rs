//! Notification sink for agent lifecycle and state changes.
//!
//! The service calls the sink synchronously and never waits on a reply;
//! implementations that forward to a network or a channel must not block.

use catnip_types::{AgentId, AgentSnapshot};

/// Receives agent notifications from the service.
pub trait AgentObserver: Send {
    /// A new agent was spawned.
    fn on_agent_created(&mut self, snapshot: &AgentSnapshot);

    /// An agent changed (interaction, periodic broadcast).
    fn on_agent_updated(&mut self, snapshot: &AgentSnapshot);

    /// An agent was removed.
    fn on_agent_removed(&mut self, agent: &AgentId);
}

/// Observer that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl AgentObserver for NoOpObserver {
    fn on_agent_created(&mut self, _snapshot: &AgentSnapshot) {}

    fn on_agent_updated(&mut self, _snapshot: &AgentSnapshot) {}

    fn on_agent_removed(&mut self, _agent: &AgentId) {}
}

/// Observer that records every notification, for tests and replay.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    /// Ids of created agents, in order.
    pub created: Vec<AgentId>,
    /// Ids of updated agents, in order.
    pub updated: Vec<AgentId>,
    /// Ids of removed agents, in order.
    pub removed: Vec<AgentId>,
}

impl AgentObserver for RecordingObserver {
    fn on_agent_created(&mut self, snapshot: &AgentSnapshot) {
        self.created.push(snapshot.id.clone());
    }

    fn on_agent_updated(&mut self, snapshot: &AgentSnapshot) {
        self.updated.push(snapshot.id.clone());
    }

    fn on_agent_removed(&mut self, agent: &AgentId) {
        self.removed.push(agent.clone());
    }
}
