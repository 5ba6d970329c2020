//! Observer that forwards agent notifications to broadcast subscribers.
//!
//! Each notification is serialized to JSON once and pushed onto a
//! [`tokio::sync::broadcast`] channel. Rendering clients (or the logging
//! task in `main`) subscribe to the channel; slow subscribers lag and drop
//! messages rather than stalling the tick loop.

use catnip_core::observer::AgentObserver;
use catnip_types::{AgentId, AgentSnapshot};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Wire format of one notification.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent<'a> {
    /// A cat was spawned.
    Created {
        /// Its first snapshot.
        snapshot: &'a AgentSnapshot,
    },
    /// A cat changed.
    Updated {
        /// Its latest snapshot.
        snapshot: &'a AgentSnapshot,
    },
    /// A cat was removed.
    Removed {
        /// The removed cat.
        agent_id: &'a AgentId,
    },
}

/// Forwards notifications as JSON strings.
#[derive(Debug, Clone)]
pub struct BroadcastObserver {
    sender: broadcast::Sender<String>,
}

impl BroadcastObserver {
    /// Create an observer and its channel with room for `capacity` messages.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to the notification stream.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }

    fn publish(&self, event: &AgentEvent<'_>) {
        let message = match serde_json::to_string(event) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "Failed to serialize agent event");
                return;
            }
        };
        // No subscribers is not an error; the event is simply dropped.
        let receivers = self.sender.send(message).unwrap_or(0);
        debug!(receivers, "Agent event broadcast");
    }
}

impl AgentObserver for BroadcastObserver {
    fn on_agent_created(&mut self, snapshot: &AgentSnapshot) {
        self.publish(&AgentEvent::Created { snapshot });
    }

    fn on_agent_updated(&mut self, snapshot: &AgentSnapshot) {
        self.publish(&AgentEvent::Updated { snapshot });
    }

    fn on_agent_removed(&mut self, agent: &AgentId) {
        self.publish(&AgentEvent::Removed { agent_id: agent });
    }
}
