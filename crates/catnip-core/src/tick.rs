//! Tick cycle: one pass of the Update Scheduler over every agent.
//!
//! Each tick runs these phases:
//!
//! 1. **Clock** -- advance simulated time by the tick interval.
//! 2. **Agents** -- run the [`BehaviorEngine`] on every agent in id order.
//!    A failing agent is logged and skipped; the rest still update.
//! 3. **Proximity** -- refresh each registered human's nearby-cat list.
//!
//! Agents never mutate each other, so the order within phase 2 only
//! matters for the shared random stream.
//!
//! [`BehaviorEngine`]: crate::engine::BehaviorEngine

use std::collections::BTreeMap;

use catnip_agents::humans::HumanContextRegistry;
use catnip_agents::relationship::RelationshipLedger;
use catnip_agents::store::AgentStore;
use catnip_agents::world::WorldQuery;
use catnip_types::{Action, AgentId, HumanId};
use tracing::{debug, warn};

use crate::clock::{ClockError, SimClock};
use crate::engine::{BehaviorEngine, UpdateOutcome};
use crate::perception::Environment;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// The clock could not advance.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },
}

/// Summary of a single tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Simulated time after the tick, in seconds.
    pub now: f64,
    /// Agents that ran an update.
    pub agents_updated: u32,
    /// Agents skipped because a human holds them.
    pub agents_held: u32,
    /// Agents that made a fresh decision this tick.
    pub decisions: u32,
    /// Number of agents per action after the tick.
    pub actions: BTreeMap<Action, u32>,
    /// Agents whose update failed and were skipped.
    pub failed: Vec<AgentId>,
}

/// The mutable state the tick cycle runs over.
///
/// Every registry is an owned value; a fresh state is a fresh simulation.
#[derive(Debug)]
pub struct SimulationState<W> {
    /// Simulated clock.
    pub clock: SimClock,
    /// Every cat and its decision memory.
    pub store: AgentStore,
    /// Human-cat relationships.
    pub ledger: RelationshipLedger,
    /// Per-human tool and settings state.
    pub humans: HumanContextRegistry,
    /// Decision and execution engine.
    pub engine: BehaviorEngine,
    /// The host world.
    pub world: W,
}

impl<W: WorldQuery> SimulationState<W> {
    /// Read-only view of the world at the current simulated time.
    pub fn environment(&self) -> Environment<'_> {
        Environment {
            world: &self.world,
            humans: &self.humans,
            ledger: &self.ledger,
            now: self.clock.now(),
        }
    }
}

/// Execute one tick.
///
/// # Errors
///
/// Returns [`TickError::Clock`] if the tick counter overflows. Per-agent
/// failures never abort the tick; they are reported in
/// [`TickSummary::failed`].
pub fn run_tick<W: WorldQuery>(state: &mut SimulationState<W>) -> Result<TickSummary, TickError> {
    // --- Phase 1: Clock ---
    let tick = state.clock.advance()?;
    let now = state.clock.now();

    // --- Phase 2: Agents ---
    let mut summary = TickSummary {
        tick,
        now,
        agents_updated: 0,
        agents_held: 0,
        decisions: 0,
        actions: BTreeMap::new(),
        failed: Vec::new(),
    };

    let env = Environment {
        world: &state.world,
        humans: &state.humans,
        ledger: &state.ledger,
        now,
    };
    for id in state.store.ids() {
        match state.engine.update_agent(&mut state.store, &env, &id) {
            Ok(UpdateOutcome::Held) => {
                summary.agents_held = summary.agents_held.saturating_add(1);
            }
            Ok(UpdateOutcome::Updated { decided, action }) => {
                summary.agents_updated = summary.agents_updated.saturating_add(1);
                if decided {
                    summary.decisions = summary.decisions.saturating_add(1);
                }
                let count = summary.actions.entry(action).or_insert(0);
                *count = count.saturating_add(1);
            }
            Err(e) => {
                warn!(tick, agent_id = %id, error = %e, "Agent update failed, skipping");
                summary.failed.push(id);
            }
        }
    }

    // --- Phase 3: Proximity ---
    refresh_nearby_agents(state);

    debug!(
        tick,
        now,
        updated = summary.agents_updated,
        held = summary.agents_held,
        decisions = summary.decisions,
        "Tick complete"
    );

    Ok(summary)
}

/// Recompute which cats are within search radius of each registered human.
fn refresh_nearby_agents<W: WorldQuery>(state: &mut SimulationState<W>) {
    let radius = state.engine.behavior_config().human_search_radius;
    let humans: Vec<HumanId> = state.humans.humans().map(|(id, _)| *id).collect();
    for human in humans {
        let nearby = state
            .world
            .resolve_human_avatar_position(human)
            .map(|avatar| {
                state
                    .store
                    .all()
                    .filter(|(_, agent)| agent.position.distance(avatar) <= radius)
                    .map(|(id, _)| id.clone())
                    .collect()
            })
            .unwrap_or_default();
        if let Err(e) = state.humans.update_nearby_agents(human, nearby) {
            warn!(human_id = %human, error = %e, "Nearby-agent refresh failed, skipping");
        }
    }
}
