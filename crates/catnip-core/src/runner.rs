//! Update Scheduler: the async loop around [`CatService::tick`].
//!
//! [`run_simulation`] drives ticks at the operator's tick interval with
//! support for:
//!
//! - **Bounded runs**: stop after `max_ticks`
//! - **Pause/resume**: the loop parks until resumed
//! - **Variable speed**: the real-time interval is read before every sleep
//! - **Clean stop**: checked before every tick
//!
//! The service sits behind a [`tokio::sync::Mutex`] so request handlers can
//! call operations between ticks. The lock is held for one tick at a time
//! and never across a sleep.

use tokio::sync::Mutex;
use tracing::{info, warn};

use catnip_agents::world::WorldQuery;

use crate::observer::AgentObserver;
use crate::operator::{OperatorState, SimulationEndReason};
use crate::service::{CatService, ServiceError};
use crate::tick::TickSummary;

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying service error.
        #[from]
        source: ServiceError,
    },
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed by this run.
    pub total_ticks: u64,
}

/// Run the scheduler loop until stopped or the tick limit is reached.
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick fails unrecoverably. Per-agent
/// failures never end the run.
pub async fn run_simulation<W, O>(
    service: &Mutex<CatService<W, O>>,
    operator: &OperatorState,
) -> Result<SimulationResult, RunnerError>
where
    W: WorldQuery,
    O: AgentObserver,
{
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks = operator.max_ticks(),
        tick_interval_ms = operator.tick_interval_ms(),
        "Simulation starting"
    );

    loop {
        // --- Check pause ---
        if operator.is_paused() {
            info!("Simulation paused, waiting for resume...");
            operator.wait_if_paused().await;
            info!("Simulation resumed");
        }

        // --- Check stop request (before tick) ---
        if operator.is_stop_requested() {
            info!("Stop requested");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::Stopped,
                final_summary: last_summary,
                total_ticks,
            });
        }

        // --- Execute tick ---
        let summary = service.lock().await.tick()?;
        total_ticks = total_ticks.saturating_add(1);

        // --- Check tick limit (after tick) ---
        if operator.tick_limit_reached(summary.tick) {
            info!(
                tick = summary.tick,
                max_ticks = operator.max_ticks(),
                "Tick limit reached"
            );
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::MaxTicksReached,
                final_summary: Some(summary),
                total_ticks,
            });
        }

        last_summary = Some(summary);

        // --- Sleep for tick interval ---
        let interval_ms = operator.tick_interval_ms();
        if interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(interval_ms)).await;
        } else {
            tokio::task::yield_now().await;
        }
    }
}

/// Log the end of a run.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            tick = summary.tick,
            now = summary.now,
            agents_updated = summary.agents_updated,
            agents_held = summary.agents_held,
            "Final tick summary"
        );
    } else {
        warn!("Simulation ended with no ticks executed");
    }
}
