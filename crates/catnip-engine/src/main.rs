//! Engine binary for the Catnip simulation.
//!
//! Wires the behavior engine to a demo world and runs the Update Scheduler
//! until interrupted or the configured tick limit is reached.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `catnip-config.yaml`
//! 3. Build the demo world (ground, cat trees, human avatars)
//! 4. Create the service with a broadcast observer
//! 5. Connect the configured humans and spawn the seed cats
//! 6. Create run control and hook Ctrl-C to a clean stop
//! 7. Run the scheduler loop
//! 8. Log the result

mod error;
mod observer;
mod spawner;

use std::path::Path;
use std::sync::Arc;

use catnip_core::config::SimulationConfig;
use catnip_core::operator::OperatorState;
use catnip_core::runner;
use catnip_core::service::CatService;
use tokio::sync::Mutex;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::observer::BroadcastObserver;

/// Capacity of the notification channel.
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any initialization step or the run itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("catnip-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        world_name = %config.world.name,
        seed = config.world.seed,
        tick_interval_ms = config.world.tick_interval_ms,
        decision_noise = config.behavior.decision_noise,
        "Configuration loaded"
    );

    // 3. Build the demo world.
    let world = spawner::build_world(&config.agents);

    // 4. Create the service.
    let observer = BroadcastObserver::new(EVENT_CHANNEL_CAPACITY);
    let mut events = observer.subscribe();
    let mut service = CatService::new(&config, world, observer).map_err(EngineError::from)?;

    // 5. Seed humans and cats.
    spawner::connect_humans(&mut service, &config.agents)?;
    let seeded = spawner::spawn_seed_agents(&mut service, &config.agents)?;
    info!(cats = seeded.len(), "Simulation seeded");

    // Log every notification at debug level; a renderer would subscribe the
    // same way.
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(message) => debug!(event = %message, "Agent event"),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event logger lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // 6. Run control.
    let operator = Arc::new(OperatorState::new(
        config.world.tick_interval_ms,
        config.world.max_ticks,
    ));
    {
        let operator = Arc::clone(&operator);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Interrupt received, stopping");
                    operator.request_stop();
                }
                Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
            }
        });
    }
    info!(
        max_ticks = operator.max_ticks(),
        tick_interval_ms = operator.tick_interval_ms(),
        "Run control initialized"
    );

    // 7. Run the scheduler.
    let service = Mutex::new(service);
    let result = runner::run_simulation(&service, &operator)
        .await
        .map_err(EngineError::from)?;

    // 8. Log results.
    runner::log_simulation_end(&result);
    let cats = service.lock().await.get_all_agents(None);
    for (id, cat) in &cats {
        info!(
            agent_id = %id,
            name = %cat.name,
            action = ?cat.current_action,
            mood = ?cat.mood.mood,
            "Final cat state"
        );
    }

    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "catnip-engine shutdown complete"
    );

    Ok(())
}

/// Load `catnip-config.yaml` from the working directory, or defaults.
fn load_config() -> Result<SimulationConfig, EngineError> {
    let config_path = Path::new("catnip-config.yaml");
    if config_path.exists() {
        Ok(SimulationConfig::from_file(config_path)?)
    } else {
        info!("Config file not found, using defaults");
        Ok(SimulationConfig::default())
    }
}
