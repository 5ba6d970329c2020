//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup and the scheduler
//! run so `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: catnip_core::config::ConfigError,
    },

    /// A service operation failed during startup.
    #[error("service error: {source}")]
    Service {
        /// The underlying service error.
        #[from]
        source: catnip_core::service::ServiceError,
    },

    /// The scheduler run failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: catnip_core::runner::RunnerError,
    },

    /// Seeding the demo world failed.
    #[error("spawner error: {message}")]
    Spawner {
        /// Description of the spawner failure.
        message: String,
    },
}
