//! Behavior engine, simulated clock and Update Scheduler for the Catnip
//! simulation.
//!
//! This crate turns the agent state kept by `catnip-agents` into behavior:
//! every tick each cat perceives the humans and trees around it, re-weights
//! its actions when its decision interval is up, and runs one tick of its
//! current action.
//!
//! # Modules
//!
//! - [`behavior`] -- Per-action tick handlers and the handler table
//! - [`clock`] -- Simulated clock advanced once per tick
//! - [`config`] -- Configuration loading from `catnip-config.yaml`
//! - [`decision`] -- Action weights, noise and personality overrides
//! - [`engine`] -- One agent update ([`BehaviorEngine`])
//! - [`observer`] -- Notification sink for agent changes
//! - [`operator`] -- Pause, resume, speed and stop controls
//! - [`perception`] -- Nearest human, held tool and nearest tree
//! - [`runner`] -- The async scheduler loop
//! - [`service`] -- Public operations facade ([`CatService`])
//! - [`tick`] -- One pass over every agent
//!
//! [`BehaviorEngine`]: engine::BehaviorEngine
//! [`CatService`]: service::CatService

pub mod behavior;
pub mod clock;
pub mod config;
pub mod decision;
pub mod engine;
pub mod observer;
pub mod operator;
pub mod perception;
pub mod runner;
pub mod service;
pub mod tick;
