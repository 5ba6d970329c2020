//! Run control shared between the scheduler loop and its host.
//!
//! The host (the engine binary, a test, a future admin surface) can pause,
//! resume, change tick speed and stop the scheduler without holding the
//! simulation lock. All fields are atomics so the loop reads them without
//! blocking.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::Notify;

/// Reason the scheduler loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimulationEndReason {
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// The host requested a stop.
    Stopped,
}

/// Shared run control.
#[derive(Debug)]
pub struct OperatorState {
    paused: AtomicBool,
    resume_notify: Notify,
    stop_requested: AtomicBool,
    tick_interval_ms: AtomicU64,
    /// Maximum number of ticks (0 = unlimited).
    max_ticks: u64,
}

impl OperatorState {
    /// Create run control for the given tick interval and tick limit.
    pub fn new(tick_interval_ms: u64, max_ticks: u64) -> Self {
        Self {
            paused: AtomicBool::new(false),
            resume_notify: Notify::new(),
            stop_requested: AtomicBool::new(false),
            tick_interval_ms: AtomicU64::new(tick_interval_ms),
            max_ticks,
        }
    }

    // -----------------------------------------------------------------------
    // Pause / Resume
    // -----------------------------------------------------------------------

    /// Whether the scheduler is paused.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Pause the scheduler before its next tick.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    /// Resume the scheduler and wake the loop.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
        self.resume_notify.notify_one();
    }

    /// Wait until the scheduler is no longer paused, or a stop is requested.
    pub async fn wait_if_paused(&self) {
        while self.is_paused() && !self.is_stop_requested() {
            self.resume_notify.notified().await;
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Request a clean stop. A paused loop is woken so it can exit.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        self.resume_notify.notify_one();
    }

    /// Whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    // -----------------------------------------------------------------------
    // Speed and limits
    // -----------------------------------------------------------------------

    /// Current real-time delay between ticks.
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms.load(Ordering::Acquire)
    }

    /// Change the real-time delay between ticks. Returns the previous value.
    ///
    /// Simulated time per tick is fixed by the clock; this only speeds up or
    /// slows down the loop.
    pub fn set_tick_interval_ms(&self, ms: u64) -> u64 {
        self.tick_interval_ms.swap(ms, Ordering::AcqRel)
    }

    /// Configured tick limit (0 = unlimited).
    pub const fn max_ticks(&self) -> u64 {
        self.max_ticks
    }

    /// Whether `tick` is at or past the tick limit.
    pub const fn tick_limit_reached(&self, tick: u64) -> bool {
        self.max_ticks > 0 && tick >= self.max_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_and_resume_toggle() {
        let op = OperatorState::new(100, 0);
        assert!(!op.is_paused());
        op.pause();
        assert!(op.is_paused());
        op.resume();
        assert!(!op.is_paused());
    }

    #[test]
    fn stop_is_sticky() {
        let op = OperatorState::new(100, 0);
        assert!(!op.is_stop_requested());
        op.request_stop();
        assert!(op.is_stop_requested());
    }

    #[test]
    fn unlimited_ticks_never_reach_limit() {
        let op = OperatorState::new(100, 0);
        assert!(!op.tick_limit_reached(u64::MAX));

        let bounded = OperatorState::new(100, 5);
        assert!(!bounded.tick_limit_reached(4));
        assert!(bounded.tick_limit_reached(5));
    }

    #[test]
    fn tick_interval_is_adjustable() {
        let op = OperatorState::new(100, 0);
        assert_eq!(op.set_tick_interval_ms(250), 100);
        assert_eq!(op.tick_interval_ms(), 250);
    }

    #[tokio::test]
    async fn stop_wakes_a_paused_loop() {
        let op = OperatorState::new(0, 0);
        op.pause();
        op.request_stop();
        op.wait_if_paused().await;
        assert!(op.is_paused());
    }
}
