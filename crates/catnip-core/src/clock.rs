//! Simulated clock.
//!
//! The clock is the single source of simulated time. Every tick advances it
//! by a fixed interval; every timestamp the engine, the mediator and the
//! registries see is a reading of this clock in seconds.
//!
//! # Design Principles
//!
//! - The tick counter uses checked arithmetic (no silent overflow).
//! - Nothing in the core reads the wall clock. Tests drive time directly.

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,

    /// Invalid clock configuration (e.g. zero tick interval).
    #[error("invalid clock configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Simulated clock advancing in fixed steps.
#[derive(Debug, Clone, PartialEq)]
pub struct SimClock {
    /// Ticks executed so far.
    tick: u64,

    /// Simulated seconds elapsed since the clock started.
    now: f64,

    /// Seconds added per tick.
    tick_seconds: f64,
}

impl SimClock {
    /// Create a clock at tick 0, time 0, stepping `tick_interval_ms` per tick.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if the interval is zero or does
    /// not fit in 32 bits of milliseconds.
    pub fn new(tick_interval_ms: u64) -> Result<Self, ClockError> {
        if tick_interval_ms == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "tick_interval_ms must be at least 1".to_owned(),
            });
        }
        let ms = u32::try_from(tick_interval_ms).map_err(|_err| ClockError::InvalidConfig {
            reason: format!("tick_interval_ms {tick_interval_ms} is too large"),
        })?;
        Ok(Self {
            tick: 0,
            now: 0.0,
            tick_seconds: f64::from(ms) / 1000.0,
        })
    }

    /// Create a clock from explicit parameters (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `tick_seconds` is not a
    /// positive finite number.
    pub fn from_parts(tick: u64, now: f64, tick_seconds: f64) -> Result<Self, ClockError> {
        if !(tick_seconds.is_finite() && tick_seconds > 0.0) {
            return Err(ClockError::InvalidConfig {
                reason: format!("tick_seconds must be positive, got {tick_seconds}"),
            });
        }
        Ok(Self {
            tick,
            now,
            tick_seconds,
        })
    }

    /// Advance by one tick. Returns the new tick number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TickOverflow`] if the tick counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.tick = self.tick.checked_add(1).ok_or(ClockError::TickOverflow)?;
        self.now += self.tick_seconds;
        Ok(self.tick)
    }

    /// Current tick number.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Current simulated time in seconds.
    pub const fn now(&self) -> f64 {
        self.now
    }

    /// Seconds per tick.
    pub const fn tick_seconds(&self) -> f64 {
        self.tick_seconds
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let clock = SimClock::new(100).unwrap();
        assert_eq!(clock.tick(), 0);
        assert!(clock.now().abs() < f64::EPSILON);
        assert!((clock.tick_seconds() - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn advance_accumulates_time() {
        let mut clock = SimClock::new(250).unwrap();
        for _ in 0..8 {
            clock.advance().unwrap();
        }
        assert_eq!(clock.tick(), 8);
        assert!((clock.now() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn zero_interval_rejected() {
        assert!(matches!(
            SimClock::new(0),
            Err(ClockError::InvalidConfig { .. })
        ));
        assert!(SimClock::from_parts(0, 0.0, 0.0).is_err());
        assert!(SimClock::from_parts(0, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn overflow_detected() {
        let mut clock = SimClock::from_parts(u64::MAX, 0.0, 0.1).unwrap();
        assert!(matches!(clock.advance(), Err(ClockError::TickOverflow)));
    }
}
