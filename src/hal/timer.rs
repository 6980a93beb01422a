//! Timer Abstractions
//!
//! Embassy-backed time source for the drivers and a rate limiter for
//! periodic work in the main loop.

use embassy_time::{Duration, Instant};

use super::Clock;

/// Millisecond clock driven by the embassy time driver
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyClock;

impl EmbassyClock {
    /// Create a new clock handle
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for EmbassyClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now_ms(&self) -> u32 {
        // Truncation gives the wrapping 32-bit counter the drivers expect
        Instant::now().as_millis() as u32
    }
}

impl defmt::Format for EmbassyClock {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "EmbassyClock({}ms)", self.now_ms());
    }
}

/// Rate limiter for periodic operations
pub struct RateLimiter {
    period: Duration,
    last: Option<Instant>,
}

impl RateLimiter {
    /// Create a rate limiter from period
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    /// Create a rate limiter from a period in milliseconds
    #[must_use]
    pub const fn from_ms(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Check if enough time has passed (and update if so)
    pub fn check(&mut self) -> bool {
        let now = Instant::now();

        match self.last {
            None => {
                self.last = Some(now);
                true
            }
            Some(last) if now - last >= self.period => {
                self.last = Some(now);
                true
            }
            Some(_) => false,
        }
    }
}
