//! Injected time source.
//!
//! All expiry arithmetic in the services goes through this trait so the
//! lifecycle state machines stay deterministic under test.

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Time provider used by every service
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Interval arithmetic helper
    fn add_minutes(&self, instant: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
        instant + Duration::minutes(minutes)
    }

    /// Ordering helper
    fn is_before(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        a < b
    }
}

/// Wall-clock time provider
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for deterministic expiry tests
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at the given instant
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Create a clock frozen at the current wall-clock time
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    /// Move the clock forward
    pub fn advance_minutes(&self, minutes: i64) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += Duration::minutes(minutes);
    }

    /// Move the clock forward by seconds
    pub fn advance_seconds(&self, seconds: i64) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += Duration::seconds(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::starting_now();
        let start = clock.now();

        clock.advance_minutes(3);
        assert_eq!(clock.now(), start + Duration::minutes(3));

        clock.advance_seconds(30);
        assert_eq!(clock.now(), start + Duration::seconds(210));
    }

    #[test]
    fn test_helpers() {
        let clock = SystemClock;
        let now = clock.now();

        let later = clock.add_minutes(now, 5);
        assert!(clock.is_before(now, later));
        assert!(!clock.is_before(later, now));
    }
}
