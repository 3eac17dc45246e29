//! Time source abstraction
//!
//! Transaction and block timestamps are wall-clock seconds since the Unix
//! epoch. The clock is injectable so hash determinism can be exercised
//! with a pinned time.

use chrono::Utc;
use std::fmt;

/// Source of ledger timestamps (seconds since epoch)
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current time as fractional seconds since the Unix epoch
    fn now(&self) -> f64;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        let now = Utc::now();
        now.timestamp() as f64 + f64::from(now.timestamp_subsec_micros()) / 1_000_000.0
    }
}

/// Clock pinned to a fixed instant, for deterministic tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock;
        let a = clock.now();
        assert!(a > 1_600_000_000.0);
    }

    #[test]
    fn test_fixed_clock_is_pinned() {
        let clock = FixedClock(1_700_000_000.5);
        assert_eq!(clock.now(), 1_700_000_000.5);
        assert_eq!(clock.now(), clock.now());
    }
}
