//! System clock adapter

use chrono::{DateTime, Utc};
use numberland_application::Clock;

/// Wall-clock time, used to stamp `last_login` on new profiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_monotonic_enough() {
        let clock = SystemClock::new();
        let before = clock.now();
        let after = clock.now();
        assert!(after >= before);
        assert!(before.timestamp() > 1_700_000_000);
    }
}
