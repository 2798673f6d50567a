//! Time source abstraction for creation-time-derived ids.

use std::time::{SystemTime, UNIX_EPOCH};

/// Represents an entity responsible for providing the current time across the
/// application. Injecting it keeps id generation deterministic in tests.
pub trait Clock {
    /// Current wall-clock time as unix epoch milliseconds.
    fn now_epoch_ms(&self) -> i64;
}

/// System wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0)
    }
}
