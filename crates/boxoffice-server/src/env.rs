//! Clock environment.
//!
//! Decouples request handling from the system clock so replies that carry a
//! timestamp can be asserted exactly in tests.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock time for replies.
pub trait Clock: Clone + Send + Sync + 'static {
    /// Seconds since the Unix epoch.
    fn wall_clock_secs(&self) -> u64;
}

/// Production clock backed by [`SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn wall_clock_secs(&self) -> u64 {
        // A clock set before 1970 reports the epoch itself
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_secs())
    }
}

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn wall_clock_secs(&self) -> u64 {
        self.0
    }
}
