//! Time source abstraction.
//!
//! Save timestamps are opaque strings as far as the core is concerned; this
//! trait is the only place wall-clock time enters the runtime, so tests can
//! swap in a fixed value and get byte-identical snapshots.

use chrono::{SecondsFormat, Utc};
use doors_core::Timestamp;

/// Source of the timestamps stamped onto saves and slot metadata.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time as UTC RFC 3339 with millisecond precision.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

/// A clock pinned to one instant, for deterministic tests.
#[derive(Clone, Debug)]
pub struct FixedClock {
    timestamp: Timestamp,
}

impl FixedClock {
    pub fn new(timestamp: impl Into<Timestamp>) -> Self {
        Self {
            timestamp: timestamp.into(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.timestamp.clone()
    }
}
