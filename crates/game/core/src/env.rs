//! Execution environment handed to the engine alongside the snapshot.
//!
//! The core never reads the wall clock. Whoever drives the engine supplies
//! the timestamp once per action, so a replayed action log reproduces the
//! same snapshot byte for byte.

use crate::config::GameConfigs;

/// Opaque ISO-8601 timestamp, produced outside the core.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub String);

impl Timestamp {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Timestamp {
    fn from(value: String) -> Self {
        Timestamp(value)
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Timestamp(value.to_string())
    }
}

/// Everything an action reads besides the snapshot itself.
#[derive(Clone, Debug)]
pub struct GameEnv<'a> {
    pub configs: &'a GameConfigs,
    /// Timestamp for every write this action performs.
    pub now: Timestamp,
}

impl<'a> GameEnv<'a> {
    pub fn new(configs: &'a GameConfigs, now: Timestamp) -> Self {
        Self { configs, now }
    }
}
