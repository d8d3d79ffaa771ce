//! Configuration for a simulation run.

use crate::strategy::Mode;

/// Settings that affect a run. Robot count is not among them; robots come from the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Coordination strategy wired into the tick loop.
    pub mode: Mode,
    /// Seed for the frontier-search fallback choice.
    pub seed: u64,
    /// Maximum ticks [`Simulation::run`](super::Simulation::run) takes before giving up.
    /// `None` runs until every task is delivered.
    pub tick_limit: Option<u64>,
}

impl SimConfig {
    /// Default settings with the given mode.
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Centralized,
            seed: 42,
            tick_limit: Some(10_000),
        }
    }
}
