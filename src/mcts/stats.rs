//! MCTS search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected since the last reset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Rollouts that reached backpropagation.
    pub rollouts: u32,

    /// Rollouts dropped after a rules error.
    pub abandoned: u32,

    /// Rules errors returned in strict mode.
    pub errors: u32,

    /// Nodes expanded (children sampled).
    pub expansions: u32,

    /// Longest selection path.
    pub max_depth: u32,

    /// Total time spent in `search` (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn rollouts_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            f64::from(self.rollouts) / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
