//! MCTS configuration parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What a rollout does when the rules report an error mid-simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RolloutErrors {
    /// Abandon the rollout without backpropagating and keep searching.
    #[default]
    Absorb,
    /// Return the error from `do_rollout`.
    Strict,
}

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// UCT exploration weight (default: sqrt(2)).
    pub exploration_weight: f64,

    /// Children with fewer visits are never picked by `choose`.
    pub min_visits: u32,

    /// Sampled successors per expansion.
    pub children_per_expansion: usize,

    /// Seed of the search RNG. Same seed, same search.
    pub seed: u64,

    pub rollout_errors: RolloutErrors,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_weight: std::f64::consts::SQRT_2,
            min_visits: 5,
            children_per_expansion: 12,
            seed: 42,
            rollout_errors: RolloutErrors::Absorb,
        }
    }
}

impl MCTSConfig {
    pub fn with_exploration(mut self, weight: f64) -> Self {
        self.exploration_weight = weight;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_children_per_expansion(mut self, count: usize) -> Self {
        self.children_per_expansion = count;
        self
    }

    pub fn with_min_visits(mut self, visits: u32) -> Self {
        self.min_visits = visits;
        self
    }

    pub fn with_rollout_errors(mut self, policy: RolloutErrors) -> Self {
        self.rollout_errors = policy;
        self
    }
}

/// When `MCTS::search` stops scheduling rollouts. A rollout in progress
/// always finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBudget {
    pub max_rollouts: u32,
    pub time_limit: Option<Duration>,
}

impl SearchBudget {
    #[must_use]
    pub fn rollouts(max_rollouts: u32) -> Self {
        Self {
            max_rollouts,
            time_limit: None,
        }
    }

    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::rollouts(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MCTSConfig::default();
        assert!((config.exploration_weight - std::f64::consts::SQRT_2).abs() < 0.001);
        assert_eq!(config.min_visits, 5);
        assert_eq!(config.children_per_expansion, 12);
        assert_eq!(config.rollout_errors, RolloutErrors::Absorb);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MCTSConfig::default()
            .with_exploration(2.0)
            .with_seed(123)
            .with_children_per_expansion(4)
            .with_rollout_errors(RolloutErrors::Strict);

        assert_eq!(config.exploration_weight, 2.0);
        assert_eq!(config.seed, 123);
        assert_eq!(config.children_per_expansion, 4);
        assert_eq!(config.rollout_errors, RolloutErrors::Strict);
    }

    #[test]
    fn test_serialization() {
        let config = MCTSConfig::default().with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: MCTSConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);

        let budget = SearchBudget::rollouts(50).with_time_limit(Duration::from_millis(20));
        let json = serde_json::to_string(&budget).unwrap();
        assert_eq!(serde_json::from_str::<SearchBudget>(&json).unwrap(), budget);
    }
}
