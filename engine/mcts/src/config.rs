//! MCTS configuration parameters.

use std::time::Duration;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Exploration constant `c` in the UCT formula.
    /// Higher values encourage exploration, lower values favor exploitation.
    pub exploration: f64,

    /// Added to visit counts in the UCT formula so unvisited children
    /// score very high instead of dividing by zero.
    pub epsilon: f64,

    /// Wall-clock budget for a single `run`. The clock is checked once per
    /// iteration, so a search may overrun by at most one iteration.
    pub time_budget: Duration,

    /// Ply cap for random playouts. A playout that reaches it scores as a draw.
    pub max_rollout_depth: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration: 1.0,
            epsilon: 1e-12,
            time_budget: Duration::from_millis(15),
            max_rollout_depth: 200,
        }
    }
}

impl MctsConfig {
    /// Create a config with a generous budget for tests.
    pub fn for_testing() -> Self {
        Self {
            time_budget: Duration::from_millis(50),
            ..Self::default()
        }
    }

    /// Builder pattern: set exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the UCT epsilon guard.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Builder pattern: set rollout ply cap.
    pub fn with_max_rollout_depth(mut self, depth: u32) -> Self {
        self.max_rollout_depth = depth;
        self
    }

    /// Builder pattern: set wall-clock budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert!((config.exploration - 1.0).abs() < 1e-12);
        assert!((config.epsilon - 1e-12).abs() < 1e-24);
        assert_eq!(config.time_budget, Duration::from_millis(15));
        assert_eq!(config.max_rollout_depth, 200);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_exploration(0.8)
            .with_time_budget(Duration::from_millis(5));

        assert!((config.exploration - 0.8).abs() < 1e-12);
        assert_eq!(config.time_budget, Duration::from_millis(5));
    }
}
