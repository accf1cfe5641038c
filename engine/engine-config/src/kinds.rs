//! Named choices that config files and the CLI select by string.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised while interpreting configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown strategy '{0}' (expected mcts, alphabeta, pvs or minimax)")]
    UnknownStrategy(String),

    #[error("Unknown leaf evaluator '{0}' (expected rollout or alphabeta)")]
    UnknownLeafEvaluator(String),
}

/// Search algorithm a player uses once the opening is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    Mcts,
    AlphaBeta,
    Pvs,
    Minimax,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Mcts => "mcts",
            Strategy::AlphaBeta => "alphabeta",
            Strategy::Pvs => "pvs",
            Strategy::Minimax => "minimax",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "mcts" => Ok(Strategy::Mcts),
            "alphabeta" => Ok(Strategy::AlphaBeta),
            "pvs" => Ok(Strategy::Pvs),
            "minimax" => Ok(Strategy::Minimax),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

/// How MCTS scores a newly expanded node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeafEvaluatorKind {
    #[default]
    Rollout,
    AlphaBeta,
}

impl LeafEvaluatorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LeafEvaluatorKind::Rollout => "rollout",
            LeafEvaluatorKind::AlphaBeta => "alphabeta",
        }
    }
}

impl fmt::Display for LeafEvaluatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeafEvaluatorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "rollout" => Ok(LeafEvaluatorKind::Rollout),
            "alphabeta" => Ok(LeafEvaluatorKind::AlphaBeta),
            _ => Err(ConfigError::UnknownLeafEvaluator(s.to_string())),
        }
    }
}

/// Lowercase and drop `-`/`_` so "Alpha-Beta" and "alpha_beta" both match.
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parse() {
        assert_eq!("mcts".parse::<Strategy>(), Ok(Strategy::Mcts));
        assert_eq!("alpha_beta".parse::<Strategy>(), Ok(Strategy::AlphaBeta));
        assert_eq!("Alpha-Beta".parse::<Strategy>(), Ok(Strategy::AlphaBeta));
        assert_eq!(" PVS ".parse::<Strategy>(), Ok(Strategy::Pvs));
        assert_eq!("minimax".parse::<Strategy>(), Ok(Strategy::Minimax));
    }

    #[test]
    fn test_strategy_unknown() {
        assert_eq!(
            "negamax".parse::<Strategy>(),
            Err(ConfigError::UnknownStrategy("negamax".into()))
        );
    }

    #[test]
    fn test_strategy_display_round_trips() {
        for s in [
            Strategy::Mcts,
            Strategy::AlphaBeta,
            Strategy::Pvs,
            Strategy::Minimax,
        ] {
            assert_eq!(s.to_string().parse::<Strategy>(), Ok(s));
        }
    }

    #[test]
    fn test_leaf_evaluator_parse() {
        assert_eq!(
            "rollout".parse::<LeafEvaluatorKind>(),
            Ok(LeafEvaluatorKind::Rollout)
        );
        assert_eq!(
            "alphabeta".parse::<LeafEvaluatorKind>(),
            Ok(LeafEvaluatorKind::AlphaBeta)
        );
        assert!(matches!(
            "network".parse::<LeafEvaluatorKind>(),
            Err(ConfigError::UnknownLeafEvaluator(_))
        ));
    }
}
