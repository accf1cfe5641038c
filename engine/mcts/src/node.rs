//! MCTS tree node representation.
//!
//! Each node owns a snapshot of the position reached by taking `action` from
//! the parent. `reward_sum` is accumulated from the point of view of the
//! player who made that move (the parent's side to move), so a parent picks
//! among its children by maximising their mean reward directly.

use engine_core::GameState;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<S: GameState> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Action that led to this node from parent (None for root)
    pub action: Option<S::Action>,

    /// Position at this node
    pub state: S,

    /// Number of completed backpropagations through this node
    pub visit_count: u32,

    /// Sum of rewards backpropagated through this node, from the
    /// perspective of the player who moved into it.
    pub reward_sum: f64,

    /// Whether this is a terminal state (game over)
    pub is_terminal: bool,

    /// Expanded children, in expansion order
    pub children: Vec<NodeId>,

    /// Legal actions not yet expanded into a child
    pub untried_actions: Vec<S::Action>,
}

impl<S: GameState> MctsNode<S> {
    /// Create a new root node.
    pub fn new_root(state: S) -> Self {
        Self::new(state, NodeId::NONE, None)
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, action: S::Action, state: S) -> Self {
        Self::new(state, parent, Some(action))
    }

    fn new(state: S, parent: NodeId, action: Option<S::Action>) -> Self {
        let is_terminal = state.terminal_test();
        let untried_actions = if is_terminal {
            Vec::new()
        } else {
            state.actions()
        };

        Self {
            parent,
            action,
            state,
            visit_count: 0,
            reward_sum: 0.0,
            is_terminal,
            children: Vec::new(),
            untried_actions,
        }
    }

    /// Mean reward R/N. Returns 0.0 if never visited.
    #[inline]
    pub fn mean_reward(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.reward_sum / self.visit_count as f64
        }
    }

    /// UCT score used by the parent to pick among its children.
    ///
    /// `R/(N+ε) + c * sqrt(2 * ln(N_parent + 1) / (N+ε))`
    ///
    /// The ε guard keeps unvisited children finite (and very large) instead
    /// of dividing by zero.
    #[inline]
    pub fn uct_score(&self, parent_visits: u32, exploration: f64, epsilon: f64) -> f64 {
        let n = self.visit_count as f64 + epsilon;
        let exploit = self.reward_sum / n;
        let explore = exploration * (2.0 * (parent_visits as f64 + 1.0).ln() / n).sqrt();
        exploit + explore
    }

    /// Check if every legal action has been expanded.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_actions.is_empty()
    }

    /// Check if this is the search root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::PlayerId;
    use games_isolation::{Cell, Isolation};

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = MctsNode::new_root(Isolation::new());

        assert!(node.is_root());
        assert!(node.action.is_none());
        assert_eq!(node.visit_count, 0);
        assert_eq!(node.reward_sum, 0.0);
        assert!(!node.is_terminal);
        assert!(node.children.is_empty());
        assert_eq!(node.untried_actions.len(), 99);
        assert_eq!(node.state.player(), PlayerId::FIRST);
    }

    #[test]
    fn test_terminal_node_has_nothing_to_expand() {
        let trapped = Isolation::with_blocked(&[Cell::at(1, 2).unwrap(), Cell::at(2, 1).unwrap()])
            .result(&Cell(0))
            .result(&Cell(98));
        let node = MctsNode::new_child(NodeId(0), Cell(98), trapped);

        assert!(node.is_terminal);
        assert!(node.is_fully_expanded());
        assert_eq!(node.action, Some(Cell(98)));
        assert_eq!(node.parent, NodeId(0));
    }

    #[test]
    fn test_mean_reward() {
        let mut node = MctsNode::new_root(Isolation::new());

        // Unvisited
        assert_eq!(node.mean_reward(), 0.0);

        // After visits
        node.visit_count = 4;
        node.reward_sum = 2.0;
        assert!((node.mean_reward() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_uct_score() {
        let mut node = MctsNode::new_root(Isolation::new());
        node.visit_count = 10;
        node.reward_sum = 5.0;

        // 0.5 + 1.0 * sqrt(2 * ln(101) / 10)
        let expected = 0.5 + (2.0 * 101f64.ln() / 10.0).sqrt();
        let uct = node.uct_score(100, 1.0, 1e-12);
        assert!((uct - expected).abs() < 1e-9);

        // Exploration constant scales only the second term
        let greedy = node.uct_score(100, 0.0, 1e-12);
        assert!((greedy - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_uct_unvisited_is_finite_and_dominant() {
        let fresh = MctsNode::new_root(Isolation::new());
        let mut seasoned = MctsNode::new_root(Isolation::new());
        seasoned.visit_count = 50;
        seasoned.reward_sum = 50.0;

        let fresh_score = fresh.uct_score(51, 1.0, 1e-12);
        assert!(fresh_score.is_finite());
        assert!(fresh_score > seasoned.uct_score(51, 1.0, 1e-12));
    }
}
