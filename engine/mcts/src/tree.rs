//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices; parent links are plain indices, so
//! dropping the tree frees every node at once.

use engine_core::GameState;
use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<S: GameState> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<S>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<S: GameState> MctsTree<S> {
    /// Create a new tree rooted at `state`.
    pub fn new(state: S) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(state)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<S> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<S> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    fn allocate(&mut self, node: MctsNode<S>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<S>] {
        &self.nodes
    }

    /// Walk from the root to the node the next iteration should work on.
    ///
    /// Stops at the first node that is terminal or still has untried
    /// actions; otherwise descends into the child with the highest UCT score.
    pub fn select(&self, exploration: f64, epsilon: f64) -> NodeId {
        let mut current = self.root;

        loop {
            let node = self.get(current);
            if node.is_terminal || !node.is_fully_expanded() {
                return current;
            }

            match self.select_child(current, exploration, epsilon) {
                Some(child_id) => current = child_id,
                None => return current, // No children (only for terminal states)
            }
        }
    }

    /// Select the child of a node with the strictly greatest UCT score.
    /// The first child wins ties.
    pub fn select_child(&self, node_id: NodeId, exploration: f64, epsilon: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        let parent_visits = node.visit_count;

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &node.children {
            let score = self
                .get(child_id)
                .uct_score(parent_visits, exploration, epsilon);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((child_id, score));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Expand one untried action of `node_id` into a new child.
    ///
    /// The action is removed from `untried_actions` before the child is
    /// created, so no action is ever expanded twice. Terminal or fully
    /// expanded nodes are returned unchanged.
    pub fn expand(&mut self, node_id: NodeId, rng: &mut ChaCha20Rng) -> NodeId {
        let node = self.get_mut(node_id);
        if node.is_terminal || node.untried_actions.is_empty() {
            return node_id;
        }

        let pick = rng.gen_range(0..node.untried_actions.len());
        let action = node.untried_actions.swap_remove(pick);
        let state = node.state.result(&action);

        let child_id = self.allocate(MctsNode::new_child(node_id, action, state));

        // Add to parent's children
        self.get_mut(node_id).children.push(child_id);

        child_id
    }

    /// Backpropagate a reward from a leaf to the root.
    ///
    /// `reward` is from the perspective of the player who moved into the
    /// leaf. Turns alternate every ply, so the sign flips at every level.
    pub fn backpropagate(&mut self, leaf_id: NodeId, reward: f64) {
        let mut current_id = leaf_id;
        let mut current_reward = reward;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visit_count += 1;
            node.reward_sum += current_reward;

            // Negate for opponent's perspective
            current_reward = -current_reward;

            current_id = node.parent;
        }
    }

    /// Get the most visited root child's action and visit count.
    /// Ties go to the child expanded first. Returns None if root has no children.
    pub fn best_action(&self) -> Option<(S::Action, u32)> {
        self.best_child().and_then(|id| {
            let child = self.get(id);
            child.action.map(|a| (a, child.visit_count))
        })
    }

    /// Most visited root child (first expanded wins ties).
    pub fn best_child(&self) -> Option<NodeId> {
        let root = self.get(self.root);
        let mut best: Option<(NodeId, u32)> = None;
        for &child_id in &root.children {
            let visits = self.get(child_id).visit_count;
            if best.map_or(true, |(_, best_visits)| visits > best_visits) {
                best = Some((child_id, visits));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_children: root.children.len(),
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> u32 {
        // Children are always allocated after their parent, so one forward
        // pass sees every parent depth before its children.
        let mut depths = vec![0u32; self.nodes.len()];
        let mut max_depth = 0;
        for (i, node) in self.nodes.iter().enumerate() {
            if node.parent.is_some() {
                depths[i] = depths[node.parent.0 as usize] + 1;
                max_depth = max_depth.max(depths[i]);
            }
        }
        max_depth
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_children: usize,
    pub max_depth: u32,
}
