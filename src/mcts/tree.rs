//! Search statistics keyed by node token.
//!
//! The tree is not stored as a tree. Visit counts, accumulated rewards and
//! expansion lists live in flat hash maps keyed by [`NodeToken`], next to a
//! store of the node snapshots the tokens refer to. A node is *expanded*
//! once it has an entry in the children map, even an empty one.

use rustc_hash::FxHashMap;

use crate::core::NodeToken;

use super::node::SearchNode;

/// Per-decision statistics table.
#[derive(Clone, Debug)]
pub struct StatsTable<N> {
    nodes: FxHashMap<NodeToken, N>,
    visits: FxHashMap<NodeToken, u32>,
    rewards: FxHashMap<NodeToken, f64>,
    children: FxHashMap<NodeToken, Vec<NodeToken>>,
}

impl<N> Default for StatsTable<N> {
    fn default() -> Self {
        Self {
            nodes: FxHashMap::default(),
            visits: FxHashMap::default(),
            rewards: FxHashMap::default(),
            children: FxHashMap::default(),
        }
    }
}

impl<N: SearchNode> StatsTable<N> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep a snapshot so its token can be resolved later.
    pub fn remember(&mut self, node: &N) {
        self.nodes.entry(node.token()).or_insert_with(|| node.clone());
    }

    #[must_use]
    pub fn node(&self, token: NodeToken) -> Option<&N> {
        self.nodes.get(&token)
    }

    /// Visit count N; 0 for unknown nodes.
    #[inline]
    #[must_use]
    pub fn visits(&self, token: NodeToken) -> u32 {
        self.visits.get(&token).copied().unwrap_or(0)
    }

    /// Accumulated reward Q; 0 for unknown nodes.
    #[inline]
    #[must_use]
    pub fn reward(&self, token: NodeToken) -> f64 {
        self.rewards.get(&token).copied().unwrap_or(0.0)
    }

    /// Q/N, or `None` before the first visit.
    #[must_use]
    pub fn mean_reward(&self, token: NodeToken) -> Option<f64> {
        match self.visits(token) {
            0 => None,
            n => Some(self.reward(token) / f64::from(n)),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_expanded(&self, token: NodeToken) -> bool {
        self.children.contains_key(&token)
    }

    #[must_use]
    pub fn children(&self, token: NodeToken) -> Option<&[NodeToken]> {
        self.children.get(&token).map(Vec::as_slice)
    }

    /// Record the children of `parent`. Ignored if it is already expanded.
    pub fn insert_children(&mut self, parent: NodeToken, children: Vec<N>) {
        if self.is_expanded(parent) {
            return;
        }
        let tokens = children.iter().map(SearchNode::token).collect();
        for child in children {
            self.nodes.entry(child.token()).or_insert(child);
        }
        self.children.insert(parent, tokens);
    }

    /// One visit with `reward`.
    pub fn record(&mut self, token: NodeToken, reward: f64) {
        *self.visits.entry(token).or_insert(0) += 1;
        *self.rewards.entry(token).or_insert(0.0) += reward;
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.visits.is_empty() && self.children.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.visits.clear();
        self.rewards.clear();
        self.children.clear();
    }
}
