//! Core MCTS search algorithm.
//!
//! One [`MCTS`] instance serves one top-level decision at a time: run
//! rollouts from the root, `choose` a successor, then `reset` before the
//! next decision so statistics never leak between unrelated positions.
//!
//! Rewards are stored from the perspective of the node receiving them and
//! flip sign at every level on the way back up.

use std::time::Instant;

use crate::core::{GameRng, NodeToken};
use crate::error::SearchError;

use super::config::{MCTSConfig, RolloutErrors, SearchBudget};
use super::node::SearchNode;
use super::policy::{argmax, choose_score, ChildStats, SelectionPolicy, Uct};
use super::stats::SearchStats;
use super::tree::StatsTable;

/// How a rollout ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RolloutOutcome {
    /// The reward was backpropagated.
    Completed,
    /// A rules error stopped the rollout; nothing was recorded.
    Abandoned,
}

/// Monte Carlo tree searcher over nodes of type `N`.
pub struct MCTS<N: SearchNode> {
    config: MCTSConfig,
    table: StatsTable<N>,
    rng: GameRng,
    selection: Box<dyn SelectionPolicy>,
    stats: SearchStats,
}

impl<N: SearchNode> MCTS<N> {
    pub fn new(config: MCTSConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            config,
            table: StatsTable::new(),
            rng,
            selection: Box::new(Uct),
            stats: SearchStats::default(),
        }
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    #[must_use]
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    #[must_use]
    pub fn table(&self) -> &StatsTable<N> {
        &self.table
    }

    /// Forget every statistic and expansion.
    pub fn reset(&mut self) {
        self.table.clear();
        self.stats.reset();
    }

    fn child_stats(&self, token: NodeToken) -> ChildStats {
        ChildStats {
            reward: self.table.reward(token),
            visits: self.table.visits(token),
        }
    }

    /// The successor to play from `node`.
    ///
    /// An unexpanded node yields a fresh random sample. Otherwise the
    /// expanded child with the best mean reward wins; children below the
    /// minimum visit count are only picked if nothing else qualifies.
    pub fn choose(&mut self, node: &N) -> Result<N, SearchError> {
        if node.is_terminal() {
            return Err(SearchError::TerminalNode);
        }
        let children = match self.table.children(node.token()) {
            Some(children) if !children.is_empty() => children.to_vec(),
            _ => {
                return node
                    .find_random_child(&mut self.rng)?
                    .ok_or(SearchError::TerminalNode);
            }
        };

        let min_visits = self.config.min_visits;
        let best = argmax(children.iter().map(|&c| choose_score(self.child_stats(c), min_visits)))
            .ok_or(SearchError::TerminalNode)?;
        let token = children[best];
        self.table
            .node(token)
            .cloned()
            .ok_or(SearchError::UnknownNode(token))
    }

    /// One iteration: select, expand, simulate, backpropagate.
    pub fn do_rollout(&mut self, node: &N) -> Result<RolloutOutcome, SearchError> {
        self.table.remember(node);
        let path = self.select(node.token())?;
        let leaf_token = *path.last().ok_or(SearchError::UnknownNode(node.token()))?;
        let leaf = self
            .table
            .node(leaf_token)
            .cloned()
            .ok_or(SearchError::UnknownNode(leaf_token))?;

        let simulated = self
            .expand(&leaf)
            .map_err(SearchError::from)
            .and_then(|()| self.simulate(&leaf));
        let reward = match simulated {
            Ok(reward) => reward,
            Err(SearchError::Rules(err)) => match self.config.rollout_errors {
                RolloutErrors::Absorb => {
                    self.stats.abandoned += 1;
                    return Ok(RolloutOutcome::Abandoned);
                }
                RolloutErrors::Strict => {
                    self.stats.errors += 1;
                    return Err(SearchError::Rules(err));
                }
            },
            Err(other) => return Err(other),
        };

        self.backpropagate(&path, reward);
        self.stats.rollouts += 1;
        self.stats.max_depth = self.stats.max_depth.max(path.len() as u32);
        Ok(RolloutOutcome::Completed)
    }

    /// Run rollouts from `root` until the budget is spent.
    ///
    /// In strict mode rules errors are counted in the stats and searching
    /// continues; every other error stops the search.
    pub fn search(&mut self, root: &N, budget: SearchBudget) -> Result<&SearchStats, SearchError> {
        let start = Instant::now();
        for _ in 0..budget.max_rollouts {
            if budget.time_limit.is_some_and(|limit| start.elapsed() >= limit) {
                break;
            }
            match self.do_rollout(root) {
                Ok(_) | Err(SearchError::Rules(_)) => {}
                Err(err) => return Err(err),
            }
        }
        self.stats.time_us += start.elapsed().as_micros() as u64;
        Ok(&self.stats)
    }

    /// Path from `root` to a leaf worth expanding.
    fn select(&mut self, root: NodeToken) -> Result<Vec<NodeToken>, SearchError> {
        let mut path = Vec::new();
        let mut current = root;
        loop {
            path.push(current);
            let children = match self.table.children(current) {
                Some(children) if !children.is_empty() => children,
                // Unexplored or terminal.
                _ => return Ok(path),
            };
            let unexplored: Vec<NodeToken> = children
                .iter()
                .copied()
                .filter(|&c| !self.table.is_expanded(c))
                .collect();
            if let Some(pick) = self.rng.choose(&unexplored) {
                path.push(pick);
                return Ok(path);
            }
            current = self.uct_select(current)?;
        }
    }

    /// Idempotent: a known node keeps its children.
    fn expand(&mut self, node: &N) -> Result<(), crate::error::GameError> {
        if self.table.is_expanded(node.token()) {
            return Ok(());
        }
        let children = node.find_children(self.config.children_per_expansion, &mut self.rng)?;
        self.table.insert_children(node.token(), children);
        self.stats.expansions += 1;
        Ok(())
    }

    /// Reward of a random playout from `node`, seen from the node's parent.
    fn simulate(&mut self, node: &N) -> Result<f64, SearchError> {
        let invert = node.reference_to_move();
        let mut game = node.fork(&mut self.rng);
        while !game.is_terminal() {
            game.play_turn()?;
        }
        let reward = game.reward()?;
        Ok(if invert { -reward } else { reward })
    }

    fn backpropagate(&mut self, path: &[NodeToken], mut reward: f64) {
        for &token in path.iter().rev() {
            self.table.record(token, reward);
            reward = -reward;
        }
    }

    fn uct_select(&self, parent: NodeToken) -> Result<NodeToken, SearchError> {
        let children = self.table.children(parent).unwrap_or_default();
        if let Some(&child) = children.iter().find(|&&c| !self.table.is_expanded(c)) {
            return Err(SearchError::UnexpandedChild { parent, child });
        }
        let parent_visits = self.table.visits(parent);
        let best = argmax(
            children
                .iter()
                .map(|&c| self.selection.score(self.child_stats(c), parent_visits, &self.config)),
        )
        .ok_or(SearchError::UnknownNode(parent))?;
        Ok(children[best])
    }
}
