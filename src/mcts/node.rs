//! The contract a game state must meet to be searched.
//!
//! The search never looks inside a node. It asks whether the match is over,
//! who is to move, what the final reward is, and for sampled successors.
//! Nodes are keyed by [`NodeToken`], not by content.

use crate::core::{GameRng, NodeToken};
use crate::error::{GameError, SearchError};

/// A game state the search can expand and roll out.
pub trait SearchNode: Clone {
    /// Identity of this node in the statistics table.
    fn token(&self) -> NodeToken;

    fn is_terminal(&self) -> bool;

    /// 1.0 win, 0.0 loss, 0.5 tie for the reference player. Only defined on
    /// terminal nodes.
    fn reward(&self) -> Result<f64, SearchError>;

    /// Whether the reference player is the one to move.
    fn reference_to_move(&self) -> bool;

    /// Independent copy with a fresh token, drawing its randomness from `rng`.
    fn fork(&self, rng: &mut GameRng) -> Self;

    /// Advance by one simulated turn.
    fn play_turn(&mut self) -> Result<(), GameError>;

    /// `count` independently sampled successors. Empty on a terminal node.
    fn find_children(&self, count: usize, rng: &mut GameRng) -> Result<Vec<Self>, GameError> {
        if self.is_terminal() {
            return Ok(Vec::new());
        }
        (0..count)
            .map(|_| {
                let mut child = self.fork(rng);
                child.play_turn()?;
                Ok(child)
            })
            .collect()
    }

    /// One sampled successor, or `None` on a terminal node.
    fn find_random_child(&self, rng: &mut GameRng) -> Result<Option<Self>, GameError> {
        if self.is_terminal() {
            return Ok(None);
        }
        let mut child = self.fork(rng);
        child.play_turn()?;
        Ok(Some(child))
    }
}
