//! `Game` as a search node.

use super::engine::{Game, REFERENCE_PLAYER};
use crate::core::{GameLogger, GameRng, NodeToken, PlayState};
use crate::error::{GameError, SearchError};
use crate::mcts::SearchNode;

impl SearchNode for Game {
    fn token(&self) -> NodeToken {
        self.state.token
    }

    fn is_terminal(&self) -> bool {
        self.state.is_complete()
    }

    fn reward(&self) -> Result<f64, SearchError> {
        if !self.is_terminal() {
            return Err(SearchError::NonTerminalReward);
        }
        match self.state.player(REFERENCE_PLAYER).playstate {
            PlayState::Won => Ok(1.0),
            PlayState::Tied => Ok(0.5),
            _ => Ok(0.0),
        }
    }

    fn reference_to_move(&self) -> bool {
        self.state.current_player == REFERENCE_PLAYER
    }

    /// Clone with its own RNG stream and token. Forks log nothing and report
    /// to no observer.
    fn fork(&self, rng: &mut GameRng) -> Self {
        let mut child = self.clone();
        child.state.rng = rng.fork();
        child.state.token = NodeToken::random(rng);
        child.logger = GameLogger::silent();
        child.observers.clear();
        child
    }

    fn play_turn(&mut self) -> Result<(), GameError> {
        self.play_set_turn().map(|_| ())
    }
}
