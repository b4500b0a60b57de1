//! Error types for the rules engine and the search.
//!
//! Rules errors are values: an illegal move is rejected before anything in
//! the state changes, and a finished match answers every further command with
//! [`GameError::GameOver`]. Search errors are precondition violations of the
//! tree itself, plus a wrapper for rules errors surfaced by strict rollouts.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::{EntityId, PlayerId};
use crate::core::state::NodeToken;

/// Errors raised by the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The match has already concluded.
    #[error("the game is over")]
    GameOver,

    /// A move was attempted before `Game::start`.
    #[error("the game has not started")]
    NotStarted,

    #[error("{card} cannot be played: {reason}")]
    CardNotPlayable { card: EntityId, reason: &'static str },

    #[error("{target} is not a legal target for {actor}")]
    InvalidTarget { actor: EntityId, target: EntityId },

    #[error("{attacker} cannot attack: {reason}")]
    CannotAttack { attacker: EntityId, reason: &'static str },

    #[error("hero power of {player} is not usable: {reason}")]
    PowerNotUsable { player: PlayerId, reason: &'static str },

    #[error("{player} has no pending choice")]
    NoPendingChoice { player: PlayerId },

    #[error("invalid choice for {player}: {reason}")]
    InvalidChoice { player: PlayerId, reason: &'static str },

    #[error("unknown card {0}")]
    UnknownCard(CardId),

    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),
}

impl GameError {
    /// Whether this error rejects a player command (as opposed to a lookup failure).
    #[must_use]
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            GameError::CardNotPlayable { .. }
                | GameError::InvalidTarget { .. }
                | GameError::CannotAttack { .. }
                | GameError::PowerNotUsable { .. }
                | GameError::NoPendingChoice { .. }
                | GameError::InvalidChoice { .. }
        )
    }
}

/// Errors raised by the MCTS engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// `choose` was called on a finished game.
    #[error("choose called on terminal node")]
    TerminalNode,

    /// UCT selection found a child that was never expanded.
    #[error("child {child:?} of {parent:?} has not been expanded")]
    UnexpandedChild { parent: NodeToken, child: NodeToken },

    /// `reward` was asked of a node that is still in play.
    #[error("reward called on non-terminal node")]
    NonTerminalReward,

    /// A token in the expansion table has no stored node.
    #[error("no node stored for {0:?}")]
    UnknownNode(NodeToken),

    /// A rules error escaped a rollout.
    #[error("rollout failed: {0}")]
    Rules(#[from] GameError),
}

/// Result alias used throughout the rules engine.
pub type Result<T> = std::result::Result<T, GameError>;
