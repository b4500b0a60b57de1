//! # ccg-mcts
//!
//! A two-player collectible card game engine with a Monte Carlo Tree Search
//! player.
//!
//! ## Design Principles
//!
//! 1. **Blocks, not callbacks**: Every state change runs inside an action
//!    block. When the outermost counted block closes, auras are refreshed
//!    and deaths are processed, so the board is consistent between blocks.
//!
//! 2. **Errors are values**: Illegal moves are rejected before anything
//!    changes, and a finished match answers with `GameError::GameOver`
//!    instead of unwinding.
//!
//! 3. **Configuration over constants**: Limits live in `GameConfig`, search
//!    parameters in `MCTSConfig`, rule variants in `GameRules`.
//!
//! ## Architecture
//!
//! - **Sampled-turn MCTS**: A node's children are independent random turns
//!   played from it, not enumerated moves. Statistics live in a flat table
//!   keyed by node token and are dropped between decisions.
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so forking a
//!   game for a rollout shares everything until it is written.
//!
//! - **Deterministic**: Every random draw goes through a seeded `GameRng`.
//!   Same seeds, same match.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, players, state, actions, RNG, configuration, logging
//! - `cards`: Card definitions, the registry, the basic set
//! - `effects`: Card scripts, targeting, effect resolution
//! - `triggers`: Events and listeners
//! - `rules`: The `Game` engine: blocks, actions, auras, deaths, turns
//! - `mcts`: Monte Carlo Tree Search over sampled turns
//! - `driver`: Deck drafting and whole-match runners
//! - `snapshot`: JSON state dumps

pub mod cards;
pub mod core;
pub mod driver;
pub mod effects;
pub mod error;
pub mod mcts;
pub mod rules;
pub mod snapshot;
pub mod triggers;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionResult, Entity, EntityId, EntityKind, GameConfig, GameLogger, GameRng, GameState,
    GameTag, NodeToken, PlayState, Player, PlayerId, PlayerMap, VerbosityLevel, Zone,
};

pub use crate::cards::{CardClass, CardDefinition, CardId, CardRegistry, CardType};

pub use crate::effects::{Effect, EffectResolver, Selector, TargetRequirement};

pub use crate::triggers::{EventKind, EventListener, GameEvent};

pub use crate::rules::{BlockObserver, BlockType, Game, GameRules, PlayerSetup, TurnOutcome};

pub use crate::mcts::{MCTSConfig, RolloutErrors, SearchBudget, SearchNode, SearchStats, MCTS};

pub use crate::error::{GameError, Result, SearchError};
