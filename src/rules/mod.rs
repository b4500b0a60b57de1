//! The game engine.
//!
//! [`Game`] validates player commands and executes them as action blocks.
//! The engine is split by concern:
//!
//! - `engine`: the `Game` type, construction, legality queries, commands
//! - `blocks`: block brackets, listener registration, event broadcast
//! - `actions`: what each [`Action`](crate::core::Action) does
//! - `auras`: continuous scripts, re-run at every block zero point
//! - `deaths`: the death sweep and the game-over check
//! - `steps`: setup, mulligan, turn begin and end, pending choices
//! - `turn`: the random single-turn policy the search samples with
//! - `node`: `Game` as a search node
//! - `setup`, `observer`: rule variants and block observation hooks

mod actions;
mod auras;
mod blocks;
mod deaths;
pub mod engine;
mod node;
pub mod observer;
pub mod setup;
mod steps;
pub mod turn;

pub use engine::{Game, PlayerSetup, REFERENCE_PLAYER};
pub use observer::{BlockCounter, BlockObserver, BlockType};
pub use setup::{FirstPlayerRule, FixedFirstPlayer, GameRules, RandomFirstPlayer, SetupRule};
pub use turn::TurnOutcome;
