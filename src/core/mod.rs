//! Core engine types: entities, players, state, actions, RNG, configuration
//! and logging.
//!
//! Nothing in here applies rules. These are the values the rules engine in
//! `rules` reads and rewrites.

pub mod action;
pub mod config;
pub mod entity;
pub mod logger;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionResult};
pub use config::GameConfig;
pub use entity::{Entity, EntityId, EntityKind, GameTag, Zone};
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use player::{Choice, ChoiceKind, PlayState, Player, PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{Buff, BuffDuration, GameState, GameStatus, NodeToken, Step};
