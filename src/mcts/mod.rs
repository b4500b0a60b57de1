//! Monte Carlo Tree Search over sampled turns.
//!
//! ## Overview
//!
//! The search treats game states as opaque nodes. A node's children are
//! not enumerated moves but independent samples: each child is the parent
//! forked and advanced by one simulated turn. Statistics live in a flat
//! table keyed by node token, and are reset between top-level decisions.
//!
//! - [`SearchNode`]: the contract a game must implement
//! - [`MCTS`]: select / expand / simulate / backpropagate, `choose`, `reset`
//! - [`SelectionPolicy`]: how expanded nodes are descended (UCT by default)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ccg_mcts::cards::basic::basic_set;
//! use ccg_mcts::core::GameRng;
//! use ccg_mcts::driver::{mcts_draft, standard_match};
//! use ccg_mcts::mcts::{MCTSConfig, SearchBudget, MCTS};
//!
//! let cards = Arc::new(basic_set());
//! let mut rng = GameRng::new(42);
//! let (deck0, deck1) = (mcts_draft(&mut rng), mcts_draft(&mut rng));
//! let mut game = standard_match(cards, deck0, deck1, 42).unwrap();
//! game.start().unwrap();
//! game.resolve_choices_randomly().unwrap();
//!
//! let mut mcts = MCTS::new(MCTSConfig::default());
//! mcts.search(&game, SearchBudget::rollouts(200)).unwrap();
//! let next = mcts.choose(&game).unwrap();
//! mcts.reset();
//! println!("{} rollouts, next turn {}", 200, next.state().turn);
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

pub use config::{MCTSConfig, RolloutErrors, SearchBudget};
pub use node::SearchNode;
pub use policy::{ChildStats, SelectionPolicy, Uct};
pub use search::{RolloutOutcome, MCTS};
pub use stats::SearchStats;
pub use tree::StatsTable;
