//! Deck drafting and whole-match drivers built on the public engine API.

pub mod decks;
pub mod runner;

pub use decks::{mcts_draft, random_draft, standard_players, MATCH_HERO, MAX_COPIES, MCTS_LIST};
pub use runner::{
    advance_turns, play_full_game, play_full_mcts_game, standard_match, MatchConfig, MatchReport, Outcome,
};
