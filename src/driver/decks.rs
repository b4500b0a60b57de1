//! Deck builders.

use crate::cards::basic::ids::*;
use crate::cards::{CardClass, CardId, CardRegistry};
use crate::core::GameRng;
use crate::rules::PlayerSetup;

/// Copies of one card a deck may hold.
pub const MAX_COPIES: usize = 2;

/// Hero both seats play.
pub const MATCH_HERO: CardId = JAINA_PROUDMOORE;

/// The mage midrange list, one copy each.
pub const MCTS_LIST: [CardId; 15] = [
    ARCANE_MISSILES,
    FROSTBOLT,
    ARCANE_INTELLECT,
    FIREBALL,
    POLYMORPH,
    WATER_ELEMENTAL,
    FLAMESTRIKE,
    ACIDIC_SWAMP_OOZE,
    BLOODFEN_RAPTOR,
    RAZORFEN_HUNTER,
    SHATTERED_SUN_CLERIC,
    CHILLWIND_YETI,
    GNOMISH_INVENTOR,
    GURUBASHI_BERSERKER,
    BOULDERFIST_OGRE,
];

/// Two copies of every card in [`MCTS_LIST`], in random order.
#[must_use]
pub fn mcts_draft(rng: &mut GameRng) -> Vec<CardId> {
    let mut deck: Vec<CardId> = MCTS_LIST
        .iter()
        .flat_map(|&card| std::iter::repeat(card).take(MAX_COPIES))
        .collect();
    rng.shuffle(&mut deck);
    deck
}

/// Seat 0 "MCTS" and seat 1 "ENEMY", both on [`MATCH_HERO`].
#[must_use]
pub fn standard_players(deck0: Vec<CardId>, deck1: Vec<CardId>) -> [PlayerSetup; 2] {
    [
        PlayerSetup::new("MCTS", MATCH_HERO, deck0),
        PlayerSetup::new("ENEMY", MATCH_HERO, deck1),
    ]
}

/// A `size`-card deck of random collectible cards for `class`, at most
/// [`MAX_COPIES`] of each. Smaller when the pool runs out.
#[must_use]
pub fn random_draft(cards: &CardRegistry, class: CardClass, size: usize, rng: &mut GameRng) -> Vec<CardId> {
    let mut collection: Vec<CardId> = cards
        .collectible(class)
        .into_iter()
        .flat_map(|card| std::iter::repeat(card).take(MAX_COPIES))
        .collect();
    rng.shuffle(&mut collection);
    collection.truncate(size);
    collection
}
