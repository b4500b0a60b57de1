//! Players, per-player storage and per-turn bookkeeping.
//!
//! ## PlayerId
//!
//! The two seats are `PlayerId(0)` and `PlayerId(1)`. Seat 0 is the
//! reference player the search reports rewards for.
//!
//! ## PlayerMap
//!
//! Storage for the two seats, indexable by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::entity::EntityId;
use crate::triggers::EventListener;

/// Seat identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat of a two-player game.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both seats in order.
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [PlayerId(0), PlayerId(1)].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use ccg_mcts::core::{PlayerId, PlayerMap};
///
/// let mut health: PlayerMap<i64> = PlayerMap::new(|_| 30);
/// health[PlayerId::new(1)] -= 6;
/// assert_eq!(health[PlayerId::new(0)], 30);
/// assert_eq!(health[PlayerId::new(1)], 24);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId(0)), factory(PlayerId(1))],
        }
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Where a player stands in the match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayState {
    #[default]
    Invalid,
    Playing,
    Losing,
    Won,
    Lost,
    Tied,
    Conceded,
    Disconnected,
}

impl PlayState {
    /// Final states set by the game-over check.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, PlayState::Won | PlayState::Lost | PlayState::Tied)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceKind {
    /// Pick any subset of the opening hand to replace.
    Mulligan,
    /// Pick exactly one card to put into hand.
    Discover,
}

/// A pending decision the player must resolve through `Game::choose`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    pub kind: ChoiceKind,
    pub source: EntityId,
    pub cards: Vec<EntityId>,
    pub min_count: usize,
    pub max_count: usize,
}

/// One seat's zones, mana and turn counters.
#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub hero: EntityId,
    pub hero_power: EntityId,

    pub deck: im::Vector<EntityId>,
    pub hand: im::Vector<EntityId>,
    pub field: im::Vector<EntityId>,
    pub graveyard: im::Vector<EntityId>,

    pub max_mana: i64,
    pub used_mana: i64,
    pub temp_mana: i64,
    /// Crystals locked this turn by last turn's overload.
    pub overload_locked: i64,
    /// Overload accumulated this turn, locked next turn.
    pub overloaded: i64,

    pub cards_played_this_turn: u32,
    pub minions_played_this_turn: u32,
    pub minions_killed_this_turn: u32,
    pub cards_drawn_this_turn: u32,
    pub hero_power_activations: u32,

    pub fatigue_counter: i64,
    pub playstate: PlayState,
    pub first_player: bool,
    pub choice: Option<Choice>,
    pub listeners: im::Vector<EventListener>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hero: EntityId::GAME,
            hero_power: EntityId::GAME,
            deck: im::Vector::new(),
            hand: im::Vector::new(),
            field: im::Vector::new(),
            graveyard: im::Vector::new(),
            max_mana: 0,
            used_mana: 0,
            temp_mana: 0,
            overload_locked: 0,
            overloaded: 0,
            cards_played_this_turn: 0,
            minions_played_this_turn: 0,
            minions_killed_this_turn: 0,
            cards_drawn_this_turn: 0,
            hero_power_activations: 0,
            fatigue_counter: 0,
            playstate: PlayState::Invalid,
            first_player: false,
            choice: None,
            listeners: im::Vector::new(),
        }
    }

    /// Mana available to spend right now.
    #[must_use]
    pub fn mana(&self) -> i64 {
        (self.max_mana + self.temp_mana - self.used_mana - self.overload_locked).max(0)
    }

    /// Spend mana. Callers check affordability first.
    pub fn pay(&mut self, amount: i64) {
        debug_assert!(amount <= self.mana(), "paying more mana than available");
        self.used_mana += amount.max(0);
    }

    #[must_use]
    pub fn is_losing(&self) -> bool {
        matches!(
            self.playstate,
            PlayState::Losing | PlayState::Conceded | PlayState::Disconnected
        )
    }

    /// Zero the per-turn counters.
    pub fn reset_turn_counters(&mut self) {
        self.cards_played_this_turn = 0;
        self.minions_played_this_turn = 0;
        self.minions_killed_this_turn = 0;
        self.cards_drawn_this_turn = 0;
        self.hero_power_activations = 0;
    }
}
