//! Entities: heroes, minions, spells and hero powers in play.
//!
//! ## ID Layout
//!
//! - `0` and `1`: the two player entities (owners of player-level listeners)
//! - `2..`: cards allocated by the game as they are created
//! - [`EntityId::GAME`]: the game itself, source of turn-structure blocks
//!
//! ```
//! use ccg_mcts::core::{EntityId, PlayerId};
//!
//! let p1 = EntityId::player(PlayerId::new(1));
//! assert_eq!(p1.as_player(), Some(PlayerId::new(1)));
//! assert_eq!(EntityId(7).as_player(), None);
//! assert!(EntityId::GAME.is_game());
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::CardId;
use crate::triggers::EventListener;

/// Unique identifier for any game entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The game pseudo-entity.
    pub const GAME: EntityId = EntityId(u32::MAX);

    /// First id handed out to cards.
    pub const FIRST_CARD: u32 = 2;

    /// Entity id of a player.
    #[must_use]
    pub const fn player(player: PlayerId) -> Self {
        Self(player.0 as u32)
    }

    /// The player this id stands for, if it is a player entity.
    #[must_use]
    pub const fn as_player(self) -> Option<PlayerId> {
        if self.0 < Self::FIRST_CARD {
            Some(PlayerId(self.0 as u8))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_game(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_game() {
            write!(f, "Game")
        } else {
            write!(f, "Entity({})", self.0)
        }
    }
}

/// What an entity is. Capability questions are answered here instead of
/// through a type hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Hero,
    Minion,
    Spell,
    HeroPower,
}

impl EntityKind {
    /// Heroes and minions.
    #[must_use]
    pub const fn is_character(self) -> bool {
        matches!(self, EntityKind::Hero | EntityKind::Minion)
    }

    #[must_use]
    pub const fn is_minion(self) -> bool {
        matches!(self, EntityKind::Minion)
    }

    /// Whether this kind of entity may ever declare an attack.
    #[must_use]
    pub const fn can_attack_kind(self) -> bool {
        self.is_character()
    }

    /// Only heroes carry a hero power.
    #[must_use]
    pub const fn has_power(self) -> bool {
        matches!(self, EntityKind::Hero)
    }

    /// Whether cards and powers may pick this entity as a target.
    #[must_use]
    pub const fn is_targetable(self) -> bool {
        self.is_character()
    }

    /// Whether a card of this kind can be played from hand.
    #[must_use]
    pub const fn is_playable_from_hand(self) -> bool {
        matches!(self, EntityKind::Minion | EntityKind::Spell)
    }
}

/// Zone an entity currently lives in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    #[default]
    Invalid,
    Deck,
    Hand,
    Play,
    Graveyard,
    SetAside,
    RemovedFromGame,
}

/// Numeric entity properties. Boolean keywords are stored as 0/1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GameTag {
    Cost,
    Attack,
    Health,
    Damage,
    Armor,
    Taunt,
    Charge,
    Windfury,
    Frozen,
    Exhausted,
    NumAttacks,
    TurnsInPlay,
    Overload,
}

impl GameTag {
    /// Name used in state dumps.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GameTag::Cost => "COST",
            GameTag::Attack => "ATK",
            GameTag::Health => "HEALTH",
            GameTag::Damage => "DAMAGE",
            GameTag::Armor => "ARMOR",
            GameTag::Taunt => "TAUNT",
            GameTag::Charge => "CHARGE",
            GameTag::Windfury => "WINDFURY",
            GameTag::Frozen => "FROZEN",
            GameTag::Exhausted => "EXHAUSTED",
            GameTag::NumAttacks => "NUM_ATTACKS_THIS_TURN",
            GameTag::TurnsInPlay => "NUM_TURNS_IN_PLAY",
            GameTag::Overload => "OVERLOAD",
        }
    }
}

/// A card instance.
///
/// Base values live in `tags`; buffs are stored on the game state and folded
/// in by the stat accessors on [`GameState`](super::GameState).
#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub card_id: CardId,
    pub kind: EntityKind,
    pub controller: PlayerId,
    pub zone: Zone,
    pub tags: FxHashMap<GameTag, i64>,
    /// Set by destroy effects; finalized by the death sweep.
    pub to_be_destroyed: bool,
    pub listeners: im::Vector<EventListener>,
}

impl Entity {
    #[must_use]
    pub fn new(id: EntityId, card_id: CardId, kind: EntityKind, controller: PlayerId) -> Self {
        Self {
            id,
            card_id,
            kind,
            controller,
            zone: Zone::Invalid,
            tags: FxHashMap::default(),
            to_be_destroyed: false,
            listeners: im::Vector::new(),
        }
    }

    /// Raw tag value, 0 when unset.
    #[must_use]
    pub fn tag(&self, tag: GameTag) -> i64 {
        self.tags.get(&tag).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn has(&self, tag: GameTag) -> bool {
        self.tag(tag) != 0
    }

    pub fn set_tag(&mut self, tag: GameTag, value: i64) {
        if value == 0 {
            self.tags.remove(&tag);
        } else {
            self.tags.insert(tag, value);
        }
    }

    pub fn add_tag(&mut self, tag: GameTag, delta: i64) {
        let value = self.tag(tag) + delta;
        self.set_tag(tag, value);
    }

    #[must_use]
    pub fn is_character(&self) -> bool {
        self.kind.is_character()
    }

    #[must_use]
    pub fn is_minion(&self) -> bool {
        self.kind.is_minion()
    }

    #[must_use]
    pub fn in_play(&self) -> bool {
        self.zone == Zone::Play
    }
}
