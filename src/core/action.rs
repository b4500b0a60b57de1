//! Atomic state changes.
//!
//! An [`Action`] is a value describing one mutation. The engine triggers it
//! against a source entity inside a block (see `rules::blocks`) and collects
//! the entities it affected. Card scripts never mutate state directly: they
//! resolve to actions first.

use smallvec::SmallVec;

use super::entity::EntityId;
use super::player::PlayerId;
use crate::cards::CardId;
use crate::triggers::EventListener;

/// Entities touched by one triggered action.
pub type ActionResult = SmallVec<[EntityId; 4]>;

/// One state change.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Move a card from hand into play, pay for it and run its play effects.
    Play {
        card: EntityId,
        target: Option<EntityId>,
        /// Field position for minions; `None` appends.
        index: Option<usize>,
        /// Chosen option of a choose-one card.
        choose: Option<CardId>,
    },
    Attack {
        attacker: EntityId,
        defender: EntityId,
    },
    UsePower {
        power: EntityId,
        target: Option<EntityId>,
    },
    BeginTurn {
        player: PlayerId,
    },
    EndTurn {
        player: PlayerId,
    },
    Draw {
        player: PlayerId,
        count: u32,
    },
    /// Drawing from an empty deck.
    Fatigue {
        player: PlayerId,
    },
    Damage {
        target: EntityId,
        amount: i64,
    },
    Heal {
        target: EntityId,
        amount: i64,
    },
    Buff {
        target: EntityId,
        attack: i64,
        health: i64,
        one_turn: bool,
    },
    GainArmor {
        player: PlayerId,
        amount: i64,
    },
    GainMana {
        player: PlayerId,
        amount: i64,
        temporary: bool,
    },
    Freeze {
        target: EntityId,
    },
    Destroy {
        target: EntityId,
    },
    Summon {
        player: PlayerId,
        card: CardId,
    },
    Give {
        player: PlayerId,
        card: CardId,
    },
    /// Replace a minion with a fresh one of another card.
    Morph {
        target: EntityId,
        into: CardId,
    },
    Discover {
        player: PlayerId,
        cards: SmallVec<[CardId; 3]>,
    },
    Mulligan {
        player: PlayerId,
    },
    /// Post-sweep death: broadcasts the event and runs the deathrattle.
    Death {
        entity: EntityId,
    },
    /// Register a one-shot listener instead of triggering.
    Listen(EventListener),
}

impl Action {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::Play { .. } => "Play",
            Action::Attack { .. } => "Attack",
            Action::UsePower { .. } => "UsePower",
            Action::BeginTurn { .. } => "BeginTurn",
            Action::EndTurn { .. } => "EndTurn",
            Action::Draw { .. } => "Draw",
            Action::Fatigue { .. } => "Fatigue",
            Action::Damage { .. } => "Damage",
            Action::Heal { .. } => "Heal",
            Action::Buff { .. } => "Buff",
            Action::GainArmor { .. } => "GainArmor",
            Action::GainMana { .. } => "GainMana",
            Action::Freeze { .. } => "Freeze",
            Action::Destroy { .. } => "Destroy",
            Action::Summon { .. } => "Summon",
            Action::Give { .. } => "Give",
            Action::Morph { .. } => "Morph",
            Action::Discover { .. } => "Discover",
            Action::Mulligan { .. } => "Mulligan",
            Action::Death { .. } => "Death",
            Action::Listen(_) => "Listen",
        }
    }

    #[must_use]
    pub fn is_listener(&self) -> bool {
        matches!(self, Action::Listen(_))
    }
}
