//! Game events broadcast to listeners.
//!
//! The engine fires an event whenever something a card may react to
//! happens. The event travels with the listener's block as its event
//! arguments, so listener effects can address "the minion that died" or
//! "the character that was damaged".

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerId};

/// Kinds of events the engine broadcasts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Play,
    Attack,
    Damage,
    Heal,
    Death,
    Summon,
    Draw,
    TurnBegin,
    TurnEnd,
}

/// A broadcast event.
///
/// - `source`: entity that caused it (attacker, damage dealer, played card)
/// - `target`: entity it happened to (defender, damaged or dead character)
/// - `player`: seat it concerns (the player who played, drew or whose turn it is)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: EventKind,
    pub source: Option<EntityId>,
    pub target: Option<EntityId>,
    pub player: Option<PlayerId>,
    pub amount: i64,
}

impl GameEvent {
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            source: None,
            target: None,
            player: None,
            amount: 0,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    #[must_use]
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    pub fn play(player: PlayerId, card: EntityId) -> Self {
        Self::new(EventKind::Play).with_player(player).with_source(card)
    }

    pub fn attack(attacker: EntityId, defender: EntityId) -> Self {
        Self::new(EventKind::Attack).with_source(attacker).with_target(defender)
    }

    pub fn damage(source: EntityId, target: EntityId, amount: i64) -> Self {
        Self::new(EventKind::Damage)
            .with_source(source)
            .with_target(target)
            .with_amount(amount)
    }

    pub fn death(entity: EntityId, controller: PlayerId) -> Self {
        Self::new(EventKind::Death).with_target(entity).with_player(controller)
    }

    pub fn turn_begin(player: PlayerId) -> Self {
        Self::new(EventKind::TurnBegin).with_player(player)
    }

    pub fn turn_end(player: PlayerId) -> Self {
        Self::new(EventKind::TurnEnd).with_player(player)
    }
}
