//! Event listeners registered on entities and players.

use serde::{Deserialize, Serialize};

use super::event::{EventKind, GameEvent};
use crate::core::{EntityId, GameState};
use crate::effects::Effect;

/// Filter evaluated relative to the listener's owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListenerCondition {
    Always,
    /// The event happened to the owner.
    TargetIsSelf,
    /// The owner caused the event.
    SourceIsSelf,
    /// The event happened to the owner's hero.
    TargetIsFriendlyHero,
    /// The event happened to another minion of the owner's side.
    TargetIsFriendlyMinion,
    TargetIsEnemyMinion,
    /// The event was caused by a minion.
    SourceIsMinion,
    /// The event's player is the owner's controller.
    PlayerIsController,
    PlayerIsOpponent,
    All(Vec<ListenerCondition>),
}

impl ListenerCondition {
    /// Evaluate against an event for a listener owned by `owner`.
    #[must_use]
    pub fn evaluate(&self, event: &GameEvent, owner: EntityId, state: &GameState) -> bool {
        let Some(controller) = state.controller(owner) else {
            return false;
        };
        let target_entity = event.target.and_then(|t| state.entity(t));

        match self {
            ListenerCondition::Always => true,
            ListenerCondition::TargetIsSelf => event.target == Some(owner),
            ListenerCondition::SourceIsSelf => event.source == Some(owner),
            ListenerCondition::TargetIsFriendlyHero => {
                event.target == Some(state.player(controller).hero)
            }
            ListenerCondition::TargetIsFriendlyMinion => target_entity.is_some_and(|e| {
                e.is_minion() && e.controller == controller && e.id != owner
            }),
            ListenerCondition::TargetIsEnemyMinion => {
                target_entity.is_some_and(|e| e.is_minion() && e.controller != controller)
            }
            ListenerCondition::SourceIsMinion => event
                .source
                .and_then(|s| state.entity(s))
                .is_some_and(|e| e.is_minion()),
            ListenerCondition::PlayerIsController => event.player == Some(controller),
            ListenerCondition::PlayerIsOpponent => event.player == Some(controller.opponent()),
            ListenerCondition::All(conditions) => {
                conditions.iter().all(|c| c.evaluate(event, owner, state))
            }
        }
    }
}

/// A deferred reaction: when an event of `kind` passes `condition`, run
/// `effects` with the owner as source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventListener {
    pub kind: EventKind,
    pub condition: ListenerCondition,
    pub effects: Vec<Effect>,
    /// Removed from its owner after the first match.
    pub once: bool,
}

impl EventListener {
    /// Listener that stays for as long as its owner is in play.
    #[must_use]
    pub fn persistent(kind: EventKind, condition: ListenerCondition, effects: Vec<Effect>) -> Self {
        Self {
            kind,
            condition,
            effects,
            once: false,
        }
    }

    /// Listener removed after it fires once.
    #[must_use]
    pub fn once(kind: EventKind, condition: ListenerCondition, effects: Vec<Effect>) -> Self {
        Self {
            kind,
            condition,
            effects,
            once: true,
        }
    }

    #[must_use]
    pub fn matches(&self, event: &GameEvent, owner: EntityId, state: &GameState) -> bool {
        self.kind == event.kind && self.condition.evaluate(event, owner, state)
    }
}
