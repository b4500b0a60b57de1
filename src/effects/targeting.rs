//! Play-time target requirements.
//!
//! A card or hero power declares what it may be aimed at. The engine uses
//! the requirement both to validate a chosen target and to enumerate legal
//! targets for the simulated turn policy.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, GameState, PlayerId};

/// Which characters qualify as a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetFilter {
    AnyCharacter,
    AnyMinion,
    FriendlyMinion,
    EnemyMinion,
    EnemyCharacter,
}

impl TargetFilter {
    /// Whether `candidate` passes for a card controlled by `controller`.
    #[must_use]
    pub fn accepts(self, state: &GameState, controller: PlayerId, candidate: EntityId) -> bool {
        let Some(entity) = state.entity(candidate) else {
            return false;
        };
        if !entity.in_play() || !entity.kind.is_targetable() {
            return false;
        }
        let friendly = entity.controller == controller;
        match self {
            TargetFilter::AnyCharacter => true,
            TargetFilter::AnyMinion => entity.is_minion(),
            TargetFilter::FriendlyMinion => entity.is_minion() && friendly,
            TargetFilter::EnemyMinion => entity.is_minion() && !friendly,
            TargetFilter::EnemyCharacter => !friendly,
        }
    }
}

/// Target declaration of a playable card or hero power.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRequirement {
    /// Never takes a target.
    #[default]
    None,
    /// Cannot be played without a legal target.
    Required(TargetFilter),
    /// Takes a target when one exists, otherwise plays untargeted.
    IfAvailable(TargetFilter),
}

impl TargetRequirement {
    #[must_use]
    pub fn filter(self) -> Option<TargetFilter> {
        match self {
            TargetRequirement::None => None,
            TargetRequirement::Required(f) | TargetRequirement::IfAvailable(f) => Some(f),
        }
    }

    /// Legal targets in board order, excluding `exclude` (the card itself).
    #[must_use]
    pub fn targets(self, state: &GameState, controller: PlayerId, exclude: EntityId) -> Vec<EntityId> {
        let Some(filter) = self.filter() else {
            return Vec::new();
        };
        state
            .board_characters()
            .into_iter()
            .filter(|&id| id != exclude && filter.accepts(state, controller, id))
            .collect()
    }

    /// Whether a target must be supplied given the current board.
    #[must_use]
    pub fn needs_target(self, state: &GameState, controller: PlayerId, exclude: EntityId) -> bool {
        match self {
            TargetRequirement::None => false,
            TargetRequirement::Required(_) => true,
            TargetRequirement::IfAvailable(_) => !self.targets(state, controller, exclude).is_empty(),
        }
    }

    /// Whether the card may be played at all on the current board.
    #[must_use]
    pub fn satisfiable(self, state: &GameState, controller: PlayerId, exclude: EntityId) -> bool {
        match self {
            TargetRequirement::Required(_) => !self.targets(state, controller, exclude).is_empty(),
            _ => true,
        }
    }
}
