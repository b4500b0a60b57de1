//! Card-level effect descriptions.
//!
//! Effects are what card definitions carry: battlecries, spell text, hero
//! powers, deathrattles and listener bodies. At resolution time each effect
//! turns into zero or more [`Action`](crate::core::Action)s against the
//! entities its [`Selector`] picks (see `effects::resolver`).

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::triggers::EventListener;

/// Which entities an effect applies to, relative to its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// The target chosen when the card was played.
    Target,
    /// The entity running the effect.
    Source,
    FriendlyHero,
    EnemyHero,
    FriendlyMinions,
    /// Friendly minions other than the source.
    OtherFriendlyMinions,
    EnemyMinions,
    AllMinions,
    /// Enemy hero and minions.
    EnemyCharacters,
    /// One living enemy character, picked when the effect resolves.
    RandomEnemyCharacter,
    RandomEnemyMinion,
    /// Source of the event that fired the listener.
    EventSource,
    /// Target of the event that fired the listener.
    EventTarget,
}

/// Side of the board, relative to the source's controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Friendly,
    Enemy,
}

/// One step of a card script.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    Damage { to: Selector, amount: i64 },
    Heal { to: Selector, amount: i64 },
    Buff {
        to: Selector,
        attack: i64,
        health: i64,
        /// Expires at end of turn.
        one_turn: bool,
    },
    Freeze { to: Selector },
    Destroy { to: Selector },
    /// Transform minions into another card.
    Morph { to: Selector, into: CardId },
    Draw { who: Side, count: u32 },
    Summon { who: Side, card: CardId },
    /// Put a copy of a card into a hand.
    Give { who: Side, card: CardId },
    GainMana { amount: i64, temporary: bool },
    GainArmor { amount: i64 },
    /// Offer up to three distinct cards from the pool; the pick goes to hand.
    Discover { pool: Vec<CardId> },
    /// Register a one-shot listener (secrets and similar delayed effects).
    Listen(EventListener),
}

impl Effect {
    #[must_use]
    pub fn damage(to: Selector, amount: i64) -> Self {
        Effect::Damage { to, amount }
    }

    #[must_use]
    pub fn buff(to: Selector, attack: i64, health: i64) -> Self {
        Effect::Buff {
            to,
            attack,
            health,
            one_turn: false,
        }
    }

    #[must_use]
    pub fn draw(count: u32) -> Self {
        Effect::Draw {
            who: Side::Friendly,
            count,
        }
    }

    /// The selector this effect targets, if any.
    #[must_use]
    pub fn selector(&self) -> Option<Selector> {
        match self {
            Effect::Damage { to, .. }
            | Effect::Heal { to, .. }
            | Effect::Buff { to, .. }
            | Effect::Freeze { to }
            | Effect::Destroy { to }
            | Effect::Morph { to, .. } => Some(*to),
            _ => None,
        }
    }

    /// Whether resolving this effect reads the played target.
    #[must_use]
    pub fn uses_target(&self) -> bool {
        self.selector() == Some(Selector::Target)
    }
}
