//! Card definitions - static card data.
//!
//! `CardDefinition` holds everything the engine needs to know about a card
//! type: its stats and keywords, what it does when played, what it does
//! when it dies, what it listens for, and which continuous scripts it runs
//! while in play or in hand. Instance data (damage taken, zone, buffs) lives
//! on the entity and the game state.

use serde::{Deserialize, Serialize};

use crate::core::{EntityKind, GameTag};
use crate::effects::{Effect, TargetRequirement};
use crate::triggers::EventListener;

/// Unique identifier for a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Hero,
    Minion,
    Spell,
    HeroPower,
}

impl CardType {
    /// Entity kind an instance of this card becomes.
    #[must_use]
    pub const fn entity_kind(self) -> EntityKind {
        match self {
            CardType::Hero => EntityKind::Hero,
            CardType::Minion => EntityKind::Minion,
            CardType::Spell => EntityKind::Spell,
            CardType::HeroPower => EntityKind::HeroPower,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardClass {
    Neutral,
    Mage,
    Druid,
    Priest,
    Shaman,
}

/// Which entities a continuous script covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuraScope {
    /// The owner itself (hand scripts such as cost reductions).
    OwnerOnly,
    FriendlyMinions,
    OtherFriendlyMinions,
    /// Minions directly left and right of the owner.
    AdjacentMinions,
}

/// How a script's amounts scale with the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuraScaling {
    Flat,
    /// Multiplied by the number of other minions in play on both sides.
    PerOtherMinion,
}

/// What a script does to each entity it covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuraKind {
    /// Add the script's amounts.
    #[default]
    Modify,
    /// Set attack to current health, as seen by the scripts run so far this
    /// refresh.
    AttackEqualsHealth,
}

/// A continuous script re-run at every aura refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuraScript {
    /// Lower runs first.
    pub priority: i32,
    pub kind: AuraKind,
    pub scope: AuraScope,
    pub attack: i64,
    pub health: i64,
    pub cost: i64,
    pub scaling: AuraScaling,
}

impl AuraScript {
    pub const DEFAULT_PRIORITY: i32 = 50;

    #[must_use]
    pub fn stats(scope: AuraScope, attack: i64, health: i64) -> Self {
        Self {
            priority: Self::DEFAULT_PRIORITY,
            kind: AuraKind::Modify,
            scope,
            attack,
            health,
            cost: 0,
            scaling: AuraScaling::Flat,
        }
    }

    #[must_use]
    pub fn cost(scope: AuraScope, cost: i64, scaling: AuraScaling) -> Self {
        Self {
            priority: Self::DEFAULT_PRIORITY,
            kind: AuraKind::Modify,
            scope,
            attack: 0,
            health: 0,
            cost,
            scaling,
        }
    }

    /// The owner's attack always equals its health.
    #[must_use]
    pub fn attack_equals_health() -> Self {
        Self {
            kind: AuraKind::AttackEqualsHealth,
            ..Self::stats(AuraScope::OwnerOnly, 0, 0)
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Static card definition.
///
/// ```
/// use ccg_mcts::cards::{CardDefinition, CardId, CardType};
/// use ccg_mcts::core::GameTag;
///
/// let yeti = CardDefinition::minion(CardId::new(1), "Chillwind Yeti", 4, 4, 5)
///     .with_tag(GameTag::Taunt, 1);
/// assert_eq!(yeti.card_type, CardType::Minion);
/// assert_eq!(yeti.initial_tag(GameTag::Taunt), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub card_type: CardType,
    pub class: CardClass,
    pub cost: i64,
    pub attack: i64,
    pub health: i64,
    /// Keywords and other starting tags (taunt, charge, windfury, overload).
    pub tags: Vec<(GameTag, i64)>,
    pub collectible: bool,
    pub target: TargetRequirement,
    /// Battlecry, spell text or hero power.
    pub effects: Vec<Effect>,
    pub deathrattle: Vec<Effect>,
    pub listeners: Vec<EventListener>,
    /// Scripts active while in play.
    pub auras: Vec<AuraScript>,
    /// Scripts active while in hand.
    pub hand_auras: Vec<AuraScript>,
    /// Option cards of a choose-one card.
    pub choose_one: Vec<CardId>,
    /// Hero power of a hero card.
    pub hero_power: Option<CardId>,
}

impl CardDefinition {
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, card_type: CardType, cost: i64) -> Self {
        Self {
            id,
            name: name.into(),
            card_type,
            class: CardClass::Neutral,
            cost,
            attack: 0,
            health: 0,
            tags: Vec::new(),
            collectible: true,
            target: TargetRequirement::None,
            effects: Vec::new(),
            deathrattle: Vec::new(),
            listeners: Vec::new(),
            auras: Vec::new(),
            hand_auras: Vec::new(),
            choose_one: Vec::new(),
            hero_power: None,
        }
    }

    #[must_use]
    pub fn minion(id: CardId, name: impl Into<String>, cost: i64, attack: i64, health: i64) -> Self {
        let mut card = Self::new(id, name, CardType::Minion, cost);
        card.attack = attack;
        card.health = health;
        card
    }

    #[must_use]
    pub fn spell(id: CardId, name: impl Into<String>, cost: i64) -> Self {
        Self::new(id, name, CardType::Spell, cost)
    }

    #[must_use]
    pub fn with_class(mut self, class: CardClass) -> Self {
        self.class = class;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: GameTag, value: i64) -> Self {
        self.tags.push((tag, value));
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetRequirement) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_deathrattle(mut self, effect: Effect) -> Self {
        self.deathrattle.push(effect);
        self
    }

    #[must_use]
    pub fn with_listener(mut self, listener: EventListener) -> Self {
        self.listeners.push(listener);
        self
    }

    #[must_use]
    pub fn with_aura(mut self, aura: AuraScript) -> Self {
        self.auras.push(aura);
        self
    }

    #[must_use]
    pub fn with_hand_aura(mut self, aura: AuraScript) -> Self {
        self.hand_auras.push(aura);
        self
    }

    #[must_use]
    pub fn with_choose_one(mut self, options: impl IntoIterator<Item = CardId>) -> Self {
        self.choose_one.extend(options);
        self
    }

    #[must_use]
    pub fn with_hero_power(mut self, power: CardId) -> Self {
        self.hero_power = Some(power);
        self
    }

    /// Tokens, heroes and powers never go into decks.
    #[must_use]
    pub fn uncollectible(mut self) -> Self {
        self.collectible = false;
        self
    }

    /// Starting value of a keyword tag.
    #[must_use]
    pub fn initial_tag(&self, tag: GameTag) -> i64 {
        self.tags
            .iter()
            .find(|(t, _)| *t == tag)
            .map_or(0, |(_, v)| *v)
    }

    #[must_use]
    pub fn has_choose_one(&self) -> bool {
        !self.choose_one.is_empty()
    }
}
