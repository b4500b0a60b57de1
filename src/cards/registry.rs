//! Card registry for definition lookup.
//!
//! The registry is built once and shared (`Arc`) by every game and every
//! search fork, so it never takes part in state cloning.

use rustc_hash::FxHashMap;

use super::definition::{CardClass, CardDefinition, CardId};
use crate::error::{GameError, Result};

/// Registry of card definitions.
///
/// ```
/// use ccg_mcts::cards::{CardDefinition, CardId, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::minion(CardId::new(1), "Bloodfen Raptor", 2, 3, 2));
///
/// assert_eq!(registry.by_name("Bloodfen Raptor"), Some(CardId::new(1)));
/// assert_eq!(registry.card(CardId::new(1)).unwrap().attack, 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
    names: FxHashMap<String, CardId>,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDefinition) -> CardId {
        assert!(
            !self.cards.contains_key(&card.id),
            "Card with ID {:?} already registered",
            card.id
        );
        let id = card.id;
        self.names.insert(card.name.clone(), id);
        self.cards.insert(id, card);
        id
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Lookup that reports a missing card as an error.
    pub fn card(&self, id: CardId) -> Result<&CardDefinition> {
        self.cards.get(&id).ok_or(GameError::UnknownCard(id))
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<CardId> {
        self.names.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Collectible cards usable by `class` (its own and neutral), by id.
    #[must_use]
    pub fn collectible(&self, class: CardClass) -> Vec<CardId> {
        let mut ids: Vec<CardId> = self
            .cards
            .values()
            .filter(|c| c.collectible && (c.class == class || c.class == CardClass::Neutral))
            .map(|c| c.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = CardRegistry::new();
        assert!(registry.is_empty());

        registry.register(CardDefinition::minion(CardId::new(2), "Ogre", 6, 6, 7));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(CardId::new(2)));
        assert!(registry.get(CardId::new(9)).is_none());
        assert_eq!(registry.card(CardId::new(9)), Err(GameError::UnknownCard(CardId::new(9))));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_panics() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::spell(CardId::new(1), "A", 1));
        registry.register(CardDefinition::spell(CardId::new(1), "B", 1));
    }

    #[test]
    fn test_collectible_filters_class() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::spell(CardId::new(3), "Mage spell", 1).with_class(CardClass::Mage));
        registry.register(CardDefinition::spell(CardId::new(1), "Druid spell", 1).with_class(CardClass::Druid));
        registry.register(CardDefinition::minion(CardId::new(2), "Neutral", 1, 1, 1));
        registry.register(CardDefinition::minion(CardId::new(4), "Token", 1, 1, 1).uncollectible());

        assert_eq!(
            registry.collectible(CardClass::Mage),
            vec![CardId::new(2), CardId::new(3)]
        );
    }
}
