//! Rules constants for a match.
//!
//! Everything the engine treats as a limit or a probability lives in
//! [`GameConfig`], so tests and the search can run short or skewed matches
//! without touching the rules code.

use serde::{Deserialize, Serialize};

/// Configurable rules limits.
///
/// ```
/// use ccg_mcts::core::GameConfig;
///
/// let config = GameConfig::default().with_max_turns(20);
/// assert_eq!(config.max_minions_on_field, 7);
/// assert_eq!(config.max_turns, 20);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub max_minions_on_field: usize,
    pub max_hand_size: usize,
    pub deck_size: usize,
    /// Opening hand of the player who goes first.
    pub first_hand_size: usize,
    /// Opening hand of the player who goes second.
    pub second_hand_size: usize,
    pub max_mana: i64,
    pub hero_health: i64,
    /// Turn after which the match is declared a tie.
    pub max_turns: u32,
    /// Probability a simulated turn opens with the hero power.
    pub hero_power_chance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_minions_on_field: 7,
            max_hand_size: 10,
            deck_size: 30,
            first_hand_size: 3,
            second_hand_size: 4,
            max_mana: 10,
            hero_health: 30,
            max_turns: 89,
            hero_power_chance: 0.33,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = turns;
        self
    }

    #[must_use]
    pub fn with_hero_health(mut self, health: i64) -> Self {
        self.hero_health = health;
        self
    }

    #[must_use]
    pub fn with_hero_power_chance(mut self, chance: f64) -> Self {
        self.hero_power_chance = chance;
        self
    }

    #[must_use]
    pub fn with_deck_size(mut self, size: usize) -> Self {
        self.deck_size = size;
        self
    }

    /// Opening hand size for the given turn order.
    #[must_use]
    pub fn opening_hand(&self, first: bool) -> usize {
        if first {
            self.first_hand_size
        } else {
            self.second_hand_size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.max_hand_size, 10);
        assert_eq!(config.max_turns, 89);
        assert_eq!(config.opening_hand(true), 3);
        assert_eq!(config.opening_hand(false), 4);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = GameConfig::default().with_hero_health(10).with_hero_power_chance(1.0);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
