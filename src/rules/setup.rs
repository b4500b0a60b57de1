//! Match setup variants, composed into [`GameRules`].
//!
//! Who goes first, whether players mulligan, and whether the second player
//! receives a coin are independent choices. Each is a field of `GameRules`
//! injected when the game is built.

use std::fmt;
use std::sync::Arc;

use crate::cards::basic::ids::THE_COIN;
use crate::cards::CardId;
use crate::core::{GameRng, PlayerId};

/// Picks the player who takes the first turn.
pub trait FirstPlayerRule: Send + Sync + fmt::Debug {
    fn first_player(&self, rng: &mut GameRng) -> PlayerId;
}

/// Always the same seat.
#[derive(Clone, Copy, Debug)]
pub struct FixedFirstPlayer(pub PlayerId);

impl FirstPlayerRule for FixedFirstPlayer {
    fn first_player(&self, _rng: &mut GameRng) -> PlayerId {
        self.0
    }
}

/// A fair coin flip from the game RNG.
#[derive(Clone, Copy, Debug)]
pub struct RandomFirstPlayer;

impl FirstPlayerRule for RandomFirstPlayer {
    fn first_player(&self, rng: &mut GameRng) -> PlayerId {
        if rng.gen_bool(0.5) {
            PlayerId::new(0)
        } else {
            PlayerId::new(1)
        }
    }
}

/// What happens between the opening draw and the first turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SetupRule {
    /// Start the first turn right after the opening draw.
    Immediate,
    /// Both players get a mulligan choice; the first turn starts once both chose.
    #[default]
    Mulligan,
}

/// Engine variant, fixed at construction.
#[derive(Clone, Debug)]
pub struct GameRules {
    pub first_player: Arc<dyn FirstPlayerRule>,
    pub setup: SetupRule,
    /// Card given to the second player before turn 1.
    pub coin: Option<CardId>,
}

impl GameRules {
    /// Seat 0 first, mulligan, The Coin for seat 1.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            first_player: Arc::new(FixedFirstPlayer(PlayerId::new(0))),
            setup: SetupRule::Mulligan,
            coin: Some(THE_COIN),
        }
    }

    /// Seat 0 first, no mulligan, no coin.
    #[must_use]
    pub fn basic() -> Self {
        Self {
            first_player: Arc::new(FixedFirstPlayer(PlayerId::new(0))),
            setup: SetupRule::Immediate,
            coin: None,
        }
    }

    #[must_use]
    pub fn with_first_player(mut self, rule: impl FirstPlayerRule + 'static) -> Self {
        self.first_player = Arc::new(rule);
        self
    }

    #[must_use]
    pub fn with_setup(mut self, setup: SetupRule) -> Self {
        self.setup = setup;
        self
    }

    #[must_use]
    pub fn with_coin(mut self, coin: Option<CardId>) -> Self {
        self.coin = coin;
        self
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_rule() {
        let mut rng = GameRng::new(1);
        let rule = FixedFirstPlayer(PlayerId::new(1));
        assert_eq!(rule.first_player(&mut rng), PlayerId::new(1));
    }

    #[test]
    fn test_random_rule_picks_both_seats() {
        let mut rng = GameRng::new(11);
        let picks: Vec<_> = (0..64).map(|_| RandomFirstPlayer.first_player(&mut rng)).collect();
        assert!(picks.contains(&PlayerId::new(0)));
        assert!(picks.contains(&PlayerId::new(1)));
    }

    #[test]
    fn test_rule_composition() {
        let rules = GameRules::standard()
            .with_setup(SetupRule::Immediate)
            .with_coin(None);
        assert_eq!(rules.setup, SetupRule::Immediate);
        assert!(rules.coin.is_none());
        assert_eq!(GameRules::default().coin, Some(THE_COIN));
    }
}
