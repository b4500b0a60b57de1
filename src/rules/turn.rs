//! One simulated turn.
//!
//! The random policy the search samples turns with: play everything
//! playable in random order, attack with everything that can, sprinkle in
//! the hero power, end the turn. Every random pick comes from the game's own
//! RNG, so a fork reproduces its turn from its seed.

use super::engine::Game;
use crate::core::{ChoiceKind, EntityId, PlayerId};
use crate::error::Result;

/// How a simulated turn finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The turn ended and the opponent is to move.
    Continued,
    /// The match ended during the turn.
    GameEnded,
}

impl Game {
    /// Play the current player's turn with the random policy.
    pub fn play_set_turn(&mut self) -> Result<TurnOutcome> {
        self.ensure_running()?;
        self.resolve_choices_randomly()?;
        if self.state.is_complete() {
            return Ok(TurnOutcome::GameEnded);
        }

        let player = self.state.current_player;
        let power_chance = self.config.hero_power_chance;
        loop {
            if self.state.is_complete() {
                return Ok(TurnOutcome::GameEnded);
            }
            if self.state.rng.gen_bool(power_chance) {
                self.use_power_randomly(player)?;
            }

            let mut played = false;
            let mut hand: Vec<EntityId> = self.state.player(player).hand.iter().copied().collect();
            self.state.rng.shuffle(&mut hand);
            for card in hand {
                if self.state.is_complete() {
                    return Ok(TurnOutcome::GameEnded);
                }
                if self.is_playable(card) {
                    self.play_randomly(card)?;
                    self.resolve_choices_randomly()?;
                    played = true;
                }
            }

            let mut characters = self.state.characters(player);
            self.state.rng.shuffle(&mut characters);
            for attacker in characters {
                if self.state.is_complete() {
                    return Ok(TurnOutcome::GameEnded);
                }
                if !self.can_attack(attacker) {
                    continue;
                }
                let targets = self.attack_targets(attacker);
                if let Some(defender) = self.state.rng.choose(&targets) {
                    self.attack(attacker, defender)?;
                }
            }

            if self.state.is_complete() {
                return Ok(TurnOutcome::GameEnded);
            }
            self.use_power_randomly(player)?;
            if !played {
                break;
            }
        }

        if self.state.is_complete() {
            return Ok(TurnOutcome::GameEnded);
        }
        self.end_turn()?;
        Ok(if self.state.is_complete() {
            TurnOutcome::GameEnded
        } else {
            TurnOutcome::Continued
        })
    }

    fn use_power_randomly(&mut self, player: PlayerId) -> Result<()> {
        if !self.power_usable(player) {
            return Ok(());
        }
        let targets = self.power_targets(player);
        let target = if targets.is_empty() {
            None
        } else {
            self.state.rng.choose(&targets)
        };
        self.use_hero_power(target)
    }

    fn play_randomly(&mut self, card: EntityId) -> Result<()> {
        let options = self.playable_options(card);
        let choose = self.state.rng.choose(&options);
        let target = if self.requires_target(card, choose) {
            let targets = self.play_targets(card, choose);
            self.state.rng.choose(&targets)
        } else {
            None
        };
        self.play_card(card, target, choose)
    }

    /// Settle every pending choice with a uniform random pick: each mulligan
    /// card is replaced with probability one half, one discover option is kept.
    pub fn resolve_choices_randomly(&mut self) -> Result<()> {
        for player in PlayerId::both() {
            if self.state.is_complete() {
                break;
            }
            let Some(choice) = self.state.player(player).choice.clone() else {
                continue;
            };
            let picks: Vec<EntityId> = match choice.kind {
                ChoiceKind::Mulligan => choice
                    .cards
                    .iter()
                    .copied()
                    .filter(|_| self.state.rng.gen_bool(0.5))
                    .collect(),
                ChoiceKind::Discover => self.state.rng.choose(&choice.cards).into_iter().collect(),
            };
            self.choose(player, &picks)?;
        }
        Ok(())
    }
}
