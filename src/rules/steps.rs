//! Turn structure: setup, mulligan, turn begin and end, pending choices.

use super::engine::Game;
use super::observer::BlockType;
use super::setup::SetupRule;
use crate::core::{Action, BuffDuration, ChoiceKind, EntityId, GameStatus, GameTag, PlayState, PlayerId, Step, VerbosityLevel, Zone};
use crate::error::{GameError, Result};
use crate::triggers::GameEvent;

impl Game {
    /// Run setup: pick the first player, shuffle, draw opening hands, then
    /// either offer mulligans or begin turn 1. Calling it twice is a no-op.
    pub fn start(&mut self) -> Result<()> {
        if self.state.status != GameStatus::Invalid {
            return Ok(());
        }
        self.state.status = GameStatus::Running;
        self.state.step = Step::BeginFirst;

        let first = self.rules.first_player.first_player(&mut self.state.rng);
        let second = first.opponent();
        self.state.first_player = first;
        self.state.current_player = first;
        for (id, seat) in self.state.players.iter_mut() {
            seat.playstate = PlayState::Playing;
            seat.first_player = id == first;
        }
        self.log(VerbosityLevel::Normal, "game", |g| {
            format!("{} goes first", g.state.player(first).name)
        });

        self.state.step = Step::BeginShuffle;
        for p in PlayerId::both() {
            let mut deck = self.state.player(p).deck.clone();
            self.state.rng.shuffle_vector(&mut deck);
            self.state.player_mut(p).deck = deck;
        }

        self.state.step = Step::BeginDraw;
        let opening = vec![
            Action::Draw {
                player: first,
                count: self.config.opening_hand(true) as u32,
            },
            Action::Draw {
                player: second,
                count: self.config.opening_hand(false) as u32,
            },
        ];
        self.run_block(EntityId::GAME, opening, BlockType::Trigger, None, None)?;
        if self.state.is_complete() {
            return Ok(());
        }

        match self.rules.setup {
            SetupRule::Mulligan => {
                self.state.step = Step::BeginMulligan;
                self.state.next_step = Step::MainReady;
                let offers = vec![Action::Mulligan { player: first }, Action::Mulligan { player: second }];
                self.run_block(EntityId::GAME, offers, BlockType::Trigger, None, None)?;
                Ok(())
            }
            SetupRule::Immediate => self.begin_first_turn(),
        }
    }

    fn begin_first_turn(&mut self) -> Result<()> {
        let first = self.state.first_player;
        self.state.step = Step::MainReady;
        self.state.next_step = Step::MainStart;

        let mut actions = Vec::with_capacity(2);
        if let Some(coin) = self.rules.coin {
            actions.push(Action::Give {
                player: first.opponent(),
                card: coin,
            });
        }
        actions.push(Action::BeginTurn { player: first });
        self.run_block(EntityId::GAME, actions, BlockType::Trigger, None, None)?;
        Ok(())
    }

    /// Turn-begin bookkeeping for `player`, then the turn's draw.
    pub(crate) fn begin_turn(&mut self, player: PlayerId) -> Result<()> {
        self.state.step = Step::MainStart;
        self.state.next_step = Step::MainAction;
        self.state.turn += 1;
        self.state.current_player = player;

        if self.state.turn > self.config.max_turns {
            self.log(VerbosityLevel::Normal, "game", |g| format!("turn limit {} reached", g.config.max_turns));
            for p in PlayerId::both() {
                self.state.player_mut(p).playstate = PlayState::Losing;
            }
            self.check_for_end_game();
            return Ok(());
        }

        let cap = self.config.max_mana;
        let seat = self.state.player_mut(player);
        seat.reset_turn_counters();
        seat.max_mana = (seat.max_mana + 1).min(cap);
        seat.used_mana = 0;
        seat.temp_mana = 0;
        seat.overload_locked = seat.overloaded;
        seat.overloaded = 0;

        for id in self.state.live_entities() {
            if let Some(e) = self.state.entity_mut(id) {
                e.add_tag(GameTag::TurnsInPlay, 1);
            }
        }
        for id in self.state.board_characters() {
            if let Some(e) = self.state.entity_mut(id) {
                e.set_tag(GameTag::NumAttacks, 0);
            }
        }
        for id in self.state.characters(player) {
            if let Some(e) = self.state.entity_mut(id) {
                e.set_tag(GameTag::Exhausted, 0);
            }
        }

        self.log(VerbosityLevel::Normal, "turn", |g| {
            format!("turn {} begins for {}", g.state.turn, g.state.player(player).name)
        });

        self.broadcast(GameEvent::turn_begin(player))?;
        if !self.state.is_complete() {
            self.trigger_action(EntityId::player(player), Action::Draw { player, count: 1 })?;
        }
        if !self.state.is_complete() {
            self.state.step = Step::MainAction;
            self.state.next_step = Step::MainEnd;
        }
        Ok(())
    }

    /// End-of-turn cleanup for `player`. The opponent's turn begins in the
    /// same block.
    pub(crate) fn end_turn_cleanup(&mut self, player: PlayerId) -> Result<()> {
        self.state.step = Step::MainEnd;
        self.state.next_step = Step::MainCleanup;
        self.log(VerbosityLevel::Normal, "turn", |g| {
            format!("{} ends turn {}", g.state.player(player).name, g.state.turn)
        });

        self.broadcast(GameEvent::turn_end(player))?;
        if self.state.is_complete() {
            return Ok(());
        }

        self.state.step = Step::MainCleanup;
        self.state.player_mut(player).temp_mana = 0;
        for id in self.state.characters(player) {
            if let Some(e) = self.state.entity_mut(id) {
                if e.has(GameTag::Frozen) && e.tag(GameTag::NumAttacks) == 0 && !e.has(GameTag::Exhausted) {
                    e.set_tag(GameTag::Frozen, 0);
                }
            }
        }
        self.state.buffs.retain(|b| b.duration != BuffDuration::OneTurn);

        self.state.step = Step::MainNext;
        self.state.next_step = Step::MainReady;
        self.trigger_action(EntityId::GAME, Action::BeginTurn { player: player.opponent() })?;
        Ok(())
    }

    /// Resolve `player`'s pending choice.
    ///
    /// Mulligan: `picks` are the cards to replace (any subset of the offer).
    /// Discover: `picks` is the one card to keep.
    pub fn choose(&mut self, player: PlayerId, picks: &[EntityId]) -> Result<()> {
        self.ensure_running()?;
        let Some(choice) = self.state.player(player).choice.clone() else {
            return Err(GameError::NoPendingChoice { player });
        };

        let mut distinct = picks.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() != picks.len() {
            return Err(GameError::InvalidChoice {
                player,
                reason: "duplicate pick",
            });
        }
        if picks.iter().any(|p| !choice.cards.contains(p)) {
            return Err(GameError::InvalidChoice {
                player,
                reason: "pick was not offered",
            });
        }
        if picks.len() < choice.min_count || picks.len() > choice.max_count {
            return Err(GameError::InvalidChoice {
                player,
                reason: "wrong number of picks",
            });
        }

        self.state.player_mut(player).choice = None;
        match choice.kind {
            ChoiceKind::Mulligan => self.finish_mulligan(player, picks),
            ChoiceKind::Discover => self.finish_discover(player, &choice.cards, picks),
        }
    }

    fn finish_mulligan(&mut self, player: PlayerId, replace: &[EntityId]) -> Result<()> {
        self.log(VerbosityLevel::Normal, "mulligan", |g| {
            format!("{} replaces {} cards", g.state.player(player).name, replace.len())
        });
        if !replace.is_empty() {
            let draw = Action::Draw {
                player,
                count: replace.len() as u32,
            };
            self.run_block(EntityId::player(player), vec![draw], BlockType::Trigger, None, None)?;
            for &card in replace {
                self.state.move_to(card, Zone::Deck, None)?;
            }
            let mut deck = self.state.player(player).deck.clone();
            self.state.rng.shuffle_vector(&mut deck);
            self.state.player_mut(player).deck = deck;
        }

        let waiting = PlayerId::both().any(|p| self.state.player(p).choice.is_some());
        if !waiting && self.state.step == Step::BeginMulligan && !self.state.is_complete() {
            self.begin_first_turn()?;
        }
        Ok(())
    }

    /// The pick goes to hand inside a block, so its end refreshes hand
    /// scripts like any other change.
    fn finish_discover(&mut self, player: PlayerId, offered: &[EntityId], picks: &[EntityId]) -> Result<()> {
        self.with_block(EntityId::player(player), BlockType::Trigger, None, None, |game| {
            for &card in offered {
                let zone = if !picks.contains(&card) {
                    Zone::RemovedFromGame
                } else if game.state.player(player).hand.len() >= game.config.max_hand_size {
                    Zone::Graveyard
                } else {
                    Zone::Hand
                };
                game.state.move_to(card, zone, None)?;
            }
            game.log(VerbosityLevel::Normal, "discover", |g| {
                let names: Vec<String> = picks.iter().map(|&c| g.name_of(c)).collect();
                format!("{} discovers {}", g.state.player(player).name, names.join(", "))
            });
            Ok(())
        })
    }
}
