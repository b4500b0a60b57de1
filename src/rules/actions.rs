//! Triggering single actions.
//!
//! `trigger_action` applies one [`Action`] from a source entity and reports
//! the entities it touched. Actions that react to the board (damage,
//! draws, plays) broadcast an event afterwards; listeners run as nested
//! `Trigger` blocks before the action returns.

use smallvec::smallvec;

use super::engine::Game;
use super::observer::BlockType;
use crate::cards::CardId;
use crate::core::{
    Action, ActionResult, Buff, BuffDuration, Choice, ChoiceKind, EntityId, GameTag, PlayerId,
    VerbosityLevel, Zone,
};
use crate::error::{GameError, Result};
use crate::triggers::{EventKind, GameEvent};

impl Game {
    /// Apply one action from `source`.
    pub(crate) fn trigger_action(&mut self, source: EntityId, action: Action) -> Result<ActionResult> {
        match action {
            Action::Play {
                card,
                target,
                index,
                choose,
            } => self.play(card, target, index, choose),
            Action::Attack { attacker, defender } => self.attack_action(attacker, defender),
            Action::UsePower { power, target } => self.use_power(power, target),
            Action::BeginTurn { player } => {
                self.begin_turn(player)?;
                Ok(smallvec![])
            }
            Action::EndTurn { player } => {
                self.end_turn_cleanup(player)?;
                Ok(smallvec![])
            }
            Action::Draw { player, count } => self.draw(player, count),
            Action::Fatigue { player } => self.fatigue(player),
            Action::Damage { target, amount } => self.damage(source, target, amount),
            Action::Heal { target, amount } => self.heal(source, target, amount),
            Action::Buff {
                target,
                attack,
                health,
                one_turn,
            } => Ok(self.buff(source, target, attack, health, one_turn)),
            Action::GainArmor { player, amount } => {
                let hero = self.state.player(player).hero;
                if let Some(e) = self.state.entity_mut(hero) {
                    e.add_tag(GameTag::Armor, amount);
                }
                Ok(smallvec![hero])
            }
            Action::GainMana {
                player,
                amount,
                temporary,
            } => {
                let cap = self.config.max_mana;
                let seat = self.state.player_mut(player);
                if temporary {
                    seat.temp_mana += amount;
                } else {
                    seat.max_mana = (seat.max_mana + amount).min(cap);
                }
                Ok(smallvec![EntityId::player(player)])
            }
            Action::Freeze { target } => match self.state.entity_mut(target) {
                Some(e) if e.in_play() => {
                    e.set_tag(GameTag::Frozen, 1);
                    Ok(smallvec![target])
                }
                _ => Ok(smallvec![]),
            },
            Action::Destroy { target } => match self.state.entity_mut(target) {
                Some(e) if e.in_play() => {
                    e.to_be_destroyed = true;
                    Ok(smallvec![target])
                }
                _ => Ok(smallvec![]),
            },
            Action::Summon { player, card } => self.summon(player, card),
            Action::Give { player, card } => self.give(player, card),
            Action::Morph { target, into } => self.morph(target, into),
            Action::Discover { player, cards } => self.offer_discover(source, player, &cards),
            Action::Mulligan { player } => {
                let cards: Vec<EntityId> = self.state.player(player).hand.iter().copied().collect();
                let max_count = cards.len();
                self.state.player_mut(player).choice = Some(Choice {
                    kind: ChoiceKind::Mulligan,
                    source: EntityId::player(player),
                    cards,
                    min_count: 0,
                    max_count,
                });
                Ok(smallvec![EntityId::player(player)])
            }
            Action::Death { entity } => self.death(entity),
            Action::Listen(listener) => {
                self.register_listener(source, listener);
                Ok(smallvec![])
            }
        }
    }

    fn play(
        &mut self,
        card: EntityId,
        target: Option<EntityId>,
        index: Option<usize>,
        choose: Option<CardId>,
    ) -> Result<ActionResult> {
        let cards = self.registry();
        let entity = self.state.get(card)?;
        let (player, is_minion, overload, charge) = (
            entity.controller,
            entity.is_minion(),
            entity.tag(GameTag::Overload),
            entity.has(GameTag::Charge),
        );
        let def = cards.card(entity.card_id)?;
        let script = match choose {
            Some(option) => &cards.card(option)?.effects,
            None => &def.effects,
        };

        let cost = self.state.cost(card);
        let seat = self.state.player_mut(player);
        seat.pay(cost);
        seat.cards_played_this_turn += 1;
        seat.overloaded += overload;
        if is_minion {
            seat.minions_played_this_turn += 1;
        }

        self.log(VerbosityLevel::Normal, "play", |g| match target {
            Some(t) => format!("{} plays {} targeting {}", g.name_of(EntityId::player(player)), g.name_of(card), g.name_of(t)),
            None => format!("{} plays {}", g.name_of(EntityId::player(player)), g.name_of(card)),
        });

        self.state.move_to(card, Zone::Play, index)?;
        if is_minion && !charge {
            if let Some(e) = self.state.entity_mut(card) {
                e.set_tag(GameTag::Exhausted, 1);
            }
        }

        self.broadcast(GameEvent::play(player, card))?;
        if self.state.is_complete() {
            return Ok(smallvec![card]);
        }
        self.run_effects(card, target, script, BlockType::Power, None)?;

        if is_minion {
            if self.state.entity(card).is_some_and(|e| e.in_play()) {
                self.broadcast(GameEvent::new(EventKind::Summon).with_source(card).with_player(player))?;
            }
        } else if self.state.entity(card).is_some_and(|e| e.zone == Zone::Play) {
            self.state.move_to(card, Zone::Graveyard, None)?;
        }
        Ok(smallvec![card])
    }

    fn attack_action(&mut self, attacker: EntityId, defender: EntityId) -> Result<ActionResult> {
        if let Some(e) = self.state.entity_mut(attacker) {
            e.add_tag(GameTag::NumAttacks, 1);
        }
        self.log(VerbosityLevel::Normal, "combat", |g| {
            format!("{} attacks {}", g.name_of(attacker), g.name_of(defender))
        });

        self.broadcast(GameEvent::attack(attacker, defender))?;
        if self.state.is_complete() {
            return Ok(smallvec![]);
        }
        if !self.state.is_alive(attacker) || !self.state.is_alive(defender) {
            self.log(VerbosityLevel::Normal, "combat", |_| "attack cancelled".to_string());
            return Ok(smallvec![]);
        }

        let dealt = self.state.attack(attacker);
        let returned = self.state.attack(defender);
        self.damage(attacker, defender, dealt)?;
        if returned > 0 && !self.state.is_complete() {
            self.damage(defender, attacker, returned)?;
        }
        Ok(smallvec![attacker, defender])
    }

    fn use_power(&mut self, power: EntityId, target: Option<EntityId>) -> Result<ActionResult> {
        let cards = self.registry();
        let entity = self.state.get(power)?;
        let player = entity.controller;
        let def = cards.card(entity.card_id)?;

        let cost = self.state.cost(power);
        let seat = self.state.player_mut(player);
        seat.pay(cost);
        seat.hero_power_activations += 1;

        self.log(VerbosityLevel::Normal, "power", |g| {
            format!("{} uses {}", g.name_of(EntityId::player(player)), def.name)
        });
        self.resolve_effects(power, target, &def.effects)?;
        Ok(smallvec![power])
    }

    fn draw(&mut self, player: PlayerId, count: u32) -> Result<ActionResult> {
        let mut drawn = ActionResult::new();
        for _ in 0..count {
            if self.state.is_complete() {
                break;
            }
            let Some(card) = self.state.player(player).deck.front().copied() else {
                self.run_block(
                    EntityId::player(player),
                    vec![Action::Fatigue { player }],
                    BlockType::Fatigue,
                    None,
                    None,
                )?;
                continue;
            };

            if self.state.player(player).hand.len() >= self.config.max_hand_size {
                self.state.move_to(card, Zone::Graveyard, None)?;
                self.log(VerbosityLevel::Normal, "draw", |g| {
                    format!("{} burns {}", g.name_of(EntityId::player(player)), g.name_of(card))
                });
                continue;
            }

            self.state.move_to(card, Zone::Hand, None)?;
            self.state.player_mut(player).cards_drawn_this_turn += 1;
            self.log(VerbosityLevel::Verbose, "draw", |g| {
                format!("{} draws {}", g.name_of(EntityId::player(player)), g.name_of(card))
            });
            drawn.push(card);
            self.broadcast(GameEvent::new(EventKind::Draw).with_player(player).with_source(card))?;
        }
        Ok(drawn)
    }

    fn fatigue(&mut self, player: PlayerId) -> Result<ActionResult> {
        let seat = self.state.player_mut(player);
        seat.fatigue_counter += 1;
        let (hero, amount) = (seat.hero, seat.fatigue_counter);
        self.log(VerbosityLevel::Normal, "draw", |g| {
            format!("{} takes {amount} fatigue", g.name_of(EntityId::player(player)))
        });
        self.damage(EntityId::player(player), hero, amount)
    }

    pub(crate) fn damage(&mut self, source: EntityId, target: EntityId, amount: i64) -> Result<ActionResult> {
        if amount <= 0 {
            return Ok(smallvec![]);
        }
        let Some(entity) = self.state.entity_mut(target) else {
            return Err(GameError::UnknownEntity(target));
        };
        if !entity.in_play() || !entity.is_character() {
            return Ok(smallvec![]);
        }
        let armor = entity.tag(GameTag::Armor);
        let absorbed = armor.min(amount);
        let dealt = amount - absorbed;
        entity.set_tag(GameTag::Armor, armor - absorbed);
        entity.add_tag(GameTag::Damage, dealt);

        self.log(VerbosityLevel::Normal, "damage", |g| {
            format!("{} deals {amount} to {}", g.name_of(source), g.name_of(target))
        });
        if dealt > 0 {
            self.broadcast(GameEvent::damage(source, target, dealt))?;
        }
        Ok(smallvec![target])
    }

    fn heal(&mut self, source: EntityId, target: EntityId, amount: i64) -> Result<ActionResult> {
        let Some(entity) = self.state.entity_mut(target) else {
            return Ok(smallvec![]);
        };
        let healed = entity.tag(GameTag::Damage).min(amount.max(0));
        if healed == 0 || !entity.in_play() {
            return Ok(smallvec![]);
        }
        entity.add_tag(GameTag::Damage, -healed);
        self.broadcast(
            GameEvent::new(EventKind::Heal)
                .with_source(source)
                .with_target(target)
                .with_amount(healed),
        )?;
        Ok(smallvec![target])
    }

    fn buff(&mut self, source: EntityId, target: EntityId, attack: i64, health: i64, one_turn: bool) -> ActionResult {
        if !self.state.entity(target).is_some_and(|e| e.in_play()) {
            return smallvec![];
        }
        self.state.buffs.push_back(Buff {
            source,
            target,
            attack,
            health,
            cost: 0,
            duration: if one_turn {
                BuffDuration::OneTurn
            } else {
                BuffDuration::Permanent
            },
        });
        smallvec![target]
    }

    fn enter_field(&mut self, id: EntityId, index: Option<usize>) -> Result<()> {
        self.state.move_to(id, Zone::Play, index)?;
        if let Some(e) = self.state.entity_mut(id) {
            if !e.has(GameTag::Charge) {
                e.set_tag(GameTag::Exhausted, 1);
            }
        }
        Ok(())
    }

    fn summon(&mut self, player: PlayerId, card: CardId) -> Result<ActionResult> {
        if self.state.player(player).field.len() >= self.config.max_minions_on_field {
            return Ok(smallvec![]);
        }
        let id = self.create_entity(card, player)?;
        self.enter_field(id, None)?;
        self.log(VerbosityLevel::Normal, "summon", |g| {
            format!("{} summons {}", g.name_of(EntityId::player(player)), g.name_of(id))
        });
        self.broadcast(GameEvent::new(EventKind::Summon).with_source(id).with_player(player))?;
        Ok(smallvec![id])
    }

    fn give(&mut self, player: PlayerId, card: CardId) -> Result<ActionResult> {
        let id = self.create_entity(card, player)?;
        let zone = if self.state.player(player).hand.len() >= self.config.max_hand_size {
            Zone::Graveyard
        } else {
            Zone::Hand
        };
        self.state.move_to(id, zone, None)?;
        Ok(smallvec![id])
    }

    fn morph(&mut self, target: EntityId, into: CardId) -> Result<ActionResult> {
        let entity = self.state.get(target)?;
        if !entity.in_play() || !entity.is_minion() {
            return Ok(smallvec![]);
        }
        let controller = entity.controller;
        let index = self.state.player(controller).field.index_of(&target);

        let id = self.create_entity(into, controller)?;
        self.state.remove_from_zone(target);
        self.state.clear_buffs_on(target);
        if let Some(old) = self.state.entity_mut(target) {
            old.zone = Zone::RemovedFromGame;
        }
        self.enter_field(id, index)?;
        self.log(VerbosityLevel::Normal, "morph", |g| {
            format!("{} becomes {}", target, g.name_of(id))
        });
        Ok(smallvec![id])
    }

    fn offer_discover(&mut self, source: EntityId, player: PlayerId, offered: &[CardId]) -> Result<ActionResult> {
        let mut options = Vec::with_capacity(offered.len());
        for &card in offered {
            let id = self.create_entity(card, player)?;
            self.state.move_to(id, Zone::SetAside, None)?;
            options.push(id);
        }
        self.state.player_mut(player).choice = Some(Choice {
            kind: ChoiceKind::Discover,
            source,
            cards: options.clone(),
            min_count: 1,
            max_count: 1,
        });
        Ok(options.into_iter().collect())
    }

    fn death(&mut self, entity: EntityId) -> Result<ActionResult> {
        let cards = self.registry();
        let dead = self.state.get(entity)?;
        let (controller, is_minion) = (dead.controller, dead.is_minion());
        let def = cards.card(dead.card_id)?;

        if is_minion {
            let current = self.state.current_player;
            self.state.player_mut(current).minions_killed_this_turn += 1;
        }
        self.broadcast(GameEvent::death(entity, controller))?;
        if !def.deathrattle.is_empty() && !self.state.is_complete() {
            self.log(VerbosityLevel::Verbose, "death", |_| format!("deathrattle of {}", def.name));
            self.resolve_effects(entity, None, &def.deathrattle)?;
        }
        Ok(smallvec![entity])
    }
}
