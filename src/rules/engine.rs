//! The game engine.
//!
//! [`Game`] owns a [`GameState`] plus the shared, read-only context it is
//! played under: the card registry, the rules limits and the setup variant.
//! Player commands are validated here, before anything changes, and then
//! executed as blocks (see `rules::blocks`).
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use ccg_mcts::cards::basic::{basic_set, ids};
//! use ccg_mcts::core::GameConfig;
//! use ccg_mcts::rules::{Game, GameRules, PlayerSetup};
//!
//! let cards = Arc::new(basic_set());
//! let deck = vec![ids::BLOODFEN_RAPTOR; 30];
//! let players = [
//!     PlayerSetup::new("MCTS", ids::JAINA_PROUDMOORE, deck.clone()),
//!     PlayerSetup::new("Random", ids::JAINA_PROUDMOORE, deck),
//! ];
//! let mut game = Game::new(cards, players, GameConfig::default(), GameRules::basic(), 7).unwrap();
//! game.start().unwrap();
//! assert_eq!(game.state().turn, 1);
//! ```

use std::fmt;
use std::sync::Arc;

use super::observer::{BlockObserver, BlockType};
use super::setup::GameRules;
use crate::cards::{CardDefinition, CardId, CardRegistry};
use crate::core::{
    Action, Entity, EntityId, GameConfig, GameLogger, GameRng, GameState, GameStatus, GameTag,
    PlayState, Player, PlayerId, PlayerMap, Zone,
};
use crate::effects::TargetRequirement;
use crate::error::{GameError, Result};

/// Seat the search reports rewards for.
pub const REFERENCE_PLAYER: PlayerId = PlayerId(0);

/// One seat's identity and deck list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerSetup {
    pub name: String,
    pub hero: CardId,
    pub deck: Vec<CardId>,
}

impl PlayerSetup {
    #[must_use]
    pub fn new(name: impl Into<String>, hero: CardId, deck: Vec<CardId>) -> Self {
        Self {
            name: name.into(),
            hero,
            deck,
        }
    }
}

/// A match: state plus the context it is played under.
///
/// Cloning is cheap (persistent state, `Arc`ed context). A clone keeps the
/// node token; use `SearchNode::fork` for an independent search sample.
#[derive(Clone)]
pub struct Game {
    pub(crate) state: GameState,
    pub(crate) cards: Arc<CardRegistry>,
    pub(crate) config: Arc<GameConfig>,
    pub(crate) rules: GameRules,
    pub(crate) logger: GameLogger,
    pub(crate) observers: Vec<Arc<dyn BlockObserver>>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("turn", &self.state.turn)
            .field("current_player", &self.state.current_player)
            .field("status", &self.state.status)
            .field("token", &self.state.token)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Game {
    /// Build a game: heroes, hero powers and decks are created, nothing is
    /// drawn yet. Call [`Game::start`] to run setup.
    pub fn new(
        cards: Arc<CardRegistry>,
        players: [PlayerSetup; 2],
        config: GameConfig,
        rules: GameRules,
        seed: u64,
    ) -> Result<Self> {
        let seats = PlayerMap::new(|p| Player::new(p, players[p.index()].name.clone()));

        let mut game = Self {
            state: GameState::new(seats, GameRng::new(seed)),
            cards,
            config: Arc::new(config),
            rules,
            logger: GameLogger::silent(),
            observers: Vec::new(),
        };

        for (i, setup) in players.iter().enumerate() {
            let player = PlayerId(i as u8);
            let hero = game.create_entity(setup.hero, player)?;
            let power_card = game
                .cards
                .card(setup.hero)?
                .hero_power
                .ok_or(GameError::UnknownCard(setup.hero))?;
            let power = game.create_entity(power_card, player)?;
            game.state.move_to(hero, Zone::Play, None)?;
            game.state.move_to(power, Zone::Play, None)?;

            let seat = game.state.player_mut(player);
            seat.hero = hero;
            seat.hero_power = power;

            for &card in &setup.deck {
                let id = game.create_entity(card, player)?;
                game.state.move_to(id, Zone::Deck, None)?;
            }
        }

        Ok(game)
    }

    #[must_use]
    pub fn with_logger(mut self, logger: GameLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn set_logger(&mut self, logger: GameLogger) {
        self.logger = logger;
    }

    pub fn add_observer(&mut self, observer: Arc<dyn BlockObserver>) {
        self.observers.push(observer);
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scenario setup in tests and tools.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn cards(&self) -> &CardRegistry {
        &self.cards
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut GameLogger {
        &mut self.logger
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        self.state.player(player)
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.state.is_complete()
    }

    /// Display name of an entity's card.
    #[must_use]
    pub fn name_of(&self, id: EntityId) -> String {
        if let Some(player) = id.as_player() {
            return self.state.player(player).name.clone();
        }
        self.state
            .entity(id)
            .and_then(|e| self.cards.get(e.card_id))
            .map_or_else(|| id.to_string(), |c| c.name.clone())
    }

    pub(crate) fn definition(&self, id: EntityId) -> Result<&CardDefinition> {
        let card = self.state.get(id)?.card_id;
        self.cards.card(card)
    }

    pub(crate) fn ensure_running(&self) -> Result<()> {
        match self.state.status {
            GameStatus::Running => Ok(()),
            GameStatus::Complete => Err(GameError::GameOver),
            GameStatus::Invalid => Err(GameError::NotStarted),
        }
    }

    /// Instantiate a card for `controller`. The entity starts in no zone.
    pub(crate) fn create_entity(&mut self, card: CardId, controller: PlayerId) -> Result<EntityId> {
        let def = self.cards.card(card)?;
        let id = self.state.allocate_id();
        let kind = def.card_type.entity_kind();
        let mut entity = Entity::new(id, card, kind, controller);

        entity.set_tag(GameTag::Cost, def.cost);
        entity.set_tag(GameTag::Attack, def.attack);
        let health = if kind.has_power() {
            self.config.hero_health
        } else {
            def.health
        };
        entity.set_tag(GameTag::Health, health);
        for &(tag, value) in &def.tags {
            entity.set_tag(tag, value);
        }
        entity.listeners = def.listeners.iter().cloned().collect();

        self.state.entities.insert(id, entity);
        Ok(id)
    }

    // === Playability ===

    /// Why `card` cannot be played right now, if it cannot.
    fn play_problem(&self, card: EntityId) -> Option<&'static str> {
        let player = self.state.current_player;
        let Some(entity) = self.state.entity(card) else {
            return Some("unknown card");
        };
        if entity.controller != player || entity.zone != Zone::Hand {
            return Some("not in the current player's hand");
        }
        if !entity.kind.is_playable_from_hand() {
            return Some("not a playable card type");
        }
        let seat = self.state.player(player);
        if seat.choice.is_some() {
            return Some("a choice is pending");
        }
        if self.state.cost(card) > seat.mana() {
            return Some("not enough mana");
        }
        if entity.is_minion() && seat.field.len() >= self.config.max_minions_on_field {
            return Some("the field is full");
        }
        let Ok(def) = self.cards.card(entity.card_id) else {
            return Some("unknown card");
        };
        if def.has_choose_one() {
            if self.playable_options(card).is_empty() {
                return Some("no option is playable");
            }
        } else if !def.target.satisfiable(&self.state, player, card) {
            return Some("no legal target");
        }
        None
    }

    #[must_use]
    pub fn is_playable(&self, card: EntityId) -> bool {
        !self.state.is_complete() && self.play_problem(card).is_none()
    }

    /// Choose-one options whose own requirements can be met.
    #[must_use]
    pub fn playable_options(&self, card: EntityId) -> Vec<CardId> {
        let Ok(def) = self.definition(card) else {
            return Vec::new();
        };
        let player = self.state.current_player;
        def.choose_one
            .iter()
            .copied()
            .filter(|&opt| {
                self.cards
                    .get(opt)
                    .is_some_and(|o| o.target.satisfiable(&self.state, player, card))
            })
            .collect()
    }

    fn requirement(&self, card: EntityId, choose: Option<CardId>) -> TargetRequirement {
        let card_def = match choose {
            Some(option) => self.cards.get(option),
            None => self.definition(card).ok(),
        };
        card_def.map_or(TargetRequirement::None, |d| d.target)
    }

    /// Legal targets for playing `card` (with the given choose-one option).
    #[must_use]
    pub fn play_targets(&self, card: EntityId, choose: Option<CardId>) -> Vec<EntityId> {
        let Some(controller) = self.state.controller(card) else {
            return Vec::new();
        };
        self.requirement(card, choose).targets(&self.state, controller, card)
    }

    #[must_use]
    pub fn requires_target(&self, card: EntityId, choose: Option<CardId>) -> bool {
        let Some(controller) = self.state.controller(card) else {
            return false;
        };
        self.requirement(card, choose).needs_target(&self.state, controller, card)
    }

    fn check_target(
        &self,
        actor: EntityId,
        requirement: TargetRequirement,
        controller: PlayerId,
        target: Option<EntityId>,
    ) -> Result<()> {
        let needs = requirement.needs_target(&self.state, controller, actor);
        match target {
            Some(t) if needs && requirement.targets(&self.state, controller, actor).contains(&t) => Ok(()),
            None if !needs => Ok(()),
            other => Err(GameError::InvalidTarget {
                actor,
                target: other.unwrap_or(actor),
            }),
        }
    }

    // === Player commands ===

    /// Play a card from the current player's hand.
    pub fn play_card(&mut self, card: EntityId, target: Option<EntityId>, choose: Option<CardId>) -> Result<()> {
        self.ensure_running()?;
        if let Some(reason) = self.play_problem(card) {
            return Err(GameError::CardNotPlayable { card, reason });
        }
        let player = self.state.current_player;
        let has_options = self.definition(card)?.has_choose_one();
        match (has_options, choose) {
            (true, Some(option)) if self.playable_options(card).contains(&option) => {}
            (true, _) => {
                return Err(GameError::InvalidChoice {
                    player,
                    reason: "a playable choose-one option is required",
                })
            }
            (false, Some(_)) => {
                return Err(GameError::InvalidChoice {
                    player,
                    reason: "card has no choose-one options",
                })
            }
            (false, None) => {}
        }
        self.check_target(card, self.requirement(card, choose), player, target)?;

        let action = Action::Play {
            card,
            target,
            index: None,
            choose,
        };
        self.run_block(EntityId::player(player), vec![action], BlockType::Play, target, None)?;
        Ok(())
    }

    /// Whether `id` may declare an attack now.
    #[must_use]
    pub fn can_attack(&self, id: EntityId) -> bool {
        self.attack_problem(id).is_none()
    }

    fn attack_problem(&self, id: EntityId) -> Option<&'static str> {
        let Some(entity) = self.state.entity(id) else {
            return Some("unknown entity");
        };
        if !entity.kind.can_attack_kind() || !entity.in_play() {
            return Some("not a character in play");
        }
        if entity.controller != self.state.current_player {
            return Some("not the current player's character");
        }
        if self.state.player(entity.controller).choice.is_some() {
            return Some("a choice is pending");
        }
        if self.state.is_dying(id) {
            return Some("dying");
        }
        if entity.has(GameTag::Frozen) {
            return Some("frozen");
        }
        if entity.has(GameTag::Exhausted) && !entity.has(GameTag::Charge) {
            return Some("exhausted");
        }
        if self.state.attack(id) <= 0 {
            return Some("no attack");
        }
        let allowed = if entity.has(GameTag::Windfury) { 2 } else { 1 };
        if entity.tag(GameTag::NumAttacks) >= allowed {
            return Some("already attacked");
        }
        None
    }

    /// Characters `attacker` may attack; taunt minions screen the rest.
    #[must_use]
    pub fn attack_targets(&self, attacker: EntityId) -> Vec<EntityId> {
        let Some(controller) = self.state.controller(attacker) else {
            return Vec::new();
        };
        let enemies: Vec<EntityId> = self
            .state
            .characters(controller.opponent())
            .into_iter()
            .filter(|&id| self.state.is_alive(id))
            .collect();
        let taunts: Vec<EntityId> = enemies
            .iter()
            .copied()
            .filter(|&id| self.state.entity(id).is_some_and(|e| e.is_minion() && e.has(GameTag::Taunt)))
            .collect();
        if taunts.is_empty() {
            enemies
        } else {
            taunts
        }
    }

    pub fn attack(&mut self, attacker: EntityId, defender: EntityId) -> Result<()> {
        self.ensure_running()?;
        if let Some(reason) = self.attack_problem(attacker) {
            return Err(GameError::CannotAttack { attacker, reason });
        }
        if !self.attack_targets(attacker).contains(&defender) {
            return Err(GameError::InvalidTarget {
                actor: attacker,
                target: defender,
            });
        }
        let action = Action::Attack { attacker, defender };
        self.run_block(attacker, vec![action], BlockType::Attack, Some(defender), None)?;
        Ok(())
    }

    fn power_problem(&self, player: PlayerId) -> Option<&'static str> {
        if player != self.state.current_player {
            return Some("not this player's turn");
        }
        let seat = self.state.player(player);
        if seat.choice.is_some() {
            return Some("a choice is pending");
        }
        if seat.hero_power_activations >= 1 {
            return Some("already used this turn");
        }
        if self.state.cost(seat.hero_power) > seat.mana() {
            return Some("not enough mana");
        }
        match self.definition(seat.hero_power) {
            Ok(def) if def.target.satisfiable(&self.state, player, seat.hero_power) => None,
            Ok(_) => Some("no legal target"),
            Err(_) => Some("unknown hero power"),
        }
    }

    #[must_use]
    pub fn power_usable(&self, player: PlayerId) -> bool {
        !self.state.is_complete() && self.power_problem(player).is_none()
    }

    #[must_use]
    pub fn power_targets(&self, player: PlayerId) -> Vec<EntityId> {
        let power = self.state.player(player).hero_power;
        self.definition(power)
            .map(|d| d.target.targets(&self.state, player, power))
            .unwrap_or_default()
    }

    /// Use the current player's hero power.
    pub fn use_hero_power(&mut self, target: Option<EntityId>) -> Result<()> {
        self.ensure_running()?;
        let player = self.state.current_player;
        if let Some(reason) = self.power_problem(player) {
            return Err(GameError::PowerNotUsable { player, reason });
        }
        let power = self.state.player(player).hero_power;
        let requirement = self.definition(power)?.target;
        self.check_target(power, requirement, player, target)?;

        self.run_block(power, vec![Action::UsePower { power, target }], BlockType::Power, target, None)?;
        Ok(())
    }

    /// End the current player's turn and begin the opponent's.
    pub fn end_turn(&mut self) -> Result<()> {
        self.ensure_running()?;
        let player = self.state.current_player;
        if let Some(waiting) = PlayerId::both().find(|&p| self.state.player(p).choice.is_some()) {
            return Err(GameError::InvalidChoice {
                player: waiting,
                reason: "a choice is pending",
            });
        }
        self.run_block(EntityId::GAME, vec![Action::EndTurn { player }], BlockType::Trigger, None, None)?;
        Ok(())
    }

    /// Give up the match.
    pub fn concede(&mut self, player: PlayerId) -> Result<()> {
        self.ensure_running()?;
        self.state.player_mut(player).playstate = PlayState::Conceded;
        self.check_for_end_game();
        Ok(())
    }
}
