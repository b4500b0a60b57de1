//! Complete match state.
//!
//! `GameState` is plain data: players, entities, buffs and the bookkeeping
//! counters of the block engine. Every collection is an `im` persistent
//! structure, so cloning a state for a search sample is O(1) and the clone
//! shares structure with its parent until either side writes.
//!
//! Rules live in `rules`; this module only answers questions about the
//! state (stats with buffs folded in, board order, zone membership) and
//! performs the low-level zone moves the actions are built from.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, GameTag, Zone};
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::error::{GameError, Result};
use crate::triggers::GameEvent;

/// Random identity of a state as a search node.
///
/// Tokens are not derived from content: two structurally identical states
/// reached by different samples are different nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeToken(pub u128);

impl NodeToken {
    pub fn random(rng: &mut GameRng) -> Self {
        Self(rng.gen_u128())
    }
}

/// Turn structure steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    #[default]
    Invalid,
    BeginFirst,
    BeginShuffle,
    BeginDraw,
    BeginMulligan,
    MainReady,
    MainStart,
    MainAction,
    MainEnd,
    MainCleanup,
    MainNext,
    FinalWrapup,
    FinalGameover,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Invalid,
    Running,
    Complete,
}

/// How long a buff lasts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuffDuration {
    Permanent,
    /// Removed during end-of-turn cleanup.
    OneTurn,
    /// Granted by an update script; expires unless re-stamped each refresh.
    Aura { script: u16, tick: u64 },
}

/// A stat modifier applied to one entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buff {
    pub source: EntityId,
    pub target: EntityId,
    pub attack: i64,
    pub health: i64,
    pub cost: i64,
    pub duration: BuffDuration,
}

impl Buff {
    #[must_use]
    pub fn is_aura(&self) -> bool {
        matches!(self.duration, BuffDuration::Aura { .. })
    }

    /// Whether this is the aura buff `script` of `source` grants `target`.
    #[must_use]
    pub fn is_aura_from(&self, source: EntityId, script: u16, target: EntityId) -> bool {
        self.source == source
            && self.target == target
            && matches!(self.duration, BuffDuration::Aura { script: s, .. } if s == script)
    }
}

/// Everything about a match in progress.
#[derive(Clone, Debug)]
pub struct GameState {
    pub players: PlayerMap<Player>,
    pub entities: OrdMap<EntityId, Entity>,
    pub buffs: Vector<Buff>,

    pub status: GameStatus,
    pub step: Step,
    pub next_step: Step,
    /// Incremented as each turn begins; 0 before the first turn.
    pub turn: u32,
    pub current_player: PlayerId,
    pub first_player: PlayerId,
    pub ended_on: Option<u32>,

    /// Aura generation counter.
    pub tick: u64,
    /// Nesting depth of counted blocks.
    pub action_depth: u32,
    /// Event arguments of the listener blocks currently running, by source.
    pub event_args: OrdMap<EntityId, GameEvent>,

    pub token: NodeToken,
    pub rng: GameRng,

    next_entity: u32,
}

impl GameState {
    /// Empty running-less state for two players.
    #[must_use]
    pub fn new(players: PlayerMap<Player>, mut rng: GameRng) -> Self {
        let token = NodeToken::random(&mut rng);
        Self {
            players,
            entities: OrdMap::new(),
            buffs: Vector::new(),
            status: GameStatus::Invalid,
            step: Step::Invalid,
            next_step: Step::BeginFirst,
            turn: 0,
            current_player: PlayerId::new(0),
            first_player: PlayerId::new(0),
            ended_on: None,
            tick: 0,
            action_depth: 0,
            event_args: OrdMap::new(),
            token,
            rng,
            next_entity: EntityId::FIRST_CARD,
        }
    }

    // === Lookup ===

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player]
    }

    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Entity lookup that reports a missing id as an error.
    pub fn get(&self, id: EntityId) -> Result<&Entity> {
        self.entities.get(&id).ok_or(GameError::UnknownEntity(id))
    }

    /// Controller of a card, or the seat of a player entity. The game has none.
    #[must_use]
    pub fn controller(&self, id: EntityId) -> Option<PlayerId> {
        if let Some(player) = id.as_player() {
            return Some(player);
        }
        self.entity(id).map(|e| e.controller)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == GameStatus::Complete
    }

    pub(crate) fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        id
    }

    // === Board order ===

    /// Hero and minions of one side, hero first.
    #[must_use]
    pub fn characters(&self, player: PlayerId) -> Vec<EntityId> {
        let p = self.player(player);
        std::iter::once(p.hero).chain(p.field.iter().copied()).collect()
    }

    /// Every character in play, seat 0 first.
    #[must_use]
    pub fn board_characters(&self) -> Vec<EntityId> {
        PlayerId::both().flat_map(|p| self.characters(p)).collect()
    }

    /// Entities whose update scripts and listeners are active: per seat,
    /// hero, hero power, then minions in field order.
    #[must_use]
    pub fn live_entities(&self) -> Vec<EntityId> {
        let mut out = Vec::new();
        for (_, p) in self.players.iter() {
            out.push(p.hero);
            out.push(p.hero_power);
            out.extend(p.field.iter().copied());
        }
        out
    }

    /// Cards in either hand, seat 0 first.
    #[must_use]
    pub fn hand_entities(&self) -> Vec<EntityId> {
        self.players
            .iter()
            .flat_map(|(_, p)| p.hand.iter().copied())
            .collect()
    }

    // === Stats with buffs folded in ===

    fn buff_sum(&self, id: EntityId, pick: impl Fn(&Buff) -> i64) -> i64 {
        self.buffs.iter().filter(|b| b.target == id).map(pick).sum()
    }

    fn tag_of(&self, id: EntityId, tag: GameTag) -> i64 {
        self.entity(id).map_or(0, |e| e.tag(tag))
    }

    #[must_use]
    pub fn attack(&self, id: EntityId) -> i64 {
        (self.tag_of(id, GameTag::Attack) + self.buff_sum(id, |b| b.attack)).max(0)
    }

    #[must_use]
    pub fn max_health(&self, id: EntityId) -> i64 {
        self.tag_of(id, GameTag::Health) + self.buff_sum(id, |b| b.health)
    }

    #[must_use]
    pub fn health(&self, id: EntityId) -> i64 {
        self.max_health(id) - self.tag_of(id, GameTag::Damage)
    }

    #[must_use]
    pub fn cost(&self, id: EntityId) -> i64 {
        (self.tag_of(id, GameTag::Cost) + self.buff_sum(id, |b| b.cost)).max(0)
    }

    #[must_use]
    pub fn armor(&self, id: EntityId) -> i64 {
        self.tag_of(id, GameTag::Armor)
    }

    /// Marked for destruction, or a character in play with no health left.
    #[must_use]
    pub fn is_dying(&self, id: EntityId) -> bool {
        match self.entity(id) {
            Some(e) if e.to_be_destroyed => true,
            Some(e) => e.in_play() && e.is_character() && self.health(id) <= 0,
            None => false,
        }
    }

    /// In play and not about to be swept.
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entity(id).is_some_and(Entity::in_play) && !self.is_dying(id)
    }

    // === Zones ===

    /// Remove an entity from whatever zone list holds it.
    pub fn remove_from_zone(&mut self, id: EntityId) {
        let Some((controller, zone)) = self.entity(id).map(|e| (e.controller, e.zone)) else {
            return;
        };
        let player = &mut self.players[controller];
        let list = match zone {
            Zone::Deck => &mut player.deck,
            Zone::Hand => &mut player.hand,
            Zone::Play => &mut player.field,
            Zone::Graveyard => &mut player.graveyard,
            _ => return,
        };
        if let Some(pos) = list.index_of(&id) {
            list.remove(pos);
        }
    }

    /// Move an entity to a zone of its controller. `index` positions it in
    /// the field; other zones append. Heroes and hero powers enter play
    /// without joining the field list.
    pub fn move_to(&mut self, id: EntityId, zone: Zone, index: Option<usize>) -> Result<()> {
        let (controller, is_minion) = {
            let e = self.get(id)?;
            (e.controller, e.is_minion())
        };
        self.remove_from_zone(id);
        let player = &mut self.players[controller];
        match zone {
            Zone::Deck => player.deck.push_back(id),
            Zone::Hand => player.hand.push_back(id),
            Zone::Graveyard => player.graveyard.push_back(id),
            Zone::Play if is_minion => {
                let at = index.unwrap_or(player.field.len()).min(player.field.len());
                player.field.insert(at, id);
            }
            _ => {}
        }
        if let Some(e) = self.entity_mut(id) {
            e.zone = zone;
        }
        Ok(())
    }

    /// Drop every buff aimed at `target`.
    pub fn clear_buffs_on(&mut self, target: EntityId) {
        self.buffs.retain(|b| b.target != target);
    }
}
