//! JSON dump of a game for debugging.
//!
//! The dump is one-way: every player and every entity the players can
//! reach, with tags flattened to `NAME: value` pairs and stats reported with
//! buffs folded in. It is meant for eyes and diff tools, not for loading.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::{EntityId, GameState, GameStatus, GameTag, PlayState, PlayerId, Step, Zone};
use crate::rules::Game;

#[derive(Clone, Debug, Serialize)]
pub struct EntityDump {
    pub id: u32,
    pub card: u32,
    pub name: String,
    pub zone: Zone,
    pub tags: BTreeMap<&'static str, i64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PlayerDump {
    pub name: String,
    pub playstate: PlayState,
    pub max_mana: i64,
    pub used_mana: i64,
    pub temp_mana: i64,
    pub overload_locked: i64,
    pub fatigue: i64,
    pub deck_size: usize,
    pub hero: EntityDump,
    pub hero_power: EntityDump,
    pub hand: Vec<EntityDump>,
    pub field: Vec<EntityDump>,
    pub graveyard: Vec<EntityDump>,
}

/// Snapshot of a match.
#[derive(Clone, Debug, Serialize)]
pub struct StateDump {
    pub turn: u32,
    pub status: GameStatus,
    pub step: Step,
    pub current_player: u8,
    pub ended_on: Option<u32>,
    pub players: Vec<PlayerDump>,
}

impl StateDump {
    #[must_use]
    pub fn of(game: &Game) -> Self {
        let state = game.state();
        Self {
            turn: state.turn,
            status: state.status,
            step: state.step,
            current_player: state.current_player.0,
            ended_on: state.ended_on,
            players: PlayerId::both().map(|p| dump_player(game, p)).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn dump_player(game: &Game, player: PlayerId) -> PlayerDump {
    let seat = game.player(player);
    let dump_all = |ids: &im::Vector<EntityId>| -> Vec<EntityDump> {
        ids.iter().map(|&id| dump_entity(game, id)).collect()
    };
    PlayerDump {
        name: seat.name.clone(),
        playstate: seat.playstate,
        max_mana: seat.max_mana,
        used_mana: seat.used_mana,
        temp_mana: seat.temp_mana,
        overload_locked: seat.overload_locked,
        fatigue: seat.fatigue_counter,
        deck_size: seat.deck.len(),
        hero: dump_entity(game, seat.hero),
        hero_power: dump_entity(game, seat.hero_power),
        hand: dump_all(&seat.hand),
        field: dump_all(&seat.field),
        graveyard: dump_all(&seat.graveyard),
    }
}

fn dump_entity(game: &Game, id: EntityId) -> EntityDump {
    let state = game.state();
    let Some(entity) = state.entity(id) else {
        return EntityDump {
            id: id.raw(),
            card: 0,
            name: String::new(),
            zone: Zone::Invalid,
            tags: BTreeMap::new(),
        };
    };
    let mut tags: BTreeMap<&'static str, i64> = entity.tags.iter().map(|(tag, &v)| (tag.name(), v)).collect();
    effective_stats(state, id, entity.is_character(), &mut tags);
    EntityDump {
        id: id.raw(),
        card: entity.card_id.0,
        name: game.name_of(id),
        zone: entity.zone,
        tags,
    }
}

/// Overwrite base stats with their buffed values.
fn effective_stats(state: &GameState, id: EntityId, character: bool, tags: &mut BTreeMap<&'static str, i64>) {
    tags.insert(GameTag::Cost.name(), state.cost(id));
    if character {
        tags.insert(GameTag::Attack.name(), state.attack(id));
        tags.insert(GameTag::Health.name(), state.max_health(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::basic::{basic_set, ids::BLOODFEN_RAPTOR};
    use std::sync::Arc;

    fn started() -> Game {
        let deck = vec![BLOODFEN_RAPTOR; 30];
        let mut game = crate::driver::standard_match(Arc::new(basic_set()), deck.clone(), deck, 7).unwrap();
        game.start().unwrap();
        game.resolve_choices_randomly().unwrap();
        game
    }

    #[test]
    fn test_dump_reports_players_and_zones() {
        let game = started();
        let dump = StateDump::of(&game);
        assert_eq!(dump.turn, 1);
        assert_eq!(dump.players.len(), 2);
        assert_eq!(dump.players[0].name, "MCTS");
        assert_eq!(dump.players[0].hero.zone, Zone::Play);
        assert_eq!(dump.players[0].hero.tags["HEALTH"], 30);
        assert!(dump.players[0].hand.iter().all(|e| e.tags["COST"] == 2));
    }

    #[test]
    fn test_json_has_tag_names() {
        let json = StateDump::of(&started()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["players"][1]["name"], "ENEMY");
        assert!(json.contains("\"ATK\""));
    }
}
