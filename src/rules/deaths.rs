//! Death sweep and the game-over check.

use super::engine::Game;
use super::observer::BlockType;
use crate::core::{Action, EntityId, EntityKind, GameStatus, PlayState, PlayerId, Step, VerbosityLevel, Zone};
use crate::error::Result;

impl Game {
    /// Move every dying live entity to its graveyard, check for game over,
    /// then run the deaths as a `Trigger` block.
    pub fn process_deaths(&mut self) -> Result<()> {
        let dying: Vec<EntityId> = self
            .state
            .live_entities()
            .into_iter()
            .filter(|&id| self.state.entity(id).is_some_and(|e| e.in_play()) && self.state.is_dying(id))
            .collect();
        if dying.is_empty() {
            return Ok(());
        }

        let deaths = self.with_block(EntityId::GAME, BlockType::Deaths, None, None, |game| {
            let mut deaths = Vec::with_capacity(dying.len());
            for &id in &dying {
                game.log(VerbosityLevel::Normal, "death", |g| format!("{} dies", g.name_of(id)));
                game.state.move_to(id, Zone::Graveyard, None)?;
                game.state.clear_buffs_on(id);
                let Some(entity) = game.state.entity_mut(id) else { continue };
                entity.to_be_destroyed = false;
                if entity.kind == EntityKind::Hero {
                    let controller = entity.controller;
                    game.state.player_mut(controller).playstate = PlayState::Losing;
                }
                deaths.push(Action::Death { entity: id });
            }
            for observer in &game.observers {
                observer.deaths_processed(&dying);
            }
            game.check_for_end_game();
            Ok(deaths)
        })?;

        // After a game over the block still opens but triggers nothing.
        self.run_block(EntityId::GAME, deaths, BlockType::Trigger, None, None)?;
        Ok(())
    }

    /// Settle the match if a player is losing. Returns whether it ended.
    pub fn check_for_end_game(&mut self) -> bool {
        for (_, seat) in self.state.players.iter_mut() {
            if matches!(seat.playstate, PlayState::Conceded | PlayState::Disconnected) {
                seat.playstate = PlayState::Losing;
            }
        }
        let losing: Vec<PlayerId> = PlayerId::both()
            .filter(|&p| self.state.player(p).playstate == PlayState::Losing)
            .collect();
        if losing.is_empty() {
            return false;
        }

        let tied = losing.len() == 2;
        for p in PlayerId::both() {
            self.state.player_mut(p).playstate = if tied {
                PlayState::Tied
            } else if losing.contains(&p) {
                PlayState::Lost
            } else {
                PlayState::Won
            };
        }
        self.state.status = GameStatus::Complete;
        self.state.step = Step::FinalGameover;
        self.state.next_step = Step::FinalGameover;
        self.state.ended_on = Some(self.state.turn);

        self.log(VerbosityLevel::Minimal, "game", |g| {
            let winner = PlayerId::both().find(|&p| g.state.player(p).playstate == PlayState::Won);
            match winner {
                Some(p) => format!("{} wins on turn {}", g.state.player(p).name, g.state.turn),
                None => format!("tie on turn {}", g.state.turn),
            }
        });
        true
    }
}
