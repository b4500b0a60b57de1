//! Action blocks.
//!
//! Every state change happens inside a block. A block brackets a sequence of
//! actions triggered from one source: observers see the bracket, the nesting
//! counter moves (except for `Play` blocks), and when the outermost counted
//! block closes the engine refreshes auras and sweeps the dead.
//!
//! Blocks nest freely. A listener that fires while an attack resolves opens
//! its own `Trigger` block, runs to completion, and the attack continues
//! where it left off.

use std::sync::Arc;

use smallvec::SmallVec;

use super::engine::Game;
use super::observer::BlockType;
use crate::cards::CardRegistry;
use crate::core::{Action, ActionResult, EntityId, EntityKind, PlayerId, VerbosityLevel};
use crate::effects::{Effect, EffectResolver, ResolveContext};
use crate::error::Result;
use crate::triggers::{EventListener, GameEvent};

impl Game {
    /// Emit a log line, building the message only when the level is on.
    pub(crate) fn log(&mut self, level: VerbosityLevel, category: &'static str, message: impl FnOnce(&Self) -> String) {
        if self.logger.enabled(level) {
            let text = message(self);
            self.logger.log(level, category, || text);
        }
    }

    /// Run `actions` from `source` as one block.
    ///
    /// Listener registrations are attached instead of triggered and produce
    /// no result. Execution stops early once the game is complete.
    pub fn run_block(
        &mut self,
        source: EntityId,
        actions: Vec<Action>,
        block: BlockType,
        target: Option<EntityId>,
        event_args: Option<GameEvent>,
    ) -> Result<Vec<ActionResult>> {
        self.with_block(source, block, target, event_args, |game| {
            let mut results = Vec::with_capacity(actions.len());
            for action in actions {
                if game.state.is_complete() {
                    break;
                }
                match action {
                    Action::Listen(listener) => game.register_listener(source, listener),
                    action => results.push(game.trigger_action(source, action)?),
                }
            }
            Ok(results)
        })
    }

    /// Open a block, run `body`, close it. Event arguments are attached to
    /// `source` for the duration of the body.
    pub(crate) fn with_block<T>(
        &mut self,
        source: EntityId,
        block: BlockType,
        target: Option<EntityId>,
        event_args: Option<GameEvent>,
        body: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.action_start(block, source, target);

        let restore = event_args.map(|args| self.state.event_args.insert(source, args));
        let result = body(self);
        match restore {
            Some(Some(previous)) => {
                self.state.event_args.insert(source, previous);
            }
            Some(None) => {
                self.state.event_args.remove(&source);
            }
            None => {}
        }

        match result {
            Ok(value) => {
                self.action_end(block, source)?;
                Ok(value)
            }
            Err(err) => {
                self.close_block(block, source);
                Err(err)
            }
        }
    }

    fn action_start(&mut self, block: BlockType, source: EntityId, target: Option<EntityId>) {
        if block.is_counted() {
            self.state.action_depth += 1;
        }
        let depth = self.state.action_depth;
        for observer in &self.observers {
            observer.block_start(block, source, depth);
        }
        self.log(VerbosityLevel::Verbose, "block", |g| match target {
            Some(t) => format!("{block:?} block from {} on {} (depth {depth})", g.name_of(source), g.name_of(t)),
            None => format!("{block:?} block from {} (depth {depth})", g.name_of(source)),
        });
    }

    /// Pop the bracket and notify observers. Returns the depth after.
    fn close_block(&mut self, block: BlockType, source: EntityId) -> u32 {
        if block.is_counted() {
            debug_assert!(self.state.action_depth > 0, "block closed more often than opened");
            self.state.action_depth = self.state.action_depth.saturating_sub(1);
        }
        let depth = self.state.action_depth;
        for observer in &self.observers {
            observer.block_end(block, source, depth);
        }
        self.log(VerbosityLevel::Verbose, "block", |_| format!("end {block:?} block (depth {depth})"));
        depth
    }

    fn action_end(&mut self, block: BlockType, source: EntityId) -> Result<()> {
        let depth = self.close_block(block, source);
        if self.state.is_complete() {
            return Ok(());
        }
        if depth == 0 {
            self.refresh_auras()?;
            self.process_deaths()?;
        }
        Ok(())
    }

    /// Attach a one-shot listener. Spells hand theirs to their controller;
    /// the game itself owns none.
    pub(crate) fn register_listener(&mut self, source: EntityId, listener: EventListener) {
        if let Some(player) = source.as_player() {
            self.state.player_mut(player).listeners.push_back(listener);
            return;
        }
        let Some((controller, is_spell)) = self
            .state
            .entity(source)
            .map(|e| (e.controller, e.kind == EntityKind::Spell))
        else {
            return;
        };
        if is_spell {
            self.state.player_mut(controller).listeners.push_back(listener);
        } else if let Some(entity) = self.state.entity_mut(source) {
            entity.listeners.push_back(listener);
        }
    }

    /// Run a card script from `source` as its own block.
    pub(crate) fn run_effects(
        &mut self,
        source: EntityId,
        target: Option<EntityId>,
        effects: &[Effect],
        block: BlockType,
        event_args: Option<GameEvent>,
    ) -> Result<()> {
        if effects.is_empty() {
            return Ok(());
        }
        self.with_block(source, block, target, event_args, |game| {
            game.resolve_effects(source, target, effects)
        })
    }

    /// Resolve a script inside the current block. Each effect picks its
    /// entities only after the previous one has fully resolved.
    pub(crate) fn resolve_effects(&mut self, source: EntityId, target: Option<EntityId>, effects: &[Effect]) -> Result<()> {
        let ctx = ResolveContext::new(source, target);
        for effect in effects {
            if self.state.is_complete() {
                break;
            }
            let actions: SmallVec<[Action; 4]> = EffectResolver::resolve(&mut self.state, effect, ctx);
            for action in actions {
                if self.state.is_complete() {
                    break;
                }
                match action {
                    Action::Listen(listener) => self.register_listener(source, listener),
                    action => {
                        self.trigger_action(source, action)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Fire an event at every matching listener.
    ///
    /// Player listeners go first, then live entities per seat in board
    /// order. One-shot listeners are detached before any of them runs.
    pub(crate) fn broadcast(&mut self, event: GameEvent) -> Result<()> {
        let mut owners: Vec<EntityId> = PlayerId::both().map(EntityId::player).collect();
        owners.extend(self.state.live_entities());

        let mut fired: Vec<(EntityId, EventListener)> = Vec::new();
        for &owner in &owners {
            let listeners = match owner.as_player() {
                Some(player) => &self.state.player(player).listeners,
                None => match self.state.entity(owner) {
                    Some(e) => &e.listeners,
                    None => continue,
                },
            };
            let mut spent = Vec::new();
            for (i, listener) in listeners.iter().enumerate() {
                if listener.matches(&event, owner, &self.state) {
                    fired.push((owner, listener.clone()));
                    if listener.once {
                        spent.push(i);
                    }
                }
            }
            for i in spent.into_iter().rev() {
                match owner.as_player() {
                    Some(player) => {
                        self.state.player_mut(player).listeners.remove(i);
                    }
                    None => {
                        if let Some(e) = self.state.entity_mut(owner) {
                            e.listeners.remove(i);
                        }
                    }
                }
            }
        }

        for (owner, listener) in fired {
            if self.state.is_complete() {
                break;
            }
            self.log(VerbosityLevel::Verbose, "trigger", |g| {
                format!("{} reacts to {:?}", g.name_of(owner), event.kind)
            });
            self.run_effects(owner, None, &listener.effects, BlockType::Trigger, Some(event.clone()))?;
        }
        Ok(())
    }

    /// Shared handle on the registry, so definitions can be read while the
    /// game mutates itself.
    pub(crate) fn registry(&self) -> Arc<CardRegistry> {
        Arc::clone(&self.cards)
    }
}
