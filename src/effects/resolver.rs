//! Effect resolution: turning card effects into actions.
//!
//! Selectors are evaluated against the state at the moment the effect
//! resolves, not when the card was played. An effect later in a script sees
//! the board the earlier effects left behind (a second missile never picks a
//! character the first one already killed).

use smallvec::SmallVec;

use super::effect::{Effect, Selector, Side};
use crate::core::{Action, EntityId, GameState, PlayerId};

/// Who is resolving and what they were aimed at.
#[derive(Clone, Copy, Debug)]
pub struct ResolveContext {
    pub source: EntityId,
    pub target: Option<EntityId>,
}

impl ResolveContext {
    #[must_use]
    pub fn new(source: EntityId, target: Option<EntityId>) -> Self {
        Self { source, target }
    }
}

fn in_play(state: &GameState, id: EntityId) -> bool {
    state.entity(id).is_some_and(|e| e.in_play())
}

/// Resolves effects against a game state.
pub struct EffectResolver;

impl EffectResolver {
    /// Actions for one effect. Random selectors draw from the state's RNG.
    pub fn resolve(state: &mut GameState, effect: &Effect, ctx: ResolveContext) -> SmallVec<[Action; 4]> {
        let Some(controller) = state.controller(ctx.source) else {
            return SmallVec::new();
        };
        let side = |who: Side| match who {
            Side::Friendly => controller,
            Side::Enemy => controller.opponent(),
        };

        match effect {
            Effect::Damage { to, amount } => Self::select(state, *to, ctx, controller)
                .into_iter()
                .map(|target| Action::Damage { target, amount: *amount })
                .collect(),
            Effect::Heal { to, amount } => Self::select(state, *to, ctx, controller)
                .into_iter()
                .map(|target| Action::Heal { target, amount: *amount })
                .collect(),
            Effect::Buff { to, attack, health, one_turn } => Self::select(state, *to, ctx, controller)
                .into_iter()
                .map(|target| Action::Buff {
                    target,
                    attack: *attack,
                    health: *health,
                    one_turn: *one_turn,
                })
                .collect(),
            Effect::Freeze { to } => Self::select(state, *to, ctx, controller)
                .into_iter()
                .map(|target| Action::Freeze { target })
                .collect(),
            Effect::Destroy { to } => Self::select(state, *to, ctx, controller)
                .into_iter()
                .map(|target| Action::Destroy { target })
                .collect(),
            Effect::Morph { to, into } => Self::select(state, *to, ctx, controller)
                .into_iter()
                .filter(|&id| state.entity(id).is_some_and(|e| e.is_minion()))
                .map(|target| Action::Morph { target, into: *into })
                .collect(),
            Effect::Draw { who, count } => smallvec::smallvec![Action::Draw {
                player: side(*who),
                count: *count,
            }],
            Effect::Summon { who, card } => smallvec::smallvec![Action::Summon {
                player: side(*who),
                card: *card,
            }],
            Effect::Give { who, card } => smallvec::smallvec![Action::Give {
                player: side(*who),
                card: *card,
            }],
            Effect::GainMana { amount, temporary } => smallvec::smallvec![Action::GainMana {
                player: controller,
                amount: *amount,
                temporary: *temporary,
            }],
            Effect::GainArmor { amount } => smallvec::smallvec![Action::GainArmor {
                player: controller,
                amount: *amount,
            }],
            Effect::Discover { pool } => {
                let mut offered = pool.clone();
                offered.sort_unstable();
                offered.dedup();
                state.rng.shuffle(&mut offered);
                offered.truncate(3);
                if offered.is_empty() {
                    SmallVec::new()
                } else {
                    smallvec::smallvec![Action::Discover {
                        player: controller,
                        cards: offered.into_iter().collect(),
                    }]
                }
            }
            Effect::Listen(listener) => smallvec::smallvec![Action::Listen(listener.clone())],
        }
    }

    /// Entities a selector picks, in board order.
    pub fn select(
        state: &mut GameState,
        selector: Selector,
        ctx: ResolveContext,
        controller: PlayerId,
    ) -> Vec<EntityId> {
        let enemy = controller.opponent();

        match selector {
            Selector::Target => ctx.target.filter(|&t| in_play(state, t)).into_iter().collect(),
            Selector::Source => {
                if state.entity(ctx.source).is_some() {
                    vec![ctx.source]
                } else {
                    Vec::new()
                }
            }
            Selector::FriendlyHero => vec![state.player(controller).hero],
            Selector::EnemyHero => vec![state.player(enemy).hero],
            Selector::FriendlyMinions => state.player(controller).field.iter().copied().collect(),
            Selector::OtherFriendlyMinions => state
                .player(controller)
                .field
                .iter()
                .copied()
                .filter(|&id| id != ctx.source)
                .collect(),
            Selector::EnemyMinions => state.player(enemy).field.iter().copied().collect(),
            Selector::AllMinions => PlayerId::both()
                .flat_map(|p| state.player(p).field.iter().copied().collect::<Vec<_>>())
                .collect(),
            Selector::EnemyCharacters => state.characters(enemy),
            Selector::RandomEnemyCharacter | Selector::RandomEnemyMinion => {
                let candidates: Vec<EntityId> = if selector == Selector::RandomEnemyCharacter {
                    state.characters(enemy)
                } else {
                    state.player(enemy).field.iter().copied().collect()
                };
                let alive: Vec<EntityId> = candidates
                    .into_iter()
                    .filter(|&id| state.is_alive(id))
                    .collect();
                state.rng.choose(&alive).into_iter().collect()
            }
            Selector::EventSource => state
                .event_args
                .get(&ctx.source)
                .and_then(|e| e.source)
                .filter(|&id| in_play(state, id))
                .into_iter()
                .collect(),
            Selector::EventTarget => state
                .event_args
                .get(&ctx.source)
                .and_then(|e| e.target)
                .filter(|&id| in_play(state, id))
                .into_iter()
                .collect(),
        }
    }
}
