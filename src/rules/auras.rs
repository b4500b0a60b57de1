//! Continuous scripts.
//!
//! Auras are not stored as state. Every refresh re-runs each script and
//! re-stamps the buffs it grants with the current tick; whatever was not
//! re-stamped is removed afterwards. A minion that leaves play therefore
//! takes its aura with it at the next refresh.
//!
//! Scripts run in priority order. A script that reads stats sees only the
//! buffs already re-stamped during the current pass, so a lower priority
//! feeds into a higher one and never the other way around.

use super::engine::Game;
use crate::cards::{AuraKind, AuraScaling, AuraScope, AuraScript};
use crate::core::{Buff, BuffDuration, EntityId, GameTag, VerbosityLevel};
use crate::error::Result;

/// Script keys of hand scripts start here, so they never collide with the
/// in-play scripts of the same card.
const HAND_SCRIPT_BASE: u16 = 0x100;

/// One script paired with the entity running it.
#[derive(Clone, Copy, Debug)]
struct ActiveScript {
    owner: EntityId,
    key: u16,
    script: AuraScript,
}

impl Game {
    /// Re-run every update script, drop stale aura buffs, advance the tick.
    pub fn refresh_auras(&mut self) -> Result<()> {
        let cards = self.registry();
        let mut scripts = Vec::new();

        for owner in self.state.live_entities() {
            let Some(entity) = self.state.entity(owner) else { continue };
            if !entity.in_play() {
                continue;
            }
            let def = cards.card(entity.card_id)?;
            scripts.extend(def.auras.iter().enumerate().map(|(i, &script)| ActiveScript {
                owner,
                key: i as u16,
                script,
            }));
        }
        for owner in self.state.hand_entities() {
            let def = cards.card(self.state.get(owner)?.card_id)?;
            scripts.extend(def.hand_auras.iter().enumerate().map(|(i, &script)| ActiveScript {
                owner,
                key: HAND_SCRIPT_BASE + i as u16,
                script,
            }));
        }
        scripts.sort_by_key(|s| s.script.priority);

        for active in &scripts {
            self.apply_script(active);
        }
        self.expire_auras();

        self.state.tick += 1;
        let tick = self.state.tick;
        for observer in &self.observers {
            observer.auras_refreshed(tick);
        }
        self.log(VerbosityLevel::Verbose, "aura", |_| {
            format!("refreshed {} scripts, tick {tick}", scripts.len())
        });
        Ok(())
    }

    fn script_targets(&self, owner: EntityId, scope: AuraScope) -> Vec<EntityId> {
        let Some(controller) = self.state.controller(owner) else {
            return Vec::new();
        };
        let field = &self.state.player(controller).field;
        match scope {
            AuraScope::OwnerOnly => vec![owner],
            AuraScope::FriendlyMinions => field.iter().copied().collect(),
            AuraScope::OtherFriendlyMinions => field.iter().copied().filter(|&id| id != owner).collect(),
            AuraScope::AdjacentMinions => {
                let Some(pos) = field.index_of(&owner) else {
                    return Vec::new();
                };
                let mut out = Vec::with_capacity(2);
                if pos > 0 {
                    out.extend(field.get(pos - 1).copied());
                }
                out.extend(field.get(pos + 1).copied());
                out
            }
        }
    }

    fn apply_script(&mut self, active: &ActiveScript) {
        let script = active.script;
        let multiplier = match script.scaling {
            AuraScaling::Flat => 1,
            AuraScaling::PerOtherMinion => self
                .state
                .players
                .iter()
                .flat_map(|(_, p)| p.field.iter())
                .filter(|&&id| id != active.owner)
                .count() as i64,
        };
        if script.kind == AuraKind::Modify && multiplier == 0 {
            return;
        }

        for target in self.script_targets(active.owner, script.scope) {
            let (attack, health, cost) = match script.kind {
                AuraKind::Modify => (
                    script.attack * multiplier,
                    script.health * multiplier,
                    script.cost * multiplier,
                ),
                AuraKind::AttackEqualsHealth => {
                    let health = self.pass_stat(target, GameTag::Health, |b| b.health) - self.pass_damage(target);
                    (health - self.pass_stat(target, GameTag::Attack, |b| b.attack), 0, 0)
                }
            };
            self.stamp_buff(active, target, attack, health, cost);
        }
    }

    /// `tag` of `id` plus every buff still current in this pass: lasting
    /// buffs and aura buffs already re-stamped at the current tick.
    fn pass_stat(&self, id: EntityId, tag: GameTag, pick: impl Fn(&Buff) -> i64) -> i64 {
        let tick = self.state.tick;
        let base = self.state.entity(id).map_or(0, |e| e.tag(tag));
        base + self
            .state
            .buffs
            .iter()
            .filter(|b| b.target == id)
            .filter(|b| !matches!(b.duration, BuffDuration::Aura { tick: t, .. } if t < tick))
            .map(pick)
            .sum::<i64>()
    }

    /// Damage left once stale aura health has taken its share with it.
    fn pass_damage(&self, id: EntityId) -> i64 {
        let tick = self.state.tick;
        let damage = self.state.entity(id).map_or(0, |e| e.tag(GameTag::Damage));
        let forgiven: i64 = self
            .state
            .buffs
            .iter()
            .filter(|b| b.target == id && b.health > 0)
            .filter(|b| matches!(b.duration, BuffDuration::Aura { tick: t, .. } if t < tick))
            .map(|b| b.health)
            .sum();
        (damage - forgiven).max(0)
    }

    fn stamp_buff(&mut self, active: &ActiveScript, target: EntityId, attack: i64, health: i64, cost: i64) {
        let duration = BuffDuration::Aura {
            script: active.key,
            tick: self.state.tick,
        };
        let existing = self
            .state
            .buffs
            .iter()
            .position(|b| b.is_aura_from(active.owner, active.key, target));
        match existing {
            Some(i) => {
                if let Some(buff) = self.state.buffs.get_mut(i) {
                    buff.attack = attack;
                    buff.health = health;
                    buff.cost = cost;
                    buff.duration = duration;
                }
            }
            None => self.state.buffs.push_back(Buff {
                source: active.owner,
                target,
                attack,
                health,
                cost,
                duration,
            }),
        }
    }

    /// Remove aura buffs stamped before the current tick. Health lost with a
    /// buff takes the matching damage with it.
    fn expire_auras(&mut self) {
        let tick = self.state.tick;
        let stale = |b: &Buff| matches!(b.duration, BuffDuration::Aura { tick: t, .. } if t < tick);

        let expired: Vec<Buff> = self.state.buffs.iter().filter(|b| stale(b)).cloned().collect();
        if expired.is_empty() {
            return;
        }
        for buff in &expired {
            if buff.health <= 0 {
                continue;
            }
            if let Some(e) = self.state.entity_mut(buff.target) {
                let damage = e.tag(GameTag::Damage);
                e.set_tag(GameTag::Damage, damage - damage.min(buff.health));
            }
        }
        self.state.buffs.retain(|b| !stale(b));
    }
}
