//! Built-in basic card set.
//!
//! A small classic-era pool: the mage midrange list the match driver drafts
//! from, plus a handful of neutral, druid and shaman cards so every engine
//! path (auras, hand scripts, listeners, one-shot secrets, deathrattles,
//! choose-one, discover, overload, keywords) has content to run on.

use super::definition::{AuraScaling, AuraScope, AuraScript, CardClass, CardDefinition, CardId, CardType};
use super::registry::CardRegistry;
use crate::core::GameTag;
use crate::effects::{Effect, Selector, Side, TargetFilter, TargetRequirement};
use crate::triggers::{EventKind, EventListener, ListenerCondition};

pub mod ids {
    use crate::cards::CardId;

    pub const THE_COIN: CardId = CardId(1);
    pub const JAINA_PROUDMOORE: CardId = CardId(2);
    pub const FIREBLAST: CardId = CardId(3);
    pub const SHEEP: CardId = CardId(4);
    pub const BOAR: CardId = CardId(5);

    pub const ARCANE_MISSILES: CardId = CardId(10);
    pub const FROSTBOLT: CardId = CardId(11);
    pub const ARCANE_INTELLECT: CardId = CardId(12);
    pub const FIREBALL: CardId = CardId(13);
    pub const POLYMORPH: CardId = CardId(14);
    pub const WATER_ELEMENTAL: CardId = CardId(15);
    pub const FLAMESTRIKE: CardId = CardId(16);
    pub const VAPORIZE: CardId = CardId(17);
    pub const PRIMORDIAL_GLYPH: CardId = CardId(18);

    pub const ACIDIC_SWAMP_OOZE: CardId = CardId(30);
    pub const BLOODFEN_RAPTOR: CardId = CardId(31);
    pub const RAZORFEN_HUNTER: CardId = CardId(32);
    pub const SHATTERED_SUN_CLERIC: CardId = CardId(33);
    pub const CHILLWIND_YETI: CardId = CardId(34);
    pub const GNOMISH_INVENTOR: CardId = CardId(35);
    pub const GURUBASHI_BERSERKER: CardId = CardId(36);
    pub const BOULDERFIST_OGRE: CardId = CardId(37);
    pub const RAID_LEADER: CardId = CardId(38);
    pub const STORMWIND_CHAMPION: CardId = CardId(39);
    pub const SEA_GIANT: CardId = CardId(40);
    pub const WOLFRIDER: CardId = CardId(41);
    pub const SENJIN_SHIELDMASTA: CardId = CardId(42);
    pub const LOOT_HOARDER: CardId = CardId(43);
    pub const YOUNG_DRAGONHAWK: CardId = CardId(44);
    pub const DIRE_WOLF_ALPHA: CardId = CardId(45);

    pub const WRATH: CardId = CardId(50);
    pub const WRATH_BIG: CardId = CardId(51);
    pub const WRATH_SMALL: CardId = CardId(52);

    pub const LIGHTNING_BOLT: CardId = CardId(60);

    pub const LIGHTSPAWN: CardId = CardId(70);
}

use ids::*;

/// Mage spells offered by Primordial Glyph.
pub const GLYPH_POOL: [CardId; 6] = [
    ARCANE_MISSILES,
    FROSTBOLT,
    ARCANE_INTELLECT,
    FIREBALL,
    POLYMORPH,
    FLAMESTRIKE,
];

/// The registry with every basic card.
#[must_use]
pub fn basic_set() -> CardRegistry {
    let mut r = CardRegistry::new();

    // Heroes, powers, tokens
    r.register(
        CardDefinition::spell(THE_COIN, "The Coin", 0)
            .with_effect(Effect::GainMana { amount: 1, temporary: true })
            .uncollectible(),
    );
    r.register(
        CardDefinition::new(JAINA_PROUDMOORE, "Jaina Proudmoore", CardType::Hero, 0)
            .with_class(CardClass::Mage)
            .with_hero_power(FIREBLAST)
            .uncollectible(),
    );
    r.register(
        CardDefinition::new(FIREBLAST, "Fireblast", CardType::HeroPower, 2)
            .with_class(CardClass::Mage)
            .with_target(TargetRequirement::Required(TargetFilter::AnyCharacter))
            .with_effect(Effect::damage(Selector::Target, 1))
            .uncollectible(),
    );
    r.register(CardDefinition::minion(SHEEP, "Sheep", 1, 1, 1).uncollectible());
    r.register(CardDefinition::minion(BOAR, "Boar", 1, 1, 1).uncollectible());

    // Mage
    r.register(
        CardDefinition::spell(ARCANE_MISSILES, "Arcane Missiles", 1)
            .with_class(CardClass::Mage)
            .with_effect(Effect::damage(Selector::RandomEnemyCharacter, 1))
            .with_effect(Effect::damage(Selector::RandomEnemyCharacter, 1))
            .with_effect(Effect::damage(Selector::RandomEnemyCharacter, 1)),
    );
    r.register(
        CardDefinition::spell(FROSTBOLT, "Frostbolt", 2)
            .with_class(CardClass::Mage)
            .with_target(TargetRequirement::Required(TargetFilter::AnyCharacter))
            .with_effect(Effect::damage(Selector::Target, 3))
            .with_effect(Effect::Freeze { to: Selector::Target }),
    );
    r.register(
        CardDefinition::spell(ARCANE_INTELLECT, "Arcane Intellect", 3)
            .with_class(CardClass::Mage)
            .with_effect(Effect::draw(2)),
    );
    r.register(
        CardDefinition::spell(FIREBALL, "Fireball", 4)
            .with_class(CardClass::Mage)
            .with_target(TargetRequirement::Required(TargetFilter::AnyCharacter))
            .with_effect(Effect::damage(Selector::Target, 6)),
    );
    r.register(
        CardDefinition::spell(POLYMORPH, "Polymorph", 4)
            .with_class(CardClass::Mage)
            .with_target(TargetRequirement::Required(TargetFilter::AnyMinion))
            .with_effect(Effect::Morph { to: Selector::Target, into: SHEEP }),
    );
    r.register(
        CardDefinition::minion(WATER_ELEMENTAL, "Water Elemental", 4, 3, 6)
            .with_class(CardClass::Mage)
            .with_listener(EventListener::persistent(
                EventKind::Damage,
                ListenerCondition::SourceIsSelf,
                vec![Effect::Freeze { to: Selector::EventTarget }],
            )),
    );
    r.register(
        CardDefinition::spell(FLAMESTRIKE, "Flamestrike", 7)
            .with_class(CardClass::Mage)
            .with_effect(Effect::damage(Selector::EnemyMinions, 4)),
    );
    r.register(
        CardDefinition::spell(VAPORIZE, "Vaporize", 3)
            .with_class(CardClass::Mage)
            .with_effect(Effect::Listen(EventListener::once(
                EventKind::Attack,
                ListenerCondition::All(vec![
                    ListenerCondition::TargetIsFriendlyHero,
                    ListenerCondition::SourceIsMinion,
                ]),
                vec![Effect::Destroy { to: Selector::EventSource }],
            ))),
    );
    r.register(
        CardDefinition::spell(PRIMORDIAL_GLYPH, "Primordial Glyph", 2)
            .with_class(CardClass::Mage)
            .with_effect(Effect::Discover { pool: GLYPH_POOL.to_vec() }),
    );

    // Neutral
    r.register(CardDefinition::minion(ACIDIC_SWAMP_OOZE, "Acidic Swamp Ooze", 2, 3, 2));
    r.register(CardDefinition::minion(BLOODFEN_RAPTOR, "Bloodfen Raptor", 2, 3, 2));
    r.register(
        CardDefinition::minion(RAZORFEN_HUNTER, "Razorfen Hunter", 3, 2, 3)
            .with_effect(Effect::Summon { who: Side::Friendly, card: BOAR }),
    );
    r.register(
        CardDefinition::minion(SHATTERED_SUN_CLERIC, "Shattered Sun Cleric", 3, 3, 2)
            .with_target(TargetRequirement::IfAvailable(TargetFilter::FriendlyMinion))
            .with_effect(Effect::buff(Selector::Target, 1, 1)),
    );
    r.register(CardDefinition::minion(CHILLWIND_YETI, "Chillwind Yeti", 4, 4, 5));
    r.register(
        CardDefinition::minion(GNOMISH_INVENTOR, "Gnomish Inventor", 4, 2, 4)
            .with_effect(Effect::draw(1)),
    );
    r.register(
        CardDefinition::minion(GURUBASHI_BERSERKER, "Gurubashi Berserker", 5, 2, 7)
            .with_listener(EventListener::persistent(
                EventKind::Damage,
                ListenerCondition::TargetIsSelf,
                vec![Effect::buff(Selector::Source, 3, 0)],
            )),
    );
    r.register(CardDefinition::minion(BOULDERFIST_OGRE, "Boulderfist Ogre", 6, 6, 7));
    r.register(
        CardDefinition::minion(RAID_LEADER, "Raid Leader", 3, 2, 2)
            .with_aura(AuraScript::stats(AuraScope::OtherFriendlyMinions, 1, 0)),
    );
    r.register(
        CardDefinition::minion(STORMWIND_CHAMPION, "Stormwind Champion", 7, 6, 6)
            .with_aura(AuraScript::stats(AuraScope::OtherFriendlyMinions, 1, 1)),
    );
    r.register(
        CardDefinition::minion(SEA_GIANT, "Sea Giant", 10, 8, 8)
            .with_hand_aura(AuraScript::cost(AuraScope::OwnerOnly, -1, AuraScaling::PerOtherMinion)),
    );
    r.register(
        CardDefinition::minion(WOLFRIDER, "Wolfrider", 3, 3, 1).with_tag(GameTag::Charge, 1),
    );
    r.register(
        CardDefinition::minion(SENJIN_SHIELDMASTA, "Sen'jin Shieldmasta", 4, 3, 5)
            .with_tag(GameTag::Taunt, 1),
    );
    r.register(
        CardDefinition::minion(LOOT_HOARDER, "Loot Hoarder", 2, 2, 1)
            .with_deathrattle(Effect::draw(1)),
    );
    r.register(
        CardDefinition::minion(YOUNG_DRAGONHAWK, "Young Dragonhawk", 1, 1, 1)
            .with_tag(GameTag::Windfury, 1),
    );
    r.register(
        CardDefinition::minion(DIRE_WOLF_ALPHA, "Dire Wolf Alpha", 2, 2, 2)
            .with_aura(AuraScript::stats(AuraScope::AdjacentMinions, 1, 0).with_priority(40)),
    );

    // Priest
    r.register(
        CardDefinition::minion(LIGHTSPAWN, "Lightspawn", 4, 0, 5)
            .with_class(CardClass::Priest)
            .with_aura(AuraScript::attack_equals_health()),
    );

    // Druid
    r.register(
        CardDefinition::spell(WRATH, "Wrath", 2)
            .with_class(CardClass::Druid)
            .with_choose_one([WRATH_BIG, WRATH_SMALL]),
    );
    r.register(
        CardDefinition::spell(WRATH_BIG, "Wrath (3 damage)", 2)
            .with_class(CardClass::Druid)
            .with_target(TargetRequirement::Required(TargetFilter::AnyMinion))
            .with_effect(Effect::damage(Selector::Target, 3))
            .uncollectible(),
    );
    r.register(
        CardDefinition::spell(WRATH_SMALL, "Wrath (1 damage, draw)", 2)
            .with_class(CardClass::Druid)
            .with_target(TargetRequirement::Required(TargetFilter::AnyMinion))
            .with_effect(Effect::damage(Selector::Target, 1))
            .with_effect(Effect::draw(1))
            .uncollectible(),
    );

    // Shaman
    r.register(
        CardDefinition::spell(LIGHTNING_BOLT, "Lightning Bolt", 1)
            .with_class(CardClass::Shaman)
            .with_tag(GameTag::Overload, 1)
            .with_target(TargetRequirement::Required(TargetFilter::AnyCharacter))
            .with_effect(Effect::damage(Selector::Target, 3)),
    );

    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_reference_resolves() {
        let registry = basic_set();
        for id in (0..100).map(CardId::new).filter(|id| registry.contains(*id)) {
            let card = registry.card(id).unwrap();
            for option in &card.choose_one {
                assert!(registry.contains(*option), "{} option missing", card.name);
            }
            if let Some(power) = card.hero_power {
                assert_eq!(registry.card(power).unwrap().card_type, CardType::HeroPower);
            }
        }
        for id in GLYPH_POOL {
            assert_eq!(registry.card(id).unwrap().card_type, CardType::Spell);
        }
    }

    #[test]
    fn test_mage_pool_excludes_tokens_and_other_classes() {
        let registry = basic_set();
        let pool = registry.collectible(CardClass::Mage);
        assert!(pool.contains(&FIREBALL));
        assert!(pool.contains(&CHILLWIND_YETI));
        assert!(!pool.contains(&SHEEP));
        assert!(!pool.contains(&THE_COIN));
        assert!(!pool.contains(&WRATH));
    }
}
