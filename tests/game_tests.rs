//! Rules engine integration tests.
//!
//! These drive a `Game` through its public commands and check the board
//! afterwards: setup, mulligan, combat keywords, fatigue, listeners,
//! choices and the end of the match.

use std::sync::Arc;

use ccg_mcts::cards::basic::basic_set;
use ccg_mcts::cards::basic::ids::*;
use ccg_mcts::cards::CardId;
use ccg_mcts::core::{Action, ChoiceKind, EntityId, GameConfig, GameTag, PlayState, PlayerId, Step, Zone};
use ccg_mcts::error::GameError;
use ccg_mcts::mcts::SearchNode;
use ccg_mcts::rules::{BlockCounter, BlockType, Game, GameRules, PlayerSetup};

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);

fn new_game(config: GameConfig, rules: GameRules, deck: Vec<CardId>) -> Game {
    let players = [
        PlayerSetup::new("MCTS", JAINA_PROUDMOORE, deck.clone()),
        PlayerSetup::new("ENEMY", JAINA_PROUDMOORE, deck),
    ];
    Game::new(Arc::new(basic_set()), players, config, rules, 17).unwrap()
}

/// Basic rules, raptor decks, turn 1 for seat 0.
fn started() -> Game {
    let mut game = new_game(GameConfig::default(), GameRules::basic(), vec![BLOODFEN_RAPTOR; 30]);
    game.start().unwrap();
    game
}

fn give(game: &mut Game, player: PlayerId, card: CardId) -> EntityId {
    let results = game
        .run_block(EntityId::GAME, vec![Action::Give { player, card }], BlockType::Trigger, None, None)
        .unwrap();
    results[0][0]
}

fn summon(game: &mut Game, player: PlayerId, card: CardId) -> EntityId {
    let results = game
        .run_block(EntityId::GAME, vec![Action::Summon { player, card }], BlockType::Trigger, None, None)
        .unwrap();
    results[0][0]
}

/// Summon a minion that may attack this turn.
fn summon_ready(game: &mut Game, player: PlayerId, card: CardId) -> EntityId {
    let id = summon(game, player, card);
    game.state_mut().entity_mut(id).unwrap().set_tag(GameTag::Exhausted, 0);
    id
}

fn set_mana(game: &mut Game, player: PlayerId, mana: i64) {
    let seat = game.state_mut().player_mut(player);
    seat.max_mana = mana;
    seat.used_mana = 0;
}

fn hero(game: &Game, player: PlayerId) -> EntityId {
    game.player(player).hero
}

fn health(game: &Game, id: EntityId) -> i64 {
    game.state().health(id)
}

fn zone(game: &Game, id: EntityId) -> Zone {
    game.state().entity(id).unwrap().zone
}

// === Setup ===

#[test]
fn test_basic_opening() {
    let game = started();
    let state = game.state();
    assert_eq!(state.turn, 1);
    assert_eq!(state.current_player, P0);
    assert_eq!(state.step, Step::MainAction);
    assert_eq!(game.player(P0).hand.len(), 4);
    assert_eq!(game.player(P1).hand.len(), 4);
    assert_eq!(game.player(P0).deck.len(), 26);
    assert_eq!(game.player(P0).max_mana, 1);
    assert_eq!(game.player(P1).max_mana, 0);
    assert!(game.player(P0).field.is_empty());
    assert!(game.player(P0).first_player);
    assert_eq!(game.player(P0).playstate, PlayState::Playing);
}

#[test]
fn test_commands_before_start_fail() {
    let mut game = new_game(GameConfig::default(), GameRules::basic(), vec![BLOODFEN_RAPTOR; 30]);
    assert_eq!(game.end_turn(), Err(GameError::NotStarted));
}

#[test]
fn test_standard_opening_offers_mulligans() {
    let mut game = new_game(GameConfig::default(), GameRules::standard(), vec![BLOODFEN_RAPTOR; 30]);
    game.start().unwrap();

    assert_eq!(game.state().turn, 0);
    assert_eq!(game.state().step, Step::BeginMulligan);
    assert_eq!(game.player(P0).hand.len(), 3);
    assert_eq!(game.player(P1).hand.len(), 4);
    for p in PlayerId::both() {
        let choice = game.player(p).choice.as_ref().unwrap();
        assert_eq!(choice.kind, ChoiceKind::Mulligan);
        assert_eq!(choice.min_count, 0);
        assert_eq!(choice.max_count, game.player(p).hand.len());
    }
    assert!(matches!(game.end_turn(), Err(GameError::InvalidChoice { .. })));

    let card = game.player(P0).hand[0];
    assert!(matches!(
        game.play_card(card, None, None),
        Err(GameError::CardNotPlayable { .. })
    ));
}

#[test]
fn test_mulligan_replaces_picks_and_starts_turn() {
    let mut game = new_game(GameConfig::default(), GameRules::standard(), vec![BLOODFEN_RAPTOR; 30]);
    game.start().unwrap();

    let picks: Vec<EntityId> = game.player(P0).hand.iter().copied().take(2).collect();
    game.choose(P0, &picks).unwrap();
    assert_eq!(game.player(P0).hand.len(), 3);
    assert_eq!(game.player(P0).deck.len(), 27);
    for &card in &picks {
        assert_eq!(zone(&game, card), Zone::Deck);
    }
    assert_eq!(game.state().turn, 0);

    game.choose(P1, &[]).unwrap();
    assert_eq!(game.state().turn, 1);
    assert_eq!(game.state().current_player, P0);
    assert_eq!(game.player(P0).hand.len(), 4);
    assert_eq!(game.player(P0).max_mana, 1);

    let hand = &game.player(P1).hand;
    assert_eq!(hand.len(), 5);
    let coins = hand
        .iter()
        .filter(|&&id| game.state().entity(id).unwrap().card_id == THE_COIN)
        .count();
    assert_eq!(coins, 1);
}

#[test]
fn test_choose_validates_picks() {
    let mut game = new_game(GameConfig::default(), GameRules::standard(), vec![BLOODFEN_RAPTOR; 30]);
    game.start().unwrap();

    let card = game.player(P0).hand[0];
    let enemy_card = game.player(P1).hand[0];
    assert!(matches!(game.choose(P0, &[card, card]), Err(GameError::InvalidChoice { .. })));
    assert!(matches!(game.choose(P0, &[enemy_card]), Err(GameError::InvalidChoice { .. })));

    game.choose(P0, &[]).unwrap();
    assert_eq!(game.choose(P0, &[]), Err(GameError::NoPendingChoice { player: P0 }));
}

#[test]
fn test_coin_gives_temporary_mana() {
    let mut game = new_game(GameConfig::default(), GameRules::standard(), vec![BLOODFEN_RAPTOR; 30]);
    game.start().unwrap();
    game.choose(P0, &[]).unwrap();
    game.choose(P1, &[]).unwrap();
    game.end_turn().unwrap();

    let coin = game
        .player(P1)
        .hand
        .iter()
        .copied()
        .find(|&id| game.state().entity(id).unwrap().card_id == THE_COIN)
        .unwrap();
    assert_eq!(game.player(P1).mana(), 1);
    game.play_card(coin, None, None).unwrap();
    assert_eq!(game.player(P1).mana(), 2);
    assert_eq!(zone(&game, coin), Zone::Graveyard);

    game.end_turn().unwrap();
    assert_eq!(game.player(P1).temp_mana, 0);
}

// === Playing cards ===

#[test]
fn test_play_minion_spends_mana() {
    let mut game = started();
    set_mana(&mut game, P0, 2);
    let raptor = game.player(P0).hand[0];

    game.play_card(raptor, None, None).unwrap();
    assert_eq!(zone(&game, raptor), Zone::Play);
    assert_eq!(game.player(P0).used_mana, 2);
    assert_eq!(game.player(P0).cards_played_this_turn, 1);
    assert!(!game.can_attack(raptor));

    let other = game.player(P0).hand[0];
    assert_eq!(
        game.play_card(other, None, None),
        Err(GameError::CardNotPlayable {
            card: other,
            reason: "not enough mana"
        })
    );
}

#[test]
fn test_opponent_cards_not_playable() {
    let mut game = started();
    let card = game.player(P1).hand[0];
    assert!(!game.is_playable(card));
    assert!(game.play_card(card, None, None).unwrap_err().is_illegal_move());
}

#[test]
fn test_targeted_spell_requires_target() {
    let mut game = started();
    set_mana(&mut game, P0, 4);
    let fireball = give(&mut game, P0, FIREBALL);
    let enemy = hero(&game, P1);

    assert!(game.requires_target(fireball, None));
    assert!(matches!(game.play_card(fireball, None, None), Err(GameError::InvalidTarget { .. })));
    game.play_card(fireball, Some(enemy), None).unwrap();
    assert_eq!(health(&game, enemy), 24);
    assert_eq!(zone(&game, fireball), Zone::Graveyard);
}

#[test]
fn test_optional_target_battlecry() {
    let mut game = started();
    set_mana(&mut game, P0, 10);
    let cleric = give(&mut game, P0, SHATTERED_SUN_CLERIC);
    assert!(!game.requires_target(cleric, None));

    let raptor = summon(&mut game, P0, BLOODFEN_RAPTOR);
    assert!(game.requires_target(cleric, None));
    game.play_card(cleric, Some(raptor), None).unwrap();
    assert_eq!(game.state().attack(raptor), 4);
    assert_eq!(health(&game, raptor), 3);
}

#[test]
fn test_battlecry_summons_token() {
    let mut game = started();
    set_mana(&mut game, P0, 3);
    let hunter = give(&mut game, P0, RAZORFEN_HUNTER);
    game.play_card(hunter, None, None).unwrap();

    let field = &game.player(P0).field;
    assert_eq!(field.len(), 2);
    assert_eq!(field[0], hunter);
    assert_eq!(game.state().entity(field[1]).unwrap().card_id, BOAR);
}

#[test]
fn test_polymorph_keeps_position() {
    let mut game = started();
    set_mana(&mut game, P0, 4);
    summon(&mut game, P1, BLOODFEN_RAPTOR);
    let yeti = summon(&mut game, P1, CHILLWIND_YETI);
    summon(&mut game, P1, BLOODFEN_RAPTOR);
    let polymorph = give(&mut game, P0, POLYMORPH);

    game.play_card(polymorph, Some(yeti), None).unwrap();
    let field = &game.player(P1).field;
    assert_eq!(field.len(), 3);
    assert_eq!(game.state().entity(field[1]).unwrap().card_id, SHEEP);
    assert_eq!(zone(&game, yeti), Zone::RemovedFromGame);
}

#[test]
fn test_choose_one_needs_an_option() {
    let mut game = started();
    set_mana(&mut game, P0, 2);
    let yeti = summon(&mut game, P1, CHILLWIND_YETI);
    let wrath = give(&mut game, P0, WRATH);

    assert_eq!(game.playable_options(wrath), vec![WRATH_BIG, WRATH_SMALL]);
    assert!(matches!(game.play_card(wrath, Some(yeti), None), Err(GameError::InvalidChoice { .. })));
    assert!(matches!(
        game.play_card(wrath, Some(yeti), Some(FIREBALL)),
        Err(GameError::InvalidChoice { .. })
    ));

    let hand_before = game.player(P0).hand.len();
    game.play_card(wrath, Some(yeti), Some(WRATH_SMALL)).unwrap();
    assert_eq!(health(&game, yeti), 4);
    assert_eq!(game.player(P0).hand.len(), hand_before);
}

#[test]
fn test_choose_one_without_targets_is_unplayable() {
    let mut game = started();
    set_mana(&mut game, P0, 2);
    let wrath = give(&mut game, P0, WRATH);
    assert!(game.playable_options(wrath).is_empty());
    assert!(!game.is_playable(wrath));
}

#[test]
fn test_overload_locks_next_turn() {
    let mut game = started();
    let bolt = give(&mut game, P0, LIGHTNING_BOLT);
    let enemy = hero(&game, P1);

    game.play_card(bolt, Some(enemy), None).unwrap();
    assert_eq!(health(&game, enemy), 27);
    assert_eq!(game.player(P0).overloaded, 1);

    game.end_turn().unwrap();
    game.end_turn().unwrap();
    let seat = game.player(P0);
    assert_eq!(seat.max_mana, 2);
    assert_eq!(seat.overload_locked, 1);
    assert_eq!(seat.overloaded, 0);
    assert_eq!(seat.mana(), 1);
}

// === Combat ===

#[test]
fn test_charge_attacks_hero() {
    let mut game = started();
    let wolf = summon(&mut game, P0, WOLFRIDER);
    let enemy = hero(&game, P1);

    assert!(game.can_attack(wolf));
    game.attack(wolf, enemy).unwrap();
    assert_eq!(health(&game, enemy), 27);
    assert_eq!(game.state().entity(wolf).unwrap().tag(GameTag::NumAttacks), 1);
    assert!(matches!(game.attack(wolf, enemy), Err(GameError::CannotAttack { .. })));
}

#[test]
fn test_turn_start_ages_and_resets_both_boards() {
    let mut game = started();
    let ours = summon_ready(&mut game, P0, BLOODFEN_RAPTOR);
    let theirs = summon(&mut game, P1, BLOODFEN_RAPTOR);
    for id in [ours, theirs] {
        game.state_mut().entity_mut(id).unwrap().set_tag(GameTag::NumAttacks, 1);
    }
    let our_hero = hero(&game, P0);
    let hero_turns = game.state().entity(our_hero).unwrap().tag(GameTag::TurnsInPlay);

    game.end_turn().unwrap();
    assert_eq!(game.current_player(), P1);
    for id in [ours, theirs] {
        let entity = game.state().entity(id).unwrap();
        assert_eq!(entity.tag(GameTag::TurnsInPlay), 1);
        assert_eq!(entity.tag(GameTag::NumAttacks), 0);
    }
    let aged = game.state().entity(our_hero).unwrap().tag(GameTag::TurnsInPlay);
    assert_eq!(aged, hero_turns + 1);
}

#[test]
fn test_summoning_sickness() {
    let mut game = started();
    let raptor = summon(&mut game, P0, BLOODFEN_RAPTOR);
    let enemy = hero(&game, P1);
    assert_eq!(
        game.attack(raptor, enemy),
        Err(GameError::CannotAttack {
            attacker: raptor,
            reason: "exhausted"
        })
    );

    game.end_turn().unwrap();
    game.end_turn().unwrap();
    assert!(game.can_attack(raptor));
}

#[test]
fn test_combat_trades_damage() {
    let mut game = started();
    let yeti = summon_ready(&mut game, P0, CHILLWIND_YETI);
    let raptor = summon(&mut game, P1, BLOODFEN_RAPTOR);

    game.attack(yeti, raptor).unwrap();
    assert_eq!(zone(&game, raptor), Zone::Graveyard);
    assert_eq!(health(&game, yeti), 2);
    assert!(game.player(P1).field.is_empty());
    assert_eq!(game.player(P0).minions_killed_this_turn, 1);
}

#[test]
fn test_taunt_screens_other_targets() {
    let mut game = started();
    let wolf = summon(&mut game, P0, WOLFRIDER);
    let taunt = summon(&mut game, P1, SENJIN_SHIELDMASTA);
    summon(&mut game, P1, BLOODFEN_RAPTOR);
    let enemy = hero(&game, P1);

    assert_eq!(game.attack_targets(wolf), vec![taunt]);
    assert_eq!(
        game.attack(wolf, enemy),
        Err(GameError::InvalidTarget {
            actor: wolf,
            target: enemy
        })
    );
    game.attack(wolf, taunt).unwrap();
    assert_eq!(health(&game, taunt), 2);
}

#[test]
fn test_windfury_attacks_twice() {
    let mut game = started();
    let hawk = summon_ready(&mut game, P0, YOUNG_DRAGONHAWK);
    let enemy = hero(&game, P1);

    game.attack(hawk, enemy).unwrap();
    game.attack(hawk, enemy).unwrap();
    assert_eq!(health(&game, enemy), 28);
    assert!(!game.can_attack(hawk));
}

#[test]
fn test_frozen_character_thaws_after_skipping_attack() {
    let mut game = started();
    set_mana(&mut game, P0, 2);
    let yeti = summon(&mut game, P1, CHILLWIND_YETI);
    let frostbolt = give(&mut game, P0, FROSTBOLT);

    game.play_card(frostbolt, Some(yeti), None).unwrap();
    assert_eq!(health(&game, yeti), 2);
    assert!(game.state().entity(yeti).unwrap().has(GameTag::Frozen));

    game.end_turn().unwrap();
    assert!(!game.can_attack(yeti));
    assert!(matches!(
        game.attack(yeti, hero(&game, P0)),
        Err(GameError::CannotAttack { reason: "frozen", .. })
    ));

    game.end_turn().unwrap();
    assert!(!game.state().entity(yeti).unwrap().has(GameTag::Frozen));
}

#[test]
fn test_damage_listener_freezes_victim() {
    let mut game = started();
    let elemental = summon_ready(&mut game, P0, WATER_ELEMENTAL);
    let yeti = summon(&mut game, P1, CHILLWIND_YETI);

    game.attack(elemental, yeti).unwrap();
    assert_eq!(health(&game, yeti), 2);
    assert!(game.state().entity(yeti).unwrap().has(GameTag::Frozen));
    assert_eq!(health(&game, elemental), 2);
}

#[test]
fn test_enrage_style_listener_buffs_itself() {
    let mut game = started();
    set_mana(&mut game, P0, 2);
    let berserker = summon(&mut game, P1, GURUBASHI_BERSERKER);

    game.use_hero_power(Some(berserker)).unwrap();
    assert_eq!(game.state().attack(berserker), 5);
    assert_eq!(health(&game, berserker), 6);
}

#[test]
fn test_deathrattle_draws_for_owner() {
    let mut game = started();
    set_mana(&mut game, P0, 2);
    let hoarder = summon(&mut game, P1, LOOT_HOARDER);
    let hand_before = game.player(P1).hand.len();

    game.use_hero_power(Some(hoarder)).unwrap();
    assert_eq!(zone(&game, hoarder), Zone::Graveyard);
    assert_eq!(game.player(P1).hand.len(), hand_before + 1);
}

#[test]
fn test_one_shot_listener_destroys_attacker() {
    let mut game = started();
    set_mana(&mut game, P0, 3);
    let vaporize = give(&mut game, P0, VAPORIZE);
    game.play_card(vaporize, None, None).unwrap();
    assert_eq!(game.player(P0).listeners.len(), 1);
    assert_eq!(zone(&game, vaporize), Zone::Graveyard);

    game.end_turn().unwrap();
    let wolf = summon(&mut game, P1, WOLFRIDER);
    let friendly = hero(&game, P0);
    game.attack(wolf, friendly).unwrap();

    assert_eq!(zone(&game, wolf), Zone::Graveyard);
    assert_eq!(health(&game, friendly), 30);
    assert!(game.player(P0).listeners.is_empty());

    let second = summon(&mut game, P1, WOLFRIDER);
    game.attack(second, friendly).unwrap();
    assert_eq!(health(&game, friendly), 27);
}

#[test]
fn test_armor_absorbs_damage() {
    let mut game = started();
    set_mana(&mut game, P0, 2);
    let enemy = hero(&game, P1);
    game.run_block(
        EntityId::GAME,
        vec![Action::GainArmor { player: P1, amount: 2 }],
        BlockType::Trigger,
        None,
        None,
    )
    .unwrap();

    game.use_hero_power(Some(enemy)).unwrap();
    assert_eq!(game.state().armor(enemy), 1);
    assert_eq!(health(&game, enemy), 30);
}

// === Hero power ===

#[test]
fn test_hero_power_once_per_turn() {
    let mut game = started();
    set_mana(&mut game, P0, 10);
    let enemy = hero(&game, P1);

    assert_eq!(game.power_targets(P0).len(), 2);
    game.use_hero_power(Some(enemy)).unwrap();
    assert!(!game.power_usable(P0));
    assert!(matches!(
        game.use_hero_power(Some(enemy)),
        Err(GameError::PowerNotUsable { .. })
    ));

    game.end_turn().unwrap();
    game.end_turn().unwrap();
    assert!(game.power_usable(P0));
}

// === Drawing ===

#[test]
fn test_fatigue_grows_each_empty_draw() {
    let mut game = new_game(GameConfig::default(), GameRules::basic(), vec![BLOODFEN_RAPTOR; 4]);
    game.start().unwrap();
    assert!(game.player(P0).deck.is_empty());
    assert!(game.player(P1).deck.is_empty());

    game.end_turn().unwrap();
    assert_eq!(health(&game, hero(&game, P1)), 29);
    game.end_turn().unwrap();
    assert_eq!(health(&game, hero(&game, P0)), 29);
    game.end_turn().unwrap();
    assert_eq!(game.player(P1).fatigue_counter, 2);
    assert_eq!(health(&game, hero(&game, P1)), 27);
}

#[test]
fn test_full_hand_burns_draw() {
    let mut game = started();
    while game.player(P0).hand.len() < 10 {
        give(&mut game, P0, BLOODFEN_RAPTOR);
    }
    let top = game.player(P0).deck[0];
    game.run_block(
        EntityId::player(P0),
        vec![Action::Draw { player: P0, count: 1 }],
        BlockType::Trigger,
        None,
        None,
    )
    .unwrap();

    assert_eq!(game.player(P0).hand.len(), 10);
    assert_eq!(zone(&game, top), Zone::Graveyard);
}

// === Choices ===

#[test]
fn test_discover_offers_and_keeps_one() {
    let mut game = started();
    set_mana(&mut game, P0, 2);
    let glyph = give(&mut game, P0, PRIMORDIAL_GLYPH);
    game.play_card(glyph, None, None).unwrap();

    let choice = game.player(P0).choice.clone().unwrap();
    assert_eq!(choice.kind, ChoiceKind::Discover);
    assert_eq!(choice.cards.len(), 3);
    assert!(choice.cards.iter().all(|&c| zone(&game, c) == Zone::SetAside));
    assert!(matches!(game.end_turn(), Err(GameError::InvalidChoice { .. })));
    assert!(matches!(
        game.choose(P0, &choice.cards[..2]),
        Err(GameError::InvalidChoice { .. })
    ));

    let hand_before = game.player(P0).hand.len();
    let counter = Arc::new(BlockCounter::new());
    game.add_observer(counter.clone());
    game.choose(P0, &[choice.cards[0]]).unwrap();
    assert!(game.player(P0).choice.is_none());
    assert_eq!((counter.starts(), counter.ends(), counter.refreshes()), (1, 1, 1));
    assert_eq!(zone(&game, choice.cards[0]), Zone::Hand);
    assert_eq!(zone(&game, choice.cards[1]), Zone::RemovedFromGame);
    assert_eq!(zone(&game, choice.cards[2]), Zone::RemovedFromGame);
    assert_eq!(game.player(P0).hand.len(), hand_before + 1);
    game.end_turn().unwrap();
}

// === End of the match ===

#[test]
fn test_lethal_damage_ends_game() {
    let mut game = started();
    set_mana(&mut game, P0, 2);
    let enemy = hero(&game, P1);
    game.state_mut().entity_mut(enemy).unwrap().set_tag(GameTag::Damage, 29);

    game.use_hero_power(Some(enemy)).unwrap();
    assert!(game.is_ended());
    assert_eq!(game.player(P0).playstate, PlayState::Won);
    assert_eq!(game.player(P1).playstate, PlayState::Lost);
    assert_eq!(game.state().ended_on, Some(1));
    assert_eq!(game.state().step, Step::FinalGameover);
    assert_eq!(game.reward(), Ok(1.0));
    assert_eq!(game.end_turn(), Err(GameError::GameOver));
}

#[test]
fn test_turn_limit_is_a_tie() {
    let config = GameConfig::default().with_max_turns(2);
    let mut game = new_game(config, GameRules::basic(), vec![BLOODFEN_RAPTOR; 30]);
    game.start().unwrap();
    game.end_turn().unwrap();
    assert!(!game.is_ended());
    game.end_turn().unwrap();

    assert!(game.is_ended());
    assert_eq!(game.player(P0).playstate, PlayState::Tied);
    assert_eq!(game.player(P1).playstate, PlayState::Tied);
    assert_eq!(game.state().ended_on, Some(3));
    assert_eq!(game.reward(), Ok(0.5));
}

#[test]
fn test_concede() {
    let mut game = started();
    game.concede(P0).unwrap();
    assert_eq!(game.player(P0).playstate, PlayState::Lost);
    assert_eq!(game.player(P1).playstate, PlayState::Won);
    assert_eq!(game.reward(), Ok(0.0));
    assert_eq!(game.concede(P1), Err(GameError::GameOver));
}

#[test]
fn test_random_turns_swap_players_and_respect_mana() {
    let mut game = started();
    for turn in 0..10 {
        if game.is_ended() {
            break;
        }
        let mover = game.current_player();
        game.play_set_turn().unwrap();
        let seat = game.player(mover);
        assert!(seat.used_mana <= seat.max_mana + seat.temp_mana, "turn {turn}");
        if !game.is_ended() {
            assert_eq!(game.current_player(), mover.opponent());
        }
    }
}
