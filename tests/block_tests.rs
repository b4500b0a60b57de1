//! Action block integration tests.
//!
//! Blocks bracket every state change. These tests watch the brackets
//! through observers and check the nesting counter, the zero-point refresh
//! and the cleanup after errors.

use std::sync::{Arc, Mutex};

use proptest::prelude::*;

use ccg_mcts::cards::basic::basic_set;
use ccg_mcts::cards::basic::ids::*;
use ccg_mcts::cards::CardId;
use ccg_mcts::core::{Action, EntityId, GameConfig, GameRng, GameTag, PlayerId};
use ccg_mcts::driver::{mcts_draft, standard_match};
use ccg_mcts::error::GameError;
use ccg_mcts::rules::{BlockCounter, BlockObserver, BlockType, Game, GameRules, PlayerSetup, TurnOutcome};

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);

/// Records every bracket as (opened, block, depth).
#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<(bool, BlockType, u32)>>,
}

impl Recorder {
    fn events(&self) -> Vec<(bool, BlockType, u32)> {
        self.events.lock().unwrap().clone()
    }
}

impl BlockObserver for Recorder {
    fn block_start(&self, block: BlockType, _source: EntityId, depth: u32) {
        self.events.lock().unwrap().push((true, block, depth));
    }

    fn block_end(&self, block: BlockType, _source: EntityId, depth: u32) {
        self.events.lock().unwrap().push((false, block, depth));
    }
}

/// Records outermost closes and aura refreshes in the order they happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    ClosedAtZero,
    Refreshed,
}

#[derive(Default)]
struct ZeroPoints {
    marks: Mutex<Vec<Mark>>,
}

impl ZeroPoints {
    fn marks(&self) -> Vec<Mark> {
        self.marks.lock().unwrap().clone()
    }
}

impl BlockObserver for ZeroPoints {
    fn block_end(&self, _block: BlockType, _source: EntityId, depth: u32) {
        if depth == 0 {
            self.marks.lock().unwrap().push(Mark::ClosedAtZero);
        }
    }

    fn auras_refreshed(&self, _tick: u64) {
        self.marks.lock().unwrap().push(Mark::Refreshed);
    }
}

fn started() -> Game {
    let deck = vec![BLOODFEN_RAPTOR; 30];
    let players = [
        PlayerSetup::new("MCTS", JAINA_PROUDMOORE, deck.clone()),
        PlayerSetup::new("ENEMY", JAINA_PROUDMOORE, deck),
    ];
    let mut game = Game::new(Arc::new(basic_set()), players, GameConfig::default(), GameRules::basic(), 5).unwrap();
    game.start().unwrap();
    game
}

fn summon(game: &mut Game, player: PlayerId, card: CardId) -> EntityId {
    let results = game
        .run_block(EntityId::GAME, vec![Action::Summon { player, card }], BlockType::Trigger, None, None)
        .unwrap();
    results[0][0]
}

#[test]
fn test_play_block_is_not_counted() {
    let mut game = started();
    game.state_mut().player_mut(P0).max_mana = 2;
    let recorder = Arc::new(Recorder::default());
    game.add_observer(recorder.clone());

    let raptor = game.player(P0).hand[0];
    game.play_card(raptor, None, None).unwrap();

    let events = recorder.events();
    assert_eq!(events.first(), Some(&(true, BlockType::Play, 0)));
    assert_eq!(events.last(), Some(&(false, BlockType::Play, 0)));
}

#[test]
fn test_battlecry_nests_inside_play() {
    let mut game = started();
    game.state_mut().player_mut(P0).max_mana = 3;
    let results = game
        .run_block(
            EntityId::GAME,
            vec![Action::Give { player: P0, card: RAZORFEN_HUNTER }],
            BlockType::Trigger,
            None,
            None,
        )
        .unwrap();
    let hunter = results[0][0];
    let recorder = Arc::new(Recorder::default());
    game.add_observer(recorder.clone());

    game.play_card(hunter, None, None).unwrap();
    let events = recorder.events();
    assert!(events.contains(&(true, BlockType::Power, 1)));
    assert!(events.contains(&(false, BlockType::Power, 0)));
}

#[test]
fn test_listener_runs_in_nested_trigger_block() {
    let mut game = started();
    let wolf = summon(&mut game, P0, WOLFRIDER);
    let berserker = summon(&mut game, P1, GURUBASHI_BERSERKER);
    let counter = Arc::new(BlockCounter::new());
    game.add_observer(counter.clone());

    game.attack(wolf, berserker).unwrap();
    assert_eq!(counter.starts(), counter.ends());
    assert_eq!(counter.max_depth(), 2);
    assert_eq!(counter.deaths(), 1);
    assert_eq!(game.state().action_depth, 0);
    assert!(game.state().event_args.is_empty());
    assert_eq!(game.state().attack(berserker), 5);
}

#[test]
fn test_one_refresh_at_zero_point() {
    let mut game = started();
    let counter = Arc::new(BlockCounter::new());
    game.add_observer(counter.clone());
    let tick = game.state().tick;

    game.run_block(
        EntityId::GAME,
        vec![
            Action::GainArmor { player: P0, amount: 2 },
            Action::GainArmor { player: P1, amount: 2 },
        ],
        BlockType::Trigger,
        None,
        None,
    )
    .unwrap();
    assert_eq!(counter.refreshes(), 1);
    assert_eq!(game.state().tick, tick + 1);
}

#[test]
fn test_error_unwinds_depth() {
    let mut game = started();
    let recorder = Arc::new(Recorder::default());
    game.add_observer(recorder.clone());
    let missing = EntityId(9_999);
    let err = game
        .run_block(
            EntityId::GAME,
            vec![Action::Damage { target: missing, amount: 1 }],
            BlockType::Attack,
            None,
            None,
        )
        .unwrap_err();
    assert_eq!(err, GameError::UnknownEntity(missing));
    assert_eq!(game.state().action_depth, 0);
    assert_eq!(
        recorder.events(),
        vec![(true, BlockType::Attack, 1), (false, BlockType::Attack, 0)]
    );

    game.end_turn().unwrap();
    assert_eq!(game.state().turn, 2);
}

#[test]
fn test_deaths_wait_for_block_end() {
    let mut game = started();
    let recorder = Arc::new(Recorder::default());
    game.add_observer(recorder.clone());
    let enemy = game.player(P1).hero;
    game.state_mut().entity_mut(enemy).unwrap().set_tag(GameTag::Damage, 29);

    let results = game
        .run_block(
            EntityId::GAME,
            vec![
                Action::Damage { target: enemy, amount: 1 },
                Action::Destroy { target: enemy },
                Action::GainArmor { player: P0, amount: 5 },
            ],
            BlockType::Trigger,
            None,
            None,
        )
        .unwrap();
    assert_eq!(results.len(), 3);
    assert!(game.is_ended());
    assert_eq!(game.state().armor(game.player(P0).hero), 5);

    // The death trigger block still brackets after the game is over.
    let events = recorder.events();
    let deaths_end = events
        .iter()
        .position(|&e| e == (false, BlockType::Deaths, 0))
        .expect("deaths block closed");
    assert_eq!(
        &events[deaths_end + 1..],
        &[(true, BlockType::Trigger, 1), (false, BlockType::Trigger, 0)]
    );
}

#[test]
fn test_forks_drop_observers() {
    use ccg_mcts::mcts::SearchNode;

    let mut game = started();
    let counter = Arc::new(BlockCounter::new());
    game.add_observer(counter.clone());
    let mut fork = game.fork(&mut GameRng::new(1));
    fork.end_turn().unwrap();
    assert_eq!(counter.starts(), 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_brackets_balance_across_turns(seed in 0u64..10_000, turns in 1u32..12) {
        let mut rng = GameRng::new(seed);
        let (deck0, deck1) = (mcts_draft(&mut rng), mcts_draft(&mut rng));
        let mut game = standard_match(Arc::new(basic_set()), deck0, deck1, seed).unwrap();
        let counter = Arc::new(BlockCounter::new());
        let zero_points = Arc::new(ZeroPoints::default());
        game.add_observer(counter.clone());
        game.add_observer(zero_points.clone());
        game.start().unwrap();
        game.resolve_choices_randomly().unwrap();

        for _ in 0..turns {
            let outcome = game.play_set_turn().unwrap();
            prop_assert_eq!(game.state().action_depth, 0);
            prop_assert_eq!(counter.starts(), counter.ends());
            prop_assert!(game.state().event_args.is_empty());
            if outcome == TurnOutcome::GameEnded {
                break;
            }
        }

        // Each refresh directly follows an outermost close, and every such
        // close refreshes unless the game was already over.
        let marks = zero_points.marks();
        for (i, mark) in marks.iter().enumerate() {
            if *mark == Mark::Refreshed {
                prop_assert!(i > 0 && marks[i - 1] == Mark::ClosedAtZero);
            }
        }
        let closes = marks.iter().filter(|&&m| m == Mark::ClosedAtZero).count() as u64;
        let last_refresh = marks.iter().rposition(|&m| m == Mark::Refreshed).unwrap_or(0);
        let unrefreshed: Vec<usize> = marks
            .windows(2)
            .enumerate()
            .filter(|(_, w)| w[0] == Mark::ClosedAtZero && w[1] != Mark::Refreshed)
            .map(|(i, _)| i)
            .chain((marks.last() == Some(&Mark::ClosedAtZero)).then(|| marks.len() - 1))
            .collect();
        if game.is_ended() {
            prop_assert!(closes > counter.refreshes());
            prop_assert!(unrefreshed.iter().all(|&i| i > last_refresh));
        } else {
            prop_assert_eq!(closes, counter.refreshes());
            prop_assert!(unrefreshed.is_empty());
        }
    }
}
