//! MCTS integration tests.
//!
//! The search runs against both a toy race game, small enough to check the
//! statistics exactly, and real matches from the basic set.

use std::sync::Arc;

use proptest::prelude::*;

use ccg_mcts::cards::basic::basic_set;
use ccg_mcts::core::{GameRng, NodeToken, PlayerId};
use ccg_mcts::driver::{mcts_draft, standard_match};
use ccg_mcts::error::{GameError, SearchError};
use ccg_mcts::mcts::{MCTSConfig, SearchBudget, SearchNode, MCTS};
use ccg_mcts::rules::Game;

// =============================================================================
// Toy game
// =============================================================================

/// Players alternately advance a counter by 1 or 2; whoever reaches the
/// target wins.
#[derive(Clone, Debug)]
struct Race {
    token: NodeToken,
    total: u32,
    target: u32,
    to_move: u8,
    rng: GameRng,
}

impl Race {
    fn new(target: u32, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        Self {
            token: NodeToken::random(&mut rng),
            total: 0,
            target,
            to_move: 0,
            rng,
        }
    }
}

impl SearchNode for Race {
    fn token(&self) -> NodeToken {
        self.token
    }

    fn is_terminal(&self) -> bool {
        self.total >= self.target
    }

    fn reward(&self) -> Result<f64, SearchError> {
        if !self.is_terminal() {
            return Err(SearchError::NonTerminalReward);
        }
        // The player who just moved reached the target.
        Ok(if self.to_move == 1 { 1.0 } else { 0.0 })
    }

    fn reference_to_move(&self) -> bool {
        self.to_move == 0
    }

    fn fork(&self, rng: &mut GameRng) -> Self {
        let mut child = self.clone();
        child.rng = rng.fork();
        child.token = NodeToken::random(rng);
        child
    }

    fn play_turn(&mut self) -> Result<(), GameError> {
        self.total += 1 + self.rng.gen_index(2) as u32;
        self.to_move ^= 1;
        Ok(())
    }
}

#[test]
fn test_race_root_visits_match_rollouts() {
    let root = Race::new(9, 1);
    let mut mcts = MCTS::new(MCTSConfig::default().with_children_per_expansion(3));
    let stats = mcts.search(&root, SearchBudget::rollouts(50)).unwrap();
    assert_eq!(stats.rollouts, 50);

    let table = mcts.table();
    assert_eq!(table.visits(root.token()), 50);
    let children = table.children(root.token()).unwrap();
    assert_eq!(children.len(), 3);
    let child_visits: u32 = children.iter().map(|&c| table.visits(c)).sum();
    assert_eq!(child_visits, 49);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every rollout after the first hands the root the negation of what
    /// its child received, so the sums cancel down to the first reward.
    #[test]
    fn prop_backpropagation_alternates_sign(seed in 0u64..100_000, target in 2u32..15, rollouts in 1u32..60) {
        let root = Race::new(target, seed);
        let mut mcts = MCTS::new(
            MCTSConfig::default()
                .with_seed(seed)
                .with_children_per_expansion(3),
        );
        mcts.search(&root, SearchBudget::rollouts(rollouts)).unwrap();

        let table = mcts.table();
        let children = table.children(root.token()).unwrap_or_default();
        let child_sum: f64 = children.iter().map(|&c| table.reward(c)).sum();
        let first = table.reward(root.token()) + child_sum;
        prop_assert!(
            [-1.0, 0.0, 1.0].iter().any(|r| (first - r).abs() < 1e-9),
            "first reward {} is not a game result",
            first
        );
    }
}

// =============================================================================
// Real matches
// =============================================================================

fn opening(seed: u64) -> Game {
    let mut rng = GameRng::new(seed);
    let (deck0, deck1) = (mcts_draft(&mut rng), mcts_draft(&mut rng));
    let mut game = standard_match(Arc::new(basic_set()), deck0, deck1, seed).unwrap();
    game.start().unwrap();
    game.resolve_choices_randomly().unwrap();
    game
}

#[test]
fn test_find_children_are_distinct_samples() {
    let root = opening(11);
    let mut rng = GameRng::new(2);
    let children = root.find_children(4, &mut rng).unwrap();

    assert_eq!(children.len(), 4);
    let mut tokens: Vec<NodeToken> = children.iter().map(SearchNode::token).collect();
    assert!(!tokens.contains(&root.token()));
    tokens.sort_by_key(|t| t.0);
    tokens.dedup();
    assert_eq!(tokens.len(), 4);

    for child in &children {
        assert!(child.is_ended() || child.current_player() == PlayerId(1));
    }
    assert_eq!(root.state().turn, 1);
    assert_eq!(root.current_player(), PlayerId(0));
}

#[test]
fn test_reward_only_on_terminal() {
    let mut game = opening(3);
    assert!(!game.is_terminal());
    assert_eq!(game.reward(), Err(SearchError::NonTerminalReward));

    game.concede(PlayerId(1)).unwrap();
    assert!(game.is_terminal());
    assert_eq!(game.reward(), Ok(1.0));
}

#[test]
fn test_reference_player_to_move() {
    let mut game = opening(4);
    assert!(game.reference_to_move());
    game.end_turn().unwrap();
    assert!(!game.reference_to_move());
}

#[test]
fn test_search_then_reset_leaves_root_untouched() {
    let root = opening(5);
    let token = root.token();
    let mut mcts = MCTS::new(MCTSConfig::default().with_children_per_expansion(4));

    let stats = mcts.search(&root, SearchBudget::rollouts(100)).unwrap();
    assert_eq!(stats.rollouts + stats.abandoned, 100);
    assert!(!mcts.table().is_empty());

    mcts.reset();
    assert!(mcts.table().is_empty());
    assert_eq!(root.token(), token);
    assert_eq!(root.state().turn, 1);
    assert_eq!(root.player(PlayerId(0)).field.len(), 0);
}

#[test]
fn test_choose_prefers_well_visited_children() {
    let root = opening(6);
    let mut mcts = MCTS::new(MCTSConfig::default().with_children_per_expansion(4));
    mcts.search(&root, SearchBudget::rollouts(60)).unwrap();

    let chosen = mcts.choose(&root).unwrap();
    let table = mcts.table();
    let children = table.children(root.token()).unwrap();
    assert!(children.contains(&chosen.token()));
    if children.iter().any(|&c| table.visits(c) >= 5) {
        assert!(table.visits(chosen.token()) >= 5);
    }
}

#[test]
fn test_choose_on_finished_game_fails() {
    let mut game = opening(7);
    game.concede(PlayerId(0)).unwrap();
    let mut mcts = MCTS::new(MCTSConfig::default());
    assert_eq!(mcts.choose(&game).unwrap_err(), SearchError::TerminalNode);
}

#[test]
fn test_search_is_reproducible_by_seed() {
    let root = opening(8);
    let run = |seed: u64| {
        let mut mcts = MCTS::new(MCTSConfig::default().with_seed(seed).with_children_per_expansion(3));
        mcts.search(&root, SearchBudget::rollouts(30)).unwrap();
        let chosen = mcts.choose(&root).unwrap();
        (chosen.token(), mcts.table().visits(chosen.token()))
    };
    assert_eq!(run(21), run(21));
}
