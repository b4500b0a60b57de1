//! Full matches: MCTS against a random player, or random against random.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use super::decks::{mcts_draft, random_draft, standard_players};
use crate::cards::{CardClass, CardId, CardRegistry};
use crate::core::{ChoiceKind, GameConfig, GameLogger, GameRng, PlayState, PlayerId, VerbosityLevel};
use crate::error::{GameError, SearchError};
use crate::mcts::{MCTSConfig, SearchBudget, SearchNode, MCTS};
use crate::rules::{Game, GameRules, TurnOutcome, REFERENCE_PLAYER};

/// Mulligan threshold: opening cards costing more than this go back.
const MULLIGAN_ABOVE_COST: i64 = 3;

/// Settings for one driven match.
#[derive(Clone, Debug)]
pub struct MatchConfig {
    /// Rollouts per MCTS decision.
    pub rollouts: u32,
    /// Optional wall-clock cap per decision.
    pub time_limit: Option<Duration>,
    pub exploration_weight: f64,
    pub seed: u64,
    /// Play the first decision from a fresh sample instead of searching.
    pub skip_first_search: bool,
    pub verbosity: VerbosityLevel,
    pub game: GameConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rollouts: 1000,
            time_limit: None,
            exploration_weight: std::f64::consts::SQRT_2,
            seed: 42,
            skip_first_search: true,
            verbosity: VerbosityLevel::Normal,
            game: GameConfig::default(),
        }
    }
}

impl MatchConfig {
    #[must_use]
    pub fn with_rollouts(mut self, rollouts: u32) -> Self {
        self.rollouts = rollouts;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self
    }

    #[must_use]
    pub fn with_exploration_weight(mut self, weight: f64) -> Self {
        self.exploration_weight = weight;
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_game_config(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    fn search_budget(&self) -> SearchBudget {
        let budget = SearchBudget::rollouts(self.rollouts);
        match self.time_limit {
            Some(limit) => budget.with_time_limit(limit),
            None => budget,
        }
    }
}

/// Result of a match for the reference player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

impl Outcome {
    /// Process exit status for the CLI.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Outcome::Win => 0,
            Outcome::Loss => 1,
            Outcome::Tie => 2,
        }
    }

    fn of(game: &Game) -> Option<Self> {
        match game.player(REFERENCE_PLAYER).playstate {
            PlayState::Won => Some(Outcome::Win),
            PlayState::Lost => Some(Outcome::Loss),
            PlayState::Tied => Some(Outcome::Tie),
            _ => None,
        }
    }
}

/// Summary of a finished (or abandoned) match.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchReport {
    /// `None` when the match stopped before it concluded.
    pub outcome: Option<Outcome>,
    pub ended_on: Option<u32>,
    pub hero_health: [i64; 2],
    /// MCTS decisions taken.
    pub decisions: u32,
    pub rollouts: u64,
    pub abandoned: u64,
}

impl MatchReport {
    fn new(game: &Game) -> Self {
        let state = game.state();
        let health = |p: PlayerId| state.health(state.player(p).hero);
        Self {
            outcome: Outcome::of(game),
            ended_on: state.ended_on,
            hero_health: [health(PlayerId(0)), health(PlayerId(1))],
            decisions: 0,
            rollouts: 0,
            abandoned: 0,
        }
    }

    /// Exit status for the CLI; 3 when the match never concluded.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.outcome.map_or(3, Outcome::exit_code)
    }
}

/// Standard rules and default limits, seats from [`standard_players`].
pub fn standard_match(cards: Arc<CardRegistry>, deck0: Vec<CardId>, deck1: Vec<CardId>, seed: u64) -> Result<Game, GameError> {
    Game::new(
        cards,
        standard_players(deck0, deck1),
        GameConfig::default(),
        GameRules::standard(),
        seed,
    )
}

fn new_match(cards: Arc<CardRegistry>, config: &MatchConfig, random_decks: bool) -> Result<Game, GameError> {
    let mut rng = GameRng::new(config.seed).for_context("decks");
    let mut draft = || {
        if random_decks {
            random_draft(&cards, CardClass::Mage, config.game.deck_size, &mut rng)
        } else {
            mcts_draft(&mut rng)
        }
    };
    let (deck0, deck1) = (draft(), draft());
    Ok(Game::new(
        Arc::clone(&cards),
        standard_players(deck0, deck1),
        config.game.clone(),
        GameRules::standard(),
        config.seed,
    )?
    .with_logger(GameLogger::with_verbosity(config.verbosity)))
}

/// Send back every opening card costing more than three.
fn mulligan_expensive(game: &mut Game) -> Result<(), GameError> {
    for player in PlayerId::both() {
        let Some(choice) = game.player(player).choice.as_ref() else {
            continue;
        };
        if choice.kind != ChoiceKind::Mulligan {
            continue;
        }
        let picks: Vec<_> = choice
            .cards
            .iter()
            .copied()
            .filter(|&card| game.state().cost(card) > MULLIGAN_ABOVE_COST)
            .collect();
        game.choose(player, &picks)?;
    }
    Ok(())
}

fn log_heroes(game: &mut Game) {
    let state = game.state();
    let line = PlayerId::both()
        .map(|p| {
            let seat = state.player(p);
            format!("{} hero hp: {}", seat.name, state.health(seat.hero))
        })
        .collect::<Vec<_>>()
        .join(", ");
    game.logger_mut().normal("match", || line);
}

/// MCTS (seat 0) against the random turn policy (seat 1).
///
/// Before each of its turns the searcher runs its rollout budget from the
/// current state, plays the best sampled turn, and forgets the tree once the
/// opponent has replied.
pub fn play_full_mcts_game(cards: Arc<CardRegistry>, config: &MatchConfig) -> Result<MatchReport, SearchError> {
    let mut game = new_match(cards, config, false)?;
    game.start()?;
    mulligan_expensive(&mut game)?;

    let mut mcts: MCTS<Game> = MCTS::new(
        MCTSConfig::default()
            .with_exploration(config.exploration_weight)
            .with_seed(config.seed),
    );
    let (mut decisions, mut rollouts, mut abandoned) = (0u32, 0u64, 0u64);
    let mut first = true;

    while !game.is_ended() {
        if !(first && config.skip_first_search) {
            let stats = mcts.search(&game, config.search_budget())?;
            rollouts += u64::from(stats.rollouts);
            abandoned += u64::from(stats.abandoned);
        }
        first = false;

        let mut next = match mcts.choose(&game) {
            Ok(next) => next,
            Err(SearchError::TerminalNode) => break,
            Err(err) => return Err(err),
        };
        let value = mcts
            .table()
            .mean_reward(next.token())
            .map_or_else(|| "unvisited".to_string(), |v| format!("{v:.3}"));
        let nodes = mcts.table().node_count();
        next.set_logger(std::mem::take(game.logger_mut()));
        game = next;
        decisions += 1;
        game.logger_mut().normal("mcts", || {
            format!("decision {decisions}: {nodes} nodes, {rollouts} rollouts, value {value}")
        });
        log_heroes(&mut game);

        if game.is_ended() {
            break;
        }
        if game.play_set_turn()? == TurnOutcome::GameEnded {
            break;
        }
        mcts.reset();
    }

    let mut report = MatchReport::new(&game);
    report.decisions = decisions;
    report.rollouts = rollouts;
    report.abandoned = abandoned;
    Ok(report)
}

/// Both seats follow the random turn policy with random decks.
pub fn play_full_game(cards: Arc<CardRegistry>, config: &MatchConfig) -> Result<MatchReport, GameError> {
    let mut game = new_match(cards, config, true)?;
    game.start()?;
    game.resolve_choices_randomly()?;
    while game.play_set_turn()? == TurnOutcome::Continued {}
    Ok(MatchReport::new(&game))
}

/// Start a match and advance it by up to `turns` random turns.
pub fn advance_turns(cards: Arc<CardRegistry>, config: &MatchConfig, turns: u32) -> Result<(Game, MatchReport), GameError> {
    let mut game = new_match(cards, config, false)?;
    game.start()?;
    game.resolve_choices_randomly()?;
    for _ in 0..turns {
        if game.play_set_turn()? == TurnOutcome::GameEnded {
            break;
        }
    }
    let report = MatchReport::new(&game);
    Ok((game, report))
}
