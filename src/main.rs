//! ccg-mcts: play simulated matches from the command line.
//!
//! Exit status is the outcome for the MCTS seat: 0 win, 1 loss, 2 tie,
//! 3 on any error.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use ccg_mcts::cards::basic::basic_set;
use ccg_mcts::core::{GameConfig, VerbosityLevel};
use ccg_mcts::driver::{advance_turns, play_full_game, play_full_mcts_game, MatchConfig, MatchReport, Outcome};
use ccg_mcts::snapshot::StateDump;

const EXIT_ERROR: u8 = 3;

#[derive(Parser)]
#[command(name = "ccg-mcts")]
#[command(about = "Two-player card game engine with a Monte Carlo tree search player", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a full match, MCTS (seat 0) against a random player
    Play {
        /// Rollouts per MCTS decision
        #[arg(long, short = 'r', default_value_t = 1000)]
        rollouts: u32,

        /// Wall-clock cap per decision, in milliseconds
        #[arg(long, value_name = "MS")]
        time_limit: Option<u64>,

        /// UCT exploration weight
        #[arg(long, default_value_t = std::f64::consts::SQRT_2)]
        exploration: f64,

        /// Random seed for deterministic matches
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Search before the first decision too
        #[arg(long)]
        search_first: bool,

        /// Both seats play randomly with random decks
        #[arg(long)]
        random: bool,

        /// Turn after which the match is a tie
        #[arg(long, default_value_t = 89)]
        max_turns: u32,

        /// Verbosity level (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, short = 'v', default_value = "normal")]
        verbosity: VerbosityLevel,
    },

    /// Start a match and advance it by random turns
    Turn {
        /// Number of turns to simulate
        #[arg(long, short = 't', default_value_t = 1)]
        turns: u32,

        /// Random seed for deterministic matches
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Write a JSON dump of the final state to this file
        #[arg(long, value_name = "FILE")]
        dump: Option<PathBuf>,

        /// Verbosity level (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, short = 'v', default_value = "normal")]
        verbosity: VerbosityLevel,
    },
}

fn print_report(report: &MatchReport) {
    let outcome = match report.outcome {
        Some(Outcome::Win) => "MCTS wins",
        Some(Outcome::Loss) => "ENEMY wins",
        Some(Outcome::Tie) => "tie",
        None => "in progress",
    };
    println!("{outcome}");
    if let Some(turn) = report.ended_on {
        println!("ended on turn {turn}");
    }
    println!(
        "hero health: {} / {}",
        report.hero_health[0], report.hero_health[1]
    );
    if report.decisions > 0 {
        println!(
            "{} decisions, {} rollouts, {} abandoned",
            report.decisions, report.rollouts, report.abandoned
        );
    }
}

fn run_play(config: &MatchConfig, random: bool) -> Result<MatchReport, String> {
    let cards = Arc::new(basic_set());
    if random {
        play_full_game(cards, config).map_err(|e| e.to_string())
    } else {
        play_full_mcts_game(cards, config).map_err(|e| e.to_string())
    }
}

fn run_turns(config: &MatchConfig, turns: u32, dump: Option<PathBuf>) -> Result<MatchReport, String> {
    let (game, report) = advance_turns(Arc::new(basic_set()), config, turns).map_err(|e| e.to_string())?;
    if let Some(path) = dump {
        let json = StateDump::of(&game).to_json_pretty().map_err(|e| e.to_string())?;
        std::fs::write(&path, json).map_err(|e| format!("{}: {e}", path.display()))?;
    }
    Ok(report)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            rollouts,
            time_limit,
            exploration,
            seed,
            search_first,
            random,
            max_turns,
            verbosity,
        } => {
            let mut config = MatchConfig::default()
                .with_rollouts(rollouts)
                .with_exploration_weight(exploration)
                .with_seed(seed)
                .with_verbosity(verbosity)
                .with_game_config(GameConfig::default().with_max_turns(max_turns));
            config.skip_first_search = !search_first;
            if let Some(ms) = time_limit {
                config = config.with_time_limit(Duration::from_millis(ms));
            }
            run_play(&config, random).map(|report| (report.exit_code(), report))
        }
        Commands::Turn {
            turns,
            seed,
            dump,
            verbosity,
        } => {
            let config = MatchConfig::default().with_seed(seed).with_verbosity(verbosity);
            run_turns(&config, turns, dump).map(|report| (report.outcome.map_or(0, Outcome::exit_code), report))
        }
    };

    match result {
        Ok((code, report)) => {
            print_report(&report);
            ExitCode::from(code as u8)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
