//! Headless simulation runner (default binary).
//!
//! Plays games with an automated placement policy and reports the outcome.
//! A turn with no legal placement is let run out, costing a life.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info, LevelFilter};
use serde::Serialize;

use block_grid::core::{clock_seed, EngineConfig, GameEngine, GameEvent, GameSnapshot, SimpleRng};
use block_grid::engine::{apply_placement, best_placement, random_placement};
use block_grid::logging::init_log;
use block_grid::types::{DEFAULT_COLS, DEFAULT_ROWS, STARTING_LIVES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Policy {
    /// Highest immediate score, then most lines, then emptiest grid
    Greedy,
    /// Uniformly random legal placement
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Play block grid puzzle games without a screen.
#[derive(Debug, Parser)]
#[command(name = "block-grid-sim", version)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Lives at the start of each game
    #[arg(long, default_value_t = STARTING_LIVES)]
    lives: u32,

    /// Piece sequence seed for the first game; later games use seed+1, seed+2, ...
    #[arg(long)]
    seed: Option<u32>,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Stop a game after this many turns even if it is still running
    #[arg(long, default_value_t = 500)]
    turns: u32,

    #[arg(long, value_enum, default_value_t = Policy::Greedy)]
    policy: Policy,

    /// Print a JSON report (summary and final snapshot) per game
    #[arg(long)]
    json: bool,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    seed: u32,
    turns: u32,
    placed: u32,
    timeouts: u32,
    lines: usize,
    blocks_cleared: usize,
    score: u64,
    level: u32,
    lives: u32,
    phase: &'static str,
}

#[derive(Debug, Serialize)]
struct Report {
    summary: Summary,
    snapshot: GameSnapshot,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_log(args.log_level.into())?;

    let first_seed = args.seed.unwrap_or_else(clock_seed);
    for game in 0..args.games {
        let report = play(&args, first_seed.wrapping_add(game))?;
        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            print_summary(&report.summary);
        }
    }
    Ok(())
}

fn play(args: &Args, seed: u32) -> Result<Report> {
    let config = EngineConfig::new(args.cols, args.rows)
        .with_lives(args.lives)
        .with_seed(seed);
    let mut game = GameEngine::with_config(config)?;
    game.start()?;
    info!("seed {} on {}x{} with {:?}", seed, args.cols, args.rows, args.policy);

    // Separate stream so the random policy does not disturb the piece sequence.
    let mut policy_rng = SimpleRng::new(seed.rotate_left(16) ^ 0x5bd1_e995);
    let mut summary = Summary {
        seed,
        ..Summary::default()
    };

    while summary.turns < args.turns && game.phase().is_active() {
        summary.turns += 1;
        let choice = match args.policy {
            Policy::Greedy => best_placement(&game),
            Policy::Random => random_placement(&game, &mut policy_rng),
        };

        match choice {
            Some(placement) => {
                apply_placement(&mut game, placement)?;
                summary.placed += 1;
            }
            None => {
                debug!("no legal placement, letting the turn run out");
                game.on_turn_timeout()?;
                summary.timeouts += 1;
            }
        }

        for event in game.take_events() {
            match event {
                GameEvent::LinesCleared { blocks, lines } => {
                    summary.lines += lines;
                    summary.blocks_cleared += blocks.len();
                }
                GameEvent::GameOver { score } => info!("game over with {} points", score),
                GameEvent::NextPiece { .. } | GameEvent::LifeLost { .. } => {}
            }
        }
    }

    summary.score = game.score();
    summary.level = game.level();
    summary.lives = game.lives();
    summary.phase = game.phase().as_str();

    Ok(Report {
        summary,
        snapshot: game.snapshot(),
    })
}

fn print_summary(s: &Summary) {
    println!(
        "seed {:>10}  score {:>7}  level {:>2}  lines {:>4}  placed {:>4}  timeouts {}  lives {}  {}",
        s.seed, s.score, s.level, s.lines, s.placed, s.timeouts, s.lives, s.phase
    );
}
