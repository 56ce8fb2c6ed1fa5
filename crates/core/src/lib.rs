//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains every rule of the game: the grid, the piece catalog,
//! placement, line clearing, scoring and the turn clock. It has **no
//! dependencies** on rendering, input, audio or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Headless**: Runs in simulations and automated players as-is
//! - **Observable**: Hosts subscribe to events or drain an event queue
//!
//! # Module Structure
//!
//! - [`grid`]: cell storage, placement legality, completed row/column scan
//! - [`pieces`]: the 15-shape catalog and in-place 3x3 rotation
//! - [`rng`]: uniform seeded piece generation
//! - [`scoring`]: clear rewards, levels and turn durations
//! - [`timer`]: the logical per-turn deadline
//! - [`game`]: the engine tying it all together
//! - [`events`], [`snapshot`]: what the engine tells the outside world
//!
//! # Game Rules
//!
//! - Pieces are placed anywhere on the grid, anchored on their centre cell,
//!   and must fit entirely on empty cells.
//! - Any complete row **or column** is cleared after a placement.
//! - A clear pays `lines * blocks * 10 * multiplier`; the multiplier grows by
//!   one per clearing placement and resets on a miss or a timeout.
//! - Every 1000 points is a level; higher levels shorten the turn clock.
//! - Letting the clock run out costs a life; the game ends with no lives left.
//!
//! # Example
//!
//! ```
//! use block_grid_core::{EngineConfig, GameEngine};
//! use block_grid_core::types::GamePhase;
//!
//! let mut game = GameEngine::with_config(EngineConfig::new(5, 5).with_seed(12345)).unwrap();
//! game.start().unwrap();
//!
//! // Try the centre; a rejected placement is simply `false`.
//! let placed = game.place_at(2, 2).unwrap();
//! assert!(placed);
//!
//! game.rotate_current().unwrap();
//! game.swap_pieces().unwrap();
//!
//! // Running out the clock three times ends the game.
//! for _ in 0..3 {
//!     game.on_turn_timeout().unwrap();
//! }
//! assert_eq!(game.phase(), GamePhase::GameOver);
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod timer;

pub use block_grid_types as types;

// Re-export commonly used types for convenience
pub use config::EngineConfig;
pub use error::GameError;
pub use events::GameEvent;
pub use game::GameEngine;
pub use grid::{CompletedLines, Grid};
pub use pieces::{create_piece, GamePiece, PieceMask};
pub use rng::{clock_seed, PieceQueue, SimpleRng};
pub use scoring::{
    calculate_clear_score, calculate_score, level_for_score, turn_duration, turn_duration_ms,
    ScoreResult,
};
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use timer::TurnTimer;
