//! Errors raised at the core API boundary.
//!
//! A rejected placement is not an error: it is reported as `Ok(false)`.
//! These variants cover contract violations by the host.

use thiserror::Error;

use crate::types::GamePhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// Coordinate outside the grid
    #[error("coordinate ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    /// Cell value above the largest colour id
    #[error("cell value {0} is not a valid colour id")]
    InvalidCellValue(u8),

    /// Grid built with a zero dimension
    #[error("grid dimensions {cols}x{rows} must both be positive")]
    InvalidDimensions { cols: usize, rows: usize },

    /// Mutating call outside the active phase
    #[error("operation requires an active game (phase: {phase})")]
    NotActive { phase: GamePhase },
}

pub type Result<T> = std::result::Result<T, GameError>;
