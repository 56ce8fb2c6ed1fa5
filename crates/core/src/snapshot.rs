//! Snapshot module - owned, serialisable copies of the engine state

use serde::Serialize;

use crate::pieces::{GamePiece, PieceMask};
use crate::types::GamePhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PieceSnapshot {
    pub kind: &'static str,
    pub name: &'static str,
    pub value: u8,
    pub rotation: &'static str,
    pub blocks: PieceMask,
}

impl From<GamePiece> for PieceSnapshot {
    fn from(value: GamePiece) -> Self {
        Self {
            kind: value.kind().as_str(),
            name: value.name(),
            value: value.value(),
            rotation: value.rotation().as_str(),
            blocks: *value.blocks(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimerSnapshot {
    pub duration_ms: u32,
    pub remaining_ms: u32,
    pub running: bool,
}

/// Owned copy of everything a presentation layer may draw
///
/// `revision` increases with every engine mutation, so two snapshots with the
/// same revision describe the same state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub revision: u64,
    pub phase: &'static str,
    pub cols: usize,
    pub rows: usize,
    /// Cells as rows, top to bottom
    pub grid: Vec<Vec<u8>>,
    pub current: Option<PieceSnapshot>,
    pub following: Option<PieceSnapshot>,
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub multiplier: u32,
    pub seed: u32,
    pub timer: TimerSnapshot,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Active.as_str()
    }
}
