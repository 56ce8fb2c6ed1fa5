use std::cmp::{Ordering, Reverse};
use std::fmt;

use arrayvec::ArrayVec;
use log::debug;

use crate::core::{
    calculate_score, GameEngine, GameError, GamePiece, PieceMask, ScoreResult, SimpleRng,
};
use crate::types::GamePhase;

/// A complete move: optionally swap, rotate the current piece, then place it
///
/// Ordered by `(swap, rotations, y, x)`, which is also the planner's
/// tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placement {
    /// Swap current and following pieces first
    pub swap: bool,
    /// Clockwise quarter turns applied before placing (0..4)
    pub rotations: u8,
    pub y: i32,
    pub x: i32,
}

impl Placement {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            swap: false,
            rotations: 0,
            y,
            x,
        }
    }

    pub fn rotated(mut self, rotations: u8) -> Self {
        self.rotations = rotations % 4;
        self
    }

    pub fn swapped(mut self) -> Self {
        self.swap = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    NotPlayable,
    OutOfBounds,
    Blocked,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "not_playable",
            PlaceError::OutOfBounds | PlaceError::Blocked => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "game is not playable",
            PlaceError::OutOfBounds => "target anchor is outside the grid",
            PlaceError::Blocked => "piece does not fit at the target anchor",
        }
    }
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for PlaceError {}

impl From<GameError> for PlaceError {
    fn from(value: GameError) -> Self {
        match value {
            GameError::OutOfBounds { .. } => PlaceError::OutOfBounds,
            GameError::NotActive { .. }
            | GameError::InvalidCellValue(_)
            | GameError::InvalidDimensions { .. } => PlaceError::NotPlayable,
        }
    }
}

/// Immediate outcome of a placement, computed without touching the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub score: ScoreResult,
    /// Filled cells left on the grid after the clear
    pub remaining: usize,
}

impl Evaluation {
    fn rank(&self) -> (u64, usize, Reverse<usize>) {
        (self.score.points, self.score.lines, Reverse(self.remaining))
    }
}

/// What an applied placement did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceOutcome {
    pub placement: Placement,
    pub score: ScoreResult,
    /// Phase after the move
    pub phase: GamePhase,
}

/// The piece a placement would put down, already rotated
fn piece_for(engine: &GameEngine, placement: &Placement) -> Option<GamePiece> {
    let mut piece = if placement.swap {
        engine.following_piece()?
    } else {
        engine.current_piece()?
    };
    piece.rotate_times(placement.rotations);
    Some(piece)
}

/// Every legal placement of every distinct orientation of both pieces
pub fn enumerate_placements(engine: &GameEngine) -> Vec<Placement> {
    let mut out = Vec::new();
    if !engine.phase().is_active() {
        return out;
    }

    let grid = engine.grid();
    let pieces = [(false, engine.current_piece()), (true, engine.following_piece())];
    for (swap, piece) in pieces {
        let Some(piece) = piece else {
            continue;
        };

        let mut seen: ArrayVec<PieceMask, 4> = ArrayVec::new();
        for rotations in 0..4u8 {
            let mut rotated = piece;
            rotated.rotate_times(rotations);
            if seen.contains(rotated.blocks()) {
                continue;
            }
            seen.push(*rotated.blocks());

            for y in 0..grid.rows() as i32 {
                for x in 0..grid.cols() as i32 {
                    if grid.can_place(&rotated, x, y) {
                        out.push(Placement {
                            swap,
                            rotations,
                            y,
                            x,
                        });
                    }
                }
            }
        }
    }

    out
}

/// Score a placement on a scratch copy of the grid
///
/// Returns None if the placement is illegal.
pub fn evaluate(engine: &GameEngine, placement: &Placement) -> Option<Evaluation> {
    let piece = piece_for(engine, placement)?;
    let mut grid = engine.grid().clone();
    if !grid.place(&piece, placement.x, placement.y) {
        return None;
    }

    let completed = grid.find_completed_lines();
    let score = calculate_score(completed.lines, completed.block_count(), engine.multiplier());
    Some(Evaluation {
        score,
        remaining: grid.filled_count() - completed.block_count(),
    })
}

/// Greedy choice: most points now, then most lines, then the emptiest grid
pub fn best_placement(engine: &GameEngine) -> Option<Placement> {
    let mut best: Option<(Evaluation, Placement)> = None;

    for placement in enumerate_placements(engine) {
        let Some(eval) = evaluate(engine, &placement) else {
            continue;
        };
        let better = match &best {
            None => true,
            Some((best_eval, best_placement)) => match eval.rank().cmp(&best_eval.rank()) {
                Ordering::Greater => true,
                Ordering::Equal => placement < *best_placement,
                Ordering::Less => false,
            },
        };
        if better {
            best = Some((eval, placement));
        }
    }

    best.map(|(_, placement)| placement)
}

/// Any legal placement, chosen uniformly
pub fn random_placement(engine: &GameEngine, rng: &mut SimpleRng) -> Option<Placement> {
    let options = enumerate_placements(engine);
    if options.is_empty() {
        return None;
    }
    let i = rng.next_range(options.len() as u32) as usize;
    options.get(i).copied()
}

/// Swap, rotate and place, validating everything before the first mutation
pub fn apply_placement(
    engine: &mut GameEngine,
    placement: Placement,
) -> Result<PlaceOutcome, PlaceError> {
    if !engine.phase().is_active() {
        return Err(PlaceError::NotPlayable);
    }
    if !engine.grid().contains(placement.x, placement.y) {
        return Err(PlaceError::OutOfBounds);
    }

    let piece = piece_for(engine, &placement).ok_or(PlaceError::NotPlayable)?;
    if !engine.grid().can_place(&piece, placement.x, placement.y) {
        return Err(PlaceError::Blocked);
    }

    if placement.swap {
        engine.swap_pieces()?;
    }
    for _ in 0..placement.rotations % 4 {
        engine.rotate_current()?;
    }

    if !engine.place_at(placement.x, placement.y)? {
        return Err(PlaceError::Blocked);
    }

    let score = engine.last_score().unwrap_or_default();
    debug!(
        "applied {:?}: {} line(s) for {} points",
        placement, score.lines, score.points
    );
    Ok(PlaceOutcome {
        placement,
        score,
        phase: engine.phase(),
    })
}
