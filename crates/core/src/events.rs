//! Events emitted by the engine for presentation-side collaborators.
//!
//! Hosts can either subscribe callbacks or drain the queue with
//! [`GameEngine::take_events`](crate::GameEngine::take_events). Both see the
//! same events in the same order.

use std::collections::BTreeSet;
use std::fmt;

use crate::pieces::GamePiece;
use crate::types::Coord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The piece pair changed after a placement or a timeout
    NextPiece {
        current: GamePiece,
        following: GamePiece,
    },
    /// Blocks about to be emptied by a clear
    LinesCleared {
        blocks: BTreeSet<Coord>,
        lines: usize,
    },
    /// A turn ran out
    LifeLost { lives: u32 },
    /// The last life was lost
    GameOver { score: u64 },
}

type NextPieceFn = Box<dyn FnMut(&GamePiece, &GamePiece)>;
type LinesClearedFn = Box<dyn FnMut(&BTreeSet<Coord>)>;

/// Registered callbacks, invoked in registration order
#[derive(Default)]
pub(crate) struct Subscribers {
    next_piece: Vec<NextPieceFn>,
    lines_cleared: Vec<LinesClearedFn>,
}

impl Subscribers {
    pub(crate) fn add_next_piece(&mut self, f: NextPieceFn) {
        self.next_piece.push(f);
    }

    pub(crate) fn add_lines_cleared(&mut self, f: LinesClearedFn) {
        self.lines_cleared.push(f);
    }

    pub(crate) fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::NextPiece { current, following } => {
                for f in &mut self.next_piece {
                    f(current, following);
                }
            }
            GameEvent::LinesCleared { blocks, .. } => {
                for f in &mut self.lines_cleared {
                    f(blocks);
                }
            }
            GameEvent::LifeLost { .. } | GameEvent::GameOver { .. } => {}
        }
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("next_piece", &self.next_piece.len())
            .field("lines_cleared", &self.lines_cleared.len())
            .finish()
    }
}
