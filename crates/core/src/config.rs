use crate::types::{DEFAULT_COLS, DEFAULT_ROWS, STARTING_LIVES};

/// Settings fixed for the lifetime of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub cols: usize,
    pub rows: usize,
    pub lives: u32,
    /// Piece sequence seed; the same seed replays the same pieces
    pub seed: u32,
    /// Queue events for [`take_events`](crate::GameEngine::take_events).
    /// Hosts that only use callbacks can turn this off.
    pub record_events: bool,
}

impl EngineConfig {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            ..Self::default()
        }
    }

    pub fn with_lives(mut self, lives: u32) -> Self {
        self.lives = lives;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            lives: STARTING_LIVES,
            seed: 1,
            record_events: true,
        }
    }
}
