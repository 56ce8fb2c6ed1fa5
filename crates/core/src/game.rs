//! Game engine module - orchestrates the grid, the piece pair and scoring
//!
//! The engine owns one [`Grid`] and the current/following piece pair. All
//! player-facing operations run synchronously to completion; results are
//! returned to the caller and announced through [`GameEvent`]s.
//!
//! Lifecycle: `NotStarted -> Active -> GameOver`. Mutating calls outside the
//! active phase fail with [`GameError::NotActive`].

use std::collections::BTreeSet;
use std::time::Duration;

use log::{debug, info};

use crate::config::EngineConfig;
use crate::error::{GameError, Result};
use crate::events::{GameEvent, Subscribers};
use crate::grid::Grid;
use crate::pieces::GamePiece;
use crate::rng::{clock_seed, PieceQueue};
use crate::scoring::{calculate_score, level_for_score, turn_duration, ScoreResult};
use crate::snapshot::{GameSnapshot, PieceSnapshot, TimerSnapshot};
use crate::timer::TurnTimer;
use crate::types::{Coord, GamePhase, STARTING_MULTIPLIER};

/// Complete game state
#[derive(Debug)]
pub struct GameEngine {
    config: EngineConfig,
    grid: Grid,
    queue: PieceQueue,
    current: Option<GamePiece>,
    following: Option<GamePiece>,
    phase: GamePhase,
    score: u64,
    level: u32,
    lives: u32,
    multiplier: u32,
    timer: TurnTimer,
    /// Bumped on every mutation; exported in snapshots.
    revision: u64,
    /// Score breakdown of the most recent placement.
    last_score: Option<ScoreResult>,
    events: Vec<GameEvent>,
    subscribers: Subscribers,
}

impl GameEngine {
    /// Create a game on an empty `cols x rows` grid with an unpredictable piece sequence
    pub fn new(cols: usize, rows: usize) -> Result<Self> {
        Self::with_config(EngineConfig::new(cols, rows).with_seed(clock_seed()))
    }

    /// Create a game from explicit settings
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        let grid = Grid::new(config.cols, config.rows)?;
        Ok(Self::with_grid(grid, config))
    }

    /// Create a game on a prepared grid (puzzle setups, replays)
    ///
    /// The grid's own dimensions win over `config.cols`/`config.rows`.
    pub fn with_grid(grid: Grid, config: EngineConfig) -> Self {
        let config = EngineConfig {
            cols: grid.cols(),
            rows: grid.rows(),
            ..config
        };
        Self {
            grid,
            queue: PieceQueue::new(config.seed),
            current: None,
            following: None,
            phase: GamePhase::NotStarted,
            score: 0,
            level: 0,
            lives: config.lives,
            multiplier: STARTING_MULTIPLIER,
            timer: TurnTimer::for_level(0),
            revision: 0,
            last_score: None,
            events: Vec::new(),
            subscribers: Subscribers::default(),
            config,
        }
    }

    /// Start the game and spawn the first piece pair
    ///
    /// Starting a game that is already running does nothing.
    pub fn start(&mut self) -> Result<()> {
        match self.phase {
            GamePhase::Active => return Ok(()),
            GamePhase::GameOver => return Err(self.not_active()),
            GamePhase::NotStarted => {}
        }

        info!(
            "starting game on {}x{} grid (seed {})",
            self.grid.cols(),
            self.grid.rows(),
            self.queue.seed()
        );
        let current = self.spawn_piece();
        let following = self.spawn_piece();
        self.current = Some(current);
        self.following = Some(following);
        self.phase = GamePhase::Active;
        self.timer.restart(self.level);
        self.revision += 1;
        self.emit(GameEvent::NextPiece { current, following });
        Ok(())
    }

    /// Throw the current game away and start again with the same piece sequence
    pub fn restart(&mut self) -> Result<()> {
        info!("restarting game (previous score {})", self.score);
        self.grid.reset();
        self.queue.reset();
        self.current = None;
        self.following = None;
        self.phase = GamePhase::NotStarted;
        self.score = 0;
        self.level = 0;
        self.lives = self.config.lives;
        self.multiplier = STARTING_MULTIPLIER;
        self.timer = TurnTimer::for_level(0);
        self.last_score = None;
        self.revision += 1;
        self.start()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Copy of the piece the player is about to place
    pub fn current_piece(&self) -> Option<GamePiece> {
        self.current
    }

    /// Copy of the piece that comes after the current one
    pub fn following_piece(&self) -> Option<GamePiece> {
        self.following
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Value of a grid cell
    pub fn grid_value(&self, x: i32, y: i32) -> Result<u8> {
        self.grid.value(x, y)
    }

    pub fn timer(&self) -> &TurnTimer {
        &self.timer
    }

    /// Length of a turn at the current level
    pub fn turn_duration(&self) -> Duration {
        turn_duration(self.level)
    }

    /// Score breakdown of the most recent successful placement
    pub fn last_score(&self) -> Option<ScoreResult> {
        self.last_score
    }

    /// Draw a fresh piece from the sequence, uniformly over the catalog
    pub fn spawn_piece(&mut self) -> GamePiece {
        self.queue.draw()
    }

    /// Place the current piece centred on (x, y)
    ///
    /// Returns `Ok(false)` when the piece does not fit; nothing changes and the
    /// caller may try elsewhere. On success the pieces advance, completed lines
    /// are cleared and scored, and a new turn begins.
    pub fn place_at(&mut self, x: i32, y: i32) -> Result<bool> {
        self.ensure_active()?;
        if !self.grid.contains(x, y) {
            return Err(GameError::OutOfBounds { x, y });
        }
        let Some(piece) = self.current else {
            return Ok(false);
        };

        if !self.grid.place(&piece, x, y) {
            debug!("rejected {} at ({}, {})", piece, x, y);
            return Ok(false);
        }

        debug!("placed {} at ({}, {})", piece, x, y);
        self.revision += 1;
        self.advance_piece();
        self.after_piece();
        self.timer.restart(self.level);
        Ok(true)
    }

    /// Rotate the current piece 90° clockwise
    pub fn rotate_current(&mut self) -> Result<()> {
        self.ensure_active()?;
        if let Some(piece) = self.current.as_mut() {
            piece.rotate();
            self.revision += 1;
        }
        Ok(())
    }

    /// Rotate the current piece 90° counter-clockwise
    pub fn rotate_current_ccw(&mut self) -> Result<()> {
        self.ensure_active()?;
        if let Some(piece) = self.current.as_mut() {
            piece.rotate_ccw();
            self.revision += 1;
        }
        Ok(())
    }

    /// Exchange the current and following pieces
    pub fn swap_pieces(&mut self) -> Result<()> {
        self.ensure_active()?;
        std::mem::swap(&mut self.current, &mut self.following);
        self.revision += 1;
        Ok(())
    }

    /// The turn ran out: lose a life and move on to the next piece
    ///
    /// Returns the phase after the timeout, `GameOver` once no lives remain.
    pub fn on_turn_timeout(&mut self) -> Result<GamePhase> {
        self.ensure_active()?;
        self.expire_turn();
        Ok(self.phase)
    }

    /// Feed elapsed time to the turn timer
    ///
    /// Returns true if the turn expired during this tick. Does nothing unless
    /// the game is active.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.phase.is_active() {
            return false;
        }
        if self.timer.tick(elapsed_ms) {
            self.expire_turn();
            return true;
        }
        false
    }

    /// Register a callback for piece pair changes
    pub fn on_next_piece(&mut self, f: impl FnMut(&GamePiece, &GamePiece) + 'static) {
        self.subscribers.add_next_piece(Box::new(f));
    }

    /// Register a callback for cleared blocks
    pub fn on_lines_cleared(&mut self, f: impl FnMut(&BTreeSet<Coord>) + 'static) {
        self.subscribers.add_lines_cleared(Box::new(f));
    }

    /// Take every event queued since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Owned copy of the observable state
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            revision: self.revision,
            phase: self.phase.as_str(),
            cols: self.grid.cols(),
            rows: self.grid.rows(),
            grid: self.grid.to_rows(),
            current: self.current.map(PieceSnapshot::from),
            following: self.following.map(PieceSnapshot::from),
            score: self.score,
            level: self.level,
            lives: self.lives,
            multiplier: self.multiplier,
            seed: self.queue.seed(),
            timer: TimerSnapshot {
                duration_ms: self.timer.duration_ms(),
                remaining_ms: self.timer.remaining_ms(),
                running: self.timer.is_running(),
            },
        }
    }

    fn not_active(&self) -> GameError {
        GameError::NotActive { phase: self.phase }
    }

    fn ensure_active(&self) -> Result<()> {
        if self.phase.is_active() {
            Ok(())
        } else {
            Err(self.not_active())
        }
    }

    /// current <- following, following <- fresh piece
    fn advance_piece(&mut self) {
        let following = self.spawn_piece();
        let current = self
            .following
            .replace(following)
            .unwrap_or_else(|| self.queue.draw());
        self.current = Some(current);
        self.emit(GameEvent::NextPiece { current, following });
    }

    /// Clear completed lines and update multiplier, score and level
    fn after_piece(&mut self) -> ScoreResult {
        let completed = self.grid.find_completed_lines();
        if !completed.is_empty() {
            debug!(
                "clearing {} line(s), {} block(s)",
                completed.lines,
                completed.block_count()
            );
            self.emit(GameEvent::LinesCleared {
                blocks: completed.blocks.clone(),
                lines: completed.lines,
            });
            self.grid.clear(&completed.blocks);
        }

        let result = calculate_score(completed.lines, completed.block_count(), self.multiplier);
        self.multiplier = result.multiplier;
        self.add_score(result.points);
        self.last_score = Some(result);
        result
    }

    fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
        let level = level_for_score(self.score);
        if level != self.level {
            info!("reached level {} (score {})", level, self.score);
        }
        self.level = level;
    }

    fn expire_turn(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.revision += 1;
        debug!("turn expired, {} lives left", self.lives);
        self.advance_piece();
        self.multiplier = STARTING_MULTIPLIER;
        self.emit(GameEvent::LifeLost { lives: self.lives });

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.timer.stop();
            info!("game over with score {}", self.score);
            self.emit(GameEvent::GameOver { score: self.score });
        } else {
            self.timer.restart(self.level);
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.subscribers.notify(&event);
        if self.config.record_events {
            self.events.push(event);
        }
    }

    /// Replace the current piece (test setup)
    #[cfg(test)]
    pub(crate) fn set_current(&mut self, piece: GamePiece) {
        self.current = Some(piece);
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::with_grid(Grid::default(), EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::types::PieceKind;

    fn active_game(seed: u32) -> GameEngine {
        let mut game = GameEngine::with_config(EngineConfig::default().with_seed(seed)).unwrap();
        game.start().unwrap();
        game
    }

    #[test]
    fn test_new_game_state() {
        let game = GameEngine::with_config(EngineConfig::default()).unwrap();

        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 0);
        assert_eq!(game.lives(), 3);
        assert_eq!(game.multiplier(), 1);
        assert!(game.current_piece().is_none());
        assert!(game.following_piece().is_none());
        assert!(!game.timer().is_running());
    }

    #[test]
    fn test_zero_sized_grid_is_rejected() {
        assert!(matches!(
            GameEngine::new(0, 5),
            Err(GameError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            GameEngine::with_config(EngineConfig::new(usize::MAX / 2 + 1, 2)),
            Err(GameError::InvalidDimensions { rows: 2, .. })
        ));
    }

    #[test]
    fn test_game_start() {
        let mut game = GameEngine::default();
        game.start().unwrap();

        assert_eq!(game.phase(), GamePhase::Active);
        assert!(game.current_piece().is_some());
        assert!(game.following_piece().is_some());
        assert!(game.timer().is_running());

        let events = game.take_events();
        assert!(matches!(events.as_slice(), [GameEvent::NextPiece { .. }]));

        // Starting twice keeps the same pieces.
        let current = game.current_piece();
        game.start().unwrap();
        assert_eq!(game.current_piece(), current);
    }

    #[test]
    fn test_operations_require_active_game() {
        let mut game = GameEngine::default();
        let err = GameError::NotActive {
            phase: GamePhase::NotStarted,
        };
        assert_eq!(game.place_at(2, 2), Err(err));
        assert_eq!(game.rotate_current(), Err(err));
        assert_eq!(game.swap_pieces(), Err(err));
        assert_eq!(game.on_turn_timeout(), Err(err));
        assert!(!game.tick(100_000));
    }

    #[test]
    fn test_place_advances_pieces() {
        let mut game = active_game(3);
        game.set_current(GamePiece::new(PieceKind::Dot));
        let following = game.following_piece();
        game.take_events();

        assert_eq!(game.place_at(2, 2), Ok(true));
        assert_eq!(game.grid_value(2, 2), Ok(PieceKind::Dot.value()));
        assert_eq!(game.current_piece(), following);

        let events = game.take_events();
        match events.as_slice() {
            [GameEvent::NextPiece { current, following }] => {
                assert_eq!(Some(*current), game.current_piece());
                assert_eq!(Some(*following), game.following_piece());
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn test_rejected_place_changes_nothing() {
        let mut game = active_game(3);
        game.set_current(GamePiece::new(PieceKind::Plus));
        game.grid_mut().set(2, 2, 5).unwrap();
        let before = game.snapshot();
        game.take_events();

        assert_eq!(game.place_at(2, 2), Ok(false));
        // Plus needs its arms on the board.
        assert_eq!(game.place_at(0, 0), Ok(false));

        assert_eq!(game.snapshot(), before);
        assert!(game.take_events().is_empty());
    }

    #[test]
    fn test_place_outside_grid_is_an_error() {
        let mut game = active_game(3);
        assert_eq!(
            game.place_at(5, 0),
            Err(GameError::OutOfBounds { x: 5, y: 0 })
        );
        assert_eq!(
            game.place_at(-1, 2),
            Err(GameError::OutOfBounds { x: -1, y: 2 })
        );
    }

    #[test]
    fn test_row_clear_scenario() {
        let mut game = active_game(11);
        // Row 2 filled except the three cells a Line covers around (2, 2).
        game.grid_mut().set(0, 2, 7).unwrap();
        game.grid_mut().set(4, 2, 7).unwrap();
        game.set_current(GamePiece::new(PieceKind::Line));

        let cleared = Rc::new(RefCell::new(BTreeSet::new()));
        let sink = Rc::clone(&cleared);
        game.on_lines_cleared(move |blocks| sink.borrow_mut().extend(blocks.iter().copied()));

        assert_eq!(game.place_at(2, 2), Ok(true));

        let expected: BTreeSet<Coord> = (0..5).map(|x| Coord::new(x, 2)).collect();
        assert_eq!(*cleared.borrow(), expected);
        assert_eq!(game.multiplier(), 2);
        assert_eq!(game.score(), 100);
        assert_eq!(game.level(), 0);
        for x in 0..5 {
            assert_eq!(game.grid_value(x, 2), Ok(0));
        }
        assert_eq!(
            game.last_score(),
            Some(ScoreResult {
                lines: 1,
                blocks: 5,
                multiplier: 2,
                points: 100
            })
        );
    }

    #[test]
    fn test_miss_resets_multiplier() {
        let mut game = active_game(11);
        game.multiplier = 4;
        game.set_current(GamePiece::new(PieceKind::Dot));

        assert_eq!(game.place_at(0, 0), Ok(true));
        assert_eq!(game.multiplier(), 1);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_level_follows_score() {
        let mut game = active_game(11);
        game.score = 950;
        game.grid_mut().set(0, 2, 7).unwrap();
        game.grid_mut().set(4, 2, 7).unwrap();
        game.set_current(GamePiece::new(PieceKind::Line));

        assert_eq!(game.place_at(2, 2), Ok(true));
        assert_eq!(game.score(), 1050);
        assert_eq!(game.level(), 1);
        assert_eq!(game.timer().duration_ms(), 11_500);
    }

    #[test]
    fn test_rotate_current_leaves_grid_alone() {
        let mut game = active_game(5);
        game.set_current(GamePiece::new(PieceKind::L));
        let grid = game.grid().clone();

        game.rotate_current().unwrap();
        let piece = game.current_piece().unwrap();
        assert_eq!(piece.rotation(), crate::types::Rotation::East);
        assert_eq!(game.grid(), &grid);

        game.rotate_current_ccw().unwrap();
        assert_eq!(game.current_piece(), Some(GamePiece::new(PieceKind::L)));
    }

    #[test]
    fn test_swap_twice_restores_pieces() {
        let mut game = active_game(8);
        let current = game.current_piece();
        let following = game.following_piece();

        game.swap_pieces().unwrap();
        assert_eq!(game.current_piece(), following);
        assert_eq!(game.following_piece(), current);

        game.swap_pieces().unwrap();
        assert_eq!(game.current_piece(), current);
        assert_eq!(game.following_piece(), following);
    }

    #[test]
    fn test_timeout_costs_a_life() {
        let mut game = active_game(2);
        game.multiplier = 3;
        let following = game.following_piece();

        assert_eq!(game.on_turn_timeout(), Ok(GamePhase::Active));
        assert_eq!(game.lives(), 2);
        assert_eq!(game.multiplier(), 1);
        assert_eq!(game.current_piece(), following);
        assert!(game.timer().is_running());
    }

    #[test]
    fn test_last_life_ends_the_game() {
        let mut game = active_game(2);
        game.lives = 1;

        assert_eq!(game.on_turn_timeout(), Ok(GamePhase::GameOver));
        assert_eq!(game.lives(), 0);
        assert!(!game.timer().is_running());
        assert!(matches!(
            game.take_events().last(),
            Some(GameEvent::GameOver { score: 0 })
        ));

        let before = game.snapshot();
        let err = GameError::NotActive {
            phase: GamePhase::GameOver,
        };
        assert_eq!(game.place_at(2, 2), Err(err));
        assert_eq!(game.rotate_current(), Err(err));
        assert_eq!(game.swap_pieces(), Err(err));
        assert_eq!(game.on_turn_timeout(), Err(err));
        assert_eq!(game.start(), Err(err));
        assert!(!game.tick(1_000_000));
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_tick_expires_turn() {
        let mut game = active_game(4);
        assert!(!game.tick(11_984));
        assert_eq!(game.lives(), 3);
        assert!(game.tick(16));
        assert_eq!(game.lives(), 2);
        assert_eq!(game.timer().remaining_ms(), 12_000);
    }

    #[test]
    fn test_successful_place_restarts_timer() {
        let mut game = active_game(4);
        game.tick(5_000);
        game.set_current(GamePiece::new(PieceKind::Dot));
        assert_eq!(game.place_at(1, 1), Ok(true));
        assert_eq!(game.timer().remaining_ms(), 12_000);
    }

    #[test]
    fn test_next_piece_subscription() {
        let mut game = GameEngine::with_config(EngineConfig::default().with_seed(6)).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        game.on_next_piece(move |current, following| sink.borrow_mut().push((*current, *following)));

        game.start().unwrap();
        game.on_turn_timeout().unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].0, seen[0].1);
        assert_eq!(Some(seen[1].0), game.current_piece());
    }

    #[test]
    fn test_events_can_be_disabled() {
        let config = EngineConfig {
            record_events: false,
            ..EngineConfig::default()
        };
        let mut game = GameEngine::with_config(config).unwrap();
        game.start().unwrap();
        assert!(game.take_events().is_empty());
    }

    #[test]
    fn test_same_seed_same_pieces() {
        let a = active_game(42);
        let b = active_game(42);
        assert_eq!(a.current_piece(), b.current_piece());
        assert_eq!(a.following_piece(), b.following_piece());
    }

    #[test]
    fn test_restart_replays_sequence() {
        let mut game = active_game(42);
        let first = (game.current_piece(), game.following_piece());
        game.lives = 1;
        game.on_turn_timeout().unwrap();
        assert_eq!(game.phase(), GamePhase::GameOver);

        game.restart().unwrap();
        assert_eq!(game.phase(), GamePhase::Active);
        assert_eq!(game.lives(), 3);
        assert_eq!(game.score(), 0);
        assert_eq!((game.current_piece(), game.following_piece()), first);
    }

    #[test]
    fn test_snapshot_revision_tracks_mutations() {
        let mut game = active_game(1);
        let r0 = game.snapshot().revision;
        game.rotate_current().unwrap();
        let r1 = game.snapshot().revision;
        assert!(r1 > r0);
        assert!(game.snapshot().playable());
        assert_eq!(game.snapshot().grid.len(), 5);
    }
}
