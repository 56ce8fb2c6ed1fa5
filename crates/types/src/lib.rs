//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, planners, headless hosts, renderers).
//!
//! # Grid Dimensions
//!
//! The playfield is a rectangular grid whose size is chosen at construction time.
//! The default challenge board is 5x5:
//!
//! - **Columns**: `x` in `0..cols` (left to right)
//! - **Rows**: `y` in `0..rows` (top to bottom)
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `PIECE_SIZE` | 3 | Every piece mask is 3x3 |
//! | `PIECE_COUNT` | 15 | Number of shapes in the catalog |
//! | `STARTING_LIVES` | 3 | Lives at the start of a game |
//! | `POINTS_PER_BLOCK` | 10 | Base points per cleared block |
//! | `SCORE_PER_LEVEL` | 1000 | Score needed per level |
//!
//! # Turn Timing
//!
//! Each turn has a deadline that shrinks with the level (milliseconds):
//!
//! | Level | Turn |
//! |-------|------|
//! | 0 | 12000ms |
//! | 1 | 11500ms |
//! | 10 | 7000ms |
//! | 19+ | 2500ms (floor) |
//!
//! # Examples
//!
//! ```
//! use block_grid_types::{Coord, PieceKind, Rotation, PIECE_COUNT};
//!
//! let kind = PieceKind::from_index(2).unwrap();
//! assert_eq!(kind, PieceKind::Plus);
//! assert_eq!(kind.value(), 3);
//!
//! let parsed = PieceKind::from_str("inverse-corner").unwrap();
//! assert_eq!(parsed, PieceKind::InverseCorner);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(PieceKind::ALL.len(), PIECE_COUNT);
//! assert!(Coord::new(1, 0) > Coord::new(0, 4));
//! ```

use std::fmt;

/// Default number of columns for a new game
pub const DEFAULT_COLS: usize = 5;

/// Default number of rows for a new game
pub const DEFAULT_ROWS: usize = 5;

/// Width and height of every piece mask
pub const PIECE_SIZE: usize = 3;

/// Offset from a mask index to the piece centre (integer division)
pub const PIECE_OFFSET: i32 = (PIECE_SIZE / 2) as i32;

/// Number of shapes in the piece catalog
pub const PIECE_COUNT: usize = 15;

/// Largest colour id a cell can hold (ids are `index + 1`)
pub const MAX_CELL_VALUE: u8 = PIECE_COUNT as u8;

/// Value of an empty cell
pub const EMPTY_CELL: u8 = 0;

/// Lives at the start of a game
pub const STARTING_LIVES: u32 = 3;

/// Multiplier at the start of a game and after a miss
pub const STARTING_MULTIPLIER: u32 = 1;

/// Base points for every cleared block, per cleared line
pub const POINTS_PER_BLOCK: u64 = 10;

/// Score needed to gain one level
pub const SCORE_PER_LEVEL: u64 = 1000;

/// Turn duration at level 0 (12 seconds)
pub const BASE_TURN_MS: u32 = 12_000;

/// Turn duration lost per level (half a second)
pub const TURN_STEP_MS: u32 = 500;

/// Shortest possible turn (2.5 seconds)
pub const MIN_TURN_MS: u32 = 2_500;


/// The fifteen piece shapes
///
/// Each kind has a fixed catalog index and a colour id (`index + 1`) that is
/// written into every grid cell the piece covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Line,
    C,
    Plus,
    Dot,
    Square,
    L,
    J,
    S,
    Z,
    T,
    X,
    Corner,
    InverseCorner,
    Double,
    Triple,
}

impl PieceKind {
    /// Every kind, in catalog order
    pub const ALL: [PieceKind; PIECE_COUNT] = [
        PieceKind::Line,
        PieceKind::C,
        PieceKind::Plus,
        PieceKind::Dot,
        PieceKind::Square,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::X,
        PieceKind::Corner,
        PieceKind::InverseCorner,
        PieceKind::Double,
        PieceKind::Triple,
    ];

    /// Look up a kind by catalog index
    ///
    /// # Examples
    ///
    /// ```
    /// use block_grid_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(0), Some(PieceKind::Line));
    /// assert_eq!(PieceKind::from_index(14), Some(PieceKind::Triple));
    /// assert_eq!(PieceKind::from_index(15), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Catalog index (0..15)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Colour id written into the grid (1..=15)
    pub fn value(&self) -> u8 {
        self.index() as u8 + 1
    }

    /// Parse a kind from its name (case-insensitive, `-`, `_` and spaces ignored)
    pub fn from_str(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "line" => Some(PieceKind::Line),
            "c" => Some(PieceKind::C),
            "plus" => Some(PieceKind::Plus),
            "dot" => Some(PieceKind::Dot),
            "square" => Some(PieceKind::Square),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "t" => Some(PieceKind::T),
            "x" => Some(PieceKind::X),
            "corner" => Some(PieceKind::Corner),
            "inversecorner" => Some(PieceKind::InverseCorner),
            "double" => Some(PieceKind::Double),
            "triple" => Some(PieceKind::Triple),
            _ => None,
        }
    }

    /// Lowercase kebab-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Line => "line",
            PieceKind::C => "c",
            PieceKind::Plus => "plus",
            PieceKind::Dot => "dot",
            PieceKind::Square => "square",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
            PieceKind::X => "x",
            PieceKind::Corner => "corner",
            PieceKind::InverseCorner => "inverse-corner",
            PieceKind::Double => "double",
            PieceKind::Triple => "triple",
        }
    }

    /// Display name shown to players
    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::Line => "Line",
            PieceKind::C => "C",
            PieceKind::Plus => "Plus",
            PieceKind::Dot => "Dot",
            PieceKind::Square => "Square",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::T => "T",
            PieceKind::X => "X",
            PieceKind::Corner => "Corner",
            PieceKind::InverseCorner => "Inverse Corner",
            PieceKind::Double => "Double",
            PieceKind::Triple => "Triple",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Quarter-turn rotation state of a piece mask
///
/// - **North**: catalog orientation (0°)
/// - **East**: rotated 90° clockwise
/// - **South**: rotated 180°
/// - **West**: rotated 270° clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_grid_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Number of clockwise quarter turns from North
    pub fn quarter_turns(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation reached after `turns` clockwise quarter turns from North
    pub fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// A grid coordinate: `x` is the column, `y` the row
///
/// Ordered by column first, then row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Lifecycle of a game
///
/// `NotStarted -> Active -> GameOver`; `GameOver` is terminal until a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    NotStarted,
    Active,
    GameOver,
}

impl GamePhase {
    pub fn is_active(&self) -> bool {
        matches!(self, GamePhase::Active)
    }

    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::GameOver)
    }

    /// Convert to snake_case string
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::NotStarted => "not_started",
            GamePhase::Active => "active",
            GamePhase::GameOver => "game_over",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
