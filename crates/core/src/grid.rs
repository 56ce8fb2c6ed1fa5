//! Grid module - manages the game board
//!
//! The grid is a `cols x rows` board where each cell is empty (`0`) or holds the
//! colour id of the piece that filled it. Uses a flat row-major vector for cache
//! locality. Coordinates: `(x, y)` where `x` is the column and `y` the row.
//!
//! Pieces are anchored on their centre cell: mask cell `(i, j)` lands on board
//! cell `(x + i - 1, y + j - 1)`. A piece must fit entirely on the board.

use std::collections::BTreeSet;

use crate::error::{GameError, Result};
use crate::pieces::GamePiece;
use crate::types::{Coord, DEFAULT_COLS, DEFAULT_ROWS, EMPTY_CELL, MAX_CELL_VALUE};

/// Blocks belonging to completed rows and columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedLines {
    /// Every block in a complete row or column, each listed once
    pub blocks: BTreeSet<Coord>,
    /// Complete rows plus complete columns
    pub lines: usize,
}

impl CompletedLines {
    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }

    /// Number of distinct blocks to clear
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    /// Flat vector of cells, row-major order (y * cols + x)
    cells: Vec<u8>,
}

impl Grid {
    /// Create a new empty grid
    ///
    /// Both dimensions must be non-zero and addressable with `i32` coordinates.
    pub fn new(cols: usize, rows: usize) -> Result<Self> {
        let invalid = GameError::InvalidDimensions { cols, rows };
        if cols == 0 || rows == 0 || cols > i32::MAX as usize || rows > i32::MAX as usize {
            return Err(invalid);
        }
        let len = cols.checked_mul(rows).ok_or(invalid)?;
        Ok(Self {
            cols,
            rows,
            cells: vec![EMPTY_CELL; len],
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return None;
        }
        Some(y as usize * self.cols + x as usize)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Check if a coordinate lies on the grid
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Get cell at position (x, y), treating out of bounds as an error
    pub fn value(&self, x: i32, y: i32) -> Result<u8> {
        self.get(x, y).ok_or(GameError::OutOfBounds { x, y })
    }

    /// Set cell at position (x, y)
    pub fn set(&mut self, x: i32, y: i32, value: u8) -> Result<()> {
        if value > MAX_CELL_VALUE {
            return Err(GameError::InvalidCellValue(value));
        }
        let idx = self.index(x, y).ok_or(GameError::OutOfBounds { x, y })?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Check if position is on the grid and empty
    pub fn is_empty_at(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(EMPTY_CELL))
    }

    /// Check if the piece, centred on (x, y), fits entirely on empty cells
    pub fn can_place(&self, piece: &GamePiece, x: i32, y: i32) -> bool {
        piece
            .cells()
            .iter()
            .all(|&(dx, dy, _)| self.is_empty_at(x + dx, y + dy))
    }

    /// Place the piece centred on (x, y)
    /// Returns false, leaving the grid untouched, if the placement is illegal
    pub fn place(&mut self, piece: &GamePiece, x: i32, y: i32) -> bool {
        if !self.can_place(piece, x, y) {
            return false;
        }

        for (dx, dy, value) in piece.cells() {
            // Bounds were validated by can_place.
            if let Some(idx) = self.index(x + dx, y + dy) {
                self.cells[idx] = value;
            }
        }

        true
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.rows {
            return false;
        }
        let start = y * self.cols;
        self.cells[start..start + self.cols]
            .iter()
            .all(|&cell| cell != EMPTY_CELL)
    }

    /// Check if a column is completely filled
    pub fn is_col_full(&self, x: usize) -> bool {
        if x >= self.cols {
            return false;
        }
        (0..self.rows).all(|y| self.cells[y * self.cols + x] != EMPTY_CELL)
    }

    /// Find every complete row and column
    ///
    /// A block on both a complete row and a complete column is listed once,
    /// while both lines are counted.
    pub fn find_completed_lines(&self) -> CompletedLines {
        let mut found = CompletedLines::default();

        for y in 0..self.rows {
            if self.is_row_full(y) {
                found.lines += 1;
                found.blocks.extend((0..self.cols).map(|x| Coord::new(x, y)));
            }
        }

        for x in 0..self.cols {
            if self.is_col_full(x) {
                found.lines += 1;
                found.blocks.extend((0..self.rows).map(|y| Coord::new(x, y)));
            }
        }

        found
    }

    /// Empty every given coordinate; coordinates off the grid are ignored
    pub fn clear<'a>(&mut self, coords: impl IntoIterator<Item = &'a Coord>) {
        for coord in coords {
            if coord.x < self.cols && coord.y < self.rows {
                self.cells[coord.y * self.cols + coord.x] = EMPTY_CELL;
            }
        }
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != EMPTY_CELL).count()
    }

    /// Get a reference to the internal cells, row-major
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn reset(&mut self) {
        self.cells.fill(EMPTY_CELL);
    }

    /// Convert to rows of cells, for display and tests
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.cols).map(<[u8]>::to_vec).collect()
    }

    /// Create from rows of cells (all rows must have the same length)
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut grid = Self::new(cols, rows.len())?;
        for (y, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GameError::InvalidDimensions {
                    cols: row.len(),
                    rows: rows.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                grid.set(x as i32, y as i32, value)?;
            }
        }
        Ok(grid)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            cells: vec![EMPTY_CELL; DEFAULT_COLS * DEFAULT_ROWS],
        }
    }
}
