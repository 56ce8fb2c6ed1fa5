//! Pieces module - the piece catalog and in-place mask rotation
//!
//! Every piece is a 3x3 mask. Masks are stored as visual rows: `mask[j][i]` is
//! the cell in column `i`, row `j`. A non-zero cell holds the piece's colour id,
//! which is the same for every populated cell and never changes under rotation.

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rotation, PIECE_OFFSET, PIECE_SIZE};

/// A 3x3 block mask, rows top to bottom
pub type PieceMask = [[u8; PIECE_SIZE]; PIECE_SIZE];

/// Populated cells of a piece as `(dx, dy, value)` offsets from its centre
pub type PieceCells = ArrayVec<(i32, i32, u8), { PIECE_SIZE * PIECE_SIZE }>;

/// Get the catalog mask for a piece kind, with 1 marking a block
fn base_shape(kind: PieceKind) -> PieceMask {
    match kind {
        PieceKind::Line => [[0, 0, 0], [1, 1, 1], [0, 0, 0]],
        PieceKind::C => [[0, 0, 0], [1, 1, 1], [1, 0, 1]],
        PieceKind::Plus => [[0, 1, 0], [1, 1, 1], [0, 1, 0]],
        PieceKind::Dot => [[0, 0, 0], [0, 1, 0], [0, 0, 0]],
        PieceKind::Square => [[1, 1, 0], [1, 1, 0], [0, 0, 0]],
        PieceKind::L => [[0, 0, 0], [1, 1, 1], [1, 0, 0]],
        PieceKind::J => [[1, 0, 0], [1, 1, 1], [0, 0, 0]],
        PieceKind::S => [[0, 0, 0], [0, 1, 1], [1, 1, 0]],
        PieceKind::Z => [[1, 1, 0], [0, 1, 1], [0, 0, 0]],
        PieceKind::T => [[1, 1, 1], [0, 1, 0], [0, 0, 0]],
        PieceKind::X => [[1, 0, 1], [0, 1, 0], [1, 0, 1]],
        PieceKind::Corner => [[0, 0, 0], [1, 1, 0], [1, 0, 0]],
        PieceKind::InverseCorner => [[1, 0, 0], [1, 1, 0], [0, 0, 0]],
        PieceKind::Double => [[0, 1, 0], [0, 1, 0], [0, 0, 0]],
        PieceKind::Triple => [[0, 1, 0], [0, 1, 0], [0, 1, 0]],
    }
}

/// Create the piece at a catalog index (0..15)
///
/// Returns None for an index outside the catalog.
pub fn create_piece(index: usize) -> Option<GamePiece> {
    PieceKind::from_index(index).map(GamePiece::new)
}

/// Rotate a mask 90° clockwise
fn rotate_mask_cw(mask: &PieceMask) -> PieceMask {
    let mut out = [[0u8; PIECE_SIZE]; PIECE_SIZE];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = mask[PIECE_SIZE - 1 - c][r];
        }
    }
    out
}

/// A single piece instance
///
/// Pieces are plain values: every copy handed to a caller is independent of
/// the engine's own piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GamePiece {
    kind: PieceKind,
    rotation: Rotation,
    blocks: PieceMask,
}

impl GamePiece {
    /// Create a piece in its catalog orientation
    pub fn new(kind: PieceKind) -> Self {
        let value = kind.value();
        let mut blocks = base_shape(kind);
        for cell in blocks.iter_mut().flatten() {
            *cell *= value;
        }
        Self {
            kind,
            rotation: Rotation::North,
            blocks,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Colour id of every block in this piece
    pub fn value(&self) -> u8 {
        self.kind.value()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The current mask, rows top to bottom
    pub fn blocks(&self) -> &PieceMask {
        &self.blocks
    }

    /// Rotate 90° clockwise in place
    pub fn rotate(&mut self) {
        self.blocks = rotate_mask_cw(&self.blocks);
        self.rotation = self.rotation.rotate_cw();
    }

    /// Rotate 90° counter-clockwise in place (three clockwise turns)
    pub fn rotate_ccw(&mut self) {
        self.rotate_times(3);
    }

    /// Rotate clockwise `turns` times
    pub fn rotate_times(&mut self, turns: u8) {
        for _ in 0..turns % 4 {
            self.rotate();
        }
    }

    /// Populated cells as offsets from the piece centre
    pub fn cells(&self) -> PieceCells {
        let mut out = PieceCells::new();
        for (j, row) in self.blocks.iter().enumerate() {
            for (i, &value) in row.iter().enumerate() {
                if value > 0 {
                    out.push((i as i32 - PIECE_OFFSET, j as i32 - PIECE_OFFSET, value));
                }
            }
        }
        out
    }

    /// Number of blocks in the piece
    pub fn block_count(&self) -> usize {
        self.blocks.iter().flatten().filter(|&&v| v > 0).count()
    }
}

impl fmt::Display for GamePiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PIECE_COUNT;

    #[test]
    fn test_catalog_is_complete() {
        for i in 0..PIECE_COUNT {
            let piece = create_piece(i).unwrap();
            assert_eq!(piece.kind().index(), i);
            assert!(piece.block_count() > 0);
        }
        assert!(create_piece(PIECE_COUNT).is_none());
    }

    #[test]
    fn test_every_block_carries_the_colour_id() {
        for kind in PieceKind::ALL {
            let piece = GamePiece::new(kind);
            assert!(piece
                .blocks()
                .iter()
                .flatten()
                .all(|&v| v == 0 || v == kind.value()));
        }
    }

    #[test]
    fn test_rotate_clockwise() {
        let mut piece = GamePiece::new(PieceKind::J);
        let v = piece.value();
        piece.rotate();
        assert_eq!(piece.rotation(), Rotation::East);
        assert_eq!(piece.blocks(), &[[0, v, v], [0, v, 0], [0, v, 0]]);
    }

    #[test]
    fn test_rotate_ccw_undoes_rotate() {
        let original = GamePiece::new(PieceKind::S);
        let mut piece = original;
        piece.rotate();
        piece.rotate_ccw();
        assert_eq!(piece, original);
    }

    #[test]
    fn test_four_rotations_restore_mask() {
        for kind in PieceKind::ALL {
            let original = GamePiece::new(kind);
            let mut piece = original;
            for _ in 0..4 {
                piece.rotate();
            }
            assert_eq!(piece, original, "{} did not return to its start", kind);
        }
    }

    #[test]
    fn test_copies_do_not_alias() {
        let mut piece = GamePiece::new(PieceKind::L);
        let shown = piece;
        piece.rotate();
        assert_ne!(piece.blocks(), shown.blocks());
        assert_eq!(shown.rotation(), Rotation::North);
    }

    #[test]
    fn test_cells_are_centre_relative() {
        let cells = GamePiece::new(PieceKind::Double).cells();
        let v = PieceKind::Double.value();
        assert_eq!(cells.as_slice(), &[(0, -1, v), (0, 0, v)]);
    }

    #[test]
    fn test_display_uses_shape_name() {
        assert_eq!(GamePiece::new(PieceKind::InverseCorner).to_string(), "Inverse Corner");
    }
}
