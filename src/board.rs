//! Board representation: a canonical occupancy grid derived from a piece list.
//!
//! The grid is a cache, not independent state; it is repainted in full from
//! the pieces whenever a board is built. Its row-major byte content doubles
//! as the canonical signature used for duplicate-state detection, so two
//! boards with identical piece placements compare equal regardless of the
//! order their pieces were listed in.

use std::fmt::{self, Display, Write};

use thiserror::Error;

use crate::pieces::{Cell, Direction, Piece, PieceKind};

/// Board width in cells.
pub const WIDTH: i32 = 4;
/// Board height in cells.
pub const HEIGHT: i32 = 5;
/// Total cells in the grid.
pub const GRID_SIZE: usize = (WIDTH * HEIGHT) as usize;
/// Number of unoccupied cells on any legal board.
pub const NUM_EMPTIES: usize = 2;

/// Symbol painted into unoccupied cells.
pub const EMPTY: u8 = b'.';

/// Canonical duplicate-detection key: the row-major grid content.
pub type Signature = [u8; GRID_SIZE];

/// Errors raised while deriving a grid from a piece list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("piece extends outside the {WIDTH}x{HEIGHT} grid at ({x}, {y})")]
    OutOfBounds { x: i32, y: i32 },
    #[error("two pieces overlap at ({x}, {y})")]
    Overlap { x: i32, y: i32 },
    #[error("expected exactly {NUM_EMPTIES} empty cells, found {found}")]
    WrongEmptyCount { found: usize },
}

/// A full board: the piece list plus the derived occupancy grid.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    pieces: Vec<Piece>,
    grid: [u8; GRID_SIZE],
}

#[inline]
fn cell_index(x: i32, y: i32) -> usize {
    (y * WIDTH + x) as usize
}

impl Board {
    /// Paints every piece into a fresh grid.
    ///
    /// Overlapping pieces are an explicit error rather than a silent
    /// last-painter-wins overwrite, and the two-empty-cell invariant is
    /// checked here so every downstream consumer can rely on it.
    pub fn build(pieces: Vec<Piece>) -> Result<Board, BuildError> {
        let mut grid = [EMPTY; GRID_SIZE];
        for piece in &pieces {
            for (x, y) in piece.occupied_cells() {
                if x < 0 || x >= WIDTH || y < 0 || y >= HEIGHT {
                    return Err(BuildError::OutOfBounds { x, y });
                }
                let index = cell_index(x, y);
                if grid[index] != EMPTY {
                    return Err(BuildError::Overlap { x, y });
                }
                grid[index] = piece.kind.symbol(x - piece.x, y - piece.y);
            }
        }

        let empties = grid.iter().filter(|&&c| c == EMPTY).count();
        if empties != NUM_EMPTIES {
            return Err(BuildError::WrongEmptyCount { found: empties });
        }

        Ok(Board { pieces, grid })
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Symbol at `(x, y)`. Callers must pass in-bounds coordinates.
    pub fn cell(&self, x: i32, y: i32) -> u8 {
        self.grid[cell_index(x, y)]
    }

    /// The two unoccupied cells, scanning row-major then by column.
    ///
    /// First-found is index 0. The fixed scan order makes the result
    /// deterministic for a given grid regardless of piece iteration order.
    pub fn empties(&self) -> [Cell; NUM_EMPTIES] {
        let mut found = [(0, 0); NUM_EMPTIES];
        let mut count = 0;
        for (index, &symbol) in self.grid.iter().enumerate() {
            if symbol == EMPTY {
                found[count] = (index as i32 % WIDTH, index as i32 / WIDTH);
                count += 1;
                if count == NUM_EMPTIES {
                    break;
                }
            }
        }
        found
    }

    /// Canonical visited-set key: the grid content itself.
    pub fn signature(&self) -> Signature {
        self.grid
    }

    /// Top-left cell of the goal piece, if the board has one.
    pub fn goal_origin(&self) -> Option<Cell> {
        self.pieces
            .iter()
            .find(|p| p.kind == PieceKind::Goal)
            .map(|p| (p.x, p.y))
    }

    /// Builds a new board with one piece slid a single cell.
    ///
    /// Callers must have verified legality via [`crate::rules::can_slide`];
    /// a repaint failure here means the move generator is broken, which is
    /// an internal logic error rather than a recoverable condition.
    pub fn with_slid_piece(&self, piece_index: usize, direction: Direction) -> Board {
        let mut pieces = self.pieces.clone();
        pieces[piece_index] = pieces[piece_index].slide(direction);
        Board::build(pieces).expect("legal slide repainted into an invalid board")
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, &symbol) in self.grid.iter().enumerate() {
            if index > 0 && index % WIDTH as usize == 0 {
                f.write_char('\n')?;
            }
            f.write_char(symbol as char)?;
        }
        Ok(())
    }
}
