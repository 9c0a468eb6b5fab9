//! Pure slide-legality predicates.
//!
//! Legality is computed from the current coordinates without touching piece
//! state; accepted moves are applied separately to a fresh board copy. This
//! replaces the mutate-then-maybe-revert pattern: there is no hidden board
//! mutation anywhere in this module, so calling [`can_slide`] twice with the
//! same arguments always returns the same answer.

use crate::board::{Board, HEIGHT, WIDTH};
use crate::pieces::{Cell, Direction, Piece, PieceKind};

/// Cells a slide would newly occupy.
///
/// A 1x2 piece moving along its long axis (and a single in any direction)
/// exposes one cell, which merely has to be one of the two empties. Every
/// other kind/direction combination exposes two cells at once, which must
/// consume both empties together. This asymmetry is the crux of the
/// legality check.
enum Exposed {
    One(Cell),
    Two(Cell, Cell),
}

fn exposed_cells(piece: Piece, direction: Direction) -> Exposed {
    let (x, y) = (piece.x, piece.y);
    match (piece.kind, direction) {
        (PieceKind::Goal, Direction::Left) => Exposed::Two((x - 1, y), (x - 1, y + 1)),
        (PieceKind::Goal, Direction::Right) => Exposed::Two((x + 2, y), (x + 2, y + 1)),
        (PieceKind::Goal, Direction::Up) => Exposed::Two((x, y - 1), (x + 1, y - 1)),
        (PieceKind::Goal, Direction::Down) => Exposed::Two((x, y + 2), (x + 1, y + 2)),

        (PieceKind::Single, Direction::Left) => Exposed::One((x - 1, y)),
        (PieceKind::Single, Direction::Right) => Exposed::One((x + 1, y)),
        (PieceKind::Single, Direction::Up) => Exposed::One((x, y - 1)),
        (PieceKind::Single, Direction::Down) => Exposed::One((x, y + 1)),

        (PieceKind::Horizontal, Direction::Left) => Exposed::One((x - 1, y)),
        (PieceKind::Horizontal, Direction::Right) => Exposed::One((x + 2, y)),
        (PieceKind::Horizontal, Direction::Up) => Exposed::Two((x, y - 1), (x + 1, y - 1)),
        (PieceKind::Horizontal, Direction::Down) => Exposed::Two((x, y + 1), (x + 1, y + 1)),

        (PieceKind::Vertical, Direction::Left) => Exposed::Two((x - 1, y), (x - 1, y + 1)),
        (PieceKind::Vertical, Direction::Right) => Exposed::Two((x + 1, y), (x + 1, y + 1)),
        (PieceKind::Vertical, Direction::Up) => Exposed::One((x, y - 1)),
        (PieceKind::Vertical, Direction::Down) => Exposed::One((x, y + 2)),
    }
}

/// Reports whether sliding `pieces()[piece_index]` one cell in `direction`
/// is legal on `board`.
///
/// Checks the kind-specific boundary first (the piece's far edge must stay
/// inside the grid), then the exposed-cell adjacency rule against the
/// board's two empty cells.
pub fn can_slide(board: &Board, piece_index: usize, direction: Direction) -> bool {
    let piece = board.pieces()[piece_index];
    let (w, h) = piece.kind.extent();
    let (dx, dy) = direction.delta();
    let (nx, ny) = (piece.x + dx, piece.y + dy);

    // hard boundary, independent of where the empties are
    if nx < 0 || ny < 0 || nx + w > WIDTH || ny + h > HEIGHT {
        return false;
    }

    let [e0, e1] = board.empties();
    match exposed_cells(piece, direction) {
        Exposed::One(cell) => cell == e0 || cell == e1,
        Exposed::Two(a, b) => (a == e0 && b == e1) || (a == e1 && b == e0),
    }
}
