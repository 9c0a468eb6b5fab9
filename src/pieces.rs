//! Puzzle piece definitions and direction types.
//!
//! Each piece is described by its kind (which fixes the shape of its
//! bounding box) and the top-left cell of that box. Pieces carry no
//! board knowledge; legality of a slide is decided by [`crate::rules`].

/// A board cell position as `(x, y)`, with `y` growing downward.
pub type Cell = (i32, i32);

/// The shape class of a piece.
///
/// The Hua Rong Dao board uses exactly four shapes: the 2x2 goal piece,
/// 1x2 pieces in both orientations, and 1x1 singles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// The 2x2 piece whose target position defines puzzle completion.
    Goal,
    /// A 1x1 piece.
    Single,
    /// A 1 row x 2 column piece.
    Horizontal,
    /// A 2 row x 1 column piece.
    Vertical,
}

impl PieceKind {
    /// Bounding box as `(width, height)` in cells.
    pub const fn extent(self) -> (i32, i32) {
        match self {
            PieceKind::Goal => (2, 2),
            PieceKind::Single => (1, 1),
            PieceKind::Horizontal => (2, 1),
            PieceKind::Vertical => (1, 2),
        }
    }

    /// Grid symbol for the cell at offset `(dx, dy)` inside the bounding box.
    ///
    /// The goal piece paints the same symbol into all four cells; the 1x2
    /// pieces use distinct symbols for their two halves so a grid can be
    /// parsed back into pieces unambiguously.
    pub const fn symbol(self, dx: i32, dy: i32) -> u8 {
        match self {
            PieceKind::Goal => b'1',
            PieceKind::Single => b'2',
            PieceKind::Horizontal => {
                if dx == 0 {
                    b'<'
                } else {
                    b'>'
                }
            }
            PieceKind::Vertical => {
                if dy == 0 {
                    b'^'
                } else {
                    b'v'
                }
            }
        }
    }
}

/// A single-cell slide direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

/// All directions in the fixed expansion order.
///
/// The order only affects which of several equally short solutions the
/// search discovers first, not correctness.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Left,
    Direction::Up,
    Direction::Right,
    Direction::Down,
];

impl Direction {
    /// Translation as `(dx, dy)`.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// One puzzle piece: a shape plus the top-left cell of its bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    pub const fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self { kind, x, y }
    }

    /// Iterates over every cell this piece occupies.
    pub fn occupied_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let (w, h) = self.kind.extent();
        (0..h).flat_map(move |dy| (0..w).map(move |dx| (self.x + dx, self.y + dy)))
    }

    /// Returns a copy translated one cell in `direction`.
    ///
    /// Performs no legality check; that is board-dependent and lives in
    /// [`crate::rules::can_slide`].
    pub fn slide(self, direction: Direction) -> Piece {
        let (dx, dy) = direction.delta();
        Piece {
            kind: self.kind,
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}
