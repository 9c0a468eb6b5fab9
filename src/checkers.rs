//! Checkers: the second puzzle from the same assignment family.
//!
//! An 8x8 board with red and blue men and kings. This module enumerates
//! legal simple moves and multi-jump capture chains, evaluates material,
//! and runs a depth-limited alpha-beta search over the enumerated moves.
//! It shares the sliding-puzzle crate's conventions (flat byte grid,
//! signature-style equality) but is otherwise independent of the solver.

use std::fmt::{self, Display, Write};

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Board edge length in cells.
pub const SIZE: i32 = 8;
const CELLS: usize = (SIZE * SIZE) as usize;

const EMPTY: u8 = b'.';
const RED_MAN: u8 = b'r';
const RED_KING: u8 = b'R';
const BLUE_MAN: u8 = b'b';
const BLUE_KING: u8 = b'B';

/// Score of a decided game, comfortably beyond any material balance.
pub const WIN: i32 = 10_000;

/// A cell position as `(row, col)`, row 0 at the top.
pub type Square = (i32, i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }
}

/// One legal move: a simple diagonal step (`captures` empty) or a jump
/// chain with every captured square listed in jump order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub captures: Vec<Square>,
}

/// Malformed checkers board text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {SIZE} lines, found {found}")]
    WrongHeight { found: usize },
    #[error("line {line} has {found} symbols, expected {SIZE}")]
    WrongWidth { line: usize, found: usize },
    #[error("unrecognized symbol '{symbol}' at ({row}, {col})")]
    UnknownSymbol { symbol: char, row: i32, col: i32 },
}

/// A full game position.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    cells: [u8; CELLS],
}

#[inline]
fn index(row: i32, col: i32) -> usize {
    (row * SIZE + col) as usize
}

#[inline]
fn in_bounds(row: i32, col: i32) -> bool {
    row >= 0 && row < SIZE && col >= 0 && col < SIZE
}

fn belongs_to(symbol: u8, player: Player) -> bool {
    match player {
        Player::Red => symbol == RED_MAN || symbol == RED_KING,
        Player::Blue => symbol == BLUE_MAN || symbol == BLUE_KING,
    }
}

/// Diagonal row directions a piece may move in. Red men climb toward row
/// 0, blue men descend toward row 7, kings go both ways.
fn row_directions(symbol: u8) -> &'static [i32] {
    match symbol {
        RED_MAN => &[-1],
        BLUE_MAN => &[1],
        _ => &[-1, 1],
    }
}

fn promoted(symbol: u8, row: i32) -> u8 {
    match symbol {
        RED_MAN if row == 0 => RED_KING,
        BLUE_MAN if row == SIZE - 1 => BLUE_KING,
        other => other,
    }
}

impl GameState {
    /// Parses `SIZE` lines of `r`/`R`/`b`/`B`/`.` symbols.
    ///
    /// Widths are measured in chars so a non-ASCII symbol on a correctly
    /// sized line is reported as the symbol it is.
    pub fn parse(text: &str) -> Result<GameState, ParseError> {
        let rows: Vec<Vec<char>> = text.trim().lines().map(|line| line.chars().collect()).collect();
        if rows.len() != SIZE as usize {
            return Err(ParseError::WrongHeight { found: rows.len() });
        }
        let mut cells = [EMPTY; CELLS];
        for (row, line) in rows.iter().enumerate() {
            if line.len() != SIZE as usize {
                return Err(ParseError::WrongWidth {
                    line: row,
                    found: line.len(),
                });
            }
            for (col, &symbol) in line.iter().enumerate() {
                match symbol {
                    '.' | 'r' | 'R' | 'b' | 'B' => {
                        cells[row * SIZE as usize + col] = symbol as u8;
                    }
                    other => {
                        return Err(ParseError::UnknownSymbol {
                            symbol: other,
                            row: row as i32,
                            col: col as i32,
                        });
                    }
                }
            }
        }
        Ok(GameState { cells })
    }

    pub fn piece_at(&self, row: i32, col: i32) -> u8 {
        self.cells[index(row, col)]
    }

    /// Material balance, blue-positive: every piece counts two, kings one
    /// extra (a king is worth half a man more, scaled to stay integral).
    pub fn eval(&self) -> i32 {
        self.cells
            .iter()
            .map(|&symbol| match symbol {
                BLUE_MAN => 2,
                BLUE_KING => 3,
                RED_MAN => -2,
                RED_KING => -3,
                _ => 0,
            })
            .sum()
    }

    /// The side whose opponent has no pieces left, if any.
    pub fn winner(&self) -> Option<Player> {
        let mut red = 0;
        let mut blue = 0;
        for &symbol in &self.cells {
            match symbol {
                RED_MAN | RED_KING => red += 1,
                BLUE_MAN | BLUE_KING => blue += 1,
                _ => {}
            }
        }
        if red == 0 {
            Some(Player::Blue)
        } else if blue == 0 {
            Some(Player::Red)
        } else {
            None
        }
    }

    /// Enumerates every legal move for `player`: simple diagonal steps and
    /// all capture chains, each chain prefix reported as its own move.
    ///
    /// Scan order is row-major over origin squares, then direction order,
    /// so enumeration is deterministic.
    pub fn moves(&self, player: Player) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                let symbol = self.piece_at(row, col);
                if !belongs_to(symbol, player) {
                    continue;
                }
                for &dr in row_directions(symbol) {
                    for dc in [-1, 1] {
                        let (nr, nc) = (row + dr, col + dc);
                        if in_bounds(nr, nc) && self.piece_at(nr, nc) == EMPTY {
                            moves.push(Move {
                                from: (row, col),
                                to: (nr, nc),
                                captures: Vec::new(),
                            });
                        }
                    }
                }
                let mut chain = Vec::new();
                self.collect_jumps((row, col), (row, col), symbol, &mut chain, &mut moves);
            }
        }
        moves
    }

    /// Extends a capture chain from `pos`, recording every landing square
    /// reached so far as a legal move.
    ///
    /// Recursion runs on a board with the chain prefix already applied, so
    /// a captured piece cannot be jumped twice. Promotion ends the chain.
    fn collect_jumps(
        &self,
        origin: Square,
        pos: Square,
        symbol: u8,
        chain: &mut Vec<Square>,
        out: &mut Vec<Move>,
    ) {
        for &dr in row_directions(symbol) {
            for dc in [-1, 1] {
                let (mid_r, mid_c) = (pos.0 + dr, pos.1 + dc);
                let (land_r, land_c) = (pos.0 + 2 * dr, pos.1 + 2 * dc);
                if !in_bounds(land_r, land_c) {
                    continue;
                }
                let mid = self.piece_at(mid_r, mid_c);
                if mid == EMPTY || belongs_to(mid, player_of(symbol)) {
                    continue;
                }
                if self.piece_at(land_r, land_c) != EMPTY {
                    continue;
                }

                chain.push((mid_r, mid_c));
                out.push(Move {
                    from: origin,
                    to: (land_r, land_c),
                    captures: chain.clone(),
                });

                let mut next = self.clone();
                next.cells[index(pos.0, pos.1)] = EMPTY;
                next.cells[index(mid_r, mid_c)] = EMPTY;
                let landed = promoted(symbol, land_r);
                next.cells[index(land_r, land_c)] = landed;
                if landed == symbol {
                    next.collect_jumps(origin, (land_r, land_c), symbol, chain, out);
                }
                chain.pop();
            }
        }
    }

    /// Applies a move, returning the resulting position.
    pub fn apply(&self, mv: &Move) -> GameState {
        let mut next = self.clone();
        let symbol = next.cells[index(mv.from.0, mv.from.1)];
        next.cells[index(mv.from.0, mv.from.1)] = EMPTY;
        for &(row, col) in &mv.captures {
            next.cells[index(row, col)] = EMPTY;
        }
        next.cells[index(mv.to.0, mv.to.1)] = promoted(symbol, mv.to.0);
        next
    }
}

fn player_of(symbol: u8) -> Player {
    if symbol == RED_MAN || symbol == RED_KING {
        Player::Red
    } else {
        Player::Blue
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (cell_index, &symbol) in self.cells.iter().enumerate() {
            if cell_index > 0 && cell_index % SIZE as usize == 0 {
                f.write_char('\n')?;
            }
            f.write_char(symbol as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// How a cached score relates to the true minimax value. A window cutoff
/// only establishes a one-sided bound, so the flag decides when a cached
/// entry may substitute for a re-search.
#[derive(Clone, Copy)]
enum ScoreBound {
    Exact,
    Lower,
    Upper,
}

struct CacheEntry {
    depth: u32,
    score: i32,
    bound: ScoreBound,
    best: Option<Move>,
}

/// Transposition cache keyed by cell content and side to move.
type Cache = FxHashMap<([u8; CELLS], Player), CacheEntry>;

/// Depth-limited alpha-beta over the enumerated moves, with a
/// transposition cache so positions reached by move order alone are not
/// re-searched.
///
/// Blue maximizes, matching the blue-positive evaluation. A side with no
/// pieces or no legal moves has lost. Returns the score and the best move
/// for the side to play, `None` at terminal or zero-depth positions.
pub fn alpha_beta(state: &GameState, depth: u32, to_move: Player) -> (i32, Option<Move>) {
    let mut cache = Cache::default();
    search(state, depth, to_move, -WIN - 1, WIN + 1, &mut cache)
}

fn terminal_score(winner: Player) -> i32 {
    match winner {
        Player::Blue => WIN,
        Player::Red => -WIN,
    }
}

fn search(
    state: &GameState,
    depth: u32,
    to_move: Player,
    mut alpha: i32,
    mut beta: i32,
    cache: &mut Cache,
) -> (i32, Option<Move>) {
    if let Some(winner) = state.winner() {
        return (terminal_score(winner), None);
    }
    if depth == 0 {
        return (state.eval(), None);
    }

    let key = (state.cells, to_move);
    if let Some(entry) = cache.get(&key) {
        // a shallower entry proves nothing about a deeper search, and a
        // bound entry only settles the position when it closes the
        // current window
        if entry.depth >= depth {
            let usable = match entry.bound {
                ScoreBound::Exact => true,
                ScoreBound::Lower => entry.score >= beta,
                ScoreBound::Upper => entry.score <= alpha,
            };
            if usable {
                return (entry.score, entry.best.clone());
            }
        }
    }

    let moves = state.moves(to_move);
    if moves.is_empty() {
        // the side to move is stuck and loses
        return (terminal_score(to_move.opponent()), None);
    }

    let (alpha_in, beta_in) = (alpha, beta);
    let mut best_move = None;
    let best = match to_move {
        Player::Blue => {
            let mut best = -WIN - 1;
            for mv in moves {
                let (score, _) =
                    search(&state.apply(&mv), depth - 1, Player::Red, alpha, beta, cache);
                if score > best {
                    best = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best);
                if alpha >= beta {
                    break;
                }
            }
            best
        }
        Player::Red => {
            let mut best = WIN + 1;
            for mv in moves {
                let (score, _) =
                    search(&state.apply(&mv), depth - 1, Player::Blue, alpha, beta, cache);
                if score < best {
                    best = score;
                    best_move = Some(mv);
                }
                beta = beta.min(best);
                if alpha >= beta {
                    break;
                }
            }
            best
        }
    };

    let bound = if best <= alpha_in {
        ScoreBound::Upper
    } else if best >= beta_in {
        ScoreBound::Lower
    } else {
        ScoreBound::Exact
    };
    cache.insert(
        key,
        CacheEntry {
            depth,
            score: best,
            bound,
            best: best_move.clone(),
        },
    );
    (best, best_move)
}
