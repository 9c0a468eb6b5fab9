//! Sliding-Block Puzzle Solver Library
//!
//! Provides the core solving functionality for the 4x5 Hua Rong Dao
//! ("Klotski") sliding-block puzzle: a canonical board representation,
//! pure move-legality rules, DFS and A* search with duplicate-state
//! pruning, and solution-file serialization. A companion [`checkers`]
//! module covers the adversarial sibling puzzle: legal move and capture
//! chain enumeration with a depth-limited alpha-beta search.

pub mod board;
pub mod checkers;
pub mod persistence;
pub mod pieces;
pub mod rules;
pub mod solver;
pub mod state;

pub use board::{Board, Signature};
pub use pieces::{Direction, Piece, PieceKind};
pub use solver::{solve, Algorithm, Options, Solution, SolveError};
