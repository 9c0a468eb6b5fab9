//! Search-tree nodes.
//!
//! A state owns its board snapshot; the parent link is a back-reference
//! used only for path reconstruction, shared via `Rc` because the search
//! is single-threaded. States are never mutated after construction, which
//! rules out the aliasing bugs of a mutate-then-revert expansion.

use std::rc::Rc;

use crate::board::Board;

/// One node of the search tree.
#[derive(Debug)]
pub struct State {
    pub board: Board,
    /// Path length from the root, i.e. depth.
    pub depth: u32,
    /// Admissible estimate of the remaining moves.
    pub heuristic: u32,
    pub parent: Option<Rc<State>>,
}

impl State {
    /// Root node for a loaded puzzle, at depth 0.
    pub fn root(board: Board, heuristic: u32) -> Rc<State> {
        Rc::new(State {
            board,
            depth: 0,
            heuristic,
            parent: None,
        })
    }

    /// Child produced by a single legal slide from `parent`.
    pub fn child(parent: &Rc<State>, board: Board, heuristic: u32) -> Rc<State> {
        Rc::new(State {
            board,
            depth: parent.depth + 1,
            heuristic,
            parent: Some(Rc::clone(parent)),
        })
    }

    /// Priority for best-first ordering.
    pub fn f(&self) -> u32 {
        self.depth + self.heuristic
    }
}

/// Walks parent links from `goal` back to the root and returns the board
/// sequence in root-to-goal order.
pub fn path_boards(goal: &Rc<State>) -> Vec<Board> {
    let mut boards = Vec::with_capacity(goal.depth as usize + 1);
    let mut node: &State = goal;
    loop {
        boards.push(node.board.clone());
        match &node.parent {
            Some(parent) => node = parent,
            None => break,
        }
    }
    boards.reverse();
    boards
}
