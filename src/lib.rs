#![warn(missing_docs)]

//! # `flowlink`
//!
//! A solver for the mobile game Flow Free on square boards.
//! Begin by building a board with a [`BoardBuilder`] or by parsing its textual description with
//! [`parse_board`](loader::parse_board), then call [`solve()`](Board::solve) to search for a covering of the board
//! by one path per color.
//!
//! # Internals
//! The search is a depth-first backtracking search over per-color path choices.
//!
//! 1. For a pair of termini, every simple orthogonal path between them over empty cells is enumerated, up to a
//!    configurable [limit](SolverConfig::path_limit). Neighbors are always explored up, down, left, right.
//! 2. At every search state the pending pair with the fewest candidate paths is branched on next, ties going to the
//!    lowest color. A pair with no path at all makes the state a dead end.
//! 3. Each candidate path is drawn onto the grid, the remaining pairs are searched, and the path is erased again if
//!    that fails. Once no pairs remain, the state is a solution only if no cell is left empty.
//!
//! The enumeration limit keeps large open boards tractable at the price of completeness: with a low limit, a
//! solvable board may be reported as [`Exhausted`](SolveOutcome::Exhausted).
//! With the `parallel` feature, the first branching point may be explored on all cores; the solution found is the
//! one a sequential search would find.

pub use board::Board;
pub use builder::BoardBuilder;
pub use color::{ColorId, Pair, EMPTY};
pub use error::{BoardError, ParseError};
pub use grid::Grid;
pub use location::Location;
pub use path::{enumerate_paths, Path};
pub use solver::{solve, Solution, SolveOutcome, SolverConfig, Statistics};

pub(crate) mod board;
pub mod builder;
pub(crate) mod color;
pub(crate) mod error;
pub(crate) mod grid;
pub mod loader;
pub(crate) mod location;
pub(crate) mod path;
pub mod shape;
pub(crate) mod solver;
mod tests;
