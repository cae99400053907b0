use std::fmt::{Display, Formatter};

use crate::color::Pair;
use crate::grid::Grid;
use crate::solver::{self, SolveOutcome, SolverConfig, Statistics};

/// A validated, unsolved Flow Free board: a square grid with its termini marked.
///
/// [`Board`]s should be built using a [`BoardBuilder`](crate::builder::BoardBuilder) or parsed from text with
/// [`parse_board`](crate::loader::parse_board).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    pub(crate) grid: Grid,
    pub(crate) pairs: Vec<Pair>,
}

impl Board {
    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// The board's pairs in ascending color order.
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// The board with only its termini colored.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Search for a covering of the board by one path per pair.
    ///
    /// The board itself is left untouched; the search runs on a copy of its grid.
    pub fn solve(&self, config: &SolverConfig) -> SolveOutcome {
        self.solve_with_statistics(config).0
    }

    /// As [`Self::solve`], also reporting how much work the search did.
    pub fn solve_with_statistics(&self, config: &SolverConfig) -> (SolveOutcome, Statistics) {
        solver::run(self.grid.snapshot(), &self.pairs, config)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.grid)
    }
}
