use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::num::NonZero;
use std::ops::AddAssign;

use log::{debug, trace};

use crate::color::{ColorId, Pair};
use crate::error::BoardError;
use crate::grid::Grid;
use crate::location::Location;
use crate::path::{enumerate_paths, Path};

/// Knobs for a search.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SolverConfig {
    /// Most paths enumerated per pair and per search state.
    ///
    /// Lower values search faster but may report [`SolveOutcome::Exhausted`] on a solvable board.
    pub path_limit: NonZero<usize>,
    /// Explore the first choice of the search on all cores.
    /// Only honored with the `parallel` feature; the solution found is the same either way.
    pub parallel: bool,
}

impl SolverConfig {
    /// Path limit used unless configured otherwise.
    pub const DEFAULT_PATH_LIMIT: NonZero<usize> = match NonZero::new(1000) {
        Some(limit) => limit,
        None => unreachable!(),
    };
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            path_limit: Self::DEFAULT_PATH_LIMIT,
            parallel: cfg!(feature = "parallel"),
        }
    }
}

/// A solved board: every cell colored, every pair connected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution {
    grid: Grid,
    paths: BTreeMap<ColorId, Path>,
}

impl Solution {
    /// The solved board; no cell is empty.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The path chosen for each color, keyed by color.
    pub fn paths(&self) -> &BTreeMap<ColorId, Path> {
        &self.paths
    }

    /// Discard the paths, keeping the solved board.
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.grid)
    }
}

/// Result of a search. Neither variant is an error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SolveOutcome {
    /// A covering of the board.
    Found(Solution),
    /// No solution exists, or none exists using the first [`SolverConfig::path_limit`] paths of each pair.
    Exhausted,
}

impl SolveOutcome {
    /// Whether a solution was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The solution, if one was found.
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Found(solution) => Some(solution),
            Self::Exhausted => None,
        }
    }

    /// Take the solution, if one was found.
    pub fn into_solution(self) -> Option<Solution> {
        match self {
            Self::Found(solution) => Some(solution),
            Self::Exhausted => None,
        }
    }
}

/// Counters gathered over one search.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Statistics {
    /// Search states entered, including the initial one.
    pub states: usize,
    /// Candidate paths undone after their subtree failed.
    pub backtracks: usize,
    /// Calls to the path enumerator.
    pub enumerations: usize,
}

impl AddAssign for Statistics {
    fn add_assign(&mut self, rhs: Self) {
        self.states += rhs.states;
        self.backtracks += rhs.backtracks;
        self.enumerations += rhs.enumerations;
    }
}

/// One pair whose candidate paths are being tried.
struct Frame {
    pair: usize,
    candidates: Vec<Path>,
    // index of the next candidate to try
    next: usize,
    // whether `candidates[next - 1]` is currently on the grid
    committed: bool,
}

/// Depth-first search over per-pair path choices, ordering pairs by fewest candidate paths.
///
/// The engine owns its working grid. Every commit of a path is undone before the next candidate is tried, unless it
/// ends up in the accepted solution, which is snapshotted so later mutation cannot reach it.
#[derive(Clone)]
pub(crate) struct SearchEngine<'p> {
    grid: Grid,
    pairs: &'p [Pair],
    // parallel to `pairs`
    pending: Vec<bool>,
    remaining: usize,
    limit: NonZero<usize>,
    stats: Statistics,
}

impl<'p> SearchEngine<'p> {
    pub(crate) fn new(grid: Grid, pairs: &'p [Pair], config: &SolverConfig) -> Self {
        Self {
            grid,
            pairs,
            pending: vec![true; pairs.len()],
            remaining: pairs.len(),
            limit: config.path_limit,
            stats: Statistics::default(),
        }
    }

    pub(crate) fn statistics(&self) -> Statistics {
        self.stats
    }

    /// Run the search to completion, or until `abandon` reports the result is no longer wanted.
    pub(crate) fn search(&mut self, abandon: &dyn Fn() -> bool) -> Option<Solution> {
        let mut stack: Vec<Frame> = Vec::new();
        let mut descend = true;

        loop {
            if descend {
                self.stats.states += 1;
                if abandon() {
                    trace!("search abandoned at depth {}", stack.len());
                    return None;
                }

                if self.remaining == 0 {
                    if self.grid.is_full() {
                        debug!("solution found after {:?}", self.stats);
                        return Some(self.accept(&stack));
                    }
                    trace!("every pair connected but cells remain empty");
                } else if let Some((pair, candidates)) = self.select_pair() {
                    stack.push(Frame { pair, candidates, next: 0, committed: false });
                }
            }
            descend = false;

            let Some(frame) = stack.last_mut() else {
                debug!("search exhausted after {:?}", self.stats);
                return None;
            };

            if frame.committed {
                self.rollback(frame.pair, &frame.candidates[frame.next - 1]);
                frame.committed = false;
                self.stats.backtracks += 1;
            }

            if frame.next < frame.candidates.len() {
                self.commit(frame.pair, &frame.candidates[frame.next]);
                frame.next += 1;
                frame.committed = true;
                descend = true;
            } else {
                stack.pop();
            }
        }
    }

    /// Pick the pending pair with the fewest candidate paths, lowest color first on ties.
    ///
    /// Returns [`None`] if some pending pair has no path at all, in which case the current state is a dead end.
    fn select_pair(&mut self) -> Option<(usize, Vec<Path>)> {
        let pairs = self.pairs;
        let mut best: Option<(usize, Vec<Path>)> = None;

        for (index, pair) in pairs.iter().enumerate() {
            if !self.pending[index] {
                continue;
            }

            let paths = enumerate_paths(&self.grid, pair.start(), pair.end(), self.limit);
            self.stats.enumerations += 1;

            if paths.is_empty() {
                trace!("color {} has no path left", pair.color());
                return None;
            }

            if best.as_ref().map_or(true, |(_, fewest)| paths.len() < fewest.len()) {
                let forced = paths.len() == 1;
                best = Some((index, paths));
                if forced {
                    break;
                }
            }
        }

        if let Some((index, paths)) = &best {
            debug!("branching on color {} with {} candidate paths", pairs[*index].color(), paths.len());
        }

        best
    }

    fn commit(&mut self, pair: usize, path: &Path) {
        let color = self.pairs[pair].color();
        for &location in path.interior() {
            // candidates are enumerated against the current grid, so this only fires if state leaked between branches
            assert!(
                self.grid.is_empty(location),
                "path for color {color} crosses occupied cell {location}"
            );
            self.grid.set(location, color);
        }

        self.pending[pair] = false;
        self.remaining -= 1;
        trace!("committed color {} over {} cells", color, path.interior().len());
    }

    fn rollback(&mut self, pair: usize, path: &Path) {
        for &location in path.interior() {
            self.grid.clear(location);
        }

        self.pending[pair] = true;
        self.remaining += 1;
        trace!("rolled back color {}", self.pairs[pair].color());
    }

    fn accept(&self, stack: &[Frame]) -> Solution {
        let paths = stack.iter()
            .filter(|frame| frame.committed)
            .map(|frame| (self.pairs[frame.pair].color(), frame.candidates[frame.next - 1].clone()))
            .collect();

        Solution { grid: self.grid.snapshot(), paths }
    }

    /// Fork one branch per candidate of the first choice and search them on the rayon pool.
    ///
    /// A branch gives up once a branch with a lower candidate index has succeeded, and the lowest succeeding branch
    /// wins, which is the solution [`Self::search`] would have returned.
    #[cfg(feature = "parallel")]
    pub(crate) fn search_parallel(&mut self) -> Option<Solution> {
        use std::sync::atomic::{AtomicUsize, Ordering};

        use rayon::prelude::*;

        if self.remaining == 0 {
            return self.search(&|| false);
        }

        self.stats.states += 1;
        let (pair, candidates) = self.select_pair()?;
        let color = self.pairs[pair].color();
        let winner = AtomicUsize::new(usize::MAX);

        let branches = candidates.par_iter()
            .enumerate()
            .map(|(index, path)| {
                let mut branch = self.clone();
                branch.stats = Statistics::default();
                branch.commit(pair, path);

                let abandon = || winner.load(Ordering::Relaxed) < index;
                let solution = branch.search(&abandon).map(|mut solution| {
                    winner.fetch_min(index, Ordering::Relaxed);
                    solution.paths.insert(color, path.clone());
                    solution
                });

                (solution, branch.stats)
            })
            .collect::<Vec<_>>();

        let mut found = None;
        for (solution, stats) in branches {
            self.stats += stats;
            found = found.or(solution);
        }

        debug!("parallel search over {} branches finished after {:?}", candidates.len(), self.stats);
        found
    }
}

/// Validate `endpoints` on a `size` by `size` board and search it for a solution.
///
/// Malformed input is rejected with a [`BoardError`] before any search starts; after that the search only ever
/// yields [`SolveOutcome::Found`] or [`SolveOutcome::Exhausted`].
pub fn solve(size: usize, endpoints: &BTreeMap<ColorId, Vec<Location>>, config: &SolverConfig) -> Result<SolveOutcome, BoardError> {
    let (grid, pairs) = Grid::with_pairs(size, endpoints)?;
    Ok(run(grid, &pairs, config).0)
}

/// Run a search on `grid` for `pairs`, choosing the sequential or parallel driver from `config`.
pub(crate) fn run(grid: Grid, pairs: &[Pair], config: &SolverConfig) -> (SolveOutcome, Statistics) {
    let mut engine = SearchEngine::new(grid, pairs, config);

    #[cfg(feature = "parallel")]
    let solution = if config.parallel {
        engine.search_parallel()
    } else {
        engine.search(&|| false)
    };
    #[cfg(not(feature = "parallel"))]
    let solution = engine.search(&|| false);

    let outcome = match solution {
        Some(solution) => SolveOutcome::Found(solution),
        None => SolveOutcome::Exhausted,
    };

    (outcome, engine.statistics())
}
