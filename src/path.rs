use std::marker::PhantomData;
use std::num::NonZero;

use ndarray::Array2;

use crate::grid::Grid;
use crate::location::Location;
use crate::shape::{SquareStep, Step};

/// A simple orthogonal path between two termini, both included.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Path(Vec<Location>);

impl Path {
    /// Every cell on the path, from start to end.
    pub fn cells(&self) -> &[Location] {
        &self.0
    }

    /// The cells strictly between the two termini.
    pub fn interior(&self) -> &[Location] {
        match self.0.len() {
            0..=2 => &[],
            len => &self.0[1..len - 1],
        }
    }

    /// The terminus the path was enumerated from.
    pub fn start(&self) -> Location {
        self.0[0]
    }

    /// The terminus the path was enumerated towards.
    pub fn end(&self) -> Location {
        self.0[self.0.len() - 1]
    }
}

/// Enumerate simple paths from `start` to `end` over cells of `grid` which are empty, stopping after `limit` paths.
///
/// Neighbors are tried in [`SquareStep`] declaration order (up, down, left, right), so the output order is fixed for a
/// given grid.
/// `end` may be entered even though its terminus occupies it.
///
/// Stopping at `limit` trades completeness for bounded work on large open boards: a search built on this may miss a
/// solution that only uses a path past the limit.
pub fn enumerate_paths(grid: &Grid, start: Location, end: Location, limit: NonZero<usize>) -> Vec<Path> {
    PathEnumerator::<SquareStep>::new(grid, end, limit).run(start)
}

/// Depth-first walker holding the in-progress path as a single push/pop buffer.
struct PathEnumerator<'g, Sh: Step> {
    grid: &'g Grid,
    end: Location,
    limit: usize,
    on_path: Array2<bool>,
    buffer: Vec<Location>,
    found: Vec<Path>,
    shape: PhantomData<Sh>,
}

impl<'g, Sh: Step> PathEnumerator<'g, Sh> {
    fn new(grid: &'g Grid, end: Location, limit: NonZero<usize>) -> Self {
        Self {
            grid,
            end,
            limit: limit.get(),
            on_path: Array2::from_elem((grid.size(), grid.size()), false),
            buffer: Vec::with_capacity(grid.size() * grid.size()),
            found: Vec::new(),
            shape: PhantomData,
        }
    }

    fn run(mut self, start: Location) -> Vec<Path> {
        self.enter(start);
        self.walk(start);
        self.leave(start);

        self.found
    }

    fn enter(&mut self, location: Location) {
        self.on_path[location.as_index()] = true;
        self.buffer.push(location);
    }

    fn leave(&mut self, location: Location) {
        self.on_path[location.as_index()] = false;
        self.buffer.pop();
    }

    fn can_step_to(&self, location: Location) -> bool {
        location.within(self.grid.dimension())
            && !self.on_path[location.as_index()]
            && (location == self.end || self.grid.is_empty(location))
    }

    fn walk(&mut self, at: Location) {
        if self.found.len() >= self.limit {
            return;
        }

        if at == self.end {
            self.found.push(Path(self.buffer.clone()));
            return;
        }

        for next in Sh::neighbors_of(at) {
            if self.can_step_to(next) {
                self.enter(next);
                self.walk(next);
                self.leave(next);
            }
        }
    }
}
