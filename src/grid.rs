use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::num::NonZero;

use itertools::Itertools;
use ndarray::Array2;
use unordered_pair::UnorderedPair;

use crate::color::{ColorId, Pair, EMPTY};
use crate::error::BoardError;
use crate::location::{Dimension, Location};

/// The square store of cell colors a search works on.
///
/// Queries and mutations take in-bounds [`Location`]s; passing anything else is a bug in the caller and panics.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    size: Dimension,
    cells: Array2<ColorId>,
}

impl Grid {
    /// Allocate an empty `size` by `size` grid and mark every terminus in `endpoints` with its color.
    pub fn new(size: usize, endpoints: &BTreeMap<ColorId, Vec<Location>>) -> Result<Self, BoardError> {
        Self::with_pairs(size, endpoints).map(|(grid, _)| grid)
    }

    /// As [`Self::new`], also returning the validated pairs in ascending color order.
    pub(crate) fn with_pairs(size: usize, endpoints: &BTreeMap<ColorId, Vec<Location>>) -> Result<(Self, Vec<Pair>), BoardError> {
        let size = NonZero::new(size).ok_or(BoardError::InvalidBoardSize)?;
        let mut grid = Self {
            size,
            cells: Array2::from_elem((size.get(), size.get()), EMPTY),
        };
        let mut pairs = Vec::with_capacity(endpoints.len());

        for (&color, locations) in endpoints {
            if color == EMPTY {
                return Err(BoardError::InvalidColor);
            }

            if let Some(&location) = locations.iter().find(|location| !location.within(size)) {
                return Err(BoardError::InvalidEndpoint { color, location, size: size.get() });
            }

            // the same cell listed twice is still one terminus
            let distinct = locations.iter().copied().unique().collect_vec();
            let &[start, end] = distinct.as_slice() else {
                return Err(BoardError::InvalidPairCount { color, count: distinct.len() });
            };

            for location in [start, end] {
                match grid.color_at(location) {
                    EMPTY => grid.set(location, color),
                    first => return Err(BoardError::SharedEndpoint { location, first, second: color }),
                }
            }

            pairs.push(Pair { color, termini: UnorderedPair(start, end) });
        }

        Ok((grid, pairs))
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size.get()
    }

    pub(crate) fn dimension(&self) -> Dimension {
        self.size
    }

    /// Whether no color occupies `location`.
    pub fn is_empty(&self, location: Location) -> bool {
        self.color_at(location) == EMPTY
    }

    /// The color at `location`, [`EMPTY`] if none.
    pub fn color_at(&self, location: Location) -> ColorId {
        self.cells[location.as_index()]
    }

    /// The color at `location`, or [`None`] if it lies off the grid.
    pub fn get(&self, location: Location) -> Option<ColorId> {
        self.cells.get(location.as_index()).copied()
    }

    pub(crate) fn set(&mut self, location: Location, color: ColorId) {
        self.cells[location.as_index()] = color;
    }

    pub(crate) fn clear(&mut self, location: Location) {
        self.set(location, EMPTY);
    }

    /// Whether every cell holds a color.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&color| color != EMPTY)
    }

    /// A deep copy, unaffected by any later mutation of `self`.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Copy the grid out as rows of colors, top to bottom.
    pub fn to_rows(&self) -> Vec<Vec<ColorId>> {
        self.cells.rows().into_iter().map(|row| row.to_vec()).collect_vec()
    }
}

impl Display for Grid {
    /// Rows of right-aligned color numbers separated by single spaces; empty cells print as `.`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let width = self.cells.iter().max().map_or(1, |max| max.to_string().len());

        for row in self.cells.rows() {
            let line = row.iter()
                .map(|&color| match color {
                    EMPTY => format!("{:>width$}", "."),
                    color => format!("{color:>width$}"),
                })
                .join(" ");
            writeln!(f, "{line}")?;
        }

        Ok(())
    }
}
