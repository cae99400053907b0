use std::collections::BTreeMap;

use crate::board::Board;
use crate::color::ColorId;
use crate::error::BoardError;
use crate::grid::Grid;
use crate::location::Location;

/// A builder for square Flow Free boards.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Nothing is validated until [`Self::build`], so termini may be added in any order, one at a time or in pairs.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    size: usize,
    endpoints: BTreeMap<ColorId, Vec<Location>>,
    // colors in the order they were first mentioned
    history: Vec<ColorId>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::with_size(5)
    }
}

impl BoardBuilder {
    /// Construct a new [`Self`] for a `size` by `size` board.
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            endpoints: Default::default(),
            history: Default::default(),
        }
    }

    /// Add a single terminus of `color`. Each color needs exactly two by the time the board is built.
    pub fn add_endpoint(&mut self, color: ColorId, location: Location) -> &mut Self {
        let locations = self.endpoints.entry(color).or_default();
        if locations.is_empty() {
            self.history.push(color);
        }
        locations.push(location);

        self
    }

    /// Add both termini of `color`. The order in which `locations` are specified decides which end paths start from.
    pub fn add_termini(&mut self, color: ColorId, locations: (Location, Location)) -> &mut Self {
        self.add_endpoint(color, locations.0)
            .add_endpoint(color, locations.1)
    }

    /// Remove every terminus of the most recently introduced color.
    ///
    /// If no termini are present, this function does nothing.
    pub fn pop_termini(&mut self) -> &mut Self {
        if let Some(color) = self.history.pop() {
            self.endpoints.remove(&color);
        }

        self
    }

    /// The termini added so far, by color.
    pub fn endpoints(&self) -> &BTreeMap<ColorId, Vec<Location>> {
        &self.endpoints
    }

    /// Validate the termini added so far and convert them into a [`Board`].
    pub fn build(&self) -> Result<Board, BoardError> {
        let (grid, pairs) = Grid::with_pairs(self.size, &self.endpoints)?;
        Ok(Board { grid, pairs })
    }
}
