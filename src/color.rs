use unordered_pair::UnorderedPair;

use crate::location::Location;

/// Identifies a color, and with it the pair of termini sharing that color.
/// Valid colors start at 1.
pub type ColorId = usize;

/// The color held by a cell no path covers yet.
pub const EMPTY: ColorId = 0;

/// A color together with its two termini.
///
/// Paths are always enumerated from `termini.0` towards `termini.1`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Pair {
    pub(crate) color: ColorId,
    pub(crate) termini: UnorderedPair<Location>,
}

impl Pair {
    /// The color shared by both termini.
    pub fn color(&self) -> ColorId {
        self.color
    }

    /// The terminus paths are enumerated from.
    pub fn start(&self) -> Location {
        self.termini.0
    }

    /// The terminus paths are enumerated towards.
    pub fn end(&self) -> Location {
        self.termini.1
    }
}
