use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;

pub(crate) type Coord = usize;
pub(crate) type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(row, col)` on a board. The top left corner is `Location(0, 0)`.
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Ix, Ix) {
        (self.0, self.1)
    }

    // off-board steps wrap to huge coordinates and fail the bounds check
    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    pub(crate) fn within(&self, size: Dimension) -> bool {
        self.0 < size.get() && self.1 < size.get()
    }

    /// Whether `self` and `other` are orthogonal neighbors, i.e. at Manhattan distance 1.
    pub fn is_adjacent(&self, other: &Location) -> bool {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1) == 1
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
