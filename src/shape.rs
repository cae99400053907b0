use std::hash::Hash;

use strum::VariantArray;

use crate::location::Location;

/// Movement between neighboring cells of a board.
///
/// The order of `Self::VARIANTS` is the order in which path enumeration explores neighbors.
/// It decides which of several valid solutions is found first, never whether one is found.
pub trait Step: Sized + Copy + VariantArray + PartialEq + Eq + Hash {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// The result may lie off the board; callers bounds-check it.
    fn attempt_from(&self, location: Location) -> Location;

    /// Every neighbor of `location` in "theory", in exploration order, whether or not it lies on the board.
    fn neighbors_of(location: Location) -> impl Iterator<Item = Location> {
        Self::VARIANTS.iter().map(move |dir| dir.attempt_from(location))
    }
}

/// The square cell type of a Flow Free board.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl Step for SquareStep {
    fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((-1, 0)),
            Self::Down => location.offset_by((1, 0)),
            Self::Left => location.offset_by((0, -1)),
            Self::Right => location.offset_by((0, 1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exploration_order_is_up_down_left_right() {
        let around = SquareStep::neighbors_of(Location(1, 1)).collect::<Vec<_>>();
        assert_eq!(around, vec![Location(0, 1), Location(2, 1), Location(1, 0), Location(1, 2)]);
    }

    #[test]
    fn off_board_steps_wrap() {
        let above = SquareStep::Up.attempt_from(Location(0, 3));
        assert_eq!(above.1, 3);
        assert_eq!(above.0, usize::MAX);
    }
}
