use thiserror::Error;

use crate::color::ColorId;
use crate::location::Location;

/// Reasons a board may be rejected while building.
///
/// These are detected once, before any search starts. A board that builds successfully never fails to solve with an
/// error; it either yields a solution or reports that none was found.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum BoardError {
    /// The board has no cells.
    #[error("board size must be positive")]
    InvalidBoardSize,
    /// A terminus lies outside a board of the given size.
    #[error("terminus {location} of color {color} lies outside a {size}x{size} board")]
    InvalidEndpoint {
        /// Color of the offending terminus.
        color: ColorId,
        /// Where it was placed.
        location: Location,
        /// Side length of the board.
        size: usize,
    },
    /// A color does not have exactly two distinct termini.
    #[error("color {color} has {count} distinct termini, expected exactly 2")]
    InvalidPairCount {
        /// The color at fault.
        color: ColorId,
        /// Distinct termini given for it.
        count: usize,
    },
    /// Color 0 is reserved for empty cells.
    #[error("color 0 is reserved for empty cells")]
    InvalidColor,
    /// Two colors claim the same cell.
    #[error("cell {location} is claimed by colors {first} and {second}")]
    SharedEndpoint {
        /// The contested cell.
        location: Location,
        /// The lower of the two colors.
        first: ColorId,
        /// The higher of the two colors.
        second: ColorId,
    },
}

/// Reasons the textual board description could not be read.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The text has no non-blank line.
    #[error("board description is empty")]
    Empty,
    /// The first line is not two comma-separated numbers.
    #[error("line {line}: expected a header of the form `N,N`, got `{text}`")]
    BadHeader {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },
    /// The header describes a rectangular board.
    #[error("line {line}: only square boards are supported, got {rows}x{cols}")]
    NotSquare {
        /// 1-based line number.
        line: usize,
        /// Declared row count.
        rows: usize,
        /// Declared column count.
        cols: usize,
    },
    /// A terminus line is not three comma-separated numbers.
    #[error("line {line}: expected `row,col,color`, got `{text}`")]
    BadEndpoint {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },
    /// A field is not a non-negative integer.
    #[error("line {line}: invalid number `{value}`")]
    BadNumber {
        /// 1-based line number.
        line: usize,
        /// The field that failed to parse.
        value: String,
        /// Why it failed.
        #[source]
        source: std::num::ParseIntError,
    },
    /// A row or column of 0, which the 1-indexed format cannot express.
    #[error("line {line}: coordinates are 1-indexed, got 0")]
    ZeroCoordinate {
        /// 1-based line number.
        line: usize,
    },
    /// The text was well formed but its termini were not.
    #[error(transparent)]
    Board(#[from] BoardError),
}
