//! Reading boards from their textual description.
//!
//! The format is a header line `N,N` giving the board size, followed by one `row,col,color` line per terminus.
//! Coordinates are 1-indexed in the text and converted to 0-indexed [`Location`]s here.
//! Spaces anywhere on a line and blank lines are ignored.
//!
//! ```text
//! 3,3
//! 1,1,1
//! 3,3,1
//! ```

use std::str::FromStr;

use itertools::Itertools;
use log::trace;

use crate::board::Board;
use crate::builder::BoardBuilder;
use crate::color::ColorId;
use crate::error::ParseError;
use crate::location::Location;

/// Parse a board description and validate it into a [`Board`].
pub fn parse_board(text: &str) -> Result<Board, ParseError> {
    Ok(parse_builder(text)?.build()?)
}

/// Parse a board description without validating its termini.
pub fn parse_builder(text: &str) -> Result<BoardBuilder, ParseError> {
    let mut lines = text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.replace(' ', "")))
        .filter(|(_, line)| !line.trim().is_empty());

    let (header_line, header) = lines.next().ok_or(ParseError::Empty)?;
    let size = parse_header(header_line, header.trim())?;
    let mut builder = BoardBuilder::with_size(size);

    for (line, entry) in lines {
        let (location, color) = parse_endpoint(line, entry.trim())?;
        trace!("line {line}: color {color} at {location}");
        builder.add_endpoint(color, location);
    }

    Ok(builder)
}

fn parse_number(line: usize, value: &str) -> Result<usize, ParseError> {
    value.parse().map_err(|source| ParseError::BadNumber { line, value: value.to_owned(), source })
}

fn parse_header(line: usize, text: &str) -> Result<usize, ParseError> {
    let Some((rows, cols)) = text.split(',').collect_tuple() else {
        return Err(ParseError::BadHeader { line, text: text.to_owned() });
    };

    let (rows, cols) = (parse_number(line, rows)?, parse_number(line, cols)?);
    if rows != cols {
        return Err(ParseError::NotSquare { line, rows, cols });
    }

    Ok(rows)
}

fn parse_endpoint(line: usize, text: &str) -> Result<(Location, ColorId), ParseError> {
    let Some((row, col, color)) = text.split(',').collect_tuple() else {
        return Err(ParseError::BadEndpoint { line, text: text.to_owned() });
    };

    let (row, col, color) = (parse_number(line, row)?, parse_number(line, col)?, parse_number(line, color)?);
    if row == 0 || col == 0 {
        return Err(ParseError::ZeroCoordinate { line });
    }

    Ok((Location(row - 1, col - 1), color))
}

impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_board(s)
    }
}

/// What a board file's name says about it, for names like `tablero_5x5_s1.txt`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Expectation {
    /// Side length claimed by the name.
    pub size: usize,
    /// `s` (solvable) or `n` (not solvable) before the case number.
    pub solvable: bool,
    /// Case number, 1 if the name gives none.
    pub case: usize,
}

/// Read the size, expected solvability and case number encoded in a board file name, if it follows the
/// `<prefix>_<N>x<N>_<s|n><case>.txt` convention.
pub fn expectation_from_file_name(name: &str) -> Option<Expectation> {
    let stem = name.strip_suffix(".txt").unwrap_or(name);
    let mut parts = stem.split('_').skip(1);
    let (size, marker) = (parts.next()?, parts.next()?);

    let size = size.split('x').next()?.parse().ok()?;
    let solvable = match marker.chars().next()? {
        's' => true,
        'n' => false,
        _ => return None,
    };
    let case = match &marker[1..] {
        "" => 1,
        digits => digits.parse().ok()?,
    };

    Some(Expectation { size, solvable, case })
}
