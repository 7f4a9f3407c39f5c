//! Ignored cell sets.
//!
//! Cell numbers here are 1-based, matching what users type into settings.
//! Everything downstream of [`CellMap::build`](crate::CellMap::build) is 0-based.

use crate::error::join_cells;
use crate::{Error, Result};
use std::collections::BTreeSet;
use tracing::warn;

/// A set of 1-based cell numbers the user has declared broken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IgnoredCells {
    cells: BTreeSet<usize>,
}

impl IgnoredCells {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from raw values, dropping anything outside `1..=total_cells`.
    pub fn normalized<I>(values: I, total_cells: usize) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let mut cells = BTreeSet::new();
        for value in values {
            match usize::try_from(value) {
                Ok(cell) if (1..=total_cells).contains(&cell) => {
                    cells.insert(cell);
                }
                _ => warn!(
                    "Dropping ignored cell {} (display has {} cells)",
                    value, total_cells
                ),
            }
        }
        Self { cells }
    }

    /// Leniently parses a comma-separated list, dropping unparsable tokens
    /// and values outside `1..=total_cells`.
    pub fn from_lenient_str(text: &str, total_cells: usize) -> Self {
        let values = text.split(',').filter_map(|token| {
            let token = token.trim();
            if token.is_empty() {
                return None;
            }
            match token.parse::<i64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!("Dropping unparsable ignored cell entry {:?}", token);
                    None
                }
            }
        });
        Self::normalized(values, total_cells)
    }

    /// Returns true if `cell` (1-based) is ignored.
    pub fn contains(&self, cell: usize) -> bool {
        self.cells.contains(&cell)
    }

    /// Returns the number of ignored cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if no cells are ignored.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates the 1-based cell numbers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().copied()
    }

    /// Returns the cell numbers as an ascending vector.
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }

    /// Returns a copy restricted to `1..=total_cells`.
    pub fn restricted_to(&self, total_cells: usize) -> Self {
        Self {
            cells: self.cells.range(1..=total_cells).copied().collect(),
        }
    }
}

impl FromIterator<usize> for IgnoredCells {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().filter(|&c| c >= 1).collect(),
        }
    }
}

impl std::fmt::Display for IgnoredCells {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&join_cells(&self.to_vec()))
    }
}

/// Strictly parses ignored cells typed into the settings surface.
///
/// Unlike [`IgnoredCells::from_lenient_str`], bad input is reported rather than
/// dropped so the user can correct it. `max_cells == 0` skips the upper bound
/// check (no display connected).
pub fn parse_cell_list(text: &str, max_cells: usize) -> Result<IgnoredCells> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(IgnoredCells::new());
    }
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || c == ',' || c == ' ')
    {
        return Err(Error::InvalidCharacters);
    }

    let mut cells = BTreeSet::new();
    let mut out_of_range = Vec::new();
    for token in text.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let value: usize = token
            .parse()
            .map_err(|_| Error::InvalidNumber(token.to_string()))?;
        if value < 1 {
            return Err(Error::CellBelowOne);
        }
        if max_cells > 0 && value > max_cells {
            out_of_range.push(value);
        } else {
            cells.insert(value);
        }
    }

    if !out_of_range.is_empty() {
        return Err(Error::CellsExceedDisplay {
            cells: out_of_range,
            max: max_cells,
        });
    }
    Ok(IgnoredCells { cells })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_drops_out_of_range() {
        let cells = IgnoredCells::normalized([0, 3, 7, 7, 41, -2], 40);
        assert_eq!(cells.to_vec(), vec![3, 7]);
    }

    #[test]
    fn test_lenient_str() {
        let cells = IgnoredCells::from_lenient_str("7, x, 3,,41, 3", 40);
        assert_eq!(cells.to_vec(), vec![3, 7]);
        assert!(IgnoredCells::from_lenient_str("", 40).is_empty());
    }

    #[test]
    fn test_display() {
        let cells: IgnoredCells = [7, 3, 12].into_iter().collect();
        assert_eq!(cells.to_string(), "3, 7, 12");
        assert_eq!(IgnoredCells::new().to_string(), "");
    }

    #[test]
    fn test_restricted_to() {
        let cells: IgnoredCells = [1, 20, 40].into_iter().collect();
        assert_eq!(cells.restricted_to(20).to_vec(), vec![1, 20]);
    }

    #[test]
    fn test_parse_cell_list_valid() {
        let cells = parse_cell_list(" 7, 3 ,, 3 ", 40).unwrap();
        assert_eq!(cells.to_vec(), vec![3, 7]);
        assert!(parse_cell_list("   ", 40).unwrap().is_empty());
    }

    #[test]
    fn test_parse_cell_list_errors() {
        assert!(matches!(
            parse_cell_list("3; 4", 40),
            Err(Error::InvalidCharacters)
        ));
        assert!(matches!(
            parse_cell_list("-1", 40),
            Err(Error::InvalidCharacters)
        ));
        assert!(matches!(
            parse_cell_list("3 4", 40),
            Err(Error::InvalidNumber(ref t)) if t == "3 4"
        ));
        assert!(matches!(parse_cell_list("0, 2", 40), Err(Error::CellBelowOne)));
        match parse_cell_list("2, 41, 50", 40) {
            Err(Error::CellsExceedDisplay { cells, max }) => {
                assert_eq!(cells, vec![41, 50]);
                assert_eq!(max, 40);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_cell_list_without_display() {
        let cells = parse_cell_list("1, 200", 0).unwrap();
        assert_eq!(cells.to_vec(), vec![1, 200]);
    }
}
