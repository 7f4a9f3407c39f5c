//! Mapping between logical and physical cell positions.
//!
//! Physical slots are walked left to right; every slot that is not ignored
//! gets the next logical index. Content therefore keeps its order and closes
//! up over broken cells.

use crate::{Error, IgnoredCells, Result};
use tracing::debug;

/// Logical/physical cell mapping for one single-row display.
///
/// All indices are 0-based. Only [`CellMap::build`] takes 1-based cell numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMap {
    total_cells: usize,
    /// Physical slot for each logical index, strictly increasing.
    logical_to_physical: Vec<usize>,
    /// Logical index for each physical slot, `None` where the cell is ignored.
    physical_to_logical: Vec<Option<usize>>,
}

impl CellMap {
    /// Builds the map for a display of `total_cells` with the given 1-based
    /// ignored cells. Ignored numbers outside `1..=total_cells` are dropped.
    pub fn build(total_cells: usize, ignored: &IgnoredCells) -> Result<Self> {
        if total_cells == 0 {
            return Err(Error::InvalidCellCount(total_cells));
        }

        let mut logical_to_physical = Vec::with_capacity(total_cells);
        let mut physical_to_logical = Vec::with_capacity(total_cells);
        for slot in 0..total_cells {
            if ignored.contains(slot + 1) {
                physical_to_logical.push(None);
            } else {
                physical_to_logical.push(Some(logical_to_physical.len()));
                logical_to_physical.push(slot);
            }
        }

        debug!(
            "Built cell map: {} cells, {} usable",
            total_cells,
            logical_to_physical.len()
        );

        Ok(Self {
            total_cells,
            logical_to_physical,
            physical_to_logical,
        })
    }

    /// Builds a map with no ignored cells.
    pub fn identity(total_cells: usize) -> Result<Self> {
        Self::build(total_cells, &IgnoredCells::new())
    }

    /// Returns the number of hardware cells.
    pub fn total_cells(&self) -> usize {
        self.total_cells
    }

    /// Returns the number of usable cells, which is also the display width
    /// the host should render for. May be zero.
    pub fn physical_count(&self) -> usize {
        self.logical_to_physical.len()
    }

    /// Returns the physical slot showing logical index `logical`, or `None`
    /// if the logical index is past the usable cells.
    pub fn logical_to_physical(&self, logical: usize) -> Option<usize> {
        self.logical_to_physical.get(logical).copied()
    }

    /// Returns the logical index shown at physical slot `physical`, or
    /// `Ok(None)` if that cell is ignored.
    pub fn physical_to_logical(&self, physical: usize) -> Result<Option<usize>> {
        self.physical_to_logical
            .get(physical)
            .copied()
            .ok_or(Error::OutOfRange {
                index: physical,
                total: self.total_cells,
            })
    }

    /// Returns true if physical slot `physical` is ignored. Out-of-range
    /// slots are not ignored.
    pub fn is_ignored(&self, physical: usize) -> bool {
        matches!(self.physical_to_logical.get(physical), Some(None))
    }

    /// Iterates the 0-based physical slots that are ignored.
    pub fn ignored_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.physical_to_logical
            .iter()
            .enumerate()
            .filter_map(|(slot, logical)| logical.is_none().then_some(slot))
    }

    /// Returns the usable physical slots in logical order.
    pub fn usable_slots(&self) -> &[usize] {
        &self.logical_to_physical
    }

    /// Returns true if no cell is ignored.
    pub fn is_identity(&self) -> bool {
        self.physical_count() == self.total_cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ignored(cells: &[usize]) -> IgnoredCells {
        cells.iter().copied().collect()
    }

    #[test]
    fn test_skips_ignored_cells() {
        let map = CellMap::build(10, &ignored(&[3, 7])).unwrap();
        assert_eq!(map.total_cells(), 10);
        assert_eq!(map.physical_count(), 8);
        assert_eq!(map.logical_to_physical(0), Some(0));
        assert_eq!(map.logical_to_physical(1), Some(1));
        assert_eq!(map.logical_to_physical(2), Some(3));
        assert_eq!(map.logical_to_physical(5), Some(7));
        assert_eq!(map.logical_to_physical(7), Some(9));
        assert_eq!(map.logical_to_physical(8), None);
    }

    #[test]
    fn test_inverse() {
        let map = CellMap::build(10, &ignored(&[3, 7])).unwrap();
        assert_eq!(map.physical_to_logical(2).unwrap(), None);
        assert_eq!(map.physical_to_logical(6).unwrap(), None);
        assert_eq!(map.physical_to_logical(3).unwrap(), Some(2));
        assert_eq!(map.physical_to_logical(5).unwrap(), Some(4));
        assert_eq!(map.physical_to_logical(9).unwrap(), Some(7));
        assert!(matches!(
            map.physical_to_logical(10),
            Err(Error::OutOfRange { index: 10, total: 10 })
        ));
        assert_eq!(map.ignored_slots().collect::<Vec<_>>(), vec![2, 6]);
    }

    #[test]
    fn test_all_ignored() {
        let map = CellMap::build(5, &ignored(&[1, 2, 3, 4, 5])).unwrap();
        assert_eq!(map.physical_count(), 0);
        assert_eq!(map.logical_to_physical(0), None);
        for p in 0..5 {
            assert!(map.is_ignored(p));
            assert_eq!(map.physical_to_logical(p).unwrap(), None);
        }
    }

    #[test]
    fn test_out_of_range_ignored_dropped() {
        let map = CellMap::build(40, &ignored(&[41])).unwrap();
        assert_eq!(map, CellMap::identity(40).unwrap());
        assert!(map.is_identity());
    }

    #[test]
    fn test_zero_cells_rejected() {
        assert!(matches!(
            CellMap::build(0, &IgnoredCells::new()),
            Err(Error::InvalidCellCount(0))
        ));
    }

    #[test]
    fn test_first_and_last_ignored() {
        let map = CellMap::build(4, &ignored(&[1, 4])).unwrap();
        assert_eq!(map.usable_slots(), &[1, 2]);
        assert!(!map.is_ignored(4));
    }
}
