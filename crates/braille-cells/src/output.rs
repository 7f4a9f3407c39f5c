//! Output filter: lays logical content onto the physical row.

use crate::{BrailleCell, CellBuffer, CellMap};

/// Projects a logical cell row onto a full-width physical row.
///
/// Ignored slots stay blank. Logical cells beyond the usable count are
/// truncated, as the host already expects for content wider than the display.
/// The result always has `map.total_cells()` cells.
pub fn project(logical: &[BrailleCell], map: &CellMap) -> CellBuffer {
    let mut physical = CellBuffer::new(map.total_cells());
    for (&slot, &cell) in map.usable_slots().iter().zip(logical) {
        physical.set(slot, cell);
    }
    physical
}
