//! Input filter: translates routing key presses to logical positions.

use crate::{CellMap, Error, Result};

/// Outcome of translating a routing key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routing {
    /// Forward to the host as this logical cell index.
    Logical(usize),
    /// The key sits over an ignored cell; the host must do nothing.
    Suppressed,
}

impl Routing {
    /// Returns the logical index, or `None` if suppressed.
    pub fn logical(self) -> Option<usize> {
        match self {
            Routing::Logical(index) => Some(index),
            Routing::Suppressed => None,
        }
    }
}

/// Translates a 0-based physical routing key index.
///
/// Indices outside the display mean the host and driver disagree about the
/// display size and fail with [`Error::OutOfRange`].
pub fn translate_routing_key(physical: usize, map: &CellMap) -> Result<Routing> {
    Ok(match map.physical_to_logical(physical)? {
        Some(logical) => Routing::Logical(logical),
        None => Routing::Suppressed,
    })
}

/// Translates every key of a chord on its own.
pub fn translate_routing_keys(keys: &[usize], map: &CellMap) -> Result<Vec<Routing>> {
    keys.iter()
        .map(|&key| translate_routing_key(key, map))
        .collect()
}

/// Converts a 1-based hardware routing index to the 0-based form.
pub fn normalize_one_based(key: usize, total_cells: usize) -> Result<usize> {
    key.checked_sub(1).ok_or(Error::OutOfRange {
        index: key,
        total: total_cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IgnoredCells;

    fn map_3_7() -> CellMap {
        let ignored: IgnoredCells = [3, 7].into_iter().collect();
        CellMap::build(10, &ignored).unwrap()
    }

    #[test]
    fn test_ignored_key_suppressed() {
        let map = map_3_7();
        assert_eq!(translate_routing_key(6, &map).unwrap(), Routing::Suppressed);
        assert_eq!(translate_routing_key(2, &map).unwrap(), Routing::Suppressed);
    }

    #[test]
    fn test_shifted_key() {
        let map = map_3_7();
        assert_eq!(translate_routing_key(0, &map).unwrap(), Routing::Logical(0));
        assert_eq!(translate_routing_key(5, &map).unwrap(), Routing::Logical(4));
        assert_eq!(translate_routing_key(9, &map).unwrap(), Routing::Logical(7));
    }

    #[test]
    fn test_out_of_range() {
        let map = map_3_7();
        assert!(matches!(
            translate_routing_key(10, &map),
            Err(Error::OutOfRange { index: 10, total: 10 })
        ));
    }

    #[test]
    fn test_all_suppressed() {
        let ignored: IgnoredCells = (1..=5).collect();
        let map = CellMap::build(5, &ignored).unwrap();
        for p in 0..5 {
            assert_eq!(translate_routing_key(p, &map).unwrap(), Routing::Suppressed);
        }
    }

    #[test]
    fn test_chord_keys_independent() {
        let map = map_3_7();
        let routed = translate_routing_keys(&[1, 2, 3], &map).unwrap();
        assert_eq!(
            routed,
            vec![Routing::Logical(1), Routing::Suppressed, Routing::Logical(2)]
        );
        assert!(translate_routing_keys(&[1, 12], &map).is_err());
    }

    #[test]
    fn test_one_based() {
        assert_eq!(normalize_one_based(1, 40).unwrap(), 0);
        assert_eq!(normalize_one_based(40, 40).unwrap(), 39);
        assert!(normalize_one_based(0, 40).is_err());
        assert_eq!(Routing::Logical(3).logical(), Some(3));
        assert_eq!(Routing::Suppressed.logical(), None);
    }
}
