//! Braille cell content and fixed-width cell rows.

use crate::{Error, Result};

/// First code point of the Unicode braille patterns block.
const BRAILLE_BASE: u32 = 0x2800;

/// One braille cell as an 8-dot mask (bit 0 is dot 1, bit 7 is dot 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BrailleCell(pub u8);

impl BrailleCell {
    /// All dots off.
    pub const BLANK: BrailleCell = BrailleCell(0);

    /// Returns true if no dots are raised.
    pub fn is_blank(self) -> bool {
        self.0 == 0
    }

    /// Converts a braille pattern character (`U+2800..=U+28FF`) to a cell.
    /// An ASCII space is read as a blank cell.
    pub fn from_char(c: char) -> Result<Self> {
        if c == ' ' {
            return Ok(Self::BLANK);
        }
        let offset = (c as u32)
            .checked_sub(BRAILLE_BASE)
            .filter(|&o| o <= 0xFF)
            .ok_or(Error::InvalidBrailleChar(c))?;
        Ok(Self(offset as u8))
    }

    /// Returns the braille pattern character for this cell.
    pub fn to_char(self) -> char {
        char::from_u32(BRAILLE_BASE + self.0 as u32).unwrap_or(' ')
    }
}

/// A single row of braille cells of fixed length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellBuffer {
    cells: Vec<BrailleCell>,
}

impl CellBuffer {
    /// Creates a buffer of `len` blank cells.
    pub fn new(len: usize) -> Self {
        Self {
            cells: vec![BrailleCell::BLANK; len],
        }
    }

    /// Parses a string of braille pattern characters.
    pub fn from_braille_str(text: &str) -> Result<Self> {
        let cells = text
            .chars()
            .map(BrailleCell::from_char)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { cells })
    }

    /// Returns the number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the buffer holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cells.
    pub fn cells(&self) -> &[BrailleCell] {
        &self.cells
    }

    /// Consumes the buffer, returning its cells.
    pub fn into_cells(self) -> Vec<BrailleCell> {
        self.cells
    }

    /// Gets the cell at `index`.
    pub fn get(&self, index: usize) -> Option<BrailleCell> {
        self.cells.get(index).copied()
    }

    /// Sets the cell at `index`. Writes past the end are ignored.
    pub fn set(&mut self, index: usize, cell: BrailleCell) {
        if let Some(slot) = self.cells.get_mut(index) {
            *slot = cell;
        }
    }

    /// Renders the row as braille pattern characters.
    pub fn to_braille_string(&self) -> String {
        self.cells.iter().map(|c| c.to_char()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_conversion() {
        assert_eq!(BrailleCell::from_char('⠀').unwrap(), BrailleCell::BLANK);
        assert_eq!(BrailleCell::from_char('⠁').unwrap(), BrailleCell(0x01));
        assert_eq!(BrailleCell::from_char('⣿').unwrap(), BrailleCell(0xFF));
        assert_eq!(BrailleCell::from_char(' ').unwrap(), BrailleCell::BLANK);
        assert_eq!(BrailleCell(0x07).to_char(), '⠇');
        assert!(matches!(
            BrailleCell::from_char('a'),
            Err(Error::InvalidBrailleChar('a'))
        ));
    }

    #[test]
    fn test_buffer_ops() {
        let mut buf = CellBuffer::new(4);
        assert_eq!(buf.len(), 4);
        assert!(buf.cells().iter().all(|c| c.is_blank()));

        buf.set(2, BrailleCell(0x3F));
        assert_eq!(buf.get(2), Some(BrailleCell(0x3F)));
        buf.set(9, BrailleCell(0x01));
        assert_eq!(buf.get(9), None);
    }

    #[test]
    fn test_braille_string() {
        let buf = CellBuffer::from_braille_str("⠓⠑ ⠇").unwrap();
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.to_braille_string(), "⠓⠑⠀⠇");
        assert!(CellBuffer::from_braille_str("⠓x").is_err());
    }
}
