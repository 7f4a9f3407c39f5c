//! Error types for the braille cell remapping library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or applying a cell map.
#[derive(Error, Debug)]
pub enum Error {
    /// A display must have at least one cell.
    #[error("Invalid cell count: {0} (must be at least 1)")]
    InvalidCellCount(usize),

    /// A physical or logical index outside the map's domain.
    #[error("Cell index {index} out of range (display has {total} cells)")]
    OutOfRange { index: usize, total: usize },

    /// Device identity string not in `model:cells` form.
    #[error("Invalid device identity: {0}")]
    InvalidDeviceId(String),

    /// Ignored cell entry contains something other than digits, commas and spaces.
    #[error("Only numbers and commas are allowed")]
    InvalidCharacters,

    /// Ignored cell entry token is not a number.
    #[error("\"{0}\" is not a valid number")]
    InvalidNumber(String),

    /// Ignored cell numbers are 1-based.
    #[error("Cell numbers must be at least 1")]
    CellBelowOne,

    /// Ignored cell numbers beyond the end of the display.
    #[error("Cell numbers {} exceed display size ({max} cells)", join_cells(.cells))]
    CellsExceedDisplay { cells: Vec<usize>, max: usize },

    /// Character outside the Unicode braille patterns block.
    #[error("Not a braille pattern character: {0:?}")]
    InvalidBrailleChar(char),

    /// Operation requires an attached display.
    #[error("No braille display is active")]
    NoActiveDevice,

    /// Profile store I/O error.
    #[error("Profile store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Profile store contents could not be parsed.
    #[error("Profile store parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Profile store contents could not be serialized.
    #[error("Profile store serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Formats 1-based cell numbers the way the settings surface shows them.
pub(crate) fn join_cells(cells: &[usize]) -> String {
    cells
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
