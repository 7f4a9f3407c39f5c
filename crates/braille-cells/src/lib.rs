//! Braille Cell Remapping Library
//!
//! Skips user-declared broken cells on a single-row braille display. Content
//! is shifted onto the remaining cells on the way out, and routing keys over
//! broken cells are suppressed on the way in.

pub mod cell_map;
pub mod cells;
pub mod device;
pub mod error;
pub mod ignored;
pub mod output;
pub mod routing;
pub mod session;
pub mod store;

pub use cell_map::CellMap;
pub use cells::{BrailleCell, CellBuffer};
pub use device::DeviceId;
pub use error::{Error, Result};
pub use ignored::{parse_cell_list, IgnoredCells};
pub use output::project;
pub use routing::{normalize_one_based, translate_routing_key, translate_routing_keys, Routing};
pub use session::{ProfileSelection, Selection};
pub use store::{MemoryProfileStore, ProfileStore, TomlProfileStore};
