//! Persistence of ignored cell profiles.

use crate::{DeviceId, IgnoredCells, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Keyed storage for ignored cell profiles.
///
/// Only profiles with at least one ignored cell are kept: saving an empty
/// set removes the profile.
pub trait ProfileStore {
    /// Loads the ignored cells for `id`. Unknown identities yield an empty set.
    fn load(&self, id: &DeviceId) -> Result<IgnoredCells>;

    /// Saves the ignored cells for `id`.
    fn save(&mut self, id: &DeviceId, cells: &IgnoredCells) -> Result<()>;

    /// Lists identities that have a stored profile, in key order.
    fn list_known_profiles(&self) -> Result<Vec<DeviceId>>;

    /// Deletes the profile for `id`. Returns true if one existed.
    fn delete(&mut self, id: &DeviceId) -> Result<bool>;
}

/// In-memory profile store.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    profiles: BTreeMap<DeviceId, IgnoredCells>,
}

impl MemoryProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self, id: &DeviceId) -> Result<IgnoredCells> {
        Ok(self.profiles.get(id).cloned().unwrap_or_default())
    }

    fn save(&mut self, id: &DeviceId, cells: &IgnoredCells) -> Result<()> {
        let cells = cells.restricted_to(id.cells());
        if cells.is_empty() {
            self.profiles.remove(id);
        } else {
            self.profiles.insert(id.clone(), cells);
        }
        Ok(())
    }

    fn list_known_profiles(&self) -> Result<Vec<DeviceId>> {
        Ok(self.profiles.keys().cloned().collect())
    }

    fn delete(&mut self, id: &DeviceId) -> Result<bool> {
        Ok(self.profiles.remove(id).is_some())
    }
}

/// On-disk layout of the profile file.
///
/// Values are kept as raw TOML so one malformed entry cannot take the others
/// down with it.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    profiles: BTreeMap<String, toml::Value>,
}

/// Reads a stored cell list: an array of numbers or a comma-separated string.
/// Non-integer array elements are dropped; any other value type is `None`.
fn cells_from_value(value: &toml::Value, total_cells: usize) -> Option<IgnoredCells> {
    match value {
        toml::Value::Array(items) => {
            let values = items.iter().filter_map(|item| match item.as_integer() {
                Some(v) => Some(v),
                None => {
                    warn!("Dropping non-integer ignored cell entry {}", item);
                    None
                }
            });
            Some(IgnoredCells::normalized(values, total_cells))
        }
        toml::Value::String(text) => Some(IgnoredCells::from_lenient_str(text, total_cells)),
        _ => None,
    }
}

/// Profile store backed by a TOML file.
///
/// ```toml
/// [profiles]
/// "baum:40" = [3, 7]
/// "alva:80" = "1, 2, 5"
/// ```
#[derive(Debug, Clone)]
pub struct TomlProfileStore {
    path: PathBuf,
}

impl TomlProfileStore {
    /// Creates a store for the given file. The file is not touched until used.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and normalizes every profile. A missing file is an empty store.
    fn read_all(&self) -> Result<BTreeMap<DeviceId, IgnoredCells>> {
        if !self.path.exists() {
            debug!("Profile store {:?} does not exist yet", self.path);
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let file: ProfileFile = toml::from_str(&content)?;

        let mut profiles = BTreeMap::new();
        for (key, stored) in file.profiles {
            let id: DeviceId = match key.parse() {
                Ok(id) => id,
                Err(e) => {
                    warn!("Skipping profile {:?}: {}", key, e);
                    continue;
                }
            };
            let cells = match cells_from_value(&stored, id.cells()) {
                Some(cells) => cells,
                None => {
                    warn!("Skipping profile {:?}: unsupported value {}", key, stored);
                    continue;
                }
            };
            if !cells.is_empty() {
                profiles.insert(id, cells);
            }
        }
        Ok(profiles)
    }

    fn write_all(&self, profiles: &BTreeMap<DeviceId, IgnoredCells>) -> Result<()> {
        let file = ProfileFile {
            profiles: profiles
                .iter()
                .filter(|(_, cells)| !cells.is_empty())
                .map(|(id, cells)| {
                    let values = cells
                        .iter()
                        .map(|c| toml::Value::Integer(c as i64))
                        .collect();
                    (id.key(), toml::Value::Array(values))
                })
                .collect(),
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(&file)?;
        std::fs::write(&self.path, content)?;
        debug!("Wrote {} profiles to {:?}", profiles.len(), self.path);
        Ok(())
    }
}

impl ProfileStore for TomlProfileStore {
    fn load(&self, id: &DeviceId) -> Result<IgnoredCells> {
        Ok(self.read_all()?.remove(id).unwrap_or_default())
    }

    fn save(&mut self, id: &DeviceId, cells: &IgnoredCells) -> Result<()> {
        let mut profiles = self.read_all()?;
        let cells = cells.restricted_to(id.cells());
        if cells.is_empty() {
            profiles.remove(id);
        } else {
            profiles.insert(id.clone(), cells);
        }
        self.write_all(&profiles)
    }

    fn list_known_profiles(&self) -> Result<Vec<DeviceId>> {
        Ok(self.read_all()?.into_keys().collect())
    }

    fn delete(&mut self, id: &DeviceId) -> Result<bool> {
        let mut profiles = self.read_all()?;
        let existed = profiles.remove(id).is_some();
        if existed {
            self.write_all(&profiles)?;
        }
        Ok(existed)
    }
}
