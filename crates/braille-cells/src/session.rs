//! Active profile selection.
//!
//! Tracks which display is attached and holds the cell map built from its
//! profile. The map is an immutable snapshot: every rebuild swaps in a new
//! `Arc`, so a holder of the previous snapshot never sees a half-built map.

use crate::device::NO_BRAILLE;
use crate::output::project;
use crate::routing::{translate_routing_key, Routing};
use crate::store::ProfileStore;
use crate::{BrailleCell, CellBuffer, CellMap, DeviceId, Error, IgnoredCells, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Selection state.
#[derive(Debug, Clone, Default)]
pub enum Selection {
    /// No braille display attached.
    #[default]
    NoDevice,
    /// A display is attached and its map is in effect.
    Active {
        device: DeviceId,
        map: Arc<CellMap>,
    },
}

/// Keeps the active cell map in step with the attached display and its profile.
///
/// Profile store failures never block output: the session carries on with no
/// ignored cells and records the failure for [`take_notice`](Self::take_notice).
pub struct ProfileSelection<S> {
    store: S,
    state: Selection,
    notice: Option<Error>,
}

impl<S: ProfileStore> ProfileSelection<S> {
    /// Creates a selection with no display attached.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: Selection::NoDevice,
            notice: None,
        }
    }

    /// Returns the profile store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the profile store mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Returns the current state.
    pub fn state(&self) -> &Selection {
        &self.state
    }

    /// Returns the attached display's identity.
    pub fn active_device(&self) -> Option<&DeviceId> {
        match &self.state {
            Selection::Active { device, .. } => Some(device),
            Selection::NoDevice => None,
        }
    }

    /// Returns a snapshot of the active map.
    pub fn active_map(&self) -> Option<Arc<CellMap>> {
        match &self.state {
            Selection::Active { map, .. } => Some(Arc::clone(map)),
            Selection::NoDevice => None,
        }
    }

    /// Returns the display width the host should render for.
    pub fn logical_cell_count(&self) -> Option<usize> {
        match &self.state {
            Selection::Active { map, .. } => Some(map.physical_count()),
            Selection::NoDevice => None,
        }
    }

    /// Handles a display being attached or detected.
    pub fn device_attached(&mut self, model: &str, total_cells: usize) -> Result<()> {
        if model.trim() == NO_BRAILLE {
            info!("No braille display selected");
            self.state = Selection::NoDevice;
            return Ok(());
        }
        if total_cells == 0 {
            self.state = Selection::NoDevice;
            return Err(Error::InvalidCellCount(total_cells));
        }
        let device = match DeviceId::new(model, total_cells) {
            Ok(device) => device,
            Err(e) => {
                self.state = Selection::NoDevice;
                return Err(e);
            }
        };

        let ignored = self.load_or_empty(&device);
        self.activate(device, &ignored)
    }

    /// Handles the display going away.
    pub fn device_detached(&mut self) {
        if let Some(device) = self.active_device() {
            info!("Braille display {} detached", device);
        }
        self.state = Selection::NoDevice;
    }

    /// Handles new ignored cells saved from settings for the active display.
    pub fn settings_saved(&mut self, ignored: IgnoredCells) -> Result<()> {
        let device = self.active_device().cloned().ok_or(Error::NoActiveDevice)?;
        let ignored = ignored.restricted_to(device.cells());
        if let Err(e) = self.store.save(&device, &ignored) {
            warn!("Failed to save profile for {}: {}", device, e);
            self.notice = Some(e);
        }
        self.activate(device, &ignored)
    }

    /// Re-reads the active display's profile and rebuilds the map.
    pub fn reload(&mut self) -> Result<()> {
        let device = self.active_device().cloned().ok_or(Error::NoActiveDevice)?;
        let ignored = self.load_or_empty(&device);
        self.activate(device, &ignored)
    }

    /// Handles the active display reporting a different cell count.
    ///
    /// A new count is a new identity, so the matching profile is loaded from
    /// scratch rather than carrying the old ignored cells over.
    pub fn cell_count_changed(&mut self, total_cells: usize) -> Result<()> {
        let device = self.active_device().cloned().ok_or(Error::NoActiveDevice)?;
        if device.cells() == total_cells {
            return Ok(());
        }
        info!(
            "Display {} now reports {} cells, reloading profile",
            device, total_cells
        );
        self.device_attached(device.model(), total_cells)
    }

    /// Takes the last profile store failure, if any, for user notification.
    pub fn take_notice(&mut self) -> Option<Error> {
        self.notice.take()
    }

    /// Runs the output filter with the active map.
    pub fn project(&self, logical: &[BrailleCell]) -> Result<CellBuffer> {
        match &self.state {
            Selection::Active { map, .. } => Ok(project(logical, map)),
            Selection::NoDevice => Err(Error::NoActiveDevice),
        }
    }

    /// Runs the input filter with the active map.
    pub fn route(&self, physical: usize) -> Result<Routing> {
        match &self.state {
            Selection::Active { map, .. } => translate_routing_key(physical, map),
            Selection::NoDevice => Err(Error::NoActiveDevice),
        }
    }

    fn load_or_empty(&mut self, device: &DeviceId) -> IgnoredCells {
        match self.store.load(device) {
            Ok(cells) => cells.restricted_to(device.cells()),
            Err(e) => {
                warn!(
                    "Failed to load profile for {}: {}. Using no ignored cells.",
                    device, e
                );
                self.notice = Some(e);
                IgnoredCells::new()
            }
        }
    }

    fn activate(&mut self, device: DeviceId, ignored: &IgnoredCells) -> Result<()> {
        let map = CellMap::build(device.cells(), ignored)?;
        info!(
            "Braille display {} active: ignoring cells [{}], {} usable",
            device,
            ignored,
            map.physical_count()
        );
        debug!("Usable slots: {:?}", map.usable_slots());
        self.state = Selection::Active {
            device,
            map: Arc::new(map),
        };
        Ok(())
    }
}
