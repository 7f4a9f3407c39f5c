//! Braille display identity.
//!
//! Ignored cells are stored per display model and cell count, so the same
//! driver with a different display size gets its own profile.

use crate::{Error, Result};
use std::str::FromStr;

/// Driver name the host uses when no display is connected.
pub const NO_BRAILLE: &str = "noBraille";

/// Identity of one braille display profile: model name plus cell count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId {
    model: String,
    cells: usize,
}

impl DeviceId {
    /// Creates an identity, rejecting an empty model, a model containing `:`
    /// (it would not survive the `model:cells` key form) or a zero cell count.
    pub fn new(model: impl Into<String>, cells: usize) -> Result<Self> {
        let model = model.into();
        let trimmed = model.trim();
        if trimmed.is_empty() || trimmed.contains(':') || cells == 0 {
            return Err(Error::InvalidDeviceId(format!("{}:{}", model, cells)));
        }
        Ok(Self {
            model: trimmed.to_string(),
            cells,
        })
    }

    /// Returns the display model (driver) name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the number of cells declared for this profile.
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Returns the persisted key form, `model:cells`.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl FromStr for DeviceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (model, cells) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidDeviceId(s.to_string()))?;
        let cells: usize = cells
            .trim()
            .parse()
            .map_err(|_| Error::InvalidDeviceId(s.to_string()))?;
        DeviceId::new(model, cells).map_err(|_| Error::InvalidDeviceId(s.to_string()))
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.model, self.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        let id: DeviceId = "baum:40".parse().unwrap();
        assert_eq!(id.model(), "baum");
        assert_eq!(id.cells(), 40);

        let id: DeviceId = " alva : 80 ".parse().unwrap();
        assert_eq!(id.model(), "alva");
        assert_eq!(id.cells(), 80);
    }

    #[test]
    fn test_from_str_splits_on_first_colon() {
        // Everything after the first colon must be the count.
        assert!("hid:usb:40".parse::<DeviceId>().is_err());
    }

    #[test]
    fn test_invalid() {
        assert!("baum".parse::<DeviceId>().is_err());
        assert!("baum:".parse::<DeviceId>().is_err());
        assert!("baum:0".parse::<DeviceId>().is_err());
        assert!(":40".parse::<DeviceId>().is_err());
        assert!("baum:-4".parse::<DeviceId>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let id = DeviceId::new("focus", 14).unwrap();
        assert_eq!(id.to_string(), "focus:14");
        assert_eq!(id.key().parse::<DeviceId>().unwrap(), id);
    }

    #[test]
    fn test_model_with_colon_rejected() {
        assert!(matches!(
            DeviceId::new("hid:usb", 40),
            Err(Error::InvalidDeviceId(ref s)) if s == "hid:usb:40"
        ));
        // Every accepted identity must parse back from its key.
        let id = DeviceId::new("hid-usb", 40).unwrap();
        assert_eq!(id.key().parse::<DeviceId>().unwrap(), id);
    }
}
