//! Monitored equipment and its safe temperature band.

use alloc::string::String;

use crate::EquipmentType;

/// A piece of monitored equipment.
///
/// Owned by the equipment-management side of the application; the
/// compliance engine only ever reads it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub id: String,

    pub name: String,

    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub equipment_type: EquipmentType,

    /// Matches [`crate::TemperatureReading::equipment_location`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<String>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub min_temp_celsius: Option<f64>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub max_temp_celsius: Option<f64>,

    #[cfg_attr(feature = "serde", serde(default = "default_active"))]
    pub is_active: bool,
}

#[cfg(feature = "serde")]
fn default_active() -> bool {
    true
}

impl Equipment {
    /// Create active equipment with no location and no thresholds.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            equipment_type: EquipmentType::default(),
            location: None,
            min_temp_celsius: None,
            max_temp_celsius: None,
            is_active: true,
        }
    }

    pub fn kind(mut self, equipment_type: EquipmentType) -> Self {
        self.equipment_type = equipment_type;
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set both ends of the safe band.
    pub fn range(mut self, min_celsius: f64, max_celsius: f64) -> Self {
        self.min_temp_celsius = Some(min_celsius);
        self.max_temp_celsius = Some(max_celsius);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// The safe band, if both thresholds are configured.
    pub fn thresholds(&self) -> Option<(f64, f64)> {
        Some((self.min_temp_celsius?, self.max_temp_celsius?))
    }

    /// The location, treating an empty string as absent.
    pub fn monitored_location(&self) -> Option<&str> {
        self.location.as_deref().filter(|l| !l.trim().is_empty())
    }
}
