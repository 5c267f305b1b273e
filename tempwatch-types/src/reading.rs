//! Temperature readings as logged by kitchen staff.

use alloc::string::String;

use crate::ReadingType;

/// A single logged temperature.
///
/// Readings are immutable once created. The date and time are kept as the
/// text that was entered so that a bad value can be reported instead of
/// silently dropped at deserialization time.
///
/// # Example
///
/// ```rust
/// use tempwatch_types::{ReadingType, TemperatureReading};
///
/// let reading = TemperatureReading::new(ReadingType::FoodHotHolding, 64.0, "2024-05-01", "12:15")
///     .at("Pass")
///     .logged_by("sam");
///
/// assert_eq!(reading.equipment_location.as_deref(), Some("Pass"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemperatureReading {
    /// Identifier assigned by the persistence layer, if any.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub id: Option<String>,

    /// Location of the equipment the reading was taken at.
    /// Correlates with [`crate::Equipment::location`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment_location: Option<String>,

    pub reading_type: ReadingType,

    pub temperature_celsius: f64,

    /// Calendar date, `YYYY-MM-DD`.
    pub recorded_date: String,

    /// Local time of day, `HH:MM` or `HH:MM:SS`.
    pub recorded_time: String,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub logged_by: Option<String>,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub notes: Option<String>,

    /// Reference to an attached photo in external storage.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub photo_ref: Option<String>,
}

impl TemperatureReading {
    /// Create a reading with no location or metadata.
    pub fn new(
        reading_type: ReadingType,
        temperature_celsius: f64,
        recorded_date: impl Into<String>,
        recorded_time: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            equipment_location: None,
            reading_type,
            temperature_celsius,
            recorded_date: recorded_date.into(),
            recorded_time: recorded_time.into(),
            logged_by: None,
            notes: None,
            photo_ref: None,
        }
    }

    /// Set the equipment location.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.equipment_location = Some(location.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn logged_by(mut self, who: impl Into<String>) -> Self {
        self.logged_by = Some(who.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// True if this reading was taken at `location`.
    pub fn is_at(&self, location: &str) -> bool {
        self.equipment_location.as_deref() == Some(location)
    }
}
