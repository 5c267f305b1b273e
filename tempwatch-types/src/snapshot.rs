//! Snapshot - the readings and equipment known at one point in time.

use alloc::vec::Vec;

use crate::{Equipment, SchemaVersion, TemperatureReading};

/// A point-in-time copy of everything the compliance engine evaluates.
///
/// Data sources hand out whole snapshots; the engine never sees partial
/// updates. Replacing the snapshot is what triggers re-evaluation.
///
/// # Example
///
/// ```rust
/// use tempwatch_types::{Equipment, Snapshot};
///
/// let snapshot = Snapshot::builder()
///     .equipment(Equipment::new("fr-1", "Walk-in").location("Cold room"))
///     .build();
///
/// assert!(snapshot.readings.is_empty());
/// assert!(!snapshot.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Schema version for forward compatibility.
    #[cfg_attr(feature = "serde", serde(default))]
    pub version: SchemaVersion,

    /// Readings in the order the persistence layer returned them.
    #[cfg_attr(feature = "serde", serde(default))]
    pub readings: Vec<TemperatureReading>,

    /// Equipment in list order. Order matters for auto-selection.
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Vec<Equipment>,
}

impl Snapshot {
    pub fn new(readings: Vec<TemperatureReading>, equipment: Vec<Equipment>) -> Self {
        Self {
            version: SchemaVersion::current(),
            readings,
            equipment,
        }
    }

    /// Create a builder for constructing snapshots.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::new()
    }

    /// True when there are neither readings nor equipment.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty() && self.equipment.is_empty()
    }

    /// Look up equipment by id.
    pub fn equipment_by_id(&self, id: &str) -> Option<&Equipment> {
        self.equipment.iter().find(|e| e.id == id)
    }
}

/// Builder for constructing `Snapshot` instances.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    readings: Vec<TemperatureReading>,
    equipment: Vec<Equipment>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reading(mut self, reading: TemperatureReading) -> Self {
        self.readings.push(reading);
        self
    }

    pub fn readings(mut self, readings: impl IntoIterator<Item = TemperatureReading>) -> Self {
        self.readings.extend(readings);
        self
    }

    pub fn equipment(mut self, equipment: Equipment) -> Self {
        self.equipment.push(equipment);
        self
    }

    pub fn build(self) -> Snapshot {
        Snapshot::new(self.readings, self.equipment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReadingType;

    #[test]
    fn test_builder_keeps_order() {
        let snapshot = Snapshot::builder()
            .equipment(Equipment::new("b", "Second"))
            .equipment(Equipment::new("a", "First"))
            .reading(TemperatureReading::new(ReadingType::Storage, 18.0, "2024-01-01", "09:00"))
            .build();

        assert_eq!(snapshot.equipment[0].id, "b");
        assert_eq!(snapshot.equipment_by_id("a").map(|e| e.name.as_str()), Some("First"));
        assert_eq!(snapshot.version, SchemaVersion::current());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_snapshot() {
        let json = r#"{
            "readings": [
                {
                    "equipment_location": "Kitchen",
                    "reading_type": "fridge",
                    "temperature_celsius": 4.0,
                    "recorded_date": "2024-05-01",
                    "recorded_time": "07:45:00"
                }
            ],
            "equipment": [
                {
                    "id": "fr-1",
                    "name": "Walk-in",
                    "type": "fridge",
                    "location": "Kitchen",
                    "min_temp_celsius": 1.0,
                    "max_temp_celsius": 5.0,
                    "is_active": true
                }
            ]
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.version, SchemaVersion::current());
        assert_eq!(snapshot.readings.len(), 1);
        assert_eq!(snapshot.equipment[0].thresholds(), Some((1.0, 5.0)));
        assert!(snapshot.readings[0].is_at("Kitchen"));
    }
}
