//! The reading-type and equipment-type taxonomy.
//!
//! Every consumer looks tags and labels up here; nothing else in the
//! workspace spells out `"food_hot_holding"` and friends.

use alloc::string::{String, ToString};
use core::fmt;

/// What a temperature reading was taken of.
///
/// Tags outside the known set are kept as [`ReadingType::Other`] so that
/// data written by other tools survives a round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum ReadingType {
    Fridge,
    Freezer,
    FoodCooking,
    FoodHotHolding,
    FoodColdHolding,
    Storage,
    /// Any tag not in the taxonomy, stored verbatim.
    Other(String),
}

impl ReadingType {
    /// Parse a wire tag. Never fails; unknown tags become `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "fridge" => ReadingType::Fridge,
            "freezer" => ReadingType::Freezer,
            "food_cooking" => ReadingType::FoodCooking,
            "food_hot_holding" => ReadingType::FoodHotHolding,
            "food_cold_holding" => ReadingType::FoodColdHolding,
            "storage" => ReadingType::Storage,
            other => ReadingType::Other(other.to_string()),
        }
    }

    /// The wire tag for this type.
    pub fn tag(&self) -> &str {
        match self {
            ReadingType::Fridge => "fridge",
            ReadingType::Freezer => "freezer",
            ReadingType::FoodCooking => "food_cooking",
            ReadingType::FoodHotHolding => "food_hot_holding",
            ReadingType::FoodColdHolding => "food_cold_holding",
            ReadingType::Storage => "storage",
            ReadingType::Other(tag) => tag,
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &str {
        match self {
            ReadingType::Fridge => "Fridge",
            ReadingType::Freezer => "Freezer",
            ReadingType::FoodCooking => "Food - Cooking",
            ReadingType::FoodHotHolding => "Food - Hot Holding",
            ReadingType::FoodColdHolding => "Food - Cold Holding",
            ReadingType::Storage => "Storage",
            ReadingType::Other(tag) => tag,
        }
    }

    /// Whether danger-zone rules apply to this reading type.
    pub fn is_food(&self) -> bool {
        matches!(
            self,
            ReadingType::FoodCooking | ReadingType::FoodHotHolding | ReadingType::FoodColdHolding
        )
    }
}

impl From<String> for ReadingType {
    fn from(tag: String) -> Self {
        match Self::from_tag(&tag) {
            ReadingType::Other(_) => ReadingType::Other(tag),
            known => known,
        }
    }
}

impl From<&str> for ReadingType {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

impl From<ReadingType> for String {
    fn from(value: ReadingType) -> Self {
        match value {
            ReadingType::Other(tag) => tag,
            known => known.tag().to_string(),
        }
    }
}

impl fmt::Display for ReadingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Kind of monitored equipment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum EquipmentType {
    #[default]
    Fridge,
    Freezer,
    HotHolding,
    ColdHolding,
    Oven,
    Storage,
    Other(String),
}

impl EquipmentType {
    /// Parse a wire tag. Never fails; unknown tags become `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "fridge" => EquipmentType::Fridge,
            "freezer" => EquipmentType::Freezer,
            "hot_holding" => EquipmentType::HotHolding,
            "cold_holding" => EquipmentType::ColdHolding,
            "oven" => EquipmentType::Oven,
            "storage" => EquipmentType::Storage,
            other => EquipmentType::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            EquipmentType::Fridge => "fridge",
            EquipmentType::Freezer => "freezer",
            EquipmentType::HotHolding => "hot_holding",
            EquipmentType::ColdHolding => "cold_holding",
            EquipmentType::Oven => "oven",
            EquipmentType::Storage => "storage",
            EquipmentType::Other(tag) => tag,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EquipmentType::Fridge => "Fridge",
            EquipmentType::Freezer => "Freezer",
            EquipmentType::HotHolding => "Hot Holding Unit",
            EquipmentType::ColdHolding => "Cold Holding Unit",
            EquipmentType::Oven => "Oven",
            EquipmentType::Storage => "Dry Storage",
            EquipmentType::Other(tag) => tag,
        }
    }
}

impl From<String> for EquipmentType {
    fn from(tag: String) -> Self {
        match Self::from_tag(&tag) {
            EquipmentType::Other(_) => EquipmentType::Other(tag),
            known => known,
        }
    }
}

impl From<&str> for EquipmentType {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

impl From<EquipmentType> for String {
    fn from(value: EquipmentType) -> Self {
        match value {
            EquipmentType::Other(tag) => tag,
            known => known.tag().to_string(),
        }
    }
}

impl fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
