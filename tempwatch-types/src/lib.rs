//! # tempwatch-types
//!
//! Core types for food-safety temperature compliance. This crate defines the
//! data model shared by the compliance engine, its data sources and anything
//! that produces or consumes temperature logs.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature as needed
//! - **One taxonomy**: Reading and equipment type tags are defined once in [`taxonomy`]
//! - **Versioned schema**: Snapshots include version info for forward compatibility
//! - **Lossless tags**: Unknown type tags are preserved verbatim instead of rejected
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: JSON/etc. serialization via serde
//! - `all`: Enable all serialization formats
//!
//! ## Example
//!
//! ```rust
//! use tempwatch_types::{Equipment, ReadingType, Snapshot, TemperatureReading};
//!
//! let snapshot = Snapshot::builder()
//!     .equipment(Equipment::new("fr-1", "Walk-in fridge").location("Kitchen").range(1.0, 5.0))
//!     .reading(
//!         TemperatureReading::new(ReadingType::Fridge, 3.5, "2024-05-01", "08:30")
//!             .at("Kitchen"),
//!     )
//!     .build();
//!
//! assert_eq!(snapshot.readings.len(), 1);
//! assert_eq!(snapshot.equipment.len(), 1);
//! ```
//!
//! ## Schema Version
//!
//! The current schema version is **1**.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod equipment;
mod reading;
mod snapshot;
pub mod taxonomy;
mod version;
mod warning;

pub use equipment::*;
pub use reading::*;
pub use snapshot::*;
pub use taxonomy::{EquipmentType, ReadingType};
pub use version::*;
pub use warning::*;

/// Current schema version.
///
/// Increment this when making breaking changes to the snapshot format.
pub const SCHEMA_VERSION: u32 = 1;
