//! # tempwatch
//!
//! A food-safety temperature compliance engine.
//!
//! Kitchens log temperatures by hand: fridges and freezers a few times a
//! day, food while it is cooked, held hot or held cold. This crate turns
//! those readings into time-sensitive verdicts and alerts:
//!
//! - how long food has been in the 5–60°C danger zone, and whether it must
//!   be used immediately or discarded;
//! - whether each piece of equipment is inside its safe band;
//! - which time window (`24h`, `7d`, `30d`, `all`) actually has data;
//! - a bounded-size chart series for the focused equipment;
//! - warnings for missing food checks, stale equipment and out-of-range
//!   readings.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Dashboard                            │
//! │  ┌─────────┐    ┌──────────┐    ┌──────────────────┐         │
//! │  │   app   │───▶│   data   │───▶│ ComplianceReport │         │
//! │  │ (state) │    │ (verdicts)    └──────────────────┘         │
//! │  └────┬────┘    └──────────┘                                 │
//! │       │         ┌──────────┐    ┌──────────────────┐         │
//! │       ├────────▶│ warnings │───▶│   WarningSink    │         │
//! │       ▼         └──────────┘    └──────────────────┘         │
//! │  ┌─────────┐                                                 │
//! │  │ source  │◀── FileSource | ChannelSource                   │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Dashboard state, window and equipment selection, export
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait) with file
//!   polling and channel-based input
//! - **[`data`]**: Pure evaluators: danger zone, equipment status, time
//!   windows, sampling, and the [`ComplianceReport`] that combines them
//! - **[`warnings`]**: Warning rules and sinks
//! - **[`clock`]**: Injected time source
//! - **[`settings`]**: Layered configuration
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Evaluate a snapshot once
//! tempwatch --file snapshot.json
//!
//! # Re-evaluate whenever the file changes
//! tempwatch --file snapshot.json --watch
//! ```
//!
//! ### As a library with channel source
//!
//! ```
//! use std::sync::Arc;
//! use tempwatch::{ChannelSource, Dashboard, LogSink, Settings, SystemClock};
//! use tempwatch_types::{Equipment, ReadingType, Snapshot, TemperatureReading};
//!
//! let (tx, source) = ChannelSource::create("kitchen api");
//! let mut dashboard = Dashboard::new(
//!     Box::new(source),
//!     Arc::new(SystemClock),
//!     &Settings::default(),
//!     Box::new(LogSink),
//! );
//!
//! let snapshot = Snapshot::builder()
//!     .equipment(Equipment::new("fr-1", "Walk-in").location("Kitchen").range(1.0, 5.0))
//!     .reading(
//!         TemperatureReading::new(ReadingType::Fridge, 3.5, "2024-05-01", "08:30")
//!             .at("Kitchen"),
//!     )
//!     .build();
//! tx.send(snapshot).unwrap();
//!
//! assert!(dashboard.reload_data().unwrap());
//! assert_eq!(dashboard.selected_equipment(), Some("fr-1"));
//! ```
//!
//! ### Evaluating a single reading
//!
//! ```
//! use chrono::NaiveDate;
//! use tempwatch::data::{evaluate_food_safety, SafetyLevel, TimedReading};
//! use tempwatch_types::{ReadingType, TemperatureReading};
//!
//! let reading = TemperatureReading::new(ReadingType::FoodHotHolding, 10.0, "2024-05-01", "12:00");
//! let timed = TimedReading::parse(reading, 0).unwrap();
//! let now = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(15, 0, 0).unwrap();
//!
//! let status = evaluate_food_safety(&timed, now).unwrap();
//! assert_eq!(status.level(), SafetyLevel::Warning);
//! ```

pub mod app;
pub mod clock;
pub mod data;
pub mod error;
pub mod settings;
pub mod source;
pub mod warnings;

// Re-export main types for convenience
pub use app::Dashboard;
pub use clock::{Clock, FixedClock, SystemClock};
pub use data::{
    evaluate_equipment_status, evaluate_food_safety, sample_for_display, select_time_window,
    ComplianceReport, CutoffPolicy, EquipmentStatus, FoodSafetyStatus, ReadingSet, SafetyLevel,
    TimeFilter,
};
pub use error::DataError;
pub use settings::Settings;
pub use source::{ChannelSource, DataSource, FileSource};
pub use warnings::{
    generate_warnings, ChannelSink, CooldownSink, LogSink, MemorySink, WarningGenerator,
    WarningRules, WarningSink,
};
