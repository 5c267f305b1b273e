//! Evaluation of temperature snapshots.
//!
//! This module turns raw readings and equipment into verdicts suitable for
//! display. Everything here is synchronous and pure; the current instant is
//! always passed in.
//!
//! ## Submodules
//!
//! - [`timestamp`]: Parsing of recorded dates/times and hour arithmetic
//! - [`readings`]: [`ReadingSet`], the parsed and sorted readings of a snapshot
//! - [`safety`]: Danger-zone verdicts for food readings
//! - [`equipment`]: Equipment threshold status and equipment selection
//! - [`window`]: Time filters and automatic window selection
//! - [`sampler`]: Downsampling of dense chart series
//! - [`appearance`]: Colors and icons for status tags
//! - [`report`]: [`ComplianceReport`], one pass over all of the above
//!
//! ## Data Flow
//!
//! ```text
//! Snapshot (readings + equipment)
//!        │
//!        ▼
//! ReadingSet::from_readings()  ──▶ DataError (excluded readings)
//!        │
//!        ▼
//! select_time_window() ──▶ TimeFilter
//!        │
//!        ├──▶ evaluate_equipment_status()   (per equipment)
//!        ├──▶ evaluate_food_safety()        (per food reading)
//!        └──▶ sample_for_display()          (selected equipment chart)
//! ```

pub mod appearance;
pub mod equipment;
pub mod readings;
pub mod report;
pub mod safety;
pub mod sampler;
pub mod timestamp;
pub mod window;

pub use appearance::Appearance;
pub use equipment::{
    equipment_series, evaluate_equipment_status, EquipmentSelection, EquipmentStatus,
};
pub use readings::{ReadingSet, TimedReading};
pub use report::{ComplianceReport, EquipmentChart, EquipmentRow, FoodVerdict};
pub use safety::{evaluate_food_safety, FoodSafetyStatus, SafetyLevel};
pub use sampler::{sample_for_display, DensityTier, RenderHints, SamplePoint, SampledSeries};
pub use window::{apply_filter, select_time_window, CutoffPolicy, TimeFilter, WindowSelector};
