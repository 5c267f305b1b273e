//! Proactive compliance alerts.
//!
//! [`generate_warnings`] scans the full reading set and equipment list; a
//! [`WarningGenerator`] runs it and hands the result to a [`WarningSink`].
//! Alerts are re-emitted on every run unless the sink is wrapped in a
//! [`CooldownSink`].

pub mod generator;
pub mod sink;

pub use generator::{
    generate_warnings, FoodCheckCriterion, WarningGenerator, WarningRules, LOG_TEMPERATURE_ROUTE,
};
pub use sink::{ChannelSink, CooldownSink, LogSink, MemorySink, WarningSink};
