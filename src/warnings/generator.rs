//! Compliance rules that scan the whole reading set.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::sink::WarningSink;
use crate::data::timestamp::hours_before;
use crate::data::ReadingSet;
use tempwatch_types::{Equipment, ReadingType, Severity, Warning};

/// Route of the temperature entry form.
pub const LOG_TEMPERATURE_ROUTE: &str = "/temperatures/new";

/// Which of today's readings count as the daily food check.
///
/// The historical rule looks for the literal tag `food`, which none of the
/// three food reading types use. That tag is the default so existing
/// deployments keep their behavior; `any_food_type` matches the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FoodCheckCriterion {
    /// Reading type tag equals this string.
    Tag(String),
    /// Any of the three food reading types.
    AnyFoodType,
}

impl FoodCheckCriterion {
    pub fn matches(&self, reading_type: &ReadingType) -> bool {
        match self {
            FoodCheckCriterion::Tag(tag) => reading_type.tag() == tag.as_str(),
            FoodCheckCriterion::AnyFoodType => reading_type.is_food(),
        }
    }
}

impl Default for FoodCheckCriterion {
    fn default() -> Self {
        FoodCheckCriterion::Tag("food".to_string())
    }
}

impl From<String> for FoodCheckCriterion {
    fn from(s: String) -> Self {
        if s == "any_food_type" {
            FoodCheckCriterion::AnyFoodType
        } else {
            FoodCheckCriterion::Tag(s)
        }
    }
}

impl From<FoodCheckCriterion> for String {
    fn from(c: FoodCheckCriterion) -> Self {
        match c {
            FoodCheckCriterion::Tag(tag) => tag,
            FoodCheckCriterion::AnyFoodType => "any_food_type".to_string(),
        }
    }
}

impl fmt::Display for FoodCheckCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoodCheckCriterion::Tag(tag) => write!(f, "tag {:?}", tag),
            FoodCheckCriterion::AnyFoodType => f.write_str("any food type"),
        }
    }
}

/// Tunables for the warning rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarningRules {
    /// Equipment without a reading for this many hours is stale.
    pub stale_after_hours: i64,
    pub food_check: FoodCheckCriterion,
}

impl Default for WarningRules {
    fn default() -> Self {
        Self {
            stale_after_hours: 8,
            food_check: FoodCheckCriterion::default(),
        }
    }
}

/// Scan readings and equipment for compliance problems.
///
/// Produces nothing unless both the reading set and the equipment list are
/// non-empty. Warnings come out in rule order: missing food check, stale
/// equipment, then one out-of-range error per equipment in list order.
pub fn generate_warnings(
    readings: &ReadingSet,
    equipment: &[Equipment],
    now: NaiveDateTime,
    rules: &WarningRules,
) -> Vec<Warning> {
    if readings.is_empty() || equipment.is_empty() {
        return Vec::new();
    }

    let today = now.date();
    let mut warnings = Vec::new();

    if let Some(w) = missing_food_check(readings, today, &rules.food_check) {
        warnings.push(w);
    }
    if let Some(w) = stale_equipment(readings, equipment, now, rules.stale_after_hours) {
        warnings.push(w);
    }
    warnings.extend(out_of_range_today(readings, equipment, today));

    debug!("Generated {} warning(s)", warnings.len());
    warnings
}

fn missing_food_check(
    readings: &ReadingSet,
    today: NaiveDate,
    criterion: &FoodCheckCriterion,
) -> Option<Warning> {
    let checked = readings
        .on_date(today)
        .any(|r| criterion.matches(&r.reading.reading_type));
    if checked {
        return None;
    }

    Some(
        Warning::new(
            Severity::Warning,
            "Missing Food Temperature Check",
            "No food temperature checks have been recorded today.",
        )
        .with_action("Log Temperature", LOG_TEMPERATURE_ROUTE),
    )
}

fn stale_equipment(
    readings: &ReadingSet,
    equipment: &[Equipment],
    now: NaiveDateTime,
    stale_after_hours: i64,
) -> Option<Warning> {
    // A threshold reaching past the calendar's start makes everything recent.
    let cutoff = hours_before(now, stale_after_hours).unwrap_or(NaiveDateTime::MIN);

    let stale: Vec<&str> = equipment
        .iter()
        .filter(|e| e.is_active)
        .filter_map(|e| e.monitored_location().map(|loc| (e, loc)))
        .filter(|(_, loc)| !readings.at_location(loc).any(|r| r.recorded_at >= cutoff))
        .map(|(e, _)| e.name.as_str())
        .collect();

    if stale.is_empty() {
        return None;
    }

    Some(
        Warning::new(
            Severity::Warning,
            "Equipment Not Checked",
            format!(
                "No temperature recorded in the last {} hours for: {}",
                stale_after_hours,
                stale.join(", ")
            ),
        )
        .with_action("Log Temperature", LOG_TEMPERATURE_ROUTE),
    )
}

fn out_of_range_today(
    readings: &ReadingSet,
    equipment: &[Equipment],
    today: NaiveDate,
) -> Vec<Warning> {
    equipment
        .iter()
        .filter_map(|e| {
            let (min, max) = e.thresholds()?;
            let location = e.monitored_location()?;
            let count = readings
                .on_date(today)
                .filter(|r| r.is_at(location))
                .filter(|r| r.temperature() < min || r.temperature() > max)
                .count();
            if count == 0 {
                return None;
            }
            Some(
                Warning::new(
                    Severity::Error,
                    format!("Out of Range: {}", e.name),
                    format!(
                        "{} reading{} today outside the safe range of {}°C to {}°C",
                        count,
                        if count == 1 { "" } else { "s" },
                        min,
                        max
                    ),
                )
                .with_action("View Equipment", format!("/equipment/{}", e.id)),
            )
        })
        .collect()
}

/// Runs the rules and publishes every warning to a sink.
#[derive(Debug)]
pub struct WarningGenerator {
    rules: WarningRules,
    sink: Box<dyn WarningSink>,
}

impl WarningGenerator {
    pub fn new(rules: WarningRules, sink: Box<dyn WarningSink>) -> Self {
        Self { rules, sink }
    }

    pub fn rules(&self) -> &WarningRules {
        &self.rules
    }

    /// Generate and publish. Publishing is fire-and-forget; the generated
    /// warnings are returned regardless of what the sink does with them.
    pub fn run(
        &self,
        readings: &ReadingSet,
        equipment: &[Equipment],
        now: NaiveDateTime,
    ) -> Vec<Warning> {
        let warnings = generate_warnings(readings, equipment, now, &self.rules);
        for warning in &warnings {
            self.sink.publish(warning.clone());
        }
        warnings
    }
}
