//! Danger-zone evaluation for food readings.
//!
//! Food held between 5°C and 60°C (inclusive) may be used within two hours,
//! must be used within four, and has to be discarded after that.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::readings::TimedReading;
use super::timestamp::{format_hours, hours_between};

/// Lower edge of the danger zone, inclusive.
pub const DANGER_ZONE_MIN_CELSIUS: f64 = 5.0;
/// Upper edge of the danger zone, inclusive.
pub const DANGER_ZONE_MAX_CELSIUS: f64 = 60.0;
/// Hours in the danger zone before food should be used immediately.
pub const SAFE_HOURS: f64 = 2.0;
/// Hours in the danger zone after which food must be discarded.
pub const DISCARD_HOURS: f64 = 4.0;

/// Severity of a food-safety verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyLevel {
    Safe,
    Warning,
    Danger,
}

impl SafetyLevel {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            SafetyLevel::Safe => "SAFE",
            SafetyLevel::Warning => "WARN",
            SafetyLevel::Danger => "DANGER",
        }
    }
}

/// Verdict for a single food reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FoodSafetyStatus {
    /// Below 5°C or above 60°C; time does not matter.
    OutsideDangerZone,
    /// In the zone for under two hours.
    Safe { remaining_hours: f64 },
    /// In the zone for two to four hours; use now.
    Warning { remaining_hours: f64 },
    /// In the zone for four hours or more; discard.
    Danger { elapsed_hours: f64 },
}

impl FoodSafetyStatus {
    pub fn level(&self) -> SafetyLevel {
        match self {
            FoodSafetyStatus::OutsideDangerZone | FoodSafetyStatus::Safe { .. } => {
                SafetyLevel::Safe
            }
            FoodSafetyStatus::Warning { .. } => SafetyLevel::Warning,
            FoodSafetyStatus::Danger { .. } => SafetyLevel::Danger,
        }
    }

    /// Remaining hours for `Safe`/`Warning`, elapsed hours for `Danger`.
    pub fn hours(&self) -> Option<f64> {
        match self {
            FoodSafetyStatus::OutsideDangerZone => None,
            FoodSafetyStatus::Safe { remaining_hours }
            | FoodSafetyStatus::Warning { remaining_hours } => Some(*remaining_hours),
            FoodSafetyStatus::Danger { elapsed_hours } => Some(*elapsed_hours),
        }
    }

    pub fn message(&self) -> String {
        match self {
            FoodSafetyStatus::OutsideDangerZone => "outside danger zone".to_string(),
            FoodSafetyStatus::Safe { remaining_hours } => {
                format!("Safe: {} remaining", format_hours(*remaining_hours))
            }
            FoodSafetyStatus::Warning { remaining_hours } => {
                format!("Use immediately: {} remaining", format_hours(*remaining_hours))
            }
            FoodSafetyStatus::Danger { elapsed_hours } => format!(
                "DISCARD: {} in danger zone",
                format_hours(*elapsed_hours)
            ),
        }
    }

    /// True when the food has to be thrown away.
    pub fn requires_discard(&self) -> bool {
        matches!(self, FoodSafetyStatus::Danger { .. })
    }
}

/// True if `celsius` lies in the closed danger-zone interval.
pub fn in_danger_zone(celsius: f64) -> bool {
    (DANGER_ZONE_MIN_CELSIUS..=DANGER_ZONE_MAX_CELSIUS).contains(&celsius)
}

/// Evaluate a reading against the danger-zone rules.
///
/// Returns `None` for anything that is not one of the three food reading
/// types. A reading dated after `now` counts as zero hours elapsed.
pub fn evaluate_food_safety(
    reading: &TimedReading,
    now: NaiveDateTime,
) -> Option<FoodSafetyStatus> {
    if !reading.reading.reading_type.is_food() {
        return None;
    }

    let celsius = reading.temperature();
    if !in_danger_zone(celsius) {
        return Some(FoodSafetyStatus::OutsideDangerZone);
    }

    let elapsed = hours_between(reading.recorded_at, now).max(0.0);

    let status = if elapsed < SAFE_HOURS {
        FoodSafetyStatus::Safe {
            remaining_hours: SAFE_HOURS - elapsed,
        }
    } else if elapsed < DISCARD_HOURS {
        FoodSafetyStatus::Warning {
            remaining_hours: DISCARD_HOURS - elapsed,
        }
    } else {
        FoodSafetyStatus::Danger {
            elapsed_hours: elapsed,
        }
    };
    Some(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};
    use tempwatch_types::{ReadingType, TemperatureReading};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(15, 0, 0).unwrap()
    }

    fn food(kind: ReadingType, celsius: f64, ago: TimeDelta) -> TimedReading {
        let at = now() - ago;
        TimedReading {
            reading: TemperatureReading::new(
                kind,
                celsius,
                at.date().to_string(),
                at.time().to_string(),
            ),
            recorded_at: at,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn verdict(kind: ReadingType, celsius: f64, hours_ago: i64) -> Option<FoodSafetyStatus> {
        evaluate_food_safety(&food(kind, celsius, TimeDelta::hours(hours_ago)), now())
    }

    #[test]
    fn test_hot_holding_one_hour_is_safe() {
        let status = verdict(ReadingType::FoodHotHolding, 10.0, 1).unwrap();
        assert!(matches!(
            status,
            FoodSafetyStatus::Safe { remaining_hours } if close(remaining_hours, 1.0)
        ));
        assert_eq!(status.level(), SafetyLevel::Safe);
    }

    #[test]
    fn test_hot_holding_three_hours_is_warning() {
        let status = verdict(ReadingType::FoodHotHolding, 10.0, 3).unwrap();
        assert!(matches!(
            status,
            FoodSafetyStatus::Warning { remaining_hours } if close(remaining_hours, 1.0)
        ));
    }

    #[test]
    fn test_hot_holding_five_hours_is_danger() {
        let status = verdict(ReadingType::FoodHotHolding, 10.0, 5).unwrap();
        assert!(matches!(
            status,
            FoodSafetyStatus::Danger { elapsed_hours } if close(elapsed_hours, 5.0)
        ));
        assert!(status.requires_discard());
        assert!(status.message().starts_with("DISCARD"));
    }

    #[test]
    fn test_boundaries_belong_to_the_later_band() {
        let at_two = verdict(ReadingType::FoodCooking, 30.0, 2);
        assert_eq!(at_two.map(|s| s.level()), Some(SafetyLevel::Warning));

        let at_four = verdict(ReadingType::FoodCooking, 30.0, 4);
        assert_eq!(at_four.map(|s| s.level()), Some(SafetyLevel::Danger));
    }

    #[test]
    fn test_zone_edges_are_inclusive() {
        for celsius in [5.0, 60.0] {
            let status = verdict(ReadingType::FoodColdHolding, celsius, 5);
            assert_eq!(status.map(|s| s.level()), Some(SafetyLevel::Danger));
        }
    }

    #[test]
    fn test_outside_zone_is_always_safe() {
        for celsius in [4.9, -18.0, 60.1, 75.0] {
            for ago in [0, 3, 12, 72] {
                let status = verdict(ReadingType::FoodHotHolding, celsius, ago).unwrap();
                assert_eq!(status, FoodSafetyStatus::OutsideDangerZone);
                assert_eq!(status.message(), "outside danger zone");
            }
        }
    }

    #[test]
    fn test_non_food_has_no_verdict() {
        for kind in [
            ReadingType::Fridge,
            ReadingType::Freezer,
            ReadingType::Storage,
            ReadingType::Other("food".to_string()),
        ] {
            assert!(verdict(kind, 20.0, 5).is_none());
        }
    }

    #[test]
    fn test_future_reading_counts_as_fresh() {
        let status = verdict(ReadingType::FoodCooking, 20.0, -3).unwrap();
        assert!(matches!(
            status,
            FoodSafetyStatus::Safe { remaining_hours } if close(remaining_hours, 2.0)
        ));
    }
}
