//! Equipment threshold monitoring and equipment selection.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use super::readings::TimedReading;
use super::window::{window_anchor, CutoffPolicy, TimeFilter};
use tempwatch_types::Equipment;

/// Status of one piece of equipment in the active window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EquipmentStatus {
    /// No readings at this equipment's location in the window.
    NoData,
    /// Readings exist but the equipment has no complete safe band.
    NoThresholds { latest_celsius: f64 },
    /// The latest reading is inside `[min, max]`.
    InRange { latest_celsius: f64 },
    /// The latest reading is outside `[min, max]`.
    OutOfRange { latest_celsius: f64 },
}

impl EquipmentStatus {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            EquipmentStatus::NoData => "--",
            EquipmentStatus::NoThresholds { .. } => "N/A",
            EquipmentStatus::InRange { .. } => "OK",
            EquipmentStatus::OutOfRange { .. } => "OUT",
        }
    }

    /// The temperature the status was computed from, if any.
    pub fn latest_celsius(&self) -> Option<f64> {
        match self {
            EquipmentStatus::NoData => None,
            EquipmentStatus::NoThresholds { latest_celsius }
            | EquipmentStatus::InRange { latest_celsius }
            | EquipmentStatus::OutOfRange { latest_celsius } => Some(*latest_celsius),
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, EquipmentStatus::OutOfRange { .. })
    }
}

/// Evaluate equipment against its safe band.
///
/// `series` must already be narrowed to the equipment's location and the
/// active window, ascending by time; its last element is the latest reading.
/// Missing thresholds degrade to [`EquipmentStatus::NoThresholds`].
pub fn evaluate_equipment_status<R>(equipment: &Equipment, series: &[R]) -> EquipmentStatus
where
    R: AsRef<TimedReading>,
{
    let Some(latest) = series.last().map(|r| r.as_ref()) else {
        return EquipmentStatus::NoData;
    };
    let latest_celsius = latest.temperature();

    match equipment.thresholds() {
        None => EquipmentStatus::NoThresholds { latest_celsius },
        Some((min, max)) if (min..=max).contains(&latest_celsius) => {
            EquipmentStatus::InRange { latest_celsius }
        }
        Some(_) => EquipmentStatus::OutOfRange { latest_celsius },
    }
}

/// The equipment's readings inside `filter`, ascending by time.
///
/// `readings` must be ascending (a [`super::ReadingSet`] slice is). The
/// window is applied to the equipment's own readings, so with
/// [`CutoffPolicy::MostRecentLog`] it ends at that equipment's latest log.
/// Equipment without a location has no series.
pub fn equipment_series<'a>(
    readings: &'a [TimedReading],
    equipment: &Equipment,
    filter: TimeFilter,
    now: NaiveDateTime,
    policy: CutoffPolicy,
) -> Vec<&'a TimedReading> {
    let Some(location) = equipment.monitored_location() else {
        return Vec::new();
    };
    let located: Vec<&'a TimedReading> = readings.iter().filter(|r| r.is_at(location)).collect();
    let anchor = window_anchor(&located, now, policy);
    located
        .into_iter()
        .filter(|r| filter.admits(r.recorded_at, anchor))
        .collect()
}

/// Which equipment the dashboard is focused on.
///
/// The first evaluation with data picks the first out-of-range equipment,
/// or the first equipment when everything is fine. After that the choice
/// only changes through [`EquipmentSelection::choose`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentSelection {
    selected: Option<String>,
}

impl EquipmentSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the selected equipment.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Make the initial choice if none has been made yet.
    ///
    /// `statuses` pairs each equipment, in list order, with its status.
    /// Nothing happens when `has_readings` is false or the list is empty.
    pub fn auto_select<'a>(
        &mut self,
        statuses: impl IntoIterator<Item = (&'a Equipment, EquipmentStatus)>,
        has_readings: bool,
    ) -> Option<&str> {
        if self.selected.is_none() && has_readings {
            let mut first = None;
            let mut first_out_of_range = None;
            for (equipment, status) in statuses {
                if first.is_none() {
                    first = Some(equipment);
                }
                if status.is_out_of_range() {
                    first_out_of_range = Some(equipment);
                    break;
                }
            }
            if let Some(pick) = first_out_of_range.or(first) {
                debug!("Auto-selected equipment {} ({})", pick.id, pick.name);
                self.selected = Some(pick.id.clone());
            }
        }
        self.selected()
    }

    /// The user picked an equipment.
    pub fn choose(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};
    use tempwatch_types::{ReadingType, TemperatureReading};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 31).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn reading(location: &str, celsius: f64, ago: TimeDelta) -> TimedReading {
        let ts = now() - ago;
        TimedReading {
            reading: TemperatureReading::new(
                ReadingType::Fridge,
                celsius,
                ts.date().to_string(),
                ts.time().to_string(),
            )
            .at(location),
            recorded_at: ts,
        }
    }

    fn fridge() -> Equipment {
        Equipment::new("fr-1", "Walk-in").location("Kitchen").range(2.0, 8.0)
    }

    #[test]
    fn test_no_readings_is_no_data() {
        let empty: &[TimedReading] = &[];
        assert_eq!(evaluate_equipment_status(&fridge(), empty), EquipmentStatus::NoData);
    }

    #[test]
    fn test_missing_thresholds_degrade() {
        let series = vec![reading("Kitchen", 4.0, TimeDelta::hours(1))];
        let mut equipment = fridge();
        equipment.max_temp_celsius = None;
        assert_eq!(
            evaluate_equipment_status(&equipment, &series),
            EquipmentStatus::NoThresholds { latest_celsius: 4.0 }
        );
    }

    #[test]
    fn test_latest_reading_decides() {
        let series = vec![
            reading("Kitchen", 12.0, TimeDelta::hours(3)),
            reading("Kitchen", 9.0, TimeDelta::hours(1)),
        ];
        assert_eq!(
            evaluate_equipment_status(&fridge(), &series),
            EquipmentStatus::OutOfRange { latest_celsius: 9.0 }
        );

        let series = vec![
            reading("Kitchen", 12.0, TimeDelta::hours(3)),
            reading("Kitchen", 8.0, TimeDelta::hours(1)),
        ];
        let status = evaluate_equipment_status(&fridge(), &series);
        assert_eq!(status, EquipmentStatus::InRange { latest_celsius: 8.0 });
        assert_eq!(status.symbol(), "OK");
    }

    #[test]
    fn test_lower_bound_is_inclusive() {
        let series = vec![reading("Kitchen", 2.0, TimeDelta::hours(1))];
        assert!(matches!(
            evaluate_equipment_status(&fridge(), &series),
            EquipmentStatus::InRange { .. }
        ));
    }

    #[test]
    fn test_series_filters_location_and_window() {
        let readings = vec![
            reading("Kitchen", 3.0, TimeDelta::days(3)),
            reading("Bar", 3.0, TimeDelta::hours(5)),
            reading("Kitchen", 4.0, TimeDelta::hours(2)),
        ];

        let day = equipment_series(
            &readings,
            &fridge(),
            TimeFilter::Last24Hours,
            now(),
            CutoffPolicy::WallClock,
        );
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].temperature(), 4.0);

        let policy = CutoffPolicy::WallClock;
        let all = equipment_series(&readings, &fridge(), TimeFilter::All, now(), policy);
        assert_eq!(all.len(), 2);

        let nowhere = Equipment::new("x", "Loose probe");
        let none = equipment_series(&readings, &nowhere, TimeFilter::All, now(), policy);
        assert!(none.is_empty());
    }

    #[test]
    fn test_series_anchors_on_own_latest_log() {
        let readings = vec![
            reading("Kitchen", 3.0, TimeDelta::days(40) + TimeDelta::hours(5)),
            reading("Kitchen", 3.5, TimeDelta::days(40)),
            reading("Bar", 3.0, TimeDelta::hours(1)),
        ];
        let series = equipment_series(
            &readings,
            &fridge(),
            TimeFilter::Last24Hours,
            now(),
            CutoffPolicy::MostRecentLog,
        );
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_auto_select_prefers_first_out_of_range() {
        let a = Equipment::new("a", "A");
        let b = Equipment::new("b", "B");
        let c = Equipment::new("c", "C");
        let statuses = vec![
            (&a, EquipmentStatus::InRange { latest_celsius: 3.0 }),
            (&b, EquipmentStatus::OutOfRange { latest_celsius: 11.0 }),
            (&c, EquipmentStatus::OutOfRange { latest_celsius: 12.0 }),
        ];

        let mut selection = EquipmentSelection::new();
        assert_eq!(selection.auto_select(statuses, true), Some("b"));
    }

    #[test]
    fn test_auto_select_falls_back_to_first_and_is_sticky() {
        let a = Equipment::new("a", "A");
        let b = Equipment::new("b", "B");

        let mut selection = EquipmentSelection::new();
        let first = vec![(&a, EquipmentStatus::NoData), (&b, EquipmentStatus::NoData)];
        assert_eq!(selection.auto_select(first, true), Some("a"));

        // Later evaluations never move it.
        let later = vec![
            (&a, EquipmentStatus::InRange { latest_celsius: 3.0 }),
            (&b, EquipmentStatus::OutOfRange { latest_celsius: 20.0 }),
        ];
        assert_eq!(selection.auto_select(later, true), Some("a"));

        selection.choose("b");
        assert_eq!(selection.selected(), Some("b"));
    }

    #[test]
    fn test_auto_select_waits_for_readings() {
        let a = Equipment::new("a", "A");
        let mut selection = EquipmentSelection::new();
        assert_eq!(selection.auto_select(vec![(&a, EquipmentStatus::NoData)], false), None);
        assert_eq!(selection.auto_select(Vec::new(), true), None);
    }
}
