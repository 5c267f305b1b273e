//! One evaluation pass over a snapshot.
//!
//! A [`ComplianceReport`] is what the dashboard shows: every equipment's
//! status in the active window, a verdict for every food reading in that
//! window, and the (sampled) chart series of the selected equipment.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::appearance::{equipment_appearance, safety_appearance, Appearance};
use super::equipment::{equipment_series, evaluate_equipment_status, EquipmentStatus};
use super::readings::{ReadingSet, TimedReading};
use super::safety::{evaluate_food_safety, FoodSafetyStatus, SafetyLevel};
use super::sampler::{sample_for_display, SamplePoint, SampledSeries};
use super::window::{apply_filter, CutoffPolicy, TimeFilter};
use tempwatch_types::{Equipment, EquipmentType};

/// Status of one equipment, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentRow {
    pub id: String,
    pub name: String,
    pub equipment_type: EquipmentType,
    pub location: Option<String>,
    pub is_active: bool,
    /// Readings at this equipment's location in the window.
    pub readings_in_window: usize,
    #[serde(flatten)]
    pub status: EquipmentStatus,
    pub appearance: Appearance,
}

/// Verdict for one food reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodVerdict {
    pub reading_id: Option<String>,
    pub reading_type: String,
    /// Display label of `reading_type`.
    pub label: String,
    pub location: Option<String>,
    pub recorded_at: NaiveDateTime,
    pub celsius: f64,
    #[serde(flatten)]
    pub status: FoodSafetyStatus,
    pub level: SafetyLevel,
    pub message: String,
    pub appearance: Appearance,
}

impl FoodVerdict {
    fn new(reading: &TimedReading, status: FoodSafetyStatus) -> Self {
        Self {
            reading_id: reading.reading.id.clone(),
            reading_type: reading.reading.reading_type.tag().to_string(),
            label: reading.reading.reading_type.label().to_string(),
            location: reading.reading.equipment_location.clone(),
            recorded_at: reading.recorded_at,
            celsius: reading.temperature(),
            level: status.level(),
            message: status.message(),
            appearance: safety_appearance(status.level()),
            status,
        }
    }
}

/// Chart data for the selected equipment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentChart {
    pub equipment_id: String,
    pub min_celsius: Option<f64>,
    pub max_celsius: Option<f64>,
    #[serde(flatten)]
    pub sampled: SampledSeries<SamplePoint>,
}

/// Evaluated state of a snapshot at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceReport {
    pub generated_at: NaiveDateTime,
    pub filter: TimeFilter,
    pub policy: CutoffPolicy,
    /// Usable readings in the snapshot, any window.
    pub total_readings: usize,
    /// Usable readings inside the active window.
    pub readings_in_window: usize,
    /// One row per equipment, in list order.
    pub equipment: Vec<EquipmentRow>,
    /// Food readings in the window, newest first.
    pub food: Vec<FoodVerdict>,
    pub chart: Option<EquipmentChart>,
    /// Readings left out because their timestamp did not parse.
    pub excluded: Vec<String>,
}

impl ComplianceReport {
    /// Evaluate every equipment and food reading inside `filter`.
    ///
    /// The chart is left empty; see [`ComplianceReport::chart_for`].
    pub fn build(
        readings: &ReadingSet,
        equipment: &[Equipment],
        now: NaiveDateTime,
        filter: TimeFilter,
        policy: CutoffPolicy,
    ) -> Self {
        let windowed = apply_filter(readings.as_slice(), filter, now, policy);

        let rows = equipment
            .iter()
            .map(|e| {
                let series = equipment_series(readings.as_slice(), e, filter, now, policy);
                let status = evaluate_equipment_status(e, &series);
                EquipmentRow {
                    id: e.id.clone(),
                    name: e.name.clone(),
                    equipment_type: e.equipment_type.clone(),
                    location: e.location.clone(),
                    is_active: e.is_active,
                    readings_in_window: series.len(),
                    appearance: equipment_appearance(&status),
                    status,
                }
            })
            .collect();

        let food = windowed
            .iter()
            .rev()
            .filter_map(|r| evaluate_food_safety(r, now).map(|status| FoodVerdict::new(r, status)))
            .collect();

        Self {
            generated_at: now,
            filter,
            policy,
            total_readings: readings.len(),
            readings_in_window: windowed.len(),
            equipment: rows,
            food,
            chart: None,
            excluded: readings.errors().iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Fill in the chart for `equipment` using this report's window.
    ///
    /// The window is anchored on the equipment's own latest reading whatever
    /// the report's policy.
    pub fn chart_for(&mut self, readings: &ReadingSet, equipment: &Equipment) {
        let series: Vec<SamplePoint> = equipment_series(
            readings.as_slice(),
            equipment,
            self.filter,
            self.generated_at,
            CutoffPolicy::MostRecentLog,
        )
        .into_iter()
        .map(SamplePoint::from)
        .collect();

        self.chart = Some(EquipmentChart {
            equipment_id: equipment.id.clone(),
            min_celsius: equipment.min_temp_celsius,
            max_celsius: equipment.max_temp_celsius,
            sampled: sample_for_display(&series),
        });
    }

    /// Statuses paired with their equipment, for equipment auto-selection.
    pub fn statuses<'a>(
        &'a self,
        equipment: &'a [Equipment],
    ) -> impl Iterator<Item = (&'a Equipment, EquipmentStatus)> + 'a {
        equipment.iter().zip(self.equipment.iter().map(|row| row.status))
    }

    pub fn row(&self, id: &str) -> Option<&EquipmentRow> {
        self.equipment.iter().find(|row| row.id == id)
    }

    /// Equipment whose latest reading is outside its band.
    pub fn out_of_range(&self) -> impl Iterator<Item = &EquipmentRow> {
        self.equipment.iter().filter(|row| row.status.is_out_of_range())
    }

    /// Food readings that must be thrown away.
    pub fn discards(&self) -> impl Iterator<Item = &FoodVerdict> {
        self.food.iter().filter(|v| v.status.requires_discard())
    }

    /// Worst food-safety level in the window, `None` without food readings.
    pub fn worst_food_level(&self) -> Option<SafetyLevel> {
        self.food.iter().map(|v| v.level).max()
    }
}
