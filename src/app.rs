//! Dashboard state.
//!
//! [`Dashboard`] owns the data source and the selection state, and keeps
//! a [`ComplianceReport`] current. Every new snapshot also triggers the
//! warning generator.

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::data::{
    ComplianceReport, CutoffPolicy, EquipmentSelection, ReadingSet, TimeFilter, WindowSelector,
};
use crate::settings::Settings;
use crate::source::DataSource;
use crate::warnings::{CooldownSink, WarningGenerator, WarningSink};
use tempwatch_types::{Snapshot, Warning};

/// What `--export` writes.
#[derive(Debug, Serialize)]
struct DashboardExport<'a> {
    source: &'a str,
    manual_filter: bool,
    selected_equipment: Option<&'a str>,
    report: Option<&'a ComplianceReport>,
    warnings: &'a [Warning],
}

/// Main dashboard state.
#[derive(Debug)]
pub struct Dashboard {
    source: Box<dyn DataSource>,
    clock: Arc<dyn Clock>,
    policy: CutoffPolicy,
    generator: WarningGenerator,
    window: WindowSelector,
    selection: EquipmentSelection,
    snapshot: Snapshot,
    readings: ReadingSet,
    report: Option<ComplianceReport>,
    /// Warnings from the last generator run.
    warnings: Vec<Warning>,
    load_error: Option<String>,
}

impl Dashboard {
    /// Create a dashboard. Warnings go to `sink`, behind a cooldown when
    /// the settings ask for one.
    pub fn new(
        source: Box<dyn DataSource>,
        clock: Arc<dyn Clock>,
        settings: &Settings,
        sink: Box<dyn WarningSink>,
    ) -> Self {
        let sink: Box<dyn WarningSink> = match settings.warnings.cooldown() {
            Some(window) => Box::new(CooldownSink::new(sink, clock.clone(), window)),
            None => sink,
        };

        Self {
            source,
            clock,
            policy: settings.window.policy,
            generator: WarningGenerator::new(settings.warnings.rules(), sink),
            window: WindowSelector::new(),
            selection: EquipmentSelection::new(),
            snapshot: Snapshot::default(),
            readings: ReadingSet::default(),
            report: None,
            warnings: Vec::new(),
            load_error: None,
        }
    }

    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Error from the last poll of the source, if it failed.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn readings(&self) -> &ReadingSet {
        &self.readings
    }

    /// The latest report. `None` until the first snapshot arrives.
    pub fn report(&self) -> Option<&ComplianceReport> {
        self.report.as_ref()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn selected_filter(&self) -> TimeFilter {
        self.window.selected()
    }

    pub fn is_filter_manual(&self) -> bool {
        self.window.is_manual()
    }

    pub fn selected_equipment(&self) -> Option<&str> {
        self.selection.selected()
    }

    /// Poll the source; on new data re-run the warnings and the report.
    ///
    /// Returns `Ok(true)` if a new snapshot was loaded.
    pub fn reload_data(&mut self) -> Result<bool> {
        let Some(snapshot) = self.source.poll() else {
            if let Some(err) = self.source.error() {
                if self.load_error.as_deref() != Some(err) {
                    warn!("Failed to load {}: {}", self.source.description(), err);
                }
                self.load_error = Some(err.to_string());
            }
            return Ok(false);
        };

        self.load_error = None;
        self.readings = ReadingSet::from_readings(snapshot.readings.iter().cloned());
        self.snapshot = snapshot;
        info!(
            "Loaded {} readings ({} excluded) and {} equipment from {}",
            self.readings.len(),
            self.readings.errors().len(),
            self.snapshot.equipment.len(),
            self.source.description()
        );

        let now = self.clock.now();
        self.warnings = self
            .generator
            .run(&self.readings, &self.snapshot.equipment, now);
        self.evaluate();
        Ok(true)
    }

    /// Re-evaluate the current snapshot against the clock without polling.
    ///
    /// Food verdicts age with time even when no new readings arrive.
    pub fn refresh(&mut self) {
        if self.report.is_some() {
            self.evaluate();
        }
    }

    /// Pin the time window. Automatic selection stays off until
    /// [`Dashboard::clear_filter_override`].
    pub fn choose_filter(&mut self, filter: TimeFilter) {
        self.window.choose(filter);
        self.refresh();
    }

    pub fn clear_filter_override(&mut self) {
        self.window.clear_override();
        self.refresh();
    }

    /// Focus an equipment. Unknown ids are kept but produce no chart.
    pub fn choose_equipment(&mut self, id: impl Into<String>) {
        self.selection.choose(id);
        self.refresh();
    }

    fn evaluate(&mut self) {
        let now = self.clock.now();
        let equipment = &self.snapshot.equipment;

        let filter = self
            .window
            .auto_select(self.readings.as_slice(), now, self.policy);
        let mut report =
            ComplianceReport::build(&self.readings, equipment, now, filter, self.policy);

        self.selection
            .auto_select(report.statuses(equipment), !self.readings.is_empty());
        if let Some(id) = self.selection.selected() {
            match self.snapshot.equipment_by_id(id) {
                Some(selected) => report.chart_for(&self.readings, selected),
                None => debug!("Selected equipment {} is not in the snapshot", id),
            }
        }

        self.report = Some(report);
    }

    /// The current state as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String> {
        let export = DashboardExport {
            source: self.source.description(),
            manual_filter: self.window.is_manual(),
            selected_equipment: self.selection.selected(),
            report: self.report.as_ref(),
            warnings: &self.warnings,
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::source::{ChannelSource, FileSource};
    use crate::warnings::MemorySink;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use tempwatch_types::{Equipment, ReadingType, Severity, TemperatureReading};
    use tokio::sync::watch;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(15, 0, 0).unwrap()
    }

    fn snapshot() -> Snapshot {
        Snapshot::builder()
            .equipment(Equipment::new("fr-1", "Walk-in").location("Kitchen").range(2.0, 8.0))
            .equipment(Equipment::new("fr-2", "Bar fridge").location("Bar").range(1.0, 5.0))
            .reading(fridge(4.0, "2024-05-01", "12:00", "Kitchen"))
            .reading(fridge(9.0, "2024-05-01", "14:00", "Kitchen"))
            .reading(fridge(3.0, "2024-05-01", "14:30", "Bar"))
            .build()
    }

    fn fridge(celsius: f64, date: &str, time: &str, location: &str) -> TemperatureReading {
        TemperatureReading::new(ReadingType::Fridge, celsius, date, time).at(location)
    }

    struct Fixture {
        dashboard: Dashboard,
        tx: watch::Sender<Snapshot>,
        clock: Arc<FixedClock>,
        sink: Arc<MemorySink>,
    }

    fn fixture(settings: Settings) -> Fixture {
        let (tx, source) = ChannelSource::create("test");
        let clock = Arc::new(FixedClock::new(now()));
        let sink = Arc::new(MemorySink::new());
        let dashboard = Dashboard::new(
            Box::new(source),
            clock.clone(),
            &settings,
            Box::new(sink.clone()),
        );
        Fixture {
            dashboard,
            tx,
            clock,
            sink,
        }
    }

    #[test]
    fn test_reload_evaluates_and_warns() {
        let mut f = fixture(Settings::default());
        f.tx.send(snapshot()).unwrap();

        assert!(f.dashboard.reload_data().unwrap());
        assert_eq!(f.dashboard.source_description(), "channel: test");

        let report = f.dashboard.report().unwrap();
        assert_eq!(report.filter, TimeFilter::Last24Hours);
        assert_eq!(report.out_of_range().count(), 1);

        // Auto-selected the out-of-range walk-in and charted it.
        assert_eq!(f.dashboard.selected_equipment(), Some("fr-1"));
        assert_eq!(report.chart.as_ref().map(|c| c.equipment_id.as_str()), Some("fr-1"));

        let titles: Vec<_> = f.dashboard.warnings().iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, vec!["Missing Food Temperature Check", "Out of Range: Walk-in"]);
        assert_eq!(f.dashboard.warnings()[1].severity, Severity::Error);
        assert_eq!(f.sink.warnings().len(), 2);

        // Nothing new on the channel.
        assert!(!f.dashboard.reload_data().unwrap());
        assert_eq!(f.sink.warnings().len(), 2);
    }

    #[test]
    fn test_every_refresh_reemits_without_cooldown() {
        let mut f = fixture(Settings::default());
        f.tx.send(snapshot()).unwrap();
        f.dashboard.reload_data().unwrap();
        f.tx.send(snapshot()).unwrap();
        f.dashboard.reload_data().unwrap();

        assert_eq!(f.sink.warnings().len(), 4);
    }

    #[test]
    fn test_cooldown_from_settings() {
        let mut settings = Settings::default();
        settings.warnings.cooldown_secs = 3600;
        let mut f = fixture(settings);

        f.tx.send(snapshot()).unwrap();
        f.dashboard.reload_data().unwrap();
        f.tx.send(snapshot()).unwrap();
        f.dashboard.reload_data().unwrap();
        assert_eq!(f.sink.warnings().len(), 2);
        // The dashboard itself still shows them.
        assert_eq!(f.dashboard.warnings().len(), 2);

        f.clock.advance(TimeDelta::hours(1));
        f.tx.send(snapshot()).unwrap();
        f.dashboard.reload_data().unwrap();
        assert!(f.sink.warnings().len() > 2);
    }

    #[test]
    fn test_manual_filter_survives_refresh() {
        let mut f = fixture(Settings::default());
        f.tx.send(snapshot()).unwrap();
        f.dashboard.reload_data().unwrap();

        f.dashboard.choose_filter(TimeFilter::All);
        assert!(f.dashboard.is_filter_manual());

        f.clock.advance(TimeDelta::days(3));
        f.dashboard.refresh();
        assert_eq!(f.dashboard.report().unwrap().filter, TimeFilter::All);

        f.dashboard.clear_filter_override();
        assert_eq!(f.dashboard.selected_filter(), TimeFilter::Last7Days);
    }

    #[test]
    fn test_choose_equipment_moves_chart() {
        let mut f = fixture(Settings::default());
        f.tx.send(snapshot()).unwrap();
        f.dashboard.reload_data().unwrap();

        f.dashboard.choose_equipment("fr-2");
        let chart = f.dashboard.report().unwrap().chart.as_ref().unwrap();
        assert_eq!(chart.equipment_id, "fr-2");
        assert_eq!(chart.sampled.series.len(), 1);

        // A choice that vanished from the list is kept, with no chart.
        f.dashboard.choose_equipment("gone");
        assert_eq!(f.dashboard.selected_equipment(), Some("gone"));
        assert!(f.dashboard.report().unwrap().chart.is_none());
    }

    #[test]
    fn test_chart_anchors_on_backfilled_equipment() {
        let mut f = fixture(Settings::default());
        f.clock.set(
            NaiveDate::from_ymd_opt(2024, 5, 31)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        );
        let snapshot = Snapshot::builder()
            .equipment(Equipment::new("fr-1", "Walk-in").location("Kitchen").range(2.0, 8.0))
            .equipment(Equipment::new("fr-2", "Bar fridge").location("Bar").range(1.0, 5.0))
            .reading(fridge(4.0, "2024-04-20", "08:00", "Kitchen"))
            .reading(fridge(5.0, "2024-04-20", "10:00", "Kitchen"))
            .reading(fridge(3.0, "2024-05-31", "11:00", "Bar"))
            .build();
        f.tx.send(snapshot).unwrap();
        f.dashboard.reload_data().unwrap();

        let report = f.dashboard.report().unwrap();
        assert_eq!(report.filter, TimeFilter::Last24Hours);
        assert_eq!(report.policy, CutoffPolicy::WallClock);
        assert_eq!(f.dashboard.selected_equipment(), Some("fr-1"));

        // The status row follows the wall clock, the chart follows the history.
        assert_eq!(report.row("fr-1").unwrap().readings_in_window, 0);
        let chart = report.chart.as_ref().unwrap();
        assert_eq!(chart.sampled.series.len(), 2);

        f.dashboard.choose_equipment("fr-2");
        let chart = f.dashboard.report().unwrap().chart.as_ref().unwrap();
        assert_eq!(chart.equipment_id, "fr-2");
        assert_eq!(chart.sampled.series.len(), 1);
    }

    #[test]
    fn test_source_error_is_recorded() {
        let source = FileSource::new("/nonexistent/snapshot.json");
        let mut dashboard = Dashboard::new(
            Box::new(source),
            Arc::new(FixedClock::new(now())),
            &Settings::default(),
            Box::new(MemorySink::new()),
        );

        assert!(!dashboard.reload_data().unwrap());
        assert!(dashboard.load_error().unwrap().contains("Read error"));
        assert!(dashboard.report().is_none());
    }

    #[test]
    fn test_export_json() {
        let mut f = fixture(Settings::default());
        f.tx.send(snapshot()).unwrap();
        f.dashboard.reload_data().unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&f.dashboard.export_json().unwrap()).unwrap();
        assert_eq!(json["selected_equipment"], "fr-1");
        assert_eq!(json["report"]["filter"], "24h");
        assert_eq!(json["warnings"].as_array().map(|w| w.len()), Some(2));
    }
}
