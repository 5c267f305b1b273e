//! Time windows over a reading series.
//!
//! A window is a lookback period (`24h`, `7d`, `30d`, `all`). The selector
//! picks the narrowest window that actually contains data, unless the user
//! picked one by hand.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::readings::TimedReading;

/// A lookback period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeFilter {
    #[serde(rename = "24h")]
    Last24Hours,
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl TimeFilter {
    /// Candidate filters in selection order.
    pub const ORDER: [TimeFilter; 4] = [
        TimeFilter::Last24Hours,
        TimeFilter::Last7Days,
        TimeFilter::Last30Days,
        TimeFilter::All,
    ];

    /// Length of the window, `None` for `All`.
    pub fn duration(&self) -> Option<TimeDelta> {
        match self {
            TimeFilter::Last24Hours => Some(TimeDelta::hours(24)),
            TimeFilter::Last7Days => Some(TimeDelta::days(7)),
            TimeFilter::Last30Days => Some(TimeDelta::days(30)),
            TimeFilter::All => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeFilter::Last24Hours => "24h",
            TimeFilter::Last7Days => "7d",
            TimeFilter::Last30Days => "30d",
            TimeFilter::All => "all",
        }
    }

    /// Whether `ts` falls inside this window ending at `anchor`.
    ///
    /// Only the 24 hour window also caps readings at the anchor; the wider
    /// windows accept anything after their cutoff.
    pub(crate) fn admits(&self, ts: NaiveDateTime, anchor: NaiveDateTime) -> bool {
        match self.duration() {
            None => true,
            Some(len) => {
                let after_cutoff = ts >= anchor - len;
                match self {
                    TimeFilter::Last24Hours => after_cutoff && ts <= anchor,
                    _ => after_cutoff,
                }
            }
        }
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "24h" => Ok(TimeFilter::Last24Hours),
            "7d" => Ok(TimeFilter::Last7Days),
            "30d" => Ok(TimeFilter::Last30Days),
            "all" => Ok(TimeFilter::All),
            other => Err(format!(
                "unknown time filter: {} (expected 24h, 7d, 30d or all)",
                other
            )),
        }
    }
}

/// What a window's cutoff is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoffPolicy {
    /// Cutoff is `now - window`.
    #[default]
    WallClock,
    /// Cutoff is `latest reading - window`, so that back-filled history that
    /// stops short of today still shows up. Falls back to `WallClock` when
    /// the series is empty.
    MostRecentLog,
}

/// The instant a window ends at, for a given series and policy.
pub(crate) fn window_anchor<R: AsRef<TimedReading>>(
    readings: &[R],
    now: NaiveDateTime,
    policy: CutoffPolicy,
) -> NaiveDateTime {
    match policy {
        CutoffPolicy::WallClock => now,
        CutoffPolicy::MostRecentLog => readings
            .iter()
            .map(|r| r.as_ref().recorded_at)
            .max()
            .unwrap_or(now),
    }
}

/// Readings inside `filter`, in their original order.
pub fn apply_filter<R: AsRef<TimedReading>>(
    readings: &[R],
    filter: TimeFilter,
    now: NaiveDateTime,
    policy: CutoffPolicy,
) -> Vec<&TimedReading> {
    let anchor = window_anchor(readings, now, policy);
    readings
        .iter()
        .map(|r| r.as_ref())
        .filter(|r| filter.admits(r.recorded_at, anchor))
        .collect()
}

/// True if at least one reading falls inside `filter`.
pub fn has_data<R: AsRef<TimedReading>>(
    readings: &[R],
    filter: TimeFilter,
    now: NaiveDateTime,
    policy: CutoffPolicy,
) -> bool {
    let anchor = window_anchor(readings, now, policy);
    readings
        .iter()
        .any(|r| filter.admits(r.as_ref().recorded_at, anchor))
}

/// Pick the window to show.
///
/// A manual choice always wins. Otherwise the first of `24h, 7d, 30d` with
/// data is returned, and `all` when none of them has any, even for an
/// empty series.
pub fn select_time_window<R: AsRef<TimedReading>>(
    readings: &[R],
    now: NaiveDateTime,
    policy: CutoffPolicy,
    manual: Option<TimeFilter>,
) -> TimeFilter {
    if let Some(filter) = manual {
        return filter;
    }
    TimeFilter::ORDER
        .into_iter()
        .find(|f| has_data(readings, *f, now, policy))
        .unwrap_or(TimeFilter::All)
}

/// Selection state for the active window.
///
/// Tracks whether the user has chosen a window. While that override is set,
/// [`WindowSelector::auto_select`] keeps the user's choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowSelector {
    selected: TimeFilter,
    manual_override: bool,
}

impl WindowSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The window currently in effect.
    pub fn selected(&self) -> TimeFilter {
        self.selected
    }

    pub fn is_manual(&self) -> bool {
        self.manual_override
    }

    /// What automatic selection would pick right now, regardless of override.
    pub fn suggestion<R: AsRef<TimedReading>>(
        &self,
        readings: &[R],
        now: NaiveDateTime,
        policy: CutoffPolicy,
    ) -> TimeFilter {
        select_time_window(readings, now, policy, None)
    }

    /// Re-run automatic selection. Does nothing to the selection while a
    /// manual override is active. Returns the window in effect.
    pub fn auto_select<R: AsRef<TimedReading>>(
        &mut self,
        readings: &[R],
        now: NaiveDateTime,
        policy: CutoffPolicy,
    ) -> TimeFilter {
        if !self.manual_override {
            let next = self.suggestion(readings, now, policy);
            if next != self.selected {
                debug!("Time window changed: {} -> {}", self.selected, next);
            }
            self.selected = next;
        }
        self.selected
    }

    /// The user picked a window.
    pub fn choose(&mut self, filter: TimeFilter) {
        self.selected = filter;
        self.manual_override = true;
    }

    /// Hand control back to automatic selection. The current window stays
    /// until the next `auto_select`.
    pub fn clear_override(&mut self) {
        self.manual_override = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempwatch_types::{ReadingType, TemperatureReading};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 31).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn at(ago: TimeDelta) -> TimedReading {
        let ts = now() - ago;
        TimedReading {
            reading: TemperatureReading::new(
                ReadingType::Fridge,
                3.0,
                ts.date().to_string(),
                ts.time().to_string(),
            ),
            recorded_at: ts,
        }
    }

    #[test]
    fn test_prefers_24h_when_recent_data_exists() {
        let readings = vec![at(TimeDelta::days(20)), at(TimeDelta::hours(3))];
        assert_eq!(
            select_time_window(&readings, now(), CutoffPolicy::WallClock, None),
            TimeFilter::Last24Hours
        );
    }

    #[test]
    fn test_cascades_to_coarser_windows() {
        let week = vec![at(TimeDelta::days(3))];
        assert_eq!(
            select_time_window(&week, now(), CutoffPolicy::WallClock, None),
            TimeFilter::Last7Days
        );

        let month = vec![at(TimeDelta::days(12))];
        assert_eq!(
            select_time_window(&month, now(), CutoffPolicy::WallClock, None),
            TimeFilter::Last30Days
        );

        let old = vec![at(TimeDelta::days(90))];
        assert_eq!(
            select_time_window(&old, now(), CutoffPolicy::WallClock, None),
            TimeFilter::All
        );
    }

    #[test]
    fn test_empty_series_falls_back_to_all() {
        for policy in [CutoffPolicy::WallClock, CutoffPolicy::MostRecentLog] {
            let empty: &[TimedReading] = &[];
            assert_eq!(select_time_window(empty, now(), policy, None), TimeFilter::All);
        }
    }

    #[test]
    fn test_24h_excludes_future_readings_but_7d_does_not() {
        let future = vec![at(TimeDelta::hours(-2))];
        let policy = CutoffPolicy::WallClock;
        assert!(!has_data(&future, TimeFilter::Last24Hours, now(), policy));
        assert!(has_data(&future, TimeFilter::Last7Days, now(), policy));
    }

    #[test]
    fn test_most_recent_log_anchors_on_latest_reading() {
        // Back-filled history that ended two months ago.
        let readings = vec![
            at(TimeDelta::days(65)),
            at(TimeDelta::days(61) + TimeDelta::hours(1)),
            at(TimeDelta::days(60) + TimeDelta::hours(2)),
            at(TimeDelta::days(60)),
        ];

        assert_eq!(
            select_time_window(&readings, now(), CutoffPolicy::WallClock, None),
            TimeFilter::All
        );
        assert_eq!(
            select_time_window(&readings, now(), CutoffPolicy::MostRecentLog, None),
            TimeFilter::Last24Hours
        );

        let policy = CutoffPolicy::MostRecentLog;
        let in_day = apply_filter(&readings, TimeFilter::Last24Hours, now(), policy);
        assert_eq!(in_day.len(), 2);
        let in_week = apply_filter(&readings, TimeFilter::Last7Days, now(), policy);
        assert_eq!(in_week.len(), 4);
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let readings = vec![at(TimeDelta::hours(24))];
        let policy = CutoffPolicy::WallClock;
        assert!(has_data(&readings, TimeFilter::Last24Hours, now(), policy));
    }

    #[test]
    fn test_manual_choice_wins() {
        let readings = vec![at(TimeDelta::hours(1))];
        let manual = Some(TimeFilter::Last30Days);
        assert_eq!(
            select_time_window(&readings, now(), CutoffPolicy::WallClock, manual),
            TimeFilter::Last30Days
        );
    }

    #[test]
    fn test_selector_override_suspends_auto_selection() {
        let recent = vec![at(TimeDelta::hours(1))];
        let old = vec![at(TimeDelta::days(10))];
        let policy = CutoffPolicy::WallClock;
        let mut selector = WindowSelector::new();

        assert_eq!(selector.auto_select(&recent, now(), policy), TimeFilter::Last24Hours);

        selector.choose(TimeFilter::All);
        assert!(selector.is_manual());
        assert_eq!(selector.auto_select(&old, now(), policy), TimeFilter::All);
        // Still queryable while overridden.
        assert_eq!(selector.suggestion(&old, now(), policy), TimeFilter::Last30Days);

        selector.clear_override();
        assert_eq!(selector.selected(), TimeFilter::All);
        assert_eq!(selector.auto_select(&old, now(), policy), TimeFilter::Last30Days);
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!("7D".parse::<TimeFilter>(), Ok(TimeFilter::Last7Days));
        assert!("1y".parse::<TimeFilter>().is_err());
    }
}
