//! Readings with parsed timestamps.
//!
//! Everything downstream of ingestion works on [`TimedReading`]s. Readings
//! whose date or time cannot be parsed never get this far: they are reported
//! as [`DataError`]s and left out.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::warn;

use super::timestamp::{parse_date, parse_time};
use crate::error::DataError;
use tempwatch_types::TemperatureReading;

/// A reading paired with its local recorded date-time.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedReading {
    pub reading: TemperatureReading,
    pub recorded_at: NaiveDateTime,
}

impl TimedReading {
    /// Parse the reading's date and time.
    ///
    /// `index` names the reading in the error when it has no id.
    pub fn parse(reading: TemperatureReading, index: usize) -> Result<Self, DataError> {
        let name = || reading.id.clone().unwrap_or_else(|| format!("#{}", index));

        let Some(date) = parse_date(&reading.recorded_date) else {
            return Err(DataError::InvalidDate {
                reading: name(),
                value: reading.recorded_date.clone(),
            });
        };
        let Some(time) = parse_time(&reading.recorded_time) else {
            return Err(DataError::InvalidTime {
                reading: name(),
                value: reading.recorded_time.clone(),
            });
        };

        Ok(Self {
            recorded_at: date.and_time(time),
            reading,
        })
    }

    pub fn temperature(&self) -> f64 {
        self.reading.temperature_celsius
    }

    pub fn date(&self) -> NaiveDate {
        self.recorded_at.date()
    }

    pub fn is_at(&self, location: &str) -> bool {
        self.reading.is_at(location)
    }
}

impl AsRef<TimedReading> for TimedReading {
    fn as_ref(&self) -> &TimedReading {
        self
    }
}

/// All usable readings of a snapshot, ascending by recorded time.
#[derive(Debug, Clone, Default)]
pub struct ReadingSet {
    readings: Vec<TimedReading>,
    errors: Vec<DataError>,
}

impl ReadingSet {
    /// Parse every reading, keeping the ones with valid timestamps.
    ///
    /// Readings with equal timestamps keep their input order.
    pub fn from_readings(readings: impl IntoIterator<Item = TemperatureReading>) -> Self {
        let mut parsed = Vec::new();
        let mut errors = Vec::new();

        for (index, reading) in readings.into_iter().enumerate() {
            match TimedReading::parse(reading, index) {
                Ok(timed) => parsed.push(timed),
                Err(e) => {
                    warn!("Excluding reading from evaluation: {}", e);
                    errors.push(e);
                }
            }
        }

        parsed.sort_by_key(|r| r.recorded_at);

        Self {
            readings: parsed,
            errors,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimedReading> {
        self.readings.iter()
    }

    pub fn as_slice(&self) -> &[TimedReading] {
        &self.readings
    }

    /// Readings that were excluded, in input order.
    pub fn errors(&self) -> &[DataError] {
        &self.errors
    }

    /// The most recent reading, if any.
    pub fn latest(&self) -> Option<&TimedReading> {
        self.readings.last()
    }

    /// Readings taken at `location`, still ascending.
    pub fn at_location<'a>(&'a self, location: &'a str) -> impl Iterator<Item = &'a TimedReading> {
        self.readings.iter().filter(move |r| r.is_at(location))
    }

    /// Readings recorded on `date`.
    pub fn on_date(&self, date: NaiveDate) -> impl Iterator<Item = &TimedReading> {
        self.readings.iter().filter(move |r| r.date() == date)
    }
}

impl<'a> IntoIterator for &'a ReadingSet {
    type Item = &'a TimedReading;
    type IntoIter = std::slice::Iter<'a, TimedReading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.iter()
    }
}
