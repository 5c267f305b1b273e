//! Error types for the compliance engine.

use thiserror::Error;

/// A reading whose timestamp could not be understood.
///
/// The reading is left out of every evaluation; the error is handed back to
/// the caller alongside the readings that did parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// `recorded_date` is not a `YYYY-MM-DD` calendar date.
    #[error("reading {reading}: invalid recorded date {value:?}")]
    InvalidDate { reading: String, value: String },

    /// `recorded_time` is not `HH:MM` or `HH:MM:SS`.
    #[error("reading {reading}: invalid recorded time {value:?}")]
    InvalidTime { reading: String, value: String },
}

impl DataError {
    /// Identifier of the offending reading (its id, or `#index` when it has none).
    pub fn reading(&self) -> &str {
        match self {
            DataError::InvalidDate { reading, .. } | DataError::InvalidTime { reading, .. } => {
                reading
            }
        }
    }
}
