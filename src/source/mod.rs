//! Data source abstraction for receiving snapshots.
//!
//! A snapshot carries every reading and every piece of equipment the
//! persistence layer knows about. Sources deliver whole snapshots; a new
//! snapshot is what triggers re-evaluation and the warning generator.

mod channel;
mod file;

pub use channel::ChannelSource;
pub use file::FileSource;

use std::fmt::Debug;

use tempwatch_types::Snapshot;

/// Trait for receiving snapshots from various sources.
///
/// # Example
///
/// ```
/// use tempwatch::{DataSource, FileSource};
///
/// let mut source = FileSource::new("snapshot.json");
/// if let Some(snapshot) = source.poll() {
///     println!("Got {} readings", snapshot.readings.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<Snapshot>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;

    /// Returns the error message if the last poll failed.
    fn error(&self) -> Option<&str>;
}
