//! File-based data source.
//!
//! Polls a JSON file for snapshots.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};

use super::DataSource;
use tempwatch_types::Snapshot;

/// A data source that reads snapshots from a JSON file.
///
/// The source tracks the file's modification time and only returns new data
/// when the file has been updated. Snapshots with an incompatible schema
/// version are rejected.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
        }
    }

    /// Returns the path being monitored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&mut self) -> Option<Snapshot> {
        let result = fs::read_to_string(&self.path)
            .map_err(|e| format!("Read error: {}", e))
            .and_then(|content| {
                serde_json::from_str::<Snapshot>(&content)
                    .map_err(|e| format!("Parse error: {}", e))
            })
            .and_then(|snapshot| {
                if snapshot.version.is_compatible() {
                    Ok(snapshot)
                } else {
                    Err(format!(
                        "Unsupported schema version {}.{}",
                        snapshot.version.major, snapshot.version.minor
                    ))
                }
            });

        match result {
            Ok(snapshot) => {
                debug!(
                    "Loaded {} readings and {} equipment from {}",
                    snapshot.readings.len(),
                    snapshot.equipment.len(),
                    self.path.display()
                );
                self.last_error = None;
                Some(snapshot)
            }
            Err(e) => {
                warn!("{}: {}", self.path.display(), e);
                self.last_error = Some(e);
                None
            }
        }
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<Snapshot> {
        let current_modified = self.get_modified_time();

        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // Nothing read yet, always try
            (Some(_), None) => false, // File disappeared, keep the last data
            (Some(last), Some(current)) => current > last,
        };

        if file_changed {
            if let Some(snapshot) = self.read_file() {
                self.last_modified = current_modified;
                return Some(snapshot);
            }
        }

        None
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
