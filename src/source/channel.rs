//! Channel-based data source.
//!
//! Receives snapshots via a tokio watch channel, for embedding the engine
//! next to whatever owns the persistence layer.

use tokio::sync::watch;

use super::DataSource;
use tempwatch_types::Snapshot;

/// A data source that receives snapshots via a channel.
///
/// Only the latest snapshot matters, so a watch channel is used: a producer
/// that sends twice between polls delivers only the second snapshot.
///
/// # Example
///
/// ```
/// use tempwatch::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("kitchen api");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Snapshot>,
    description: String,
    /// The value present at creation has been handed out.
    primed: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// `source_description` names where snapshots come from.
    pub fn new(receiver: watch::Receiver<Snapshot>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            primed: false,
        }
    }

    /// Create a channel pair. Returns (sender, source).
    pub fn create(source_description: &str) -> (watch::Sender<Snapshot>, Self) {
        let (tx, rx) = watch::channel(Snapshot::default());
        (tx, Self::new(rx, source_description))
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<Snapshot> {
        let first = !std::mem::replace(&mut self.primed, true);
        // Works after the sender is gone, so a last unseen snapshot still
        // comes through.
        let current = self.receiver.borrow_and_update();
        (first || current.has_changed()).then(|| Snapshot::clone(&current))
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.receiver
            .has_changed()
            .is_err()
            .then_some("Sender dropped")
    }
}
