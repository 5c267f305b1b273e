//! Destinations for generated warnings.
//!
//! Publishing is fire-and-forget: a sink never reports failure back to the
//! generator. Delivery, display and dismissal are the sink's business.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

use chrono::{NaiveDateTime, TimeDelta};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::clock::Clock;
use tempwatch_types::{Severity, Warning};

/// Receives warnings from the generator.
pub trait WarningSink: Send + Sync + Debug {
    fn publish(&self, warning: Warning);
}

impl<S: WarningSink + ?Sized> WarningSink for Arc<S> {
    fn publish(&self, warning: Warning) {
        (**self).publish(warning)
    }
}

impl<S: WarningSink + ?Sized> WarningSink for Box<S> {
    fn publish(&self, warning: Warning) {
        (**self).publish(warning)
    }
}

/// Writes warnings to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl WarningSink for LogSink {
    fn publish(&self, warning: Warning) {
        let route = warning.action.as_ref().map(|a| a.route.as_str()).unwrap_or("-");
        match warning.severity {
            Severity::Warning => warn!(title = %warning.title, route, "{}", warning.message),
            Severity::Error => error!(title = %warning.title, route, "{}", warning.message),
        }
    }
}

/// Forwards warnings into a tokio channel.
///
/// Sends are best effort; a full or closed channel drops the warning.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<Warning>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<Warning>) -> Self {
        Self { tx }
    }

    /// Create a sink and the receiver for its warnings.
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<Warning>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, rx)
    }
}

impl WarningSink for ChannelSink {
    fn publish(&self, warning: Warning) {
        if self.tx.try_send(warning).is_err() {
            debug!("Warning channel full or closed, dropping warning");
        }
    }
}

/// Keeps every published warning in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    warnings: Mutex<Vec<Warning>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far, oldest first.
    pub fn warnings(&self) -> Vec<Warning> {
        self.lock().clone()
    }

    /// Drain the collected warnings.
    pub fn take(&self) -> Vec<Warning> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Warning>> {
        self.warnings.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WarningSink for MemorySink {
    fn publish(&self, warning: Warning) {
        self.lock().push(warning);
    }
}

/// Suppresses a warning identical to one forwarded less than `window` ago.
///
/// Identity is the full warning content. A zero or negative window forwards
/// everything.
#[derive(Debug)]
pub struct CooldownSink<S> {
    inner: S,
    clock: Arc<dyn Clock>,
    window: TimeDelta,
    last_sent: Mutex<HashMap<u64, NaiveDateTime>>,
}

impl<S: WarningSink> CooldownSink<S> {
    pub fn new(inner: S, clock: Arc<dyn Clock>, window: TimeDelta) -> Self {
        Self {
            inner,
            clock,
            window,
            last_sent: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn fingerprint(warning: &Warning) -> u64 {
        let mut hasher = DefaultHasher::new();
        warning.hash(&mut hasher);
        hasher.finish()
    }
}

impl<S: WarningSink> WarningSink for CooldownSink<S> {
    fn publish(&self, warning: Warning) {
        if self.window <= TimeDelta::zero() {
            self.inner.publish(warning);
            return;
        }

        let now = self.clock.now();
        let key = Self::fingerprint(&warning);
        {
            let mut last_sent = self
                .last_sent
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(at) = last_sent.get(&key) {
                if now - *at < self.window {
                    debug!("Suppressing repeated warning: {}", warning.title);
                    return;
                }
            }
            // Entries past the window can no longer suppress anything.
            last_sent.retain(|_, at| now - *at < self.window);
            last_sent.insert(key, now);
        }
        self.inner.publish(warning);
    }
}
