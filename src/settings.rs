//! Runtime settings.
//!
//! Settings are layered: built-in defaults, then an optional config file
//! (format from its extension, usually TOML), then `TEMPWATCH_*` environment
//! variables. Nested keys use a double underscore, e.g.
//! `TEMPWATCH_WARNINGS__STALE_AFTER_HOURS=6`.
//!
//! ```toml
//! refresh_secs = 5
//!
//! [warnings]
//! stale_after_hours = 8
//! food_check = "any_food_type"
//! cooldown_secs = 0
//!
//! [window]
//! policy = "most_recent_log"
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use chrono::TimeDelta;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::data::CutoffPolicy;
use crate::warnings::{FoodCheckCriterion, WarningRules};

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "TEMPWATCH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds between polls in watch mode.
    pub refresh_secs: u64,
    pub warnings: WarningSettings,
    pub window: WindowSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_secs: 5,
            warnings: WarningSettings::default(),
            window: WindowSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarningSettings {
    pub stale_after_hours: i64,
    /// `"any_food_type"`, or a literal reading type tag.
    pub food_check: FoodCheckCriterion,
    /// Suppress identical warnings for this long. 0 re-emits on every run.
    pub cooldown_secs: u64,
}

impl Default for WarningSettings {
    fn default() -> Self {
        let rules = WarningRules::default();
        Self {
            stale_after_hours: rules.stale_after_hours,
            food_check: rules.food_check,
            cooldown_secs: 0,
        }
    }
}

impl WarningSettings {
    pub fn rules(&self) -> WarningRules {
        WarningRules {
            stale_after_hours: self.stale_after_hours,
            food_check: self.food_check.clone(),
        }
    }

    /// The suppression window, `None` when cooldown is off or the value
    /// does not fit a `TimeDelta` (which [`Settings::load`] rejects).
    pub fn cooldown(&self) -> Option<TimeDelta> {
        self.cooldown_window().ok().flatten()
    }

    fn cooldown_window(&self) -> Result<Option<TimeDelta>> {
        if self.cooldown_secs == 0 {
            return Ok(None);
        }
        i64::try_from(self.cooldown_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .map(Some)
            .ok_or_else(|| {
                anyhow!(
                    "warnings.cooldown_secs is too large: {}",
                    self.cooldown_secs
                )
            })
    }

    fn validate(&self) -> Result<()> {
        if self.stale_after_hours <= 0 {
            bail!(
                "warnings.stale_after_hours must be positive, got {}",
                self.stale_after_hours
            );
        }
        if TimeDelta::try_hours(self.stale_after_hours).is_none() {
            bail!(
                "warnings.stale_after_hours is too large: {}",
                self.stale_after_hours
            );
        }
        self.cooldown_window()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub policy: CutoffPolicy,
}

impl Settings {
    /// Load settings from defaults, `path` (if given) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let settings: Settings = builder.add_source(env).build()?.try_deserialize()?;
        settings.warnings.validate()?;
        Ok(settings)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
