//! Compliance alerts.

use alloc::string::String;

/// How urgent a warning is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Warning => "WARN",
            Severity::Error => "ERR",
        }
    }
}

/// Where the user can go to resolve a warning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WarningAction {
    /// Button text.
    pub label: String,
    /// Application route to navigate to.
    pub route: String,
}

/// A transient compliance alert. Never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Warning {
    pub severity: Severity,
    pub title: String,
    pub message: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub action: Option<WarningAction>,
    pub dismissible: bool,
    pub auto_hide: bool,
}

impl Warning {
    /// A dismissible, sticky alert with no action attached.
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
            action: None,
            dismissible: true,
            auto_hide: false,
        }
    }

    /// Attach a navigation action.
    pub fn with_action(mut self, label: impl Into<String>, route: impl Into<String>) -> Self {
        self.action = Some(WarningAction {
            label: label.into(),
            route: route.into(),
        });
        self
    }
}
