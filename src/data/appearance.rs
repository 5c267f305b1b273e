//! Presentation mapping for status tags.
//!
//! Evaluators return plain enums; colors and icons are looked up here so a
//! renderer can restyle without touching the rules.

use serde::Serialize;

use super::equipment::EquipmentStatus;
use super::safety::SafetyLevel;
use tempwatch_types::Severity;

/// How to draw a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Appearance {
    /// Named color from the dashboard palette.
    pub color: &'static str,
    /// Icon name.
    pub icon: &'static str,
}

const SUCCESS: Appearance = Appearance {
    color: "success",
    icon: "check-circle",
};
const CAUTION: Appearance = Appearance {
    color: "warning",
    icon: "alert-triangle",
};
const CRITICAL: Appearance = Appearance {
    color: "error",
    icon: "x-octagon",
};
const MUTED: Appearance = Appearance {
    color: "default",
    icon: "help-circle",
};

pub fn safety_appearance(level: SafetyLevel) -> Appearance {
    match level {
        SafetyLevel::Safe => SUCCESS,
        SafetyLevel::Warning => CAUTION,
        SafetyLevel::Danger => CRITICAL,
    }
}

pub fn equipment_appearance(status: &EquipmentStatus) -> Appearance {
    match status {
        EquipmentStatus::NoData => MUTED,
        EquipmentStatus::NoThresholds { .. } => Appearance {
            color: "default",
            icon: "thermometer",
        },
        EquipmentStatus::InRange { .. } => SUCCESS,
        EquipmentStatus::OutOfRange { .. } => CRITICAL,
    }
}

pub fn severity_appearance(severity: Severity) -> Appearance {
    match severity {
        Severity::Warning => CAUTION,
        Severity::Error => CRITICAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_and_danger_share_critical_style() {
        assert_eq!(
            equipment_appearance(&EquipmentStatus::OutOfRange { latest_celsius: 9.0 }),
            safety_appearance(SafetyLevel::Danger)
        );
        assert_eq!(severity_appearance(Severity::Error).color, "error");
    }
}
