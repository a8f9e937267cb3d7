//! Sensors module - motion sensor kinds and the host capability providers

pub mod fixed;

#[cfg(all(feature = "linux", target_os = "linux"))]
pub mod iio;

use std::fmt;

/// Host-facing sensor category a provider can be asked about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorCategory {
    Accelerometer,
    /// Rotation-rate sensor
    Gyroscope,
}

impl SensorCategory {
    pub const ALL: [SensorCategory; 2] = [SensorCategory::Accelerometer, SensorCategory::Gyroscope];

    /// Label callers use to ask about this category
    pub fn label(self) -> &'static str {
        match self {
            SensorCategory::Accelerometer => "Accelerometer",
            SensorCategory::Gyroscope => "Gyroscope",
        }
    }
}

impl fmt::Display for SensorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sensor kind parsed from a caller-supplied label.
///
/// Matching is exact and case-sensitive. Anything that is not a recognized
/// label, including an absent one, is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Accelerometer,
    Gyroscope,
    Unknown,
}

impl SensorKind {
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("Accelerometer") => SensorKind::Accelerometer,
            Some("Gyroscope") => SensorKind::Gyroscope,
            _ => SensorKind::Unknown,
        }
    }

    /// Category to query the host for, `None` for `Unknown`
    pub fn category(self) -> Option<SensorCategory> {
        match self {
            SensorKind::Accelerometer => Some(SensorCategory::Accelerometer),
            SensorKind::Gyroscope => Some(SensorCategory::Gyroscope),
            SensorKind::Unknown => None,
        }
    }
}

/// Read-only view of the host's sensor registry
pub trait CapabilityProvider: Send + Sync {
    /// Whether the host exposes a default sensor for `category`
    fn has_default_sensor(&self, category: SensorCategory) -> bool;

    /// Short provider name for logs and server info
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_labels() {
        assert_eq!(SensorKind::from_label(Some("Accelerometer")), SensorKind::Accelerometer);
        assert_eq!(SensorKind::from_label(Some("Gyroscope")), SensorKind::Gyroscope);
    }

    #[test]
    fn test_everything_else_is_unknown() {
        for label in ["", "accelerometer", "GYROSCOPE", "Magnetometer", " Gyroscope"] {
            assert_eq!(SensorKind::from_label(Some(label)), SensorKind::Unknown, "{label:?}");
        }
        assert_eq!(SensorKind::from_label(None), SensorKind::Unknown);
        assert_eq!(SensorKind::Unknown.category(), None);
    }

    #[test]
    fn test_label_round_trips_through_kind() {
        for category in SensorCategory::ALL {
            let kind = SensorKind::from_label(Some(category.label()));
            assert_eq!(kind.category(), Some(category));
        }
    }
}
