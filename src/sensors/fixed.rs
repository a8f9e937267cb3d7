//! Static capability table, for hosts without a sensor registry and for tests

use super::{CapabilityProvider, SensorCategory};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedProvider {
    #[serde(default)]
    pub accelerometer: bool,
    #[serde(default)]
    pub gyroscope: bool,
}

impl FixedProvider {
    pub fn new(accelerometer: bool, gyroscope: bool) -> Self {
        Self {
            accelerometer,
            gyroscope,
        }
    }
}

impl CapabilityProvider for FixedProvider {
    fn has_default_sensor(&self, category: SensorCategory) -> bool {
        match category {
            SensorCategory::Accelerometer => self.accelerometer,
            SensorCategory::Gyroscope => self.gyroscope,
        }
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}
