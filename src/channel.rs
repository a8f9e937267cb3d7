//! Method channel - name-based dispatch of remote calls to the query service

use crate::service::CapabilityService;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Channel the application shell talks to
pub const CHANNEL_NAME: &str = "com.example.real_time_sensors/sensor";

pub const IS_SENSOR_AVAILABLE: &str = "isSensorAvailable";

/// Argument holding the sensor label
pub const SENSOR_ARG: &str = "sensor";

// === Parameter Types ===

/// Input schema of `isSensorAvailable`. Arguments are read leniently through
/// `MethodCall::argument`, so this type only describes them.
#[allow(dead_code)]
#[derive(Debug, JsonSchema)]
pub struct SensorParams {
    #[schemars(description = "Sensor kind label: \"Accelerometer\" or \"Gyroscope\" (case-sensitive). Anything else answers false.")]
    pub sensor: Option<String>,
}

/// Static description of a method the channel can serve
#[derive(Debug, Clone, Copy)]
pub struct MethodInfo {
    pub name: &'static str,
    pub description: &'static str,
}

pub const METHODS: &[MethodInfo] = &[MethodInfo {
    name: IS_SENSOR_AVAILABLE,
    description: "Check whether a motion sensor is present on this device. Returns true or false; unrecognized labels return false.",
}];

/// Get list of all method names (compile-time known)
pub fn all_method_names() -> Vec<&'static str> {
    METHODS.iter().map(|m| m.name).collect()
}

// === Wire Types ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Option<Value>) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// String argument by name; missing, null, and non-string values are all `None`
    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments.as_ref()?.as_object()?.get(name)?.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MethodResult {
    Success(Value),
    NotImplemented,
}

// === Channel ===

#[derive(Debug, Clone)]
pub struct MethodChannel {
    service: CapabilityService,
    disabled: HashSet<String>,
}

impl MethodChannel {
    pub fn new(service: CapabilityService) -> Self {
        Self {
            service,
            disabled: HashSet::new(),
        }
    }

    /// Reject `disabled` methods as not implemented. Unknown names are logged and ignored.
    pub fn with_disabled<'a>(mut self, disabled: impl IntoIterator<Item = &'a String>) -> Self {
        for name in disabled {
            if METHODS.iter().any(|m| m.name == name.as_str()) {
                tracing::info!("Disabled method: {}", name);
                self.disabled.insert(name.clone());
            } else {
                tracing::warn!("Config disables unknown method: {}", name);
            }
        }
        self
    }

    pub fn service(&self) -> &CapabilityService {
        &self.service
    }

    /// Methods currently served
    pub fn methods(&self) -> impl Iterator<Item = &'static MethodInfo> + '_ {
        METHODS.iter().filter(|m| !self.disabled.contains(m.name))
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods().any(|m| m.name == name)
    }

    pub fn dispatch(&self, call: &MethodCall) -> MethodResult {
        if !self.has_method(&call.method) {
            tracing::debug!("Rejecting unsupported method: {}", call.method);
            return MethodResult::NotImplemented;
        }

        match call.method.as_str() {
            IS_SENSOR_AVAILABLE => {
                let available = self.service.is_sensor_available(call.argument(SENSOR_ARG));
                MethodResult::Success(Value::Bool(available))
            }
            _ => MethodResult::NotImplemented,
        }
    }
}
