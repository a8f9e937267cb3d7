//! Configuration module for provider selection and method filtering
//!
//! Reads configuration from ~/.config/rmcp-sensors/config.toml

use crate::sensors::fixed::FixedProvider;
use crate::sensors::CapabilityProvider;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Which host registry answers capability queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// IIO on Linux builds, fixed elsewhere
    #[default]
    Auto,
    Iio,
    Fixed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IioConfig {
    /// sysfs root to scan instead of /sys/bus/iio/devices
    #[serde(default)]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderKind,

    /// List of disabled method names (all others are enabled)
    #[serde(default)]
    pub disabled: Vec<String>,

    #[serde(default)]
    pub iio: IioConfig,

    /// Answers for the fixed provider
    #[serde(default)]
    pub fixed: FixedProvider,
}

impl Config {
    /// Get the config file path
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rmcp-sensors").join("config.toml"))
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            tracing::warn!("Could not determine config directory, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    tracing::error!("Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::error!("Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Build the capability provider this config selects
    pub fn build_provider(&self) -> Arc<dyn CapabilityProvider> {
        let provider: Arc<dyn CapabilityProvider> = match self.provider {
            ProviderKind::Fixed => Arc::new(self.fixed),
            ProviderKind::Iio | ProviderKind::Auto => self.host_provider(),
        };
        tracing::info!("Using {} capability provider", provider.name());
        provider
    }

    #[cfg(all(feature = "linux", target_os = "linux"))]
    fn host_provider(&self) -> Arc<dyn CapabilityProvider> {
        use crate::sensors::iio::IioProvider;

        match &self.iio.root {
            Some(root) => Arc::new(IioProvider::new(root)),
            None => Arc::new(IioProvider::default()),
        }
    }

    #[cfg(not(all(feature = "linux", target_os = "linux")))]
    fn host_provider(&self) -> Arc<dyn CapabilityProvider> {
        if self.provider == ProviderKind::Iio {
            tracing::warn!("IIO provider is not available in this build, falling back to fixed");
        }
        Arc::new(self.fixed)
    }
}
