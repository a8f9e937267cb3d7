//! Linux Industrial I/O (IIO) sensor registry
//!
//! Motion sensors show up under `/sys/bus/iio/devices/iio:deviceN`. A device
//! carries one attribute file per channel, named `in_<type>_<axis>_<attr>`,
//! e.g. `in_accel_x_raw` or `in_anglvel_z_raw`.

use super::{CapabilityProvider, SensorCategory};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_IIO_ROOT: &str = "/sys/bus/iio/devices";

const DEVICE_PREFIX: &str = "iio:device";

#[derive(Debug, Error)]
pub enum IioError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// `N` of an `iio:deviceN` entry, `None` for anything else
fn device_index(name: &str) -> Option<u32> {
    name.strip_prefix(DEVICE_PREFIX)?.parse().ok()
}

/// Channel attribute prefix identifying a category
fn channel_prefix(category: SensorCategory) -> &'static str {
    match category {
        SensorCategory::Accelerometer => "in_accel_",
        SensorCategory::Gyroscope => "in_anglvel_",
    }
}

#[derive(Debug, Clone)]
pub struct IioProvider {
    root: PathBuf,
}

impl Default for IioProvider {
    fn default() -> Self {
        Self::new(DEFAULT_IIO_ROOT)
    }
}

impl IioProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default device for `category`: the matching `iio:deviceN` with the lowest `N`.
    ///
    /// A missing root means the host has no IIO devices, not an error. Devices
    /// that cannot be read are skipped.
    pub fn default_device(&self, category: SensorCategory) -> Result<Option<PathBuf>, IioError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(IioError::Read {
                    path: self.root.clone(),
                    source,
                })
            }
        };

        let mut devices: Vec<(u32, PathBuf)> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let index = device_index(&entry.file_name().to_string_lossy())?;
                Some((index, entry.path()))
            })
            .collect();
        devices.sort();

        let prefix = channel_prefix(category);
        for (_, device) in devices {
            match Self::has_channel(&device, prefix) {
                Ok(true) => return Ok(Some(device)),
                Ok(false) => {}
                Err(e) => tracing::warn!("Skipping IIO device: {}", e),
            }
        }

        Ok(None)
    }

    fn has_channel(device: &Path, prefix: &str) -> Result<bool, IioError> {
        let entries = fs::read_dir(device).map_err(|source| IioError::Read {
            path: device.to_path_buf(),
            source,
        })?;

        Ok(entries
            .filter_map(|entry| entry.ok())
            .any(|entry| entry.file_name().to_string_lossy().starts_with(prefix)))
    }
}

impl CapabilityProvider for IioProvider {
    fn has_default_sensor(&self, category: SensorCategory) -> bool {
        match self.default_device(category) {
            Ok(Some(device)) => {
                tracing::trace!("{} found at {:?}", category, device);
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("IIO lookup for {} failed: {}", category, e);
                false
            }
        }
    }

    fn name(&self) -> &'static str {
        "iio"
    }
}
