//! # Configuration
//!
//! The device needs exactly one value to start: its public name. It can come
//! from a TOML file, the `ZERO_DEVICE_NAME` environment variable or the
//! `--zero-device-name` flag, later sources winning.
//!
//! ```toml
//! device_name = "zeroA"
//! class_name = "zero_device_class"   # optional
//! ```
//!
//! Nothing here rewrites the name. Validation only rejects a missing or empty
//! one, right before registration starts.

use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Class the device node is published under unless configured otherwise.
pub const DEFAULT_CLASS_NAME: &str = "zero_device_class";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("device name not specified")]
    MissingName,
    #[error("device name is empty")]
    EmptyName,
}

/// Startup configuration for one zero device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceConfig {
    /// Public name of the device node.
    #[serde(default)]
    pub device_name: Option<String>,

    /// Device class the node is published under.
    #[serde(default = "default_class_name")]
    pub class_name: String,
}

fn default_class_name() -> String {
    DEFAULT_CLASS_NAME.to_string()
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_name: None,
            class_name: default_class_name(),
        }
    }
}

impl DeviceConfig {
    pub fn new(device_name: impl Into<String>) -> Self {
        Self {
            device_name: Some(device_name.into()),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Returns the device name, or why it cannot be used.
    pub fn validated_name(&self) -> Result<&str, ConfigError> {
        match self.device_name.as_deref() {
            None => Err(ConfigError::MissingName),
            Some("") => Err(ConfigError::EmptyName),
            Some(name) => Ok(name),
        }
    }
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<DeviceConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Command line for the `zero-device` binary.
#[derive(Debug, Parser)]
#[command(name = "zero-device")]
#[command(about = "Publishes a named read-only device that yields zero bytes", long_about = None)]
pub struct Cli {
    /// TOML file to read defaults from.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Public name of the device node.
    #[arg(long = "zero-device-name", env = "ZERO_DEVICE_NAME")]
    pub device_name: Option<String>,

    /// Device class to publish the node under.
    #[arg(long)]
    pub class_name: Option<String>,
}

impl Cli {
    /// Merges the config file (if any) with flags and environment.
    pub fn into_config(self) -> Result<DeviceConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => DeviceConfig::default(),
        };
        if let Some(name) = self.device_name {
            config.device_name = Some(name);
        }
        if let Some(class_name) = self.class_name {
            config.class_name = class_name;
        }
        Ok(config)
    }
}
