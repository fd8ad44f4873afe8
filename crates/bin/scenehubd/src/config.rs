//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `scenehub.toml` in the working directory (or the path in
//! `SCENEHUB_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use scenehub_domain::device::{Device, DeviceKind};
use scenehub_domain::error::SceneHubError;
use scenehub_domain::rule::Rule;
use scenehub_domain::scene::Scene;
use scenehub_domain::time::parse_time_of_day;

/// File read when `SCENEHUB_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "scenehub.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Event loop settings.
    pub engine: EngineConfig,
    /// Integration toggles.
    pub integrations: IntegrationsConfig,
    /// Devices of the home.
    pub devices: Vec<DeviceConfig>,
    /// Scenes registered at startup.
    pub scenes: Vec<Scene>,
    /// Rules registered at startup.
    pub rules: Vec<RuleConfig>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Event loop configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of events that may wait for the loop before producers block.
    pub queue_capacity: usize,
}

/// Per-integration toggles.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IntegrationsConfig {
    /// Seed the demo home when no device is configured.
    pub virtual_enabled: bool,
}

/// One `[[devices]]` entry.
#[derive(Debug, Deserialize)]
pub struct DeviceConfig {
    /// Generated when omitted.
    pub id: Option<String>,
    pub name: String,
    pub kind: DeviceKind,
    pub room: Option<String>,
}

impl DeviceConfig {
    /// Build the configured device, switched off.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name or id.
    pub fn to_device(&self) -> Result<Device, SceneHubError> {
        let builder = Device::builder().name(self.name.as_str()).kind(self.kind);
        match &self.id {
            Some(id) => builder.id(id.as_str()).build(),
            None => builder.build(),
        }
    }
}

/// One `[[rules]]` entry. Times are `HH:MM` (or `HH:MM:SS`).
#[derive(Debug, Deserialize)]
pub struct RuleConfig {
    pub event: String,
    /// Omit for a global rule.
    pub device: Option<String>,
    pub scene: String,
    pub start_after: Option<String>,
    pub end_before: Option<String>,
}

impl RuleConfig {
    /// Build the configured rule.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed time or a blank field.
    pub fn to_rule(&self) -> Result<Rule, SceneHubError> {
        let mut builder = Rule::builder()
            .event(self.event.as_str())
            .scene(self.scene.as_str());
        if let Some(device) = &self.device {
            builder = builder.device(device.as_str());
        }
        if let Some(time) = &self.start_after {
            builder = builder.start_after(parse_time_of_day(time)?);
        }
        if let Some(time) = &self.end_before {
            builder = builder.end_before(parse_time_of_day(time)?);
        }
        builder.build()
    }
}

impl Config {
    /// Load configuration from `SCENEHUB_CONFIG` or `scenehub.toml` (if
    /// present) then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let env = |key: &str| std::env::var(key).ok();
        let path = env("SCENEHUB_CONFIG")
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = var("SCENEHUB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("SCENEHUB_EVENT_QUEUE") {
            self.engine.queue_capacity = val.trim().parse().map_err(|_| {
                ConfigError::Validation(format!("SCENEHUB_EVENT_QUEUE is not a number: {val:?}"))
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.queue_capacity == 0 {
            return Err(ConfigError::Validation(
                "engine.queue_capacity must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the demo devices should be loaded.
    #[must_use]
    pub fn seeds_demo_home(&self) -> bool {
        self.integrations.virtual_enabled && self.devices.is_empty()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "scenehubd=info,scenehub_app=info,scenehub=info".to_string(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { queue_capacity: 64 }
    }
}

impl Default for IntegrationsConfig {
    fn default() -> Self {
        Self {
            virtual_enabled: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
