//! Device — a named, controllable thing in the home.
//!
//! A device has an immutable identity, a [`DeviceKind`] that decides which
//! [`Capability`]s it declares, and a mutable [`DeviceState`]. The state
//! setters here perform no capability checks; command dispatch goes
//! through [`CommandTable`](crate::command::CommandTable), which does.

use serde::{Deserialize, Serialize};

use crate::capability::{Capability, CapabilitySet};
use crate::error::{SceneHubError, ValidationError};
use crate::id::DeviceId;

/// Concrete device variants and the capabilities each declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    /// Dimmable light.
    Light,
    /// Heating/cooling controller with a target temperature.
    Thermostat,
    /// Security camera that can record.
    Camera,
    /// Plain on/off smart plug.
    Plug,
}

impl DeviceKind {
    /// Capabilities declared by this kind.
    #[must_use]
    pub const fn capabilities(self) -> CapabilitySet {
        match self {
            Self::Light => CapabilitySet::DIMMABLE,
            Self::Thermostat => CapabilitySet::SWITCHABLE.union(CapabilitySet::THERMOSTATIC),
            Self::Camera => CapabilitySet::SWITCHABLE.union(CapabilitySet::RECORDABLE),
            Self::Plug => CapabilitySet::SWITCHABLE,
        }
    }
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Thermostat => f.write_str("thermostat"),
            Self::Camera => f.write_str("camera"),
            Self::Plug => f.write_str("plug"),
        }
    }
}

/// Default brightness of a freshly registered light, in percent.
pub const DEFAULT_BRIGHTNESS: u8 = 100;

/// Default target temperature of a freshly registered thermostat, in °C.
pub const DEFAULT_TARGET_TEMPERATURE: f64 = 21.0;

/// Mutable state of a device.
///
/// Fields that do not apply to the device's kind keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    pub on: bool,
    /// Brightness in percent, `0..=100`.
    pub brightness: u8,
    /// Target temperature in °C.
    pub target_temperature: f64,
    pub recording: bool,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            on: false,
            brightness: DEFAULT_BRIGHTNESS,
            target_temperature: DEFAULT_TARGET_TEMPERATURE,
            recording: false,
        }
    }
}

/// A controllable device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub kind: DeviceKind,
    #[serde(default)]
    pub state: DeviceState,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SceneHubError::Validation`] when:
    /// - `id` is blank ([`ValidationError::EmptyDeviceId`])
    /// - `name` is blank ([`ValidationError::EmptyName`])
    pub fn validate(&self) -> Result<(), SceneHubError> {
        if self.id.as_str().trim().is_empty() {
            return Err(ValidationError::EmptyDeviceId.into());
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Capabilities declared by this device's kind.
    #[must_use]
    pub fn capabilities(&self) -> CapabilitySet {
        self.kind.capabilities()
    }

    /// Whether the device declares `capability`.
    #[must_use]
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities().supports(capability)
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.state.on
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let power = if self.state.on { "on" } else { "off" };
        write!(f, "{} is {power}", self.name)?;
        if self.supports(Capability::Dimmable) {
            write!(f, ", brightness {}%", self.state.brightness)?;
        }
        if self.supports(Capability::Thermostatic) {
            write!(f, ", target {:.1}°C", self.state.target_temperature)?;
        }
        if self.supports(Capability::Recordable) {
            let recording = if self.state.recording {
                "recording"
            } else {
                "not recording"
            };
            write!(f, ", {recording}")?;
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    kind: Option<DeviceKind>,
    state: Option<DeviceState>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<DeviceId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: DeviceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn state(mut self, state: DeviceState) -> Self {
        self.state = Some(state);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// The kind defaults to [`DeviceKind::Plug`] and the id is generated
    /// when not supplied.
    ///
    /// # Errors
    ///
    /// Returns [`SceneHubError::Validation`] if `name` is missing or blank.
    pub fn build(self) -> Result<Device, SceneHubError> {
        let device = Device {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            kind: self.kind.unwrap_or(DeviceKind::Plug),
            state: self.state.unwrap_or_default(),
        };
        device.validate()?;
        Ok(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_valid_device_when_name_provided() {
        let device = Device::builder()
            .id("lamp-1")
            .name("Reading Lamp")
            .kind(DeviceKind::Light)
            .build()
            .unwrap();
        assert_eq!(device.id.as_str(), "lamp-1");
        assert_eq!(device.name, "Reading Lamp");
        assert!(!device.is_on());
        assert_eq!(device.state.brightness, DEFAULT_BRIGHTNESS);
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = Device::builder().kind(DeviceKind::Plug).build();
        assert!(matches!(
            result,
            Err(SceneHubError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_return_validation_error_when_id_is_blank() {
        let result = Device::builder().id("  ").name("Plug").build();
        assert!(matches!(
            result,
            Err(SceneHubError::Validation(ValidationError::EmptyDeviceId))
        ));
    }

    #[test]
    fn should_declare_capabilities_by_kind() {
        assert!(DeviceKind::Light.capabilities().supports(Capability::Dimmable));
        assert!(!DeviceKind::Light.capabilities().supports(Capability::Recordable));
        assert!(DeviceKind::Camera.capabilities().supports(Capability::Recordable));
        assert!(
            DeviceKind::Thermostat
                .capabilities()
                .supports(Capability::Thermostatic)
        );
        for kind in [
            DeviceKind::Light,
            DeviceKind::Thermostat,
            DeviceKind::Camera,
            DeviceKind::Plug,
        ] {
            assert!(kind.capabilities().supports(Capability::Switchable));
        }
    }

    #[test]
    fn should_describe_state_for_declared_capabilities_only() {
        let mut camera = Device::builder()
            .name("Cam1")
            .kind(DeviceKind::Camera)
            .build()
            .unwrap();
        camera.state.on = true;
        camera.state.recording = true;
        assert_eq!(camera.to_string(), "Cam1 is on, recording");
    }

    #[test]
    fn should_deserialize_kind_from_snake_case() {
        let kind: DeviceKind = serde_json::from_str("\"thermostat\"").unwrap();
        assert_eq!(kind, DeviceKind::Thermostat);
    }
}
