//! Demo devices — a small fixed home used when the virtual integration is
//! enabled.
//!
//! Ids are fixed so configuration files can reference them across restarts.

use scenehub_domain::device::{Device, DeviceKind};
use scenehub_domain::error::SceneHubError;

/// Static description of a demo device.
#[derive(Debug, Clone, Copy)]
pub struct DemoDevice {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: DeviceKind,
    pub room: &'static str,
}

impl DemoDevice {
    /// Build the [`Device`] in its default (off) state.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the builder fails.
    pub fn build(&self) -> Result<Device, SceneHubError> {
        Device::builder()
            .id(self.id)
            .name(self.name)
            .kind(self.kind)
            .build()
    }
}

pub const DEMO_DEVICES: &[DemoDevice] = &[
    DemoDevice {
        id: "living-lamp",
        name: "Living Room Lamp",
        kind: DeviceKind::Light,
        room: "Living Room",
    },
    DemoDevice {
        id: "hallway-plug",
        name: "Hallway Plug",
        kind: DeviceKind::Plug,
        room: "Hallway",
    },
    DemoDevice {
        id: "bedroom-thermostat",
        name: "Bedroom Thermostat",
        kind: DeviceKind::Thermostat,
        room: "Bedroom",
    },
    DemoDevice {
        id: "front-cam",
        name: "Cam1",
        kind: DeviceKind::Camera,
        room: "Front Door",
    },
];
