//! # scenehub-adapter-virtual
//!
//! Virtual/demo home: an in-memory [`DeviceDirectory`] holding simulated
//! devices, and the [`Notifier`](scenehub_app::ports::Notifier)
//! implementations used by the daemon and by tests.
//!
//! ## Demo devices
//!
//! | Device | Id | Kind | Room |
//! |--------|----|------|------|
//! | Living Room Lamp | `living-lamp` | light | Living Room |
//! | Hallway Plug | `hallway-plug` | plug | Hallway |
//! | Bedroom Thermostat | `bedroom-thermostat` | thermostat | Bedroom |
//! | Cam1 | `front-cam` | camera | Front Door |
//!
//! ## Dependency rule
//!
//! Depends on `scenehub-app` (port traits) and `scenehub-domain` only.

mod demo;
mod notifier;

pub use demo::{DEMO_DEVICES, DemoDevice};
pub use notifier::{MemoryNotifier, TracingNotifier};

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;

use scenehub_app::ports::{DeviceDirectory, SharedDevice};
use scenehub_domain::device::Device;
use scenehub_domain::error::{SceneHubError, ValidationError};
use scenehub_domain::id::DeviceId;

struct Registered {
    device: SharedDevice,
    name: String,
    room: Option<String>,
}

/// In-memory directory of simulated devices.
///
/// Devices are registered up front; names are matched case-insensitively
/// and the first registered device wins when two share a name.
#[derive(Default)]
pub struct VirtualHome {
    devices: Vec<Registered>,
    by_id: HashMap<DeviceId, usize>,
}

impl VirtualHome {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A home pre-populated with [`DEMO_DEVICES`].
    ///
    /// # Errors
    ///
    /// Returns a validation error if a demo entry fails to build.
    pub fn demo() -> Result<Self, SceneHubError> {
        let mut home = Self::new();
        home.register_demo_devices()?;
        Ok(home)
    }

    /// Add every [`DEMO_DEVICES`] entry.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a demo entry fails to build or its id
    /// is already registered.
    pub fn register_demo_devices(&mut self) -> Result<(), SceneHubError> {
        for entry in DEMO_DEVICES {
            self.register(entry.build()?, Some(entry.room))?;
        }
        Ok(())
    }

    /// Register a device, optionally placing it in a room.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateDevice`] when the id is taken,
    /// or a validation error for an invalid device.
    pub fn register(&mut self, device: Device, room: Option<&str>) -> Result<(), SceneHubError> {
        device.validate()?;
        if self.by_id.contains_key(&device.id) {
            return Err(ValidationError::DuplicateDevice(device.id).into());
        }
        tracing::debug!(device = %device.id, name = %device.name, ?room, "device registered");
        self.by_id.insert(device.id.clone(), self.devices.len());
        self.devices.push(Registered {
            name: device.name.clone(),
            device: Arc::new(Mutex::new(device)),
            room: room
                .map(str::trim)
                .filter(|room| !room.is_empty())
                .map(str::to_string),
        });
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Current state of every device, in registration order.
    pub async fn snapshot(&self) -> Vec<Device> {
        let mut devices = Vec::with_capacity(self.devices.len());
        for registered in &self.devices {
            devices.push(registered.device.lock().await.clone());
        }
        devices
    }

    fn find_by_id(&self, id: &DeviceId) -> Option<&Registered> {
        self.by_id.get(id).map(|&index| &self.devices[index])
    }
}

impl DeviceDirectory for VirtualHome {
    fn resolve_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<SharedDevice>, SceneHubError>> + Send {
        let found = self
            .find_by_id(id)
            .map(|registered| Arc::clone(&registered.device));
        async move { Ok(found) }
    }

    fn resolve_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<SharedDevice>, SceneHubError>> + Send {
        let found = self
            .devices
            .iter()
            .find(|registered| eq_ignore_case(&registered.name, name))
            .map(|registered| Arc::clone(&registered.device));
        async move { Ok(found) }
    }

    fn room_of(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<String>, SceneHubError>> + Send {
        let room = self
            .find_by_id(id)
            .and_then(|registered| registered.room.clone());
        async move { Ok(room) }
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
