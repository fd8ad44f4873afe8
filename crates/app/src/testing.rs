//! In-memory port implementations shared by the unit tests of this crate.

use std::future::Future;
use std::sync::{Arc, Mutex};

use scenehub_domain::device::{Device, DeviceKind};
use scenehub_domain::error::SceneHubError;
use scenehub_domain::id::DeviceId;

use crate::ports::{DeviceDirectory, Notifier, SharedDevice};

// ── In-memory device directory ─────────────────────────────────

#[derive(Default)]
pub struct InMemoryDirectory {
    devices: Vec<(SharedDevice, Option<String>)>,
    offline: bool,
}

impl InMemoryDirectory {
    /// Every lookup fails with [`SceneHubError::Directory`].
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    fn check_online(&self) -> Result<(), SceneHubError> {
        if self.offline {
            return Err(SceneHubError::Directory("directory offline".into()));
        }
        Ok(())
    }

    pub fn with(mut self, device: Device, room: Option<&str>) -> Self {
        self.devices.push((
            Arc::new(tokio::sync::Mutex::new(device)),
            room.map(str::to_string),
        ));
        self
    }

    pub async fn snapshot(&self, id: &str) -> Device {
        let id = DeviceId::from(id);
        for (device, _) in &self.devices {
            let device = device.lock().await;
            if device.id == id {
                return device.clone();
            }
        }
        panic!("unknown device {id}");
    }
}

impl DeviceDirectory for InMemoryDirectory {
    fn resolve_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<SharedDevice>, SceneHubError>> + Send {
        let id = id.clone();
        async move {
            self.check_online()?;
            for (device, _) in &self.devices {
                if device.lock().await.id == id {
                    return Ok(Some(Arc::clone(device)));
                }
            }
            Ok(None)
        }
    }

    fn resolve_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<SharedDevice>, SceneHubError>> + Send {
        let name = name.to_lowercase();
        async move {
            self.check_online()?;
            for (device, _) in &self.devices {
                if device.lock().await.name.to_lowercase() == name {
                    return Ok(Some(Arc::clone(device)));
                }
            }
            Ok(None)
        }
    }

    fn room_of(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<String>, SceneHubError>> + Send {
        let id = id.clone();
        async move {
            self.check_online()?;
            for (device, room) in &self.devices {
                if device.lock().await.id == id {
                    return Ok(room.clone());
                }
            }
            Ok(None)
        }
    }
}

pub fn device(id: &str, name: &str, kind: DeviceKind) -> Device {
    Device::builder().id(id).name(name).kind(kind).build().unwrap()
}

// ── Spy notifier ───────────────────────────────────────────────

#[derive(Default)]
pub struct SpyNotifier {
    pub messages: Mutex<Vec<String>>,
    pub failing: bool,
}

impl SpyNotifier {
    pub fn failing() -> Self {
        Self {
            messages: Mutex::default(),
            failing: true,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for SpyNotifier {
    fn send_alert(&self, message: String) -> impl Future<Output = Result<(), SceneHubError>> + Send {
        let result = if self.failing {
            Err(SceneHubError::Notification("sink unavailable".into()))
        } else {
            self.messages.lock().unwrap().push(message);
            Ok(())
        };
        async move { result }
    }
}
