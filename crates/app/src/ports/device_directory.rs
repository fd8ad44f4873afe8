//! Device directory port — how the core finds devices and their rooms.
//!
//! Each device is handed out behind its own async mutex: holding the lock
//! for the duration of a command is what keeps two concurrently running
//! scenes from racing on the same device.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;

use scenehub_domain::device::Device;
use scenehub_domain::error::SceneHubError;
use scenehub_domain::id::DeviceId;

/// A device record shared between the directory and the executor.
pub type SharedDevice = Arc<Mutex<Device>>;

/// Lookup of registered devices.
pub trait DeviceDirectory: Send + Sync {
    /// Find a device by its exact id.
    fn resolve_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<SharedDevice>, SceneHubError>> + Send;

    /// Find a device by display name (case-insensitive).
    fn resolve_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<SharedDevice>, SceneHubError>> + Send;

    /// Name of the room the device belongs to, if any.
    fn room_of(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<String>, SceneHubError>> + Send;

    /// Resolve a free-form reference: first as an id, then as a name.
    fn resolve(
        &self,
        reference: &str,
    ) -> impl Future<Output = Result<Option<SharedDevice>, SceneHubError>> + Send {
        async move {
            let id = DeviceId::from(reference);
            if let Some(device) = self.resolve_by_id(&id).await? {
                return Ok(Some(device));
            }
            self.resolve_by_name(reference).await
        }
    }
}

impl<T: DeviceDirectory> DeviceDirectory for Arc<T> {
    fn resolve_by_id(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<SharedDevice>, SceneHubError>> + Send {
        (**self).resolve_by_id(id)
    }

    fn resolve_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<SharedDevice>, SceneHubError>> + Send {
        (**self).resolve_by_name(name)
    }

    fn room_of(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<String>, SceneHubError>> + Send {
        (**self).room_of(id)
    }
}
