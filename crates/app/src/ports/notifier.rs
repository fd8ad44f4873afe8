//! Notification port — where rule alerts go.

use std::future::Future;
use std::sync::Arc;

use scenehub_domain::error::SceneHubError;

/// Delivers human-readable alerts.
///
/// Delivery is fire-and-forget from the engine's point of view: a failure
/// is logged and never propagated to the event source.
pub trait Notifier: Send + Sync {
    /// Send one alert message.
    fn send_alert(&self, message: String)
    -> impl Future<Output = Result<(), SceneHubError>> + Send;
}

impl<T: Notifier> Notifier for Arc<T> {
    fn send_alert(
        &self,
        message: String,
    ) -> impl Future<Output = Result<(), SceneHubError>> + Send {
        (**self).send_alert(message)
    }
}
