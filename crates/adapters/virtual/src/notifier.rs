//! Alert sinks — log-only delivery and an in-memory outbox.

use std::future::Future;

use tokio::sync::Mutex;

use scenehub_app::ports::Notifier;
use scenehub_domain::error::SceneHubError;

/// Delivers alerts as `warn` level log records on the `scenehub::alert`
/// target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn send_alert(&self, message: String) -> impl Future<Output = Result<(), SceneHubError>> + Send {
        tracing::warn!(target: "scenehub::alert", "{message}");
        async { Ok(()) }
    }
}

/// Keeps every alert in memory, in delivery order.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<String>>,
}

impl MemoryNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts delivered so far.
    pub async fn messages(&self) -> Vec<String> {
        self.messages.lock().await.clone()
    }

    /// Remove and return the delivered alerts.
    pub async fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock().await)
    }
}

impl Notifier for MemoryNotifier {
    fn send_alert(&self, message: String) -> impl Future<Output = Result<(), SceneHubError>> + Send {
        async move {
            self.messages.lock().await.push(message);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_keep_alerts_in_delivery_order() {
        let notifier = MemoryNotifier::new();
        notifier.send_alert("first".to_string()).await.unwrap();
        notifier.send_alert("second".to_string()).await.unwrap();
        assert_eq!(notifier.messages().await, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn should_empty_outbox_when_drained() {
        let notifier = MemoryNotifier::new();
        notifier.send_alert("alert".to_string()).await.unwrap();
        assert_eq!(notifier.drain().await, vec!["alert"]);
        assert!(notifier.messages().await.is_empty());
    }

    #[tokio::test]
    async fn should_always_accept_alert_when_logging() {
        assert!(TracingNotifier.send_alert("hello".to_string()).await.is_ok());
    }
}
