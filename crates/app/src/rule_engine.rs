//! Rule engine — reacts to events by running scenes and sending alerts.
//!
//! For each event the engine takes a snapshot of the matching rules whose
//! time window is open, then for every match (in insertion order) runs the
//! target scene and sends one alert. Scene failures never stop the alert
//! or the remaining rules, and nothing is raised to the event source.

use std::sync::Arc;

use scenehub_domain::error::SceneHubError;
use scenehub_domain::event::Event;
use scenehub_domain::id::RuleId;
use scenehub_domain::rule::Rule;
use scenehub_domain::scene::ExecutionReport;

use crate::ports::{Clock, DeviceDirectory, Notifier};
use crate::scene_executor::SceneExecutor;
use crate::services::rule_service::RuleService;
use crate::services::scene_service::SceneService;

/// Room reported when a triggering device or its room cannot be resolved.
pub const UNKNOWN_ROOM: &str = "Unknown";

/// Event router wiring the rule store to scene execution and notification.
pub struct RuleEngine<D, N, C> {
    scenes: Arc<SceneService>,
    rules: Arc<RuleService>,
    executor: SceneExecutor<D>,
    notifier: N,
    clock: C,
}

impl<D, N, C> RuleEngine<D, N, C>
where
    D: DeviceDirectory,
    N: Notifier,
    C: Clock,
{
    /// Create a new engine.
    pub fn new(
        scenes: Arc<SceneService>,
        rules: Arc<RuleService>,
        executor: SceneExecutor<D>,
        notifier: N,
        clock: C,
    ) -> Self {
        Self {
            scenes,
            rules,
            executor,
            notifier,
            clock,
        }
    }

    pub fn executor(&self) -> &SceneExecutor<D> {
        &self.executor
    }

    /// Route an event to the device or global handler and return the ids
    /// of the rules that fired.
    pub async fn process_event(&self, event: &Event) -> Vec<RuleId> {
        match event.device.as_deref() {
            Some(device) => self.handle_event(&event.event_type, device).await,
            None => self.handle_global_event(&event.event_type).await,
        }
    }

    /// Fire every device rule matching `event_type` on `device`.
    #[tracing::instrument(skip(self))]
    pub async fn handle_event(&self, event_type: &str, device: &str) -> Vec<RuleId> {
        let now = self.clock.now();
        let matches = self
            .rules
            .matching_device_rules(event_type, device, now)
            .await;
        if matches.is_empty() {
            tracing::debug!(%now, "no rule matched");
            return Vec::new();
        }

        let (device_name, room) = self.describe_device(device).await;
        let message = format!("Alert: {event_type} detected on {device_name} in {room}");
        self.fire(&matches, &message).await
    }

    /// Fire every global rule matching `event_type`.
    #[tracing::instrument(skip(self))]
    pub async fn handle_global_event(&self, event_type: &str) -> Vec<RuleId> {
        let now = self.clock.now();
        let matches = self.rules.matching_global_rules(event_type, now).await;
        if matches.is_empty() {
            tracing::debug!(%now, "no rule matched");
            return Vec::new();
        }

        let message = format!("Alert: {event_type} (global trigger)");
        self.fire(&matches, &message).await
    }

    /// Look up a scene by name and run it.
    ///
    /// # Errors
    ///
    /// Returns [`SceneHubError::SceneNotFound`] when no scene has that name.
    pub async fn run_scene(&self, name: &str) -> Result<ExecutionReport, SceneHubError> {
        let scene = self
            .scenes
            .get_scene(name)
            .await
            .ok_or_else(|| SceneHubError::SceneNotFound(name.to_string()))?;
        Ok(self.executor.run(&scene).await)
    }

    async fn fire(&self, rules: &[Rule], message: &str) -> Vec<RuleId> {
        let mut fired = Vec::with_capacity(rules.len());
        for rule in rules {
            tracing::info!(%rule, "rule triggered");
            if let Err(err) = self.run_scene(&rule.target_scene).await {
                tracing::warn!(%rule, error = %err, "target scene could not run");
            }
            if let Err(err) = self.notifier.send_alert(message.to_string()).await {
                tracing::warn!(%rule, error = %err, "alert delivery failed");
            }
            fired.push(rule.id);
        }
        fired
    }

    /// Display name and room of the triggering device, falling back to the
    /// raw reference and [`UNKNOWN_ROOM`].
    async fn describe_device(&self, reference: &str) -> (String, String) {
        let directory = self.executor.directory();
        let device = match directory.resolve(reference).await {
            Ok(Some(shared)) => shared.lock().await.clone(),
            Ok(None) => return (reference.to_string(), UNKNOWN_ROOM.to_string()),
            Err(err) => {
                tracing::warn!(error = %err, "device lookup failed");
                return (reference.to_string(), UNKNOWN_ROOM.to_string());
            }
        };
        let room = match directory.room_of(&device.id).await {
            Ok(room) => room,
            Err(err) => {
                tracing::warn!(error = %err, "room lookup failed");
                None
            }
        };
        (device.name, room.unwrap_or_else(|| UNKNOWN_ROOM.to_string()))
    }
}
