//! Rule — event (+ optional device, + optional time window) → scene.
//!
//! Rules are immutable once built. A rule without a trigger device is a
//! *global* rule and only reacts to global events. Event names and device
//! references are compared case-insensitively.

mod window;

pub use window::TimeWindow;

use serde::{Deserialize, Serialize};

use crate::error::{RuleConflictError, SceneHubError, ValidationError};
use crate::id::RuleId;
use crate::time::TimeOfDay;

/// A trigger bound to a target scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub trigger_event: String,
    /// Device reference (id or name); `None` makes this a global rule.
    pub trigger_device: Option<String>,
    /// Name of the scene to run; resolved when the rule fires.
    pub target_scene: String,
    #[serde(flatten)]
    pub window: TimeWindow,
}

impl Rule {
    /// Create a builder for constructing a [`Rule`].
    #[must_use]
    pub fn builder() -> RuleBuilder {
        RuleBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// No ordering is enforced between the window bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SceneHubError::Validation`] when:
    /// - `trigger_event` is blank ([`ValidationError::EmptyTriggerEvent`])
    /// - `trigger_device` is present but blank ([`ValidationError::EmptyDeviceId`])
    /// - `target_scene` is blank ([`ValidationError::EmptyTargetScene`])
    pub fn validate(&self) -> Result<(), SceneHubError> {
        if self.trigger_event.trim().is_empty() {
            return Err(ValidationError::EmptyTriggerEvent.into());
        }
        if self
            .trigger_device
            .as_deref()
            .is_some_and(|device| device.trim().is_empty())
        {
            return Err(ValidationError::EmptyDeviceId.into());
        }
        if self.target_scene.trim().is_empty() {
            return Err(ValidationError::EmptyTargetScene.into());
        }
        Ok(())
    }

    /// Whether this rule is not tied to a device.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.trigger_device.is_none()
    }

    /// Two rules conflict when they share the same event and the same
    /// device scope (both global counts as the same scope). Time windows
    /// play no part.
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        if !eq_ignore_case(&self.trigger_event, &other.trigger_event) {
            return false;
        }
        match (&self.trigger_device, &other.trigger_device) {
            (None, None) => true,
            (Some(a), Some(b)) => eq_ignore_case(a, b),
            _ => false,
        }
    }

    /// Return a conflict error when `other` collides with this rule.
    ///
    /// # Errors
    ///
    /// Returns [`RuleConflictError`] carrying both descriptions.
    pub fn check_conflict(&self, other: &Self) -> Result<(), RuleConflictError> {
        if self.conflicts_with(other) {
            return Err(RuleConflictError {
                existing: self.to_string(),
                rejected: other.to_string(),
            });
        }
        Ok(())
    }

    /// Whether the rule's time window is open at `now`.
    #[must_use]
    pub fn is_active_at(&self, now: TimeOfDay) -> bool {
        self.window.contains(now)
    }

    /// Event/device pattern match for a device-scoped event. Global rules
    /// never match. Ignores the time window.
    #[must_use]
    pub fn matches_device_event(&self, event_type: &str, device: &str) -> bool {
        eq_ignore_case(&self.trigger_event, event_type)
            && self
                .trigger_device
                .as_deref()
                .is_some_and(|trigger| eq_ignore_case(trigger, device))
    }

    /// Event pattern match for a global event. Only global rules match.
    /// Ignores the time window.
    #[must_use]
    pub fn matches_global_event(&self, event_type: &str) -> bool {
        self.is_global() && eq_ignore_case(&self.trigger_event, event_type)
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scope = self.trigger_device.as_deref().unwrap_or("global");
        write!(
            f,
            "rule({}@{scope} -> {:?}, {})",
            self.trigger_event, self.target_scene, self.window
        )
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Step-by-step builder for [`Rule`].
#[derive(Debug, Default)]
pub struct RuleBuilder {
    id: Option<RuleId>,
    trigger_event: Option<String>,
    trigger_device: Option<String>,
    target_scene: Option<String>,
    window: TimeWindow,
}

impl RuleBuilder {
    #[must_use]
    pub fn id(mut self, id: RuleId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.trigger_event = Some(event.into());
        self
    }

    #[must_use]
    pub fn device(mut self, device: impl Into<String>) -> Self {
        self.trigger_device = Some(device.into());
        self
    }

    #[must_use]
    pub fn scene(mut self, scene: impl Into<String>) -> Self {
        self.target_scene = Some(scene.into());
        self
    }

    #[must_use]
    pub fn start_after(mut self, time: TimeOfDay) -> Self {
        self.window.start_after = Some(time);
        self
    }

    #[must_use]
    pub fn end_before(mut self, time: TimeOfDay) -> Self {
        self.window.end_before = Some(time);
        self
    }

    #[must_use]
    pub fn window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    /// Consume the builder, validate, and return a [`Rule`].
    ///
    /// # Errors
    ///
    /// Returns [`SceneHubError::Validation`] if the event or scene is
    /// missing, or the device is blank.
    pub fn build(self) -> Result<Rule, SceneHubError> {
        let rule = Rule {
            id: self.id.unwrap_or_default(),
            trigger_event: self.trigger_event.unwrap_or_default(),
            trigger_device: self.trigger_device,
            target_scene: self.target_scene.unwrap_or_default(),
            window: self.window,
        };
        rule.validate()?;
        Ok(rule)
    }
}
