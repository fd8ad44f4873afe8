//! Rule service — the in-memory rule store with conflict checking.

use tokio::sync::RwLock;

use scenehub_domain::error::SceneHubError;
use scenehub_domain::id::RuleId;
use scenehub_domain::rule::Rule;
use scenehub_domain::time::TimeOfDay;

/// Registered rules, kept in insertion order.
///
/// At most one rule exists per (event, device scope) pair; the comparison
/// ignores case and time windows.
#[derive(Debug, Default)]
pub struct RuleService {
    rules: RwLock<Vec<Rule>>,
}

impl RuleService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule and return its id.
    ///
    /// The conflict check and the insertion happen under the same write
    /// lock, so two concurrent registrations cannot both pass.
    ///
    /// # Errors
    ///
    /// - [`SceneHubError::Validation`] when the rule is malformed.
    /// - [`SceneHubError::RuleConflict`] when an existing rule has the same
    ///   event and device scope. The store is left unchanged.
    #[tracing::instrument(skip(self, rule), fields(rule = %rule))]
    pub async fn add_rule(&self, rule: Rule) -> Result<RuleId, SceneHubError> {
        rule.validate()?;
        let mut rules = self.rules.write().await;
        for existing in rules.iter() {
            existing.check_conflict(&rule)?;
        }
        let id = rule.id;
        rules.push(rule);
        tracing::debug!(%id, "rule registered");
        Ok(id)
    }

    /// Remove a rule by id. Returns whether a rule was removed.
    #[tracing::instrument(skip(self))]
    pub async fn remove_rule(&self, id: RuleId) -> bool {
        let mut rules = self.rules.write().await;
        let before = rules.len();
        rules.retain(|rule| rule.id != id);
        rules.len() != before
    }

    /// All rules, in insertion order.
    pub async fn list_rules(&self) -> Vec<Rule> {
        self.rules.read().await.clone()
    }

    /// Device rules matching `event_type` and `device` whose window is open
    /// at `now`, in insertion order.
    pub async fn matching_device_rules(
        &self,
        event_type: &str,
        device: &str,
        now: TimeOfDay,
    ) -> Vec<Rule> {
        self.rules
            .read()
            .await
            .iter()
            .filter(|rule| rule.matches_device_event(event_type, device) && rule.is_active_at(now))
            .cloned()
            .collect()
    }

    /// Global rules matching `event_type` whose window is open at `now`,
    /// in insertion order.
    pub async fn matching_global_rules(&self, event_type: &str, now: TimeOfDay) -> Vec<Rule> {
        self.rules
            .read()
            .await
            .iter()
            .filter(|rule| rule.matches_global_event(event_type) && rule.is_active_at(now))
            .cloned()
            .collect()
    }
}
