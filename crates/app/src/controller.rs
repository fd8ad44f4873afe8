//! Home controller — the facade the outer application talks to.
//!
//! Owns the scene and rule stores and the [`RuleEngine`], and exposes the
//! scene CRUD, rule registration and event entry points as one API.

use std::sync::Arc;

use scenehub_domain::command::CommandTable;
use scenehub_domain::error::SceneHubError;
use scenehub_domain::event::Event;
use scenehub_domain::id::RuleId;
use scenehub_domain::rule::Rule;
use scenehub_domain::scene::{Action, ExecutionReport, Scene};

use crate::ports::{Clock, DeviceDirectory, Notifier};
use crate::rule_engine::RuleEngine;
use crate::scene_executor::SceneExecutor;
use crate::services::rule_service::RuleService;
use crate::services::scene_service::SceneService;

/// Scene, rule and event operations over one home.
pub struct HomeController<D, N, C> {
    scenes: Arc<SceneService>,
    rules: Arc<RuleService>,
    engine: RuleEngine<D, N, C>,
}

impl<D, N, C> HomeController<D, N, C>
where
    D: DeviceDirectory,
    N: Notifier,
    C: Clock,
{
    /// Wire a controller with empty stores and the given command table.
    pub fn new(directory: D, commands: CommandTable, notifier: N, clock: C) -> Self {
        let scenes = Arc::new(SceneService::new());
        let rules = Arc::new(RuleService::new());
        let engine = RuleEngine::new(
            Arc::clone(&scenes),
            Arc::clone(&rules),
            SceneExecutor::new(directory, commands),
            notifier,
            clock,
        );
        Self {
            scenes,
            rules,
            engine,
        }
    }

    // ── Scenes ─────────────────────────────────────────────────────

    /// Register a scene. `false` when the name is blank or already taken.
    pub async fn add_scene(&self, scene: Scene) -> bool {
        self.scenes.add_scene(scene).await
    }

    pub async fn get_scene_by_name(&self, name: &str) -> Option<Scene> {
        self.scenes.get_scene(name).await
    }

    pub async fn remove_scene(&self, name: &str) -> bool {
        self.scenes.remove_scene(name).await
    }

    /// Append an action to a registered scene.
    ///
    /// # Errors
    ///
    /// Returns [`SceneHubError::SceneNotFound`] for an unknown scene, or
    /// [`SceneHubError::Validation`] for a malformed action.
    pub async fn append_action(&self, scene: &str, action: Action) -> Result<(), SceneHubError> {
        self.scenes.append_action(scene, action).await
    }

    /// Remove the action at `index`; `Ok(None)` when out of bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SceneHubError::SceneNotFound`] for an unknown scene.
    pub async fn remove_action(
        &self,
        scene: &str,
        index: usize,
    ) -> Result<Option<Action>, SceneHubError> {
        self.scenes.remove_action(scene, index).await
    }

    pub async fn list_scenes(&self) -> Vec<Scene> {
        self.scenes.list_scenes().await
    }

    /// Run a registered scene by name.
    ///
    /// # Errors
    ///
    /// Returns [`SceneHubError::SceneNotFound`] when the name is empty or
    /// unknown. Failures of individual actions are in the report.
    pub async fn execute_scene_by_name(
        &self,
        name: &str,
    ) -> Result<ExecutionReport, SceneHubError> {
        self.engine.run_scene(name).await
    }

    /// Run a scene value directly, registered or not.
    ///
    /// # Errors
    ///
    /// Returns [`SceneHubError::SceneIsNil`] when no scene is given.
    pub async fn execute_scene(
        &self,
        scene: Option<&Scene>,
    ) -> Result<ExecutionReport, SceneHubError> {
        let scene = scene.ok_or(SceneHubError::SceneIsNil)?;
        Ok(self.engine.executor().run(scene).await)
    }

    // ── Rules ──────────────────────────────────────────────────────

    /// Register a rule.
    ///
    /// # Errors
    ///
    /// Returns [`SceneHubError::RuleConflict`] when a rule with the same
    /// event and device scope exists, or [`SceneHubError::Validation`] for
    /// a malformed rule.
    pub async fn add_rule(&self, rule: Rule) -> Result<RuleId, SceneHubError> {
        self.rules.add_rule(rule).await
    }

    pub async fn remove_rule(&self, id: RuleId) -> bool {
        self.rules.remove_rule(id).await
    }

    pub async fn list_rules(&self) -> Vec<Rule> {
        self.rules.list_rules().await
    }

    // ── Events ─────────────────────────────────────────────────────

    /// Fire the device rules matching `event_type` on `device`.
    pub async fn handle_event(&self, event_type: &str, device: &str) {
        self.engine.handle_event(event_type, device).await;
    }

    /// Fire the global rules matching `event_type`.
    pub async fn handle_global_event(&self, event_type: &str) {
        self.engine.handle_global_event(event_type).await;
    }

    /// Route an [`Event`] value and return the ids of the rules that fired.
    pub async fn dispatch(&self, event: &Event) -> Vec<RuleId> {
        self.engine.process_event(event).await
    }
}
