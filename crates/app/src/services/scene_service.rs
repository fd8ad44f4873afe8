//! Scene service — the in-memory scene store.

use tokio::sync::RwLock;

use scenehub_domain::error::SceneHubError;
use scenehub_domain::scene::{Action, Scene};

/// Ordered, name-keyed collection of scenes.
///
/// Names are unique and compared case-sensitively. Listing returns scenes
/// in registration order.
#[derive(Debug, Default)]
pub struct SceneService {
    scenes: RwLock<Vec<Scene>>,
}

impl SceneService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scene.
    ///
    /// Returns `false` (and keeps the store unchanged) when the scene is
    /// invalid, e.g. its name is blank, or the name is already taken.
    #[tracing::instrument(skip(self, scene), fields(scene_name = %scene.name))]
    pub async fn add_scene(&self, scene: Scene) -> bool {
        if let Err(err) = scene.validate() {
            tracing::warn!(error = %err, "scene rejected");
            return false;
        }
        let mut scenes = self.scenes.write().await;
        if scenes.iter().any(|existing| existing.name == scene.name) {
            tracing::warn!("scene name already taken");
            return false;
        }
        scenes.push(scene);
        true
    }

    /// Look up a scene by exact name.
    pub async fn get_scene(&self, name: &str) -> Option<Scene> {
        self.scenes
            .read()
            .await
            .iter()
            .find(|scene| scene.name == name)
            .cloned()
    }

    /// Remove a scene by exact name. Returns whether a scene was removed.
    ///
    /// Rules still targeting the scene are kept; they will report the scene
    /// as missing when they fire.
    #[tracing::instrument(skip(self))]
    pub async fn remove_scene(&self, name: &str) -> bool {
        let mut scenes = self.scenes.write().await;
        let before = scenes.len();
        scenes.retain(|scene| scene.name != name);
        scenes.len() != before
    }

    /// All scenes, in registration order.
    pub async fn list_scenes(&self) -> Vec<Scene> {
        self.scenes.read().await.clone()
    }

    /// Append an action to a registered scene.
    ///
    /// # Errors
    ///
    /// Returns [`SceneHubError::SceneNotFound`] when no scene is called
    /// `name`, or [`SceneHubError::Validation`] for a malformed action.
    #[tracing::instrument(skip(self, action), fields(action = %action))]
    pub async fn append_action(&self, name: &str, action: Action) -> Result<(), SceneHubError> {
        action.validate()?;
        let mut scenes = self.scenes.write().await;
        let scene = scenes
            .iter_mut()
            .find(|scene| scene.name == name)
            .ok_or_else(|| SceneHubError::SceneNotFound(name.to_string()))?;
        scene.add_action(action);
        Ok(())
    }

    /// Remove the action at `index` from a registered scene.
    ///
    /// Returns `Ok(None)` when `index` is out of bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SceneHubError::SceneNotFound`] when no scene is called `name`.
    #[tracing::instrument(skip(self))]
    pub async fn remove_action(
        &self,
        name: &str,
        index: usize,
    ) -> Result<Option<Action>, SceneHubError> {
        let mut scenes = self.scenes.write().await;
        let scene = scenes
            .iter_mut()
            .find(|scene| scene.name == name)
            .ok_or_else(|| SceneHubError::SceneNotFound(name.to_string()))?;
        Ok(scene.remove_action(index))
    }
}
