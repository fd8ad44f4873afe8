//! Scene — a named, ordered batch of device actions.
//!
//! Actions run in insertion order. Running a scene is best-effort: a failed
//! action is recorded in the [`ExecutionReport`] and the remaining actions
//! still run.

mod action;
mod report;

pub use action::Action;
pub use report::{ActionOutcome, ExecutionReport};

use serde::{Deserialize, Serialize};

use crate::error::{SceneHubError, ValidationError};

/// A named batch of actions. The name is the scene's unique,
/// case-sensitive key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Scene {
    /// Create a builder for constructing a [`Scene`].
    #[must_use]
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// An empty scene is valid; it simply does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SceneHubError::Validation`] when:
    /// - `name` is blank ([`ValidationError::EmptyName`])
    /// - an action has a blank device id or command
    pub fn validate(&self) -> Result<(), SceneHubError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        self.actions.iter().try_for_each(Action::validate)
    }

    /// Append an action; it will run after every existing one.
    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Remove and return the action at `index`, keeping the order of the
    /// others. Returns `None` when `index` is out of bounds.
    pub fn remove_action(&mut self, index: usize) -> Option<Action> {
        (index < self.actions.len()).then(|| self.actions.remove(index))
    }
}

impl std::fmt::Display for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [", self.name)?;
        for (index, action) in self.actions.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{action}")?;
        }
        f.write_str("]")
    }
}

/// Step-by-step builder for [`Scene`].
#[derive(Debug, Default)]
pub struct SceneBuilder {
    name: Option<String>,
    actions: Vec<Action>,
}

impl SceneBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Consume the builder, validate, and return a [`Scene`].
    ///
    /// # Errors
    ///
    /// Returns [`SceneHubError::Validation`] if the name is missing or blank,
    /// or an action is malformed.
    pub fn build(self) -> Result<Scene, SceneHubError> {
        let scene = Scene {
            name: self.name.unwrap_or_default(),
            actions: self.actions,
        };
        scene.validate()?;
        Ok(scene)
    }
}
