//! Execution report — per-action outcome of running a scene.

use crate::command::CommandOutput;
use crate::error::SceneHubError;

use super::Action;

/// Outcome of a single action.
#[derive(Debug)]
pub struct ActionOutcome {
    pub action: Action,
    pub result: Result<CommandOutput, SceneHubError>,
}

impl ActionOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// What happened when a scene ran.
///
/// Outcomes keep the scene's action order. A failed action never undoes
/// the ones that succeeded before it.
#[derive(Debug)]
pub struct ExecutionReport {
    pub scene: String,
    pub outcomes: Vec<ActionOutcome>,
}

impl ExecutionReport {
    #[must_use]
    pub fn new(scene: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            outcomes: Vec::new(),
        }
    }

    /// Append the outcome of the next action.
    pub fn record(&mut self, action: Action, result: Result<CommandOutput, SceneHubError>) {
        self.outcomes.push(ActionOutcome { action, result });
    }

    /// Actions that ran successfully, in order.
    pub fn succeeded(&self) -> impl Iterator<Item = &ActionOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_success())
    }

    /// Actions that failed, in order.
    pub fn failed(&self) -> impl Iterator<Item = &ActionOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_success())
    }

    /// `true` when every action succeeded (vacuously for an empty scene).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(ActionOutcome::is_success)
    }
}

impl std::fmt::Display for ExecutionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "scene {:?}: {} ok, {} failed",
            self.scene,
            self.succeeded().count(),
            self.failed().count()
        )
    }
}
