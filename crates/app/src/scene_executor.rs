//! Scene executor — runs a scene's actions against live devices.
//!
//! Execution is best-effort and strictly ordered: each action resolves its
//! device by id, locks it, and dispatches through the [`CommandTable`]. A
//! failing action is logged, recorded in the [`ExecutionReport`], and the
//! next action still runs. Nothing is rolled back.

use scenehub_domain::command::{CommandOutput, CommandTable};
use scenehub_domain::device::Device;
use scenehub_domain::error::SceneHubError;
use scenehub_domain::scene::{Action, ExecutionReport, Scene};

use crate::ports::DeviceDirectory;

/// Dispatches scene actions to devices found in a [`DeviceDirectory`].
pub struct SceneExecutor<D> {
    directory: D,
    commands: CommandTable,
}

impl<D> SceneExecutor<D>
where
    D: DeviceDirectory,
{
    /// Create an executor with an explicit command table.
    pub fn new(directory: D, commands: CommandTable) -> Self {
        Self {
            directory,
            commands,
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Run every action of `scene` in order and report each outcome.
    #[tracing::instrument(skip(self, scene), fields(scene = %scene.name))]
    pub async fn run(&self, scene: &Scene) -> ExecutionReport {
        let mut report = ExecutionReport::new(scene.name.as_str());
        for action in &scene.actions {
            let result = self.run_action(action).await;
            if let Err(err) = &result {
                tracing::warn!(%action, error = %err, "action failed");
            }
            report.record(action.clone(), result);
        }
        tracing::info!(%report, "scene executed");
        report
    }

    async fn run_action(&self, action: &Action) -> Result<CommandOutput, SceneHubError> {
        let shared = self
            .directory
            .resolve_by_id(&action.device_id)
            .await?
            .ok_or_else(|| SceneHubError::DeviceNotFound(action.device_id.clone()))?;
        let mut device = shared.lock().await;
        let argument = action.command_arg();
        let output = self
            .commands
            .execute(&mut device, &action.command, argument.as_ref())?;
        let status: &Device = &device;
        tracing::info!(%action, %output, %status, "action applied");
        Ok(output)
    }
}
