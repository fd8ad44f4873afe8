//! Wiring — turns a [`Config`] into a populated [`HomeController`].

use scenehub_adapter_virtual::VirtualHome;
use scenehub_app::controller::HomeController;
use scenehub_app::ports::{Clock, DeviceDirectory, Notifier};
use scenehub_domain::error::SceneHubError;

use crate::config::Config;

/// What startup registration accepted and rejected.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub scenes_loaded: usize,
    pub scenes_rejected: usize,
    pub rules_loaded: usize,
    pub rules_rejected: usize,
}

/// Build the device directory from `[[devices]]`, seeding the demo home
/// when enabled and nothing is configured.
///
/// # Errors
///
/// Returns a validation error for an invalid or duplicate device.
pub fn build_home(config: &Config) -> Result<VirtualHome, SceneHubError> {
    let mut home = VirtualHome::new();
    if config.seeds_demo_home() {
        home.register_demo_devices()?;
    }
    for entry in &config.devices {
        home.register(entry.to_device()?, entry.room.as_deref())?;
    }
    tracing::info!(devices = home.len(), "home ready");
    Ok(home)
}

/// Register configured scenes then rules. Rejected entries are logged and
/// skipped.
pub async fn populate<D, N, C>(
    controller: &HomeController<D, N, C>,
    config: &Config,
) -> LoadSummary
where
    D: DeviceDirectory,
    N: Notifier,
    C: Clock,
{
    let mut summary = LoadSummary::default();

    for scene in &config.scenes {
        if controller.add_scene(scene.clone()).await {
            summary.scenes_loaded += 1;
        } else {
            tracing::warn!(scene = %scene.name, "scene skipped");
            summary.scenes_rejected += 1;
        }
    }

    for entry in &config.rules {
        let result = match entry.to_rule() {
            Ok(rule) => controller.add_rule(rule).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(id) => {
                tracing::debug!(%id, event = %entry.event, "rule loaded");
                summary.rules_loaded += 1;
            }
            Err(err) => {
                tracing::warn!(
                    event = %entry.event,
                    scene = %entry.scene,
                    error = ?err,
                    "rule skipped"
                );
                summary.rules_rejected += 1;
            }
        }
    }

    summary
}
