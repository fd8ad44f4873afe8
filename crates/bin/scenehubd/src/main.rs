use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use scenehub_adapter_virtual::TracingNotifier;
use scenehub_app::clock::SystemClock;
use scenehub_app::controller::HomeController;
use scenehub_app::event_queue;
use scenehub_domain::command::CommandTable;
use scenehubd::bootstrap;
use scenehubd::config::Config;
use scenehubd::input;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).context("invalid log filter")?,
        )
        .init();

    let home = bootstrap::build_home(&config).context("failed to build the home")?;
    let commands = CommandTable::standard();
    tracing::info!(commands = ?commands.names(), "command table ready");
    let controller = Arc::new(HomeController::new(
        home,
        commands,
        TracingNotifier,
        SystemClock,
    ));
    let summary = bootstrap::populate(&*controller, &config).await;
    tracing::info!(?summary, "configuration applied");

    let (queue, event_loop) = event_queue::channel(config.engine.queue_capacity);
    input::spawn_stdin_reader(queue).context("failed to start the stdin reader")?;

    tracing::info!("scenehubd ready, reading events from stdin");
    let processed = event_loop.run_until(&*controller, interrupted()).await;
    tracing::info!(processed, "scenehubd stopped");
    Ok(())
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("interrupted"),
        Err(err) => {
            tracing::warn!(error = %err, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}
