mod app;
mod config;
mod keys;
mod links;
mod logging;
mod tui;
mod ui;

use activity_journal_core::controller::Controller;
use activity_journal_core::AppContext;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use app::App;
use config::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::resolve(&cli)?;
    let data_dir = settings.resolved_data_dir();
    let _log_guard = logging::init(&data_dir, cli.debug)?;

    let context = AppContext::from_settings(settings);
    info!(
        provider = context.provider.name(),
        storage = %context.storage.path().display(),
        "Starting activity journal"
    );

    let controller = Controller::load(context).with_context(|| {
        format!("Failed to load saved activities from {}", data_dir.display())
    })?;

    tui::run(App::new(controller))
}
