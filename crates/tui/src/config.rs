use std::path::PathBuf;

use activity_journal_core::models::settings::Settings;
use anyhow::{Context, Result};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "activity-journal",
    version,
    about = "Fetch suggested activities, filter them, and keep the ones you like"
)]
pub(crate) struct Cli {
    /// Config file (default: platform config dir/activity-journal/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding activities.json and logs
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Suggestion service endpoint
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Log at debug level regardless of RUST_LOG
    #[arg(long)]
    pub debug: bool,
}

/// Config file first, command-line flags on top.
pub(crate) fn resolve(cli: &Cli) -> Result<Settings> {
    let mut settings = match cli.config.clone().or_else(Settings::default_config_path) {
        Some(path) => Settings::load(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => Settings::default(),
    };

    if let Some(dir) = &cli.data_dir {
        settings.data_dir = Some(dir.clone());
    }
    if let Some(url) = &cli.api_url {
        settings.api_base_url = url.clone();
    }
    Ok(settings)
}
