use crate::logging::{LogBuffer, PanelLayer};
use crate::tui;
use clap::Parser;
use repodash_core::config::default_config_path;
use repodash_core::dispatch::CommandSet;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod args;

use args::Cli;

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The terminal UI owns stdout, so tracing output goes to an in-memory
    // buffer rendered inside the dashboard instead of a fmt layer.
    let log_buffer = LogBuffer::new(200);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(PanelLayer::new(log_buffer.clone()))
        .init();

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let commands = CommandSet {
        status: cli.status_cmd,
        sync: cli.sync_cmd,
    };
    let interval = Duration::from_secs(cli.interval);

    info!(
        config = %config_path.display(),
        interval_secs = interval.as_secs(),
        "Starting dashboard"
    );
    tui::run_tui(config_path, commands, interval, log_buffer)
}
