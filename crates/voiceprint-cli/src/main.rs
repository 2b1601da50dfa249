//! voiceprint - Command-line client for the voiceprint API.
//!
//! A thin wrapper over `voiceprint-http` for checking credentials, listing
//! enrolled files and uploading audio from a shell.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let client = cli.connection.client()?;
    commands::handle(&client, cli.command).await
}

/// Filter directive for a `-v` count. Dependencies stay at `warn` until `-vvv`.
fn log_directive(verbosity: u8) -> String {
    let ours = match verbosity {
        0 => return "warn".to_string(),
        1 => "info",
        2 => "debug",
        _ => return "trace".to_string(),
    };
    ["voiceprint", "voiceprint_core", "voiceprint_http"]
        .iter()
        .fold("warn".to_string(), |acc, target| {
            format!("{acc},{target}={ours}")
        })
}

/// Logs go to stderr so command output on stdout stays pipeable.
fn init_logging(verbosity: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directive(verbosity)));
    let layer = fmt::layer().with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.with_target(verbosity >= 2)).init();
    }
}
