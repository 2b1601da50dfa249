//! CLI argument definitions.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use tracing::debug;

use voiceprint_core::{ClientConfig, DEFAULT_BASE_URL, ExecutionMode};
use voiceprint_http::AsyncClient;

use crate::commands::Commands;

/// Voiceprint API command-line client.
#[derive(Parser, Debug)]
#[command(name = "voiceprint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// How to reach and authenticate with the API.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// API key
    #[arg(long, env = "VOICEPRINT_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// API base URL
    #[arg(long, env = "VOICEPRINT_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub url: String,

    /// Refresh or log in again when a request is rejected with 403
    #[arg(long, global = true)]
    pub auto_refresh: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, global = true)]
    pub timeout: u64,
}

impl ConnectionArgs {
    pub fn client(&self) -> Result<AsyncClient> {
        let api_key = self
            .api_key
            .clone()
            .context("No API key: pass --api-key or set VOICEPRINT_API_KEY")?;

        let config = ClientConfig::new(api_key)
            .base_url(&self.url)
            .auto_refresh(self.auto_refresh)
            .timeout(Duration::from_secs(self.timeout))
            .mode(ExecutionMode::Async);

        debug!(url = %self.url, auto_refresh = self.auto_refresh, "Building client");
        AsyncClient::new(&config).context("Invalid client configuration")
    }
}
