//! Files command implementation.

use anyhow::{Context, Result};
use clap::Args;

use voiceprint_core::FilesMode;
use voiceprint_http::AsyncClient;

use crate::output;

#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Only list files of this target
    #[arg(long)]
    pub target: Option<String>,

    /// Listing shape: dict (grouped by target) or list
    #[arg(long, default_value = "dict")]
    pub mode: FilesMode,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(client: &AsyncClient, args: FilesArgs) -> Result<()> {
    let files = client
        .voiceprint()
        .files(args.target.as_deref(), args.mode)
        .await
        .context("Failed to list files")?;

    output::json(&files, args.pretty)
}
