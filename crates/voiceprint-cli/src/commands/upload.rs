//! Upload command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use voiceprint_http::AsyncClient;

use crate::output;

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Target (speaker) the audio belongs to
    #[arg(long)]
    pub target: String,

    /// File name to send instead of the path's base name
    #[arg(long)]
    pub filename: Option<String>,

    /// WAV or MP3 file to upload
    pub path: PathBuf,
}

pub async fn run(client: &AsyncClient, args: UploadArgs) -> Result<()> {
    eprintln!(
        "{}",
        format!("Uploading {}...", args.path.display()).dimmed()
    );

    let response = client
        .voiceprint()
        .upload(&args.target, &args.path, args.filename.as_deref())
        .await
        .with_context(|| format!("Failed to upload {}", args.path.display()))?;

    output::success("Uploaded");
    output::json(&response, true)
}
