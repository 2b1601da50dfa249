//! Ensure-auth command implementation.

use anyhow::{Context, Result};
use clap::Args;

use voiceprint_core::VoiceprintClient;
use voiceprint_http::AsyncClient;

use crate::output;

#[derive(Args, Debug)]
pub struct EnsureAuthArgs {
    /// Print the full authentication response as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(client: &AsyncClient, args: EnsureAuthArgs) -> Result<()> {
    let response = client
        .ensure_authenticated()
        .await
        .context("Could not authenticate")?;

    if args.json {
        return output::json(&response, true);
    }

    output::success("Authenticated");
    println!();
    super::print_tokens(client);

    Ok(())
}
