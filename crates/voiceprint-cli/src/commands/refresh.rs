//! Refresh command implementation.

use anyhow::{Context, Result};
use clap::Args;

use voiceprint_core::{OnHttpError, VoiceprintClient};
use voiceprint_http::AsyncClient;

use crate::output;

#[derive(Args, Debug)]
pub struct RefreshArgs {}

pub async fn run(client: &AsyncClient, _args: RefreshArgs) -> Result<()> {
    client
        .login(OnHttpError::Raise)
        .await
        .context("Failed to login")?;

    let refreshed = client
        .refresh(OnHttpError::Raise)
        .await
        .context("Failed to refresh tokens")?;

    match refreshed {
        Some(_) => output::success("Tokens refreshed"),
        None => output::warning("Session was re-established during recovery"),
    }
    println!();
    super::print_tokens(client);

    Ok(())
}
