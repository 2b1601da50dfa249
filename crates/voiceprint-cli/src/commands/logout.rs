//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use voiceprint_core::{OnHttpError, VoiceprintClient};
use voiceprint_http::AsyncClient;

use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(client: &AsyncClient, _args: LogoutArgs) -> Result<()> {
    client
        .login(OnHttpError::Raise)
        .await
        .context("Failed to login")?;
    client.logout().await.context("Failed to logout")?;

    output::success("Logged out");
    Ok(())
}
