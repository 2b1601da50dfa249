//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use voiceprint_core::{OnHttpError, VoiceprintClient};
use voiceprint_http::AsyncClient;

use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {}

pub async fn run(client: &AsyncClient, _args: LoginArgs) -> Result<()> {
    eprintln!("{}", "Logging in...".dimmed());

    client
        .login(OnHttpError::Raise)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    super::print_tokens(client);

    Ok(())
}
