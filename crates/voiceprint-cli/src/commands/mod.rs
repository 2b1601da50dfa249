//! Subcommand implementations.

mod ensure_auth;
mod files;
mod login;
mod logout;
mod refresh;
mod upload;

use anyhow::Result;
use clap::Subcommand;

use voiceprint_core::VoiceprintClient;
use voiceprint_http::AsyncClient;

use crate::output;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in with the API key
    Login(login::LoginArgs),

    /// Log in, then log out again
    Logout(logout::LogoutArgs),

    /// Log in, then exchange the refresh token for new tokens
    Refresh(refresh::RefreshArgs),

    /// Refresh if possible, otherwise log in
    EnsureAuth(ensure_auth::EnsureAuthArgs),

    /// List uploaded voiceprint files
    Files(files::FilesArgs),

    /// Validate and upload an audio file
    Upload(upload::UploadArgs),
}

pub async fn handle(client: &AsyncClient, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Login(args) => login::run(client, args).await,
        Commands::Logout(args) => logout::run(client, args).await,
        Commands::Refresh(args) => refresh::run(client, args).await,
        Commands::EnsureAuth(args) => ensure_auth::run(client, args).await,
        Commands::Files(args) => files::run(client, args).await,
        Commands::Upload(args) => upload::run(client, args).await,
    }
}

/// Print which tokens the client holds.
fn print_tokens(client: &AsyncClient) {
    let credentials = client.credentials();
    output::field(
        "Access token",
        output::presence(credentials.access_token().is_some()),
    );
    output::field(
        "Refresh token",
        output::presence(credentials.refresh_token().is_some()),
    );
}
