//! Refresh command - renew stored credentials.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{info, warn};

use super::exchange::emit_credentials;
use super::{build_provider, load_credentials};
use crate::Cli;

/// Arguments for the refresh command.
#[derive(Args)]
pub struct RefreshArgs {
    /// Provider identifier.
    pub provider: String,

    /// Stored credentials file.
    #[arg(long)]
    pub credentials: PathBuf,

    /// Write the renewed credentials back to the credentials file.
    #[arg(long)]
    pub save: bool,
}

/// Runs the refresh command.
pub async fn run(args: &RefreshArgs, cli: &Cli) -> Result<()> {
    let provider = build_provider(&args.provider, cli)?;
    let stored = load_credentials(&args.credentials)?;
    let refresh_token = stored
        .refresh_token
        .as_deref()
        .context("Stored credentials carry no refresh token; authorize again")?;

    let renewed = provider.refresh(refresh_token).await?;
    if renewed.refresh_token.as_deref() != Some(refresh_token) {
        info!(provider = %provider.kind(), "Refresh token rotated");
    }
    if !args.save {
        warn!("Renewed credentials are not saved; pass --save to keep them");
    }

    let out = args.save.then_some(args.credentials.as_path());
    emit_credentials(&renewed, out, cli)
}
