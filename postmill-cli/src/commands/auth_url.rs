//! Auth-url command - start an OAuth authorization.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::build_provider;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the auth-url command.
#[derive(Args)]
pub struct AuthUrlArgs {
    /// Provider identifier.
    pub provider: String,
}

/// Runs the auth-url command.
pub async fn run(args: &AuthUrlArgs, cli: &Cli) -> Result<()> {
    let provider = build_provider(&args.provider, cli)?;
    let request = provider.build_authorization_request().await?;
    info!(provider = %provider.kind(), state = %request.state, "Authorization request built");

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_authorization(&request));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&request)?);
        }
    }

    Ok(())
}
