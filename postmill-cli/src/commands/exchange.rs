//! Exchange command - trade an authorization code for credentials.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::build_provider;
use crate::config::write_json;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the exchange command.
#[derive(Args)]
pub struct ExchangeArgs {
    /// Provider identifier.
    pub provider: String,

    /// Authorization code from the redirect.
    #[arg(long)]
    pub code: String,

    /// Code verifier printed by `auth-url`.
    #[arg(long)]
    pub code_verifier: String,

    /// Write the credentials to this file.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

/// Runs the exchange command.
pub async fn run(args: &ExchangeArgs, cli: &Cli) -> Result<()> {
    let provider = build_provider(&args.provider, cli)?;
    let credentials = provider.exchange_code(&args.code, &args.code_verifier).await?;
    info!(provider = %provider.kind(), user = %credentials.platform_user_id, "Code exchanged");

    emit_credentials(&credentials, args.out.as_deref(), cli)
}

/// Saves credentials when asked to and prints them.
///
/// Without an output file the JSON form includes the tokens, since the
/// caller has no other way to obtain them.
pub(crate) fn emit_credentials(
    credentials: &postmill_core::Credentials,
    out: Option<&std::path::Path>,
    cli: &Cli,
) -> Result<()> {
    if let Some(path) = out {
        write_json(path, credentials)?;
        info!(path = %path.display(), "Credentials saved");
    }

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_credentials(credentials));
            if let Some(path) = out {
                println!();
                println!("Saved to {}", path.display());
            }
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(credentials)?);
        }
    }

    Ok(())
}
