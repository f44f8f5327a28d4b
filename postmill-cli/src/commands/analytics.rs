//! Analytics command - show the account report.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use tracing::info;

use super::{build_provider, load_credentials};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the analytics command.
#[derive(Args)]
pub struct AnalyticsArgs {
    /// Provider identifier.
    pub provider: String,

    /// Stored credentials file.
    #[arg(long)]
    pub credentials: PathBuf,

    /// Number of days to look back.
    #[arg(long, short, default_value = "30")]
    pub days: u32,
}

/// Runs the analytics command.
pub async fn run(args: &AnalyticsArgs, cli: &Cli) -> Result<()> {
    if args.days == 0 {
        bail!("--days must be at least 1");
    }

    let provider = build_provider(&args.provider, cli)?;
    let credentials = load_credentials(&args.credentials)?;

    let series = provider
        .fetch_analytics(&credentials.access_token, args.days)
        .await?;
    info!(provider = %provider.kind(), series = series.len(), "Analytics fetched");

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("Last {} days", args.days);
            println!("{}", "─".repeat(40));
            println!("{}", formatter.format_analytics(&series));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&series)?);
        }
    }

    Ok(())
}
