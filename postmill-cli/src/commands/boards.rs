//! Boards command - list publishing targets of an account.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::{build_provider, load_credentials};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the boards command.
#[derive(Args)]
pub struct BoardsArgs {
    /// Provider identifier.
    pub provider: String,

    /// Stored credentials file.
    #[arg(long)]
    pub credentials: PathBuf,
}

/// Runs the boards command.
pub async fn run(args: &BoardsArgs, cli: &Cli) -> Result<()> {
    let provider = build_provider(&args.provider, cli)?;
    let credentials = load_credentials(&args.credentials)?;

    let boards = provider.list_boards(&credentials.access_token).await?;
    info!(provider = %provider.kind(), count = boards.len(), "Boards listed");

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_boards(&boards));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&boards)?);
        }
    }

    Ok(())
}
