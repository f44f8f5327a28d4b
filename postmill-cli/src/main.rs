// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! postmill CLI - publish posts to social platforms from the command line.
//!
//! # Examples
//!
//! ```bash
//! # List providers
//! postmill providers
//!
//! # Start an OAuth flow
//! postmill auth-url pinterest
//!
//! # Exchange the code from the redirect and keep the credentials
//! postmill exchange pinterest --code abc --code-verifier xyz --out pinterest.json
//!
//! # Publish a post, giving up after five minutes
//! postmill publish tiktok --credentials tiktok.json --post post.json --timeout-secs 300
//!
//! # Analytics as JSON
//! postmill analytics pinterest --credentials pinterest.json --format json --pretty
//! ```

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{analytics, auth_url, boards, exchange, providers, publish, refresh};

// ============================================================================
// CLI Definition
// ============================================================================

/// postmill CLI - social platform publishing.
#[derive(Parser)]
#[command(name = "postmill")]
#[command(about = "Publish posts to social platforms")]
#[command(long_about = r#"
postmill authorizes accounts, publishes posts and reads analytics on
social platforms through one provider contract.

Supported providers:
  • Pinterest (pinterest)
  • TikTok (tiktok)

Provider credentials are read from the config file:
  { "providers": { "pinterest": { "client_id": ..., "client_secret": ...,
                                  "redirect_base_url": ... } } }

Examples:
  postmill providers                                  # List providers
  postmill auth-url tiktok                            # Authorization URL
  postmill boards pinterest --credentials creds.json  # Boards of the account
  postmill publish pinterest --credentials creds.json --post post.json
"#)]
#[command(version)]
#[command(author = "postmill Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Config file (defaults to the user config directory).
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List available providers.
    #[command(visible_alias = "p")]
    Providers,

    /// Build an authorization URL with a fresh state and code verifier.
    AuthUrl(auth_url::AuthUrlArgs),

    /// Exchange an authorization code for credentials.
    Exchange(exchange::ExchangeArgs),

    /// Refresh stored credentials.
    Refresh(refresh::RefreshArgs),

    /// List boards of an account.
    #[command(visible_alias = "b")]
    Boards(boards::BoardsArgs),

    /// Publish a post.
    Publish(publish::PublishArgs),

    /// Show analytics of an account.
    #[command(visible_alias = "a")]
    Analytics(analytics::AnalyticsArgs),
}

impl Commands {
    /// Provider the command targets, if any.
    fn provider(&self) -> Option<&str> {
        match self {
            Self::Providers => None,
            Self::AuthUrl(args) => Some(args.provider.as_str()),
            Self::Exchange(args) => Some(args.provider.as_str()),
            Self::Refresh(args) => Some(args.provider.as_str()),
            Self::Boards(args) => Some(args.provider.as_str()),
            Self::Publish(args) => Some(args.provider.as_str()),
            Self::Analytics(args) => Some(args.provider.as_str()),
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// General error.
    Error = 1,
    /// Credentials were rejected; run `refresh` or authorize again.
    CredentialExpired = 2,
    /// The request was rejected as malformed.
    MalformedRequest = 3,
    /// The job ran out of time or was cancelled.
    Timeout = 4,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    fn for_error(error: &anyhow::Error) -> Self {
        use postmill_core::{ProcessingFailure, ProviderError};

        match error.downcast_ref::<ProviderError>() {
            Some(ProviderError::CredentialExpired { .. } | ProviderError::AuthExchange { .. }) => {
                Self::CredentialExpired
            }
            Some(ProviderError::MalformedRequest { .. }) => Self::MalformedRequest,
            Some(ProviderError::MediaProcessing {
                reason: ProcessingFailure::DeadlineExceeded | ProcessingFailure::Cancelled,
                ..
            }) => Self::Timeout,
            _ => Self::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("postmill=debug,info")
    } else {
        EnvFilter::new("postmill=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Providers => providers::run(&cli),
        Commands::AuthUrl(args) => auth_url::run(args, &cli).await,
        Commands::Exchange(args) => exchange::run(args, &cli).await,
        Commands::Refresh(args) => refresh::run(args, &cli).await,
        Commands::Boards(args) => boards::run(args, &cli).await,
        Commands::Publish(args) => publish::run(args, &cli).await,
        Commands::Analytics(args) => analytics::run(args, &cli).await,
    };

    if let Err(e) = result {
        report_error(&e, &cli);
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}

/// Prints a failed command's error.
///
/// In JSON mode provider failures go to stdout with their HTTP status and
/// raw body; everything else goes to stderr.
fn report_error(error: &anyhow::Error, cli: &Cli) {
    use postmill_core::ProviderError;

    let provider = cli.command.provider().unwrap_or("postmill");
    if cli.format == OutputFormat::Json {
        if let Some(provider_error) = error.downcast_ref::<ProviderError>() {
            if let Ok(json) = output::JsonFormatter::new(cli.pretty).format_error(provider, provider_error) {
                println!("{json}");
                return;
            }
        }
    }

    if !cli.quiet {
        let formatter = output::TextFormatter::new(!cli.no_color);
        eprintln!("{}", formatter.format_error(provider, &format!("{error:#}")));
    }
}
