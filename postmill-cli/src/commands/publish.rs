//! Publish command - publish one post.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use postmill_core::{JobControl, PostDescription};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::{build_provider, load_credentials};
use crate::config::read_json;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the publish command.
#[derive(Args)]
pub struct PublishArgs {
    /// Provider identifier.
    pub provider: String,

    /// Stored credentials file.
    #[arg(long)]
    pub credentials: PathBuf,

    /// Post description file.
    #[arg(long)]
    pub post: PathBuf,

    /// Give up after this many seconds (defaults to the provider's publish timeout).
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// Runs the publish command.
pub async fn run(args: &PublishArgs, cli: &Cli) -> Result<()> {
    let provider = build_provider(&args.provider, cli)?;
    let credentials = load_credentials(&args.credentials)?;
    let post: PostDescription = read_json(&args.post)?;

    let control = job_control(args.timeout_secs)?;
    let watcher = spawn_interrupt_watcher(control.token().clone());

    info!(provider = %provider.kind(), post = %post.id, media = post.media.len(), "Publishing");
    let outcome = provider.publish(&post, &credentials, &control).await;
    watcher.abort();

    let result = outcome?;
    info!(post = %result.post_description_id, url = %result.release_url, "Published");

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_publish_result(&result));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&result)?);
        }
    }

    Ok(())
}

/// Builds the job control, with a deadline when a timeout was given.
fn job_control(timeout_secs: Option<u64>) -> Result<JobControl> {
    let control = JobControl::new();
    let Some(secs) = timeout_secs else {
        return Ok(control);
    };
    let timeout = chrono::Duration::from_std(Duration::from_secs(secs))
        .context("--timeout-secs is out of range")?;
    let deadline = Utc::now()
        .checked_add_signed(timeout)
        .context("--timeout-secs is out of range")?;
    Ok(control.with_deadline(deadline))
}

/// Cancels the job on the first Ctrl-C.
fn spawn_interrupt_watcher(token: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling publish job");
            token.cancel();
        }
    })
}
