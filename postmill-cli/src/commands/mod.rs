//! CLI command implementations.

pub mod analytics;
pub mod auth_url;
pub mod boards;
pub mod exchange;
pub mod providers;
pub mod publish;
pub mod refresh;

use std::path::Path;

use anyhow::{Result, anyhow};
use postmill_core::{Credentials, ProviderKind, ProviderPublishing};
use postmill_providers::ProviderRegistry;
use postmill_transport::ProviderContext;
use tracing::debug;

use crate::Cli;
use crate::config::{CliConfig, read_json};

/// Resolves a provider identifier given on the command line.
pub fn parse_provider(name: &str) -> Result<ProviderKind> {
    ProviderKind::from_identifier(name).ok_or_else(|| {
        let known: Vec<_> = ProviderKind::all().iter().map(ProviderKind::identifier).collect();
        anyhow!("Unknown provider: {name} (expected one of: {})", known.join(", "))
    })
}

/// Builds a live provider from the config file.
pub fn build_provider(name: &str, cli: &Cli) -> Result<Box<dyn ProviderPublishing>> {
    let kind = parse_provider(name)?;
    let config = CliConfig::load(cli.config.as_deref())?.provider(kind)?;
    debug!(provider = %kind, "Building provider");
    Ok(ProviderRegistry::create(kind, config, ProviderContext::live()?)?)
}

/// Reads stored credentials.
pub fn load_credentials(path: &Path) -> Result<Credentials> {
    read_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider() {
        assert_eq!(parse_provider("pinterest").unwrap(), ProviderKind::Pinterest);
        assert_eq!(parse_provider("tiktok").unwrap(), ProviderKind::TikTok);

        let err = parse_provider("myspace").unwrap_err();
        assert!(err.to_string().contains("pinterest, tiktok"));
    }
}
