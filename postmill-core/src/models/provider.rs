//! Provider-related types.
//!
//! - [`ProviderKind`] - Enum of supported platforms
//! - [`ProviderMetadata`] - Static capabilities and limits of a platform

use serde::{Deserialize, Serialize};

// ============================================================================
// Provider Kind
// ============================================================================

/// Supported social platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Pinterest
    Pinterest,
    /// TikTok
    TikTok,
}

impl ProviderKind {
    /// Returns the display name for this provider.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pinterest => "Pinterest",
            Self::TikTok => "TikTok",
        }
    }

    /// Returns the stable identifier (lowercase, no spaces).
    ///
    /// Also used as the last path segment of the OAuth redirect URI.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Pinterest => "pinterest",
            Self::TikTok => "tiktok",
        }
    }

    /// Returns all available provider kinds.
    pub fn all() -> &'static [ProviderKind] {
        &[Self::Pinterest, Self::TikTok]
    }

    /// Looks up a provider by identifier (case-insensitive).
    pub fn from_identifier(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.identifier().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}

// ============================================================================
// Provider Metadata
// ============================================================================

/// Default admission cap for platforms with strict rate limits.
pub const DEFAULT_MAX_CONCURRENT_JOBS: usize = 1;

/// Static capabilities and limits of a platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderMetadata {
    /// Which platform.
    pub kind: ProviderKind,
    /// Display name.
    pub display_name: String,
    /// Scopes that must all be granted at authorization time.
    pub required_scopes: Vec<String>,
    /// Maximum concurrently in-flight publish jobs the scheduler should admit.
    pub max_concurrent_jobs: usize,
    /// Whether the platform organizes posts into boards or channels.
    pub supports_boards: bool,
    /// Whether the platform exposes an analytics report.
    pub supports_analytics: bool,
    /// Home page of the platform.
    pub website: String,
}

impl ProviderMetadata {
    /// Returns the default metadata for a provider.
    pub fn for_provider(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::Pinterest => Self {
                kind,
                display_name: kind.display_name().to_string(),
                required_scopes: scopes(&[
                    "boards:read",
                    "boards:write",
                    "pins:read",
                    "pins:write",
                    "user_accounts:read",
                ]),
                // Pinterest has more lenient rate limits
                max_concurrent_jobs: 3,
                supports_boards: true,
                supports_analytics: true,
                website: "https://www.pinterest.com".to_string(),
            },
            ProviderKind::TikTok => Self {
                kind,
                display_name: kind.display_name().to_string(),
                required_scopes: scopes(&[
                    "user.info.basic",
                    "video.publish",
                    "video.upload",
                    "user.info.profile",
                ]),
                max_concurrent_jobs: DEFAULT_MAX_CONCURRENT_JOBS,
                supports_boards: false,
                supports_analytics: false,
                website: "https://www.tiktok.com".to_string(),
            },
        }
    }
}

fn scopes(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_roundtrip() {
        for kind in ProviderKind::all() {
            assert_eq!(ProviderKind::from_identifier(kind.identifier()), Some(*kind));
        }
        assert_eq!(ProviderKind::from_identifier("TikTok"), Some(ProviderKind::TikTok));
        assert_eq!(ProviderKind::from_identifier("myspace"), None);
    }

    #[test]
    fn test_concurrency_caps() {
        assert_eq!(ProviderMetadata::for_provider(ProviderKind::Pinterest).max_concurrent_jobs, 3);
        assert_eq!(
            ProviderMetadata::for_provider(ProviderKind::TikTok).max_concurrent_jobs,
            DEFAULT_MAX_CONCURRENT_JOBS
        );
    }
}
