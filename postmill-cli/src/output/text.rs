//! Text output formatting with colors.

use postmill_core::{
    AnalyticsSeries, AuthorizationRequest, Board, Credentials, PublishResult,
};
use postmill_providers::ProviderDescriptor;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats provider list header.
    pub fn format_providers_header(&self) -> String {
        format!(
            "{:<12} {:<11} {:<7} {:<10} {:<5} {}",
            self.bold("Provider"),
            self.bold("ID"),
            self.bold("Boards"),
            self.bold("Analytics"),
            self.bold("Jobs"),
            self.bold("Scopes")
        )
    }

    /// Formats a single provider line.
    pub fn format_provider_line(&self, desc: &ProviderDescriptor) -> String {
        format!(
            "{:<12} {:<11} {:<7} {:<10} {:<5} {}",
            desc.display_name(),
            desc.identifier(),
            self.flag(desc.metadata.supports_boards),
            self.flag(desc.metadata.supports_analytics),
            desc.metadata.max_concurrent_jobs,
            desc.metadata.required_scopes.join(",")
        )
    }

    /// Formats an authorization request.
    pub fn format_authorization(&self, request: &AuthorizationRequest) -> String {
        [
            format!("{} {}", self.bold("Open:"), self.cyan(&request.authorize_url)),
            format!("{} {}", self.bold("State:"), request.state),
            format!("{} {}", self.bold("Code verifier:"), request.code_verifier),
            self.dim("Keep the code verifier for `postmill exchange`."),
        ]
        .join("\n")
    }

    /// Formats credentials without revealing tokens.
    pub fn format_credentials(&self, credentials: &Credentials) -> String {
        let mut lines = vec![
            format!(
                "{} {} (@{})",
                self.bold("Account:"),
                credentials.display_name,
                credentials.username
            ),
            format!("{} {}", self.bold("User ID:"), credentials.platform_user_id),
            format!(
                "{} {}",
                self.bold("Expires in:"),
                format_duration(credentials.expires_in_seconds)
            ),
            format!(
                "{} {}",
                self.bold("Refresh token:"),
                if credentials.refresh_token.is_some() {
                    self.green("present")
                } else {
                    self.dim("none")
                }
            ),
        ];
        if !credentials.granted_scopes.is_empty() {
            lines.push(format!(
                "{} {}",
                self.bold("Scopes:"),
                credentials.granted_scopes.join(", ")
            ));
        }
        lines.join("\n")
    }

    /// Formats a board list.
    pub fn format_boards(&self, boards: &[Board]) -> String {
        if boards.is_empty() {
            return self.dim("No boards");
        }
        let width = boards.iter().map(|b| b.id.len()).max().unwrap_or(0);
        boards
            .iter()
            .map(|b| format!("{:<width$}  {}", self.dim(&b.id), b.name, width = width))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Formats a publish result.
    pub fn format_publish_result(&self, result: &PublishResult) -> String {
        let status = if result.is_success() {
            self.green("✓ Published")
        } else {
            self.red("✗ Failed")
        };
        [
            format!("{status} {}", result.post_description_id),
            format!("{} {}", self.bold("Post ID:"), result.platform_post_id),
            format!("{} {}", self.bold("URL:"), self.cyan(&result.release_url)),
        ]
        .join("\n")
    }

    /// Formats analytics series, one block per metric.
    pub fn format_analytics(&self, series: &[AnalyticsSeries]) -> String {
        if series.is_empty() {
            return self.dim("No analytics data");
        }
        let mut lines = Vec::new();
        for s in series {
            lines.push(self.bold(&s.label));
            for point in &s.data {
                lines.push(format!("  {}  {}", point.date, format_total(point.total)));
            }
            if s.data.is_empty() {
                lines.push(format!("  {}", self.dim("no data")));
            }
        }
        lines.join("\n")
    }

    /// Formats an error message.
    pub fn format_error(&self, provider: &str, error: &str) -> String {
        format!("{}: {} - {}", self.bold(provider), self.red("Error"), error)
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn flag(&self, value: bool) -> String {
        if value { self.green("✓") } else { self.dim("−") }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Formats seconds as `1h 30m`, `45m` or `30s`.
fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    match (hours, minutes) {
        (0, 0) => format!("{seconds}s"),
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Drops the fraction of whole numbers; rates keep two decimals.
fn format_total(total: f64) -> String {
    if total.fract() == 0.0 {
        format!("{total:.0}")
    } else {
        format!("{total:.2}")
    }
}
