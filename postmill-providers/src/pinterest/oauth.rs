//! Pinterest OAuth: authorize URL, code exchange and refresh.
//!
//! The token endpoint authenticates the client with HTTP Basic auth.

use postmill_core::{AuthorizationRequest, Credentials, ProviderError, ProviderKind};
use postmill_transport::HttpRequest;
use tracing::{debug, instrument};

use super::api::TOKEN_PATH;
use super::descriptor::AUTHORIZE_URL;
use super::error::PinterestInspector;
use super::provider::PinterestProvider;
use crate::oauth::{TokenGrant, authorize_url, parse_token_grant};

/// Pinterest access tokens live 30 days.
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 30 * 24 * 60 * 60;

impl PinterestProvider {
    fn redirect_uri(&self) -> String {
        self.config.redirect_uri(ProviderKind::Pinterest)
    }

    pub(crate) fn authorization_request(&self) -> Result<AuthorizationRequest, ProviderError> {
        let state = self.ctx.ids.generate()?;
        let code_verifier = self.ctx.ids.generate()?;
        let scope = self.scopes.join(",");
        let redirect_uri = self.redirect_uri();

        let authorize_url = authorize_url(
            AUTHORIZE_URL,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", scope.as_str()),
                ("state", state.as_str()),
            ],
        )?;

        Ok(AuthorizationRequest {
            authorize_url,
            code_verifier,
            state,
        })
    }

    async fn token_request(&self, form: Vec<(&str, String)>) -> Result<TokenGrant, ProviderError> {
        let request = HttpRequest::post(self.url(TOKEN_PATH))
            .basic_auth(&self.config.client_id, &self.config.client_secret)
            .form(form);
        let response = self.ctx.transport.send(request).await?;
        parse_token_grant(&response, &PinterestInspector)
    }

    /// Completes the profile lookup shared by exchange and refresh.
    async fn credentials_for(
        &self,
        grant: TokenGrant,
        fallback_refresh: Option<&str>,
    ) -> Result<Credentials, ProviderError> {
        let account = self.user_account(&grant.access_token).await?;
        debug!(user_id = %account.id, "Pinterest account resolved");

        Ok(Credentials {
            platform_user_id: account.id,
            display_name: account.username.clone(),
            access_token: grant.access_token,
            refresh_token: grant
                .refresh_token
                .or_else(|| fallback_refresh.map(str::to_string)),
            expires_in_seconds: grant.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS),
            avatar_url: account.profile_image.filter(|p| !p.is_empty()),
            username: account.username,
            granted_scopes: grant.scopes,
        })
    }

    #[instrument(skip(self, code))]
    pub(crate) async fn exchange(&self, code: &str) -> Result<Credentials, ProviderError> {
        let grant = self
            .token_request(vec![
                ("grant_type", "authorization_code".to_string()),
                ("code", code.to_string()),
                ("redirect_uri", self.redirect_uri()),
            ])
            .await?;

        postmill_core::validate_scopes(&grant.scopes, &self.scopes)?;
        self.credentials_for(grant, None).await
    }

    #[instrument(skip(self, refresh_token))]
    pub(crate) async fn refresh_credentials(
        &self,
        refresh_token: &str,
    ) -> Result<Credentials, ProviderError> {
        let grant = self
            .token_request(vec![
                ("grant_type", "refresh_token".to_string()),
                ("refresh_token", refresh_token.to_string()),
                ("scope", self.scopes.join(",")),
                ("redirect_uri", self.redirect_uri()),
            ])
            .await?;

        self.credentials_for(grant, Some(refresh_token)).await
    }
}
