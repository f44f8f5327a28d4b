//! TikTok OAuth: authorize URL, code exchange and refresh.
//!
//! TikTok names the client id `client_key` and expects the client
//! credentials in the form body rather than a Basic auth header.

use postmill_core::{AuthorizationRequest, Credentials, ProviderError, ProviderKind};
use postmill_transport::HttpRequest;
use tracing::{debug, instrument};

use super::api::TOKEN_PATH;
use super::descriptor::AUTHORIZE_URL;
use super::error::TikTokInspector;
use super::provider::TikTokProvider;
use crate::oauth::{TokenGrant, authorize_url, parse_token_grant};

/// Lifetime assumed when the token response omits `expires_in`.
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 23 * 60 * 60;

/// Strips the dashes TikTok puts in `open_id`.
fn platform_user_id(open_id: &str) -> String {
    open_id.replace('-', "")
}

impl TikTokProvider {
    fn redirect_uri(&self) -> String {
        self.config.redirect_uri(ProviderKind::TikTok)
    }

    pub(crate) fn authorization_request(&self) -> Result<AuthorizationRequest, ProviderError> {
        let state = self.ctx.ids.generate()?;
        let code_verifier = self.ctx.ids.generate()?;
        let scope = self.scopes.join(",");
        let redirect_uri = self.redirect_uri();

        let authorize_url = authorize_url(
            AUTHORIZE_URL,
            &[
                ("client_key", self.config.client_id.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("state", state.as_str()),
                ("response_type", "code"),
                ("scope", scope.as_str()),
            ],
        )?;

        Ok(AuthorizationRequest {
            authorize_url,
            code_verifier,
            state,
        })
    }

    async fn token_request(&self, mut form: Vec<(&str, String)>) -> Result<TokenGrant, ProviderError> {
        form.splice(
            0..0,
            [
                ("client_key", self.config.client_id.clone()),
                ("client_secret", self.config.client_secret.clone()),
            ],
        );
        let request = HttpRequest::post(self.url(TOKEN_PATH)).form(form);
        let response = self.ctx.transport.send(request).await?;
        parse_token_grant(&response, &TikTokInspector)
    }

    async fn credentials_for(
        &self,
        grant: TokenGrant,
        fallback_refresh: Option<&str>,
    ) -> Result<Credentials, ProviderError> {
        let user = self.user_info(&grant.access_token).await?;
        debug!(open_id = %user.open_id, "TikTok account resolved");

        Ok(Credentials {
            platform_user_id: platform_user_id(&user.open_id),
            display_name: user.display_name,
            access_token: grant.access_token,
            refresh_token: grant
                .refresh_token
                .or_else(|| fallback_refresh.map(str::to_string)),
            expires_in_seconds: grant.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS),
            avatar_url: user.avatar_url.filter(|a| !a.is_empty()),
            username: user.username,
            granted_scopes: grant.scopes,
        })
    }

    #[instrument(skip(self, code, code_verifier))]
    pub(crate) async fn exchange(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<Credentials, ProviderError> {
        let grant = self
            .token_request(vec![
                ("code", code.to_string()),
                ("grant_type", "authorization_code".to_string()),
                ("code_verifier", code_verifier.to_string()),
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
            ])
            .await?;

        self.credentials_for(grant, Some(refresh_token)).await
    }
}
