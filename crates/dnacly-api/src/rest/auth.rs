// Token authentication
//
// Basic-auth POST against the system token endpoint. The controller answers
// `{ "Token": "<opaque>" }`; the token is stored on the client and sent as
// `X-Auth-Token` on every inventory call.

use secrecy::ExposeSecret;
use tracing::{debug, info};

use crate::auth::Token;
use crate::error::Error;
use crate::rest::client::{ControllerClient, describe_failure, preview};
use crate::rest::models::TokenResponse;

/// Token issuance endpoint.
pub const AUTH_TOKEN_PATH: &str = "/dna/system/api/v1/auth/token";

impl ControllerClient {
    /// Request a fresh token with the configured username and password.
    ///
    /// `POST /dna/system/api/v1/auth/token` with HTTP basic auth.
    ///
    /// On success the token is stored on the client and returned. On any
    /// failure (transport, TLS, timeout, non-2xx, body without `Token`)
    /// the previously stored token is left exactly as it was.
    pub async fn authenticate(&self) -> Result<Token, Error> {
        let url = self.api_url(AUTH_TOKEN_PATH)?;
        let creds = self.credentials();

        debug!(username = %creds.username, "requesting token at {}", url);

        let resp = self
            .http()
            .post(url)
            .basic_auth(&creds.username, Some(creds.password.expose_secret()))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("token request rejected ({})", describe_failure(status, &body)),
            });
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&body)),
                body: body.clone(),
            })?;

        let token = parsed
            .token
            .and_then(Token::new)
            .ok_or_else(|| Error::Deserialization {
                message: "token response has no non-empty `Token` field".into(),
                body,
            })?;

        self.set_token(token.clone());
        info!("authenticated with controller");
        Ok(token)
    }
}
