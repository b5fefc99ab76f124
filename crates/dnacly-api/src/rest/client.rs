// DNA Center REST HTTP client
//
// Wraps `reqwest::Client` with controller URL construction, token storage,
// and `{ response: [...] }` envelope unwrapping. Endpoint groups (auth,
// devices, interfaces) are inherent methods in sibling files so this module
// stays focused on transport mechanics.

use std::sync::{PoisonError, RwLock};

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::{Credentials, Token};
use crate::error::Error;
use crate::rest::models::ResponseEnvelope;
use crate::transport::{DEFAULT_TIMEOUT, TransportConfig};

/// Header carrying the session token on every inventory request.
pub const AUTH_HEADER: &str = "X-Auth-Token";

/// Longest body excerpt carried in an error message.
const BODY_PREVIEW_CHARS: usize = 200;

/// HTTP client for one controller and one caller session.
///
/// Holds the current [`Token`] behind a lock so `&self` methods can install
/// or replace it. The token is caller state: build one client per session
/// (one CLI run, one web session) rather than sharing an instance across
/// tenants, or one caller's login will overwrite another's.
pub struct ControllerClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    timeout_secs: u64,
    token: RwLock<Option<Token>>,
}

impl ControllerClient {
    /// Create a client from credentials and a `TransportConfig`.
    ///
    /// The base URL is `https://{host}:{port}` from the credentials.
    pub fn new(credentials: Credentials, transport: &TransportConfig) -> Result<Self, Error> {
        let base_url = credentials.base_url()?;
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            credentials,
            timeout_secs: transport.timeout_secs(),
            token: RwLock::new(None),
        })
    }

    /// Like [`new`](Self::new), but against an explicit base URL instead of
    /// the credentials' host and port.
    pub fn with_base_url(
        base_url: Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            credentials,
            timeout_secs: transport.timeout_secs(),
            token: RwLock::new(None),
        })
    }

    /// Create a client with a pre-built `reqwest::Client` and explicit base URL.
    ///
    /// The base URL overrides the credentials' host and port. Useful for
    /// pointing at a mock server or a reverse proxy.
    pub fn with_client(http: reqwest::Client, base_url: Url, credentials: Credentials) -> Self {
        Self {
            http,
            base_url,
            credentials,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            token: RwLock::new(None),
        }
    }

    /// The credentials this client authenticates with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── Token management ─────────────────────────────────────────────

    /// The currently installed token, if any.
    pub fn token(&self) -> Option<Token> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Install a token obtained elsewhere (e.g. from a session cache).
    pub fn set_token(&self, token: Token) {
        trace!("installing session token");
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    pub fn clear_token(&self) {
        trace!("clearing session token");
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Fail fast with [`Error::MissingToken`] before any network I/O.
    pub(crate) fn require_token(&self) -> Result<Token, Error> {
        self.token().ok_or(Error::MissingToken)
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an absolute API path: `{base}{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Map a reqwest failure, surfacing timeouts with the configured limit.
    pub(crate) fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }

    /// Send an authenticated GET and unwrap the `response` envelope.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &Token,
    ) -> Result<Vec<T>, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .header(AUTH_HEADER, token.expose())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.parse_envelope(resp).await
    }

    /// Parse the `{ response: [...] }` envelope, returning the items on a 2xx
    /// or an [`Error::Http`] otherwise. A 2xx without `response` yields no items.
    async fn parse_envelope<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<Vec<T>, Error> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                message: describe_failure(status, &body),
            });
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        let envelope: ResponseEnvelope<T> = serde_json::from_str(&body).map_err(|e| {
            Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&body)),
                body: body.clone(),
            }
        })?;

        Ok(envelope.into_items())
    }
}

/// First few hundred characters of a body, split on a char boundary.
pub(crate) fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

/// Status line plus a body excerpt, or just the status line for empty bodies.
pub(crate) fn describe_failure(status: reqwest::StatusCode, body: &str) -> String {
    let excerpt = preview(body.trim());
    if excerpt.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {excerpt}")
    }
}
