// Read-through token cache over a caller session.

use tracing::debug;

use dnacly_api::{ControllerClient, Token};

use super::Session;
use crate::error::CoreError;

/// Avoids redundant authentication within one caller session.
///
/// Two branches and nothing else: a cached token is installed into the
/// client as-is; a miss authenticates once and caches the result. There is
/// no expiry or eviction. A stale token surfaces as an ordinary error on
/// the next controller call and is not retried.
#[derive(Debug)]
pub struct SessionTokenCache<S> {
    session: S,
}

impl<S: Session> SessionTokenCache<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Make sure `client` holds a token for this session.
    ///
    /// Hit: installs the session's token, no network call. Miss: calls
    /// [`ControllerClient::authenticate`] and stores the new token in the
    /// session. On failure nothing is stored and the error is returned.
    pub async fn ensure_token(&mut self, client: &ControllerClient) -> Result<(), CoreError> {
        if let Some(token) = self.session.token() {
            debug!("reusing session token");
            client.set_token(token);
            return Ok(());
        }

        debug!("no session token, authenticating");
        let token = client.authenticate().await.map_err(auth_failure)?;
        self.session.store_token(token);
        Ok(())
    }

    /// Cache a token obtained by an explicit login.
    pub fn remember(&mut self, token: Token) {
        self.session.store_token(token);
    }

    /// Drop the cached token.
    pub fn forget(&mut self) {
        self.session.clear();
    }
}

/// Fold any failure of the token request into [`CoreError::AuthenticationFailed`].
pub(crate) fn auth_failure(err: dnacly_api::Error) -> CoreError {
    let message = match err {
        dnacly_api::Error::Authentication { message } => message,
        other => other.to_string(),
    };
    CoreError::AuthenticationFailed { message }
}
