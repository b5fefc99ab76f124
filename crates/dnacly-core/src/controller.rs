// ── Controller facade ──
//
// The caller-facing surface for one session. Each operation runs the
// token cache, the REST client and then the audit sink, in that order,
// and reports exactly one audit record after it completes.

use std::sync::Arc;

use tracing::{debug, info};

use dnacly_api::{ControllerClient, Device, Interface, Token};

use crate::audit::{AuditAction, AuditRecord, AuditSink};
use crate::config::ControllerConfig;
use crate::error::CoreError;
use crate::session::{Session, SessionTokenCache, auth_failure};

// ── Controller ───────────────────────────────────────────────────

/// One caller session against one DNA Center controller.
///
/// Owns its own [`ControllerClient`], so the installed token never leaks
/// between sessions. The audit sink is shared and may be the same across
/// many controllers.
pub struct Controller<S: Session> {
    client: ControllerClient,
    tokens: SessionTokenCache<S>,
    audit: Arc<dyn AuditSink>,
}

impl<S: Session> Controller<S> {
    /// Build a token-less client from `config` and wrap it.
    pub fn new(
        config: &ControllerConfig,
        session: S,
        audit: Arc<dyn AuditSink>,
    ) -> Result<Self, CoreError> {
        let client = config.build_client()?;
        debug!(url = %client.base_url(), "controller session created");
        Ok(Self::from_client(client, session, audit))
    }

    /// Wrap an existing client (mock servers, custom `reqwest` setups).
    pub fn from_client(client: ControllerClient, session: S, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            client,
            tokens: SessionTokenCache::new(session),
            audit,
        }
    }

    pub fn client(&self) -> &ControllerClient {
        &self.client
    }

    pub fn session(&self) -> &S {
        self.tokens.session()
    }

    // ── Operations ───────────────────────────────────────────────

    /// Explicit login: always requests a fresh token, ignoring any cached one.
    ///
    /// The new token replaces the session's on success. On failure the
    /// session keeps whatever it held before.
    pub async fn authenticate(&mut self) -> Result<Token, CoreError> {
        let outcome = self.client.authenticate().await.map_err(auth_failure);
        if let Ok(token) = &outcome {
            self.tokens.remember(token.clone());
            info!(username = %self.client.credentials().username, "session token refreshed");
        }
        self.audit(AuditRecord::from_outcome(AuditAction::Authenticate, &outcome));
        outcome
    }

    /// Every device in the controller inventory, authenticating first if the
    /// session holds no token.
    pub async fn list_devices(&mut self) -> Result<Vec<Device>, CoreError> {
        let outcome = self.fetch_devices().await;
        self.audit(AuditRecord::from_outcome(AuditAction::ListDevices, &outcome));
        outcome
    }

    /// The interfaces of the device whose management IP is `device_ip`.
    ///
    /// Surrounding whitespace is ignored. The match is otherwise exact.
    pub async fn list_interfaces_for(
        &mut self,
        device_ip: &str,
    ) -> Result<Vec<Interface>, CoreError> {
        let device_ip = device_ip.trim();
        let outcome = self.fetch_interfaces(device_ip).await;
        self.audit(
            AuditRecord::from_outcome(AuditAction::ShowInterfaces, &outcome)
                .with_device_ip(device_ip),
        );
        outcome
    }

    // ── Internals ────────────────────────────────────────────────

    async fn fetch_devices(&mut self) -> Result<Vec<Device>, CoreError> {
        self.tokens.ensure_token(&self.client).await?;
        Ok(self.client.list_devices().await?)
    }

    async fn fetch_interfaces(&mut self, device_ip: &str) -> Result<Vec<Interface>, CoreError> {
        self.tokens.ensure_token(&self.client).await?;
        Ok(self.client.list_interfaces(device_ip).await?)
    }

    fn audit(&self, record: AuditRecord) {
        self.audit.record(record);
    }
}
