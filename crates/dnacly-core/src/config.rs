// ── Runtime connection configuration ──
//
// These types describe *how* to reach a DNA Center controller. They carry
// credential data and connection tuning, but never touch disk. The CLI
// builds a `ControllerConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use dnacly_api::transport::{DEFAULT_TIMEOUT, TlsMode, TransportConfig};
use dnacly_api::{ControllerClient, Credentials};

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs). Default for sandbox controllers.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for one controller connection.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub credentials: Credentials,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Replaces `https://{host}:{port}` when set (reverse proxies, mocks).
    pub base_url: Option<Url>,
}

impl ControllerConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            tls: TlsVerification::default(),
            timeout: DEFAULT_TIMEOUT,
            base_url: None,
        }
    }

    /// Translate to the api crate's transport settings.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }

    /// The URL the client will talk to.
    pub fn url(&self) -> Result<Url, CoreError> {
        match &self.base_url {
            Some(url) => Ok(url.clone()),
            None => Ok(self.credentials.base_url()?),
        }
    }

    /// Build a fresh, token-less client for one session.
    pub fn build_client(&self) -> Result<ControllerClient, CoreError> {
        let client = ControllerClient::with_base_url(
            self.url()?,
            self.credentials.clone(),
            &self.transport(),
        )?;
        Ok(client)
    }
}
